//! End-to-end behavior of the workspace core: sorting, comparison, history,
//! layout and keybindings working together.

use std::path::PathBuf;

use panedeck::compare::{SizeRank, TimeRank};
use panedeck::fs::{FileEntry, MemoryLister};
use panedeck::history::DirectoryHistory;
use panedeck::input::{KeyChord, KeybindingRegistry};
use panedeck::layout::{calculate_layout, LayoutMode};
use panedeck::sort::{sort_files, SortCriterion, SortDirection};
use panedeck::workspace::{Workspace, WorkspaceSettings};

fn file(name: &str, size: u64, mtime: i64) -> FileEntry {
    FileEntry::file(name, "", size, mtime)
}

fn workspace(lister: &MemoryLister, paths: &[&str]) -> Workspace {
    let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
    Workspace::with_panes(WorkspaceSettings::default(), DirectoryHistory::new(), &paths, lister)
}

#[test]
fn comparison_ranks_sizes_and_times_across_three_panes() {
    let lister = MemoryLister::new()
        .with_dir("/a", vec![file("report.pdf", 100, 1_000_000), file("solo.txt", 1, 0)])
        .with_dir("/b", vec![file("report.pdf", 200, 1_000_400)])
        .with_dir("/c", vec![file("report.pdf", 300, 1_000_800)]);
    let ws = workspace(&lister, &["/a", "/b", "/c"]);

    let index = ws.comparison_index();
    assert_eq!(index.shared_filenames(), vec!["report.pdf"]);
    assert!(index.get(0, "solo.txt").is_none());

    let state = index.get(1, "report.pdf").unwrap();
    assert_eq!(state.state.member_pane_indices, vec![0, 1, 2]);
    assert_eq!(state.size_rank, vec![Some(SizeRank::Smallest), None, Some(SizeRank::Largest)]);
    assert_eq!(state.time_rank, vec![Some(TimeRank::Equal); 3]);
}

#[test]
fn comparison_skips_panes_without_the_file() {
    let lister = MemoryLister::new()
        .with_dir("/a", vec![file("x", 1, 0)])
        .with_dir("/b", vec![file("y", 1, 0)])
        .with_dir("/c", vec![file("x", 1, 0)]);
    let ws = workspace(&lister, &["/a", "/b", "/c"]);

    let index = ws.comparison_index();
    assert_eq!(index.get(0, "x").unwrap().state.member_pane_indices, vec![0, 2]);
    assert!(index.get(1, "x").is_none());
}

#[test]
fn cursor_is_restored_by_name_after_the_listing_changes() {
    let mut lister = MemoryLister::new()
        .with_dir("/top", vec![FileEntry::directory("work", "", 0)])
        .with_dir(
            "/top/work",
            vec![file("a.txt", 1, 0), file("b.txt", 1, 0), file("c.txt", 1, 0)],
        );
    let mut ws = workspace(&lister, &["/top/work"]);

    ws.select(1);
    assert_eq!(ws.panes()[0].selected_name(), Some("b.txt"));
    ws.go_parent(&lister);

    // two new files sort ahead of b.txt
    lister.insert_dir(
        "/top/work",
        vec![
            file("a.txt", 1, 0),
            file("a1.txt", 1, 0),
            file("a2.txt", 1, 0),
            file("b.txt", 1, 0),
        ],
    );
    ws.enter_selected(&lister);
    assert_eq!(ws.panes()[0].cursor, Some(3));
    assert_eq!(ws.panes()[0].selected_name(), Some("b.txt"));
}

#[test]
fn recent_directories_are_most_recent_first() {
    let lister = MemoryLister::new()
        .with_dir("/", vec![FileEntry::directory("x", "", 0), FileEntry::directory("y", "", 0)])
        .with_dir("/x", vec![])
        .with_dir("/y", vec![]);
    let mut ws = workspace(&lister, &["/"]);

    ws.enter_selected(&lister); // x
    ws.go_parent(&lister);
    ws.cursor_last();
    ws.enter_selected(&lister); // y

    let recent: Vec<PathBuf> = ws
        .history()
        .recent_directories(0)
        .iter()
        .map(|entry| entry.path.clone())
        .collect();
    assert_eq!(
        recent,
        vec![PathBuf::from("/"), PathBuf::from("/x")]
    );
}

#[test]
fn per_pane_sort_keeps_the_cursor_entry() {
    let lister = MemoryLister::new().with_dir(
        "/d",
        vec![file("big", 300, 0), file("mid", 200, 0), file("small", 100, 0)],
    );
    let mut ws = workspace(&lister, &["/d"]);
    ws.select(2); // small

    ws.cycle_sort_criterion(); // name -> size
    assert_eq!(ws.panes()[0].filenames(), vec!["small", "mid", "big"]);
    assert_eq!(ws.panes()[0].selected_name(), Some("small"));

    ws.toggle_sort_direction();
    assert_eq!(ws.panes()[0].filenames(), vec!["big", "mid", "small"]);
    assert_eq!(ws.panes()[0].selected_name(), Some("small"));
}

#[test]
fn sort_pipeline_properties_hold_on_mixed_listing() {
    let files = vec![
        file("file10.txt", 5, 3),
        FileEntry::directory("zeta", "", 1),
        file("file2.txt", 5, 2),
        file("file1.txt", 5, 1),
        FileEntry::directory("alpha", "", 9),
    ];
    for criterion in [
        SortCriterion::Name,
        SortCriterion::Size,
        SortCriterion::Mtime,
        SortCriterion::Extension,
    ] {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = sort_files(&files, criterion, direction, true);
            let first_file = sorted.iter().position(|e| !e.is_directory).unwrap();
            assert!(sorted[first_file..].iter().all(|e| !e.is_directory));
            assert_eq!(sort_files(&sorted, criterion, direction, true), sorted);
        }
    }

    let names: Vec<String> = sort_files(&files, SortCriterion::Name, SortDirection::Asc, false)
        .into_iter()
        .filter(|e| !e.is_directory)
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["file1.txt", "file2.txt", "file10.txt"]);
}

#[test]
fn layout_tiles_the_container_for_every_split_mode() {
    for mode in [LayoutMode::Tile, LayoutMode::OneRow, LayoutMode::OneColumn] {
        for panes in 1..=4 {
            let rects = calculate_layout(101, 37, panes, mode);
            let area: u64 = rects.iter().map(|r| r.area()).sum();
            assert_eq!(area, 101 * 37, "{mode:?} with {panes} panes");
        }
    }
}

#[test]
fn registry_matches_exact_modifiers_only() {
    let registry = KeybindingRegistry::with_defaults();
    assert_eq!(registry.match_chord(&KeyChord::new("s")), Some("cycle_sort"));
    assert_eq!(registry.match_chord(&KeyChord::shift("S")), Some("toggle_sort_direction"));
    assert_eq!(registry.match_chord(&KeyChord::ctrl("s")), None);
    assert_eq!(registry.match_chord(&KeyChord::alt("ArrowLeft")), Some("back"));
    assert_eq!(registry.match_chord(&KeyChord::new("ArrowLeft")), Some("parent"));
}
