//! Cross-pane comparison index.
//!
//! Groups the entries of all panes by filename and keeps only the names that
//! appear in at least two panes. The enhanced index additionally classifies
//! each member's size and modification time relative to the other members, so
//! the renderer can highlight the largest or most recent copy.

use std::collections::HashMap;

use serde::Serialize;

use crate::fs::FileEntry;

/// Modification times closer than this are considered equal; filesystems
/// often store mtimes with second precision.
pub const MTIME_TOLERANCE_MS: i64 = 1000;

/// Per-filename record of the panes that contain it.
///
/// The three vectors are parallel and ordered by pane index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareState {
    pub member_pane_indices: Vec<usize>,
    pub sizes_by_member: Vec<u64>,
    pub mod_times_by_member: Vec<i64>,
}

impl CompareState {
    /// Position of a pane within the member vectors
    pub fn member_position(&self, pane_index: usize) -> Option<usize> {
        self.member_pane_indices
            .iter()
            .position(|&member| member == pane_index)
    }

    /// Whether the pane holds this filename
    pub fn is_member(&self, pane_index: usize) -> bool {
        self.member_position(pane_index).is_some()
    }
}

/// Size classification of one member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeRank {
    Equal,
    Smallest,
    Largest,
}

/// Modification-time classification of one member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRank {
    Equal,
    Earliest,
    Latest,
}

/// A [`CompareState`] with ranks parallel to its member vectors.
///
/// A `None` rank marks a value strictly between the extremes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancedCompareState {
    #[serde(flatten)]
    pub state: CompareState,
    pub size_rank: Vec<Option<SizeRank>>,
    pub time_rank: Vec<Option<TimeRank>>,
}

impl EnhancedCompareState {
    fn from_state(state: CompareState) -> Self {
        let size_rank = rank_sizes(&state.sizes_by_member);
        let time_rank = rank_times(&state.mod_times_by_member);
        Self {
            state,
            size_rank,
            time_rank,
        }
    }

    /// Size rank of a member pane
    pub fn size_rank_of(&self, pane_index: usize) -> Option<SizeRank> {
        self.state
            .member_position(pane_index)
            .and_then(|pos| self.size_rank[pos])
    }

    /// Time rank of a member pane
    pub fn time_rank_of(&self, pane_index: usize) -> Option<TimeRank> {
        self.state
            .member_position(pane_index)
            .and_then(|pos| self.time_rank[pos])
    }
}

/// Filename-keyed index over all panes.
#[derive(Debug, Clone, Default)]
pub struct ComparisonIndex {
    entries: HashMap<String, CompareState>,
}

impl ComparisonIndex {
    /// Build the index from one listing per pane, in pane order.
    ///
    /// A name listed twice in the same pane (a file and a directory sharing a
    /// name) is recorded once, from its first occurrence.
    pub fn build<L: AsRef<[FileEntry]>>(pane_file_lists: &[L]) -> Self {
        let mut accumulated: HashMap<&str, CompareState> = HashMap::new();

        for (pane_index, files) in pane_file_lists.iter().enumerate() {
            for file in files.as_ref() {
                let state = accumulated
                    .entry(file.name.as_str())
                    .or_insert_with(|| CompareState {
                        member_pane_indices: Vec::new(),
                        sizes_by_member: Vec::new(),
                        mod_times_by_member: Vec::new(),
                    });
                if state.member_pane_indices.last() == Some(&pane_index) {
                    continue;
                }
                state.member_pane_indices.push(pane_index);
                state.sizes_by_member.push(file.size_bytes);
                state.mod_times_by_member.push(file.modified_at_ms);
            }
        }

        let entries = accumulated
            .into_iter()
            .filter(|(_, state)| state.member_pane_indices.len() >= 2)
            .map(|(name, state)| (name.to_string(), state))
            .collect();

        Self { entries }
    }

    /// State for a filename, only if `pane_index` is one of its members.
    pub fn get(&self, pane_index: usize, filename: &str) -> Option<&CompareState> {
        self.entries
            .get(filename)
            .filter(|state| state.is_member(pane_index))
    }

    /// All filenames present in two or more panes, sorted.
    pub fn shared_filenames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of shared filenames
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no filename is shared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// [`ComparisonIndex`] with size and time ranks.
#[derive(Debug, Clone, Default)]
pub struct EnhancedComparisonIndex {
    entries: HashMap<String, EnhancedCompareState>,
}

impl EnhancedComparisonIndex {
    /// Build the ranked index from one listing per pane
    pub fn build<L: AsRef<[FileEntry]>>(pane_file_lists: &[L]) -> Self {
        Self::from(ComparisonIndex::build(pane_file_lists))
    }

    /// Ranked state for a filename, only if `pane_index` is a member.
    pub fn get(&self, pane_index: usize, filename: &str) -> Option<&EnhancedCompareState> {
        self.entries
            .get(filename)
            .filter(|state| state.state.is_member(pane_index))
    }

    /// All filenames present in two or more panes, sorted.
    pub fn shared_filenames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of shared filenames
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no filename is shared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<ComparisonIndex> for EnhancedComparisonIndex {
    fn from(index: ComparisonIndex) -> Self {
        let entries = index
            .entries
            .into_iter()
            .map(|(name, state)| (name, EnhancedCompareState::from_state(state)))
            .collect();
        Self { entries }
    }
}

/// Build the plain index, see [`ComparisonIndex::build`]
pub fn build_comparison_index<L: AsRef<[FileEntry]>>(pane_file_lists: &[L]) -> ComparisonIndex {
    ComparisonIndex::build(pane_file_lists)
}

/// Build the ranked index, see [`EnhancedComparisonIndex::build`]
pub fn build_enhanced_comparison_index<L: AsRef<[FileEntry]>>(
    pane_file_lists: &[L],
) -> EnhancedComparisonIndex {
    EnhancedComparisonIndex::build(pane_file_lists)
}

fn rank_sizes(sizes: &[u64]) -> Vec<Option<SizeRank>> {
    let (Some(&min), Some(&max)) = (sizes.iter().min(), sizes.iter().max()) else {
        return Vec::new();
    };
    sizes
        .iter()
        .map(|&size| {
            if min == max {
                Some(SizeRank::Equal)
            } else if size == min {
                Some(SizeRank::Smallest)
            } else if size == max {
                Some(SizeRank::Largest)
            } else {
                None
            }
        })
        .collect()
}

/// Rank modification times with [`MTIME_TOLERANCE_MS`] slack.
///
/// When the whole spread fits inside the tolerance every member is `Equal`.
/// Otherwise members within the tolerance of an extreme take that extreme's
/// rank (the nearer one if both qualify).
fn rank_times(times: &[i64]) -> Vec<Option<TimeRank>> {
    let (Some(&min), Some(&max)) = (times.iter().min(), times.iter().max()) else {
        return Vec::new();
    };
    let spread = max.saturating_sub(min);
    times
        .iter()
        .map(|&time| {
            if spread <= MTIME_TOLERANCE_MS {
                return Some(TimeRank::Equal);
            }
            let from_min = time - min;
            let from_max = max - time;
            match (from_min <= MTIME_TOLERANCE_MS, from_max <= MTIME_TOLERANCE_MS) {
                (true, true) if from_max < from_min => Some(TimeRank::Latest),
                (true, _) => Some(TimeRank::Earliest),
                (false, true) => Some(TimeRank::Latest),
                (false, false) => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64, mtime: i64) -> FileEntry {
        FileEntry::file(name, format!("/x/{name}"), size, mtime)
    }

    #[test]
    fn single_pane_names_are_excluded() {
        let panes = vec![
            vec![file("common.txt", 1, 0), file("only_left.txt", 1, 0)],
            vec![file("common.txt", 1, 0), file("only_right.txt", 1, 0)],
        ];
        let index = build_comparison_index(&panes);
        assert_eq!(index.shared_filenames(), ["common.txt"]);
        assert!(index.get(0, "only_left.txt").is_none());
        assert!(index.get(1, "only_right.txt").is_none());
    }

    #[test]
    fn members_are_recorded_in_pane_order() {
        let panes = vec![
            vec![file("a", 10, 100)],
            vec![file("b", 1, 1)],
            vec![file("a", 30, 300)],
        ];
        let index = build_comparison_index(&panes);
        let state = index.get(0, "a").unwrap();
        assert_eq!(state.member_pane_indices, vec![0, 2]);
        assert_eq!(state.sizes_by_member, vec![10, 30]);
        assert_eq!(state.mod_times_by_member, vec![100, 300]);
    }

    #[test]
    fn get_rejects_non_member_panes() {
        let panes = vec![vec![file("a", 1, 0)], vec![file("b", 1, 0)], vec![file("a", 1, 0)]];
        let index = build_comparison_index(&panes);
        assert!(index.get(0, "a").is_some());
        assert!(index.get(2, "a").is_some());
        assert!(index.get(1, "a").is_none());
    }

    #[test]
    fn shared_filenames_are_sorted() {
        let panes = vec![
            vec![file("zeta", 0, 0), file("alpha", 0, 0), file("mid", 0, 0)],
            vec![file("mid", 0, 0), file("zeta", 0, 0), file("alpha", 0, 0)],
        ];
        assert_eq!(
            build_comparison_index(&panes).shared_filenames(),
            ["alpha", "mid", "zeta"]
        );
    }

    #[test]
    fn empty_and_single_pane_inputs_yield_empty_index() {
        let none: Vec<Vec<FileEntry>> = Vec::new();
        assert!(build_comparison_index(&none).is_empty());
        let one = vec![vec![file("a", 0, 0)]];
        assert!(build_enhanced_comparison_index(&one).is_empty());
    }

    #[test]
    fn duplicate_name_in_one_pane_counts_once() {
        let panes = vec![
            vec![file("data", 5, 0), FileEntry::directory("data", "/x/data", 0)],
            vec![file("other", 1, 0)],
        ];
        assert!(build_comparison_index(&panes).is_empty());
    }

    #[test]
    fn size_ranks_mark_extremes_and_leave_middle_unranked() {
        let panes = vec![
            vec![file("f", 100, 0)],
            vec![file("f", 200, 0)],
            vec![file("f", 300, 0)],
        ];
        let index = build_enhanced_comparison_index(&panes);
        let state = index.get(1, "f").unwrap();
        assert_eq!(
            state.size_rank,
            vec![Some(SizeRank::Smallest), None, Some(SizeRank::Largest)]
        );
        assert_eq!(state.size_rank_of(2), Some(SizeRank::Largest));
    }

    #[test]
    fn equal_sizes_rank_equal() {
        let panes = vec![vec![file("f", 7, 0)], vec![file("f", 7, 0)]];
        let index = build_enhanced_comparison_index(&panes);
        assert_eq!(
            index.get(0, "f").unwrap().size_rank,
            vec![Some(SizeRank::Equal), Some(SizeRank::Equal)]
        );
    }

    #[test]
    fn close_mtimes_rank_equal() {
        let panes = vec![
            vec![file("f", 0, 10_000)],
            vec![file("f", 0, 10_400)],
            vec![file("f", 0, 10_999)],
        ];
        let index = build_enhanced_comparison_index(&panes);
        let state = index.get(0, "f").unwrap();
        assert!(state.time_rank.iter().all(|r| *r == Some(TimeRank::Equal)));
    }

    #[test]
    fn distant_mtimes_rank_earliest_and_latest() {
        let panes = vec![
            vec![file("f", 0, 0)],
            vec![file("f", 0, 500)],
            vec![file("f", 0, 50_000)],
            vec![file("f", 0, 20_000)],
        ];
        let index = build_enhanced_comparison_index(&panes);
        let state = index.get(3, "f").unwrap();
        assert_eq!(
            state.time_rank,
            vec![
                Some(TimeRank::Earliest),
                Some(TimeRank::Earliest),
                Some(TimeRank::Latest),
                None
            ]
        );
        assert_eq!(state.time_rank_of(1), Some(TimeRank::Earliest));
        assert_eq!(state.time_rank_of(7), None);
    }
}
