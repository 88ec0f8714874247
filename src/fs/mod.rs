//! Directory listing collaborator and lexical path helpers.
//!
//! The workspace never touches the disk itself: it asks a [`DirectoryLister`]
//! for snapshots and works on those. Paths are combined lexically so that each
//! pane derives its own targets from its own current path.

mod entry;
mod local;

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

pub use entry::{extension_of, parse_date_millis, FileEntry, RawTimestamp};
pub use local::LocalLister;

/// Produces directory snapshots.
///
/// Implementations must not fail loudly: an unreadable directory yields an
/// empty listing.
pub trait DirectoryLister {
    /// List the entries of `path`
    fn list(&self, path: &Path) -> Vec<FileEntry>;

    /// Whether `path` exists and is a directory
    fn is_directory(&self, path: &Path) -> bool;
}

/// In-memory lister keyed by absolute directory path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLister {
    directories: HashMap<PathBuf, Vec<FileEntry>>,
}

impl MemoryLister {
    /// Create an empty in-memory lister
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory with the given entries.
    ///
    /// Entry paths are derived from `path` and each entry's name.
    pub fn insert_dir(&mut self, path: impl AsRef<Path>, entries: Vec<FileEntry>) {
        let path = normalize_path(path.as_ref());
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.absolute_path = path.join(&entry.name);
                entry
            })
            .collect();
        self.directories.insert(path, entries);
    }

    /// Forget a directory, returning its entries
    pub fn remove_dir(&mut self, path: impl AsRef<Path>) -> Option<Vec<FileEntry>> {
        self.directories.remove(&normalize_path(path.as_ref()))
    }

    /// Builder-style variant of [`MemoryLister::insert_dir`]
    pub fn with_dir(mut self, path: impl AsRef<Path>, entries: Vec<FileEntry>) -> Self {
        self.insert_dir(path, entries);
        self
    }
}

impl DirectoryLister for MemoryLister {
    fn list(&self, path: &Path) -> Vec<FileEntry> {
        self.directories
            .get(&normalize_path(path))
            .cloned()
            .unwrap_or_default()
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.directories.contains_key(&normalize_path(path))
    }
}

/// Lexically normalize a path: drop `.` segments and resolve `..` against the
/// preceding segment. `..` at the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(segment) => normalized.push(segment),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Join a child name onto a base path and normalize the result.
pub fn join_child(base: &Path, child: &str) -> PathBuf {
    normalize_path(&base.join(child))
}

/// Parent of a normalized path, or `None` at the filesystem root.
pub fn parent_of(path: &Path) -> Option<PathBuf> {
    let normalized = normalize_path(path);
    normalized.parent().map(Path::to_path_buf)
}

/// Last segment of a path, or `None` at the root.
pub fn last_segment(path: &Path) -> Option<String> {
    normalize_path(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_resolves_dot_segments() {
        assert_eq!(
            normalize_path(Path::new("/home/user/./docs/../music")),
            PathBuf::from("/home/user/music")
        );
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn join_child_does_not_merge_similar_prefixes() {
        let a = join_child(Path::new("/private"), "data");
        let b = join_child(Path::new("/privateXYZ"), "data");
        assert_eq!(a, PathBuf::from("/private/data"));
        assert_eq!(b, PathBuf::from("/privateXYZ/data"));
    }

    #[test]
    fn parent_of_root_is_none() {
        assert_eq!(parent_of(Path::new("/")), None);
        assert_eq!(parent_of(Path::new("/a/b")), Some(PathBuf::from("/a")));
        assert_eq!(parent_of(Path::new("/a")), Some(PathBuf::from("/")));
    }

    #[test]
    fn last_segment_of_root_is_none() {
        assert_eq!(last_segment(Path::new("/")), None);
        assert_eq!(last_segment(Path::new("/a/b/")), Some("b".to_string()));
    }

    #[test]
    fn memory_lister_fills_in_absolute_paths() {
        let lister = MemoryLister::new().with_dir("/data", vec![FileEntry::file("a.txt", "", 1, 0)]);
        let entries = lister.list(Path::new("/data"));
        assert_eq!(entries[0].absolute_path, PathBuf::from("/data/a.txt"));
        assert!(lister.is_directory(Path::new("/data/")));
        assert!(lister.list(Path::new("/missing")).is_empty());
    }
}
