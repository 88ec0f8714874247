//! Directory lister backed by the local filesystem.

use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use super::{extension_of, FileEntry};

/// Lists directories with `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLister;

impl LocalLister {
    /// Create a new local lister
    pub fn new() -> Self {
        Self
    }
}

impl super::DirectoryLister for LocalLister {
    fn list(&self, path: &Path) -> Vec<FileEntry> {
        let read_dir = match fs::read_dir(path) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "failed to read directory");
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for dir_entry in read_dir.flatten() {
            let entry_path = dir_entry.path();
            let name = dir_entry.file_name().to_string_lossy().into_owned();

            // Follow symlinks so a link to a directory can be entered
            let Ok(metadata) = fs::metadata(&entry_path).or_else(|_| dir_entry.metadata()) else {
                continue;
            };

            let modified_at_ms = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |d| d.as_millis() as i64);

            let is_directory = metadata.is_dir();
            entries.push(FileEntry {
                extension: if is_directory {
                    String::new()
                } else {
                    extension_of(&name)
                },
                name,
                absolute_path: entry_path,
                is_directory,
                size_bytes: if is_directory { 0 } else { metadata.len() },
                modified_at_ms,
            });
        }
        entries
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::DirectoryLister;

    #[test]
    fn lists_files_and_directories_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.md"), b"hello").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let mut entries = LocalLister::new().list(dir.path());
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "notes.md");
        assert_eq!(entries[0].size_bytes, 5);
        assert_eq!(entries[0].extension, "md");
        assert!(entries[1].is_directory);
        assert!(entries[1].extension.is_empty());
    }

    #[test]
    fn unreadable_directory_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(LocalLister::new().list(&missing).is_empty());
        assert!(!LocalLister::new().is_directory(&missing));
    }
}
