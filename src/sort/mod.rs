//! Multi-key file sorting.
//!
//! Sorting is a two-layer stable comparison: an optional directories-first
//! layer, then the primary criterion with the direction applied. The direction
//! never flips the directory layer.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fs::FileEntry;

/// Errors raised while configuring a sort
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("unknown sort criterion: {0:?} (expected name, size, mtime or extension)")]
    UnknownCriterion(String),
    #[error("unknown sort direction: {0:?} (expected asc or desc)")]
    UnknownDirection(String),
}

/// Primary sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    /// Case-insensitive natural name order ("file2" before "file10")
    #[default]
    Name,
    /// Size in bytes
    Size,
    /// Modification time
    Mtime,
    /// Extension, entries without one first, ties broken by name
    Extension,
}

impl SortCriterion {
    /// Cycle Name -> Size -> Mtime -> Extension -> Name
    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Size,
            Self::Size => Self::Mtime,
            Self::Mtime => Self::Extension,
            Self::Extension => Self::Name,
        }
    }

    /// Get display name for the criterion
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Mtime => "Modified",
            Self::Extension => "Ext",
        }
    }
}

impl FromStr for SortCriterion {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "size" => Ok(Self::Size),
            "mtime" | "modified" | "time" => Ok(Self::Mtime),
            "extension" | "ext" => Ok(Self::Extension),
            _ => Err(SortError::UnknownCriterion(s.to_string())),
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::Mtime => "mtime",
            Self::Extension => "extension",
        };
        f.write_str(name)
    }
}

/// Sort direction applied to the primary criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Flip between ascending and descending
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow used in pane titles
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(SortError::UnknownDirection(s.to_string())),
        }
    }
}

/// A fully validated sort configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub criterion: SortCriterion,
    pub direction: SortDirection,
    #[serde(default = "default_directories_first")]
    pub directories_first: bool,
}

fn default_directories_first() -> bool {
    true
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortCriterion::Name, SortDirection::Asc, true)
    }
}

impl SortSpec {
    pub fn new(criterion: SortCriterion, direction: SortDirection, directories_first: bool) -> Self {
        Self {
            criterion,
            direction,
            directories_first,
        }
    }

    /// Build a spec from untyped names, rejecting unknown values up front.
    pub fn parse(criterion: &str, direction: &str, directories_first: bool) -> Result<Self, SortError> {
        Ok(Self {
            criterion: criterion.parse()?,
            direction: direction.parse()?,
            directories_first,
        })
    }

    /// Full comparator for two entries under this spec
    pub fn compare(&self, a: &FileEntry, b: &FileEntry) -> Ordering {
        let directory_layer = if self.directories_first {
            b.is_directory.cmp(&a.is_directory)
        } else {
            Ordering::Equal
        };
        directory_layer.then_with(|| self.direction.apply(compare_by(self.criterion, a, b)))
    }

    /// Sort a listing, see [`sort_files`]
    pub fn sort(&self, files: &[FileEntry]) -> Vec<FileEntry> {
        sort_files(files, self.criterion, self.direction, self.directories_first)
    }
}

/// Sort a listing into a new vec; the input is left untouched.
///
/// The sort is stable: entries that compare equal keep their relative order,
/// which also makes re-sorting a sorted list a no-op.
pub fn sort_files(
    files: &[FileEntry],
    criterion: SortCriterion,
    direction: SortDirection,
    directories_first: bool,
) -> Vec<FileEntry> {
    let spec = SortSpec::new(criterion, direction, directories_first);
    let mut sorted = files.to_vec();
    sorted.sort_by(|a, b| spec.compare(a, b));
    sorted
}

/// Compare two entries by a single criterion (ascending).
pub fn compare_by(criterion: SortCriterion, a: &FileEntry, b: &FileEntry) -> Ordering {
    match criterion {
        SortCriterion::Name => natural_cmp(&a.name, &b.name),
        SortCriterion::Size => a.size_bytes.cmp(&b.size_bytes),
        SortCriterion::Mtime => a.modified_at_ms.cmp(&b.modified_at_ms),
        SortCriterion::Extension => match (a.has_extension(), b.has_extension()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (false, false) => natural_cmp(&a.name, &b.name),
            (true, true) => natural_cmp(&a.extension, &b.extension)
                .then_with(|| natural_cmp(&a.name, &b.name)),
        },
    }
}

/// Case-insensitive natural ordering of names.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    alphanumeric_sort::compare_str(a.to_lowercase(), b.to_lowercase())
}
