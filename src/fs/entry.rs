//! Directory entry snapshots as produced by a directory lister.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A single entry of a directory listing.
///
/// Entries are immutable snapshots: the lister produces them, everything else
/// only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FileEntryRecord")]
pub struct FileEntry {
    /// Final path segment (e.g. "notes.txt")
    pub name: String,
    /// Absolute path of the entry
    pub absolute_path: PathBuf,
    /// Whether the entry is a directory
    pub is_directory: bool,
    /// Size in bytes (0 for directories on most listers)
    pub size_bytes: u64,
    /// Modification time in milliseconds since the Unix epoch
    #[serde(rename = "modified")]
    pub modified_at_ms: i64,
    /// Lowercased extension without the dot, empty when there is none
    pub extension: String,
}

/// Serialized form of [`FileEntry`]; a missing extension is derived from the
/// name.
#[derive(Deserialize)]
struct FileEntryRecord {
    name: String,
    absolute_path: PathBuf,
    is_directory: bool,
    #[serde(default)]
    size_bytes: u64,
    #[serde(rename = "modified", deserialize_with = "deserialize_modified")]
    modified_at_ms: i64,
    #[serde(default)]
    extension: Option<String>,
}

impl From<FileEntryRecord> for FileEntry {
    fn from(record: FileEntryRecord) -> Self {
        let extension = match record.extension {
            Some(extension) => extension,
            None if record.is_directory => String::new(),
            None => extension_of(&record.name),
        };
        Self {
            name: record.name,
            absolute_path: record.absolute_path,
            is_directory: record.is_directory,
            size_bytes: record.size_bytes,
            modified_at_ms: record.modified_at_ms,
            extension,
        }
    }
}

impl FileEntry {
    /// Create a file entry, deriving the extension from the name.
    pub fn file(
        name: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
        size_bytes: u64,
        modified_at_ms: i64,
    ) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            absolute_path: absolute_path.into(),
            is_directory: false,
            size_bytes,
            modified_at_ms,
            extension,
        }
    }

    /// Create a directory entry. Directories never carry an extension.
    pub fn directory(
        name: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
        modified_at_ms: i64,
    ) -> Self {
        Self {
            name: name.into(),
            absolute_path: absolute_path.into(),
            is_directory: true,
            size_bytes: 0,
            modified_at_ms,
            extension: String::new(),
        }
    }

    /// Whether the entry carries an extension
    pub fn has_extension(&self) -> bool {
        !self.extension.is_empty()
    }

    /// Dotfiles are treated as hidden
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Extract the lowercased extension of a file name.
///
/// A leading dot does not start an extension, so ".gitignore" has none, and a
/// trailing dot ("archive.") has none either.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 && dot < name.len() - 1 => name[dot + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// A modification time as it may arrive from a collaborator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// Fractional milliseconds (JavaScript-style numbers)
    Float(f64),
    /// A serialized date string
    Text(String),
}

impl RawTimestamp {
    /// Normalize into epoch milliseconds.
    ///
    /// Returns `None` for strings that are not a recognizable date.
    pub fn to_millis(&self) -> Option<i64> {
        match self {
            RawTimestamp::Millis(ms) => Some(*ms),
            RawTimestamp::Float(ms) if ms.is_finite() => Some(ms.trunc() as i64),
            RawTimestamp::Float(_) => None,
            RawTimestamp::Text(text) => parse_date_millis(text),
        }
    }
}

/// Parse a serialized date into epoch milliseconds.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00Z`), naive `YYYY-MM-DD HH:MM:SS`
/// (interpreted as UTC), and plain integer strings.
pub fn parse_date_millis(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(ms) = text.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    None
}

fn deserialize_modified<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawTimestamp::deserialize(deserializer)?;
    Ok(raw.to_millis().unwrap_or_else(|| {
        tracing::warn!(?raw, "unparseable modification time, treating as epoch");
        0
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_of_ignores_leading_and_trailing_dots() {
        assert_eq!(extension_of("notes.TXT"), "txt");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of(".gitignore"), "");
        assert_eq!(extension_of("trailing."), "");
        assert_eq!(extension_of("Makefile"), "");
    }

    #[test]
    fn modified_accepts_millis_and_date_strings() {
        let from_number: FileEntry = serde_json::from_str(
            r#"{"name":"a","absolute_path":"/a","is_directory":false,"size_bytes":1,"modified":1700000000000}"#,
        )
        .unwrap();
        assert_eq!(from_number.modified_at_ms, 1_700_000_000_000);

        let from_string: FileEntry = serde_json::from_str(
            r#"{"name":"a","absolute_path":"/a","is_directory":false,"size_bytes":1,"modified":"2023-11-14T22:13:20Z"}"#,
        )
        .unwrap();
        assert_eq!(from_string.modified_at_ms, 1_700_000_000_000);
    }

    #[test]
    fn missing_extension_is_derived_from_the_name() {
        let file: FileEntry = serde_json::from_str(
            r#"{"name":"Report.PDF","absolute_path":"/r","is_directory":false,"size_bytes":1,"modified":0}"#,
        )
        .unwrap();
        assert_eq!(file.extension, "pdf");

        let dir: FileEntry = serde_json::from_str(
            r#"{"name":"v1.2","absolute_path":"/v","is_directory":true,"size_bytes":0,"modified":0}"#,
        )
        .unwrap();
        assert_eq!(dir.extension, "");

        let explicit: FileEntry = serde_json::from_str(
            r#"{"name":"a.txt","absolute_path":"/a","is_directory":false,"size_bytes":1,"modified":0,"extension":"md"}"#,
        )
        .unwrap();
        assert_eq!(explicit.extension, "md");
    }

    #[test]
    fn naive_date_strings_are_read_as_utc() {
        assert_eq!(parse_date_millis("1970-01-01 00:00:01"), Some(1000));
        assert_eq!(parse_date_millis("not a date"), None);
    }

    #[test]
    fn unparseable_modified_falls_back_to_epoch() {
        let entry: FileEntry = serde_json::from_str(
            r#"{"name":"a","absolute_path":"/a","is_directory":false,"size_bytes":1,"modified":"yesterday"}"#,
        )
        .unwrap();
        assert_eq!(entry.modified_at_ms, 0);
    }

    #[test]
    fn hidden_means_dot_prefixed() {
        assert!(FileEntry::file(".env", "/p/.env", 0, 0).is_hidden());
        assert!(!FileEntry::directory("src", "/p/src", 0).is_hidden());
    }
}
