//! Independent type definitions used by App.

use std::time::{Duration, Instant};

/// How long a status message stays visible
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Severity of a status message, drives its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient feedback shown in the status line
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub created_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= STATUS_DURATION
    }
}
