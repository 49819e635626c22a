//! Error types surfaced by batch actions and uploads.
//!
//! # Design
//! - Validation failures are caught before any request and carry a message key.
//! - Request failures keep the status or transport detail so notifications can show it.

use thiserror::Error;

/// Failures detected locally, before any request is issued.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Make-directory was submitted with an empty (after trim) name.
    #[error("directory name is empty")]
    EmptyDirectoryName,
    /// Rename requires exactly one selected entry.
    #[error("rename requires exactly one selected entry")]
    RenameCardinality {
        /// Number of entries selected when the action was invoked.
        selected: usize,
    },
    /// Rename was submitted with an empty (after trim) target.
    #[error("new name is empty")]
    EmptyNewName,
    /// Rename target equals the current path.
    #[error("name unchanged")]
    Unchanged,
    /// Delete was invoked with nothing selected.
    #[error("nothing selected to delete")]
    EmptySelection,
}

impl ValidationError {
    /// Translation key of the notification shown for this failure.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::EmptyDirectoryName => "toast.mkdir_empty",
            Self::RenameCardinality { .. } => "toast.rename_select_one",
            Self::EmptyNewName => "toast.rename_empty",
            Self::Unchanged => "toast.rename_unchanged",
            Self::EmptySelection => "toast.delete_select_some",
        }
    }
}

/// Failures of an issued request.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The server answered with a status outside 200..=299.
    #[error("HTTP error! status: {status}{}", status_suffix(.status_text))]
    Rejected {
        /// Response status code.
        status: u16,
        /// Response status text (may be empty).
        status_text: String,
    },
    /// The request never completed.
    #[error("network error: {detail}")]
    Transport {
        /// Transport-level description.
        detail: String,
    },
}

impl RequestError {
    /// Build a transport error from any displayable detail.
    #[must_use]
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    /// Whether the request failed before a response arrived.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

fn status_suffix(status_text: &str) -> String {
    if status_text.trim().is_empty() {
        String::new()
    } else {
        format!(" ({})", status_text.trim())
    }
}
