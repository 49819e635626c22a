//! Upload queue rows and the reducer applying pipeline events to them.

use crate::i18n::TranslationBundle;

/// Message keys of the queue table headers, in column order.
pub const QUEUE_COLUMNS: [&str; 3] = ["uploads.name", "uploads.status", "uploads.progress"];

/// Lifecycle of one queued file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStatus {
    /// Row created, transfer not started.
    Waiting,
    /// Transfer in flight.
    Uploading,
    /// Server answered 2xx.
    Succeeded,
    /// Server answered outside 2xx.
    Failed,
    /// No response was received.
    Errored,
}

impl UploadStatus {
    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Errored)
    }
}

/// One row of the upload queue.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadItem {
    /// Queue-unique row id.
    pub id: u64,
    /// File name.
    pub name: String,
    /// Current lifecycle state.
    pub status: UploadStatus,
    /// Latest reported progress in `[0, 100]`; `None` until the transport reports any.
    pub progress_percent: Option<f64>,
}

impl UploadItem {
    /// New row in the waiting state.
    #[must_use]
    pub fn waiting(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: UploadStatus::Waiting,
            progress_percent: None,
        }
    }

    /// Label shown next to the progress bar.
    #[must_use]
    pub fn label(&self, bundle: TranslationBundle) -> String {
        match (self.status, self.progress_percent) {
            (UploadStatus::Waiting, _) | (UploadStatus::Uploading | UploadStatus::Succeeded, None) => {
                bundle.text("uploads.waiting", "waiting…")
            }
            (UploadStatus::Uploading | UploadStatus::Succeeded, Some(percent)) => {
                format!("{}%", whole_percent(percent))
            }
            (UploadStatus::Failed, _) => bundle.text("uploads.failed", "failed"),
            (UploadStatus::Errored, _) => bundle.text("uploads.error", "error"),
        }
    }

    /// CSS width of the progress bar.
    #[must_use]
    pub fn bar_width(&self) -> String {
        format!("{}%", whole_percent(self.progress_percent.unwrap_or(0.0)))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_percent(value: f64) -> u8 {
    // Clamped to [0, 100] first.
    value.clamp(0.0, 100.0).floor() as u8
}

/// Ordered display list of upload rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadQueue {
    /// Whether the queue area has been revealed.
    pub visible: bool,
    /// Rows in creation order.
    pub items: Vec<UploadItem>,
}

impl UploadQueue {
    /// Row with the given id.
    #[must_use]
    pub fn item(&self, id: u64) -> Option<&UploadItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Transition emitted by the upload pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadEvent {
    /// The pipeline was invoked; the queue area becomes visible.
    Opened,
    /// A row was created for a file.
    Queued {
        /// Row id.
        id: u64,
        /// File name.
        name: String,
    },
    /// The file's transfer started.
    Started {
        /// Row id.
        id: u64,
    },
    /// The transport reported progress.
    Progress {
        /// Row id.
        id: u64,
        /// Percentage transferred.
        percent: f64,
    },
    /// The transfer reached a terminal state.
    Settled {
        /// Row id.
        id: u64,
        /// Terminal status.
        status: UploadStatus,
    },
}

/// Apply a pipeline event to the queue.
///
/// Illegal transitions (progress on a finished row, leaving a terminal state)
/// are ignored.
pub fn apply_upload_event(queue: &mut UploadQueue, event: UploadEvent) {
    match event {
        UploadEvent::Opened => queue.visible = true,
        UploadEvent::Queued { id, name } => {
            queue.visible = true;
            if queue.item(id).is_none() {
                queue.items.push(UploadItem::waiting(id, name));
            }
        }
        UploadEvent::Started { id } => {
            if let Some(item) = item_mut(queue, id)
                && item.status == UploadStatus::Waiting
            {
                item.status = UploadStatus::Uploading;
            }
        }
        UploadEvent::Progress { id, percent } => {
            if let Some(item) = item_mut(queue, id)
                && item.status == UploadStatus::Uploading
                && percent.is_finite()
            {
                let percent = percent.clamp(0.0, 100.0);
                item.progress_percent =
                    Some(item.progress_percent.map_or(percent, |current| current.max(percent)));
            }
        }
        UploadEvent::Settled { id, status } => {
            let Some(item) = item_mut(queue, id) else {
                return;
            };
            if item.status.is_terminal() || !status.is_terminal() {
                tracing::debug!(id, ?status, "ignoring upload transition");
                return;
            }
            item.status = status;
            if status == UploadStatus::Succeeded {
                item.progress_percent = Some(100.0);
            }
        }
    }
}

fn item_mut(queue: &mut UploadQueue, id: u64) -> Option<&mut UploadItem> {
    queue.items.iter_mut().find(|item| item.id == id)
}
