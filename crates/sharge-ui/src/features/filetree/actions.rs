//! Batch actions over the current selection: make-directory, rename, delete.
//!
//! # Design
//! - Validation happens before any request and always ends in a notification.
//! - Deletes fan out one request per identifier, all in flight at once, and each
//!   outcome is reported as soon as it settles.
//! - Open and download are plain navigations derived in `affordances`.

use crate::core::endpoints::Endpoints;
use crate::core::error::{RequestError, ValidationError};
use crate::core::notify::{Notification, Notifier};
use crate::core::transport::FileManagerApi;
use crate::i18n::TranslationBundle;
use futures::stream::{FuturesUnordered, StreamExt};

/// Result of a make-directory or rename attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server accepted the change; the view must reload.
    Reload,
    /// Aborted before any request was issued.
    Invalid(ValidationError),
    /// The request was rejected or never completed; the tree is unchanged.
    Failed(RequestError),
}

impl ActionOutcome {
    /// Whether the prompt that produced this outcome should close.
    ///
    /// Only a blank name keeps the prompt open for another attempt.
    #[must_use]
    pub const fn dismisses_prompt(&self) -> bool {
        !matches!(
            self,
            Self::Invalid(
                ValidationError::EmptyNewName
                    | ValidationError::EmptyDirectoryName
                    | ValidationError::EmptySelection
            )
        )
    }
}

/// Per-identifier results of a multi-delete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Identifiers the server deleted, in settlement order.
    pub removed: Vec<String>,
    /// Identifiers whose delete failed, with the failure.
    pub failed: Vec<(String, RequestError)>,
}

/// Issues batch-action requests and routes outcomes to the notifier.
pub struct BatchDispatcher<A, N> {
    api: A,
    notifier: N,
    endpoints: Endpoints,
    bundle: TranslationBundle,
}

impl<A: FileManagerApi, N: Notifier> BatchDispatcher<A, N> {
    /// Build a dispatcher over a transport and notifier.
    pub const fn new(api: A, notifier: N, endpoints: Endpoints, bundle: TranslationBundle) -> Self {
        Self {
            api,
            notifier,
            endpoints,
            bundle,
        }
    }

    /// Create a directory named `proposed` (trimmed).
    pub async fn make_directory(&self, proposed: &str) -> ActionOutcome {
        let name = proposed.trim();
        if name.is_empty() {
            return self.invalid(ValidationError::EmptyDirectoryName);
        }
        let path = self.endpoints.mkdir_path(name);
        match self.send(&path).await {
            Ok(()) => {
                self.notifier
                    .notify(Notification::success(self.bundle.text("toast.mkdir_success", "")));
                ActionOutcome::Reload
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::error(self.bundle.with_detail("toast.mkdir_failed", &err)));
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Check that the rename prompt may open and return the path to prefill.
    pub fn prepare_rename(&self, selected: &[String]) -> Option<String> {
        match selected {
            [only] => Some(only.clone()),
            _ => {
                self.invalid(ValidationError::RenameCardinality {
                    selected: selected.len(),
                });
                None
            }
        }
    }

    /// Rename the single selected entry to `proposed` (trimmed).
    pub async fn rename(&self, selected: &[String], proposed: &str) -> ActionOutcome {
        let [old_path] = selected else {
            return self.invalid(ValidationError::RenameCardinality {
                selected: selected.len(),
            });
        };
        let new_path = proposed.trim();
        if new_path.is_empty() {
            return self.invalid(ValidationError::EmptyNewName);
        }
        if new_path == old_path {
            return self.invalid(ValidationError::Unchanged);
        }
        let path = self.endpoints.rename_path(old_path, new_path);
        match self.send(&path).await {
            Ok(()) => {
                self.notifier
                    .notify(Notification::success(self.bundle.text("toast.rename_success", "")));
                ActionOutcome::Reload
            }
            Err(err) => {
                self.notifier.notify(Notification::error(
                    self.bundle
                        .with_detail("toast.rename_failed", format_args!("{old_path}: {err}")),
                ));
                ActionOutcome::Failed(err)
            }
        }
    }

    /// Delete every identifier in `selected` with independent, concurrent requests.
    ///
    /// `on_settled` runs once per identifier as soon as its request settles, so the
    /// caller can remove that row immediately.
    pub async fn delete<F>(&self, selected: &[String], mut on_settled: F) -> DeleteReport
    where
        F: FnMut(&str, Result<(), &RequestError>),
    {
        let mut report = DeleteReport::default();
        if selected.is_empty() {
            self.invalid(ValidationError::EmptySelection);
            return report;
        }
        let mut in_flight: FuturesUnordered<_> = selected
            .iter()
            .map(|id| {
                let path = self.endpoints.delete_path(id);
                async move {
                    let result = self.send(&path).await;
                    (id, result)
                }
            })
            .collect();
        while let Some((id, result)) = in_flight.next().await {
            match result {
                Ok(()) => {
                    self.notifier
                        .notify(Notification::success(self.bundle.with_detail("toast.delete_success", id)));
                    on_settled(id, Ok(()));
                    report.removed.push(id.clone());
                }
                Err(err) => {
                    self.notifier.notify(Notification::error(
                        self.bundle
                            .with_detail("toast.delete_failed", format_args!("{id}: {err}")),
                    ));
                    on_settled(id, Err(&err));
                    report.failed.push((id.clone(), err));
                }
            }
        }
        report
    }

    async fn send(&self, path: &str) -> Result<(), RequestError> {
        tracing::debug!(path, "issuing batch action request");
        let result = self.api.post(path).await.and_then(|status| status.into_result());
        if let Err(err) = &result {
            tracing::warn!(path, error = %err, "batch action request failed");
        }
        result
    }

    fn invalid(&self, error: ValidationError) -> ActionOutcome {
        let text = self.bundle.text(error.message_key(), "");
        let notification = if error == ValidationError::Unchanged {
            Notification::info(text)
        } else {
            Notification::error(text)
        };
        self.notifier.notify(notification);
        ActionOutcome::Invalid(error)
    }
}
