//! Object-safe request seams between the core and the browser transport.

use crate::core::error::RequestError;
use std::{future::Future, pin::Pin, rc::Rc};

/// Boxed, non-`Send` future returned by transport seams.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Status line of a completed response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseStatus {
    /// HTTP status code.
    pub code: u16,
    /// HTTP status text (may be empty).
    pub text: String,
}

impl ResponseStatus {
    /// Capture a status line.
    #[must_use]
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    /// Whether the status is in the 200..=299 success range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code, 200..=299)
    }

    /// Map a non-success status to [`RequestError::Rejected`].
    ///
    /// # Errors
    /// Returns [`RequestError::Rejected`] when the status is outside 200..=299.
    pub fn into_result(self) -> Result<(), RequestError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(RequestError::Rejected {
                status: self.code,
                status_text: self.text,
            })
        }
    }
}

/// Transport for the batch-action POST endpoints.
pub trait FileManagerApi {
    /// Issue a body-less POST to `path`.
    ///
    /// Resolves to the response status, or [`RequestError::Transport`] when no
    /// response was received.
    fn post<'a>(&'a self, path: &'a str) -> ApiFuture<'a, Result<ResponseStatus, RequestError>>;
}

impl<T: FileManagerApi + ?Sized> FileManagerApi for Rc<T> {
    fn post<'a>(&'a self, path: &'a str) -> ApiFuture<'a, Result<ResponseStatus, RequestError>> {
        (**self).post(path)
    }
}

/// Bytes transferred so far for a single upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferProgress {
    /// Bytes sent.
    pub loaded: u64,
    /// Total bytes, when the transport can compute it.
    pub total: Option<u64>,
}

impl TransferProgress {
    /// Progress snapshot.
    #[must_use]
    pub const fn new(loaded: u64, total: Option<u64>) -> Self {
        Self { loaded, total }
    }

    /// Percentage in `[0, 100]`, or `None` when the total is unknown.
    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        let total = self.total.filter(|total| *total > 0)?;
        let ratio = to_f64(self.loaded.min(total)) / to_f64(total);
        Some((ratio * 100.0).clamp(0.0, 100.0))
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(value: u64) -> f64 {
    value as f64
}

/// Callback receiving progress updates during an upload.
pub type ProgressFn = Rc<dyn Fn(TransferProgress)>;

/// A file accepted into the upload pipeline.
pub trait UploadSource {
    /// Display name of the file.
    fn file_name(&self) -> String;
}

/// Transport for multipart uploads.
pub trait UploadApi {
    /// File handle type transmitted by this transport.
    type File: UploadSource;

    /// Send `file` as a single multipart request to `path`.
    ///
    /// `on_progress` may be invoked any number of times before the future resolves.
    fn upload<'a>(
        &'a self,
        path: &'a str,
        file: &'a Self::File,
        on_progress: ProgressFn,
    ) -> ApiFuture<'a, Result<ResponseStatus, RequestError>>;
}

impl<T: UploadApi + ?Sized> UploadApi for Rc<T> {
    type File = T::File;

    fn upload<'a>(
        &'a self,
        path: &'a str,
        file: &'a Self::File,
        on_progress: ProgressFn,
    ) -> ApiFuture<'a, Result<ResponseStatus, RequestError>> {
        (**self).upload(path, file, on_progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_inclusive() {
        assert!(ResponseStatus::new(200, "OK").is_success());
        assert!(ResponseStatus::new(201, "Created").is_success());
        assert!(ResponseStatus::new(299, "").is_success());
        assert!(!ResponseStatus::new(300, "").is_success());
        assert!(!ResponseStatus::new(199, "").is_success());
    }

    #[test]
    fn non_success_maps_to_rejected() {
        let result = ResponseStatus::new(403, "Forbidden").into_result();
        assert_eq!(
            result,
            Err(RequestError::Rejected {
                status: 403,
                status_text: "Forbidden".into(),
            })
        );
        assert_eq!(ResponseStatus::new(204, "").into_result(), Ok(()));
    }

    #[test]
    fn percent_requires_known_total() {
        assert_eq!(TransferProgress::new(10, None).percent(), None);
        assert_eq!(TransferProgress::new(10, Some(0)).percent(), None);
        assert_eq!(TransferProgress::new(42, Some(100)).percent(), Some(42.0));
        assert_eq!(TransferProgress::new(500, Some(100)).percent(), Some(100.0));
    }
}
