//! HTTP client helpers: body-less POSTs via `gloo-net`, uploads via XHR.
//!
//! Uploads use `XMLHttpRequest` because fetch exposes no upload progress.

use crate::core::endpoints::UPLOAD_FIELD;
use crate::core::error::RequestError;
use crate::core::transport::{
    ApiFuture, FileManagerApi, ProgressFn, ResponseStatus, TransferProgress, UploadApi,
    UploadSource,
};
use futures::channel::oneshot;
use gloo_net::http::Request;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

/// Browser transport for every file-manager request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiClient;

impl ApiClient {
    /// Client issuing requests against already-resolved paths.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileManagerApi for ApiClient {
    fn post<'a>(&'a self, path: &'a str) -> ApiFuture<'a, Result<ResponseStatus, RequestError>> {
        Box::pin(async move {
            let response = Request::post(path)
                .send()
                .await
                .map_err(|err| RequestError::transport(err.to_string()))?;
            Ok(ResponseStatus::new(response.status(), response.status_text()))
        })
    }
}

impl UploadSource for File {
    fn file_name(&self) -> String {
        self.name()
    }
}

impl UploadApi for ApiClient {
    type File = File;

    fn upload<'a>(
        &'a self,
        path: &'a str,
        file: &'a File,
        on_progress: ProgressFn,
    ) -> ApiFuture<'a, Result<ResponseStatus, RequestError>> {
        Box::pin(send_multipart(path, file, on_progress))
    }
}

type Settle = Rc<RefCell<Option<oneshot::Sender<Result<ResponseStatus, RequestError>>>>>;

async fn send_multipart(
    path: &str,
    file: &File,
    on_progress: ProgressFn,
) -> Result<ResponseStatus, RequestError> {
    let xhr = XmlHttpRequest::new().map_err(js_error)?;
    xhr.open_with_async("POST", path, true).map_err(js_error)?;
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
        .map_err(js_error)?;

    let (tx, rx) = oneshot::channel();
    let settle: Settle = Rc::new(RefCell::new(Some(tx)));

    let onprogress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
        let total = event.length_computable().then(|| to_bytes(event.total()));
        on_progress(TransferProgress::new(to_bytes(event.loaded()), total));
    });
    let onload = {
        let settle = settle.clone();
        let xhr = xhr.clone();
        Closure::<dyn FnMut()>::new(move || {
            let status = ResponseStatus::new(
                xhr.status().unwrap_or_default(),
                xhr.status_text().unwrap_or_default(),
            );
            finish(&settle, Ok(status));
        })
    };
    let onerror = {
        let settle = settle.clone();
        Closure::<dyn FnMut()>::new(move || {
            finish(&settle, Err(RequestError::transport("upload request failed")));
        })
    };

    let upload = xhr.upload().map_err(js_error)?;
    upload.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));
    xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
    xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    xhr.set_onabort(Some(onerror.as_ref().unchecked_ref()));
    xhr.send_with_opt_form_data(Some(&form)).map_err(js_error)?;

    let result = rx
        .await
        .unwrap_or_else(|_| Err(RequestError::transport("upload was cancelled")));

    upload.set_onprogress(None);
    xhr.set_onload(None);
    xhr.set_onerror(None);
    xhr.set_onabort(None);
    drop((onprogress, onload, onerror));
    result
}

fn finish(settle: &Settle, result: Result<ResponseStatus, RequestError>) {
    if let Some(tx) = settle.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_bytes(value: f64) -> u64 {
    // Byte counts are non-negative integers reported as doubles.
    value.max(0.0) as u64
}

fn js_error(err: JsValue) -> RequestError {
    RequestError::transport(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}
