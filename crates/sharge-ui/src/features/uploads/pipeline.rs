//! Sequential upload driver.
//!
//! # Design
//! - One transfer at a time: file `n + 1` is not sent until file `n` settles.
//! - Failures are terminal for their row only; the rest of the input always drains.
//! - Row state changes are emitted as [`UploadEvent`]s so the store owns the rows.

use crate::core::endpoints::Endpoints;
use crate::core::error::RequestError;
use crate::core::notify::{Notification, Notifier};
use crate::core::transport::{ProgressFn, TransferProgress, UploadApi, UploadSource};
use crate::features::uploads::state::{UploadEvent, UploadStatus};
use crate::i18n::TranslationBundle;
use std::cell::Cell;
use std::rc::Rc;

/// Receiver of row transitions.
pub type UploadSink = Rc<dyn Fn(UploadEvent)>;

/// Terminal counts for one pipeline invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Files the server accepted.
    pub succeeded: usize,
    /// Files rejected with a non-2xx status.
    pub failed: usize,
    /// Files whose transfer never completed.
    pub errored: usize,
}

/// Drains file collections through the upload endpoint one file at a time.
pub struct UploadPipeline<A, N> {
    api: A,
    notifier: N,
    endpoints: Endpoints,
    bundle: TranslationBundle,
    next_id: Cell<u64>,
}

impl<A: UploadApi, N: Notifier> UploadPipeline<A, N> {
    /// Build a pipeline over an upload transport and notifier.
    pub const fn new(api: A, notifier: N, endpoints: Endpoints, bundle: TranslationBundle) -> Self {
        Self {
            api,
            notifier,
            endpoints,
            bundle,
            next_id: Cell::new(0),
        }
    }

    /// Upload `files` in order, emitting row transitions to `sink`.
    pub async fn run(&self, files: Vec<A::File>, sink: UploadSink) -> UploadSummary {
        let mut summary = UploadSummary::default();
        if files.is_empty() {
            tracing::debug!("upload invoked without files");
            return summary;
        }
        sink(UploadEvent::Opened);
        let path = self.endpoints.upload_path();
        for file in &files {
            let name = file.file_name();
            let id = self.allocate_id();
            sink(UploadEvent::Queued {
                id,
                name: name.clone(),
            });
            sink(UploadEvent::Started { id });
            tracing::debug!(id, name = %name, "upload started");

            let progress_sink = sink.clone();
            let on_progress: ProgressFn = Rc::new(move |progress: TransferProgress| {
                if let Some(percent) = progress.percent() {
                    progress_sink(UploadEvent::Progress { id, percent });
                }
            });
            let result = self
                .api
                .upload(&path, file, on_progress)
                .await
                .and_then(|status| status.into_result());

            let status = match result {
                Ok(()) => {
                    summary.succeeded += 1;
                    UploadStatus::Succeeded
                }
                Err(err) => {
                    tracing::warn!(id, name = %name, error = %err, "upload did not succeed");
                    self.notify_failure(&name, &err);
                    if err.is_transport() {
                        summary.errored += 1;
                        UploadStatus::Errored
                    } else {
                        summary.failed += 1;
                        UploadStatus::Failed
                    }
                }
            };
            sink(UploadEvent::Settled { id, status });
        }
        summary
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn notify_failure(&self, name: &str, err: &RequestError) {
        let key = if err.is_transport() {
            "toast.upload_error"
        } else {
            "toast.upload_failed"
        };
        self.notifier.notify(Notification::error(
            self.bundle.with_detail(key, format_args!("{name} ({err})")),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::{NotificationReceiver, NotificationSender, notification_channel};
    use crate::core::transport::{ApiFuture, ResponseStatus};
    use crate::features::uploads::state::{UploadQueue, apply_upload_event};
    use crate::i18n::LocaleCode;
    use futures::executor::{LocalPool, block_on};
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;

    #[derive(Clone, Debug)]
    struct FakeFile(&'static str);

    impl UploadSource for FakeFile {
        fn file_name(&self) -> String {
            self.0.to_string()
        }
    }

    /// Transfer outcome released by the test.
    enum Gate {
        Status(u16),
        Progress(u64, Option<u64>),
        Drop,
    }

    #[derive(Default)]
    struct GatedUploads {
        started: RefCell<Vec<&'static str>>,
        gates: RefCell<Vec<futures::channel::mpsc::UnboundedSender<Gate>>>,
    }

    impl UploadApi for GatedUploads {
        type File = FakeFile;

        fn upload<'a>(
            &'a self,
            _path: &'a str,
            file: &'a FakeFile,
            on_progress: ProgressFn,
        ) -> ApiFuture<'a, Result<ResponseStatus, RequestError>> {
            let (tx, mut rx) = futures::channel::mpsc::unbounded();
            self.started.borrow_mut().push(file.0);
            self.gates.borrow_mut().push(tx);
            Box::pin(async move {
                use futures::StreamExt;
                while let Some(gate) = rx.next().await {
                    match gate {
                        Gate::Progress(loaded, total) => {
                            on_progress(TransferProgress::new(loaded, total));
                        }
                        Gate::Status(code) => return Ok(ResponseStatus::new(code, "")),
                        Gate::Drop => break,
                    }
                }
                Err(RequestError::transport("connection reset"))
            })
        }
    }

    /// Transport answering every upload immediately from a table.
    struct ScriptedUploads(Vec<Result<u16, &'static str>>, RefCell<usize>);

    impl UploadApi for ScriptedUploads {
        type File = FakeFile;

        fn upload<'a>(
            &'a self,
            path: &'a str,
            _file: &'a FakeFile,
            on_progress: ProgressFn,
        ) -> ApiFuture<'a, Result<ResponseStatus, RequestError>> {
            assert_eq!(path, "/upload");
            let idx = self.1.replace_with(|idx| *idx + 1);
            let outcome = self.0.get(idx).copied().unwrap_or(Ok(200));
            Box::pin(async move {
                on_progress(TransferProgress::new(5, None));
                match outcome {
                    Ok(code) => Ok(ResponseStatus::new(code, "Nope")),
                    Err(detail) => Err(RequestError::transport(detail)),
                }
            })
        }
    }

    type TestPipeline<A> = UploadPipeline<A, Rc<NotificationSender>>;

    fn pipeline<A: UploadApi>(api: A) -> (Rc<TestPipeline<A>>, NotificationReceiver) {
        let (tx, rx) = notification_channel();
        let pipeline = UploadPipeline::new(
            api,
            Rc::new(tx),
            Endpoints::default(),
            TranslationBundle::new(LocaleCode::En),
        );
        (Rc::new(pipeline), rx)
    }

    fn recording_sink() -> (UploadSink, Rc<RefCell<UploadQueue>>) {
        let queue = Rc::new(RefCell::new(UploadQueue::default()));
        let target = queue.clone();
        let sink: UploadSink =
            Rc::new(move |event| apply_upload_event(&mut target.borrow_mut(), event));
        (sink, queue)
    }

    #[allow(deprecated)]
    fn drain(rx: &mut NotificationReceiver) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(Some(notification)) = rx.try_next() {
            out.push(notification);
        }
        out
    }

    #[test]
    fn transfers_are_strictly_sequential() {
        let (pipeline, _rx) = pipeline(GatedUploads::default());
        let (sink, queue) = recording_sink();
        let mut pool = LocalPool::new();
        {
            let pipeline = pipeline.clone();
            pool.spawner()
                .spawn_local(async move {
                    let files = vec![FakeFile("A"), FakeFile("B"), FakeFile("C")];
                    pipeline.run(files, sink).await;
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(*pipeline.api.started.borrow(), vec!["A"]);
        assert!(queue.borrow().visible);
        assert_eq!(queue.borrow().items.len(), 1);

        pipeline.api.gates.borrow()[0]
            .unbounded_send(Gate::Progress(42, Some(100)))
            .unwrap();
        pool.run_until_stalled();
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(queue.borrow().items[0].label(bundle), "42%");
        assert_eq!(*pipeline.api.started.borrow(), vec!["A"]);

        pipeline.api.gates.borrow()[0]
            .unbounded_send(Gate::Status(500))
            .unwrap();
        pool.run_until_stalled();
        assert_eq!(*pipeline.api.started.borrow(), vec!["A", "B"]);
        assert_eq!(queue.borrow().items[0].status, UploadStatus::Failed);

        pipeline.api.gates.borrow()[1]
            .unbounded_send(Gate::Drop)
            .unwrap();
        pool.run_until_stalled();
        pipeline.api.gates.borrow()[2]
            .unbounded_send(Gate::Status(200))
            .unwrap();
        pool.run_until_stalled();

        let queue = queue.borrow();
        let rows: Vec<(&str, UploadStatus)> = queue
            .items
            .iter()
            .map(|item| (item.name.as_str(), item.status))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("A", UploadStatus::Failed),
                ("B", UploadStatus::Errored),
                ("C", UploadStatus::Succeeded),
            ]
        );
        assert_eq!(queue.items[2].progress_percent, Some(100.0));
    }

    #[test]
    fn failures_notify_and_never_abort_the_queue() {
        let api = ScriptedUploads(vec![Ok(413), Err("offline"), Ok(201)], RefCell::new(0));
        let (pipeline, mut rx) = pipeline(api);
        let (sink, queue) = recording_sink();
        let files = vec![FakeFile("big.iso"), FakeFile("b.txt"), FakeFile("c.txt")];
        let summary = block_on(pipeline.run(files, sink));
        assert_eq!(
            summary,
            UploadSummary {
                succeeded: 1,
                failed: 1,
                errored: 1,
            }
        );
        assert_eq!(queue.borrow().items.len(), 3);
        let texts: Vec<String> = drain(&mut rx).into_iter().map(|n| n.text).collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0], "Upload failed: big.iso (HTTP error! status: 413 (Nope))");
        assert!(texts[1].starts_with("Upload error: b.txt"));
    }

    #[test]
    fn unknown_total_skips_progress_until_completion() {
        let api = ScriptedUploads(vec![Ok(200)], RefCell::new(0));
        let (pipeline, _rx) = pipeline(api);
        let (sink, queue) = recording_sink();
        block_on(pipeline.run(vec![FakeFile("a")], sink));
        let item = queue.borrow().items[0].clone();
        assert_eq!(item.status, UploadStatus::Succeeded);
        assert_eq!(item.progress_percent, Some(100.0));
    }

    #[test]
    fn unsized_transfer_keeps_waiting_label() {
        let (pipeline, _rx) = pipeline(GatedUploads::default());
        let (sink, queue) = recording_sink();
        let mut pool = LocalPool::new();
        {
            let pipeline = pipeline.clone();
            pool.spawner()
                .spawn_local(async move {
                    pipeline.run(vec![FakeFile("stream.log")], sink).await;
                })
                .unwrap();
        }
        pool.run_until_stalled();
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(queue.borrow().items[0].status, UploadStatus::Uploading);
        assert_eq!(queue.borrow().items[0].label(bundle), "waiting…");

        pipeline.api.gates.borrow()[0]
            .unbounded_send(Gate::Progress(5, None))
            .unwrap();
        pool.run_until_stalled();
        assert_eq!(queue.borrow().items[0].label(bundle), "waiting…");

        pipeline.api.gates.borrow()[0]
            .unbounded_send(Gate::Status(200))
            .unwrap();
        pool.run_until_stalled();
        assert_eq!(queue.borrow().items[0].label(bundle), "100%");
    }

    #[test]
    fn row_ids_stay_unique_across_invocations() {
        let api = ScriptedUploads(Vec::new(), RefCell::new(0));
        let (pipeline, _rx) = pipeline(api);
        let (sink, queue) = recording_sink();
        block_on(pipeline.run(vec![FakeFile("a"), FakeFile("b")], sink.clone()));
        block_on(pipeline.run(vec![FakeFile("c")], sink));
        let ids: Vec<u64> = queue.borrow().items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn empty_input_emits_nothing() {
        let api = ScriptedUploads(Vec::new(), RefCell::new(0));
        let (pipeline, _rx) = pipeline(api);
        let (sink, queue) = recording_sink();
        let summary = block_on(pipeline.run(Vec::new(), sink));
        assert_eq!(summary, UploadSummary::default());
        assert!(!queue.borrow().visible);
    }
}
