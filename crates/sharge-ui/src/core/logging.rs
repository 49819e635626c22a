//! Tracing subscriber that forwards formatted events to a console sink.
//!
//! # Design
//! - The browser has no stdout, so each formatted event is handed to an [`EmitFn`]
//!   together with its [`ConsoleLevel`]; the wasm glue maps that onto `console.*`.
//! - Timestamps and ANSI colours are disabled: the console adds its own and
//!   `SystemTime` is unavailable on `wasm32-unknown-unknown`.

use std::io;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Default filter directive when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Console method an event is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleLevel {
    /// `console.debug` (trace and debug events).
    Debug,
    /// `console.log`.
    Info,
    /// `console.warn`.
    Warn,
    /// `console.error`.
    Error,
}

impl From<&Level> for ConsoleLevel {
    fn from(level: &Level) -> Self {
        if *level == Level::ERROR {
            Self::Error
        } else if *level == Level::WARN {
            Self::Warn
        } else if *level == Level::INFO {
            Self::Info
        } else {
            Self::Debug
        }
    }
}

/// Receives one formatted event line.
pub type EmitFn = fn(ConsoleLevel, &str);

/// [`MakeWriter`] producing a buffered writer per event.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleMakeWriter {
    emit: EmitFn,
}

impl ConsoleMakeWriter {
    /// Writer factory forwarding to `emit`.
    #[must_use]
    pub const fn new(emit: EmitFn) -> Self {
        Self { emit }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(ConsoleLevel::Info, self.emit)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(ConsoleLevel::from(meta.level()), self.emit)
    }
}

/// Collects one event's bytes and emits them on flush or drop.
#[derive(Debug)]
pub struct ConsoleWriter {
    level: ConsoleLevel,
    emit: EmitFn,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    const fn new(level: ConsoleLevel, emit: EmitFn) -> Self {
        Self {
            level,
            emit,
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.buf);
        (self.emit)(self.level, text.trim_end());
        self.buf.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// Subscriber filtering at `level` and formatting into `emit`.
///
/// Invalid directives fall back to [`DEFAULT_LOG_LEVEL`].
pub fn build_subscriber(level: &str, emit: EmitFn) -> impl Subscriber + Send + Sync + use<> {
    tracing_subscriber::registry().with(build_env_filter(level)).with(
        fmt::layer()
            .without_time()
            .with_ansi(false)
            .with_target(false)
            .with_writer(ConsoleMakeWriter::new(emit)),
    )
}

/// Install the console subscriber as the global default.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init_logging(level: &str, emit: EmitFn) -> Result<(), TryInitError> {
    build_subscriber(level, emit).try_init()
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}
