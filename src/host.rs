//! Host-facing interface (v0.1)
//!
//! The evaluator reports diagnostics through the fixed capability set of
//! [`HostLogger`]; the shapes here mirror what the host hands in, before
//! the bridge copies them into owned events.

use std::sync::Arc;

use crate::builder::EventBuilder;
use crate::event::{ActivityId, ActivityKind, ResultKind, Verbosity};
use crate::sink::EventSink;

/// Borrowed view of one host field. The referenced bytes are only valid
/// for the duration of the logger call; the bridge copies them.
///
/// The host's field-tag enumeration is closed, so there is no
/// "unrecognized tag" case to handle.
#[derive(Debug, Clone, Copy)]
pub enum HostField<'a> {
    Int(i64),
    Str(&'a [u8]),
}

/// One entry in the host's trace list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub hint: String,
    /// Source position as rendered by the host's own formatter, empty when
    /// the frame had none.
    pub pos: String,
}

/// Rich error information as reported by the host.
///
/// `traces` is innermost-first: the host's trace list is
/// reverse-chronological, proximate failure at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub level: Verbosity,
    pub message: String,
    pub traces: Vec<TraceEntry>,
}

/// The capability set the host requires of an installed logger.
///
/// Calls arrive synchronously on whatever thread is executing host logic;
/// implementations must run each call to completion before returning and
/// must be callable from multiple threads.
pub trait HostLogger: Send + Sync {
    /// Whether the logger wants maximal detail.
    fn is_verbose(&self) -> bool;

    /// A plain log line.
    fn log(&self, level: Verbosity, text: &[u8]);

    /// Rich error information, trace list innermost-first.
    fn log_error(&self, info: &ErrorInfo);

    /// A long-running operation began.
    fn start_activity(
        &self,
        id: ActivityId,
        level: Verbosity,
        kind: ActivityKind,
        text: &str,
        fields: &[HostField<'_>],
        parent: ActivityId,
    );

    /// The operation identified by `id` ended.
    fn stop_activity(&self, id: ActivityId);

    /// An intermediate result against a running activity.
    fn result(&self, id: ActivityId, result: ResultKind, fields: &[HostField<'_>]);

    /// A warning line.
    fn warn(&self, text: &str);

    /// The host wants raw terminal output. Loggers that own no terminal
    /// degrade gracefully instead of failing the call.
    fn write_to_stdout(&self, text: &str);

    /// An interactive question. `None` means no answer is available.
    fn ask(&self, prompt: &str) -> Option<char>;
}

/// Reverse-on-ingest: build an error-report event from host error info.
///
/// The host supplies traces innermost-first; iterating back-to-front while
/// appending leaves the finished stack outermost-first, root cause context
/// at index 0. This reversal is part of the event contract, not a detail.
pub fn copy_error_info(sink: Arc<dyn EventSink>, info: &ErrorInfo) -> EventBuilder {
    let mut builder = EventBuilder::error(sink, info.level, info.message.as_bytes());
    for entry in info.traces.iter().rev() {
        builder.push_stack_frame(entry.hint.as_bytes(), entry.pos.as_bytes());
    }
    builder
}

/// "Last error" slot populated by the host when an API call fails.
///
/// [`ErrorContext::extract_error_info`] is the ad hoc query path: it pulls
/// a fully-formed error report out of the context without going through
/// the logger callbacks, under the same construction contract.
#[derive(Debug, Default)]
pub struct ErrorContext {
    info: Option<ErrorInfo>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, info: ErrorInfo) {
        self.info = Some(info);
    }

    /// Remove and return the held error, leaving the context empty.
    pub fn take_error(&mut self) -> Option<ErrorInfo> {
        self.info.take()
    }

    pub fn clear(&mut self) {
        self.info = None;
    }

    pub fn has_error(&self) -> bool {
        self.info.is_some()
    }

    /// Build an error-report event from the held error. Callers must check
    /// [`Self::has_error`] first; extracting from an empty context is a
    /// contract violation.
    pub fn extract_error_info(&self, sink: Arc<dyn EventSink>) -> EventBuilder {
        let info = self
            .info
            .as_ref()
            .expect("extract_error_info on a context holding no error");
        copy_error_info(sink, info)
    }
}
