//! Logger adapter and installation (v0.1)
//!
//! [`BridgeLogger`] translates each host logger call into builder
//! interactions against a single sink. Every call runs to completion on
//! the calling thread; the bridge introduces no queues or threads of its
//! own, so event order per host thread matches call order.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::builder::EventBuilder;
use crate::event::{ActivityId, ActivityKind, LogEvent, ResultKind, Verbosity};
use crate::host::{copy_error_info, ErrorInfo, HostField, HostLogger};
use crate::sink::EventSink;

/// Adapter from the host's logger capability set to structured events.
pub struct BridgeLogger {
    sink: Arc<dyn EventSink>,
}

impl BridgeLogger {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> Arc<dyn EventSink> {
        Arc::clone(&self.sink)
    }

    fn append_fields(builder: &mut EventBuilder, fields: &[HostField<'_>]) {
        for field in fields {
            match field {
                HostField::Int(i) => builder.add_int_field(*i),
                HostField::Str(s) => builder.add_string_field(s),
            }
        }
    }
}

impl HostLogger for BridgeLogger {
    /// Always true: filtering is a consumer-side concern.
    fn is_verbose(&self) -> bool {
        true
    }

    fn log(&self, level: Verbosity, text: &[u8]) {
        self.sink.deliver(LogEvent::Plain {
            level,
            text: String::from_utf8_lossy(text).into_owned(),
        });
    }

    fn log_error(&self, info: &ErrorInfo) {
        copy_error_info(self.sink(), info).emit_error();
    }

    fn start_activity(
        &self,
        id: ActivityId,
        level: Verbosity,
        kind: ActivityKind,
        text: &str,
        fields: &[HostField<'_>],
        parent: ActivityId,
    ) {
        let mut builder = EventBuilder::activity(self.sink(), id, level, kind);
        Self::append_fields(&mut builder, fields);
        builder.emit_start(parent, text);
    }

    fn stop_activity(&self, id: ActivityId) {
        self.sink.deliver(LogEvent::ActivityStop { id });
    }

    fn result(&self, id: ActivityId, result: ResultKind, fields: &[HostField<'_>]) {
        let mut builder = EventBuilder::result(self.sink(), id);
        Self::append_fields(&mut builder, fields);
        builder.emit_result(result);
    }

    fn warn(&self, text: &str) {
        self.sink.deliver(LogEvent::Plain {
            level: Verbosity::Warn,
            text: text.to_string(),
        });
    }

    fn write_to_stdout(&self, _text: &str) {
        // The bridge owns no terminal; surface the dropped call instead
        // of writing anywhere.
        self.warn("write_to_stdout() called, but unsupported");
    }

    fn ask(&self, _prompt: &str) -> Option<char> {
        self.warn("ask() called, but unsupported");
        None
    }
}

static ACTIVE_LOGGER: Lazy<RwLock<Option<Arc<dyn HostLogger>>>> = Lazy::new(|| RwLock::new(None));

/// Install `logger` as the process-wide active logger.
///
/// Expected to be called once, early, before concurrent host activity
/// begins. Calling again replaces the previous logger; there is no
/// teardown.
pub fn install(logger: Arc<dyn HostLogger>) {
    *ACTIVE_LOGGER.write() = Some(logger);
}

/// The currently installed logger, if any.
pub fn active_logger() -> Option<Arc<dyn HostLogger>> {
    ACTIVE_LOGGER.read().clone()
}
