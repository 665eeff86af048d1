//! Event consumers (v0.1)
//!
//! A sink receives finished events, one atomic delivery per event. Sinks
//! must tolerate concurrent delivery: the host may log from any thread,
//! and each emit runs synchronously on the calling thread.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::{LogEvent, Verbosity};

/// Consumer side of the bridge. `deliver` takes ownership of one finished
/// event and must complete before returning; there is no buffering or
/// retry anywhere in the bridge.
pub trait EventSink: Send + Sync {
    fn deliver(&self, event: LogEvent);
}

/// In-memory, append-only sink. Cloneable; clones share the same buffer.
///
/// This is the primary consumer for tests and for the ad hoc query path,
/// where the caller wants to inspect what was emitted.
#[derive(Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far, in delivery order.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn deliver(&self, event: LogEvent) {
        self.events.lock().push(event);
    }
}

impl std::fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySink").field("len", &self.len()).finish()
    }
}

/// Forwards every event to `tracing` at the mapped level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }

    fn line(level: Verbosity, scope: &str, text: &str) {
        let level: tracing::Level = level.into();
        if level == tracing::Level::ERROR {
            tracing::error!(target: "eval", "{scope}: {text}");
        } else if level == tracing::Level::WARN {
            tracing::warn!(target: "eval", "{scope}: {text}");
        } else if level == tracing::Level::INFO {
            tracing::info!(target: "eval", "{scope}: {text}");
        } else if level == tracing::Level::DEBUG {
            tracing::debug!(target: "eval", "{scope}: {text}");
        } else {
            tracing::trace!(target: "eval", "{scope}: {text}");
        }
    }
}

impl EventSink for TracingSink {
    fn deliver(&self, event: LogEvent) {
        match event {
            LogEvent::Plain { level, text } => Self::line(level, "log", &text),
            LogEvent::ActivityStart {
                id,
                level,
                kind,
                text,
                fields,
                parent,
            } => {
                Self::line(
                    level,
                    kind.name(),
                    &format!("start id={id} parent={parent} fields={fields:?} {text}"),
                );
            }
            LogEvent::ActivityResult { id, result, fields } => {
                Self::line(
                    Verbosity::Talkative,
                    "result",
                    &format!("id={id} {result:?} fields={fields:?}"),
                );
            }
            LogEvent::ActivityStop { id } => {
                Self::line(Verbosity::Vomit, "stop", &format!("id={id}"));
            }
            LogEvent::ErrorReport {
                level,
                message,
                frames,
            } => {
                Self::line(level, "error", &message);
                for frame in &frames {
                    Self::line(level, "error", &format!("  {} at {}", frame.hint, frame.pos));
                }
            }
        }
    }
}

/// Writes one JSON object per line. Deliveries are serialized through a
/// mutex so concurrent emits cannot interleave within a line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn deliver(&self, event: LogEvent) {
        let mut writer = self.writer.lock();
        // Delivery is infallible by contract: a failed write is reported
        // and the event dropped, never retried.
        let result = serde_json::to_writer(&mut *writer, &event)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush());
        if let Err(e) = result {
            tracing::error!("dropping event, sink write failed: {e}");
        }
    }
}
