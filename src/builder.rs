//! Event builder protocol (v0.1)
//!
//! One builder per outgoing event. The shape (activity start, activity
//! result, error report) is fixed at construction; appends are order
//! preserving; every terminal method takes `self` by value, so a builder
//! cannot be appended to after emission or emitted twice.
//!
//! Shape violations (appending frames to an activity builder, finishing a
//! builder with the wrong terminal) are contract violations in the
//! producer/consumer pairing and panic immediately.

use std::sync::Arc;

use crate::event::{ActivityId, ActivityKind, Field, LogEvent, ResultKind, TraceFrame, Verbosity};
use crate::sink::EventSink;

#[derive(Debug)]
enum Shape {
    Activity {
        id: ActivityId,
        level: Verbosity,
        kind: ActivityKind,
        fields: Vec<Field>,
    },
    Result {
        id: ActivityId,
        fields: Vec<Field>,
    },
    Error {
        level: Verbosity,
        message: String,
        frames: Vec<TraceFrame>,
    },
}

impl Shape {
    fn name(&self) -> &'static str {
        match self {
            Shape::Activity { .. } => "activity start",
            Shape::Result { .. } => "activity result",
            Shape::Error { .. } => "error report",
        }
    }
}

/// Incrementally-populated representation of one outgoing event.
///
/// Exclusively owned by whoever is populating it; ownership transfers to
/// the sink at the terminal call, which delivers synchronously.
pub struct EventBuilder {
    sink: Arc<dyn EventSink>,
    shape: Shape,
}

impl EventBuilder {
    /// Start building an activity-start event.
    pub fn activity(
        sink: Arc<dyn EventSink>,
        id: ActivityId,
        level: Verbosity,
        kind: ActivityKind,
    ) -> Self {
        Self {
            sink,
            shape: Shape::Activity {
                id,
                level,
                kind,
                fields: Vec::new(),
            },
        }
    }

    /// Start building a result event for a running activity.
    pub fn result(sink: Arc<dyn EventSink>, id: ActivityId) -> Self {
        Self {
            sink,
            shape: Shape::Result {
                id,
                fields: Vec::new(),
            },
        }
    }

    /// Start building an error report. The message bytes are copied here;
    /// the host's buffer is only valid for the duration of the call.
    pub fn error(sink: Arc<dyn EventSink>, level: Verbosity, message: &[u8]) -> Self {
        Self {
            sink,
            shape: Shape::Error {
                level,
                message: String::from_utf8_lossy(message).into_owned(),
                frames: Vec::new(),
            },
        }
    }

    /// Append an integer field, preserving append order.
    pub fn add_int_field(&mut self, value: i64) {
        self.fields_mut("add_int_field").push(Field::Int(value));
    }

    /// Append a string field. The bytes are copied out of the host buffer.
    pub fn add_string_field(&mut self, value: &[u8]) {
        self.fields_mut("add_string_field")
            .push(Field::Str(String::from_utf8_lossy(value).into_owned()));
    }

    /// Append a trace frame. Frames are recorded in call order; the caller
    /// iterates the host's innermost-first trace list in reverse so the
    /// finished stack is outermost-first.
    pub fn push_stack_frame(&mut self, hint: &[u8], pos: &[u8]) {
        match &mut self.shape {
            Shape::Error { frames, .. } => frames.push(TraceFrame {
                hint: String::from_utf8_lossy(hint).into_owned(),
                pos: String::from_utf8_lossy(pos).into_owned(),
            }),
            other => panic!("push_stack_frame on a {} builder", other.name()),
        }
    }

    /// Finish an activity-start builder and deliver it.
    pub fn emit_start(self, parent: ActivityId, text: &str) {
        match self.shape {
            Shape::Activity {
                id,
                level,
                kind,
                fields,
            } => self.sink.deliver(LogEvent::ActivityStart {
                id,
                level,
                kind,
                text: text.to_string(),
                fields,
                parent,
            }),
            other => panic!("emit_start on a {} builder", other.name()),
        }
    }

    /// Finish a result builder and deliver it.
    pub fn emit_result(self, result: ResultKind) {
        match self.shape {
            Shape::Result { id, fields } => {
                self.sink
                    .deliver(LogEvent::ActivityResult { id, result, fields })
            }
            other => panic!("emit_result on a {} builder", other.name()),
        }
    }

    /// Finish an error-report builder and deliver it.
    pub fn emit_error(self) {
        match self.shape {
            Shape::Error {
                level,
                message,
                frames,
            } => self.sink.deliver(LogEvent::ErrorReport {
                level,
                message,
                frames,
            }),
            other => panic!("emit_error on a {} builder", other.name()),
        }
    }

    fn fields_mut(&mut self, op: &str) -> &mut Vec<Field> {
        match &mut self.shape {
            Shape::Activity { fields, .. } | Shape::Result { fields, .. } => fields,
            other => panic!("{op} on a {} builder", other.name()),
        }
    }
}

impl std::fmt::Debug for EventBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBuilder")
            .field("shape", &self.shape)
            .finish()
    }
}
