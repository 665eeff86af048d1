//! Logbridge - structured-event bridge for evaluator diagnostics
//!
//! Adapts a host evaluation engine's hierarchical activity logger to a
//! structured-event consumer: log lines, activities, results and rich
//! error reports arrive through the [`host::HostLogger`] capability set,
//! get built into owned [`event::LogEvent`]s, and are delivered to an
//! [`sink::EventSink`] exactly once each.

pub mod bridge;
pub mod builder;
pub mod error;
pub mod event;
pub mod host;
pub mod settings;
pub mod sink;

pub use bridge::{active_logger, install, BridgeLogger};
pub use builder::EventBuilder;
pub use error::BridgeError;
pub use event::{ActivityId, ActivityKind, Field, LogEvent, ResultKind, TraceFrame, Verbosity};
pub use host::{copy_error_info, ErrorContext, ErrorInfo, HostField, HostLogger, TraceEntry};
pub use settings::EvalSettings;
pub use sink::{EventSink, JsonLinesSink, MemorySink, TracingSink};
