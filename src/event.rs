//! Structured event model (v0.1)
//!
//! The owned representation of everything the host evaluator reports:
//! - Verbosity: the host's 8-level scale, mapped onto tracing levels
//! - ActivityKind / ResultKind: closed host enumerations with a warned fallback
//! - Field: typed scalar attached to an activity or result
//! - LogEvent: the finished, serializable event handed to a sink

use serde::{Deserialize, Serialize};

/// Host-assigned opaque activity identifier. Threaded through, never interpreted.
pub type ActivityId = u64;

/// The host evaluator's verbosity scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Error,
    Warn,
    Notice,
    Info,
    Talkative,
    Chatty,
    Debug,
    Vomit,
}

impl Verbosity {
    /// Decode the host's numeric level. Unknown codes degrade to the
    /// chattiest level rather than dropping the event.
    pub fn from_code(code: u32) -> Self {
        [
            Self::Error,
            Self::Warn,
            Self::Notice,
            Self::Info,
            Self::Talkative,
            Self::Chatty,
            Self::Debug,
            Self::Vomit,
        ]
        .get(code as usize)
        .copied()
        .unwrap_or_else(|| {
            tracing::warn!("unknown verbosity level: {code}");
            Self::Vomit
        })
    }
}

impl From<Verbosity> for tracing::Level {
    fn from(v: Verbosity) -> Self {
        match v {
            Verbosity::Error => tracing::Level::ERROR,
            Verbosity::Warn => tracing::Level::WARN,
            Verbosity::Notice => tracing::Level::WARN,
            Verbosity::Info => tracing::Level::INFO,
            Verbosity::Talkative => tracing::Level::DEBUG,
            Verbosity::Chatty => tracing::Level::DEBUG,
            Verbosity::Debug => tracing::Level::DEBUG,
            Verbosity::Vomit => tracing::Level::TRACE,
        }
    }
}

/// Host activity types. The numeric codes are part of the host's wire
/// contract and start at 100 (0 is the untyped activity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Unknown,
    CopyPath,
    FileTransfer,
    Realise,
    CopyPaths,
    Builds,
    Build,
    OptimiseStore,
    VerifyPaths,
    Substitute,
    QueryPathInfo,
    PostBuildHook,
    BuildWaiting,
    FetchTree,
}

impl ActivityKind {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Unknown,
            100 => Self::CopyPath,
            101 => Self::FileTransfer,
            102 => Self::Realise,
            103 => Self::CopyPaths,
            104 => Self::Builds,
            105 => Self::Build,
            106 => Self::OptimiseStore,
            107 => Self::VerifyPaths,
            108 => Self::Substitute,
            109 => Self::QueryPathInfo,
            110 => Self::PostBuildHook,
            111 => Self::BuildWaiting,
            112 => Self::FetchTree,
            _ => {
                tracing::warn!("unknown activity kind: {code}");
                Self::Unknown
            }
        }
    }

    /// Stable dotted label, used as a tracing target by the tracing sink.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "eval",
            Self::CopyPath => "eval::copy-path",
            Self::FileTransfer => "eval::file-transfer",
            Self::Realise => "eval::realise",
            Self::CopyPaths => "eval::copy-paths",
            Self::Builds => "eval::builds",
            Self::Build => "eval::build",
            Self::OptimiseStore => "eval::optimise-store",
            Self::VerifyPaths => "eval::verify-paths",
            Self::Substitute => "eval::substitute",
            Self::QueryPathInfo => "eval::query-path-info",
            Self::PostBuildHook => "eval::post-build-hook",
            Self::BuildWaiting => "eval::build-waiting",
            Self::FetchTree => "eval::fetch-tree",
        }
    }
}

/// Host result types reported against a running activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    FileLinked,
    BuildLogLine,
    UntrustedPath,
    CorruptedPath,
    SetPhase,
    Progress,
    SetExpected,
    PostBuildLogLine,
    FetchStatus,
    Unknown,
}

impl ResultKind {
    pub fn from_code(code: u32) -> Self {
        match code {
            100 => Self::FileLinked,
            101 => Self::BuildLogLine,
            102 => Self::UntrustedPath,
            103 => Self::CorruptedPath,
            104 => Self::SetPhase,
            105 => Self::Progress,
            106 => Self::SetExpected,
            107 => Self::PostBuildLogLine,
            108 => Self::FetchStatus,
            _ => {
                tracing::warn!("unknown result kind: {code}");
                Self::Unknown
            }
        }
    }
}

/// Typed scalar attached to an activity or result event.
///
/// The host's field enumeration is closed; modelling it as a closed sum
/// type removes the "unrecognized tag" branch entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Field {
    Int(i64),
    Str(String),
}

/// One entry in an error's causal stack. `pos` is the host-rendered source
/// position, empty when the frame had none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub hint: String,
    pub pos: String,
}

/// A finished structured event, ready for delivery to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    /// Plain log line, forwarded immediately.
    Plain { level: Verbosity, text: String },

    /// A long-running host operation began.
    ActivityStart {
        id: ActivityId,
        level: Verbosity,
        kind: ActivityKind,
        text: String,
        fields: Vec<Field>,
        parent: ActivityId,
    },

    /// Intermediate result reported against a running activity.
    ActivityResult {
        id: ActivityId,
        result: ResultKind,
        fields: Vec<Field>,
    },

    /// Activity ended. Carries only the id; pairing with the start is a
    /// consumer-side concern.
    ActivityStop { id: ActivityId },

    /// Rich error report. `frames` is outermost-first: root cause context
    /// at index 0, proximate failure last.
    ErrorReport {
        level: Verbosity,
        message: String,
        frames: Vec<TraceFrame>,
    },
}

impl LogEvent {
    /// Extract the activity id if the event is activity-related.
    pub fn activity_id(&self) -> Option<ActivityId> {
        match self {
            Self::ActivityStart { id, .. }
            | Self::ActivityResult { id, .. }
            | Self::ActivityStop { id } => Some(*id),
            Self::Plain { .. } | Self::ErrorReport { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_code_known() {
        assert_eq!(Verbosity::from_code(0), Verbosity::Error);
        assert_eq!(Verbosity::from_code(3), Verbosity::Info);
        assert_eq!(Verbosity::from_code(7), Verbosity::Vomit);
    }

    #[test]
    fn test_verbosity_from_code_unknown_saturates() {
        assert_eq!(Verbosity::from_code(99), Verbosity::Vomit);
    }

    #[test]
    fn test_verbosity_tracing_level_mapping() {
        assert_eq!(tracing::Level::from(Verbosity::Notice), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(Verbosity::Chatty), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(Verbosity::Vomit), tracing::Level::TRACE);
    }

    #[test]
    fn test_activity_kind_codes_round() {
        assert_eq!(ActivityKind::from_code(0), ActivityKind::Unknown);
        assert_eq!(ActivityKind::from_code(105), ActivityKind::Build);
        assert_eq!(ActivityKind::from_code(112), ActivityKind::FetchTree);
        // Unknown codes fall back rather than abort
        assert_eq!(ActivityKind::from_code(42), ActivityKind::Unknown);
    }

    #[test]
    fn test_result_kind_codes() {
        assert_eq!(ResultKind::from_code(101), ResultKind::BuildLogLine);
        assert_eq!(ResultKind::from_code(105), ResultKind::Progress);
        assert_eq!(ResultKind::from_code(7), ResultKind::Unknown);
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = LogEvent::ActivityStart {
            id: 7,
            level: Verbosity::Info,
            kind: ActivityKind::Build,
            text: "building foo".to_string(),
            fields: vec![Field::Str("foo".to_string()), Field::Int(2)],
            parent: 0,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "activity_start");
        assert_eq!(json["id"], 7);
        assert_eq!(json["kind"], "build");
        assert_eq!(json["fields"][0]["type"], "str");
        assert_eq!(json["fields"][0]["value"], "foo");
        assert_eq!(json["fields"][1]["type"], "int");
        assert_eq!(json["fields"][1]["value"], 2);
    }

    #[test]
    fn test_event_deserializes_from_tagged_json() {
        let json = serde_json::json!({
            "type": "error_report",
            "level": "error",
            "message": "eval failed",
            "frames": [{"hint": "while calling f", "pos": "file:1:1"}],
        });

        let event: LogEvent = serde_json::from_value(json).unwrap();
        assert_eq!(
            event,
            LogEvent::ErrorReport {
                level: Verbosity::Error,
                message: "eval failed".to_string(),
                frames: vec![TraceFrame {
                    hint: "while calling f".to_string(),
                    pos: "file:1:1".to_string(),
                }],
            }
        );
    }

    #[test]
    fn test_activity_id_extraction() {
        let stop = LogEvent::ActivityStop { id: 11 };
        assert_eq!(stop.activity_id(), Some(11));

        let plain = LogEvent::Plain {
            level: Verbosity::Info,
            text: "hello".to_string(),
        };
        assert_eq!(plain.activity_id(), None);
    }
}
