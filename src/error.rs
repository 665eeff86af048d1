//! Error types (v0.1)
//!
//! Only recoverable conditions live here. Contract violations in the
//! builder protocol (wrong terminal for a builder's shape, extracting
//! error info from an empty context) indicate a broken integration and
//! panic instead; see the builder and host modules.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Setting '{key}' rejected by the host")]
    SettingRejected { key: String },
}
