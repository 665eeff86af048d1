//! Fetcher-settings pass-through (v0.1)
//!
//! The host exposes an opaque key/value settings object for its fetch
//! layer. The bridge does not interpret settings; it only reports whether
//! the host accepted them. A `false` result is propagated to the caller,
//! never treated as fatal.

use std::collections::HashMap;

/// Settings the host's fetch layer recognizes, with whether the value
/// must be a boolean.
const KNOWN_SETTINGS: &[(&str, bool)] = &[
    ("warn-dirty", true),
    ("allow-dirty", true),
    ("accept-flake-config", true),
    ("http-connections", false),
    ("connect-timeout", false),
];

/// Opaque fetch-settings object.
#[derive(Debug, Clone, Default)]
pub struct EvalSettings {
    values: HashMap<String, String>,
}

impl EvalSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one setting. Returns `false`, without mutating anything, when
    /// the key is unrecognized or the value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let Some((_, boolean)) = KNOWN_SETTINGS.iter().find(|(k, _)| *k == key) else {
            return false;
        };
        if *boolean && value != "true" && value != "false" {
            return false;
        }
        self.values.insert(key.to_string(), value.to_string());
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_setting() {
        let mut settings = EvalSettings::new();
        assert!(settings.set("warn-dirty", "false"));
        assert_eq!(settings.get("warn-dirty"), Some("false"));
    }

    #[test]
    fn test_unknown_key_rejected_without_side_effect() {
        let mut settings = EvalSettings::new();
        assert!(!settings.set("unknown-key", "x"));
        assert_eq!(settings.get("unknown-key"), None);
    }

    #[test]
    fn test_bad_boolean_value_rejected() {
        let mut settings = EvalSettings::new();
        assert!(!settings.set("allow-dirty", "maybe"));
        assert_eq!(settings.get("allow-dirty"), None);
    }

    #[test]
    fn test_non_boolean_setting_accepts_free_form() {
        let mut settings = EvalSettings::new();
        assert!(settings.set("connect-timeout", "30"));
        assert_eq!(settings.get("connect-timeout"), Some("30"));
    }
}
