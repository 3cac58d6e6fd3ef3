use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced through a speech session's `error` state.
///
/// These are never returned from the control operations; the session records the
/// latest one and exposes it as a message until `clear_error` is called.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The speech engine is absent. Fatal for the lifetime of the session.
    #[error("Speech synthesis is not supported.")]
    CapabilityUnavailable,

    /// `speak` was called with blank text.
    #[error("Please enter some text to speak.")]
    EmptyInput,

    /// The engine failed to render one queued unit. The sequence continues.
    #[error("Speech error: {0}")]
    UnitPlayback(String),
}

impl SessionError {
    /// Whether the session can keep accepting control calls after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::CapabilityUnavailable)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid script range: U+{start:04X} is after U+{end:04X}")]
    InvalidScriptRange { start: u32, end: u32 },

    #[error("Invalid language tag for {field}: '{value}'")]
    InvalidLanguageTag { field: &'static str, value: String },

    #[error("Failed to compile segment pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_messages() {
        assert_eq!(
            SessionError::CapabilityUnavailable.to_string(),
            "Speech synthesis is not supported."
        );
        assert_eq!(
            SessionError::EmptyInput.to_string(),
            "Please enter some text to speak."
        );
        assert_eq!(
            SessionError::UnitPlayback("synthesis-failed".to_string()).to_string(),
            "Speech error: synthesis-failed"
        );
    }

    #[test]
    fn only_missing_capability_is_fatal() {
        assert!(SessionError::CapabilityUnavailable.is_fatal());
        assert!(!SessionError::EmptyInput.is_fatal());
        assert!(!SessionError::UnitPlayback("x".into()).is_fatal());
    }
}
