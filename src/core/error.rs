//=========================================================================
// Core Errors
//=========================================================================
//
// Error types surfaced at the public API boundary of the core systems.
//
// None of these are fatal: every public operation pairs a failure with a
// safe fallback state, and the error value exists for logging/telemetry.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== BusError ============================================================

/// Rejected event bus registrations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("event name must be a non-empty string")]
    EmptyEventName,
}

//=== HandlerError ========================================================

/// Failure reported by (or caught from) a single event subscriber.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("subscriber failed: {message}")]
pub struct HandlerError {
    pub message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<BusError> for HandlerError {
    fn from(err: BusError) -> Self {
        Self::new(err.to_string())
    }
}

//=== StateError ==========================================================

/// Malformed state store calls.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("state update must be a record, got {0}")]
    NotARecord(&'static str),

    #[error("unknown state field `{0}`")]
    UnknownField(String),

    #[error("invalid state patch: {source}")]
    InvalidPatch {
        #[from]
        source: serde_json::Error,
    },
}

//=== SourceError =========================================================

/// Failure of the external word/persistence collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("word source unavailable: {0}")]
    Unavailable(String),

    #[error("failed to persist {what}: {reason}")]
    Persist { what: &'static str, reason: String },
}

//=== FlowError ==========================================================

/// Rejected round-flow requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("word list contains no playable words")]
    EmptyWordList,
}

//=== ConfigError =========================================================

/// Invalid game configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_readable_messages() {
        assert_eq!(
            BusError::EmptyEventName.to_string(),
            "event name must be a non-empty string"
        );
        assert_eq!(
            HandlerError::new("boom").to_string(),
            "subscriber failed: boom"
        );
        assert_eq!(
            StateError::UnknownField("lives".to_string()).to_string(),
            "unknown state field `lives`"
        );
        assert_eq!(
            SourceError::Persist {
                what: "score",
                reason: "quota".to_string()
            }
            .to_string(),
            "failed to persist score: quota"
        );
    }

    #[test]
    fn serde_errors_convert_into_state_and_config_errors() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StateError = bad.into();
        assert!(matches!(err, StateError::InvalidPatch { .. }));

        let bad = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err: ConfigError = bad.into();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
