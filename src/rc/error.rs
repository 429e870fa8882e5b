//! Configuration parameter errors.

use thiserror::Error;

/// Error returned when setting an rc parameter fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RcError {
    /// The key is not a known rc parameter.
    #[error("unknown rc parameter '{key}'")]
    UnknownKey { key: String },
    /// The value cannot be converted to the parameter's type.
    #[error("invalid value '{value}' for rc parameter '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl RcError {
    pub(crate) fn invalid(
        key: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        RcError::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_display() {
        let err = RcError::UnknownKey {
            key: "lines.colour".to_string(),
        };
        assert!(err.to_string().contains("lines.colour"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = RcError::invalid("lines.linewidth", "-1", "must be positive");
        let msg = err.to_string();
        assert!(msg.contains("lines.linewidth"));
        assert!(msg.contains("-1"));
        assert!(msg.contains("must be positive"));
    }
}
