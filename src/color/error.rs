//! Color normalization errors.

use thiserror::Error;

/// Error returned when a color representation cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value is not a recognized color name, hex string, grayscale
    /// level, cycle reference or RGB(A) tuple.
    #[error("invalid color '{repr}': {reason}")]
    InvalidColor { repr: String, reason: String },
}

impl ColorError {
    pub(crate) fn invalid(repr: impl Into<String>, reason: impl Into<String>) -> Self {
        ColorError::InvalidColor {
            repr: repr.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_color_display() {
        let err = ColorError::invalid("blurple", "unknown color name");
        let msg = err.to_string();
        assert!(msg.contains("blurple"));
        assert!(msg.contains("unknown color name"));
    }
}
