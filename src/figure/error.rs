//! Errors from figure and axes operations.

use thiserror::Error;

use crate::color::ColorError;
use crate::rc::RcError;
use crate::style::StyleError;

/// Errors from drawing calls and layout helpers.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Mutually exclusive positional and keyword arguments were both given.
    #[error("{function}(): {message}")]
    ArgumentConflict {
        function: &'static str,
        message: String,
    },

    /// A subplot specification does not describe a cell of its grid.
    #[error("invalid subplot specification: {message}")]
    InvalidSubplot { message: String },

    /// Array arguments cannot be broadcast to a common length.
    #[error("{function}(): {message}")]
    ShapeMismatch {
        function: &'static str,
        message: String,
    },

    /// An identifier does not refer to an existing figure, axes or artist.
    #[error("no such {kind}")]
    NoSuchArtist { kind: &'static str },

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Rc(#[from] RcError),

    #[error(transparent)]
    Style(#[from] StyleError),
}

impl PlotError {
    pub(crate) fn shape(function: &'static str, message: impl Into<String>) -> Self {
        PlotError::ShapeMismatch {
            function,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_subplot(message: impl Into<String>) -> Self {
        PlotError::InvalidSubplot {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_conflict_display() {
        let err = PlotError::ArgumentConflict {
            function: "subplot",
            message: "keyword 'nrows' conflicts".to_string(),
        };
        assert_eq!(err.to_string(), "subplot(): keyword 'nrows' conflicts");
    }

    #[test]
    fn test_color_error_is_transparent() {
        let err: PlotError = ColorError::InvalidColor {
            repr: "blurple".to_string(),
            reason: "unknown color name".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "invalid color 'blurple': unknown color name");
    }
}
