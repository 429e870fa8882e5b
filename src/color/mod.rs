//! Color representations and normalization.
//!
//! This module provides:
//!
//! - [`Rgba`]: The canonical normalized color
//! - [`ColorValue`]: A single color in any accepted representation
//! - [`ColorSpec`]: One color or a sequence of colors, as passed by callers
//! - [`ColorError`]: Normalization failures
//!
//! Every accepted representation (names, hex strings, grayscale levels,
//! `CN` cycle references, RGB(A) tuples) normalizes to an [`Rgba`]; colors
//! are compared on normalized components, never on their spelling.

mod error;
pub mod named;
mod rgba;
mod spec;

pub use error::ColorError;
pub use rgba::{same_color, Rgba};
pub use spec::{to_rgba, to_rgba_array, ColorSpec, ColorValue, DEFAULT_CYCLE};
