//! Style sheets and the style library.
//!
//! This module provides:
//!
//! - [`StyleSheet`]: A named set of rc parameters parsed from YAML
//! - [`StyleLibrary`]: Built-in and user style sheets addressable by name
//! - [`StyleError`]: Errors from loading or activating styles
//!
//! Styles are activated on an [`RcContext`](crate::RcContext) with
//! [`use_style`](crate::RcContext::use_style).

mod error;
mod library;
mod sheet;

pub use error::StyleError;
pub use library::{StyleLibrary, STYLE_EXTENSIONS};
pub use sheet::StyleSheet;
