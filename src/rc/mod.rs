//! Configuration parameters and their scoping.
//!
//! This module provides:
//!
//! - [`RcParams`]: A validated set of named parameters
//! - [`RcValue`]: The typed value of a parameter
//! - [`RcContext`]: The configuration state of a session (defaults, active
//!   styles, scoped overrides)
//! - [`RcHost`] / [`RcScope`]: Scoped overrides that restore the previous
//!   state when the guard is dropped
//! - [`RcError`]: Errors from setting parameters

mod context;
mod error;
mod params;
mod value;

pub use context::{RcContext, RcHost, RcScope};
pub use error::RcError;
pub use params::{kind_of, validate, RcKind, RcParams, KNOWN_PARAMS};
pub use value::RcValue;
