//! Plot configuration state with scoped overrides and line color resolution.
//!
//! `plotrc` models the configuration side of a plotting session: named rc
//! parameters, style sheets that set them in bulk, temporary overrides that
//! are undone when their scope ends, and the rule that decides which color a
//! drawn line collection ends up with.
//!
//! # Color precedence
//!
//! A line collection takes the first of:
//!
//! 1. colors passed explicitly to the drawing call,
//! 2. `lines.color` from an active scoped override,
//! 3. `lines.color` under the active style (or the defaults).
//!
//! All colors are normalized to [`Rgba`] before they are compared, so
//! `"white"`, `"#ffffff"`, `"1.0"` and `(1.0, 1.0, 1.0)` are the same color.
//!
//! # Example
//!
//! ```rust
//! use plotrc::{to_rgba, ColorSpec, PlotState, RcHost, RcParams};
//!
//! let mut plt = PlotState::new();
//! plt.use_style(&["dark_background"])?;
//!
//! let white = RcParams::new().with("lines.color", "white")?;
//! let (implicit, explicit) = plt.with_rc(white, |plt| {
//!     let implicit = plt.hlines(0.5, 0.0, 1.0, None)?;
//!     let explicit = plt.hlines(0.5, 0.0, 1.0, Some(ColorSpec::from("red")))?;
//!     Ok::<_, plotrc::PlotError>((implicit, explicit))
//! })?;
//!
//! assert_eq!(plt.line_collection(implicit).unwrap().colors(), &[to_rgba("white")?]);
//! assert_eq!(plt.line_collection(explicit).unwrap().colors(), &[to_rgba("red")?]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`color`]: Color representations and normalization
//! - [`rc`]: Parameters, the configuration context and scoped overrides
//! - [`style`]: Style sheets and the built-in style library
//! - [`resolve`]: The precedence rule for line colors
//! - [`figure`]: Figures, axes and drawing calls

pub mod color;
pub mod figure;
pub mod rc;
pub mod resolve;
pub mod style;

pub use color::{same_color, to_rgba, to_rgba_array, ColorError, ColorSpec, ColorValue, Rgba};
pub use figure::{
    Axes, AxesId, Figure, FigureId, LineCollection, LineId, PlotError, PlotState, PolyCollection,
    PolyId, SubplotArgs, SubplotPosition, Values,
};
pub use rc::{RcContext, RcError, RcHost, RcParams, RcScope, RcValue};
pub use resolve::{ColorResolver, ColorSource};
pub use style::{StyleError, StyleLibrary, StyleSheet};
