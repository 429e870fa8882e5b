//! In-memory figures and the drawing calls whose colors are resolved
//! against the configuration.
//!
//! This module provides:
//!
//! - [`PlotState`]: A plotting session owning an [`RcContext`](crate::RcContext)
//! - [`Figure`] / [`Axes`]: Bookkeeping for created figures and subplots
//! - [`LineCollection`] / [`PolyCollection`]: The artists drawn by
//!   `hlines`/`vlines` and `stackplot`
//! - [`SubplotArgs`] / [`SubplotPosition`]: Subplot argument checking
//! - [`PlotError`]: Errors from drawing calls

mod artist;
mod axes;
mod error;
mod state;
mod subplot;

pub use artist::{DataLimits, LineCollection, PolyCollection, Segment, Values};
pub use axes::Axes;
pub use error::PlotError;
pub use state::{AxesId, Figure, FigureId, LineId, PlotState, PolyId};
pub use subplot::{SubplotArgs, SubplotPosition};
