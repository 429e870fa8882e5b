//! Drawable collections and their inputs.

use super::error::PlotError;
use crate::color::Rgba;

/// A scalar or per-element numeric argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Scalar(f64),
    Many(Vec<f64>),
}

impl Values {
    fn len(&self) -> Option<usize> {
        match self {
            Values::Scalar(_) => None,
            Values::Many(v) => Some(v.len()),
        }
    }

    fn at(&self, i: usize) -> f64 {
        match self {
            Values::Scalar(v) => *v,
            Values::Many(v) if v.len() == 1 => v[0],
            Values::Many(v) => v[i],
        }
    }
}

impl From<f64> for Values {
    fn from(v: f64) -> Self {
        Values::Scalar(v)
    }
}

impl From<Vec<f64>> for Values {
    fn from(v: Vec<f64>) -> Self {
        Values::Many(v)
    }
}

impl From<&[f64]> for Values {
    fn from(v: &[f64]) -> Self {
        Values::Many(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Values {
    fn from(v: [f64; N]) -> Self {
        Values::Many(v.to_vec())
    }
}

/// Broadcasts three arguments to a common length.
///
/// Scalars and single-element sequences repeat; all longer sequences must
/// have the same length.
pub(crate) fn broadcast3(
    function: &'static str,
    args: [&Values; 3],
) -> Result<Vec<[f64; 3]>, PlotError> {
    let mut len = None;
    for n in args.iter().filter_map(|v| v.len()).filter(|&n| n != 1) {
        match len {
            Some(existing) if existing != n => {
                return Err(PlotError::shape(
                    function,
                    format!("arguments of length {} and {} cannot be broadcast", existing, n),
                ))
            }
            _ => len = Some(n),
        }
    }
    let len = len.unwrap_or(1);
    Ok((0..len)
        .map(|i| [args[0].at(i), args[1].at(i), args[2].at(i)])
        .collect())
}

/// The bounding box of the data drawn on an axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataLimits {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl DataLimits {
    fn point(x: f64, y: f64) -> Self {
        Self {
            x0: x,
            x1: x,
            y0: y,
            y1: y,
        }
    }

    fn include(&mut self, x: f64, y: f64) {
        self.x0 = self.x0.min(x);
        self.x1 = self.x1.max(x);
        self.y0 = self.y0.min(y);
        self.y1 = self.y1.max(y);
    }

    /// Grows `limits` to cover `points`, ignoring non-finite coordinates.
    pub(crate) fn extend<'p>(
        limits: &mut Option<DataLimits>,
        points: impl IntoIterator<Item = &'p (f64, f64)>,
    ) {
        for &(x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            match limits {
                Some(l) => l.include(x, y),
                None => *limits = Some(DataLimits::point(x, y)),
            }
        }
    }
}

/// A straight segment between two points.
pub type Segment = [(f64, f64); 2];

/// A batch of line segments drawn with shared style attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCollection {
    segments: Vec<Segment>,
    colors: Vec<Rgba>,
    linewidth: f64,
    linestyle: String,
}

impl LineCollection {
    pub fn new(segments: Vec<Segment>, colors: Vec<Rgba>, linewidth: f64) -> Self {
        Self {
            segments,
            colors,
            linewidth,
            linestyle: "-".to_string(),
        }
    }

    pub fn with_linestyle(mut self, linestyle: impl Into<String>) -> Self {
        self.linestyle = linestyle.into();
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The colors as given, in order. Segment `i` is drawn with
    /// `colors[i % colors.len()]`.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// The color segment `i` is drawn with.
    pub fn color_for(&self, i: usize) -> Option<Rgba> {
        if self.colors.is_empty() {
            None
        } else {
            Some(self.colors[i % self.colors.len()])
        }
    }

    pub fn linewidth(&self) -> f64 {
        self.linewidth
    }

    pub fn linestyle(&self) -> &str {
        &self.linestyle
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A filled polygon, as produced by stacked area plots.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyCollection {
    vertices: Vec<(f64, f64)>,
    facecolor: Rgba,
}

impl PolyCollection {
    pub fn new(vertices: Vec<(f64, f64)>, facecolor: Rgba) -> Self {
        Self {
            vertices,
            facecolor,
        }
    }

    /// Builds the polygon between two curves sharing the same `x`.
    pub fn between(x: &[f64], lower: &[f64], upper: &[f64], facecolor: Rgba) -> Self {
        let forward = x.iter().zip(upper).map(|(&x, &y)| (x, y));
        let backward = x.iter().zip(lower).rev().map(|(&x, &y)| (x, y));
        Self::new(forward.chain(backward).collect(), facecolor)
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    pub fn facecolor(&self) -> Rgba {
        self.facecolor
    }
}
