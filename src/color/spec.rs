//! Color specifications accepted at call sites and in configuration.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::error::ColorError;
use super::named::{self, TABLEAU_COLORS};
use super::rgba::Rgba;

/// The default color cycle, used to resolve `CN` references outside of a
/// configuration context.
pub static DEFAULT_CYCLE: Lazy<Vec<Rgba>> = Lazy::new(|| {
    TABLEAU_COLORS
        .iter()
        .filter_map(|(_, hex)| Rgba::from_hex(hex).ok())
        .collect()
});

/// A single color in any accepted representation.
///
/// String values may be a color name (`"red"`, `"k"`, `"tab:blue"`), a hex
/// string (`"#ff0000"`, `"#f00a"`), a grayscale level (`"0.5"`), a cycle
/// reference (`"C3"`) or `"none"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Str(String),
    Rgb([f64; 3]),
    Rgba([f64; 4]),
}

impl ColorValue {
    /// Normalizes against the default color cycle.
    pub fn to_rgba(&self) -> Result<Rgba, ColorError> {
        self.to_rgba_with_cycle(&DEFAULT_CYCLE)
    }

    /// Normalizes, resolving `CN` references against `cycle`.
    pub fn to_rgba_with_cycle(&self, cycle: &[Rgba]) -> Result<Rgba, ColorError> {
        match self {
            ColorValue::Str(s) => parse_color_str(s, cycle),
            ColorValue::Rgb(c) => Rgba::try_from_components(c),
            ColorValue::Rgba(c) => Rgba::try_from_components(c),
        }
    }

    /// Returns the cycle index if this is a `CN` reference.
    pub fn cycle_index(&self) -> Option<usize> {
        match self {
            ColorValue::Str(s) => parse_cycle_ref(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorValue::Str(s) => f.write_str(s),
            ColorValue::Rgb([r, g, b]) => write!(f, "({}, {}, {})", r, g, b),
            ColorValue::Rgba([r, g, b, a]) => write!(f, "({}, {}, {}, {})", r, g, b, a),
        }
    }
}

fn parse_cycle_ref(s: &str) -> Option<usize> {
    let digits = s.strip_prefix('C')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn parse_color_str(s: &str, cycle: &[Rgba]) -> Result<Rgba, ColorError> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(Rgba::TRANSPARENT);
    }

    if let Some(index) = parse_cycle_ref(s) {
        if cycle.is_empty() {
            return Err(ColorError::invalid(s, "color cycle is empty"));
        }
        return Ok(cycle[index % cycle.len()]);
    }

    if let Some(hex) = named::lookup(s) {
        return Rgba::from_hex(hex);
    }

    if s.starts_with('#') {
        return Rgba::from_hex(s);
    }

    if let Ok(level) = s.parse::<f64>() {
        if !level.is_finite() || !(0.0..=1.0).contains(&level) {
            return Err(ColorError::invalid(
                s,
                "grayscale level must be within 0..=1",
            ));
        }
        return Ok(Rgba::new(level, level, level, 1.0));
    }

    Err(ColorError::invalid(s, "unknown color name"))
}

impl From<&str> for ColorValue {
    fn from(s: &str) -> Self {
        ColorValue::Str(s.to_string())
    }
}

impl From<String> for ColorValue {
    fn from(s: String) -> Self {
        ColorValue::Str(s)
    }
}

impl From<[f64; 3]> for ColorValue {
    fn from(c: [f64; 3]) -> Self {
        ColorValue::Rgb(c)
    }
}

impl From<[f64; 4]> for ColorValue {
    fn from(c: [f64; 4]) -> Self {
        ColorValue::Rgba(c)
    }
}

impl From<(f64, f64, f64)> for ColorValue {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        ColorValue::Rgb([r, g, b])
    }
}

impl From<(f64, f64, f64, f64)> for ColorValue {
    fn from((r, g, b, a): (f64, f64, f64, f64)) -> Self {
        ColorValue::Rgba([r, g, b, a])
    }
}

impl From<Rgba> for ColorValue {
    fn from(c: Rgba) -> Self {
        ColorValue::Rgba(c.to_array())
    }
}

/// A call-site color argument: one color for every element, or one color
/// per element.
///
/// An absent argument is expressed as `Option::<ColorSpec>::None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(ColorValue),
    Many(Vec<ColorValue>),
}

impl ColorSpec {
    /// Normalizes against the default color cycle.
    pub fn to_rgba_array(&self) -> Result<Vec<Rgba>, ColorError> {
        self.to_rgba_array_with_cycle(&DEFAULT_CYCLE)
    }

    /// Normalizes every entry, preserving input order. Fails as a whole if
    /// any entry is invalid.
    pub fn to_rgba_array_with_cycle(&self, cycle: &[Rgba]) -> Result<Vec<Rgba>, ColorError> {
        match self {
            ColorSpec::Single(value) => Ok(vec![value.to_rgba_with_cycle(cycle)?]),
            ColorSpec::Many(values) => values
                .iter()
                .map(|v| v.to_rgba_with_cycle(cycle))
                .collect(),
        }
    }

    /// Number of colors in the specification.
    pub fn len(&self) -> usize {
        match self {
            ColorSpec::Single(_) => 1,
            ColorSpec::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<ColorValue> for ColorSpec {
    fn from(value: ColorValue) -> Self {
        ColorSpec::Single(value)
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        ColorSpec::Single(s.into())
    }
}

impl From<String> for ColorSpec {
    fn from(s: String) -> Self {
        ColorSpec::Single(s.into())
    }
}

impl From<Rgba> for ColorSpec {
    fn from(c: Rgba) -> Self {
        ColorSpec::Single(c.into())
    }
}

impl From<[f64; 3]> for ColorSpec {
    fn from(c: [f64; 3]) -> Self {
        ColorSpec::Single(c.into())
    }
}

impl From<[f64; 4]> for ColorSpec {
    fn from(c: [f64; 4]) -> Self {
        ColorSpec::Single(c.into())
    }
}

impl From<Vec<ColorValue>> for ColorSpec {
    fn from(values: Vec<ColorValue>) -> Self {
        ColorSpec::Many(values)
    }
}

impl From<&[&str]> for ColorSpec {
    fn from(names: &[&str]) -> Self {
        ColorSpec::Many(names.iter().map(|s| ColorValue::from(*s)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColorSpec {
    fn from(names: [&str; N]) -> Self {
        ColorSpec::Many(names.iter().map(|s| ColorValue::from(*s)).collect())
    }
}

/// Normalizes a single color against the default cycle.
pub fn to_rgba(value: impl Into<ColorValue>) -> Result<Rgba, ColorError> {
    value.into().to_rgba()
}

/// Normalizes a color specification against the default cycle.
pub fn to_rgba_array(spec: impl Into<ColorSpec>) -> Result<Vec<Rgba>, ColorError> {
    spec.into().to_rgba_array()
}
