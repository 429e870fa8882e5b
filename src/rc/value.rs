//! Typed rc parameter values.

use serde::Serialize;

use crate::color::{ColorError, ColorValue, Rgba};

/// The value of an rc parameter.
///
/// Values enter the registry loosely typed (`Str`, `Float`, ...) and are
/// coerced to the parameter's kind on [`RcParams::set`](super::RcParams::set),
/// so a stored color parameter always holds `Color` and a stored cycle
/// always holds `Colors`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RcValue {
    Bool(bool),
    Float(f64),
    Str(String),
    Color(ColorValue),
    Colors(Vec<ColorValue>),
}

impl RcValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RcValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            RcValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RcValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&ColorValue> {
        match self {
            RcValue::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_colors(&self) -> Option<&[ColorValue]> {
        match self {
            RcValue::Colors(c) => Some(c.as_slice()),
            _ => None,
        }
    }

    /// Normalizes a color or color list value, resolving `CN` against `cycle`.
    pub fn to_rgba_array(&self, cycle: &[Rgba]) -> Result<Vec<Rgba>, ColorError> {
        match self {
            RcValue::Color(c) => Ok(vec![c.to_rgba_with_cycle(cycle)?]),
            RcValue::Colors(list) => list.iter().map(|c| c.to_rgba_with_cycle(cycle)).collect(),
            RcValue::Str(s) => Ok(vec![ColorValue::from(s.as_str()).to_rgba_with_cycle(cycle)?]),
            other => Err(ColorError::InvalidColor {
                repr: other.to_string(),
                reason: "value is not a color".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RcValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RcValue::Bool(b) => write!(f, "{}", b),
            RcValue::Float(v) => write!(f, "{}", v),
            RcValue::Str(s) => f.write_str(s),
            RcValue::Color(c) => write!(f, "{}", c),
            RcValue::Colors(list) => {
                let items: Vec<String> = list.iter().map(|c| c.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl From<bool> for RcValue {
    fn from(b: bool) -> Self {
        RcValue::Bool(b)
    }
}

impl From<f64> for RcValue {
    fn from(v: f64) -> Self {
        RcValue::Float(v)
    }
}

impl From<&str> for RcValue {
    fn from(s: &str) -> Self {
        RcValue::Str(s.to_string())
    }
}

impl From<String> for RcValue {
    fn from(s: String) -> Self {
        RcValue::Str(s)
    }
}

impl From<ColorValue> for RcValue {
    fn from(c: ColorValue) -> Self {
        RcValue::Color(c)
    }
}

impl From<Rgba> for RcValue {
    fn from(c: Rgba) -> Self {
        RcValue::Color(c.into())
    }
}

impl From<Vec<ColorValue>> for RcValue {
    fn from(list: Vec<ColorValue>) -> Self {
        RcValue::Colors(list)
    }
}

impl From<Vec<&str>> for RcValue {
    fn from(list: Vec<&str>) -> Self {
        RcValue::Colors(list.into_iter().map(ColorValue::from).collect())
    }
}
