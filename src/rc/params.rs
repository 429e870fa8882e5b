//! The rc parameter registry.
//!
//! Every known parameter has a [`RcKind`] that decides how incoming values
//! are coerced and validated. Unknown keys are rejected so that typos in
//! style sheets and overrides surface immediately instead of being ignored.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::error::RcError;
use super::value::RcValue;
use crate::color::named::TABLEAU_COLORS;
use crate::color::ColorValue;

/// The value type of an rc parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcKind {
    /// A single color.
    Color,
    /// A non-empty list of concrete colors (no `CN` references).
    ColorList,
    /// A finite float greater than zero.
    PositiveFloat,
    Bool,
    /// One of the named or short-hand line styles.
    LineStyle,
}

impl RcKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RcKind::Color => "color",
            RcKind::ColorList => "color list",
            RcKind::PositiveFloat => "positive float",
            RcKind::Bool => "boolean",
            RcKind::LineStyle => "line style",
        }
    }
}

impl std::fmt::Display for RcKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All known parameters and their kinds.
pub const KNOWN_PARAMS: &[(&str, RcKind)] = &[
    ("lines.color", RcKind::Color),
    ("lines.linewidth", RcKind::PositiveFloat),
    ("lines.linestyle", RcKind::LineStyle),
    ("patch.facecolor", RcKind::Color),
    ("patch.edgecolor", RcKind::Color),
    ("text.color", RcKind::Color),
    ("axes.facecolor", RcKind::Color),
    ("axes.edgecolor", RcKind::Color),
    ("axes.labelcolor", RcKind::Color),
    ("axes.linewidth", RcKind::PositiveFloat),
    ("axes.grid", RcKind::Bool),
    ("axes.prop_cycle", RcKind::ColorList),
    ("xtick.color", RcKind::Color),
    ("ytick.color", RcKind::Color),
    ("grid.color", RcKind::Color),
    ("grid.linewidth", RcKind::PositiveFloat),
    ("figure.facecolor", RcKind::Color),
    ("figure.edgecolor", RcKind::Color),
    ("figure.dpi", RcKind::PositiveFloat),
    ("savefig.facecolor", RcKind::Color),
    ("savefig.edgecolor", RcKind::Color),
];

/// Line style spellings and their canonical short form.
const LINE_STYLES: &[(&str, &str)] = &[
    ("-", "-"),
    ("solid", "-"),
    ("--", "--"),
    ("dashed", "--"),
    ("-.", "-."),
    ("dashdot", "-."),
    (":", ":"),
    ("dotted", ":"),
    ("none", "None"),
    ("None", "None"),
    ("", "None"),
];

/// Returns the kind of a known parameter.
pub fn kind_of(key: &str) -> Option<RcKind> {
    KNOWN_PARAMS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kind)| *kind)
}

static DEFAULTS: Lazy<RcParams> = Lazy::new(|| {
    let color = |s: &str| RcValue::Color(ColorValue::from(s));
    let cycle = TABLEAU_COLORS
        .iter()
        .map(|(_, hex)| ColorValue::from(*hex))
        .collect();

    let values = [
        ("lines.color", color("C0")),
        ("lines.linewidth", RcValue::Float(1.5)),
        ("lines.linestyle", RcValue::Str("-".into())),
        ("patch.facecolor", color("C0")),
        ("patch.edgecolor", color("black")),
        ("text.color", color("black")),
        ("axes.facecolor", color("white")),
        ("axes.edgecolor", color("black")),
        ("axes.labelcolor", color("black")),
        ("axes.linewidth", RcValue::Float(0.8)),
        ("axes.grid", RcValue::Bool(false)),
        ("axes.prop_cycle", RcValue::Colors(cycle)),
        ("xtick.color", color("black")),
        ("ytick.color", color("black")),
        ("grid.color", color("#b0b0b0")),
        ("grid.linewidth", RcValue::Float(0.8)),
        ("figure.facecolor", color("white")),
        ("figure.edgecolor", color("white")),
        ("figure.dpi", RcValue::Float(100.0)),
        ("savefig.facecolor", color("white")),
        ("savefig.edgecolor", color("white")),
    ];

    RcParams {
        values: values
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    }
});

/// A set of validated rc parameters.
///
/// Used both for complete configurations ([`RcParams::defaults`]) and for
/// partial ones such as style sheets and scoped overrides
/// ([`RcParams::new`]).
///
/// # Example
///
/// ```rust
/// use plotrc::RcParams;
///
/// let overrides = RcParams::new()
///     .with("lines.color", "white")?
///     .with("lines.linewidth", 2.0)?;
/// assert_eq!(overrides.len(), 2);
/// # Ok::<(), plotrc::RcError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RcParams {
    values: BTreeMap<String, RcValue>,
}

impl RcParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in default configuration.
    pub fn defaults() -> Self {
        DEFAULTS.clone()
    }

    /// Builds a parameter set from key/value pairs, validating each.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, RcError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<RcValue>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.set(key.as_ref(), value)?;
        }
        Ok(params)
    }

    /// Sets a parameter, returning the updated set for chaining.
    pub fn with<V: Into<RcValue>>(mut self, key: &str, value: V) -> Result<Self, RcError> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Validates and sets a parameter.
    pub fn set<V: Into<RcValue>>(&mut self, key: &str, value: V) -> Result<(), RcError> {
        let value = validate(key, value.into())?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Removes a parameter, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<RcValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&RcValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn color(&self, key: &str) -> Option<&ColorValue> {
        self.get(key).and_then(RcValue::as_color)
    }

    pub fn colors(&self, key: &str) -> Option<&[ColorValue]> {
        self.get(key).and_then(RcValue::as_colors)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(RcValue::as_float)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(RcValue::as_bool)
    }

    /// Copies every parameter of `other` over this set.
    pub fn update(&mut self, other: &RcParams) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Iterates parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RcValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Coerces `value` to the kind of `key`.
pub fn validate(key: &str, value: RcValue) -> Result<RcValue, RcError> {
    let kind = kind_of(key).ok_or_else(|| RcError::UnknownKey {
        key: key.to_string(),
    })?;

    match kind {
        RcKind::Color => validate_color(key, value).map(RcValue::Color),
        RcKind::ColorList => validate_color_list(key, value).map(RcValue::Colors),
        RcKind::PositiveFloat => {
            let v = match &value {
                RcValue::Float(v) => *v,
                RcValue::Str(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| RcError::invalid(key, &value, e.to_string()))?,
                _ => return Err(RcError::invalid(key, &value, "expected a number")),
            };
            if !v.is_finite() || v <= 0.0 {
                return Err(RcError::invalid(key, &value, "must be a positive number"));
            }
            Ok(RcValue::Float(v))
        }
        RcKind::Bool => match &value {
            RcValue::Bool(b) => Ok(RcValue::Bool(*b)),
            RcValue::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" | "t" | "y" => Ok(RcValue::Bool(true)),
                "false" | "no" | "off" | "0" | "f" | "n" => Ok(RcValue::Bool(false)),
                _ => Err(RcError::invalid(key, &value, "expected a boolean")),
            },
            _ => Err(RcError::invalid(key, &value, "expected a boolean")),
        },
        RcKind::LineStyle => {
            let style = value
                .as_str()
                .and_then(|s| LINE_STYLES.iter().find(|(name, _)| *name == s.trim()))
                .map(|(_, canonical)| *canonical)
                .ok_or_else(|| RcError::invalid(key, &value, "unknown line style"))?;
            Ok(RcValue::Str(style.to_string()))
        }
    }
}

fn validate_color(key: &str, value: RcValue) -> Result<ColorValue, RcError> {
    let color = match &value {
        RcValue::Color(c) => c.clone(),
        RcValue::Str(s) => ColorValue::from(with_hash_prefix(s.trim())),
        // A bare number in a style sheet is a grayscale level.
        RcValue::Float(level) => ColorValue::from(level.to_string()),
        RcValue::Colors(items) => match numeric_components(items).as_deref() {
            Some(&[r, g, b]) => ColorValue::Rgb([r, g, b]),
            Some(&[r, g, b, a]) => ColorValue::Rgba([r, g, b, a]),
            _ => return Err(RcError::invalid(key, &value, "expected a single color")),
        },
        _ => return Err(RcError::invalid(key, &value, "expected a single color")),
    };
    color
        .to_rgba()
        .map_err(|e| RcError::invalid(key, &value, e.to_string()))?;
    Ok(color)
}

/// Reads a list such as `[1.0, 0.5, 0]` from a style sheet as the
/// components of one color.
fn numeric_components(items: &[ColorValue]) -> Option<Vec<f64>> {
    items
        .iter()
        .map(|item| match item {
            ColorValue::Str(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .collect()
}

fn validate_color_list(key: &str, value: RcValue) -> Result<Vec<ColorValue>, RcError> {
    let list = match &value {
        RcValue::Colors(list) => list.clone(),
        RcValue::Color(c) => vec![c.clone()],
        RcValue::Str(s) => parse_color_list(s)
            .into_iter()
            .map(|item| ColorValue::from(with_hash_prefix(&item)))
            .collect(),
        _ => return Err(RcError::invalid(key, &value, "expected a list of colors")),
    };

    if list.is_empty() {
        return Err(RcError::invalid(key, &value, "color list must not be empty"));
    }

    list.into_iter()
        .map(|c| {
            let c = match c {
                ColorValue::Str(s) => ColorValue::from(with_hash_prefix(s.trim())),
                other => other,
            };
            if c.cycle_index().is_some() {
                return Err(RcError::invalid(
                    key,
                    &value,
                    "cycle references are not allowed inside the color cycle",
                ));
            }
            c.to_rgba()
                .map_err(|e| RcError::invalid(key, &value, e.to_string()))?;
            Ok(c)
        })
        .collect()
}

/// Style sheets write hex colors without `#`, since `#` starts a comment.
fn with_hash_prefix(s: &str) -> String {
    let is_bare_hex = matches!(s.len(), 6 | 8)
        && s.chars().all(|c| c.is_ascii_hexdigit())
        && ColorValue::from(s).cycle_index().is_none();
    if is_bare_hex {
        format!("#{}", s)
    } else {
        s.to_string()
    }
}

/// Splits `cycler('color', ['a', 'b'])` or a plain `a, b` list into items.
fn parse_color_list(s: &str) -> Vec<String> {
    let s = s.trim();
    let list = parse_cycler(s).unwrap_or(s);
    list.split(',')
        .map(|item| unquote(item.trim()).to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn parse_cycler(s: &str) -> Option<&str> {
    let inner = s.strip_prefix("cycler(")?.strip_suffix(')')?;
    let (prop, rest) = inner.split_once(',')?;
    if unquote(prop.trim()) != "color" {
        return None;
    }
    rest.trim().strip_prefix('[')?.strip_suffix(']')
}

fn unquote(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}
