//! Style sheets: named partial parameter sets.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;

use super::error::StyleError;
use crate::color::ColorValue;
use crate::rc::{RcParams, RcValue};

/// A named set of rc parameters applied together.
///
/// Style sheets are flat `key: value` documents. Values are validated the
/// same way as any other rc assignment, so a sheet never holds an unknown
/// key or an unparseable color.
///
/// Hex colors must be quoted or written with a leading `#` inside quotes,
/// because an unquoted `#` starts a comment and an unquoted `555555` is a
/// number.
///
/// # Example
///
/// ```rust
/// use plotrc::StyleSheet;
///
/// let sheet = StyleSheet::from_yaml("mine", r#"
/// lines.color: "ff8800"
/// lines.linewidth: 2
/// axes.prop_cycle: ["red", "green", "blue"]
/// "#).unwrap();
/// assert_eq!(sheet.params().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    name: String,
    params: RcParams,
}

impl StyleSheet {
    pub fn new(name: impl Into<String>, params: RcParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &RcParams {
        &self.params
    }

    /// Parses a style sheet from YAML source.
    pub fn from_yaml(name: &str, source: &str) -> Result<Self, StyleError> {
        let mut params = RcParams::new();
        if is_blank(source) {
            return Ok(Self::new(name, params));
        }

        let entries: BTreeMap<String, Value> =
            serde_yaml::from_str(source).map_err(|e| StyleError::parse(name, e.to_string()))?;

        for (key, raw) in &entries {
            let value = yaml_to_rc(raw)
                .map_err(|reason| StyleError::parse(name, format!("'{}': {}", key, reason)))?;
            params
                .set(key, value)
                .map_err(|source| StyleError::Rc {
                    name: name.to_string(),
                    source,
                })?;
        }

        Ok(Self::new(name, params))
    }

    /// Reads a style sheet file. The style is named after the file stem.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| StyleError::io(path, e))?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        Self::from_yaml(name, &source)
    }
}

fn is_blank(source: &str) -> bool {
    source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn yaml_to_rc(value: &Value) -> Result<RcValue, String> {
    match value {
        Value::Bool(b) => Ok(RcValue::Bool(*b)),
        Value::Number(n) => n
            .as_f64()
            .map(RcValue::Float)
            .ok_or_else(|| format!("number {} is out of range", n)),
        Value::String(s) => Ok(RcValue::Str(s.clone())),
        Value::Sequence(items) => items
            .iter()
            .map(yaml_to_color)
            .collect::<Result<Vec<_>, _>>()
            .map(RcValue::Colors),
        Value::Null => Err("missing value".to_string()),
        Value::Mapping(_) | Value::Tagged(_) => Err("nested values are not supported".to_string()),
    }
}

fn yaml_to_color(value: &Value) -> Result<ColorValue, String> {
    match value {
        Value::String(s) => Ok(ColorValue::from(s.as_str())),
        Value::Number(n) => Ok(ColorValue::from(n.to_string())),
        Value::Sequence(components) => {
            let components = components
                .iter()
                .map(|c| c.as_f64().ok_or_else(|| "color components must be numbers".to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            match components[..] {
                [r, g, b] => Ok(ColorValue::Rgb([r, g, b])),
                [r, g, b, a] => Ok(ColorValue::Rgba([r, g, b, a])),
                _ => Err("color tuples have 3 or 4 components".to_string()),
            }
        }
        _ => Err("expected a color".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::to_rgba;

    #[test]
    fn test_from_yaml_basic() {
        let sheet = StyleSheet::from_yaml(
            "test",
            r#"
# comment
lines.color: red
lines.linewidth: 3
axes.grid: true
"#,
        )
        .unwrap();
        assert_eq!(sheet.name(), "test");
        assert_eq!(
            sheet.params().color("lines.color"),
            Some(&ColorValue::from("red"))
        );
        assert_eq!(sheet.params().float("lines.linewidth"), Some(3.0));
        assert_eq!(sheet.params().bool("axes.grid"), Some(true));
    }

    #[test]
    fn test_from_yaml_blank() {
        let sheet = StyleSheet::from_yaml("empty", "\n# only comments\n").unwrap();
        assert!(sheet.params().is_empty());
    }

    #[test]
    fn test_from_yaml_tuple_cycle() {
        let sheet = StyleSheet::from_yaml(
            "tuples",
            "axes.prop_cycle: [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.5], \"0.5\"]",
        )
        .unwrap();
        let cycle = sheet.params().colors("axes.prop_cycle").unwrap();
        assert_eq!(cycle.len(), 3);
        assert_eq!(cycle[0].to_rgba().unwrap(), to_rgba("red").unwrap());
    }

    #[test]
    fn test_from_yaml_unknown_key() {
        let err = StyleSheet::from_yaml("bad", "lines.colour: red").unwrap_err();
        assert!(matches!(err, StyleError::Rc { ref name, .. } if name == "bad"));
    }

    #[test]
    fn test_from_yaml_invalid_color() {
        let err = StyleSheet::from_yaml("bad", "lines.color: blurple").unwrap_err();
        assert!(matches!(err, StyleError::Rc { .. }));
    }

    #[test]
    fn test_from_yaml_not_a_mapping() {
        let err = StyleSheet::from_yaml("bad", "- just\n- a list\n").unwrap_err();
        assert!(matches!(err, StyleError::Parse { .. }));
    }

    #[test]
    fn test_from_yaml_null_value() {
        let err = StyleSheet::from_yaml("bad", "lines.color:\n").unwrap_err();
        assert!(err.to_string().contains("missing value"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.mplstyle");
        std::fs::write(&path, "lines.color: \"333333\"\n").unwrap();

        let sheet = StyleSheet::from_file(&path).unwrap();
        assert_eq!(sheet.name(), "paper");
        assert_eq!(
            sheet.params().color("lines.color"),
            Some(&ColorValue::from("#333333"))
        );
    }

    #[test]
    fn test_numeric_tuple_for_single_color() {
        let sheet = StyleSheet::from_yaml(
            "tuples",
            "lines.color: [1.0, 0.0, 0.0]\naxes.facecolor: [0, 0, 1, 0.5]\n",
        )
        .unwrap();
        assert_eq!(
            sheet.params().color("lines.color"),
            Some(&ColorValue::Rgb([1.0, 0.0, 0.0]))
        );
        assert_eq!(
            sheet.params().color("axes.facecolor").unwrap().to_rgba().unwrap(),
            to_rgba("blue").unwrap().with_alpha(0.5)
        );
    }

    #[test]
    fn test_from_file_missing() {
        let err = StyleSheet::from_file("/definitely/not/here.mplstyle").unwrap_err();
        assert!(matches!(err, StyleError::Io { .. }));
    }
}
