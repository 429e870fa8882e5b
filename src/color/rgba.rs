//! Canonical RGBA color.

use serde::{Deserialize, Serialize};

use super::error::ColorError;

/// A normalized color with four floating point components in `[0, 1]`.
///
/// Two colors are equal only when every component matches exactly; no
/// tolerance is applied. Since every accepted representation is converted
/// through the same arithmetic, `"red"`, `"#ff0000"` and `(1.0, 0.0, 0.0)`
/// all normalize to bit-identical values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from raw components. No range check is performed.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            1.0,
        )
    }

    /// Creates a color from 8-bit channels including alpha.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )
    }

    /// Creates a color from float components, rejecting values that are not
    /// finite or fall outside `[0, 1]`.
    pub fn try_from_components(components: &[f64]) -> Result<Self, ColorError> {
        let repr = || format!("{:?}", components);
        let (r, g, b, a) = match *components {
            [r, g, b] => (r, g, b, 1.0),
            [r, g, b, a] => (r, g, b, a),
            _ => {
                return Err(ColorError::invalid(
                    repr(),
                    "expected 3 (RGB) or 4 (RGBA) components",
                ))
            }
        };
        if [r, g, b, a]
            .iter()
            .any(|c| !c.is_finite() || !(0.0..=1.0).contains(c))
        {
            return Err(ColorError::invalid(
                repr(),
                "components must be finite and within 0..=1",
            ));
        }
        Ok(Self::new(r, g, b, a))
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::invalid(s, "hex colors must start with '#'"))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::invalid(s, "non-hexadecimal digit"));
        }

        // Short forms double each digit: "#f80" == "#ff8800".
        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => {
                return Err(ColorError::invalid(
                    s,
                    "hex colors have 3, 4, 6 or 8 digits",
                ))
            }
        };

        let channel = |i: usize| -> Result<u8, ColorError> {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|e| ColorError::invalid(s, e.to_string()))
        };
        let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
        let a = if expanded.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_rgba8(r, g, b, a))
    }

    /// Returns the color with its alpha replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Whether the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }

    /// Returns the components as an array in `r, g, b, a` order.
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Rounds the color channels to 8 bits.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Formats as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    /// Maps the color to the nearest ANSI 256-color palette index.
    ///
    /// Grays use the 24-step grayscale ramp; everything else the 6x6x6 cube.
    pub fn to_ansi256(self) -> u8 {
        let (r, g, b) = self.to_rgb8();
        if r == g && g == b {
            if r < 8 {
                16
            } else if r > 248 {
                231
            } else {
                232 + ((r as u16 - 8) * 24 / 247) as u8
            }
        } else {
            let red = (r as u16 * 5 / 255) as u8;
            let green = (g as u16 * 5 / 255) as u8;
            let blue = (b as u16 * 5 / 255) as u8;
            16 + 36 * red + 6 * green + blue
        }
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Compares two normalized color arrays component by component.
///
/// Arrays of different lengths are never the same.
pub fn same_color(a: &[Rgba], b: &[Rgba]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_long_and_short_agree() {
        assert_eq!(
            Rgba::from_hex("#f80").unwrap(),
            Rgba::from_hex("#ff8800").unwrap()
        );
        assert_eq!(
            Rgba::from_hex("#f808").unwrap(),
            Rgba::from_hex("#ff880088").unwrap()
        );
    }

    #[test]
    fn test_from_hex_alpha() {
        let c = Rgba::from_hex("#00000000").unwrap();
        assert!(c.is_transparent());
        assert_eq!(Rgba::from_hex("#ffffff").unwrap(), Rgba::WHITE);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Rgba::from_hex("ffffff").is_err());
        assert!(Rgba::from_hex("#ff").is_err());
        assert!(Rgba::from_hex("#gggggg").is_err());
        assert!(Rgba::from_hex("#fffffff").is_err());
    }

    #[test]
    fn test_try_from_components() {
        assert_eq!(
            Rgba::try_from_components(&[1.0, 0.0, 0.0]).unwrap(),
            Rgba::new(1.0, 0.0, 0.0, 1.0)
        );
        assert!(Rgba::try_from_components(&[1.5, 0.0, 0.0]).is_err());
        assert!(Rgba::try_from_components(&[f64::NAN, 0.0, 0.0]).is_err());
        assert!(Rgba::try_from_components(&[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgba::WHITE.to_hex(), "#ffffff");
        assert_eq!(Rgba::TRANSPARENT.to_hex(), "#00000000");
    }

    #[test]
    fn test_to_ansi256_grayscale() {
        assert_eq!(Rgba::BLACK.to_ansi256(), 16);
        assert_eq!(Rgba::WHITE.to_ansi256(), 231);
        let mid = Rgba::from_rgb8(128, 128, 128).to_ansi256();
        assert!((232..=255).contains(&mid));
    }

    #[test]
    fn test_to_ansi256_color_cube() {
        assert_eq!(Rgba::from_rgb8(255, 0, 0).to_ansi256(), 196);
        assert_eq!(Rgba::from_rgb8(0, 255, 0).to_ansi256(), 46);
        assert_eq!(Rgba::from_rgb8(0, 0, 255).to_ansi256(), 21);
    }

    #[test]
    fn test_same_color_length_mismatch() {
        assert!(!same_color(&[Rgba::WHITE], &[Rgba::WHITE, Rgba::WHITE]));
        assert!(same_color(&[Rgba::WHITE], &[Rgba::WHITE]));
        assert!(same_color(&[], &[]));
    }
}
