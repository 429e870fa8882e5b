//! Color resolution for drawn line collections.
//!
//! The colors of a collection come from the first of these that is set:
//!
//! 1. the color passed explicitly by the caller,
//! 2. a scoped override of the color parameter,
//! 3. the value of the parameter under the active style (which, with no
//!    style active, is the default configuration).
//!
//! Resolution only reads the context; it never mutates it.

use log::trace;

use crate::color::{ColorError, ColorSpec, Rgba};
use crate::rc::RcContext;

/// The parameter consulted for line collections.
pub const LINE_COLOR_KEY: &str = "lines.color";

/// Which layer supplied a resolved color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    Explicit,
    ScopedOverride,
    Style,
}

impl ColorSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorSource::Explicit => "explicit",
            ColorSource::ScopedOverride => "scoped override",
            ColorSource::Style => "style",
        }
    }
}

impl std::fmt::Display for ColorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the effective colors of a drawn collection.
///
/// # Example
///
/// ```rust
/// use plotrc::{ColorResolver, ColorSpec, RcContext, to_rgba_array};
///
/// let ctx = RcContext::new();
/// let resolver = ColorResolver::new(&ctx);
///
/// let explicit = ColorSpec::from(["red", "green"]);
/// assert_eq!(resolver.resolve(Some(&explicit))?, to_rgba_array(["red", "green"])?);
///
/// // Nothing explicit: the default `lines.color` is the first cycle color.
/// assert_eq!(resolver.resolve(None)?, to_rgba_array("tab:blue")?);
/// # Ok::<(), plotrc::ColorError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'a> {
    ctx: &'a RcContext,
    key: &'a str,
}

impl<'a> ColorResolver<'a> {
    /// Creates a resolver for line collections (`lines.color`).
    pub fn new(ctx: &'a RcContext) -> Self {
        Self::for_key(ctx, LINE_COLOR_KEY)
    }

    /// Creates a resolver that falls back to another color parameter.
    pub fn for_key(ctx: &'a RcContext, key: &'a str) -> Self {
        Self { ctx, key }
    }

    pub fn key(&self) -> &str {
        self.key
    }

    /// Returns the layer that would supply the colors.
    pub fn source(&self, explicit: Option<&ColorSpec>) -> Option<ColorSource> {
        if explicit.is_some() {
            Some(ColorSource::Explicit)
        } else if self.ctx.scoped(self.key).is_some() {
            Some(ColorSource::ScopedOverride)
        } else if self.ctx.style_value(self.key).is_some() {
            Some(ColorSource::Style)
        } else {
            None
        }
    }

    /// Resolves and normalizes the colors, preserving the order of an
    /// explicit sequence.
    pub fn resolve(&self, explicit: Option<&ColorSpec>) -> Result<Vec<Rgba>, ColorError> {
        let cycle = self.ctx.prop_cycle()?;

        if let Some(spec) = explicit {
            trace!("{}: using explicit color {:?}", self.key, spec);
            return spec.to_rgba_array_with_cycle(&cycle);
        }

        if let Some(value) = self.ctx.scoped(self.key) {
            trace!("{}: using scoped override {}", self.key, value);
            return value.to_rgba_array(&cycle);
        }

        match self.ctx.style_value(self.key) {
            Some(value) => {
                trace!("{}: using style value {}", self.key, value);
                value.to_rgba_array(&cycle)
            }
            None => Err(ColorError::InvalidColor {
                repr: self.key.to_string(),
                reason: "parameter has no configured color".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::to_rgba;
    use crate::rc::{RcHost, RcParams};

    fn override_white() -> RcParams {
        RcParams::new().with("lines.color", "white").unwrap()
    }

    #[test]
    fn test_explicit_wins() {
        let mut ctx = RcContext::new();
        ctx.use_style(&["dark_background"]).unwrap();
        let scope = ctx.rc_scope(override_white());
        let resolver = ColorResolver::new(&scope);
        let red = ColorSpec::from("red");
        assert_eq!(resolver.resolve(Some(&red)).unwrap(), vec![to_rgba("red").unwrap()]);
        assert_eq!(resolver.source(Some(&red)), Some(ColorSource::Explicit));
    }

    #[test]
    fn test_scoped_override_beats_style() {
        let mut ctx = RcContext::new();
        ctx.use_style(&["grayscale"]).unwrap();
        let scope = ctx.rc_scope(override_white());
        let resolver = ColorResolver::new(&scope);
        assert_eq!(resolver.resolve(None).unwrap(), vec![Rgba::WHITE]);
        assert_eq!(resolver.source(None), Some(ColorSource::ScopedOverride));
    }

    #[test]
    fn test_style_default() {
        let mut ctx = RcContext::new();
        ctx.use_style(&["grayscale"]).unwrap();
        let resolver = ColorResolver::new(&ctx);
        assert_eq!(resolver.resolve(None).unwrap(), vec![Rgba::BLACK]);
        assert_eq!(resolver.source(None), Some(ColorSource::Style));
    }

    #[test]
    fn test_global_default_follows_cycle() {
        let ctx = RcContext::new();
        let resolved = ColorResolver::new(&ctx).resolve(None).unwrap();
        assert_eq!(resolved, vec![to_rgba("tab:blue").unwrap()]);
    }

    #[test]
    fn test_cycle_reference_in_override_uses_active_cycle() {
        let mut ctx = RcContext::new();
        ctx.use_style(&["dark_background"]).unwrap();
        let scope = ctx.rc_scope(RcParams::new().with("lines.color", "C1").unwrap());
        let resolved = ColorResolver::new(&scope).resolve(None).unwrap();
        assert_eq!(resolved, vec![to_rgba("#feffb3").unwrap()]);
    }

    #[test]
    fn test_for_key() {
        let mut ctx = RcContext::new();
        ctx.use_style(&["dark_background"]).unwrap();
        let resolver = ColorResolver::for_key(&ctx, "axes.facecolor");
        assert_eq!(resolver.key(), "axes.facecolor");
        assert_eq!(resolver.resolve(None).unwrap(), vec![Rgba::BLACK]);
    }

    #[test]
    fn test_non_color_key_fails() {
        let ctx = RcContext::new();
        let resolver = ColorResolver::for_key(&ctx, "lines.linewidth");
        assert!(resolver.resolve(None).is_err());
    }

    #[test]
    fn test_invalid_explicit_color() {
        let ctx = RcContext::new();
        let bad = ColorSpec::from(["red", "blurple"]);
        let err = ColorResolver::new(&ctx).resolve(Some(&bad)).unwrap_err();
        assert!(matches!(err, ColorError::InvalidColor { ref repr, .. } if repr == "blurple"));
    }

    #[test]
    fn test_resolve_does_not_mutate() {
        let mut ctx = RcContext::new();
        ctx.use_style(&["dark_background"]).unwrap();
        let before = ctx.effective();
        let _ = ColorResolver::new(&ctx).resolve(None).unwrap();
        assert_eq!(ctx.effective(), before);
    }
}
