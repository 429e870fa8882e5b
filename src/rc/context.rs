//! Explicit configuration context and scoped overrides.

use std::ops::{Deref, DerefMut};
use std::path::Path;

use log::debug;

use super::params::RcParams;
use super::value::RcValue;
use crate::color::{ColorError, ColorSpec, ColorValue, Rgba, DEFAULT_CYCLE};
use crate::style::{StyleError, StyleLibrary, StyleSheet, STYLE_EXTENSIONS};

/// The configuration state of a plotting session.
///
/// Holds the parameters produced by the defaults and any activated styles,
/// plus a stack of scoped override layers. Lookups consult the layers from
/// the innermost outwards before falling back to the style parameters.
///
/// # Example
///
/// ```rust
/// use plotrc::{RcContext, RcHost, RcParams, ColorResolver, to_rgba};
///
/// let mut ctx = RcContext::new();
/// ctx.use_style(&["dark_background"])?;
///
/// let overrides = RcParams::new().with("lines.color", "red")?;
/// {
///     let scoped = ctx.rc_scope(overrides);
///     let colors = ColorResolver::new(&scoped).resolve(None)?;
///     assert_eq!(colors, vec![to_rgba("red")?]);
/// }
///
/// // The override is gone once the scope ends.
/// let colors = ColorResolver::new(&ctx).resolve(None)?;
/// assert_eq!(colors, vec![to_rgba("white")?]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RcContext {
    params: RcParams,
    styles: Vec<String>,
    layers: Vec<RcParams>,
    library: StyleLibrary,
}

/// Saved state restored when an [`RcScope`] ends.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    params: RcParams,
    styles: Vec<String>,
    depth: usize,
}

impl RcContext {
    /// Creates a context with default parameters and the built-in styles.
    pub fn new() -> Self {
        Self::with_library(StyleLibrary::builtin())
    }

    /// Creates a context with default parameters and a custom style library.
    pub fn with_library(library: StyleLibrary) -> Self {
        Self {
            params: RcParams::defaults(),
            styles: Vec::new(),
            layers: Vec::new(),
            library,
        }
    }

    pub fn library(&self) -> &StyleLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut StyleLibrary {
        &mut self.library
    }

    /// The parameters set by the defaults and the active styles, without
    /// scoped overrides.
    pub fn params(&self) -> &RcParams {
        &self.params
    }

    /// Names of the styles applied since the last reset, in order.
    pub fn active_styles(&self) -> &[String] {
        &self.styles
    }

    /// Number of scoped override layers currently active.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Looks up the effective value of a parameter.
    pub fn get(&self, key: &str) -> Option<&RcValue> {
        self.scoped(key).or_else(|| self.style_value(key))
    }

    /// Looks up a parameter in the scoped override layers only.
    pub fn scoped(&self, key: &str) -> Option<&RcValue> {
        self.layers.iter().rev().find_map(|layer| layer.get(key))
    }

    /// Looks up a parameter in the style parameters only.
    pub fn style_value(&self, key: &str) -> Option<&RcValue> {
        self.params.get(key)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(RcValue::as_float)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(RcValue::as_bool)
    }

    /// Returns all effective parameters with overrides applied.
    pub fn effective(&self) -> RcParams {
        let mut merged = self.params.clone();
        for layer in &self.layers {
            merged.update(layer);
        }
        merged
    }

    /// Sets a parameter in the innermost scope, or in the style parameters
    /// when no scope is active. Values set inside a scope are discarded when
    /// the scope ends.
    pub fn set<V: Into<RcValue>>(&mut self, key: &str, value: V) -> Result<(), super::RcError> {
        match self.layers.last_mut() {
            Some(layer) => layer.set(key, value),
            None => self.params.set(key, value),
        }
    }

    /// Restores the default parameters and forgets the active styles.
    pub fn reset(&mut self) {
        self.params = RcParams::defaults();
        self.styles.clear();
    }

    /// Applies styles in order on top of the current parameters.
    ///
    /// Each name is looked up in the style library; a name that looks like a
    /// path to a style sheet file is loaded from disk. `"default"` resets to
    /// the default parameters first. All names are resolved before any is
    /// applied, so an unknown name leaves the context untouched.
    pub fn use_style<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), StyleError> {
        let sheets = names
            .iter()
            .map(|name| self.find_style(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        for sheet in sheets {
            if sheet.name() == "default" {
                self.reset();
            }
            self.params.update(sheet.params());
            self.styles.push(sheet.name().to_string());
            debug!(
                "activated style '{}' ({} parameters)",
                sheet.name(),
                sheet.params().len()
            );
        }
        Ok(())
    }

    fn find_style(&self, name: &str) -> Result<StyleSheet, StyleError> {
        if let Some(sheet) = self.library.get(name) {
            return Ok(sheet.clone());
        }
        let path = Path::new(name);
        let looks_like_file = STYLE_EXTENSIONS.iter().any(|ext| name.ends_with(ext));
        if looks_like_file && path.is_file() {
            return StyleSheet::from_file(path);
        }
        Err(StyleError::NotFound {
            name: name.to_string(),
            available: self.library.names().map(String::from).collect(),
        })
    }

    /// The effective color cycle, normalized.
    pub fn prop_cycle(&self) -> Result<Vec<Rgba>, ColorError> {
        match self.get("axes.prop_cycle") {
            Some(value) => value.to_rgba_array(&DEFAULT_CYCLE),
            None => Ok(DEFAULT_CYCLE.clone()),
        }
    }

    /// Normalizes a color, resolving `CN` against the effective cycle.
    pub fn to_rgba(&self, value: &ColorValue) -> Result<Rgba, ColorError> {
        value.to_rgba_with_cycle(&self.prop_cycle()?)
    }

    /// Normalizes a color specification against the effective cycle.
    pub fn to_rgba_array(&self, spec: &ColorSpec) -> Result<Vec<Rgba>, ColorError> {
        spec.to_rgba_array_with_cycle(&self.prop_cycle()?)
    }

    /// Normalizes a color parameter, or returns `fallback` when unset.
    pub fn color_or(&self, key: &str, fallback: Rgba) -> Result<Rgba, ColorError> {
        match self.get(key) {
            Some(value) => {
                let cycle = self.prop_cycle()?;
                let colors = value.to_rgba_array(&cycle)?;
                Ok(colors.first().copied().unwrap_or(fallback))
            }
            None => Ok(fallback),
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            params: self.params.clone(),
            styles: self.styles.clone(),
            depth: self.layers.len(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.params = snapshot.params;
        self.styles = snapshot.styles;
        self.layers.truncate(snapshot.depth);
    }

    pub(crate) fn push_layer(&mut self, overrides: RcParams) {
        self.layers.push(overrides);
    }
}

impl Default for RcContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that owns an [`RcContext`] and can scope overrides over it.
///
/// Scoping is offered on the owner rather than on the context alone so
/// that the whole API of the owner stays usable inside the scope.
pub trait RcHost {
    fn rc(&self) -> &RcContext;

    fn rc_mut(&mut self) -> &mut RcContext;

    /// Pushes `overrides` until the returned guard is dropped.
    ///
    /// Dropping the guard restores the parameters, active styles and layer
    /// depth to what they were on entry, whether the scope ends normally,
    /// through an early return, or by unwinding.
    fn rc_scope(&mut self, overrides: RcParams) -> RcScope<'_, Self>
    where
        Self: Sized,
    {
        RcScope::enter(self, overrides)
    }

    /// Runs `f` with `overrides` in effect.
    fn with_rc<R, F>(&mut self, overrides: RcParams, f: F) -> R
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> R,
    {
        let mut scope = self.rc_scope(overrides);
        f(&mut *scope)
    }
}

impl RcHost for RcContext {
    fn rc(&self) -> &RcContext {
        self
    }

    fn rc_mut(&mut self) -> &mut RcContext {
        self
    }
}

/// Guard for a scoped override. Dereferences to the host.
#[must_use = "the override ends as soon as the scope guard is dropped"]
pub struct RcScope<'a, H: RcHost> {
    host: &'a mut H,
    saved: Option<Snapshot>,
}

impl<'a, H: RcHost> RcScope<'a, H> {
    fn enter(host: &'a mut H, overrides: RcParams) -> Self {
        let saved = host.rc().snapshot();
        debug!(
            "entering rc scope at depth {} ({} overrides)",
            saved.depth + 1,
            overrides.len()
        );
        host.rc_mut().push_layer(overrides);
        Self {
            host,
            saved: Some(saved),
        }
    }
}

impl<H: RcHost> Deref for RcScope<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: RcHost> DerefMut for RcScope<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: RcHost> Drop for RcScope<'_, H> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            debug!("leaving rc scope, restoring depth {}", saved.depth);
            self.host.rc_mut().restore(saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::to_rgba;

    fn white_lines() -> RcParams {
        RcParams::new().with("lines.color", "white").unwrap()
    }

    #[test]
    fn test_get_prefers_scoped_layer() {
        let mut ctx = RcContext::new();
        let scope = ctx.rc_scope(white_lines());
        assert_eq!(
            scope.get("lines.color"),
            Some(&RcValue::Color(ColorValue::from("white")))
        );
        assert_eq!(
            scope.style_value("lines.color"),
            Some(&RcValue::Color(ColorValue::from("C0")))
        );
    }

    #[test]
    fn test_scope_restores_on_drop() {
        let mut ctx = RcContext::new();
        {
            let mut scope = ctx.rc_scope(white_lines());
            assert_eq!(scope.depth(), 1);
            scope.set("lines.linewidth", 4.0).unwrap();
            assert_eq!(scope.float("lines.linewidth"), Some(4.0));
        }
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.scoped("lines.color").is_none());
        assert_eq!(ctx.float("lines.linewidth"), Some(1.5));
    }

    #[test]
    fn test_nested_scopes() {
        let mut ctx = RcContext::new();
        let mut outer = ctx.rc_scope(white_lines());
        {
            let inner = outer.rc_scope(RcParams::new().with("lines.color", "red").unwrap());
            assert_eq!(inner.depth(), 2);
            assert_eq!(
                inner.get("lines.color").and_then(RcValue::as_color),
                Some(&ColorValue::from("red"))
            );
        }
        assert_eq!(outer.depth(), 1);
        assert_eq!(
            outer.get("lines.color").and_then(RcValue::as_color),
            Some(&ColorValue::from("white"))
        );
    }

    #[test]
    fn test_scope_restores_style_changes() {
        let mut ctx = RcContext::new();
        {
            let mut scope = ctx.rc_scope(RcParams::new());
            scope.use_style(&["dark_background"]).unwrap();
            assert_eq!(scope.active_styles(), ["dark_background".to_string()]);
        }
        assert!(ctx.active_styles().is_empty());
        assert_eq!(ctx.params(), &RcParams::defaults());
    }

    #[test]
    fn test_scope_restores_on_early_return() {
        fn fails(ctx: &mut RcContext) -> Result<(), crate::RcError> {
            let mut scope = ctx.rc_scope(white_lines());
            scope.set("lines.colour", "red")?;
            Ok(())
        }

        let mut ctx = RcContext::new();
        assert!(fails(&mut ctx).is_err());
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.scoped("lines.color").is_none());
    }

    #[test]
    fn test_scope_restores_on_panic() {
        let mut ctx = RcContext::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = ctx.rc_scope(white_lines());
            panic!("drawing failed");
        }));
        assert!(result.is_err());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_with_rc_closure() {
        let mut ctx = RcContext::new();
        let depth = ctx.with_rc(white_lines(), |ctx| ctx.depth());
        assert_eq!(depth, 1);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_use_style_unknown_leaves_context_untouched() {
        let mut ctx = RcContext::new();
        let err = ctx
            .use_style(&["dark_background", "no_such_style"])
            .unwrap_err();
        assert!(matches!(err, StyleError::NotFound { ref name, .. } if name == "no_such_style"));
        assert!(ctx.active_styles().is_empty());
        assert_eq!(ctx.params(), &RcParams::defaults());
    }

    #[test]
    fn test_use_style_default_resets() {
        let mut ctx = RcContext::new();
        ctx.use_style(&["dark_background"]).unwrap();
        ctx.use_style(&["default"]).unwrap();
        assert_eq!(ctx.active_styles(), ["default".to_string()]);
        assert_eq!(ctx.params(), &RcParams::defaults());
    }

    #[test]
    fn test_prop_cycle_follows_style() {
        let mut ctx = RcContext::new();
        assert_eq!(ctx.prop_cycle().unwrap()[0], to_rgba("tab:blue").unwrap());
        ctx.use_style(&["dark_background"]).unwrap();
        assert_eq!(ctx.prop_cycle().unwrap()[0], to_rgba("#8dd3c7").unwrap());
        assert_eq!(
            ctx.to_rgba(&ColorValue::from("C0")).unwrap(),
            to_rgba("#8dd3c7").unwrap()
        );
    }

    #[test]
    fn test_effective_merges_layers() {
        let mut ctx = RcContext::new();
        let scope = ctx.rc_scope(white_lines());
        let effective = scope.effective();
        assert_eq!(effective.color("lines.color"), Some(&ColorValue::from("white")));
        assert_eq!(effective.len(), RcParams::defaults().len());
    }

    #[test]
    fn test_color_or() {
        let ctx = RcContext::new();
        assert_eq!(
            ctx.color_or("figure.facecolor", Rgba::BLACK).unwrap(),
            Rgba::WHITE
        );
    }
}
