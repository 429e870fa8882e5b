//! The plotting session: figures, axes and the configuration they draw with.

use log::debug;

use super::artist::{broadcast3, LineCollection, PolyCollection, Segment, Values};
use super::axes::Axes;
use super::error::PlotError;
use super::subplot::{SubplotArgs, SubplotPosition};
use crate::color::{ColorError, ColorSpec, Rgba};
use crate::rc::{RcContext, RcHost, RcValue};
use crate::resolve::ColorResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FigureId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId {
    figure: FigureId,
    index: usize,
}

impl AxesId {
    pub fn figure(&self) -> FigureId {
        self.figure
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId {
    axes: AxesId,
    index: usize,
}

impl LineId {
    pub fn axes(&self) -> AxesId {
        self.axes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolyId {
    axes: AxesId,
    index: usize,
}

impl PolyId {
    pub fn axes(&self) -> AxesId {
        self.axes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    facecolor: Rgba,
    edgecolor: Rgba,
    dpi: f64,
    axes: Vec<Axes>,
    current_axes: Option<usize>,
}

impl Figure {
    pub fn facecolor(&self) -> Rgba {
        self.facecolor
    }

    pub fn edgecolor(&self) -> Rgba {
        self.edgecolor
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }
}

/// A plotting session.
///
/// Owns the configuration context and the figures created under it. Scoped
/// overrides are available through [`RcHost`], and the scope guard gives
/// access to every drawing call:
///
/// ```rust
/// use plotrc::{PlotState, RcHost, RcParams, Rgba};
///
/// let mut plt = PlotState::new();
/// plt.use_style(&["dark_background"])?;
///
/// let line = {
///     let mut scoped = plt.rc_scope(RcParams::new().with("lines.color", "white")?);
///     scoped.hlines(0.5, 0.0, 1.0, None)?
/// };
/// assert_eq!(plt.line_collection(line).unwrap().colors(), &[Rgba::WHITE]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlotState {
    rc: RcContext,
    figures: Vec<Figure>,
    current: Option<usize>,
}

impl PlotState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session over an existing configuration.
    pub fn with_context(rc: RcContext) -> Self {
        Self {
            rc,
            figures: Vec::new(),
            current: None,
        }
    }

    /// Activates styles on the session's context.
    pub fn use_style<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), PlotError> {
        self.rc.use_style(names)?;
        Ok(())
    }

    /// Creates a new figure and makes it current.
    pub fn figure(&mut self) -> Result<FigureId, PlotError> {
        let figure = Figure {
            facecolor: self.rc.color_or("figure.facecolor", Rgba::WHITE)?,
            edgecolor: self.rc.color_or("figure.edgecolor", Rgba::WHITE)?,
            dpi: self.rc.float("figure.dpi").unwrap_or(100.0),
            axes: Vec::new(),
            current_axes: None,
        };
        self.figures.push(figure);
        let index = self.figures.len() - 1;
        self.current = Some(index);
        debug!("created figure {}", index);
        Ok(FigureId(index))
    }

    /// Returns the current figure, creating one if there is none.
    pub fn gcf(&mut self) -> Result<FigureId, PlotError> {
        match self.current {
            Some(index) => Ok(FigureId(index)),
            None => self.figure(),
        }
    }

    /// Returns the current axes, creating a figure and a `111` subplot as
    /// needed.
    pub fn gca(&mut self) -> Result<AxesId, PlotError> {
        let figure = self.gcf()?;
        let current = self.figure_mut(figure)?.current_axes;
        match current {
            Some(index) => Ok(AxesId { figure, index }),
            None => self.subplot(SubplotArgs::new()),
        }
    }

    /// Creates a new figure holding an `nrows` x `ncols` grid of axes.
    ///
    /// The axes are returned row by row; the first becomes current.
    pub fn subplots(&mut self, nrows: usize, ncols: usize) -> Result<Vec<AxesId>, PlotError> {
        SubplotPosition::new(nrows, ncols, 1)?;
        let cells = SubplotPosition::cell_count(nrows, ncols)?;
        let figure = self.figure()?;
        let facecolor = self.rc.color_or("axes.facecolor", Rgba::WHITE)?;
        let fig = self.figure_mut(figure)?;
        for index in 1..=cells {
            let position = SubplotPosition::new(nrows, ncols, index)?;
            fig.axes.push(Axes::new(position, facecolor));
        }
        fig.current_axes = Some(0);
        Ok((0..cells)
            .map(|index| AxesId { figure, index })
            .collect())
    }

    /// Adds a subplot to the current figure, or reuses the axes already at
    /// that position, and makes it current.
    ///
    /// ```rust
    /// use plotrc::{PlotError, PlotState, SubplotArgs};
    ///
    /// let mut plt = PlotState::new();
    /// let err = plt.subplot(SubplotArgs::new().nrows(1)).unwrap_err();
    /// assert!(matches!(err, PlotError::ArgumentConflict { .. }));
    /// ```
    pub fn subplot(&mut self, args: impl Into<SubplotArgs>) -> Result<AxesId, PlotError> {
        let position = args.into().validate()?;
        let figure = self.gcf()?;
        let facecolor = self.rc.color_or("axes.facecolor", Rgba::WHITE)?;
        let fig = self.figure_mut(figure)?;
        let index = match fig.axes.iter().position(|a| a.position() == position) {
            Some(index) => index,
            None => {
                fig.axes.push(Axes::new(position, facecolor));
                fig.axes.len() - 1
            }
        };
        fig.current_axes = Some(index);
        Ok(AxesId { figure, index })
    }

    /// Sets the frame of the current axes, or toggles it when `on` is
    /// `None`. Returns the new state.
    pub fn frame(&mut self, on: Option<bool>) -> Result<bool, PlotError> {
        let id = self.gca()?;
        let axes = self.axes_mut(id)?;
        let on = on.unwrap_or(!axes.frame_on());
        axes.set_frame_on(on);
        Ok(on)
    }

    /// Draws horizontal lines at `y` from `xmin` to `xmax` on the current
    /// axes.
    ///
    /// Without explicit `colors` the lines take `lines.color` as currently
    /// configured.
    pub fn hlines(
        &mut self,
        y: impl Into<Values>,
        xmin: impl Into<Values>,
        xmax: impl Into<Values>,
        colors: Option<ColorSpec>,
    ) -> Result<LineId, PlotError> {
        let rows = broadcast3("hlines", [&y.into(), &xmin.into(), &xmax.into()])?;
        let segments = rows
            .into_iter()
            .map(|[y, x0, x1]| [(x0, y), (x1, y)])
            .collect();
        self.add_lines(segments, colors.as_ref())
    }

    /// Draws vertical lines at `x` from `ymin` to `ymax` on the current
    /// axes.
    pub fn vlines(
        &mut self,
        x: impl Into<Values>,
        ymin: impl Into<Values>,
        ymax: impl Into<Values>,
        colors: Option<ColorSpec>,
    ) -> Result<LineId, PlotError> {
        let rows = broadcast3("vlines", [&x.into(), &ymin.into(), &ymax.into()])?;
        let segments = rows
            .into_iter()
            .map(|[x, y0, y1]| [(x, y0), (x, y1)])
            .collect();
        self.add_lines(segments, colors.as_ref())
    }

    /// Draws the series in `ys` stacked on top of each other, starting from
    /// a zero baseline.
    ///
    /// Explicit `colors` are used in order and repeat if there are more
    /// series than colors; otherwise each series takes the next color of the
    /// axes' cycle.
    pub fn stackplot(
        &mut self,
        x: &[f64],
        ys: &[Vec<f64>],
        colors: Option<ColorSpec>,
    ) -> Result<Vec<PolyId>, PlotError> {
        if let Some((i, y)) = ys.iter().enumerate().find(|(_, y)| y.len() != x.len()) {
            return Err(PlotError::shape(
                "stackplot",
                format!(
                    "series {} has {} values but x has {}",
                    i,
                    y.len(),
                    x.len()
                ),
            ));
        }
        let explicit = match colors {
            Some(spec) if spec.is_empty() => {
                return Err(PlotError::shape("stackplot", "colors must not be empty"))
            }
            Some(spec) => Some(self.rc.to_rgba_array(&spec)?),
            None => None,
        };
        let cycle = self.rc.prop_cycle()?;

        let axes_id = self.gca()?;
        let axes = self.axes_mut(axes_id)?;
        let mut lower = vec![0.0; x.len()];
        let mut ids = Vec::with_capacity(ys.len());
        for (i, y) in ys.iter().enumerate() {
            let upper: Vec<f64> = lower.iter().zip(y).map(|(base, v)| base + v).collect();
            let facecolor = match &explicit {
                Some(colors) => colors[i % colors.len()],
                None => axes
                    .next_cycle_color(&cycle)
                    .ok_or_else(|| ColorError::invalid("axes.prop_cycle", "empty color cycle"))?,
            };
            let index = axes.add_poly_collection(PolyCollection::between(x, &lower, &upper, facecolor));
            ids.push(PolyId {
                axes: axes_id,
                index,
            });
            lower = upper;
        }
        Ok(ids)
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn get_figure(&self, id: FigureId) -> Option<&Figure> {
        self.figures.get(id.0)
    }

    pub fn axes(&self, id: AxesId) -> Option<&Axes> {
        self.get_figure(id.figure)?.axes.get(id.index)
    }

    pub fn line_collection(&self, id: LineId) -> Option<&LineCollection> {
        self.axes(id.axes)?.lines().get(id.index)
    }

    pub fn poly_collection(&self, id: PolyId) -> Option<&PolyCollection> {
        self.axes(id.axes)?.polys().get(id.index)
    }

    fn add_lines(
        &mut self,
        segments: Vec<Segment>,
        colors: Option<&ColorSpec>,
    ) -> Result<LineId, PlotError> {
        let colors = ColorResolver::new(&self.rc).resolve(colors)?;
        let linewidth = self.rc.float("lines.linewidth").unwrap_or(1.5);
        let mut collection = LineCollection::new(segments, colors, linewidth);
        if let Some(linestyle) = self.rc.get("lines.linestyle").and_then(RcValue::as_str) {
            collection = collection.with_linestyle(linestyle);
        }
        let axes_id = self.gca()?;
        let index = self.axes_mut(axes_id)?.add_line_collection(collection);
        Ok(LineId {
            axes: axes_id,
            index,
        })
    }

    fn figure_mut(&mut self, id: FigureId) -> Result<&mut Figure, PlotError> {
        self.figures
            .get_mut(id.0)
            .ok_or(PlotError::NoSuchArtist { kind: "figure" })
    }

    fn axes_mut(&mut self, id: AxesId) -> Result<&mut Axes, PlotError> {
        self.figure_mut(id.figure)?
            .axes
            .get_mut(id.index)
            .ok_or(PlotError::NoSuchArtist { kind: "axes" })
    }
}

impl RcHost for PlotState {
    fn rc(&self) -> &RcContext {
        &self.rc
    }

    fn rc_mut(&mut self) -> &mut RcContext {
        &mut self.rc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::to_rgba;
    use crate::rc::RcParams;

    #[test]
    fn test_gca_creates_figure_and_axes() {
        let mut plt = PlotState::new();
        let id = plt.gca().unwrap();
        assert_eq!(plt.figures().len(), 1);
        assert_eq!(plt.axes(id).unwrap().position(), SubplotPosition::default());
        assert_eq!(plt.gca().unwrap(), id);
    }

    #[test]
    fn test_figure_facecolor_follows_style() {
        let mut plt = PlotState::new();
        plt.use_style(&["dark_background"]).unwrap();
        let fig = plt.figure().unwrap();
        assert_eq!(plt.get_figure(fig).unwrap().facecolor(), Rgba::BLACK);
        assert_eq!(plt.get_figure(fig).unwrap().dpi(), 100.0);
    }

    #[test]
    fn test_subplots_grid() {
        let mut plt = PlotState::new();
        let ids = plt.subplots(2, 3).unwrap();
        assert_eq!(ids.len(), 6);
        assert_eq!(plt.gca().unwrap(), ids[0]);
        assert_eq!(plt.axes(ids[4]).unwrap().position().cell(), (1, 1));
    }

    #[test]
    fn test_subplots_rejects_empty_grid() {
        let mut plt = PlotState::new();
        assert!(matches!(
            plt.subplots(0, 2),
            Err(PlotError::InvalidSubplot { .. })
        ));
        assert!(plt.figures().is_empty());
    }

    #[test]
    fn test_subplots_rejects_overflowing_grid() {
        let mut plt = PlotState::new();
        assert!(matches!(
            plt.subplots(usize::MAX, 3),
            Err(PlotError::InvalidSubplot { .. })
        ));
        assert!(plt.figures().is_empty());
    }

    #[test]
    fn test_subplot_reuses_position() {
        let mut plt = PlotState::new();
        let first = plt.subplot(SubplotPosition::from_code(211).unwrap()).unwrap();
        let second = plt.subplot(SubplotPosition::from_code(212).unwrap()).unwrap();
        assert_ne!(first, second);
        let again = plt.subplot(SubplotPosition::from_code(211).unwrap()).unwrap();
        assert_eq!(first, again);
        assert_eq!(plt.gca().unwrap(), first);
    }

    #[test]
    fn test_subplot_keyword_conflict_creates_nothing() {
        let mut plt = PlotState::new();
        assert!(plt.subplot(SubplotArgs::new().ncols(1)).is_err());
        assert!(plt.figures().is_empty());
    }

    #[test]
    fn test_frame_toggle() {
        let mut plt = PlotState::new();
        assert!(!plt.frame(None).unwrap());
        assert!(plt.frame(None).unwrap());
        assert!(!plt.frame(Some(false)).unwrap());
        assert!(!plt.frame(Some(false)).unwrap());
    }

    #[test]
    fn test_hlines_segments_and_defaults() {
        let mut plt = PlotState::new();
        let id = plt.hlines(vec![1.0, 2.0], 0.0, 3.0, None).unwrap();
        let lc = plt.line_collection(id).unwrap();
        assert_eq!(lc.segments(), &[[(0.0, 1.0), (3.0, 1.0)], [(0.0, 2.0), (3.0, 2.0)]]);
        assert_eq!(lc.colors(), &[to_rgba("tab:blue").unwrap()]);
        assert_eq!(lc.linewidth(), 1.5);
        let limits = plt.axes(id.axes()).unwrap().data_limits().unwrap();
        assert_eq!((limits.x0, limits.x1, limits.y0, limits.y1), (0.0, 3.0, 1.0, 2.0));
    }

    #[test]
    fn test_lines_take_configured_linestyle() {
        let mut plt = PlotState::new();
        let solid = plt.hlines(0.0, 0.0, 1.0, None).unwrap();
        assert_eq!(plt.line_collection(solid).unwrap().linestyle(), "-");

        let dashed = plt.with_rc(
            RcParams::new().with("lines.linestyle", "dashed").unwrap(),
            |plt| plt.vlines(0.0, 0.0, 1.0, None).unwrap(),
        );
        assert_eq!(plt.line_collection(dashed).unwrap().linestyle(), "--");
    }

    #[test]
    fn test_vlines_explicit_colors() {
        let mut plt = PlotState::new();
        let id = plt
            .vlines([0.0, 1.0], 0.0, 1.0, Some(ColorSpec::from(["red", "green"])))
            .unwrap();
        let lc = plt.line_collection(id).unwrap();
        assert_eq!(lc.segments()[1], [(1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(
            lc.colors(),
            &[to_rgba("red").unwrap(), to_rgba("green").unwrap()]
        );
    }

    #[test]
    fn test_vlines_shape_mismatch() {
        let mut plt = PlotState::new();
        let err = plt.vlines([0.0, 1.0], [0.0, 1.0, 2.0], 1.0, None).unwrap_err();
        assert!(matches!(err, PlotError::ShapeMismatch { function: "vlines", .. }));
    }

    #[test]
    fn test_hlines_invalid_color() {
        let mut plt = PlotState::new();
        let err = plt
            .hlines(0.0, 0.0, 1.0, Some(ColorSpec::from("blurple")))
            .unwrap_err();
        assert!(matches!(err, PlotError::Color(_)));
    }

    #[test]
    fn test_hlines_in_scope() {
        let mut plt = PlotState::new();
        plt.use_style(&["dark_background"]).unwrap();
        let overrides = RcParams::new()
            .with("lines.color", "red")
            .unwrap()
            .with("lines.linewidth", 3.0)
            .unwrap();
        let id = plt.with_rc(overrides, |plt| plt.hlines(0.0, 0.0, 1.0, None).unwrap());
        let lc = plt.line_collection(id).unwrap();
        assert_eq!(lc.colors(), &[to_rgba("red").unwrap()]);
        assert_eq!(lc.linewidth(), 3.0);

        let after = plt.hlines(1.0, 0.0, 1.0, None).unwrap();
        assert_eq!(plt.line_collection(after).unwrap().colors(), &[Rgba::WHITE]);
    }

    #[test]
    fn test_stackplot_stacks_and_cycles() {
        let mut plt = PlotState::new();
        let x = [0.0, 1.0];
        let ids = plt
            .stackplot(&x, &[vec![1.0, 1.0], vec![2.0, 3.0]], None)
            .unwrap();
        assert_eq!(ids.len(), 2);
        let top = plt.poly_collection(ids[1]).unwrap();
        assert_eq!(top.vertices(), &[(0.0, 3.0), (1.0, 4.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(
            plt.poly_collection(ids[0]).unwrap().facecolor(),
            to_rgba("C0").unwrap()
        );
        assert_eq!(top.facecolor(), to_rgba("C1").unwrap());
    }

    #[test]
    fn test_stackplot_explicit_colors_repeat() {
        let mut plt = PlotState::new();
        let ys = vec![vec![1.0], vec![1.0], vec![1.0]];
        let ids = plt
            .stackplot(&[0.0], &ys, Some(ColorSpec::from(["red", "blue"])))
            .unwrap();
        let third = plt.poly_collection(ids[2]).unwrap();
        assert_eq!(third.facecolor(), to_rgba("red").unwrap());
    }

    #[test]
    fn test_stackplot_length_mismatch() {
        let mut plt = PlotState::new();
        let err = plt
            .stackplot(&[0.0, 1.0], &[vec![1.0]], None)
            .unwrap_err();
        assert!(matches!(err, PlotError::ShapeMismatch { function: "stackplot", .. }));
    }

    #[test]
    fn test_unknown_ids() {
        let mut plt = PlotState::new();
        let id = plt.hlines(0.0, 0.0, 1.0, None).unwrap();
        let other = PlotState::new();
        assert!(other.line_collection(id).is_none());
        assert!(other.axes(id.axes()).is_none());
    }
}
