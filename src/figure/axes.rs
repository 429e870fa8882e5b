//! A single set of axes and the artists drawn on it.

use super::artist::{DataLimits, LineCollection, PolyCollection};
use super::subplot::SubplotPosition;
use crate::color::Rgba;

#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    position: SubplotPosition,
    frame_on: bool,
    facecolor: Rgba,
    lines: Vec<LineCollection>,
    polys: Vec<PolyCollection>,
    data_limits: Option<DataLimits>,
    cycle_index: usize,
}

impl Axes {
    pub(crate) fn new(position: SubplotPosition, facecolor: Rgba) -> Self {
        Self {
            position,
            frame_on: true,
            facecolor,
            lines: Vec::new(),
            polys: Vec::new(),
            data_limits: None,
            cycle_index: 0,
        }
    }

    pub fn position(&self) -> SubplotPosition {
        self.position
    }

    /// Whether the axes frame (background patch and spines) is drawn.
    pub fn frame_on(&self) -> bool {
        self.frame_on
    }

    pub fn set_frame_on(&mut self, on: bool) {
        self.frame_on = on;
    }

    pub fn facecolor(&self) -> Rgba {
        self.facecolor
    }

    pub fn lines(&self) -> &[LineCollection] {
        &self.lines
    }

    pub fn polys(&self) -> &[PolyCollection] {
        &self.polys
    }

    /// The extent of the data drawn so far, if any.
    pub fn data_limits(&self) -> Option<DataLimits> {
        self.data_limits
    }

    /// Takes the next color from `cycle`, advancing this axes' position in it.
    ///
    /// Returns `None` for an empty cycle.
    pub fn next_cycle_color(&mut self, cycle: &[Rgba]) -> Option<Rgba> {
        if cycle.is_empty() {
            return None;
        }
        let color = cycle[self.cycle_index % cycle.len()];
        self.cycle_index += 1;
        Some(color)
    }

    pub(crate) fn add_line_collection(&mut self, collection: LineCollection) -> usize {
        let points: Vec<(f64, f64)> = collection
            .segments()
            .iter()
            .flat_map(|segment| segment.iter().copied())
            .collect();
        DataLimits::extend(&mut self.data_limits, &points);
        self.lines.push(collection);
        self.lines.len() - 1
    }

    pub(crate) fn add_poly_collection(&mut self, collection: PolyCollection) -> usize {
        DataLimits::extend(&mut self.data_limits, collection.vertices());
        self.polys.push(collection);
        self.polys.len() - 1
    }
}
