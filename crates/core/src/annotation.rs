//! Measured line features
//!
//! Lines drawn or entered by coordinates, each carrying a label with its
//! length and azimuth. The collection keeps insertion order so labels and
//! hit-test results are stable.

use crate::coordinate::{GeoPoint, Line, ProjectedPoint};
use crate::measurement::{calculate_azimuth, format_length, MeasureError, MeasureResult};
use crate::projection::{from_geographic, to_geographic};
use crate::sphere::GreatCircleLength;
use crate::units::UnitsConfig;
use std::collections::HashMap;

/// Unique identifier for a measured line
///
/// Generated using UUID v4.
pub type LineId = uuid::Uuid;

/// Coordinate entry form for a single-segment line
///
/// Fields are optional because the form is filled in one value at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineCoordinates {
    pub start_lon: Option<f64>,
    pub start_lat: Option<f64>,
    pub end_lon: Option<f64>,
    pub end_lat: Option<f64>,
}

impl LineCoordinates {
    /// Create a fully populated form
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start_lon: Some(start.lon),
            start_lat: Some(start.lat),
            end_lon: Some(end.lon),
            end_lat: Some(end.lat),
        }
    }

    /// Read the first and last vertex of a line back into degrees
    pub fn from_line(line: &Line) -> Self {
        Self::new(to_geographic(line.first()), to_geographic(line.last()))
    }

    /// All four values are set
    pub fn is_complete(&self) -> bool {
        self.endpoints().is_some()
    }

    /// Start and end points, if the form is complete
    pub fn endpoints(&self) -> Option<(GeoPoint, GeoPoint)> {
        Some((
            GeoPoint::new(self.start_lon?, self.start_lat?),
            GeoPoint::new(self.end_lon?, self.end_lat?),
        ))
    }

    /// Project the form into a two-point line
    ///
    /// # Errors
    /// - [`MeasureError::IncompleteCoordinates`] if any value is missing
    /// - [`MeasureError::NonFiniteCoordinate`] if any value is NaN or infinite
    pub fn to_line(&self) -> MeasureResult<Line> {
        let (start, end) = self.endpoints().ok_or(MeasureError::IncompleteCoordinates)?;
        if let Some(index) = [start, end].iter().position(|p| !p.is_finite()) {
            return Err(MeasureError::NonFiniteCoordinate { index });
        }
        Line::segment(from_geographic(start), from_geographic(end))
    }
}

/// Formatted length and azimuth of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMetrics {
    pub length: String,
    pub azimuth: String,
}

impl LineMetrics {
    /// Length of `line`, with the azimuth taken from `start` to `end`
    pub fn calculate<P: GreatCircleLength + ?Sized>(
        line: &Line,
        start: GeoPoint,
        end: GeoPoint,
        units: &UnitsConfig,
        provider: &P,
    ) -> MeasureResult<Self> {
        Ok(Self {
            length: format_length(line, units, provider),
            azimuth: calculate_azimuth(start, end, units)?,
        })
    }

    /// Length of `line`, azimuth from its first to its last vertex
    pub fn for_line<P: GreatCircleLength + ?Sized>(
        line: &Line,
        units: &UnitsConfig,
        provider: &P,
    ) -> MeasureResult<Self> {
        Self::calculate(
            line,
            to_geographic(line.first()),
            to_geographic(line.last()),
            units,
            provider,
        )
    }

    /// Tooltip text, e.g. `"1.23 km | Azimuth: 45.00°"`
    pub fn label(&self) -> String {
        format!("{} | Azimuth: {}", self.length, self.azimuth)
    }
}

/// A line feature with its measurement label
#[derive(Debug, Clone)]
pub struct MeasuredLine {
    /// Stable unique identifier
    id: LineId,

    /// Geometry in projected coordinates
    line: Line,

    /// Formatted label, None until measured
    label: Option<String>,

    /// Where the label is anchored on the map
    label_anchor: ProjectedPoint,

    /// Whether this line is visible
    visible: bool,
}

impl MeasuredLine {
    /// Create an unlabelled line with a generated ID
    pub fn new(line: Line) -> Self {
        Self::with_id(LineId::new_v4(), line)
    }

    /// Create an unlabelled line with a specific ID
    pub fn with_id(id: LineId, line: Line) -> Self {
        let label_anchor = line.last();
        Self {
            id,
            line,
            label: None,
            label_anchor,
            visible: true,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn label_anchor(&self) -> ProjectedPoint {
        self.label_anchor
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Current endpoints as a coordinate form
    pub fn coordinates(&self) -> LineCoordinates {
        LineCoordinates::from_line(&self.line)
    }

    /// Recompute the label for the given units
    pub fn measure<P: GreatCircleLength + ?Sized>(
        &mut self,
        units: &UnitsConfig,
        provider: &P,
    ) -> MeasureResult<()> {
        let metrics = LineMetrics::for_line(&self.line, units, provider)?;
        self.label = Some(metrics.label());
        self.label_anchor = self.line.last();
        Ok(())
    }

    /// Replace the geometry (invalidates the label)
    pub fn set_line(&mut self, line: Line) {
        self.label_anchor = line.last();
        self.line = line;
        self.label = None;
    }

    /// Check if a point hits this line (for selection)
    pub fn hit_test(&self, point: &ProjectedPoint, tolerance: f64) -> bool {
        self.visible && self.line.distance_to_point(point) <= tolerance
    }
}

/// Collection of measured lines
#[derive(Debug, Default)]
pub struct LineCollection {
    /// All lines indexed by ID
    lines: HashMap<LineId, MeasuredLine>,

    /// Insertion order
    order: Vec<LineId>,
}

impl LineCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line to the collection
    pub fn add(&mut self, line: MeasuredLine) -> LineId {
        let id = line.id();
        if self.lines.insert(id, line).is_none() {
            self.order.push(id);
        }
        id
    }

    /// Add a measured line built from a coordinate form
    pub fn add_from_coordinates<P: GreatCircleLength + ?Sized>(
        &mut self,
        coordinates: &LineCoordinates,
        units: &UnitsConfig,
        provider: &P,
    ) -> MeasureResult<LineId> {
        let mut line = MeasuredLine::new(coordinates.to_line()?);
        line.measure(units, provider)?;
        log::debug!("added line {} from coordinates", line.id());
        Ok(self.add(line))
    }

    /// Replace a line's geometry with the segment described by `coordinates`
    /// and recompute its label
    pub fn update_coordinates<P: GreatCircleLength + ?Sized>(
        &mut self,
        id: LineId,
        coordinates: &LineCoordinates,
        units: &UnitsConfig,
        provider: &P,
    ) -> MeasureResult<()> {
        let geometry = coordinates.to_line()?;
        let line = self.lines.get_mut(&id).ok_or(MeasureError::LineNotFound(id))?;
        line.set_line(geometry);
        line.measure(units, provider)
    }

    /// Remove a line by ID
    pub fn remove(&mut self, id: LineId) -> Option<MeasuredLine> {
        let removed = self.lines.remove(&id)?;
        self.order.retain(|&lid| lid != id);
        Some(removed)
    }

    pub fn get(&self, id: LineId) -> Option<&MeasuredLine> {
        self.lines.get(&id)
    }

    pub fn get_mut(&mut self, id: LineId) -> Option<&mut MeasuredLine> {
        self.lines.get_mut(&id)
    }

    /// Lines in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &MeasuredLine> + '_ {
        self.order.iter().filter_map(|id| self.lines.get(id))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.order.clear();
    }

    /// Visible lines within `tolerance` of `point`, newest first
    pub fn hit_test(&self, point: &ProjectedPoint, tolerance: f64) -> Vec<&MeasuredLine> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.lines.get(id))
            .filter(|line| line.hit_test(point, tolerance))
            .collect()
    }

    /// Recompute every label, e.g. after the user switched units
    pub fn relabel<P: GreatCircleLength + ?Sized>(
        &mut self,
        units: &UnitsConfig,
        provider: &P,
    ) -> MeasureResult<()> {
        for line in self.lines.values_mut() {
            line.measure(units, provider)?;
        }
        Ok(())
    }
}
