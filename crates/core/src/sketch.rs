//! In-progress drawing sessions
//!
//! A sketch holds the committed vertices of a line being drawn plus the
//! floating vertex under the pointer, and produces the live tooltip shown
//! next to it.

use crate::annotation::LineMetrics;
use crate::coordinate::{Line, ProjectedPoint};
use crate::measurement::{calculate_angle, MeasureResult};
use crate::projection::to_geographic;
use crate::sphere::GreatCircleLength;
use crate::units::UnitsConfig;

/// What a sketch measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SketchKind {
    /// Length and azimuth
    Distance,
    /// Angle between the last two segments
    Angle,
}

/// Text and map position of a measurement tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub anchor: ProjectedPoint,
}

/// A line being drawn
#[derive(Debug, Clone)]
pub struct Sketch {
    kind: SketchKind,
    vertices: Vec<ProjectedPoint>,
    pointer: Option<ProjectedPoint>,
}

impl Sketch {
    pub fn new(kind: SketchKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            pointer: None,
        }
    }

    pub fn kind(&self) -> SketchKind {
        self.kind
    }

    /// Commit a vertex (a click)
    pub fn push_vertex(&mut self, point: ProjectedPoint) {
        self.vertices.push(point);
        self.pointer = None;
    }

    /// Move the floating vertex that follows the pointer
    pub fn move_pointer(&mut self, point: ProjectedPoint) {
        self.pointer = Some(point);
    }

    /// Committed vertices only
    pub fn vertices(&self) -> &[ProjectedPoint] {
        &self.vertices
    }

    /// Committed vertices followed by the floating vertex, if any
    pub fn points(&self) -> Vec<ProjectedPoint> {
        self.vertices.iter().copied().chain(self.pointer).collect()
    }

    /// Live tooltip for the current geometry
    ///
    /// `Ok(None)` until the sketch has two points. Distance sketches show
    /// the length of the whole path with the azimuth of its first segment,
    /// anchored at the last point. Angle sketches show the angle at the
    /// second-to-last point.
    pub fn tooltip<P: GreatCircleLength + ?Sized>(
        &self,
        units: &UnitsConfig,
        provider: &P,
    ) -> MeasureResult<Option<Tooltip>> {
        let points = self.points();
        if points.len() < Line::MIN_POINTS {
            return Ok(None);
        }

        let tooltip = match self.kind {
            SketchKind::Distance => {
                let line = Line::new(points)?;
                let metrics = LineMetrics::calculate(
                    &line,
                    to_geographic(line.points()[0]),
                    to_geographic(line.points()[1]),
                    units,
                    provider,
                )?;
                Tooltip {
                    text: metrics.label(),
                    anchor: line.last(),
                }
            }
            SketchKind::Angle => Tooltip {
                text: format!("Angle: {}", calculate_angle(&points, units)?),
                anchor: points[points.len() - 2],
            },
        };
        Ok(Some(tooltip))
    }

    /// End the session, dropping the floating vertex
    ///
    /// # Errors
    /// [`crate::MeasureError::TooFewPoints`] if fewer than two vertices were committed
    pub fn finish(self) -> MeasureResult<Line> {
        log::debug!(
            "finishing {:?} sketch with {} vertices",
            self.kind,
            self.vertices.len()
        );
        Line::new(self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::GeoPoint;
    use crate::measurement::MeasureError;
    use crate::projection::from_geographic;
    use crate::sphere::Haversine;

    fn geo(lon: f64, lat: f64) -> ProjectedPoint {
        from_geographic(GeoPoint::new(lon, lat))
    }

    #[test]
    fn test_no_tooltip_before_two_points() {
        let mut sketch = Sketch::new(SketchKind::Distance);
        let units = UnitsConfig::default();
        let provider = Haversine::default();
        assert_eq!(sketch.tooltip(&units, &provider).unwrap(), None);

        sketch.push_vertex(geo(0.0, 0.0));
        assert_eq!(sketch.tooltip(&units, &provider).unwrap(), None);

        sketch.move_pointer(geo(0.0, 1.0));
        assert!(sketch.tooltip(&units, &provider).unwrap().is_some());
    }

    #[test]
    fn test_distance_tooltip() {
        let mut sketch = Sketch::new(SketchKind::Distance);
        sketch.push_vertex(geo(0.0, 0.0));
        sketch.move_pointer(geo(0.0, 1.0));

        let tooltip = sketch
            .tooltip(&UnitsConfig::default(), &Haversine::default())
            .unwrap()
            .unwrap();
        assert_eq!(tooltip.text, "111.20 km | Azimuth: 0.00°");
        assert_eq!(tooltip.anchor, geo(0.0, 1.0));
    }

    #[test]
    fn test_distance_tooltip_uses_first_segment_azimuth() {
        let mut sketch = Sketch::new(SketchKind::Distance);
        sketch.push_vertex(geo(0.0, 0.0));
        sketch.push_vertex(geo(0.0, 1.0));
        sketch.move_pointer(geo(1.0, 1.0));

        let tooltip = sketch
            .tooltip(&UnitsConfig::default(), &Haversine::default())
            .unwrap()
            .unwrap();
        assert!(tooltip.text.ends_with("| Azimuth: 0.00°"), "{}", tooltip.text);
        assert_eq!(tooltip.anchor, geo(1.0, 1.0));
    }

    #[test]
    fn test_angle_tooltip() {
        let mut sketch = Sketch::new(SketchKind::Angle);
        sketch.push_vertex(ProjectedPoint::new(0.0, 0.0));
        sketch.push_vertex(ProjectedPoint::new(0.0, 1.0));
        sketch.move_pointer(ProjectedPoint::new(1.0, 1.0));

        let tooltip = sketch
            .tooltip(&UnitsConfig::default(), &Haversine::default())
            .unwrap()
            .unwrap();
        assert_eq!(tooltip.text, "Angle: 90.00°");
        assert_eq!(tooltip.anchor, ProjectedPoint::new(0.0, 1.0));
    }

    #[test]
    fn test_angle_tooltip_with_one_segment() {
        let mut sketch = Sketch::new(SketchKind::Angle);
        sketch.push_vertex(ProjectedPoint::new(0.0, 0.0));
        sketch.move_pointer(ProjectedPoint::new(3.0, 4.0));

        let tooltip = sketch
            .tooltip(&UnitsConfig::default(), &Haversine::default())
            .unwrap()
            .unwrap();
        assert_eq!(tooltip.text, "Angle: 0");
        assert_eq!(tooltip.anchor, ProjectedPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_push_vertex_clears_pointer() {
        let mut sketch = Sketch::new(SketchKind::Distance);
        sketch.push_vertex(ProjectedPoint::new(0.0, 0.0));
        sketch.move_pointer(ProjectedPoint::new(5.0, 5.0));
        assert_eq!(sketch.points().len(), 2);

        sketch.push_vertex(ProjectedPoint::new(5.0, 5.0));
        assert_eq!(sketch.points().len(), 2);
        assert_eq!(sketch.vertices().len(), 2);
    }

    #[test]
    fn test_finish_drops_pointer() {
        let mut sketch = Sketch::new(SketchKind::Distance);
        sketch.push_vertex(ProjectedPoint::new(0.0, 0.0));
        sketch.push_vertex(ProjectedPoint::new(10.0, 0.0));
        sketch.move_pointer(ProjectedPoint::new(20.0, 0.0));

        let line = sketch.finish().unwrap();
        assert_eq!(line.len(), 2);
        assert_eq!(line.last(), ProjectedPoint::new(10.0, 0.0));
    }

    #[test]
    fn test_finish_with_one_vertex_fails() {
        let mut sketch = Sketch::new(SketchKind::Angle);
        sketch.push_vertex(ProjectedPoint::new(0.0, 0.0));
        sketch.move_pointer(ProjectedPoint::new(1.0, 0.0));

        assert_eq!(
            sketch.finish().unwrap_err(),
            MeasureError::TooFewPoints {
                required: 2,
                actual: 1
            }
        );
    }
}
