//! Arc Geometry Resolver
//!
//! Resolves circular moves given in center-offset notation (`I`/`J`
//! relative to the start point) into center, radius and sweep.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Rotational direction of a circular move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcDirection {
    /// G2
    Clockwise,
    /// G3
    CounterClockwise,
}

impl ArcDirection {
    pub fn is_clockwise(self) -> bool {
        self == ArcDirection::Clockwise
    }
}

/// Resolved geometry of a circular move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcGeometry {
    pub center: Point,
    pub radius: f64,
    /// Sweep magnitude in radians; direction lives in `clockwise`
    pub angle: f64,
    pub clockwise: bool,
}

impl ArcGeometry {
    /// Angle of the start point around the center
    pub fn start_angle(&self, start: &Point) -> f64 {
        start.angle_from(&self.center)
    }

    /// Angle of the end point around the center
    pub fn end_angle(&self, end: &Point) -> f64 {
        end.angle_from(&self.center)
    }
}

/// Resolve an arc from its endpoints and center offset `(i, j)`
pub fn resolve_arc(start: &Point, end: &Point, offset: (f64, f64), direction: ArcDirection) -> ArcGeometry {
    let (i, j) = offset;
    let center = Point::planar(start.x + i, start.y + j);
    let radius = i.hypot(j);

    let mut delta = end.angle_from(&center) - start.angle_from(&center);
    match direction {
        ArcDirection::Clockwise if delta > 0.0 => delta -= TAU,
        ArcDirection::CounterClockwise if delta < 0.0 => delta += TAU,
        _ => {}
    }

    ArcGeometry {
        center,
        radius,
        angle: delta.abs(),
        clockwise: direction.is_clockwise(),
    }
}
