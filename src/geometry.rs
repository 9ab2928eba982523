//! Planar geometry helpers
//!
//! Points in machine units (millimeters) and the small amount of math the
//! interpreter needs on them. Z is carried along but never measured.

use serde::{Deserialize, Serialize};

/// A machine position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// A point without a Z coordinate (used for arc centers)
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// The machine origin `(0, 0, 0)`
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Straight-line XY distance to `other`, ignoring Z
    pub fn chord_distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of this point as seen from `center`, in radians
    pub fn angle_from(&self, center: &Point) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }
}

/// Axis-aligned XY rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// A zero-size box sitting on `point`
    pub fn at(point: &Point) -> Self {
        Self {
            min_x: point.x,
            max_x: point.x,
            min_y: point.y,
            max_y: point.y,
        }
    }

    /// Grow the box so that it encloses `point`
    pub fn include(&mut self, point: &Point) {
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_distance_ignores_z() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(3.0, 4.0, 100.0);
        assert_eq!(a.chord_distance(&b), 5.0);
    }

    #[test]
    fn test_bounding_box_grows() {
        let mut bbox = BoundingBox::at(&Point::new(1.0, 1.0, 0.0));
        bbox.include(&Point::new(-2.0, 5.0, 0.0));
        bbox.include(&Point::new(3.0, 0.5, 0.0));

        assert_eq!(
            bbox,
            BoundingBox {
                min_x: -2.0,
                max_x: 3.0,
                min_y: 0.5,
                max_y: 5.0
            }
        );
        assert_eq!(bbox.width(), 5.0);
        assert_eq!(bbox.height(), 4.5);
    }

    #[test]
    fn test_default_box_is_degenerate() {
        let bbox = BoundingBox::default();
        assert_eq!(bbox.min_x, 0.0);
        assert_eq!(bbox.max_y, 0.0);
    }
}
