//! Metrics Accumulator
//!
//! Folds motion primitives into the aggregate figures used for cost and
//! duration estimates. Every distance is a chord distance, arcs included.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;
use crate::motion::MotionPrimitive;
use crate::parser::LineDiagnostic;

/// Average cutting speed (mm/min) reported when no cut carries a feed rate
pub const DEFAULT_CUTTING_SPEED: f64 = 50.0;

/// Result of interpreting one NC program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedProgram {
    /// Moves in execution order; `sequence` is the index
    pub toolpath: Vec<MotionPrimitive>,
    pub cutting_perimeter: f64,
    pub rapid_length: f64,
    pub piercing_count: usize,
    pub average_cutting_speed: f64,
    pub bounding_box: BoundingBox,
    /// Lines that were skipped because they could not be interpreted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<LineDiagnostic>,
}

/// Running totals over a toolpath
#[derive(Debug, Clone, Default)]
pub struct MetricsAccumulator {
    cutting_perimeter: f64,
    rapid_length: f64,
    piercing_count: usize,
    feed_rates: Vec<f64>,
    bounds: Option<BoundingBox>,
}

impl MetricsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one primitive
    pub fn record(&mut self, primitive: &MotionPrimitive) {
        let length = primitive.chord_length();

        if primitive.is_cutting() {
            self.cutting_perimeter += length;
            // Zero is the unset modal rate and stays out of the average
            if let Some(feed_rate) = primitive.feed_rate().filter(|f| *f != 0.0) {
                self.feed_rates.push(feed_rate);
            }
        } else {
            self.rapid_length += length;
        }

        if primitive.is_pierce_point {
            self.piercing_count += 1;
        }

        let bounds = self
            .bounds
            .get_or_insert_with(|| BoundingBox::at(&primitive.start));
        bounds.include(&primitive.start);
        bounds.include(&primitive.end);
    }

    /// Arithmetic mean of recorded feed rates, or the fallback speed
    pub fn average_cutting_speed(&self) -> f64 {
        if self.feed_rates.is_empty() {
            DEFAULT_CUTTING_SPEED
        } else {
            self.feed_rates.iter().sum::<f64>() / self.feed_rates.len() as f64
        }
    }

    /// Close the accumulator over the toolpath it was fed
    pub fn finish(self, toolpath: Vec<MotionPrimitive>, diagnostics: Vec<LineDiagnostic>) -> ParsedProgram {
        ParsedProgram {
            average_cutting_speed: self.average_cutting_speed(),
            toolpath,
            cutting_perimeter: self.cutting_perimeter,
            rapid_length: self.rapid_length,
            piercing_count: self.piercing_count,
            bounding_box: self.bounds.unwrap_or_default(),
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::ArcDirection;
    use crate::geometry::Point;
    use crate::motion::Motion;

    fn primitive(sequence: usize, start: (f64, f64), end: (f64, f64), motion: Motion, pierce: bool) -> MotionPrimitive {
        MotionPrimitive {
            sequence,
            start: Point::new(start.0, start.1, 0.0),
            end: Point::new(end.0, end.1, 0.0),
            is_pierce_point: pierce,
            motion,
        }
    }

    #[test]
    fn test_empty_accumulator() {
        let program = MetricsAccumulator::new().finish(Vec::new(), Vec::new());

        assert_eq!(program.cutting_perimeter, 0.0);
        assert_eq!(program.rapid_length, 0.0);
        assert_eq!(program.piercing_count, 0);
        assert_eq!(program.average_cutting_speed, DEFAULT_CUTTING_SPEED);
        assert_eq!(program.bounding_box, BoundingBox::default());
    }

    #[test]
    fn test_rapid_and_cut_lengths_are_separate() {
        let mut acc = MetricsAccumulator::new();
        acc.record(&primitive(0, (0.0, 0.0), (3.0, 4.0), Motion::Rapid, false));
        acc.record(&primitive(
            1,
            (3.0, 4.0),
            (3.0, 14.0),
            Motion::LinearCut {
                feed_rate: 60.0,
            },
            true,
        ));
        acc.record(&primitive(
            2,
            (3.0, 14.0),
            (3.0, 24.0),
            Motion::LinearCut {
                feed_rate: 120.0,
            },
            false,
        ));

        let program = acc.finish(Vec::new(), Vec::new());
        assert_eq!(program.rapid_length, 5.0);
        assert_eq!(program.cutting_perimeter, 20.0);
        assert_eq!(program.piercing_count, 1);
        assert_eq!(program.average_cutting_speed, 90.0);
        assert_eq!(
            program.bounding_box,
            BoundingBox {
                min_x: 0.0,
                max_x: 3.0,
                min_y: 0.0,
                max_y: 24.0
            }
        );
    }

    #[test]
    fn test_arcs_count_by_chord() {
        let mut acc = MetricsAccumulator::new();
        acc.record(&primitive(
            0,
            (0.0, 0.0),
            (20.0, 0.0),
            Motion::ArcCut {
                direction: ArcDirection::Clockwise,
                feed_rate: 0.0,
                geometry: None,
            },
            true,
        ));

        let program = acc.finish(Vec::new(), Vec::new());
        assert_eq!(program.cutting_perimeter, 20.0);
        assert_eq!(program.average_cutting_speed, DEFAULT_CUTTING_SPEED);
    }

    #[test]
    fn test_zero_feed_skipped_negative_feed_kept() {
        let mut acc = MetricsAccumulator::new();
        for (sequence, feed_rate) in [0.0, -20.0, 100.0].into_iter().enumerate() {
            let x = sequence as f64 * 10.0;
            acc.record(&primitive(
                sequence,
                (x, 0.0),
                (x + 10.0, 0.0),
                Motion::LinearCut { feed_rate },
                sequence == 0,
            ));
        }

        assert_eq!(acc.average_cutting_speed(), 40.0);
    }

    #[test]
    fn test_bounding_box_uses_start_points() {
        let mut acc = MetricsAccumulator::new();
        acc.record(&primitive(0, (-5.0, 7.0), (1.0, 1.0), Motion::Rapid, false));

        let program = acc.finish(Vec::new(), Vec::new());
        assert_eq!(program.bounding_box.min_x, -5.0);
        assert_eq!(program.bounding_box.max_y, 7.0);
    }
}
