//! Modal state carried from one motion line to the next.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Whether the jet is cutting during a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Rapid,
    Cutting,
}

/// Position, feed rate and last move kind, scoped to one parse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalState {
    pub current_position: Point,
    pub last_move_kind: MoveKind,
    pub feed_rate: f64,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            current_position: Point::origin(),
            last_move_kind: MoveKind::Rapid,
            feed_rate: 0.0,
        }
    }
}

impl ModalState {
    /// Absolute target of a move; absent axes keep their current value
    pub fn resolve_target(&self, x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Point {
        let current = &self.current_position;
        Point {
            x: x.unwrap_or(current.x),
            y: y.unwrap_or(current.y),
            z: z.or(current.z),
        }
    }

    /// Feed rate in effect for a move; absent F keeps the modal value
    pub fn resolve_feed_rate(&self, f: Option<f64>) -> f64 {
        f.unwrap_or(self.feed_rate)
    }

    /// State after a move of `kind` ending at `end`
    pub fn advance(self, end: Point, feed_rate: f64, kind: MoveKind) -> Self {
        Self {
            current_position: end,
            last_move_kind: kind,
            feed_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ModalState::default();
        assert_eq!(state.current_position, Point::new(0.0, 0.0, 0.0));
        assert_eq!(state.last_move_kind, MoveKind::Rapid);
        assert_eq!(state.feed_rate, 0.0);
    }

    #[test]
    fn test_absent_axes_are_retained() {
        let state = ModalState::default().advance(Point::new(5.0, 6.0, 1.0), 120.0, MoveKind::Cutting);

        assert_eq!(
            state.resolve_target(Some(9.0), None, None),
            Point::new(9.0, 6.0, 1.0)
        );
        assert_eq!(state.resolve_feed_rate(None), 120.0);
        assert_eq!(state.resolve_feed_rate(Some(80.0)), 80.0);
    }
}
