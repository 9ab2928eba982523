//! Motion primitives and the builder that produces them.
//!
//! A [`MotionPrimitive`] is one executed move. The arc payload only exists on
//! the arc-cut variant of [`Motion`]. On the wire a primitive is the flat
//! record replay consumers expect (`kind`, `command`, `feedRate` on cuts and
//! an optional `arc`).

use serde::{Deserialize, Serialize};

use crate::arc::{resolve_arc, ArcDirection, ArcGeometry};
use crate::geometry::Point;
use crate::parser::fields::{extract_field, LineError, MotionFields};
use crate::parser::modal::{ModalState, MoveKind};

/// The four motion command codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandCode {
    #[serde(rename = "G00")]
    Rapid,
    #[serde(rename = "G01")]
    LinearCut,
    #[serde(rename = "G02")]
    ClockwiseArc,
    #[serde(rename = "G03")]
    CounterClockwiseArc,
}

impl CommandCode {
    /// Map a G word value to a motion command; anything else is not motion
    pub fn from_g_value(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(CommandCode::Rapid)
        } else if value == 1.0 {
            Some(CommandCode::LinearCut)
        } else if value == 2.0 {
            Some(CommandCode::ClockwiseArc)
        } else if value == 3.0 {
            Some(CommandCode::CounterClockwiseArc)
        } else {
            None
        }
    }

    pub fn kind(self) -> MoveKind {
        match self {
            CommandCode::Rapid => MoveKind::Rapid,
            _ => MoveKind::Cutting,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommandCode::Rapid => "G00",
            CommandCode::LinearCut => "G01",
            CommandCode::ClockwiseArc => "G02",
            CommandCode::CounterClockwiseArc => "G03",
        }
    }
}

/// What a move does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Rapid,
    LinearCut {
        feed_rate: f64,
    },
    ArcCut {
        direction: ArcDirection,
        feed_rate: f64,
        /// Absent when the line lacked I or J
        geometry: Option<ArcGeometry>,
    },
}

/// One executed move, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "PrimitiveRecord", try_from = "PrimitiveRecord")]
pub struct MotionPrimitive {
    pub sequence: usize,
    pub start: Point,
    pub end: Point,
    pub is_pierce_point: bool,
    pub motion: Motion,
}

impl MotionPrimitive {
    pub fn kind(&self) -> MoveKind {
        self.command().kind()
    }

    pub fn command(&self) -> CommandCode {
        match self.motion {
            Motion::Rapid => CommandCode::Rapid,
            Motion::LinearCut { .. } => CommandCode::LinearCut,
            Motion::ArcCut {
                direction: ArcDirection::Clockwise,
                ..
            } => CommandCode::ClockwiseArc,
            Motion::ArcCut {
                direction: ArcDirection::CounterClockwise,
                ..
            } => CommandCode::CounterClockwiseArc,
        }
    }

    pub fn is_cutting(&self) -> bool {
        self.kind() == MoveKind::Cutting
    }

    /// Modal feed rate of a cutting move; `None` for rapids
    pub fn feed_rate(&self) -> Option<f64> {
        match self.motion {
            Motion::Rapid => None,
            Motion::LinearCut { feed_rate } | Motion::ArcCut { feed_rate, .. } => Some(feed_rate),
        }
    }

    pub fn arc(&self) -> Option<&ArcGeometry> {
        match &self.motion {
            Motion::ArcCut { geometry, .. } => geometry.as_ref(),
            _ => None,
        }
    }

    /// Straight-line XY distance from start to end, arcs included
    pub fn chord_length(&self) -> f64 {
        self.start.chord_distance(&self.end)
    }
}

/// Build the primitive for one tokenized line
///
/// Returns `Ok(None)` for lines that are not motion (absent or unrecognized
/// G). On success the state after the move is returned alongside the
/// primitive; the input state is never touched.
pub fn build_primitive(
    tokens: &[String],
    state: ModalState,
    sequence: usize,
) -> Result<Option<(MotionPrimitive, ModalState)>, LineError> {
    let Some(command) = extract_field(tokens, 'G')?.and_then(CommandCode::from_g_value) else {
        return Ok(None);
    };

    let fields = MotionFields::extract(tokens)?;
    let start = state.current_position;
    let end = state.resolve_target(fields.x, fields.y, fields.z);
    let kind = command.kind();
    let is_pierce_point = state.last_move_kind == MoveKind::Rapid && kind == MoveKind::Cutting;

    let feed_rate = state.resolve_feed_rate(fields.f);

    let motion = match command {
        CommandCode::Rapid => Motion::Rapid,
        CommandCode::LinearCut => Motion::LinearCut { feed_rate },
        CommandCode::ClockwiseArc | CommandCode::CounterClockwiseArc => {
            let direction = if command == CommandCode::ClockwiseArc {
                ArcDirection::Clockwise
            } else {
                ArcDirection::CounterClockwise
            };
            Motion::ArcCut {
                direction,
                feed_rate,
                geometry: fields
                    .center_offset()
                    .map(|offset| resolve_arc(&start, &end, offset, direction)),
            }
        }
    };

    let primitive = MotionPrimitive {
        sequence,
        start,
        end,
        is_pierce_point,
        motion,
    };

    Ok(Some((primitive, state.advance(end, feed_rate, kind))))
}

/// Flat wire shape of a primitive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrimitiveRecord {
    kind: MoveKind,
    command: CommandCode,
    start: Point,
    end: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feed_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arc: Option<ArcGeometry>,
    is_pierce_point: bool,
    sequence: usize,
}

impl From<MotionPrimitive> for PrimitiveRecord {
    fn from(primitive: MotionPrimitive) -> Self {
        Self {
            kind: primitive.kind(),
            command: primitive.command(),
            start: primitive.start,
            end: primitive.end,
            feed_rate: primitive.feed_rate(),
            arc: primitive.arc().copied(),
            is_pierce_point: primitive.is_pierce_point,
            sequence: primitive.sequence,
        }
    }
}

impl TryFrom<PrimitiveRecord> for MotionPrimitive {
    type Error = String;

    fn try_from(record: PrimitiveRecord) -> Result<Self, Self::Error> {
        if record.kind != record.command.kind() {
            return Err(format!(
                "move {} has kind {:?} but command {}",
                record.sequence,
                record.kind,
                record.command.as_str()
            ));
        }

        // Cutting records written without a feed ran at the initial modal rate
        let feed_rate = record.feed_rate.unwrap_or(0.0);
        let motion = match record.command {
            CommandCode::Rapid | CommandCode::LinearCut if record.arc.is_some() => {
                return Err(format!(
                    "move {} carries arc geometry on {}",
                    record.sequence,
                    record.command.as_str()
                ));
            }
            CommandCode::Rapid => Motion::Rapid,
            CommandCode::LinearCut => Motion::LinearCut {
                feed_rate,
            },
            CommandCode::ClockwiseArc => Motion::ArcCut {
                direction: ArcDirection::Clockwise,
                feed_rate,
                geometry: record.arc,
            },
            CommandCode::CounterClockwiseArc => Motion::ArcCut {
                direction: ArcDirection::CounterClockwise,
                feed_rate,
                geometry: record.arc,
            },
        };

        Ok(Self {
            sequence: record.sequence,
            start: record.start,
            end: record.end,
            is_pierce_point: record.is_pierce_point,
            motion,
        })
    }
}
