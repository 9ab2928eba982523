//! Waterjet NC Interpreter
//!
//! Interprets G-code programs for abrasive waterjet machines.
//!
//! This library provides:
//! - Line classification and field extraction
//! - Modal-state tracking and motion primitive construction (G0-G3)
//! - Arc geometry from center-offset notation
//! - Toolpath metrics (cutting perimeter, rapid length, pierces, bounds)
//! - Cut-time estimation and reporting

pub mod arc;
pub mod config;
pub mod estimate;
pub mod geometry;
pub mod metrics;
pub mod motion;
pub mod parser;
pub mod report;

// Re-exports for clean public API
pub use arc::{ArcDirection, ArcGeometry};
pub use config::Config;
pub use estimate::{calculate_cut_time, format_time, CutTime, EstimateSettings};
pub use geometry::{BoundingBox, Point};
pub use metrics::ParsedProgram;
pub use motion::{CommandCode, Motion, MotionPrimitive};
pub use parser::{parse_program, LineDiagnostic, MoveKind};
pub use report::Report;
