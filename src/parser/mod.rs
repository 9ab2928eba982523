//! NC Program Parser
//!
//! Interprets waterjet G-code into an ordered toolpath plus aggregate
//! metrics. Parsing is a single pass over the lines: each motion line is
//! resolved against the modal state left by the previous one, and the
//! resulting primitive is folded into the metrics.

pub mod fields;
pub mod lexer;
pub mod modal;

use serde::{Deserialize, Serialize};

pub use fields::{extract_field, LineError, MotionFields};
pub use lexer::{classify_line, classify_program, ClassifiedLine, ProgramLine};
pub use modal::{ModalState, MoveKind};

use crate::metrics::{MetricsAccumulator, ParsedProgram};
use crate::motion::build_primitive;

/// A line that was skipped because it could not be interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDiagnostic {
    /// 1-based physical line number
    pub line: usize,
    pub message: String,
}

/// Parse a complete NC program
///
/// Never fails: malformed lines are skipped, logged and recorded in
/// [`ParsedProgram::diagnostics`], leaving the modal state untouched.
pub fn parse_program(text: &str) -> ParsedProgram {
    let mut state = ModalState::default();
    let mut toolpath = Vec::new();
    let mut metrics = MetricsAccumulator::new();
    let mut diagnostics = Vec::new();

    for line in classify_program(text) {
        let ClassifiedLine::Tokens(tokens) = line.classified else {
            continue;
        };

        match build_primitive(&tokens, state, toolpath.len()) {
            Ok(Some((primitive, next))) => {
                metrics.record(&primitive);
                toolpath.push(primitive);
                state = next;
            }
            Ok(None) => {
                log::trace!("Line {}: not a motion command: {}", line.number, line.text.trim());
            }
            Err(err) => {
                log::warn!("Skipping line {}: {} in '{}'", line.number, err, line.text.trim());
                diagnostics.push(LineDiagnostic {
                    line: line.number,
                    message: err.to_string(),
                });
            }
        }
    }

    let program = metrics.finish(toolpath, diagnostics);
    log::debug!(
        "Parsed {} moves, {} pierce points, {} skipped lines",
        program.toolpath.len(),
        program.piercing_count,
        program.diagnostics.len()
    );
    program
}
