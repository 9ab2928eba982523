//! Job report rendering
//!
//! Turns a parsed program and its estimate into a human-readable breakdown
//! or a JSON document for replay/visualization consumers.

use std::fmt;

use serde::Serialize;

use crate::estimate::{format_time, CutTime, EstimateError, EstimateInputs, EstimateSettings, TimeComparison};
use crate::metrics::ParsedProgram;

/// Everything known about one program after estimation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub program: &'a ParsedProgram,
    pub inputs: EstimateInputs,
    pub cut_time: CutTime,
    pub formatted_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<TimeComparison>,
}

impl<'a> Report<'a> {
    /// Estimate `program` with `settings`, optionally against a reference total
    pub fn build(
        program: &'a ParsedProgram,
        settings: &EstimateSettings,
        reference_time: Option<f64>,
    ) -> Result<Self, EstimateError> {
        let inputs = settings.resolve(program)?;
        let cut_time = inputs.cut_time();

        Ok(Self {
            program,
            inputs,
            cut_time,
            formatted_time: format_time(cut_time.total_time),
            comparison: reference_time.map(|reference| TimeComparison::new(reference, cut_time.total_time)),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text breakdown
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // String's fmt::Write never errors
        let _ = self.write_text(&mut out);
        out
    }

    /// Write the plain-text breakdown into `out`
    pub fn write_text(&self, out: &mut impl fmt::Write) -> fmt::Result {
        let program = self.program;
        let inputs = &self.inputs;
        let t = &self.cut_time;
        let bbox = &program.bounding_box;

        writeln!(out, "Moves:             {}", program.toolpath.len())?;
        writeln!(out, "Pierce count:      {}", inputs.pierce_count)?;
        writeln!(
            out,
            "Pierce time:       {} × {:.2} min = {:.2} min",
            inputs.pierce_count, inputs.pierce_time, t.piercing_time
        )?;
        writeln!(out, "Cutting perimeter: {:.2} mm", inputs.cutting_perimeter)?;
        writeln!(out, "Cutting speed:     {:.2} mm/min", inputs.cutting_speed)?;
        writeln!(
            out,
            "Cutting time:      {:.2} ÷ {:.2} = {:.2} min",
            inputs.cutting_perimeter, inputs.cutting_speed, t.cutting_time
        )?;
        writeln!(out, "Rapid length:      {:.2} mm", program.rapid_length)?;
        writeln!(
            out,
            "Bounding box:      X {:.2}..{:.2}, Y {:.2}..{:.2} ({:.2} × {:.2} mm)",
            bbox.min_x,
            bbox.max_x,
            bbox.min_y,
            bbox.max_y,
            bbox.width(),
            bbox.height()
        )?;
        writeln!(out, "Total time:        {}", self.formatted_time)?;

        if let Some(cmp) = &self.comparison {
            writeln!(
                out,
                "Reference time:    {} ({})",
                format_time(cmp.reference),
                cmp.format_difference()
            )?;
        }

        if !program.diagnostics.is_empty() {
            writeln!(out, "Skipped lines:     {}", program.diagnostics.len())?;
            for diagnostic in &program.diagnostics {
                writeln!(out, "  line {}: {}", diagnostic.line, diagnostic.message)?;
            }
        }

        Ok(())
    }
}
