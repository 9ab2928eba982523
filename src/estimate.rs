//! Cut-time estimation
//!
//! `total = pierces × pierce time + perimeter ÷ speed`, all in minutes.
//! [`calculate_cut_time`] is the bare formula; [`EstimateSettings`] resolves
//! and validates its inputs against a parsed program first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metrics::ParsedProgram;

/// Pierce time (minutes) used when none is configured: 30 seconds
pub const DEFAULT_PIERCE_TIME: f64 = 0.5;

/// Time breakdown in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutTime {
    pub piercing_time: f64,
    pub cutting_time: f64,
    pub total_time: f64,
}

/// Estimate cut time from pierce count and cutting perimeter
///
/// `cutting_speed` must be positive; validation is the caller's job (see
/// [`EstimateSettings::resolve`]).
pub fn calculate_cut_time(
    pierce_count: usize,
    pierce_time_per_unit: f64,
    cutting_perimeter: f64,
    cutting_speed: f64,
) -> CutTime {
    let piercing_time = pierce_count as f64 * pierce_time_per_unit;
    let cutting_time = cutting_perimeter / cutting_speed;

    CutTime {
        piercing_time,
        cutting_time,
        total_time: piercing_time + cutting_time,
    }
}

/// Render fractional minutes as `HH:MM:SS`, rounded to the nearest second
pub fn format_time(minutes: f64) -> String {
    let total_seconds = (minutes * 60.0).round() as u64;
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

/// Rejected estimate inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EstimateError {
    InvalidCuttingSpeed(f64),
    InvalidPierceTime(f64),
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateError::InvalidCuttingSpeed(speed) => {
                write!(f, "Cutting speed must be a positive number, got {}", speed)
            }
            EstimateError::InvalidPierceTime(time) => {
                write!(f, "Pierce time must be zero or more minutes, got {}", time)
            }
        }
    }
}

impl std::error::Error for EstimateError {}

/// Optional overrides for the estimate parameters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EstimateSettings {
    /// Minutes per pierce; defaults to [`DEFAULT_PIERCE_TIME`]
    pub pierce_time: Option<f64>,
    /// mm/min; defaults to the program's average cutting speed
    pub cutting_speed: Option<f64>,
}

/// Validated inputs for one estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInputs {
    pub pierce_count: usize,
    pub pierce_time: f64,
    pub cutting_perimeter: f64,
    pub cutting_speed: f64,
}

impl EstimateSettings {
    /// Combine overrides with a parsed program and validate the result
    pub fn resolve(&self, program: &ParsedProgram) -> Result<EstimateInputs, EstimateError> {
        let pierce_time = self.pierce_time.unwrap_or(DEFAULT_PIERCE_TIME);
        if !pierce_time.is_finite() || pierce_time < 0.0 {
            return Err(EstimateError::InvalidPierceTime(pierce_time));
        }

        let cutting_speed = self.cutting_speed.unwrap_or(program.average_cutting_speed);
        if !cutting_speed.is_finite() || cutting_speed <= 0.0 {
            return Err(EstimateError::InvalidCuttingSpeed(cutting_speed));
        }

        Ok(EstimateInputs {
            pierce_count: program.piercing_count,
            pierce_time,
            cutting_perimeter: program.cutting_perimeter,
            cutting_speed,
        })
    }
}

impl EstimateInputs {
    pub fn cut_time(&self) -> CutTime {
        calculate_cut_time(
            self.pierce_count,
            self.pierce_time,
            self.cutting_perimeter,
            self.cutting_speed,
        )
    }
}

/// Calculated total against an externally reported one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeComparison {
    pub reference: f64,
    pub calculated: f64,
}

impl TimeComparison {
    pub fn new(reference: f64, calculated: f64) -> Self {
        Self {
            reference,
            calculated,
        }
    }

    /// Calculated minus reference, in minutes
    pub fn difference(&self) -> f64 {
        self.calculated - self.reference
    }

    /// Signed difference such as `+1.23 min` or `-0.50 min`
    pub fn format_difference(&self) -> String {
        let diff = self.difference();
        let sign = if diff >= 0.0 { "+" } else { "" };
        format!("{}{:.2} min", sign, diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    #[test]
    fn test_cut_time_formula() {
        let t = calculate_cut_time(2, 0.5, 100.0, 50.0);
        assert_eq!(t.piercing_time, 1.0);
        assert_eq!(t.cutting_time, 2.0);
        assert_eq!(t.total_time, 3.0);
    }

    #[test]
    fn test_zero_pierces() {
        let t = calculate_cut_time(0, 0.5, 30.0, 60.0);
        assert_eq!(t.piercing_time, 0.0);
        assert_eq!(t.total_time, 0.5);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(3.0), "00:03:00");
        assert_eq!(format_time(79.17), "01:19:10");
        assert_eq!(format_time(0.0), "00:00:00");
        assert_eq!(format_time(0.5), "00:00:30");
        assert_eq!(format_time(6000.0), "100:00:00");
    }

    #[test]
    fn test_format_time_rounds_to_second() {
        // 59.6 s rounds up into the next minute
        assert_eq!(format_time(59.6 / 60.0), "00:01:00");
    }

    #[test]
    fn test_settings_defaults_from_program() {
        let program = parse_program("G00 X0\nG01 X100 F25\nG00 X200\nG01 X300\n");
        let inputs = EstimateSettings::default().resolve(&program).unwrap();

        assert_eq!(inputs.pierce_count, 2);
        assert_eq!(inputs.pierce_time, DEFAULT_PIERCE_TIME);
        assert_eq!(inputs.cutting_perimeter, 200.0);
        assert_eq!(inputs.cutting_speed, 25.0);
        assert_eq!(inputs.cut_time().total_time, 9.0);
    }

    #[test]
    fn test_settings_overrides() {
        let program = parse_program("G01 X100 F25\n");
        let settings = EstimateSettings {
            pierce_time: Some(1.0),
            cutting_speed: Some(50.0),
        };
        let t = settings.resolve(&program).unwrap().cut_time();

        assert_eq!(t.piercing_time, 1.0);
        assert_eq!(t.cutting_time, 2.0);
    }

    #[test]
    fn test_settings_reject_bad_speed() {
        let program = parse_program("G01 X100 F25\n");

        let zero = EstimateSettings {
            cutting_speed: Some(0.0),
            ..Default::default()
        };
        assert_eq!(zero.resolve(&program), Err(EstimateError::InvalidCuttingSpeed(0.0)));

        let negative_pierce = EstimateSettings {
            pierce_time: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(
            negative_pierce.resolve(&program),
            Err(EstimateError::InvalidPierceTime(-1.0))
        );
    }

    #[test]
    fn test_time_comparison() {
        let cmp = TimeComparison::new(78.28, 79.5);
        assert!((cmp.difference() - 1.22).abs() < 1e-9);
        assert_eq!(cmp.format_difference(), "+1.22 min");
        assert_eq!(TimeComparison::new(10.0, 9.5).format_difference(), "-0.50 min");
    }
}
