//! Scalar inputs for a single TUV invocation.

use serde::{Deserialize, Serialize};

/// Floating point type used for all TUV inputs and rates
pub type FloatValue = f64;

/// Inputs for one TUV run
///
/// No defaults or plausibility checks are applied here; the values are passed
/// straight through to the binary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvocationParameters {
    /// Solar zenith angle
    /// unit: degrees
    pub zenith_angle: FloatValue,

    /// Altitude above sea level
    /// unit: km
    pub altitude: FloatValue,

    /// Air temperature
    /// unit: K
    pub temperature: FloatValue,
}

impl InvocationParameters {
    pub fn new(zenith_angle: FloatValue, altitude: FloatValue, temperature: FloatValue) -> Self {
        Self {
            zenith_angle,
            altitude,
            temperature,
        }
    }

    /// Positional arguments for the binary: temperature, altitude, zenith angle
    ///
    /// Each value is rendered as a `%6.3f` field.
    pub fn command_args(&self) -> [String; 3] {
        [
            format_field(self.temperature),
            format_field(self.altitude),
            format_field(self.zenith_angle),
        ]
    }
}

fn format_field(value: FloatValue) -> String {
    format!("{:6.3}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args_order_and_width() {
        let params = InvocationParameters::new(60.0, 0.0, 298.0);
        assert_eq!(params.command_args(), ["298.000", " 0.000", "60.000"]);
    }

    #[test]
    fn test_command_args_rounding() {
        let params = InvocationParameters::new(12.34567, 1.0005, -5.5);
        let [temperature, altitude, zenith] = params.command_args();
        assert_eq!(temperature, "-5.500");
        assert_eq!(zenith, "12.346");
        assert_eq!(altitude.len(), 6);
        assert!(altitude.starts_with(" 1.00"));
    }
}
