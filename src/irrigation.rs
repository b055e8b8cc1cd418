use serde::Serialize;

const DRY_RAINFALL_MM: f64 = 60.0;
const HUMID_PERCENT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IrrigationLevel {
    High,
    Medium,
    Low,
}

impl IrrigationLevel {
    /// Coarse irrigation suggestion from raw (unscaled) rainfall and humidity.
    ///
    /// Low rainfall always wins; humidity only matters once rainfall is adequate.
    /// Both comparisons are strict.
    pub fn from_conditions(rainfall: f64, humidity: f64) -> Self {
        if rainfall < DRY_RAINFALL_MM {
            IrrigationLevel::High
        } else if humidity > HUMID_PERCENT {
            IrrigationLevel::Low
        } else {
            IrrigationLevel::Medium
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IrrigationLevel::{self, *};

    #[test]
    fn dry_soil_needs_high_irrigation_regardless_of_humidity() {
        for humidity in [0.0, 50.0, 70.0, 71.0, 100.0] {
            assert_eq!(IrrigationLevel::from_conditions(30.0, humidity), High);
            assert_eq!(IrrigationLevel::from_conditions(59.99, humidity), High);
        }
    }

    #[test]
    fn wet_and_humid_needs_low_irrigation() {
        assert_eq!(IrrigationLevel::from_conditions(60.0, 70.01), Low);
        assert_eq!(IrrigationLevel::from_conditions(202.9, 82.0), Low);
    }

    #[test]
    fn wet_and_dry_air_needs_medium_irrigation() {
        assert_eq!(IrrigationLevel::from_conditions(60.0, 10.0), Medium);
        assert_eq!(IrrigationLevel::from_conditions(150.0, 70.0), Medium);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(IrrigationLevel::from_conditions(60.0, 70.0), Medium);
    }

    #[test]
    fn serializes_as_capitalized_name() {
        assert_eq!(serde_json::to_string(&High).unwrap(), "\"High\"");
        assert_eq!(serde_json::to_string(&Medium).unwrap(), "\"Medium\"");
        assert_eq!(serde_json::to_string(&Low).unwrap(), "\"Low\"");
    }
}
