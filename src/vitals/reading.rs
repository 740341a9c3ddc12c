//! Vital-sign reading types.
//!
//! A [`VitalReading`] is the typed form produced by the generator. The
//! [`RawVitals`] form holds every metric as the string it renders as on a
//! card; it is what crosses serialization boundaries (and what the delta
//! tracker consumes, since malformed text is representable there).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Blood pressure as a systolic/diastolic pair, displayed as "120/80".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

impl FromStr for BloodPressure {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "120/80"; anything after a second '/' fails the diastolic parse
        let (sys, dia) = s.split_once('/').unwrap_or((s, ""));
        Ok(Self {
            systolic: sys.trim().parse()?,
            diastolic: dia.trim().parse()?,
        })
    }
}

/// One synthetic snapshot of vital-sign values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    /// Heart rate in beats per minute.
    pub heart_rate: u8,
    /// Peripheral oxygen saturation in percent.
    pub spo2: u8,
    /// Body temperature in degrees Celsius, one decimal.
    pub temperature: f64,
    /// Respiratory rate in breaths per minute.
    pub respiratory_rate: u8,
    /// Blood pressure pair.
    pub blood_pressure: BloodPressure,
}

/// A reading in its rendered string form.
///
/// This is the shape the UI displays and the shape kept as the tracker's
/// "previous reading" slot, so a reading that came back malformed from a
/// serialization boundary is a state the delta path has to handle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawVitals {
    pub heart_rate: String,
    pub spo2: String,
    pub temperature: String,
    pub respiratory_rate: String,
    pub blood_pressure: String,
}

impl From<&VitalReading> for RawVitals {
    fn from(r: &VitalReading) -> Self {
        Self {
            heart_rate: r.heart_rate.to_string(),
            spo2: r.spo2.to_string(),
            temperature: format!("{:.1}", r.temperature),
            respiratory_rate: r.respiratory_rate.to_string(),
            blood_pressure: r.blood_pressure.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_pressure_display() {
        let bp = BloodPressure { systolic: 120, diastolic: 80 };
        assert_eq!(bp.to_string(), "120/80");
    }

    #[test]
    fn test_blood_pressure_parse() {
        let bp: BloodPressure = "118/76".parse().unwrap();
        assert_eq!(bp.systolic, 118);
        assert_eq!(bp.diastolic, 76);
    }

    #[test]
    fn test_blood_pressure_parse_rejects_garbage() {
        assert!("not-a-reading".parse::<BloodPressure>().is_err());
        assert!("120".parse::<BloodPressure>().is_err());
        assert!("120/".parse::<BloodPressure>().is_err());
        assert!("/80".parse::<BloodPressure>().is_err());
    }

    #[test]
    fn test_raw_vitals_formats_one_decimal() {
        let reading = VitalReading {
            heart_rate: 70,
            spo2: 98,
            temperature: 37.0,
            respiratory_rate: 16,
            blood_pressure: BloodPressure { systolic: 120, diastolic: 80 },
        };
        let raw = RawVitals::from(&reading);
        assert_eq!(raw.temperature, "37.0");
        assert_eq!(raw.blood_pressure, "120/80");
        assert_eq!(raw.heart_rate, "70");
    }
}
