//! Delta computation between consecutive readings.
//!
//! The tracker owns the "previous reading" slot. Delta computation is
//! best-effort telemetry: a reading whose fields fail to parse yields no
//! delta rather than an error, and the slot still advances so the next
//! tick compares against the latest reading.

use super::reading::RawVitals;

/// Signed per-metric difference between two consecutive readings.
///
/// Blood pressure tracks the systolic component only; the diastolic delta
/// is not modeled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalsDelta {
    pub heart_rate: i32,
    pub spo2: i32,
    /// Rounded to one decimal place.
    pub temperature: f64,
    pub respiratory_rate: i32,
    pub systolic: i32,
}

/// Owns the previous-reading slot and computes deltas across ticks.
#[derive(Debug, Default)]
pub struct DeltaTracker {
    previous: Option<RawVitals>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the delta of `current` against the stored previous reading,
    /// then store `current` as the new previous.
    ///
    /// Returns `None` on the first call, and `None` when any field of
    /// either reading fails to parse: "no data", as distinct from a zero
    /// delta. The slot advances unconditionally in both cases.
    pub fn advance(&mut self, current: RawVitals) -> Option<VitalsDelta> {
        let delta = self.previous.as_ref().and_then(|prev| compute(&current, prev));
        self.previous = Some(current);
        delta
    }

    /// The most recently stored reading, if any.
    pub fn previous(&self) -> Option<&RawVitals> {
        self.previous.as_ref()
    }
}

fn compute(current: &RawVitals, previous: &RawVitals) -> Option<VitalsDelta> {
    let hr = parse_i32(&current.heart_rate)? - parse_i32(&previous.heart_rate)?;
    let spo2 = parse_i32(&current.spo2)? - parse_i32(&previous.spo2)?;
    let temp = parse_f64(&current.temperature)? - parse_f64(&previous.temperature)?;
    let resp = parse_i32(&current.respiratory_rate)? - parse_i32(&previous.respiratory_rate)?;
    let systolic = parse_systolic(&current.blood_pressure)? - parse_systolic(&previous.blood_pressure)?;

    Some(VitalsDelta {
        heart_rate: hr,
        spo2,
        temperature: (temp * 10.0).round() / 10.0,
        respiratory_rate: resp,
        systolic,
    })
}

fn parse_i32(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

fn parse_systolic(bp: &str) -> Option<i32> {
    bp.split('/').next().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(hr: &str, spo2: &str, temp: &str, resp: &str, bp: &str) -> RawVitals {
        RawVitals {
            heart_rate: hr.into(),
            spo2: spo2.into(),
            temperature: temp.into(),
            respiratory_rate: resp.into(),
            blood_pressure: bp.into(),
        }
    }

    #[test]
    fn test_first_reading_has_no_delta() {
        let mut tracker = DeltaTracker::new();
        assert!(tracker.advance(raw("70", "98", "36.7", "16", "120/80")).is_none());
        assert!(tracker.previous().is_some());
    }

    #[test]
    fn test_delta_between_consecutive_readings() {
        let mut tracker = DeltaTracker::new();
        tracker.advance(raw("70", "98", "36.7", "16", "120/80"));
        let delta = tracker.advance(raw("68", "99", "36.6", "16", "118/80")).unwrap();

        assert_eq!(delta.heart_rate, -2);
        assert_eq!(delta.spo2, 1);
        assert!((delta.temperature - (-0.1)).abs() < 1e-9);
        assert_eq!(delta.respiratory_rate, 0);
        assert_eq!(delta.systolic, -2);
    }

    #[test]
    fn test_temperature_delta_rounds_to_one_decimal() {
        let mut tracker = DeltaTracker::new();
        tracker.advance(raw("70", "98", "36.5", "16", "120/80"));
        let delta = tracker.advance(raw("70", "98", "36.8", "16", "120/80")).unwrap();
        assert!((delta.temperature - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_field_yields_none_but_advances() {
        let mut tracker = DeltaTracker::new();
        tracker.advance(raw("70", "98", "36.7", "16", "120/80"));

        // current reading is malformed: no delta, but the slot advances
        assert!(tracker.advance(raw("not-a-number", "98", "36.7", "16", "120/80")).is_none());
        assert_eq!(tracker.previous().unwrap().heart_rate, "not-a-number");

        // next well-formed reading compares against the malformed previous:
        // still no delta, and the slot advances again
        assert!(tracker.advance(raw("71", "98", "36.7", "16", "120/80")).is_none());
        assert_eq!(tracker.previous().unwrap().heart_rate, "71");

        // after two good readings in a row, deltas come back
        let delta = tracker.advance(raw("72", "98", "36.7", "16", "120/80")).unwrap();
        assert_eq!(delta.heart_rate, 1);
    }

    #[test]
    fn test_malformed_blood_pressure_yields_none() {
        let mut tracker = DeltaTracker::new();
        tracker.advance(raw("70", "98", "36.7", "16", "120/80"));
        assert!(tracker.advance(raw("70", "98", "36.7", "16", "garbage")).is_none());
    }

    #[test]
    fn test_delta_never_panics_on_empty_fields() {
        let mut tracker = DeltaTracker::new();
        tracker.advance(RawVitals::default());
        assert!(tracker.advance(RawVitals::default()).is_none());
    }

    #[test]
    fn test_generated_readings_round_trip_through_raw() {
        use crate::vitals::VitalsGenerator;

        let mut gen = VitalsGenerator::seeded(3);
        let mut tracker = DeltaTracker::new();
        assert!(tracker.advance(RawVitals::from(&gen.generate())).is_none());
        for _ in 0..50 {
            // well-formed readings always produce a delta after the first
            assert!(tracker.advance(RawVitals::from(&gen.generate())).is_some());
        }
    }
}
