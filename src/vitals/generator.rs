//! Synthetic vitals generation.
//!
//! Each call resamples every field independently within a narrow "healthy"
//! range, so the demo stays visually stable from tick to tick. This is not
//! a clinical simulator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::reading::{BloodPressure, VitalReading};

/// Produces one synthetic [`VitalReading`] per call.
///
/// Stateless apart from its RNG; the caller owns the previous-reading slot
/// (see [`DeltaTracker`](super::DeltaTracker)).
#[derive(Debug)]
pub struct VitalsGenerator {
    rng: StdRng,
}

impl Default for VitalsGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalsGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Create a generator with a fixed seed, for deterministic tests.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Generate a fresh reading. Cannot fail: all draws are bounded.
    pub fn generate(&mut self) -> VitalReading {
        let temperature: f64 = self.rng.gen_range(36.5..=37.0);
        VitalReading {
            heart_rate: self.rng.gen_range(68..=72),
            spo2: self.rng.gen_range(96..=99),
            // one-decimal precision, matching how the value is displayed
            temperature: (temperature * 10.0).round() / 10.0,
            respiratory_rate: self.rng.gen_range(14..=18),
            blood_pressure: BloodPressure {
                systolic: self.rng.gen_range(115..=125),
                diastolic: self.rng.gen_range(75..=85),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_stay_in_range() {
        let mut gen = VitalsGenerator::seeded(7);
        for _ in 0..500 {
            let r = gen.generate();
            assert!((68..=72).contains(&r.heart_rate));
            assert!((96..=99).contains(&r.spo2));
            assert!((36.5..=37.0).contains(&r.temperature));
            assert!((14..=18).contains(&r.respiratory_rate));
            assert!((115..=125).contains(&r.blood_pressure.systolic));
            assert!((75..=85).contains(&r.blood_pressure.diastolic));
        }
    }

    #[test]
    fn test_temperature_has_one_decimal() {
        let mut gen = VitalsGenerator::seeded(42);
        for _ in 0..500 {
            let t = gen.generate().temperature;
            let scaled = t * 10.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "temperature {} has more than one decimal",
                t
            );
        }
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let mut a = VitalsGenerator::seeded(99);
        let mut b = VitalsGenerator::seeded(99);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }
}
