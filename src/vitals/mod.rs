//! The live vitals feed: synthetic generation and delta tracking.
//!
//! ## Data flow
//!
//! ```text
//! VitalsGenerator::generate()          (typed VitalReading)
//!        │
//!        ▼
//! RawVitals::from(&reading)            (rendered string form)
//!        │
//!        ▼
//! DeltaTracker::advance()  ──▶  Option<VitalsDelta>  (None = "no data")
//! ```
//!
//! The string form sits between generation and delta computation on
//! purpose: it is the shape that crosses serialization boundaries, so the
//! fail-soft parse path in [`DeltaTracker`] handles a state that can
//! actually occur.

mod delta;
mod generator;
mod reading;

pub use delta::{DeltaTracker, VitalsDelta};
pub use generator::VitalsGenerator;
pub use reading::{BloodPressure, RawVitals, VitalReading};
