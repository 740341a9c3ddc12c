// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # wardwatch
//!
//! A demo bedside patient-monitor dashboard for the terminal.
//!
//! Displays simulated vital signs for a selected patient, live-updating
//! on a fixed tick with per-metric deltas against the previous reading,
//! and lets a doctor push free-text updates that are published to a
//! per-patient MQTT topic, fire-and-forget.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         Application                            │
//! │  ┌─────────┐   ┌──────────┐   ┌─────────┐    ┌──────────┐     │
//! │  │  app    │──▶│  vitals  │   │   ui    │───▶│ Terminal │     │
//! │  │ (state) │   │(feed core)   │(rendering)   └──────────┘     │
//! │  └──┬───┬──┘   └──────────┘   └─────────┘                     │
//! │     │   │                                                      │
//! │     │   └──────▶ ┌─────────┐                                   │
//! │     │            │ records │◀── per-patient JSON documents     │
//! │     │            └─────────┘                                   │
//! │     ▼                                                          │
//! │  ┌─────────┐     link driver task                              │
//! │  │ channel │────────────────────▶ MQTT broker                  │
//! │  └─────────┘     (fire-and-forget)                             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, patient selection, the vitals tick,
//!   and update submission
//! - **[`vitals`]**: Synthetic reading generation and delta tracking,
//!   the live feed core
//! - **[`channel`]**: The MQTT update channel: lazy cached connection,
//!   status watch, at-most-once publishing
//! - **[`records`]**: Read-only patient record store (JSON documents)
//! - **[`data`]**: The in-memory care-team feed and timestamp helpers
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Design properties
//!
//! This is a demo, and two properties are load-bearing:
//!
//! - **Fail-soft everywhere.** A malformed reading yields "no delta"
//!   rather than an error; a dead broker yields a status-bar warning
//!   rather than a crash. Nothing in the core can stop the tick loop.
//! - **Fire-and-forget delivery.** Publishing hands an update to the
//!   client and moves on: at-most-once, no retry, no acknowledgement.
//!   The local feed keeps its copy regardless of delivery outcome.
//!
//! ## Usage
//!
//! ```bash
//! # Monitor patients from the default records directory
//! wardwatch --records patients
//!
//! # Jump straight to one patient, refreshing every 2 seconds
//! wardwatch --patient PT-1 --refresh 2
//! ```
//!
//! ### As a library
//!
//! ```
//! use wardwatch::vitals::{DeltaTracker, RawVitals, VitalsGenerator};
//!
//! let mut generator = VitalsGenerator::seeded(1);
//! let mut tracker = DeltaTracker::new();
//!
//! let first = RawVitals::from(&generator.generate());
//! assert!(tracker.advance(first).is_none()); // first reading: no delta
//!
//! let second = RawVitals::from(&generator.generate());
//! assert!(tracker.advance(second).is_some());
//! ```

pub mod app;
pub mod channel;
pub mod data;
pub mod events;
pub mod records;
pub mod settings;
pub mod ui;
pub mod vitals;

// Re-export main types for convenience
pub use app::{App, View};
pub use channel::{ChannelError, ChannelStatus, ConnectionHandle, DoctorMessage, MessageChannel};
pub use data::MessageLog;
pub use records::{PatientRecord, PatientStore, Phase};
pub use settings::{BrokerSettings, Settings};
pub use vitals::{BloodPressure, DeltaTracker, RawVitals, VitalReading, VitalsDelta, VitalsGenerator};
