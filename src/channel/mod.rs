//! Doctor-message delivery over the broker.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      wardwatch process                       │
//! │  ┌──────────┐ publish  ┌────────────────┐    ┌────────────┐  │
//! │  │ UI loop  │─────────▶│ MessageChannel │───▶│ AsyncClient│  │
//! │  └────┬─────┘          └───────┬────────┘    └─────┬──────┘  │
//! │       │ status (watch)         │ spawns            │         │
//! │       ▼                        ▼                   ▼         │
//! │  status bar              link driver task ───▶ MQTT broker   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UI thread only ever reads the status watch and hands updates to
//! the client's queue; the link driver owns all network I/O. Delivery is
//! at-most-once and unacknowledged.

mod error;
mod message;
mod publisher;

pub use error::ChannelError;
pub use message::DoctorMessage;
pub use publisher::{ChannelStatus, ConnectionHandle, MessageChannel};
