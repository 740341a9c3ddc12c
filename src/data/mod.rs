//! In-memory session data: the care-team feed and timestamp helpers.

pub mod feed;
pub mod timefmt;

pub use feed::MessageLog;
