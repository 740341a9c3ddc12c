//! Terminal rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`common`]: header bar, tab bar, status bar, help overlay
//! - [`monitor`]: patient card, vitals tiles, care-team feed, compose box
//! - [`patients`]: patient selection table
//! - [`theme`]: light/dark themes with terminal auto-detection

pub mod common;
pub mod monitor;
pub mod patients;
pub mod theme;

pub use theme::Theme;
