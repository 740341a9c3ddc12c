//! Application state and navigation logic.

use std::time::Instant;

use tokio::runtime::Handle;
use tracing::warn;

use crate::channel::{ChannelStatus, DoctorMessage, MessageChannel};
use crate::data::{timefmt, MessageLog};
use crate::records::{PatientRecord, PatientStore};
use crate::ui::Theme;
use crate::vitals::{DeltaTracker, RawVitals, VitalsDelta, VitalsGenerator};

/// The current view in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Patient selection list.
    Patients,
    /// Live monitor for the selected patient.
    Monitor,
}

impl View {
    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Patients => "Patients",
            View::Monitor => "Monitor",
        }
    }
}

/// Main application state.
///
/// All mutable state lives here and is touched only by the UI thread;
/// the broker link runs on the tokio runtime and is reached through
/// [`MessageChannel`].
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Patient data
    store: PatientStore,
    pub selected_patient_index: usize,
    current_id: Option<String>,

    // Live vitals feed
    generator: VitalsGenerator,
    tracker: DeltaTracker,
    pub vitals: Option<RawVitals>,
    pub deltas: Option<VitalsDelta>,
    pub last_vitals_at: Option<String>,

    // Care-team updates
    pub log: MessageLog,
    channel: MessageChannel,
    rt: Handle,

    // Compose input
    pub compose_active: bool,
    pub compose_text: String,

    // UI
    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App over a loaded record store and update channel.
    ///
    /// `rt` is the runtime the broker link runs on; the app only blocks
    /// on it for the bounded connect wait during a publish.
    pub fn new(store: PatientStore, channel: MessageChannel, rt: Handle) -> Self {
        Self {
            running: true,
            current_view: View::Patients,
            show_help: false,
            store,
            selected_patient_index: 0,
            current_id: None,
            generator: VitalsGenerator::new(),
            tracker: DeltaTracker::new(),
            vitals: None,
            deltas: None,
            last_vitals_at: None,
            log: MessageLog::new(),
            channel,
            rt,
            compose_active: false,
            compose_text: String::new(),
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// The record store backing the patient list.
    pub fn store(&self) -> &PatientStore {
        &self.store
    }

    /// The currently monitored patient's record, if one is selected.
    pub fn current_patient(&self) -> Option<&PatientRecord> {
        self.current_id.as_deref().and_then(|id| self.store.get(id))
    }

    /// Latest broker link status for the status bar.
    pub fn channel_status(&self) -> ChannelStatus {
        self.channel.status()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Move the patient-list selection down.
    pub fn select_next(&mut self) {
        let max = self.store.len().saturating_sub(1);
        self.selected_patient_index = (self.selected_patient_index + 1).min(max);
    }

    /// Move the patient-list selection up.
    pub fn select_prev(&mut self) {
        self.selected_patient_index = self.selected_patient_index.saturating_sub(1);
    }

    /// Open the monitor for the patient at the current selection.
    pub fn open_selected_patient(&mut self) {
        let Some(record) = self.store.patients().get(self.selected_patient_index) else {
            return;
        };
        let id = record.id.clone();
        self.open_patient(&id);
    }

    /// Open the monitor for a patient by id. Resets the vitals feed so
    /// no delta is computed across two different patients.
    pub fn open_patient(&mut self, id: &str) -> bool {
        if self.store.get(id).is_none() {
            self.set_status_message(format!("No record for patient {}", id));
            return false;
        }
        self.current_id = Some(id.to_string());
        self.tracker = DeltaTracker::new();
        self.vitals = None;
        self.deltas = None;
        self.last_vitals_at = None;
        self.current_view = View::Monitor;
        self.tick();
        true
    }

    /// Leave the monitor and return to the patient list.
    pub fn go_back(&mut self) {
        if self.compose_active {
            self.cancel_compose();
            return;
        }
        if self.current_view == View::Monitor {
            self.current_view = View::Patients;
        }
    }

    /// One step of the vitals feed: generate a reading, compute its delta
    /// against the previous one, and remember it for rendering.
    ///
    /// Driven by the UI loop on its refresh interval; tests call it
    /// directly. Does nothing until a patient is selected.
    pub fn tick(&mut self) {
        if self.current_id.is_none() {
            return;
        }
        let raw = RawVitals::from(&self.generator.generate());
        self.deltas = self.tracker.advance(raw.clone());
        self.vitals = Some(raw);
        self.last_vitals_at = Some(timefmt::now_stamp());
    }

    /// Start composing an update for the monitored patient.
    pub fn start_compose(&mut self) {
        if self.current_view == View::Monitor && self.current_id.is_some() {
            self.compose_active = true;
        }
    }

    /// Abandon the compose input, discarding its text.
    pub fn cancel_compose(&mut self) {
        self.compose_active = false;
        self.compose_text.clear();
    }

    /// Append a character to the compose input.
    pub fn compose_push(&mut self, c: char) {
        self.compose_text.push(c);
    }

    /// Remove the last character from the compose input.
    pub fn compose_pop(&mut self) {
        self.compose_text.pop();
    }

    /// Submit the composed update: record it in the local feed, then
    /// publish it fire-and-forget.
    ///
    /// Delivery failure degrades to a status-bar warning; the feed keeps
    /// its copy either way. Nothing here can stop the tick loop.
    pub fn send_update(&mut self) {
        let Some(id) = self.current_id.clone() else {
            return;
        };
        let text = self.compose_text.trim().to_string();
        if text.is_empty() {
            self.set_status_message("Nothing to send".to_string());
            self.cancel_compose();
            return;
        }

        let message = DoctorMessage::new(id, text);
        self.log.append(message.clone());

        match self.rt.block_on(self.channel.dispatch(&message)) {
            Ok(()) => self.set_status_message("Update sent".to_string()),
            Err(e) => {
                warn!("update for {} not delivered: {}", message.patient_id, e);
                self.set_status_message(format!("Saved locally; delivery failed: {}", e));
            }
        }
        self.cancel_compose();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Tear down the broker link. Called once on the way out.
    pub fn shutdown(&mut self) {
        self.channel.close();
    }
}
