//! The care-team feed: per-patient, in-memory, append-only.
//!
//! Every doctor update lands here before it is published, so the local
//! view keeps its record even when delivery fails. Nothing is persisted;
//! the log lives and dies with the process.

use std::collections::HashMap;

use crate::channel::DoctorMessage;

/// Per-patient append-only message log.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: HashMap<String, Vec<DoctorMessage>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to its patient's feed.
    pub fn append(&mut self, message: DoctorMessage) {
        self.entries.entry(message.patient_id.clone()).or_default().push(message);
    }

    /// All messages for a patient, oldest first.
    pub fn for_patient(&self, patient_id: &str) -> &[DoctorMessage] {
        self.entries.get(patient_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of messages across all patients.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_is_per_patient_and_ordered() {
        let mut log = MessageLog::new();
        log.append(DoctorMessage::new("PT-1", "first"));
        log.append(DoctorMessage::new("PT-2", "other ward"));
        log.append(DoctorMessage::new("PT-1", "second"));

        let feed = log.for_patient("PT-1");
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].text, "first");
        assert_eq!(feed[1].text, "second");
        assert_eq!(log.for_patient("PT-2").len(), 1);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_unknown_patient_has_empty_feed() {
        let log = MessageLog::new();
        assert!(log.for_patient("PT-404").is_empty());
    }
}
