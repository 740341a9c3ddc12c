//! The doctor-update envelope published to the broker.

use serde::{Deserialize, Serialize};

use crate::data::timefmt;

/// A free-text update from the doctor to a patient's topic.
///
/// Field order matches the wire contract:
/// `{"patient_id", "role", "text", "timestamp"}`. The same value is
/// appended to the local feed, so a failed publish still leaves a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorMessage {
    pub patient_id: String,
    pub role: String,
    pub text: String,
    /// Local wall clock, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl DoctorMessage {
    /// Build an envelope stamped with the current local time.
    pub fn new(patient_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            role: "doctor".to_string(),
            text: text.into(),
            timestamp: timefmt::now_stamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let msg = DoctorMessage::new("PT-7", "Increase fluids");
        let value: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["patient_id"], "PT-7");
        assert_eq!(value["role"], "doctor");
        assert_eq!(value["text"], "Increase fluids");
        assert_eq!(value["timestamp"].as_str().unwrap().len(), 19);
    }

    #[test]
    fn test_envelope_round_trips() {
        let msg = DoctorMessage::new("PT-7", "NPO after midnight");
        let json = serde_json::to_string(&msg).unwrap();
        let back: DoctorMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
