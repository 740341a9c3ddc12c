//! Read-only patient record store.
//!
//! Records are per-patient JSON documents in a directory, loaded in full
//! at startup. A document that fails to read or parse is skipped with a
//! warning; only an unreadable directory is an error.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Display phase derived from a record's condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Good,
    Warn,
    Bad,
}

impl Phase {
    /// Map a condition string to its display phase. Unknown conditions
    /// render as a warning rather than pretending to be fine.
    pub fn from_condition(condition: &str) -> Self {
        match condition {
            "critical" => Phase::Bad,
            "watch" => Phase::Warn,
            "stable" | "discharged" => Phase::Good,
            _ => Phase::Warn,
        }
    }
}

/// Tracked per-patient metrics carried in the record document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientMetrics {
    #[serde(default)]
    pub medicine_taken: Vec<String>,
}

/// One patient's record document.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub full_name: String,
    pub age: u16,
    pub room_number: String,
    pub primary_diagnosis: String,
    #[serde(default)]
    pub doctor_notes: String,
    #[serde(default = "default_condition")]
    pub condition: String,
    #[serde(default)]
    pub summary: String,
    /// ISO-8601 timestamp of the last record update, if present.
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub metrics: PatientMetrics,
}

fn default_condition() -> String {
    "stable".to_string()
}

impl PatientRecord {
    pub fn phase(&self) -> Phase {
        Phase::from_condition(&self.condition)
    }
}

/// All records found in the records directory, sorted by patient id.
#[derive(Debug, Default)]
pub struct PatientStore {
    patients: Vec<PatientRecord>,
}

impl PatientStore {
    /// Load every `*.json` document in `dir`, skipping malformed ones.
    pub fn load(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("cannot read records directory {}", dir.display()))?;

        let mut patients = Vec::new();
        for entry in entries {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<PatientRecord>(&content) {
                    Ok(record) => patients.push(record),
                    Err(e) => warn!("skipping malformed record {}: {}", path.display(), e),
                },
                Err(e) => warn!("skipping unreadable record {}: {}", path.display(), e),
            }
        }

        patients.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(Self { patients })
    }

    /// Build a store from records already in hand (demos and tests).
    pub fn from_records(mut patients: Vec<PatientRecord>) -> Self {
        patients.sort_by(|a, b| a.id.cmp(&b.id));
        Self { patients }
    }

    /// All loaded records, sorted by id.
    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    /// Look up one record by patient id.
    pub fn get(&self, id: &str) -> Option<&PatientRecord> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_record(dir: &Path, name: &str, content: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn sample_record(id: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "full_name": "Jordan Avery",
                "age": 54,
                "room_number": "3B-12",
                "primary_diagnosis": "Community-acquired pneumonia",
                "doctor_notes": "Responding to antibiotics.",
                "condition": "stable",
                "summary": "Patient is in stable condition",
                "last_update": "2026-08-06T09:30:00Z",
                "metrics": {{ "medicine_taken": ["ceftriaxone", "azithromycin"] }}
            }}"#
        )
    }

    #[test]
    fn test_load_sorts_by_id() {
        let dir = TempDir::new().unwrap();
        write_record(dir.path(), "b.json", &sample_record("PT-2"));
        write_record(dir.path(), "a.json", &sample_record("PT-1"));

        let store = PatientStore::load(dir.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.patients()[0].id, "PT-1");
        assert_eq!(store.patients()[1].id, "PT-2");
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_record(dir.path(), "good.json", &sample_record("PT-1"));
        write_record(dir.path(), "bad.json", "{ not json");
        write_record(dir.path(), "notes.txt", "not a record at all");

        let store = PatientStore::load(dir.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.patients()[0].id, "PT-1");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        assert!(PatientStore::load(Path::new("/nonexistent/records")).is_err());
    }

    #[test]
    fn test_get_by_id() {
        let dir = TempDir::new().unwrap();
        write_record(dir.path(), "a.json", &sample_record("PT-1"));

        let store = PatientStore::load(dir.path()).unwrap();
        let record = store.get("PT-1").unwrap();
        assert_eq!(record.full_name, "Jordan Avery");
        assert_eq!(record.metrics.medicine_taken.len(), 2);
        assert!(store.get("PT-404").is_none());
    }

    #[test]
    fn test_optional_fields_default() {
        let dir = TempDir::new().unwrap();
        write_record(
            dir.path(),
            "min.json",
            r#"{
                "id": "PT-9",
                "full_name": "Sam Chen",
                "age": 41,
                "room_number": "2A-03",
                "primary_diagnosis": "Observation"
            }"#,
        );

        let store = PatientStore::load(dir.path()).unwrap();
        let record = store.get("PT-9").unwrap();
        assert_eq!(record.condition, "stable");
        assert!(record.metrics.medicine_taken.is_empty());
        assert!(record.last_update.is_none());
    }

    #[test]
    fn test_phase_mapping() {
        assert_eq!(Phase::from_condition("critical"), Phase::Bad);
        assert_eq!(Phase::from_condition("watch"), Phase::Warn);
        assert_eq!(Phase::from_condition("stable"), Phase::Good);
        assert_eq!(Phase::from_condition("discharged"), Phase::Good);
        assert_eq!(Phase::from_condition("unheard-of"), Phase::Warn);
    }
}
