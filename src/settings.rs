//! Layered runtime settings.
//!
//! Broker parameters are configuration, not user input: built-in defaults,
//! overridden by an optional TOML file, overridden by `WARDWATCH_`-prefixed
//! environment variables (e.g. `WARDWATCH_BROKER__HOST`).

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Connection parameters for the care-team update broker.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerSettings {
    /// Broker host name.
    pub host: String,
    /// Broker port.
    pub port: u16,
    /// MQTT keepalive window in seconds.
    pub keepalive_secs: u64,
    /// How long to wait for the broker's CONNACK before giving up and
    /// returning a not-yet-connected handle.
    pub connect_timeout_ms: u64,
    /// Topic namespace; messages go to `<namespace>/<patient_id>`.
    pub namespace: String,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            keepalive_secs: 30,
            connect_timeout_ms: 3000,
            namespace: "wardwatch/patients".to_string(),
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub broker: BrokerSettings,
}

impl Settings {
    /// Load settings, layering an optional file and the environment over
    /// the defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("broker.host", "localhost")?
            .set_default("broker.port", 1883)?
            .set_default("broker.keepalive_secs", 30)?
            .set_default("broker.connect_timeout_ms", 3000)?
            .set_default("broker.namespace", "wardwatch/patients")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("WARDWATCH").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.broker.host, "localhost");
        assert_eq!(settings.broker.port, 1883);
        assert_eq!(settings.broker.keepalive_secs, 30);
        assert_eq!(settings.broker.connect_timeout_ms, 3000);
        assert_eq!(settings.broker.namespace, "wardwatch/patients");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[broker]\nhost = \"broker.ward.example\"\nport = 8883").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.broker.host, "broker.ward.example");
        assert_eq!(settings.broker.port, 8883);
        // untouched keys keep their defaults
        assert_eq!(settings.broker.namespace, "wardwatch/patients");
    }
}
