//! The update channel: a lazily-established, cached MQTT connection.
//!
//! The channel is an owned object injected into the app, not a process
//! global, but it keeps the single-connection behavior: the first publish
//! pays the connection cost and every later publish reuses the same
//! client. Delivery is fire-and-forget at QoS 0: `Ok` from [`publish`]
//! means the update was handed to the client, nothing more.
//!
//! [`publish`]: MessageChannel::publish

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, Incoming, MqttOptions, QoS};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

use crate::settings::BrokerSettings;

use super::{ChannelError, DoctorMessage};

/// How long the link driver waits after a broker error before letting the
/// client attempt the next poll.
const RETRY_PACING: Duration = Duration::from_secs(1);

/// Connection state as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelStatus {
    /// No connection has been attempted yet.
    Disconnected,
    /// Session opened, waiting for the broker's CONNACK.
    Connecting,
    /// The broker acknowledged the session.
    Connected,
    /// The link is down; the reason is shown in the status bar.
    Failed(String),
}

impl std::fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelStatus::Disconnected => write!(f, "disconnected"),
            ChannelStatus::Connecting => write!(f, "connecting"),
            ChannelStatus::Connected => write!(f, "connected"),
            ChannelStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A cheap, cloneable handle to the cached connection.
#[derive(Clone)]
pub struct ConnectionHandle {
    client: AsyncClient,
    status: watch::Receiver<ChannelStatus>,
    /// Unique per connection: `wardwatch-` plus a random suffix, so two
    /// handles from the same connection carry the same id.
    pub client_id: String,
}

impl ConnectionHandle {
    /// Latest status reported by the link driver.
    pub fn status(&self) -> ChannelStatus {
        self.status.borrow().clone()
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("client_id", &self.client_id)
            .field("status", &self.status())
            .finish()
    }
}

struct Connection {
    handle: ConnectionHandle,
    driver: JoinHandle<()>,
}

/// Publishes doctor updates to `<namespace>/<patient_id>`.
///
/// # Example
///
/// ```no_run
/// use wardwatch::{BrokerSettings, MessageChannel};
///
/// # tokio_test::block_on(async {
/// let mut channel = MessageChannel::new(BrokerSettings::default());
/// // First publish establishes the connection; later ones reuse it.
/// let _ = channel.publish("PT-001", "Increase fluids").await;
/// # });
/// ```
pub struct MessageChannel {
    settings: BrokerSettings,
    connection: Option<Connection>,
}

impl MessageChannel {
    pub fn new(settings: BrokerSettings) -> Self {
        Self { settings, connection: None }
    }

    /// Return the cached connection, establishing one on first use.
    ///
    /// A new connection opens a session with a fresh client id and waits
    /// for the broker's CONNACK up to the configured timeout. On timeout
    /// the handle is returned anyway with status still `Connecting`;
    /// publishes against it ride the client's own buffering.
    pub async fn get_or_connect(&mut self) -> ConnectionHandle {
        if let Some(ref conn) = self.connection {
            return conn.handle.clone();
        }

        let client_id = format!("wardwatch-{:08x}", rand::random::<u32>());
        let mut options = MqttOptions::new(&client_id, &self.settings.host, self.settings.port);
        options.set_keep_alive(Duration::from_secs(self.settings.keepalive_secs));

        let (client, eventloop) = AsyncClient::new(options, 10);
        let (status_tx, status_rx) = watch::channel(ChannelStatus::Connecting);

        info!(
            "opening broker session {} to {}:{}",
            client_id, self.settings.host, self.settings.port
        );
        let driver = tokio::spawn(drive_link(eventloop, status_tx));

        let handle = ConnectionHandle { client, status: status_rx, client_id };

        // Wait for the driver to report something other than Connecting,
        // bounded so a dead broker can't hold the caller indefinitely.
        let mut status = handle.status.clone();
        let wait = status.wait_for(|s| *s != ChannelStatus::Connecting);
        match time::timeout(Duration::from_millis(self.settings.connect_timeout_ms), wait).await {
            Ok(Ok(outcome)) => match &*outcome {
                ChannelStatus::Connected => info!("broker session established"),
                other => warn!("broker session not established: {}", other),
            },
            Ok(Err(_)) => warn!("broker link driver exited during connect"),
            Err(_) => warn!(
                "no CONNACK within {}ms, continuing unconfirmed",
                self.settings.connect_timeout_ms
            ),
        }

        self.connection = Some(Connection { handle: handle.clone(), driver });
        handle
    }

    /// Publish a doctor update for a patient, fire-and-forget.
    ///
    /// Empty ids and empty or whitespace-only text are rejected before
    /// any envelope is built or any connection attempted. `Ok` means the
    /// update was dispatched locally; no delivery acknowledgement is
    /// awaited and none is recorded.
    pub async fn publish(&mut self, patient_id: &str, text: &str) -> Result<(), ChannelError> {
        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            return Err(ChannelError::EmptyPatientId);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ChannelError::EmptyText);
        }
        self.dispatch(&DoctorMessage::new(patient_id, text)).await
    }

    /// Dispatch an already-built envelope.
    ///
    /// Used by the app so the value appended to the local feed and the
    /// value on the wire are one and the same.
    pub async fn dispatch(&mut self, message: &DoctorMessage) -> Result<(), ChannelError> {
        if message.patient_id.trim().is_empty() {
            return Err(ChannelError::EmptyPatientId);
        }
        if message.text.trim().is_empty() {
            return Err(ChannelError::EmptyText);
        }

        let handle = self.get_or_connect().await;

        let payload = serde_json::to_vec(message)?;
        let topic = format!("{}/{}", self.settings.namespace, message.patient_id);

        handle
            .client
            .try_publish(&topic, QoS::AtMostOnce, false, payload)
            .map_err(|e| ChannelError::Dispatch(e.to_string()))?;

        debug!("dispatched update to {}", topic);
        Ok(())
    }

    /// Latest connection status, `Disconnected` before first use.
    pub fn status(&self) -> ChannelStatus {
        self.connection
            .as_ref()
            .map(|c| c.handle.status())
            .unwrap_or(ChannelStatus::Disconnected)
    }

    /// Tear the connection down. Safe to call when never connected.
    pub fn close(&mut self) {
        if let Some(conn) = self.connection.take() {
            let _ = conn.handle.client.try_disconnect();
            conn.driver.abort();
            info!("broker session {} closed", conn.handle.client_id);
        }
    }
}

impl Drop for MessageChannel {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for MessageChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageChannel")
            .field("broker", &format!("{}:{}", self.settings.host, self.settings.port))
            .field("status", &self.status())
            .finish()
    }
}

/// Drive the MQTT event loop, mirroring its state into the status watch.
///
/// Reconnection is the client's own concern: polling after an error makes
/// it retry, paced here so a dead broker doesn't spin the task. There is
/// no publish retry on top of that.
async fn drive_link(mut eventloop: EventLoop, status: watch::Sender<ChannelStatus>) {
    loop {
        if status.is_closed() {
            return;
        }
        match eventloop.poll().await {
            Ok(Event::Incoming(Incoming::ConnAck(_))) => {
                debug!("broker acknowledged session");
                status.send_replace(ChannelStatus::Connected);
            }
            Ok(_) => {}
            Err(e) => {
                let reason = e.to_string();
                // log transitions, not every paced retry
                if !matches!(&*status.borrow(), ChannelStatus::Failed(_)) {
                    warn!("broker link error: {}", reason);
                }
                status.send_replace(ChannelStatus::Failed(reason));
                time::sleep(RETRY_PACING).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Settings pointing at a port nothing listens on, with a short
    /// connect bound so tests don't sit out the full timeout.
    fn offline_settings() -> BrokerSettings {
        BrokerSettings {
            host: "127.0.0.1".to_string(),
            port: 18999,
            keepalive_secs: 5,
            connect_timeout_ms: 100,
            namespace: "wardwatch/patients".to_string(),
        }
    }

    #[tokio::test]
    async fn test_publish_rejects_empty_patient_id() {
        let mut channel = MessageChannel::new(offline_settings());
        let result = channel.publish("", "text").await;
        assert!(matches!(result, Err(ChannelError::EmptyPatientId)));
        // rejected before any connection attempt
        assert_eq!(channel.status(), ChannelStatus::Disconnected);
    }

    #[tokio::test]
    async fn test_publish_rejects_empty_text() {
        let mut channel = MessageChannel::new(offline_settings());
        assert!(matches!(channel.publish("PT-1", "").await, Err(ChannelError::EmptyText)));
        assert!(matches!(channel.publish("PT-1", "   \t").await, Err(ChannelError::EmptyText)));
        assert_eq!(channel.status(), ChannelStatus::Disconnected);
    }

    #[tokio::test]
    async fn test_get_or_connect_reuses_the_connection() {
        let mut channel = MessageChannel::new(offline_settings());
        let first = channel.get_or_connect().await;
        let second = channel.get_or_connect().await;
        assert_eq!(first.client_id, second.client_id);
    }

    #[tokio::test]
    async fn test_publish_while_disconnected_does_not_panic() {
        let mut channel = MessageChannel::new(offline_settings());
        let result = channel.publish("PT-7", "Increase fluids").await;

        // fire-and-forget: the update is queued locally or refused, never
        // a panic and never a hang past the connect bound
        assert!(matches!(result, Ok(()) | Err(ChannelError::Dispatch(_))));

        // the failure is status-visible
        assert_ne!(channel.status(), ChannelStatus::Connected);
        assert_ne!(channel.status(), ChannelStatus::Disconnected);
    }

    #[tokio::test]
    async fn test_close_resets_status() {
        let mut channel = MessageChannel::new(offline_settings());
        let _ = channel.get_or_connect().await;
        channel.close();
        assert_eq!(channel.status(), ChannelStatus::Disconnected);
    }
}
