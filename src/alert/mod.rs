//! Alert dispatch.
//!
//! Alerts leave the sentinel as a single command line,
//! `send <kind> <server identity> <payload>`, handed to the host's
//! [`CommandChannel`]. Delivery is fire-and-forget: a failure is logged and
//! never retried.

use std::fmt;
use std::sync::Arc;

use crate::host::CommandChannel;
use crate::identity::ServerIdentity;

/// Kinds of alert the sentinel emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// One or more required modules were missing at startup.
    ServerStartFailed,
    /// The sampled TPS fell to or below the threshold.
    TpsAlert,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::ServerStartFailed => "server_start_failed",
            AlertKind::TpsAlert => "tps_alert",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the command line for an alert.
pub fn alert_command(kind: AlertKind, identity: &ServerIdentity, payload: &str) -> String {
    format!("send {} {} {}", kind, identity, payload)
}

/// Sends alerts through the host's command channel.
#[derive(Clone)]
pub struct AlertDispatcher {
    channel: Arc<dyn CommandChannel>,
}

impl AlertDispatcher {
    pub fn new(channel: Arc<dyn CommandChannel>) -> Self {
        Self { channel }
    }

    /// Forward one alert. Returns whether the channel accepted it.
    pub fn dispatch(&self, kind: AlertKind, identity: &ServerIdentity, payload: &str) -> bool {
        let command = alert_command(kind, identity, payload);
        match self.channel.dispatch(&command) {
            Ok(()) => {
                tracing::info!("Dispatched {} for {}: {}", kind, identity, payload);
                true
            }
            Err(e) => {
                tracing::warn!("Could not dispatch {}: {}", kind, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingChannel;

    #[test]
    fn command_shape() {
        let identity = ServerIdentity::new("survival");
        assert_eq!(
            alert_command(AlertKind::TpsAlert, &identity, "12.5"),
            "send tps_alert survival 12.5"
        );
        assert_eq!(
            alert_command(AlertKind::ServerStartFailed, &identity, "A,B"),
            "send server_start_failed survival A,B"
        );
    }

    #[test]
    fn dispatch_forwards_to_channel() {
        let channel = Arc::new(RecordingChannel::new());
        let dispatcher = AlertDispatcher::new(channel.clone());

        let sent = dispatcher.dispatch(AlertKind::TpsAlert, &ServerIdentity::new("hub"), "9.0");

        assert!(sent);
        assert_eq!(channel.commands(), vec!["send tps_alert hub 9.0"]);
    }

    #[test]
    fn delivery_failure_is_not_retried() {
        let channel = Arc::new(RecordingChannel::failing());
        let dispatcher = AlertDispatcher::new(channel.clone());

        let sent = dispatcher.dispatch(AlertKind::TpsAlert, &ServerIdentity::new("hub"), "9.0");

        assert!(!sent);
        assert_eq!(channel.commands().len(), 1);
    }
}
