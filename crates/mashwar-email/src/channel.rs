// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The email notify channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mashwar_config::EmailConfig;
use mashwar_core::{BookingRequest, ChannelKind, ChannelOutcome, MashwarError, NotifyChannel};
use tracing::info;

use crate::message::build_message;
use crate::transport::{build_transport, MailTransport};

/// Email notification channel.
pub struct EmailChannel {
    transport: Arc<dyn MailTransport>,
    sender: String,
    admin_address: Option<String>,
}

impl EmailChannel {
    /// Creates the channel, selecting SMTP or the log-only stub from config.
    pub fn new(config: &EmailConfig, timeout: Duration) -> Result<Self, MashwarError> {
        let transport = build_transport(config, timeout)?;
        info!(transport = transport.name(), "email transport selected");

        Ok(Self {
            transport,
            sender: config.sender.clone(),
            admin_address: config.admin_address.clone(),
        })
    }

    /// Name of the selected transport.
    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Replaces the transport (for tests).
    #[cfg(test)]
    fn with_transport(mut self, transport: Arc<dyn MailTransport>) -> Self {
        self.transport = transport;
        self
    }
}

#[async_trait]
impl NotifyChannel for EmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Email
    }

    async fn notify(
        &self,
        booking: &BookingRequest,
        _message: &str,
    ) -> Result<ChannelOutcome, MashwarError> {
        let message = build_message(booking, &self.sender, self.admin_address.as_deref())?;
        self.transport.send(message).await?;

        if self.transport.is_live() {
            Ok(ChannelOutcome::Delivered)
        } else {
            Ok(ChannelOutcome::Skipped {
                reason: "smtp host not configured, message logged only".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettre::message::Message;
    use mashwar_core::TripType;
    use std::sync::Mutex;

    struct RecordingTransport {
        subjects: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingTransport {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                subjects: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn send(&self, message: Message) -> Result<(), MashwarError> {
            if self.fail {
                return Err(MashwarError::Channel {
                    message: "relay refused the message".to_string(),
                    source: None,
                });
            }
            let rendered = String::from_utf8(message.formatted()).unwrap();
            let subject = rendered
                .lines()
                .find(|l| l.starts_with("Subject: "))
                .unwrap()
                .to_string();
            self.subjects.lock().unwrap().push(subject);
            Ok(())
        }
    }

    fn test_booking() -> BookingRequest {
        BookingRequest {
            name: "Mona Ali".into(),
            start_point: "Maadi".into(),
            end_point: "Giza".into(),
            trip_type: TripType::RoundTrip,
            passengers: "4".into(),
            pickup_date: "2026-05-02".into(),
            pickup_time: "09:00".into(),
            contact_number: None,
            special_requests: None,
        }
    }

    #[tokio::test]
    async fn live_transport_send_reports_delivered() {
        let transport = RecordingTransport::new(false);
        let channel = EmailChannel::new(&EmailConfig::default(), Duration::from_secs(5))
            .unwrap()
            .with_transport(transport.clone());

        let outcome = channel.notify(&test_booking(), "ignored").await.unwrap();
        assert_eq!(outcome, ChannelOutcome::Delivered);

        let subjects = transport.subjects.lock().unwrap();
        assert_eq!(subjects.as_slice(), ["Subject: New Limousine Booking - Mona Ali"]);
    }

    #[tokio::test]
    async fn transport_failure_propagates_as_channel_error() {
        let channel = EmailChannel::new(&EmailConfig::default(), Duration::from_secs(5))
            .unwrap()
            .with_transport(RecordingTransport::new(true));

        let err = channel.notify(&test_booking(), "ignored").await.unwrap_err();
        assert!(err.to_string().contains("relay refused"), "got: {err}");
    }

    #[tokio::test]
    async fn log_transport_reports_skipped() {
        let channel = EmailChannel::new(&EmailConfig::default(), Duration::from_secs(5)).unwrap();
        let outcome = channel.notify(&test_booking(), "ignored").await.unwrap();
        match outcome {
            ChannelOutcome::Skipped { reason } => {
                assert!(reason.contains("smtp"), "got: {reason}");
            }
            other => panic!("expected Skipped, got {other}"),
        }
    }
}
