// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submission dispatcher fanning a validated booking out to every
//! notification channel.
//!
//! Channels are invoked sequentially in registration order. A failing
//! channel never aborts the sequence: its error is logged, mapped into the
//! per-submission report, and the remaining channels still run.

mod confirmation;

use std::sync::Arc;

use tracing::{info, warn};

use mashwar_config::CompanyConfig;
use mashwar_core::{
    BookingConfirmation, BookingRequest, ChannelOutcome, DispatchReport, NotifyChannel,
};

pub use confirmation::{booking_id, confirmation_text};

/// Orchestrates channel deliveries for one booking submission.
pub struct Dispatcher {
    company: CompanyConfig,
    channels: Vec<Arc<dyn NotifyChannel>>,
}

impl Dispatcher {
    /// Create a dispatcher over the given channels.
    ///
    /// Channels run in the order given; the conventional order is
    /// spreadsheet, email, messaging.
    pub fn new(company: CompanyConfig, channels: Vec<Arc<dyn NotifyChannel>>) -> Self {
        Self { company, channels }
    }

    /// Dispatches one validated booking to every channel and composes the
    /// confirmation.
    ///
    /// Infallible: channel errors are folded into the report. A `Config`
    /// error means the channel never attempted delivery and is reported as
    /// skipped; any other error is reported as failed.
    pub async fn dispatch(&self, booking: &BookingRequest) -> BookingConfirmation {
        let booking_id = confirmation::booking_id(&self.company.booking_prefix);
        let message = confirmation::confirmation_text(booking, &self.company);

        let mut report = DispatchReport::default();
        for channel in &self.channels {
            let kind = channel.kind();
            let outcome = match channel.notify(booking, &message).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_config() => {
                    info!(channel = %kind, reason = %e, "channel unconfigured, skipping");
                    ChannelOutcome::Skipped {
                        reason: e.to_string(),
                    }
                }
                Err(e) => {
                    warn!(channel = %kind, error = %e, "channel delivery failed");
                    ChannelOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            report.record(kind, outcome);
        }

        info!(
            booking_id = %booking_id,
            delivered = report.delivered_count(),
            channels = report.entries().len(),
            "booking dispatched"
        );

        BookingConfirmation {
            booking_id,
            message,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mashwar_core::{ChannelKind, MashwarError};
    use mashwar_test_utils::{MockChannel, sample_booking};

    fn three_channels() -> (Arc<MockChannel>, Arc<MockChannel>, Arc<MockChannel>) {
        (
            Arc::new(MockChannel::new(ChannelKind::Sheets)),
            Arc::new(MockChannel::new(ChannelKind::Email)),
            Arc::new(MockChannel::new(ChannelKind::WhatsApp)),
        )
    }

    #[tokio::test]
    async fn dispatch_invokes_every_channel_in_order() {
        let (sheets, email, whatsapp) = three_channels();
        let dispatcher = Dispatcher::new(
            CompanyConfig::default(),
            vec![sheets.clone(), email.clone(), whatsapp.clone()],
        );

        let confirmation = dispatcher.dispatch(&sample_booking()).await;

        assert_eq!(sheets.delivery_count().await, 1);
        assert_eq!(email.delivery_count().await, 1);
        assert_eq!(whatsapp.delivery_count().await, 1);

        let kinds: Vec<_> = confirmation
            .report
            .entries()
            .iter()
            .map(|entry| entry.channel)
            .collect();
        assert_eq!(
            kinds,
            vec![ChannelKind::Sheets, ChannelKind::Email, ChannelKind::WhatsApp]
        );
        assert_eq!(confirmation.report.delivered_count(), 3);
    }

    #[tokio::test]
    async fn failing_channel_does_not_abort_the_rest() {
        let (sheets, email, whatsapp) = three_channels();
        sheets
            .push_result(Err(MashwarError::Channel {
                message: "Sheets API returned 403".to_string(),
                source: None,
            }))
            .await;

        let dispatcher = Dispatcher::new(
            CompanyConfig::default(),
            vec![sheets.clone(), email.clone(), whatsapp.clone()],
        );
        let confirmation = dispatcher.dispatch(&sample_booking()).await;

        assert_eq!(email.delivery_count().await, 1);
        assert_eq!(whatsapp.delivery_count().await, 1);

        match confirmation.report.outcome(ChannelKind::Sheets) {
            Some(ChannelOutcome::Failed { error }) => {
                assert!(error.contains("Sheets API returned 403"));
            }
            other => panic!("expected failed outcome, got {other:?}"),
        }
        assert_eq!(confirmation.report.delivered_count(), 2);
    }

    #[tokio::test]
    async fn config_error_is_reported_as_skipped() {
        let (sheets, email, whatsapp) = three_channels();
        sheets
            .push_result(Err(MashwarError::Config(
                "sheets access token is not configured".to_string(),
            )))
            .await;

        let dispatcher = Dispatcher::new(
            CompanyConfig::default(),
            vec![sheets, email, whatsapp],
        );
        let confirmation = dispatcher.dispatch(&sample_booking()).await;

        assert!(matches!(
            confirmation.report.outcome(ChannelKind::Sheets),
            Some(ChannelOutcome::Skipped { .. })
        ));
    }

    #[tokio::test]
    async fn prepared_outcome_passes_through() {
        let (sheets, email, whatsapp) = three_channels();
        whatsapp
            .push_result(Ok(ChannelOutcome::Prepared {
                url: "https://wa.me/201283051333?text=hi".to_string(),
            }))
            .await;

        let dispatcher = Dispatcher::new(
            CompanyConfig::default(),
            vec![sheets, email, whatsapp],
        );
        let confirmation = dispatcher.dispatch(&sample_booking()).await;

        match confirmation.report.outcome(ChannelKind::WhatsApp) {
            Some(ChannelOutcome::Prepared { url }) => {
                assert!(url.starts_with("https://wa.me/"));
            }
            other => panic!("expected prepared outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn channels_receive_the_rendered_confirmation() {
        let (sheets, email, whatsapp) = three_channels();
        let dispatcher = Dispatcher::new(
            CompanyConfig::default(),
            vec![sheets, email, whatsapp.clone()],
        );

        let booking = sample_booking();
        let confirmation = dispatcher.dispatch(&booking).await;

        let deliveries = whatsapp.deliveries().await;
        assert_eq!(deliveries[0].1, confirmation.message);
        assert_eq!(deliveries[0].0.name, booking.name);
        assert!(confirmation.message.starts_with("🚗 *Booking Confirmation*"));
    }

    #[tokio::test]
    async fn booking_id_uses_configured_prefix() {
        let company = CompanyConfig {
            booking_prefix: "NR".to_string(),
            ..CompanyConfig::default()
        };
        let dispatcher = Dispatcher::new(company, vec![]);

        let confirmation = dispatcher.dispatch(&sample_booking()).await;
        assert!(confirmation.booking_id.starts_with("NR"));
        assert!(confirmation.report.entries().is_empty());
    }
}
