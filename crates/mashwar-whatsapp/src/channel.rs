// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The WhatsApp notify channel and the standalone relay entry point.

use std::time::Duration;

use async_trait::async_trait;
use mashwar_config::WhatsAppConfig;
use mashwar_core::{BookingRequest, ChannelKind, ChannelOutcome, MashwarError, NotifyChannel};
use tracing::{info, warn};

use crate::provider::Provider;

/// Result of a single relay delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// Message accepted by the configured provider API.
    Sent { target_phone: String },
    /// No provider available or direct send rejected; a manual-send link
    /// was produced instead.
    Prepared { target_phone: String, url: String },
}

/// WhatsApp messaging channel.
///
/// Wraps at most one [`Provider`]; without one, every delivery degrades to
/// a `wa.me` manual-send link rather than an error.
pub struct WhatsAppChannel {
    client: reqwest::Client,
    provider: Option<Provider>,
    default_recipient: String,
}

impl WhatsAppChannel {
    /// Creates the channel, selecting a provider from configured credentials.
    pub fn new(config: &WhatsAppConfig, timeout: Duration) -> Result<Self, MashwarError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MashwarError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let provider = Provider::from_config(config);
        match &provider {
            Some(p) => info!(provider = p.name(), "whatsapp provider selected"),
            None => info!("no whatsapp provider configured, using manual-link fallback"),
        }

        Ok(Self {
            client,
            provider,
            default_recipient: config.default_recipient.clone(),
        })
    }

    /// Name of the selected provider, if any.
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(Provider::name)
    }

    /// Replaces the provider (for testing against wiremock).
    #[cfg(test)]
    pub fn with_provider(mut self, provider: Option<Provider>) -> Self {
        self.provider = provider;
        self
    }

    /// Destination number: the caller's when given and non-empty, else the
    /// configured company number.
    fn target_phone(&self, phone: Option<&str>) -> String {
        match phone {
            Some(p) if !p.trim().is_empty() => p.trim().to_string(),
            _ => self.default_recipient.clone(),
        }
    }

    /// Delivers `message`, falling back to a `wa.me` link when direct
    /// delivery is unavailable or rejected. Provider failures never cascade
    /// to another provider.
    pub async fn deliver(
        &self,
        message: &str,
        phone: Option<&str>,
    ) -> Result<RelayOutcome, MashwarError> {
        let target = self.target_phone(phone);

        if let Some(provider) = &self.provider {
            match provider.send_text(&self.client, &target, message).await {
                Ok(()) => {
                    info!(provider = provider.name(), "whatsapp message sent");
                    return Ok(RelayOutcome::Sent {
                        target_phone: target,
                    });
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "direct send failed, preparing manual link"
                    );
                }
            }
        }

        let url = manual_send_url(&target, message)?;
        Ok(RelayOutcome::Prepared {
            target_phone: target,
            url,
        })
    }
}

/// Builds the `wa.me` click-to-chat link with the message as url-encoded text.
fn manual_send_url(target: &str, message: &str) -> Result<String, MashwarError> {
    let url = reqwest::Url::parse_with_params(
        &format!("https://wa.me/{target}"),
        &[("text", message)],
    )
    .map_err(|e| MashwarError::Internal(format!("failed to build wa.me link: {e}")))?;
    Ok(url.to_string())
}

#[async_trait]
impl NotifyChannel for WhatsAppChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::WhatsApp
    }

    async fn notify(
        &self,
        booking: &BookingRequest,
        message: &str,
    ) -> Result<ChannelOutcome, MashwarError> {
        match self
            .deliver(message, booking.contact_number.as_deref())
            .await?
        {
            RelayOutcome::Sent { .. } => Ok(ChannelOutcome::Delivered),
            RelayOutcome::Prepared { url, .. } => Ok(ChannelOutcome::Prepared { url }),
        }
    }
}
