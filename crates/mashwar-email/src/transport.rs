// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound mail delivery seam.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Message;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use mashwar_config::EmailConfig;
use mashwar_core::MashwarError;
use tracing::info;

/// Delivery backend for composed mail messages.
#[async_trait]
pub trait MailTransport: Send + Sync + 'static {
    /// Transport name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether sends actually leave the process.
    fn is_live(&self) -> bool {
        true
    }

    async fn send(&self, message: Message) -> Result<(), MashwarError>;
}

/// Log-only transport used when no SMTP host is configured.
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    fn is_live(&self) -> bool {
        false
    }

    async fn send(&self, message: Message) -> Result<(), MashwarError> {
        info!(
            to = ?message.envelope().to(),
            "email composed, smtp not configured so nothing was sent"
        );
        Ok(())
    }
}

/// SMTP delivery over a TLS relay.
pub struct SmtpTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpTransport {
    /// Builds the relay transport from configuration.
    ///
    /// Credentials are attached only when both username and password are
    /// present.
    pub fn new(config: &EmailConfig, timeout: Duration) -> Result<Self, MashwarError> {
        let Some(host) = config.smtp_host.clone() else {
            return Err(MashwarError::Config(
                "smtp host is not configured".to_string(),
            ));
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
            .map_err(|e| MashwarError::Config(format!("invalid smtp host `{host}`: {e}")))?
            .timeout(Some(timeout));

        if let (Some(user), Some(pass)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            inner: builder.build(),
            host,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, message: Message) -> Result<(), MashwarError> {
        self.inner
            .send(message)
            .await
            .map_err(|e| MashwarError::Channel {
                message: format!("smtp delivery via {} failed: {e}", self.host),
                source: Some(Box::new(e)),
            })?;
        Ok(())
    }
}

/// Builds the transport implied by the configuration: SMTP when a host is
/// set, the log-only stub otherwise.
pub fn build_transport(
    config: &EmailConfig,
    timeout: Duration,
) -> Result<Arc<dyn MailTransport>, MashwarError> {
    match config.smtp_host {
        Some(_) => Ok(Arc::new(SmtpTransport::new(config, timeout)?)),
        None => Ok(Arc::new(LogTransport)),
    }
}
