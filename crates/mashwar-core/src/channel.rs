// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification channel trait implemented by every outbound adapter.

use async_trait::async_trait;

use crate::error::MashwarError;
use crate::types::{BookingRequest, ChannelKind, ChannelOutcome};

/// One external notification integration (spreadsheet, email, messaging).
///
/// Implementations translate a validated booking into a channel-specific
/// outbound call. Errors are returned, not swallowed; the dispatcher decides
/// how a failure is reported. A `Config` error means the channel was never
/// attempted (missing credentials), anything else means delivery failed.
#[async_trait]
pub trait NotifyChannel: Send + Sync + 'static {
    /// Which channel this adapter serves.
    fn kind(&self) -> ChannelKind;

    /// Delivers one booking notification.
    ///
    /// `message` is the rendered confirmation text; adapters that build
    /// their own payload from the booking fields ignore it.
    async fn notify(
        &self,
        booking: &BookingRequest,
        message: &str,
    ) -> Result<ChannelOutcome, MashwarError>;
}
