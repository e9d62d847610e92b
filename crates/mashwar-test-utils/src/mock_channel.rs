// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notify channel for deterministic testing.
//!
//! `MockChannel` implements `NotifyChannel` with scripted outcomes and
//! captured deliveries for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mashwar_core::{
    BookingRequest, ChannelKind, ChannelOutcome, MashwarError, NotifyChannel,
};

/// A mock notify channel for testing.
///
/// Provides two queues:
/// - **scripted**: Outcomes queued via `push_result()` are returned by `notify()`,
///   one per call; an empty queue yields `Delivered`
/// - **deliveries**: Every `notify()` call is captured and retrievable via
///   `deliveries()`
pub struct MockChannel {
    kind: ChannelKind,
    scripted: Arc<Mutex<VecDeque<Result<ChannelOutcome, MashwarError>>>>,
    deliveries: Arc<Mutex<Vec<(BookingRequest, String)>>>,
}

impl MockChannel {
    /// Create a new mock channel that reports as `kind`.
    pub fn new(kind: ChannelKind) -> Self {
        Self {
            kind,
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            deliveries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue the result for a subsequent `notify()` call.
    pub async fn push_result(&self, result: Result<ChannelOutcome, MashwarError>) {
        self.scripted.lock().await.push_back(result);
    }

    /// Get all (booking, message) pairs passed to `notify()`.
    pub async fn deliveries(&self) -> Vec<(BookingRequest, String)> {
        self.deliveries.lock().await.clone()
    }

    /// Get the count of `notify()` calls.
    pub async fn delivery_count(&self) -> usize {
        self.deliveries.lock().await.len()
    }
}

#[async_trait]
impl NotifyChannel for MockChannel {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    async fn notify(
        &self,
        booking: &BookingRequest,
        message: &str,
    ) -> Result<ChannelOutcome, MashwarError> {
        self.deliveries
            .lock()
            .await
            .push((booking.clone(), message.to_string()));

        match self.scripted.lock().await.pop_front() {
            Some(result) => result,
            None => Ok(ChannelOutcome::Delivered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_booking;

    #[tokio::test]
    async fn notify_captures_deliveries() {
        let channel = MockChannel::new(ChannelKind::Email);
        let booking = sample_booking();

        let outcome = channel.notify(&booking, "hello").await.unwrap();
        assert_eq!(outcome, ChannelOutcome::Delivered);

        let deliveries = channel.deliveries().await;
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].0.name, booking.name);
        assert_eq!(deliveries[0].1, "hello");
    }

    #[tokio::test]
    async fn scripted_results_returned_in_order() {
        let channel = MockChannel::new(ChannelKind::Sheets);
        channel
            .push_result(Err(MashwarError::Channel {
                message: "down".into(),
                source: None,
            }))
            .await;
        channel
            .push_result(Ok(ChannelOutcome::Skipped {
                reason: "off".into(),
            }))
            .await;

        let booking = sample_booking();
        assert!(channel.notify(&booking, "m").await.is_err());
        assert!(matches!(
            channel.notify(&booking, "m").await.unwrap(),
            ChannelOutcome::Skipped { .. }
        ));
        // Script exhausted, defaults to Delivered.
        assert_eq!(
            channel.notify(&booking, "m").await.unwrap(),
            ChannelOutcome::Delivered
        );
        assert_eq!(channel.delivery_count().await, 3);
    }
}
