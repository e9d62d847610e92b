// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Mashwar workspace.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Raw booking fields as submitted over the wire, before validation.
///
/// Every field is optional here; the validator decides what is missing.
/// Field names follow the public JSON contract (camelCase).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBooking {
    pub name: Option<String>,
    pub start_point: Option<String>,
    pub end_point: Option<String>,
    pub trip_type: Option<String>,
    pub passengers: Option<String>,
    pub pickup_date: Option<String>,
    pub pickup_time: Option<String>,
    pub contact_number: Option<String>,
    pub special_requests: Option<String>,
}

/// Direction of a booked trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripType {
    #[serde(rename = "1-way")]
    OneWay,
    #[serde(rename = "2-way")]
    RoundTrip,
}

impl TripType {
    /// Parses the wire token. Exactly two tokens are accepted.
    pub fn parse(token: &str) -> Option<TripType> {
        match token {
            "1-way" => Some(TripType::OneWay),
            "2-way" => Some(TripType::RoundTrip),
            _ => None,
        }
    }

    /// Human-readable label used in every generated message and sheet row.
    /// The raw wire token never appears in output.
    pub fn label(&self) -> &'static str {
        match self {
            TripType::OneWay => "One Way",
            TripType::RoundTrip => "Round Trip",
        }
    }
}

/// A validated, normalized booking.
///
/// Either every required field is present and well-formed or the raw
/// submission was rejected in full; no partially valid value of this type
/// can exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub name: String,
    pub start_point: String,
    pub end_point: String,
    pub trip_type: TripType,
    pub passengers: String,
    pub pickup_date: String,
    pub pickup_time: String,
    /// Whitespace-stripped E.164-like number, when supplied.
    pub contact_number: Option<String>,
    pub special_requests: Option<String>,
}

/// Identifies one external notification integration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Sheets,
    Email,
    WhatsApp,
}

/// Result of one channel delivery attempt. Never persisted; feeds logging
/// and the per-submission report only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// The channel accepted the notification.
    Delivered,
    /// Nothing was sent; a manual-send link was produced instead.
    Prepared { url: String },
    /// The channel is not configured and was skipped without a network call.
    Skipped { reason: String },
    /// The channel was attempted and failed.
    Failed { error: String },
}

impl ChannelOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, ChannelOutcome::Delivered)
    }
}

impl fmt::Display for ChannelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelOutcome::Delivered => write!(f, "delivered"),
            ChannelOutcome::Prepared { url } => write!(f, "prepared (manual send): {url}"),
            ChannelOutcome::Skipped { reason } => write!(f, "skipped: {reason}"),
            ChannelOutcome::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}

/// One channel's outcome within a dispatch report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    pub channel: ChannelKind,
    pub outcome: ChannelOutcome,
}

/// Per-channel outcomes for one submission, in invocation order.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    entries: Vec<ChannelReport>,
}

impl DispatchReport {
    pub fn record(&mut self, channel: ChannelKind, outcome: ChannelOutcome) {
        self.entries.push(ChannelReport { channel, outcome });
    }

    pub fn entries(&self) -> &[ChannelReport] {
        &self.entries
    }

    /// Outcome for a given channel, if it was invoked this submission.
    pub fn outcome(&self, channel: ChannelKind) -> Option<&ChannelOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.channel == channel)
            .map(|entry| &entry.outcome)
    }

    pub fn delivered_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome.is_delivered())
            .count()
    }
}

/// The caller-facing result of a successful submission.
///
/// The success of a submission reflects only that the input was valid and a
/// confirmation could be constructed; it is deliberately decoupled from
/// whether any downstream channel delivered.
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    /// Display identifier: fixed prefix plus submission time in milliseconds.
    pub booking_id: String,
    /// Multi-line confirmation text shown to the customer.
    pub message: String,
    /// What each channel did with this booking.
    pub report: DispatchReport,
}
