// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Google Sheets v4 values API.
//!
//! Provides [`SheetsChannel`] which appends booking rows with bearer
//! authentication and keeps the header row in shape before each append.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use mashwar_config::SheetsConfig;
use mashwar_core::{BookingRequest, ChannelKind, ChannelOutcome, MashwarError, NotifyChannel};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Base URL for the Google Sheets API.
const API_BASE_URL: &str = "https://sheets.googleapis.com";

/// Range covering the booking log columns.
const APPEND_RANGE: &str = "Sheet1!A:K";

/// Range holding the header row.
const HEADER_RANGE: &str = "Sheet1!A1:K1";

/// Column headers, in booking row order.
const HEADER_ROW: [&str; 11] = [
    "Timestamp",
    "Name",
    "Contact Number",
    "Pick-up Location",
    "Drop-off Location",
    "Trip Type",
    "Passengers",
    "Pick-up Date",
    "Pick-up Time",
    "Special Requests",
    "Status",
];

/// Status cell written for freshly appended bookings.
const NEW_ROW_STATUS: &str = "New";

#[derive(Serialize)]
struct ValueRange {
    values: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct CellRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Booking log channel backed by a Google Sheets spreadsheet.
///
/// Credentials are optional at construction; delivery reports a
/// configuration error when they are absent so the dispatcher can skip
/// the channel instead of failing the booking.
#[derive(Debug, Clone)]
pub struct SheetsChannel {
    client: reqwest::Client,
    spreadsheet_id: Option<String>,
    access_token: Option<String>,
    base_url: String,
}

impl SheetsChannel {
    /// Creates a new Sheets channel from the given configuration.
    ///
    /// Absent credentials are tolerated here; they surface as a
    /// configuration error on the first delivery attempt.
    pub fn new(config: &SheetsConfig, timeout: Duration) -> Result<Self, MashwarError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MashwarError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            spreadsheet_id: config.spreadsheet_id.clone(),
            access_token: config.access_token.clone(),
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn append_url(&self, spreadsheet_id: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{spreadsheet_id}/values/{APPEND_RANGE}:append?valueInputOption=USER_ENTERED",
            self.base_url
        )
    }

    fn header_read_url(&self, spreadsheet_id: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{spreadsheet_id}/values/{HEADER_RANGE}",
            self.base_url
        )
    }

    fn header_write_url(&self, spreadsheet_id: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{spreadsheet_id}/values/{HEADER_RANGE}?valueInputOption=USER_ENTERED",
            self.base_url
        )
    }

    /// Checks the header row and rewrites it when absent or stale.
    ///
    /// Best effort: failures are logged and never block the append, so a
    /// sheet with unusual permissions still receives booking rows.
    async fn ensure_header_row(&self, spreadsheet_id: &str, token: &str) {
        let existing = self
            .client
            .get(self.header_read_url(spreadsheet_id))
            .bearer_auth(token)
            .send()
            .await;

        match existing {
            Ok(response) if response.status().is_success() => {
                if let Ok(range) = response.json::<CellRange>().await {
                    let first_row = range.values.first().map(Vec::as_slice).unwrap_or(&[]);
                    if header_row_matches(first_row) {
                        debug!("header row already in place");
                        return;
                    }
                }
            }
            Ok(response) => {
                debug!(status = %response.status(), "header row check returned error status");
            }
            Err(e) => {
                warn!(error = %e, "header row check failed");
            }
        }

        let header: Vec<String> = HEADER_ROW.iter().map(|h| h.to_string()).collect();
        let body = ValueRange {
            values: vec![header],
        };

        let update = self
            .client
            .put(self.header_write_url(spreadsheet_id))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await;

        match update {
            Ok(response) if response.status().is_success() => {
                debug!("header row written");
            }
            Ok(response) => {
                warn!(status = %response.status(), "header row update rejected, appending anyway");
            }
            Err(e) => {
                warn!(error = %e, "header row update failed, appending anyway");
            }
        }
    }
}

/// Case-insensitive comparison against the expected header row.
fn header_row_matches(existing: &[String]) -> bool {
    HEADER_ROW
        .iter()
        .enumerate()
        .all(|(i, expected)| existing.get(i).is_some_and(|v| v.eq_ignore_ascii_case(expected)))
}

/// Builds the eleven-cell spreadsheet row for one booking.
fn booking_row(booking: &BookingRequest, timestamp: &str) -> Vec<String> {
    vec![
        timestamp.to_string(),
        booking.name.clone(),
        booking.contact_number.clone().unwrap_or_default(),
        booking.start_point.clone(),
        booking.end_point.clone(),
        booking.trip_type.label().to_string(),
        booking.passengers.clone(),
        booking.pickup_date.clone(),
        booking.pickup_time.clone(),
        booking.special_requests.clone().unwrap_or_default(),
        NEW_ROW_STATUS.to_string(),
    ]
}

#[async_trait]
impl NotifyChannel for SheetsChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Sheets
    }

    async fn notify(
        &self,
        booking: &BookingRequest,
        _message: &str,
    ) -> Result<ChannelOutcome, MashwarError> {
        let Some(token) = self.access_token.as_deref() else {
            return Err(MashwarError::Config(
                "sheets access token is not configured".to_string(),
            ));
        };
        let Some(spreadsheet_id) = self.spreadsheet_id.as_deref() else {
            return Err(MashwarError::Config(
                "sheets spreadsheet id is not configured".to_string(),
            ));
        };

        self.ensure_header_row(spreadsheet_id, token).await;

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let body = ValueRange {
            values: vec![booking_row(booking, &timestamp)],
        };

        let response = self
            .client
            .post(self.append_url(spreadsheet_id))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| MashwarError::Channel {
                message: format!("sheets append request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "sheets append response received");

        if status.is_success() {
            return Ok(ChannelOutcome::Delivered);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(&body) {
            format!("Sheets API error: {}", api_err.error.message)
        } else {
            format!("Sheets API returned {status}: {body}")
        };
        Err(MashwarError::Channel {
            message,
            source: None,
        })
    }
}
