// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the booking API.
//!
//! Handles POST /api/booking, POST /api/whatsapp, GET /health.

use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use mashwar_core::{RawBooking, validate};
use mashwar_whatsapp::RelayOutcome;

use crate::server::AppState;

/// Response body for an accepted booking.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAccepted {
    /// Always true; the submission was valid and a confirmation exists.
    pub success: bool,
    /// Fixed acknowledgement line.
    pub message: String,
    /// Generated booking identifier.
    pub booking_id: String,
    /// Rendered confirmation text for the customer.
    pub confirmation_text: String,
}

/// Request body for POST /api/whatsapp.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    /// Message text to deliver.
    pub message: String,
    /// Destination number; the configured company number applies when absent.
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Response body for POST /api/whatsapp.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub success: bool,
    /// True when a provider accepted the message, false for a manual link.
    pub sent: bool,
    /// Click-to-chat link, present only on the manual fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
    pub target_phone: String,
    pub message: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /api/booking
///
/// Validates the submission, fans it out to every notification channel, and
/// returns the booking id plus confirmation text. Channel failures never
/// surface here; only invalid input produces a non-200 response.
pub async fn post_booking(
    State(state): State<AppState>,
    payload: Result<Json<RawBooking>, JsonRejection>,
) -> Response {
    let Ok(Json(raw)) = payload else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response();
    };

    let booking = match validate(&raw) {
        Ok(booking) => booking,
        Err(errors) => {
            warn!(violations = ?errors.messages(), "booking submission rejected");
            // The HTTP contract reports the first violation only.
            let error = errors
                .first_message()
                .unwrap_or("Invalid booking data")
                .to_string();
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
        }
    };

    let confirmation = state.dispatcher.dispatch(&booking).await;

    (
        StatusCode::OK,
        Json(BookingAccepted {
            success: true,
            message: "Booking request received successfully".to_string(),
            booking_id: confirmation.booking_id,
            confirmation_text: confirmation.message,
        }),
    )
        .into_response()
}

/// POST /api/whatsapp
///
/// Relays one message through the configured provider, degrading to a
/// `wa.me` manual-send link when no provider is available or the direct
/// send is rejected.
pub async fn post_whatsapp(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = payload else {
        return relay_error();
    };

    match state
        .relay
        .deliver(&body.message, body.phone_number.as_deref())
        .await
    {
        Ok(RelayOutcome::Sent { target_phone }) => (
            StatusCode::OK,
            Json(RelayResponse {
                success: true,
                sent: true,
                whatsapp_url: None,
                target_phone,
                message: "WhatsApp message sent successfully".to_string(),
            }),
        )
            .into_response(),
        Ok(RelayOutcome::Prepared { target_phone, url }) => (
            StatusCode::OK,
            Json(RelayResponse {
                success: true,
                sent: false,
                whatsapp_url: Some(url),
                target_phone,
                message: "WhatsApp message prepared (manual send required)".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "whatsapp relay failed");
            relay_error()
        }
    }
}

fn relay_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Failed to send WhatsApp message".to_string(),
        }),
    )
        .into_response()
}

/// GET /health
///
/// Returns service status and version.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
