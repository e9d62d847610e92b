// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, CORS, and shared state, and runs the listener until the
//! shutdown token fires.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use mashwar_core::MashwarError;
use mashwar_dispatch::Dispatcher;
use mashwar_whatsapp::WhatsAppChannel;

use crate::handlers;

/// Shared state for axum request handlers.
///
/// Immutable after startup; every field is behind an `Arc` so cloning per
/// request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Booking fan-out pipeline.
    pub dispatcher: Arc<Dispatcher>,
    /// Messaging channel backing the standalone relay endpoint.
    pub relay: Arc<WhatsAppChannel>,
}

/// Builds the gateway router.
///
/// CORS is permissive: the booking form is served from a separate origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/booking", post(handlers::post_booking))
        .route("/api/whatsapp", post(handlers::post_whatsapp))
        .route("/health", get(handlers::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listener and serves the gateway until `shutdown` fires.
pub async fn serve(
    host: &str,
    port: u16,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), MashwarError> {
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MashwarError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| MashwarError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use mashwar_config::{CompanyConfig, WhatsAppConfig};
    use mashwar_core::{ChannelKind, NotifyChannel};
    use mashwar_test_utils::{MockChannel, sample_submission};

    fn test_state() -> AppState {
        let channels: Vec<Arc<dyn NotifyChannel>> = vec![
            Arc::new(MockChannel::new(ChannelKind::Sheets)),
            Arc::new(MockChannel::new(ChannelKind::Email)),
            Arc::new(MockChannel::new(ChannelKind::WhatsApp)),
        ];
        let relay =
            WhatsAppChannel::new(&WhatsAppConfig::default(), Duration::from_secs(5)).unwrap();
        AppState {
            dispatcher: Arc::new(Dispatcher::new(CompanyConfig::default(), channels)),
            relay: Arc::new(relay),
        }
    }

    /// Serves the router on an ephemeral port, returns the base URL.
    async fn spawn_gateway(state: AppState) -> String {
        let app = build_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn booking_submission_round_trip() {
        let base = spawn_gateway(test_state()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/api/booking"))
            .json(&sample_submission())
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Booking request received successfully");
        assert!(body["bookingId"].as_str().unwrap().starts_with("PC"));
        assert!(
            body["confirmationText"]
                .as_str()
                .unwrap()
                .contains("Booking Confirmation")
        );
    }

    #[tokio::test]
    async fn invalid_booking_reports_first_violation() {
        let base = spawn_gateway(test_state()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/api/booking"))
            .json(&serde_json::json!({"name": "Ahmed Hassan"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "startPoint is required");
    }

    #[tokio::test]
    async fn malformed_body_is_internal_error() {
        let base = spawn_gateway(test_state()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/api/booking"))
            .header("content-type", "application/json")
            .body("not json at all")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn whatsapp_endpoint_prepares_manual_link() {
        let base = spawn_gateway(test_state()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/api/whatsapp"))
            .json(&serde_json::json!({"message": "Your ride is booked"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["sent"], false);
        assert_eq!(body["targetPhone"], "201283051333");
        assert!(
            body["whatsappUrl"]
                .as_str()
                .unwrap()
                .starts_with("https://wa.me/201283051333?text=")
        );
        assert_eq!(
            body["message"],
            "WhatsApp message prepared (manual send required)"
        );
    }

    #[tokio::test]
    async fn whatsapp_endpoint_rejects_missing_message() {
        let base = spawn_gateway(test_state()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/api/whatsapp"))
            .json(&serde_json::json!({"phoneNumber": "+201001234567"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Failed to send WhatsApp message");
    }

    #[tokio::test]
    async fn health_endpoint_reports_version() {
        let base = spawn_gateway(test_state()).await;

        let response = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn cors_preflight_is_allowed() {
        let base = spawn_gateway(test_state()).await;
        let client = reqwest::Client::new();

        let response = client
            .request(reqwest::Method::OPTIONS, format!("{base}/api/booking"))
            .header("origin", "https://booking.example")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
    }
}
