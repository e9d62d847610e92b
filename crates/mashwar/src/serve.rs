// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mashwar serve` command implementation.
//!
//! Builds the three notification adapters from configuration, assembles the
//! dispatcher and gateway state, and serves the HTTP API until a shutdown
//! signal arrives.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use mashwar_config::MashwarConfig;
use mashwar_core::{MashwarError, NotifyChannel};
use mashwar_dispatch::Dispatcher;
use mashwar_email::EmailChannel;
use mashwar_gateway::AppState;
use mashwar_sheets::SheetsChannel;
use mashwar_whatsapp::WhatsAppChannel;

use crate::shutdown;

/// Runs the `mashwar serve` command.
///
/// Channel order is fixed: spreadsheet, email, messaging. The whatsapp
/// channel doubles as the relay behind POST /api/whatsapp.
pub async fn run_serve(config: MashwarConfig) -> Result<(), MashwarError> {
    init_tracing(&config.server.log_level);

    info!("starting mashwar serve");

    let timeout = Duration::from_secs(config.server.http_timeout_secs);

    let sheets = SheetsChannel::new(&config.sheets, timeout)?;
    if config.sheets.access_token.is_some() && config.sheets.spreadsheet_id.is_some() {
        info!("sheets channel configured");
    } else {
        info!("sheets channel unconfigured, submissions will skip it");
    }

    let email = EmailChannel::new(&config.email, timeout)?;
    let whatsapp = Arc::new(WhatsAppChannel::new(&config.whatsapp, timeout)?);

    let channels: Vec<Arc<dyn NotifyChannel>> =
        vec![Arc::new(sheets), Arc::new(email), whatsapp.clone()];
    let dispatcher = Arc::new(Dispatcher::new(config.company.clone(), channels));

    let state = AppState {
        dispatcher,
        relay: whatsapp,
    };

    let cancel = shutdown::install_signal_handler();

    mashwar_gateway::serve(&config.server.host, config.server.port, state, cancel).await?;

    info!("mashwar serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mashwar={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
