// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mashwar doctor` command implementation.
//!
//! Runs diagnostic checks against the Mashwar environment to identify
//! configuration issues and unconfigured notification channels before they
//! surface as skipped deliveries in production.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use mashwar_config::{EmailConfig, MashwarConfig, ServerConfig, SheetsConfig, WhatsAppConfig};
use mashwar_core::MashwarError;
use mashwar_email::build_transport;
use mashwar_whatsapp::Provider;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

/// Run the `mashwar doctor` command.
///
/// With `--plain`, disables colored output.
pub async fn run_doctor(config: &MashwarConfig, plain: bool) -> Result<(), MashwarError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config().await,
        check_sheets(&config.sheets).await,
        check_messaging(&config.whatsapp).await,
        check_email(&config.email).await,
        check_health_endpoint(&config.server).await,
    ];

    println!();
    println!("  mashwar doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let line;

        match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    let symbol = "✓".green().to_string();
                    line = format!(
                        "    {symbol} {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                } else {
                    line = format!(
                        "    [OK]   {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    let symbol = "!".yellow().to_string();
                    line = format!(
                        "    {symbol} {:<20} {} ({duration_ms}ms)",
                        result.name,
                        result.message.yellow()
                    );
                } else {
                    line = format!(
                        "    [WARN] {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    let symbol = "✗".red().to_string();
                    line = format!(
                        "    {symbol} {:<20} {} ({duration_ms}ms)",
                        result.name,
                        result.message.red()
                    );
                } else {
                    line = format!(
                        "    [FAIL] {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
        }

        println!("{line}");
    }

    println!();

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }

    println!();

    Ok(())
}

/// Check configuration loads without errors.
async fn check_config() -> CheckResult {
    let start = Instant::now();
    match mashwar_config::load_and_validate() {
        Ok(_) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Pass,
            message: "valid".to_string(),
            duration: start.elapsed(),
        },
        Err(errors) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Fail,
            message: format!("{} error(s)", errors.len()),
            duration: start.elapsed(),
        },
    }
}

/// Check spreadsheet channel credentials are present.
async fn check_sheets(config: &SheetsConfig) -> CheckResult {
    let start = Instant::now();

    match (&config.access_token, &config.spreadsheet_id) {
        (Some(_), Some(_)) => CheckResult {
            name: "Sheets channel".to_string(),
            status: CheckStatus::Pass,
            message: "credentials configured".to_string(),
            duration: start.elapsed(),
        },
        (Some(_), None) => CheckResult {
            name: "Sheets channel".to_string(),
            status: CheckStatus::Warn,
            message: "access token set but no spreadsheet id".to_string(),
            duration: start.elapsed(),
        },
        (None, Some(_)) => CheckResult {
            name: "Sheets channel".to_string(),
            status: CheckStatus::Warn,
            message: "spreadsheet id set but no access token".to_string(),
            duration: start.elapsed(),
        },
        (None, None) => CheckResult {
            name: "Sheets channel".to_string(),
            status: CheckStatus::Warn,
            message: "not configured (bookings will skip the spreadsheet)".to_string(),
            duration: start.elapsed(),
        },
    }
}

/// Check which messaging provider the credentials select.
async fn check_messaging(config: &WhatsAppConfig) -> CheckResult {
    let start = Instant::now();

    match Provider::from_config(config) {
        Some(provider) => CheckResult {
            name: "Messaging provider".to_string(),
            status: CheckStatus::Pass,
            message: format!("using {}", provider.name()),
            duration: start.elapsed(),
        },
        None => CheckResult {
            name: "Messaging provider".to_string(),
            status: CheckStatus::Warn,
            message: "no provider credentials (manual links only)".to_string(),
            duration: start.elapsed(),
        },
    }
}

/// Check which mail transport the configuration selects.
async fn check_email(config: &EmailConfig) -> CheckResult {
    let start = Instant::now();

    match build_transport(config, Duration::from_secs(5)) {
        Ok(transport) if transport.is_live() => CheckResult {
            name: "Email transport".to_string(),
            status: CheckStatus::Pass,
            message: format!("using {}", transport.name()),
            duration: start.elapsed(),
        },
        Ok(_) => CheckResult {
            name: "Email transport".to_string(),
            status: CheckStatus::Warn,
            message: "log-only (no smtp host configured)".to_string(),
            duration: start.elapsed(),
        },
        Err(e) => CheckResult {
            name: "Email transport".to_string(),
            status: CheckStatus::Fail,
            message: e.to_string(),
            duration: start.elapsed(),
        },
    }
}

/// Check gateway health endpoint.
async fn check_health_endpoint(config: &ServerConfig) -> CheckResult {
    let start = Instant::now();
    let host = &config.host;
    let port = config.port;
    let url = format!("http://{host}:{port}/health");

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            return CheckResult {
                name: "Health endpoint".to_string(),
                status: CheckStatus::Fail,
                message: format!("HTTP client error: {e}"),
                duration: start.elapsed(),
            };
        }
    };

    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => CheckResult {
            name: "Health endpoint".to_string(),
            status: CheckStatus::Pass,
            message: "reachable".to_string(),
            duration: start.elapsed(),
        },
        Ok(resp) => CheckResult {
            name: "Health endpoint".to_string(),
            status: CheckStatus::Warn,
            message: format!("status {}", resp.status()),
            duration: start.elapsed(),
        },
        Err(_) => CheckResult {
            name: "Health endpoint".to_string(),
            status: CheckStatus::Warn,
            message: format!("not reachable at {url} (service may not be running)"),
            duration: start.elapsed(),
        },
    }
}
