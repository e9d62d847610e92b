// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, credential pairs that must be
//! set together, and well-formed mail addresses.

use crate::diagnostic::ConfigError;
use crate::model::MashwarConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MashwarConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate host is not empty and looks like a valid IP or hostname.
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be non-zero".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level must be one of trace, debug, info, warn, error; got `{}`",
                config.server.log_level
            ),
        });
    }

    if config.server.http_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "server.http_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.company.booking_prefix.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "company.booking_prefix must not be empty".to_string(),
        });
    }

    // A token without a spreadsheet id produces an append URL pointing at
    // nothing; catch the mistake at startup rather than per request.
    if config.sheets.access_token.is_some() && config.sheets.spreadsheet_id.is_none() {
        errors.push(ConfigError::Validation {
            message: "sheets.access_token is set but sheets.spreadsheet_id is missing"
                .to_string(),
        });
    }

    if let Some(admin) = &config.email.admin_address
        && !is_mail_address(admin)
    {
        errors.push(ConfigError::Validation {
            message: format!("email.admin_address `{admin}` is not a valid mail address"),
        });
    }

    if !is_mail_address(&config.email.sender) {
        errors.push(ConfigError::Validation {
            message: format!(
                "email.sender `{}` is not a valid mail address",
                config.email.sender
            ),
        });
    }

    let recipient = &config.whatsapp.default_recipient;
    if recipient.is_empty() || !recipient.chars().all(|c| c.is_ascii_digit()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "whatsapp.default_recipient must be digits only (country code, no `+`); got `{recipient}`"
            ),
        });
    }

    // Credential pairs must be complete to select a provider.
    let sid = config.whatsapp.twilio_account_sid.is_some();
    let token = config.whatsapp.twilio_auth_token.is_some();
    if sid != token {
        errors.push(ConfigError::Validation {
            message:
                "whatsapp.twilio_account_sid and whatsapp.twilio_auth_token must be set together"
                    .to_string(),
        });
    }

    let business_token = config.whatsapp.business_token.is_some();
    let business_phone = config.whatsapp.business_phone_id.is_some();
    if business_token != business_phone {
        errors.push(ConfigError::Validation {
            message:
                "whatsapp.business_token and whatsapp.business_phone_id must be set together"
                    .to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Light well-formedness check; full parsing happens at transport
/// construction.
fn is_mail_address(addr: &str) -> bool {
    let trimmed = addr.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}
