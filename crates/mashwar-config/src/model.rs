// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Mashwar booking relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Placeholder for secret values in redacted output.
const REDACTED: &str = "[REDACTED]";

/// Top-level Mashwar configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values; a
/// default config starts a working service with every notification channel
/// in its unconfigured (skipped or fallback) state.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MashwarConfig {
    /// HTTP server and runtime settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Company identity rendered into confirmations and emails.
    #[serde(default)]
    pub company: CompanyConfig,

    /// Spreadsheet channel settings.
    #[serde(default)]
    pub sheets: SheetsConfig,

    /// Email channel settings.
    #[serde(default)]
    pub email: EmailConfig,

    /// Messaging channel settings (provider credentials + fallback target).
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

impl MashwarConfig {
    /// Serializes the config as TOML with credential values masked.
    ///
    /// Used by `mashwar config show`; never print the raw config.
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut masked = self.clone();
        masked.sheets.access_token = mask(&masked.sheets.access_token);
        masked.email.smtp_password = mask(&masked.email.smtp_password);
        masked.whatsapp.twilio_auth_token = mask(&masked.whatsapp.twilio_auth_token);
        masked.whatsapp.messagebird_api_key = mask(&masked.whatsapp.messagebird_api_key);
        masked.whatsapp.business_token = mask(&masked.whatsapp.business_token);
        toml::to_string_pretty(&masked)
    }
}

fn mask(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|_| REDACTED.to_string())
}

/// HTTP server and runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the HTTP listener.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Timeout applied to every outbound HTTP call, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8335
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

/// Company identity configuration.
///
/// These values appear verbatim in customer-facing confirmation text and
/// admin notifications.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyConfig {
    /// Company display name, used in the confirmation signature line.
    #[serde(default = "default_company_name")]
    pub name: String,

    /// Tagline appended to the signature line.
    #[serde(default = "default_tagline")]
    pub tagline: String,

    /// Phone number shown in the "we will contact you" line.
    #[serde(default = "default_contact_display")]
    pub contact_display: String,

    /// Prefix for generated booking identifiers.
    #[serde(default = "default_booking_prefix")]
    pub booking_prefix: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            tagline: default_tagline(),
            contact_display: default_contact_display(),
            booking_prefix: default_booking_prefix(),
        }
    }
}

fn default_company_name() -> String {
    "Perfect Company".to_string()
}

fn default_tagline() -> String {
    "Excellence in providing Limousine services".to_string()
}

fn default_contact_display() -> String {
    "01200272020".to_string()
}

fn default_booking_prefix() -> String {
    "PC".to_string()
}

/// Spreadsheet channel configuration.
///
/// The channel is unconfigured (and skipped at dispatch time) until
/// `access_token` is set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SheetsConfig {
    /// Identifier of the target spreadsheet.
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    /// OAuth2 bearer token for the spreadsheet API.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Email channel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// Administrative mailbox receiving booking notifications.
    /// A hard-coded default applies when unset.
    #[serde(default)]
    pub admin_address: Option<String>,

    /// Sender address for outgoing notifications.
    #[serde(default = "default_sender")]
    pub sender: String,

    /// SMTP relay host. `None` selects the log-only transport.
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP username, when the relay requires authentication.
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// SMTP password, when the relay requires authentication.
    #[serde(default)]
    pub smtp_password: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            admin_address: None,
            sender: default_sender(),
            smtp_host: None,
            smtp_username: None,
            smtp_password: None,
        }
    }
}

fn default_sender() -> String {
    "bookings@mashwar.local".to_string()
}

/// Messaging channel configuration.
///
/// Exactly one provider is selected at load time, by priority: Twilio,
/// then MessageBird, then the WhatsApp Business Cloud API. With no
/// credentials set the channel produces manual-send links only.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WhatsAppConfig {
    /// Company number used when a booking carries no contact number.
    #[serde(default = "default_recipient")]
    pub default_recipient: String,

    /// Twilio account SID (basic-auth username).
    #[serde(default)]
    pub twilio_account_sid: Option<String>,

    /// Twilio auth token (basic-auth password).
    #[serde(default)]
    pub twilio_auth_token: Option<String>,

    /// Twilio sender, e.g. `whatsapp:+14155238886`. Defaults to the
    /// shared sandbox number when unset.
    #[serde(default)]
    pub twilio_from: Option<String>,

    /// MessageBird API access key.
    #[serde(default)]
    pub messagebird_api_key: Option<String>,

    /// MessageBird sender channel. Defaults to the shared sandbox number.
    #[serde(default)]
    pub messagebird_from: Option<String>,

    /// WhatsApp Business Cloud API bearer token.
    #[serde(default)]
    pub business_token: Option<String>,

    /// WhatsApp Business Cloud API phone-number id.
    #[serde(default)]
    pub business_phone_id: Option<String>,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            default_recipient: default_recipient(),
            twilio_account_sid: None,
            twilio_auth_token: None,
            twilio_from: None,
            messagebird_api_key: None,
            messagebird_from: None,
            business_token: None,
            business_phone_id: None,
        }
    }
}

fn default_recipient() -> String {
    "201283051333".to_string()
}
