// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mashwar booking relay.

use thiserror::Error;

/// The primary error type used across channel adapters and core operations.
#[derive(Debug, Error)]
pub enum MashwarError {
    /// Configuration errors (missing credentials, invalid settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Channel delivery errors (rejected call, unreachable endpoint).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Messaging provider errors (API rejection, malformed provider response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MashwarError {
    /// True when the error stems from absent or invalid configuration
    /// rather than a failed delivery attempt.
    pub fn is_config(&self) -> bool {
        matches!(self, MashwarError::Config(_))
    }
}
