// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email notification adapter.
//!
//! Composes a plain-text notification per accepted booking and hands it to
//! a [`MailTransport`]: real SMTP when a host is configured, a log-only
//! stub otherwise.

mod channel;
mod message;
mod transport;

pub use channel::EmailChannel;
pub use message::{build_message, DEFAULT_ADMIN_ADDRESS};
pub use transport::{build_transport, LogTransport, MailTransport, SmtpTransport};
