// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp messaging adapter.
//!
//! Sends booking confirmations through one of three provider APIs (Twilio,
//! MessageBird, WhatsApp Business Cloud), selected once from configured
//! credentials. With no provider, or when the selected provider rejects a
//! message, the adapter produces a `wa.me` link for manual sending instead
//! of failing.

mod channel;
mod provider;

pub use channel::{RelayOutcome, WhatsAppChannel};
pub use provider::Provider;
