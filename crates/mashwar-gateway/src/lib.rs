// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Mashwar booking relay.
//!
//! Exposes the public booking API over axum: form submissions, the
//! standalone WhatsApp relay endpoint, and a health probe. Handlers hold the
//! dispatcher and messaging channel behind shared state; the server itself
//! is stateless per request.

pub mod handlers;
pub mod server;

pub use server::{AppState, build_router, serve};
