// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Sheets booking log adapter.
//!
//! Appends each accepted booking as one row to a configured spreadsheet via
//! the Sheets v4 `values.append` endpoint, recreating the header row when it
//! is absent or stale.

mod client;

pub use client::SheetsChannel;
