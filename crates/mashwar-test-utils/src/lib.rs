// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for dispatcher and gateway tests.

mod fixtures;
mod mock_channel;

pub use fixtures::{sample_booking, sample_submission};
pub use mock_channel::MockChannel;
