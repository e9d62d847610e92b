// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mashwar booking relay.
//!
//! This crate provides the domain types, the booking form validator, the
//! notification channel trait, and the shared error type used throughout
//! the Mashwar workspace. Channel adapters implement [`NotifyChannel`].

pub mod channel;
pub mod error;
pub mod types;
pub mod validate;

// Re-export key items at crate root for ergonomic imports.
pub use channel::NotifyChannel;
pub use error::MashwarError;
pub use types::{
    BookingConfirmation, BookingRequest, ChannelKind, ChannelOutcome, ChannelReport,
    DispatchReport, RawBooking, TripType,
};
pub use validate::{ValidationErrors, Violation, validate};
