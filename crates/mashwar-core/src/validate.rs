// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking form validation.
//!
//! Pure function from a raw submission to either a normalized
//! [`BookingRequest`] or the complete list of per-field violations. Every
//! field is checked independently; validation never short-circuits on the
//! first failure and performs no I/O.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{BookingRequest, RawBooking, TripType};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());

/// E.164-like: optional leading `+`, first digit non-zero, applied after
/// stripping internal whitespace.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

/// Passenger-count buckets offered by the booking form.
const PASSENGER_BUCKETS: [&str; 6] = ["1", "2", "3", "4", "5", "6+"];

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire field name (camelCase, as submitted).
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn missing(field: &'static str) -> Self {
        Self {
            field,
            message: format!("{field} is required"),
        }
    }
}

/// The complete set of violations for one rejected submission.
#[derive(Debug, Clone, Error)]
#[error("booking validation failed with {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    pub violations: Vec<Violation>,
}

impl ValidationErrors {
    /// Message of the first violation, in field order.
    pub fn first_message(&self) -> Option<&str> {
        self.violations.first().map(|v| v.message.as_str())
    }

    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }
}

/// Validates and normalizes a raw submission.
///
/// Normalization: surrounding whitespace is trimmed from every text field,
/// internal whitespace is stripped from the contact number, and empty
/// optional fields collapse to `None`. A submission is accepted in full or
/// rejected in full.
pub fn validate(raw: &RawBooking) -> Result<BookingRequest, ValidationErrors> {
    let mut violations = Vec::new();

    let name = required(&raw.name, "name", &mut violations);
    let start_point = required(&raw.start_point, "startPoint", &mut violations);
    let end_point = required(&raw.end_point, "endPoint", &mut violations);
    let trip_token = required(&raw.trip_type, "tripType", &mut violations);
    let passengers = required(&raw.passengers, "passengers", &mut violations);
    let pickup_date = required(&raw.pickup_date, "pickupDate", &mut violations);
    let pickup_time = required(&raw.pickup_time, "pickupTime", &mut violations);

    if let Some(name) = &name {
        let len = name.chars().count();
        if len < 2 {
            violations.push(Violation::new("name", "Name must be at least 2 characters"));
        } else if len > 50 {
            violations.push(Violation::new("name", "Name must be less than 50 characters"));
        } else if !NAME_PATTERN.is_match(name) {
            violations.push(Violation::new(
                "name",
                "Name can only contain letters and spaces",
            ));
        }
    }

    let trip_type = trip_token.as_deref().and_then(|token| {
        let parsed = TripType::parse(token);
        if parsed.is_none() {
            violations.push(Violation::new("tripType", "Please select a trip type"));
        }
        parsed
    });

    if let Some(passengers) = &passengers
        && !PASSENGER_BUCKETS.contains(&passengers.as_str())
    {
        violations.push(Violation::new(
            "passengers",
            "Please select number of passengers",
        ));
    }

    let contact_number = optional(&raw.contact_number).and_then(|value| {
        let stripped: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if PHONE_PATTERN.is_match(&stripped) {
            Some(stripped)
        } else {
            violations.push(Violation::new(
                "contactNumber",
                "Please enter a valid phone number (e.g., +1234567890)",
            ));
            None
        }
    });

    let special_requests = optional(&raw.special_requests);
    if let Some(special_requests) = &special_requests
        && special_requests.chars().count() > 500
    {
        violations.push(Violation::new(
            "specialRequests",
            "Special requests must be less than 500 characters",
        ));
    }

    match (
        name,
        start_point,
        end_point,
        trip_type,
        passengers,
        pickup_date,
        pickup_time,
    ) {
        (
            Some(name),
            Some(start_point),
            Some(end_point),
            Some(trip_type),
            Some(passengers),
            Some(pickup_date),
            Some(pickup_time),
        ) if violations.is_empty() => Ok(BookingRequest {
            name,
            start_point,
            end_point,
            trip_type,
            passengers,
            pickup_date,
            pickup_time,
            contact_number,
            special_requests,
        }),
        _ => Err(ValidationErrors { violations }),
    }
}

/// Trimmed value of a required field; records a violation when the field is
/// absent or blank.
fn required(
    value: &Option<String>,
    field: &'static str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match optional(value) {
        Some(v) => Some(v),
        None => {
            violations.push(Violation::missing(field));
            None
        }
    }
}

/// Trimmed value of an optional field; absent and blank collapse to `None`.
fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
