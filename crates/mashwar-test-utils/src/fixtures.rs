// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared booking fixtures for tests across the workspace.

use mashwar_core::{BookingRequest, TripType};
use serde_json::{Value, json};

/// A validated booking with every field populated.
pub fn sample_booking() -> BookingRequest {
    BookingRequest {
        name: "Ahmed Hassan".to_string(),
        start_point: "Cairo Airport".to_string(),
        end_point: "Zamalek".to_string(),
        trip_type: TripType::OneWay,
        passengers: "3".to_string(),
        pickup_date: "2026-09-01".to_string(),
        pickup_time: "14:30".to_string(),
        contact_number: Some("+201001234567".to_string()),
        special_requests: Some("Child seat".to_string()),
    }
}

/// The wire-format JSON submission matching [`sample_booking`].
pub fn sample_submission() -> Value {
    json!({
        "name": "Ahmed Hassan",
        "startPoint": "Cairo Airport",
        "endPoint": "Zamalek",
        "tripType": "1-way",
        "passengers": "3",
        "pickupDate": "2026-09-01",
        "pickupTime": "14:30",
        "contactNumber": "+201001234567",
        "specialRequests": "Child seat",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_and_submission_agree() {
        let booking = sample_booking();
        let wire = sample_submission();

        assert_eq!(wire["name"], booking.name.as_str());
        assert_eq!(wire["startPoint"], booking.start_point.as_str());
        assert_eq!(wire["tripType"], "1-way");
        assert_eq!(
            wire["contactNumber"],
            booking.contact_number.as_deref().unwrap()
        );
    }
}
