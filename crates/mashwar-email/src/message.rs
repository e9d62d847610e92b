// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic notification message construction.

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use mashwar_core::{BookingRequest, MashwarError};

/// Recipient used when no admin address is configured.
pub const DEFAULT_ADMIN_ADDRESS: &str = "info@perfectcompany.com";

/// Subject line for one booking notification.
fn subject(booking: &BookingRequest) -> String {
    format!("New Limousine Booking - {}", booking.name)
}

/// Plain-text body enumerating the booking fields, one per line.
///
/// Optional fields are omitted entirely rather than rendered blank, so the
/// body is deterministic for a given booking and carries no clock reads.
fn body(booking: &BookingRequest) -> String {
    let mut lines = vec![
        "New limousine booking request".to_string(),
        String::new(),
        format!("Name: {}", booking.name),
    ];
    if let Some(contact) = &booking.contact_number {
        lines.push(format!("Contact Number: {contact}"));
    }
    lines.push(format!("Pick-up Location: {}", booking.start_point));
    lines.push(format!("Drop-off Location: {}", booking.end_point));
    lines.push(format!("Trip Type: {}", booking.trip_type.label()));
    lines.push(format!("Passengers: {}", booking.passengers));
    lines.push(format!("Pick-up Date: {}", booking.pickup_date));
    lines.push(format!("Pick-up Time: {}", booking.pickup_time));
    if let Some(requests) = &booking.special_requests {
        lines.push(format!("Special Requests: {requests}"));
    }
    lines.join("\n")
}

/// Builds the complete mail message for one booking.
///
/// `admin` falls back to [`DEFAULT_ADMIN_ADDRESS`] when unset.
pub fn build_message(
    booking: &BookingRequest,
    sender: &str,
    admin: Option<&str>,
) -> Result<Message, MashwarError> {
    let to = admin.unwrap_or(DEFAULT_ADMIN_ADDRESS);

    let from: Mailbox = sender.parse().map_err(|e| {
        MashwarError::Config(format!("invalid sender address `{sender}`: {e}"))
    })?;
    let to: Mailbox = to
        .parse()
        .map_err(|e| MashwarError::Config(format!("invalid admin address `{to}`: {e}")))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject(booking))
        .header(ContentType::TEXT_PLAIN)
        .body(body(booking))
        .map_err(|e| MashwarError::Channel {
            message: format!("failed to build email: {e}"),
            source: Some(Box::new(e)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mashwar_core::TripType;

    fn test_booking() -> BookingRequest {
        BookingRequest {
            name: "Ahmed Hassan".into(),
            start_point: "Cairo Airport".into(),
            end_point: "Zamalek".into(),
            trip_type: TripType::OneWay,
            passengers: "2".into(),
            pickup_date: "2026-03-14".into(),
            pickup_time: "18:30".into(),
            contact_number: Some("+201001234567".into()),
            special_requests: Some("Child seat".into()),
        }
    }

    #[test]
    fn body_lists_every_field_in_order() {
        let expected = "New limousine booking request\n\
                        \n\
                        Name: Ahmed Hassan\n\
                        Contact Number: +201001234567\n\
                        Pick-up Location: Cairo Airport\n\
                        Drop-off Location: Zamalek\n\
                        Trip Type: One Way\n\
                        Passengers: 2\n\
                        Pick-up Date: 2026-03-14\n\
                        Pick-up Time: 18:30\n\
                        Special Requests: Child seat";
        assert_eq!(body(&test_booking()), expected);
    }

    #[test]
    fn body_omits_absent_optional_lines() {
        let mut booking = test_booking();
        booking.contact_number = None;
        booking.special_requests = None;

        let text = body(&booking);
        assert!(!text.contains("Contact Number:"));
        assert!(!text.contains("Special Requests:"));
        assert!(text.ends_with("Pick-up Time: 18:30"));
    }

    #[test]
    fn subject_carries_customer_name() {
        assert_eq!(
            subject(&test_booking()),
            "New Limousine Booking - Ahmed Hassan"
        );
    }

    #[test]
    fn message_addresses_configured_admin() {
        let message = build_message(
            &test_booking(),
            "bookings@mashwar.local",
            Some("owner@example.com"),
        )
        .unwrap();

        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("From: bookings@mashwar.local"), "got: {rendered}");
        assert!(rendered.contains("To: owner@example.com"), "got: {rendered}");
        assert!(
            rendered.contains("Subject: New Limousine Booking - Ahmed Hassan"),
            "got: {rendered}"
        );
    }

    #[test]
    fn message_falls_back_to_default_admin() {
        let message = build_message(&test_booking(), "bookings@mashwar.local", None).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("To: info@perfectcompany.com"), "got: {rendered}");
    }

    #[test]
    fn malformed_sender_is_config_error() {
        let err = build_message(&test_booking(), "not an address", None).unwrap_err();
        assert!(err.is_config());
    }
}
