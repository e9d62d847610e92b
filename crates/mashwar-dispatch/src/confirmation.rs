// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking id and confirmation text generation.

use chrono::Utc;

use mashwar_config::CompanyConfig;
use mashwar_core::BookingRequest;

/// Generates a display identifier: configured prefix plus the current Unix
/// time in milliseconds.
pub fn booking_id(prefix: &str) -> String {
    format!("{prefix}{}", Utc::now().timestamp_millis())
}

/// Renders the customer-facing confirmation message.
///
/// Optional lines are omitted entirely when the field is absent; no blank
/// line is left in their place.
pub fn confirmation_text(booking: &BookingRequest, company: &CompanyConfig) -> String {
    let mut lines = vec![
        "🚗 *Booking Confirmation*".to_string(),
        String::new(),
        format!(
            "Thank you {}! Your limousine booking request has been received.",
            booking.name
        ),
        String::new(),
        "📋 *Booking Details:*".to_string(),
        format!("• Pick-up: {}", booking.start_point),
        format!("• Drop-off: {}", booking.end_point),
        format!("• Trip Type: {}", booking.trip_type.label()),
        format!("• Passengers: {}", booking.passengers),
        format!("• Date: {}", booking.pickup_date),
        format!("• Time: {}", booking.pickup_time),
    ];

    if let Some(requests) = &booking.special_requests {
        lines.push(format!("• Special Requests: {requests}"));
    }

    lines.push(String::new());
    lines.push(format!(
        "📞 We will contact you shortly at: {}",
        company.contact_display
    ));
    lines.push(String::new());
    lines.push(format!("{} - {}", company.name, company.tagline));

    lines.join("\n")
}
