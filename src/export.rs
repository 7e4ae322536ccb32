//! CSV export of the reservations list.
//!
//! Column set and order are what the office spreadsheets expect; changing
//! them breaks saved imports. Header cells are bare, data cells are always
//! quoted with embedded quotes doubled.

use crate::format::{format_currency, format_date, format_date_time};
use crate::models::Quote;

const HEADERS: [&str; 16] = [
    "ID",
    "Created At",
    "Customer Name",
    "Email",
    "Phone",
    "Event Type",
    "Event Date",
    "Start Time",
    "End Time",
    "Location",
    "Guest Count",
    "Quote Amount",
    "Status",
    "Payment Status",
    "Priority",
    "Tags",
];

fn cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render the given quotes as a CSV document, one row per quote.
pub fn quotes_to_csv(quotes: &[Quote]) -> String {
    let mut lines = Vec::with_capacity(quotes.len() + 1);
    lines.push(HEADERS.join(","));

    for quote in quotes {
        let row = [
            quote.id.to_string(),
            format_date_time(quote.created_at),
            quote.name.clone(),
            quote.email.clone(),
            quote.phone.clone(),
            quote.display_event_type().to_string(),
            format_date(quote.event_date),
            quote.start_time.clone(),
            quote.end_time.clone(),
            quote.event_location.clone(),
            quote.guest_count.clone(),
            format_currency(quote.quote_amount),
            quote.status.clone(),
            quote.payment_status.clone(),
            quote.priority.clone(),
            quote.tags.join("; "),
        ];
        lines.push(
            row.iter()
                .map(|value| cell(value))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}
