//! Public quote form handlers.

use askama::Template;
use axum::{extract::State, response::Html, Form};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db;
use crate::error::Result;
use crate::format::{format_currency, format_date};
use crate::models::{creation_entry, NewQuote, OTHER_EVENT_TYPE};
use crate::pricing::{price_breakdown, PricingInput};
use crate::AppState;

/// Event types offered on the form, in display order.
pub const EVENT_TYPES: [&str; 12] = [
    "Wedding",
    "Birthday Party",
    "Family Reunion",
    "Festival",
    "Concert",
    "Football Tailgate",
    "Company Function",
    "High School Reunion",
    "High School/College Graduation",
    "Crawfish Boil",
    "Baby Shower",
    "Other Type of Event",
];

/// Guest count buckets offered on the form.
pub const GUEST_COUNTS: [&str; 6] = ["0-50", "50-100", "100-150", "150-200", "200-300", "300-500"];

/// Water connection answers.
pub const WATER_OPTIONS: [&str; 2] = [
    "Yes, we have a water connection",
    "No, please provide water",
];

/// Quote form template
#[derive(Template)]
#[template(path = "quote/form.html")]
struct QuoteFormTemplate {
    event_types: Vec<&'static str>,
    guest_counts: Vec<&'static str>,
    water_options: Vec<&'static str>,
}

/// One display row of the confirmation breakdown
struct BreakdownRow {
    label: String,
    amount_display: String,
}

/// Confirmation page template
#[derive(Template)]
#[template(path = "quote/confirmation.html")]
struct ConfirmationTemplate {
    name: String,
    email: String,
    event_type: String,
    event_date_display: String,
    event_location: String,
    breakdown_rows: Vec<BreakdownRow>,
    total_display: String,
    has_reference: bool,
    reference: String,
}

/// Submitted quote form fields.
///
/// Checkbox inputs carry `value="true"` so an unchecked box simply omits the
/// field and defaults to false.
#[derive(Debug, Deserialize)]
pub struct QuoteForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    #[serde(default)]
    pub custom_event_type: String,
    pub guest_count: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub event_location: String,
    #[serde(default)]
    pub distance_miles: i64,
    pub water_connection: String,
    #[serde(default)]
    pub cleaning_attendant: bool,
    #[serde(default)]
    pub baby_changing_station: bool,
    #[serde(default)]
    pub additional_requests: String,
}

/// Quote request form
pub async fn form() -> Result<Html<String>> {
    let template = QuoteFormTemplate {
        event_types: EVENT_TYPES.to_vec(),
        guest_counts: GUEST_COUNTS.to_vec(),
        water_options: WATER_OPTIONS.to_vec(),
    };
    Ok(Html(template.render()?))
}

/// Price and store a submitted quote request, then show the confirmation.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<QuoteForm>,
) -> Result<Html<String>> {
    let input = PricingInput {
        start_time: Some(form.start_time.clone()),
        end_time: Some(form.end_time.clone()),
        guest_count: form.guest_count.clone(),
        distance_miles: form.distance_miles,
        cleaning_attendant: form.cleaning_attendant,
        baby_changing_station: form.baby_changing_station,
    };
    let breakdown = price_breakdown(&input);

    let custom_event_type = if form.event_type == OTHER_EVENT_TYPE
        && !form.custom_event_type.trim().is_empty()
    {
        Some(form.custom_event_type.trim().to_string())
    } else {
        None
    };

    let new_quote = NewQuote {
        name: form.name.clone(),
        email: form.email.clone(),
        phone: form.phone,
        event_type: form.event_type.clone(),
        custom_event_type,
        guest_count: form.guest_count,
        event_date: form.event_date,
        start_time: form.start_time,
        end_time: form.end_time,
        event_location: form.event_location.clone(),
        distance_miles: form.distance_miles,
        water_connection: form.water_connection,
        cleaning_attendant: form.cleaning_attendant,
        baby_changing_station: form.baby_changing_station,
        additional_requests: if form.additional_requests.trim().is_empty() {
            None
        } else {
            Some(form.additional_requests.trim().to_string())
        },
        quote_amount: breakdown.total_cents(),
    };

    // A storage failure must not lose the customer's estimate
    let reference = match db::insert_quote(&state.db, &new_quote).await {
        Ok(quote) => {
            if let Err(e) = db::insert_history(&state.db, &creation_entry(quote.id)).await {
                tracing::warn!("Failed to record quote creation for {}: {}", quote.id, e);
            }
            state.cache.invalidate_stats();
            Some(quote.id)
        }
        Err(e) => {
            tracing::error!("Failed to store quote request from {}: {}", form.email, e);
            None
        }
    };

    let display_event_type = match &new_quote.custom_event_type {
        Some(custom) => custom.clone(),
        None => form.event_type,
    };

    let template = ConfirmationTemplate {
        name: form.name,
        email: form.email,
        event_type: display_event_type,
        event_date_display: format_date(form.event_date),
        event_location: form.event_location,
        breakdown_rows: breakdown
            .line_items
            .iter()
            .map(|item| BreakdownRow {
                label: item.label.clone(),
                amount_display: format!("${}", item.amount),
            })
            .collect(),
        total_display: format_currency(breakdown.total_cents()),
        has_reference: reference.is_some(),
        reference: reference.map(|id| id.to_string()).unwrap_or_default(),
    };

    Ok(Html(template.render()?))
}
