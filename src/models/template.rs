//! Email templates with `{placeholder}` variables.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::format::{format_currency, format_date};

use super::quote::Quote;

/// Prewritten lifecycle category a template belongs to. Falls back to
/// `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCategory {
    QuoteReceived,
    QuoteFollowUp,
    BookingConfirmed,
    EventReminder,
    ThankYou,
    Custom,
}

impl TemplateCategory {
    pub fn parse(s: &str) -> Self {
        match s {
            "quote_received" => TemplateCategory::QuoteReceived,
            "quote_follow_up" => TemplateCategory::QuoteFollowUp,
            "booking_confirmed" => TemplateCategory::BookingConfirmed,
            "event_reminder" => TemplateCategory::EventReminder,
            "thank_you" => TemplateCategory::ThankYou,
            _ => TemplateCategory::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::QuoteReceived => "quote_received",
            TemplateCategory::QuoteFollowUp => "quote_follow_up",
            TemplateCategory::BookingConfirmed => "booking_confirmed",
            TemplateCategory::EventReminder => "event_reminder",
            TemplateCategory::ThankYou => "thank_you",
            TemplateCategory::Custom => "custom",
        }
    }
}

/// A stored email template.
#[derive(Debug, Clone, FromRow)]
pub struct EmailTemplate {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub category: String,
    pub subject: String,
    pub body: String,
    pub is_active: bool,
}

impl EmailTemplate {
    pub fn category(&self) -> TemplateCategory {
        TemplateCategory::parse(&self.category)
    }

    /// Fill the template's variables from a quote and return
    /// `(subject, body)` ready for the communication form.
    pub fn render_for(&self, quote: &Quote) -> (String, String) {
        (
            substitute_variables(&self.subject, quote),
            substitute_variables(&self.body, quote),
        )
    }
}

/// Replace every `{placeholder}` occurrence with the matching quote field.
///
/// Money variables render through the shared currency formatter and dates
/// through the shared date formatter, so drafts match what the customer was
/// quoted. Unknown placeholders are left in place for the admin to notice.
pub fn substitute_variables(text: &str, quote: &Quote) -> String {
    let pairs = [
        ("{customer_name}", quote.name.clone()),
        ("{quote_amount}", format_currency(quote.quote_amount)),
        ("{event_type}", quote.display_event_type().to_string()),
        ("{event_date}", format_date(quote.event_date)),
        ("{start_time}", quote.start_time.clone()),
        ("{end_time}", quote.end_time.clone()),
        ("{event_location}", quote.event_location.clone()),
        ("{guest_count}", quote.guest_count.clone()),
        ("{deposit_amount}", format_currency(quote.deposit_amount)),
        ("{balance_due}", format_currency(quote.balance_due_cents())),
    ];

    let mut out = text.to_string();
    for (placeholder, value) in pairs {
        out = out.replace(placeholder, &value);
    }
    out
}
