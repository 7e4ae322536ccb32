//! Quote records and their display taxonomies.
//!
//! Taxonomy columns stay TEXT in the store. The enums parse leniently with a
//! documented fallback, so a row with an unrecognized value still renders
//! instead of failing the whole page.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::PricingInput;

/// Event type choice whose display label comes from `custom_event_type`.
pub const OTHER_EVENT_TYPE: &str = "Other Type of Event";

/// Label and CSS classes for rendering a taxonomy value as a colored badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub bg: &'static str,
    pub text: &'static str,
}

/// Lead workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Pending,
    Contacted,
    Booked,
    Completed,
    Cancelled,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 5] = [
        QuoteStatus::Pending,
        QuoteStatus::Contacted,
        QuoteStatus::Booked,
        QuoteStatus::Completed,
        QuoteStatus::Cancelled,
    ];

    /// Parse the stored value, falling back to `Pending` for anything
    /// unrecognized.
    pub fn parse(s: &str) -> Self {
        match s {
            "contacted" => QuoteStatus::Contacted,
            "booked" => QuoteStatus::Booked,
            "completed" => QuoteStatus::Completed,
            "cancelled" => QuoteStatus::Cancelled,
            _ => QuoteStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Contacted => "contacted",
            QuoteStatus::Booked => "booked",
            QuoteStatus::Completed => "completed",
            QuoteStatus::Cancelled => "cancelled",
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            QuoteStatus::Pending => Badge {
                label: "Pending",
                bg: "bg-yellow-100",
                text: "text-yellow-800",
            },
            QuoteStatus::Contacted => Badge {
                label: "Contacted",
                bg: "bg-blue-100",
                text: "text-blue-800",
            },
            QuoteStatus::Booked => Badge {
                label: "Booked",
                bg: "bg-green-100",
                text: "text-green-800",
            },
            QuoteStatus::Completed => Badge {
                label: "Completed",
                bg: "bg-purple-100",
                text: "text-purple-800",
            },
            QuoteStatus::Cancelled => Badge {
                label: "Cancelled",
                bg: "bg-red-100",
                text: "text-red-800",
            },
        }
    }
}

/// Admin triage priority. Falls back to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn parse(s: &str) -> Self {
        match s {
            "low" => Priority::Low,
            "high" => Priority::High,
            "urgent" => Priority::Urgent,
            _ => Priority::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// High and urgent leads get surfaced on the dashboard.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Priority::High | Priority::Urgent)
    }

    pub fn badge(&self) -> Badge {
        match self {
            Priority::Low => Badge {
                label: "Low",
                bg: "bg-gray-100",
                text: "text-gray-700",
            },
            Priority::Normal => Badge {
                label: "Normal",
                bg: "bg-blue-100",
                text: "text-blue-700",
            },
            Priority::High => Badge {
                label: "High",
                bg: "bg-orange-100",
                text: "text-orange-700",
            },
            Priority::Urgent => Badge {
                label: "Urgent",
                bg: "bg-red-100",
                text: "text-red-700",
            },
        }
    }
}

/// Payment bookkeeping state. Record-keeping only; no gateway sits behind
/// this. Falls back to `Unpaid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Unpaid,
        PaymentStatus::Partial,
        PaymentStatus::Paid,
        PaymentStatus::Refunded,
    ];

    pub fn parse(s: &str) -> Self {
        match s {
            "partial" => PaymentStatus::Partial,
            "paid" => PaymentStatus::Paid,
            "refunded" => PaymentStatus::Refunded,
            _ => PaymentStatus::Unpaid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            PaymentStatus::Unpaid => Badge {
                label: "Unpaid",
                bg: "bg-red-100",
                text: "text-red-800",
            },
            PaymentStatus::Partial => Badge {
                label: "Partial",
                bg: "bg-yellow-100",
                text: "text-yellow-800",
            },
            PaymentStatus::Paid => Badge {
                label: "Paid",
                bg: "bg-green-100",
                text: "text-green-800",
            },
            PaymentStatus::Refunded => Badge {
                label: "Refunded",
                bg: "bg-gray-100",
                text: "text-gray-800",
            },
        }
    }
}

/// A quote request and its administrative record, as stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub custom_event_type: Option<String>,
    pub guest_count: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub event_location: String,
    pub distance_miles: i64,
    pub water_connection: String,
    pub cleaning_attendant: bool,
    pub baby_changing_station: bool,
    pub additional_requests: Option<String>,
    /// Authoritative billing amount in integer cents.
    pub quote_amount: i64,
    pub status: String,
    pub priority: String,
    pub admin_notes: Option<String>,
    pub tags: Vec<String>,
    pub deposit_amount: i64,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub last_contacted_at: Option<DateTime<Utc>>,
    pub last_updated_by: Option<Uuid>,
}

impl Quote {
    pub fn status(&self) -> QuoteStatus {
        QuoteStatus::parse(&self.status)
    }

    pub fn priority(&self) -> Priority {
        Priority::parse(&self.priority)
    }

    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::parse(&self.payment_status)
    }

    /// Event type shown to humans: the custom label wins when "Other Type of
    /// Event" was picked.
    pub fn display_event_type(&self) -> &str {
        if self.event_type == OTHER_EVENT_TYPE {
            self.custom_event_type
                .as_deref()
                .filter(|label| !label.is_empty())
                .unwrap_or(&self.event_type)
        } else {
            &self.event_type
        }
    }

    /// Snapshot of the pricing-relevant fields for the pricing engine.
    pub fn pricing_input(&self) -> PricingInput {
        PricingInput {
            start_time: Some(self.start_time.clone()),
            end_time: Some(self.end_time.clone()),
            guest_count: self.guest_count.clone(),
            distance_miles: self.distance_miles,
            cleaning_attendant: self.cleaning_attendant,
            baby_changing_station: self.baby_changing_station,
        }
    }

    /// Amount still owed after the recorded deposit, in cents.
    pub fn balance_due_cents(&self) -> i64 {
        self.quote_amount - self.deposit_amount
    }
}

/// Payload for a new quote from the public form.
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub custom_event_type: Option<String>,
    pub guest_count: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub event_location: String,
    pub distance_miles: i64,
    pub water_connection: String,
    pub cleaning_attendant: bool,
    pub baby_changing_station: bool,
    pub additional_requests: Option<String>,
    pub quote_amount: i64,
}

/// Admin-editable field set for a reservation update.
#[derive(Debug, Clone)]
pub struct QuoteChanges {
    pub status: QuoteStatus,
    pub priority: Priority,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub event_location: String,
    pub distance_miles: i64,
    pub guest_count: String,
    pub water_connection: String,
    pub cleaning_attendant: bool,
    pub baby_changing_station: bool,
    pub quote_amount: i64,
    pub deposit_amount: i64,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub tags: Vec<String>,
    pub admin_notes: Option<String>,
}
