//! Audit trail for quote records.
//!
//! Every admin edit is diffed against the stored row and the differences are
//! written as history entries, one per changed field. The timeline view
//! renders these verbatim, so descriptions are written for humans.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::quote::{Quote, QuoteChanges};

/// Kind of change a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Create,
    Update,
    StatusChange,
    NoteAdded,
}

impl ChangeType {
    /// Parse the stored value, falling back to `Update`.
    pub fn parse(s: &str) -> Self {
        match s {
            "create" => ChangeType::Create,
            "status_change" => ChangeType::StatusChange,
            "note_added" => ChangeType::NoteAdded,
            _ => ChangeType::Update,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Create => "create",
            ChangeType::Update => "update",
            ChangeType::StatusChange => "status_change",
            ChangeType::NoteAdded => "note_added",
        }
    }
}

/// One stored audit entry for a quote.
#[derive(Debug, Clone, FromRow)]
pub struct QuoteHistory {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub changed_by: Option<Uuid>,
    pub changed_at: DateTime<Utc>,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub change_type: String,
}

impl QuoteHistory {
    /// Human description for the timeline view.
    pub fn describe(&self) -> String {
        match ChangeType::parse(&self.change_type) {
            ChangeType::Create => "Quote request received".to_string(),
            ChangeType::StatusChange => format!(
                "Status changed from \"{}\" to \"{}\"",
                self.old_value.as_deref().unwrap_or("-"),
                self.new_value.as_deref().unwrap_or("-"),
            ),
            ChangeType::NoteAdded => "Admin notes updated".to_string(),
            ChangeType::Update => format!(
                "{} changed from \"{}\" to \"{}\"",
                self.field_name,
                self.old_value.as_deref().unwrap_or("-"),
                self.new_value.as_deref().unwrap_or("-"),
            ),
        }
    }
}

/// A pending audit entry, before insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistory {
    pub quote_id: Uuid,
    pub changed_by: Option<Uuid>,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub change_type: ChangeType,
}

/// The entry written when a quote is first inserted.
pub fn creation_entry(quote_id: Uuid) -> NewHistory {
    NewHistory {
        quote_id,
        changed_by: None,
        field_name: "quote".to_string(),
        old_value: None,
        new_value: Some("created".to_string()),
        change_type: ChangeType::Create,
    }
}

/// Compute the audit entries for an admin edit.
///
/// Status transitions and note edits get their dedicated change kinds; every
/// other differing field becomes a plain update entry. Unchanged fields
/// produce nothing, so saving without edits leaves the trail untouched.
pub fn diff_for_history(
    old: &Quote,
    changes: &QuoteChanges,
    actor: Option<Uuid>,
) -> Vec<NewHistory> {
    let mut entries = Vec::new();

    let mut track = |field: &str, old_value: String, new_value: String, kind: ChangeType| {
        if old_value != new_value {
            entries.push(NewHistory {
                quote_id: old.id,
                changed_by: actor,
                field_name: field.to_string(),
                old_value: Some(old_value),
                new_value: Some(new_value),
                change_type: kind,
            });
        }
    };

    track(
        "status",
        old.status.clone(),
        changes.status.as_str().to_string(),
        ChangeType::StatusChange,
    );
    track(
        "priority",
        old.priority.clone(),
        changes.priority.as_str().to_string(),
        ChangeType::Update,
    );
    track(
        "event_date",
        old.event_date.to_string(),
        changes.event_date.to_string(),
        ChangeType::Update,
    );
    track(
        "start_time",
        old.start_time.clone(),
        changes.start_time.clone(),
        ChangeType::Update,
    );
    track(
        "end_time",
        old.end_time.clone(),
        changes.end_time.clone(),
        ChangeType::Update,
    );
    track(
        "event_location",
        old.event_location.clone(),
        changes.event_location.clone(),
        ChangeType::Update,
    );
    track(
        "distance_miles",
        old.distance_miles.to_string(),
        changes.distance_miles.to_string(),
        ChangeType::Update,
    );
    track(
        "guest_count",
        old.guest_count.clone(),
        changes.guest_count.clone(),
        ChangeType::Update,
    );
    track(
        "water_connection",
        old.water_connection.clone(),
        changes.water_connection.clone(),
        ChangeType::Update,
    );
    track(
        "cleaning_attendant",
        old.cleaning_attendant.to_string(),
        changes.cleaning_attendant.to_string(),
        ChangeType::Update,
    );
    track(
        "baby_changing_station",
        old.baby_changing_station.to_string(),
        changes.baby_changing_station.to_string(),
        ChangeType::Update,
    );
    track(
        "quote_amount",
        old.quote_amount.to_string(),
        changes.quote_amount.to_string(),
        ChangeType::Update,
    );
    track(
        "deposit_amount",
        old.deposit_amount.to_string(),
        changes.deposit_amount.to_string(),
        ChangeType::Update,
    );
    track(
        "payment_status",
        old.payment_status.clone(),
        changes.payment_status.as_str().to_string(),
        ChangeType::Update,
    );
    track(
        "payment_method",
        old.payment_method.clone().unwrap_or_default(),
        changes.payment_method.clone().unwrap_or_default(),
        ChangeType::Update,
    );
    track(
        "tags",
        old.tags.join(", "),
        changes.tags.join(", "),
        ChangeType::Update,
    );
    track(
        "admin_notes",
        old.admin_notes.clone().unwrap_or_default(),
        changes.admin_notes.clone().unwrap_or_default(),
        ChangeType::NoteAdded,
    );

    entries
}
