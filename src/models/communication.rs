//! Customer communication log.
//!
//! Entries are a record of contact made through external channels. Nothing
//! is transmitted from here; logging an email does not send one.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Channel a communication went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunicationType {
    Email,
    Sms,
    Phone,
    Note,
}

impl CommunicationType {
    pub const ALL: [CommunicationType; 4] = [
        CommunicationType::Email,
        CommunicationType::Sms,
        CommunicationType::Phone,
        CommunicationType::Note,
    ];

    /// Parse the stored value, falling back to `Note`.
    pub fn parse(s: &str) -> Self {
        match s {
            "email" => CommunicationType::Email,
            "sms" => CommunicationType::Sms,
            "phone" => CommunicationType::Phone,
            _ => CommunicationType::Note,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationType::Email => "email",
            CommunicationType::Sms => "sms",
            CommunicationType::Phone => "phone",
            CommunicationType::Note => "note",
        }
    }

    /// Timeline label, e.g. "Email sent".
    pub fn label(&self) -> &'static str {
        match self {
            CommunicationType::Email => "Email sent",
            CommunicationType::Sms => "Text message sent",
            CommunicationType::Phone => "Phone call logged",
            CommunicationType::Note => "Internal note",
        }
    }

    /// Only email entries carry a subject line.
    pub fn has_subject(&self) -> bool {
        matches!(self, CommunicationType::Email)
    }
}

/// A logged customer touchpoint.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerCommunication {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub sent_by: Option<Uuid>,
    pub sent_at: DateTime<Utc>,
    pub communication_type: String,
    pub subject: Option<String>,
    pub message: String,
    pub status: String,
}

impl CustomerCommunication {
    pub fn communication_type(&self) -> CommunicationType {
        CommunicationType::parse(&self.communication_type)
    }
}

/// A pending log entry, before insertion.
#[derive(Debug, Clone)]
pub struct NewCommunication {
    pub quote_id: Uuid,
    pub sent_by: Option<Uuid>,
    pub communication_type: CommunicationType,
    pub subject: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for kind in CommunicationType::ALL {
            assert_eq!(CommunicationType::parse(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_unknown_channel_reads_as_note() {
        assert_eq!(CommunicationType::parse("fax"), CommunicationType::Note);
        assert_eq!(CommunicationType::parse(""), CommunicationType::Note);
    }

    #[test]
    fn test_only_email_has_subject() {
        assert!(CommunicationType::Email.has_subject());
        assert!(!CommunicationType::Sms.has_subject());
        assert!(!CommunicationType::Phone.has_subject());
        assert!(!CommunicationType::Note.has_subject());
    }
}
