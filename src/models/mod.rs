//! Data models for the quote store.

pub mod admin;
pub mod communication;
pub mod filters;
pub mod history;
pub mod quote;
pub mod stats;
pub mod template;

pub use admin::{AdminRole, AdminUser};
pub use communication::{CommunicationType, CustomerCommunication, NewCommunication};
pub use filters::{filter_and_sort, DateRange, ListFilters, SortDirection, SortField};
pub use history::{creation_entry, diff_for_history, ChangeType, NewHistory, QuoteHistory};
pub use quote::{
    Badge, NewQuote, PaymentStatus, Priority, Quote, QuoteChanges, QuoteStatus, OTHER_EVENT_TYPE,
};
pub use stats::{is_event_upcoming, is_quote_overdue, time_until_event, QuoteStats};
pub use template::{substitute_variables, EmailTemplate, TemplateCategory};
