//! In-memory filtering and sorting for the reservations list.
//!
//! The admin views work on the full fetched set; at this data size the
//! search box and column sorts are cheap to run per request.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::quote::{Quote, QuoteStatus};

/// Column the reservations list can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    EventDate,
    Name,
    QuoteAmount,
    Status,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::EventDate => "event_date",
            SortField::Name => "name",
            SortField::QuoteAmount => "quote_amount",
            SortField::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Created-at window for the dashboard range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Today,
    Week,
    Month,
    #[default]
    All,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::All => "all",
        }
    }

    /// Earliest `created_at` the range admits, or `None` for no limit.
    pub fn starts_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DateRange::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|start| start.and_utc()),
            DateRange::Week => Some(now - Duration::days(7)),
            DateRange::Month => Some(now - Duration::days(30)),
            DateRange::All => None,
        }
    }
}

/// Search, filter and sort settings for the reservations list.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    /// Case-insensitive needle matched against name, email, phone and
    /// event type. Empty means no search.
    pub search: String,
    /// `None` means every status.
    pub status: Option<QuoteStatus>,
    pub sort: SortField,
    pub direction: SortDirection,
}

fn matches_search(quote: &Quote, needle: &str) -> bool {
    quote.name.to_lowercase().contains(needle)
        || quote.email.to_lowercase().contains(needle)
        || quote.phone.contains(needle)
        || quote.event_type.to_lowercase().contains(needle)
}

/// Apply the list view's search box, status filter and column sort.
pub fn filter_and_sort(mut quotes: Vec<Quote>, filters: &ListFilters) -> Vec<Quote> {
    let needle = filters.search.trim().to_lowercase();
    if !needle.is_empty() {
        quotes.retain(|quote| matches_search(quote, &needle));
    }

    if let Some(status) = filters.status {
        quotes.retain(|quote| quote.status() == status);
    }

    quotes.sort_by(|a, b| {
        let ordering = match filters.sort {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::EventDate => a.event_date.cmp(&b.event_date),
            SortField::Name => a.name.cmp(&b.name),
            SortField::QuoteAmount => a.quote_amount.cmp(&b.quote_amount),
            SortField::Status => a.status.cmp(&b.status),
        };
        match filters.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn quote(name: &str, email: &str, status: &str, amount: i64) -> Quote {
        Quote {
            id: Uuid::new_v4(),
            created_at: "2025-01-02T10:00:00Z".parse().unwrap(),
            updated_at: "2025-01-02T10:00:00Z".parse().unwrap(),
            name: name.to_string(),
            email: email.to_string(),
            phone: "469-555-0101".to_string(),
            event_type: "Wedding".to_string(),
            custom_event_type: None,
            guest_count: "50-100".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            start_time: "09:00".to_string(),
            end_time: "14:00".to_string(),
            event_location: "McKinney, TX".to_string(),
            distance_miles: 10,
            water_connection: "yes".to_string(),
            cleaning_attendant: false,
            baby_changing_station: false,
            additional_requests: None,
            quote_amount: amount,
            status: status.to_string(),
            priority: "normal".to_string(),
            admin_notes: None,
            tags: vec![],
            deposit_amount: 0,
            payment_status: "unpaid".to_string(),
            payment_method: None,
            last_contacted_at: None,
            last_updated_by: None,
        }
    }

    // ==================== search tests ====================

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let quotes = vec![
            quote("Jordan Ray", "jordan@example.com", "pending", 99_500),
            quote("Sam Patel", "sam@example.com", "pending", 99_500),
        ];
        let filters = ListFilters {
            search: "JORDAN".to_string(),
            ..Default::default()
        };
        let out = filter_and_sort(quotes, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Jordan Ray");
    }

    #[test]
    fn test_search_matches_email_phone_and_event_type() {
        let mut corporate = quote("Sam Patel", "sam@acme.com", "pending", 99_500);
        corporate.event_type = "Corporate Event".to_string();
        corporate.phone = "214-555-0000".to_string();
        let quotes = vec![
            quote("Jordan Ray", "jordan@example.com", "pending", 99_500),
            corporate,
        ];

        for needle in ["acme", "214-555", "corporate"] {
            let filters = ListFilters {
                search: needle.to_string(),
                ..Default::default()
            };
            let out = filter_and_sort(quotes.clone(), &filters);
            assert_eq!(out.len(), 1, "needle {needle}");
            assert_eq!(out[0].name, "Sam Patel", "needle {needle}");
        }
    }

    #[test]
    fn test_blank_search_keeps_everything() {
        let quotes = vec![
            quote("Jordan Ray", "jordan@example.com", "pending", 99_500),
            quote("Sam Patel", "sam@example.com", "booked", 99_500),
        ];
        let filters = ListFilters {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_and_sort(quotes, &filters).len(), 2);
    }

    // ==================== status filter tests ====================

    #[test]
    fn test_status_filter() {
        let quotes = vec![
            quote("Jordan Ray", "jordan@example.com", "pending", 99_500),
            quote("Sam Patel", "sam@example.com", "booked", 99_500),
            quote("Alex Kim", "alex@example.com", "booked", 99_500),
        ];
        let filters = ListFilters {
            status: Some(QuoteStatus::Booked),
            ..Default::default()
        };
        let out = filter_and_sort(quotes, &filters);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|q| q.status == "booked"));
    }

    // ==================== sort tests ====================

    #[test]
    fn test_sort_by_name_ascending() {
        let quotes = vec![
            quote("Sam Patel", "sam@example.com", "pending", 99_500),
            quote("Alex Kim", "alex@example.com", "pending", 99_500),
            quote("Jordan Ray", "jordan@example.com", "pending", 99_500),
        ];
        let filters = ListFilters {
            sort: SortField::Name,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        let out = filter_and_sort(quotes, &filters);
        let names: Vec<&str> = out.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["Alex Kim", "Jordan Ray", "Sam Patel"]);
    }

    #[test]
    fn test_sort_by_amount_descending() {
        let quotes = vec![
            quote("A", "a@example.com", "pending", 99_500),
            quote("B", "b@example.com", "pending", 179_500),
            quote("C", "c@example.com", "pending", 130_000),
        ];
        let filters = ListFilters {
            sort: SortField::QuoteAmount,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        let out = filter_and_sort(quotes, &filters);
        let amounts: Vec<i64> = out.iter().map(|q| q.quote_amount).collect();
        assert_eq!(amounts, vec![179_500, 130_000, 99_500]);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let mut older = quote("Old", "old@example.com", "pending", 99_500);
        older.created_at = "2025-01-01T10:00:00Z".parse().unwrap();
        let newer = quote("New", "new@example.com", "pending", 99_500);

        let out = filter_and_sort(vec![older, newer], &ListFilters::default());
        assert_eq!(out[0].name, "New");
    }

    // ==================== DateRange tests ====================

    #[test]
    fn test_date_range_bounds() {
        let now: DateTime<Utc> = "2025-03-15T18:30:00Z".parse().unwrap();
        assert_eq!(
            DateRange::Today.starts_at(now),
            Some("2025-03-15T00:00:00Z".parse().unwrap())
        );
        assert_eq!(
            DateRange::Week.starts_at(now),
            Some("2025-03-08T18:30:00Z".parse().unwrap())
        );
        assert_eq!(
            DateRange::Month.starts_at(now),
            Some("2025-02-13T18:30:00Z".parse().unwrap())
        );
        assert_eq!(DateRange::All.starts_at(now), None);
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(SortDirection::Asc.flipped(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.flipped(), SortDirection::Asc);
    }
}
