//! Dashboard statistics and schedule helpers.
//!
//! Pure functions over already-fetched quote rows. The caller supplies the
//! clock, so the numbers are reproducible in tests and cacheable per range.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::quote::{Quote, QuoteStatus};

/// Pending quotes older than this many hours need a follow-up.
pub const FOLLOW_UP_HOURS: i64 = 48;

/// Aggregate numbers for the dashboard overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuoteStats {
    pub total: usize,
    pub pending: usize,
    pub contacted: usize,
    pub booked: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Revenue counts booked and completed quotes only, in cents.
    pub total_revenue_cents: i64,
    /// Booked or contacted quotes whose event date has not passed.
    pub upcoming_events: usize,
    /// Mean hours from creation to first contact, over contacted quotes.
    pub avg_response_hours: f64,
    /// Percentage of all quotes that reached booked or completed.
    pub conversion_rate: f64,
    pub pending_follow_ups: usize,
}

impl QuoteStats {
    pub fn compute(quotes: &[Quote], now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let mut stats = QuoteStats {
            total: quotes.len(),
            ..Default::default()
        };

        let mut response_hours_sum = 0.0;
        let mut response_count = 0usize;

        for quote in quotes {
            let status = quote.status();
            match status {
                QuoteStatus::Pending => stats.pending += 1,
                QuoteStatus::Contacted => stats.contacted += 1,
                QuoteStatus::Booked => stats.booked += 1,
                QuoteStatus::Completed => stats.completed += 1,
                QuoteStatus::Cancelled => stats.cancelled += 1,
            }

            if matches!(status, QuoteStatus::Booked | QuoteStatus::Completed) {
                stats.total_revenue_cents += quote.quote_amount;
            }

            if matches!(status, QuoteStatus::Booked | QuoteStatus::Contacted)
                && is_event_upcoming(quote.event_date, today)
            {
                stats.upcoming_events += 1;
            }

            if let Some(contacted_at) = quote.last_contacted_at {
                response_hours_sum +=
                    (contacted_at - quote.created_at).num_seconds() as f64 / 3600.0;
                response_count += 1;
            }

            if is_quote_overdue(quote.created_at, status, now) {
                stats.pending_follow_ups += 1;
            }
        }

        if response_count > 0 {
            stats.avg_response_hours = response_hours_sum / response_count as f64;
        }
        if stats.total > 0 {
            stats.conversion_rate =
                (stats.booked + stats.completed) as f64 / stats.total as f64 * 100.0;
        }

        stats
    }
}

/// Whether the event date is today or later.
pub fn is_event_upcoming(event_date: NaiveDate, today: NaiveDate) -> bool {
    event_date >= today
}

/// A pending quote older than the follow-up window needs attention.
pub fn is_quote_overdue(
    created_at: DateTime<Utc>,
    status: QuoteStatus,
    now: DateTime<Utc>,
) -> bool {
    status == QuoteStatus::Pending && now - created_at > Duration::hours(FOLLOW_UP_HOURS)
}

/// Countdown label for an event date, as shown on the upcoming-events panel.
pub fn time_until_event(event_date: NaiveDate, today: NaiveDate) -> String {
    let days = (event_date - today).num_days();
    if days < 0 {
        "Past event".to_string()
    } else if days == 0 {
        "Today".to_string()
    } else if days == 1 {
        "Tomorrow".to_string()
    } else if days < 7 {
        format!("{days} days")
    } else if days < 30 {
        format!("{} weeks", days / 7)
    } else {
        format!("{} months", days / 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn quote_with(status: &str, amount: i64) -> Quote {
        Quote {
            id: Uuid::nil(),
            created_at: "2025-01-02T10:00:00Z".parse().unwrap(),
            updated_at: "2025-01-02T10:00:00Z".parse().unwrap(),
            name: "Jordan Ray".to_string(),
            email: "jordan@example.com".to_string(),
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

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    // ==================== QuoteStats tests ====================

    #[test]
    fn test_stats_counts_by_status() {
        let quotes = vec![
            quote_with("pending", 99_500),
            quote_with("pending", 99_500),
            quote_with("booked", 130_000),
            quote_with("completed", 179_500),
            quote_with("cancelled", 99_500),
        ];
        let stats = QuoteStats::compute(&quotes, noon(2025, 1, 2));
        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.booked, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.contacted, 0);
    }

    #[test]
    fn test_revenue_counts_booked_and_completed_only() {
        let quotes = vec![
            quote_with("pending", 99_500),
            quote_with("booked", 130_000),
            quote_with("completed", 179_500),
            quote_with("cancelled", 500_000),
        ];
        let stats = QuoteStats::compute(&quotes, noon(2025, 1, 2));
        assert_eq!(stats.total_revenue_cents, 309_500);
    }

    #[test]
    fn test_conversion_rate() {
        let quotes = vec![
            quote_with("pending", 0),
            quote_with("booked", 0),
            quote_with("completed", 0),
            quote_with("cancelled", 0),
        ];
        let stats = QuoteStats::compute(&quotes, noon(2025, 1, 2));
        assert_eq!(stats.conversion_rate, 50.0);
    }

    #[test]
    fn test_empty_input_is_all_zeroes() {
        let stats = QuoteStats::compute(&[], noon(2025, 1, 2));
        assert_eq!(stats, QuoteStats::default());
    }

    #[test]
    fn test_avg_response_hours() {
        let mut fast = quote_with("contacted", 0);
        fast.last_contacted_at = Some("2025-01-02T12:00:00Z".parse().unwrap());
        let mut slow = quote_with("booked", 0);
        slow.last_contacted_at = Some("2025-01-02T16:00:00Z".parse().unwrap());
        let never = quote_with("pending", 0);

        let stats = QuoteStats::compute(&[fast, slow, never], noon(2025, 1, 5));
        // 2h and 6h after the 10:00 creation time
        assert_eq!(stats.avg_response_hours, 4.0);
    }

    #[test]
    fn test_pending_follow_ups_use_the_48_hour_window() {
        let fresh = quote_with("pending", 0);
        let stale = quote_with("pending", 0);

        // One hour past creation: nothing due yet
        let stats = QuoteStats::compute(
            &[fresh.clone(), stale.clone()],
            noon(2025, 1, 2) - Duration::hours(1),
        );
        assert_eq!(stats.pending_follow_ups, 0);

        // Three days later both are overdue
        let stats = QuoteStats::compute(&[fresh, stale], noon(2025, 1, 5));
        assert_eq!(stats.pending_follow_ups, 2);
    }

    #[test]
    fn test_upcoming_events_ignore_terminal_statuses() {
        let quotes = vec![
            quote_with("booked", 0),
            quote_with("contacted", 0),
            quote_with("completed", 0),
            quote_with("cancelled", 0),
        ];
        let stats = QuoteStats::compute(&quotes, noon(2025, 6, 1));
        assert_eq!(stats.upcoming_events, 2);

        // After the event date nothing is upcoming
        let quotes = vec![quote_with("booked", 0)];
        let stats = QuoteStats::compute(&quotes, noon(2025, 7, 1));
        assert_eq!(stats.upcoming_events, 0);
    }

    // ==================== schedule helper tests ====================

    #[test]
    fn test_is_event_upcoming() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        assert!(is_event_upcoming(today, today));
        assert!(is_event_upcoming(today.succ_opt().unwrap(), today));
        assert!(!is_event_upcoming(today.pred_opt().unwrap(), today));
    }

    #[test]
    fn test_is_quote_overdue_boundary() {
        let created: DateTime<Utc> = "2025-01-02T10:00:00Z".parse().unwrap();
        let exactly_48h = created + Duration::hours(48);
        assert!(!is_quote_overdue(created, QuoteStatus::Pending, exactly_48h));
        assert!(is_quote_overdue(
            created,
            QuoteStatus::Pending,
            exactly_48h + Duration::minutes(1)
        ));
    }

    #[test]
    fn test_is_quote_overdue_only_for_pending() {
        let created: DateTime<Utc> = "2025-01-02T10:00:00Z".parse().unwrap();
        let much_later = created + Duration::days(30);
        assert!(!is_quote_overdue(created, QuoteStatus::Contacted, much_later));
        assert!(!is_quote_overdue(created, QuoteStatus::Booked, much_later));
    }

    #[test]
    fn test_time_until_event_labels() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let on = |days: i64| today + Duration::days(days);

        assert_eq!(time_until_event(on(-1), today), "Past event");
        assert_eq!(time_until_event(on(0), today), "Today");
        assert_eq!(time_until_event(on(1), today), "Tomorrow");
        assert_eq!(time_until_event(on(5), today), "5 days");
        assert_eq!(time_until_event(on(13), today), "1 weeks");
        assert_eq!(time_until_event(on(21), today), "3 weeks");
        assert_eq!(time_until_event(on(65), today), "2 months");
    }
}
