//! Core quote pricing functions.
//!
//! Pure functions for pricing math - no database access, no clock reads.
//! The public quote form and the admin reservation editor both price through
//! here, so the two surfaces can never disagree about a number.

use chrono::NaiveTime;

use crate::pricing::rates::RATES;

/// Pricing-relevant snapshot of a quote request.
///
/// Times are carried as the raw wall-clock strings the form submits and the
/// store returns. Malformed or missing values contribute nothing to the
/// price instead of failing the whole computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingInput {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub guest_count: String,
    pub distance_miles: i64,
    pub cleaning_attendant: bool,
    pub baby_changing_station: bool,
}

/// One named, dollar-valued component of a price breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub label: String,
    pub amount: i64,
}

/// Itemized price for a quote request.
///
/// `total` is always the exact sum of `line_items`; both are rebuilt from
/// scratch on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub line_items: Vec<LineItem>,
    pub total: i64,
}

impl PriceBreakdown {
    /// Amount persisted on the quote record, in integer cents.
    pub fn total_cents(&self) -> i64 {
        self.total * 100
    }
}

/// Parse a wall-clock time as the form submits it ("14:30") or as the store
/// returns it ("14:30:00").
fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Elapsed hours between two wall-clock times on the same day.
///
/// Returns `None` when either string fails to parse. The result is signed:
/// an end before the start comes back negative, since events are assumed not
/// to cross midnight.
pub fn event_duration_hours(start: &str, end: &str) -> Option<f64> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    let seconds = (end - start).num_seconds();
    Some(seconds as f64 / 3600.0)
}

/// Compute the itemized price for a quote request.
///
/// Line items are appended in a fixed order: base tier, guest surcharge,
/// distance fee, then add-ons. The base line only appears when both times
/// parse; the other components are independent of it.
pub fn price_breakdown(input: &PricingInput) -> PriceBreakdown {
    let mut line_items = Vec::new();

    let start = input.start_time.as_deref().unwrap_or("");
    let end = input.end_time.as_deref().unwrap_or("");
    if let Some(duration) = event_duration_hours(start, end) {
        if duration > RATES.extended_hours {
            line_items.push(LineItem {
                label: format!("Base Price (>{} hours)", RATES.extended_hours),
                amount: RATES.base_price_extended,
            });
        } else {
            line_items.push(LineItem {
                label: format!("Base Price (\u{2264}{} hours)", RATES.extended_hours),
                amount: RATES.base_price_standard,
            });
        }
    }

    let surcharge = RATES.guest_surcharge(&input.guest_count);
    if surcharge > 0 {
        line_items.push(LineItem {
            label: format!("Guest Count Surcharge ({})", input.guest_count),
            amount: surcharge,
        });
    }

    if input.distance_miles > RATES.included_miles {
        let extra = input.distance_miles - RATES.included_miles;
        line_items.push(LineItem {
            label: format!("Distance Fee ({} mi \u{d7} ${})", extra, RATES.per_mile_rate),
            amount: extra * RATES.per_mile_rate,
        });
    }

    if input.cleaning_attendant {
        line_items.push(LineItem {
            label: "Cleaning Attendant".to_string(),
            amount: RATES.cleaning_attendant_fee,
        });
    }

    if input.baby_changing_station {
        line_items.push(LineItem {
            label: "Baby Changing Station".to_string(),
            amount: RATES.baby_changing_fee,
        });
    }

    let total = line_items.iter().map(|item| item.amount).sum();

    PriceBreakdown { line_items, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(breakdown: &PriceBreakdown) -> Vec<&str> {
        breakdown
            .line_items
            .iter()
            .map(|item| item.label.as_str())
            .collect()
    }

    // ==================== event_duration_hours tests ====================

    #[test]
    fn test_duration_whole_hours() {
        assert_eq!(event_duration_hours("09:00", "14:00"), Some(5.0));
        assert_eq!(event_duration_hours("10:00", "18:00"), Some(8.0));
    }

    #[test]
    fn test_duration_fractional_hours() {
        assert_eq!(event_duration_hours("09:30", "10:00"), Some(0.5));
        assert_eq!(event_duration_hours("09:00", "09:15"), Some(0.25));
    }

    #[test]
    fn test_duration_accepts_seconds_suffix() {
        // The store returns times as HH:MM:SS
        assert_eq!(event_duration_hours("09:00:00", "14:00:00"), Some(5.0));
    }

    #[test]
    fn test_duration_end_before_start_is_negative() {
        assert_eq!(event_duration_hours("18:00", "10:00"), Some(-8.0));
    }

    #[test]
    fn test_duration_unparseable_input() {
        assert_eq!(event_duration_hours("", "14:00"), None);
        assert_eq!(event_duration_hours("09:00", ""), None);
        assert_eq!(event_duration_hours("morning", "14:00"), None);
        assert_eq!(event_duration_hours("25:00", "14:00"), None);
    }

    // ==================== base price tier tests ====================

    #[test]
    fn test_base_price_standard_tier() {
        let input = PricingInput {
            start_time: Some("09:00".to_string()),
            end_time: Some("14:00".to_string()),
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(labels(&breakdown), vec!["Base Price (\u{2264}6 hours)"]);
        assert_eq!(breakdown.total, 995);
    }

    #[test]
    fn test_base_price_extended_tier() {
        let input = PricingInput {
            start_time: Some("10:00".to_string()),
            end_time: Some("18:00".to_string()),
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(labels(&breakdown), vec!["Base Price (>6 hours)"]);
        assert_eq!(breakdown.total, 1300);
    }

    #[test]
    fn test_base_price_exactly_six_hours_is_standard() {
        // The extended tier starts strictly above six hours
        let input = PricingInput {
            start_time: Some("09:00".to_string()),
            end_time: Some("15:00".to_string()),
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(breakdown.line_items[0].amount, 995);
    }

    #[test]
    fn test_base_price_just_over_six_hours_is_extended() {
        let input = PricingInput {
            start_time: Some("09:00".to_string()),
            end_time: Some("15:01".to_string()),
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(breakdown.line_items[0].amount, 1300);
    }

    #[test]
    fn test_no_base_line_when_times_missing() {
        let input = PricingInput {
            guest_count: "100-150".to_string(),
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(labels(&breakdown), vec!["Guest Count Surcharge (100-150)"]);
        assert_eq!(breakdown.total, 100);
    }

    #[test]
    fn test_no_base_line_when_time_unparseable() {
        let input = PricingInput {
            start_time: Some("soonish".to_string()),
            end_time: Some("14:00".to_string()),
            distance_miles: 25,
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(labels(&breakdown), vec!["Distance Fee (5 mi \u{d7} $3)"]);
        assert_eq!(breakdown.total, 15);
    }

    #[test]
    fn test_negative_duration_falls_in_standard_tier() {
        // An end before the start never reaches the extended tier
        let input = PricingInput {
            start_time: Some("18:00".to_string()),
            end_time: Some("10:00".to_string()),
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(breakdown.line_items[0].amount, 995);
    }

    // ==================== guest surcharge tests ====================

    #[test]
    fn test_small_buckets_have_no_surcharge_line() {
        for bucket in ["0-50", "50-100"] {
            let input = PricingInput {
                guest_count: bucket.to_string(),
                ..Default::default()
            };
            let breakdown = price_breakdown(&input);
            assert!(breakdown.line_items.is_empty(), "bucket {bucket}");
            assert_eq!(breakdown.total, 0);
        }
    }

    #[test]
    fn test_surcharge_buckets() {
        let cases = [
            ("100-150", 100),
            ("150-200", 150),
            ("200-300", 200),
            ("300-500", 400),
        ];
        for (bucket, expected) in cases {
            let input = PricingInput {
                guest_count: bucket.to_string(),
                ..Default::default()
            };
            let breakdown = price_breakdown(&input);
            assert_eq!(
                labels(&breakdown),
                vec![format!("Guest Count Surcharge ({bucket})")],
                "bucket {bucket}"
            );
            assert_eq!(breakdown.total, expected, "bucket {bucket}");
        }
    }

    #[test]
    fn test_empty_guest_count_is_fine() {
        let breakdown = price_breakdown(&PricingInput::default());
        assert!(breakdown.line_items.is_empty());
        assert_eq!(breakdown.total, 0);
    }

    // ==================== distance fee tests ====================

    #[test]
    fn test_no_distance_fee_within_included_radius() {
        for miles in [0, 10, 20] {
            let input = PricingInput {
                distance_miles: miles,
                ..Default::default()
            };
            let breakdown = price_breakdown(&input);
            assert!(breakdown.line_items.is_empty(), "{miles} miles");
        }
    }

    #[test]
    fn test_distance_fee_charges_only_extra_miles() {
        let input = PricingInput {
            distance_miles: 21,
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(labels(&breakdown), vec!["Distance Fee (1 mi \u{d7} $3)"]);
        assert_eq!(breakdown.total, 3);
    }

    #[test]
    fn test_distance_fee_thirty_five_miles() {
        let input = PricingInput {
            distance_miles: 35,
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(labels(&breakdown), vec!["Distance Fee (15 mi \u{d7} $3)"]);
        assert_eq!(breakdown.total, 45);
    }

    // ==================== add-on tests ====================

    #[test]
    fn test_add_on_fees() {
        let input = PricingInput {
            cleaning_attendant: true,
            baby_changing_station: true,
            ..Default::default()
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(
            labels(&breakdown),
            vec!["Cleaning Attendant", "Baby Changing Station"]
        );
        assert_eq!(breakdown.total, 250);
    }

    // ==================== full breakdown tests ====================

    #[test]
    fn test_short_local_event() {
        // 5h, 50-100 guests, 10 miles, no add-ons: base price only
        let input = PricingInput {
            start_time: Some("09:00".to_string()),
            end_time: Some("14:00".to_string()),
            guest_count: "50-100".to_string(),
            distance_miles: 10,
            cleaning_attendant: false,
            baby_changing_station: false,
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(labels(&breakdown), vec!["Base Price (\u{2264}6 hours)"]);
        assert_eq!(breakdown.total, 995);
        assert_eq!(breakdown.total_cents(), 99_500);
    }

    #[test]
    fn test_long_large_distant_event_with_add_ons() {
        // 8h, 200-300 guests, 35 miles, both add-ons
        let input = PricingInput {
            start_time: Some("10:00".to_string()),
            end_time: Some("18:00".to_string()),
            guest_count: "200-300".to_string(),
            distance_miles: 35,
            cleaning_attendant: true,
            baby_changing_station: true,
        };
        let breakdown = price_breakdown(&input);
        assert_eq!(
            labels(&breakdown),
            vec![
                "Base Price (>6 hours)",
                "Guest Count Surcharge (200-300)",
                "Distance Fee (15 mi \u{d7} $3)",
                "Cleaning Attendant",
                "Baby Changing Station",
            ]
        );
        assert_eq!(
            breakdown
                .line_items
                .iter()
                .map(|item| item.amount)
                .collect::<Vec<_>>(),
            vec![1300, 200, 45, 150, 100]
        );
        assert_eq!(breakdown.total, 1795);
        assert_eq!(breakdown.total_cents(), 179_500);
    }

    #[test]
    fn test_total_equals_sum_of_line_items() {
        let input = PricingInput {
            start_time: Some("08:00".to_string()),
            end_time: Some("20:00".to_string()),
            guest_count: "300-500".to_string(),
            distance_miles: 50,
            cleaning_attendant: true,
            baby_changing_station: false,
        };
        let breakdown = price_breakdown(&input);
        let sum: i64 = breakdown.line_items.iter().map(|item| item.amount).sum();
        assert_eq!(breakdown.total, sum);
    }

    #[test]
    fn test_breakdown_is_reproducible() {
        let input = PricingInput {
            start_time: Some("10:00".to_string()),
            end_time: Some("18:00".to_string()),
            guest_count: "200-300".to_string(),
            distance_miles: 35,
            cleaning_attendant: true,
            baby_changing_station: true,
        };
        assert_eq!(price_breakdown(&input), price_breakdown(&input));
    }
}
