//! Rate card for trailer rental pricing.
//!
//! Every dollar figure and threshold the pricing engine uses lives here as a
//! named value, so handlers and tests never repeat magic numbers.

use crate::geo::Coord;

/// Fixed pricing constants for restroom trailer rentals.
#[derive(Debug, Clone, Copy)]
pub struct RateCard {
    /// Base price in dollars for events up to `extended_hours` long.
    pub base_price_standard: i64,
    /// Base price in dollars once the event runs longer than `extended_hours`.
    pub base_price_extended: i64,
    /// Durations strictly greater than this many hours use the extended base.
    pub extended_hours: f64,
    /// Delivery is free within this many miles of the dispatch office.
    pub included_miles: i64,
    /// Dollars charged per mile beyond `included_miles`.
    pub per_mile_rate: i64,
    /// Flat fee for the on-site cleaning attendant add-on.
    pub cleaning_attendant_fee: i64,
    /// Flat fee for the baby changing station add-on.
    pub baby_changing_fee: i64,
    /// Dispatch office in McKinney, TX; delivery distance is measured from here.
    pub dispatch_origin: Coord,
}

impl RateCard {
    /// Surcharge table keyed by guest-count bucket. Buckets absent from the
    /// table (0-50, 50-100, or anything unrecognized) carry no surcharge.
    pub const GUEST_SURCHARGES: [(&'static str, i64); 4] = [
        ("100-150", 100),
        ("150-200", 150),
        ("200-300", 200),
        ("300-500", 400),
    ];

    /// Surcharge in dollars for a guest-count bucket, zero when none applies.
    pub fn guest_surcharge(&self, bucket: &str) -> i64 {
        Self::GUEST_SURCHARGES
            .iter()
            .find(|(name, _)| *name == bucket)
            .map(|(_, fee)| *fee)
            .unwrap_or(0)
    }
}

/// The current rate card.
pub const RATES: RateCard = RateCard {
    base_price_standard: 995,
    base_price_extended: 1300,
    extended_hours: 6.0,
    included_miles: 20,
    per_mile_rate: 3,
    cleaning_attendant_fee: 150,
    baby_changing_fee: 100,
    dispatch_origin: Coord {
        lat: 33.1972465,
        lon: -96.6397212,
    },
};
