//! Request DTOs for pricing API endpoints.

use serde::Deserialize;

use super::calculators::PricingInput;

/// Request for a live price estimate while the quote form is being filled
/// in. Every field is optional; whatever is present gets priced.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub guest_count: String,
    #[serde(default)]
    pub distance_miles: i64,
    #[serde(default)]
    pub cleaning_attendant: bool,
    #[serde(default)]
    pub baby_changing_station: bool,
}

impl EstimateRequest {
    pub fn into_input(self) -> PricingInput {
        PricingInput {
            start_time: self.start_time,
            end_time: self.end_time,
            guest_count: self.guest_count,
            distance_miles: self.distance_miles,
            cleaning_attendant: self.cleaning_attendant,
            baby_changing_station: self.baby_changing_station,
        }
    }
}
