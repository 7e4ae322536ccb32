//! Quote pricing engine.
//!
//! One pure pricing path shared by the public quote form, the JSON estimate
//! endpoint and the admin reservation editor, so every surface shows the
//! same number for the same inputs.

pub mod calculators;
pub mod rates;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{event_duration_hours, price_breakdown, LineItem, PriceBreakdown, PricingInput};
pub use rates::{RateCard, RATES};
pub use routes::router;
