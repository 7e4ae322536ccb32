//! Marketing page handlers.
//!
//! The copy lives in the templates; handlers only pass in the rate figures
//! the pages quote, so the printed prices can never drift from the engine.

use askama::Template;
use axum::response::Html;

use crate::error::Result;
use crate::pricing::RATES;

/// Homepage template
#[derive(Template)]
#[template(path = "site/home.html")]
struct HomeTemplate {
    base_price: i64,
}

/// Restrooms page template
#[derive(Template)]
#[template(path = "site/restrooms.html")]
struct RestroomsTemplate {
    cleaning_attendant_fee: i64,
    baby_changing_fee: i64,
}

/// About page template
#[derive(Template)]
#[template(path = "site/about.html")]
struct AboutTemplate {}

/// Service area template
#[derive(Template)]
#[template(path = "site/service_area.html")]
struct ServiceAreaTemplate {
    office_lat: f64,
    office_lon: f64,
    included_miles: i64,
    per_mile_rate: i64,
}

/// Homepage
pub async fn home() -> Result<Html<String>> {
    let template = HomeTemplate {
        base_price: RATES.base_price_standard,
    };
    Ok(Html(template.render()?))
}

/// Trailer features and add-on services
pub async fn restrooms() -> Result<Html<String>> {
    let template = RestroomsTemplate {
        cleaning_attendant_fee: RATES.cleaning_attendant_fee,
        baby_changing_fee: RATES.baby_changing_fee,
    };
    Ok(Html(template.render()?))
}

/// About page
pub async fn about() -> Result<Html<String>> {
    let template = AboutTemplate {};
    Ok(Html(template.render()?))
}

/// Service area map and delivery pricing
pub async fn service_area() -> Result<Html<String>> {
    let template = ServiceAreaTemplate {
        office_lat: RATES.dispatch_origin.lat,
        office_lon: RATES.dispatch_origin.lon,
        included_miles: RATES.included_miles,
        per_mile_rate: RATES.per_mile_rate,
    };
    Ok(Html(template.render()?))
}
