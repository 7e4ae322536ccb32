//! Address lookup and delivery distance.
//!
//! Address candidates come from the OpenStreetMap Nominatim search API, and
//! every candidate is annotated with its great-circle distance from the
//! McKinney dispatch office. That distance feeds straight into the quote's
//! distance fee, so the same formula is used anywhere a distance is shown.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pricing::RATES;

/// Mean Earth radius in miles, for the haversine formula.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Geocoder queries shorter than this return no candidates.
pub const MIN_QUERY_CHARS: usize = 3;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Great-circle distance between two coordinates, in miles.
pub fn haversine_miles(a: Coord, b: Coord) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Whole-mile distance from the dispatch office, as stored on a quote.
pub fn miles_from_dispatch(point: Coord) -> i64 {
    haversine_miles(RATES.dispatch_origin, point).round() as i64
}

/// One raw search result from Nominatim. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Address candidate returned to the quote form, annotated with its
/// delivery distance.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AddressCandidate {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub distance_miles: i64,
}

impl AddressCandidate {
    /// Candidates with coordinates that fail to parse are dropped.
    fn from_place(place: NominatimPlace) -> Option<Self> {
        let lat = place.lat.parse::<f64>().ok()?;
        let lon = place.lon.parse::<f64>().ok()?;
        Some(Self {
            display_name: place.display_name,
            lat,
            lon,
            distance_miles: miles_from_dispatch(Coord { lat, lon }),
        })
    }
}

/// Thin client for the Nominatim search API.
#[derive(Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeoClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Look up US address candidates for a free-text query.
    ///
    /// Queries under [`MIN_QUERY_CHARS`] characters return an empty list
    /// without touching the geocoder, matching the form's debounce behavior.
    pub async fn search(&self, query: &str) -> Result<Vec<AddressCandidate>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let places: Vec<NominatimPlace> = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("format", "json"),
                ("q", query),
                ("countrycodes", "us"),
                ("limit", "5"),
            ])
            .header(reqwest::header::USER_AGENT, "MelroseMobileRestrooms/1.0")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(places
            .into_iter()
            .filter_map(AddressCandidate::from_place)
            .collect())
    }
}
