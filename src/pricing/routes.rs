//! JSON endpoints backing the quote form's live behavior.
//!
//! The form recalculates its estimate as fields change and looks up
//! addresses as the customer types; both calls land here.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::geo::AddressCandidate;
use crate::AppState;

use super::calculators::price_breakdown;
use super::requests::EstimateRequest;
use super::responses::EstimateResponse;

/// Build the pricing API router (nested under `/api`)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote/estimate", post(estimate))
        .route("/geocode", get(geocode))
}

/// Live price preview. The submit path prices through the same engine, so
/// the number shown here is the number stored.
async fn estimate(Json(request): Json<EstimateRequest>) -> Json<EstimateResponse> {
    let breakdown = price_breakdown(&request.into_input());
    Json(breakdown.into())
}

/// Query parameters for address lookup
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub q: String,
}

/// Address candidates for the location autocomplete, each annotated with
/// its delivery distance.
async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<Vec<AddressCandidate>>> {
    let candidates = state.geo.search(&query.q).await?;
    Ok(Json(candidates))
}
