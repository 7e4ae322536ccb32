//! Back-office routes.
//!
//! Authentication happens upstream (the deployment's auth proxy forwards the
//! signed-in user's id); these routes only authorize, by requiring that id
//! to match an active `admin_users` row.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::AdminUser;
use crate::AppState;

pub mod communications;
pub mod dashboard;
pub mod reservations;

/// Header carrying the authenticated user id, set by the auth proxy.
pub const AUTH_USER_HEADER: &str = "x-auth-user-id";

/// The operator making the current request.
pub struct AdminContext(pub AdminUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let user_id = parts
            .headers
            .get(AUTH_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or(AppError::Unauthorized)?;

        let admin = db::find_admin_by_user_id(&state.db, user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AdminContext(admin))
    }
}

/// Build the admin router (nested under `/admin`)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::overview))
        .route("/reservations", get(reservations::list))
        .route("/reservations/export", get(reservations::export_csv))
        .route(
            "/reservations/:id",
            get(reservations::detail).post(reservations::update),
        )
        .route("/reservations/:id/delete", post(reservations::delete))
        .route(
            "/reservations/:id/contact",
            get(communications::form).post(communications::log),
        )
        .route("/calendar", get(reservations::calendar))
}
