//! Environment configuration.

use std::env;

/// Default public Nominatim instance.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Runtime settings, read once at startup. `.env` is loaded by `main`
/// before this runs.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub geocoder_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable is required".to_string())?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let geocoder_url =
            env::var("GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());

        Ok(Self {
            database_url,
            bind_addr,
            geocoder_url,
        })
    }
}
