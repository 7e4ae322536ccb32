//! In-memory caching using moka
//!
//! Email templates rarely change, and the dashboard recomputes its stats
//! over the whole quotes table, so both sit behind short TTLs. Quote rows
//! themselves are never cached; the admin always sees the store.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::db::queries;
use crate::models::{EmailTemplate, QuoteStats};

/// Cache key for the active template list.
pub const TEMPLATES_KEY: &str = "active";

/// Application cache holding email templates and dashboard stats
#[derive(Clone)]
pub struct AppCache {
    /// Active email templates (singleton list)
    pub templates: Cache<String, Arc<Vec<EmailTemplate>>>,
    /// Dashboard stats keyed by range ("today", "week", "month", "all")
    pub stats: Cache<String, Arc<QuoteStats>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Templates: 1 entry, 10 min TTL
            templates: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(10 * 60))
                .build(),

            // Dashboard stats: one entry per range, 60 s TTL so new quotes
            // show up quickly
            stats: Cache::builder()
                .max_capacity(8)
                .time_to_live(Duration::from_secs(60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn metrics(&self) -> CacheMetrics {
        CacheMetrics {
            templates_cached: self.templates.entry_count() > 0,
            stats_ranges: self.stats.entry_count(),
        }
    }

    /// Drop cached stats after any quote write
    pub fn invalidate_stats(&self) {
        self.stats.invalidate_all();
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize)]
pub struct CacheMetrics {
    pub templates_cached: bool,
    pub stats_ranges: u64,
}

/// Start background cache warmer
///
/// Warms the template cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with commonly accessed data
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match queries::list_active_templates(db).await {
        Ok(templates) => {
            cache
                .templates
                .insert(TEMPLATES_KEY.to_string(), Arc::new(templates))
                .await;
        }
        Err(e) => warn!("Failed to warm template cache: {}", e),
    }

    info!("Cache warm-up complete. Metrics: {:?}", cache.metrics());
}
