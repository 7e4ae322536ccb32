//! Admin dashboard overview.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::db;
use crate::error::Result;
use crate::format::{format_currency, format_date, format_date_time};
use crate::models::{
    is_event_upcoming, is_quote_overdue, time_until_event, Badge, DateRange, Quote, QuoteStats,
    QuoteStatus,
};
use crate::AppState;

use super::AdminContext;

/// Query parameters for the overview
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub range: DateRange,
}

/// One range selector link
struct RangeLink {
    label: &'static str,
    href: String,
    active: bool,
}

/// One quote in the recent/urgent panels
struct QuoteRow {
    id: String,
    name: String,
    event_type: String,
    amount_display: String,
    created_display: String,
    badge: Badge,
}

/// One event in the upcoming panel
struct UpcomingRow {
    id: String,
    name: String,
    event_date_display: String,
    countdown: String,
    location: String,
    badge: Badge,
}

/// Dashboard template
#[derive(Template)]
#[template(path = "admin/dashboard.html")]
struct DashboardTemplate {
    admin_name: String,
    range_links: Vec<RangeLink>,
    revenue_display: String,
    total_count: usize,
    pending_count: usize,
    booked_count: usize,
    completed_count: usize,
    upcoming_count: usize,
    pending_follow_ups: usize,
    has_follow_ups: bool,
    conversion_display: String,
    response_display: String,
    recent: Vec<QuoteRow>,
    urgent: Vec<QuoteRow>,
    upcoming: Vec<UpcomingRow>,
    has_recent: bool,
    has_urgent: bool,
    has_upcoming: bool,
}

fn quote_row(quote: &Quote) -> QuoteRow {
    QuoteRow {
        id: quote.id.to_string(),
        name: quote.name.clone(),
        event_type: quote.display_event_type().to_string(),
        amount_display: format_currency(quote.quote_amount),
        created_display: format_date_time(quote.created_at),
        badge: quote.status().badge(),
    }
}

/// Dashboard overview with stats for the selected created-at range.
pub async fn overview(
    State(state): State<AppState>,
    AdminContext(admin): AdminContext,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>> {
    let now = Utc::now();
    let today = now.date_naive();
    let quotes = db::list_quotes(&state.db, query.range.starts_at(now)).await?;

    // Stats sit behind a short TTL so rapid reloads agree with each other
    let stats = match state.cache.stats.get(query.range.as_str()).await {
        Some(cached) => (*cached).clone(),
        None => {
            let computed = QuoteStats::compute(&quotes, now);
            state
                .cache
                .stats
                .insert(query.range.as_str().to_string(), Arc::new(computed.clone()))
                .await;
            computed
        }
    };

    let recent: Vec<QuoteRow> = quotes.iter().take(5).map(quote_row).collect();

    let urgent: Vec<QuoteRow> = quotes
        .iter()
        .filter(|quote| {
            is_quote_overdue(quote.created_at, quote.status(), now)
                || quote.priority().needs_attention()
        })
        .take(5)
        .map(quote_row)
        .collect();

    let mut upcoming_quotes: Vec<&Quote> = quotes
        .iter()
        .filter(|quote| {
            matches!(
                quote.status(),
                QuoteStatus::Booked | QuoteStatus::Contacted
            ) && is_event_upcoming(quote.event_date, today)
        })
        .collect();
    upcoming_quotes.sort_by_key(|quote| quote.event_date);
    let upcoming: Vec<UpcomingRow> = upcoming_quotes
        .iter()
        .take(5)
        .map(|quote| UpcomingRow {
            id: quote.id.to_string(),
            name: quote.name.clone(),
            event_date_display: format_date(quote.event_date),
            countdown: time_until_event(quote.event_date, today),
            location: quote.event_location.clone(),
            badge: quote.status().badge(),
        })
        .collect();

    let range_links = [
        ("Today", DateRange::Today),
        ("Past Week", DateRange::Week),
        ("Past Month", DateRange::Month),
        ("All Time", DateRange::All),
    ]
    .into_iter()
    .map(|(label, range)| RangeLink {
        label,
        href: format!("/admin?range={}", range.as_str()),
        active: range == query.range,
    })
    .collect();

    let template = DashboardTemplate {
        admin_name: admin.full_name,
        range_links,
        revenue_display: format_currency(stats.total_revenue_cents),
        total_count: stats.total,
        pending_count: stats.pending,
        booked_count: stats.booked,
        completed_count: stats.completed,
        upcoming_count: stats.upcoming_events,
        has_follow_ups: stats.pending_follow_ups > 0,
        pending_follow_ups: stats.pending_follow_ups,
        conversion_display: format!("{:.1}%", stats.conversion_rate),
        response_display: format!("{:.1}h", stats.avg_response_hours),
        has_recent: !recent.is_empty(),
        has_urgent: !urgent.is_empty(),
        has_upcoming: !upcoming.is_empty(),
        recent,
        urgent,
        upcoming,
    };

    Ok(Html(template.render()?))
}
