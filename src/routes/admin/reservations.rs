//! Reservation list, calendar, detail and edit handlers.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::export::quotes_to_csv;
use crate::format::{format_currency, format_date, format_date_time};
use crate::models::{
    diff_for_history, filter_and_sort, Badge, ListFilters, PaymentStatus, Priority, QuoteChanges,
    QuoteStatus, SortDirection, SortField,
};
use crate::pricing::price_breakdown;
use crate::routes::quote::{GUEST_COUNTS, WATER_OPTIONS};
use crate::AppState;

use super::AdminContext;

/// Payment method choices for the edit form.
const PAYMENT_METHODS: [(&str, &str); 5] = [
    ("cash", "Cash"),
    ("check", "Check"),
    ("credit_card", "Credit Card"),
    ("bank_transfer", "Bank Transfer"),
    ("other", "Other"),
];

// ==================== list view ====================

/// Query parameters shared by the list view and the CSV export.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sort: Option<SortField>,
    #[serde(default)]
    pub dir: Option<SortDirection>,
}

impl ListQuery {
    fn filters(&self) -> ListFilters {
        ListFilters {
            search: self.search.clone(),
            status: self
                .status
                .as_deref()
                .filter(|value| !value.is_empty() && *value != "all")
                .map(QuoteStatus::parse),
            sort: self.sort.unwrap_or_default(),
            direction: self.dir.unwrap_or_default(),
        }
    }
}

/// One row of the reservations table
struct ListRow {
    id: String,
    name: String,
    email: String,
    event_type: String,
    created_display: String,
    event_date_display: String,
    guest_count: String,
    amount_display: String,
    status_badge: Badge,
    priority_badge: Badge,
    show_priority: bool,
}

/// One sortable column header
struct SortLink {
    label: &'static str,
    href: String,
    arrow: &'static str,
}

/// One status filter option
struct StatusOption {
    value: String,
    label: String,
    selected: bool,
}

/// Reservations list template
#[derive(Template)]
#[template(path = "admin/reservations.html")]
struct ListTemplate {
    rows: Vec<ListRow>,
    has_rows: bool,
    shown: usize,
    total: usize,
    search_value: String,
    status_options: Vec<StatusOption>,
    sort_links: Vec<SortLink>,
    export_href: String,
}

fn sort_links(query: &ListQuery, filters: &ListFilters) -> Vec<SortLink> {
    let columns = [
        (SortField::CreatedAt, "Received"),
        (SortField::Name, "Customer"),
        (SortField::EventDate, "Event Date"),
        (SortField::QuoteAmount, "Amount"),
        (SortField::Status, "Status"),
    ];

    columns
        .into_iter()
        .map(|(field, label)| {
            let active = filters.sort == field;
            // Clicking an inactive column sorts ascending; clicking the
            // active one flips it
            let dir = if active {
                filters.direction.flipped()
            } else {
                SortDirection::Asc
            };
            let status = query.status.clone().unwrap_or_default();
            SortLink {
                label,
                href: format!(
                    "/admin/reservations?search={}&status={}&sort={}&dir={}",
                    query.search,
                    status,
                    field.as_str(),
                    dir.as_str()
                ),
                arrow: if !active {
                    ""
                } else if filters.direction == SortDirection::Asc {
                    "\u{25b2}"
                } else {
                    "\u{25bc}"
                },
            }
        })
        .collect()
}

/// Searchable, sortable reservations table.
pub async fn list(
    State(state): State<AppState>,
    AdminContext(_admin): AdminContext,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    let all = db::list_quotes(&state.db, None).await?;
    let total = all.len();

    let filters = query.filters();
    let quotes = filter_and_sort(all, &filters);

    let rows: Vec<ListRow> = quotes
        .iter()
        .map(|quote| ListRow {
            id: quote.id.to_string(),
            name: quote.name.clone(),
            email: quote.email.clone(),
            event_type: quote.display_event_type().to_string(),
            created_display: format_date(quote.created_at.date_naive()),
            event_date_display: format_date(quote.event_date),
            guest_count: quote.guest_count.clone(),
            amount_display: format_currency(quote.quote_amount),
            status_badge: quote.status().badge(),
            priority_badge: quote.priority().badge(),
            show_priority: quote.priority().needs_attention(),
        })
        .collect();

    let mut status_options = vec![StatusOption {
        value: "all".to_string(),
        label: "All Statuses".to_string(),
        selected: filters.status.is_none(),
    }];
    status_options.extend(QuoteStatus::ALL.into_iter().map(|status| StatusOption {
        value: status.as_str().to_string(),
        label: status.badge().label.to_string(),
        selected: filters.status == Some(status),
    }));

    let status = query.status.clone().unwrap_or_default();
    let export_href = format!(
        "/admin/reservations/export?search={}&status={}",
        query.search, status
    );

    let template = ListTemplate {
        has_rows: !rows.is_empty(),
        shown: rows.len(),
        total,
        search_value: query.search.clone(),
        sort_links: sort_links(&query, &filters),
        status_options,
        export_href,
        rows,
    };

    Ok(Html(template.render()?))
}

/// Download the filtered reservations as CSV.
pub async fn export_csv(
    State(state): State<AppState>,
    AdminContext(_admin): AdminContext,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let all = db::list_quotes(&state.db, None).await?;
    let quotes = filter_and_sort(all, &query.filters());
    let csv = quotes_to_csv(&quotes);

    let filename = format!("reservations-{}.csv", Utc::now().date_naive());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

// ==================== calendar view ====================

/// Query parameters for the calendar
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// One event chip inside a day cell
#[derive(Debug, Clone)]
struct CalendarChip {
    id: String,
    name: String,
    start_time: String,
    badge: Badge,
}

/// One cell of the month grid
#[derive(Debug, Clone)]
struct DayCell {
    day: u32,
    in_month: bool,
    is_today: bool,
    chips: Vec<CalendarChip>,
}

impl DayCell {
    fn blank() -> Self {
        DayCell {
            day: 0,
            in_month: false,
            is_today: false,
            chips: Vec::new(),
        }
    }
}

/// Calendar template
#[derive(Template)]
#[template(path = "admin/calendar.html")]
struct CalendarTemplate {
    title: String,
    prev_href: String,
    next_href: String,
    weeks: Vec<Vec<DayCell>>,
}

/// Lay the month out as full Sunday-to-Saturday weeks.
fn month_grid(
    first: NaiveDate,
    days_in_month: u32,
    today: NaiveDate,
    mut chips: HashMap<u32, Vec<CalendarChip>>,
) -> Vec<Vec<DayCell>> {
    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);

    for _ in 0..first.weekday().num_days_from_sunday() {
        week.push(DayCell::blank());
    }

    for day in 1..=days_in_month {
        let date = first + chrono::Duration::days((day - 1) as i64);
        week.push(DayCell {
            day,
            in_month: true,
            is_today: date == today,
            chips: chips.remove(&day).unwrap_or_default(),
        });
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
    }

    if !week.is_empty() {
        while week.len() < 7 {
            week.push(DayCell::blank());
        }
        weeks.push(week);
    }

    weeks
}

/// Month calendar of reservations by event date.
pub async fn calendar(
    State(state): State<AppState>,
    AdminContext(_admin): AdminContext,
    Query(query): Query<CalendarQuery>,
) -> Result<Html<String>> {
    let today = Utc::now().date_naive();
    let (year, month) = match (query.year, query.month) {
        (Some(year), Some(month)) if (1..=12).contains(&month) => (year, month),
        _ => (today.year(), today.month()),
    };

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::BadRequest("Invalid calendar month".to_string()))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::BadRequest("Invalid calendar month".to_string()))?;
    let days_in_month = (next_first - first).num_days() as u32;

    let quotes = db::list_quotes_by_event_date(&state.db).await?;
    let mut chips: HashMap<u32, Vec<CalendarChip>> = HashMap::new();
    for quote in &quotes {
        if quote.event_date.year() == year && quote.event_date.month() == month {
            chips
                .entry(quote.event_date.day())
                .or_default()
                .push(CalendarChip {
                    id: quote.id.to_string(),
                    name: quote.name.clone(),
                    start_time: quote.start_time.clone(),
                    badge: quote.status().badge(),
                });
        }
    }

    let (prev_year, prev_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    let template = CalendarTemplate {
        title: first.format("%B %Y").to_string(),
        prev_href: format!("/admin/calendar?year={prev_year}&month={prev_month}"),
        next_href: format!("/admin/calendar?year={next_year}&month={next_month}"),
        weeks: month_grid(first, days_in_month, today, chips),
    };

    Ok(Html(template.render()?))
}

// ==================== detail view ====================

/// One option of an edit form select
struct SelectOption {
    value: String,
    label: String,
    selected: bool,
}

/// One computed price line
struct BreakdownRow {
    label: String,
    amount_display: String,
}

/// One timeline entry
struct TimelineRow {
    description: String,
    when_display: String,
}

/// One logged communication
struct CommRow {
    label: &'static str,
    subject: String,
    has_subject: bool,
    message: String,
    when_display: String,
}

/// Reservation detail template
#[derive(Template)]
#[template(path = "admin/reservation_detail.html")]
struct DetailTemplate {
    id: String,
    name: String,
    email: String,
    phone: String,
    event_type_display: String,
    created_display: String,
    status_badge: Badge,
    priority_badge: Badge,
    payment_badge: Badge,
    event_date_value: String,
    start_time_value: String,
    end_time_value: String,
    event_location: String,
    distance_miles: i64,
    additional_requests: String,
    has_additional_requests: bool,
    cleaning_attendant: bool,
    baby_changing_station: bool,
    quote_amount_value: String,
    deposit_amount_value: String,
    stored_amount_display: String,
    computed_total_display: String,
    computed_rows: Vec<BreakdownRow>,
    amounts_differ: bool,
    balance_display: String,
    status_options: Vec<SelectOption>,
    priority_options: Vec<SelectOption>,
    payment_status_options: Vec<SelectOption>,
    payment_method_options: Vec<SelectOption>,
    guest_options: Vec<SelectOption>,
    water_options: Vec<SelectOption>,
    tags_value: String,
    admin_notes_value: String,
    last_contacted_display: String,
    has_last_contacted: bool,
    timeline: Vec<TimelineRow>,
    has_timeline: bool,
    communications: Vec<CommRow>,
    has_communications: bool,
}

/// Cents rendered as a plain decimal for an `<input type="number">` value.
fn dollars_value(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}

/// Options for a free-text-backed select, keeping an unrecognized stored
/// value visible instead of silently remapping it on save.
fn select_options(options: &[&str], current: &str) -> Vec<SelectOption> {
    let mut out: Vec<SelectOption> = options
        .iter()
        .map(|option| SelectOption {
            value: option.to_string(),
            label: option.to_string(),
            selected: *option == current,
        })
        .collect();

    if !current.is_empty() && !options.contains(&current) {
        out.insert(
            0,
            SelectOption {
                value: current.to_string(),
                label: current.to_string(),
                selected: true,
            },
        );
    }

    out
}

/// Reservation detail and edit form.
pub async fn detail(
    State(state): State<AppState>,
    AdminContext(_admin): AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let quote = db::get_quote(&state.db, id).await?;
    let history = db::list_history(&state.db, id).await?;
    let communications = db::list_communications(&state.db, id).await?;

    // The stored amount is authoritative; the recomputed one is shown
    // alongside so manual overrides stand out
    let computed = price_breakdown(&quote.pricing_input());
    let amounts_differ = computed.total_cents() != quote.quote_amount;

    let status_options = QuoteStatus::ALL
        .into_iter()
        .map(|status| SelectOption {
            value: status.as_str().to_string(),
            label: status.badge().label.to_string(),
            selected: quote.status() == status,
        })
        .collect();
    let priority_options = Priority::ALL
        .into_iter()
        .map(|priority| SelectOption {
            value: priority.as_str().to_string(),
            label: priority.badge().label.to_string(),
            selected: quote.priority() == priority,
        })
        .collect();
    let payment_status_options = PaymentStatus::ALL
        .into_iter()
        .map(|payment| SelectOption {
            value: payment.as_str().to_string(),
            label: payment.badge().label.to_string(),
            selected: quote.payment_status() == payment,
        })
        .collect();

    let current_method = quote.payment_method.as_deref().unwrap_or("");
    let mut payment_method_options = vec![SelectOption {
        value: String::new(),
        label: "Select method...".to_string(),
        selected: current_method.is_empty(),
    }];
    payment_method_options.extend(PAYMENT_METHODS.into_iter().map(|(value, label)| {
        SelectOption {
            value: value.to_string(),
            label: label.to_string(),
            selected: value == current_method,
        }
    }));

    let template = DetailTemplate {
        id: quote.id.to_string(),
        name: quote.name.clone(),
        email: quote.email.clone(),
        phone: quote.phone.clone(),
        event_type_display: quote.display_event_type().to_string(),
        created_display: format_date_time(quote.created_at),
        status_badge: quote.status().badge(),
        priority_badge: quote.priority().badge(),
        payment_badge: quote.payment_status().badge(),
        event_date_value: quote.event_date.to_string(),
        start_time_value: quote.start_time.clone(),
        end_time_value: quote.end_time.clone(),
        event_location: quote.event_location.clone(),
        distance_miles: quote.distance_miles,
        additional_requests: quote.additional_requests.clone().unwrap_or_default(),
        has_additional_requests: quote.additional_requests.is_some(),
        cleaning_attendant: quote.cleaning_attendant,
        baby_changing_station: quote.baby_changing_station,
        quote_amount_value: dollars_value(quote.quote_amount),
        deposit_amount_value: dollars_value(quote.deposit_amount),
        stored_amount_display: format_currency(quote.quote_amount),
        computed_total_display: format_currency(computed.total_cents()),
        computed_rows: computed
            .line_items
            .iter()
            .map(|item| BreakdownRow {
                label: item.label.clone(),
                amount_display: format!("${}", item.amount),
            })
            .collect(),
        amounts_differ,
        balance_display: format_currency(quote.balance_due_cents()),
        status_options,
        priority_options,
        payment_status_options,
        payment_method_options,
        guest_options: select_options(&GUEST_COUNTS, &quote.guest_count),
        water_options: select_options(&WATER_OPTIONS, &quote.water_connection),
        tags_value: quote.tags.join(", "),
        admin_notes_value: quote.admin_notes.clone().unwrap_or_default(),
        last_contacted_display: quote
            .last_contacted_at
            .map(format_date_time)
            .unwrap_or_default(),
        has_last_contacted: quote.last_contacted_at.is_some(),
        timeline: history
            .iter()
            .map(|entry| TimelineRow {
                description: entry.describe(),
                when_display: format_date_time(entry.changed_at),
            })
            .collect(),
        has_timeline: !history.is_empty(),
        communications: communications
            .iter()
            .map(|entry| CommRow {
                label: entry.communication_type().label(),
                subject: entry.subject.clone().unwrap_or_default(),
                has_subject: entry.subject.is_some(),
                message: entry.message.clone(),
                when_display: format_date_time(entry.sent_at),
            })
            .collect(),
        has_communications: !communications.is_empty(),
    };

    Ok(Html(template.render()?))
}

// ==================== edits ====================

/// Submitted edit form fields. Amounts arrive as dollar strings.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub status: String,
    pub priority: String,
    pub event_date: String,
    pub start_time: String,
    pub end_time: String,
    pub event_location: String,
    #[serde(default)]
    pub distance_miles: i64,
    pub guest_count: String,
    pub water_connection: String,
    #[serde(default)]
    pub cleaning_attendant: bool,
    #[serde(default)]
    pub baby_changing_station: bool,
    pub quote_amount: String,
    pub deposit_amount: String,
    pub payment_status: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub admin_notes: String,
}

/// Parse a dollar amount ("1,795.00", "$1795") into cents.
fn parse_dollars(raw: &str) -> Result<i64> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    if cleaned.is_empty() {
        return Ok(0);
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid amount: {raw}")))?;
    Ok((value * 100.0).round() as i64)
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

impl UpdateForm {
    fn into_changes(self) -> Result<QuoteChanges> {
        let event_date = NaiveDate::parse_from_str(&self.event_date, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", self.event_date)))?;

        Ok(QuoteChanges {
            status: QuoteStatus::parse(&self.status),
            priority: Priority::parse(&self.priority),
            event_date,
            start_time: self.start_time,
            end_time: self.end_time,
            event_location: self.event_location,
            distance_miles: self.distance_miles,
            guest_count: self.guest_count,
            water_connection: self.water_connection,
            cleaning_attendant: self.cleaning_attendant,
            baby_changing_station: self.baby_changing_station,
            quote_amount: parse_dollars(&self.quote_amount)?,
            deposit_amount: parse_dollars(&self.deposit_amount)?,
            payment_status: PaymentStatus::parse(&self.payment_status),
            payment_method: if self.payment_method.is_empty() {
                None
            } else {
                Some(self.payment_method)
            },
            tags: parse_tags(&self.tags),
            admin_notes: if self.admin_notes.trim().is_empty() {
                None
            } else {
                Some(self.admin_notes)
            },
        })
    }
}

/// Apply an edit, writing one audit entry per changed field.
pub async fn update(
    State(state): State<AppState>,
    AdminContext(admin): AdminContext,
    Path(id): Path<Uuid>,
    Form(form): Form<UpdateForm>,
) -> Result<Redirect> {
    let changes = form.into_changes()?;
    let existing = db::get_quote(&state.db, id).await?;

    let entries = diff_for_history(&existing, &changes, Some(admin.id));
    db::update_quote(&state.db, id, &changes, Some(admin.id)).await?;
    for entry in &entries {
        db::insert_history(&state.db, entry).await?;
    }

    state.cache.invalidate_stats();
    tracing::info!(
        "Reservation {} updated by {} ({} fields changed)",
        id,
        admin.email,
        entries.len()
    );

    Ok(Redirect::to(&format!("/admin/reservations/{id}")))
}

/// Delete a reservation outright.
pub async fn delete(
    State(state): State<AppState>,
    AdminContext(admin): AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    db::delete_quote(&state.db, id).await?;
    state.cache.invalidate_stats();
    tracing::info!("Reservation {} deleted by {}", id, admin.email);

    Ok(Redirect::to("/admin/reservations"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_dollars tests ====================

    #[test]
    fn test_parse_dollars_plain() {
        assert_eq!(parse_dollars("1795").unwrap(), 179_500);
        assert_eq!(parse_dollars("995.00").unwrap(), 99_500);
    }

    #[test]
    fn test_parse_dollars_formatted() {
        assert_eq!(parse_dollars("$1,795.00").unwrap(), 179_500);
        assert_eq!(parse_dollars(" $2,500 ").unwrap(), 250_000);
    }

    #[test]
    fn test_parse_dollars_rounds_fractional_cents() {
        assert_eq!(parse_dollars("10.005").unwrap(), 1_001);
    }

    #[test]
    fn test_parse_dollars_empty_is_zero() {
        assert_eq!(parse_dollars("").unwrap(), 0);
        assert_eq!(parse_dollars("  ").unwrap(), 0);
    }

    #[test]
    fn test_parse_dollars_rejects_garbage() {
        assert!(parse_dollars("a lot").is_err());
    }

    // ==================== parse_tags tests ====================

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("vip, repeat ,  "), vec!["vip", "repeat"]);
        assert!(parse_tags("").is_empty());
    }

    // ==================== month_grid tests ====================

    #[test]
    fn test_month_grid_shape() {
        // June 2025 starts on a Sunday and has 30 days: five full weeks
        let first = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let weeks = month_grid(first, 30, today, HashMap::new());

        assert_eq!(weeks.len(), 5);
        assert!(weeks.iter().all(|week| week.len() == 7));
        assert_eq!(weeks[0][0].day, 1);
        assert!(weeks[0][0].in_month);
        // 30 days from a Sunday start leaves five trailing blanks
        assert!(!weeks[4][6].in_month);
    }

    #[test]
    fn test_month_grid_leading_blanks() {
        // May 2025 starts on a Thursday
        let first = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let weeks = month_grid(first, 31, today, HashMap::new());

        assert!(!weeks[0][3].in_month);
        assert_eq!(weeks[0][4].day, 1);
        assert!(weeks[0][4].is_today);
    }

    #[test]
    fn test_month_grid_places_chips() {
        let first = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut chips = HashMap::new();
        chips.insert(
            14,
            vec![CalendarChip {
                id: "x".to_string(),
                name: "Jordan Ray".to_string(),
                start_time: "09:00".to_string(),
                badge: QuoteStatus::Booked.badge(),
            }],
        );
        let weeks = month_grid(first, 30, today, chips);

        // June 14, 2025 is the Saturday ending the second week
        let cell = &weeks[1][6];
        assert_eq!(cell.day, 14);
        assert_eq!(cell.chips.len(), 1);
        assert_eq!(cell.chips[0].name, "Jordan Ray");
    }
}
