//! Database queries for quotes, their audit trail, communications, email
//! templates and admin users.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    AdminUser, CustomerCommunication, EmailTemplate, NewCommunication, NewHistory, NewQuote, Quote,
    QuoteChanges, QuoteHistory,
};

/// Column list shared by every query that returns full quote rows.
const QUOTE_COLUMNS: &str = "\
    id, created_at, updated_at, name, email, phone, event_type, custom_event_type, \
    guest_count, event_date, start_time, end_time, event_location, distance_miles, \
    water_connection, cleaning_attendant, baby_changing_station, additional_requests, \
    quote_amount, status, priority, admin_notes, tags, deposit_amount, payment_status, \
    payment_method, last_contacted_at, last_updated_by";

/// Insert a quote from the public form and return the stored row.
pub async fn insert_quote(pool: &PgPool, quote: &NewQuote) -> Result<Quote> {
    let row = sqlx::query_as::<_, Quote>(&format!(
        r#"
        INSERT INTO quotes (
            name, email, phone, event_type, custom_event_type, guest_count,
            event_date, start_time, end_time, event_location, distance_miles,
            water_connection, cleaning_attendant, baby_changing_station,
            additional_requests, quote_amount
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING {QUOTE_COLUMNS}
        "#
    ))
    .bind(&quote.name)
    .bind(&quote.email)
    .bind(&quote.phone)
    .bind(&quote.event_type)
    .bind(&quote.custom_event_type)
    .bind(&quote.guest_count)
    .bind(quote.event_date)
    .bind(&quote.start_time)
    .bind(&quote.end_time)
    .bind(&quote.event_location)
    .bind(quote.distance_miles)
    .bind(&quote.water_connection)
    .bind(quote.cleaning_attendant)
    .bind(quote.baby_changing_station)
    .bind(&quote.additional_requests)
    .bind(quote.quote_amount)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Get a quote by id
pub async fn get_quote(pool: &PgPool, id: Uuid) -> Result<Quote> {
    let quote = sqlx::query_as::<_, Quote>(&format!(
        r#"
        SELECT {QUOTE_COLUMNS}
        FROM quotes
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(quote)
}

/// List quotes newest first, optionally limited to those created since a
/// cutoff (the dashboard's range selector).
pub async fn list_quotes(pool: &PgPool, since: Option<DateTime<Utc>>) -> Result<Vec<Quote>> {
    let quotes = match since {
        Some(cutoff) => {
            sqlx::query_as::<_, Quote>(&format!(
                r#"
                SELECT {QUOTE_COLUMNS}
                FROM quotes
                WHERE created_at >= $1
                ORDER BY created_at DESC
                "#
            ))
            .bind(cutoff)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Quote>(&format!(
                r#"
                SELECT {QUOTE_COLUMNS}
                FROM quotes
                ORDER BY created_at DESC
                "#
            ))
            .fetch_all(pool)
            .await?
        }
    };

    Ok(quotes)
}

/// List quotes in event-date order for the calendar view.
pub async fn list_quotes_by_event_date(pool: &PgPool) -> Result<Vec<Quote>> {
    let quotes = sqlx::query_as::<_, Quote>(&format!(
        r#"
        SELECT {QUOTE_COLUMNS}
        FROM quotes
        ORDER BY event_date ASC, start_time ASC
        "#
    ))
    .fetch_all(pool)
    .await?;

    Ok(quotes)
}

/// Apply an admin edit and return the updated row.
pub async fn update_quote(
    pool: &PgPool,
    id: Uuid,
    changes: &QuoteChanges,
    actor: Option<Uuid>,
) -> Result<Quote> {
    let quote = sqlx::query_as::<_, Quote>(&format!(
        r#"
        UPDATE quotes SET
            status = $2,
            priority = $3,
            event_date = $4,
            start_time = $5,
            end_time = $6,
            event_location = $7,
            distance_miles = $8,
            guest_count = $9,
            water_connection = $10,
            cleaning_attendant = $11,
            baby_changing_station = $12,
            quote_amount = $13,
            deposit_amount = $14,
            payment_status = $15,
            payment_method = $16,
            tags = $17,
            admin_notes = $18,
            last_updated_by = $19,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {QUOTE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(changes.status.as_str())
    .bind(changes.priority.as_str())
    .bind(changes.event_date)
    .bind(&changes.start_time)
    .bind(&changes.end_time)
    .bind(&changes.event_location)
    .bind(changes.distance_miles)
    .bind(&changes.guest_count)
    .bind(&changes.water_connection)
    .bind(changes.cleaning_attendant)
    .bind(changes.baby_changing_station)
    .bind(changes.quote_amount)
    .bind(changes.deposit_amount)
    .bind(changes.payment_status.as_str())
    .bind(&changes.payment_method)
    .bind(&changes.tags)
    .bind(&changes.admin_notes)
    .bind(actor)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(quote)
}

/// Delete a quote. History and communications cascade store-side.
pub async fn delete_quote(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// Stamp the quote as contacted now.
pub async fn touch_last_contacted(pool: &PgPool, id: Uuid) -> Result<()> {
    sqlx::query("UPDATE quotes SET last_contacted_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Append one audit entry.
pub async fn insert_history(pool: &PgPool, entry: &NewHistory) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO quote_history (quote_id, changed_by, field_name, old_value, new_value, change_type)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(entry.quote_id)
    .bind(entry.changed_by)
    .bind(&entry.field_name)
    .bind(&entry.old_value)
    .bind(&entry.new_value)
    .bind(entry.change_type.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Audit trail for a quote, newest first.
pub async fn list_history(pool: &PgPool, quote_id: Uuid) -> Result<Vec<QuoteHistory>> {
    let entries = sqlx::query_as::<_, QuoteHistory>(
        r#"
        SELECT id, quote_id, changed_by, changed_at, field_name, old_value, new_value, change_type
        FROM quote_history
        WHERE quote_id = $1
        ORDER BY changed_at DESC
        "#,
    )
    .bind(quote_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Log a customer touchpoint and return the stored row.
pub async fn insert_communication(
    pool: &PgPool,
    entry: &NewCommunication,
) -> Result<CustomerCommunication> {
    let row = sqlx::query_as::<_, CustomerCommunication>(
        r#"
        INSERT INTO customer_communications (quote_id, sent_by, communication_type, subject, message, status)
        VALUES ($1, $2, $3, $4, $5, 'sent')
        RETURNING id, quote_id, sent_by, sent_at, communication_type, subject, message, status
        "#,
    )
    .bind(entry.quote_id)
    .bind(entry.sent_by)
    .bind(entry.communication_type.as_str())
    .bind(&entry.subject)
    .bind(&entry.message)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Communication log for a quote, newest first.
pub async fn list_communications(
    pool: &PgPool,
    quote_id: Uuid,
) -> Result<Vec<CustomerCommunication>> {
    let entries = sqlx::query_as::<_, CustomerCommunication>(
        r#"
        SELECT id, quote_id, sent_by, sent_at, communication_type, subject, message, status
        FROM customer_communications
        WHERE quote_id = $1
        ORDER BY sent_at DESC
        "#,
    )
    .bind(quote_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Active email templates for the communication form.
pub async fn list_active_templates(pool: &PgPool) -> Result<Vec<EmailTemplate>> {
    let templates = sqlx::query_as::<_, EmailTemplate>(
        r#"
        SELECT id, created_at, updated_at, name, category, subject, body, is_active
        FROM email_templates
        WHERE is_active = true
        ORDER BY category, name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(templates)
}

/// Get an email template by id
pub async fn get_template(pool: &PgPool, id: Uuid) -> Result<EmailTemplate> {
    let template = sqlx::query_as::<_, EmailTemplate>(
        r#"
        SELECT id, created_at, updated_at, name, category, subject, body, is_active
        FROM email_templates
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(template)
}

/// Look up the active admin record for an authenticated user id.
pub async fn find_admin_by_user_id(pool: &PgPool, user_id: Uuid) -> Result<Option<AdminUser>> {
    let admin = sqlx::query_as::<_, AdminUser>(
        r#"
        SELECT id, created_at, email, full_name, role, is_active, last_login, user_id
        FROM admin_users
        WHERE user_id = $1
          AND is_active = true
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}
