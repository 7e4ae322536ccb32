//! Customer contact logging.
//!
//! The form records contact made through external channels; nothing is
//! sent from here. Picking an email template pre-fills the subject and
//! message with the quote's details substituted in.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::TEMPLATES_KEY;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{CommunicationType, EmailTemplate, NewCommunication};
use crate::AppState;

use super::AdminContext;

/// Channel choices for the log form.
const CHANNELS: [(CommunicationType, &str); 4] = [
    (CommunicationType::Email, "Email"),
    (CommunicationType::Sms, "Text Message"),
    (CommunicationType::Phone, "Phone Call"),
    (CommunicationType::Note, "Internal Note"),
];

/// Query parameters for the contact form
#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    /// Template to pre-fill from
    pub template: Option<Uuid>,
}

/// One channel radio option
struct ChannelOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

/// One template pre-fill link
struct TemplateLink {
    name: String,
    href: String,
    active: bool,
}

/// Contact form template
#[derive(Template)]
#[template(path = "admin/contact.html")]
struct ContactTemplate {
    quote_id: String,
    name: String,
    email: String,
    phone: String,
    channel_options: Vec<ChannelOption>,
    template_links: Vec<TemplateLink>,
    has_templates: bool,
    subject_value: String,
    message_value: String,
}

/// Active templates, served from cache when warm.
async fn active_templates(state: &AppState) -> Result<Arc<Vec<EmailTemplate>>> {
    if let Some(templates) = state.cache.templates.get(TEMPLATES_KEY).await {
        return Ok(templates);
    }

    let templates = Arc::new(db::list_active_templates(&state.db).await?);
    state
        .cache
        .templates
        .insert(TEMPLATES_KEY.to_string(), templates.clone())
        .await;
    Ok(templates)
}

/// Contact form, optionally pre-filled from an email template.
pub async fn form(
    State(state): State<AppState>,
    AdminContext(_admin): AdminContext,
    Path(id): Path<Uuid>,
    Query(query): Query<ContactQuery>,
) -> Result<Html<String>> {
    let quote = db::get_quote(&state.db, id).await?;
    let templates = active_templates(&state).await?;

    let (subject_value, message_value) = match query.template {
        Some(template_id) => {
            // The cached list can lag a just-edited template; fall back to
            // the store rather than pre-filling from nothing
            let template = match templates.iter().find(|entry| entry.id == template_id) {
                Some(entry) => entry.clone(),
                None => db::get_template(&state.db, template_id).await?,
            };
            template.render_for(&quote)
        }
        None => (String::new(), String::new()),
    };

    let selected_channel = if query.template.is_some() {
        CommunicationType::Email
    } else {
        CommunicationType::Note
    };

    let template = ContactTemplate {
        quote_id: quote.id.to_string(),
        name: quote.name.clone(),
        email: quote.email.clone(),
        phone: quote.phone.clone(),
        channel_options: CHANNELS
            .into_iter()
            .map(|(channel, label)| ChannelOption {
                value: channel.as_str(),
                label,
                selected: channel == selected_channel,
            })
            .collect(),
        template_links: templates
            .iter()
            .map(|entry| TemplateLink {
                name: entry.name.clone(),
                href: format!("/admin/reservations/{id}/contact?template={}", entry.id),
                active: query.template == Some(entry.id),
            })
            .collect(),
        has_templates: !templates.is_empty(),
        subject_value,
        message_value,
    };

    Ok(Html(template.render()?))
}

/// Submitted contact log fields.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub communication_type: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// Record a customer touchpoint and stamp the quote's last-contacted time.
pub async fn log(
    State(state): State<AppState>,
    AdminContext(admin): AdminContext,
    Path(id): Path<Uuid>,
    Form(form): Form<ContactForm>,
) -> Result<Redirect> {
    if form.message.trim().is_empty() {
        return Err(AppError::BadRequest("A message is required".to_string()));
    }

    // Ensures a dangling quote id 404s before anything is written
    let quote = db::get_quote(&state.db, id).await?;

    let communication_type = CommunicationType::parse(&form.communication_type);
    let subject = if communication_type.has_subject() {
        Some(form.subject.trim())
            .filter(|subject| !subject.is_empty())
            .map(str::to_string)
    } else {
        None
    };

    let entry = NewCommunication {
        quote_id: quote.id,
        sent_by: Some(admin.id),
        communication_type,
        subject,
        message: form.message,
    };
    db::insert_communication(&state.db, &entry).await?;
    db::touch_last_contacted(&state.db, quote.id).await?;
    state.cache.invalidate_stats();

    tracing::info!(
        "{} logged for reservation {} by {}",
        communication_type.label(),
        quote.id,
        admin.email
    );

    Ok(Redirect::to(&format!("/admin/reservations/{id}")))
}
