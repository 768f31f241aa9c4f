//! Contact form hand-off to a pre-filled WhatsApp chat.

use axum::{
    extract::{Query, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::info;

use crate::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct WhatsAppQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
}

impl WhatsAppQuery {
    /// Chat text with one line per filled-in field.
    pub fn text(&self) -> String {
        let mut lines = vec!["Hello, I would like to enquire about your services.".to_string()];
        for (label, value) in [
            ("Name", &self.name),
            ("Phone", &self.phone),
            ("Service", &self.service),
            ("Message", &self.message),
        ] {
            let value = value.trim();
            if !value.is_empty() {
                lines.push(format!("{label}: {value}"));
            }
        }
        lines.join("\n")
    }
}

pub fn whatsapp_link(number: &str, text: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!(
        "https://wa.me/{digits}?text={}",
        utf8_percent_encode(text, NON_ALPHANUMERIC)
    )
}

pub async fn whatsapp_redirect(
    State(state): State<AppState>,
    Query(query): Query<WhatsAppQuery>,
) -> Response {
    let link = whatsapp_link(state.config.whatsapp_number(), &query.text());
    info!(service = %query.service, "contact form handed off to whatsapp");
    let mut response = Redirect::to(&link).into_response();
    // keep personal details out of shared caches
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_skips_blank_fields() {
        let query = WhatsAppQuery {
            name: "Amal".to_string(),
            service: "DEWA Approvals".to_string(),
            message: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            query.text(),
            "Hello, I would like to enquire about your services.\nName: Amal\nService: DEWA Approvals"
        );
    }

    #[test]
    fn test_link_encodes_text_and_strips_number() {
        let link = whatsapp_link("+971 50 000 0000", "Hi & bye\nok");
        assert_eq!(link, "https://wa.me/971500000000?text=Hi%20%26%20bye%0Aok");
    }
}
