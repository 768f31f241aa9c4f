use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
});

/// Contact-form submission.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Dialling prefix such as `+971`.
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl EnquiryRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let required = [&self.name, &self.email, &self.phone, &self.service];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err("Missing required fields");
        }
        let email = self.email.trim();
        if email.len() > 254 || !EMAIL_REGEX.is_match(email) {
            return Err("Invalid email address");
        }
        Ok(())
    }

    /// The message, when one was actually written.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnquiryResponse {
    pub success: bool,
    pub message: String,
}
