//! Builds the notification email for an enquiry.

use chrono::{DateTime, Utc};
use maud::html;

use crate::enquiry::dtos::EnquiryRequest;

/// A fully rendered notification, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEmail {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn compose(
    enquiry: &EnquiryRequest,
    recipient: &str,
    site_name: &str,
    received_at: DateTime<Utc>,
) -> ComposedEmail {
    let name = enquiry.name.trim();
    let service = enquiry.service.trim();
    let phone = format!("{} {}", enquiry.country_code.trim(), enquiry.phone.trim())
        .trim()
        .to_string();
    let received = received_at.format("%Y-%m-%d %H:%M UTC").to_string();
    let message = enquiry.message();

    let rows = [
        ("Name", name),
        ("Email", enquiry.email.trim()),
        ("Phone", phone.as_str()),
        ("Service", service),
    ];

    let mut text = format!("New enquiry received via {site_name}\n\n");
    for (label, value) in rows {
        text.push_str(&format!("{label}: {value}\n"));
    }
    if let Some(message) = message {
        text.push_str(&format!("\nMessage:\n{message}\n"));
    }
    text.push_str(&format!("\nReceived: {received}\n"));

    let html = html! {
        h2 { "New enquiry received via " (site_name) }
        table {
            @for (label, value) in rows {
                tr {
                    td { strong { (label) } }
                    td { (value) }
                }
            }
        }
        @if let Some(message) = message {
            h3 { "Message" }
            p {
                @for (i, line) in message.lines().enumerate() {
                    @if i > 0 { br; }
                    (line)
                }
            }
        }
        p { small { "Received: " (received) } }
    };

    ComposedEmail {
        to: recipient.to_string(),
        reply_to: enquiry.email.trim().to_string(),
        subject: format!("New Enquiry from {name} - {service}"),
        html: html.into_string(),
        text,
    }
}
