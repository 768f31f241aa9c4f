//! Contact-form enquiries relayed to the consultancy's inbox by email.

pub mod compose;
pub mod dtos;
pub mod handlers;
pub mod mailer;

pub use mailer::{MailError, Mailer, SmtpMailer};
