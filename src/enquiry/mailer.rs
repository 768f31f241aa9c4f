use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    address::AddressError,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{config::SmtpConfig, enquiry::compose::ComposedEmail};

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("mail relay error: {0}")]
    Relay(#[from] lettre::transport::smtp::Error),

    #[error("no enquiry recipient configured")]
    NoRecipient,
}

/// Outbound mail seam. Handlers only ever see this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: ComposedEmail) -> Result<(), MailError>;
}

/// Delivers through an SMTP relay. Port 465 uses implicit TLS, a local
/// relay is spoken to in plain text, anything else upgrades with STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, site_name: &str) -> Result<Self, MailError> {
        let builder = if is_local(&config.host) {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        } else if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };
        let builder = builder.port(config.port);
        let transport = if config.user.is_empty() {
            builder.build()
        } else {
            builder
                .credentials(Credentials::new(
                    config.user.clone(),
                    config.password.clone(),
                ))
                .build()
        };

        let sender = if config.user.contains('@') {
            &config.user
        } else {
            &config.recipient
        };
        let from = Mailbox::new(Some(site_name.to_string()), parse_address(sender)?.email);

        debug!(host = %config.host, port = config.port, "smtp transport configured");
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: ComposedEmail) -> Result<(), MailError> {
        if email.to.trim().is_empty() {
            return Err(MailError::NoRecipient);
        }
        let message = Message::builder()
            .from(self.from.clone())
            .reply_to(parse_address(&email.reply_to)?)
            .to(parse_address(&email.to)?)
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(email.text, email.html))?;

        let response = self.transport.send(message).await?;
        info!(code = %response.code(), "enquiry email relayed");
        Ok(())
    }
}

fn parse_address(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|source| MailError::Address {
            address: address.to_string(),
            source,
        })
}

fn is_local(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp(host: &str, port: u16, user: &str) -> SmtpConfig {
        SmtpConfig {
            host: host.to_string(),
            port,
            user: user.to_string(),
            password: "secret".to_string(),
            recipient: "enquiries@example.ae".to_string(),
        }
    }

    #[test]
    fn test_sender_uses_smtp_user_when_it_is_an_address() {
        let mailer = SmtpMailer::new(&smtp("localhost", 25, "mailer@example.ae"), "Site").unwrap();
        assert_eq!(mailer.from.email.to_string(), "mailer@example.ae");
        assert_eq!(mailer.from.name.as_deref(), Some("Site"));
    }

    #[test]
    fn test_sender_falls_back_to_recipient() {
        let mailer = SmtpMailer::new(&smtp("localhost", 25, ""), "Site").unwrap();
        assert_eq!(mailer.from.email.to_string(), "enquiries@example.ae");
    }

    #[test]
    fn test_invalid_reply_to_is_reported() {
        assert!(matches!(
            parse_address("not an address"),
            Err(MailError::Address { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_recipient() {
        let mailer = SmtpMailer::new(&smtp("localhost", 25, "mailer@example.ae"), "Site").unwrap();
        let result = mailer
            .send(ComposedEmail {
                to: String::new(),
                reply_to: "a@b.com".to_string(),
                subject: "s".to_string(),
                html: String::new(),
                text: String::new(),
            })
            .await;
        assert!(matches!(result, Err(MailError::NoRecipient)));
    }
}
