use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpSettings;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("SMTP is not configured")]
    NotConfigured,
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Transport seam so tests can swap the SMTP relay out.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: Message) -> Result<(), EmailError>;
}

#[async_trait]
impl MailTransport for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, message: Message) -> Result<(), EmailError> {
        AsyncTransport::send(self, message).await.map(|_resp| ())?;
        Ok(())
    }
}

/// Contact-form notifier. A deployment without SMTP settings gets a
/// disabled mailer whose sends fail with `NotConfigured`; callers treat
/// that like any other best-effort failure.
pub struct Mailer {
    transport: Option<Box<dyn MailTransport>>,
    from_email: String,
    from_name: String,
    notification_email: String,
}

impl Mailer {
    pub fn from_settings(smtp: Option<&SmtpSettings>) -> Result<Self, EmailError> {
        let Some(cfg) = smtp else {
            return Ok(Self::disabled());
        };

        let creds = Credentials::new(cfg.username.clone(), cfg.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)?
            .port(cfg.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport: Some(Box::new(transport)),
            from_email: cfg.from_email.clone(),
            from_name: cfg.from_name.clone(),
            notification_email: cfg.notification_email.clone(),
        })
    }

    pub fn disabled() -> Self {
        Self {
            transport: None,
            from_email: String::new(),
            from_name: String::new(),
            notification_email: String::new(),
        }
    }

    #[cfg(test)]
    fn with_transport(
        transport: Box<dyn MailTransport>,
        from_email: &str,
        notification_email: &str,
    ) -> Self {
        Self {
            transport: Some(transport),
            from_email: from_email.to_string(),
            from_name: "Portfolio CMS".to_string(),
            notification_email: notification_email.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Notify the site owner about a new contact-form submission. The
    /// submitter goes into Reply-To so the owner can answer directly.
    pub async fn send_contact_notification(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<(), EmailError> {
        let Some(transport) = &self.transport else {
            return Err(EmailError::NotConfigured);
        };

        let body = format!(
            "New contact form submission\n\n\
             Name: {name}\n\
             Email: {email}\n\n\
             Message:\n{message}\n"
        );

        let mail = Message::builder()
            .from(format!("{} <{}>", self.from_name, self.from_email).parse()?)
            .reply_to(email.parse()?)
            .to(self.notification_email.parse()?)
            .subject(format!("New Contact Form Submission from {name}"))
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        transport.send(mail).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OkTransport;

    #[async_trait]
    impl MailTransport for OkTransport {
        async fn send(&self, _message: Message) -> Result<(), EmailError> {
            Ok(())
        }
    }

    struct UnreachableTransport;

    #[async_trait]
    impl MailTransport for UnreachableTransport {
        async fn send(&self, _message: Message) -> Result<(), EmailError> {
            panic!("transport must not be reached");
        }
    }

    #[tokio::test]
    async fn sends_notification_through_transport() {
        let mailer =
            Mailer::with_transport(Box::new(OkTransport), "noreply@example.com", "me@example.com");

        let result = mailer
            .send_contact_notification("Ada", "ada@example.com", "I need a site")
            .await;

        assert!(result.is_ok(), "expected Ok, got {result:?}");
    }

    #[tokio::test]
    async fn disabled_mailer_reports_not_configured() {
        let mailer = Mailer::disabled();
        assert!(!mailer.is_configured());

        let result = mailer
            .send_contact_notification("Ada", "ada@example.com", "hello")
            .await;

        assert!(matches!(result, Err(EmailError::NotConfigured)));
    }

    #[tokio::test]
    async fn invalid_reply_to_fails_before_transport() {
        let mailer = Mailer::with_transport(
            Box::new(UnreachableTransport),
            "noreply@example.com",
            "me@example.com",
        );

        let result = mailer
            .send_contact_notification("Ada", "not an address", "hello")
            .await;

        assert!(matches!(result, Err(EmailError::Address(_))));
    }
}
