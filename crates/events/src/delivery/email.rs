//! Lead notification email via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. Configuration
//! comes from the environment; without `SMTP_HOST` [`EmailConfig::from_env`]
//! returns `None` and no mailer is built.

use crate::bus::LeadNotice;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Implicit-TLS SMTP port. Any other port uses STARTTLS.
pub const SMTPS_PORT: u16 = 465;

const DEFAULT_RECIPIENT: &str = "sale@glavtrubtorg.ru";

const NOT_SPECIFIED: &str = "не указан";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address; `SMTP_FROM`, else `SMTP_USER`.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Mailbox that receives lead notifications.
    pub recipient: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                |
    /// |-----------------|----------|------------------------|
    /// | `SMTP_HOST`     | yes      |                        |
    /// | `SMTP_PORT`     | no       | `465`                  |
    /// | `SMTP_USER`     | no       |                        |
    /// | `SMTP_PASSWORD` | no       |                        |
    /// | `SMTP_FROM`     | no       | `SMTP_USER`            |
    /// | `LEAD_EMAIL`    | no       | `sale@glavtrubtorg.ru` |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty())?;
        let smtp_user = std::env::var("SMTP_USER").ok().filter(|u| !u.is_empty());
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(SMTPS_PORT),
            from_address: std::env::var("SMTP_FROM")
                .ok()
                .or_else(|| smtp_user.clone())
                .unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            smtp_user,
            recipient: std::env::var("LEAD_EMAIL")
                .unwrap_or_else(|_| DEFAULT_RECIPIENT.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Message text
// ---------------------------------------------------------------------------

/// `Заявка с сайта: <name> <phone or email>`.
pub fn lead_subject(notice: &LeadNotice) -> String {
    let contact = [notice.phone.as_str(), notice.email.as_str()]
        .into_iter()
        .find(|c| !c.is_empty())
        .unwrap_or(NOT_SPECIFIED);
    format!("Заявка с сайта: {} {contact}", notice.name)
}

pub fn lead_body(notice: &LeadNotice) -> String {
    fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
        if value.is_empty() {
            fallback
        } else {
            value
        }
    }

    let mut lines = vec![
        format!("Имя: {}", notice.name),
        format!("Телефон: {}", or(&notice.phone, NOT_SPECIFIED)),
        format!("Email: {}", or(&notice.email, NOT_SPECIFIED)),
        format!("Сообщение: {}", or(&notice.message, "не указано")),
        format!("Страница: {}", or(&notice.page_url, "не указана")),
        format!(
            "Дата/время: {}",
            notice.submitted_at.format("%d.%m.%Y %H:%M:%S")
        ),
    ];

    if !notice.utm.is_empty() {
        lines.push(String::new());
        lines.push("UTM-метки:".to_string());
        lines.extend(notice.utm.iter().map(|(k, v)| format!("  {k}: {v}")));
    }

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Send the notification for one lead to the configured recipient.
    pub async fn deliver(&self, notice: &LeadNotice) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.recipient.parse()?)
            .subject(lead_subject(notice))
            .header(ContentType::TEXT_PLAIN)
            .body(lead_body(notice))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let relay = if self.config.smtp_port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
        };
        let mut transport_builder = relay.port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            to = %self.config.recipient,
            lead_id = notice.lead_id,
            "Lead email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::tests::sample_notice;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn subject_prefers_phone_then_email() {
        let mut notice = sample_notice();
        assert_eq!(
            lead_subject(&notice),
            "Заявка с сайта: Иван +7 900 000-00-00"
        );

        notice.phone.clear();
        assert_eq!(lead_subject(&notice), "Заявка с сайта: Иван ivan@example.com");

        notice.email.clear();
        assert_eq!(lead_subject(&notice), "Заявка с сайта: Иван не указан");
    }

    #[test]
    fn body_lists_fields_and_utm() {
        let body = lead_body(&sample_notice());
        assert!(body.starts_with("Имя: Иван\nТелефон: +7 900 000-00-00\n"));
        assert!(body.contains("Страница: /catalog/pnd/pe100/"));
        assert!(body.contains("Дата/время: 14.03.2025 09:30:00"));
        assert!(body.ends_with("UTM-метки:\n  utm_source: yandex\n  utm_campaign: pipes"));
    }

    #[test]
    fn body_fills_missing_fields() {
        let mut notice = sample_notice();
        notice.message.clear();
        notice.page_url.clear();
        notice.utm.clear();

        let body = lead_body(&notice);
        assert!(body.contains("Сообщение: не указано"));
        assert!(body.contains("Страница: не указана"));
        assert!(!body.contains("UTM"));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
