//! Lead notification via the Telegram Bot API.
//!
//! Credentials are not part of the process configuration: the dispatcher
//! reads `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` from the settings table for
//! each lead, so admins can change them without a restart.

use std::time::Duration;

use serde::Serialize;

use crate::bus::LeadNotice;

const API_BASE: &str = "https://api.telegram.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Characters that Telegram Markdown treats specially.
const SPECIAL_CHARS: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// The HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Telegram API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Message text
// ---------------------------------------------------------------------------

/// Backslash-escape every Markdown special character.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Markdown message text; empty fields are left out.
pub fn format_lead_message(notice: &LeadNotice) -> String {
    let mut parts = vec!["🔥 *Новая заявка*\n".to_string()];

    let fields = [
        ("👤", "Имя", &notice.name),
        ("📞", "Телефон", &notice.phone),
        ("📧", "Email", &notice.email),
        ("💬", "Сообщение", &notice.message),
        ("📄", "Страница", &notice.page_url),
    ];
    for (icon, label, value) in fields {
        if !value.is_empty() {
            parts.push(format!("{icon} *{label}:* {}", escape_markdown(value)));
        }
    }

    let utm: Vec<String> = notice
        .utm
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| {
            let key = k.strip_prefix("utm_").unwrap_or(k);
            format!("{key}={}", escape_markdown(v))
        })
        .collect();
    if !utm.is_empty() {
        parts.push(format!("🔗 *UTM:* {}", utm.join(", ")));
    }

    parts.join("\n")
}

// ---------------------------------------------------------------------------
// TelegramDelivery
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

pub struct TelegramDelivery {
    client: reqwest::Client,
    api_base: String,
}

impl TelegramDelivery {
    pub fn new() -> Self {
        Self::with_api_base(API_BASE)
    }

    /// Point the client at another Bot API host (a local stub in tests).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    fn send_message_url(&self, token: &str) -> String {
        format!("{}/bot{token}/sendMessage", self.api_base.trim_end_matches('/'))
    }

    /// Post the lead to `chat_id` with the bot identified by `token`.
    pub async fn deliver(
        &self,
        token: &str,
        chat_id: &str,
        notice: &LeadNotice,
    ) -> Result<(), TelegramError> {
        let text = format_lead_message(notice);
        let response = self
            .client
            .post(self.send_message_url(token))
            .json(&SendMessage {
                chat_id,
                text: &text,
                parse_mode: "Markdown",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TelegramError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(chat_id, lead_id = notice.lead_id, "Lead sent to Telegram");
        Ok(())
    }
}

impl Default for TelegramDelivery {
    fn default() -> Self {
        Self::new()
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
    fn escapes_markdown_specials() {
        assert_eq!(escape_markdown("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape_markdown("+7 (900) 1-2"), "\\+7 \\(900\\) 1\\-2");
        assert_eq!(escape_markdown("Привет"), "Привет");
        assert_eq!(escape_markdown(""), "");
    }

    #[test]
    fn message_has_header_fields_and_utm() {
        let text = format_lead_message(&sample_notice());
        let expected = "🔥 *Новая заявка*\n\n\
             👤 *Имя:* Иван\n\
             📞 *Телефон:* \\+7 900 000\\-00\\-00\n\
             📧 *Email:* ivan@example\\.com\n\
             💬 *Сообщение:* Нужна труба 40/32\n\
             📄 *Страница:* /catalog/pnd/pe100/\n\
             🔗 *UTM:* source=yandex, campaign=pipes";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_fields_are_skipped() {
        let mut notice = sample_notice();
        notice.email.clear();
        notice.message.clear();
        notice.utm.clear();

        let text = format_lead_message(&notice);
        assert!(!text.contains("Email"));
        assert!(!text.contains("Сообщение"));
        assert!(!text.contains("UTM"));
        assert!(text.contains("📞"));
    }

    #[test]
    fn send_message_url_uses_token() {
        let delivery = TelegramDelivery::with_api_base("http://localhost:9000/");
        assert_eq!(
            delivery.send_message_url("123:abc"),
            "http://localhost:9000/bot123:abc/sendMessage"
        );
        assert_eq!(
            TelegramDelivery::new().send_message_url("t"),
            "https://api.telegram.org/bott/sendMessage"
        );
    }

    #[test]
    fn api_error_display() {
        let err = TelegramError::Api {
            status: 401,
            body: "Unauthorized".into(),
        };
        assert_eq!(err.to_string(), "Telegram API returned HTTP 401: Unauthorized");
    }
}
