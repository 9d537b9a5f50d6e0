//! Background delivery of lead notifications.
//!
//! [`LeadDispatcher`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and forwards every [`SiteEvent::LeadSubmitted`] to email and Telegram.
//! Delivery failures are logged; the lead itself is already stored by the
//! time the event is published.

use glavtrub_db::models::setting::{SETTING_TELEGRAM_CHAT_ID, SETTING_TELEGRAM_TOKEN};
use glavtrub_db::repositories::SettingRepo;
use glavtrub_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::{LeadNotice, SiteEvent};
use crate::delivery::email::EmailDelivery;
use crate::delivery::telegram::TelegramDelivery;

pub struct LeadDispatcher {
    pool: DbPool,
    email: Option<EmailDelivery>,
    telegram: TelegramDelivery,
}

impl LeadDispatcher {
    /// `email` is `None` when SMTP is not configured.
    pub fn new(pool: DbPool, email: Option<EmailDelivery>, telegram: TelegramDelivery) -> Self {
        Self {
            pool,
            email,
            telegram,
        }
    }

    /// Run until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<SiteEvent>) {
        loop {
            match receiver.recv().await {
                Ok(SiteEvent::LeadSubmitted(notice)) => self.notify(&notice).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Lead dispatcher lagged, notifications lost");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, lead dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver one lead to every configured channel concurrently.
    pub async fn notify(&self, notice: &LeadNotice) {
        tokio::join!(self.send_email(notice), self.send_telegram(notice));
    }

    async fn send_email(&self, notice: &LeadNotice) {
        let Some(email) = &self.email else {
            tracing::debug!(lead_id = notice.lead_id, "SMTP not configured, skipping email");
            return;
        };
        if let Err(e) = email.deliver(notice).await {
            tracing::error!(error = %e, lead_id = notice.lead_id, "Failed to send lead email");
        }
    }

    async fn send_telegram(&self, notice: &LeadNotice) {
        let credentials = match self.telegram_credentials().await {
            Ok(Some(credentials)) => credentials,
            Ok(None) => {
                tracing::warn!(lead_id = notice.lead_id, "Telegram credentials not configured");
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read Telegram settings");
                return;
            }
        };

        let (token, chat_id) = credentials;
        if let Err(e) = self.telegram.deliver(&token, &chat_id, notice).await {
            tracing::error!(error = %e, lead_id = notice.lead_id, "Failed to send lead to Telegram");
        }
    }

    async fn telegram_credentials(&self) -> Result<Option<(String, String)>, sqlx::Error> {
        let token = SettingRepo::get(&self.pool, SETTING_TELEGRAM_TOKEN).await?;
        let chat_id = SettingRepo::get(&self.pool, SETTING_TELEGRAM_CHAT_ID).await?;
        Ok(token.zip(chat_id))
    }
}
