//! Lead dispatcher against a real database.

use std::time::Duration;

use glavtrub_db::models::lead::{CreateLead, UtmParams};
use glavtrub_db::models::setting::{SettingValue, SETTING_TELEGRAM_TOKEN};
use glavtrub_db::repositories::{LeadRepo, SettingRepo};
use glavtrub_events::{EventBus, LeadDispatcher, LeadNotice, SiteEvent, TelegramDelivery};
use sqlx::PgPool;

async fn stored_lead(pool: &PgPool) -> LeadNotice {
    let lead = LeadRepo::create(
        pool,
        &CreateLead {
            name: "Пётр".into(),
            phone: "+79000000000".into(),
            utm: UtmParams {
                utm_source: "google".into(),
                ..Default::default()
            },
            ..Default::default()
        },
    )
    .await
    .unwrap();
    LeadNotice::from(&lead)
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn notice_carries_present_utm_only(pool: PgPool) {
    let notice = stored_lead(&pool).await;
    assert_eq!(notice.name, "Пётр");
    assert_eq!(notice.utm, vec![("utm_source".to_string(), "google".to_string())]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn dispatcher_skips_unconfigured_channels_and_stops_with_bus(pool: PgPool) {
    // Only the token is set, so Telegram is treated as unconfigured.
    SettingRepo::save_all(
        &pool,
        &[SettingValue {
            key: SETTING_TELEGRAM_TOKEN.into(),
            value: "123:abc".into(),
            description: None,
        }],
    )
    .await
    .unwrap();

    let notice = stored_lead(&pool).await;
    let bus = EventBus::default();
    let dispatcher = LeadDispatcher::new(
        pool.clone(),
        None,
        TelegramDelivery::with_api_base("http://127.0.0.1:9"),
    );
    let handle = tokio::spawn(dispatcher.run(bus.subscribe()));

    bus.publish(SiteEvent::LeadSubmitted(notice));
    drop(bus);

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("dispatcher exits once the bus is dropped")
        .unwrap();
}
