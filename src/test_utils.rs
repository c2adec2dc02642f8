//! Shared test utilities for gift orders.
//!
//! This module provides helpers for setting up test databases and building gifts
//! with sensible defaults.

use crate::{
    core::{
        gift,
        lifecycle::{ACCEPTANCE_WINDOW_DAYS, AcceptRequest, NewGift},
    },
    entities::{self, GiftStatus, PushType},
    errors::Result,
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Construction input with every required field filled.
///
/// # Defaults
/// * `buyer_user_id`: 1
/// * `push_type`: KAKAO
/// * receiver name / phone / message: `"A"`, `"010"`, `"hi"`
pub fn sample_new_gift() -> NewGift {
    NewGift {
        buyer_user_id: Some(1),
        order_token: None,
        push_type: Some(PushType::Kakao),
        gift_receiver_name: "A".to_string(),
        gift_receiver_phone: "010".to_string(),
        gift_message: "hi".to_string(),
    }
}

/// Acceptance request with all six delivery fields filled.
pub fn sample_accept_request() -> AcceptRequest {
    AcceptRequest {
        receiver_name: "Receiver".to_string(),
        receiver_phone: "010-1234-5678".to_string(),
        receiver_zipcode: "06236".to_string(),
        receiver_address1: "123 Teheran-ro".to_string(),
        receiver_address2: "Apt 501".to_string(),
        etc_message: "Leave at the door".to_string(),
    }
}

/// An unsaved gift in `status`, created at `created_at` with the standard deadline.
pub fn sample_gift_model(status: GiftStatus, created_at: DateTime<Utc>) -> entities::GiftModel {
    entities::GiftModel {
        id: 1,
        gift_token: "gt_sample".to_string(),
        buyer_user_id: 1,
        order_token: None,
        status,
        push_type: PushType::Kakao,
        gift_receiver_name: "A".to_string(),
        gift_receiver_phone: "010".to_string(),
        gift_message: "hi".to_string(),
        receiver_name: None,
        receiver_phone: None,
        receiver_zipcode: None,
        receiver_address1: None,
        receiver_address2: None,
        etc_message: None,
        paid_at: None,
        pushed_at: None,
        accepted_at: None,
        expired_at: created_at + Duration::days(ACCEPTANCE_WINDOW_DAYS),
        created_at,
        updated_at: created_at,
    }
}

/// Stores a gift built from [`sample_new_gift`].
pub async fn create_test_gift(db: &DatabaseConnection) -> Result<entities::GiftModel> {
    gift::create_gift(db, sample_new_gift()).await
}

/// Stores a gift and pays for it, leaving it in `PUSH_COMPLETE`.
pub async fn create_paid_gift(db: &DatabaseConnection) -> Result<entities::GiftModel> {
    let created = create_test_gift(db).await?;
    gift::begin_payment(db, &created.gift_token).await?;
    gift::complete_payment(db, &created.gift_token).await
}

/// Stores a gift whose acceptance deadline passed a day ago, still in `INIT`.
pub async fn create_overdue_gift(db: &DatabaseConnection) -> Result<entities::GiftModel> {
    let created = create_test_gift(db).await?;
    let mut active: entities::GiftActiveModel = created.into();
    active.expired_at = Set(Utc::now() - Duration::days(1));
    active.update(db).await.map_err(Into::into)
}
