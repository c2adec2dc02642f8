//! Gift entity - A purchase made by one user for acceptance and delivery by another.
//!
//! The row carries the public `gift_token`, the lifecycle `status`, the contact details
//! captured at order time and the delivery details captured at acceptance.
//! `created_at`/`updated_at` are audit columns filled in by [`ActiveModelBehavior`],
//! never by the lifecycle transitions in [`crate::core::lifecycle`].

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

/// Lifecycle position of a gift, in intended progression order.
///
/// `Expiration` is the alternate terminal reachable from any pre-acceptance state.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GiftStatus {
    #[sea_orm(string_value = "INIT")]
    Init,
    #[sea_orm(string_value = "IN_PAYMENT")]
    InPayment,
    #[sea_orm(string_value = "ORDER_COMPLETE")]
    OrderComplete,
    #[sea_orm(string_value = "PUSH_COMPLETE")]
    PushComplete,
    #[sea_orm(string_value = "ACCEPT")]
    Accept,
    #[sea_orm(string_value = "DELIVERY_PREPARE")]
    DeliveryPrepare,
    #[sea_orm(string_value = "IN_DELIVERY")]
    InDelivery,
    #[sea_orm(string_value = "DELIVERY_COMPLETE")]
    DeliveryComplete,
    #[sea_orm(string_value = "EXPIRATION")]
    Expiration,
}

impl GiftStatus {
    /// Statuses a gift can still be accepted or expired from.
    pub const PRE_ACCEPTANCE: [Self; 4] = [
        Self::Init,
        Self::InPayment,
        Self::OrderComplete,
        Self::PushComplete,
    ];

    /// Statuses from which the receiver may accept the gift.
    pub const ACCEPTABLE: [Self; 2] = [Self::OrderComplete, Self::PushComplete];

    #[must_use]
    pub fn is_pre_acceptance(self) -> bool {
        Self::PRE_ACCEPTANCE.contains(&self)
    }

    #[must_use]
    pub fn is_acceptable(self) -> bool {
        Self::ACCEPTABLE.contains(&self)
    }
}

/// Channel used to send the receiver the gift-acceptance link.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PushType {
    #[sea_orm(string_value = "KAKAO")]
    Kakao,
    #[sea_orm(string_value = "LMS")]
    Lms,
}

/// Gift database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gifts")]
pub struct Model {
    /// Storage-assigned identifier, internal only
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Public reference shared with the receiver (`gt_...`)
    #[sea_orm(unique)]
    pub gift_token: String,
    /// User who bought the gift
    pub buyer_user_id: i64,
    /// Optional reference to the external order record
    pub order_token: Option<String>,
    pub status: GiftStatus,
    pub push_type: PushType,
    /// Receiver contact captured at order time
    pub gift_receiver_name: String,
    pub gift_receiver_phone: String,
    pub gift_message: String,
    /// Delivery details, populated on acceptance
    pub receiver_name: Option<String>,
    pub receiver_phone: Option<String>,
    pub receiver_zipcode: Option<String>,
    pub receiver_address1: Option<String>,
    pub receiver_address2: Option<String>,
    pub etc_message: Option<String>,
    pub paid_at: Option<DateTimeUtc>,
    /// Reserved for the notification collaborator; no transition sets it
    pub pushed_at: Option<DateTimeUtc>,
    pub accepted_at: Option<DateTimeUtc>,
    /// Acceptance deadline until the gift expires, then the actual expiry time
    pub expired_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// `Gift` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Stamps the audit columns on every save going through `ActiveModelTrait`.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
