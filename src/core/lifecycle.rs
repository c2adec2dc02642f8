//! Gift lifecycle state machine.
//!
//! Every operation here is a pure function of the current gift, the caller's input and the
//! current time. Nothing is persisted: [`crate::core::gift`] loads the row, applies one of
//! these transitions and writes the result back under a status guard.
//!
//! ```text
//! INIT --begin_payment--> IN_PAYMENT --complete_payment--> PUSH_COMPLETE
//! ORDER_COMPLETE | PUSH_COMPLETE --accept--> ACCEPT
//! any --expire--> EXPIRATION
//! ```
//!
//! `ORDER_COMPLETE` and the delivery statuses have no transition here; they are driven by
//! collaborators outside this crate.

use crate::{
    entities::{GiftStatus, PushType, gift},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveValue::NotSet, Set};
use serde::Deserialize;

/// Prefix of every public gift token.
pub const GIFT_TOKEN_PREFIX: &str = "gt_";

/// Days the receiver has to accept a gift after it is created.
pub const ACCEPTANCE_WINDOW_DAYS: i64 = 7;

/// Input of the construction contract, as handed over by the ordering collaborator.
///
/// Missing keys deserialize to `None` or an empty string, so an absent value is reported
/// as an [`Error::InvalidParameter`] by [`new_gift`] rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewGift {
    pub buyer_user_id: Option<i64>,
    pub order_token: Option<String>,
    pub push_type: Option<PushType>,
    pub gift_receiver_name: String,
    pub gift_receiver_phone: String,
    pub gift_message: String,
}

/// Delivery details supplied by the receiver on acceptance.
///
/// Missing keys deserialize to empty strings and are rejected by [`accept`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AcceptRequest {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub receiver_zipcode: String,
    pub receiver_address1: String,
    pub receiver_address2: String,
    pub etc_message: String,
}

fn require_non_empty(field: &'static str, value: &str, operation: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_parameter(
            field,
            format!("Gift {operation} {field} is empty"),
        ));
    }
    Ok(())
}

/// Validates the construction contract and builds the row for a new gift.
///
/// The returned model has status `INIT` and an acceptance deadline of `now` plus
/// [`ACCEPTANCE_WINDOW_DAYS`]. `id` and the audit columns are left for storage to assign.
pub fn new_gift(params: NewGift, gift_token: String, now: DateTime<Utc>) -> Result<gift::ActiveModel> {
    let buyer_user_id = params.buyer_user_id.ok_or_else(|| {
        Error::invalid_parameter("buyer_user_id", "Gift constructor buyer_user_id is null")
    })?;
    let push_type = params.push_type.ok_or_else(|| {
        Error::invalid_parameter("push_type", "Gift constructor push_type is null")
    })?;
    require_non_empty("gift_receiver_name", &params.gift_receiver_name, "constructor")?;
    require_non_empty("gift_receiver_phone", &params.gift_receiver_phone, "constructor")?;
    require_non_empty("gift_message", &params.gift_message, "constructor")?;

    Ok(gift::ActiveModel {
        id: NotSet,
        gift_token: Set(gift_token),
        buyer_user_id: Set(buyer_user_id),
        order_token: Set(params.order_token),
        status: Set(GiftStatus::Init),
        push_type: Set(push_type),
        gift_receiver_name: Set(params.gift_receiver_name),
        gift_receiver_phone: Set(params.gift_receiver_phone),
        gift_message: Set(params.gift_message),
        receiver_name: Set(None),
        receiver_phone: Set(None),
        receiver_zipcode: Set(None),
        receiver_address1: Set(None),
        receiver_address2: Set(None),
        etc_message: Set(None),
        paid_at: Set(None),
        pushed_at: Set(None),
        accepted_at: Set(None),
        expired_at: Set(now + Duration::days(ACCEPTANCE_WINDOW_DAYS)),
        created_at: NotSet,
        updated_at: NotSet,
    })
}

/// `INIT -> IN_PAYMENT`
pub fn begin_payment(current: &gift::Model) -> Result<gift::Model> {
    if current.status != GiftStatus::Init {
        return Err(Error::illegal_state(format!(
            "Gift begin_payment requires INIT, found {:?}",
            current.status
        )));
    }
    Ok(gift::Model {
        status: GiftStatus::InPayment,
        ..current.clone()
    })
}

/// `IN_PAYMENT -> PUSH_COMPLETE`, recording `paid_at`.
///
/// The target is `PUSH_COMPLETE`, not `ORDER_COMPLETE`: completing payment also counts as
/// the gift link being sent.
pub fn complete_payment(current: &gift::Model, now: DateTime<Utc>) -> Result<gift::Model> {
    if current.status != GiftStatus::InPayment {
        return Err(Error::illegal_state(format!(
            "Gift complete_payment requires IN_PAYMENT, found {:?}",
            current.status
        )));
    }
    Ok(gift::Model {
        status: GiftStatus::PushComplete,
        paid_at: Some(now),
        ..current.clone()
    })
}

/// Whether the receiver may accept the gift at `now`.
///
/// A passed deadline closes acceptance permanently, whatever the status.
#[must_use]
pub fn available_accept(current: &gift::Model, now: DateTime<Utc>) -> bool {
    if current.expired_at < now {
        return false;
    }
    current.status.is_acceptable()
}

/// `ORDER_COMPLETE | PUSH_COMPLETE -> ACCEPT`, storing the delivery details.
///
/// Availability is checked before the fields, so a gift that cannot be accepted reports
/// [`Error::IllegalState`] even when the request is also incomplete.
pub fn accept(current: &gift::Model, request: AcceptRequest, now: DateTime<Utc>) -> Result<gift::Model> {
    if !available_accept(current, now) {
        return Err(Error::illegal_state(format!(
            "Gift accept unavailable (status {:?}, expires {})",
            current.status, current.expired_at
        )));
    }
    require_non_empty("receiver_name", &request.receiver_name, "accept")?;
    require_non_empty("receiver_phone", &request.receiver_phone, "accept")?;
    require_non_empty("receiver_zipcode", &request.receiver_zipcode, "accept")?;
    require_non_empty("receiver_address1", &request.receiver_address1, "accept")?;
    require_non_empty("receiver_address2", &request.receiver_address2, "accept")?;
    require_non_empty("etc_message", &request.etc_message, "accept")?;

    Ok(gift::Model {
        status: GiftStatus::Accept,
        receiver_name: Some(request.receiver_name),
        receiver_phone: Some(request.receiver_phone),
        receiver_zipcode: Some(request.receiver_zipcode),
        receiver_address1: Some(request.receiver_address1),
        receiver_address2: Some(request.receiver_address2),
        etc_message: Some(request.etc_message),
        accepted_at: Some(now),
        ..current.clone()
    })
}

/// `any -> EXPIRATION`, overwriting the deadline with the actual expiry time.
#[must_use]
pub fn expire(current: &gift::Model, now: DateTime<Utc>) -> gift::Model {
    gift::Model {
        status: GiftStatus::Expiration,
        expired_at: now,
        ..current.clone()
    }
}
