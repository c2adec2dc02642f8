//! Gift persistence - Creates gifts and drives them through the lifecycle in the database.
//!
//! Each transition loads the gift by its public token inside a database transaction, applies
//! the pure transition from [`crate::core::lifecycle`] and writes the result back with an
//! UPDATE guarded on the status it read. A gift that was moved on by another caller in the
//! meantime matches no row, and the late caller gets [`Error::IllegalState`] instead of
//! silently overwriting the first transition.

use crate::{
    core::{
        lifecycle::{self, AcceptRequest, GIFT_TOKEN_PREFIX, NewGift},
        token::random_token_with_prefix,
    },
    entities::{Gift, GiftStatus, gift},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{DbErr, IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};

/// Validates the construction contract, assigns a fresh public token and stores the gift.
///
/// `id`, `created_at` and `updated_at` are filled in by storage on insert.
#[instrument(skip(db, params), fields(buyer_user_id = ?params.buyer_user_id))]
pub async fn create_gift(db: &DatabaseConnection, params: NewGift) -> Result<gift::Model> {
    let active = lifecycle::new_gift(
        params,
        random_token_with_prefix(GIFT_TOKEN_PREFIX),
        Utc::now(),
    )?;
    let created = active.insert(db).await?;
    info!(gift_token = %created.gift_token, "Gift created");
    Ok(created)
}

/// Finds a gift by its public token.
pub async fn get_gift_by_token(
    db: &DatabaseConnection,
    gift_token: &str,
) -> Result<Option<gift::Model>> {
    Gift::find()
        .filter(gift::Column::GiftToken.eq(gift_token))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a gift by its internal id.
pub async fn get_gift_by_id(db: &DatabaseConnection, gift_id: i64) -> Result<Option<gift::Model>> {
    Gift::find_by_id(gift_id).one(db).await.map_err(Into::into)
}

/// Lists every gift a buyer has ordered, newest first.
pub async fn get_gifts_by_buyer(
    db: &DatabaseConnection,
    buyer_user_id: i64,
) -> Result<Vec<gift::Model>> {
    Gift::find()
        .filter(gift::Column::BuyerUserId.eq(buyer_user_id))
        .order_by_desc(gift::Column::CreatedAt)
        .order_by_desc(gift::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Moves a freshly created gift into payment (`INIT -> IN_PAYMENT`).
pub async fn begin_payment(db: &DatabaseConnection, gift_token: &str) -> Result<gift::Model> {
    apply_transition(db, gift_token, "begin_payment", |current, _now| {
        lifecycle::begin_payment(current)
    })
    .await
}

/// Records a completed payment (`IN_PAYMENT -> PUSH_COMPLETE`).
pub async fn complete_payment(db: &DatabaseConnection, gift_token: &str) -> Result<gift::Model> {
    apply_transition(db, gift_token, "complete_payment", lifecycle::complete_payment).await
}

/// Accepts the gift on behalf of the receiver, storing the delivery details.
pub async fn accept_gift(
    db: &DatabaseConnection,
    gift_token: &str,
    request: AcceptRequest,
) -> Result<gift::Model> {
    apply_transition(db, gift_token, "accept", |current, now| {
        lifecycle::accept(current, request, now)
    })
    .await
}

/// Expires the gift regardless of its current status.
pub async fn expire_gift(db: &DatabaseConnection, gift_token: &str) -> Result<gift::Model> {
    apply_transition(db, gift_token, "expire", |current, now| {
        Ok(lifecycle::expire(current, now))
    })
    .await
}

/// Expires every pre-acceptance gift whose acceptance deadline is before `now`.
///
/// Gifts that another caller transitions while the sweep runs are skipped. Returns the
/// gifts this sweep expired.
#[instrument(skip(db))]
pub async fn expire_overdue_gifts(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<Vec<gift::Model>> {
    let overdue = Gift::find()
        .filter(gift::Column::ExpiredAt.lt(now))
        .filter(gift::Column::Status.is_in(GiftStatus::PRE_ACCEPTANCE))
        .order_by_asc(gift::Column::ExpiredAt)
        .all(db)
        .await?;

    let mut expired = Vec::with_capacity(overdue.len());
    for current in overdue {
        let next = lifecycle::expire(&current, now);
        match write_guarded(db, &current, next, now).await {
            Ok(model) => {
                info!(
                    gift_token = %model.gift_token,
                    from = ?current.status,
                    "Gift expired by sweep"
                );
                expired.push(model);
            }
            Err(Error::IllegalState { message }) => {
                warn!(gift_token = %current.gift_token, "Skipping gift in sweep: {message}");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(expired)
}

#[instrument(skip(db, transition))]
async fn apply_transition<F>(
    db: &DatabaseConnection,
    gift_token: &str,
    operation: &'static str,
    transition: F,
) -> Result<gift::Model>
where
    F: FnOnce(&gift::Model, DateTime<Utc>) -> Result<gift::Model>,
{
    let txn = db.begin().await?;

    let current = Gift::find()
        .filter(gift::Column::GiftToken.eq(gift_token))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::GiftNotFound {
            token: gift_token.to_string(),
        })?;

    let now = Utc::now();
    let next = transition(&current, now)?;
    let updated = write_guarded(&txn, &current, next, now).await?;

    txn.commit().await?;

    info!(
        gift_token,
        operation,
        from = ?current.status,
        to = ?updated.status,
        "Gift transitioned"
    );
    Ok(updated)
}

/// Writes `next` over `current` only if the stored status is still `current.status`.
async fn write_guarded<C>(
    db: &C,
    current: &gift::Model,
    next: gift::Model,
    now: DateTime<Utc>,
) -> Result<gift::Model>
where
    C: ConnectionTrait,
{
    let mut active = next.into_active_model().reset_all();
    active.updated_at = Set(now);

    match Gift::update(active)
        .filter(gift::Column::Status.eq(current.status))
        .exec(db)
        .await
    {
        Ok(model) => Ok(model),
        Err(DbErr::RecordNotUpdated) => {
            warn!(
                gift_token = %current.gift_token,
                expected = ?current.status,
                "Guarded gift update matched no row"
            );
            Err(Error::illegal_state(format!(
                "Gift {} is no longer {:?}",
                current.gift_token, current.status
            )))
        }
        Err(e) => Err(e.into()),
    }
}
