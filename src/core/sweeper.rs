//! Periodic expiry sweep driven by the sweeper binary.

use crate::core::gift::expire_overdue_gifts;
use sea_orm::DatabaseConnection;
use std::{future::Future, time::Duration};
use tracing::{error, info};

/// Runs [`expire_overdue_gifts`] every `interval` until `shutdown` completes.
///
/// The first sweep starts immediately. `shutdown` is polled as the same future for the
/// whole run, so a shutdown that fires while a sweep is in progress ends the loop once
/// that sweep finishes. Returns the number of gifts expired.
pub async fn run_expiry_sweep<F>(db: &DatabaseConnection, interval: Duration, shutdown: F) -> usize
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(interval);
    let mut total_expired = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match expire_overdue_gifts(db, chrono::Utc::now()).await {
                    Ok(expired) if !expired.is_empty() => {
                        info!("Expired {} overdue gift(s).", expired.len());
                        total_expired += expired.len();
                    }
                    Ok(_) => {}
                    Err(e) => error!("Expiry sweep failed: {}", e),
                }
            }
            () = &mut shutdown => {
                info!("Shutdown requested, stopping expiry sweep.");
                break;
            }
        }
    }

    total_expired
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::gift::get_gift_by_token,
        entities::GiftStatus,
        errors::Result,
        test_utils::{create_overdue_gift, create_test_gift, init_test_tracing, setup_test_db},
    };

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_sweep_expires_overdue_gifts_then_stops() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let overdue = create_overdue_gift(&db).await?;
        let fresh = create_test_gift(&db).await?;

        let expired = tokio::time::timeout(
            Duration::from_secs(5),
            run_expiry_sweep(&db, HOUR, tokio::time::sleep(Duration::from_millis(50))),
        )
        .await
        .unwrap();
        assert_eq!(expired, 1);

        let overdue = get_gift_by_token(&db, &overdue.gift_token).await?.unwrap();
        assert_eq!(overdue.status, GiftStatus::Expiration);
        let fresh = get_gift_by_token(&db, &fresh.gift_token).await?.unwrap();
        assert_eq!(fresh.status, GiftStatus::Init);
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown_already_signalled_stops_the_sweep() -> Result<()> {
        let db = setup_test_db().await?;
        create_overdue_gift(&db).await?;

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            run_expiry_sweep(&db, HOUR, std::future::ready(())),
        )
        .await;
        assert!(result.is_ok());
        Ok(())
    }
}
