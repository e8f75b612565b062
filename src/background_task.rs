use tokio::time::{interval, Duration};

use crate::repositories::{sqlx_repo::SqlxUserRepo, user::UserRepository};

/// Daily sweep that hard-deletes accounts past their soft-delete grace
/// period.
pub async fn start_purge_task(repo: SqlxUserRepo) {
    let mut interval = interval(Duration::from_secs(60 * 60 * 24));

    loop {
        interval.tick().await;

        match repo.purge_soft_deleted_users().await {
            Ok(count) => tracing::info!("Purged {} soft-deleted users", count),
            Err(e) => tracing::error!("Purge failed: {}", e)
        }
    }
}
