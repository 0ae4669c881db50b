//! Action Ledger: persistent, per-(actor, target) directional record of
//! `{liked, passed}`, backed by the `profile_matches` table.
//!
//! Upserts via `INSERT ... ON CONFLICT ... DO UPDATE`, the same pattern the
//! reference implementation's seen-profile tracker uses, to avoid a
//! time-of-check/time-of-use race on rapid toggling.

use std::collections::HashSet;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Row, Transaction};
use thiserror::Error;
use uuid::Uuid;

use crate::models::domain::{Action, ActionStatus};

#[derive(Debug, Error)]
pub enum ActionLedgerError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// The ledger row's status immediately prior to a write, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorAction {
    pub status: ActionStatus,
}

pub struct ActionLedger {
    pool: PgPool,
}

impl ActionLedger {
    pub async fn new(database_url: &str, max_connections: u32, min_connections: u32) -> Result<Self, ActionLedgerError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Upsert `(actor, target) -> status`, run against the shared pool. Use
    /// [`record_or_update_tx`] instead when this write must be atomic with a
    /// Mutual Match Registry probe.
    pub async fn record_or_update(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        status: ActionStatus,
    ) -> Result<Option<PriorAction>, ActionLedgerError> {
        let mut tx = self.pool.begin().await?;
        let prior = Self::record_or_update_tx(&mut tx, actor_id, target_id, status).await?;
        tx.commit().await?;
        Ok(prior)
    }

    pub async fn record_or_update_tx(
        tx: &mut Transaction<'_, Postgres>,
        actor_id: Uuid,
        target_id: Uuid,
        status: ActionStatus,
    ) -> Result<Option<PriorAction>, ActionLedgerError> {
        let prior = sqlx::query(
            r#"
            SELECT status FROM profile_matches
            WHERE user_id = $1 AND target_id = $2 AND NOT is_deleted
            "#,
        )
        .bind(actor_id)
        .bind(target_id)
        .fetch_optional(&mut **tx)
        .await?
        .map(|row| PriorAction {
            status: row.get::<ActionStatus, _>("status"),
        });

        sqlx::query(
            r#"
            INSERT INTO profile_matches (user_id, target_id, status, created_at, updated_at, is_deleted)
            VALUES ($1, $2, $3, NOW(), NOW(), FALSE)
            ON CONFLICT (user_id, target_id) WHERE NOT is_deleted
            DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
            "#,
        )
        .bind(actor_id)
        .bind(target_id)
        .bind(status)
        .execute(&mut **tx)
        .await?;

        Ok(prior)
    }

    /// Probe the inverse direction `(target -> actor)` within a transaction,
    /// used to decide mutual-match creation/deactivation.
    pub async fn get_status_tx(
        tx: &mut Transaction<'_, Postgres>,
        actor_id: Uuid,
        target_id: Uuid,
    ) -> Result<Option<ActionStatus>, ActionLedgerError> {
        let row = sqlx::query(
            r#"
            SELECT status FROM profile_matches
            WHERE user_id = $1 AND target_id = $2 AND NOT is_deleted
            "#,
        )
        .bind(actor_id)
        .bind(target_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(|r| r.get::<ActionStatus, _>("status")))
    }

    pub async fn exclude_targets(&self, actor_id: Uuid) -> Result<HashSet<Uuid>, ActionLedgerError> {
        let rows = sqlx::query(
            r#"
            SELECT target_id FROM profile_matches
            WHERE user_id = $1 AND NOT is_deleted
            "#,
        )
        .bind(actor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.get("target_id")).collect())
    }

    /// List an actor's history, most recently acted-upon first, optionally
    /// filtered by status.
    pub async fn list_history(
        &self,
        actor_id: Uuid,
        status_filter: Option<ActionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Action>, i64), ActionLedgerError> {
        let total: i64 = match status_filter {
            Some(status) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM profile_matches WHERE user_id = $1 AND status = $2 AND NOT is_deleted",
                )
                .bind(actor_id)
                .bind(status)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM profile_matches WHERE user_id = $1 AND NOT is_deleted")
                    .bind(actor_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        let rows = match status_filter {
            Some(status) => {
                sqlx::query(
                    r#"
                    SELECT user_id, target_id, status, created_at, updated_at
                    FROM profile_matches
                    WHERE user_id = $1 AND status = $2 AND NOT is_deleted
                    ORDER BY created_at DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(actor_id)
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT user_id, target_id, status, created_at, updated_at
                    FROM profile_matches
                    WHERE user_id = $1 AND NOT is_deleted
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(actor_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let items = rows
            .into_iter()
            .map(|row| Action {
                actor_id: row.get("user_id"),
                target_id: row.get("target_id"),
                status: row.get("status"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            })
            .collect();

        Ok((items, total))
    }

    pub async fn health_check(&self) -> Result<bool, ActionLedgerError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.map(|_| true).map_err(Into::into)
    }
}
