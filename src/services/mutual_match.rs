//! Mutual Match Registry: canonicalized (unordered pair) record of
//! confirmed mutual matches, backed by the `mutual_matches` table.
//!
//! Pairs are always stored as `(user_id_1, user_id_2)` with
//! `user_id_1 < user_id_2`, so exactly one row represents any unordered
//! pair regardless of which side acted second.

use sqlx::{PgPool, Postgres, Row, Transaction};
use thiserror::Error;
use uuid::Uuid;

use crate::core::state_machine::canonicalize_pair;
use crate::models::domain::MutualMatch;

#[derive(Debug, Error)]
pub enum MutualMatchError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub struct MutualMatchRegistry {
    pool: PgPool,
}

impl MutualMatchRegistry {
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Lock the canonical pair's row (if any) for the duration of the
    /// caller's transaction, serializing concurrent attempts on the same
    /// pair per the "record like -> probe inverse -> create mutual" ordering
    /// guarantee.
    pub async fn lock_pair_tx(tx: &mut Transaction<'_, Postgres>, a: Uuid, b: Uuid) -> Result<(), MutualMatchError> {
        let (u1, u2) = canonicalize_pair(a, b);
        sqlx::query("SELECT id FROM mutual_matches WHERE user_id_1 = $1 AND user_id_2 = $2 FOR UPDATE")
            .bind(u1)
            .bind(u2)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(())
    }

    /// Create or reactivate the canonical pair's mutual match. A no-op if
    /// already active.
    pub async fn create_tx(tx: &mut Transaction<'_, Postgres>, a: Uuid, b: Uuid) -> Result<(), MutualMatchError> {
        let (u1, u2) = canonicalize_pair(a, b);
        sqlx::query(
            r#"
            INSERT INTO mutual_matches (user_id_1, user_id_2, matched_at, is_active, created_at, updated_at, is_deleted)
            VALUES ($1, $2, NOW(), TRUE, NOW(), NOW(), FALSE)
            ON CONFLICT (user_id_1, user_id_2) WHERE NOT is_deleted
            DO UPDATE SET
                matched_at = CASE WHEN mutual_matches.is_active THEN mutual_matches.matched_at ELSE NOW() END,
                is_active = TRUE,
                updated_at = NOW()
            "#,
        )
        .bind(u1)
        .bind(u2)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Deactivate the canonical pair's mutual match, if currently active.
    pub async fn deactivate_tx(tx: &mut Transaction<'_, Postgres>, a: Uuid, b: Uuid) -> Result<(), MutualMatchError> {
        let (u1, u2) = canonicalize_pair(a, b);
        sqlx::query(
            r#"
            UPDATE mutual_matches
            SET is_active = FALSE, updated_at = NOW()
            WHERE user_id_1 = $1 AND user_id_2 = $2 AND is_active AND NOT is_deleted
            "#,
        )
        .bind(u1)
        .bind(u2)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// List `user`'s active mutual matches, most recent first.
    pub async fn list(&self, user: Uuid, limit: i64, offset: i64) -> Result<(Vec<MutualMatch>, i64), MutualMatchError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM mutual_matches
            WHERE (user_id_1 = $1 OR user_id_2 = $1) AND is_active AND NOT is_deleted
            "#,
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(
            r#"
            SELECT user_id_1, user_id_2, matched_at, is_active
            FROM mutual_matches
            WHERE (user_id_1 = $1 OR user_id_2 = $1) AND is_active AND NOT is_deleted
            ORDER BY matched_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|row| MutualMatch {
                user_id_1: row.get("user_id_1"),
                user_id_2: row.get("user_id_2"),
                matched_at: row.get("matched_at"),
                is_active: row.get("is_active"),
            })
            .collect();

        Ok((items, total))
    }

    pub async fn health_check(&self) -> Result<bool, MutualMatchError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.map(|_| true).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_pair_used_consistently() {
        let a = Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
        let b = Uuid::parse_str("00000000-0000-0000-0000-000000000002").unwrap();
        assert_eq!(canonicalize_pair(a, b), canonicalize_pair(b, a));
    }
}
