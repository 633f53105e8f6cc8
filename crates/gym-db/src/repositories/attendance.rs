//! PostgreSQL implementation of AttendanceRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, instrument};

use gym_core::entities::{AttendanceRecord, LedgerChange, LedgerOutcome};
use gym_core::error::DomainError;
use gym_core::traits::{AttendanceRepository, RepoResult};
use gym_core::value_objects::{AttendanceStatus, DateRange, MemberId};

use crate::mappers::records_from_models;
use crate::models::{AttendanceModel, MemberCountModel, MemberLastDateModel};

use super::error::map_db_error;

/// PostgreSQL implementation of AttendanceRepository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    /// Create a new PgAttendanceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    #[instrument(skip(self))]
    async fn has_record(&self, member_id: &MemberId, date: NaiveDate) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM attendance WHERE member_id = $1 AND date = $2)
            ",
        )
        .bind(member_id.as_str())
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn add_record(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> RepoResult<AttendanceRecord> {
        // check and insert in one statement; a conflicting row yields no RETURNING row
        let inserted = sqlx::query_as::<_, AttendanceModel>(
            r"
            INSERT INTO attendance (member_id, date, status, point)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (member_id, date) DO NOTHING
            RETURNING member_id, date, status, point, created_at
            ",
        )
        .bind(member_id.as_str())
        .bind(date)
        .bind(status.as_str())
        .bind(status.legacy_points())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match inserted {
            Some(model) => AttendanceRecord::try_from(model),
            None => Err(DomainError::AlreadyCheckedIn),
        }
    }

    #[instrument(skip(self))]
    async fn records_for_member(
        &self,
        member_id: &MemberId,
        range: Option<DateRange>,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let results = match range {
            Some(range) => {
                sqlx::query_as::<_, AttendanceModel>(
                    r"
                    SELECT member_id, date, status, point, created_at
                    FROM attendance
                    WHERE member_id = $1 AND date BETWEEN $2 AND $3
                    ORDER BY date ASC
                    ",
                )
                .bind(member_id.as_str())
                .bind(range.start())
                .bind(range.end())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, AttendanceModel>(
                    r"
                    SELECT member_id, date, status, point, created_at
                    FROM attendance
                    WHERE member_id = $1
                    ORDER BY date ASC
                    ",
                )
                .bind(member_id.as_str())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        records_from_models(results)
    }

    #[instrument(skip(self))]
    async fn last_record_date(&self, member_id: &MemberId) -> RepoResult<Option<NaiveDate>> {
        let date = sqlx::query_scalar::<_, NaiveDate>(
            r"
            SELECT date FROM attendance
            WHERE member_id = $1
            ORDER BY date DESC
            LIMIT 1
            ",
        )
        .bind(member_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(date)
    }

    #[instrument(skip(self))]
    async fn records_in_range(&self, range: DateRange) -> RepoResult<Vec<AttendanceRecord>> {
        let results = sqlx::query_as::<_, AttendanceModel>(
            r"
            SELECT member_id, date, status, point, created_at
            FROM attendance
            WHERE date BETWEEN $1 AND $2
            ORDER BY date ASC, member_id ASC
            ",
        )
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        records_from_models(results)
    }

    #[instrument(skip(self))]
    async fn last_dates_by_member(&self) -> RepoResult<HashMap<MemberId, NaiveDate>> {
        let rows = sqlx::query_as::<_, MemberLastDateModel>(
            r"
            SELECT member_id, MAX(date) AS last_date
            FROM attendance
            GROUP BY member_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (MemberId::new(row.member_id), row.last_date))
            .collect())
    }

    #[instrument(skip(self))]
    async fn counts_by_member(&self, range: DateRange) -> RepoResult<HashMap<MemberId, u32>> {
        let rows = sqlx::query_as::<_, MemberCountModel>(
            r"
            SELECT member_id, COUNT(*) AS count
            FROM attendance
            WHERE date BETWEEN $1 AND $2
            GROUP BY member_id
            ",
        )
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (MemberId::new(row.member_id), u32::try_from(row.count).unwrap_or(u32::MAX)))
            .collect())
    }

    #[instrument(skip(self, changes), fields(changes = changes.len()))]
    async fn apply_changes(
        &self,
        member_id: &MemberId,
        changes: &[LedgerChange],
    ) -> RepoResult<LedgerOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut outcome = LedgerOutcome::default();

        for change in changes {
            match change.status {
                Some(status) => {
                    sqlx::query(
                        r"
                        INSERT INTO attendance (member_id, date, status, point)
                        VALUES ($1, $2, $3, $4)
                        ON CONFLICT (member_id, date)
                        DO UPDATE SET status = EXCLUDED.status, point = EXCLUDED.point
                        ",
                    )
                    .bind(member_id.as_str())
                    .bind(change.date)
                    .bind(status.as_str())
                    .bind(status.legacy_points())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
                    outcome.upserted += 1;
                }
                None => {
                    let result =
                        sqlx::query("DELETE FROM attendance WHERE member_id = $1 AND date = $2")
                            .bind(member_id.as_str())
                            .bind(change.date)
                            .execute(&mut *tx)
                            .await
                            .map_err(map_db_error)?;
                    if result.rows_affected() > 0 {
                        outcome.deleted += 1;
                    }
                }
            }
        }

        // dropping the transaction on an early return rolls it back
        tx.commit().await.map_err(map_db_error)?;

        debug!(upserted = outcome.upserted, deleted = outcome.deleted, "Ledger changes committed");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn delete_chunk(&self, member_id: &MemberId, limit: u32) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            DELETE FROM attendance
            WHERE (member_id, date) IN (
                SELECT member_id, date FROM attendance
                WHERE member_id = $1
                LIMIT $2
            )
            ",
        )
        .bind(member_id.as_str())
        .bind(i64::from(limit))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(deleted = result.rows_affected(), "Deleted attendance chunk");
        Ok(result.rows_affected())
    }
}
