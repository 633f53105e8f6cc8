//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gym_core::entities::Member;
use gym_core::traits::{MemberRepository, RepoResult};
use gym_core::value_objects::MemberId;

use crate::mappers::{MemberInsert, MemberUpdate};
use crate::models::MemberModel;

use super::error::{map_db_error, member_not_found};

const MEMBER_COLUMNS: &str = "id, nickname, initial_nickname, profile_image, approval, sick_leave, \
     unnotified_absence_1, unnotified_absence_2, batch, created_at, last_login_at, updated_at";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &MemberId) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY nickname, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
        let insert = MemberInsert::new(member);

        sqlx::query(
            r"
            INSERT INTO members (id, nickname, initial_nickname, profile_image, approval)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(insert.id)
        .bind(insert.nickname)
        .bind(insert.initial_nickname)
        .bind(insert.profile_image)
        .bind(insert.approval)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, profile_image))]
    async fn record_login(&self, id: &MemberId, profile_image: Option<&str>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE members
            SET profile_image = $2, last_login_at = NOW(), updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_str())
        .bind(profile_image)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let update = MemberUpdate::new(member);

        let result = sqlx::query(
            r"
            UPDATE members
            SET nickname = $2, approval = $3, sick_leave = $4,
                unnotified_absence_1 = $5, unnotified_absence_2 = $6,
                batch = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(update.id)
        .bind(update.nickname)
        .bind(update.approval)
        .bind(update.sick_leave)
        .bind(update.unnotified_absence_1)
        .bind(update.unnotified_absence_2)
        .bind(update.batch)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(&member.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &MemberId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
