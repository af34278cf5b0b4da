use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::vote_repository::VoteRepository;
use crate::domain::votes::tally::{RowDecodeError, TallyScope};
use crate::domain::votes::vote::{NewVote, VoteRecord};
use crate::infrastructure::db::PgPool;

pub struct SqlxVoteRepository {
    pub pool: PgPool,
}

impl SqlxVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for SqlxVoteRepository {
    async fn insert_vote(&self, vote: &NewVote) -> anyhow::Result<VoteRecord> {
        let row = sqlx::query(
            r#"INSERT INTO votes (artist, video_id, user_name, tag_id)
               VALUES ($1, $2, $3, $4)
               RETURNING vote_id, time_cast"#,
        )
        .bind(&vote.artist)
        .bind(&vote.video_id)
        .bind(&vote.user_name)
        .bind(&vote.tag_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(VoteRecord {
            vote_id: row.try_get("vote_id")?,
            time_cast: row.try_get("time_cast")?,
            artist: vote.artist.clone(),
            video_id: vote.video_id.clone(),
            user_name: vote.user_name.clone(),
            tag_id: vote.tag_id.clone(),
        })
    }

    async fn scan_tags(
        &self,
        scope: &TallyScope,
    ) -> anyhow::Result<Vec<Result<String, RowDecodeError>>> {
        let rows = if let Some(user_name) = &scope.user_name {
            sqlx::query(
                r#"SELECT tag_id FROM votes
                   WHERE artist = $1 AND video_id = $2 AND user_name = $3"#,
            )
            .bind(&scope.artist)
            .bind(&scope.video_id)
            .bind(user_name)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(r#"SELECT tag_id FROM votes WHERE artist = $1 AND video_id = $2"#)
                .bind(&scope.artist)
                .bind(&scope.video_id)
                .fetch_all(&self.pool)
                .await?
        };
        Ok(rows
            .into_iter()
            .map(|r| {
                r.try_get::<String, _>("tag_id").map_err(|e| RowDecodeError {
                    reason: e.to_string(),
                })
            })
            .collect())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
