use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccessToken {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: NaiveDateTime,
}

impl AccessToken {
    pub async fn get_by_token(
        db: &sqlx::PgPool,
        token: &str,
    ) -> Result<AccessToken, sqlx::Error> {
        sqlx::query_as::<_, AccessToken>(
            r#"
            SELECT token, user_id, expires_at
            FROM access_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_one(db)
        .await
    }
}

pub fn is_expired(expires_at: &NaiveDateTime) -> bool {
    *expires_at < Utc::now().naive_utc()
}
