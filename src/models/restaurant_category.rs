use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCategory {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl RestaurantCategory {
    pub async fn get_all(db: &sqlx::PgPool) -> Result<Vec<RestaurantCategory>, sqlx::Error> {
        sqlx::query_as::<_, RestaurantCategory>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM restaurant_categories
            ORDER BY name
            "#,
        )
        .fetch_all(db)
        .await
    }
}
