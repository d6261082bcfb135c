use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use crate::models::requests::restaurant::RestaurantPayload;
use crate::models::restaurant_category::RestaurantCategory;

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub postal_code: String,
    pub url: Option<String>,
    pub shipping_costs: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub logo: Option<String>,
    pub hero_image: Option<String>,
    pub discount_code: Option<String>,
    pub discount_value: Option<i32>,
    pub restaurant_category_id: i32,
    pub user_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Projection returned for owner-scoped listings: the owning user id is
/// excluded and the category association is embedded.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantWithCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub postal_code: String,
    pub url: Option<String>,
    pub shipping_costs: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub logo: Option<String>,
    pub hero_image: Option<String>,
    pub discount_code: Option<String>,
    pub discount_value: Option<i32>,
    pub restaurant_category: Option<RestaurantCategory>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

const RESTAURANT_COLUMNS: &str = r#"
    id, name, description, address, postal_code, url, shipping_costs,
    email, phone, logo, hero_image, discount_code, discount_value,
    restaurant_category_id, user_id, created_at, updated_at
"#;

impl Restaurant {
    pub async fn create(
        db: &sqlx::PgPool,
        user_id: &Uuid,
        payload: &RestaurantPayload,
        hero_image: Option<String>,
        logo: Option<String>,
    ) -> Result<Restaurant, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO restaurants
                (name, description, address, postal_code, url, shipping_costs,
                 email, phone, logo, hero_image, discount_code, discount_value,
                 restaurant_category_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {RESTAURANT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Restaurant>(&query)
            .bind(payload.name.as_deref())
            .bind(payload.description.as_deref())
            .bind(payload.address.as_deref())
            .bind(payload.postal_code.as_deref())
            .bind(payload.url.as_deref())
            .bind(payload.shipping_costs)
            .bind(payload.email.as_deref())
            .bind(payload.phone.as_deref())
            .bind(logo)
            .bind(hero_image)
            .bind(payload.discount_code.as_deref())
            .bind(payload.discount_value)
            .bind(payload.restaurant_category_id)
            .bind(user_id)
            .fetch_one(db)
            .await
    }

    pub async fn update(
        db: &sqlx::PgPool,
        id: &Uuid,
        user_id: &Uuid,
        payload: &RestaurantPayload,
        hero_image: Option<String>,
        logo: Option<String>,
    ) -> Result<Restaurant, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE restaurants
            SET name = $1, description = $2, address = $3, postal_code = $4,
                url = $5, shipping_costs = $6, email = $7, phone = $8,
                logo = COALESCE($9, logo),
                hero_image = COALESCE($10, hero_image),
                discount_code = $11, discount_value = $12,
                restaurant_category_id = $13, updated_at = NOW()
            WHERE id = $14 AND user_id = $15
            RETURNING {RESTAURANT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Restaurant>(&query)
            .bind(payload.name.as_deref())
            .bind(payload.description.as_deref())
            .bind(payload.address.as_deref())
            .bind(payload.postal_code.as_deref())
            .bind(payload.url.as_deref())
            .bind(payload.shipping_costs)
            .bind(payload.email.as_deref())
            .bind(payload.phone.as_deref())
            .bind(logo)
            .bind(hero_image)
            .bind(payload.discount_code.as_deref())
            .bind(payload.discount_value)
            .bind(payload.restaurant_category_id)
            .bind(id)
            .bind(user_id)
            .fetch_one(db)
            .await
    }

    pub async fn delete(
        db: &sqlx::PgPool,
        id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Restaurant, sqlx::Error> {
        let query = format!(
            r#"
            DELETE FROM restaurants
            WHERE id = $1 AND user_id = $2
            RETURNING {RESTAURANT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Restaurant>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_one(db)
            .await
    }

    /// All restaurants owned by `user_id`, category association included,
    /// owner id left out of the projection.
    pub async fn find_all_by_user_id(
        db: &sqlx::PgPool,
        user_id: &Uuid,
    ) -> Result<Vec<RestaurantWithCategory>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.name, r.description, r.address, r.postal_code, r.url,
                   r.shipping_costs, r.email, r.phone, r.logo, r.hero_image,
                   r.discount_code, r.discount_value, r.created_at, r.updated_at,
                   c.id AS category_id, c.name AS category_name,
                   c.created_at AS category_created_at, c.updated_at AS category_updated_at
            FROM restaurants r
            LEFT JOIN restaurant_categories c ON c.id = r.restaurant_category_id
            WHERE r.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        let mut restaurants = Vec::with_capacity(rows.len());
        for row in rows {
            let restaurant_category = match row.try_get::<Option<i32>, _>("category_id")? {
                Some(category_id) => Some(RestaurantCategory {
                    id: category_id,
                    name: row.try_get("category_name")?,
                    created_at: row.try_get("category_created_at")?,
                    updated_at: row.try_get("category_updated_at")?,
                }),
                None => None,
            };

            restaurants.push(RestaurantWithCategory {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                description: row.try_get("description")?,
                address: row.try_get("address")?,
                postal_code: row.try_get("postal_code")?,
                url: row.try_get("url")?,
                shipping_costs: row.try_get("shipping_costs")?,
                email: row.try_get("email")?,
                phone: row.try_get("phone")?,
                logo: row.try_get("logo")?,
                hero_image: row.try_get("hero_image")?,
                discount_code: row.try_get("discount_code")?,
                discount_value: row.try_get("discount_value")?,
                restaurant_category,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            });
        }

        Ok(restaurants)
    }
}
