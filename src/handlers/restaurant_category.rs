use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sqlx::PgPool;

use crate::models::responses::DefaultResponse;
use crate::models::restaurant_category::RestaurantCategory;

pub async fn get_all(State(db): State<PgPool>) -> Response {
    let categories = match RestaurantCategory::get_all(&db).await {
        Ok(categories) => categories,
        Err(err) => {
            let body =
                DefaultResponse::error("get restaurant categories failed", err.to_string())
                    .into_json();

            return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
        }
    };

    let body = DefaultResponse::ok("get restaurant categories success")
        .with_data(json!(categories))
        .into_json();

    (StatusCode::OK, body).into_response()
}
