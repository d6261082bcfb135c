use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::path::Path as FilePath;
use uuid::Uuid;

use crate::config::UploadsDir;
use crate::errors::Errors;
use crate::logger::Logger;
use crate::models::requests::restaurant::{RestaurantPayload, UploadedFile};
use crate::models::responses::DefaultResponse;
use crate::models::restaurant::Restaurant;
use crate::validation;

pub async fn get_by_authenticated_user(
    State(db): State<PgPool>,
    Extension(user_id): Extension<Uuid>,
) -> Response {
    let restaurants = match Restaurant::find_all_by_user_id(&db, &user_id).await {
        Ok(restaurants) => restaurants,
        Err(err) => {
            let body = DefaultResponse::error("get restaurants failed", err.to_string()).into_json();

            return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
        }
    };

    let body = DefaultResponse::ok("get restaurants by authenticated user success")
        .with_data(json!(restaurants))
        .into_json();

    (StatusCode::OK, body).into_response()
}

pub async fn create(
    State(db): State<PgPool>,
    Extension(user_id): Extension<Uuid>,
    Extension(UploadsDir(uploads_dir)): Extension<UploadsDir>,
    multipart: Multipart,
) -> Result<Json<Value>, Errors> {
    let (payload, uploads) = RestaurantPayload::from_multipart(multipart).await?;

    validation::restaurant::create(&db, &user_id, &payload, &uploads).await?;

    let payload = payload.normalized();
    let hero_image = store_upload(uploads.hero_image.as_ref(), "heroImage", &uploads_dir).await?;
    let logo = store_upload(uploads.logo.as_ref(), "logo", &uploads_dir).await?;

    let restaurant =
        match Restaurant::create(&db, &user_id, &payload, hero_image.clone(), logo.clone()).await {
            Ok(restaurant) => restaurant,
            Err(err) => {
                Logger::new(format!("{:?}", err)).log();
                remove_stored_uploads(&[hero_image.as_deref(), logo.as_deref()]).await;

                return Err(Errors::new(&[("restaurant", "could not be created")]));
            }
        };

    let body = DefaultResponse::ok("create restaurant successfully").with_data(json!(restaurant));

    Ok(body.into_response())
}

pub async fn update(
    State(db): State<PgPool>,
    Extension(user_id): Extension<Uuid>,
    Extension(UploadsDir(uploads_dir)): Extension<UploadsDir>,
    Path((restaurant_id,)): Path<(Uuid,)>,
    multipart: Multipart,
) -> Result<Json<Value>, Errors> {
    let (payload, uploads) = RestaurantPayload::from_multipart(multipart).await?;

    validation::restaurant::update(&db, &user_id, &payload, &uploads).await?;

    let payload = payload.normalized();
    let hero_image = store_upload(uploads.hero_image.as_ref(), "heroImage", &uploads_dir).await?;
    let logo = store_upload(uploads.logo.as_ref(), "logo", &uploads_dir).await?;

    let restaurant = match Restaurant::update(
        &db,
        &restaurant_id,
        &user_id,
        &payload,
        hero_image.clone(),
        logo.clone(),
    )
    .await
    {
        Ok(restaurant) => restaurant,
        Err(err) => {
            Logger::new(format!("{:?}", err)).log();
            remove_stored_uploads(&[hero_image.as_deref(), logo.as_deref()]).await;

            return Err(Errors::new(&[("restaurant", "could not be updated")]));
        }
    };

    let body = DefaultResponse::ok("update restaurant successfully").with_data(json!(restaurant));

    Ok(body.into_response())
}

pub async fn delete(
    State(db): State<PgPool>,
    Extension(user_id): Extension<Uuid>,
    Path((restaurant_id,)): Path<(Uuid,)>,
) -> Result<Json<Value>, Errors> {
    let restaurant = match Restaurant::delete(&db, &restaurant_id, &user_id).await {
        Ok(restaurant) => restaurant,
        Err(err) => {
            Logger::new(format!("{:?}", err)).log();

            return Err(Errors::new(&[("restaurant", "not found")]));
        }
    };

    let body = DefaultResponse::ok("delete restaurant successfully").with_data(json!(restaurant));

    Ok(body.into_response())
}

/// Writes a validated upload under the uploads directory with a fresh uuid
/// name, returning the stored relative path.
async fn store_upload(
    file: Option<&UploadedFile>,
    field: &'static str,
    uploads_dir: &str,
) -> Result<Option<String>, Errors> {
    let Some(file) = file else { return Ok(None) };

    let extension = file
        .file_name
        .as_deref()
        .and_then(|name| FilePath::new(name).extension())
        .and_then(|extension| extension.to_str())
        .unwrap_or("img");
    let stored_path = format!("{}/{}.{}", uploads_dir, Uuid::new_v4(), extension);

    if let Err(err) = tokio::fs::write(&stored_path, &file.data).await {
        Logger::new(format!("failed to store {}: {:?}", field, err)).log();

        return Err(Errors::new(&[(field, "could not be stored")]));
    }

    Ok(Some(stored_path))
}

/// Removes files written ahead of a persist step that then failed.
async fn remove_stored_uploads(paths: &[Option<&str>]) {
    for path in paths.iter().flatten() {
        if let Err(err) = tokio::fs::remove_file(path).await {
            Logger::new(format!("failed to remove {}: {:?}", path, err)).log();
        }
    }
}
