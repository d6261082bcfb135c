use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{Errors, FieldValidator};
use crate::models::requests::restaurant::{RestaurantPayload, RestaurantUploads, UploadedFile};
use crate::models::restaurant::{Restaurant, RestaurantWithCategory};
use crate::validation::file;

/// Validation entry point for inserting a new restaurant.
pub async fn create(
    db: &PgPool,
    user_id: &Uuid,
    payload: &RestaurantPayload,
    uploads: &RestaurantUploads,
) -> Result<(), Errors> {
    validate(db, user_id, payload, uploads).await
}

/// Validation entry point for modifying an existing restaurant. Same rule
/// set as `create`, kept as a separate name for call-site clarity.
pub async fn update(
    db: &PgPool,
    user_id: &Uuid,
    payload: &RestaurantPayload,
    uploads: &RestaurantUploads,
) -> Result<(), Errors> {
    validate(db, user_id, payload, uploads).await
}

async fn validate(
    db: &PgPool,
    user_id: &Uuid,
    payload: &RestaurantPayload,
    uploads: &RestaurantUploads,
) -> Result<(), Errors> {
    let mut extractor = FieldValidator::validate(payload);

    apply_discount_pairing_rules(&mut extractor, payload);

    // An absent code can never conflict, so the store is only consulted when
    // one is supplied. Stored codes are trimmed at persistence, so the
    // candidate is compared trimmed as well.
    if let Some(code) = payload
        .discount_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
    {
        match Restaurant::find_all_by_user_id(db, user_id).await {
            Ok(restaurants) => {
                if count_discount_code_conflicts(&restaurants, payload.name.as_deref(), code) > 0 {
                    extractor.reject(
                        "discountCode",
                        format!(
                            "The discount code {code} is already being used in other of your restaurants"
                        ),
                    );
                }
            }
            // A store failure surfaces through the same channel as a
            // genuine duplicate.
            Err(err) => extractor.reject("discountCode", err.to_string()),
        }
    }

    check_upload(&mut extractor, "heroImage", uploads.hero_image.as_ref());
    check_upload(&mut extractor, "logo", uploads.logo.as_ref());

    extractor.check()
}

fn apply_discount_pairing_rules(extractor: &mut FieldValidator, payload: &RestaurantPayload) {
    if payload.discount_value.is_some() && payload.discount_code.is_none() {
        extractor.reject(
            "discountCode",
            "There is not a discount code associated to the present discount value".to_string(),
        );
    }
    if payload.discount_code.is_some() && payload.discount_value.is_none() {
        extractor.reject(
            "discountValue",
            "There is not a discount value associated to the present discount code".to_string(),
        );
    }
}

/// Restaurants of the same owner holding the candidate code under a
/// different name. A same-named record keeping its own code is not a
/// conflict.
fn count_discount_code_conflicts(
    restaurants: &[RestaurantWithCategory],
    candidate_name: Option<&str>,
    code: &str,
) -> usize {
    let code = code.trim();
    let candidate_name = candidate_name.map(str::trim);

    restaurants
        .iter()
        .filter(|restaurant| Some(restaurant.name.as_str()) != candidate_name)
        .filter(|restaurant| restaurant.discount_code.as_deref() == Some(code))
        .count()
}

fn check_upload(extractor: &mut FieldValidator, field: &'static str, file: Option<&UploadedFile>) {
    let Some(file) = file else { return };

    // Format and size are independent chains, both failures can show up.
    if !file::check_file_is_image(file) {
        extractor.reject(
            field,
            "Please upload an image with format (jpeg, png).".to_string(),
        );
    }
    if !file::check_file_max_size(file, file::MAX_FILE_SIZE) {
        extractor.reject(
            field,
            format!("Maximum file size of {}MB", file::MAX_FILE_SIZE / 1_000_000),
        );
    }
}
