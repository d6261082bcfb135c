use axum::extract::Multipart;
use serde::Deserialize;
use serde_json::json;
use validator::ValidationError;
use validator_derive::Validate;

use crate::errors::Errors;

/// Candidate restaurant record under validation. Optional text fields follow
/// the convention that an empty string counts as absent and skips that
/// field's own constraints.
#[derive(Deserialize, Validate, Debug, Default, Clone)]
pub struct RestaurantPayload {
    #[validate(
        required(message = "must be present"),
        length(min = 1, max = 255, message = "must be between 1 and 255 characters long")
    )]
    pub name: Option<String>,
    #[serde(rename = "discountCode")]
    #[validate(custom = "discount_code_format")]
    pub discount_code: Option<String>,
    #[serde(rename = "discountValue")]
    #[validate(range(min = 1, max = 99, message = "must be an integer between 1 and 99"))]
    pub discount_value: Option<i32>,
    pub description: Option<String>,
    #[validate(
        required(message = "must be present"),
        length(min = 1, max = 255, message = "must be between 1 and 255 characters long")
    )]
    pub address: Option<String>,
    #[serde(rename = "postalCode")]
    #[validate(
        required(message = "must be present"),
        length(min = 1, max = 255, message = "must be between 1 and 255 characters long")
    )]
    pub postal_code: Option<String>,
    #[validate(custom = "optional_url")]
    pub url: Option<String>,
    #[serde(rename = "shippingCosts")]
    #[validate(
        required(message = "must be present"),
        range(min = 0.0, message = "must be zero or a positive number")
    )]
    pub shipping_costs: Option<f64>,
    #[validate(custom = "optional_email")]
    pub email: Option<String>,
    #[validate(custom = "optional_phone")]
    pub phone: Option<String>,
    #[serde(rename = "restaurantCategoryId")]
    #[validate(
        required(message = "must be present"),
        range(min = 1, message = "must be an integer greater than 0")
    )]
    pub restaurant_category_id: Option<i32>,
    #[serde(rename = "userId")]
    #[validate(custom = "user_id_not_allowed")]
    pub user_id: Option<serde_json::Value>,
}

/// File attached to a create/update request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct RestaurantUploads {
    pub hero_image: Option<UploadedFile>,
    pub logo: Option<UploadedFile>,
}

impl RestaurantPayload {
    /// Parses a multipart form into the payload plus its attached uploads.
    /// Numeric fields are coerced; a value that does not coerce is reported
    /// as a validation failure on that field.
    pub async fn from_multipart(
        mut multipart: Multipart,
    ) -> Result<(RestaurantPayload, RestaurantUploads), Errors> {
        let mut payload = RestaurantPayload::default();
        let mut uploads = RestaurantUploads::default();
        let mut coercion_errors: Vec<(&'static str, &'static str)> = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| Errors::new(&[("body", "could not be read")]))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "heroImage" => {
                    let file_name = field.file_name().map(|value| value.to_string());
                    let content_type = field.content_type().map(|value| value.to_string());
                    let data = field
                        .bytes()
                        .await
                        .map_err(|_| Errors::new(&[("heroImage", "could not be read")]))?;
                    if !data.is_empty() {
                        uploads.hero_image = Some(UploadedFile {
                            file_name,
                            content_type,
                            data: data.to_vec(),
                        });
                    }
                }
                "logo" => {
                    let file_name = field.file_name().map(|value| value.to_string());
                    let content_type = field.content_type().map(|value| value.to_string());
                    let data = field
                        .bytes()
                        .await
                        .map_err(|_| Errors::new(&[("logo", "could not be read")]))?;
                    if !data.is_empty() {
                        uploads.logo = Some(UploadedFile {
                            file_name,
                            content_type,
                            data: data.to_vec(),
                        });
                    }
                }
                _ => {
                    let text = field
                        .text()
                        .await
                        .map_err(|_| Errors::new(&[("body", "could not be read")]))?;
                    payload.set_text_field(&name, text, &mut coercion_errors);
                }
            }
        }

        if !coercion_errors.is_empty() {
            return Err(Errors::new(&coercion_errors));
        }

        Ok((payload, uploads))
    }

    fn set_text_field(
        &mut self,
        name: &str,
        text: String,
        coercion_errors: &mut Vec<(&'static str, &'static str)>,
    ) {
        match name {
            "name" => self.name = Some(text),
            "discountCode" => self.discount_code = Some(text),
            "discountValue" => {
                // Empty optional numeric fields count as absent.
                if !text.is_empty() {
                    match text.trim().parse::<i32>() {
                        Ok(value) => self.discount_value = Some(value),
                        Err(_) => coercion_errors.push(("discountValue", "must be an integer")),
                    }
                }
            }
            "description" => self.description = Some(text),
            "address" => self.address = Some(text),
            "postalCode" => self.postal_code = Some(text),
            "url" => self.url = Some(text),
            "shippingCosts" => match text.trim().parse::<f64>() {
                Ok(value) => self.shipping_costs = Some(value),
                Err(_) => coercion_errors.push(("shippingCosts", "must be a number")),
            },
            "email" => self.email = Some(text),
            "phone" => self.phone = Some(text),
            "restaurantCategoryId" => match text.trim().parse::<i32>() {
                Ok(value) => self.restaurant_category_id = Some(value),
                Err(_) => coercion_errors.push(("restaurantCategoryId", "must be an integer")),
            },
            "userId" => self.user_id = Some(json!(text)),
            _ => {}
        }
    }

    /// Trimmed copy of the payload, applied after validation succeeds and
    /// before persistence. Empty optionals collapse to null.
    pub fn normalized(&self) -> RestaurantPayload {
        RestaurantPayload {
            name: trim_required(&self.name),
            discount_code: trim_optional(&self.discount_code),
            discount_value: self.discount_value,
            description: trim_optional(&self.description),
            address: trim_required(&self.address),
            postal_code: self.postal_code.clone(),
            url: trim_optional(&self.url),
            shipping_costs: self.shipping_costs,
            email: trim_optional(&self.email),
            phone: trim_optional(&self.phone),
            restaurant_category_id: self.restaurant_category_id,
            user_id: None,
        }
    }
}

fn trim_required(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|value| value.trim().to_string())
}

fn trim_optional(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

fn discount_code_format(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Ok(());
    }
    if code.chars().count() > 10 {
        return Err(payload_error(
            "length",
            "must be between 1 and 10 characters long",
        ));
    }
    Ok(())
}

fn optional_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() || validator::validate_url(url) {
        Ok(())
    } else {
        Err(payload_error("url", "must be a valid URL"))
    }
}

fn optional_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || validator::validate_email(email) {
        Ok(())
    } else {
        Err(payload_error("email", "must be a valid email address"))
    }
}

fn optional_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() || phone.chars().count() <= 255 {
        Ok(())
    } else {
        Err(payload_error(
            "length",
            "must be between 1 and 255 characters long",
        ))
    }
}

fn user_id_not_allowed(_: &serde_json::Value) -> Result<(), ValidationError> {
    Err(payload_error("forbidden", "must not be supplied"))
}

fn payload_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_payload() -> RestaurantPayload {
        RestaurantPayload {
            name: Some("Casa Felix".to_string()),
            address: Some("Calle Betis 22".to_string()),
            postal_code: Some("41010".to_string()),
            shipping_costs: Some(2.5),
            restaurant_category_id: Some(1),
            ..RestaurantPayload::default()
        }
    }

    fn failing_fields(payload: &RestaurantPayload) -> Vec<String> {
        match payload.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort();
                fields
            }
        }
    }

    #[test]
    fn minimal_valid_payload_passes() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_reported_together() {
        let payload = RestaurantPayload::default();
        let fields = failing_fields(&payload);

        assert_eq!(
            fields,
            vec![
                "address",
                "name",
                "postalCode",
                "restaurantCategoryId",
                "shippingCosts"
            ]
        );
    }

    #[test]
    fn name_longer_than_255_chars_fails() {
        let mut payload = valid_payload();
        payload.name = Some("x".repeat(256));
        assert_eq!(failing_fields(&payload), vec!["name"]);

        payload.name = Some("x".repeat(255));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn discount_value_bounds() {
        for (value, ok) in [(0, false), (1, true), (99, true), (100, false)] {
            let mut payload = valid_payload();
            payload.discount_value = Some(value);
            payload.discount_code = Some("CODE".to_string());
            assert_eq!(payload.validate().is_ok(), ok, "discountValue = {value}");
        }
    }

    #[test]
    fn discount_code_length_bounds() {
        let mut payload = valid_payload();
        payload.discount_value = Some(10);

        payload.discount_code = Some("ABCDEFGHIJ".to_string());
        assert!(payload.validate().is_ok());

        payload.discount_code = Some("ABCDEFGHIJK".to_string());
        assert_eq!(failing_fields(&payload), vec!["discountCode"]);
    }

    #[test]
    fn empty_optional_strings_are_skipped() {
        let mut payload = valid_payload();
        payload.discount_code = Some(String::new());
        payload.url = Some(String::new());
        payload.email = Some(String::new());
        payload.phone = Some(String::new());

        assert!(payload.validate().is_ok());
    }

    #[test]
    fn category_id_must_be_positive() {
        let mut payload = valid_payload();
        payload.restaurant_category_id = Some(0);
        assert_eq!(failing_fields(&payload), vec!["restaurantCategoryId"]);

        payload.restaurant_category_id = None;
        assert_eq!(failing_fields(&payload), vec!["restaurantCategoryId"]);
    }

    #[test]
    fn negative_shipping_costs_fail() {
        let mut payload = valid_payload();
        payload.shipping_costs = Some(-0.5);
        assert_eq!(failing_fields(&payload), vec!["shippingCosts"]);

        payload.shipping_costs = Some(0.0);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn supplied_user_id_fails_regardless_of_value() {
        for value in [json!("7"), json!(7), json!(null)] {
            let mut payload = valid_payload();
            payload.user_id = Some(value);
            assert_eq!(failing_fields(&payload), vec!["userId"]);
        }
    }

    #[test]
    fn malformed_url_and_email_fail() {
        let mut payload = valid_payload();
        payload.url = Some("not a url".to_string());
        payload.email = Some("not-an-email".to_string());

        assert_eq!(failing_fields(&payload), vec!["email", "url"]);
    }

    #[test]
    fn normalized_trims_and_collapses_empties() {
        let mut payload = valid_payload();
        payload.name = Some("  Casa Felix  ".to_string());
        payload.description = Some("   ".to_string());
        payload.discount_code = Some(" X10 ".to_string());
        payload.user_id = Some(json!("ignored"));

        let normalized = payload.normalized();
        assert_eq!(normalized.name.as_deref(), Some("Casa Felix"));
        assert_eq!(normalized.description, None);
        assert_eq!(normalized.discount_code.as_deref(), Some("X10"));
        assert_eq!(normalized.user_id, None);
    }

    #[test]
    fn text_field_coercion_failures_are_field_tagged() {
        let mut payload = RestaurantPayload::default();
        let mut coercion_errors = Vec::new();

        payload.set_text_field("discountValue", "ten".to_string(), &mut coercion_errors);
        payload.set_text_field("shippingCosts", "free".to_string(), &mut coercion_errors);
        payload.set_text_field("restaurantCategoryId", "1".to_string(), &mut coercion_errors);

        assert_eq!(
            coercion_errors,
            vec![
                ("discountValue", "must be an integer"),
                ("shippingCosts", "must be a number")
            ]
        );
        assert_eq!(payload.restaurant_category_id, Some(1));
    }
}
