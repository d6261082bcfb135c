use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Field-tagged validation failures, rendered as a 422 with an
/// `{"errors": {field: [messages]}}` body.
#[derive(Debug)]
pub struct Errors {
    errors: ValidationErrors,
}

impl Errors {
    pub fn new(errs: &[(&'static str, &'static str)]) -> Self {
        let mut errors = ValidationErrors::new();
        for (field, message) in errs {
            errors.add(field, field_error("invalid", Cow::Borrowed(*message)));
        }
        Errors { errors }
    }

    /// Flattened (field, message) pairs, for logging and tests.
    pub fn field_messages(&self) -> Vec<(String, String)> {
        let mut messages = self
            .errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors
                    .iter()
                    .map(|error| (field.to_string(), error_message(error)))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        messages.sort();
        messages
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.field_errors().contains_key(field)
    }
}

impl From<ValidationErrors> for Errors {
    fn from(errors: ValidationErrors) -> Self {
        Errors { errors }
    }
}

impl IntoResponse for Errors {
    fn into_response(self) -> Response {
        let mut body = serde_json::Map::new();
        for (field, errors) in self.errors.field_errors() {
            let messages: Vec<String> = errors.iter().map(|error| error_message(error)).collect();
            body.insert(field.to_string(), json!(messages));
        }

        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": body })),
        )
            .into_response()
    }
}

/// Accumulates failures from the derive rules plus any custom rules, then
/// resolves to a single `Errors` value.
pub struct FieldValidator {
    errors: ValidationErrors,
}

impl FieldValidator {
    pub fn validate<T: Validate>(model: &T) -> Self {
        FieldValidator {
            errors: model.validate().err().unwrap_or_else(ValidationErrors::new),
        }
    }

    pub fn reject(&mut self, field: &'static str, message: String) {
        self.errors
            .add(field, field_error("invalid", Cow::Owned(message)));
    }

    pub fn check(self) -> Result<(), Errors> {
        if self.errors.errors().is_empty() {
            Ok(())
        } else {
            Err(Errors {
                errors: self.errors,
            })
        }
    }
}

fn field_error(code: &'static str, message: Cow<'static, str>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message);
    error
}

fn error_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| error.code.to_string())
}
