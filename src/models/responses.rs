use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize, Debug)]
pub struct DefaultResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl DefaultResponse {
    pub fn new(status: &str, message: String) -> Self {
        DefaultResponse {
            status: status.to_string(),
            message,
            error: None,
            data: None,
        }
    }

    pub fn ok(message: &str) -> Self {
        Self::new("ok", message.to_string())
    }

    pub fn error(message: &str, error: String) -> Self {
        let mut response = Self::new("error", message.to_string());
        response.error = Some(error);
        response
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn into_json(self) -> Json<Value> {
        Json(json!(self))
    }

    pub fn into_response(self) -> Json<Value> {
        self.into_json()
    }
}
