//! The uniform response envelope.
//!
//! Every answer of `/api/spotify`, successful or not, has the shape
//!
//! ```text
//! { "success": bool, "message": string, "data"?: object, "errors"?: [string], "timestamp": string }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SpotifyError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub timestamp: String,
}

impl ApiResponse {
    /// Builds an envelope stamped with the current UTC time.
    ///
    /// A failure envelope never carries data, whatever is passed in.
    pub fn new(
        success: bool,
        message: impl Into<String>,
        data: Option<Value>,
        errors: Option<Vec<String>>,
    ) -> Self {
        Self {
            success,
            message: message.into(),
            data: if success { data } else { None },
            errors,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self::new(true, message, Some(data), None)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message, None, None)
    }
}

/// An envelope paired with the HTTP status it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: ApiResponse,
}

impl Reply {
    pub fn ok(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: ApiResponse::success(message, data),
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiResponse::failure(message),
        }
    }
}

impl From<SpotifyError> for Reply {
    fn from(err: SpotifyError) -> Self {
        Reply::error(err.status_code(), err.to_string())
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
