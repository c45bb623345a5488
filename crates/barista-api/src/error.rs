//! Error types for the Barista API
//!
//! The wire format matches what the frontend already consumes: every error
//! body is `{"success": false, "error": <short code>, "message": <text>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use barista_common::BaristaError;
use serde_json::json;
use thiserror::Error;

/// Main error type for the Barista API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] barista_common::ConfigurationError),

    /// Missing authentication (no token provided)
    #[error("Authentication Token is missing!")]
    MissingAuthentication,

    /// Authentication error (malformed/expired/invalid token)
    #[error("{message}")]
    Authentication { message: String },

    /// Token verified but its audience or issuer does not match ours
    #[error("{message}")]
    ClaimsMismatch { message: String },

    /// Token could not be decoded at all
    #[error("Unable to parse authentication token.")]
    TokenParse,

    /// Token claims could not be interpreted
    #[error("{message}")]
    InvalidClaims { message: String },

    /// Authorization error (valid token, insufficient permissions)
    #[error("Permission not found.")]
    Authorization,

    /// Requested resource does not exist
    #[error("No row was found when one was required")]
    NotFound,

    /// Bad request with message
    #[error("Bad Request: {message}")]
    BadRequest { message: String },

    /// Storage-layer failure
    #[error("Get error while processing database: {0}")]
    Database(#[from] sqlx::Error),

    /// Authentication service could not be reached
    #[error("Unable to verify token - authentication service unavailable")]
    AuthServiceUnavailable,

    /// Internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

impl BaristaError for ApiError {}

impl ApiError {
    /// Short error code carried in the response body
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Config(_) => "configuration_error",
            ApiError::MissingAuthentication => "Unauthorized",
            ApiError::Authentication { .. } => "Unauthorized",
            ApiError::ClaimsMismatch { .. } => "invalid_claims",
            ApiError::TokenParse => "Unauthorized",
            ApiError::InvalidClaims { .. } => "invalid_claims",
            ApiError::Authorization => "unauthorized",
            ApiError::NotFound => "no resource found",
            ApiError::BadRequest { .. } => "resource bad request",
            ApiError::Database(_) => "resource_unprocessable",
            ApiError::AuthServiceUnavailable => "service_unavailable",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MissingAuthentication => StatusCode::UNAUTHORIZED,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::ClaimsMismatch { .. } => StatusCode::UNAUTHORIZED,
            ApiError::TokenParse => StatusCode::BAD_REQUEST,
            ApiError::InvalidClaims { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authorization => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::AuthServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "success": false,
            "error": self.error_code(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Error response structure for API documentation
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    pub success: bool,

    /// Short error code
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingAuthentication.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidClaims {
                message: "x".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Authorization.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::AuthServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Authorization.error_code(), "unauthorized");
        assert_eq!(ApiError::NotFound.error_code(), "no resource found");
        assert_eq!(
            ApiError::MissingAuthentication.error_code(),
            "Unauthorized"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(ApiError::MissingAuthentication.is_client_error());
        assert!(ApiError::Authorization.is_client_error());
        assert!(!ApiError::Internal {
            message: "test".to_string()
        }
        .is_client_error());
    }

    #[test]
    fn test_missing_auth_message() {
        assert_eq!(
            ApiError::MissingAuthentication.to_string(),
            "Authentication Token is missing!"
        );
    }
}
