//! Error types and handling for the golfcast service

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, GolfcastError>;

/// Main error type for the golfcast service
#[derive(Error, Debug)]
pub enum GolfcastError {
    /// Configuration-related errors (missing key, bad values)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The forecast provider is unreachable or returned a failure; nothing
    /// meaningful can be scored without it
    #[error("Forecast unavailable: {message}")]
    Forecast { message: String },

    /// Other upstream API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl GolfcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new forecast-fetch error
    pub fn forecast<S: Into<String>>(message: S) -> Self {
        Self::Forecast {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GolfcastError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            GolfcastError::Forecast { .. } => {
                "The weather forecast service is currently unavailable. Please try again shortly."
                    .to_string()
            }
            GolfcastError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            GolfcastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            GolfcastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            GolfcastError::General { message } => message.clone(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            GolfcastError::Config { .. } => "CONFIG_ERROR",
            GolfcastError::Forecast { .. } => "FORECAST_UNAVAILABLE",
            GolfcastError::Api { .. } => "UPSTREAM_ERROR",
            GolfcastError::Validation { .. } => "INVALID_INPUT",
            GolfcastError::Io { .. } => "IO_ERROR",
            GolfcastError::General { .. } => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            GolfcastError::Validation { .. } => StatusCode::BAD_REQUEST,
            GolfcastError::Forecast { .. } => StatusCode::SERVICE_UNAVAILABLE,
            GolfcastError::Api { .. } => StatusCode::BAD_GATEWAY,
            GolfcastError::Config { .. } | GolfcastError::Io { .. } | GolfcastError::General { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for GolfcastError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}
