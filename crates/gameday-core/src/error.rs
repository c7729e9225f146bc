//! Centralized error types for the Game Day Weather application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Crate-level errors (catalog, weather) are mapped into this type by the UI
/// layer. Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Stadium catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Catalog(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Selection(e) => e.user_message(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }

    /// True when the fix is to configure the weather API key.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            AppError::Weather(WeatherError::MissingApiKey | WeatherError::InvalidApiKey)
        )
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Stadium catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to load stadium data: {0}")]
    LoadFailed(String),

    #[error("Stadium data is malformed: {0}")]
    InvalidData(String),
}

impl CatalogError {
    pub fn user_message(&self) -> &'static str {
        "Check your connection and try again."
    }
}

/// Weather service errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("OpenWeather API key not configured")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Weather API error: {0}")]
    ApiError(String),

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::MissingApiKey => "No weather API key is configured. Add one in settings.",
            WeatherError::InvalidApiKey => "Weather API key is invalid. Check settings.",
            WeatherError::ApiError(_) => "Weather service error. Please try again.",
            WeatherError::ServiceUnavailable => {
                "Weather service unavailable. Please try again later."
            }
        }
    }
}

/// Team selection errors.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("No team selected")]
    NoTeamSelected,

    #[error("Unknown team for {league}: {team}")]
    UnknownTeam { league: String, team: String },
}

impl SelectionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SelectionError::NoTeamSelected => "Please select at least one team.",
            SelectionError::UnknownTeam { .. } => "That team is not in the stadium list.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors: Vec<AppError> = vec![
            NetworkError::Timeout.into(),
            anyhow::anyhow!("test").into(),
            CatalogError::LoadFailed("test".into()).into(),
            WeatherError::ServiceUnavailable.into(),
            SelectionError::NoTeamSelected.into(),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "empty message for {err:?}");
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = WeatherError::InvalidApiKey.into();
        assert!(matches!(app_err, AppError::Weather(WeatherError::InvalidApiKey)));
    }

    #[test]
    fn test_credential_errors() {
        assert!(AppError::from(WeatherError::MissingApiKey).is_credential_error());
        assert!(AppError::from(WeatherError::InvalidApiKey).is_credential_error());
        assert!(!AppError::from(WeatherError::ServiceUnavailable).is_credential_error());
        assert!(!AppError::from(NetworkError::Timeout).is_credential_error());
    }

    #[test]
    fn test_server_error_message_by_status() {
        let err = NetworkError::ServerError {
            status: 503,
            message: "down".into(),
        };
        assert!(err.user_message().contains("later"));

        let err = NetworkError::ServerError {
            status: 404,
            message: "missing".into(),
        };
        assert_eq!(err.user_message(), "The request failed. Please try again.");
    }
}
