use gameday_core::AppError;

use crate::view::{ErrorAction, ErrorPanel};

const CATALOG_TITLE: &str = "Could not load stadium data";
const WEATHER_TITLE: &str = "Could not fetch weather data";
const SELECTION_TITLE: &str = "No team selected";

impl From<&AppError> for ErrorPanel {
    fn from(err: &AppError) -> Self {
        let action = if err.is_credential_error() {
            ErrorAction::ConfigureApiKey
        } else {
            ErrorAction::TryAgain
        };

        let (title, message) = match err {
            AppError::Catalog(e) => (CATALOG_TITLE, e.user_message().to_string()),
            AppError::Selection(e) => (SELECTION_TITLE, e.user_message().to_string()),
            AppError::Weather(e) if err.is_credential_error() => {
                (WEATHER_TITLE, e.user_message().to_string())
            }
            AppError::Weather(e) => (WEATHER_TITLE, e.to_string()),
            AppError::Network(e) => (WEATHER_TITLE, e.to_string()),
            other => ("Something went wrong", other.user_message().to_string()),
        };

        Self {
            title: title.to_string(),
            message: Some(message),
            action,
        }
    }
}
