use gameday_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};
use gameday_weather::WeatherError as FetchError;

use super::IntoAppError;

impl IntoAppError for FetchError {
    fn into_app_error(self) -> AppError {
        match self {
            FetchError::MissingApiKey => AppError::Weather(WeatherError::MissingApiKey),
            FetchError::InvalidApiKey => AppError::Weather(WeatherError::InvalidApiKey),
            FetchError::Http { status: 503, .. } => {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
            FetchError::Http { status, message } => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            FetchError::Network(e) => AppError::Network(e.into_network_error()),
            FetchError::Provider(s) => AppError::Weather(WeatherError::ApiError(s)),
            FetchError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        }
    }
}
