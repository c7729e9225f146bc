use gameday_core::{AppError, CatalogError};
use gameday_stadiums::CatalogError as LoaderError;

use super::IntoAppError;

impl IntoAppError for LoaderError {
    fn into_app_error(self) -> AppError {
        match self {
            LoaderError::Parse { .. } => AppError::Catalog(CatalogError::InvalidData(self.to_string())),
            other => AppError::Catalog(CatalogError::LoadFailed(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_failure_is_load_failure() {
        let err = LoaderError::Http {
            url: "https://example.com/stadiums.json".into(),
            status: 404,
        }
        .into_app_error();
        assert!(matches!(err, AppError::Catalog(CatalogError::LoadFailed(_))));
    }

    #[test]
    fn test_parse_failure_is_invalid_data() {
        let err = LoaderError::Parse {
            source_name: "stadiums.json".into(),
            message: "expected value".into(),
        }
        .into_app_error();
        assert!(matches!(err, AppError::Catalog(CatalogError::InvalidData(_))));
    }
}
