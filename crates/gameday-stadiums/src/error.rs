//! Catalog loading errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request for {url} returned {status}")]
    Http { url: String, status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid stadium data in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = CatalogError::Http {
            url: "http://localhost/data.json".into(),
            status: 404,
        };
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = CatalogError::Parse {
            source_name: "data.json".into(),
            message: "expected object".into(),
        };
        assert!(err.to_string().contains("data.json"));
    }
}
