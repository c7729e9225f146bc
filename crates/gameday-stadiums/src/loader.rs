//! Loads the two stadium documents and normalizes them into a catalog.
//!
//! The football document carries `nfl` and `ncaa`, the other document
//! carries `mlb` and `mls`. Each league is an object keyed by stadium name:
//!
//! ```json
//! { "nfl": { "Lambeau Field": { "team": "Packers", "latitude": 44.5, "longitude": -88.06 } } }
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::catalog::LeagueCatalog;
use crate::error::CatalogError;
use crate::types::{League, StadiumRecord};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Location of a catalog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Treat http(s) locations as URLs and everything else as a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawStadium {
    #[serde(default)]
    team: Option<String>,
    latitude: f64,
    longitude: f64,
}

pub struct CatalogLoader {
    client: reqwest::Client,
}

impl CatalogLoader {
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Read both documents concurrently. Either one failing fails the load.
    #[instrument(skip(self), level = "info")]
    pub async fn load(
        &self,
        football: &CatalogSource,
        other: &CatalogSource,
    ) -> Result<LeagueCatalog, CatalogError> {
        let (football_doc, other_doc) =
            tokio::try_join!(self.read(football), self.read(other))?;

        let football_name = football.to_string();
        let other_name = other.to_string();

        let catalog = LeagueCatalog::from_leagues([
            (League::Nfl, parse_league(&football_doc, League::Nfl, &football_name)?),
            (League::Ncaa, parse_league(&football_doc, League::Ncaa, &football_name)?),
            (League::Mlb, parse_league(&other_doc, League::Mlb, &other_name)?),
            (League::Mls, parse_league(&other_doc, League::Mls, &other_name)?),
        ]);

        tracing::info!("Loaded {} stadiums", catalog.total_stadiums());
        Ok(catalog)
    }

    async fn read(&self, source: &CatalogSource) -> Result<Map<String, Value>, CatalogError> {
        let body = match source {
            CatalogSource::Path(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| CatalogError::Io {
                        path: path.display().to_string(),
                        source: e,
                    })?
            }
            CatalogSource::Url(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CatalogError::Http {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                response.text().await?
            }
        };

        tracing::debug!("Read {} bytes from {}", body.len(), source);
        parse_document(&body, &source.to_string())
    }
}

/// Parse a catalog document's top-level object.
pub fn parse_document(body: &str, source_name: &str) -> Result<Map<String, Value>, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// Extract one league from a parsed document, keeping source key order.
/// A missing league key yields an empty list.
pub fn parse_league(
    doc: &Map<String, Value>,
    league: League,
    source_name: &str,
) -> Result<Vec<StadiumRecord>, CatalogError> {
    let Some(section) = doc.get(league.as_str()) else {
        tracing::warn!("{} has no '{}' section", source_name, league.as_str());
        return Ok(Vec::new());
    };

    let entries = section.as_object().ok_or_else(|| CatalogError::Parse {
        source_name: source_name.to_string(),
        message: format!("'{}' is not an object", league.as_str()),
    })?;

    entries
        .iter()
        .map(|(name, value)| {
            let raw: RawStadium =
                serde_json::from_value(value.clone()).map_err(|e| CatalogError::Parse {
                    source_name: source_name.to_string(),
                    message: format!("{}: {}", name, e),
                })?;
            Ok(StadiumRecord {
                name: name.clone(),
                team: raw.team.unwrap_or_default(),
                latitude: raw.latitude,
                longitude: raw.longitude,
            })
        })
        .collect()
}
