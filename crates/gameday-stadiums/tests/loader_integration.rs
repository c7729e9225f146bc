//! Integration tests for CatalogLoader against files and a mock HTTP server.

use gameday_stadiums::{CatalogError, CatalogLoader, CatalogSource, League};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn football_doc() -> serde_json::Value {
    serde_json::json!({
        "nfl": {
            "MetLife Stadium": { "team": "Giants, Jets", "latitude": 40.8135, "longitude": -74.0745 },
            "Lambeau Field": { "team": "Packers", "latitude": 44.5013, "longitude": -88.0622 }
        },
        "ncaa": {
            "Michigan Stadium": { "team": "Michigan Wolverines", "latitude": 42.2658, "longitude": -83.7487 }
        }
    })
}

fn other_doc() -> serde_json::Value {
    serde_json::json!({
        "mlb": {
            "Wrigley Field": { "team": "Cubs", "latitude": 41.9484, "longitude": -87.6553 }
        },
        "mls": {
            "BMO Stadium": { "team": "LAFC", "latitude": 34.0128, "longitude": -118.2841 },
            "Dignity Health Sports Park": { "team": "LA Galaxy", "latitude": 33.8644, "longitude": -118.2611 }
        }
    })
}

#[tokio::test]
async fn test_load_from_urls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/stadium_coordinates.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(football_doc()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/more_stadium_coordinates.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(other_doc()))
        .mount(&mock_server)
        .await;

    let loader = CatalogLoader::new().unwrap();
    let catalog = loader
        .load(
            &CatalogSource::Url(format!("{}/data/stadium_coordinates.json", mock_server.uri())),
            &CatalogSource::Url(format!(
                "{}/data/more_stadium_coordinates.json",
                mock_server.uri()
            )),
        )
        .await
        .unwrap();

    assert_eq!(catalog.league(League::Nfl).len(), 2);
    assert_eq!(catalog.league(League::Ncaa).len(), 1);
    assert_eq!(catalog.league(League::Mlb).len(), 1);
    assert_eq!(catalog.league(League::Mls).len(), 2);
    assert_eq!(catalog.league(League::Nfl).stadiums()[0].name, "MetLife Stadium");
    assert!(catalog.league(League::Nfl).has_team("Jets"));
}

#[tokio::test]
async fn test_one_failed_document_fails_whole_load() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/football.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(football_doc()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/other.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let loader = CatalogLoader::new().unwrap();
    let result = loader
        .load(
            &CatalogSource::Url(format!("{}/football.json", mock_server.uri())),
            &CatalogSource::Url(format!("{}/other.json", mock_server.uri())),
        )
        .await;

    assert!(matches!(result, Err(CatalogError::Http { status: 404, .. })));
}

#[tokio::test]
async fn test_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let football = dir.path().join("stadium_coordinates.json");
    let other = dir.path().join("more_stadium_coordinates.json");
    std::fs::write(&football, football_doc().to_string()).unwrap();
    std::fs::write(&other, other_doc().to_string()).unwrap();

    let loader = CatalogLoader::new().unwrap();
    let catalog = loader
        .load(&CatalogSource::Path(football), &CatalogSource::Path(other))
        .await
        .unwrap();

    assert_eq!(catalog.total_stadiums(), 6);
    let galaxy = catalog.league(League::Mls).stadiums_for("LA Galaxy");
    assert_eq!(galaxy.len(), 1);
    assert_eq!(galaxy[0].name, "Dignity Health Sports Park");
}

#[tokio::test]
async fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let football = dir.path().join("stadium_coordinates.json");
    std::fs::write(&football, football_doc().to_string()).unwrap();

    let loader = CatalogLoader::new().unwrap();
    let result = loader
        .load(
            &CatalogSource::Path(football),
            &CatalogSource::Path(dir.path().join("missing.json")),
        )
        .await;

    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[tokio::test]
async fn test_bundled_data_loads() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let loader = CatalogLoader::new().unwrap();
    let catalog = loader
        .load(
            &CatalogSource::Path(root.join("stadium_coordinates.json")),
            &CatalogSource::Path(root.join("more_stadium_coordinates.json")),
        )
        .await
        .unwrap();

    for league in League::ALL {
        assert!(!catalog.league(league).is_empty(), "{league} has no stadiums");
    }
}

#[tokio::test]
async fn test_bundled_data_covers_pro_leagues() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let loader = CatalogLoader::new().unwrap();
    let catalog = loader
        .load(
            &CatalogSource::Path(root.join("stadium_coordinates.json")),
            &CatalogSource::Path(root.join("more_stadium_coordinates.json")),
        )
        .await
        .unwrap();

    let nfl = catalog.league(League::Nfl);
    assert_eq!(nfl.team_names().count(), 32);
    assert_eq!(nfl.stadiums_for("New York Jets")[0].name, "MetLife Stadium");
    assert_eq!(nfl.stadiums_for("Los Angeles Chargers")[0].name, "SoFi Stadium");

    assert_eq!(catalog.league(League::Mlb).team_names().count(), 30);
    assert!(catalog.league(League::Mls).team_names().count() >= 29);
    assert!(catalog.league(League::Mls).has_team("Vancouver Whitecaps FC"));
    assert!(catalog.league(League::Ncaa).has_team("Notre Dame Fighting Irish"));
}
