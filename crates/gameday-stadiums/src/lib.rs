//! Stadium catalog for Game Day Weather
//!
//! Loads the bundled NFL/NCAA and MLB/MLS stadium documents into per-league
//! lists with a team-name index.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod types;

pub use catalog::{LeagueCatalog, LeagueStadiums};
pub use error::CatalogError;
pub use loader::{CatalogLoader, CatalogSource};
pub use types::{split_team_names, League, StadiumRecord};
