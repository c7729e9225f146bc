//! In-memory stadium catalog with a normalized team index.

use std::collections::BTreeMap;

use crate::types::{League, StadiumRecord};

/// Stadiums of one league plus a `team name -> stadium positions` index.
#[derive(Debug, Clone, Default)]
pub struct LeagueStadiums {
    stadiums: Vec<StadiumRecord>,
    teams: BTreeMap<String, Vec<usize>>,
}

impl LeagueStadiums {
    pub fn new(stadiums: Vec<StadiumRecord>) -> Self {
        let mut teams: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (pos, stadium) in stadiums.iter().enumerate() {
            for name in stadium.team_names() {
                let positions = teams.entry(name.to_string()).or_default();
                // A field may repeat a name ("Jets / Jets")
                if positions.last() != Some(&pos) {
                    positions.push(pos);
                }
            }
        }
        Self { stadiums, teams }
    }

    pub fn stadiums(&self) -> &[StadiumRecord] {
        &self.stadiums
    }

    /// Deduplicated team names in sorted order.
    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.teams.contains_key(team)
    }

    /// Stadiums hosting `team`, in catalog order.
    pub fn stadiums_for(&self, team: &str) -> Vec<StadiumRecord> {
        self.teams
            .get(team)
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|&pos| self.stadiums.get(pos).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.stadiums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stadiums.is_empty()
    }
}

/// All four leagues. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LeagueCatalog {
    leagues: [LeagueStadiums; 4],
}

impl LeagueCatalog {
    /// A catalog with no stadiums, used when loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_leagues(leagues: impl IntoIterator<Item = (League, Vec<StadiumRecord>)>) -> Self {
        let mut catalog = Self::default();
        for (league, stadiums) in leagues {
            catalog.leagues[league.index()] = LeagueStadiums::new(stadiums);
        }
        catalog
    }

    pub fn league(&self, league: League) -> &LeagueStadiums {
        &self.leagues[league.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.leagues.iter().all(LeagueStadiums::is_empty)
    }

    pub fn total_stadiums(&self) -> usize {
        self.leagues.iter().map(LeagueStadiums::len).sum()
    }
}
