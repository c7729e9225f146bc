use serde::{Deserialize, Serialize};

/// A partition of the stadium catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Nfl,
    Ncaa,
    Mlb,
    Mls,
}

impl League {
    /// Display order of the league dropdowns.
    pub const ALL: [League; 4] = [League::Nfl, League::Ncaa, League::Mlb, League::Mls];

    /// Identifier used as the key in catalog documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nfl => "nfl",
            Self::Ncaa => "ncaa",
            Self::Mlb => "mlb",
            Self::Mls => "mls",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Nfl => "NFL",
            Self::Ncaa => "NCAA",
            Self::Mlb => "MLB",
            Self::Mls => "MLS",
        }
    }

    /// Dropdown text when nothing is selected.
    pub fn placeholder(&self) -> String {
        format!("Select {} Team", self.label())
    }

    /// Text of the pseudo-option covering every stadium of the league.
    pub fn all_teams_label(&self) -> String {
        format!("All {} Teams", self.label())
    }

    /// Position in `League::ALL`.
    pub fn index(&self) -> usize {
        match self {
            Self::Nfl => 0,
            Self::Ncaa => 1,
            Self::Mlb => 2,
            Self::Mls => 3,
        }
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nfl" => Ok(Self::Nfl),
            "ncaa" => Ok(Self::Ncaa),
            "mlb" => Ok(Self::Mlb),
            "mls" => Ok(Self::Mls),
            other => Err(format!("unknown league: {other}")),
        }
    }
}

/// A venue from the catalog. `team` may name several teams joined by
/// "," or "/".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StadiumRecord {
    pub name: String,
    pub team: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StadiumRecord {
    /// Individual team names hosted at this stadium.
    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        split_team_names(&self.team)
    }
}

/// Split a combined team field on "," and "/", trimming whitespace and
/// skipping empty pieces.
pub fn split_team_names(field: &str) -> impl Iterator<Item = &str> {
    field
        .split([',', '/'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
