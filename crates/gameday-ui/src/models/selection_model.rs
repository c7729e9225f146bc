//! The four league dropdowns. At most one league holds a selection at a time.

use gameday_core::SelectionError;
use gameday_stadiums::{League, LeagueCatalog, LeagueStadiums, StadiumRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamChoice {
    AllTeams,
    Team(String),
}

impl TeamChoice {
    pub fn label(&self, league: League) -> String {
        match self {
            Self::AllTeams => league.all_teams_label(),
            Self::Team(name) => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub choice: TeamChoice,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Dropdown {
    league: League,
    options: Vec<DropdownOption>,
    selected: Option<TeamChoice>,
    search: String,
    open: bool,
}

impl Dropdown {
    fn new(league: League, stadiums: &LeagueStadiums) -> Self {
        let options = if stadiums.is_empty() {
            Vec::new()
        } else {
            std::iter::once(TeamChoice::AllTeams)
                .chain(stadiums.team_names().map(|t| TeamChoice::Team(t.to_string())))
                .map(|choice| DropdownOption {
                    label: choice.label(league),
                    choice,
                })
                .collect()
        };

        Self {
            league,
            options,
            selected: None,
            search: String::new(),
            open: false,
        }
    }

    pub fn league(&self) -> League {
        self.league
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<&TeamChoice> {
        self.selected.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Selected option text, or the league placeholder.
    pub fn display_text(&self) -> String {
        match &self.selected {
            Some(choice) => choice.label(self.league),
            None => self.league.placeholder(),
        }
    }

    /// Options whose text contains the search string, ignoring case.
    pub fn visible_options(&self) -> Vec<&DropdownOption> {
        let needle = self.search.trim().to_lowercase();
        self.options
            .iter()
            .filter(|o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
            .collect()
    }

    fn offers(&self, choice: &TeamChoice) -> bool {
        self.options.iter().any(|o| &o.choice == choice)
    }

    fn reset(&mut self) {
        self.selected = None;
        self.search.clear();
        self.open = false;
    }
}

#[derive(Debug, Clone)]
pub struct SelectionModel {
    dropdowns: [Dropdown; 4],
}

impl SelectionModel {
    pub fn new(catalog: &LeagueCatalog) -> Self {
        Self {
            dropdowns: League::ALL.map(|league| Dropdown::new(league, catalog.league(league))),
        }
    }

    pub fn dropdowns(&self) -> &[Dropdown] {
        &self.dropdowns
    }

    pub fn dropdown(&self, league: League) -> &Dropdown {
        &self.dropdowns[league.index()]
    }

    /// Select `choice` in `league`, clearing the other three leagues first.
    pub fn select(&mut self, league: League, choice: TeamChoice) -> Result<(), SelectionError> {
        if !self.dropdown(league).offers(&choice) {
            return Err(SelectionError::UnknownTeam {
                league: league.label().to_string(),
                team: choice.label(league),
            });
        }

        for dropdown in &mut self.dropdowns {
            dropdown.reset();
        }
        tracing::debug!("Selected {} in {}", choice.label(league), league);
        self.dropdowns[league.index()].selected = Some(choice);
        Ok(())
    }

    /// Pick the first option still visible under the league's search text.
    pub fn select_first_visible(&mut self, league: League) -> Result<TeamChoice, SelectionError> {
        let choice = self
            .dropdown(league)
            .visible_options()
            .first()
            .map(|o| o.choice.clone())
            .ok_or(SelectionError::NoTeamSelected)?;
        self.select(league, choice.clone())?;
        Ok(choice)
    }

    pub fn clear(&mut self) {
        for dropdown in &mut self.dropdowns {
            dropdown.reset();
        }
    }

    pub fn set_search(&mut self, league: League, text: &str) {
        self.dropdowns[league.index()].search = text.to_string();
    }

    /// Opening one dropdown closes the others.
    pub fn toggle_open(&mut self, league: League) {
        let open = !self.dropdown(league).open;
        for dropdown in &mut self.dropdowns {
            dropdown.open = false;
        }
        self.dropdowns[league.index()].open = open;
    }

    /// The one league with a selection, if any.
    pub fn active(&self) -> Option<(League, &TeamChoice)> {
        self.dropdowns
            .iter()
            .find_map(|d| d.selected.as_ref().map(|choice| (d.league, choice)))
    }

    pub fn has_selection(&self) -> bool {
        self.active().is_some()
    }

    /// Stadiums implied by the current selection, in catalog order.
    pub fn resolve(&self, catalog: &LeagueCatalog) -> Vec<StadiumRecord> {
        match self.active() {
            Some((league, choice)) => resolve_choice(catalog, league, choice),
            None => Vec::new(),
        }
    }
}

pub fn resolve_choice(catalog: &LeagueCatalog, league: League, choice: &TeamChoice) -> Vec<StadiumRecord> {
    let stadiums = catalog.league(league);
    match choice {
        TeamChoice::AllTeams => stadiums.stadiums().to_vec(),
        TeamChoice::Team(team) => stadiums.stadiums_for(team),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stadium(name: &str, team: &str) -> StadiumRecord {
        StadiumRecord {
            name: name.into(),
            team: team.into(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn catalog() -> LeagueCatalog {
        LeagueCatalog::from_leagues([
            (
                League::Nfl,
                vec![
                    stadium("MetLife Stadium", "New York Giants, New York Jets"),
                    stadium("Lambeau Field", "Green Bay Packers"),
                    stadium("SoFi Stadium", "Los Angeles Rams/Los Angeles Chargers"),
                ],
            ),
            (League::Mlb, vec![stadium("Wrigley Field", "Chicago Cubs")]),
            (League::Mls, vec![stadium("Providence Park", "Portland Timbers/Portland Thorns")]),
        ])
    }

    fn labels(dropdown: &Dropdown) -> Vec<&str> {
        dropdown.options().iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn test_options_all_teams_first_then_sorted() {
        let model = SelectionModel::new(&catalog());
        assert_eq!(
            labels(model.dropdown(League::Nfl)),
            vec![
                "All NFL Teams",
                "Green Bay Packers",
                "Los Angeles Chargers",
                "Los Angeles Rams",
                "New York Giants",
                "New York Jets",
            ]
        );
    }

    #[test]
    fn test_empty_league_has_no_options() {
        let model = SelectionModel::new(&catalog());
        assert!(model.dropdown(League::Ncaa).options().is_empty());
        assert_eq!(model.dropdown(League::Ncaa).display_text(), "Select NCAA Team");

        let empty = SelectionModel::new(&LeagueCatalog::empty());
        assert_eq!(empty.dropdowns().len(), 4);
        assert!(empty.dropdowns().iter().all(|d| d.options().is_empty()));
    }

    #[test]
    fn test_select_resets_other_leagues() {
        let mut model = SelectionModel::new(&catalog());
        model
            .select(League::Nfl, TeamChoice::Team("New York Jets".into()))
            .unwrap();
        model.set_search(League::Nfl, "jets");
        model
            .select(League::Mlb, TeamChoice::AllTeams)
            .unwrap();

        assert_eq!(model.dropdown(League::Nfl).display_text(), "Select NFL Team");
        assert_eq!(model.dropdown(League::Nfl).search(), "");
        assert_eq!(model.dropdown(League::Mlb).display_text(), "All MLB Teams");
        assert_eq!(model.active().map(|(l, _)| l), Some(League::Mlb));
        assert_eq!(
            model.dropdowns().iter().filter(|d| d.selected().is_some()).count(),
            1
        );
    }

    #[test]
    fn test_unknown_team_rejected_and_state_kept() {
        let mut model = SelectionModel::new(&catalog());
        model.select(League::Mlb, TeamChoice::AllTeams).unwrap();

        let err = model
            .select(League::Nfl, TeamChoice::Team("Dallas Cowboys".into()))
            .unwrap_err();
        assert!(matches!(err, SelectionError::UnknownTeam { .. }));
        assert_eq!(model.active().map(|(l, _)| l), Some(League::Mlb));

        // A combined team field is not an option by itself
        assert!(model
            .select(
                League::Nfl,
                TeamChoice::Team("New York Giants, New York Jets".into())
            )
            .is_err());
        assert!(model.select(League::Ncaa, TeamChoice::AllTeams).is_err());
    }

    #[test]
    fn test_search_filters_visibility_only() {
        let mut model = SelectionModel::new(&catalog());
        model.set_search(League::Nfl, "LOS ange");
        let visible: Vec<_> = model
            .dropdown(League::Nfl)
            .visible_options()
            .iter()
            .map(|o| o.label.clone())
            .collect();
        assert_eq!(visible, vec!["Los Angeles Chargers", "Los Angeles Rams"]);
        assert_eq!(model.dropdown(League::Nfl).options().len(), 6);
    }

    #[test]
    fn test_select_first_visible() {
        let mut model = SelectionModel::new(&catalog());
        model.set_search(League::Mls, "thorns");
        let picked = model.select_first_visible(League::Mls).unwrap();
        assert_eq!(picked, TeamChoice::Team("Portland Thorns".into()));
        assert_eq!(model.dropdown(League::Mls).display_text(), "Portland Thorns");

        model.set_search(League::Nfl, "zzz");
        assert!(model.select_first_visible(League::Nfl).is_err());
    }

    #[test]
    fn test_opening_one_dropdown_closes_others() {
        let mut model = SelectionModel::new(&catalog());
        model.toggle_open(League::Nfl);
        model.toggle_open(League::Mls);
        assert!(!model.dropdown(League::Nfl).is_open());
        assert!(model.dropdown(League::Mls).is_open());
        model.toggle_open(League::Mls);
        assert!(model.dropdowns().iter().all(|d| !d.is_open()));
    }

    #[test]
    fn test_resolve_all_teams_and_single_team() {
        let catalog = catalog();
        let mut model = SelectionModel::new(&catalog);
        assert!(model.resolve(&catalog).is_empty());

        model.select(League::Nfl, TeamChoice::AllTeams).unwrap();
        let names: Vec<_> = model.resolve(&catalog).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["MetLife Stadium", "Lambeau Field", "SoFi Stadium"]);

        model
            .select(League::Nfl, TeamChoice::Team("Los Angeles Chargers".into()))
            .unwrap();
        let names: Vec<_> = model.resolve(&catalog).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["SoFi Stadium"]);
    }

    #[test]
    fn test_clear() {
        let mut model = SelectionModel::new(&catalog());
        model.select(League::Nfl, TeamChoice::AllTeams).unwrap();
        model.clear();
        assert!(!model.has_selection());
    }
}
