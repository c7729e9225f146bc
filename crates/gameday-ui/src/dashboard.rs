//! Dashboard: ties the catalog, the selection, the settings and the weather
//! provider together and owns the weather area's view state.
//!
//! Every refresh takes a generation number. A result is applied only if no
//! newer refresh started while it was in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use gameday_core::{AppError, SelectionError};
use gameday_stadiums::{CatalogLoader, CatalogSource, League, LeagueCatalog};
use gameday_weather::{FetchRequest, WeatherProvider};
use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::error_mapping::IntoAppError;
use crate::models::{SelectionModel, TeamChoice};
use crate::presenter;
use crate::settings::SettingsService;
use crate::view::{ErrorPanel, ViewState};

/// What became of one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Cards for this many stadiums are on screen
    Applied(usize),
    /// A newer refresh started; the result was dropped
    Stale,
    /// Nothing selected; no requests were made
    NoSelection,
    /// The error panel is on screen
    Failed,
}

pub struct Dashboard {
    catalog: RwLock<Arc<LeagueCatalog>>,
    selection: Mutex<SelectionModel>,
    settings: Arc<SettingsService>,
    provider: WeatherProvider,
    icon_base_url: String,
    generation: AtomicU64,
    view: RwLock<ViewState>,
    date: Mutex<NaiveDate>,
}

impl Dashboard {
    /// A dashboard over an empty catalog showing the placeholder.
    pub fn new(
        settings: Arc<SettingsService>,
        provider: WeatherProvider,
        icon_base_url: impl Into<String>,
    ) -> Self {
        let catalog = LeagueCatalog::empty();
        Self {
            selection: Mutex::new(SelectionModel::new(&catalog)),
            catalog: RwLock::new(Arc::new(catalog)),
            settings,
            provider,
            icon_base_url: icon_base_url.into(),
            generation: AtomicU64::new(0),
            view: RwLock::new(ViewState::Placeholder),
            date: Mutex::new(Local::now().date_naive()),
        }
    }

    /// Load both stadium documents. On failure the catalog stays empty and
    /// the weather area shows the error panel.
    pub async fn load_catalog(
        &self,
        loader: &CatalogLoader,
        football: &CatalogSource,
        other: &CatalogSource,
    ) -> bool {
        match loader.load(football, other).await {
            Ok(catalog) => {
                self.set_catalog(catalog);
                *self.view.write() = ViewState::Placeholder;
                true
            }
            Err(e) => {
                tracing::warn!("Stadium catalog failed to load: {}", e);
                self.set_catalog(LeagueCatalog::empty());
                let err = e.into_app_error();
                *self.view.write() = ViewState::Error(ErrorPanel::from(&err));
                false
            }
        }
    }

    /// Replace the catalog and reset the selection. Refreshes still in
    /// flight become stale.
    pub fn set_catalog(&self, catalog: LeagueCatalog) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.selection.lock() = SelectionModel::new(&catalog);
        *self.catalog.write() = Arc::new(catalog);
    }

    pub fn catalog(&self) -> Arc<LeagueCatalog> {
        self.catalog.read().clone()
    }

    pub fn selection(&self) -> SelectionModel {
        self.selection.lock().clone()
    }

    pub fn view(&self) -> ViewState {
        self.view.read().clone()
    }

    pub fn date(&self) -> NaiveDate {
        *self.date.lock()
    }

    pub fn settings(&self) -> &Arc<SettingsService> {
        &self.settings
    }

    /// Select in one league (resetting the others) and refresh.
    pub async fn select(
        &self,
        league: League,
        choice: TeamChoice,
    ) -> Result<RefreshOutcome, SelectionError> {
        self.selection.lock().select(league, choice)?;
        Ok(self.refresh().await)
    }

    /// Enter-to-pick: select the first option matching the league's search.
    pub async fn select_first_visible(
        &self,
        league: League,
    ) -> Result<RefreshOutcome, SelectionError> {
        self.selection.lock().select_first_visible(league)?;
        Ok(self.refresh().await)
    }

    pub fn set_search(&self, league: League, text: &str) {
        self.selection.lock().set_search(league, text);
    }

    pub fn toggle_open(&self, league: League) {
        self.selection.lock().toggle_open(league);
    }

    /// Change the forecast date. Refreshes when something is selected.
    pub async fn set_date(&self, date: NaiveDate) -> Option<RefreshOutcome> {
        *self.date.lock() = date;
        self.refresh_if_selected().await
    }

    /// Re-fetch after a settings change so a new unit takes effect.
    pub async fn on_settings_changed(&self) -> Option<RefreshOutcome> {
        self.refresh_if_selected().await
    }

    async fn refresh_if_selected(&self) -> Option<RefreshOutcome> {
        let selected = self.selection.lock().has_selection();
        if selected {
            Some(self.refresh().await)
        } else {
            None
        }
    }

    /// Fetch weather for the current selection and replace the weather area.
    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let catalog = self.catalog();
        let stadiums = self.selection.lock().resolve(&catalog);
        if stadiums.is_empty() {
            let err = AppError::from(SelectionError::NoTeamSelected);
            self.apply(generation, ViewState::Error(ErrorPanel::from(&err)));
            return RefreshOutcome::NoSelection;
        }

        let prefs = self.settings.load();
        let request = FetchRequest {
            api_key: self.settings.api_key().unwrap_or_default(),
            unit: prefs.temperature_unit,
            date: self.date(),
        };

        tracing::info!(
            "Refresh #{} for {} stadiums on {}",
            generation,
            stadiums.len(),
            request.date
        );
        self.apply(generation, ViewState::Loading);

        let result = self.provider.fetch_all(&stadiums, &request).await;

        let (state, outcome) = match result {
            Ok(snapshots) => {
                let cards: Vec<_> = snapshots
                    .iter()
                    .map(|s| presenter::build_card(s, &prefs, &self.icon_base_url))
                    .collect();
                let count = cards.len();
                (ViewState::Cards(cards), RefreshOutcome::Applied(count))
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                let err = e.into_app_error();
                (
                    ViewState::Error(ErrorPanel::from(&err)),
                    RefreshOutcome::Failed,
                )
            }
        };

        if self.apply(generation, state) {
            outcome
        } else {
            tracing::debug!("Discarding result of stale refresh #{}", generation);
            RefreshOutcome::Stale
        }
    }

    /// Replace the view unless a newer refresh has started.
    fn apply(&self, generation: u64, state: ViewState) -> bool {
        let mut view = self.view.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *view = state;
        true
    }

    /// Refresh on every settings change until the settings service goes away.
    /// Stops once the dashboard is dropped.
    pub fn watch_settings(self: &Arc<Self>) -> JoinHandle<()> {
        let mut rx = self.settings.subscribe();
        let dashboard = Arc::downgrade(self);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(_) | Err(RecvError::Lagged(_)) => {
                        let Some(dashboard) = dashboard.upgrade() else {
                            break;
                        };
                        tracing::debug!("Settings changed");
                        dashboard.on_settings_changed().await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
