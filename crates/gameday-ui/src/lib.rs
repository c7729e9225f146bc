//! Dashboard logic for Game Day Weather
//!
//! Selection across the four league dropdowns, user settings, the weather
//! presenter and the refresh workflow that ties them to the provider.

pub mod dashboard;
pub mod error_mapping;
pub mod models;
pub mod presenter;
pub mod settings;
pub mod view;

pub use dashboard::{Dashboard, RefreshOutcome};
pub use error_mapping::IntoAppError;
pub use models::{Dropdown, DropdownOption, SelectionModel, TeamChoice};
pub use presenter::{build_card, compass_direction, render_view, WeatherCard};
pub use settings::{
    AlertThresholds, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
    PreferencesUpdate, SettingsChanged, SettingsService, UserPreferences,
};
pub use view::{ErrorAction, ErrorPanel, ViewState, PLACEHOLDER_TEXT};
