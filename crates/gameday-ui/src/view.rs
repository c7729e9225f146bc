//! State of the weather area. Rendering is a pure function of this state,
//! see [`crate::presenter::render_view`].

use crate::presenter::WeatherCard;

pub const PLACEHOLDER_TEXT: &str = "Weather data will load here when you choose a venue.";

/// What the single button on an error panel does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    ConfigureApiKey,
    TryAgain,
}

impl ErrorAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ConfigureApiKey => "Configure API Key",
            Self::TryAgain => "Try Again",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub title: String,
    pub message: Option<String>,
    pub action: ErrorAction,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Placeholder,
    Loading,
    Cards(Vec<WeatherCard>),
    Error(ErrorPanel),
}

impl ViewState {
    pub fn error_panel(&self) -> Option<&ErrorPanel> {
        match self {
            Self::Error(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn cards(&self) -> &[WeatherCard] {
        match self {
            Self::Cards(cards) => cards,
            _ => &[],
        }
    }
}
