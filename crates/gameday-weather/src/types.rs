use chrono::{DateTime, Utc};
use gameday_stadiums::StadiumRecord;
use serde::{Deserialize, Serialize};

/// Temperature unit preference. Also decides the wind speed unit the
/// provider reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "F")]
    Fahrenheit,
    #[serde(rename = "C")]
    Celsius,
}

impl TemperatureUnit {
    /// Value of the provider's `units` query parameter.
    pub fn units_param(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "imperial",
            Self::Celsius => "metric",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "F",
            Self::Celsius => "C",
        }
    }

    pub fn wind_speed_label(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "mph",
            Self::Celsius => "m/s",
        }
    }
}

impl std::str::FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "fahrenheit" | "imperial" => Ok(Self::Fahrenheit),
            "c" | "celsius" | "metric" => Ok(Self::Celsius),
            other => Err(format!("unknown temperature unit: {other}")),
        }
    }
}

/// Which provider endpoint to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// `/forecast`, entry closest to noon on the requested date
    #[default]
    Forecast,
    /// `/weather`, requested date ignored
    Current,
}

impl FetchMode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Forecast => "forecast",
            Self::Current => "weather",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub main: String,
    pub description: String,
    pub icon_id: String,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            main: String::new(),
            description: "No description available".to_string(),
            icon_id: "01d".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    /// mph for imperial, m/s for metric
    pub speed: f64,
    pub direction_deg: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Precipitation {
    pub rain_mm_per_hr: Option<f64>,
    pub snow_mm_per_hr: Option<f64>,
}

impl Precipitation {
    pub fn rain(&self) -> f64 {
        self.rain_mm_per_hr.unwrap_or(0.0)
    }

    pub fn snow(&self) -> f64 {
        self.snow_mm_per_hr.unwrap_or(0.0)
    }
}

/// Weather for one stadium at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub stadium: StadiumRecord,
    pub conditions: Conditions,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind: Wind,
    pub precipitation: Precipitation,
    pub observed_at: Option<DateTime<Utc>>,
    pub unit: TemperatureUnit,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("OpenWeather API key not configured")]
    MissingApiKey,

    #[error("OpenWeather rejected the API key")]
    InvalidApiKey,

    #[error("Weather fetch error: {status} {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
