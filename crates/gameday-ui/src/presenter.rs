//! Turns weather snapshots into cards and renders the weather area.

use gameday_weather::{TemperatureUnit, WeatherSnapshot};

use crate::settings::{AlertThresholds, UserPreferences};
use crate::view::{ViewState, PLACEHOLDER_TEXT};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const MPH_TO_METERS_PER_SEC: f64 = 0.44704;

/// Display-ready weather for one stadium.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub stadium: String,
    pub team: String,
    pub description: String,
    pub icon_url: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: Vec<String>,
    pub alerts: Vec<String>,
}

/// 16-point compass name for a bearing in degrees.
pub fn compass_direction(degrees: Option<f64>) -> &'static str {
    let Some(deg) = degrees.filter(|d| d.is_finite()) else {
        return "N/A";
    };
    let index = ((deg / 22.5).round() as i64).rem_euclid(16) as usize;
    COMPASS_POINTS[index]
}

pub fn icon_url(icon_base_url: &str, icon_id: &str) -> String {
    format!("{}/{}@2x.png", icon_base_url.trim_end_matches('/'), icon_id)
}

fn format_temperature(value: f64, unit: TemperatureUnit) -> String {
    format!("{}°{}", value.round() as i64, unit.symbol())
}

pub fn build_card(
    snapshot: &WeatherSnapshot,
    prefs: &UserPreferences,
    icon_base_url: &str,
) -> WeatherCard {
    let unit = snapshot.unit;
    let wind = format!(
        "{} {} {}",
        snapshot.wind.speed.round() as i64,
        unit.wind_speed_label(),
        compass_direction(snapshot.wind.direction_deg)
    );

    let mut precipitation = Vec::new();
    let rain = snapshot.precipitation.rain();
    let snow = snapshot.precipitation.snow();
    if rain > 0.0 {
        precipitation.push(format!("Rain: {:.1} mm/h", rain));
    }
    if snow > 0.0 {
        precipitation.push(format!("Snow: {:.1} mm/h", snow));
    }

    let alerts = if prefs.show_alerts {
        alerts_for(snapshot, &prefs.alerts)
    } else {
        Vec::new()
    };

    WeatherCard {
        stadium: snapshot.stadium.name.clone(),
        team: snapshot.stadium.team.clone(),
        description: snapshot.conditions.description.clone(),
        icon_url: icon_url(icon_base_url, &snapshot.conditions.icon_id),
        temperature: format_temperature(snapshot.temperature, unit),
        feels_like: format_temperature(snapshot.feels_like, unit),
        humidity: format!("{}%", snapshot.humidity),
        wind,
        precipitation,
        alerts,
    }
}

/// Thresholds are stored in °F and mph; compare in the snapshot's unit.
pub fn alerts_for(snapshot: &WeatherSnapshot, thresholds: &AlertThresholds) -> Vec<String> {
    let unit = snapshot.unit;
    let (high, low, wind_limit) = match unit {
        TemperatureUnit::Fahrenheit => (
            thresholds.high_temp,
            thresholds.low_temp,
            thresholds.wind_speed,
        ),
        TemperatureUnit::Celsius => (
            fahrenheit_to_celsius(thresholds.high_temp),
            fahrenheit_to_celsius(thresholds.low_temp),
            thresholds.wind_speed * MPH_TO_METERS_PER_SEC,
        ),
    };

    let mut alerts = Vec::new();
    if snapshot.temperature >= high {
        alerts.push(format!(
            "High temperature: {} (alert at {})",
            format_temperature(snapshot.temperature, unit),
            format_temperature(high, unit)
        ));
    }
    if snapshot.temperature <= low {
        alerts.push(format!(
            "Low temperature: {} (alert at {})",
            format_temperature(snapshot.temperature, unit),
            format_temperature(low, unit)
        ));
    }
    if snapshot.wind.speed >= wind_limit {
        alerts.push(format!(
            "High wind: {} {} (alert at {})",
            snapshot.wind.speed.round() as i64,
            unit.wind_speed_label(),
            wind_limit.round() as i64
        ));
    }

    let rain = snapshot.precipitation.rain();
    if rain > 0.0 && rain >= thresholds.rain_amount {
        alerts.push(format!("Heavy rain: {:.1} mm/h", rain));
    }
    let snow = snapshot.precipitation.snow();
    if snow > 0.0 && snow >= thresholds.snow_amount {
        alerts.push(format!("Heavy snow: {:.1} mm/h", snow));
    }

    alerts
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn render_card(card: &WeatherCard) -> String {
    let mut lines = vec![
        card.stadium.clone(),
        format!("  {}", card.team),
        format!("  {} ({})", card.description, card.icon_url),
        format!(
            "  Temperature {}  Feels like {}",
            card.temperature, card.feels_like
        ),
        format!("  Humidity {}  Wind {}", card.humidity, card.wind),
    ];
    lines.extend(card.precipitation.iter().map(|p| format!("  {}", p)));
    lines.extend(card.alerts.iter().map(|a| format!("  ! {}", a)));
    lines.join("\n")
}

/// Render the whole weather area.
pub fn render_view(state: &ViewState) -> String {
    match state {
        ViewState::Placeholder => PLACEHOLDER_TEXT.to_string(),
        ViewState::Loading => "Loading weather...".to_string(),
        ViewState::Cards(cards) => cards
            .iter()
            .map(render_card)
            .collect::<Vec<_>>()
            .join("\n\n"),
        ViewState::Error(panel) => {
            let mut out = panel.title.clone();
            if let Some(message) = &panel.message {
                out.push('\n');
                out.push_str(message);
            }
            out.push_str(&format!("\n[{}]", panel.action.label()));
            out
        }
    }
}
