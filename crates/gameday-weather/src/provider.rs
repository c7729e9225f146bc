//! OpenWeatherMap client.

use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use futures_util::future::try_join_all;
use gameday_stadiums::StadiumRecord;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::forecast::{closest_index_to_target, noon_timestamp};
use crate::types::{
    Conditions, FetchMode, Precipitation, TemperatureUnit, WeatherError, WeatherSnapshot, Wind,
};

/// Per-refresh parameters shared by every request in a batch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub api_key: String,
    pub unit: TemperatureUnit,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Default, Deserialize)]
struct ApiWind {
    #[serde(default)]
    speed: f64,
    deg: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiPrecipitation {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hours: Option<f64>,
}

impl ApiPrecipitation {
    /// mm/h, preferring the one-hour figure.
    fn hourly_rate(&self) -> Option<f64> {
        self.one_hour.or(self.three_hours.map(|v| v / 3.0))
    }
}

/// One reading, shared by the current-weather body and forecast entries.
#[derive(Debug, Deserialize)]
struct ApiReading {
    dt: Option<i64>,
    #[serde(default)]
    weather: Vec<ApiCondition>,
    main: ApiMain,
    #[serde(default)]
    wind: ApiWind,
    rain: Option<ApiPrecipitation>,
    snow: Option<ApiPrecipitation>,
}

impl ApiReading {
    fn into_snapshot(self, stadium: &StadiumRecord, unit: TemperatureUnit) -> WeatherSnapshot {
        let conditions = self
            .weather
            .into_iter()
            .next()
            .map(|c| {
                let defaults = Conditions::default();
                Conditions {
                    main: c.main,
                    description: if c.description.is_empty() {
                        defaults.description
                    } else {
                        c.description
                    },
                    icon_id: if c.icon.is_empty() {
                        defaults.icon_id
                    } else {
                        c.icon
                    },
                }
            })
            .unwrap_or_default();

        WeatherSnapshot {
            stadium: stadium.clone(),
            conditions,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity.round().clamp(0.0, 100.0) as u8,
            wind: Wind {
                speed: self.wind.speed,
                direction_deg: self.wind.deg,
            },
            precipitation: Precipitation {
                rain_mm_per_hr: self.rain.as_ref().and_then(ApiPrecipitation::hourly_rate),
                snow_mm_per_hr: self.snow.as_ref().and_then(ApiPrecipitation::hourly_rate),
            },
            observed_at: self.dt.and_then(|dt| DateTime::from_timestamp(dt, 0)),
            unit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    #[serde(default)]
    list: Vec<ApiReading>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
    mode: FetchMode,
}

impl WeatherProvider {
    pub fn with_base_url(
        base_url: &str,
        mode: FetchMode,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            mode,
        })
    }

    /// Fetch every stadium concurrently. Results keep the input order; any
    /// single failure fails the whole batch.
    pub async fn fetch_all(
        &self,
        stadiums: &[StadiumRecord],
        request: &FetchRequest,
    ) -> Result<Vec<WeatherSnapshot>, WeatherError> {
        if request.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        tracing::info!(
            "Fetching weather for {} stadiums ({:?}, {})",
            stadiums.len(),
            self.mode,
            request.unit.units_param()
        );

        try_join_all(stadiums.iter().map(|stadium| self.fetch(stadium, request))).await
    }

    /// Fetch weather for one stadium.
    #[instrument(skip(self, stadium, request), fields(stadium = %stadium.name), level = "debug")]
    pub async fn fetch(
        &self,
        stadium: &StadiumRecord,
        request: &FetchRequest,
    ) -> Result<WeatherSnapshot, WeatherError> {
        if request.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let url = format!("{}/{}", self.base_url, self.mode.endpoint());
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", stadium.latitude.to_string()),
                ("lon", stadium.longitude.to_string()),
                ("units", request.unit.units_param().to_string()),
                ("appid", request.api_key.clone()),
            ])
            .send()
            .await
            // The request URL carries the API key
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        let reading = match self.mode {
            FetchMode::Current => Self::handle_response::<ApiReading>(response).await?,
            FetchMode::Forecast => {
                let forecast: ApiForecast = Self::handle_response(response).await?;
                Self::pick_for_date(forecast.list, request.date)?
            }
        };

        Ok(reading.into_snapshot(stadium, request.unit))
    }

    fn pick_for_date(list: Vec<ApiReading>, date: NaiveDate) -> Result<ApiReading, WeatherError> {
        let target = noon_timestamp(date);
        let total = list.len();
        let index = closest_index_to_target(&list, target, |r| r.dt.unwrap_or(i64::MIN));

        index
            .and_then(|i| {
                tracing::debug!("Chose forecast entry {} of {}", i, total);
                list.into_iter().nth(i)
            })
            .ok_or_else(|| WeatherError::Provider("forecast contained no entries".to_string()))
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| WeatherError::Network(e.without_url()))?;
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(WeatherError::InvalidApiKey)
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or(text)
                });
            Err(WeatherError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }
}
