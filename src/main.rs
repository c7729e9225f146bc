use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gameday_core::{Config, WeatherMode};
use gameday_stadiums::{CatalogLoader, CatalogSource, League};
use gameday_ui::{
    render_view, Dashboard, FilePreferenceStore, PreferencesUpdate, RefreshOutcome,
    SettingsService, TeamChoice,
};
use gameday_weather::{FetchMode, TemperatureUnit, WeatherProvider};

/// Stadium weather for NFL, NCAA, MLB and MLS venues
#[derive(Parser, Debug)]
#[command(name = "gameday")]
#[command(about = "Weather for NFL, NCAA, MLB and MLS stadiums")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the teams of a league
    Teams {
        league: League,

        /// Case-insensitive filter on team names
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show weather for a team's stadiums or a whole league
    Weather {
        #[arg(short, long)]
        league: League,

        #[arg(short, long, conflicts_with = "all", required_unless_present = "all")]
        team: Option<String>,

        /// Every stadium in the league
        #[arg(long)]
        all: bool,

        /// Game date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show or change preferences
    Settings {
        /// Temperature unit, F or C
        #[arg(long)]
        unit: Option<TemperatureUnit>,

        #[arg(long)]
        dark_mode: Option<bool>,

        #[arg(long)]
        show_alerts: Option<bool>,

        /// OpenWeatherMap API key
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    gameday_core::init()?;

    let (config, _) = Config::load_validated(args.config.as_deref())?;
    tracing::info!("Game Day Weather started");

    let store = FilePreferenceStore::open(&config.storage.preferences_path);
    let settings = Arc::new(SettingsService::new(Arc::new(store)));

    match args.command {
        Command::Teams { league, search } => {
            let dashboard = build_dashboard(&config, settings)?;
            if !load_catalog(&dashboard, &config).await? {
                println!("{}", render_view(&dashboard.view()));
                return Ok(ExitCode::FAILURE);
            }
            if let Some(text) = search {
                dashboard.set_search(league, &text);
            }
            print_teams(&dashboard, league);
            Ok(ExitCode::SUCCESS)
        }
        Command::Weather {
            league,
            team,
            all,
            date,
        } => {
            let dashboard = build_dashboard(&config, settings)?;
            if !load_catalog(&dashboard, &config).await? {
                println!("{}", render_view(&dashboard.view()));
                return Ok(ExitCode::FAILURE);
            }
            if let Some(date) = date {
                dashboard.set_date(date).await;
            }

            let choice = match team {
                Some(name) if !all => TeamChoice::Team(name),
                _ => TeamChoice::AllTeams,
            };

            let outcome = match dashboard.select(league, choice).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    eprintln!("{}: {}", e, e.user_message());
                    print_teams(&dashboard, league);
                    return Ok(ExitCode::FAILURE);
                }
            };

            println!("{}", render_view(&dashboard.view()));
            Ok(match outcome {
                RefreshOutcome::Applied(_) => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Command::Settings {
            unit,
            dark_mode,
            show_alerts,
            api_key,
        } => {
            if let Some(key) = api_key {
                settings.set_api_key(&key);
            }

            let update = PreferencesUpdate {
                temperature_unit: unit,
                dark_mode,
                show_alerts,
                ..Default::default()
            };
            let prefs = if update.is_empty() {
                settings.load()
            } else {
                settings.save(update)
            };

            println!("Temperature unit: {}", prefs.temperature_unit.symbol());
            println!("Dark mode:        {}", prefs.dark_mode);
            println!("Show alerts:      {}", prefs.show_alerts);
            println!(
                "Alerts:           high {}°F, low {}°F, wind {} mph, rain {} mm/h, snow {} mm/h",
                prefs.alerts.high_temp,
                prefs.alerts.low_temp,
                prefs.alerts.wind_speed,
                prefs.alerts.rain_amount,
                prefs.alerts.snow_amount
            );
            println!(
                "API key:          {}",
                if settings.api_key().is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_dashboard(config: &Config, settings: Arc<SettingsService>) -> Result<Dashboard> {
    let mode = match config.weather.mode {
        WeatherMode::Forecast => FetchMode::Forecast,
        WeatherMode::Current => FetchMode::Current,
    };
    let provider = WeatherProvider::with_base_url(
        &config.weather.api_base_url,
        mode,
        Duration::from_secs(config.weather.timeout_secs),
    )
    .context("Failed to create weather client")?;

    Ok(Dashboard::new(
        settings,
        provider,
        config.weather.icon_base_url.clone(),
    ))
}

async fn load_catalog(dashboard: &Dashboard, config: &Config) -> Result<bool> {
    let loader = CatalogLoader::with_timeout(Duration::from_secs(config.weather.timeout_secs))
        .context("Failed to create catalog client")?;
    Ok(dashboard
        .load_catalog(
            &loader,
            &CatalogSource::parse(&config.catalog.football),
            &CatalogSource::parse(&config.catalog.other),
        )
        .await)
}

fn print_teams(dashboard: &Dashboard, league: League) {
    let selection = dashboard.selection();
    let dropdown = selection.dropdown(league);
    println!("{}", dropdown.display_text());
    for option in dropdown.visible_options() {
        println!("  {}", option.label);
    }
}
