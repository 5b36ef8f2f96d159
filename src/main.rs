mod cli;

use chrono::{Datelike, Local};
use clap::Parser;
use smartsheti::advisory::alerts;
use smartsheti::advisory::irrigation::{self, Urgency};
use smartsheti::advisory::operations::{self, DayWeather};
use smartsheti::advisory::Advisor;
use smartsheti::config;
use smartsheti::context::{location, season};
use smartsheti::error::{AdvisorError, Result};
use smartsheti::reference::{EntityKind, ReferenceStore};
use smartsheti::report::{self, Envelope, OutputFormat};
use smartsheti::types::config::AdvisorConfig;
use smartsheti::types::entity::Season;
use smartsheti::types::observation::{AdvisoryContext, Observation, WeatherReading};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn output_format(format: &cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn load_store(cfg: &AdvisorConfig) -> ReferenceStore {
    ReferenceStore::load(
        cfg.crops_path().map(PathBuf::as_path),
        cfg.pests_path().map(PathBuf::as_path),
    )
}

/// Canonical zone name from `--location` or `--zone`.
fn resolve_zone(args: &cli::LocationArgs) -> Result<Option<&'static str>> {
    if let Some(query) = &args.location {
        let found = location::resolve(query)
            .ok_or_else(|| AdvisorError::UnknownLocation(query.clone()))?;
        tracing::info!(district = found.district, zone = found.zone.name, "location resolved");
        return Ok(Some(found.zone.name));
    }
    match &args.zone {
        Some(name) => location::zone(name)
            .map(|zone| Some(zone.name))
            .ok_or_else(|| AdvisorError::UnknownLocation(name.clone())),
        None => Ok(None),
    }
}

fn resolve_season(args: &cli::SeasonArgs) -> Option<Season> {
    args.season
        .or_else(|| args.month.and_then(Season::from_month))
        .or_else(|| Some(Season::for_date(Local::now().date_naive())))
}

fn observe(args: &cli::WeatherArgs, cfg: &AdvisorConfig) -> Result<Observation> {
    let percent = [("humidity", args.humidity), ("clouds", args.clouds)];
    for (name, value) in percent {
        if value.is_some_and(|v| !(0.0..=100.0).contains(&v)) {
            return Err(AdvisorError::InvalidInput(format!(
                "--{name} must be between 0 and 100"
            )));
        }
    }
    let non_negative = [("rain", args.rain), ("wind", args.wind)];
    for (name, value) in non_negative {
        if value.is_some_and(|v| v < 0.0) {
            return Err(AdvisorError::InvalidInput(format!(
                "--{name} must not be negative"
            )));
        }
    }

    let raw = WeatherReading {
        temp: args.temp,
        humidity: args.humidity,
        rain_mm: args.rain,
        wind_speed: args.wind,
        cloud_cover_pct: args.clouds,
        pressure_hpa: args.pressure,
    };
    Ok(Observation::normalize(&raw, &cfg.reading_defaults()))
}

fn advisory_context(
    store: &ReferenceStore,
    location_args: &cli::LocationArgs,
    season_args: &cli::SeasonArgs,
) -> Result<AdvisoryContext> {
    let zone = resolve_zone(location_args)?;
    Ok(AdvisoryContext {
        zone: zone.map(str::to_string),
        season: resolve_season(season_args),
        zone_crops: zone
            .map(|zone| location::zone_crops(store, zone))
            .unwrap_or_default(),
        ..AdvisoryContext::default()
    })
}

#[derive(Deserialize)]
struct Forecast {
    days: Vec<DayWeather>,
}

fn read_forecast(path: &Path) -> Result<Vec<DayWeather>> {
    let content = std::fs::read_to_string(path)?;
    let forecast: Forecast = serde_json::from_str(&content)?;
    tracing::info!(path = %path.display(), days = forecast.days.len(), "forecast loaded");
    Ok(forecast.days)
}

fn print_rendered<T>(advisory: &T, format: &cli::ReportFormat) -> Result<()>
where
    T: serde::Serialize + report::md::Markdown,
{
    let rendered = report::render(&Envelope::new(advisory), output_format(format))?;
    println!("{rendered}");
    Ok(())
}

fn degraded_exit(store: &ReferenceStore) -> i32 {
    if store.is_degraded() {
        exit_code::WARNINGS
    } else {
        exit_code::SUCCESS
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let root = std::env::current_dir()?;
    let cfg = config::load_config(&root, cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Crops(cmd) => {
            if cmd.land.is_some_and(|acres| !acres.is_finite() || acres < 0.0) {
                return Err(AdvisorError::InvalidInput(
                    "--land must be a non-negative number of acres".to_string(),
                ));
            }
            let store = load_store(&cfg);
            let advisor = Advisor::new(&store, &cfg)?;
            let observation = observe(&cmd.weather, &cfg)?;
            let context = AdvisoryContext {
                soil_type: cmd.soil,
                irrigation: cmd.irrigation,
                land_size_acres: cmd.land,
                ..advisory_context(&store, &cmd.location, &cmd.season)?
            };

            let advisory = advisor.crop_advisory(&observation, &context);
            print_rendered(&advisory, &cmd.format)?;
            Ok(degraded_exit(&store))
        }
        cli::Commands::Pests(cmd) => {
            let store = load_store(&cfg);
            let advisor = Advisor::new(&store, &cfg)?;
            let observation = observe(&cmd.weather, &cfg)?;
            let context = advisory_context(&store, &cmd.location, &cmd.season)?;

            let advisory = advisor.pest_advisory(&observation, &context);
            print_rendered(&advisory, &cmd.format)?;
            if advisory.has_critical() {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(degraded_exit(&store))
            }
        }
        cli::Commands::Irrigation(cmd) => {
            let zone = resolve_zone(&cmd.location)?;
            let observation = observe(&cmd.weather, &cfg)?;
            let advice = irrigation::recommend(
                &observation,
                zone,
                cmd.crop.as_deref(),
                cmd.days_since,
            );
            print_rendered(&advice, &cmd.format)?;
            if advice.urgency == Urgency::Critical {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Alerts(cmd) => {
            let zone = resolve_zone(&cmd.location)?;
            let observation = observe(&cmd.weather, &cfg)?;
            let month = cmd.month.unwrap_or_else(|| Local::now().month());
            let alerts = alerts::generate(&observation, zone, month);
            print_rendered(&alerts, &cmd.format)?;
            if alerts.has_critical() {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Operations(cmd) => {
            let days = match &cmd.forecast {
                Some(path) => read_forecast(path)?,
                None => vec![DayWeather::from_observation(&observe(&cmd.weather, &cfg)?)],
            };
            let plan = operations::plan(&days)?;
            print_rendered(&plan, &cmd.format)?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Season(cmd) => {
            let today = Local::now().date_naive();
            let date = match cmd.month {
                Some(month) => today.with_day(1).and_then(|first| first.with_month(month)),
                None => Some(today),
            }
            .ok_or_else(|| AdvisorError::InvalidInput("--month must be 1-12".to_string()))?;
            print_rendered(&season::seasonal_context(date), &cmd.format)?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check => check(&cfg, &root),
    }
}

fn check(cfg: &AdvisorConfig, root: &Path) -> Result<i32> {
    let store = ReferenceStore::try_load(
        cfg.crops_path().map(PathBuf::as_path),
        cfg.pests_path().map(PathBuf::as_path),
    )?;
    Advisor::new(&store, cfg)?;

    let source = |path: Option<&PathBuf>| {
        path.map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    };
    println!("config: ok ({})", root.display());
    println!(
        "crops: {} ({})",
        store.entity_ids(EntityKind::Crop).len(),
        source(cfg.crops_path())
    );
    println!(
        "pests: {} ({})",
        store.entity_ids(EntityKind::Pest).len(),
        source(cfg.pests_path())
    );
    println!(
        "zones: {}, districts: {}",
        location::zones().len(),
        location::districts().count()
    );
    println!("top_n: {}", cfg.top_n());
    Ok(exit_code::SUCCESS)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
