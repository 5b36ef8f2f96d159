use clap::{Args, Parser, Subcommand, ValueEnum};
use smartsheti::types::entity::{IrrigationMethod, Season, SoilType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "smartsheti",
    version,
    about = "Crop suitability, pest risk and irrigation advisories for Maharashtra farms"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file used instead of ./smartsheti.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank crops for the given weather and farm
    Crops(CropsCommand),
    /// Pest alerts for the given weather
    Pests(PestsCommand),
    /// Irrigation need from an evapotranspiration estimate
    Irrigation(IrrigationCommand),
    /// Weather alerts for a zone
    Alerts(AlertsCommand),
    /// Field-activity suitability for today or a forecast file
    Operations(OperationsCommand),
    /// Current season and farm activities
    Season(SeasonCommand),
    /// Validate config and reference tables
    Check,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct LocationArgs {
    /// District or place name, resolved to an agroclimatic zone
    #[arg(long, conflicts_with = "zone")]
    pub location: Option<String>,
    /// Agroclimatic zone name
    #[arg(long)]
    pub zone: Option<String>,
}

#[derive(Args)]
pub struct WeatherArgs {
    /// Air temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub temp: Option<f64>,
    /// Relative humidity (%)
    #[arg(long)]
    pub humidity: Option<f64>,
    /// Rainfall (mm)
    #[arg(long)]
    pub rain: Option<f64>,
    /// Wind speed (m/s)
    #[arg(long)]
    pub wind: Option<f64>,
    /// Cloud cover (%)
    #[arg(long)]
    pub clouds: Option<f64>,
    /// Pressure (hPa)
    #[arg(long)]
    pub pressure: Option<f64>,
}

#[derive(Args)]
pub struct SeasonArgs {
    /// Season name (kharif, rabi, summer)
    #[arg(long, conflicts_with = "month")]
    pub season: Option<Season>,
    /// Calendar month used to resolve the season
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

#[derive(Args)]
pub struct CropsCommand {
    #[command(flatten)]
    pub location: LocationArgs,
    #[command(flatten)]
    pub weather: WeatherArgs,
    #[command(flatten)]
    pub season: SeasonArgs,
    /// Soil type key (e.g. black-cotton, alluvial)
    #[arg(long)]
    pub soil: Option<SoilType>,
    /// Irrigation method key (e.g. drip, rain-fed)
    #[arg(long)]
    pub irrigation: Option<IrrigationMethod>,
    /// Land size in acres
    #[arg(long)]
    pub land: Option<f64>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct PestsCommand {
    #[command(flatten)]
    pub location: LocationArgs,
    #[command(flatten)]
    pub weather: WeatherArgs,
    #[command(flatten)]
    pub season: SeasonArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct IrrigationCommand {
    #[command(flatten)]
    pub location: LocationArgs,
    #[command(flatten)]
    pub weather: WeatherArgs,
    /// Crop being irrigated, used for its crop coefficient
    #[arg(long)]
    pub crop: Option<String>,
    /// Days since the field was last irrigated
    #[arg(long)]
    pub days_since: Option<u32>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct AlertsCommand {
    #[command(flatten)]
    pub location: LocationArgs,
    #[command(flatten)]
    pub weather: WeatherArgs,
    /// Calendar month (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct OperationsCommand {
    #[command(flatten)]
    pub weather: WeatherArgs,
    /// JSON file with a `days` array of daily summaries, used instead of the weather flags
    #[arg(long)]
    pub forecast: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct SeasonCommand {
    /// Calendar month (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}
