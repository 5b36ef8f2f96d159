use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Inclusive numeric reference range. Bounds are kept ordered (`min <= max`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRange")]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl From<RawRange> for Range {
    fn from(raw: RawRange) -> Self {
        Range::new(raw.min, raw.max)
    }
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn half_width(&self) -> f64 {
        (self.max - self.min) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance from `value` to the nearest bound; zero when inside.
    pub fn distance_outside(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

/// A numeric weather reading an entity can declare a requirement on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    Temperature,
    Humidity,
    Rainfall,
    CloudCover,
    WindSpeed,
    Pressure,
}

impl Reading {
    pub const ALL: [Reading; 6] = [
        Reading::Temperature,
        Reading::Humidity,
        Reading::Rainfall,
        Reading::CloudCover,
        Reading::WindSpeed,
        Reading::Pressure,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Rainfall => "rainfall",
            Self::CloudCover => "cloud cover",
            Self::WindSpeed => "wind speed",
            Self::Pressure => "pressure",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity | Self::CloudCover => "%",
            Self::Rainfall => "mm",
            Self::WindSpeed => "m/s",
            Self::Pressure => "hPa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[serde(alias = "Kharif")]
    Kharif,
    #[serde(alias = "Rabi")]
    Rabi,
    #[serde(alias = "Summer", alias = "zaid")]
    Summer,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Summer];

    pub fn key(self) -> &'static str {
        match self {
            Self::Kharif => "kharif",
            Self::Rabi => "rabi",
            Self::Summer => "summer",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Kharif => "Kharif",
            Self::Rabi => "Rabi",
            Self::Summer => "Summer",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Kharif => &["kharif"],
            Self::Rabi => &["rabi"],
            Self::Summer => &["summer", "zaid"],
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Season::ALL
            .into_iter()
            .find(|season| season.aliases().contains(&lower.as_str()))
            .ok_or_else(|| format!("unknown season '{s}' (expected kharif, rabi or summer)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonMatch {
    /// Sole season of the crop, or a year-round crop.
    Exact,
    /// One of several seasons the crop is sown in.
    Partial,
    None,
}

/// Parsed form of a crop's free-text season label ("Rabi/Kharif", "Perennial", ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonAffinity {
    pub label: String,
    pub seasons: Vec<Season>,
    pub year_round: bool,
    pub perennial: bool,
}

impl SeasonAffinity {
    pub fn parse(label: &str) -> Self {
        let lower = label.to_lowercase();
        let seasons = Season::ALL
            .into_iter()
            .filter(|season| season.aliases().iter().any(|alias| lower.contains(alias)))
            .collect();
        let perennial = lower.contains("perennial");
        Self {
            label: label.to_string(),
            seasons,
            year_round: perennial || lower.contains("all season"),
            perennial,
        }
    }

    pub fn matches(&self, current: Season) -> SeasonMatch {
        if self.year_round || self.seasons == [current] {
            SeasonMatch::Exact
        } else if self.seasons.contains(&current) {
            SeasonMatch::Partial
        } else {
            SeasonMatch::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropCategory {
    Cereals,
    Cash,
    Vegetables,
    Fruits,
    Pulses,
    Spices,
    Other,
}

const CATEGORY_MEMBERS: [(CropCategory, &[&str]); 6] = [
    (
        CropCategory::Cereals,
        &["Rice", "Wheat", "Maize", "Jowar (Sorghum)", "Jowar", "Bajra"],
    ),
    (
        CropCategory::Cash,
        &["Cotton", "Sugarcane", "Soybean", "Groundnut", "Sunflower"],
    ),
    (
        CropCategory::Vegetables,
        &[
            "Tomato",
            "Onion",
            "Brinjal (Eggplant)",
            "Brinjal",
            "Chilli",
            "Cabbage",
            "Cauliflower",
            "Okra (Lady Finger)",
            "Okra",
            "Carrot",
            "Beetroot",
            "Spinach",
            "Cucumber",
            "Potato",
        ],
    ),
    (
        CropCategory::Fruits,
        &[
            "Banana",
            "Grapes",
            "Orange",
            "Pomegranate",
            "Mango",
            "Papaya",
            "Watermelon",
        ],
    ),
    (
        CropCategory::Pulses,
        &["Tur (Pigeon Pea)", "Tur", "Gram", "Moong"],
    ),
    (CropCategory::Spices, &["Turmeric", "Ginger", "Garlic"]),
];

impl CropCategory {
    /// Resolve the category of a crop by exact name; first listed category wins.
    pub fn classify(name: &str) -> Self {
        CATEGORY_MEMBERS
            .iter()
            .find(|(_, members)| members.contains(&name))
            .map(|(category, _)| *category)
            .unwrap_or(CropCategory::Other)
    }

    /// Maximum number of crops of this category in the first diversity pass.
    pub fn cap(self) -> usize {
        match self {
            Self::Vegetables => 3,
            _ => 2,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Cereals => "cereals",
            Self::Cash => "cash",
            Self::Vegetables => "vegetables",
            Self::Fruits => "fruits",
            Self::Pulses => "pulses",
            Self::Spices => "spices",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Severe => "severe",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoilType {
    BlackCotton,
    RedLateritic,
    Alluvial,
    SandyLoam,
    ClayLoam,
    WellDrainedLoamy,
    DeepLoamy,
    ForestLoam,
    CoastalSandy,
}

impl SoilType {
    pub const ALL: [SoilType; 9] = [
        SoilType::BlackCotton,
        SoilType::RedLateritic,
        SoilType::Alluvial,
        SoilType::SandyLoam,
        SoilType::ClayLoam,
        SoilType::WellDrainedLoamy,
        SoilType::DeepLoamy,
        SoilType::ForestLoam,
        SoilType::CoastalSandy,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::BlackCotton => "black-cotton",
            Self::RedLateritic => "red-lateritic",
            Self::Alluvial => "alluvial",
            Self::SandyLoam => "sandy-loam",
            Self::ClayLoam => "clay-loam",
            Self::WellDrainedLoamy => "well-drained-loamy",
            Self::DeepLoamy => "deep-loamy",
            Self::ForestLoam => "forest-loam",
            Self::CoastalSandy => "coastal-sandy",
        }
    }

    /// Lowercase phrases that identify this soil family inside a crop's soil descriptions.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::BlackCotton => &[
                "black cotton soil",
                "medium to deep black cotton soil",
                "deep black cotton soil",
                "well-drained black soil",
            ],
            Self::RedLateritic => &[
                "red lateritic soil",
                "well-drained red lateritic soil",
                "lateritic soil",
            ],
            Self::Alluvial => &[
                "alluvial soil",
                "deep alluvial soil",
                "fertile alluvial soil",
                "well-drained alluvial soil",
            ],
            Self::SandyLoam => &[
                "sandy loam",
                "well-drained sandy loam",
                "sandy loam soil",
                "light textured soil",
            ],
            Self::ClayLoam => &["clay loam", "clayey loam", "deep clay loam"],
            Self::WellDrainedLoamy => &["well-drained loamy soil", "loamy soil", "deep loamy soil"],
            Self::DeepLoamy => &["deep loamy soil", "deep fertile soil", "deep soil"],
            Self::ForestLoam => &["forest loam", "forest loam soil", "rich organic soil"],
            Self::CoastalSandy => &["coastal alluvial soil", "sandy soil", "red coastal soil"],
        }
    }
}

impl FromStr for SoilType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");
        SoilType::ALL
            .into_iter()
            .find(|soil| soil.key() == key)
            .ok_or_else(|| format!("unknown soil type '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IrrigationMethod {
    RainFed,
    Drip,
    Sprinkler,
    Flood,
    Furrow,
    Canal,
    Well,
}

impl IrrigationMethod {
    pub const ALL: [IrrigationMethod; 7] = [
        IrrigationMethod::RainFed,
        IrrigationMethod::Drip,
        IrrigationMethod::Sprinkler,
        IrrigationMethod::Flood,
        IrrigationMethod::Furrow,
        IrrigationMethod::Canal,
        IrrigationMethod::Well,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::RainFed => "rain-fed",
            Self::Drip => "drip",
            Self::Sprinkler => "sprinkler",
            Self::Flood => "flood",
            Self::Furrow => "furrow",
            Self::Canal => "canal",
            Self::Well => "well",
        }
    }
}

impl FromStr for IrrigationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");
        let key = if key == "rainfed" { "rain-fed".to_string() } else { key };
        IrrigationMethod::ALL
            .into_iter()
            .find(|method| method.key() == key)
            .ok_or_else(|| format!("unknown irrigation method '{s}'"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Crop {
    pub name: String,
    pub varieties: Vec<String>,
    pub season: SeasonAffinity,
    pub ideal_temperature_c: Range,
    pub rainfall_requirement_mm: Range,
    pub best_soil_types: Vec<String>,
    pub agroclimatic_zones: Vec<String>,
    pub cultivation_tips: Option<String>,
    pub category: CropCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pest {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub conditions: BTreeMap<Reading, Range>,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub seasonal_activity: BTreeMap<Season, u8>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub affected_crops: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub treatment: Vec<String>,
}
