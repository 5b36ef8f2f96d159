//! Field-activity suitability: scores each farm operation against a day's
//! weather and picks the best day for it over a short forecast.

use crate::error::{AdvisorError, Result};
use crate::types::entity::Reading;
use crate::types::observation::Observation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Forecast days considered by [`plan`].
pub const MAX_FORECAST_DAYS: usize = 7;

/// Rain above this (mm) counts as a rain day.
const RAIN_DAY_MM: f64 = 1.0;
const SPRAY_MAX_WIND: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Plowing,
    Sowing,
    Spraying,
    Irrigation,
    Fertilizing,
    Harvesting,
    Weeding,
    Pruning,
}

/// Allowed rainfall for an activity.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RainRule {
    /// No rain day allowed.
    Dry,
    /// Total rain up to this many mm.
    UpTo(f64),
}

#[derive(Debug, Clone, Copy)]
struct Requirements {
    rain: RainRule,
    max_wind: Option<f64>,
    max_temp: Option<f64>,
    min_humidity: Option<f64>,
    max_humidity: Option<f64>,
}

impl Activity {
    pub const ALL: [Activity; 8] = [
        Activity::Plowing,
        Activity::Sowing,
        Activity::Spraying,
        Activity::Irrigation,
        Activity::Fertilizing,
        Activity::Harvesting,
        Activity::Weeding,
        Activity::Pruning,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Plowing => "Field Plowing/Tilling",
            Self::Sowing => "Sowing/Planting",
            Self::Spraying => "Pesticide/Fertilizer Spraying",
            Self::Irrigation => "Irrigation",
            Self::Fertilizing => "Fertilizer Application",
            Self::Harvesting => "Harvesting",
            Self::Weeding => "Weeding",
            Self::Pruning => "Pruning",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Plowing => "🚜",
            Self::Sowing | Self::Weeding => "🌱",
            Self::Spraying => "💧",
            Self::Irrigation => "💦",
            Self::Fertilizing => "🌿",
            Self::Harvesting => "🌾",
            Self::Pruning => "✂️",
        }
    }

    fn requirements(self) -> Requirements {
        let dry = Requirements {
            rain: RainRule::Dry,
            max_wind: None,
            max_temp: None,
            min_humidity: None,
            max_humidity: None,
        };
        match self {
            Self::Plowing => Requirements {
                max_wind: Some(15.0),
                ..dry
            },
            Self::Sowing => Requirements {
                rain: RainRule::UpTo(5.0),
                max_wind: Some(12.0),
                ..dry
            },
            Self::Spraying => Requirements {
                max_wind: Some(SPRAY_MAX_WIND),
                max_temp: Some(32.0),
                min_humidity: Some(40.0),
                max_humidity: Some(80.0),
                ..dry
            },
            Self::Irrigation => Requirements {
                max_temp: Some(40.0),
                ..dry
            },
            Self::Fertilizing => Requirements {
                rain: RainRule::UpTo(2.0),
                max_wind: Some(15.0),
                ..dry
            },
            Self::Harvesting => Requirements {
                max_wind: Some(20.0),
                max_humidity: Some(70.0),
                ..dry
            },
            Self::Weeding => Requirements {
                max_wind: Some(15.0),
                max_temp: Some(38.0),
                ..dry
            },
            Self::Pruning => Requirements {
                max_humidity: Some(75.0),
                ..dry
            },
        }
    }
}

/// Daily weather summary for one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayWeather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub temp_max: f64,
    pub temp_min: f64,
    pub humidity_avg: f64,
    pub humidity_max: f64,
    pub wind_max: f64,
    #[serde(default)]
    pub total_rain: f64,
}

impl DayWeather {
    /// A single observation read as a whole day.
    pub fn from_observation(observation: &Observation) -> Self {
        let temp = observation.get(Reading::Temperature);
        let humidity = observation.get(Reading::Humidity);
        Self {
            label: Some("today".to_string()),
            temp_max: temp,
            temp_min: temp,
            humidity_avg: humidity,
            humidity_max: humidity,
            wind_max: observation.get(Reading::WindSpeed),
            total_rain: observation.get(Reading::Rainfall),
        }
    }

    pub fn has_rain(&self) -> bool {
        self.total_rain > RAIN_DAY_MM
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityScore {
    pub activity: Activity,
    pub score: u8,
    pub rating: Rating,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub best_time: &'static str,
}

/// Score `activity` for `day`, starting from 100 and deducting per unmet requirement.
pub fn activity_score(activity: Activity, day: &DayWeather) -> ActivityScore {
    let requirements = activity.requirements();
    let mut score = 100.0_f64;
    let mut reasons = Vec::new();
    let mut warnings = Vec::new();

    match requirements.rain {
        RainRule::Dry if day.has_rain() => {
            score -= 50.0;
            warnings.push(format!("Rain expected ({:.1}mm)", day.total_rain));
        }
        RainRule::Dry => {
            score += 10.0;
            reasons.push("No rain expected".to_string());
        }
        RainRule::UpTo(max) if day.total_rain > max => {
            score -= 30.0;
            warnings.push(format!("Too much rain ({:.1}mm)", day.total_rain));
        }
        RainRule::UpTo(_) => {}
    }

    if let Some(max_wind) = requirements.max_wind {
        if day.wind_max > max_wind {
            score -= ((day.wind_max - max_wind) * 5.0).min(40.0);
            warnings.push(format!("Strong winds ({:.1} m/s)", day.wind_max));
        } else {
            reasons.push("Calm winds".to_string());
        }
    }

    if let Some(max_temp) = requirements.max_temp {
        if day.temp_max > max_temp {
            score -= 20.0;
            warnings.push(format!("Too hot ({:.1}°C)", day.temp_max));
        } else {
            reasons.push("Good temperature".to_string());
        }
    }

    if requirements.max_humidity.is_some_and(|max| day.humidity_max > max) {
        score -= 15.0;
        warnings.push(format!("High humidity ({:.0}%)", day.humidity_max));
    } else if requirements.min_humidity.is_some_and(|min| day.humidity_avg < min) {
        score -= 15.0;
        warnings.push("Low humidity".to_string());
    }

    if activity == Activity::Spraying && (day.has_rain() || day.wind_max > SPRAY_MAX_WIND) {
        score = score.min(30.0);
    }

    let best_time = if activity == Activity::Spraying {
        "Early morning (6-9 AM) or evening (4-6 PM)"
    } else if day.temp_max > 35.0 {
        "Early morning or late evening to avoid heat"
    } else {
        "anytime"
    };

    ActivityScore {
        activity,
        score: score.clamp(0.0, 100.0).round() as u8,
        rating: Rating::from_score(score),
        reasons,
        warnings,
        best_time,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day: usize,
    pub weather: DayWeather,
    pub scores: Vec<ActivityScore>,
    /// Activities rated excellent or good.
    pub recommended: Vec<Activity>,
    /// Activities rated poor.
    pub avoid: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestDay {
    pub day: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub score: u8,
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanWarningKind {
    ProlongedRain,
    ExtremeHeat,
    StrongWinds,
    GoodConditions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanWarningLevel {
    High,
    Moderate,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanWarning {
    pub kind: PlanWarningKind,
    pub level: PlanWarningLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationsPlan {
    pub days: Vec<DayPlan>,
    /// Highest-scoring day per activity; activities rated poor on every day are absent.
    pub best_days: BTreeMap<Activity, BestDay>,
    pub warnings: Vec<PlanWarning>,
}

/// Score every activity on each of the first [`MAX_FORECAST_DAYS`] days.
pub fn plan(days: &[DayWeather]) -> Result<OperationsPlan> {
    if days.is_empty() {
        return Err(AdvisorError::InvalidInput(
            "forecast must contain at least one day".to_string(),
        ));
    }
    if days.len() > MAX_FORECAST_DAYS {
        tracing::warn!(
            days = days.len(),
            max = MAX_FORECAST_DAYS,
            "forecast truncated"
        );
    }
    let days = &days[..days.len().min(MAX_FORECAST_DAYS)];

    let day_plans: Vec<DayPlan> = days
        .iter()
        .enumerate()
        .map(|(index, weather)| {
            let scores: Vec<ActivityScore> = Activity::ALL
                .iter()
                .map(|&activity| activity_score(activity, weather))
                .collect();
            let recommended = scores
                .iter()
                .filter(|score| matches!(score.rating, Rating::Excellent | Rating::Good))
                .map(|score| score.activity)
                .collect();
            let avoid = scores
                .iter()
                .filter(|score| score.rating == Rating::Poor)
                .map(|score| score.activity)
                .collect();
            DayPlan {
                day: index + 1,
                weather: weather.clone(),
                scores,
                recommended,
                avoid,
            }
        })
        .collect();

    let best_days = best_days(&day_plans);
    let warnings = warnings(days);
    tracing::debug!(
        days = day_plans.len(),
        warnings = warnings.len(),
        "operations plan built"
    );
    Ok(OperationsPlan {
        days: day_plans,
        best_days,
        warnings,
    })
}

fn best_days(day_plans: &[DayPlan]) -> BTreeMap<Activity, BestDay> {
    let mut best: BTreeMap<Activity, BestDay> = BTreeMap::new();
    for day_plan in day_plans {
        for score in &day_plan.scores {
            if score.rating == Rating::Poor {
                continue;
            }
            let better = best
                .get(&score.activity)
                .map_or(true, |current| score.score > current.score);
            if better {
                best.insert(
                    score.activity,
                    BestDay {
                        day: day_plan.day,
                        label: day_plan.weather.label.clone(),
                        score: score.score,
                        rating: score.rating,
                    },
                );
            }
        }
    }
    best
}

fn warnings(days: &[DayWeather]) -> Vec<PlanWarning> {
    let mut warnings = Vec::new();

    let mut streak = 0;
    let mut longest = 0;
    for day in days {
        streak = if day.has_rain() { streak + 1 } else { 0 };
        longest = longest.max(streak);
    }
    if longest >= 3 {
        warnings.push(PlanWarning {
            kind: PlanWarningKind::ProlongedRain,
            level: PlanWarningLevel::High,
            message: format!("{longest} consecutive days of rain - plan indoor activities"),
        });
    }

    let hot = days.iter().filter(|day| day.temp_max > 40.0).count();
    if hot > 0 {
        warnings.push(PlanWarning {
            kind: PlanWarningKind::ExtremeHeat,
            level: PlanWarningLevel::High,
            message: format!("{hot} day(s) with extreme heat (>40°C) - limit field work"),
        });
    }

    let windy = days.iter().filter(|day| day.wind_max > 15.0).count();
    if windy > 0 {
        warnings.push(PlanWarning {
            kind: PlanWarningKind::StrongWinds,
            level: PlanWarningLevel::Moderate,
            message: format!("{windy} day(s) with strong winds - avoid spraying"),
        });
    }

    let good = days
        .iter()
        .filter(|day| !day.has_rain() && day.temp_max < 38.0 && day.wind_max < 12.0)
        .count();
    if good >= 3 {
        warnings.push(PlanWarning {
            kind: PlanWarningKind::GoodConditions,
            level: PlanWarningLevel::Info,
            message: format!("{good} days with good conditions for field work"),
        });
    }

    warnings
}
