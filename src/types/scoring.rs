use super::entity::Reading;
use serde::Serialize;
use std::fmt;

/// Upper bound of every total score.
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Weather,
    CropRelevance,
    Season,
    Zone,
    Soil,
    Irrigation,
    Land,
}

impl Factor {
    pub fn key(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::CropRelevance => "crop_relevance",
            Self::Season => "season",
            Self::Zone => "zone",
            Self::Soil => "soil",
            Self::Irrigation => "irrigation",
            Self::Land => "land",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Declarative description of one scoring dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorSpec {
    pub factor: Factor,
    pub ceiling: f64,
    pub required: Vec<Reading>,
}

impl FactorSpec {
    pub fn new(factor: Factor, ceiling: f64, required: &[Reading]) -> Self {
        Self {
            factor,
            ceiling,
            required: required.to_vec(),
        }
    }
}

/// Points awarded for one factor, with the line explaining them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScore {
    pub factor: Factor,
    pub points: f64,
    pub ceiling: f64,
    pub justification: String,
    pub defaulted: bool,
}

impl FactorScore {
    /// Build a score, bounding `points` to `0..=ceiling` and mapping non-finite input to zero.
    pub fn new(factor: Factor, ceiling: f64, points: f64, detail: &str, defaulted: bool) -> Self {
        let ceiling = ceiling.max(0.0);
        let points = if points.is_finite() {
            points.clamp(0.0, ceiling)
        } else {
            0.0
        };
        let mut justification = format!(
            "{}/{} - {}",
            format_points(points),
            format_points(ceiling),
            detail
        );
        if defaulted {
            justification.push_str(" (default used)");
        }
        Self {
            factor,
            points,
            ceiling,
            justification,
            defaulted,
        }
    }

    /// Fraction of the ceiling earned, in `0..=1`.
    pub fn ratio(&self) -> f64 {
        if self.ceiling > 0.0 {
            self.points / self.ceiling
        } else {
            0.0
        }
    }
}

/// Whole numbers print without decimals, everything else with one.
pub fn format_points(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Ordinal label derived from a total score through fixed thresholds.
pub trait RatingBand: Copy + fmt::Display {
    fn from_score(score: f64) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SuitabilityRating {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    Fair,
    #[serde(rename = "Consider Alternatives")]
    ConsiderAlternatives,
}

impl RatingBand for SuitabilityRating {
    fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::Excellent
        } else if score >= 70.0 {
            Self::VeryGood
        } else if score >= 55.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Fair
        } else {
            Self::ConsiderAlternatives
        }
    }
}

impl fmt::Display for SuitabilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::ConsiderAlternatives => "Consider Alternatives",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Critical,
    High,
    Moderate,
    Low,
}

impl RatingBand for AlertLevel {
    fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Critical
        } else if score >= 60.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Moderate => "MODERATE",
            Self::Low => "LOW",
        };
        f.write_str(text)
    }
}

/// Outcome of scoring one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult<R> {
    pub entity_id: String,
    pub total_score: u8,
    pub sub_scores: Vec<FactorScore>,
    pub rating: R,
    pub reasons: Vec<String>,
}

impl<R> ScoreResult<R> {
    pub fn sub_score(&self, factor: Factor) -> Option<&FactorScore> {
        self.sub_scores.iter().find(|score| score.factor == factor)
    }
}
