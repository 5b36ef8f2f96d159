use crate::types::entity::Season;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

impl Season {
    /// Season of a calendar month (1-12); `None` for anything else.
    pub fn from_month(month: u32) -> Option<Season> {
        Season::ALL
            .into_iter()
            .find(|season| season.months().contains(&month))
    }

    pub fn for_date(date: NaiveDate) -> Season {
        // month() is always 1..=12 and the three seasons cover every month
        Season::from_month(date.month()).unwrap_or(Season::Summer)
    }

    pub fn months(self) -> &'static [u32] {
        match self {
            Self::Kharif => &[6, 7, 8, 9, 10],
            Self::Rabi => &[11, 12, 1, 2, 3],
            Self::Summer => &[4, 5],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Kharif => "Monsoon crop season",
            Self::Rabi => "Winter crop season",
            Self::Summer => "Summer crop season",
        }
    }

    pub fn sowing_period(self) -> &'static str {
        match self {
            Self::Kharif => "June-July",
            Self::Rabi => "October-November",
            Self::Summer => "March-April",
        }
    }

    pub fn harvest_period(self) -> &'static str {
        match self {
            Self::Kharif => "September-October",
            Self::Rabi => "February-March",
            Self::Summer => "May-June",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Sowing,
    MonsoonPrep,
    CropCare,
    HarvestPrep,
    Harvest,
    LandPrep,
    Irrigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub priority: Priority,
    pub description: &'static str,
    pub crops: &'static [&'static str],
}

const fn activity(
    kind: ActivityKind,
    priority: Priority,
    description: &'static str,
    crops: &'static [&'static str],
) -> Activity {
    Activity {
        kind,
        priority,
        description,
        crops,
    }
}

/// Farm activities recommended for `month` of `season`.
pub fn activities(season: Season, month: u32) -> Vec<Activity> {
    use ActivityKind::*;
    use Priority::*;

    match (season, month) {
        (Season::Kharif, 6 | 7) => vec![
            activity(
                Sowing,
                High,
                "Kharif sowing season - prepare fields and sow monsoon crops",
                &["Rice", "Cotton", "Soybean", "Jowar"],
            ),
            activity(
                MonsoonPrep,
                High,
                "Monsoon preparation - check drainage, repair bunds",
                &[],
            ),
        ],
        (Season::Kharif, 8 | 9) => vec![activity(
            CropCare,
            Medium,
            "Monitor crops, apply fertilizers, pest management",
            &["Rice", "Cotton", "Soybean"],
        )],
        (Season::Kharif, 10) => vec![activity(
            HarvestPrep,
            High,
            "Prepare for Kharif harvest",
            &["Soybean", "Cotton", "Rice"],
        )],
        (Season::Rabi, 11) => vec![activity(
            Sowing,
            High,
            "Rabi sowing season - sow winter crops",
            &["Wheat", "Gram", "Jowar"],
        )],
        (Season::Rabi, 12 | 1 | 2) => vec![activity(
            CropCare,
            Medium,
            "Irrigation and fertilizer management for Rabi crops",
            &["Wheat", "Gram"],
        )],
        (Season::Rabi, 3) => vec![activity(
            Harvest,
            High,
            "Rabi harvest season",
            &["Wheat", "Gram", "Jowar"],
        )],
        (Season::Summer, 4 | 5) => vec![
            activity(
                LandPrep,
                Medium,
                "Summer land preparation for Kharif season",
                &[],
            ),
            activity(
                Irrigation,
                High,
                "Manage irrigation for summer crops (if grown)",
                &["Vegetables", "Fodder"],
            ),
        ],
        _ => Vec::new(),
    }
}

/// Season resolved for a date, with its calendar and current activities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalContext {
    pub season: Season,
    pub key: &'static str,
    pub months: &'static [u32],
    pub description: &'static str,
    pub sowing_period: &'static str,
    pub harvest_period: &'static str,
    pub is_monsoon: bool,
    pub current_month: u32,
    pub activities: Vec<Activity>,
}

pub fn seasonal_context(date: NaiveDate) -> SeasonalContext {
    let season = Season::for_date(date);
    let month = date.month();
    SeasonalContext {
        season,
        key: season.key(),
        months: season.months(),
        description: season.description(),
        sowing_period: season.sowing_period(),
        harvest_period: season.harvest_period(),
        is_monsoon: season == Season::Kharif,
        current_month: month,
        activities: activities(season, month),
    }
}
