//! Factor scorers. Each turns matcher output or a lookup into one bounded
//! [`FactorScore`]; none of them fails, missing inputs fall back to the
//! documented neutral value and are flagged as defaulted.

use super::matcher::{optimality, MatchPolicy};
use crate::error::AdvisorError;
use crate::types::entity::{Crop, IrrigationMethod, Range, Reading, Season, SeasonMatch, SoilType};
use crate::types::observation::Observation;
use crate::types::scoring::{Factor, FactorScore, FactorSpec, MAX_SCORE};
use std::collections::BTreeSet;

/// Pest weather conditions are an all-or-nothing gate.
pub const PEST_WEATHER_POLICY: MatchPolicy = MatchPolicy::Hard;
pub const CROP_TEMPERATURE_TOLERANCE_C: f64 = 5.0;
/// Crops earn reduced credit for temperatures just outside their ideal range.
pub const CROP_TEMPERATURE_POLICY: MatchPolicy = MatchPolicy::Soft {
    tolerance: CROP_TEMPERATURE_TOLERANCE_C,
    floor: 0.5,
};

/// Activity or priority weight used when none is known (on a 0..=10 scale).
pub const NEUTRAL_WEIGHT: u8 = 5;

pub fn pest_factor_specs() -> Vec<FactorSpec> {
    vec![
        FactorSpec::new(Factor::Weather, 25.0, &Reading::ALL),
        FactorSpec::new(Factor::CropRelevance, 30.0, &[]),
        FactorSpec::new(Factor::Season, 25.0, &[]),
        FactorSpec::new(Factor::Zone, 20.0, &[]),
    ]
}

/// Crop weights are rebalanced around the zone factor so the ceilings still sum to 100.
pub fn crop_factor_specs() -> Vec<FactorSpec> {
    vec![
        FactorSpec::new(Factor::Weather, 25.0, &[Reading::Temperature]),
        FactorSpec::new(Factor::Soil, 20.0, &[]),
        FactorSpec::new(Factor::Irrigation, 15.0, &[]),
        FactorSpec::new(Factor::Season, 15.0, &[]),
        FactorSpec::new(Factor::Zone, 15.0, &[]),
        FactorSpec::new(Factor::Land, 10.0, &[]),
    ]
}

/// Check that ceilings are positive, factors unique and the ceilings sum to 100.
pub fn validate_specs(specs: &[FactorSpec]) -> Result<(), AdvisorError> {
    if specs.is_empty() {
        return Err(AdvisorError::InvalidFactorSpec(
            "at least one factor is required".to_string(),
        ));
    }
    let mut seen = BTreeSet::new();
    for spec in specs {
        if !spec.ceiling.is_finite() || spec.ceiling <= 0.0 {
            return Err(AdvisorError::InvalidFactorSpec(format!(
                "{} ceiling must be positive (found {})",
                spec.factor, spec.ceiling
            )));
        }
        if !seen.insert(spec.factor) {
            return Err(AdvisorError::InvalidFactorSpec(format!(
                "{} appears more than once",
                spec.factor
            )));
        }
    }
    let sum: f64 = specs.iter().map(|spec| spec.ceiling).sum();
    if (sum - MAX_SCORE).abs() > 1e-6 {
        return Err(AdvisorError::InvalidFactorSpec(format!(
            "factor ceilings must sum to 100 (found {sum})"
        )));
    }
    Ok(())
}

/// Half the ceiling, flagged as defaulted.
pub fn neutral(spec: &FactorSpec, detail: &str) -> FactorScore {
    FactorScore::new(spec.factor, spec.ceiling, spec.ceiling / 2.0, detail, true)
}

/// `ceiling × mean optimality` over the requirements this factor covers.
pub fn weather_fit<'a>(
    spec: &FactorSpec,
    requirements: impl IntoIterator<Item = (Reading, &'a Range)>,
    observation: &Observation,
    policy: MatchPolicy,
) -> FactorScore {
    let mut total = 0.0;
    let mut count = 0usize;
    let mut defaulted = false;
    for (reading, range) in requirements {
        if !spec.required.contains(&reading) {
            continue;
        }
        total += optimality(observation.get(reading), range, policy);
        defaulted |= observation.is_defaulted(reading);
        count += 1;
    }

    if count == 0 {
        return neutral(spec, "no weather requirements recorded");
    }

    let mean = total / count as f64;
    let detail = if mean >= 0.75 {
        "conditions strongly favorable"
    } else if mean >= 0.4 {
        "conditions moderately favorable"
    } else if mean > 0.0 {
        "conditions marginal"
    } else {
        "conditions unfavorable"
    };
    FactorScore::new(spec.factor, spec.ceiling, spec.ceiling * mean, detail, defaulted)
}

/// Affected crops that also grow in the zone; names match by case-insensitive
/// containment in either direction.
pub fn matching_crops<'a>(affected: &'a [String], zone_crops: &[String]) -> Vec<&'a str> {
    let zone_lower = zone_crops
        .iter()
        .map(|crop| crop.to_lowercase())
        .collect::<Vec<_>>();
    affected
        .iter()
        .filter(|crop| {
            let crop_lower = crop.to_lowercase();
            zone_lower
                .iter()
                .any(|zone| zone.contains(&crop_lower) || crop_lower.contains(zone.as_str()))
        })
        .map(String::as_str)
        .collect()
}

/// Tiered by overlap: none 1/6, one 2/3, two or more full; half when no zone crop data.
pub fn crop_relevance(
    spec: &FactorSpec,
    affected: &[String],
    zone_crops: &[String],
) -> FactorScore {
    if zone_crops.is_empty() || affected.is_empty() {
        return neutral(spec, "no zone crop data");
    }
    let matched = matching_crops(affected, zone_crops).len();
    let (points, detail) = match matched {
        0 => (spec.ceiling / 6.0, "no zone crops at risk".to_string()),
        1 => (spec.ceiling * 2.0 / 3.0, "1 zone crop at risk".to_string()),
        n => (spec.ceiling, format!("{n} zone crops at risk")),
    };
    FactorScore::new(spec.factor, spec.ceiling, points, &detail, false)
}

/// `ceiling × weight / 10`; a missing season or weight uses the neutral weight.
pub fn seasonal_timing(
    spec: &FactorSpec,
    season: Option<Season>,
    weight: Option<u8>,
) -> FactorScore {
    match (season, weight) {
        (Some(season), Some(weight)) => {
            let weight = weight.min(10);
            FactorScore::new(
                spec.factor,
                spec.ceiling,
                spec.ceiling * f64::from(weight) / 10.0,
                &format!("{} season activity {weight}/10", season.name()),
                false,
            )
        }
        (Some(season), None) => FactorScore::new(
            spec.factor,
            spec.ceiling,
            spec.ceiling * f64::from(NEUTRAL_WEIGHT) / 10.0,
            &format!("{} season activity unknown", season.name()),
            true,
        ),
        (None, _) => FactorScore::new(
            spec.factor,
            spec.ceiling,
            spec.ceiling * f64::from(NEUTRAL_WEIGHT) / 10.0,
            "season unknown",
            true,
        ),
    }
}

/// `ceiling × priority / 10` for a known zone (unlisted entities get zero);
/// half the ceiling when the zone is unknown.
pub fn regional_priority(
    spec: &FactorSpec,
    zone: Option<&str>,
    priority: Option<u8>,
) -> FactorScore {
    match zone {
        Some(zone) => {
            let priority = priority.unwrap_or(0).min(10);
            FactorScore::new(
                spec.factor,
                spec.ceiling,
                spec.ceiling * f64::from(priority) / 10.0,
                &format!("{zone} priority {priority}/10"),
                false,
            )
        }
        None => FactorScore::new(
            spec.factor,
            spec.ceiling,
            spec.ceiling * f64::from(NEUTRAL_WEIGHT) / 10.0,
            "zone unknown",
            true,
        ),
    }
}

/// Seasonal weight of a crop: sole or year-round season 10, one of several 7, off-season 2.
pub fn crop_season_weight(crop: &Crop, season: Season) -> u8 {
    match crop.season.matches(season) {
        SeasonMatch::Exact => 10,
        SeasonMatch::Partial => 7,
        SeasonMatch::None => 2,
    }
}

/// Zone priority of a crop: listed for the zone 10, commonly grown there 7, otherwise 2.
pub fn crop_zone_priority(crop: &Crop, zone: &str, zone_crops: &[String]) -> u8 {
    if crop
        .agroclimatic_zones
        .iter()
        .any(|listed| listed.eq_ignore_ascii_case(zone))
    {
        10
    } else if zone_crops
        .iter()
        .any(|name| name.eq_ignore_ascii_case(&crop.name))
    {
        7
    } else {
        2
    }
}

pub fn soil_matches(crop: &Crop, soil: SoilType) -> bool {
    crop.best_soil_types.iter().any(|description| {
        let description = description.to_lowercase();
        soil.keywords()
            .iter()
            .any(|keyword| description.contains(keyword))
    })
}

pub fn soil_compatibility(spec: &FactorSpec, crop: &Crop, soil: Option<SoilType>) -> FactorScore {
    match soil {
        Some(soil) if soil_matches(crop, soil) => FactorScore::new(
            spec.factor,
            spec.ceiling,
            spec.ceiling,
            &format!("{} soil suits the crop", soil.key()),
            false,
        ),
        Some(soil) => FactorScore::new(
            spec.factor,
            spec.ceiling,
            spec.ceiling * 0.2,
            &format!("{} soil is not among preferred soils", soil.key()),
            false,
        ),
        None => neutral(spec, "soil type not provided"),
    }
}

pub fn irrigation_suits(crop: &Crop, method: IrrigationMethod) -> bool {
    let min_rainfall = crop.rainfall_requirement_mm.min;
    match method {
        IrrigationMethod::RainFed => min_rainfall <= 800.0,
        IrrigationMethod::Drip | IrrigationMethod::Sprinkler => true,
        IrrigationMethod::Flood => {
            crop.name.to_lowercase().contains("rice") || min_rainfall > 1000.0
        }
        IrrigationMethod::Furrow | IrrigationMethod::Canal | IrrigationMethod::Well => {
            min_rainfall <= 1500.0
        }
    }
}

pub fn irrigation_compatibility(
    spec: &FactorSpec,
    crop: &Crop,
    method: Option<IrrigationMethod>,
) -> FactorScore {
    match method {
        Some(method) if irrigation_suits(crop, method) => FactorScore::new(
            spec.factor,
            spec.ceiling,
            spec.ceiling,
            &format!("{} irrigation suits the crop", method.key()),
            false,
        ),
        Some(method) => FactorScore::new(
            spec.factor,
            spec.ceiling,
            spec.ceiling * 0.4,
            &format!("{} irrigation needs adjustment", method.key()),
            false,
        ),
        None => FactorScore::new(
            spec.factor,
            spec.ceiling,
            spec.ceiling,
            "irrigation method not provided",
            true,
        ),
    }
}

/// Size-band advice for growing `crop` on `acres`; `None` when the plot is too small.
pub fn land_advice(crop: &Crop, acres: f64) -> Option<&'static str> {
    if crop.season.perennial {
        return if acres < 0.5 {
            None
        } else if acres < 2.0 {
            Some("Good for small-scale orcharding")
        } else {
            Some("Excellent for commercial cultivation")
        };
    }
    Some(if acres < 0.25 {
        "Suitable for kitchen garden/small farming"
    } else if acres < 1.0 {
        "Good for subsistence farming"
    } else if acres < 5.0 {
        "Suitable for small commercial farming"
    } else {
        "Excellent for large-scale commercial farming"
    })
}

pub fn land_suitability(spec: &FactorSpec, crop: &Crop, acres: Option<f64>) -> FactorScore {
    match acres.filter(|acres| acres.is_finite() && *acres >= 0.0) {
        Some(acres) => match land_advice(crop, acres) {
            Some(advice) => {
                FactorScore::new(spec.factor, spec.ceiling, spec.ceiling, advice, false)
            }
            None => FactorScore::new(
                spec.factor,
                spec.ceiling,
                0.0,
                "plot too small for a perennial crop",
                false,
            ),
        },
        None => FactorScore::new(
            spec.factor,
            spec.ceiling,
            spec.ceiling,
            "land size not provided",
            true,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::builtin;
    use crate::types::observation::{ReadingDefaults, WeatherReading};

    fn spec(factor: Factor, ceiling: f64) -> FactorSpec {
        FactorSpec::new(factor, ceiling, &[Reading::Temperature, Reading::Humidity])
    }

    fn crop(name: &str) -> Crop {
        builtin::fallback_crops()
            .into_iter()
            .find(|crop| crop.name == name)
            .expect("fallback crop should exist")
    }

    fn observe(temp: Option<f64>, humidity: Option<f64>) -> Observation {
        let raw = WeatherReading {
            temp,
            humidity,
            ..WeatherReading::default()
        };
        Observation::normalize(&raw, &ReadingDefaults::default())
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn builtin_factor_tables_are_valid() {
        assert!(validate_specs(&pest_factor_specs()).is_ok());
        assert!(validate_specs(&crop_factor_specs()).is_ok());
    }

    #[test]
    fn validate_specs_rejects_bad_tables() {
        let mut specs = pest_factor_specs();
        specs[0].ceiling = 30.0;
        assert!(validate_specs(&specs)
            .expect_err("sum should fail")
            .to_string()
            .contains("sum to 100"));

        let duplicated = vec![spec(Factor::Weather, 50.0), spec(Factor::Weather, 50.0)];
        assert!(validate_specs(&duplicated).is_err());

        let negative = vec![spec(Factor::Weather, 110.0), spec(Factor::Zone, -10.0)];
        assert!(validate_specs(&negative).is_err());
        assert!(validate_specs(&[]).is_err());
    }

    #[test]
    fn weather_fit_at_midpoint_earns_full_ceiling() {
        let rice = crop("Rice");
        let spec = FactorSpec::new(Factor::Weather, 25.0, &[Reading::Temperature]);
        let score = weather_fit(
            &spec,
            [(Reading::Temperature, &rice.ideal_temperature_c)],
            &observe(Some(27.0), None),
            CROP_TEMPERATURE_POLICY,
        );
        assert_eq!(score.points, 25.0);
        assert!(!score.defaulted);
    }

    #[test]
    fn weather_fit_averages_and_flags_defaulted_readings() {
        let temp = Range::new(20.0, 30.0);
        let humidity = Range::new(40.0, 60.0);
        let score = weather_fit(
            &spec(Factor::Weather, 25.0),
            [(Reading::Temperature, &temp), (Reading::Humidity, &humidity)],
            &observe(Some(25.0), None),
            MatchPolicy::Hard,
        );
        // temperature optimal (1.0), humidity defaults to 50 which is the midpoint (1.0)
        assert_eq!(score.points, 25.0);
        assert!(score.defaulted);
        assert!(score.justification.ends_with("(default used)"));
    }

    #[test]
    fn weather_fit_without_requirements_is_neutral() {
        let score = weather_fit(
            &spec(Factor::Weather, 25.0),
            std::iter::empty(),
            &observe(Some(25.0), Some(50.0)),
            MatchPolicy::Hard,
        );
        assert_eq!(score.points, 12.5);
        assert!(!score.points.is_nan());
    }

    #[test]
    fn crop_relevance_is_tiered_by_overlap() {
        let spec = spec(Factor::CropRelevance, 30.0);
        let affected = strings(&["Cotton", "Tomato", "Okra"]);

        let none = crop_relevance(&spec, &affected, &strings(&["Rice"]));
        assert_eq!(none.points, 5.0);

        let one = crop_relevance(&spec, &affected, &strings(&["Cotton", "Rice"]));
        assert_eq!(one.points, 20.0);
        assert_eq!(one.justification, "20/30 - 1 zone crop at risk");

        let many = crop_relevance(&spec, &affected, &strings(&["cotton", "Okra (Lady Finger)"]));
        assert_eq!(many.points, 30.0);

        let unknown = crop_relevance(&spec, &affected, &[]);
        assert_eq!(unknown.points, 15.0);
        assert!(unknown.defaulted);
    }

    #[test]
    fn seasonal_and_regional_defaults_are_half_ceiling() {
        let season = seasonal_timing(&spec(Factor::Season, 25.0), None, Some(9));
        assert_eq!(season.points, 12.5);
        assert!(season.defaulted);

        let active = seasonal_timing(&spec(Factor::Season, 25.0), Some(Season::Kharif), Some(10));
        assert_eq!(active.points, 25.0);

        let zone = regional_priority(&spec(Factor::Zone, 20.0), None, Some(10));
        assert_eq!(zone.points, 10.0);
        assert!(zone.defaulted);

        let unlisted = regional_priority(&spec(Factor::Zone, 20.0), Some("Konkan"), None);
        assert_eq!(unlisted.points, 0.0);
        assert!(!unlisted.defaulted);
    }

    #[test]
    fn soil_and_irrigation_follow_crop_requirements() {
        let cotton = crop("Cotton");
        let rice = crop("Rice");
        assert!(soil_matches(&cotton, SoilType::BlackCotton));
        assert!(!soil_matches(&cotton, SoilType::ForestLoam));

        let soil =
            soil_compatibility(&spec(Factor::Soil, 20.0), &cotton, Some(SoilType::ForestLoam));
        assert_eq!(soil.points, 4.0);

        assert!(irrigation_suits(&rice, IrrigationMethod::Flood));
        assert!(!irrigation_suits(&rice, IrrigationMethod::RainFed));
        assert!(irrigation_suits(&cotton, IrrigationMethod::RainFed));
        assert!(!irrigation_suits(&cotton, IrrigationMethod::Flood));
    }

    #[test]
    fn land_suitability_blocks_tiny_perennial_plots() {
        let mut mango = crop("Rice");
        mango.season = crate::types::entity::SeasonAffinity::parse("Perennial");
        let spec = spec(Factor::Land, 10.0);
        assert_eq!(land_suitability(&spec, &mango, Some(0.3)).points, 0.0);
        assert_eq!(land_suitability(&spec, &mango, Some(1.0)).points, 10.0);
        let unknown = land_suitability(&spec, &mango, None);
        assert_eq!(unknown.points, 10.0);
        assert!(unknown.defaulted);
    }

    #[test]
    fn crop_season_and_zone_weights() {
        let onion = crop("Onion");
        assert_eq!(crop_season_weight(&onion, Season::Rabi), 7);
        assert_eq!(crop_season_weight(&onion, Season::Summer), 2);
        let cotton = crop("Cotton");
        assert_eq!(crop_season_weight(&cotton, Season::Kharif), 10);
        assert_eq!(crop_zone_priority(&cotton, "marathwada", &[]), 10);
        assert_eq!(crop_zone_priority(&cotton, "Konkan", &strings(&["Cotton"])), 7);
        assert_eq!(crop_zone_priority(&cotton, "Konkan", &strings(&["Rice"])), 2);
    }
}
