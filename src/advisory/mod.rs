pub mod alerts;
pub mod irrigation;
pub mod operations;
pub mod pest_report;

use crate::error::{AdvisorError, Result};
use crate::reference::ReferenceStore;
use crate::scoring::aggregate;
use crate::scoring::factors::{
    self, CROP_TEMPERATURE_POLICY, CROP_TEMPERATURE_TOLERANCE_C, PEST_WEATHER_POLICY,
};
use crate::scoring::matcher::all_within;
use crate::types::config::AdvisorConfig;
use crate::types::entity::{Crop, CropCategory, Pest, Reading, RiskLevel, SeasonMatch};
use crate::types::observation::{AdvisoryContext, Observation};
use crate::types::scoring::{
    AlertLevel, Factor, FactorScore, FactorSpec, ScoreResult, SuitabilityRating,
};
use pest_report::PestReport;
use serde::Serialize;
use std::collections::BTreeMap;

/// Shown in place of recommendations when there are no crops to score.
pub const EMPTY_POOL_NOTE: &str = "No crop data available for scoring. As a general guide, \
prefer crops commonly grown in your zone for the current season and consult the local \
agricultural extension office.";

const CROP_FACTORS: [Factor; 6] = [
    Factor::Weather,
    Factor::Soil,
    Factor::Irrigation,
    Factor::Season,
    Factor::Zone,
    Factor::Land,
];

#[derive(Debug, Clone, Serialize)]
pub struct CropRecommendation {
    #[serde(flatten)]
    pub score: ScoreResult<SuitabilityRating>,
    pub category: CropCategory,
    pub season: String,
    pub varieties: Vec<String>,
    pub cultivation_tips: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CropAdvisory {
    pub context: AdvisoryContext,
    pub observation: Observation,
    pub recommendations: Vec<CropRecommendation>,
    pub limited_data: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PestAlert {
    #[serde(flatten)]
    pub score: ScoreResult<AlertLevel>,
    pub name: String,
    pub icon: String,
    pub risk_level: RiskLevel,
    pub description: String,
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PestAdvisory {
    pub context: AdvisoryContext,
    pub observation: Observation,
    pub alerts: Vec<PestAlert>,
    pub report: PestReport,
    pub limited_data: bool,
}

impl PestAdvisory {
    pub fn has_critical(&self) -> bool {
        self.alerts
            .iter()
            .any(|alert| alert.score.rating == AlertLevel::Critical)
    }
}

/// Scores crops and pests against one observation. Holds no mutable state, so
/// one advisor can serve any number of requests.
#[derive(Debug, Clone)]
pub struct Advisor<'a> {
    store: &'a ReferenceStore,
    crop_specs: Vec<FactorSpec>,
    pest_specs: Vec<FactorSpec>,
    top_n: usize,
}

impl<'a> Advisor<'a> {
    /// Build an advisor, validating both factor tables.
    pub fn new(store: &'a ReferenceStore, config: &AdvisorConfig) -> Result<Self> {
        let crop_specs = config.crop_factor_specs();
        let pest_specs = factors::pest_factor_specs();
        factors::validate_specs(&crop_specs)?;
        factors::validate_specs(&pest_specs)?;
        if let Some(spec) = crop_specs
            .iter()
            .find(|spec| !CROP_FACTORS.contains(&spec.factor))
        {
            return Err(AdvisorError::InvalidFactorSpec(format!(
                "{} is not a crop factor",
                spec.factor
            )));
        }
        Ok(Self {
            store,
            crop_specs,
            pest_specs,
            top_n: config.top_n(),
        })
    }

    pub fn store(&self) -> &ReferenceStore {
        self.store
    }

    /// Top crops for the observation, ranked and diversity-filtered.
    pub fn score_crops(
        &self,
        observation: &Observation,
        context: &AdvisoryContext,
    ) -> Vec<ScoreResult<SuitabilityRating>> {
        self.ranked_crops(observation, context)
            .into_iter()
            .map(|(_, result)| result)
            .collect()
    }

    /// Pests whose conditions all hold, most relevant first.
    pub fn score_pests(
        &self,
        observation: &Observation,
        context: &AdvisoryContext,
    ) -> Vec<ScoreResult<AlertLevel>> {
        self.ranked_pests(observation, context)
            .into_iter()
            .map(|(_, result)| result)
            .collect()
    }

    pub fn crop_advisory(
        &self,
        observation: &Observation,
        context: &AdvisoryContext,
    ) -> CropAdvisory {
        let recommendations = self
            .ranked_crops(observation, context)
            .into_iter()
            .map(|(crop, score)| CropRecommendation {
                score,
                category: crop.category,
                season: crop.season.label.clone(),
                varieties: crop.varieties.clone(),
                cultivation_tips: crop.cultivation_tips.clone(),
            })
            .collect::<Vec<_>>();

        let note = if self.store.crops().is_empty() {
            Some(EMPTY_POOL_NOTE.to_string())
        } else {
            None
        };

        CropAdvisory {
            context: context.clone(),
            observation: observation.clone(),
            recommendations,
            limited_data: self.store.is_degraded(),
            note,
        }
    }

    pub fn pest_advisory(
        &self,
        observation: &Observation,
        context: &AdvisoryContext,
    ) -> PestAdvisory {
        let ranked = self.ranked_pests(observation, context);
        let detected = ranked.iter().map(|(pest, _)| *pest).collect::<Vec<_>>();
        let report = pest_report::build(&detected);
        let alerts = ranked
            .into_iter()
            .map(|(pest, score)| PestAlert {
                score,
                name: pest.name.clone(),
                icon: pest.icon.clone(),
                risk_level: pest.risk_level,
                description: pest.description.clone(),
                symptoms: pest.symptoms.clone(),
            })
            .collect();

        PestAdvisory {
            context: context.clone(),
            observation: observation.clone(),
            alerts,
            report,
            limited_data: self.store.is_degraded(),
        }
    }

    fn ranked_crops(
        &self,
        observation: &Observation,
        context: &AdvisoryContext,
    ) -> Vec<(&'a Crop, ScoreResult<SuitabilityRating>)> {
        let mut scored = self
            .store
            .crops()
            .iter()
            .map(|crop| (crop, self.score_crop(crop, observation, context)))
            .collect::<Vec<_>>();
        aggregate::rank_by(&mut scored, |(_, result)| result.total_score);
        diversify(scored, |(crop, _)| crop.category, self.top_n)
    }

    fn ranked_pests(
        &self,
        observation: &Observation,
        context: &AdvisoryContext,
    ) -> Vec<(&'a Pest, ScoreResult<AlertLevel>)> {
        let mut scored = self
            .store
            .pests()
            .iter()
            .filter(|pest| conditions_hold(pest, observation))
            .map(|pest| (pest, self.score_pest(pest, observation, context)))
            .collect::<Vec<_>>();
        aggregate::rank_by(&mut scored, |(_, result)| result.total_score);
        scored
    }

    fn score_crop(
        &self,
        crop: &Crop,
        observation: &Observation,
        context: &AdvisoryContext,
    ) -> ScoreResult<SuitabilityRating> {
        let zone = context.zone.as_deref();
        let sub_scores = self
            .crop_specs
            .iter()
            .map(|spec| match spec.factor {
                Factor::Weather => factors::weather_fit(
                    spec,
                    [(Reading::Temperature, &crop.ideal_temperature_c)],
                    observation,
                    CROP_TEMPERATURE_POLICY,
                ),
                Factor::Soil => factors::soil_compatibility(spec, crop, context.soil_type),
                Factor::Irrigation => {
                    factors::irrigation_compatibility(spec, crop, context.irrigation)
                }
                Factor::Season => factors::seasonal_timing(
                    spec,
                    context.season,
                    context
                        .season
                        .map(|season| factors::crop_season_weight(crop, season)),
                ),
                Factor::Zone => factors::regional_priority(
                    spec,
                    zone,
                    zone.map(|zone| factors::crop_zone_priority(crop, zone, &context.zone_crops)),
                ),
                Factor::Land => factors::land_suitability(spec, crop, context.land_size_acres),
                Factor::CropRelevance => factors::neutral(spec, "not scored for crops"),
            })
            .collect::<Vec<_>>();

        let reasons = crop_reasons(crop, observation, context);
        let result = aggregate::assemble(&crop.name, sub_scores, reasons);
        tracing::debug!(
            crop = %crop.name,
            score = result.total_score,
            rating = %result.rating,
            "crop scored"
        );
        result
    }

    fn score_pest(
        &self,
        pest: &Pest,
        observation: &Observation,
        context: &AdvisoryContext,
    ) -> ScoreResult<AlertLevel> {
        let priorities = context
            .zone
            .as_deref()
            .and_then(|zone| self.store.zone_priorities(zone));
        let sub_scores = self
            .pest_specs
            .iter()
            .map(|spec| match spec.factor {
                Factor::Weather => factors::weather_fit(
                    spec,
                    pest.conditions.iter().map(|(reading, range)| (*reading, range)),
                    observation,
                    PEST_WEATHER_POLICY,
                ),
                Factor::CropRelevance => {
                    factors::crop_relevance(spec, &pest.affected_crops, &context.zone_crops)
                }
                Factor::Season => factors::seasonal_timing(
                    spec,
                    context.season,
                    context
                        .season
                        .and_then(|season| pest.seasonal_activity.get(&season).copied()),
                ),
                Factor::Zone => factors::regional_priority(
                    spec,
                    priorities.and(context.zone.as_deref()),
                    priorities.and_then(|table| table.get(&pest.key).copied()),
                ),
                _ => factors::neutral(spec, "not scored for pests"),
            })
            .collect::<Vec<_>>();

        let reasons = pest_reasons(pest, &sub_scores, context, priorities);
        let result = aggregate::assemble(&pest.key, sub_scores, reasons);
        tracing::debug!(
            pest = %pest.key,
            score = result.total_score,
            alert = %result.rating,
            "pest scored"
        );
        result
    }
}

/// Every reference condition of the pest holds for the observation.
pub fn conditions_hold(pest: &Pest, observation: &Observation) -> bool {
    all_within(
        pest.conditions
            .iter()
            .map(|(reading, range)| (observation.get(*reading), range)),
    )
}

/// Two-pass category-capped selection over an already ranked list.
///
/// The first pass admits items in rank order while their category is under its
/// cap; the second fills the remaining slots in rank order regardless of category.
pub fn diversify<T>(
    ranked: Vec<T>,
    category_of: impl Fn(&T) -> CropCategory,
    top_n: usize,
) -> Vec<T> {
    let mut taken = vec![false; ranked.len()];
    let mut order = Vec::with_capacity(top_n.min(ranked.len()));
    let mut counts: BTreeMap<CropCategory, usize> = BTreeMap::new();

    for (index, item) in ranked.iter().enumerate() {
        if order.len() >= top_n {
            break;
        }
        let category = category_of(item);
        let count = counts.entry(category).or_insert(0);
        if *count < category.cap() {
            *count += 1;
            taken[index] = true;
            order.push(index);
        }
    }
    for (index, already) in taken.iter_mut().enumerate() {
        if order.len() >= top_n {
            break;
        }
        if !*already {
            *already = true;
            order.push(index);
        }
    }

    let mut slots = ranked.into_iter().map(Some).collect::<Vec<_>>();
    order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

fn crop_reasons(crop: &Crop, observation: &Observation, context: &AdvisoryContext) -> Vec<String> {
    let mut reasons = Vec::new();

    let temp = observation.get(Reading::Temperature);
    let range = &crop.ideal_temperature_c;
    let deviation = range.distance_outside(temp);
    let reason = if observation.is_defaulted(Reading::Temperature) {
        "Temperature data unavailable, default used".to_string()
    } else if deviation == 0.0 && (temp - range.midpoint()).abs() <= 3.0 {
        format!("Perfect temperature match ({temp:.1}°C)")
    } else if deviation == 0.0 {
        format!(
            "Good temperature range ({temp:.1}°C within {:.0}-{:.0}°C)",
            range.min, range.max
        )
    } else if deviation < CROP_TEMPERATURE_TOLERANCE_C {
        format!("Acceptable temperature ({deviation:.1}°C outside ideal range)")
    } else {
        format!("Temperature challenge - consider timing ({deviation:.1}°C outside ideal range)")
    };
    reasons.push(reason);

    if let Some(soil) = context.soil_type {
        reasons.push(if factors::soil_matches(crop, soil) {
            "Excellent soil compatibility".to_string()
        } else {
            "Moderate soil compatibility".to_string()
        });
    }

    if let Some(method) = context.irrigation {
        reasons.push(if factors::irrigation_suits(crop, method) {
            "Suitable for your irrigation method".to_string()
        } else {
            "May need irrigation adjustments".to_string()
        });
    }

    if let Some(season) = context.season {
        reasons.push(
            match crop.season.matches(season) {
                SeasonMatch::Exact => "Perfect seasonal timing",
                SeasonMatch::Partial => "Good seasonal match",
                SeasonMatch::None => "Consider for next season",
            }
            .to_string(),
        );
    }

    if let Some(zone) = context.zone.as_deref() {
        reasons.push(match factors::crop_zone_priority(crop, zone, &context.zone_crops) {
            10 => format!("Recommended for {zone}"),
            7 => format!("Commonly grown in {zone}"),
            _ => format!("Not typical for {zone}"),
        });
    }

    if let Some(acres) = context.land_size_acres {
        reasons.push(
            factors::land_advice(crop, acres)
                .unwrap_or("Consider smaller crops for limited space")
                .to_string(),
        );
    }

    reasons
}

fn pest_reasons(
    pest: &Pest,
    sub_scores: &[FactorScore],
    context: &AdvisoryContext,
    priorities: Option<&BTreeMap<String, u8>>,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(weather) = sub_scores.iter().find(|score| score.factor == Factor::Weather) {
        reasons.push(format!(
            "Weather conditions favor {} ({:.0}% optimal)",
            pest.name,
            weather.ratio() * 100.0
        ));
    }

    if !context.zone_crops.is_empty() {
        let matched = factors::matching_crops(&pest.affected_crops, &context.zone_crops);
        reasons.push(if matched.is_empty() {
            "No major zone crops affected".to_string()
        } else {
            format!("Threatens zone crops: {}", matched.join(", "))
        });
    }

    if let Some(season) = context.season {
        match pest.seasonal_activity.get(&season).copied() {
            Some(weight) if weight >= 8 => reasons.push(format!("High {season} season activity")),
            Some(weight) if weight <= 4 => reasons.push(format!("Low {season} season activity")),
            _ => {}
        }
    }

    if let (Some(zone), Some(table)) = (context.zone.as_deref(), priorities) {
        reasons.push(match table.get(&pest.key).copied() {
            Some(priority) if priority >= 8 => format!("Priority pest in {zone}"),
            Some(_) => format!("Known pest in {zone}"),
            None => format!("Not a priority pest in {zone}"),
        });
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::location;
    use crate::types::entity::{IrrigationMethod, Range, Season, SeasonAffinity, SoilType};
    use crate::types::observation::{ReadingDefaults, WeatherReading};

    fn observe(raw: WeatherReading) -> Observation {
        Observation::normalize(&raw, &ReadingDefaults::default())
    }

    fn weather(temp: f64, humidity: f64) -> WeatherReading {
        WeatherReading {
            temp: Some(temp),
            humidity: Some(humidity),
            rain_mm: Some(0.0),
            wind_speed: Some(3.0),
            cloud_cover_pct: Some(40.0),
            pressure_hpa: Some(1010.0),
        }
    }

    fn context_for(store: &ReferenceStore, zone: &str, season: Season) -> AdvisoryContext {
        AdvisoryContext {
            zone: Some(zone.to_string()),
            season: Some(season),
            zone_crops: location::zone_crops(store, zone),
            ..AdvisoryContext::default()
        }
    }

    fn synthetic_crop(name: &str, category: CropCategory) -> Crop {
        Crop {
            name: name.to_string(),
            varieties: Vec::new(),
            season: SeasonAffinity::parse("Kharif"),
            ideal_temperature_c: Range::new(20.0, 30.0),
            rainfall_requirement_mm: Range::new(500.0, 800.0),
            best_soil_types: Vec::new(),
            agroclimatic_zones: Vec::new(),
            cultivation_tips: None,
            category,
        }
    }

    #[test]
    fn rice_at_midpoint_gets_full_weather_score() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let results =
            advisor.score_crops(&observe(weather(27.0, 70.0)), &AdvisoryContext::default());
        let rice = results
            .iter()
            .find(|result| result.entity_id == "Rice")
            .expect("rice should be scored");
        let weather = rice.sub_score(Factor::Weather).expect("weather sub-score");
        assert_eq!(weather.points, 25.0);
    }

    #[test]
    fn cotton_in_marathwada_kharif_heat_is_good_or_better() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let mut context = context_for(&store, "Marathwada", Season::Kharif);
        context.soil_type = Some(SoilType::BlackCotton);
        let results = advisor.score_crops(&observe(weather(40.0, 20.0)), &context);
        let cotton = results
            .iter()
            .find(|result| result.entity_id == "Cotton")
            .expect("cotton should be scored");
        assert!(cotton.total_score >= 55, "cotton scored {}", cotton.total_score);
        assert!(matches!(
            cotton.rating,
            SuitabilityRating::Good | SuitabilityRating::VeryGood | SuitabilityRating::Excellent
        ));
        assert!(cotton.reasons.contains(&"Recommended for Marathwada".to_string()));
    }

    #[test]
    fn scoring_is_deterministic() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let context = context_for(&store, "Konkan", Season::Kharif);
        let observation = observe(WeatherReading {
            temp: Some(27.0),
            humidity: Some(90.0),
            rain_mm: Some(12.0),
            cloud_cover_pct: Some(85.0),
            wind_speed: Some(2.0),
            pressure_hpa: None,
        });
        assert_eq!(
            advisor.score_crops(&observation, &context),
            advisor.score_crops(&observation, &context)
        );
        assert_eq!(
            advisor.score_pests(&observation, &context),
            advisor.score_pests(&observation, &context)
        );
    }

    #[test]
    fn totals_stay_within_bounds_across_extreme_observations() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let context = context_for(&store, "Vidarbha", Season::Summer);
        for temp in [-40.0, 0.0, 25.0, 45.0, 60.0] {
            for humidity in [0.0, 50.0, 100.0] {
                let observation = observe(weather(temp, humidity));
                for result in advisor.score_crops(&observation, &context) {
                    assert!(result.total_score <= 100);
                    assert!(result.sub_scores.iter().all(|score| score.points.is_finite()));
                }
                for result in advisor.score_pests(&observation, &context) {
                    assert!(result.total_score <= 100);
                }
            }
        }
    }

    #[test]
    fn missing_humidity_uses_default_and_is_flagged() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let observation = observe(WeatherReading {
            temp: Some(25.0),
            cloud_cover_pct: Some(60.0),
            wind_speed: Some(4.0),
            ..WeatherReading::default()
        });
        let pests = advisor.score_pests(&observation, &AdvisoryContext::default());
        let aphids = pests
            .iter()
            .find(|result| result.entity_id == "aphids")
            .expect("aphids should match at default humidity");
        let weather = aphids.sub_score(Factor::Weather).expect("weather sub-score");
        assert!(weather.defaulted);
        assert!(weather.justification.contains("(default used)"));
        assert!(weather.points.is_finite());
    }

    #[test]
    fn pests_outside_their_conditions_are_not_returned() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        // hot and dry: stem borer needs humidity >= 60
        let observation = observe(weather(38.0, 20.0));
        let pests = advisor.score_pests(&observation, &AdvisoryContext::default());
        assert!(pests.iter().all(|result| result.entity_id != "stem_borer"));
        assert!(pests.iter().any(|result| result.entity_id == "spider_mites"));
        for pest in store.pests() {
            let returned = pests.iter().any(|result| result.entity_id == pest.key);
            assert_eq!(returned, conditions_hold(pest, &observation), "{}", pest.key);
        }
    }

    #[test]
    fn pest_scores_follow_zone_and_season_tables() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let context = context_for(&store, "Marathwada", Season::Summer);
        // spider mites: 25-45 °C, humidity <= 60, clouds <= 40, wind <= 20
        let observation = observe(weather(35.0, 30.0));
        let pests = advisor.score_pests(&observation, &context);
        let mites = pests
            .iter()
            .find(|result| result.entity_id == "spider_mites")
            .expect("spider mites should match");
        assert_eq!(mites.sub_score(Factor::Season).map(|s| s.points), Some(25.0));
        assert_eq!(mites.sub_score(Factor::Zone).map(|s| s.points), Some(8.0));
        // only Cotton overlaps the Marathwada crop list
        assert_eq!(mites.sub_score(Factor::CropRelevance).map(|s| s.points), Some(20.0));
        assert!(mites.reasons.iter().any(|reason| reason.starts_with("Threatens zone crops")));
    }

    #[test]
    fn unknown_context_uses_neutral_defaults() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let observation = observe(weather(25.0, 70.0));
        let pests = advisor.score_pests(&observation, &AdvisoryContext::default());
        let aphids = pests
            .iter()
            .find(|result| result.entity_id == "aphids")
            .expect("aphids should match");
        assert_eq!(aphids.sub_score(Factor::CropRelevance).map(|s| s.points), Some(15.0));
        assert_eq!(aphids.sub_score(Factor::Season).map(|s| s.points), Some(12.5));
        assert_eq!(aphids.sub_score(Factor::Zone).map(|s| s.points), Some(10.0));
    }

    #[test]
    fn zone_without_priority_table_is_neutral() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let context = AdvisoryContext {
            zone: Some("Central Vidarbha".to_string()),
            ..AdvisoryContext::default()
        };
        let pests = advisor.score_pests(&observe(weather(25.0, 70.0)), &context);
        let first = pests.first().expect("at least one pest should match");
        assert_eq!(first.sub_score(Factor::Zone).map(|s| s.points), Some(10.0));
    }

    #[test]
    fn diversity_filter_caps_categories_then_fills() {
        let mut crops = Vec::new();
        for index in 0..5 {
            crops.push(synthetic_crop(&format!("Veg{index}"), CropCategory::Vegetables));
        }
        for index in 0..3 {
            crops.push(synthetic_crop(&format!("Cereal{index}"), CropCategory::Cereals));
        }
        crops.push(synthetic_crop("Fruit0", CropCategory::Fruits));

        let selected = diversify(crops.clone(), |crop| crop.category, 8);
        let names = selected.iter().map(|crop| crop.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["Veg0", "Veg1", "Veg2", "Cereal0", "Cereal1", "Fruit0", "Veg3", "Veg4"]
        );

        let capped = diversify(crops, |crop| crop.category, 6);
        let vegetables = capped
            .iter()
            .filter(|crop| crop.category == CropCategory::Vegetables)
            .count();
        assert_eq!(vegetables, 3);
        assert_eq!(capped.len(), 6);
    }

    #[test]
    fn top_n_limits_crop_list() {
        let store = ReferenceStore::builtin();
        let config: AdvisorConfig = toml::from_str("[advisor]\ntop_n = 3").expect("config");
        let advisor = Advisor::new(&store, &config).expect("advisor");
        let results =
            advisor.score_crops(&observe(weather(25.0, 60.0)), &AdvisoryContext::default());
        assert_eq!(results.len(), 3);
        assert!(results
            .windows(2)
            .all(|pair| pair[0].total_score >= pair[1].total_score));
    }

    #[test]
    fn empty_crop_table_yields_empty_list_and_note() {
        let store = ReferenceStore::new(Vec::new(), Vec::new());
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let observation = observe(weather(25.0, 60.0));
        assert!(advisor.score_crops(&observation, &AdvisoryContext::default()).is_empty());
        let advisory = advisor.crop_advisory(&observation, &AdvisoryContext::default());
        assert!(advisory.recommendations.is_empty());
        assert_eq!(advisory.note.as_deref(), Some(EMPTY_POOL_NOTE));
        assert!(advisor.score_pests(&observation, &AdvisoryContext::default()).is_empty());
    }

    #[test]
    fn crop_reasons_describe_context() {
        let store = ReferenceStore::builtin();
        let advisor = Advisor::new(&store, &AdvisorConfig::default()).expect("advisor");
        let context = AdvisoryContext {
            soil_type: Some(SoilType::Alluvial),
            irrigation: Some(IrrigationMethod::RainFed),
            season: Some(Season::Rabi),
            land_size_acres: Some(2.0),
            ..AdvisoryContext::default()
        };
        let advisory = advisor.crop_advisory(&observe(weather(17.5, 60.0)), &context);
        let wheat = advisory
            .recommendations
            .iter()
            .find(|rec| rec.score.entity_id == "Wheat")
            .expect("wheat should be recommended");
        assert_eq!(
            wheat.score.reasons,
            vec![
                "Perfect temperature match (17.5°C)",
                "Excellent soil compatibility",
                "Suitable for your irrigation method",
                "Perfect seasonal timing",
                "Suitable for small commercial farming",
            ]
        );
        assert!(!advisory.limited_data);
    }

    #[test]
    fn invalid_crop_weights_are_rejected() {
        let store = ReferenceStore::builtin();
        let mut config = AdvisorConfig::default();
        config.crop_weights = Some([("weather".to_string(), 45.0)].into_iter().collect());
        assert!(matches!(
            Advisor::new(&store, &config),
            Err(AdvisorError::InvalidFactorSpec(_))
        ));
    }

    #[test]
    fn pressure_conditions_count_toward_weather_fit() {
        let pest: Pest = serde_json::from_str(
            r#"{"key": "low_pressure_mite", "name": "Low Pressure Mite",
                "conditions": {"pressure": {"min": 1000.0, "max": 1020.0}},
                "risk_level": "moderate"}"#,
        )
        .expect("pest record should parse");
        let store = ReferenceStore::new(Vec::new(), vec![pest]);
        let advisor =
            Advisor::new(&store, &AdvisorConfig::default()).expect("config should be valid");

        let weather_points = |pressure: f64| {
            let raw = WeatherReading {
                pressure_hpa: Some(pressure),
                ..weather(25.0, 50.0)
            };
            let results = advisor.score_pests(&observe(raw), &AdvisoryContext::default());
            results[0]
                .sub_score(Factor::Weather)
                .cloned()
                .expect("weather should be scored")
        };

        let edge = weather_points(1001.0);
        assert!((edge.points - 2.5).abs() < 1e-9);
        assert!(!edge.defaulted);
        assert_eq!(weather_points(1010.0).points, 25.0);
        assert!(advisor
            .score_pests(
                &observe(WeatherReading {
                    pressure_hpa: Some(990.0),
                    ..weather(25.0, 50.0)
                }),
                &AdvisoryContext::default()
            )
            .is_empty());
    }
}
