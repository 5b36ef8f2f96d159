//! Irrigation need from a simplified reference evapotranspiration (ET0) estimate.

use crate::context::location::is_drought_prone;
use crate::types::entity::Reading;
use crate::types::observation::Observation;
use serde::Serialize;

/// Crop coefficient used when the crop is unknown.
pub const DEFAULT_KC: f64 = 0.9;
/// Wind speed assumed by the ET0 estimate when none was observed (m/s).
const REFERENCE_WIND: f64 = 2.0;

const CROP_COEFFICIENTS: [(&str, f64); 12] = [
    ("Rice", 1.2),
    ("Cotton", 0.9),
    ("Sugarcane", 1.2),
    ("Soybean", 0.8),
    ("Wheat", 1.0),
    ("Jowar", 0.8),
    ("Maize", 0.9),
    ("Vegetables", 0.9),
    ("Grapes", 0.7),
    ("Mango", 0.8),
    ("Onion", 0.7),
    ("Pomegranate", 0.6),
];

const GENERAL_TIPS: [&str; 3] = [
    "Use mulching to reduce evaporation",
    "Check for and repair leaks",
    "Irrigate based on soil moisture, not schedule",
];

const DROUGHT_TIPS: [&str; 3] = [
    "Adopt drip irrigation for water savings",
    "Practice deficit irrigation for drought-tolerant crops",
    "Construct farm ponds for rainwater storage",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    None,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterStress {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrrigationAdvice {
    pub crop: Option<String>,
    pub zone: Option<String>,
    pub et0_mm: f64,
    pub crop_et_mm: f64,
    pub rainfall_mm: f64,
    pub irrigation_needed: bool,
    pub urgency: Urgency,
    pub recommended_amount_mm: f64,
    pub water_stress: WaterStress,
    pub recommendations: Vec<String>,
    pub best_time: &'static str,
    pub efficiency_tips: Vec<&'static str>,
}

/// Reference evapotranspiration in mm/day, never negative.
pub fn et0(observation: &Observation) -> f64 {
    let temp = observation.get(Reading::Temperature);
    let humidity = observation.get(Reading::Humidity).clamp(0.0, 100.0);
    let wind = if observation.is_defaulted(Reading::WindSpeed) {
        REFERENCE_WIND
    } else {
        observation.get(Reading::WindSpeed)
    };

    let base = if temp < 20.0 {
        3.0
    } else if temp < 30.0 {
        5.0
    } else if temp < 35.0 {
        7.0
    } else {
        10.0
    };
    let humidity_factor = 0.7 + 0.3 * (100.0 - humidity) / 100.0;
    let wind_factor = (1.0 + (wind - REFERENCE_WIND) * 0.05).clamp(0.8, 1.3);
    (base * humidity_factor * wind_factor).max(0.0)
}

pub fn crop_coefficient(crop: Option<&str>) -> f64 {
    crop.and_then(|name| {
        CROP_COEFFICIENTS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name.trim()))
            .map(|(_, kc)| *kc)
    })
    .unwrap_or(DEFAULT_KC)
}

pub fn water_stress(et0: f64, rainfall: f64, zone: Option<&str>) -> WaterStress {
    let stress = if et0 > 8.0 && rainfall < 2.0 {
        WaterStress::High
    } else if et0 > 6.0 && rainfall < 5.0 {
        WaterStress::Moderate
    } else {
        WaterStress::Low
    };
    if stress == WaterStress::Moderate && zone.is_some_and(is_drought_prone) {
        WaterStress::High
    } else {
        stress
    }
}

pub fn best_time(temp: f64) -> &'static str {
    if temp > 35.0 {
        "Early morning (5-7 AM) or late evening (after 6 PM)"
    } else if temp > 30.0 {
        "Early morning (6-8 AM) or evening (5-7 PM)"
    } else {
        "Morning (7-9 AM) preferred"
    }
}

pub fn efficiency_tips(zone: Option<&str>) -> Vec<&'static str> {
    let mut tips = Vec::with_capacity(DROUGHT_TIPS.len() + GENERAL_TIPS.len());
    if zone.is_some_and(is_drought_prone) {
        tips.extend(DROUGHT_TIPS);
    }
    tips.extend(GENERAL_TIPS);
    tips
}

fn zone_advice(zone: &str, observation: &Observation) -> Option<String> {
    let rain = observation.get(Reading::Rainfall);
    if is_drought_prone(zone) {
        if rain > 5.0 {
            return Some(format!("{zone}: Maximize rainwater harvesting - every drop counts"));
        }
        if observation.get(Reading::Temperature) > 35.0 {
            return Some(format!(
                "{zone} drought-prone area: Critical water conservation needed"
            ));
        }
    } else if zone.eq_ignore_ascii_case("Konkan") && observation.get(Reading::Humidity) > 80.0 {
        return Some("Konkan coastal area: Monitor for waterlogging, ensure drainage".to_string());
    }
    None
}

fn method_advice(observation: &Observation) -> Option<&'static str> {
    if observation.get(Reading::WindSpeed) > 10.0 {
        Some("Strong winds: Drip irrigation preferred over sprinkler")
    } else if observation.get(Reading::Temperature) > 38.0 {
        Some("High temperature: Irrigate early morning or late evening to reduce evaporation")
    } else if observation.get(Reading::Humidity) > 85.0 {
        Some("High humidity: Reduce irrigation frequency to prevent fungal issues")
    } else {
        None
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Irrigation recommendation for one observation.
///
/// Heavy rain (> 20 mm) skips irrigation and moderate rain (> 5 mm) defers it.
/// Otherwise, when the days since the last irrigation are known, the
/// accumulated deficit decides the urgency; without them heat and ET do.
pub fn recommend(
    observation: &Observation,
    zone: Option<&str>,
    crop: Option<&str>,
    days_since_irrigation: Option<u32>,
) -> IrrigationAdvice {
    let et0 = et0(observation);
    let crop_et = et0 * crop_coefficient(crop);
    let rainfall = observation.get(Reading::Rainfall).max(0.0);
    let temp = observation.get(Reading::Temperature);
    let humidity = observation.get(Reading::Humidity);

    let mut urgency = Urgency::None;
    let mut amount = 0.0;
    let mut recommendations = Vec::new();

    if rainfall > 20.0 {
        recommendations.push("Heavy rainfall received - skip irrigation for 2-3 days".to_string());
        recommendations.push("Monitor for waterlogging".to_string());
    } else if rainfall > 5.0 {
        recommendations.push("Recent rainfall adequate - defer irrigation".to_string());
        amount = (crop_et - rainfall).max(0.0);
    } else {
        amount = crop_et;
        match days_since_irrigation.filter(|days| *days > 0) {
            Some(days) => {
                let deficit = crop_et * f64::from(days) - rainfall;
                if deficit > 50.0 {
                    urgency = Urgency::Critical;
                    amount = deficit;
                    recommendations.push(format!("Critical water deficit: {deficit:.0}mm"));
                    recommendations.push("Irrigate immediately".to_string());
                } else if deficit > 25.0 {
                    urgency = Urgency::High;
                    amount = deficit;
                    recommendations.push(format!("High water deficit: {deficit:.0}mm"));
                    recommendations.push("Irrigate within 24 hours".to_string());
                } else if deficit > 10.0 {
                    urgency = Urgency::Medium;
                    amount = deficit;
                    recommendations
                        .push("Moderate water deficit - irrigation recommended".to_string());
                }
            }
            None => {
                if temp > 35.0 && humidity < 40.0 {
                    urgency = Urgency::High;
                    recommendations
                        .push("Hot and dry conditions - increase irrigation frequency".to_string());
                } else if crop_et > 7.0 {
                    urgency = Urgency::Medium;
                    recommendations
                        .push("High evapotranspiration - regular irrigation needed".to_string());
                }
            }
        }
    }

    if let Some(advice) = zone.and_then(|zone| zone_advice(zone, observation)) {
        recommendations.push(advice);
    }
    if let Some(advice) = method_advice(observation) {
        recommendations.push(advice.to_string());
    }

    tracing::debug!(et0, crop_et, rainfall, urgency = ?urgency, "irrigation assessed");

    IrrigationAdvice {
        crop: crop.map(str::to_string),
        zone: zone.map(str::to_string),
        et0_mm: round1(et0),
        crop_et_mm: round1(crop_et),
        rainfall_mm: round1(rainfall),
        irrigation_needed: urgency != Urgency::None,
        urgency,
        recommended_amount_mm: amount.round(),
        water_stress: water_stress(et0, rainfall, zone),
        recommendations,
        best_time: best_time(temp),
        efficiency_tips: efficiency_tips(zone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::{ReadingDefaults, WeatherReading};

    fn observe(temp: f64, humidity: f64, rain: f64, wind: Option<f64>) -> Observation {
        let raw = WeatherReading {
            temp: Some(temp),
            humidity: Some(humidity),
            rain_mm: Some(rain),
            wind_speed: wind,
            ..WeatherReading::default()
        };
        Observation::normalize(&raw, &ReadingDefaults::default())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn et0_follows_temperature_bands_and_adjustments() {
        // 25 °C band 5, humidity 50 -> x0.85, reference wind -> x1.0
        assert!(close(et0(&observe(25.0, 50.0, 0.0, None)), 4.25));
        // 36 °C band 10, humidity 0 -> x1.0, wind 12 -> factor 1.5 clamped to 1.3
        assert!(close(et0(&observe(36.0, 0.0, 0.0, Some(12.0))), 13.0));
        // calm air: wind factor 0.9
        assert!(close(et0(&observe(15.0, 100.0, 0.0, Some(0.0))), 3.0 * 0.7 * 0.9));
    }

    #[test]
    fn crop_coefficient_defaults_for_unknown_crops() {
        assert_eq!(crop_coefficient(Some("rice")), 1.2);
        assert_eq!(crop_coefficient(Some("Quinoa")), DEFAULT_KC);
        assert_eq!(crop_coefficient(None), DEFAULT_KC);
    }

    #[test]
    fn heavy_rain_skips_irrigation() {
        let advice = recommend(
            &observe(28.0, 90.0, 25.0, Some(2.0)),
            Some("Konkan"),
            None,
            Some(4),
        );
        assert!(!advice.irrigation_needed);
        assert_eq!(advice.urgency, Urgency::None);
        assert_eq!(advice.recommended_amount_mm, 0.0);
        assert_eq!(
            advice.recommendations[0],
            "Heavy rainfall received - skip irrigation for 2-3 days"
        );
        assert!(advice
            .recommendations
            .iter()
            .any(|line| line.starts_with("Konkan coastal area")));
    }

    #[test]
    fn deficit_drives_urgency_when_last_irrigation_is_known() {
        // 32 °C, humidity 40, reference wind: et0 = 7 x 0.88 = 6.16; rice kc 1.2 -> 7.392/day
        let observation = observe(32.0, 40.0, 0.0, None);
        let critical = recommend(&observation, Some("Marathwada"), Some("Rice"), Some(7));
        assert_eq!(critical.urgency, Urgency::Critical);
        assert_eq!(critical.recommended_amount_mm, 52.0);
        assert_eq!(critical.recommendations[0], "Critical water deficit: 52mm");

        let high = recommend(&observation, None, Some("Rice"), Some(4));
        assert_eq!(high.urgency, Urgency::High);

        let medium = recommend(&observation, None, Some("Rice"), Some(2));
        assert_eq!(medium.urgency, Urgency::Medium);

        let none = recommend(&observation, None, Some("Rice"), Some(1));
        assert_eq!(none.urgency, Urgency::None);
        assert!(!none.irrigation_needed);
    }

    #[test]
    fn hot_dry_weather_without_history_is_high_urgency() {
        let advice = recommend(
            &observe(37.0, 30.0, 0.0, Some(3.0)),
            Some("Marathwada"),
            None,
            None,
        );
        assert_eq!(advice.urgency, Urgency::High);
        assert!(advice.recommendations.contains(
            &"Marathwada drought-prone area: Critical water conservation needed".to_string()
        ));
        assert_eq!(advice.best_time, "Early morning (5-7 AM) or late evening (after 6 PM)");
        assert_eq!(advice.efficiency_tips.len(), 6);
        assert_eq!(advice.water_stress, WaterStress::High);
    }

    #[test]
    fn moderate_stress_escalates_in_drought_prone_zones() {
        assert_eq!(water_stress(7.0, 0.0, Some("Konkan")), WaterStress::Moderate);
        assert_eq!(water_stress(7.0, 0.0, Some("Vidarbha")), WaterStress::High);
        assert_eq!(water_stress(4.0, 0.0, Some("Vidarbha")), WaterStress::Low);
    }
}
