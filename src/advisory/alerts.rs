//! Regional weather alerts: heat and cold waves, heavy rain, drought, wind,
//! humidity, unseasonal rain and zone-specific crop stress.

use crate::context::location::is_drought_prone;
use crate::types::entity::Reading;
use crate::types::observation::Observation;
use serde::Serialize;

const HEATWAVE_MODERATE_C: f64 = 40.0;
const HEATWAVE_SEVERE_C: f64 = 43.0;
const HEATWAVE_EXTREME_C: f64 = 45.0;
const COLD_WAVE_MODERATE_C: f64 = 10.0;
const COLD_WAVE_SEVERE_C: f64 = 5.0;
const RAIN_HEAVY_MM: f64 = 30.0;
const RAIN_VERY_HEAVY_MM: f64 = 50.0;
const RAIN_EXTREME_MM: f64 = 100.0;
const WIND_VERY_STRONG: f64 = 15.0;
const WIND_DAMAGING: f64 = 20.0;
const HUMIDITY_VERY_LOW: f64 = 20.0;
const HUMIDITY_VERY_HIGH: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Heatwave,
    ColdWave,
    ExtremeRainfall,
    HeavyRainfall,
    FloodRisk,
    DroughtRisk,
    DroughtStress,
    StrongWind,
    HighHumidity,
    LowHumidity,
    UnseasonalRain,
    CoastalWind,
    CottonHeat,
    SugarcaneStress,
}

/// Ordered most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Moderate,
}

impl Severity {
    /// 1 is the most urgent.
    pub fn priority(self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::High => 2,
            Self::Moderate => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Moderate => "moderate",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub priority: u8,
    pub icon: &'static str,
    pub title: String,
    pub message: String,
    pub recommendations: Vec<&'static str>,
    pub affected_zones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_concern: Option<&'static str>,
}

/// Alerts raised for one observation, most urgent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlerts {
    pub zone: Option<String>,
    pub month: u32,
    pub observation: Observation,
    pub alerts: Vec<WeatherAlert>,
}

impl WeatherAlerts {
    pub fn has_critical(&self) -> bool {
        self.alerts
            .iter()
            .any(|alert| alert.severity == Severity::Critical)
    }
}

struct AlertBuilder<'a> {
    zone: Option<&'a str>,
    alerts: Vec<WeatherAlert>,
}

impl AlertBuilder<'_> {
    fn zones(&self) -> Vec<String> {
        vec![self.zone.unwrap_or("General").to_string()]
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        kind: AlertKind,
        severity: Severity,
        icon: &'static str,
        title: impl Into<String>,
        message: String,
        recommendations: &[&'static str],
        affected_zones: Vec<String>,
        special_concern: Option<&'static str>,
    ) {
        self.alerts.push(WeatherAlert {
            kind,
            severity,
            priority: severity.priority(),
            icon,
            title: title.into(),
            message,
            recommendations: recommendations.to_vec(),
            affected_zones,
            special_concern,
        });
    }
}

/// Reading value, or `None` when it was filled in from defaults.
fn observed(observation: &Observation, reading: Reading) -> Option<f64> {
    (!observation.is_defaulted(reading)).then(|| observation.get(reading))
}

/// Evaluate every alert rule for `observation` in `zone` during calendar `month`.
///
/// Readings that were not observed never raise an alert on their own. Alerts
/// are deduplicated by kind (first one wins) and sorted by severity.
pub fn generate(observation: &Observation, zone: Option<&str>, month: u32) -> WeatherAlerts {
    let mut builder = AlertBuilder {
        zone,
        alerts: Vec::new(),
    };
    let temp = observed(observation, Reading::Temperature);
    let humidity = observed(observation, Reading::Humidity);
    let wind = observed(observation, Reading::WindSpeed);
    let rain = observed(observation, Reading::Rainfall);

    if let Some(temp) = temp {
        temperature_alerts(&mut builder, temp);
    }
    if let Some(rain) = rain {
        rainfall_alerts(&mut builder, rain);
    }
    drought_alerts(
        &mut builder,
        month,
        temp,
        humidity,
        observation.get(Reading::Rainfall),
    );
    if let Some(wind) = wind {
        wind_alerts(&mut builder, wind);
    }
    if let Some(humidity) = humidity {
        humidity_alerts(&mut builder, humidity);
    }
    if let Some(rain) = rain {
        unseasonal_rain_alert(&mut builder, month, rain);
    }
    zone_alerts(&mut builder, temp, humidity, wind);

    let alerts = prioritize(builder.alerts);
    tracing::debug!(count = alerts.len(), zone, month, "weather alerts evaluated");
    WeatherAlerts {
        zone: zone.map(str::to_string),
        month,
        observation: observation.clone(),
        alerts,
    }
}

fn temperature_alerts(builder: &mut AlertBuilder<'_>, temp: f64) {
    let zones = builder.zones();
    if temp >= HEATWAVE_EXTREME_C {
        builder.push(
            AlertKind::Heatwave,
            Severity::Critical,
            "🔥",
            "EXTREME HEATWAVE",
            format!("Extreme heat at {temp:.1}°C - Dangerous for crops and livestock"),
            &[
                "Avoid all field operations during midday (11 AM - 4 PM)",
                "Emergency irrigation for all crops",
                "Provide shade and water for livestock",
                "Monitor for heat stress symptoms",
                "Check vulnerable crops hourly",
            ],
            vec!["All zones - Critical".to_string()],
            None,
        );
    } else if temp >= HEATWAVE_SEVERE_C {
        builder.push(
            AlertKind::Heatwave,
            Severity::High,
            "🌡️",
            "Severe Heatwave",
            format!("Severe heat at {temp:.1}°C"),
            &[
                "Increase irrigation frequency by 50%",
                "Work only during early morning and evening",
                "Protect sensitive crops with shade nets",
                "Monitor crop water stress",
            ],
            zones,
            None,
        );
    } else if temp >= HEATWAVE_MODERATE_C {
        builder.push(
            AlertKind::Heatwave,
            Severity::Moderate,
            "☀️",
            "Moderate Heatwave",
            format!("High temperature {temp:.1}°C"),
            &[
                "Increase irrigation",
                "Avoid spraying during hot hours",
                "Monitor for spider mites and heat stress",
            ],
            zones,
            None,
        );
    } else if temp <= COLD_WAVE_SEVERE_C {
        builder.push(
            AlertKind::ColdWave,
            Severity::High,
            "❄️",
            "Severe Cold Wave",
            format!("Extremely low temperature {temp:.1}°C"),
            &[
                "Protect vegetables and seedlings",
                "Delay irrigation if frost risk",
                "Cover sensitive crops",
                "Protect livestock from cold",
            ],
            zones,
            None,
        );
    } else if temp <= COLD_WAVE_MODERATE_C {
        builder.push(
            AlertKind::ColdWave,
            Severity::Moderate,
            "🌡️",
            "Cold Wave",
            format!("Low temperature {temp:.1}°C"),
            &[
                "Monitor for frost damage",
                "Protect sensitive crops",
                "Adjust irrigation schedule",
            ],
            zones,
            None,
        );
    }
}

fn rainfall_alerts(builder: &mut AlertBuilder<'_>, rain: f64) {
    let zones = builder.zones();
    let konkan = builder.zone == Some("Konkan");
    if rain >= RAIN_EXTREME_MM {
        builder.push(
            AlertKind::ExtremeRainfall,
            Severity::Critical,
            "⚠️",
            "EXTREME RAINFALL ALERT",
            format!("Extremely heavy rainfall: {rain:.1}mm"),
            &[
                "FLOOD RISK HIGH - Evacuate low-lying areas if needed",
                "Protect crops from waterlogging",
                "Clear drainage channels immediately",
                "Avoid all field operations",
                "Secure farm equipment and animals",
            ],
            zones,
            Some(if konkan {
                "Coastal flooding risk"
            } else {
                "Waterlogging risk"
            }),
        );
    } else if rain >= RAIN_VERY_HEAVY_MM && konkan {
        builder.push(
            AlertKind::FloodRisk,
            Severity::High,
            "🌊",
            "Flood Risk - Konkan",
            format!("Heavy rainfall in coastal region: {rain:.1}mm"),
            &[
                "Monitor coastal flooding",
                "Check low-lying agricultural areas",
                "Protect rice fields from excessive water",
                "Ensure drainage in coconut plantations",
            ],
            vec!["Konkan coastal areas".to_string()],
            None,
        );
    } else if rain >= RAIN_VERY_HEAVY_MM {
        builder.push(
            AlertKind::HeavyRainfall,
            Severity::High,
            "🌧️",
            "Very Heavy Rainfall",
            format!("Very heavy rainfall: {rain:.1}mm"),
            &[
                "Monitor for waterlogging",
                "Ensure drainage systems working",
                "Postpone field operations",
                "Protect harvested crops from moisture",
            ],
            zones,
            None,
        );
    } else if rain >= RAIN_HEAVY_MM {
        builder.push(
            AlertKind::HeavyRainfall,
            Severity::Moderate,
            "🌧️",
            "Heavy Rainfall",
            format!("Heavy rainfall: {rain:.1}mm"),
            &[
                "Delay field operations",
                "Monitor soil moisture",
                "Check drainage systems",
            ],
            zones,
            None,
        );
    }
}

fn drought_alerts(
    builder: &mut AlertBuilder<'_>,
    month: u32,
    temp: Option<f64>,
    humidity: Option<f64>,
    rain: f64,
) {
    let Some(zone) = builder.zone.filter(|zone| is_drought_prone(zone)) else {
        return;
    };
    let zones = vec![zone.to_string()];

    if (7..=9).contains(&month) && rain < 2.0 && humidity.is_some_and(|h| h < 50.0) {
        builder.push(
            AlertKind::DroughtRisk,
            Severity::High,
            "🌵",
            format!("Drought Risk - {zone}"),
            "Dry spell during critical monsoon period".to_string(),
            &[
                "Activate drought mitigation measures",
                "Prioritize irrigation for critical crops",
                "Monitor soil moisture daily",
                "Consider water-saving techniques",
                "Mulching to conserve moisture",
            ],
            zones.clone(),
            Some("Critical for Kharif crops"),
        );
    }

    let hot_and_dry = temp.is_some_and(|t| t > 38.0) && humidity.is_some_and(|h| h < 40.0);
    if hot_and_dry && (3..=6).contains(&month) {
        builder.push(
            AlertKind::DroughtStress,
            Severity::High,
            "🌡️",
            "Drought Stress Conditions",
            format!("Hot and dry conditions in {zone}"),
            &[
                "Emergency irrigation required",
                "Monitor crop wilting",
                "Check water sources",
                "Implement water conservation",
            ],
            zones,
            None,
        );
    }
}

fn wind_alerts(builder: &mut AlertBuilder<'_>, wind: f64) {
    let zones = builder.zones();
    if wind >= WIND_DAMAGING {
        builder.push(
            AlertKind::StrongWind,
            Severity::High,
            "💨",
            "Damaging Winds",
            format!("Very strong winds: {wind:.1} m/s"),
            &[
                "Secure all loose items and equipment",
                "Protect tall crops (sugarcane, banana)",
                "Delay spraying operations",
                "Check crop staking and support",
            ],
            zones,
            None,
        );
    } else if wind >= WIND_VERY_STRONG {
        builder.push(
            AlertKind::StrongWind,
            Severity::Moderate,
            "🌬️",
            "Strong Winds",
            format!("Strong winds: {wind:.1} m/s"),
            &[
                "Delay pesticide spraying",
                "Monitor tall crops",
                "Secure farm equipment",
            ],
            zones,
            None,
        );
    }
}

fn humidity_alerts(builder: &mut AlertBuilder<'_>, humidity: f64) {
    let zones = builder.zones();
    if humidity >= HUMIDITY_VERY_HIGH {
        builder.push(
            AlertKind::HighHumidity,
            Severity::Moderate,
            "💧",
            "Very High Humidity",
            format!("High humidity: {humidity:.0}%"),
            &[
                "Fungal disease risk - monitor crops",
                "Avoid pesticide spraying",
                "Ensure proper ventilation in protected cultivation",
                "Watch for leaf diseases",
            ],
            zones,
            None,
        );
    } else if humidity <= HUMIDITY_VERY_LOW {
        builder.push(
            AlertKind::LowHumidity,
            Severity::Moderate,
            "🌵",
            "Very Low Humidity",
            format!("Low humidity: {humidity:.0}%"),
            &[
                "Increase irrigation frequency",
                "Monitor for spider mites",
                "Watch for heat stress in crops",
                "Consider mulching",
            ],
            zones,
            None,
        );
    }
}

/// Rain in the March, April and October harvest windows.
fn unseasonal_rain_alert(builder: &mut AlertBuilder<'_>, month: u32, rain: f64) {
    if matches!(month, 3 | 4 | 10) && rain > 5.0 {
        let zones = builder.zones();
        builder.push(
            AlertKind::UnseasonalRain,
            Severity::High,
            "⚠️",
            "Unseasonal Rainfall",
            format!("Unseasonal rain during harvest period: {rain:.1}mm"),
            &[
                "Expedite harvesting of ready crops",
                "Protect harvested produce from moisture",
                "Ensure proper storage",
                "Monitor for post-harvest fungal issues",
            ],
            zones,
            Some("Risk to standing/harvested crops"),
        );
    }
}

fn zone_alerts(
    builder: &mut AlertBuilder<'_>,
    temp: Option<f64>,
    humidity: Option<f64>,
    wind: Option<f64>,
) {
    let Some(zone) = builder.zone else {
        return;
    };

    if zone == "Konkan" && wind.is_some_and(|w| w > 12.0) {
        builder.push(
            AlertKind::CoastalWind,
            Severity::Moderate,
            "🌊",
            "Coastal Wind Advisory",
            "Strong coastal winds".to_string(),
            &[
                "Protect coconut and arecanut palms",
                "Secure thatched structures",
                "Monitor coastal areas",
            ],
            vec!["Konkan coastal areas".to_string()],
            None,
        );
    }

    if matches!(zone, "Vidarbha" | "High Rainfall Vidarbha") && temp.is_some_and(|t| t > 40.0) {
        builder.push(
            AlertKind::CottonHeat,
            Severity::Moderate,
            "🌡️",
            "Heat Stress - Cotton Belt",
            "High temperatures in cotton-growing areas".to_string(),
            &[
                "Ensure adequate irrigation for cotton",
                "Monitor for bollworm during warm periods",
                "Watch for heat-induced boll shedding",
            ],
            vec![zone.to_string()],
            None,
        );
    }

    if zone == "Western Maharashtra"
        && temp.is_some_and(|t| t > 38.0)
        && humidity.is_some_and(|h| h < 40.0)
    {
        builder.push(
            AlertKind::SugarcaneStress,
            Severity::Moderate,
            "🌾",
            "Sugarcane Water Stress",
            "Hot and dry conditions in sugarcane belt".to_string(),
            &[
                "Increase irrigation for sugarcane",
                "Monitor grape vineyards for heat stress",
                "Check drip irrigation systems",
            ],
            vec![zone.to_string()],
            None,
        );
    }
}

/// Keep the first alert of each kind, then order by severity. Equal severities
/// keep the order the rules raised them in.
pub fn prioritize(alerts: Vec<WeatherAlert>) -> Vec<WeatherAlert> {
    let mut unique: Vec<WeatherAlert> = Vec::with_capacity(alerts.len());
    for alert in alerts {
        if !unique.iter().any(|kept| kept.kind == alert.kind) {
            unique.push(alert);
        }
    }
    unique.sort_by_key(|alert| alert.severity);
    unique
}
