use super::entity::{IrrigationMethod, Reading, Season, SoilType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Weather reading as supplied by a weather provider; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub rain_mm: Option<f64>,
    pub wind_speed: Option<f64>,
    pub cloud_cover_pct: Option<f64>,
    pub pressure_hpa: Option<f64>,
}

impl WeatherReading {
    pub fn get(&self, reading: Reading) -> Option<f64> {
        match reading {
            Reading::Temperature => self.temp,
            Reading::Humidity => self.humidity,
            Reading::Rainfall => self.rain_mm,
            Reading::CloudCover => self.cloud_cover_pct,
            Reading::WindSpeed => self.wind_speed,
            Reading::Pressure => self.pressure_hpa,
        }
    }
}

/// Substitutes used for readings the weather provider did not supply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingDefaults {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub cloud_cover: f64,
    pub wind_speed: f64,
    pub pressure: f64,
}

impl Default for ReadingDefaults {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            humidity: 50.0,
            rainfall: 0.0,
            cloud_cover: 0.0,
            wind_speed: 0.0,
            pressure: 1013.0,
        }
    }
}

impl ReadingDefaults {
    pub fn get(&self, reading: Reading) -> f64 {
        match reading {
            Reading::Temperature => self.temperature,
            Reading::Humidity => self.humidity,
            Reading::Rainfall => self.rainfall,
            Reading::CloudCover => self.cloud_cover,
            Reading::WindSpeed => self.wind_speed,
            Reading::Pressure => self.pressure,
        }
    }
}

/// Fully populated observation. Every [`Reading`] has a finite value; the ones
/// that came from [`ReadingDefaults`] are remembered so justifications can say so.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    values: BTreeMap<Reading, f64>,
    defaulted: BTreeSet<Reading>,
}

impl Observation {
    pub fn normalize(raw: &WeatherReading, defaults: &ReadingDefaults) -> Self {
        let mut values = BTreeMap::new();
        let mut defaulted = BTreeSet::new();
        for reading in Reading::ALL {
            match raw.get(reading).filter(|value| value.is_finite()) {
                Some(value) => {
                    values.insert(reading, value);
                }
                None => {
                    tracing::debug!(reading = reading.label(), "missing reading, default used");
                    values.insert(reading, defaults.get(reading));
                    defaulted.insert(reading);
                }
            }
        }
        Self { values, defaulted }
    }

    pub fn get(&self, reading: Reading) -> f64 {
        self.values.get(&reading).copied().unwrap_or(0.0)
    }

    pub fn is_defaulted(&self, reading: Reading) -> bool {
        self.defaulted.contains(&reading)
    }

    pub fn defaulted(&self) -> impl Iterator<Item = Reading> + '_ {
        self.defaulted.iter().copied()
    }
}

/// Caller-supplied context for one advisory request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdvisoryContext {
    pub zone: Option<String>,
    pub season: Option<Season>,
    pub zone_crops: Vec<String>,
    pub land_size_acres: Option<f64>,
    pub soil_type: Option<SoilType>,
    pub irrigation: Option<IrrigationMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_fills_missing_and_non_finite_readings() {
        let raw = WeatherReading {
            temp: Some(31.0),
            humidity: None,
            rain_mm: Some(f64::NAN),
            ..WeatherReading::default()
        };

        let observation = Observation::normalize(&raw, &ReadingDefaults::default());
        assert_eq!(observation.get(Reading::Temperature), 31.0);
        assert_eq!(observation.get(Reading::Humidity), 50.0);
        assert_eq!(observation.get(Reading::Rainfall), 0.0);
        assert_eq!(observation.get(Reading::Pressure), 1013.0);
        assert!(!observation.is_defaulted(Reading::Temperature));
        assert!(observation.is_defaulted(Reading::Humidity));
        assert!(observation.is_defaulted(Reading::Rainfall));
        assert!(Reading::ALL
            .iter()
            .all(|reading| observation.get(*reading).is_finite()));
    }

    #[test]
    fn defaults_deserialize_partially() {
        let defaults: ReadingDefaults =
            toml::from_str("humidity = 65.0").expect("defaults should parse");
        assert_eq!(defaults.humidity, 65.0);
        assert_eq!(defaults.temperature, 25.0);
    }
}
