use crate::error::AdvisorError;
use crate::scoring::factors;
use crate::types::observation::ReadingDefaults;
use crate::types::scoring::FactorSpec;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_TOP_N: usize = 8;
const MAX_TOP_N: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisorConfig {
    pub data: Option<DataConfig>,
    pub advisor: Option<AdvisorSettings>,
    pub defaults: Option<ReadingDefaults>,
    pub crop_weights: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    pub crops: Option<PathBuf>,
    pub pests: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorSettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl AdvisorConfig {
    pub fn top_n(&self) -> usize {
        self.advisor
            .as_ref()
            .map(|advisor| advisor.top_n)
            .unwrap_or(DEFAULT_TOP_N)
    }

    pub fn reading_defaults(&self) -> ReadingDefaults {
        self.defaults.unwrap_or_default()
    }

    pub fn crops_path(&self) -> Option<&PathBuf> {
        self.data.as_ref().and_then(|data| data.crops.as_ref())
    }

    pub fn pests_path(&self) -> Option<&PathBuf> {
        self.data.as_ref().and_then(|data| data.pests.as_ref())
    }

    /// Crop factor table with any `[crop_weights]` overrides applied.
    pub fn crop_factor_specs(&self) -> Vec<FactorSpec> {
        let mut specs = factors::crop_factor_specs();
        if let Some(weights) = &self.crop_weights {
            for spec in &mut specs {
                if let Some(ceiling) = weights.get(spec.factor.key()) {
                    spec.ceiling = *ceiling;
                }
            }
        }
        specs
    }

    pub fn validate(&self) -> Result<(), AdvisorError> {
        let top_n = self.top_n();
        if !(1..=MAX_TOP_N).contains(&top_n) {
            return Err(AdvisorError::ConfigParse(format!(
                "advisor.top_n must be between 1 and {MAX_TOP_N} (found {top_n})"
            )));
        }

        if let Some(defaults) = &self.defaults {
            validate_defaults(defaults)?;
        }

        if let Some(weights) = &self.crop_weights {
            let allowed = factors::crop_factor_specs()
                .iter()
                .map(|spec| spec.factor.key())
                .collect::<Vec<_>>();
            let mut unknown = weights
                .keys()
                .filter(|key| !allowed.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(AdvisorError::ConfigParse(format!(
                    "crop_weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        factors::validate_specs(&self.crop_factor_specs())
            .map_err(|e| AdvisorError::ConfigParse(format!("crop_weights: {e}")))?;

        Ok(())
    }
}

fn validate_defaults(defaults: &ReadingDefaults) -> Result<(), AdvisorError> {
    let checks = [
        ("humidity", defaults.humidity, 0.0, 100.0),
        ("cloud_cover", defaults.cloud_cover, 0.0, 100.0),
        ("rainfall", defaults.rainfall, 0.0, f64::MAX),
        ("wind_speed", defaults.wind_speed, 0.0, f64::MAX),
        ("temperature", defaults.temperature, -60.0, 60.0),
        ("pressure", defaults.pressure, 800.0, 1100.0),
    ];
    for (name, value, min, max) in checks {
        if !value.is_finite() || !(min..=max).contains(&value) {
            return Err(AdvisorError::ConfigParse(format!(
                "defaults.{name} is out of range: {value}"
            )));
        }
    }
    Ok(())
}
