pub mod builtin;

use crate::error::{AdvisorError, Result};
use crate::types::entity::{Crop, CropCategory, Pest, Range, SeasonAffinity};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Crop,
    Pest,
}

/// Crop row as stored in the JSON crop table.
#[derive(Debug, Deserialize)]
struct CropRecord {
    name: String,
    #[serde(default)]
    varieties: Vec<String>,
    season: String,
    ideal_temperature_c: Range,
    rainfall_requirement_mm: [f64; 2],
    #[serde(default)]
    best_soil_types: Vec<String>,
    #[serde(default)]
    agroclimatic_zones: Vec<String>,
    #[serde(default)]
    cultivation_tips: Option<String>,
}

impl From<CropRecord> for Crop {
    fn from(record: CropRecord) -> Self {
        let [low, high] = record.rainfall_requirement_mm;
        Crop {
            category: CropCategory::classify(&record.name),
            season: SeasonAffinity::parse(&record.season),
            rainfall_requirement_mm: Range::new(low, high),
            ideal_temperature_c: record.ideal_temperature_c,
            name: record.name,
            varieties: record.varieties,
            best_soil_types: record.best_soil_types,
            agroclimatic_zones: record.agroclimatic_zones,
            cultivation_tips: record.cultivation_tips,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CropTable {
    crops: Vec<CropRecord>,
}

#[derive(Debug, Deserialize)]
struct PestTable {
    pests: Vec<Pest>,
}

/// Read-only snapshot of the crop, pest and zone tables.
///
/// Built once and shared by reference; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    crops: Vec<Crop>,
    pests: Vec<Pest>,
    zone_priorities: BTreeMap<String, BTreeMap<String, u8>>,
    degraded: bool,
}

impl ReferenceStore {
    /// Store backed entirely by the embedded tables.
    pub fn builtin() -> Self {
        Self::new(builtin::fallback_crops(), builtin::pests())
    }

    /// Store over caller-supplied tables, with the embedded zone priorities.
    pub fn new(crops: Vec<Crop>, pests: Vec<Pest>) -> Self {
        Self {
            crops,
            pests,
            zone_priorities: builtin::zone_pest_priorities(),
            degraded: false,
        }
    }

    /// Load the configured tables, failing on the first unreadable one.
    /// A table without a path uses the embedded one.
    pub fn try_load(crops_path: Option<&Path>, pests_path: Option<&Path>) -> Result<Self> {
        let crops = match crops_path {
            Some(path) => read_crops(path)?,
            None => builtin::fallback_crops(),
        };
        let pests = match pests_path {
            Some(path) => read_pests(path)?,
            None => builtin::pests(),
        };
        Ok(Self::new(crops, pests))
    }

    /// Like [`ReferenceStore::try_load`], but an unreadable table is replaced by
    /// the embedded one and the store is marked degraded.
    pub fn load(crops_path: Option<&Path>, pests_path: Option<&Path>) -> Self {
        let mut degraded = false;

        let crops = match crops_path.map(read_crops) {
            Some(Ok(crops)) => crops,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "crop table unavailable, using embedded fallback crops");
                degraded = true;
                builtin::fallback_crops()
            }
            None => builtin::fallback_crops(),
        };

        let pests = match pests_path.map(read_pests) {
            Some(Ok(pests)) => pests,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "pest table unavailable, using embedded pest table");
                degraded = true;
                builtin::pests()
            }
            None => builtin::pests(),
        };

        tracing::info!(
            crops = crops.len(),
            pests = pests.len(),
            degraded,
            "reference data loaded"
        );
        Self {
            degraded,
            ..Self::new(crops, pests)
        }
    }

    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    pub fn pests(&self) -> &[Pest] {
        &self.pests
    }

    pub fn crop(&self, name: &str) -> Option<&Crop> {
        self.crops
            .iter()
            .find(|crop| crop.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Look a pest up by key or display name.
    pub fn pest(&self, id: &str) -> Option<&Pest> {
        let id = id.trim();
        self.pests
            .iter()
            .find(|pest| pest.key.eq_ignore_ascii_case(id) || pest.name.eq_ignore_ascii_case(id))
    }

    /// Pest priorities of a zone; `None` when the zone has no priority table.
    pub fn zone_priorities(&self, zone: &str) -> Option<&BTreeMap<String, u8>> {
        self.zone_priorities
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(zone))
            .map(|(_, table)| table)
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Identifiers in table order.
    pub fn entity_ids(&self, kind: EntityKind) -> Vec<&str> {
        match kind {
            EntityKind::Crop => self.crops.iter().map(|crop| crop.name.as_str()).collect(),
            EntityKind::Pest => self.pests.iter().map(|pest| pest.key.as_str()).collect(),
        }
    }
}

fn read_table(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AdvisorError::ReferenceLoad(format!("{}: {e}", path.display())))
}

fn read_crops(path: &Path) -> Result<Vec<Crop>> {
    let content = read_table(path)?;
    let table: CropTable = serde_json::from_str(&content)
        .map_err(|e| AdvisorError::ReferenceLoad(format!("{}: {e}", path.display())))?;
    if let Some(blank) = table.crops.iter().position(|crop| crop.name.trim().is_empty()) {
        return Err(AdvisorError::ReferenceLoad(format!(
            "{}: crop #{} has an empty name",
            path.display(),
            blank + 1
        )));
    }
    Ok(table.crops.into_iter().map(Crop::from).collect())
}

fn read_pests(path: &Path) -> Result<Vec<Pest>> {
    let content = read_table(path)?;
    let table: PestTable = serde_json::from_str(&content)
        .map_err(|e| AdvisorError::ReferenceLoad(format!("{}: {e}", path.display())))?;
    if let Some(pest) = table
        .pests
        .iter()
        .find(|pest| pest.seasonal_activity.values().any(|weight| *weight > 10))
    {
        return Err(AdvisorError::ReferenceLoad(format!(
            "{}: {} has seasonal activity above 10",
            path.display(),
            pest.key
        )));
    }
    Ok(table.pests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::entity::{Reading, Season};
    use std::fs;
    use tempfile::TempDir;

    const CROPS_JSON: &str = r#"{
  "crops": [
    {
      "name": "Bajra",
      "season": "Kharif",
      "ideal_temperature_c": { "min": 35, "max": 25 },
      "rainfall_requirement_mm": [400, 600],
      "best_soil_types": ["Light textured sandy loam"],
      "agroclimatic_zones": ["Scarcity Zone"]
    },
    {
      "name": "Mango",
      "season": "Perennial",
      "ideal_temperature_c": { "min": 24, "max": 30 },
      "rainfall_requirement_mm": [750, 2500]
    }
  ]
}"#;

    #[test]
    fn builtin_store_is_complete_and_not_degraded() {
        let store = ReferenceStore::builtin();
        assert_eq!(store.crops().len(), 8);
        assert_eq!(store.pests().len(), 10);
        assert!(!store.is_degraded());
        assert_eq!(
            store.entity_ids(EntityKind::Crop)[..3],
            ["Rice", "Wheat", "Cotton"]
        );
        assert_eq!(store.entity_ids(EntityKind::Pest)[0], "aphids");
    }

    #[test]
    fn lookups_return_none_for_unknown_ids() {
        let store = ReferenceStore::builtin();
        assert!(store.crop("rice").is_some());
        assert!(store.crop("Quinoa").is_none());
        assert!(store.pest("Red Spider Mites").is_some());
        assert!(store.pest("spider_mites").is_some());
        assert!(store.pest("locust").is_none());
        assert_eq!(
            store.zone_priorities("marathwada").and_then(|t| t.get("shoot_fly")),
            Some(&10)
        );
        assert!(store.zone_priorities("Central Vidarbha").is_none());
    }

    #[test]
    fn try_load_reads_crop_table_and_classifies_entries() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("crops.json");
        fs::write(&path, CROPS_JSON).expect("crop table should write");

        let store = ReferenceStore::try_load(Some(&path), None).expect("load should succeed");
        assert_eq!(store.entity_ids(EntityKind::Crop), vec!["Bajra", "Mango"]);
        let bajra = store.crop("Bajra").expect("bajra should load");
        assert_eq!(bajra.category, CropCategory::Cereals);
        assert_eq!(bajra.ideal_temperature_c, Range::new(25.0, 35.0));
        let mango = store.crop("Mango").expect("mango should load");
        assert!(mango.season.perennial);
        assert_eq!(mango.category, CropCategory::Fruits);
    }

    #[test]
    fn load_falls_back_and_marks_store_degraded() {
        let dir = TempDir::new().expect("temp dir should be created");
        let missing = dir.path().join("missing.json");

        assert!(matches!(
            ReferenceStore::try_load(Some(&missing), None),
            Err(AdvisorError::ReferenceLoad(_))
        ));

        let store = ReferenceStore::load(Some(&missing), None);
        assert!(store.is_degraded());
        assert_eq!(store.crops().len(), 8);
    }

    #[test]
    fn malformed_tables_are_load_errors() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("crops.json");
        fs::write(&path, "{\"crops\": [{\"name\": \"Rice\"}]}").expect("write");
        let err = ReferenceStore::try_load(Some(&path), None).expect_err("should fail");
        assert!(err.to_string().contains("crops.json"));

        let pests = dir.path().join("pests.json");
        fs::write(&pests, "not json").expect("write");
        let store = ReferenceStore::load(None, Some(&pests));
        assert!(store.is_degraded());
        assert_eq!(store.pests().len(), 10);
    }

    #[test]
    fn pest_table_uses_reading_and_season_keys() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("pests.json");
        fs::write(
            &path,
            r#"{"pests": [{
                "key": "locust",
                "name": "Desert Locust",
                "risk_level": "severe",
                "conditions": {
                    "temperature": {"min": 25, "max": 40},
                    "wind_speed": {"min": 2, "max": 30}
                },
                "seasonal_activity": {"Kharif": 8, "summer": 10},
                "affected_crops": ["Bajra", "Jowar"]
            }]}"#,
        )
        .expect("write");
        let store = ReferenceStore::try_load(None, Some(&path)).expect("load should succeed");
        let locust = store.pest("locust").expect("locust should load");
        assert_eq!(locust.conditions.len(), 2);
        assert!(locust.conditions.contains_key(&Reading::WindSpeed));
        assert_eq!(locust.seasonal_activity.get(&Season::Kharif), Some(&8));
        assert!(locust.treatment.is_empty());
    }

    #[test]
    fn empty_crop_table_is_valid() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("crops.json");
        fs::write(&path, "{\"crops\": []}").expect("write");
        let store = ReferenceStore::load(Some(&path), None);
        assert!(store.crops().is_empty());
        assert!(!store.is_degraded());
    }
}
