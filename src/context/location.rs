use crate::reference::ReferenceStore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub characteristics: &'static str,
    pub typical_crops: &'static [&'static str],
    pub climate: &'static str,
}

const ZONES: [ZoneInfo; 9] = [
    ZoneInfo {
        name: "Konkan",
        description: "Coastal region with high rainfall (2000-3000mm)",
        characteristics: "High humidity, moderate temperatures, monsoon critical",
        typical_crops: &["Rice", "Coconut", "Mango", "Cashew", "Betel nut"],
        climate: "humid_tropical",
    },
    ZoneInfo {
        name: "Western Ghat",
        description: "Hilly terrain with heavy rainfall (3000-5000mm)",
        characteristics: "Cool temperatures, steep slopes, heavy monsoon",
        typical_crops: &["Rice", "Tea", "Coffee", "Spices", "Fruits"],
        climate: "mountain_tropical",
    },
    ZoneInfo {
        name: "Vidarbha",
        description: "Cotton belt with moderate rainfall (700-1000mm)",
        characteristics: "Hot summers, moderate winters, rainfall dependent",
        typical_crops: &["Cotton", "Soybean", "Jowar", "Tur", "Oranges"],
        climate: "semi_arid",
    },
    ZoneInfo {
        name: "Marathwada",
        description: "Drought-prone region with low rainfall (600-800mm)",
        characteristics: "Hot and dry, water scarcity, rainfed agriculture",
        typical_crops: &["Jowar", "Bajra", "Tur", "Cotton", "Sugarcane (irrigated)"],
        climate: "arid_semi_arid",
    },
    ZoneInfo {
        name: "Scarcity Zone",
        description: "Western Maharashtra scarcity zone (500-700mm)",
        characteristics: "Low rainfall, hot summers, irrigation critical",
        typical_crops: &["Jowar", "Bajra", "Groundnut", "Sunflower"],
        climate: "arid",
    },
    ZoneInfo {
        name: "Western Maharashtra",
        description: "Sugarcane belt with moderate rainfall (500-1000mm)",
        characteristics: "Black soil, hot climate, irrigation developed",
        typical_crops: &["Sugarcane", "Grapes", "Pomegranate", "Onion", "Cotton"],
        climate: "semi_arid",
    },
    ZoneInfo {
        name: "Transition Zone",
        description: "Transitional agroclimatic zone",
        characteristics: "Variable rainfall, mixed cropping patterns",
        typical_crops: &["Jowar", "Cotton", "Groundnut", "Chilli"],
        climate: "variable",
    },
    ZoneInfo {
        name: "Assured Rainfall Zone",
        description: "Regions with reliable rainfall (1000-1500mm)",
        characteristics: "Adequate moisture, diverse cropping",
        typical_crops: &["Soybean", "Rice", "Cotton", "Vegetables"],
        climate: "sub_humid",
    },
    ZoneInfo {
        name: "High Rainfall Vidarbha",
        description: "Eastern Vidarbha with better rainfall",
        characteristics: "Higher rainfall than western Vidarbha",
        typical_crops: &["Rice", "Soybean", "Cotton", "Vegetables"],
        climate: "semi_humid",
    },
];

/// District to agroclimatic zone, grouped by revenue division.
const DISTRICTS: [(&str, &str); 36] = [
    // Konkan
    ("Mumbai City", "Konkan"),
    ("Mumbai Suburban", "Konkan"),
    ("Thane", "Konkan"),
    ("Raigad", "Konkan"),
    ("Ratnagiri", "Konkan"),
    ("Sindhudurg", "Konkan"),
    ("Palghar", "Konkan"),
    // Nashik
    ("Nashik", "Western Maharashtra"),
    ("Dhule", "Scarcity Zone"),
    ("Jalgaon", "Scarcity Zone"),
    ("Nandurbar", "Scarcity Zone"),
    ("Ahmednagar", "Scarcity Zone"),
    // Pune
    ("Pune", "Western Maharashtra"),
    ("Satara", "Western Ghat"),
    ("Sangli", "Western Maharashtra"),
    ("Solapur", "Scarcity Zone"),
    ("Kolhapur", "Western Ghat"),
    // Aurangabad
    ("Aurangabad", "Marathwada"),
    ("Jalna", "Marathwada"),
    ("Beed", "Marathwada"),
    ("Parbhani", "Marathwada"),
    ("Hingoli", "Marathwada"),
    ("Nanded", "Marathwada"),
    ("Latur", "Marathwada"),
    ("Osmanabad", "Marathwada"),
    // Amravati
    ("Amravati", "Vidarbha"),
    ("Akola", "Vidarbha"),
    ("Yavatmal", "Vidarbha"),
    ("Buldhana", "Vidarbha"),
    ("Washim", "Vidarbha"),
    // Nagpur
    ("Nagpur", "High Rainfall Vidarbha"),
    ("Wardha", "Vidarbha"),
    ("Bhandara", "High Rainfall Vidarbha"),
    ("Gondia", "High Rainfall Vidarbha"),
    ("Chandrapur", "High Rainfall Vidarbha"),
    ("Gadchiroli", "High Rainfall Vidarbha"),
];

/// Zones where water conservation advice applies.
pub const DROUGHT_PRONE_ZONES: [&str; 3] = ["Marathwada", "Scarcity Zone", "Vidarbha"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub query: String,
    pub district: &'static str,
    pub zone: &'static ZoneInfo,
}

pub fn zones() -> &'static [ZoneInfo] {
    &ZONES
}

pub fn districts() -> impl Iterator<Item = (&'static str, &'static str)> {
    DISTRICTS.iter().copied()
}

/// Zone by name, ignoring case.
pub fn zone(name: &str) -> Option<&'static ZoneInfo> {
    let name = name.trim();
    ZONES.iter().find(|zone| zone.name.eq_ignore_ascii_case(name))
}

pub fn is_drought_prone(zone: &str) -> bool {
    DROUGHT_PRONE_ZONES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(zone))
}

/// Resolve a free-text location to the first district whose name it contains.
pub fn resolve(query: &str) -> Option<Location> {
    let lower = query.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    let (district, zone_name) = DISTRICTS
        .iter()
        .copied()
        .find(|(district, _)| lower.contains(&district.to_lowercase()))?;
    let zone = zone(zone_name)?;
    tracing::debug!(query, district, zone = zone.name, "location resolved");
    Some(Location {
        query: query.trim().to_string(),
        district,
        zone,
    })
}

/// Crops grown in `zone`: reference crops listing it, then the zone's typical
/// crops that are not already present.
pub fn zone_crops(store: &ReferenceStore, zone: &str) -> Vec<String> {
    let mut crops = store
        .crops()
        .iter()
        .filter(|crop| {
            crop.agroclimatic_zones
                .iter()
                .any(|listed| listed.eq_ignore_ascii_case(zone))
        })
        .map(|crop| crop.name.clone())
        .collect::<Vec<_>>();

    if let Some(info) = self::zone(zone) {
        for typical in info.typical_crops {
            if !crops.iter().any(|crop| crop.eq_ignore_ascii_case(typical)) {
                crops.push(typical.to_string());
            }
        }
    }
    crops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_table_covers_every_zone() {
        assert_eq!(districts().count(), 36);
        for (district, zone_name) in districts() {
            assert!(zone(zone_name).is_some(), "{district} maps to unknown {zone_name}");
        }
    }

    #[test]
    fn district_free_zones_resolve_by_name_only() {
        for name in ["Transition Zone", "Assured Rainfall Zone"] {
            assert!(districts().all(|(_, zone_name)| zone_name != name));
            assert_eq!(zone(&name.to_lowercase()).map(|info| info.name), Some(name));
            assert!(resolve(name).is_none(), "{name} is not a district");
        }
    }

    #[test]
    fn resolve_matches_district_inside_location_text() {
        let location = resolve("Near Latur, Maharashtra").expect("latur should resolve");
        assert_eq!(location.district, "Latur");
        assert_eq!(location.zone.name, "Marathwada");

        let mumbai = resolve("mumbai suburban").expect("mumbai should resolve");
        assert_eq!(mumbai.district, "Mumbai Suburban");
        assert_eq!(mumbai.zone.name, "Konkan");

        assert!(resolve("Bengaluru").is_none());
        assert!(resolve("   ").is_none());
    }

    #[test]
    fn zone_crops_merge_reference_and_typical_crops() {
        let store = ReferenceStore::builtin();
        let crops = zone_crops(&store, "Marathwada");
        assert_eq!(&crops[..4], &["Wheat", "Cotton", "Onion", "Tomato"]);
        assert!(crops.contains(&"Bajra".to_string()));
        assert_eq!(
            crops.iter().filter(|crop| crop.as_str() == "Cotton").count(),
            1
        );

        let unknown = zone_crops(&store, "Atlantis");
        assert!(unknown.is_empty());
    }

    #[test]
    fn drought_prone_zones_are_case_insensitive() {
        assert!(is_drought_prone("marathwada"));
        assert!(!is_drought_prone("Konkan"));
    }
}
