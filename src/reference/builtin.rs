//! Embedded reference tables. The crop list is the minimal subset used when no
//! crop table can be read; the pest and zone tables are complete.

use super::CropRecord;
use crate::types::entity::{Crop, Pest, Range, Reading, RiskLevel, Season};
use std::collections::BTreeMap;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn crop(
    name: &str,
    varieties: &[&str],
    season: &str,
    temperature: (f64, f64),
    rainfall: (f64, f64),
    soils: &[&str],
    zones: &[&str],
    tips: &str,
) -> Crop {
    CropRecord {
        name: name.to_string(),
        varieties: strings(varieties),
        season: season.to_string(),
        ideal_temperature_c: Range::new(temperature.0, temperature.1),
        rainfall_requirement_mm: [rainfall.0, rainfall.1],
        best_soil_types: strings(soils),
        agroclimatic_zones: strings(zones),
        cultivation_tips: Some(tips.to_string()),
    }
    .into()
}

pub fn fallback_crops() -> Vec<Crop> {
    vec![
        crop(
            "Rice",
            &["Basmati", "IR-64", "Swarna", "Sona Masuri", "Kolam"],
            "Kharif",
            (22.0, 32.0),
            (1500.0, 3000.0),
            &[
                "Deep alluvial soil with good water retention",
                "Clayey loam with pH 5.5-7.0",
                "Well-drained paddy fields",
            ],
            &["Konkan", "Western Ghat", "High Rainfall Vidarbha"],
            "Requires standing water during growing season",
        ),
        crop(
            "Wheat",
            &["HD-2967", "Lok-1", "MACS-6222", "NIAW-301", "Trimbak"],
            "Rabi",
            (10.0, 25.0),
            (300.0, 800.0),
            &[
                "Well-drained loamy soil with good fertility",
                "Alluvial soil with pH 6.0-7.5",
                "Deep clay loam with adequate nitrogen",
            ],
            &["Marathwada", "Western Maharashtra"],
            "Requires cool weather during grain filling stage",
        ),
        crop(
            "Cotton",
            &["Bt Cotton", "PKV-081", "AKH-081", "Suraj", "MECH-162"],
            "Kharif",
            (21.0, 35.0),
            (500.0, 1000.0),
            &[
                "Deep black cotton soil with good water holding capacity",
                "Well-drained alluvial soil",
                "Medium to heavy textured soil with pH 6.0-8.0",
            ],
            &["Central Vidarbha", "Marathwada", "Scarcity Zone"],
            "Requires long frost-free period and adequate moisture",
        ),
        crop(
            "Soybean",
            &["JS-335", "MACS-450", "MACS-1407", "Pusa-16", "JS-9305"],
            "Kharif",
            (20.0, 30.0),
            (600.0, 900.0),
            &[
                "Deep black cotton soil with good organic matter",
                "Well-drained loamy soil with pH 6.0-7.5",
                "Medium textured soil with adequate calcium",
            ],
            &["Assured Rainfall Zone", "Scarcity Zone", "Central Vidarbha"],
            "Nitrogen fixing legume, benefits from rhizobium inoculation",
        ),
        crop(
            "Sugarcane",
            &["Co-86032", "CoM-0265", "Co-7704", "MS-71/68", "Co-94012"],
            "Annual (12-18 months)",
            (20.0, 38.0),
            (1000.0, 2500.0),
            &[
                "Deep alluvial soil with high organic matter",
                "Well-drained heavy loam",
                "Fertile soil with pH 6.0-7.5 and good water retention",
            ],
            &["Western Maharashtra", "Konkan"],
            "Requires abundant water and long growing season",
        ),
        crop(
            "Onion",
            &["Bhima Super", "N-53", "Agrifound Dark Red", "Pusa Red", "Bhima Kiran"],
            "Rabi/Kharif",
            (15.0, 30.0),
            (400.0, 700.0),
            &[
                "Well-drained sandy loam with good organic matter",
                "Fertile alluvial soil with pH 6.0-7.5",
                "Medium textured soil with adequate phosphorus",
            ],
            &["Western Maharashtra", "Marathwada"],
            "Requires well-drained soil to prevent bulb rot",
        ),
        crop(
            "Tomato",
            &["Pusa Ruby", "Arka Vikas", "MTECH-1061", "Himsona", "Abhilash"],
            "All Seasons",
            (18.0, 30.0),
            (600.0, 1200.0),
            &[
                "Well-drained loamy soil rich in organic matter",
                "Sandy loam with pH 6.0-7.0",
                "Deep fertile soil with good water retention",
            ],
            &["Konkan", "Marathwada", "Western Ghats"],
            "Sensitive to waterlogging and extreme temperatures",
        ),
        crop(
            "Maize",
            &["Ganga-5", "Deccan-103", "HQPM-1", "African Tall", "Composite-4"],
            "Kharif/Rabi",
            (20.0, 32.0),
            (500.0, 800.0),
            &[
                "Well-drained loamy soil with good fertility",
                "Deep alluvial soil with pH 6.0-7.5",
                "Sandy loam with adequate organic matter",
            ],
            &["Transition Zone I", "Central Maharashtra Plateau"],
            "Requires adequate drainage and balanced nutrition",
        ),
    ]
}

struct PestSeed {
    key: &'static str,
    name: &'static str,
    icon: &'static str,
    risk_level: RiskLevel,
    description: &'static str,
    conditions: &'static [(Reading, f64, f64)],
    activity: [u8; 3],
    symptoms: &'static [&'static str],
    affected_crops: &'static [&'static str],
    prevention: &'static [&'static str],
    treatment: &'static [&'static str],
}

impl From<&PestSeed> for Pest {
    fn from(seed: &PestSeed) -> Self {
        Pest {
            key: seed.key.to_string(),
            name: seed.name.to_string(),
            icon: seed.icon.to_string(),
            conditions: seed
                .conditions
                .iter()
                .map(|(reading, min, max)| (*reading, Range::new(*min, *max)))
                .collect(),
            risk_level: seed.risk_level,
            description: seed.description.to_string(),
            seasonal_activity: Season::ALL.into_iter().zip(seed.activity).collect(),
            symptoms: strings(seed.symptoms),
            affected_crops: strings(seed.affected_crops),
            prevention: strings(seed.prevention),
            treatment: strings(seed.treatment),
        }
    }
}

const PESTS: [PestSeed; 10] = [
    PestSeed {
        key: "aphids",
        name: "Aphids",
        icon: "🐛",
        risk_level: RiskLevel::Moderate,
        description: "Small soft-bodied insects that feed on plant sap",
        conditions: &[
            (Reading::Temperature, 18.0, 35.0),
            (Reading::Humidity, 50.0, 100.0),
            (Reading::CloudCover, 30.0, 100.0),
            (Reading::WindSpeed, 0.0, 15.0),
        ],
        activity: [5, 10, 7],
        symptoms: &["Curled leaves", "Stunted growth", "Honeydew on leaves", "Yellowing"],
        affected_crops: &["Cotton", "Wheat", "Vegetables", "Legumes"],
        prevention: &[
            "Regular field inspection",
            "Use yellow sticky traps",
            "Encourage beneficial insects",
            "Avoid over-fertilization with nitrogen",
        ],
        treatment: &[
            "Spray with insecticidal soap",
            "Use neem oil",
            "Apply systemic insecticides if severe",
            "Remove affected plant parts",
        ],
    },
    PestSeed {
        key: "whitefly",
        name: "Whitefly",
        icon: "☁️",
        risk_level: RiskLevel::High,
        description: "Small white flying insects that damage crops",
        conditions: &[
            (Reading::Temperature, 20.0, 32.0),
            (Reading::Humidity, 35.0, 100.0),
            (Reading::CloudCover, 0.0, 100.0),
            (Reading::WindSpeed, 0.0, 10.0),
        ],
        activity: [10, 6, 8],
        symptoms: &["White flying insects", "Yellowing leaves", "Sooty mold", "Reduced yield"],
        affected_crops: &["Tomato", "Cotton", "Cabbage", "Beans"],
        prevention: &[
            "Use yellow sticky traps",
            "Remove weeds around fields",
            "Plant trap crops",
            "Use reflective mulch",
        ],
        treatment: &[
            "Apply systemic insecticides",
            "Use biological control agents",
            "Spray with horticultural oil",
            "Remove heavily infested plants",
        ],
    },
    PestSeed {
        key: "spider_mites",
        name: "Red Spider Mites",
        icon: "🕷️",
        risk_level: RiskLevel::High,
        description: "Tiny spider-like pests that thrive in hot, dry conditions",
        conditions: &[
            (Reading::Temperature, 25.0, 45.0),
            (Reading::Humidity, 0.0, 60.0),
            (Reading::CloudCover, 0.0, 40.0),
            (Reading::WindSpeed, 0.0, 20.0),
        ],
        activity: [7, 6, 10],
        symptoms: &["Fine webbing", "Stippled leaves", "Bronze coloration", "Leaf drop"],
        affected_crops: &["Cotton", "Soybeans", "Corn", "Vegetables"],
        prevention: &[
            "Maintain adequate soil moisture",
            "Avoid dusty conditions",
            "Regular misting of plants",
            "Encourage predatory mites",
        ],
        treatment: &[
            "Apply miticides",
            "Increase humidity around plants",
            "Use predatory insects",
            "Remove affected leaves",
        ],
    },
    PestSeed {
        key: "stem_borer",
        name: "Stem Borer",
        icon: "🌾",
        risk_level: RiskLevel::Severe,
        description: "Caterpillars that bore into plant stems",
        conditions: &[
            (Reading::Temperature, 20.0, 35.0),
            (Reading::Humidity, 60.0, 100.0),
            (Reading::CloudCover, 40.0, 100.0),
            (Reading::WindSpeed, 0.0, 8.0),
        ],
        activity: [10, 5, 4],
        symptoms: &["Dead hearts", "Holes in stems", "Wilting", "Broken stems"],
        affected_crops: &["Rice", "Sugarcane", "Corn", "Sorghum"],
        prevention: &[
            "Use pheromone traps",
            "Plant resistant varieties",
            "Proper field sanitation",
            "Avoid late planting",
        ],
        treatment: &[
            "Apply granular insecticides",
            "Use egg parasitoids",
            "Cut and destroy affected stems",
            "Apply soil treatment",
        ],
    },
    PestSeed {
        key: "fungal_diseases",
        name: "Fungal Diseases",
        icon: "🍄",
        risk_level: RiskLevel::Severe,
        description: "Various fungal infections promoted by wet conditions",
        conditions: &[
            (Reading::Temperature, 15.0, 30.0),
            (Reading::Humidity, 70.0, 100.0),
            (Reading::Rainfall, 0.5, 100.0),
            (Reading::CloudCover, 50.0, 100.0),
        ],
        activity: [10, 7, 3],
        symptoms: &["Leaf spots", "Wilting", "Rot", "Mold growth"],
        affected_crops: &["All crops", "Vegetables", "Fruits", "Grains"],
        prevention: &[
            "Improve air circulation",
            "Avoid overhead watering",
            "Remove plant debris",
            "Use resistant varieties",
        ],
        treatment: &[
            "Apply fungicides",
            "Remove affected parts",
            "Improve drainage",
            "Use biological controls",
        ],
    },
    PestSeed {
        key: "thrips",
        name: "Thrips",
        icon: "🌬️",
        risk_level: RiskLevel::Moderate,
        description: "Tiny insects that rasp leaf surfaces",
        conditions: &[
            (Reading::Temperature, 24.0, 40.0),
            (Reading::Humidity, 0.0, 65.0),
            (Reading::WindSpeed, 5.0, 25.0),
            (Reading::CloudCover, 0.0, 50.0),
        ],
        activity: [6, 10, 8],
        symptoms: &["Silver streaks on leaves", "Black specks", "Curled leaves", "Stunted growth"],
        affected_crops: &["Onion", "Cotton", "Vegetables", "Flowers"],
        prevention: &[
            "Use blue sticky traps",
            "Maintain soil moisture",
            "Remove weeds",
            "Use reflective mulch",
        ],
        treatment: &[
            "Apply systemic insecticides",
            "Use predatory mites",
            "Spray with neem oil",
            "Remove affected leaves",
        ],
    },
    PestSeed {
        key: "leafhopper",
        name: "Leafhopper",
        icon: "🍃",
        risk_level: RiskLevel::Moderate,
        description: "Jumping insects that transmit plant diseases",
        conditions: &[
            (Reading::Temperature, 22.0, 35.0),
            (Reading::Humidity, 40.0, 100.0),
            (Reading::Rainfall, 0.1, 50.0),
            (Reading::CloudCover, 30.0, 100.0),
        ],
        activity: [9, 5, 6],
        symptoms: &["Yellowing leaves", "Stunted growth", "Hopper burn", "Viral symptoms"],
        affected_crops: &["Rice", "Potato", "Beans", "Vegetables"],
        prevention: &[
            "Use yellow sticky traps",
            "Remove alternate hosts",
            "Plant barrier crops",
            "Use resistant varieties",
        ],
        treatment: &[
            "Apply systemic insecticides",
            "Use biological controls",
            "Remove infected plants",
            "Control weeds",
        ],
    },
    PestSeed {
        key: "shoot_fly",
        name: "Shoot Fly",
        icon: "🐞",
        risk_level: RiskLevel::High,
        description: "Small flies whose larvae damage young shoots",
        conditions: &[
            (Reading::Temperature, 24.0, 40.0),
            (Reading::Humidity, 30.0, 70.0),
            (Reading::Rainfall, 0.1, 8.0),
            (Reading::CloudCover, 0.0, 60.0),
        ],
        activity: [10, 8, 5],
        symptoms: &["Dead hearts", "Wilting shoots", "Stunted growth", "Reduced tillering"],
        affected_crops: &["Sorghum", "Pearl millet", "Maize", "Rice"],
        prevention: &[
            "Early planting",
            "Use resistant varieties",
            "Soil treatment",
            "Proper field preparation",
        ],
        treatment: &[
            "Apply granular insecticides",
            "Use seed treatment",
            "Spray systemic insecticides",
            "Remove affected plants",
        ],
    },
    PestSeed {
        key: "bollworm",
        name: "Bollworm",
        icon: "🧨",
        risk_level: RiskLevel::Severe,
        description: "Caterpillars that damage cotton bolls and other crops",
        conditions: &[
            (Reading::Temperature, 20.0, 35.0),
            (Reading::Humidity, 45.0, 100.0),
            (Reading::CloudCover, 20.0, 100.0),
            (Reading::WindSpeed, 0.0, 15.0),
        ],
        activity: [10, 3, 5],
        symptoms: &["Damaged bolls", "Holes in fruits", "Caterpillars", "Reduced yield"],
        affected_crops: &["Cotton", "Tomato", "Okra", "Chickpea"],
        prevention: &[
            "Use pheromone traps",
            "Plant trap crops",
            "Regular monitoring",
            "Use Bt cotton varieties",
        ],
        treatment: &[
            "Apply specific insecticides",
            "Use biological controls",
            "Hand picking of larvae",
            "Destroy crop residue",
        ],
    },
    PestSeed {
        key: "armyworm",
        name: "Armyworm",
        icon: "🪖",
        risk_level: RiskLevel::Severe,
        description: "Destructive caterpillars that move in groups",
        conditions: &[
            (Reading::Temperature, 18.0, 35.0),
            (Reading::Humidity, 60.0, 100.0),
            (Reading::Rainfall, 0.1, 100.0),
            (Reading::CloudCover, 50.0, 100.0),
        ],
        activity: [9, 6, 4],
        symptoms: &["Chewed leaves", "Defoliation", "Cut stems", "Rapid damage"],
        affected_crops: &["Maize", "Rice", "Wheat", "Vegetables"],
        prevention: &[
            "Regular field scouting",
            "Use light traps",
            "Maintain field hygiene",
            "Plant early varieties",
        ],
        treatment: &[
            "Immediate insecticide application",
            "Biological control agents",
            "Trenching around fields",
            "Destroy egg masses",
        ],
    },
];

pub fn pests() -> Vec<Pest> {
    PESTS.iter().map(Pest::from).collect()
}

const ZONE_PEST_PRIORITIES: [(&str, &[(&str, u8)]); 9] = [
    (
        "Vidarbha",
        &[
            ("bollworm", 10),
            ("whitefly", 8),
            ("spider_mites", 6),
            ("aphids", 4),
            ("leafhopper", 3),
        ],
    ),
    (
        "High Rainfall Vidarbha",
        &[
            ("bollworm", 9),
            ("stem_borer", 7),
            ("whitefly", 6),
            ("fungal_diseases", 8),
            ("armyworm", 5),
        ],
    ),
    (
        "Marathwada",
        &[
            ("shoot_fly", 10),
            ("thrips", 6),
            ("bollworm", 5),
            ("spider_mites", 4),
            ("aphids", 3),
        ],
    ),
    (
        "Konkan",
        &[
            ("fungal_diseases", 10),
            ("stem_borer", 9),
            ("leafhopper", 6),
            ("whitefly", 5),
            ("armyworm", 4),
        ],
    ),
    (
        "Western Maharashtra",
        &[
            ("stem_borer", 9),
            ("thrips", 8),
            ("aphids", 6),
            ("whitefly", 5),
            ("fungal_diseases", 7),
        ],
    ),
    (
        "Western Ghat",
        &[
            ("fungal_diseases", 9),
            ("stem_borer", 7),
            ("leafhopper", 6),
            ("whitefly", 4),
        ],
    ),
    (
        "Scarcity Zone",
        &[
            ("spider_mites", 8),
            ("thrips", 7),
            ("shoot_fly", 6),
            ("aphids", 4),
        ],
    ),
    (
        "Transition Zone",
        &[
            ("bollworm", 7),
            ("stem_borer", 6),
            ("aphids", 5),
            ("whitefly", 5),
            ("thrips", 4),
        ],
    ),
    (
        "Assured Rainfall Zone",
        &[
            ("stem_borer", 8),
            ("bollworm", 7),
            ("fungal_diseases", 6),
            ("whitefly", 5),
        ],
    ),
];

/// Pest priority (0..=10) per agroclimatic zone, keyed by pest key.
pub fn zone_pest_priorities() -> BTreeMap<String, BTreeMap<String, u8>> {
    ZONE_PEST_PRIORITIES
        .iter()
        .map(|(zone, priorities)| {
            let table = priorities
                .iter()
                .map(|(pest, priority)| (pest.to_string(), *priority))
                .collect();
            (zone.to_string(), table)
        })
        .collect()
}
