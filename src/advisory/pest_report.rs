use crate::types::entity::{Pest, RiskLevel};
use serde::Serialize;
use std::collections::BTreeSet;

const GENERAL_MEASURES: [&str; 4] = [
    "🔍 Conduct daily field inspections",
    "📊 Keep detailed records of pest sightings",
    "🌡️ Monitor weather conditions regularly",
    "☎️ Contact agricultural extension officer if needed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringUrgency {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoringAdvice {
    pub frequency: &'static str,
    pub focus: String,
    pub urgency: MonitoringUrgency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub immediate_action: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PestReport {
    pub total_detected: usize,
    pub overall_risk: RiskLevel,
    pub recommendations: Vec<String>,
    pub preventive_measures: Vec<String>,
    pub monitoring: MonitoringAdvice,
}

/// Overall risk of a set of detected pests.
pub fn overall_risk(pests: &[&Pest]) -> RiskLevel {
    let count = |level| pests.iter().filter(|pest| pest.risk_level == level).count();
    let severe = count(RiskLevel::Severe);
    let high = count(RiskLevel::High);

    if severe > 0 {
        RiskLevel::Severe
    } else if high > 1 {
        RiskLevel::High
    } else if high > 0 || pests.len() > 2 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

pub fn monitoring_advice(pests: &[&Pest]) -> MonitoringAdvice {
    if pests.is_empty() {
        return MonitoringAdvice {
            frequency: "Weekly monitoring is sufficient",
            focus: "General crop health assessment".to_string(),
            urgency: MonitoringUrgency::Low,
            immediate_action: None,
        };
    }

    let severe = pests
        .iter()
        .filter(|pest| pest.risk_level == RiskLevel::Severe)
        .map(|pest| pest.name.as_str())
        .collect::<Vec<_>>();
    if !severe.is_empty() {
        return MonitoringAdvice {
            frequency: "Daily monitoring required",
            focus: format!("Focus on {}", severe.join(", ")),
            urgency: MonitoringUrgency::High,
            immediate_action: Some("Consider immediate treatment"),
        };
    }

    let names = pests
        .iter()
        .map(|pest| pest.name.as_str())
        .collect::<Vec<_>>();
    MonitoringAdvice {
        frequency: "Monitor every 2-3 days",
        focus: format!("Watch for {}", names.join(", ")),
        urgency: MonitoringUrgency::Moderate,
        immediate_action: None,
    }
}

/// Summary for pests already ranked by relevance; list order follows the ranking.
pub fn build(pests: &[&Pest]) -> PestReport {
    let mut recommendations = UniqueList::default();
    let mut measures = UniqueList::default();
    for pest in pests {
        for treatment in &pest.treatment {
            recommendations.push(format!("{} {}: {}", pest.icon, pest.name, treatment));
        }
        for prevention in &pest.prevention {
            measures.push(format!("{} {}", pest.icon, prevention));
        }
    }
    for measure in GENERAL_MEASURES {
        measures.push(measure.to_string());
    }

    PestReport {
        total_detected: pests.len(),
        overall_risk: overall_risk(pests),
        recommendations: recommendations.items,
        preventive_measures: measures.items,
        monitoring: monitoring_advice(pests),
    }
}

/// Insertion-ordered list without duplicates.
#[derive(Default)]
struct UniqueList {
    seen: BTreeSet<String>,
    items: Vec<String>,
}

impl UniqueList {
    fn push(&mut self, item: String) {
        if self.seen.insert(item.clone()) {
            self.items.push(item);
        }
    }
}
