use crate::advisory::alerts::WeatherAlerts;
use crate::advisory::irrigation::IrrigationAdvice;
use crate::advisory::operations::OperationsPlan;
use crate::advisory::{CropAdvisory, PestAdvisory};
use crate::context::season::SeasonalContext;
use crate::report::Envelope;
use crate::types::entity::Reading;
use crate::types::observation::{AdvisoryContext, Observation};
use crate::types::scoring::format_points;

/// Markdown body of an advisory; the envelope contributes the heading block.
pub trait Markdown {
    fn title(&self) -> &'static str;
    fn write_body(&self, output: &mut String);
}

pub fn to_markdown<T: Markdown>(envelope: &Envelope<'_, T>) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", envelope.advisory.title()));
    output.push_str(&format!(
        "Generated {} by smartsheti v{}\n\n",
        envelope.generated_at.format("%Y-%m-%d %H:%M UTC"),
        envelope.version
    ));
    envelope.advisory.write_body(&mut output);
    output
}

fn write_list<S: AsRef<str>>(output: &mut String, heading: &str, items: &[S]) {
    output.push_str(&format!("## {heading}\n\n"));
    if items.is_empty() {
        output.push_str("- none\n");
    } else {
        for item in items {
            output.push_str(&format!("- {}\n", item.as_ref()));
        }
    }
    output.push('\n');
}

fn write_context(output: &mut String, context: &AdvisoryContext, observation: &Observation) {
    output.push_str("## Conditions\n\n");
    output.push_str(&format!(
        "- zone: {}\n- season: {}\n",
        context.zone.as_deref().unwrap_or("unknown"),
        context
            .season
            .map(|season| season.name())
            .unwrap_or("unknown")
    ));
    for reading in Reading::ALL {
        let marker = if observation.is_defaulted(reading) {
            " (default)"
        } else {
            ""
        };
        output.push_str(&format!(
            "- {}: {:.1} {}{}\n",
            reading.label(),
            observation.get(reading),
            reading.unit(),
            marker
        ));
    }
    output.push('\n');
}

fn write_limited_data(output: &mut String, limited: bool) {
    if limited {
        output.push_str(
            "> Limited data: reference tables could not be loaded, built-in data used.\n\n",
        );
    }
}

impl Markdown for CropAdvisory {
    fn title(&self) -> &'static str {
        "Crop Recommendations"
    }

    fn write_body(&self, output: &mut String) {
        write_limited_data(output, self.limited_data);
        write_context(output, &self.context, &self.observation);

        if let Some(note) = &self.note {
            output.push_str(&format!("{note}\n"));
            return;
        }

        output.push_str("## Ranking\n\n");
        output.push_str("| # | Crop | Score | Rating | Category | Season |\n");
        output.push_str("|---|------|-------|--------|----------|--------|\n");
        for (index, recommendation) in self.recommendations.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                index + 1,
                recommendation.score.entity_id,
                recommendation.score.total_score,
                recommendation.score.rating,
                recommendation.category.key(),
                recommendation.season
            ));
        }
        output.push('\n');

        for recommendation in &self.recommendations {
            let score = &recommendation.score;
            output.push_str(&format!(
                "### {} ({}/100, {})\n\n",
                score.entity_id, score.total_score, score.rating
            ));
            for sub in &score.sub_scores {
                output.push_str(&format!("- {}: {}\n", sub.factor, sub.justification));
            }
            for reason in &score.reasons {
                output.push_str(&format!("- {reason}\n"));
            }
            if !recommendation.varieties.is_empty() {
                output.push_str(&format!(
                    "- varieties: {}\n",
                    recommendation.varieties.join(", ")
                ));
            }
            if let Some(tips) = &recommendation.cultivation_tips {
                output.push_str(&format!("- tips: {tips}\n"));
            }
            output.push('\n');
        }
    }
}

impl Markdown for PestAdvisory {
    fn title(&self) -> &'static str {
        "Pest Alerts"
    }

    fn write_body(&self, output: &mut String) {
        write_limited_data(output, self.limited_data);
        write_context(output, &self.context, &self.observation);

        output.push_str(&format!(
            "Overall risk: {} ({} detected)\n\n",
            self.report.overall_risk, self.report.total_detected
        ));

        output.push_str("## Alerts\n\n");
        if self.alerts.is_empty() {
            output.push_str("- no pest conditions met\n\n");
        }
        for alert in &self.alerts {
            let score = &alert.score;
            output.push_str(&format!(
                "### {} {} [{}] {}/100\n\n",
                alert.icon, alert.name, score.rating, score.total_score
            ));
            if !alert.description.is_empty() {
                output.push_str(&format!("{}\n\n", alert.description));
            }
            for sub in &score.sub_scores {
                output.push_str(&format!("- {}: {}\n", sub.factor, sub.justification));
            }
            for reason in &score.reasons {
                output.push_str(&format!("- {reason}\n"));
            }
            if !alert.symptoms.is_empty() {
                output.push_str(&format!("- symptoms: {}\n", alert.symptoms.join("; ")));
            }
            output.push('\n');
        }

        write_list(output, "Treatment", &self.report.recommendations);
        write_list(output, "Prevention", &self.report.preventive_measures);

        let monitoring = &self.report.monitoring;
        output.push_str("## Monitoring\n\n");
        output.push_str(&format!(
            "- {}\n- {}\n",
            monitoring.frequency, monitoring.focus
        ));
        if let Some(action) = monitoring.immediate_action {
            output.push_str(&format!("- {action}\n"));
        }
    }
}

impl Markdown for IrrigationAdvice {
    fn title(&self) -> &'static str {
        "Irrigation Advice"
    }

    fn write_body(&self, output: &mut String) {
        if let Some(crop) = &self.crop {
            output.push_str(&format!("Crop: {crop}\n"));
        }
        if let Some(zone) = &self.zone {
            output.push_str(&format!("Zone: {zone}\n"));
        }
        output.push_str(&format!(
            "\n- ET0: {} mm/day\n- crop ET: {} mm/day\n- rainfall: {} mm\n- urgency: {:?}\n\
             - recommended amount: {} mm\n- water stress: {:?}\n- best time: {}\n\n",
            format_points(self.et0_mm),
            format_points(self.crop_et_mm),
            format_points(self.rainfall_mm),
            self.urgency,
            format_points(self.recommended_amount_mm),
            self.water_stress,
            self.best_time
        ));
        write_list(output, "Recommendations", &self.recommendations);
        write_list(output, "Efficiency Tips", &self.efficiency_tips);
    }
}

impl Markdown for SeasonalContext {
    fn title(&self) -> &'static str {
        "Season"
    }

    fn write_body(&self, output: &mut String) {
        output.push_str(&format!(
            "{} season: {}\n\n- sowing: {}\n- harvest: {}\n- monsoon: {}\n\n",
            self.season,
            self.description,
            self.sowing_period,
            self.harvest_period,
            if self.is_monsoon { "yes" } else { "no" }
        ));
        output.push_str("## Activities\n\n");
        if self.activities.is_empty() {
            output.push_str("- none\n");
        }
        for activity in &self.activities {
            output.push_str(&format!("- [{:?}] {}", activity.priority, activity.description));
            if !activity.crops.is_empty() {
                output.push_str(&format!(" ({})", activity.crops.join(", ")));
            }
            output.push('\n');
        }
    }
}

impl Markdown for WeatherAlerts {
    fn title(&self) -> &'static str {
        "Weather Alerts"
    }

    fn write_body(&self, output: &mut String) {
        output.push_str(&format!(
            "Zone: {}, month: {}\n\n",
            self.zone.as_deref().unwrap_or("unknown"),
            self.month
        ));
        if self.alerts.is_empty() {
            output.push_str("- no weather alerts\n");
            return;
        }
        for alert in &self.alerts {
            output.push_str(&format!(
                "## {} {} [{}]\n\n{}\n\n",
                alert.icon, alert.title, alert.severity, alert.message
            ));
            output.push_str(&format!("- zones: {}\n", alert.affected_zones.join(", ")));
            if let Some(concern) = alert.special_concern {
                output.push_str(&format!("- concern: {concern}\n"));
            }
            for recommendation in &alert.recommendations {
                output.push_str(&format!("- {recommendation}\n"));
            }
            output.push('\n');
        }
    }
}

impl Markdown for OperationsPlan {
    fn title(&self) -> &'static str {
        "Farm Operations"
    }

    fn write_body(&self, output: &mut String) {
        for day in &self.days {
            match &day.weather.label {
                Some(label) => output.push_str(&format!("## Day {} ({label})\n\n", day.day)),
                None => output.push_str(&format!("## Day {}\n\n", day.day)),
            }
            output.push_str("| Activity | Score | Rating | Best time | Notes |\n");
            output.push_str("|----------|-------|--------|-----------|-------|\n");
            for score in &day.scores {
                output.push_str(&format!(
                    "| {} {} | {} | {} | {} | {} |\n",
                    score.activity.icon(),
                    score.activity.name(),
                    score.score,
                    score.rating,
                    score.best_time,
                    score.warnings.join("; ")
                ));
            }
            output.push('\n');
        }

        output.push_str("## Best Days\n\n");
        if self.best_days.is_empty() {
            output.push_str("- none\n");
        }
        for (activity, best) in &self.best_days {
            output.push_str(&format!(
                "- {}: day {} ({}/100, {})\n",
                activity.name(),
                best.day,
                best.score,
                best.rating
            ));
        }
        output.push('\n');

        let warnings: Vec<&str> = self
            .warnings
            .iter()
            .map(|warning| warning.message.as_str())
            .collect();
        write_list(output, "Warnings", &warnings);
    }
}
