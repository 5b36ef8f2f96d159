use crate::types::scoring::{FactorScore, RatingBand, ScoreResult, MAX_SCORE};

/// Rounded sum of the sub-scores, clamped to `0..=100`.
pub fn total_score(sub_scores: &[FactorScore]) -> u8 {
    let sum: f64 = sub_scores.iter().map(|score| score.points).sum();
    if !sum.is_finite() {
        return 0;
    }
    sum.round().clamp(0.0, MAX_SCORE) as u8
}

pub fn assemble<R: RatingBand>(
    entity_id: &str,
    sub_scores: Vec<FactorScore>,
    reasons: Vec<String>,
) -> ScoreResult<R> {
    let total = total_score(&sub_scores);
    ScoreResult {
        entity_id: entity_id.to_string(),
        total_score: total,
        rating: R::from_score(f64::from(total)),
        sub_scores,
        reasons,
    }
}

/// Sort by total score, highest first. Equal scores keep their input order.
pub fn rank<R>(results: &mut [ScoreResult<R>]) {
    rank_by(results, |result| result.total_score);
}

/// [`rank`] for items that carry a score alongside other data.
pub fn rank_by<T>(items: &mut [T], score: impl Fn(&T) -> u8) {
    items.sort_by(|a, b| score(b).cmp(&score(a)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::{AlertLevel, Factor, SuitabilityRating};

    fn score(factor: Factor, ceiling: f64, points: f64) -> FactorScore {
        FactorScore::new(factor, ceiling, points, "test", false)
    }

    #[test]
    fn total_rounds_the_sum_of_sub_scores() {
        let subs = vec![
            score(Factor::Weather, 25.0, 12.4),
            score(Factor::CropRelevance, 30.0, 20.0),
            score(Factor::Season, 25.0, 22.5),
            score(Factor::Zone, 20.0, 10.0),
        ];
        assert_eq!(total_score(&subs), 65);
        assert_eq!(total_score(&[]), 0);
    }

    #[test]
    fn total_is_clamped_to_hundred() {
        let subs = vec![
            score(Factor::Weather, 60.0, 60.0),
            score(Factor::Season, 60.0, 60.0),
        ];
        assert_eq!(total_score(&subs), 100);
    }

    #[test]
    fn assemble_derives_rating_from_total() {
        let result: ScoreResult<SuitabilityRating> = assemble(
            "Rice",
            vec![score(Factor::Weather, 100.0, 85.0)],
            vec!["fits".to_string()],
        );
        assert_eq!(result.total_score, 85);
        assert_eq!(result.rating, SuitabilityRating::Excellent);

        let alert: ScoreResult<AlertLevel> =
            assemble("aphids", vec![score(Factor::Weather, 100.0, 59.6)], vec![]);
        assert_eq!(alert.total_score, 60);
        assert_eq!(alert.rating, AlertLevel::High);
    }

    #[test]
    fn rank_is_descending_and_stable_for_ties() {
        let inputs = [("a", 40.0), ("b", 70.0), ("c", 40.0), ("d", 70.0)];
        let mut results: Vec<ScoreResult<AlertLevel>> = inputs
            .into_iter()
            .map(|(id, points)| assemble(id, vec![score(Factor::Weather, 100.0, points)], vec![]))
            .collect();
        rank(&mut results);
        let order = results
            .iter()
            .map(|result| result.entity_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }
}
