use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::scoring::scoring_model::{
    Criteria, CriterionScore, RiskLabel, DIRECTION_LOWER_BETTER, KIND_BOOLEAN,
};
use crate::students::Student;

lazy_static! {
    /// Fixed mapping from recorded profile text values to numeric scores.
    /// Values not listed here score 0.
    static ref TEXT_SCORES: HashMap<&'static str, f64> = {
        let mut m = HashMap::new();
        m.insert("ضعيف", 0.0);
        m.insert("متوسط", 50.0);
        m.insert("جيد", 100.0);
        m.insert("ابتدائي", 30.0);
        m.insert("اعدادي", 60.0);
        m.insert("ثانوي", 100.0);
        m
    };
}

pub fn text_score(value: &str) -> f64 {
    TEXT_SCORES.get(value).copied().unwrap_or(0.0)
}

/// Derives a criterion value from the student profile field named by
/// `source_field`. Returns None when the criterion declares no source field;
/// a declared but empty or unknown field derives 0.
pub fn derive_value(criteria: &Criteria, student: &Student) -> Option<f64> {
    let field = criteria.source_field.as_deref()?;

    let value = match field {
        "monthly_income" => student.monthly_income.unwrap_or(0.0),
        "education_gap_years" => student.education_gap_years.map(f64::from).unwrap_or(0.0),
        "family_size" => student.family_size.map(f64::from).unwrap_or(0.0),
        "has_disability" => {
            if student.has_disability {
                1.0
            } else {
                0.0
            }
        }
        "education_level" => student
            .education_level
            .as_deref()
            .map(text_score)
            .unwrap_or(0.0),
        "literacy_level" => student
            .literacy_level
            .as_deref()
            .map(text_score)
            .unwrap_or(0.0),
        "housing_status" => student
            .housing_status
            .as_deref()
            .map(text_score)
            .unwrap_or(0.0),
        _ => 0.0,
    };

    Some(value)
}

/// Normalizes a raw criterion value to [0, 1], higher meaning more at-risk.
///
/// With both bounds defined and max > min the value is range-scaled;
/// otherwise the raw value is assumed to already sit on a 0-100 scale.
/// LOWER_BETTER criteria are inverted, and the result is clamped so
/// out-of-range raw values saturate instead of being rejected.
pub fn normalized_value(criteria: &Criteria, raw: f64) -> f64 {
    let mut normalized = match (criteria.min_value, criteria.max_value) {
        (Some(min), Some(max)) if max > min => (raw - min) / (max - min),
        // Booleans are already on a 0..1 scale; everything else without
        // bounds is assumed to sit on 0..100.
        _ if criteria.kind == KIND_BOOLEAN => raw,
        _ => raw / 100.0,
    };

    if criteria.direction == DIRECTION_LOWER_BETTER {
        normalized = 1.0 - normalized;
    }

    normalized.clamp(0.0, 1.0)
}

pub fn label_for_score(score: i32) -> RiskLabel {
    if score >= 80 {
        RiskLabel::Critical
    } else if score >= 60 {
        RiskLabel::High
    } else if score >= 40 {
        RiskLabel::Medium
    } else {
        RiskLabel::Low
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Weighted aggregation over (criterion, raw value) pairs. Empty input yields
/// the UNASSESSED sentinel.
pub fn aggregate(values: &[(Criteria, f64)]) -> (i32, RiskLabel, Vec<CriterionScore>) {
    if values.is_empty() {
        return (0, RiskLabel::Unassessed, Vec::new());
    }

    let mut total_weight = 0.0;
    let mut weighted_sum = 0.0;

    let breakdown = values
        .iter()
        .map(|(criteria, raw)| {
            let normalized = normalized_value(criteria, *raw);
            let contribution = normalized * criteria.weight;

            total_weight += criteria.weight;
            weighted_sum += contribution;

            CriterionScore {
                criteria: criteria.key.clone(),
                name: criteria.name.clone(),
                raw_value: *raw,
                normalized: round3(normalized),
                weight: criteria.weight,
                contribution: round3(contribution),
            }
        })
        .collect();

    let score = if total_weight > 0.0 {
        (weighted_sum / total_weight * 100.0).round() as i32
    } else {
        0
    };

    (score, label_for_score(score), breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn criteria(
        key: &str,
        direction: &str,
        min: Option<f64>,
        max: Option<f64>,
        weight: f64,
    ) -> Criteria {
        Criteria {
            id: format!("crit-{}", key),
            key: key.to_string(),
            name: key.to_string(),
            kind: "NUMBER".to_string(),
            direction: direction.to_string(),
            min_value: min,
            max_value: max,
            weight,
            source_field: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn out_of_range_value_saturates() {
        let c = criteria("income", "HIGHER_BETTER", Some(0.0), Some(1000.0), 1.0);
        assert_eq!(normalized_value(&c, 5000.0), 1.0);
        assert_eq!(normalized_value(&c, -50.0), 0.0);
    }

    #[test]
    fn lower_better_inverts() {
        let c = criteria("absences", "LOWER_BETTER", Some(0.0), Some(5.0), 1.0);
        assert_eq!(normalized_value(&c, 0.0), 1.0);
        assert_eq!(normalized_value(&c, 5.0), 0.0);
    }

    #[test]
    fn missing_bounds_fall_back_to_percent_scale() {
        let c = criteria("attendance", "HIGHER_BETTER", None, None, 1.0);
        assert_eq!(normalized_value(&c, 50.0), 0.5);
    }

    #[test]
    fn label_bands() {
        assert_eq!(label_for_score(80), RiskLabel::Critical);
        assert_eq!(label_for_score(79), RiskLabel::High);
        assert_eq!(label_for_score(60), RiskLabel::High);
        assert_eq!(label_for_score(40), RiskLabel::Medium);
        assert_eq!(label_for_score(39), RiskLabel::Low);
        assert_eq!(label_for_score(0), RiskLabel::Low);
    }

    #[test]
    fn weighted_mean_matches_worked_example() {
        // income 300 in [0,1000] LOWER_BETTER weight 2 -> 0.7
        // disability true (boolean, no bounds) weight 1.8 -> 1.0
        // score = round((0.7*2 + 1.0*1.8) / 3.8 * 100) = 84
        let income = criteria("monthly_income", "LOWER_BETTER", Some(0.0), Some(1000.0), 2.0);
        let mut disability = criteria("has_disability", "HIGHER_BETTER", None, None, 1.8);
        disability.kind = "BOOLEAN".to_string();

        let (score, label, breakdown) = aggregate(&[(income, 300.0), (disability, 1.0)]);
        assert_eq!(score, 84);
        assert_eq!(label, RiskLabel::Critical);
        assert_eq!(breakdown[0].normalized, 0.7);
        assert_eq!(breakdown[0].contribution, 1.4);
        assert_eq!(breakdown[1].normalized, 1.0);
        assert_eq!(breakdown[1].contribution, 1.8);
    }

    #[test]
    fn no_criteria_is_unassessed() {
        let (score, label, breakdown) = aggregate(&[]);
        assert_eq!(score, 0);
        assert_eq!(label, RiskLabel::Unassessed);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn unknown_text_scores_zero() {
        assert_eq!(text_score("غير معروف"), 0.0);
        assert_eq!(text_score("جيد"), 100.0);
    }
}
