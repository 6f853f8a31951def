//! Weighted completeness scoring.
//!
//! Each scored base field owns a 10 point slot filled by the length of its
//! answer and certifications own a 15 point bonus slot. Every answered
//! dynamic question adds a 5 point slot, and so does a non-blank
//! certifications value. Unanswered dynamic questions add nothing to either
//! side of the ratio.

pub mod rules;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::BaseField;
use super::domain::{AnsweredQuestionnaire, ProductDraft, ScoreResult};
use super::insights;
use rules::{
    certification_points, percentage, tier_points, BASE_FIELD_TIERS, BASE_FIELD_WEIGHT,
    CERTIFICATION_WEIGHT, DYNAMIC_ANSWER_TIERS, DYNAMIC_ANSWER_WEIGHT,
};

/// Discrete contribution to a score, kept so results can be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub key: String,
    pub points: u32,
    pub max_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: u8,
    pub raw_points: u32,
    pub max_points: u32,
    pub components: Vec<ScoreComponent>,
}

/// Scores a draft and its answers. Total and pure over its inputs.
pub fn tally(draft: &ProductDraft, answers: &AnsweredQuestionnaire) -> ScoreBreakdown {
    let mut components = Vec::new();

    for field in BaseField::SCORED {
        components.push(ScoreComponent {
            key: field.key().to_string(),
            points: tier_points(draft.field(field), BASE_FIELD_TIERS),
            max_points: BASE_FIELD_WEIGHT,
        });
    }

    components.push(ScoreComponent {
        key: BaseField::Certifications.key().to_string(),
        points: certification_points(&draft.certifications),
        max_points: CERTIFICATION_WEIGHT,
    });

    let certifications = Some((BaseField::Certifications.key(), draft.certifications.as_str()))
        .filter(|(_, value)| !value.trim().is_empty());
    let dynamic = answers
        .answered()
        .filter(|(id, _)| BaseField::from_key(id).is_none())
        .chain(certifications);

    for (id, value) in dynamic {
        components.push(ScoreComponent {
            key: id.to_string(),
            points: tier_points(value, DYNAMIC_ANSWER_TIERS),
            max_points: DYNAMIC_ANSWER_WEIGHT,
        });
    }

    let raw_points = components.iter().map(|c| c.points).sum();
    let max_points = components.iter().map(|c| c.max_points).sum();

    ScoreBreakdown {
        score: percentage(raw_points, max_points),
        raw_points,
        max_points,
        components,
    }
}

/// Scores and attaches insights, stamped with the supplied time.
pub fn score_at(
    draft: &ProductDraft,
    answers: &AnsweredQuestionnaire,
    computed_at: DateTime<Utc>,
) -> ScoreResult {
    let breakdown = tally(draft, answers);
    ScoreResult {
        score: breakdown.score,
        raw_points: breakdown.raw_points,
        max_points: breakdown.max_points,
        insights: insights::insights(draft, answers, breakdown.score),
        computed_at,
    }
}

pub fn score(draft: &ProductDraft, answers: &AnsweredQuestionnaire) -> ScoreResult {
    score_at(draft, answers, Utc::now())
}
