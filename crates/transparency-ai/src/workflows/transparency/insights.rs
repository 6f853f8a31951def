use serde::{Deserialize, Serialize};

use super::catalog::ProductCategory;
use super::domain::{AnsweredQuestionnaire, ProductDraft};
use super::questions::templates::{
    ALLERGEN_TESTING, ANIMAL_TESTING, NUTRITIONAL_INFO, SUPPLIER_AUDIT_FREQUENCY,
    TRACEABILITY_LEVEL,
};

pub const EXCELLENT_MESSAGE: &str =
    "Excellent transparency! Your product demonstrates high levels of openness and accountability.";
pub const GOOD_MESSAGE: &str = "Good transparency with room for improvement in some areas.";
pub const NEEDS_DETAIL_MESSAGE: &str =
    "Consider providing more detailed information to improve transparency.";

/// Score band driving the leading insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransparencyTier {
    Excellent,
    Good,
    NeedsDetail,
}

impl TransparencyTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => TransparencyTier::Excellent,
            60..=79 => TransparencyTier::Good,
            _ => TransparencyTier::NeedsDetail,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            TransparencyTier::Excellent => EXCELLENT_MESSAGE,
            TransparencyTier::Good => GOOD_MESSAGE,
            TransparencyTier::NeedsDetail => NEEDS_DETAIL_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    Unanswered,
    UnansweredOr(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct Advisory {
    category: Option<ProductCategory>,
    question_id: &'static str,
    trigger: Trigger,
    message: &'static str,
}

impl Advisory {
    fn applies(&self, category: ProductCategory, answers: &AnsweredQuestionnaire) -> bool {
        if self.category.is_some_and(|required| required != category) {
            return false;
        }
        match (self.trigger, answers.get(self.question_id)) {
            (_, None) => true,
            (Trigger::Unanswered, Some(_)) => false,
            (Trigger::UnansweredOr(flagged), Some(answer)) => answer == flagged,
        }
    }
}

const ADVISORIES: &[Advisory] = &[
    Advisory {
        category: Some(ProductCategory::FoodAndBeverages),
        question_id: NUTRITIONAL_INFO,
        trigger: Trigger::Unanswered,
        message: "Consider adding detailed nutritional information to help consumers make informed choices.",
    },
    Advisory {
        category: Some(ProductCategory::FoodAndBeverages),
        question_id: ALLERGEN_TESTING,
        trigger: Trigger::Unanswered,
        message: "Allergen testing information would enhance consumer trust and safety.",
    },
    Advisory {
        category: Some(ProductCategory::CosmeticsAndPersonalCare),
        question_id: ANIMAL_TESTING,
        trigger: Trigger::Unanswered,
        message: "Clear animal testing policies are increasingly important to consumers.",
    },
    Advisory {
        category: None,
        question_id: SUPPLIER_AUDIT_FREQUENCY,
        trigger: Trigger::UnansweredOr("Never"),
        message: "Regular supplier audits demonstrate commitment to quality and ethical sourcing.",
    },
    Advisory {
        category: None,
        question_id: TRACEABILITY_LEVEL,
        trigger: Trigger::UnansweredOr("No traceability"),
        message: "Implementing supply chain traceability can significantly improve transparency scores.",
    },
];

/// Tier message first, then category advisories, then universal ones.
pub fn insights(draft: &ProductDraft, answers: &AnsweredQuestionnaire, score: u8) -> Vec<String> {
    let category = draft.category();
    std::iter::once(TransparencyTier::from_score(score).message())
        .chain(
            ADVISORIES
                .iter()
                .filter(|advisory| advisory.applies(category, answers))
                .map(|advisory| advisory.message),
        )
        .map(str::to_string)
        .collect()
}
