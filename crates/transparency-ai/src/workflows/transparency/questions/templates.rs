use super::super::catalog::{BaseField, ProductCategory};
use super::super::domain::{InputKind, QuestionSpec};

pub const NUTRITIONAL_INFO: &str = "nutritional_info";
pub const PRESERVATIVES: &str = "preservatives";
pub const SHELF_LIFE: &str = "shelf_life";
pub const ALLERGEN_TESTING: &str = "allergen_testing";
pub const SKIN_TYPE: &str = "skin_type";
pub const ANIMAL_TESTING: &str = "animal_testing";
pub const PACKAGING_MATERIAL: &str = "packaging_material";
pub const DOSAGE_INSTRUCTIONS: &str = "dosage_instructions";
pub const THIRD_PARTY_TESTING: &str = "third_party_testing";
pub const CONTRAINDICATIONS: &str = "contraindications";
pub const QUALITY_STANDARDS: &str = "quality_standards";
pub const ENVIRONMENTAL_IMPACT: &str = "environmental_impact";
pub const ORGANIC_CERTIFICATION: &str = "organic_certification";
pub const SUPPLIER_AUDIT_FREQUENCY: &str = "supplier_audit_frequency";
pub const TRACEABILITY_LEVEL: &str = "traceability_level";
pub const SOCIAL_RESPONSIBILITY: &str = "social_responsibility";

/// Static description of a follow-up question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTemplate {
    pub id: &'static str,
    pub prompt: &'static str,
    pub input_kind: InputKind,
    pub options: &'static [&'static str],
    pub required: bool,
    pub topic: &'static str,
}

impl QuestionTemplate {
    pub fn to_spec(&self) -> QuestionSpec {
        QuestionSpec {
            id: self.id.to_string(),
            prompt: self.prompt.to_string(),
            input_kind: self.input_kind,
            options: self.options.iter().map(|option| option.to_string()).collect(),
            required: self.required,
            topic_tag: Some(self.topic.to_string()),
        }
    }
}

/// Appends `template` when `field` contains `keyword` (ASCII case-insensitive).
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub field: BaseField,
    pub keyword: &'static str,
    pub template: &'static QuestionTemplate,
}

impl KeywordRule {
    pub fn matches(&self, value: &str) -> bool {
        value
            .to_ascii_lowercase()
            .contains(&self.keyword.to_ascii_lowercase())
    }
}

const fn long_text(
    id: &'static str,
    prompt: &'static str,
    required: bool,
    topic: &'static str,
) -> QuestionTemplate {
    QuestionTemplate {
        id,
        prompt,
        input_kind: InputKind::LongText,
        options: &[],
        required,
        topic,
    }
}

const fn single_select(
    id: &'static str,
    prompt: &'static str,
    options: &'static [&'static str],
    topic: &'static str,
) -> QuestionTemplate {
    QuestionTemplate {
        id,
        prompt,
        input_kind: InputKind::SingleSelect,
        options,
        required: true,
        topic,
    }
}

pub const SHELF_LIFE_SCALE: &[&str] = &[
    "Less than 1 month",
    "1-3 months",
    "3-6 months",
    "6-12 months",
    "More than 1 year",
];

pub const AUDIT_FREQUENCY_SCALE: &[&str] = &["Monthly", "Quarterly", "Annually", "As needed", "Never"];

pub const TRACEABILITY_SCALE: &[&str] = &[
    "Complete traceability",
    "Partial traceability",
    "Limited traceability",
    "No traceability",
];

pub(crate) const FOOD_AND_BEVERAGES: &[QuestionTemplate] = &[
    long_text(
        NUTRITIONAL_INFO,
        "Please provide detailed nutritional information per serving",
        true,
        "nutrition",
    ),
    long_text(
        PRESERVATIVES,
        "What preservatives, if any, are used in this product?",
        false,
        "ingredients",
    ),
    single_select(
        SHELF_LIFE,
        "What is the typical shelf life of this product?",
        SHELF_LIFE_SCALE,
        "storage",
    ),
    long_text(
        ALLERGEN_TESTING,
        "How do you test for and prevent cross-contamination with allergens?",
        true,
        "safety",
    ),
];

pub(crate) const COSMETICS_AND_PERSONAL_CARE: &[QuestionTemplate] = &[
    single_select(
        SKIN_TYPE,
        "What skin types is this product suitable for?",
        &[
            "All skin types",
            "Dry skin",
            "Oily skin",
            "Sensitive skin",
            "Combination skin",
        ],
        "suitability",
    ),
    single_select(
        ANIMAL_TESTING,
        "Has this product or its ingredients been tested on animals?",
        &[
            "No, never tested on animals",
            "Not tested by us, but suppliers may have",
            "Yes, tested on animals",
            "Unknown",
        ],
        "ethics",
    ),
    long_text(
        PACKAGING_MATERIAL,
        "What materials are used in the product packaging?",
        true,
        "packaging",
    ),
];

pub(crate) const SUPPLEMENTS_AND_VITAMINS: &[QuestionTemplate] = &[
    long_text(
        DOSAGE_INSTRUCTIONS,
        "What are the recommended dosage instructions?",
        true,
        "usage",
    ),
    single_select(
        THIRD_PARTY_TESTING,
        "Is this product third-party tested for purity and potency?",
        &[
            "Yes, by certified labs",
            "Yes, internally tested",
            "No testing performed",
            "Unknown",
        ],
        "quality",
    ),
    long_text(
        CONTRAINDICATIONS,
        "Are there any known contraindications or interactions?",
        true,
        "safety",
    ),
];

pub(crate) const GENERIC: &[QuestionTemplate] = &[
    long_text(
        QUALITY_STANDARDS,
        "What quality standards does your product meet?",
        true,
        "quality",
    ),
    long_text(
        ENVIRONMENTAL_IMPACT,
        "How does your product minimize environmental impact?",
        false,
        "sustainability",
    ),
];

const ORGANIC_CERTIFICATION_TEMPLATE: QuestionTemplate = long_text(
    ORGANIC_CERTIFICATION,
    "Please provide details about your organic certification",
    true,
    "certifications",
);

pub(crate) const KEYWORD_RULES: &[KeywordRule] = &[KeywordRule {
    field: BaseField::Ingredients,
    keyword: "organic",
    template: &ORGANIC_CERTIFICATION_TEMPLATE,
}];

pub(crate) const SUPPLY_CHAIN: &[QuestionTemplate] = &[
    single_select(
        SUPPLIER_AUDIT_FREQUENCY,
        "How often do you audit your suppliers?",
        AUDIT_FREQUENCY_SCALE,
        "supply_chain",
    ),
    single_select(
        TRACEABILITY_LEVEL,
        "Can you trace this product back to its raw material sources?",
        TRACEABILITY_SCALE,
        "supply_chain",
    ),
    long_text(
        SOCIAL_RESPONSIBILITY,
        "What social responsibility initiatives does your company support?",
        false,
        "ethics",
    ),
];

/// Category-specific block; categories without a dedicated table share the
/// generic quality/sustainability pair.
pub fn category_templates(category: ProductCategory) -> &'static [QuestionTemplate] {
    match category {
        ProductCategory::FoodAndBeverages => FOOD_AND_BEVERAGES,
        ProductCategory::CosmeticsAndPersonalCare => COSMETICS_AND_PERSONAL_CARE,
        ProductCategory::SupplementsAndVitamins => SUPPLEMENTS_AND_VITAMINS,
        ProductCategory::HouseholdProducts
        | ProductCategory::TextilesAndClothing
        | ProductCategory::Electronics
        | ProductCategory::Other => GENERIC,
    }
}
