//! Rule-based follow-up question generation.
//!
//! Output order is fixed: the category block, then keyword-triggered
//! questions, then the supply-chain block shared by every category.

pub mod templates;

use std::collections::BTreeSet;

use super::catalog::ProductCategory;
use super::domain::{ProductDraft, QuestionSpec};
use templates::{category_templates, QuestionTemplate, KEYWORD_RULES, SUPPLY_CHAIN};

/// Builds the questionnaire for a draft. Pure; unknown categories use the
/// generic template.
pub fn generate(draft: &ProductDraft) -> Vec<QuestionSpec> {
    let category = draft.category();

    let conditional = KEYWORD_RULES
        .iter()
        .filter(|rule| rule.matches(draft.field(rule.field)))
        .map(|rule| rule.template);

    let ordered = category_templates(category)
        .iter()
        .chain(conditional)
        .chain(SUPPLY_CHAIN.iter());

    let mut seen = BTreeSet::new();
    ordered
        .filter(|template| seen.insert(template.id))
        .map(QuestionTemplate::to_spec)
        .collect()
}

/// Category label → the category-specific block, for template listings.
pub fn template_catalog() -> Vec<(ProductCategory, Vec<QuestionSpec>)> {
    ProductCategory::ALL
        .into_iter()
        .map(|category| {
            let specs = category_templates(category)
                .iter()
                .map(QuestionTemplate::to_spec)
                .collect();
            (category, specs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::templates::*;
    use super::*;
    use crate::workflows::transparency::catalog::BaseField;
    use crate::workflows::transparency::domain::{validate_questions, InputKind};

    fn ids(questions: &[QuestionSpec]) -> Vec<&str> {
        questions.iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn organic_green_tea_gets_food_block_plus_certification_and_supply_chain() {
        let draft = ProductDraft::new("Organic Green Tea", "Food & Beverages")
            .with_field(BaseField::Ingredients, "Organic green tea leaves");

        let questions = generate(&draft);

        assert_eq!(
            ids(&questions),
            vec![
                NUTRITIONAL_INFO,
                PRESERVATIVES,
                SHELF_LIFE,
                ALLERGEN_TESTING,
                ORGANIC_CERTIFICATION,
                SUPPLIER_AUDIT_FREQUENCY,
                TRACEABILITY_LEVEL,
                SOCIAL_RESPONSIBILITY,
            ]
        );
        let shelf_life = &questions[2];
        assert_eq!(shelf_life.input_kind, InputKind::SingleSelect);
        assert_eq!(shelf_life.options.len(), 5);
        assert!(shelf_life.required);
        assert!(!questions[1].required);
    }

    #[test]
    fn organic_keyword_is_case_insensitive_and_only_added_once() {
        for ingredients in ["ORGANIC cane sugar", "certified OrGaNiC oats, organic salt"] {
            let draft = ProductDraft::new("Granola", "Food & Beverages")
                .with_field(BaseField::Ingredients, ingredients);
            let count = generate(&draft)
                .iter()
                .filter(|q| q.id == ORGANIC_CERTIFICATION)
                .count();
            assert_eq!(count, 1, "ingredients: {ingredients}");
        }

        let plain = ProductDraft::new("Granola", "Food & Beverages")
            .with_field(BaseField::Ingredients, "oats, honey")
            .with_field(BaseField::Description, "organic farming partner");
        assert!(generate(&plain).iter().all(|q| q.id != ORGANIC_CERTIFICATION));
    }

    #[test]
    fn unknown_category_uses_generic_template() {
        let draft = ProductDraft::new("Drill", "Power Tools");
        assert_eq!(
            ids(&generate(&draft)),
            vec![
                QUALITY_STANDARDS,
                ENVIRONMENTAL_IMPACT,
                SUPPLIER_AUDIT_FREQUENCY,
                TRACEABILITY_LEVEL,
                SOCIAL_RESPONSIBILITY,
            ]
        );
    }

    #[test]
    fn cosmetics_include_animal_testing() {
        let draft = ProductDraft::new("Face Cream", "Cosmetics & Personal Care");
        let questions = generate(&draft);
        assert_eq!(&ids(&questions)[..3], &[SKIN_TYPE, ANIMAL_TESTING, PACKAGING_MATERIAL]);
    }

    #[test]
    fn every_category_yields_a_valid_deterministic_list() {
        for category in ProductCategory::ALL {
            let draft = ProductDraft::new("Sample", category.label())
                .with_field(BaseField::Ingredients, "organic cotton");
            let first = generate(&draft);
            validate_questions(&first).expect("generated questions are valid");
            assert_eq!(first, generate(&draft));
            assert_eq!(first.last().map(|q| q.id.as_str()), Some(SOCIAL_RESPONSIBILITY));
        }
    }

    #[test]
    fn template_catalog_lists_every_category() {
        let catalog = template_catalog();
        assert_eq!(catalog.len(), ProductCategory::ALL.len());
        let (_, electronics) = catalog
            .iter()
            .find(|(category, _)| *category == ProductCategory::Electronics)
            .expect("electronics listed");
        assert_eq!(ids(electronics), vec![QUALITY_STANDARDS, ENVIRONMENTAL_IMPACT]);
    }
}
