use serde::{Deserialize, Serialize};
use std::fmt;

/// Product categories recognised by the question templates.
///
/// Labels are the exact strings submitted by the intake form. Anything else
/// coerces to [`ProductCategory::Other`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ProductCategory {
    FoodAndBeverages,
    CosmeticsAndPersonalCare,
    SupplementsAndVitamins,
    HouseholdProducts,
    TextilesAndClothing,
    Electronics,
    #[default]
    Other,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 7] = [
        ProductCategory::FoodAndBeverages,
        ProductCategory::CosmeticsAndPersonalCare,
        ProductCategory::SupplementsAndVitamins,
        ProductCategory::HouseholdProducts,
        ProductCategory::TextilesAndClothing,
        ProductCategory::Electronics,
        ProductCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::FoodAndBeverages => "Food & Beverages",
            ProductCategory::CosmeticsAndPersonalCare => "Cosmetics & Personal Care",
            ProductCategory::SupplementsAndVitamins => "Supplements & Vitamins",
            ProductCategory::HouseholdProducts => "Household Products",
            ProductCategory::TextilesAndClothing => "Textiles & Clothing",
            ProductCategory::Electronics => "Electronics",
            ProductCategory::Other => "Other",
        }
    }

    /// Case-insensitive label lookup; unknown labels become `Other`.
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .unwrap_or(ProductCategory::Other)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ProductCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ProductCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_label(&raw))
    }
}

/// Fixed intake fields every submission carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseField {
    ProductName,
    Category,
    Brand,
    Description,
    Ingredients,
    Sourcing,
    Manufacturing,
    Certifications,
}

impl BaseField {
    pub const ALL: [BaseField; 8] = [
        BaseField::ProductName,
        BaseField::Category,
        BaseField::Brand,
        BaseField::Description,
        BaseField::Ingredients,
        BaseField::Sourcing,
        BaseField::Manufacturing,
        BaseField::Certifications,
    ];

    /// Fields that each own a 10 point slot in the completeness ceiling.
    pub const SCORED: [BaseField; 7] = [
        BaseField::ProductName,
        BaseField::Category,
        BaseField::Brand,
        BaseField::Description,
        BaseField::Ingredients,
        BaseField::Sourcing,
        BaseField::Manufacturing,
    ];

    /// Free-text fields whose substance, not just presence, drives the score.
    pub const DEPTH_SCORED: [BaseField; 4] = [
        BaseField::Description,
        BaseField::Ingredients,
        BaseField::Sourcing,
        BaseField::Manufacturing,
    ];

    /// Wire key used by the intake form and the scoring service.
    pub fn key(&self) -> &'static str {
        match self {
            BaseField::ProductName => "productName",
            BaseField::Category => "category",
            BaseField::Brand => "brand",
            BaseField::Description => "description",
            BaseField::Ingredients => "ingredients",
            BaseField::Sourcing => "sourcing",
            BaseField::Manufacturing => "manufacturing",
            BaseField::Certifications => "certifications",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn is_depth_scored(&self) -> bool {
        Self::DEPTH_SCORED.contains(self)
    }
}
