use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog::{BaseField, ProductCategory};

/// In-progress product description captured by the intake form.
///
/// `category` keeps the submitted label verbatim so it can be forwarded to the
/// scoring service untouched; [`ProductDraft::category`] performs the lenient
/// lookup used by the rule tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub product_name: String,
    #[serde(rename = "category")]
    pub category_label: String,
    pub brand: String,
    pub description: String,
    pub ingredients: String,
    pub sourcing: String,
    pub manufacturing: String,
    pub certifications: String,
}

impl ProductDraft {
    pub fn new(product_name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            category_label: category.into(),
            ..Self::default()
        }
    }

    pub fn category(&self) -> ProductCategory {
        ProductCategory::from_label(&self.category_label)
    }

    pub fn field(&self, field: BaseField) -> &str {
        match field {
            BaseField::ProductName => &self.product_name,
            BaseField::Category => &self.category_label,
            BaseField::Brand => &self.brand,
            BaseField::Description => &self.description,
            BaseField::Ingredients => &self.ingredients,
            BaseField::Sourcing => &self.sourcing,
            BaseField::Manufacturing => &self.manufacturing,
            BaseField::Certifications => &self.certifications,
        }
    }

    pub fn set_field(&mut self, field: BaseField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BaseField::ProductName => self.product_name = value,
            BaseField::Category => self.category_label = value,
            BaseField::Brand => self.brand = value,
            BaseField::Description => self.description = value,
            BaseField::Ingredients => self.ingredients = value,
            BaseField::Sourcing => self.sourcing = value,
            BaseField::Manufacturing => self.manufacturing = value,
            BaseField::Certifications => self.certifications = value,
        }
    }

    pub fn with_field(mut self, field: BaseField, value: impl Into<String>) -> Self {
        self.set_field(field, value);
        self
    }

    /// Flat string map in the shape the scoring service expects.
    pub fn to_form_map(&self) -> BTreeMap<String, String> {
        BaseField::ALL
            .into_iter()
            .map(|field| (field.key().to_string(), self.field(field).to_string()))
            .collect()
    }
}

/// Splits a flat form payload into the fixed draft fields and the dynamic
/// answers. Non-string values are treated as absent.
pub fn split_form_fields<I>(fields: I) -> (ProductDraft, AnsweredQuestionnaire)
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut draft = ProductDraft::default();
    let mut answers = AnsweredQuestionnaire::new();

    for (key, value) in fields {
        let Value::String(text) = value else {
            continue;
        };
        match BaseField::from_key(&key) {
            Some(field) => draft.set_field(field, text),
            None => answers.answer(key, text),
        }
    }

    (draft, answers)
}

/// How the follow-up question is rendered and answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    ShortText,
    LongText,
    SingleSelect,
}

/// A generated follow-up question. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSpec {
    pub id: String,
    pub prompt: String,
    pub input_kind: InputKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_tag: Option<String>,
}

impl QuestionSpec {
    pub fn validate(&self) -> Result<(), QuestionSpecError> {
        if self.id.trim().is_empty() {
            return Err(QuestionSpecError::MissingId);
        }
        if self.prompt.trim().is_empty() {
            return Err(QuestionSpecError::MissingPrompt(self.id.clone()));
        }
        match (self.input_kind, self.options.is_empty()) {
            (InputKind::SingleSelect, true) => {
                Err(QuestionSpecError::MissingOptions(self.id.clone()))
            }
            (InputKind::ShortText | InputKind::LongText, false) => {
                Err(QuestionSpecError::UnexpectedOptions(self.id.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// Checks each question and that ids are unique within the list.
pub fn validate_questions(questions: &[QuestionSpec]) -> Result<(), QuestionSpecError> {
    let mut seen = BTreeSet::new();
    for question in questions {
        question.validate()?;
        if !seen.insert(question.id.as_str()) {
            return Err(QuestionSpecError::DuplicateId(question.id.clone()));
        }
    }
    Ok(())
}

/// Checks that a questionnaire shown to a submitter asks the same questions,
/// with the same `required` flags, as the authoritative `generated` list.
pub fn ensure_same_questionnaire(
    shown: &[QuestionSpec],
    generated: &[QuestionSpec],
) -> Result<(), QuestionSpecError> {
    let signature = |questions: &[QuestionSpec]| -> BTreeSet<(String, bool)> {
        questions
            .iter()
            .map(|question| (question.id.clone(), question.required))
            .collect()
    };
    if shown.len() == generated.len() && signature(shown) == signature(generated) {
        Ok(())
    } else {
        Err(QuestionSpecError::Mismatch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionSpecError {
    #[error("question is missing an id")]
    MissingId,
    #[error("question `{0}` has an empty prompt")]
    MissingPrompt(String),
    #[error("single-select question `{0}` has no options")]
    MissingOptions(String),
    #[error("free-text question `{0}` carries select options")]
    UnexpectedOptions(String),
    #[error("question id `{0}` appears more than once")]
    DuplicateId(String),
    #[error("questionnaire differs from the questions generated for this draft")]
    Mismatch,
}

/// Answers keyed by [`QuestionSpec::id`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnsweredQuestionnaire(BTreeMap<String, String>);

impl AnsweredQuestionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn with_answer(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.answer(id, value);
        self
    }

    /// The stored answer, or `None` when missing or whitespace-only.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0
            .get(id)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn is_answered(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Entries with a non-blank answer, in key order.
    pub fn answered(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops answers whose key is neither a base field nor one of `questions`,
    /// returning the discarded ids. Call after regenerating questions for a
    /// changed category.
    pub fn retain_generated(&mut self, questions: &[QuestionSpec]) -> Vec<String> {
        let current: BTreeSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        let stale: Vec<String> = self
            .0
            .keys()
            .filter(|key| !current.contains(key.as_str()) && BaseField::from_key(key).is_none())
            .cloned()
            .collect();
        for key in &stale {
            self.0.remove(key);
        }
        stale
    }

    /// Ids of required questions that still lack a non-blank answer.
    pub fn missing_required<'q>(&self, questions: &'q [QuestionSpec]) -> Vec<&'q str> {
        questions
            .iter()
            .filter(|question| question.required && !self.is_answered(&question.id))
            .map(|question| question.id.as_str())
            .collect()
    }

    pub fn is_complete(&self, questions: &[QuestionSpec]) -> bool {
        self.missing_required(questions).is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AnsweredQuestionnaire
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Outcome of scoring a draft plus its answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: u8,
    pub raw_points: u32,
    pub max_points: u32,
    pub insights: Vec<String>,
    pub computed_at: DateTime<Utc>,
}

/// Identifier wrapper for persisted submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn generate() -> Self {
        Self(format!("sub-{}", uuid::Uuid::new_v4()))
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Completed,
}

impl SubmissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Completed => "completed",
        }
    }
}

/// Account details for whoever is submitting, as reported by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitterProfile {
    pub id: String,
    pub email: String,
    pub company: String,
}

/// Final record of a product submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub draft: ProductDraft,
    pub answers: AnsweredQuestionnaire,
    pub score: Option<ScoreResult>,
    pub status: SubmissionStatus,
    pub submitted_by: Option<SubmitterProfile>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn pending(
        draft: ProductDraft,
        answers: AnsweredQuestionnaire,
        submitted_by: Option<SubmitterProfile>,
    ) -> Self {
        Self {
            id: SubmissionId::generate(),
            draft,
            answers,
            score: None,
            status: SubmissionStatus::Pending,
            submitted_by,
            created_at: Utc::now(),
        }
    }

    /// Attaches the single score this submission may hold and completes it.
    pub fn complete(&mut self, result: ScoreResult) -> Result<(), SubmissionStateError> {
        if self.status == SubmissionStatus::Completed || self.score.is_some() {
            return Err(SubmissionStateError::AlreadyScored(self.id.clone()));
        }
        self.score = Some(result);
        self.status = SubmissionStatus::Completed;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionStateError {
    #[error("submission {0} already holds a score")]
    AlreadyScored(SubmissionId),
}
