//! JSON shapes spoken by the scoring service, shared by the HTTP client and
//! the routes that serve the same protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{InputKind, QuestionSpec, ScoreResult};

/// Question as the scoring service encodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireQuestion {
    #[serde(default)]
    pub id: String,
    pub question: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

impl WireQuestion {
    /// Converts to a [`QuestionSpec`]; a missing id becomes `q_<position>`.
    /// `text` and `number` map to short text, `select` to single-select, and
    /// anything else to long text.
    pub fn into_spec(self, position: usize) -> QuestionSpec {
        let input_kind = match self.kind.as_deref().map(str::trim) {
            Some("text") | Some("number") => InputKind::ShortText,
            Some("select") => InputKind::SingleSelect,
            _ => InputKind::LongText,
        };
        let options = match input_kind {
            InputKind::SingleSelect => self.options,
            InputKind::ShortText | InputKind::LongText => Vec::new(),
        };
        let id = if self.id.trim().is_empty() {
            format!("q_{position}")
        } else {
            self.id
        };

        QuestionSpec {
            id,
            prompt: self.question,
            input_kind,
            options,
            required: self.required,
            topic_tag: self.category,
        }
    }
}

impl From<&QuestionSpec> for WireQuestion {
    fn from(spec: &QuestionSpec) -> Self {
        let kind = match spec.input_kind {
            InputKind::ShortText => "text",
            InputKind::LongText => "textarea",
            InputKind::SingleSelect => "select",
        };
        Self {
            id: spec.id.clone(),
            question: spec.prompt.clone(),
            kind: Some(kind.to_string()),
            required: spec.required,
            category: spec.topic_tag.clone(),
            options: spec.options.clone(),
        }
    }
}

/// Response envelope for `POST /generate-questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionsEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<WireQuestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuestionsEnvelope {
    pub fn ok(questions: &[QuestionSpec]) -> Self {
        Self {
            success: true,
            questions: Some(questions.iter().map(WireQuestion::from).collect()),
            count: Some(questions.len()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            questions: None,
            count: None,
            error: Some(error.into()),
        }
    }
}

/// Score payload with the service's snake_case field names and a float epoch
/// timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireScore {
    pub score: f64,
    pub max_score: f64,
    pub raw_score: f64,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl WireScore {
    /// Validates ranges; a missing timestamp is stamped with `received_at`.
    pub fn into_result(self, received_at: DateTime<Utc>) -> Result<ScoreResult, WireError> {
        if !self.score.is_finite() || !(0.0..=100.0).contains(&self.score) {
            return Err(WireError::ScoreOutOfRange(self.score));
        }
        let raw_points = non_negative_points("raw_score", self.raw_score)?;
        let max_points = non_negative_points("max_score", self.max_score)?;
        let computed_at = match self.timestamp {
            Some(seconds) => epoch_seconds(seconds).ok_or(WireError::InvalidTimestamp(seconds))?,
            None => received_at,
        };

        Ok(ScoreResult {
            score: self.score.round() as u8,
            raw_points,
            max_points,
            insights: self.insights,
            computed_at,
        })
    }
}

impl From<&ScoreResult> for WireScore {
    fn from(result: &ScoreResult) -> Self {
        Self {
            score: f64::from(result.score),
            max_score: f64::from(result.max_points),
            raw_score: f64::from(result.raw_points),
            insights: result.insights.clone(),
            timestamp: Some(result.computed_at.timestamp_millis() as f64 / 1000.0),
        }
    }
}

/// Response envelope for `POST /transparency-score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<WireScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScoreEnvelope {
    pub fn ok(result: &ScoreResult) -> Self {
        Self {
            success: true,
            result: Some(WireScore::from(result)),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WireError {
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(f64),
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidPoints { field: &'static str, value: f64 },
    #[error("timestamp {0} is not a valid epoch time")]
    InvalidTimestamp(f64),
}

fn non_negative_points(field: &'static str, value: f64) -> Result<u32, WireError> {
    if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
        Ok(value.round() as u32)
    } else {
        Err(WireError::InvalidPoints { field, value })
    }
}

fn epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}
