use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseMessage {
    pub content: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thoughts {
    pub title: String,
    // Free-form payload from the backend.
    #[serde(default)]
    pub description: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseContext {
    #[serde(default)]
    pub data_points: Vec<String>,
    #[serde(default)]
    pub followup_questions: Option<Vec<String>>,
    #[serde(default)]
    pub thoughts: Vec<Thoughts>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub context: ResponseContext,
    #[serde(default)]
    pub session_state: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatAppResponse {
    pub choices: Vec<ResponseChoice>,
}

impl ChatAppResponse {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let parsed: ChatAppResponseOrError = serde_json::from_str(raw).map_err(|e| {
            AppError::new("RESPONSE_INVALID", "Failed to parse chat response")
                .with_details(e.to_string())
        })?;
        parsed.into_result()
    }

    fn first_choice(&self) -> Result<&ResponseChoice, AppError> {
        self.choices
            .first()
            .ok_or_else(|| AppError::new("RESPONSE_EMPTY", "Chat response has no choices"))
    }

    /// Raw assistant text of the first choice, citation markers included.
    pub fn answer_text(&self) -> Result<&str, AppError> {
        Ok(self.first_choice()?.message.content.as_str())
    }

    pub fn followup_questions(&self) -> &[String] {
        self.choices
            .first()
            .and_then(|c| c.context.followup_questions.as_deref())
            .unwrap_or(&[])
    }

    pub fn has_thoughts(&self) -> bool {
        self.choices
            .first()
            .map(|c| !c.context.thoughts.is_empty())
            .unwrap_or(false)
    }

    pub fn has_data_points(&self) -> bool {
        self.choices
            .first()
            .map(|c| !c.context.data_points.is_empty())
            .unwrap_or(false)
    }
}

/// Envelope returned by the chat endpoint: either choices or an error string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatAppResponseOrError {
    #[serde(default)]
    pub choices: Option<Vec<ResponseChoice>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatAppResponseOrError {
    pub fn into_result(self) -> Result<ChatAppResponse, AppError> {
        if let Some(error) = self.error {
            return Err(
                AppError::new("RESPONSE_ERROR", "Backend returned an error").with_details(error)
            );
        }
        match self.choices {
            Some(choices) => Ok(ChatAppResponse { choices }),
            None => Err(AppError::new(
                "RESPONSE_EMPTY",
                "Chat response has neither choices nor error",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Good,
    Bad,
}

impl FeedbackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Good => "good",
            FeedbackKind::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub id: String,
    // Free-form on the wire; anything other than "good" counts as bad.
    pub feedback: String,
    pub question: String,
    pub answer: ChatAppResponse,
    pub comment: String,
}

impl Feedback {
    pub fn new(
        kind: FeedbackKind,
        question: impl Into<String>,
        answer: ChatAppResponse,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            feedback: kind.as_str().to_string(),
            question: question.into(),
            answer,
            comment: comment.into(),
        }
    }

    pub fn kind(&self) -> FeedbackKind {
        if self.feedback == "good" {
            FeedbackKind::Good
        } else {
            FeedbackKind::Bad
        }
    }

    pub fn is_good(&self) -> bool {
        self.kind() == FeedbackKind::Good
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackResponse {
    pub feedbacks: Vec<Feedback>,
}

impl FeedbackResponse {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::new("RESPONSE_INVALID", "Failed to parse feedback list")
                .with_details(e.to_string())
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub context_precision: f64,
    pub answer_relevance: f64,
    pub faithfulness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentList {
    pub experiment_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentList {
    pub documents: Vec<String>,
}
