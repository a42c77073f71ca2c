use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_LOW_SCORE_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalSample {
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub context: String,
    pub relevance_score: f64,
    pub coherence_score: f64,
    pub groundedness_score: f64,
}

impl EvalSample {
    /// True when any rating falls below `threshold`.
    pub fn needs_attention(&self, threshold: f64) -> bool {
        self.groundedness_score < threshold
            || self.relevance_score < threshold
            || self.coherence_score < threshold
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RatingSummary {
    pub mean_rating: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeanSummary {
    pub mean: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExperimentSummary {
    pub groundedness: RatingSummary,
    pub relevance: RatingSummary,
    pub coherence: RatingSummary,
    pub latency: MeanSummary,
    pub answer_length: MeanSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experiment {
    #[serde(default)]
    pub evaluate_parameters: serde_json::Value,
    pub eval_results: Vec<EvalSample>,
    pub summary: ExperimentSummary,
}

impl Experiment {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::new("EVAL_INVALID", "Failed to parse experiment results")
                .with_details(e.to_string())
        })
    }

    pub fn find_sample(&self, question: &str) -> Option<&EvalSample> {
        self.eval_results.iter().find(|s| s.question == question)
    }

    /// Samples needing attention, in result order.
    pub fn flagged(&self, threshold: f64) -> Vec<&EvalSample> {
        self.eval_results
            .iter()
            .filter(|s| s.needs_attention(threshold))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scorecard {
    pub experiment_name: String,
    pub groundedness: f64,
    pub relevance: f64,
    pub coherence: f64,
    pub latency: f64,
    pub answer_length: f64,
}

impl Scorecard {
    pub fn from_summary(experiment_name: impl Into<String>, summary: &ExperimentSummary) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            groundedness: summary.groundedness.mean_rating,
            relevance: summary.relevance.mean_rating,
            coherence: summary.coherence.mean_rating,
            latency: summary.latency.mean,
            answer_length: summary.answer_length.mean,
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.experiment_name));
        out.push_str("| Metric | Value |\n");
        out.push_str("|---|---:|\n");
        out.push_str(&format!("| Groundedness | {} |\n", self.groundedness));
        out.push_str(&format!("| Relevance | {} |\n", self.relevance));
        out.push_str(&format!("| Coherence | {} |\n", self.coherence));
        out.push_str(&format!("| Latency | {} |\n", self.latency));
        out.push_str(&format!("| Answer length | {} |\n", self.answer_length));
        out
    }
}
