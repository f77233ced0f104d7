use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnalysisId, ApplicantRecord};
use super::evaluation::{EvaluationResult, FinalResult};

/// Verifier decision layered over the engine's result. Never fed back into the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifierOverride {
    pub overridden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden_result: Option<FinalResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Repository record containing the borrower data, engine output, and override metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub borrower_data: ApplicantRecord,
    #[serde(flatten)]
    pub evaluation: EvaluationResult,
    pub verifier_override: VerifierOverride,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Result shown to reviewers: the verifier's call wins over the engine's.
    pub fn effective_result(&self) -> FinalResult {
        match (
            self.verifier_override.overridden,
            self.verifier_override.overridden_result,
        ) {
            (true, Some(result)) => result,
            _ => self.evaluation.final_result,
        }
    }

    pub fn decision_rationale(&self) -> String {
        let effective = self.effective_result();
        match (&self.verifier_override.reason, self.verifier_override.overridden) {
            (Some(reason), true) => format!(
                "overridden to {} by verifier: {}",
                effective.label(),
                reason
            ),
            _ => effective.summary().to_string(),
        }
    }

    pub fn view(&self) -> AnalysisView {
        AnalysisView {
            id: self.id.clone(),
            hard_flags: self.evaluation.hard_flags.iter().map(|f| f.label()).collect(),
            soft_flags: self.evaluation.soft_flags.iter().map(|f| f.label()).collect(),
            pattern_flags: self
                .evaluation
                .pattern_flags
                .iter()
                .map(|f| f.label())
                .collect(),
            final_result: self.evaluation.final_result,
            effective_result: self.effective_result(),
            decision_rationale: self.decision_rationale(),
            verifier_override: self.verifier_override.clone(),
            created_at: self.created_at,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait AnalysisRepository: Send + Sync {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError>;
    fn update(&self, record: AnalysisRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Presentation payload for a stored analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub id: AnalysisId,
    pub hard_flags: Vec<&'static str>,
    pub soft_flags: Vec<&'static str>,
    pub pattern_flags: Vec<&'static str>,
    pub final_result: FinalResult,
    pub effective_result: FinalResult,
    pub decision_rationale: String,
    pub verifier_override: VerifierOverride,
    pub created_at: DateTime<Utc>,
}
