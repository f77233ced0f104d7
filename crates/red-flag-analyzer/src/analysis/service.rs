use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::domain::AnalysisId;
use super::evaluation::{evaluate, FinalResult};
use super::repository::{AnalysisRecord, AnalysisRepository, RepositoryError, VerifierOverride};
use super::validation::{RecordGuard, ValidationError};

/// Verifier request to replace the engine's result for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRequest {
    pub new_result: FinalResult,
    pub reason: String,
}

/// Service composing the record guard, rule engine, and repository.
pub struct RedFlagAnalysisService<R> {
    guard: RecordGuard,
    repository: Arc<R>,
}

static ANALYSIS_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_analysis_id() -> AnalysisId {
    let id = ANALYSIS_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AnalysisId(format!("analysis-{id:06}"))
}

impl<R> RedFlagAnalysisService<R>
where
    R: AnalysisRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            guard: RecordGuard,
            repository,
        }
    }

    /// Validate a raw payload, evaluate it, and persist the outcome.
    pub fn analyze(&self, payload: Value) -> Result<AnalysisRecord, AnalysisServiceError> {
        let borrower_data = self.guard.record_from_payload(payload).inspect_err(|err| {
            warn!(field = err.field().unwrap_or("<payload>"), %err, "rejected applicant payload");
        })?;

        let evaluation = evaluate(&borrower_data);
        let record = AnalysisRecord {
            id: next_analysis_id(),
            borrower_data,
            evaluation,
            verifier_override: VerifierOverride::default(),
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            analysis_id = %stored.id,
            final_result = stored.evaluation.final_result.label(),
            hard = stored.evaluation.hard_flags.len(),
            soft = stored.evaluation.soft_flags.len(),
            pattern = stored.evaluation.pattern_flags.len(),
            "red flag analysis stored"
        );
        Ok(stored)
    }

    /// Fetch a stored analysis for API responses.
    pub fn get(&self, analysis_id: &AnalysisId) -> Result<AnalysisRecord, AnalysisServiceError> {
        let record = self
            .repository
            .fetch(analysis_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Record a verifier override. The engine output is left untouched.
    pub fn override_decision(
        &self,
        analysis_id: &AnalysisId,
        request: OverrideRequest,
    ) -> Result<AnalysisRecord, AnalysisServiceError> {
        let reason = request.reason.trim();
        if reason.is_empty() {
            return Err(AnalysisServiceError::InvalidOverride(
                "override reason must not be blank".to_string(),
            ));
        }

        let mut record = self.get(analysis_id)?;
        record.verifier_override = VerifierOverride {
            overridden: true,
            overridden_result: Some(request.new_result),
            reason: Some(reason.to_string()),
            timestamp: Some(Utc::now()),
        };

        self.repository.update(record.clone())?;
        info!(
            analysis_id = %record.id,
            engine_result = record.evaluation.final_result.label(),
            override_result = request.new_result.label(),
            "verifier override recorded"
        );
        Ok(record)
    }
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("invalid override: {0}")]
    InvalidOverride(String),
}
