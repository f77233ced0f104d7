use std::sync::Arc;

use serde_json::json;

use super::common::*;
use crate::analysis::domain::AnalysisId;
use crate::analysis::repository::{AnalysisRepository, RepositoryError};
use crate::analysis::{
    AnalysisServiceError, FinalResult, HardFlag, OverrideRequest, RedFlagAnalysisService,
    ValidationError,
};

#[test]
fn analyze_stores_evaluation_with_default_override() {
    let (service, repository) = build_service();

    let record = service.analyze(rejected_payload()).expect("analysis stored");

    assert!(record.id.0.starts_with("analysis-"));
    assert_eq!(record.evaluation.final_result, FinalResult::Hard);
    assert_eq!(
        record.evaluation.hard_flags,
        vec![HardFlag::ActiveDefault, HardFlag::DebtBurdenRatio]
    );
    assert!(!record.verifier_override.overridden);
    assert_eq!(record.effective_result(), FinalResult::Hard);

    let stored = repository
        .fetch(&record.id)
        .expect("fetch works")
        .expect("record persisted");
    assert_eq!(stored, record);
}

#[test]
fn analyze_assigns_distinct_ids() {
    let (service, _) = build_service();

    let first = service.analyze(clean_payload()).expect("first");
    let second = service.analyze(clean_payload()).expect("second");

    assert_ne!(first.id, second.id);
}

#[test]
fn analyze_surfaces_validation_errors_without_storing() {
    let (service, repository) = build_service();

    let error = service
        .analyze(json!({ "businessType": "manufacturer" }))
        .expect_err("invalid business type");

    assert!(matches!(
        error,
        AnalysisServiceError::Validation(ValidationError::OutOfDomain { .. })
    ));
    assert!(repository.records.lock().expect("lock").is_empty());
}

#[test]
fn override_takes_precedence_for_display_only() {
    let (service, repository) = build_service();
    let record = service.analyze(rejected_payload()).expect("stored");

    let updated = service
        .override_decision(
            &record.id,
            OverrideRequest {
                new_result: FinalResult::Soft,
                reason: "  default settled with lender, NOC on file  ".to_string(),
            },
        )
        .expect("override recorded");

    assert!(updated.verifier_override.overridden);
    assert_eq!(
        updated.verifier_override.overridden_result,
        Some(FinalResult::Soft)
    );
    assert_eq!(
        updated.verifier_override.reason.as_deref(),
        Some("default settled with lender, NOC on file")
    );
    assert!(updated.verifier_override.timestamp.is_some());
    assert_eq!(updated.evaluation, record.evaluation);
    assert_eq!(updated.evaluation.final_result, FinalResult::Hard);
    assert_eq!(updated.effective_result(), FinalResult::Soft);
    assert!(updated
        .decision_rationale()
        .starts_with("overridden to Soft by verifier"));

    let stored = repository
        .fetch(&record.id)
        .expect("fetch")
        .expect("present");
    assert_eq!(stored.effective_result(), FinalResult::Soft);
}

#[test]
fn override_requires_a_reason() {
    let (service, _) = build_service();
    let record = service.analyze(clean_payload()).expect("stored");

    let error = service
        .override_decision(
            &record.id,
            OverrideRequest {
                new_result: FinalResult::Hard,
                reason: "   ".to_string(),
            },
        )
        .expect_err("blank reason");

    assert!(matches!(error, AnalysisServiceError::InvalidOverride(_)));
    assert!(!service
        .get(&record.id)
        .expect("still stored")
        .verifier_override
        .overridden);
}

#[test]
fn override_of_unknown_analysis_is_not_found() {
    let (service, _) = build_service();

    let error = service
        .override_decision(
            &AnalysisId("analysis-missing".to_string()),
            OverrideRequest {
                new_result: FinalResult::Soft,
                reason: "verified".to_string(),
            },
        )
        .expect_err("missing analysis");

    assert!(matches!(
        error,
        AnalysisServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn repository_outage_is_propagated() {
    let service = RedFlagAnalysisService::new(Arc::new(UnavailableRepository));

    let error = service.analyze(clean_payload()).expect_err("repository offline");

    assert!(matches!(
        error,
        AnalysisServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}
