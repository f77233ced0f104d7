use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::analysis::domain::{AmountEntry, AnalysisId, ApplicantRecord, PaymentEntry};
use crate::analysis::repository::{AnalysisRecord, AnalysisRepository, RepositoryError};
use crate::analysis::{analysis_router, RedFlagAnalysisService};

/// Borrower that trips no rule at all.
pub(super) fn clean_record() -> ApplicantRecord {
    ApplicantRecord {
        active_default: Some(false),
        dbr: Some(10.0),
        current_liability_ratio: Some(10.0),
        profitability_ratio: Some(50.0),
        leverage_ratio: Some(10.0),
        rent_deed_period: Some(24.0),
        loan_tenor: Some(6.0),
        blacklisted_industry: Some(false),
        verified_trade_license: Some(true),
        collateral_disputes: Some(false),
        weak_guarantor: Some(false),
        years_of_operation: Some(5.0),
        trade_license_age: Some(5.0),
        high_personal_expenses: Some(false),
        frequent_relocation: Some(false),
        overstated_sales: Some(false),
        informal_borrowing: Some(false),
        reputation_issues: Some(false),
        pending_legal_disputes: Some(false),
        no_digital_footprint: Some(false),
        poor_record_keeping: Some(false),
        low_transaction_frequency: Some(false),
        industry_external_shocks: Some(false),
        ..ApplicantRecord::default()
    }
}

pub(super) fn clean_payload() -> Value {
    json!({
        "activeDefault": false,
        "dbr": 10,
        "currentLiabilityRatio": 10,
        "profitabilityRatio": 50,
        "leverageRatio": 10,
        "rentDeedPeriod": 24,
        "loanTenor": 6,
        "verifiedTradeLicense": true,
        "yearsOfOperation": 5,
        "tradeLicenseAge": 5
    })
}

pub(super) fn rejected_payload() -> Value {
    let mut payload = clean_payload();
    payload["activeDefault"] = json!(true);
    payload["dbr"] = json!(70);
    payload
}

pub(super) fn amounts(values: &[f64]) -> Vec<AmountEntry> {
    values.iter().copied().map(AmountEntry::new).collect()
}

pub(super) fn payments(days_late: &[f64]) -> Vec<PaymentEntry> {
    days_late
        .iter()
        .map(|days| PaymentEntry {
            days_late: Some(*days),
            ..PaymentEntry::default()
        })
        .collect()
}

pub(super) fn build_service() -> (
    RedFlagAnalysisService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = RedFlagAnalysisService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AnalysisId, AnalysisRecord>>>,
}

impl AnalysisRepository for MemoryRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AnalysisRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl AnalysisRepository for UnavailableRepository {
    fn insert(&self, _record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: AnalysisRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: RedFlagAnalysisService<MemoryRepository>,
) -> axum::Router {
    analysis_router(Arc::new(service))
}
