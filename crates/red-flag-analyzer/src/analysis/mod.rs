//! Loan applicant red-flag analysis: record validation, the rule engine, and the thin
//! persistence and HTTP adapters that surround it.
//!
//! The engine itself (`evaluate`) is pure. Everything else in this module exists to hand it a
//! validated record and to store what it returns.

pub mod domain;
pub(crate) mod evaluation;
pub mod flags;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AmountEntry, AnalysisId, ApplicantRecord, BusinessType, InventoryEntry, PayablePeriod,
    PaymentEntry,
};
pub use evaluation::{evaluate, flag_record, EvaluationResult, FinalResult};
pub use flags::{FlagSet, HardFlag, PatternFlag, SoftFlag};
pub use repository::{
    AnalysisRecord, AnalysisRepository, AnalysisView, RepositoryError, VerifierOverride,
};
pub use router::analysis_router;
pub use service::{AnalysisServiceError, OverrideRequest, RedFlagAnalysisService};
pub use validation::{RecordGuard, ValidationError};
