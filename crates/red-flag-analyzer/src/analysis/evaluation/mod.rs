mod patterns;
mod policy;
mod rules;

pub use policy::FinalResult;

use super::domain::ApplicantRecord;
use super::flags::{FlagSet, HardFlag, PatternFlag, SoftFlag};
use policy::decide_outcome;
use serde::{Deserialize, Serialize};

/// Run every rule against one record.
///
/// Pure and total: absent fields and short series simply leave their rules silent.
pub fn evaluate(record: &ApplicantRecord) -> EvaluationResult {
    EvaluationResult::from_flags(flag_record(record))
}

/// Static and pattern stages without the reducer.
pub fn flag_record(record: &ApplicantRecord) -> FlagSet {
    FlagSet {
        hard: rules::hard_flags(record),
        soft: rules::soft_flags(record),
        pattern: patterns::pattern_flags(record),
    }
}

/// Engine output handed to the persistence and presentation collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub hard_flags: Vec<HardFlag>,
    pub soft_flags: Vec<SoftFlag>,
    pub pattern_flags: Vec<PatternFlag>,
    pub final_result: FinalResult,
}

impl EvaluationResult {
    pub fn from_flags(flags: FlagSet) -> Self {
        let final_result = decide_outcome(&flags.hard);
        Self {
            hard_flags: flags.hard,
            soft_flags: flags.soft,
            pattern_flags: flags.pattern,
            final_result,
        }
    }

    pub fn flag_count(&self) -> usize {
        self.hard_flags.len() + self.soft_flags.len() + self.pattern_flags.len()
    }
}
