use super::super::flags::HardFlag;
use serde::{Deserialize, Serialize};

/// Categorical outcome of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinalResult {
    /// At least one hard flag fired; the application is auto-rejected.
    Hard,
    /// No hard flag fired; grading is left to the verifier.
    Soft,
}

impl FinalResult {
    pub const fn label(self) -> &'static str {
        match self {
            FinalResult::Hard => "Hard",
            FinalResult::Soft => "Soft",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            FinalResult::Hard => "auto-rejected on hard red flags",
            FinalResult::Soft => "conditional; grade may be capped by soft red flags",
        }
    }
}

pub(crate) fn decide_outcome(hard_flags: &[HardFlag]) -> FinalResult {
    if hard_flags.is_empty() {
        FinalResult::Soft
    } else {
        FinalResult::Hard
    }
}
