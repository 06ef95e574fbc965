use crate::enums::FailingRule;
use serde::{Deserialize, Serialize};

/// The single outcome of screening one stock.
///
/// A failed rule is a valid screening result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,
    pub failing_rule: FailingRule,
    pub explanation: String,
    /// Advisory remarks, e.g. a stage that was skipped for lack of data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Verdict {
    pub fn pass(notes: Vec<String>) -> Self {
        Self {
            passed: true,
            failing_rule: FailingRule::None,
            explanation: "all screening rules passed, qualifies as a white-horse candidate".to_string(),
            notes,
        }
    }

    pub fn fail(rule: FailingRule, explanation: impl Into<String>, notes: Vec<String>) -> Self {
        Self {
            passed: false,
            failing_rule: rule,
            explanation: explanation.into(),
            notes,
        }
    }
}
