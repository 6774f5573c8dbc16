//! Audit trace of the rule checks behind an eligibility decision.

use serde::{Deserialize, Serialize};

/// A single rule check recorded while evaluating eligibility.
///
/// Each step captures the input, output, and reasoning for one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The unique identifier of the rule that was checked.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Collects audit steps and numbers them in order.
#[derive(Debug, Default)]
pub struct AuditRecorder {
    steps: Vec<AuditStep>,
}

impl AuditRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step, assigning the next step number.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: impl Into<String>,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning: reasoning.into(),
        });
    }

    /// Returns the recorded steps.
    pub fn finish(self) -> Vec<AuditStep> {
        self.steps
    }
}
