//! The conversion report: a JSON-serializable snapshot of the parameters a run used and
//! the issues each evaluator plan recorded (spec §6).

use serde::{Deserialize, Serialize};

use crate::config::ConversionParameters;
use crate::evaluator::EvaluationOutcome;
use crate::issue::{IssueList, Severity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub parameters: ConversionParameters,
    pub plan1_issues: IssueList,
    pub plan2_issues: IssueList,
    pub plan3_issues: IssueList,
}

impl ConversionReport {
    pub fn new(parameters: ConversionParameters, outcome: &EvaluationOutcome) -> Self {
        Self {
            parameters,
            plan1_issues: outcome.plan1_issues.clone(),
            plan2_issues: outcome.plan2_issues.clone(),
            plan3_issues: outcome.plan3_issues.clone(),
        }
    }

    pub fn all_issues(&self) -> IssueList {
        self.plan1_issues
            .clone()
            .merge(self.plan2_issues.clone())
            .merge(self.plan3_issues.clone())
    }

    pub fn has_fatal(&self) -> bool {
        self.all_issues().has_fatal()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.all_issues().count(severity)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
