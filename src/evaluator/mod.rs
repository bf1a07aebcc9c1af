//! The three-plan evaluator pipeline (spec component C11, §4.8): basic data types ->
//! modeling rules -> conversion requirements, each with an `evaluateFatal` phase that
//! only accumulates errors and an `evaluateNonFatal` phase that returns a healed copy.
//! After any plan records a fatal issue the pipeline short-circuits.

mod plan1;
mod plan2;
mod plan3;

use crate::config::ConversionParameters;
use crate::issue::IssueList;
use crate::pr::OpenDrive;

/// Outcome of running all three plans against one PR tree. `healed` is `None` iff some
/// plan recorded a fatal-severity issue (spec §4.8's short-circuit rule).
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOutcome {
    pub healed: Option<OpenDrive>,
    pub plan1_issues: IssueList,
    pub plan2_issues: IssueList,
    pub plan3_issues: IssueList,
}

impl EvaluationOutcome {
    pub fn all_issues(&self) -> IssueList {
        self.plan1_issues.clone().merge(self.plan2_issues.clone()).merge(self.plan3_issues.clone())
    }
}

pub fn evaluate(model: &OpenDrive, params: &ConversionParameters) -> EvaluationOutcome {
    log::debug!("evaluator: plan 1 (basic data types) starting");
    let plan1_fatal = plan1::evaluate_fatal(model);
    if plan1_fatal.has_fatal() {
        log::warn!("evaluator: plan 1 aborted with {} fatal issue(s)", plan1_fatal.count(crate::issue::Severity::FatalError));
        return EvaluationOutcome { healed: None, plan1_issues: plan1_fatal, plan2_issues: IssueList::new(), plan3_issues: IssueList::new() };
    }
    let (healed1, plan1_non_fatal) = plan1::evaluate_non_fatal(model, params);
    let plan1_issues = plan1_fatal.merge(plan1_non_fatal);
    log::debug!("evaluator: plan 1 finished with {} issue(s)", plan1_issues.0.len());

    log::debug!("evaluator: plan 2 (modeling rules) starting");
    let plan2_fatal = plan2::evaluate_fatal(&healed1, params);
    if plan2_fatal.has_fatal() {
        log::warn!("evaluator: plan 2 aborted with {} fatal issue(s)", plan2_fatal.count(crate::issue::Severity::FatalError));
        return EvaluationOutcome { healed: None, plan1_issues, plan2_issues: plan2_fatal, plan3_issues: IssueList::new() };
    }
    let (healed2, plan2_non_fatal) = plan2::evaluate_non_fatal(&healed1, params);
    let plan2_issues = plan2_fatal.merge(plan2_non_fatal);
    log::debug!("evaluator: plan 2 finished with {} issue(s)", plan2_issues.0.len());

    log::debug!("evaluator: plan 3 (conversion requirements) starting");
    let plan3_fatal = plan3::evaluate_fatal(&healed2);
    if plan3_fatal.has_fatal() {
        log::warn!("evaluator: plan 3 aborted with {} fatal issue(s)", plan3_fatal.count(crate::issue::Severity::FatalError));
        return EvaluationOutcome { healed: None, plan1_issues, plan2_issues, plan3_issues: plan3_fatal };
    }
    let (healed3, plan3_non_fatal) = plan3::evaluate_non_fatal(&healed2, params);
    let plan3_issues = plan3_fatal.merge(plan3_non_fatal);
    log::debug!("evaluator: plan 3 finished with {} issue(s)", plan3_issues.0.len());

    EvaluationOutcome { healed: Some(healed3), plan1_issues, plan2_issues, plan3_issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_model_produces_no_issues_and_a_healed_copy() {
        let model = OpenDrive::default();
        let outcome = evaluate(&model, &ConversionParameters::default());
        assert!(outcome.healed.is_some());
        assert!(outcome.all_issues().is_empty());
    }

    #[test]
    fn idempotent_after_healing() {
        let model = OpenDrive::default();
        let first = evaluate(&model, &ConversionParameters::default());
        let healed = first.healed.clone().unwrap();
        let second = evaluate(&healed, &ConversionParameters::default());
        assert_eq!(second.healed, first.healed);
    }
}
