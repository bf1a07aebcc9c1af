//! Issue/IssueList: the evaluator's diagnostic currency (spec §3, §4.8).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pr::Identifier;

/// Canonical severity enum. The upstream tooling this spec was distilled from carries two
/// historical `Severity` types with identical variants (spec §9 Open Question #2); this
/// crate keeps exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
    FatalError,
}

impl Severity {
    /// Effective severity after a fix was applied: Warning if an Error was fixed, Error if
    /// a FatalError was fixed, otherwise unchanged (spec §3).
    pub fn after_fix(self) -> Severity {
        match self {
            Severity::Warning => Severity::Warning,
            Severity::Error => Severity::Warning,
            Severity::FatalError => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub kind: String,
    pub text: String,
    pub location: Option<Identifier>,
    pub incident_severity: Severity,
    pub was_fixed: bool,
    #[serde(rename = "infoValues")]
    pub numeric_values: BTreeMap<String, f64>,
}

impl Issue {
    pub fn new(kind: impl Into<String>, text: impl Into<String>, severity: Severity) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            location: None,
            incident_severity: severity,
            was_fixed: false,
            numeric_values: BTreeMap::new(),
        }
    }

    pub fn with_location(mut self, location: Identifier) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_numeric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.numeric_values.insert(key.into(), value);
        self
    }

    /// Marks the issue as fixed and escalates `incident_severity` down per
    /// [`Severity::after_fix`].
    pub fn fixed(mut self) -> Self {
        self.was_fixed = true;
        self.incident_severity = self.incident_severity.after_fix();
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.incident_severity == Severity::FatalError
    }
}

/// Ordered, append-only collection. Merges by concatenation (spec §3).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueList(pub Vec<Issue>);

impl IssueList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, issue: Issue) {
        self.0.push(issue);
    }

    pub fn append(&mut self, mut other: IssueList) {
        self.0.append(&mut other.0);
    }

    pub fn merge(mut self, other: IssueList) -> Self {
        self.append(other);
        self
    }

    pub fn has_fatal(&self) -> bool {
        self.0.iter().any(Issue::is_fatal)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.0.iter().filter(|i| i.incident_severity == severity).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.0.iter()
    }
}

impl FromIterator<Issue> for IssueList {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        IssueList(iter.into_iter().collect())
    }
}

impl Extend<Issue> for IssueList {
    fn extend<T: IntoIterator<Item = Issue>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}
