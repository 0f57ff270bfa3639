use serde::Serialize;

/// A support resource attached to an exclusion notice (e.g. a crisis line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CareResource {
    pub name: &'static str,
    pub contact: &'static str,
}

/// The user-facing outcome of a matched exclusion rule. Always specific to
/// the rule that fired — never a generic failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionNotice {
    pub rule: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub resources: &'static [CareResource],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSeverity {
    /// Requires clinician sign-off before a prescription is issued.
    Clinical,
    /// Surfaced to the reviewing clinician for awareness only.
    Informational,
}

impl ReviewSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clinical => "clinical review",
            Self::Informational => "informational",
        }
    }
}

/// A non-exclusionary flag attached to the case for clinical review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewWarning {
    pub rule: &'static str,
    pub severity: ReviewSeverity,
    pub note: &'static str,
}

/// Outcome of evaluating the rule table against an answer set. Immutable
/// once produced; recomputed fresh whenever relevant sections change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityVerdict {
    Excluded { notice: ExclusionNotice },
    Clear { warnings: Vec<ReviewWarning> },
}

impl EligibilityVerdict {
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Excluded { .. })
    }

    pub fn warnings(&self) -> &[ReviewWarning] {
        match self {
            Self::Excluded { .. } => &[],
            Self::Clear { warnings } => warnings,
        }
    }

    pub fn notice(&self) -> Option<&ExclusionNotice> {
        match self {
            Self::Excluded { notice } => Some(notice),
            Self::Clear { .. } => None,
        }
    }
}
