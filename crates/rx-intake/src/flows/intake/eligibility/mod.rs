//! Priority-ordered eligibility evaluation over the accumulated answer set.
//!
//! The evaluator is a pure function: identical answers produce identical
//! verdicts, absent fields never match a rule, and nothing here can panic on
//! a partially filled answer set — a thrown error would silently skip an
//! exclusion check, which is the one failure mode this module must not have.

pub(crate) mod rules;
mod verdict;

pub use rules::{ExclusionRule, WarningRule};
pub use verdict::{
    CareResource, EligibilityVerdict, ExclusionNotice, ReviewSeverity, ReviewWarning,
};

use super::answers::AnswerSet;

/// Evaluates the ordered rule table. The first matching exclusion wins and
/// short-circuits; otherwise every applicable warning is collected.
pub fn evaluate(answers: &AnswerSet) -> EligibilityVerdict {
    for rule in rules::exclusions() {
        if (rule.matches)(answers) {
            return EligibilityVerdict::Excluded {
                notice: ExclusionNotice {
                    rule: rule.tag,
                    title: rule.title,
                    message: rule.message.resolve(answers),
                    resources: rule.resources,
                },
            };
        }
    }

    let warnings = rules::warnings()
        .iter()
        .filter(|rule| (rule.matches)(answers))
        .map(|rule| ReviewWarning {
            rule: rule.tag,
            severity: rule.severity,
            note: rule.note,
        })
        .collect();

    EligibilityVerdict::Clear { warnings }
}
