use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{fields, AnswerValue};

/// Declares which fields only exist inside the branch opened by a parent
/// answer. When the parent no longer holds the gating value, the dependents
/// are erased so a stale branch answer can never reach the rule evaluator.
struct DependentRule {
    parent: &'static str,
    keep_when: fn(&AnswerValue) -> bool,
    dependents: &'static [&'static str],
}

fn gates_on_yes(value: &AnswerValue) -> bool {
    matches!(value, AnswerValue::Text(token) if token == "yes")
}

fn gates_on_female(value: &AnswerValue) -> bool {
    matches!(value, AnswerValue::Text(token) if token == "female")
}

static DEPENDENTS: &[DependentRule] = &[
    DependentRule {
        parent: fields::EATING_DISORDER,
        keep_when: gates_on_yes,
        dependents: &[fields::EATING_DISORDER_TYPE],
    },
    DependentRule {
        parent: fields::DIABETES,
        keep_when: gates_on_yes,
        dependents: &[fields::DIABETES_TYPE],
    },
    DependentRule {
        parent: fields::SEX_AT_BIRTH,
        keep_when: gates_on_female,
        dependents: &[fields::PREGNANCY],
    },
    DependentRule {
        parent: fields::GLP1_EXPERIENCE,
        keep_when: gates_on_yes,
        dependents: &[
            fields::GLP1_LAST_MEDICATION,
            fields::GLP1_CURRENT_DOSE_MG,
            fields::GLP1_WEEKS_ON_THERAPY,
        ],
    },
];

/// The accumulated answer set: the single source of truth consumed by the
/// discloser, the sequencer, and the eligibility evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.values.get(field)
    }

    /// Single-choice token (or free text) for a field, if present.
    pub fn token(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(AnswerValue::Text(token)) => Some(token.as_str()),
            _ => None,
        }
    }

    pub fn tokens(&self, field: &str) -> Option<&[String]> {
        match self.values.get(field) {
            Some(AnswerValue::Tokens(tokens)) => Some(tokens.as_slice()),
            _ => None,
        }
    }

    pub fn flag(&self, field: &str) -> Option<bool> {
        match self.values.get(field) {
            Some(AnswerValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        match self.values.get(field) {
            Some(AnswerValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// True when the field holds `token`, whether the field is a single
    /// choice or a multi-select. Absent fields match nothing.
    pub fn has_token(&self, field: &str, token: &str) -> bool {
        match self.values.get(field) {
            Some(AnswerValue::Text(value)) => value == token,
            Some(AnswerValue::Tokens(values)) => values.iter().any(|value| value == token),
            _ => false,
        }
    }

    pub fn answered(&self, field: &str) -> bool {
        self.values
            .get(field)
            .map(AnswerValue::is_answered)
            .unwrap_or(false)
    }

    pub fn set(&mut self, field: &str, value: AnswerValue) {
        self.values.insert(field.to_owned(), value);
        self.enforce_dependents(field);
    }

    pub fn set_many<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, AnswerValue)>,
        K: AsRef<str>,
    {
        for (field, value) in entries {
            self.set(field.as_ref(), value);
        }
    }

    pub fn clear(&mut self, field: &str) {
        if self.values.remove(field).is_some() {
            self.enforce_dependents(field);
        }
    }

    /// Removes every field matching the predicate, cascading through the
    /// dependency table for each removal.
    pub fn clear_where(&mut self, predicate: impl Fn(&str) -> bool) {
        let doomed: Vec<String> = self
            .values
            .keys()
            .filter(|field| predicate(field))
            .cloned()
            .collect();
        for field in doomed {
            self.clear(&field);
        }
    }

    pub fn clear_prefix(&mut self, prefix: &str) {
        self.clear_where(|field| field.starts_with(prefix));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(field, value)| (field.as_str(), value))
    }

    fn enforce_dependents(&mut self, changed: &str) {
        let mut queue = vec![changed.to_owned()];
        while let Some(field) = queue.pop() {
            for rule in DEPENDENTS {
                if rule.parent != field {
                    continue;
                }
                let keep = self
                    .values
                    .get(rule.parent)
                    .map(|value| (rule.keep_when)(value))
                    .unwrap_or(false);
                if keep {
                    continue;
                }
                for dependent in rule.dependents {
                    if self.values.remove(*dependent).is_some() {
                        queue.push((*dependent).to_owned());
                    }
                }
            }
        }
    }
}
