use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level steps of the intake flow. Interstitial and terminal screens are
/// part of the same graph so navigation has a single vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenId {
    Welcome,
    Basics,
    ClinicalIntro,
    ClinicalAssessment,
    Glp1Experience,
    Glp1History,
    MedicationChoice,
    Review,
    Confirmation,
    Exclusion,
}

impl ScreenId {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Basics => "basics",
            Self::ClinicalIntro => "clinical_intro",
            Self::ClinicalAssessment => "clinical_assessment",
            Self::Glp1Experience => "glp1_experience",
            Self::Glp1History => "glp1_history",
            Self::MedicationChoice => "medication_choice",
            Self::Review => "review",
            Self::Confirmation => "confirmation",
            Self::Exclusion => "exclusion",
        }
    }

    /// Terminal screens accept no further navigation.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmation | Self::Exclusion)
    }
}

/// Internal sections of the clinical-assessment screen, in display order.
/// Every section doubles as an eligibility checkpoint once complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalSection {
    MentalHealth,
    EatingAndSubstance,
    MedicalConditions,
    Diabetes,
    Pregnancy,
    Medications,
    Glp1Safety,
}

impl ClinicalSection {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::MentalHealth,
            Self::EatingAndSubstance,
            Self::MedicalConditions,
            Self::Diabetes,
            Self::Pregnancy,
            Self::Medications,
            Self::Glp1Safety,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MentalHealth => "Mental health",
            Self::EatingAndSubstance => "Eating & substance use",
            Self::MedicalConditions => "Medical conditions",
            Self::Diabetes => "Diabetes",
            Self::Pregnancy => "Pregnancy",
            Self::Medications => "Current medications",
            Self::Glp1Safety => "GLP-1 safety",
        }
    }

    pub fn at(index: usize) -> Option<Self> {
        Self::ordered().get(index).copied()
    }

    pub fn last_index() -> usize {
        Self::ordered().len() - 1
    }
}

/// Field identifiers written by the intake screens. Kept in one place so the
/// dependency table, question catalog, and rule predicates cannot drift apart
/// on spelling.
pub mod fields {
    pub const STATE: &str = "state";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const SEX_AT_BIRTH: &str = "sex_at_birth";
    pub const TELEHEALTH_CONSENT: &str = "telehealth_consent";

    pub const MENTAL_HEALTH_CONDITIONS: &str = "mental_health_conditions";
    pub const SELF_HARM: &str = "self_harm";

    pub const EATING_DISORDER: &str = "eating_disorder";
    pub const EATING_DISORDER_TYPE: &str = "eating_disorder_type";
    pub const ALCOHOL_USE: &str = "alcohol_use";

    pub const MEDICAL_CONDITIONS: &str = "medical_conditions";

    pub const DIABETES: &str = "diabetes";
    pub const DIABETES_TYPE: &str = "diabetes_type";

    pub const PREGNANCY: &str = "pregnancy";

    pub const CURRENT_MEDICATIONS: &str = "current_medications";

    pub const GLP1_SAFETY: &str = "glp1_safety";

    pub const GLP1_EXPERIENCE: &str = "glp1_experience";
    pub const GLP1_LAST_MEDICATION: &str = "glp1_last_medication";
    pub const GLP1_CURRENT_DOSE_MG: &str = "glp1_current_dose_mg";
    pub const GLP1_WEEKS_ON_THERAPY: &str = "glp1_weeks_on_therapy";

    pub const SELECTED_MEDICATION: &str = "selected_medication";
}

/// A collected answer. Single-choice tokens and free text share the `Text`
/// representation; which one a field means is decided by its question, not by
/// the value shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Tokens(Vec<String>),
    Record(BTreeMap<String, String>),
}

impl AnswerValue {
    pub fn token(token: impl Into<String>) -> Self {
        Self::Text(token.into())
    }

    pub fn tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Tokens(tokens.into_iter().map(Into::into).collect())
    }

    /// Whether the value counts as an answer for disclosure and completion.
    /// Empty text and empty selections do not.
    pub fn is_answered(&self) -> bool {
        match self {
            Self::Flag(_) | Self::Number(_) => true,
            Self::Text(text) => !text.trim().is_empty(),
            Self::Tokens(tokens) => !tokens.is_empty(),
            Self::Record(entries) => !entries.is_empty(),
        }
    }
}

/// Navigation failures. Asking for an edge that does not exist is a wiring
/// bug in the caller, so these surface loudly instead of being absorbed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("no forward edge from screen '{}'", .0.slug())]
    NoForwardEdge(ScreenId),
    #[error("no backward edge from screen '{}'", .0.slug())]
    NoBackwardEdge(ScreenId),
}
