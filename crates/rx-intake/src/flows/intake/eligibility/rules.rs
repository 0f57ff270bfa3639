use super::super::answers::AnswerSet;
use super::super::domain::fields;
use super::verdict::{CareResource, ReviewSeverity};

/// How a rule's user-facing message is chosen. Most rules carry one fixed
/// message; a few vary by which token matched.
pub enum RuleMessage {
    Fixed(&'static str),
    ByToken {
        field: &'static str,
        cases: &'static [(&'static str, &'static str)],
        fallback: &'static str,
    },
}

impl RuleMessage {
    pub fn resolve(&self, answers: &AnswerSet) -> &'static str {
        match self {
            Self::Fixed(message) => message,
            Self::ByToken {
                field,
                cases,
                fallback,
            } => {
                for (token, message) in *cases {
                    if answers.has_token(field, token) {
                        return message;
                    }
                }
                fallback
            }
        }
    }
}

/// A hard stop. The table below is priority-ordered: the first match wins
/// and evaluation short-circuits, so the order is a clinical contract, not
/// an implementation detail.
pub struct ExclusionRule {
    pub tag: &'static str,
    pub title: &'static str,
    pub message: RuleMessage,
    pub resources: &'static [CareResource],
    pub matches: fn(&AnswerSet) -> bool,
}

/// A review flag. All applicable warnings are collected.
pub struct WarningRule {
    pub tag: &'static str,
    pub severity: ReviewSeverity,
    pub note: &'static str,
    pub matches: fn(&AnswerSet) -> bool,
}

fn self_harm_flagged(answers: &AnswerSet) -> bool {
    answers.has_token(fields::SELF_HARM, "yes")
}

fn restrictive_eating_disorder(answers: &AnswerSet) -> bool {
    answers.has_token(fields::EATING_DISORDER_TYPE, "anorexia")
        || answers.has_token(fields::EATING_DISORDER_TYPE, "bulimia")
}

fn thyroid_cancer_risk(answers: &AnswerSet) -> bool {
    answers.has_token(fields::MEDICAL_CONDITIONS, "medullary_thyroid_cancer")
        || answers.has_token(fields::MEDICAL_CONDITIONS, "men2")
}

fn pregnancy_related(answers: &AnswerSet) -> bool {
    matches!(
        answers.token(fields::PREGNANCY),
        Some("pregnant") | Some("trying") | Some("nursing")
    )
}

fn type1_diabetes(answers: &AnswerSet) -> bool {
    answers.has_token(fields::DIABETES_TYPE, "type1")
}

fn taking_insulin(answers: &AnswerSet) -> bool {
    answers.has_token(fields::CURRENT_MEDICATIONS, "insulin")
}

fn glp1_allergy(answers: &AnswerSet) -> bool {
    answers.has_token(fields::GLP1_SAFETY, "prior_allergic_reaction")
}

fn moderate_eating_disorder(answers: &AnswerSet) -> bool {
    !restrictive_eating_disorder(answers)
        && (answers.has_token(fields::EATING_DISORDER_TYPE, "binge_eating")
            || answers.has_token(fields::EATING_DISORDER_TYPE, "other"))
}

fn pancreatitis_history(answers: &AnswerSet) -> bool {
    answers.has_token(fields::MEDICAL_CONDITIONS, "pancreatitis")
}

fn gallbladder_disease(answers: &AnswerSet) -> bool {
    answers.has_token(fields::MEDICAL_CONDITIONS, "gallbladder_disease")
}

fn on_another_glp1(answers: &AnswerSet) -> bool {
    answers.has_token(fields::GLP1_SAFETY, "currently_on_glp1")
}

fn elevated_risk_history(answers: &AnswerSet) -> bool {
    const RISK_TOKENS: &[&str] = &[
        "diabetic_retinopathy",
        "severe_gastroparesis",
        "recent_bariatric_surgery",
        "advanced_kidney_disease",
    ];
    RISK_TOKENS
        .iter()
        .any(|token| answers.has_token(fields::GLP1_SAFETY, token))
}

static CRISIS_RESOURCES: &[CareResource] = &[
    CareResource {
        name: "988 Suicide & Crisis Lifeline",
        contact: "Call or text 988",
    },
    CareResource {
        name: "Crisis Text Line",
        contact: "Text HOME to 741741",
    },
];

static EATING_DISORDER_RESOURCES: &[CareResource] = &[CareResource {
    name: "National Eating Disorders Association helpline",
    contact: "Call 1-800-931-2237",
}];

static EXCLUSIONS: &[ExclusionRule] = &[
    ExclusionRule {
        tag: "mental_health_crisis",
        title: "Please reach out for support",
        message: RuleMessage::Fixed(
            "Based on your answers, connecting with a crisis counselor is the right next step. \
             This is not a medical denial; the resources below are available around the clock.",
        ),
        resources: CRISIS_RESOURCES,
        matches: self_harm_flagged,
    },
    ExclusionRule {
        tag: "eating_disorder_exclusion",
        title: "We can't prescribe this medication safely",
        message: RuleMessage::Fixed(
            "GLP-1 medications are not appropriate alongside a history of anorexia or bulimia. \
             A specialist can help you find a program that supports your goals safely.",
        ),
        resources: EATING_DISORDER_RESOURCES,
        matches: restrictive_eating_disorder,
    },
    ExclusionRule {
        tag: "thyroid_exclusion",
        title: "This medication isn't safe with your history",
        message: RuleMessage::Fixed(
            "A personal or family history of medullary thyroid cancer or MEN2 rules out GLP-1 \
             therapy. Please discuss alternatives with your doctor.",
        ),
        resources: &[],
        matches: thyroid_cancer_risk,
    },
    ExclusionRule {
        tag: "pregnancy_exclusion",
        title: "This medication isn't safe right now",
        message: RuleMessage::ByToken {
            field: fields::PREGNANCY,
            cases: &[
                (
                    "pregnant",
                    "GLP-1 medications are not safe during pregnancy. Please talk with your \
                     OB-GYN about weight management that protects you and your baby.",
                ),
                (
                    "trying",
                    "GLP-1 medications must be stopped at least two months before trying to \
                     conceive, so we can't start one now.",
                ),
                (
                    "nursing",
                    "GLP-1 medications are not recommended while nursing. We'd be glad to help \
                     once you've finished breastfeeding.",
                ),
            ],
            fallback: "GLP-1 medications are not safe during pregnancy, while trying to \
                       conceive, or while nursing.",
        },
        resources: &[],
        matches: pregnancy_related,
    },
    ExclusionRule {
        tag: "type1_denial",
        title: "Your diabetes needs closer supervision",
        message: RuleMessage::Fixed(
            "Type 1 diabetes requires in-person endocrinology care that a remote weight-loss \
             program can't provide. Please work with your diabetes care team.",
        ),
        resources: &[],
        matches: type1_diabetes,
    },
    ExclusionRule {
        tag: "insulin_exclusion",
        title: "We can't combine this with insulin remotely",
        message: RuleMessage::Fixed(
            "Adding a GLP-1 to insulin requires close blood-sugar monitoring by the prescriber \
             managing your insulin. Please ask them about adding a GLP-1.",
        ),
        resources: &[],
        matches: taking_insulin,
    },
    ExclusionRule {
        tag: "glp1_allergy_exclusion",
        title: "A prior reaction makes this unsafe",
        message: RuleMessage::Fixed(
            "A severe allergic reaction to a GLP-1 medication means we can't safely prescribe \
             one again. An allergist can help identify safe alternatives.",
        ),
        resources: &[],
        matches: glp1_allergy,
    },
];

static WARNINGS: &[WarningRule] = &[
    WarningRule {
        tag: "eating_disorder_review",
        severity: ReviewSeverity::Clinical,
        note: "Eating-disorder history (binge eating or other); requires specialist clearance \
               before prescribing.",
        matches: moderate_eating_disorder,
    },
    WarningRule {
        tag: "pancreatitis_review",
        severity: ReviewSeverity::Clinical,
        note: "History of pancreatitis; gastroenterologist clearance recommended before \
               starting therapy.",
        matches: pancreatitis_history,
    },
    WarningRule {
        tag: "gallbladder_info",
        severity: ReviewSeverity::Informational,
        note: "Active gallbladder disease reported; monitor for biliary symptoms.",
        matches: gallbladder_disease,
    },
    WarningRule {
        tag: "glp1_coordination",
        severity: ReviewSeverity::Informational,
        note: "Already taking another GLP-1; coordinate the transition before the first fill.",
        matches: on_another_glp1,
    },
    WarningRule {
        tag: "elevated_review",
        severity: ReviewSeverity::Clinical,
        note: "Reported retinopathy, gastroparesis, recent bariatric surgery, or advanced \
               kidney disease; elevated-review flag set.",
        matches: elevated_risk_history,
    },
];

pub fn exclusions() -> &'static [ExclusionRule] {
    EXCLUSIONS
}

pub fn warnings() -> &'static [WarningRule] {
    WARNINGS
}
