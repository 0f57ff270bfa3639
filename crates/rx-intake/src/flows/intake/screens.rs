use serde::Serialize;

use super::answers::AnswerSet;
use super::domain::{fields, ClinicalSection, ScreenId};

/// Static description of one top-level screen: its progress step, optional
/// section label, and the fields it is allowed to write. Interstitials share
/// the step of the substantive screen they lead into so the progress bar
/// never fills on a no-op screen.
#[derive(Debug)]
pub struct ScreenDescriptor {
    pub id: ScreenId,
    pub step: u8,
    pub label: Option<&'static str>,
    pub fields: &'static [&'static str],
    pub interstitial: bool,
}

pub const TOTAL_STEPS: u8 = 6;

static SCREENS: &[ScreenDescriptor] = &[
    ScreenDescriptor {
        id: ScreenId::Welcome,
        step: 1,
        label: None,
        fields: &[],
        interstitial: true,
    },
    ScreenDescriptor {
        id: ScreenId::Basics,
        step: 1,
        label: Some("About you"),
        fields: &[
            fields::STATE,
            fields::DATE_OF_BIRTH,
            fields::SEX_AT_BIRTH,
            fields::TELEHEALTH_CONSENT,
        ],
        interstitial: false,
    },
    ScreenDescriptor {
        id: ScreenId::ClinicalIntro,
        step: 2,
        label: None,
        fields: &[],
        interstitial: true,
    },
    ScreenDescriptor {
        id: ScreenId::ClinicalAssessment,
        step: 2,
        label: Some("Health history"),
        fields: &[
            fields::MENTAL_HEALTH_CONDITIONS,
            fields::SELF_HARM,
            fields::EATING_DISORDER,
            fields::EATING_DISORDER_TYPE,
            fields::ALCOHOL_USE,
            fields::MEDICAL_CONDITIONS,
            fields::DIABETES,
            fields::DIABETES_TYPE,
            fields::PREGNANCY,
            fields::CURRENT_MEDICATIONS,
            fields::GLP1_SAFETY,
        ],
        interstitial: false,
    },
    ScreenDescriptor {
        id: ScreenId::Glp1Experience,
        step: 3,
        label: Some("GLP-1 experience"),
        fields: &[fields::GLP1_EXPERIENCE],
        interstitial: false,
    },
    ScreenDescriptor {
        id: ScreenId::Glp1History,
        step: 4,
        label: Some("GLP-1 history"),
        fields: &[
            fields::GLP1_LAST_MEDICATION,
            fields::GLP1_CURRENT_DOSE_MG,
            fields::GLP1_WEEKS_ON_THERAPY,
        ],
        interstitial: false,
    },
    ScreenDescriptor {
        id: ScreenId::MedicationChoice,
        step: 5,
        label: Some("Treatment selection"),
        fields: &[fields::SELECTED_MEDICATION],
        interstitial: false,
    },
    ScreenDescriptor {
        id: ScreenId::Review,
        step: 6,
        label: Some("Review"),
        fields: &[],
        interstitial: false,
    },
    ScreenDescriptor {
        id: ScreenId::Confirmation,
        step: 6,
        label: None,
        fields: &[],
        interstitial: false,
    },
    ScreenDescriptor {
        id: ScreenId::Exclusion,
        step: 6,
        label: None,
        fields: &[],
        interstitial: false,
    },
];

pub fn descriptor(id: ScreenId) -> &'static ScreenDescriptor {
    let index = match id {
        ScreenId::Welcome => 0,
        ScreenId::Basics => 1,
        ScreenId::ClinicalIntro => 2,
        ScreenId::ClinicalAssessment => 3,
        ScreenId::Glp1Experience => 4,
        ScreenId::Glp1History => 5,
        ScreenId::MedicationChoice => 6,
        ScreenId::Review => 7,
        ScreenId::Confirmation => 8,
        ScreenId::Exclusion => 9,
    };
    &SCREENS[index]
}

pub fn all_screens() -> &'static [ScreenDescriptor] {
    SCREENS
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Choice {
    pub token: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    SingleChoice,
    MultiChoice,
    FreeText,
    NumberEntry,
    Consent,
}

/// A sub-question inside a screen. `relevant` is the single predicate that
/// drives both visibility and completion, so a hidden question can never be
/// required-but-unanswered.
#[derive(Debug)]
pub struct SubQuestion {
    pub field: &'static str,
    pub prompt: &'static str,
    pub input: InputKind,
    pub choices: &'static [Choice],
    pub required: bool,
    pub relevant: fn(&AnswerSet) -> bool,
}

fn always(_: &AnswerSet) -> bool {
    true
}

fn if_eating_disorder(answers: &AnswerSet) -> bool {
    answers.has_token(fields::EATING_DISORDER, "yes")
}

fn if_diabetic(answers: &AnswerSet) -> bool {
    answers.has_token(fields::DIABETES, "yes")
}

fn if_female(answers: &AnswerSet) -> bool {
    answers.has_token(fields::SEX_AT_BIRTH, "female")
}

static YES_NO: &[Choice] = &[
    Choice { token: "yes", label: "Yes" },
    Choice { token: "no", label: "No" },
];

static BASICS_QUESTIONS: &[SubQuestion] = &[
    SubQuestion {
        field: fields::STATE,
        prompt: "Which state do you live in?",
        input: InputKind::FreeText,
        choices: &[],
        required: true,
        relevant: always,
    },
    SubQuestion {
        field: fields::DATE_OF_BIRTH,
        prompt: "What is your date of birth?",
        input: InputKind::FreeText,
        choices: &[],
        required: true,
        relevant: always,
    },
    SubQuestion {
        field: fields::SEX_AT_BIRTH,
        prompt: "What was your sex assigned at birth?",
        input: InputKind::SingleChoice,
        choices: &[
            Choice { token: "female", label: "Female" },
            Choice { token: "male", label: "Male" },
        ],
        required: true,
        relevant: always,
    },
    SubQuestion {
        field: fields::TELEHEALTH_CONSENT,
        prompt: "Do you consent to receive care through telehealth?",
        input: InputKind::Consent,
        choices: &[],
        required: true,
        relevant: always,
    },
];

static MENTAL_HEALTH_QUESTIONS: &[SubQuestion] = &[
    SubQuestion {
        field: fields::MENTAL_HEALTH_CONDITIONS,
        prompt: "Have you ever been diagnosed with any of the following?",
        input: InputKind::MultiChoice,
        choices: &[
            Choice { token: "none", label: "None of these" },
            Choice { token: "depression", label: "Depression" },
            Choice { token: "anxiety", label: "Anxiety" },
            Choice { token: "bipolar_disorder", label: "Bipolar disorder" },
            Choice { token: "other", label: "Other" },
        ],
        required: true,
        relevant: always,
    },
    SubQuestion {
        field: fields::SELF_HARM,
        prompt: "In the past month, have you had thoughts of harming yourself?",
        input: InputKind::SingleChoice,
        choices: YES_NO,
        required: true,
        relevant: always,
    },
];

static EATING_SUBSTANCE_QUESTIONS: &[SubQuestion] = &[
    SubQuestion {
        field: fields::EATING_DISORDER,
        prompt: "Have you ever been diagnosed with or treated for an eating disorder?",
        input: InputKind::SingleChoice,
        choices: YES_NO,
        required: true,
        relevant: always,
    },
    SubQuestion {
        field: fields::EATING_DISORDER_TYPE,
        prompt: "Which of the following apply?",
        input: InputKind::MultiChoice,
        choices: &[
            Choice { token: "anorexia", label: "Anorexia nervosa" },
            Choice { token: "bulimia", label: "Bulimia nervosa" },
            Choice { token: "binge_eating", label: "Binge-eating disorder" },
            Choice { token: "other", label: "Other" },
        ],
        required: true,
        relevant: if_eating_disorder,
    },
    SubQuestion {
        field: fields::ALCOHOL_USE,
        prompt: "How often do you drink alcohol?",
        input: InputKind::SingleChoice,
        choices: &[
            Choice { token: "never", label: "Never" },
            Choice { token: "occasionally", label: "Occasionally" },
            Choice { token: "weekly", label: "Weekly" },
            Choice { token: "daily", label: "Daily" },
        ],
        required: true,
        relevant: always,
    },
];

static MEDICAL_CONDITION_QUESTIONS: &[SubQuestion] = &[SubQuestion {
    field: fields::MEDICAL_CONDITIONS,
    prompt: "Do any of the following apply to you or your immediate family?",
    input: InputKind::MultiChoice,
    choices: &[
        Choice { token: "none", label: "None of these" },
        Choice {
            token: "medullary_thyroid_cancer",
            label: "Medullary thyroid cancer (personal or family history)",
        },
        Choice {
            token: "men2",
            label: "Multiple endocrine neoplasia type 2",
        },
        Choice { token: "pancreatitis", label: "History of pancreatitis" },
        Choice {
            token: "gallbladder_disease",
            label: "Active gallbladder disease",
        },
        Choice { token: "hypertension", label: "High blood pressure" },
        Choice { token: "high_cholesterol", label: "High cholesterol" },
    ],
    required: true,
    relevant: always,
}];

static DIABETES_QUESTIONS: &[SubQuestion] = &[
    SubQuestion {
        field: fields::DIABETES,
        prompt: "Have you been diagnosed with diabetes?",
        input: InputKind::SingleChoice,
        choices: YES_NO,
        required: true,
        relevant: always,
    },
    SubQuestion {
        field: fields::DIABETES_TYPE,
        prompt: "What type of diabetes?",
        input: InputKind::SingleChoice,
        choices: &[
            Choice { token: "type1", label: "Type 1" },
            Choice { token: "type2", label: "Type 2" },
            Choice { token: "prediabetes", label: "Prediabetes" },
        ],
        required: true,
        relevant: if_diabetic,
    },
];

static PREGNANCY_QUESTIONS: &[SubQuestion] = &[SubQuestion {
    field: fields::PREGNANCY,
    prompt: "Are you currently pregnant, trying to become pregnant, or nursing?",
    input: InputKind::SingleChoice,
    choices: &[
        Choice { token: "no", label: "No" },
        Choice { token: "pregnant", label: "Pregnant" },
        Choice { token: "trying", label: "Trying to become pregnant" },
        Choice { token: "nursing", label: "Nursing" },
    ],
    required: true,
    relevant: if_female,
}];

static MEDICATION_QUESTIONS: &[SubQuestion] = &[SubQuestion {
    field: fields::CURRENT_MEDICATIONS,
    prompt: "Are you currently taking any of the following?",
    input: InputKind::MultiChoice,
    choices: &[
        Choice { token: "none", label: "None of these" },
        Choice { token: "insulin", label: "Insulin" },
        Choice { token: "sulfonylurea", label: "A sulfonylurea" },
        Choice { token: "metformin", label: "Metformin" },
        Choice {
            token: "blood_pressure_medication",
            label: "Blood pressure medication",
        },
        Choice { token: "other", label: "Other prescription medication" },
    ],
    required: true,
    relevant: always,
}];

static GLP1_SAFETY_QUESTIONS: &[SubQuestion] = &[SubQuestion {
    field: fields::GLP1_SAFETY,
    prompt: "Do any of the following apply to you?",
    input: InputKind::MultiChoice,
    choices: &[
        Choice { token: "none", label: "None of these" },
        Choice {
            token: "prior_allergic_reaction",
            label: "Severe allergic reaction to a GLP-1 medication",
        },
        Choice {
            token: "currently_on_glp1",
            label: "Currently taking another GLP-1 medication",
        },
        Choice {
            token: "diabetic_retinopathy",
            label: "Diabetic retinopathy",
        },
        Choice {
            token: "severe_gastroparesis",
            label: "Severe gastroparesis",
        },
        Choice {
            token: "recent_bariatric_surgery",
            label: "Bariatric surgery in the last 6 months",
        },
        Choice {
            token: "advanced_kidney_disease",
            label: "Stage 4 or 5 kidney disease",
        },
    ],
    required: true,
    relevant: always,
}];

static EXPERIENCE_QUESTIONS: &[SubQuestion] = &[SubQuestion {
    field: fields::GLP1_EXPERIENCE,
    prompt: "Have you used a GLP-1 medication before?",
    input: InputKind::SingleChoice,
    choices: YES_NO,
    required: true,
    relevant: always,
}];

static HISTORY_QUESTIONS: &[SubQuestion] = &[
    SubQuestion {
        field: fields::GLP1_LAST_MEDICATION,
        prompt: "Which GLP-1 medication did you use most recently?",
        input: InputKind::SingleChoice,
        choices: &[
            Choice { token: "semaglutide", label: "Semaglutide (Ozempic, Wegovy)" },
            Choice { token: "tirzepatide", label: "Tirzepatide (Mounjaro, Zepbound)" },
            Choice { token: "liraglutide", label: "Liraglutide (Saxenda, Victoza)" },
            Choice { token: "other", label: "Other" },
        ],
        required: true,
        relevant: always,
    },
    SubQuestion {
        field: fields::GLP1_CURRENT_DOSE_MG,
        prompt: "What was your most recent weekly dose, in milligrams?",
        input: InputKind::NumberEntry,
        choices: &[],
        required: true,
        relevant: always,
    },
    SubQuestion {
        field: fields::GLP1_WEEKS_ON_THERAPY,
        prompt: "Roughly how many weeks were you on it?",
        input: InputKind::NumberEntry,
        choices: &[],
        required: true,
        relevant: always,
    },
];

/// The medication list is resolved against the catalog at view time, so the
/// static entry carries no choices of its own.
static CHOICE_QUESTIONS: &[SubQuestion] = &[SubQuestion {
    field: fields::SELECTED_MEDICATION,
    prompt: "Which treatment would you like to start?",
    input: InputKind::SingleChoice,
    choices: &[],
    required: true,
    relevant: always,
}];

pub fn section_questions(section: ClinicalSection) -> &'static [SubQuestion] {
    match section {
        ClinicalSection::MentalHealth => MENTAL_HEALTH_QUESTIONS,
        ClinicalSection::EatingAndSubstance => EATING_SUBSTANCE_QUESTIONS,
        ClinicalSection::MedicalConditions => MEDICAL_CONDITION_QUESTIONS,
        ClinicalSection::Diabetes => DIABETES_QUESTIONS,
        ClinicalSection::Pregnancy => PREGNANCY_QUESTIONS,
        ClinicalSection::Medications => MEDICATION_QUESTIONS,
        ClinicalSection::Glp1Safety => GLP1_SAFETY_QUESTIONS,
    }
}

/// Sub-questions of a single-section screen. The clinical assessment screen
/// returns an empty slice here; its questions are addressed per section.
pub fn screen_questions(id: ScreenId) -> &'static [SubQuestion] {
    match id {
        ScreenId::Basics => BASICS_QUESTIONS,
        ScreenId::Glp1Experience => EXPERIENCE_QUESTIONS,
        ScreenId::Glp1History => HISTORY_QUESTIONS,
        ScreenId::MedicationChoice => CHOICE_QUESTIONS,
        _ => &[],
    }
}
