use super::common::clean_answer_set;
use crate::flows::intake::answers::AnswerSet;
use crate::flows::intake::domain::{fields, AnswerValue};
use crate::flows::intake::eligibility::{evaluate, EligibilityVerdict, ReviewSeverity};

fn exclusion_tag(verdict: &EligibilityVerdict) -> Option<&'static str> {
    verdict.notice().map(|notice| notice.rule)
}

#[test]
fn empty_answer_set_is_clear_with_no_warnings() {
    let verdict = evaluate(&AnswerSet::new());
    assert_eq!(verdict, EligibilityVerdict::Clear { warnings: vec![] });
}

#[test]
fn clean_answers_are_clear() {
    let verdict = evaluate(&clean_answer_set());
    assert!(!verdict.is_excluded());
    assert!(verdict.warnings().is_empty());
}

#[test]
fn self_harm_always_routes_to_crisis_resources() {
    let mut answers = clean_answer_set();
    answers.set(fields::SELF_HARM, AnswerValue::token("yes"));

    let verdict = evaluate(&answers);
    assert_eq!(exclusion_tag(&verdict), Some("mental_health_crisis"));
    let notice = verdict.notice().expect("exclusion notice");
    assert!(!notice.resources.is_empty());
}

#[test]
fn crisis_outranks_every_other_exclusion() {
    // An answer set that matches every exclusion rule at once must still
    // resolve to the crisis verdict.
    let mut answers = clean_answer_set();
    answers.set(fields::SELF_HARM, AnswerValue::token("yes"));
    answers.set(fields::EATING_DISORDER, AnswerValue::token("yes"));
    answers.set(
        fields::EATING_DISORDER_TYPE,
        AnswerValue::tokens(["anorexia"]),
    );
    answers.set(
        fields::MEDICAL_CONDITIONS,
        AnswerValue::tokens(["medullary_thyroid_cancer"]),
    );
    answers.set(fields::SEX_AT_BIRTH, AnswerValue::token("female"));
    answers.set(fields::PREGNANCY, AnswerValue::token("pregnant"));
    answers.set(fields::DIABETES, AnswerValue::token("yes"));
    answers.set(fields::DIABETES_TYPE, AnswerValue::token("type1"));
    answers.set(fields::CURRENT_MEDICATIONS, AnswerValue::tokens(["insulin"]));
    answers.set(
        fields::GLP1_SAFETY,
        AnswerValue::tokens(["prior_allergic_reaction"]),
    );

    let verdict = evaluate(&answers);
    assert_eq!(exclusion_tag(&verdict), Some("mental_health_crisis"));
}

#[test]
fn eating_disorder_outranks_thyroid_history() {
    let mut answers = clean_answer_set();
    answers.set(fields::EATING_DISORDER, AnswerValue::token("yes"));
    answers.set(fields::EATING_DISORDER_TYPE, AnswerValue::tokens(["bulimia"]));
    answers.set(fields::MEDICAL_CONDITIONS, AnswerValue::tokens(["men2"]));

    let verdict = evaluate(&answers);
    assert_eq!(exclusion_tag(&verdict), Some("eating_disorder_exclusion"));
}

#[test]
fn pregnancy_messages_vary_by_status_under_one_tag() {
    let mut tags = Vec::new();
    let mut messages = Vec::new();
    for status in ["pregnant", "trying", "nursing"] {
        let mut answers = clean_answer_set();
        answers.set(fields::SEX_AT_BIRTH, AnswerValue::token("female"));
        answers.set(fields::PREGNANCY, AnswerValue::token(status));

        let verdict = evaluate(&answers);
        let notice = verdict.notice().expect("pregnancy exclusion");
        tags.push(notice.rule);
        messages.push(notice.message);
    }

    assert!(tags.iter().all(|tag| *tag == "pregnancy_exclusion"));
    assert_ne!(messages[0], messages[1]);
    assert_ne!(messages[1], messages[2]);
}

#[test]
fn pregnancy_no_is_not_an_exclusion() {
    let mut answers = clean_answer_set();
    answers.set(fields::SEX_AT_BIRTH, AnswerValue::token("female"));
    answers.set(fields::PREGNANCY, AnswerValue::token("no"));

    let verdict = evaluate(&answers);
    assert!(!verdict.is_excluded());
}

#[test]
fn type1_insulin_and_allergy_each_exclude() {
    let mut answers = clean_answer_set();
    answers.set(fields::DIABETES, AnswerValue::token("yes"));
    answers.set(fields::DIABETES_TYPE, AnswerValue::token("type1"));
    assert_eq!(exclusion_tag(&evaluate(&answers)), Some("type1_denial"));

    let mut answers = clean_answer_set();
    answers.set(fields::CURRENT_MEDICATIONS, AnswerValue::tokens(["insulin"]));
    assert_eq!(exclusion_tag(&evaluate(&answers)), Some("insulin_exclusion"));

    let mut answers = clean_answer_set();
    answers.set(
        fields::GLP1_SAFETY,
        AnswerValue::tokens(["none", "prior_allergic_reaction"]),
    );
    assert_eq!(
        exclusion_tag(&evaluate(&answers)),
        Some("glp1_allergy_exclusion")
    );
}

#[test]
fn pancreatitis_history_yields_exactly_one_review_warning() {
    let mut answers = clean_answer_set();
    answers.set(
        fields::MEDICAL_CONDITIONS,
        AnswerValue::tokens(["pancreatitis"]),
    );

    let verdict = evaluate(&answers);
    assert!(!verdict.is_excluded());
    let warnings = verdict.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].rule, "pancreatitis_review");
    assert_eq!(warnings[0].severity, ReviewSeverity::Clinical);
}

#[test]
fn warnings_accumulate_without_short_circuiting() {
    let mut answers = clean_answer_set();
    answers.set(fields::EATING_DISORDER, AnswerValue::token("yes"));
    answers.set(
        fields::EATING_DISORDER_TYPE,
        AnswerValue::tokens(["binge_eating"]),
    );
    answers.set(
        fields::MEDICAL_CONDITIONS,
        AnswerValue::tokens(["gallbladder_disease"]),
    );
    answers.set(
        fields::GLP1_SAFETY,
        AnswerValue::tokens(["currently_on_glp1", "diabetic_retinopathy"]),
    );

    let verdict = evaluate(&answers);
    let tags: Vec<&str> = verdict.warnings().iter().map(|warning| warning.rule).collect();
    assert_eq!(
        tags,
        vec![
            "eating_disorder_review",
            "gallbladder_info",
            "glp1_coordination",
            "elevated_review"
        ]
    );
}

#[test]
fn every_elevated_risk_token_triggers_the_review_flag() {
    for token in [
        "diabetic_retinopathy",
        "severe_gastroparesis",
        "recent_bariatric_surgery",
        "advanced_kidney_disease",
    ] {
        let mut answers = clean_answer_set();
        answers.set(fields::GLP1_SAFETY, AnswerValue::tokens([token]));
        let verdict = evaluate(&answers);
        assert!(
            verdict
                .warnings()
                .iter()
                .any(|warning| warning.rule == "elevated_review"),
            "token {token} should raise the elevated-review flag"
        );
    }
}

#[test]
fn malformed_field_shapes_never_match_rules() {
    // A boolean where a token is expected is "not applicable", not a match
    // and never a panic.
    let mut answers = AnswerSet::new();
    answers.set(fields::SELF_HARM, AnswerValue::Flag(true));
    answers.set(fields::PREGNANCY, AnswerValue::Number(1.0));
    answers.set(fields::CURRENT_MEDICATIONS, AnswerValue::token("insulin"));

    let verdict = evaluate(&answers);
    // A single token still matches where a multi-select is expected; the
    // boolean and numeric shapes above do not.
    assert_eq!(exclusion_tag(&verdict), Some("insulin_exclusion"));

    answers.set(fields::CURRENT_MEDICATIONS, AnswerValue::Flag(true));
    assert!(!evaluate(&answers).is_excluded());
}

#[test]
fn evaluation_is_idempotent() {
    let mut answers = clean_answer_set();
    answers.set(
        fields::MEDICAL_CONDITIONS,
        AnswerValue::tokens(["pancreatitis"]),
    );

    let first = evaluate(&answers);
    let second = evaluate(&answers);
    assert_eq!(first, second);
}

#[test]
fn stale_branch_answers_cannot_resurrect_an_exclusion() {
    let mut answers = clean_answer_set();
    answers.set(fields::DIABETES, AnswerValue::token("yes"));
    answers.set(fields::DIABETES_TYPE, AnswerValue::token("type1"));
    assert!(evaluate(&answers).is_excluded());

    answers.set(fields::DIABETES, AnswerValue::token("no"));
    assert!(!evaluate(&answers).is_excluded());
}
