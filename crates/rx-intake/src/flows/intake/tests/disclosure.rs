use crate::flows::intake::answers::AnswerSet;
use crate::flows::intake::disclosure::Disclosure;
use crate::flows::intake::domain::{fields, AnswerValue, ClinicalSection, ScreenId};
use crate::flows::intake::screens;

#[test]
fn a_fresh_section_shows_exactly_one_question() {
    let answers = AnswerSet::new();
    let disclosure = Disclosure::for_section(ClinicalSection::MentalHealth, &answers);
    assert_eq!(disclosure.visible_count(), 1);
    assert_eq!(
        disclosure.visible()[0].field,
        fields::MENTAL_HEALTH_CONDITIONS
    );
    assert!(!disclosure.is_complete());
}

#[test]
fn answering_reveals_the_next_question() {
    let mut answers = AnswerSet::new();
    answers.set(
        fields::MENTAL_HEALTH_CONDITIONS,
        AnswerValue::tokens(["none"]),
    );

    let disclosure = Disclosure::for_section(ClinicalSection::MentalHealth, &answers);
    assert_eq!(disclosure.visible_count(), 2);
    assert_eq!(disclosure.visible()[1].field, fields::SELF_HARM);
    assert!(!disclosure.is_complete());

    answers.set(fields::SELF_HARM, AnswerValue::token("no"));
    let disclosure = Disclosure::for_section(ClinicalSection::MentalHealth, &answers);
    assert!(disclosure.is_complete());
}

#[test]
fn diabetes_type_stays_hidden_until_diabetes_is_affirmed() {
    let mut answers = AnswerSet::new();
    answers.set(fields::DIABETES, AnswerValue::token("no"));

    let disclosure = Disclosure::for_section(ClinicalSection::Diabetes, &answers);
    assert_eq!(disclosure.relevant_count(), 1);
    assert!(disclosure.is_complete());

    answers.set(fields::DIABETES, AnswerValue::token("yes"));
    let disclosure = Disclosure::for_section(ClinicalSection::Diabetes, &answers);
    assert_eq!(disclosure.relevant_count(), 2);
    assert!(!disclosure.is_complete());
    assert_eq!(disclosure.visible()[1].field, fields::DIABETES_TYPE);

    answers.set(fields::DIABETES_TYPE, AnswerValue::token("type2"));
    let disclosure = Disclosure::for_section(ClinicalSection::Diabetes, &answers);
    assert!(disclosure.is_complete());
}

#[test]
fn pregnancy_section_is_empty_and_complete_for_male_applicants() {
    let mut answers = AnswerSet::new();
    answers.set(fields::SEX_AT_BIRTH, AnswerValue::token("male"));

    let disclosure = Disclosure::for_section(ClinicalSection::Pregnancy, &answers);
    assert_eq!(disclosure.visible_count(), 0);
    assert_eq!(disclosure.relevant_count(), 0);
    assert!(disclosure.is_complete());
}

#[test]
fn pregnancy_question_appears_for_female_applicants() {
    let mut answers = AnswerSet::new();
    answers.set(fields::SEX_AT_BIRTH, AnswerValue::token("female"));

    let disclosure = Disclosure::for_section(ClinicalSection::Pregnancy, &answers);
    assert_eq!(disclosure.visible_count(), 1);
    assert!(!disclosure.is_complete());

    answers.set(fields::PREGNANCY, AnswerValue::token("no"));
    let disclosure = Disclosure::for_section(ClinicalSection::Pregnancy, &answers);
    assert!(disclosure.is_complete());
}

#[test]
fn visibility_and_completion_agree_on_hidden_questions() {
    // Hidden questions are never required: a section whose only unanswered
    // questions are irrelevant must report complete.
    let mut answers = AnswerSet::new();
    answers.set(fields::EATING_DISORDER, AnswerValue::token("no"));
    answers.set(fields::ALCOHOL_USE, AnswerValue::token("never"));

    let disclosure = Disclosure::for_section(ClinicalSection::EatingAndSubstance, &answers);
    assert!(disclosure.is_complete());
    assert!(disclosure
        .visible()
        .iter()
        .all(|question| question.field != fields::EATING_DISORDER_TYPE));
}

#[test]
fn single_choice_questions_auto_advance_and_multi_choice_do_not() {
    let questions = screens::section_questions(ClinicalSection::MentalHealth);
    let multi = &questions[0];
    let single = &questions[1];
    assert!(!Disclosure::auto_advances(multi));
    assert!(Disclosure::auto_advances(single));
}

#[test]
fn basics_screen_disclosure_walks_all_four_questions() {
    let mut answers = AnswerSet::new();
    let questions = screens::screen_questions(ScreenId::Basics);

    let disclosure = Disclosure::over(questions, &answers);
    assert_eq!(disclosure.visible_count(), 1);

    answers.set(fields::STATE, AnswerValue::token("IA"));
    answers.set(fields::DATE_OF_BIRTH, AnswerValue::token("1990-02-01"));
    let disclosure = Disclosure::over(questions, &answers);
    assert_eq!(disclosure.visible_count(), 3);
    assert!(!disclosure.is_complete());

    answers.set(fields::SEX_AT_BIRTH, AnswerValue::token("female"));
    answers.set(fields::TELEHEALTH_CONSENT, AnswerValue::Flag(true));
    let disclosure = Disclosure::over(questions, &answers);
    assert!(disclosure.is_complete());
}
