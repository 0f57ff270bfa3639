use crate::infra::{InMemorySessionRepository, InMemorySubmissionSink, StateMedicationCatalog};
use clap::Args;
use std::sync::Arc;

use rx_intake::error::AppError;
use rx_intake::flows::intake::sequencer::{advance, progress, FlowState};
use rx_intake::flows::intake::{
    fields, AnswerSet, AnswerValue, ClinicalSection, Disclosure, IntakeService, ScreenId,
    SessionError, SessionView,
};

#[derive(Args, Debug, Default)]
pub(crate) struct FlowPreviewArgs {
    /// Preview the branch for a user who has taken a GLP-1 before
    #[arg(long)]
    pub(crate) glp1_experienced: bool,
    /// Sex assigned at birth for the scripted answers (female|male)
    #[arg(long, default_value = "female")]
    pub(crate) sex: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Two-letter state code used for the medication catalog lookup
    #[arg(long, default_value = "IA")]
    pub(crate) state: String,
    /// Walk the branch for a user who has taken a GLP-1 before
    #[arg(long)]
    pub(crate) glp1_experienced: bool,
    /// Answer the self-harm question affirmatively to demonstrate an
    /// exclusion halt instead of a completed intake
    #[arg(long)]
    pub(crate) exclusion: bool,
}

fn scripted_answers(sex: &str, glp1_experienced: bool) -> AnswerSet {
    let mut answers = AnswerSet::new();
    answers.set_many([
        (fields::STATE, AnswerValue::token("IA")),
        (fields::DATE_OF_BIRTH, AnswerValue::token("1986-03-22")),
        (fields::SEX_AT_BIRTH, AnswerValue::token(sex)),
        (fields::TELEHEALTH_CONSENT, AnswerValue::Flag(true)),
        (
            fields::MENTAL_HEALTH_CONDITIONS,
            AnswerValue::tokens(["none"]),
        ),
        (fields::SELF_HARM, AnswerValue::token("no")),
        (fields::EATING_DISORDER, AnswerValue::token("no")),
        (fields::ALCOHOL_USE, AnswerValue::token("occasionally")),
        (fields::MEDICAL_CONDITIONS, AnswerValue::tokens(["none"])),
        (fields::DIABETES, AnswerValue::token("no")),
        (fields::CURRENT_MEDICATIONS, AnswerValue::tokens(["none"])),
        (fields::GLP1_SAFETY, AnswerValue::tokens(["none"])),
        (
            fields::GLP1_EXPERIENCE,
            AnswerValue::token(if glp1_experienced { "yes" } else { "no" }),
        ),
    ]);
    if answers.has_token(fields::SEX_AT_BIRTH, "female") {
        answers.set(fields::PREGNANCY, AnswerValue::token("no"));
    }
    answers
}

pub(crate) fn run_flow_preview(args: FlowPreviewArgs) -> Result<(), AppError> {
    let answers = scripted_answers(&args.sex, args.glp1_experienced);

    println!(
        "Intake flow preview (sex at birth: {}, GLP-1 experienced: {})",
        args.sex, args.glp1_experienced
    );

    let mut state = FlowState::start();
    let mut last_screen = None;
    loop {
        if last_screen != Some(state.screen) {
            let current = progress(state.screen);
            let label = current.label.unwrap_or("interstitial");
            println!(
                "- step {}/{} | {} ({})",
                current.step,
                current.total,
                state.screen.slug(),
                label
            );
        }

        if state.screen == ScreenId::ClinicalAssessment {
            if let Some(section) = ClinicalSection::at(state.section) {
                let disclosure = Disclosure::for_section(section, &answers);
                println!(
                    "    - section: {} ({} relevant question(s))",
                    section.label(),
                    disclosure.relevant_count()
                );
            }
        }

        last_screen = Some(state.screen);
        if state.screen == ScreenId::Review {
            break;
        }
        state = advance(state, &answers).map_err(SessionError::from)?;
    }

    println!("- terminal: confirmation (after submission)");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Prescription intake demo");

    let repository = Arc::new(InMemorySessionRepository::default());
    let sink = Arc::new(InMemorySubmissionSink::default());
    let catalog = Arc::new(StateMedicationCatalog::with_default_listings());
    let service = IntakeService::new(repository, sink.clone(), catalog);

    let view = service.start()?;
    let session_id = view.session_id.clone();
    println!("- opened session {} on '{}'", session_id.0, view.screen);

    service.advance(&session_id)?;
    service.answer(&session_id, fields::STATE, AnswerValue::token(args.state.clone()))?;
    service.answer(
        &session_id,
        fields::DATE_OF_BIRTH,
        AnswerValue::token("1986-03-22"),
    )?;
    service.answer(&session_id, fields::SEX_AT_BIRTH, AnswerValue::token("female"))?;
    let view = service.answer(&session_id, fields::TELEHEALTH_CONSENT, AnswerValue::Flag(true))?;
    print_position(&view);

    service.advance(&session_id)?;
    service.advance(&session_id)?;

    for section in ClinicalSection::ordered() {
        let entries = demo_section_answers(section, args.exclusion);
        let mut latest = None;
        for (field, value) in entries {
            latest = Some(service.answer(&session_id, field, value)?);
        }

        if let Some(view) = latest {
            if let Some(notice) = &view.exclusion {
                println!("- halted during '{}' section", section.label());
                println!("  Rule: {}", notice.rule);
                println!("  {}", notice.title);
                println!("  {}", notice.message);
                for resource in notice.resources {
                    println!("  Resource: {} ({})", resource.name, resource.contact);
                }
                return Ok(());
            }
            if !view.warnings.is_empty() {
                for warning in &view.warnings {
                    println!(
                        "- review flag after '{}': {} [{}]",
                        section.label(),
                        warning.rule,
                        warning.severity.label()
                    );
                }
            }
        }

        let view = service.advance(&session_id)?;
        print_position(&view);
    }

    let token = if args.glp1_experienced { "yes" } else { "no" };
    service.answer(&session_id, fields::GLP1_EXPERIENCE, AnswerValue::token(token))?;
    let view = service.advance(&session_id)?;
    print_position(&view);

    if view.screen == ScreenId::Glp1History.slug() {
        service.answer(
            &session_id,
            fields::GLP1_LAST_MEDICATION,
            AnswerValue::token("semaglutide"),
        )?;
        service.answer(&session_id, fields::GLP1_CURRENT_DOSE_MG, AnswerValue::Number(1.0))?;
        service.answer(&session_id, fields::GLP1_WEEKS_ON_THERAPY, AnswerValue::Number(20.0))?;
        let view = service.advance(&session_id)?;
        print_position(&view);
    }

    let listings = service.medications(&args.state);
    println!("- medication catalog for {}:", args.state);
    for listing in &listings {
        println!("  - {} (starting at {})", listing.name, listing.starting_dose);
    }
    let chosen = listings
        .first()
        .map(|listing| listing.token.clone())
        .unwrap_or_else(|| "semaglutide".to_string());
    service.answer(&session_id, fields::SELECTED_MEDICATION, AnswerValue::token(chosen))?;
    let view = service.advance(&session_id)?;
    print_position(&view);

    let receipt = service.submit(&session_id)?;
    println!(
        "- submitted session {} (verdict: {})",
        receipt.session_id.0,
        if receipt.verdict.is_excluded() {
            "excluded"
        } else {
            "clear"
        }
    );
    for warning in receipt.verdict.warnings() {
        println!("  - warning {}: {}", warning.rule, warning.note);
    }

    match serde_json::to_string_pretty(&receipt) {
        Ok(json) => println!("  Submission receipt:\n{json}"),
        Err(err) => println!("  Submission receipt unavailable: {err}"),
    }
    println!("- clinical review queue depth: {}", sink.deliveries().len());

    Ok(())
}

fn demo_section_answers(
    section: ClinicalSection,
    exclusion: bool,
) -> Vec<(&'static str, AnswerValue)> {
    match section {
        ClinicalSection::MentalHealth => vec![
            (
                fields::MENTAL_HEALTH_CONDITIONS,
                AnswerValue::tokens(["none"]),
            ),
            (
                fields::SELF_HARM,
                AnswerValue::token(if exclusion { "yes" } else { "no" }),
            ),
        ],
        ClinicalSection::EatingAndSubstance => vec![
            (fields::EATING_DISORDER, AnswerValue::token("no")),
            (fields::ALCOHOL_USE, AnswerValue::token("occasionally")),
        ],
        ClinicalSection::MedicalConditions => {
            vec![(fields::MEDICAL_CONDITIONS, AnswerValue::tokens(["none"]))]
        }
        ClinicalSection::Diabetes => vec![(fields::DIABETES, AnswerValue::token("no"))],
        ClinicalSection::Pregnancy => vec![(fields::PREGNANCY, AnswerValue::token("no"))],
        ClinicalSection::Medications => {
            vec![(fields::CURRENT_MEDICATIONS, AnswerValue::tokens(["none"]))]
        }
        ClinicalSection::Glp1Safety => {
            vec![(fields::GLP1_SAFETY, AnswerValue::tokens(["none"]))]
        }
    }
}

fn print_position(view: &SessionView) {
    let section = view
        .section
        .map(|label| format!(" / {label}"))
        .unwrap_or_default();
    println!(
        "- step {}/{} | {}{} | {} visible question(s)",
        view.progress.step,
        view.progress.total,
        view.screen,
        section,
        view.questions.len()
    );
}
