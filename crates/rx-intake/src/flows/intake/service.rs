use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::answers::AnswerSet;
use super::catalog::{self, MedicationCatalog};
use super::disclosure::Disclosure;
use super::domain::{fields, AnswerValue, ClinicalSection, FlowError, ScreenId};
use super::eligibility;
use super::presenter::{self, FlowDirective};
use super::repository::{
    ChoiceView, QuestionView, RepositoryError, SessionId, SessionRecord, SessionRepository,
    SessionStatus, SessionView, SinkError, SubmissionReceipt, SubmissionRecord, SubmissionSink,
};
use super::screens::{self, SubQuestion};
use super::sequencer::{self, FlowState};

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("intake-{id:06}"))
}

/// Service composing the answer store, discloser, eligibility checkpoints,
/// and sequencer behind one session-oriented facade.
pub struct IntakeService<R, S, C> {
    repository: Arc<R>,
    sink: Arc<S>,
    catalog: Arc<C>,
}

impl<R, S, C> IntakeService<R, S, C>
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
    C: MedicationCatalog + 'static,
{
    pub fn new(repository: Arc<R>, sink: Arc<S>, catalog: Arc<C>) -> Self {
        Self {
            repository,
            sink,
            catalog,
        }
    }

    /// Opens a new session at the first screen.
    pub fn start(&self) -> Result<SessionView, SessionError> {
        let record = SessionRecord {
            id: next_session_id(),
            state: FlowState::start(),
            answers: AnswerSet::new(),
            verdict: None,
            status: SessionStatus::InProgress,
            started_at: Utc::now(),
        };
        let stored = self.repository.insert(record)?;
        Ok(self.view_of(&stored))
    }

    pub fn view(&self, id: &SessionId) -> Result<SessionView, SessionError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(self.view_of(&record))
    }

    /// Records one answer: store mutation (with dependent clearing), then an
    /// eligibility checkpoint if the current clinical section just became
    /// complete. Screens never navigate here; `advance` is a separate call.
    pub fn answer(
        &self,
        id: &SessionId,
        field: &str,
        value: AnswerValue,
    ) -> Result<SessionView, SessionError> {
        let mut record = self.fetch_active(id)?;
        let descriptor = screens::descriptor(record.state.screen);
        if !descriptor.fields.iter().any(|allowed| *allowed == field) {
            return Err(SessionError::FieldNotOnScreen {
                field: field.to_owned(),
                screen: record.state.screen,
            });
        }

        record.answers.set(field, value);
        self.run_checkpoint(&mut record);
        self.repository.update(record.clone())?;
        Ok(self.view_of(&record))
    }

    /// Moves forward one step (section or screen). Refused while the current
    /// step is incomplete so a hidden-but-required state cannot arise.
    pub fn advance(&self, id: &SessionId) -> Result<SessionView, SessionError> {
        let mut record = self.fetch_active(id)?;
        if !self.step_complete(&record) {
            return Err(SessionError::IncompleteStep(record.state.screen));
        }
        record.state = sequencer::advance(record.state, &record.answers)?;
        self.repository.update(record.clone())?;
        Ok(self.view_of(&record))
    }

    /// Moves back one step. The previous screen is reconstructed from the
    /// answers, so a resumed session retreats exactly like a live one.
    pub fn retreat(&self, id: &SessionId) -> Result<SessionView, SessionError> {
        let mut record = self.fetch_active(id)?;
        record.state = sequencer::retreat(record.state, &record.answers)?;
        self.repository.update(record.clone())?;
        Ok(self.view_of(&record))
    }

    /// Finalizes the intake from the review screen: evaluates once more over
    /// the full answer set, delivers the payload, and closes the session.
    pub fn submit(&self, id: &SessionId) -> Result<SubmissionReceipt, SessionError> {
        let mut record = self.fetch_active(id)?;
        if record.state.screen != ScreenId::Review {
            return Err(SessionError::NotAtReview(record.state.screen));
        }

        let verdict = eligibility::evaluate(&record.answers);
        let submitted_at = Utc::now();
        self.sink.deliver(SubmissionRecord {
            session_id: record.id.clone(),
            answers: record.answers.clone(),
            verdict: verdict.clone(),
            submitted_at,
        })?;

        record.status = SessionStatus::Submitted;
        record.verdict = Some(verdict.clone());
        record.state = FlowState::at(ScreenId::Confirmation);
        self.repository.update(record)?;

        Ok(SubmissionReceipt {
            session_id: id.clone(),
            status: SessionStatus::Submitted.label(),
            verdict,
            submitted_at,
        })
    }

    /// Per-state medication list with the static fallback on any failure.
    pub fn medications(&self, state: &str) -> Vec<catalog::Medication> {
        catalog::medications_or_fallback(self.catalog.as_ref(), state)
    }

    fn fetch_active(&self, id: &SessionId) -> Result<SessionRecord, SessionError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        match record.status {
            SessionStatus::InProgress => Ok(record),
            status => Err(SessionError::NotActive(status)),
        }
    }

    fn run_checkpoint(&self, record: &mut SessionRecord) {
        if record.state.screen != ScreenId::ClinicalAssessment {
            return;
        }
        let Some(section) = ClinicalSection::at(record.state.section) else {
            return;
        };
        if !Disclosure::for_section(section, &record.answers).is_complete() {
            return;
        }

        let verdict = eligibility::evaluate(&record.answers);
        if let FlowDirective::Halt(notice) = presenter::route_verdict(&verdict) {
            tracing::info!(
                session = %record.id.0,
                rule = notice.rule,
                "intake halted by exclusion rule"
            );
            record.status = SessionStatus::Halted;
            record.state = FlowState::at(ScreenId::Exclusion);
        }
        record.verdict = Some(verdict);
    }

    fn step_complete(&self, record: &SessionRecord) -> bool {
        match record.state.screen {
            ScreenId::ClinicalAssessment => ClinicalSection::at(record.state.section)
                .map(|section| Disclosure::for_section(section, &record.answers).is_complete())
                .unwrap_or(false),
            screen => {
                Disclosure::over(screens::screen_questions(screen), &record.answers).is_complete()
            }
        }
    }

    fn view_of(&self, record: &SessionRecord) -> SessionView {
        let (section, questions) = match record.state.screen {
            ScreenId::ClinicalAssessment => match ClinicalSection::at(record.state.section) {
                Some(section) => (
                    Some(section.label()),
                    Disclosure::for_section(section, &record.answers)
                        .visible()
                        .iter()
                        .map(|question| self.question_view(question, record))
                        .collect(),
                ),
                None => (None, Vec::new()),
            },
            screen => (
                None,
                Disclosure::over(screens::screen_questions(screen), &record.answers)
                    .visible()
                    .iter()
                    .map(|question| self.question_view(question, record))
                    .collect(),
            ),
        };

        let verdict = record.verdict.as_ref();
        SessionView {
            session_id: record.id.clone(),
            status: record.status.label(),
            screen: record.state.screen.slug(),
            progress: sequencer::progress(record.state.screen),
            section,
            questions,
            step_complete: self.step_complete(record),
            warnings: verdict.map(|v| v.warnings().to_vec()).unwrap_or_default(),
            exclusion: verdict.and_then(|v| v.notice().cloned()),
        }
    }

    fn question_view(&self, question: &SubQuestion, record: &SessionRecord) -> QuestionView {
        let choices = if question.field == fields::SELECTED_MEDICATION {
            let state = record.answers.token(fields::STATE).unwrap_or("unknown");
            self.medications(state)
                .into_iter()
                .map(|medication| ChoiceView {
                    token: medication.token,
                    label: format!("{} ({})", medication.name, medication.starting_dose),
                })
                .collect()
        } else {
            question
                .choices
                .iter()
                .map(|choice| ChoiceView {
                    token: choice.token.to_owned(),
                    label: choice.label.to_owned(),
                })
                .collect()
        };

        QuestionView {
            field: question.field,
            prompt: question.prompt,
            input: question.input,
            choices,
            answered: record.answers.answered(question.field),
            auto_advance: Disclosure::auto_advances(question),
        }
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error("session is {} and no longer accepts changes", .0.label())]
    NotActive(SessionStatus),
    #[error("field '{field}' is not collected on screen '{}'", .screen.slug())]
    FieldNotOnScreen { field: String, screen: ScreenId },
    #[error("current step on screen '{}' is incomplete", .0.slug())]
    IncompleteStep(ScreenId),
    #[error("submission is only accepted from the review screen (currently '{}')", .0.slug())]
    NotAtReview(ScreenId),
}
