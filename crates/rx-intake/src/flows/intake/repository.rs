use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;
use super::eligibility::{EligibilityVerdict, ExclusionNotice, ReviewWarning};
use super::screens::InputKind;
use super::sequencer::{FlowProgress, FlowState};

/// Identifier wrapper for intake sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Halted,
    Submitted,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Halted => "halted",
            Self::Submitted => "submitted",
        }
    }
}

/// Repository record for one intake session: position, answers, and the
/// latest checkpoint verdict.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub state: FlowState,
    pub answers: AnswerSet,
    pub verdict: Option<EligibilityVerdict>,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// The terminal payload handed to clinical review: the full answer set plus
/// the final verdict. How it is persisted or transported is not this crate's
/// concern.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    pub session_id: SessionId,
    pub answers: AnswerSet,
    pub verdict: EligibilityVerdict,
    pub submitted_at: DateTime<Utc>,
}

/// Outbound boundary receiving completed intakes.
pub trait SubmissionSink: Send + Sync {
    fn deliver(&self, record: SubmissionRecord) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("submission transport unavailable: {0}")]
    Transport(String),
}

/// A selectable option as rendered to the client.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    pub token: String,
    pub label: String,
}

/// One currently visible sub-question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub field: &'static str,
    pub prompt: &'static str,
    pub input: InputKind,
    pub choices: Vec<ChoiceView>,
    pub answered: bool,
    pub auto_advance: bool,
}

/// Everything the renderer needs to draw the current position: screen,
/// progress, the visible question list, and any verdict surfaced so far.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub status: &'static str,
    pub screen: &'static str,
    pub progress: FlowProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<&'static str>,
    pub questions: Vec<QuestionView>,
    pub step_complete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ReviewWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusion: Option<ExclusionNotice>,
}

/// Acknowledgement returned to the client after a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub session_id: SessionId,
    pub status: &'static str,
    pub verdict: EligibilityVerdict,
    pub submitted_at: DateTime<Utc>,
}
