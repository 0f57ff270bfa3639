//! The adaptive intake flow: answer store, progressive disclosure,
//! eligibility checkpoints, and the screen sequencer, behind a
//! session-oriented service and HTTP router.

pub mod answers;
pub mod catalog;
pub mod disclosure;
pub mod domain;
pub mod eligibility;
pub mod presenter;
pub mod repository;
pub mod router;
pub mod screens;
pub mod sequencer;
pub mod service;

#[cfg(test)]
mod tests;

pub use answers::AnswerSet;
pub use catalog::{fallback_medications, CatalogError, Medication, MedicationCatalog};
pub use disclosure::Disclosure;
pub use domain::{fields, AnswerValue, ClinicalSection, FlowError, ScreenId};
pub use eligibility::{
    evaluate, CareResource, EligibilityVerdict, ExclusionNotice, ReviewSeverity, ReviewWarning,
};
pub use presenter::{route_verdict, FlowDirective};
pub use repository::{
    ChoiceView, QuestionView, RepositoryError, SessionId, SessionRecord, SessionRepository,
    SessionStatus, SessionView, SinkError, SubmissionReceipt, SubmissionRecord, SubmissionSink,
};
pub use screens::{Choice, InputKind, ScreenDescriptor, SubQuestion, TOTAL_STEPS};
pub use sequencer::{FlowProgress, FlowState};
pub use service::{IntakeService, SessionError};
