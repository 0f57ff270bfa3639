use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::flows::intake::answers::AnswerSet;
use crate::flows::intake::catalog::{CatalogError, Medication, MedicationCatalog};
use crate::flows::intake::domain::{fields, AnswerValue, ClinicalSection};
use crate::flows::intake::repository::{
    RepositoryError, SessionId, SessionRecord, SessionRepository, SessionView, SinkError,
    SubmissionRecord, SubmissionSink,
};
use crate::flows::intake::service::{IntakeService, SessionError};

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    deliveries: Arc<Mutex<Vec<SubmissionRecord>>>,
}

impl MemorySink {
    pub(super) fn deliveries(&self) -> Vec<SubmissionRecord> {
        self.deliveries.lock().expect("sink mutex poisoned").clone()
    }
}

impl SubmissionSink for MemorySink {
    fn deliver(&self, record: SubmissionRecord) -> Result<(), SinkError> {
        let mut guard = self.deliveries.lock().expect("sink mutex poisoned");
        guard.push(record);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct StaticCatalog;

impl MedicationCatalog for StaticCatalog {
    fn medications_for_state(&self, state: &str) -> Result<Vec<Medication>, CatalogError> {
        if state.eq_ignore_ascii_case("ia") {
            Ok(vec![Medication {
                token: "semaglutide".to_string(),
                name: "Semaglutide".to_string(),
                starting_dose: "0.25 mg weekly".to_string(),
            }])
        } else {
            Err(CatalogError::UnsupportedState(state.to_string()))
        }
    }
}

#[derive(Default, Clone)]
pub(super) struct FailingCatalog;

impl MedicationCatalog for FailingCatalog {
    fn medications_for_state(&self, _state: &str) -> Result<Vec<Medication>, CatalogError> {
        Err(CatalogError::Unavailable("catalog upstream offline".to_string()))
    }
}

pub(super) type TestService = IntakeService<MemoryRepository, MemorySink, StaticCatalog>;

pub(super) fn build_service() -> (Arc<TestService>, MemoryRepository, MemorySink) {
    let repository = MemoryRepository::default();
    let sink = MemorySink::default();
    let service = Arc::new(IntakeService::new(
        Arc::new(repository.clone()),
        Arc::new(sink.clone()),
        Arc::new(StaticCatalog),
    ));
    (service, repository, sink)
}

/// A fully answered, exclusion-free answer set for a male applicant with no
/// prior GLP-1 experience.
pub(super) fn clean_answer_set() -> AnswerSet {
    let mut answers = AnswerSet::new();
    answers.set_many([
        (fields::STATE, AnswerValue::token("IA")),
        (fields::DATE_OF_BIRTH, AnswerValue::token("1988-04-12")),
        (fields::SEX_AT_BIRTH, AnswerValue::token("male")),
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
        (fields::GLP1_EXPERIENCE, AnswerValue::token("no")),
        (fields::SELECTED_MEDICATION, AnswerValue::token("semaglutide")),
    ]);
    answers
}

/// Answers for one clinical section of the clean male path. The pregnancy
/// section is intentionally empty: it holds no relevant questions for this
/// applicant.
pub(super) fn clean_section_answers(
    section: ClinicalSection,
) -> Vec<(&'static str, AnswerValue)> {
    match section {
        ClinicalSection::MentalHealth => vec![
            (
                fields::MENTAL_HEALTH_CONDITIONS,
                AnswerValue::tokens(["none"]),
            ),
            (fields::SELF_HARM, AnswerValue::token("no")),
        ],
        ClinicalSection::EatingAndSubstance => vec![
            (fields::EATING_DISORDER, AnswerValue::token("no")),
            (fields::ALCOHOL_USE, AnswerValue::token("occasionally")),
        ],
        ClinicalSection::MedicalConditions => {
            vec![(fields::MEDICAL_CONDITIONS, AnswerValue::tokens(["none"]))]
        }
        ClinicalSection::Diabetes => vec![(fields::DIABETES, AnswerValue::token("no"))],
        ClinicalSection::Pregnancy => Vec::new(),
        ClinicalSection::Medications => {
            vec![(fields::CURRENT_MEDICATIONS, AnswerValue::tokens(["none"]))]
        }
        ClinicalSection::Glp1Safety => {
            vec![(fields::GLP1_SAFETY, AnswerValue::tokens(["none"]))]
        }
    }
}

pub(super) fn answer_all(
    service: &TestService,
    id: &SessionId,
    entries: Vec<(&'static str, AnswerValue)>,
) -> Result<(), SessionError> {
    for (field, value) in entries {
        service.answer(id, field, value)?;
    }
    Ok(())
}

/// Walks a fresh session through the basics screen and the whole clinical
/// assessment on the clean male path, leaving it on the GLP-1 experience
/// screen.
pub(super) fn walk_to_experience(
    service: &TestService,
    id: &SessionId,
) -> Result<SessionView, SessionError> {
    service.advance(id)?; // welcome -> basics
    answer_all(
        service,
        id,
        vec![
            (fields::STATE, AnswerValue::token("IA")),
            (fields::DATE_OF_BIRTH, AnswerValue::token("1988-04-12")),
            (fields::SEX_AT_BIRTH, AnswerValue::token("male")),
            (fields::TELEHEALTH_CONSENT, AnswerValue::Flag(true)),
        ],
    )?;
    service.advance(id)?; // basics -> clinical intro
    service.advance(id)?; // clinical intro -> clinical assessment

    for section in ClinicalSection::ordered() {
        answer_all(service, id, clean_section_answers(section))?;
        service.advance(id)?;
    }

    service.view(id)
}
