use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use rx_intake::flows::intake::{
    CatalogError, Medication, MedicationCatalog, RepositoryError, SessionId, SessionRecord,
    SessionRepository, SinkError, SubmissionRecord, SubmissionSink,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for InMemorySessionRepository {
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
pub(crate) struct InMemorySubmissionSink {
    deliveries: Arc<Mutex<Vec<SubmissionRecord>>>,
}

impl SubmissionSink for InMemorySubmissionSink {
    fn deliver(&self, record: SubmissionRecord) -> Result<(), SinkError> {
        let mut guard = self.deliveries.lock().expect("sink mutex poisoned");
        guard.push(record);
        Ok(())
    }
}

impl InMemorySubmissionSink {
    pub(crate) fn deliveries(&self) -> Vec<SubmissionRecord> {
        self.deliveries.lock().expect("sink mutex poisoned").clone()
    }
}

/// Static per-state catalog standing in for the pricing/catalog API. States
/// without a tailored list fall through to the library fallback.
pub(crate) struct StateMedicationCatalog {
    listings: HashMap<String, Vec<Medication>>,
}

impl StateMedicationCatalog {
    pub(crate) fn with_default_listings() -> Self {
        let full = vec![
            medication("semaglutide", "Compounded Semaglutide", "0.25 mg weekly"),
            medication("tirzepatide", "Compounded Tirzepatide", "2.5 mg weekly"),
            medication("liraglutide", "Liraglutide", "0.6 mg daily"),
        ];
        let no_compounds = vec![medication("liraglutide", "Liraglutide", "0.6 mg daily")];

        let mut listings = HashMap::new();
        for state in ["ia", "tx", "fl", "oh", "co"] {
            listings.insert(state.to_string(), full.clone());
        }
        listings.insert("ca".to_string(), no_compounds);
        Self { listings }
    }
}

impl MedicationCatalog for StateMedicationCatalog {
    fn medications_for_state(&self, state: &str) -> Result<Vec<Medication>, CatalogError> {
        self.listings
            .get(&state.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| CatalogError::UnsupportedState(state.to_string()))
    }
}

fn medication(token: &str, name: &str, starting_dose: &str) -> Medication {
    Medication {
        token: token.to_string(),
        name: name.to_string(),
        starting_dose: starting_dose.to_string(),
    }
}
