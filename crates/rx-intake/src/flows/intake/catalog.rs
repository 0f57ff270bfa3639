use serde::{Deserialize, Serialize};

/// One prescribable medication offered by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub token: String,
    pub name: String,
    pub starting_dose: String,
}

impl Medication {
    fn new(token: &str, name: &str, starting_dose: &str) -> Self {
        Self {
            token: token.to_owned(),
            name: name.to_owned(),
            starting_dose: starting_dose.to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("medication catalog unavailable: {0}")]
    Unavailable(String),
    #[error("no medication catalog for state '{0}'")]
    UnsupportedState(String),
}

/// Source of the per-state medication list (licensing differs by state).
/// Implementations may call out to a pricing/catalog API; the flow itself
/// only ever sees a list or the static fallback.
pub trait MedicationCatalog: Send + Sync {
    fn medications_for_state(&self, state: &str) -> Result<Vec<Medication>, CatalogError>;
}

/// The list served when a provider fails or a state has no tailored catalog.
/// Catalog problems must degrade here instead of leaking into flow state.
pub fn fallback_medications() -> Vec<Medication> {
    vec![
        Medication::new("semaglutide", "Compounded Semaglutide", "0.25 mg weekly"),
        Medication::new("tirzepatide", "Compounded Tirzepatide", "2.5 mg weekly"),
        Medication::new("liraglutide", "Liraglutide", "0.6 mg daily"),
    ]
}

pub fn medications_or_fallback<C>(catalog: &C, state: &str) -> Vec<Medication>
where
    C: MedicationCatalog + ?Sized,
{
    match catalog.medications_for_state(state) {
        Ok(listings) if !listings.is_empty() => listings,
        Ok(_) => fallback_medications(),
        Err(err) => {
            tracing::warn!(%err, state, "medication catalog degraded to fallback list");
            fallback_medications()
        }
    }
}
