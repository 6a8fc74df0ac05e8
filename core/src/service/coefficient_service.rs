use crate::error::{validate_coefficient, WorkError};
use crate::model::keys::MonthKey;
use crate::model::work_data::WorkData;
use crate::repository::DocumentStore;
use crate::service::dto::CoefficientRow;
use crate::store::WorkStore;

/// Month override if one exists, otherwise the default from settings.
/// A stored `0.0` is a real override.
pub fn effective_coefficient(data: &WorkData, month: &MonthKey) -> f64 {
    data.coefficients
        .get(month)
        .copied()
        .unwrap_or(data.settings.default_coefficient)
}

impl<P: DocumentStore, B: DocumentStore> WorkStore<P, B> {
    pub fn get_coefficient(&self, month: &MonthKey) -> f64 {
        effective_coefficient(&self.data, month)
    }

    /// Stores a per-month override and refreshes that month's figures.
    pub fn set_coefficient(&mut self, month: MonthKey, value: f64) -> Result<(), WorkError> {
        let result = validate_coefficient(value).map(|value| {
            self.data.coefficients.insert(month, value);
            tracing::debug!("Coefficient for {} set to {}", month, value);
        });
        if result.is_ok() {
            // recompute persists the whole graph, including the new override
            self.recompute(month);
        }
        self.report(&result, "Coefficient updated");
        result
    }

    /// The twelve effective coefficients of `year`.
    pub fn year_coefficients(&self, year: i32) -> Result<Vec<CoefficientRow>, WorkError> {
        Ok(MonthKey::months_of_year(year)?
            .into_iter()
            .map(|month| CoefficientRow {
                month,
                value: self.get_coefficient(&month),
                overridden: self.data.coefficients.contains_key(&month),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryDocumentStore;
    use crate::service::persistence::PersistenceGateway;

    fn store() -> WorkStore<MemoryDocumentStore, MemoryDocumentStore> {
        WorkStore::open(PersistenceGateway::new(
            MemoryDocumentStore::new(),
            MemoryDocumentStore::new(),
            2026,
        ))
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_override_then_default_fallback() {
        let store = store();
        assert_eq!(store.get_coefficient(&month("2026-02")), 0.12);
        assert_eq!(store.get_coefficient(&month("2031-02")), 0.15);
    }

    #[test]
    fn test_out_of_range_is_rejected_and_table_unchanged() {
        let mut store = store();
        let before = store.data().coefficients.clone();

        assert_eq!(
            store.set_coefficient(month("2026-02"), 1.5),
            Err(WorkError::InvalidCoefficient(1.5))
        );
        assert!(store.set_coefficient(month("2030-01"), f64::NAN).is_err());

        assert_eq!(store.data().coefficients, before);
        assert_eq!(store.get_coefficient(&month("2026-02")), 0.12);
        assert_eq!(store.get_coefficient(&month("2030-01")), 0.15);
    }

    #[test]
    fn test_zero_is_a_real_override() {
        let mut store = store();
        store.set_coefficient(month("2027-05"), 0.0).unwrap();
        assert_eq!(store.get_coefficient(&month("2027-05")), 0.0);
    }

    #[test]
    fn test_year_listing_marks_overrides() {
        let mut store = store();
        store.set_coefficient(month("2027-03"), 0.2).unwrap();

        let rows = store.year_coefficients(2027).unwrap();
        assert_eq!(rows.len(), 12);
        assert!(rows[2].overridden);
        assert_eq!(rows[2].value, 0.2);
        assert!(!rows[0].overridden);
        assert_eq!(rows[0].value, 0.15);
    }
}
