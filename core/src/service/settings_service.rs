use crate::error::{validate_coefficient, validate_person_count, WorkError};
use crate::model::settings::{Settings, Theme};
use crate::repository::DocumentStore;
use crate::service::dto::Notice;
use crate::service::month_service::refresh_all_figures;
use crate::store::WorkStore;

impl<P: DocumentStore, B: DocumentStore> WorkStore<P, B> {
    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    /// Team size the month figures are split across.
    pub fn set_person_count(&mut self, count: u32) -> Result<(), WorkError> {
        let result = self.mutate(|data| {
            data.settings.person_count = validate_person_count(count)?;
            refresh_all_figures(data);
            Ok(())
        });
        self.report(&result, "Person count updated");
        result
    }

    pub fn set_default_coefficient(&mut self, value: f64) -> Result<(), WorkError> {
        let result = self.mutate(|data| {
            data.settings.default_coefficient = validate_coefficient(value)?;
            refresh_all_figures(data);
            Ok(())
        });
        self.report(&result, "Default coefficient updated");
        result
    }

    pub fn set_theme(&mut self, theme: Theme) {
        let _ = self.mutate(|data| {
            data.settings.theme = theme;
            Ok(())
        });
        self.notify(Notice::info(format!("Theme changed to {}", theme)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::day_record::EntryInput;
    use crate::model::keys::{DayKey, MonthKey};
    use crate::repository::MemoryDocumentStore;
    use crate::service::persistence::PersistenceGateway;

    fn store() -> WorkStore<MemoryDocumentStore, MemoryDocumentStore> {
        WorkStore::open(PersistenceGateway::new(
            MemoryDocumentStore::new(),
            MemoryDocumentStore::new(),
            2026,
        ))
    }

    #[test]
    fn test_person_count_change_refreshes_share() {
        let mut store = store();
        let jan: MonthKey = "2026-01".parse().unwrap();
        let day: DayKey = "2026-01-02".parse().unwrap();
        store.set_day_entries(day, &[EntryInput::new(1, 3.0)]);
        assert_eq!(store.get_stats(jan).per_person, 1294.0);

        store.set_person_count(5).unwrap();
        // (4500 + 675) / 5 = 1035, already in the cached figures.
        let cached = store.data().months[&jan].calculated.unwrap();
        assert_eq!(cached.per_person, 1035.0);
        assert_eq!(store.get_stats(jan).per_person, 1035.0);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut store = store();
        assert_eq!(store.set_person_count(0), Err(WorkError::InvalidPersonCount(0)));
        assert!(store.set_default_coefficient(-0.2).is_err());
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_default_coefficient_applies_to_months_without_override() {
        let mut store = store();
        let month: MonthKey = "2030-04".parse().unwrap();
        let day: DayKey = "2030-04-01".parse().unwrap();
        store.set_day_entries(day, &[EntryInput::new(3, 2.0)]);
        assert_eq!(store.get_stats(month).premium, 150.0);

        store.set_default_coefficient(0.5).unwrap();
        assert_eq!(store.get_stats(month).premium, 500.0);
    }

    #[test]
    fn test_theme_is_persisted() {
        let mut store = store();
        store.set_theme(Theme::Dark);
        assert_eq!(store.settings().theme, Theme::Dark);
    }
}
