//! Application state: the reconciler and the city-selection manager.
//!
//! Single-threaded and event-driven: startup and each user action run to
//! completion before the next, so the registry and the selection need no
//! synchronization.

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

use tempo_core::StorageError;
use tempo_forecast::{initial_forecast, ForecastRecord, ForecastSource, IconClass};

use crate::registry::CardRegistry;
use crate::storage::KeyValueStore;
use crate::view::{CardFactory, CardField, IconSlot, Shell};

/// Store key for the persisted selection blob
pub const SELECTED_CITIES_KEY: &str = "selectedCities";

/// Monday-start day names used for the outlook labels
pub const DAYS_OF_WEEK: [&str; 7] = ["Seg", "Ter", "Qua", "Qui", "Sex", "Sab", "Dom"];

/// Label for the outlook row `offset` days from today.
///
/// `today_index` is Monday-start (Mon = 0).
pub fn day_label(today_index: usize, offset: usize) -> &'static str {
    DAYS_OF_WEEK[(today_index + offset) % 7]
}

/// One entry of the user's persisted city selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCity {
    pub key: String,
    pub label: String,
}

/// The shared view-model state, explicit rather than global.
///
/// Owns the card registry and the selection; the forecast source, the
/// persistence adapter and the rendering layer are injected capabilities.
pub struct App {
    loading: bool,
    cards: CardRegistry,
    selected_cities: Vec<SelectedCity>,
    source: Box<dyn ForecastSource>,
    store: Box<dyn KeyValueStore>,
    factory: Box<dyn CardFactory>,
    shell: Box<dyn Shell>,
}

impl App {
    pub fn new(
        source: Box<dyn ForecastSource>,
        store: Box<dyn KeyValueStore>,
        factory: Box<dyn CardFactory>,
        shell: Box<dyn Shell>,
    ) -> Self {
        Self {
            loading: true,
            cards: CardRegistry::new(),
            selected_cities: Vec::new(),
            source,
            store,
            factory,
            shell,
        }
    }

    /// Update a city's card with a forecast record, creating the card on
    /// first sight of the key.
    ///
    /// Freshness guard: when the card already displays a timestamp newer
    /// than `record.created`, the update is discarded with no mutation.
    pub fn update_forecast_card(&mut self, record: &ForecastRecord) {
        let today_index = Local::now().weekday().num_days_from_monday() as usize;
        self.update_forecast_card_on(record, today_index);
    }

    fn update_forecast_card_on(&mut self, record: &ForecastRecord, today_index: usize) {
        if !self.cards.contains(&record.key) {
            let mut card = self.factory.create(&record.label);
            card.set_field(CardField::Location, record.label.clone());
            card.reveal();
            self.cards.insert(record.key.clone(), card);
            tracing::debug!("Created card for {} ({})", record.label, record.key);
        }

        let Some(card) = self.cards.get_mut(&record.key) else {
            return;
        };

        // Bail if the card already shows more recent data than the record
        let displayed: Option<DateTime<Utc>> = card
            .field(CardField::LastUpdated)
            .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
            .map(|dt| dt.with_timezone(&Utc));
        if let Some(shown) = displayed {
            if record.created < shown {
                tracing::debug!(
                    "Discarding stale update for {} ({} < {})",
                    record.key,
                    record.created,
                    shown
                );
                return;
            }
        }
        card.set_field(CardField::LastUpdated, record.created.to_rfc3339());

        card.set_field(CardField::Location, record.label.clone());
        card.set_field(CardField::Description, record.current.text.clone());
        card.set_field(CardField::Date, record.current.date.clone());
        if let Some(class) = IconClass::from_code(record.current.code) {
            card.set_icon(IconSlot::Current, class);
        }
        card.set_field(
            CardField::Temperature,
            (record.current.temp.round() as i64).to_string(),
        );
        card.set_field(CardField::Sunrise, record.astronomy.sunrise.clone());
        card.set_field(CardField::Sunset, record.astronomy.sunset.clone());
        card.set_field(
            CardField::Humidity,
            format!("{}%", record.humidity.round() as i64),
        );
        card.set_field(
            CardField::WindSpeed,
            (record.wind.speed.round() as i64).to_string(),
        );
        card.set_field(
            CardField::WindDirection,
            (record.wind.direction.round() as i64).to_string(),
        );

        // A missing day for an offset is silently skipped
        for (offset, daily) in record.forecast_days.iter().take(7).enumerate() {
            card.set_field(
                CardField::DayLabel(offset),
                day_label(today_index, offset).to_string(),
            );
            if let Some(class) = IconClass::from_code(daily.code) {
                card.set_icon(IconSlot::Day(offset), class);
            }
            card.set_field(
                CardField::DayHigh(offset),
                (daily.high.round() as i64).to_string(),
            );
            card.set_field(
                CardField::DayLow(offset),
                (daily.low.round() as i64).to_string(),
            );
        }

        // First successful render clears the loading state, once
        if self.loading {
            self.shell.hide_spinner();
            self.shell.reveal_container();
            self.loading = false;
        }
    }

    /// Look up a city's forecast and reconcile its card.
    ///
    /// A key absent from the source falls back to the fixed default record
    /// rather than signaling failure.
    pub fn get_forecast(&mut self, key: &str) {
        let record = self.source.lookup(key).unwrap_or_else(|| {
            tracing::debug!("No forecast for key {key}, using fallback");
            initial_forecast()
        });
        self.update_forecast_card(&record);
    }

    /// Re-run the forecast lookup for every rendered card, sequentially.
    pub fn refresh_all(&mut self) {
        for key in self.cards.keys() {
            self.get_forecast(&key);
        }
    }

    /// Add a city to the selection, render it, and persist the whole
    /// selection (overwrite, not incremental).
    ///
    /// # Errors
    /// Returns `StorageError` when the selection cannot be persisted; the
    /// card is rendered regardless.
    pub fn add_city(&mut self, key: &str, label: &str) -> Result<(), StorageError> {
        self.get_forecast(key);
        self.selected_cities.push(SelectedCity {
            key: key.to_string(),
            label: label.to_string(),
        });
        self.save_selected_cities()
    }

    /// Startup: restore the persisted selection and render it, or seed the
    /// first run with the default city and persist immediately.
    ///
    /// # Errors
    /// Returns `StorageError` when the first-run seed cannot be persisted.
    pub fn bootstrap(&mut self) -> Result<(), StorageError> {
        if let Some(cities) = self.restore_selected_cities() {
            tracing::info!("Restoring {} saved cities", cities.len());
            self.selected_cities = cities.clone();
            for city in &cities {
                self.get_forecast(&city.key);
            }
            return Ok(());
        }

        // First run, or the saved selection was unreadable
        let record = initial_forecast();
        tracing::info!("First run, seeding with {}", record.label);
        self.update_forecast_card(&record);
        self.selected_cities = vec![SelectedCity {
            key: record.key.clone(),
            label: record.label.clone(),
        }];
        self.save_selected_cities()
    }

    fn save_selected_cities(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.selected_cities)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        self.store.set(SELECTED_CITIES_KEY, &json)
    }

    fn restore_selected_cities(&self) -> Option<Vec<SelectedCity>> {
        let raw = match self.store.get(SELECTED_CITIES_KEY) {
            Ok(value) => value?,
            Err(e) => {
                tracing::warn!("Failed to read saved cities: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cities) => Some(cities),
            Err(e) => {
                tracing::warn!("Saved cities malformed, treating as first run: {e}");
                None
            }
        }
    }

    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    pub fn selected_cities(&self) -> &[SelectedCity] {
        &self.selected_cities
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempo_forecast::MockForecastSource;

    use crate::storage::MemoryStore;
    use crate::view::{CardView, TextCardFactory, TextShell};

    fn test_app() -> App {
        App::new(
            Box::new(MockForecastSource),
            Box::new(MemoryStore::new()),
            Box::new(TextCardFactory),
            Box::new(TextShell::default()),
        )
    }

    fn all_fields() -> Vec<CardField> {
        let mut fields = vec![
            CardField::LastUpdated,
            CardField::Location,
            CardField::Description,
            CardField::Date,
            CardField::Temperature,
            CardField::Sunrise,
            CardField::Sunset,
            CardField::Humidity,
            CardField::WindSpeed,
            CardField::WindDirection,
        ];
        for i in 0..7 {
            fields.push(CardField::DayLabel(i));
            fields.push(CardField::DayHigh(i));
            fields.push(CardField::DayLow(i));
        }
        fields
    }

    /// Full displayed state of a card, for byte-identical comparisons
    fn snapshot(card: &dyn CardView) -> Vec<Option<String>> {
        let mut state: Vec<Option<String>> = all_fields()
            .into_iter()
            .map(|f| card.field(f).map(str::to_string))
            .collect();
        state.push(card.icon(IconSlot::Current).map(|c| c.css_class().to_string()));
        for i in 0..7 {
            state.push(card.icon(IconSlot::Day(i)).map(|c| c.css_class().to_string()));
        }
        state
    }

    #[test]
    fn test_day_label_wednesday_cycle() {
        // today = Wednesday (index 2, Monday-start)
        let labels: Vec<&str> = (0..7).map(|offset| day_label(2, offset)).collect();
        assert_eq!(labels, ["Qua", "Qui", "Sex", "Sab", "Dom", "Seg", "Ter"]);
    }

    #[test]
    fn test_day_label_wraps_from_sunday() {
        assert_eq!(day_label(6, 0), "Dom");
        assert_eq!(day_label(6, 1), "Seg");
    }

    #[test]
    fn test_first_forecast_creates_and_reveals_card() {
        let mut app = test_app();
        app.get_forecast("2379574");

        let card = app.cards().get("2379574").unwrap();
        assert!(card.is_revealed());
        assert_eq!(card.field(CardField::Location), Some("Campinas, SP"));
        assert_eq!(card.field(CardField::Description), Some("Ensolarado"));
        assert_eq!(card.field(CardField::Temperature), Some("30"));
        assert_eq!(card.field(CardField::Humidity), Some("56%"));
        assert_eq!(card.field(CardField::WindSpeed), Some("25"));
        assert_eq!(card.field(CardField::WindDirection), Some("195"));
        assert_eq!(card.icon(IconSlot::Current), Some(IconClass::ClearDay));
        assert_eq!(card.field(CardField::DayHigh(6)), Some("27"));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_unknown_key_renders_fallback() {
        let mut app = test_app();
        app.get_forecast("9999999");

        // Fallback record carries its own key, so the card lands there
        let card = app.cards().get("2459115").unwrap();
        assert_eq!(card.field(CardField::Location), Some("Monte Mor, SP"));
    }

    #[test]
    fn test_stale_update_leaves_card_unchanged() {
        let mut app = test_app();
        app.get_forecast("2379574");

        let before = snapshot(app.cards().get("2379574").unwrap());

        let mut stale = MockForecastSource.lookup("2379574").unwrap();
        stale.created -= chrono::Duration::hours(1);
        stale.current.text = "Tempestade".into();
        stale.current.temp = 12.0;
        app.update_forecast_card(&stale);

        let after = snapshot(app.cards().get("2379574").unwrap());
        assert_eq!(after, before);
    }

    #[test]
    fn test_equal_timestamp_update_overwrites() {
        let mut app = test_app();
        app.get_forecast("2379574");

        let mut same_age = MockForecastSource.lookup("2379574").unwrap();
        same_age.current.temp = 18.0;
        app.update_forecast_card(&same_age);

        let card = app.cards().get("2379574").unwrap();
        assert_eq!(card.field(CardField::Temperature), Some("18"));
    }

    #[test]
    fn test_newer_update_overwrites() {
        let mut app = test_app();
        app.get_forecast("2379574");

        let mut fresh = MockForecastSource.lookup("2379574").unwrap();
        fresh.created += chrono::Duration::minutes(5);
        fresh.current.text = "Chuvoso".into();
        fresh.current.code = 11;
        app.update_forecast_card(&fresh);

        let card = app.cards().get("2379574").unwrap();
        assert_eq!(card.field(CardField::Description), Some("Chuvoso"));
        assert_eq!(card.icon(IconSlot::Current), Some(IconClass::Rain));
        assert_eq!(
            card.field(CardField::LastUpdated),
            Some(fresh.created.to_rfc3339().as_str())
        );
    }

    #[test]
    fn test_short_outlook_skips_missing_days() {
        let mut app = test_app();
        let mut record = MockForecastSource.lookup("2379574").unwrap();
        record.forecast_days.truncate(3);
        app.update_forecast_card(&record);

        let card = app.cards().get("2379574").unwrap();
        assert!(card.field(CardField::DayHigh(2)).is_some());
        assert_eq!(card.field(CardField::DayHigh(3)), None);
        assert_eq!(card.field(CardField::DayLabel(6)), None);
    }

    #[test]
    fn test_temperatures_round_to_nearest_integer() {
        let mut app = test_app();
        let mut record = MockForecastSource.lookup("2379574").unwrap();
        record.current.temp = 29.6;
        record.humidity = 55.4;
        app.update_forecast_card(&record);

        let card = app.cards().get("2379574").unwrap();
        assert_eq!(card.field(CardField::Temperature), Some("30"));
        assert_eq!(card.field(CardField::Humidity), Some("55%"));
    }

    #[test]
    fn test_loading_cleared_exactly_once() {
        let mut app = test_app();
        assert!(app.is_loading());
        app.get_forecast("2379574");
        assert!(!app.is_loading());
        app.get_forecast("2487956");
        assert!(!app.is_loading());
    }

    #[test]
    fn test_first_run_seeds_default_city() {
        let mut app = test_app();
        app.bootstrap().unwrap();

        assert_eq!(app.cards().len(), 1);
        let card = app.cards().get("2459115").unwrap();
        assert_eq!(card.field(CardField::Location), Some("Monte Mor, SP"));

        assert_eq!(
            app.selected_cities(),
            &[SelectedCity {
                key: "2459115".into(),
                label: "Monte Mor, SP".into(),
            }]
        );

        // Seed is persisted immediately
        let persisted = app.store.get(SELECTED_CITIES_KEY).unwrap().unwrap();
        let parsed: Vec<SelectedCity> = serde_json::from_str(&persisted).unwrap();
        assert_eq!(parsed, app.selected_cities());
    }

    #[test]
    fn test_add_city_extends_selection_in_order() {
        let mut app = test_app();
        app.bootstrap().unwrap();
        app.add_city("2487956", "São Paulo, SP").unwrap();

        assert_eq!(app.cards().len(), 2);
        assert_eq!(app.selected_cities().len(), 2);
        assert_eq!(app.selected_cities()[0].key, "2459115");
        assert_eq!(app.selected_cities()[1].key, "2487956");

        let persisted = app.store.get(SELECTED_CITIES_KEY).unwrap().unwrap();
        let parsed: Vec<SelectedCity> = serde_json::from_str(&persisted).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].label, "São Paulo, SP");
    }

    #[test]
    fn test_bootstrap_restores_saved_selection() {
        let saved = r#"[{"key":"2379574","label":"Campinas, SP"},{"key":"2487956","label":"São Paulo, SP"}]"#;
        let mut app = App::new(
            Box::new(MockForecastSource),
            Box::new(MemoryStore::with_entry(SELECTED_CITIES_KEY, saved)),
            Box::new(TextCardFactory),
            Box::new(TextShell::default()),
        );
        app.bootstrap().unwrap();

        assert_eq!(app.selected_cities().len(), 2);
        assert!(app.cards().contains("2379574"));
        assert!(app.cards().contains("2487956"));
    }

    #[test]
    fn test_malformed_saved_selection_is_first_run() {
        let mut app = App::new(
            Box::new(MockForecastSource),
            Box::new(MemoryStore::with_entry(SELECTED_CITIES_KEY, "not json")),
            Box::new(TextCardFactory),
            Box::new(TextShell::default()),
        );
        app.bootstrap().unwrap();

        assert_eq!(app.cards().len(), 1);
        assert_eq!(app.selected_cities()[0].key, "2459115");
    }

    #[test]
    fn test_refresh_all_touches_every_card() {
        let mut app = test_app();
        app.add_city("2379574", "Campinas, SP").unwrap();
        app.add_city("2487956", "São Paulo, SP").unwrap();

        let mut keys = app.cards().keys();
        keys.sort();
        let before: Vec<_> = keys
            .iter()
            .map(|k| snapshot(app.cards().get(k).unwrap()))
            .collect();

        app.refresh_all();
        assert_eq!(app.cards().len(), 2);

        // Same-aged mock data: refresh re-renders without regression
        let after: Vec<_> = keys
            .iter()
            .map(|k| snapshot(app.cards().get(k).unwrap()))
            .collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_selection_round_trip_through_store() {
        let cities = vec![
            SelectedCity {
                key: "2459115".into(),
                label: "Monte Mor, SP".into(),
            },
            SelectedCity {
                key: "2487956".into(),
                label: "São Paulo, SP".into(),
            },
        ];
        let json = serde_json::to_string(&cities).unwrap();
        let parsed: Vec<SelectedCity> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cities);
    }

    #[test]
    fn test_day_labels_rendered_on_card() {
        // Render at a fixed weekday (Wednesday), then verify the labels
        let mut app = test_app();
        let record = MockForecastSource.lookup("2379574").unwrap();
        app.update_forecast_card_on(&record, 2);

        let card = app.cards().get("2379574").unwrap();
        assert_eq!(card.field(CardField::DayLabel(0)), Some("Qua"));
        assert_eq!(card.field(CardField::DayLabel(6)), Some("Ter"));
    }

    #[test]
    fn test_created_timestamp_parses_back_from_display_text() {
        let mut app = test_app();
        let record = MockForecastSource.lookup("2379574").unwrap();
        app.update_forecast_card(&record);

        let card = app.cards().get("2379574").unwrap();
        let text = card.field(CardField::LastUpdated).unwrap();
        let parsed = DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc);
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2018, 1, 31, 15, 5, 0).unwrap()
        );
    }
}
