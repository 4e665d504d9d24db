//! Card rendering capability traits.
//!
//! The reconciler only talks to these traits; whichever UI layer exists
//! (DOM, terminal, test harness) supplies the implementations. `TextCard`
//! and `TextShell` are the in-memory implementations used by the headless
//! binary and the tests.

use std::collections::HashMap;

use tempo_forecast::IconClass;

/// Every displayed field of a forecast card.
///
/// Day-indexed variants address the forward-looking outlook rows (0-based
/// offset from today).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    /// Display text the freshness guard parses the timestamp back out of
    LastUpdated,
    Location,
    Description,
    Date,
    Temperature,
    Sunrise,
    Sunset,
    Humidity,
    WindSpeed,
    WindDirection,
    DayLabel(usize),
    DayHigh(usize),
    DayLow(usize),
}

/// Where an icon class lands on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconSlot {
    Current,
    Day(usize),
}

/// One rendered city card.
pub trait CardView {
    /// Currently displayed text for a field, if any has been set
    fn field(&self, field: CardField) -> Option<&str>;

    /// Overwrite a field's displayed text
    fn set_field(&mut self, field: CardField, value: String);

    /// Currently applied icon class for a slot
    fn icon(&self, slot: IconSlot) -> Option<IconClass>;

    /// Apply an icon class to a slot
    fn set_icon(&mut self, slot: IconSlot, class: IconClass);

    /// Make the card visible (the template-clone starts hidden)
    fn reveal(&mut self);

    fn is_revealed(&self) -> bool;
}

/// Produces fresh cards; the template-clone analog.
pub trait CardFactory {
    fn create(&self, label: &str) -> Box<dyn CardView>;
}

/// Loading-state side effects of the surrounding page.
pub trait Shell {
    fn hide_spinner(&mut self);
    fn reveal_container(&mut self);
}

/// In-memory card: a plain field map.
#[derive(Debug, Default)]
pub struct TextCard {
    fields: HashMap<CardField, String>,
    icons: HashMap<IconSlot, IconClass>,
    revealed: bool,
}

impl TextCard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardView for TextCard {
    fn field(&self, field: CardField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    fn set_field(&mut self, field: CardField, value: String) {
        self.fields.insert(field, value);
    }

    fn icon(&self, slot: IconSlot) -> Option<IconClass> {
        self.icons.get(&slot).copied()
    }

    fn set_icon(&mut self, slot: IconSlot, class: IconClass) {
        self.icons.insert(slot, class);
    }

    fn reveal(&mut self) {
        self.revealed = true;
    }

    fn is_revealed(&self) -> bool {
        self.revealed
    }
}

/// Factory for `TextCard`s.
#[derive(Debug, Default)]
pub struct TextCardFactory;

impl CardFactory for TextCardFactory {
    fn create(&self, label: &str) -> Box<dyn CardView> {
        tracing::debug!("Creating card for {label}");
        Box::new(TextCard::new())
    }
}

/// Headless shell: records whether the loading state was cleared.
#[derive(Debug, Default)]
pub struct TextShell {
    pub spinner_hidden: bool,
    pub container_revealed: bool,
}

impl Shell for TextShell {
    fn hide_spinner(&mut self) {
        self.spinner_hidden = true;
    }

    fn reveal_container(&mut self) {
        self.container_revealed = true;
    }
}
