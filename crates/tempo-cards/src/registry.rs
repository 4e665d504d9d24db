//! In-memory registry of visible cards, keyed by city key.

use std::collections::HashMap;

use crate::view::CardView;

/// Which forecasts are currently rendered.
///
/// Cards are created lazily on first forecast for a key and never
/// destroyed within a session.
#[derive(Default)]
pub struct CardRegistry {
    cards: HashMap<String, Box<dyn CardView>>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cards.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&dyn CardView> {
        self.cards.get(key).map(Box::as_ref)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Box<dyn CardView>> {
        self.cards.get_mut(key)
    }

    pub fn insert(&mut self, key: String, card: Box<dyn CardView>) {
        self.cards.insert(key, card);
    }

    /// City keys of all rendered cards (unordered)
    pub fn keys(&self) -> Vec<String> {
        self.cards.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
