//! Card view-model synchronization for Tempo.
//!
//! Reconciles forecast records against the rendered card widgets without
//! stale overwrites, manages the user's persisted city selection, and
//! defines the capability traits (`CardView`, `ForecastSource` consumer,
//! `KeyValueStore`) that decouple this logic from any concrete UI or
//! storage technology.

pub mod app;
pub mod registry;
pub mod storage;
pub mod view;

pub use app::{day_label, App, SelectedCity, DAYS_OF_WEEK, SELECTED_CITIES_KEY};
pub use registry::CardRegistry;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use view::{CardFactory, CardField, CardView, IconSlot, Shell, TextCard, TextCardFactory, TextShell};
