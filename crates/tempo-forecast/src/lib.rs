//! Forecast data model for Tempo.
//!
//! Provides the immutable forecast record types, the weather-code icon
//! classifier and the `ForecastSource` lookup capability with its fixed
//! mock implementation.

pub mod icon;
pub mod source;
pub mod types;

pub use icon::IconClass;
pub use source::{initial_forecast, ForecastSource, MockForecastSource};
pub use types::{Astronomy, CurrentConditions, DayForecast, ForecastRecord, Wind};
