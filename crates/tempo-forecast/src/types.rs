use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sunrise/sunset display strings for a city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Astronomy {
    pub sunrise: String,
    pub sunset: String,
}

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Condition text, e.g. "Ensolarado"
    pub text: String,
    /// Human-readable observation date string
    pub date: String,
    pub temp: f64,
    /// Numeric weather code (see `icon::IconClass::from_code`)
    pub code: u32,
}

/// One forward-looking day in the 7-day outlook
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub code: u32,
    pub high: f64,
    pub low: f64,
}

/// Wind observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Bearing in degrees
    pub direction: f64,
}

/// One city's weather snapshot plus its 7-day outlook.
///
/// Immutable once produced by a `ForecastSource`; the `created` timestamp
/// drives the freshness comparison against what a card already displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// City key (WOEID-style identifier)
    pub key: String,
    /// Display label, e.g. "Campinas, SP"
    pub label: String,
    /// When this record was produced
    pub created: DateTime<Utc>,
    pub astronomy: Astronomy,
    pub current: CurrentConditions,
    /// Up to 7 forward-looking days, today first
    pub forecast_days: Vec<DayForecast>,
    pub humidity: f64,
    pub wind: Wind,
}
