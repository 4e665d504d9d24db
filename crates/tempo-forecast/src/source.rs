//! Forecast lookup capability and the fixed mock source.
//!
//! The app only ever talks to `ForecastSource`, so a real HTTP-backed
//! implementation can substitute the mock table without touching the
//! reconciler.

use chrono::{DateTime, TimeZone, Utc};

use crate::types::{Astronomy, CurrentConditions, DayForecast, ForecastRecord, Wind};

/// Opaque city-forecast lookup.
pub trait ForecastSource {
    /// Look up the forecast record for a city key.
    ///
    /// `None` means the source has no data for the key; it is not an error.
    fn lookup(&self, key: &str) -> Option<ForecastRecord>;
}

/// Timestamp shared by every record in the mock data set
fn mock_created() -> DateTime<Utc> {
    // 2018-01-31T15:05:00Z
    Utc.with_ymd_and_hms(2018, 1, 31, 15, 5, 0)
        .single()
        .unwrap_or_default()
}

/// The 7-day outlook shared by every mock city
fn mock_outlook() -> Vec<DayForecast> {
    [
        (44, 29.0, 20.0),
        (44, 30.0, 22.0),
        (4, 28.0, 19.0),
        (24, 27.0, 18.0),
        (24, 32.0, 21.0),
        (44, 30.0, 22.0),
        (44, 27.0, 22.0),
    ]
    .into_iter()
    .map(|(code, high, low)| DayForecast { code, high, low })
    .collect()
}

fn mock_record(
    key: &str,
    label: &str,
    text: &str,
    temp: f64,
    code: u32,
    humidity: f64,
) -> ForecastRecord {
    ForecastRecord {
        key: key.to_string(),
        label: label.to_string(),
        created: mock_created(),
        astronomy: Astronomy {
            sunrise: "5:43 am".to_string(),
            sunset: "8:21 pm".to_string(),
        },
        current: CurrentConditions {
            text: text.to_string(),
            date: "Qui, 31 Jan 2019 15:05 PM BRT".to_string(),
            temp,
            code,
        },
        forecast_days: mock_outlook(),
        humidity,
        wind: Wind {
            speed: 25.0,
            direction: 195.0,
        },
    }
}

/// Fallback record rendered when a key is absent from the source.
///
/// Also the seed city on first run, when the user has not saved anything.
pub fn initial_forecast() -> ForecastRecord {
    mock_record("2459115", "Monte Mor, SP", "Ventando", 29.0, 24, 56.0)
}

/// Fixed in-memory forecast table for the São Paulo region cities.
#[derive(Debug, Default)]
pub struct MockForecastSource;

impl ForecastSource for MockForecastSource {
    fn lookup(&self, key: &str) -> Option<ForecastRecord> {
        let record = match key {
            "2357536" => mock_record("2357536", "Americana, SP", "Ensolarado", 28.0, 32, 56.0),
            "2367105" => mock_record("2367105", "Bauru, SP", "Chuvoso", 27.0, 11, 80.0),
            "2379574" => mock_record("2379574", "Campinas, SP", "Ensolarado", 30.0, 32, 56.0),
            "2490383" => mock_record("2490383", "Itu, SP", "Nublado", 28.0, 26, 56.0),
            "2475687" => mock_record("2475687", "Paulínia, SP", "Ventando", 27.0, 24, 56.0),
            "2487956" => mock_record("2487956", "São Paulo, SP", "Ensolarado", 31.0, 32, 56.0),
            "2459115" => mock_record("2459115", "Monte Mor, SP", "Ventando", 27.0, 44, 56.0),
            _ => return None,
        };
        Some(record)
    }
}
