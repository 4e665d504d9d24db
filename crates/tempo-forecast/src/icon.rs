//! Weather-code icon classification.
//!
//! Maps the numeric Yahoo weather codes to semantic icon categories.
//! See: https://developer.yahoo.com/weather/documentation.html#codes

use serde::{Deserialize, Serialize};

/// Semantic icon categories for card rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconClass {
    ClearDay,
    Rain,
    Thunderstorms,
    Snow,
    Fog,
    Windy,
    Cloudy,
    PartlyCloudyDay,
}

impl IconClass {
    /// Classify a numeric weather code.
    ///
    /// Pure lookup over the documented code sets; codes outside all listed
    /// sets yield `None` and no icon class is applied downstream.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            // cold, sunny, fair (night/day), hot, not available
            25 | 32 | 33 | 34 | 36 | 3200 => Some(Self::ClearDay),
            // tornado through scattered showers
            0..=2 | 6 | 8..=12 | 17 | 35 | 40 => Some(Self::Rain),
            // thunderstorms, isolated/scattered, thundershowers
            3 | 4 | 37..=39 | 45 | 47 => Some(Self::Thunderstorms),
            // sleet, flurries, snow showers
            5 | 7 | 13 | 14 | 16 | 18 | 41..=43 | 46 => Some(Self::Snow),
            // blowing snow, dust, foggy, haze, smoky
            15 | 19..=22 => Some(Self::Fog),
            // blustery, windy
            23 | 24 => Some(Self::Windy),
            // cloudy, mostly cloudy, clear (night)
            26..=28 | 31 => Some(Self::Cloudy),
            // partly cloudy
            29 | 30 | 44 => Some(Self::PartlyCloudyDay),
            _ => None,
        }
    }

    /// Stylesheet class name used by the card markup
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::Rain => "rain",
            Self::Thunderstorms => "thunderstorms",
            Self::Snow => "snow",
            Self::Fog => "fog",
            Self::Windy => "windy",
            Self::Cloudy => "cloudy",
            Self::PartlyCloudyDay => "partly-cloudy-day",
        }
    }
}
