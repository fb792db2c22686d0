use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fetched weather snapshot for a city.
///
/// Temperatures are canonical Celsius regardless of the display unit.
/// A reading is immutable once fetched and replaced wholesale by the
/// next successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// City name as returned by the provider, not as typed by the user.
    pub city_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub condition: String,
    pub icon_id: String,
    pub observed_at: DateTime<Utc>,
}

impl WeatherReading {
    /// Provider-hosted icon image for this reading.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_url_embeds_icon_id() {
        let reading = WeatherReading {
            city_name: "London".to_string(),
            temperature_c: 15.0,
            feels_like_c: 13.5,
            humidity_pct: 72,
            wind_speed_ms: 4.1,
            condition: "light rain".to_string(),
            icon_id: "10d".to_string(),
            observed_at: Utc::now(),
        };

        assert_eq!(
            reading.icon_url(),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }
}
