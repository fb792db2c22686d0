use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{FetchError, WeatherReading};

use super::WeatherClient;

const ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Client for the OpenWeatherMap current-weather endpoint.
///
/// Always requests metric units; Celsius is the canonical form and any
/// Fahrenheit display is converted locally, never refetched.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, FetchError> {
        tracing::debug!(city, "requesting current weather");

        let res = self
            .http
            .get(ENDPOINT)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|err| {
                // Errors out of send() are transport failures: refused
                // connection, DNS, no route.
                tracing::debug!(error = %err, "transport failure");
                FetchError::Network
            })?;

        classify_status(res.status())?;

        let parsed: OwCurrentResponse = res.json().await.map_err(|err| {
            tracing::debug!(error = %err, "unparseable response body");
            FetchError::Api
        })?;

        Ok(parsed.into_reading())
    }
}

/// 404 means the city does not exist as far as the provider is
/// concerned; any other non-2xx status is a generic API failure.
fn classify_status(status: StatusCode) -> Result<(), FetchError> {
    if status == StatusCode::NOT_FOUND {
        Err(FetchError::CityNotFound)
    } else if !status.is_success() {
        Err(FetchError::Api)
    } else {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_reading(self) -> WeatherReading {
        let observed_at =
            DateTime::from_timestamp(self.dt, 0).unwrap_or_else(Utc::now);

        let (condition, icon_id) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        WeatherReading {
            city_name: self.name,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed_ms: self.wind.speed,
            condition,
            icon_id,
            observed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_404_is_city_not_found() {
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND),
            Err(FetchError::CityNotFound)
        );
    }

    #[test]
    fn other_non_success_statuses_are_api_errors() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
        ] {
            assert_eq!(classify_status(status), Err(FetchError::Api));
        }
    }

    #[test]
    fn success_statuses_pass_through() {
        assert_eq!(classify_status(StatusCode::OK), Ok(()));
    }

    #[test]
    fn maps_payload_to_reading() {
        let body = r#"{
            "name": "London",
            "dt": 1756400400,
            "main": { "temp": 15.0, "feels_like": 13.4, "humidity": 72 },
            "weather": [ { "description": "light rain", "icon": "10d" } ],
            "wind": { "speed": 4.1 }
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = parsed.into_reading();

        assert_eq!(reading.city_name, "London");
        assert_eq!(reading.temperature_c, 15.0);
        assert_eq!(reading.feels_like_c, 13.4);
        assert_eq!(reading.humidity_pct, 72);
        assert_eq!(reading.wind_speed_ms, 4.1);
        assert_eq!(reading.condition, "light rain");
        assert_eq!(reading.icon_id, "10d");
        assert_eq!(reading.observed_at.timestamp(), 1756400400);
    }

    #[test]
    fn empty_weather_array_falls_back_to_unknown() {
        let body = r#"{
            "name": "Nowhere",
            "dt": 1756400400,
            "main": { "temp": 1.0, "feels_like": 0.0, "humidity": 50 },
            "weather": [],
            "wind": { "speed": 0.5 }
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = parsed.into_reading();

        assert_eq!(reading.condition, "Unknown");
        assert_eq!(reading.icon_id, "");
    }
}
