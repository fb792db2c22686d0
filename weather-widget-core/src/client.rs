use crate::{FetchError, WeatherReading};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Fetches current weather for a city.
///
/// One outbound request per call, no retries; a failure surfaces
/// immediately as a classified [`FetchError`]. Callers validate that
/// `city` is non-blank before invoking — this seam does not re-validate.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, FetchError>;
}
