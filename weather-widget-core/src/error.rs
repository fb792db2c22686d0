use thiserror::Error;

/// Failure of a single weather fetch.
///
/// Classification happens at the point the failure occurs — HTTP status
/// inspection or the transport error itself — never by matching error
/// message text downstream. The `Display` strings are the exact messages
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("City not found. Please check the spelling.")]
    CityNotFound,

    /// Non-2xx response other than 404, or an unparseable response body.
    #[error("Unable to fetch weather data. Please try again.")]
    Api,

    /// Transport-level failure: refused connection, DNS, no connectivity.
    #[error("Network error. Check your internet connection.")]
    Network,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::CityNotFound => ErrorKind::CityNotFound,
            FetchError::Api => ErrorKind::Api,
            FetchError::Network => ErrorKind::Network,
        }
    }
}

/// Everything the controller can surface to the renderer. `Validation`
/// is produced locally for blank input and never reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    CityNotFound,
    Api,
    Network,
}
