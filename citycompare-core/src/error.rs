use thiserror::Error;

/// Message shown when a submission contains no usable city names.
pub const VALIDATION_MESSAGE: &str = "Please enter at least one city!";

/// Everything that can end a submission early.
///
/// The `Display` text of each variant is what lands in the error region, so it
/// is written for the user rather than for logs.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    #[error("City not found: {city}")]
    CityNotFound { city: String },

    /// Connectivity failure. Reported to the user the same way as a missing
    /// city; the transport error stays available through `source()`.
    #[error("City not found: {city} (request failed)")]
    Network {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected weather data for {city}")]
    Decode {
        city: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Config(String),

    /// A fetch task died before reporting back (panic inside the provider).
    #[error("Lookup for {city} was interrupted")]
    Interrupted { city: String },
}

impl CompareError {
    pub fn city_not_found(city: impl Into<String>) -> Self {
        Self::CityNotFound { city: city.into() }
    }

    /// City the error refers to, if any.
    pub fn city(&self) -> Option<&str> {
        match self {
            Self::CityNotFound { city }
            | Self::Network { city, .. }
            | Self::Decode { city, .. }
            | Self::Interrupted { city } => Some(city),
            Self::Validation | Self::Config(_) => None,
        }
    }
}
