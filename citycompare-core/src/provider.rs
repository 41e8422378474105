use async_trait::async_trait;
use std::fmt::Debug;

use crate::{CityQuery, CompareError, Config, WeatherResult, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// Source of current weather for a single city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &CityQuery) -> Result<WeatherResult, CompareError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, CompareError> {
    let api_key = config.api_key()?;
    OpenWeatherProvider::with_options(api_key, config.base_url().to_string(), config.timeout())
}
