use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{CityQuery, CompareError, WeatherResult};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_options(
        api_key: String,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, CompareError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| CompareError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { api_key, base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &CityQuery) -> Result<WeatherResult, CompareError> {
        let url = format!("{}/weather", self.base_url);
        debug!(%city, "requesting current weather");

        let network = |source: reqwest::Error| CompareError::Network { city: city.to_string(), source };

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(network)?;

        let status = res.status();
        let body = res.text().await.map_err(network)?;

        interpret_response(city, status, &body)
    }
}

/// Map an OpenWeather reply onto a result: any non-2xx means the city was not found.
fn interpret_response(
    city: &CityQuery,
    status: StatusCode,
    body: &str,
) -> Result<WeatherResult, CompareError> {
    if !status.is_success() {
        warn!(%city, %status, body = %truncate_body(body), "OpenWeather lookup failed");
        return Err(CompareError::city_not_found(city.as_str()));
    }

    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|source| CompareError::Decode { city: city.to_string(), source })?;

    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(WeatherResult {
        city: parsed.name,
        country: parsed.sys.country.unwrap_or_default(),
        temperature_c: parsed.main.temp,
        description,
        humidity_pct: parsed.main.humidity,
        observed_at: parsed.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    sys: OwSys,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO: &str = r#"{
        "coord": {"lon": 139.69, "lat": 35.69},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 21.4, "feels_like": 21.0, "pressure": 1015, "humidity": 48},
        "dt": 1700000000,
        "sys": {"country": "JP"},
        "name": "Tokyo",
        "cod": 200
    }"#;

    fn tokyo() -> CityQuery {
        CityQuery::new("Tokyo").unwrap()
    }

    #[test]
    fn decodes_current_weather() {
        let result = interpret_response(&tokyo(), StatusCode::OK, TOKYO).unwrap();

        assert_eq!(result.city, "Tokyo");
        assert_eq!(result.country, "JP");
        assert_eq!(result.temperature_c, 21.4);
        assert_eq!(result.description, "clear sky");
        assert_eq!(result.humidity_pct, 48);
        assert_eq!(result.observed_at.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn non_success_status_is_city_not_found() {
        let body = r#"{"cod":"404","message":"city not found"}"#;
        let err = interpret_response(&tokyo(), StatusCode::NOT_FOUND, body).unwrap_err();

        assert!(matches!(err, CompareError::CityNotFound { ref city } if city == "Tokyo"));
    }

    #[test]
    fn server_errors_are_reported_the_same_way() {
        let err = interpret_response(&tokyo(), StatusCode::UNAUTHORIZED, "").unwrap_err();
        assert_eq!(err.to_string(), "City not found: Tokyo");
    }

    #[test]
    fn missing_weather_and_country_fall_back() {
        let body = r#"{"name": "Atlantis", "main": {"temp": -3.0, "humidity": 90}}"#;
        let result = interpret_response(&tokyo(), StatusCode::OK, body).unwrap();

        assert_eq!(result.description, "Unknown");
        assert_eq!(result.country, "");
        assert!(result.observed_at.is_none());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = interpret_response(&tokyo(), StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, CompareError::Decode { .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_reported_as_missing_city() {
        let provider =
            OpenWeatherProvider::with_options("KEY".into(), "not-a-url".into(), None).unwrap();

        let err = provider.current(&tokyo()).await.unwrap_err();

        assert!(matches!(err, CompareError::Network { ref city, .. } if city == "Tokyo"));
        assert!(err.to_string().starts_with("City not found: Tokyo"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
