use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current weather for one city, as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub description: String,
    pub humidity_pct: u8,
    /// Provider-side observation time, when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

/// Results for one submission, in the order the cities were entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<WeatherResult>);

impl ResultSet {
    pub fn new(results: Vec<WeatherResult>) -> Self {
        Self(results)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherResult> {
        self.0.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|r| r.city.clone()).collect()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.0.iter().map(|r| r.temperature_c).collect()
    }

    pub fn into_inner(self) -> Vec<WeatherResult> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a WeatherResult;
    type IntoIter = std::slice::Iter<'a, WeatherResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample;

    #[test]
    fn labels_and_temperatures_follow_order() {
        let set = ResultSet::new(vec![sample("London", "GB", 11.5), sample("Paris", "FR", 14.0)]);
        assert_eq!(set.labels(), vec!["London", "Paris"]);
        assert_eq!(set.temperatures(), vec![11.5, 14.0]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let set = ResultSet::new(vec![sample("Tokyo", "JP", 20.0)]);
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["city"], "Tokyo");
        assert!(json[0].get("observed_at").is_none());
    }
}
