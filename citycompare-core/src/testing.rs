//! In-process stand-ins for the weather API and the chart surface.

use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    CityQuery, CompareError, WeatherProvider, WeatherResult,
    chart::{ChartBackend, ChartConfig, ChartId},
};

pub fn sample(city: &str, country: &str, temperature_c: f64) -> WeatherResult {
    WeatherResult {
        city: city.to_string(),
        country: country.to_string(),
        temperature_c,
        description: "clear sky".to_string(),
        humidity_pct: 50,
        observed_at: None,
    }
}

/// Provider that knows a fixed set of cities; anything else is "not found".
#[derive(Debug, Default)]
pub struct FakeProvider {
    cities: HashMap<String, (WeatherResult, Duration)>,
    calls: AtomicUsize,
    completed: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, name: &str, country: &str, temperature_c: f64, delay: Duration) -> Self {
        let mut result = sample(name, country, temperature_c);
        result.humidity_pct = 60;
        self.cities.insert(name.to_string(), (result, delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Cities whose lookup succeeded, in completion order.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current(&self, city: &CityQuery) -> Result<WeatherResult, CompareError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (result, delay) = self
            .cities
            .get(city.as_str())
            .cloned()
            .ok_or_else(|| CompareError::city_not_found(city.as_str()))?;

        tokio::time::sleep(delay).await;
        self.completed.lock().unwrap().push(city.to_string());
        Ok(result)
    }
}

/// Chart surface that only remembers which charts are alive.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u64,
    pub live: HashSet<ChartId>,
    pub created: Vec<ChartConfig>,
    pub destroyed: Vec<ChartId>,
}

impl ChartBackend for RecordingBackend {
    fn create(&mut self, config: &ChartConfig) -> ChartId {
        self.next_id += 1;
        let id = ChartId(self.next_id);
        self.live.insert(id);
        self.created.push(config.clone());
        id
    }

    fn destroy(&mut self, id: ChartId) {
        assert!(self.live.remove(&id), "chart {id:?} destroyed twice");
        self.destroyed.push(id);
    }
}
