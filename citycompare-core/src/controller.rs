use std::{fmt, sync::Arc};
use tracing::{debug, info, warn};

use crate::{
    CompareError, ResultSet, WeatherProvider,
    chart::{ChartBackend, ChartSlot},
    fetcher::fetch_all,
    query::parse_cities,
    render::{WeatherCard, render_cards},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Fetching,
    Rendered,
    Error,
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmitState::Idle => "idle",
            SubmitState::Validating => "validating",
            SubmitState::Fetching => "fetching",
            SubmitState::Rendered => "rendered",
            SubmitState::Error => "error",
        };
        f.write_str(s)
    }
}

/// What the user sees: the card list and the error line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub results: Vec<WeatherCard>,
    pub error: Option<String>,
}

impl Page {
    pub fn clear(&mut self) {
        self.results.clear();
        self.error = None;
    }
}

/// Runs one submission at a time: parse, fetch, then show cards and chart.
///
/// `submit` borrows the controller mutably, so a second submission cannot
/// start until the first has finished and the chart slot never has two owners.
#[derive(Debug)]
pub struct SubmissionController<B: ChartBackend> {
    provider: Arc<dyn WeatherProvider>,
    chart: ChartSlot<B>,
    page: Page,
    results: Option<ResultSet>,
    state: SubmitState,
}

impl<B: ChartBackend> SubmissionController<B> {
    pub fn new(provider: Arc<dyn WeatherProvider>, chart_backend: B) -> Self {
        Self {
            provider,
            chart: ChartSlot::new(chart_backend),
            page: Page::default(),
            results: None,
            state: SubmitState::Idle,
        }
    }

    pub async fn submit(&mut self, raw: &str) -> Result<&ResultSet, CompareError> {
        self.page.clear();
        self.results = None;
        self.chart.release();

        match self.run(raw).await {
            Ok(results) => {
                info!(cities = results.len(), "submission rendered");
                self.transition(SubmitState::Idle);
                let results: &ResultSet = self.results.insert(results);
                Ok(results)
            }
            Err(err) => {
                warn!(error = %err, "submission failed");
                self.transition(SubmitState::Error);
                self.page.clear();
                self.chart.release();
                self.page.error = Some(err.to_string());
                self.transition(SubmitState::Idle);
                Err(err)
            }
        }
    }

    async fn run(&mut self, raw: &str) -> Result<ResultSet, CompareError> {
        self.transition(SubmitState::Validating);
        let cities = parse_cities(raw)?;

        self.transition(SubmitState::Fetching);
        let results = fetch_all(Arc::clone(&self.provider), &cities).await?;

        self.transition(SubmitState::Rendered);
        self.page.results = render_cards(&results);
        self.chart.render(&results);

        Ok(results)
    }

    fn transition(&mut self, next: SubmitState) {
        debug!(from = %self.state, to = %next, "submission state");
        self.state = next;
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Results of the last successful submission, until the next one starts.
    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn chart(&self) -> &ChartSlot<B> {
        &self.chart
    }
}
