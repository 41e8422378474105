//! Temperature comparison chart.
//!
//! [`ChartConfig`] is the description handed to a drawing surface, shaped
//! like a Chart.js bar config so it can also be emitted as JSON. A
//! [`ChartBackend`] owns the actual chart instances; [`ChartSlot`] makes sure
//! at most one of them is alive at a time.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::debug;

use crate::ResultSet;

pub const DATASET_LABEL: &str = "Temperature (°C)";
const BACKGROUND_COLOR: &str = "rgba(75, 192, 192, 0.5)";
const BORDER_COLOR: &str = "rgba(75, 192, 192, 1)";

/// Widest bar [`TerminalChart`] will draw, in columns.
pub const MAX_WIDTH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// One bar per city, in result order, on a zero-based y axis.
    pub fn bar_from(results: &ResultSet) -> Self {
        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: results.labels(),
                datasets: vec![Dataset {
                    label: DATASET_LABEL.to_string(),
                    data: results.temperatures(),
                    background_color: BACKGROUND_COLOR.to_string(),
                    border_color: BORDER_COLOR.to_string(),
                    border_width: 1,
                }],
            },
            options: ChartOptions { scales: Scales { y: Axis { begin_at_zero: true } } },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartId(pub u64);

/// Something that can draw charts and tear them down again.
pub trait ChartBackend {
    fn create(&mut self, config: &ChartConfig) -> ChartId;
    fn destroy(&mut self, id: ChartId);
}

/// Proof of ownership of one live chart. Only [`ChartSlot`] creates or consumes these.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle {
    id: ChartId,
}

impl ChartHandle {
    pub fn id(&self) -> ChartId {
        self.id
    }
}

/// Holds the single "current chart" and the backend that drew it.
#[derive(Debug)]
pub struct ChartSlot<B: ChartBackend> {
    backend: B,
    current: Option<ChartHandle>,
}

impl<B: ChartBackend> ChartSlot<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, current: None }
    }

    /// Destroy the current chart, if any.
    pub fn release(&mut self) {
        if let Some(handle) = self.current.take() {
            debug!(id = handle.id.0, "releasing chart");
            self.backend.destroy(handle.id);
        }
    }

    /// Replace whatever is shown with a bar chart of `results`.
    pub fn render(&mut self, results: &ResultSet) -> &ChartHandle {
        self.release();
        let config = ChartConfig::bar_from(results);
        let id = self.backend.create(&config);
        debug!(id = id.0, bars = results.len(), "chart created");
        self.current.insert(ChartHandle { id })
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&ChartHandle> {
        self.current.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChartBackend> Drop for ChartSlot<B> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Draws horizontal bars as text. Bars grow right of the axis for positive
/// values and left of it for negative ones, so zero is always the baseline.
#[derive(Debug)]
pub struct TerminalChart {
    width: usize,
    next_id: u64,
    canvas: Option<(ChartId, String)>,
}

impl Default for TerminalChart {
    fn default() -> Self {
        Self::new(40)
    }
}

impl TerminalChart {
    pub fn new(width: usize) -> Self {
        Self { width: width.clamp(1, MAX_WIDTH), next_id: 0, canvas: None }
    }

    /// Text of the chart currently on screen.
    pub fn canvas(&self) -> Option<&str> {
        self.canvas.as_ref().map(|(_, text)| text.as_str())
    }

    fn draw(&self, config: &ChartConfig) -> String {
        let mut out = String::new();
        let labels = &config.data.labels;
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        for dataset in &config.data.datasets {
            let _ = writeln!(out, "{}", dataset.label);

            let max_pos = dataset.data.iter().copied().fold(0.0_f64, f64::max);
            let max_neg = dataset.data.iter().copied().fold(0.0_f64, |acc, v| acc.max(-v));
            let span = max_pos + max_neg;
            let scale = if span > 0.0 { self.width as f64 / span } else { 0.0 };
            let neg_cols = (max_neg * scale).round() as usize;

            for (label, value) in labels.iter().zip(&dataset.data) {
                let cols = (value.abs() * scale).round() as usize;
                let (left, right) = if *value < 0.0 { (cols.min(neg_cols), 0) } else { (0, cols) };
                let _ = writeln!(
                    out,
                    "{label:<label_width$} {pad}{neg}│{pos} {value:.1}",
                    pad = " ".repeat(neg_cols - left),
                    neg = "█".repeat(left),
                    pos = "█".repeat(right),
                );
            }
        }

        out
    }
}

impl ChartBackend for TerminalChart {
    fn create(&mut self, config: &ChartConfig) -> ChartId {
        self.next_id += 1;
        let id = ChartId(self.next_id);
        self.canvas = Some((id, self.draw(config)));
        id
    }

    fn destroy(&mut self, id: ChartId) {
        if self.canvas.as_ref().is_some_and(|(live, _)| *live == id) {
            self.canvas = None;
        }
    }
}
