//! Core library for the `citycompare` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - City-list parsing and the concurrent weather lookup
//! - Card and chart rendering of a lookup's results
//! - The submission controller tying those together
//!
//! It is used by `citycompare-cli`, but can also be reused by other front ends.

pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod provider;
pub mod query;
pub mod render;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use controller::{Page, SubmissionController, SubmitState};
pub use error::CompareError;
pub use model::{ResultSet, WeatherResult};
pub use provider::WeatherProvider;
pub use query::CityQuery;
