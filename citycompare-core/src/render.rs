use std::fmt;

use crate::{ResultSet, WeatherResult};

/// Display card for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub title: String,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
}

impl From<&WeatherResult> for WeatherCard {
    fn from(result: &WeatherResult) -> Self {
        let title = if result.country.is_empty() {
            result.city.clone()
        } else {
            format!("{}, {}", result.city, result.country)
        };

        Self {
            title,
            temperature: format!("{}°C", result.temperature_c),
            description: result.description.clone(),
            humidity: format!("Humidity: {}%", result.humidity_pct),
        }
    }
}

impl WeatherCard {
    fn lines(&self) -> [&str; 4] {
        [
            self.title.as_str(),
            self.temperature.as_str(),
            self.description.as_str(),
            self.humidity.as_str(),
        ]
    }
}

impl fmt::Display for WeatherCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.lines().iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let rule = "─".repeat(width + 2);

        writeln!(f, "┌{rule}┐")?;
        for line in self.lines() {
            writeln!(f, "│ {line:<width$} │")?;
        }
        write!(f, "└{rule}┘")
    }
}

pub fn render_cards(results: &ResultSet) -> Vec<WeatherCard> {
    results.iter().map(WeatherCard::from).collect()
}
