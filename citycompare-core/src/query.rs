use std::fmt;

use crate::error::CompareError;

/// A trimmed, non-empty city name as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

impl CityQuery {
    /// Trims `raw` and rejects it if nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CityQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split on commas, trim each piece and drop the empty ones.
///
/// Order and duplicates are kept exactly as entered.
pub fn split_cities(raw: &str) -> Vec<CityQuery> {
    raw.split(',').filter_map(CityQuery::new).collect()
}

/// Like [`split_cities`], but an empty result is a validation error.
pub fn parse_cities(raw: &str) -> Result<Vec<CityQuery>, CompareError> {
    let cities = split_cities(raw);
    if cities.is_empty() {
        return Err(CompareError::Validation);
    }
    Ok(cities)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(cities: &[CityQuery]) -> Vec<&str> {
        cities.iter().map(CityQuery::as_str).collect()
    }

    #[test]
    fn trims_and_drops_empty_pieces() {
        let cities = split_cities(" Paris ,, London");
        assert_eq!(names(&cities), vec!["Paris", "London"]);
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let cities = split_cities("Oslo,\tLima , Oslo");
        assert_eq!(names(&cities), vec!["Oslo", "Lima", "Oslo"]);
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        let cities = split_cities("  New York ,San  Jose");
        assert_eq!(names(&cities), vec!["New York", "San  Jose"]);
    }

    #[test]
    fn blank_inputs_are_empty() {
        assert!(split_cities("").is_empty());
        assert!(split_cities(" , ,").is_empty());
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(matches!(parse_cities(""), Err(CompareError::Validation)));
        assert!(matches!(parse_cities(" , ,"), Err(CompareError::Validation)));
    }

    #[test]
    fn parse_accepts_single_city() {
        let cities = parse_cities("Tokyo").expect("one city is enough");
        assert_eq!(names(&cities), vec!["Tokyo"]);
    }

    #[test]
    fn city_query_rejects_whitespace() {
        assert!(CityQuery::new("   ").is_none());
        assert_eq!(CityQuery::new(" Rome ").map(|c| c.to_string()), Some("Rome".into()));
    }
}
