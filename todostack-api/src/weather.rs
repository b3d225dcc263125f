/// Weather feed client
///
/// Todos snapshot the weather description for the day they are created.
/// The upstream feed serves one entry per day of the year, keyed by
/// `"MM-DD"`; the client fetches the whole feed and picks today's entry.
/// The snapshot is immutable once stored and is never refreshed on reads
/// or edits.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// One entry of the upstream feed
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherEntry {
    /// Day of year as `"MM-DD"`
    pub date: String,

    /// Weather description for that day
    pub weather: String,
}

/// Weather client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no weather entry for {0}")]
    MissingDate(String),
}

/// HTTP client for the weather feed
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    url: String,
}

impl WeatherClient {
    /// Creates a client for the given feed URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }

    /// Fetches the weather description for today
    ///
    /// # Errors
    ///
    /// Returns an error if the feed is unreachable, returns a non-2xx
    /// status, serves malformed JSON, or has no entry for today's date.
    /// Callers treat any of these as upstream unavailability.
    pub async fn today(&self) -> Result<String, WeatherError> {
        let entries: Vec<WeatherEntry> = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let today = chrono::Utc::now().date_naive();
        match weather_for_date(&entries, today) {
            Some(weather) => Ok(weather),
            None => {
                warn!("Weather feed has no entry for {}", today);
                Err(WeatherError::MissingDate(month_day_key(today)))
            }
        }
    }
}

/// Formats a date as the feed's `"MM-DD"` key
fn month_day_key(date: NaiveDate) -> String {
    format!("{:02}-{:02}", date.month(), date.day())
}

/// Picks the entry matching the given date from the feed
pub fn weather_for_date(entries: &[WeatherEntry], date: NaiveDate) -> Option<String> {
    let key = month_day_key(date);
    entries
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| entry.weather.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<WeatherEntry> {
        serde_json::from_str(
            r#"[
                {"date": "01-01", "weather": "Sunny"},
                {"date": "03-05", "weather": "Partly Cloudy"},
                {"date": "12-31", "weather": "Snow"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_feed_deserialization() {
        let entries = entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].date, "03-05");
        assert_eq!(entries[1].weather, "Partly Cloudy");
    }

    #[test]
    fn test_matching_date_is_found() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            weather_for_date(&entries(), date),
            Some("Partly Cloudy".to_string())
        );
    }

    #[test]
    fn test_single_digit_months_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(weather_for_date(&entries(), date), Some("Sunny".to_string()));
    }

    #[test]
    fn test_missing_date_yields_none() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        assert_eq!(weather_for_date(&entries(), date), None);
    }

    #[test]
    fn test_month_day_key_format() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        assert_eq!(month_day_key(date), "09-03");
    }
}
