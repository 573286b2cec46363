use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::calendar::HolidayEntry;
use crate::holidays::fallback::fallback_holidays;
use crate::holidays::HolidaySource;
use crate::storage::config::HolidaysConfig;

#[derive(Debug, Error)]
pub enum HolidayError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Holiday API returned status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Holiday API returned no holidays for {0}")]
    Empty(i32),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicHoliday {
    local_name: String,
    date: String,
}

/// Client for the Nager.Date public holiday API.
pub struct NagerDateClient {
    base_url: String,
    country_code: String,
    client: reqwest::Client,
}

impl NagerDateClient {
    pub fn new(country_code: impl Into<String>, timeout: Duration) -> Result<Self, HolidayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: "https://date.nager.at/api/v3".to_string(),
            country_code: country_code.into(),
            client,
        })
    }

    pub fn from_config(config: &HolidaysConfig) -> Result<Self, HolidayError> {
        Ok(Self::new(config.country_code.clone(), config.timeout())?.with_base_url(config.base_url.clone()))
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn holidays_url(&self, year: i32) -> String {
        format!("{}/PublicHolidays/{}/{}", self.base_url, year, self.country_code)
    }

    /// Fetches one year of holidays without any fallback.
    pub async fn fetch_year(&self, year: i32) -> Result<Vec<HolidayEntry>, HolidayError> {
        let url = self.holidays_url(year);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(HolidayError::UnexpectedStatus(status));
        }

        let holidays: Vec<PublicHoliday> = response.json().await?;
        if holidays.is_empty() {
            return Err(HolidayError::Empty(year));
        }

        tracing::info!("Fetched {} holidays for {}", holidays.len(), year);
        Ok(holidays
            .into_iter()
            .map(|h| HolidayEntry::new(&h.local_name, h.date))
            .collect())
    }
}

#[async_trait]
impl HolidaySource for NagerDateClient {
    async fn holidays_for_year(&self, year: i32) -> Vec<HolidayEntry> {
        match self.fetch_year(year).await {
            Ok(holidays) => holidays,
            Err(e) => {
                tracing::warn!("Holiday lookup for {} failed, using fallback table: {}", year, e);
                fallback_holidays(year)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HOLIDAY_COLOR;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> NagerDateClient {
        NagerDateClient::new("IN", timeout)
            .unwrap()
            .with_base_url(server.uri())
    }

    #[test]
    fn client_has_default_base_url() {
        let client = NagerDateClient::new("IN", Duration::from_secs(10)).unwrap();
        assert_eq!(client.holidays_url(2025), "https://date.nager.at/api/v3/PublicHolidays/2025/IN");
    }

    #[test]
    fn custom_base_url_drops_trailing_slash() {
        let client = NagerDateClient::new("DE", Duration::from_secs(1))
            .unwrap()
            .with_base_url("http://localhost:8080/".to_string());
        assert_eq!(client.holidays_url(2026), "http://localhost:8080/PublicHolidays/2026/DE");
    }

    #[tokio::test]
    async fn maps_api_holidays() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/PublicHolidays/2025/IN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"date": "2025-01-26", "localName": "Republic Day", "name": "Republic Day", "countryCode": "IN"},
                {"date": "2025-08-15", "localName": "Independence Day", "name": "Independence Day", "countryCode": "IN"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let holidays = client_for(&server, Duration::from_secs(5)).holidays_for_year(2025).await;

        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].title, "🇮🇳 Republic Day");
        assert_eq!(holidays[0].start, "2025-01-26");
        assert!(holidays[1].all_day);
        assert_eq!(holidays[1].color, HOLIDAY_COLOR);
    }

    #[tokio::test]
    async fn server_error_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));

        assert!(matches!(
            client.fetch_year(2025).await,
            Err(HolidayError::UnexpectedStatus(status)) if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
        assert_eq!(client.holidays_for_year(2025).await, fallback_holidays(2025));
    }

    #[tokio::test]
    async fn non_200_success_status_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let holidays = client_for(&server, Duration::from_secs(5)).holidays_for_year(2025).await;

        assert_eq!(holidays, fallback_holidays(2025));
    }

    #[tokio::test]
    async fn malformed_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let holidays = client_for(&server, Duration::from_secs(5)).holidays_for_year(2025).await;

        assert_eq!(holidays, fallback_holidays(2025));
    }

    #[tokio::test]
    async fn empty_list_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));

        assert!(matches!(client.fetch_year(2027).await, Err(HolidayError::Empty(2027))));
        assert_eq!(client.holidays_for_year(2027).await.len(), 6);
    }

    #[tokio::test]
    async fn slow_api_times_out_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"date": "2025-01-01", "localName": "Late"}]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let holidays = client_for(&server, Duration::from_millis(200)).holidays_for_year(2025).await;

        assert_eq!(holidays, fallback_holidays(2025));
    }

    #[tokio::test]
    async fn unreachable_host_falls_back() {
        let client = NagerDateClient::new("IN", Duration::from_secs(1))
            .unwrap()
            .with_base_url("http://127.0.0.1:9".to_string());

        assert_eq!(client.holidays_for_year(2025).await, fallback_holidays(2025));
    }
}
