//! hh.ru listings client
//!
//! Fetches raw vacancy records from the public hh.ru API. The records are
//! returned untouched; [`fetch_vacancies`] maps them into [`Vacancy`] values.

use common::config::ApiConfig;
use common::Vacancy;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// A source of job postings searchable by keyword.
pub trait JobApi {
    /// Raw records matching `keyword`, as returned by the remote service.
    fn fetch_by_keyword(&self, keyword: &str) -> Result<Vec<Value>, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("listings API responded with status {status}")]
    Status { status: StatusCode },
    #[error("failed to decode vacancies response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// One page of the `/vacancies` search response. Only `items` is used.
#[derive(Debug, Deserialize)]
struct VacanciesPage {
    #[serde(default)]
    items: Vec<Value>,
}

/// Blocking client for `GET /vacancies` on hh.ru.
#[derive(Debug, Clone)]
pub struct HeadHunterApi {
    client: Client,
    config: ApiConfig,
}

impl HeadHunterApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { client, config })
    }

    fn connect(&self, keyword: &str) -> Result<Response, ApiError> {
        let url = &self.config.base_url;
        debug!(%url, keyword, area = self.config.area, per_page = self.config.per_page, "requesting vacancies");

        let response = self
            .client
            .get(url)
            .query(&[
                ("text", keyword.to_string()),
                ("area", self.config.area.to_string()),
                ("per_page", self.config.per_page.to_string()),
            ])
            .send()
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status });
        }
        Ok(response)
    }
}

impl JobApi for HeadHunterApi {
    fn fetch_by_keyword(&self, keyword: &str) -> Result<Vec<Value>, ApiError> {
        let page: VacanciesPage = self.connect(keyword)?.json().map_err(ApiError::Decode)?;
        info!(keyword, count = page.items.len(), "vacancies fetched");
        Ok(page.items)
    }
}

/// Fetches by keyword and normalizes every raw record.
pub fn fetch_vacancies(api: &dyn JobApi, keyword: &str) -> Result<Vec<Vacancy>, ApiError> {
    let items = api.fetch_by_keyword(keyword)?;
    Ok(items.iter().map(Vacancy::from_raw).collect())
}
