use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("fixture endpoint returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),
}

/// One record of the remote seed dataset.
///
/// The source document is loosely typed: `id` shows up both as a JSON number
/// and as a string, `sold` is the fixture's name for the sold flag, and
/// `dateOfSale` carries arbitrary UTC offsets. Normalization happens here so
/// the rest of the crate only sees clean values.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureRecord {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub sold: bool,
    #[serde(rename = "dateOfSale")]
    pub date_of_sale: DateTime<Utc>,
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// HTTP client for the remote JSON fixture used at seed time.
#[derive(Clone)]
pub struct FixtureClient {
    client: Client,
    url: String,
}

impl FixtureClient {
    pub fn new(url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        FixtureClient { client, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches and decodes the full fixture dataset. No retries: a failure
    /// here aborts seeding before anything is written to the store.
    pub async fn fetch(&self) -> Result<Vec<FixtureRecord>, FixtureError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FixtureError::UpstreamStatus(response.status()));
        }

        Ok(response.json::<Vec<FixtureRecord>>().await?)
    }
}
