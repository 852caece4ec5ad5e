//! HTTP client for the hosted voter table.

use std::time::Duration;

use ballot_store::{DirectoryError, VoterDirectory};
use ballot_types::{BallotId, NewVoter, VoterRecord};
use serde::{Deserialize, Serialize};

use crate::error::RestError;
use crate::row::VoterRow;

/// Connection settings for the hosted table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestConfig {
    /// REST root, e.g. `https://project.example.co/rest/v1`.
    pub base_url: String,
    /// Anonymous API key sent as both `apikey` and bearer token.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    "voters".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:54321/rest/v1".to_string(),
            api_key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Voter directory backed by a PostgREST-style table endpoint.
#[derive(Clone)]
pub struct RestDirectory {
    http: reqwest::Client,
    config: RestConfig,
}

impl RestDirectory {
    pub fn new(config: RestConfig) -> Result<Self, RestError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| RestError::Setup(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Full URL of the voter table.
    pub fn table_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.table_url())
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Send a request and decode the JSON array of rows it returns.
    async fn rows(&self, builder: reqwest::RequestBuilder) -> Result<Vec<VoterRow>, RestError> {
        let response = builder
            .send()
            .await
            .map_err(|e| RestError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<VoterRow>>()
            .await
            .map_err(|e| RestError::Decode(e.to_string()))
    }

    async fn select(&self, filters: &[(&str, String)]) -> Result<Option<VoterRecord>, RestError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());
        query.push(("limit", "1".to_string()));
        let rows = self
            .rows(self.request(reqwest::Method::GET).query(&query))
            .await?;
        Ok(rows.into_iter().next().map(VoterRow::into_record))
    }
}

/// PostgREST equality filter value.
fn eq(value: &str) -> String {
    format!("eq.{value}")
}

impl VoterDirectory for RestDirectory {
    async fn insert(&self, voter: &NewVoter) -> Result<VoterRecord, DirectoryError> {
        let rows = self
            .rows(
                self.request(reqwest::Method::POST)
                    .header("Prefer", "return=representation")
                    .json(&VoterRow::from(voter)),
            )
            .await?;
        rows.into_iter()
            .next()
            .map(VoterRow::into_record)
            .ok_or_else(|| DirectoryError::Serialization("insert returned no row".into()))
    }

    async fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Option<VoterRecord>, DirectoryError> {
        Ok(self
            .select(&[("name", eq(name)), ("phone_number", eq(phone))])
            .await?)
    }

    async fn find_by_ballot_id(
        &self,
        ballot_id: &BallotId,
    ) -> Result<Option<VoterRecord>, DirectoryError> {
        Ok(self.select(&[("ballot_id", eq(ballot_id.as_str()))]).await?)
    }

    async fn record_vote(
        &self,
        phone: &str,
        ballot_id: &BallotId,
    ) -> Result<VoterRecord, DirectoryError> {
        // The has_voted=false filter makes the update one-way on the server.
        let rows = self
            .rows(
                self.request(reqwest::Method::PATCH)
                    .header("Prefer", "return=representation")
                    .query(&[
                        ("phone_number", eq(phone)),
                        ("has_voted", "eq.false".to_string()),
                    ])
                    .json(&serde_json::json!({
                        "has_voted": true,
                        "ballot_id": ballot_id.as_str(),
                    })),
            )
            .await?;
        if let Some(row) = rows.into_iter().next() {
            return Ok(row.into_record());
        }

        // Nothing matched: tell an unknown voter apart from a repeat vote.
        match self.select(&[("phone_number", eq(phone))]).await? {
            Some(_) => Err(DirectoryError::AlreadyVoted(phone.to_string())),
            None => Err(DirectoryError::NotFound(phone.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_joins_without_double_slash() {
        let dir = RestDirectory::new(RestConfig {
            base_url: "https://db.example.org/rest/v1/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(dir.table_url(), "https://db.example.org/rest/v1/voters");
    }

    #[test]
    fn config_defaults_from_minimal_toml_shape() {
        let config: RestConfig =
            serde_json::from_str(r#"{"base_url": "https://db.example.org/rest/v1"}"#).unwrap();
        assert_eq!(config.table, "voters");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_empty());
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        let dir = RestDirectory::new(RestConfig {
            base_url: "http://127.0.0.1:9/rest/v1".into(),
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();
        let result = dir.find_by_name_and_phone("Asha Rao", "9876543210").await;
        assert!(matches!(result, Err(DirectoryError::Unavailable(_))));
    }
}
