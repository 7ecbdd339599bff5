use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;

use super::Backend;
use super::parse::{
    QueryResult, RawTopology, parse_query_results, parse_topology_list, parse_topology_payload,
};

pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        })
    }

    fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("backend returned {status} for {url}"));
        }

        response
            .text()
            .with_context(|| format!("failed to read response body from {url}"))
    }
}

impl Backend for HttpBackend {
    fn list_topologies(&self) -> Result<Vec<String>> {
        let body = self.get_text("/topologylist.json")?;
        parse_topology_list(&body)
    }

    fn load_topology(&self, name: &str) -> Result<RawTopology> {
        let body = self.get_text(&format!("/topology/{name}.json"))?;
        parse_topology_payload(&body).with_context(|| format!("bad payload for topology {name}"))
    }

    fn submit_query(&self, expr: &str) -> Result<Vec<QueryResult>> {
        let url = format!("{}/query", self.base_url);
        log::debug!("POST {url}");

        // The query text travels as the raw request body, not JSON-encoded.
        let response = self
            .client
            .post(&url)
            .body(expr.to_owned())
            .send()
            .with_context(|| format!("query request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("backend returned {status} for {url}"));
        }

        let body = response
            .text()
            .with_context(|| format!("failed to read query response body from {url}"))?;
        parse_query_results(&body)
    }
}
