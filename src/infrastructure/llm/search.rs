//! Optional web-search context for the company-fit analysis.
//!
//! Disabled unless a search API key is configured; a failed search only
//! drops the context block, it never fails the analysis.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;

const MAX_RESULTS: usize = 3;

#[derive(Clone)]
pub struct WebSearchClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl WebSearchClient {
    pub fn from_config(api_url: &str, api_key: Option<&str>) -> Option<Self> {
        api_key.map(|key| WebSearchClient {
            http: Client::new(),
            api_url: api_url.to_string(),
            api_key: key.to_string(),
        })
    }

    /// Top results flattened into a text block for prompt inclusion.
    pub async fn context_for(&self, query: &str) -> Result<String, AppError> {
        let payload = SearchRequest {
            api_key: self.api_key.clone(),
            query: query.to_string(),
            max_results: MAX_RESULTS,
        };

        let response = self.http
            .post(&self.api_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "web search returned HTTP error");
            return Err(AppError::Upstream(format!("search failed: HTTP {status}")));
        }

        let parsed = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("invalid search response: {e}")))?;

        Ok(format_results(&parsed.results))
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest {
    api_key: String,
    query: String,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .take(MAX_RESULTS)
        .map(|r| format!("- {}: {}", r.title, r.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_api_key() {
        assert!(WebSearchClient::from_config("https://api.tavily.com/search", None).is_none());
        assert!(WebSearchClient::from_config("https://api.tavily.com/search", Some("key")).is_some());
    }

    #[test]
    fn results_flatten_to_bullet_lines() {
        let results = vec![
            SearchResult { title: "A".into(), content: "first".into() },
            SearchResult { title: "B".into(), content: "second".into() },
        ];
        assert_eq!(format_results(&results), "- A: first\n- B: second");
    }
}
