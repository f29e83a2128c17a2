//! HTTP client for a remote dependency-parse service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Annotator, Document, DocumentBuilder, NamedEntity};
use crate::config::AnnotatorConfig;
use crate::error::{Result, WordlitError};

/// Request body for both service endpoints
#[derive(Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
}

/// One token as returned by the service
#[derive(Deserialize)]
struct WireToken {
    text: String,
    dep: String,
    #[serde(default)]
    lefts: Vec<usize>,
    #[serde(default)]
    rights: Vec<usize>,
}

/// Response from POST /parse
#[derive(Deserialize)]
struct ParseResponse {
    tokens: Vec<WireToken>,
}

/// One entity as returned by the service
#[derive(Deserialize)]
struct WireEntity {
    text: String,
    label: String,
}

/// Response from POST /ents
#[derive(Deserialize)]
struct EntitiesResponse {
    entities: Vec<WireEntity>,
}

/// Client for a dependency-parse service speaking a small JSON protocol:
/// `POST {endpoint}/parse` and `POST {endpoint}/ents`, both taking
/// `{"text": "..."}`.
///
/// Retries transient failures (429 and 5xx) with exponential backoff.
pub struct RemoteAnnotator {
    client: Client,
    endpoint: String,
    max_retries: usize,
}

impl RemoteAnnotator {
    /// Create an annotator client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// normal operation)
    pub fn new(config: &AnnotatorConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        }
    }

    /// POST `{"text": ...}` to the given service path and deserialize the response.
    async fn post_json<T: serde::de::DeserializeOwned>(&self, path: &str, text: &str) -> Result<T> {
        let url = format!("{}/{}", self.endpoint, path);
        let mut attempt = 0;
        let mut delay = Duration::from_secs(1);

        loop {
            match self.post_json_once(&url, text).await {
                Ok(parsed) => return Ok(parsed),
                Err(e) if attempt < self.max_retries => {
                    // Retry only transient failures (rate limit or server error)
                    let should_retry = e.to_string().contains("429")
                        || e.to_string().contains("500")
                        || e.to_string().contains("502")
                        || e.to_string().contains("503")
                        || e.to_string().contains("504");

                    if should_retry {
                        log::warn!("Retry {}/{} after error: {}", attempt + 1, self.max_retries, e);
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                        attempt += 1;
                    } else {
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn post_json_once<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        text: &str,
    ) -> Result<T> {
        let response = self
            .client
            .post(url)
            .json(&AnnotateRequest { text })
            .send()
            .await
            .map_err(|e| WordlitError::Annotate(format!("Network error: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(WordlitError::Annotate(format!(
                "Annotator service error {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WordlitError::Annotate(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Annotator for RemoteAnnotator {
    async fn parse(&self, text: &str) -> Result<Document> {
        let start = std::time::Instant::now();
        let response: ParseResponse = self.post_json("parse", text).await?;
        log::debug!(
            "Parse call returned {} tokens in {:?}",
            response.tokens.len(),
            start.elapsed()
        );

        let mut builder = DocumentBuilder::new();
        for token in &response.tokens {
            builder.push(token.text.clone(), token.dep.clone());
        }
        for (idx, token) in response.tokens.iter().enumerate() {
            for &left in &token.lefts {
                builder.attach_left(idx, left);
            }
            for &right in &token.rights {
                builder.attach_right(idx, right);
            }
        }
        Ok(builder.build())
    }

    async fn entities(&self, text: &str) -> Result<Vec<NamedEntity>> {
        let response: EntitiesResponse = self.post_json("ents", text).await?;
        Ok(response
            .entities
            .into_iter()
            .map(|e| NamedEntity {
                text: e.text,
                label: e.label,
            })
            .collect())
    }
}
