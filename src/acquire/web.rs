//! URL acquisition: fetch a page and extract its paragraph text.

use std::time::Duration;

use regex::Regex;
use reqwest::Client;

use crate::config::FetchConfig;
use crate::error::{Result, WordlitError};

/// Build the HTTP client used for URL acquisition.
///
/// # Panics
///
/// Panics if the HTTP client cannot be created (should not happen in
/// normal operation)
pub fn build_fetch_client(config: &FetchConfig) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .expect("Failed to build HTTP client")
}

/// Fetch a page and return the text of its `<p>` elements joined by spaces.
///
/// Network failures and non-success statuses are acquisition errors; they
/// are never returned as text.
pub async fn fetch_url(client: &Client, url: &str) -> Result<String> {
    let parsed = url::Url::parse(url)
        .map_err(|e| WordlitError::InvalidInput(format!("Invalid URL {}: {}", url, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(WordlitError::InvalidInput(format!(
            "Unsupported URL scheme: {}",
            parsed.scheme()
        )));
    }

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| WordlitError::Acquire(format!("Error fetching content from URL: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(WordlitError::Acquire(format!(
            "Error fetching content from URL: HTTP {}",
            status
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| WordlitError::Acquire(format!("Error reading response body: {}", e)))?;

    Ok(paragraph_text(&body))
}

/// Extract the inner text of `<p>` elements, joined by single spaces.
/// Nested markup inside a paragraph is stripped.
pub fn paragraph_text(html: &str) -> String {
    let paragraph_regex =
        Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("Invalid regex pattern");
    let tag_regex = Regex::new(r"<[^>]*>").expect("Invalid regex pattern");

    let mut paragraphs = Vec::new();
    for cap in paragraph_regex.captures_iter(html) {
        let inner = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
        let stripped = tag_regex.replace_all(inner, "");
        let text = decode_entities(&stripped);
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            paragraphs.push(text);
        }
    }

    paragraphs.join(" ")
}

/// Decode the handful of named entities common in article text.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
