//! Gemini API client with bounded retry on server overload.
//!
//! One client per process, built from config and handed to the request
//! handlers through app state. Only the overload failure class is
//! retried; everything else aborts the run immediately.

use crate::config::Config;
use anyhow::{anyhow, Result};
use std::time::Duration;
use tracing::warn;

const GEMINI_API: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("GEMINI_API_KEY is not set"))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            model: config.model.clone(),
            api_key,
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        })
    }

    /// Send one prompt and return the response text, retrying on the
    /// overload class with a fixed delay.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.generate_once(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if is_overloaded(&e) && attempt < self.max_attempts => {
                    warn!(
                        "Model overloaded, retrying ({}/{})",
                        attempt, self.max_attempts
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn generate_once(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API, self.model, self.api_key
        );
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini request failed: {} {}", status, detail));
        }

        let json: serde_json::Value = response.json().await?;
        let text = json["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }
}

/// Overload failure class: HTTP 503/429 or an explicit availability
/// complaint in the error body.
fn is_overloaded(err: &anyhow::Error) -> bool {
    let msg = err.to_string();
    msg.contains("503")
        || msg.contains("429")
        || msg.contains("UNAVAILABLE")
        || msg.to_lowercase().contains("overload")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overload_class_is_recognized() {
        assert!(is_overloaded(&anyhow!(
            "Gemini request failed: 503 Service Unavailable"
        )));
        assert!(is_overloaded(&anyhow!(
            "Gemini request failed: 429 Too Many Requests"
        )));
        assert!(is_overloaded(&anyhow!("status UNAVAILABLE")));
        assert!(is_overloaded(&anyhow!("the model is overloaded")));
    }

    #[test]
    fn other_failures_are_not_retried() {
        assert!(!is_overloaded(&anyhow!(
            "Gemini request failed: 400 Bad Request"
        )));
        assert!(!is_overloaded(&anyhow!("connection refused")));
    }

    #[test]
    fn client_requires_api_key() {
        let config = Config::default();
        assert!(GeminiClient::new(&config).is_err());
    }
}
