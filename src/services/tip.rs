use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, thiserror::Error)]
pub enum TipError {
    #[error("Tip advisor is not configured")]
    Disabled,

    #[error("Tip request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Tip request timed out")]
    Timeout,

    #[error("Tip response was empty")]
    Empty,
}

/// Source of short hiring advice for a category.
#[rocket::async_trait]
pub trait TipAdvisor: Send + Sync {
    async fn fetch_tip(&self, category_name: &str) -> Result<String, TipError>;
}

pub fn fallback_tip(category_name: &str) -> String {
    format!(
        "When hiring a {}, always check their past reviews and ask for a quote upfront.",
        category_name
    )
}

fn prompt(category_name: &str) -> String {
    format!(
        "Provide a single, short, and helpful tip for a user looking to hire a {}. \
         The tip should be concise and practical. For example, for a plumber, you might say: \
         'Before they leave, ask them to double-check for any small leaks.'",
        category_name
    )
}

/// Drops double quotes and any quote wrapping the whole reply.
fn clean_tip(raw: &str) -> String {
    raw.replace('"', "")
        .trim()
        .trim_matches('\'')
        .trim()
        .to_string()
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text).filter(|t| !t.trim().is_empty())
    }
}

/// Gemini `generateContent` backed advisor.
pub struct GeminiTipAdvisor {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiTipAdvisor {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        GeminiTipAdvisor {
            client: Client::new(),
            api_key,
            model: model.into(),
        }
    }

    pub fn from_config() -> Self {
        if !Config::is_gemini_enabled() {
            info!("Gemini API key not configured, tips will use the fallback text");
        }
        Self::new(Config::gemini_api_key(), Config::gemini_model())
    }
}

#[rocket::async_trait]
impl TipAdvisor for GeminiTipAdvisor {
    async fn fetch_tip(&self, category_name: &str) -> Result<String, TipError> {
        let api_key = self.api_key.as_deref().ok_or(TipError::Disabled)?;

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt(category_name) }] }],
            "generationConfig": { "temperature": 0.7 }
        });

        let response: GenerateResponse = self
            .client
            .post(format!("{}/{}:generateContent", GEMINI_BASE, self.model))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.text().ok_or(TipError::Empty)
    }
}

/// Wraps an advisor with a deadline and the canned fallback. Never fails.
#[derive(Clone)]
pub struct TipService {
    advisor: Arc<dyn TipAdvisor>,
    timeout: Duration,
}

impl TipService {
    pub fn new(advisor: Arc<dyn TipAdvisor>, timeout: Duration) -> Self {
        TipService { advisor, timeout }
    }

    pub fn from_config() -> Self {
        Self::new(
            Arc::new(GeminiTipAdvisor::from_config()),
            Duration::from_millis(Config::tip_timeout_ms()),
        )
    }

    pub async fn tip_for(&self, category_name: &str) -> String {
        let result = match tokio::time::timeout(self.timeout, self.advisor.fetch_tip(category_name)).await {
            Ok(result) => result,
            Err(_) => Err(TipError::Timeout),
        };

        match result.map(|tip| clean_tip(&tip)) {
            Ok(tip) if !tip.is_empty() => tip,
            Ok(_) => fallback_tip(category_name),
            Err(TipError::Disabled) => fallback_tip(category_name),
            Err(e) => {
                error!("Error fetching tip for '{}': {}", category_name, e);
                fallback_tip(category_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[rocket::async_trait]
    impl TipAdvisor for Fixed {
        async fn fetch_tip(&self, _category_name: &str) -> Result<String, TipError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[rocket::async_trait]
    impl TipAdvisor for Failing {
        async fn fetch_tip(&self, _category_name: &str) -> Result<String, TipError> {
            Err(TipError::Empty)
        }
    }

    struct Slow;

    #[rocket::async_trait]
    impl TipAdvisor for Slow {
        async fn fetch_tip(&self, _category_name: &str) -> Result<String, TipError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    fn service(advisor: impl TipAdvisor + 'static) -> TipService {
        TipService::new(Arc::new(advisor), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn strips_quotes_from_reply() {
        let tip = service(Fixed("\"Ask for a written quote.\"")).tip_for("Plumbers").await;
        assert_eq!(tip, "Ask for a written quote.");
    }

    #[tokio::test]
    async fn failures_fall_back() {
        let expected = fallback_tip("Plumbers");
        assert_eq!(service(Failing).tip_for("Plumbers").await, expected);
        assert_eq!(service(Fixed("  ")).tip_for("Plumbers").await, expected);
        assert_eq!(
            service(GeminiTipAdvisor::new(None, "gemini-2.5-flash")).tip_for("Plumbers").await,
            expected
        );
    }

    #[tokio::test]
    async fn slow_advisor_times_out() {
        assert_eq!(service(Slow).tip_for("Masons").await, fallback_tip("Masons"));
    }

    #[test]
    fn fallback_mentions_category() {
        assert_eq!(
            fallback_tip("Electricians"),
            "When hiring a Electricians, always check their past reviews and ask for a quote upfront."
        );
    }

    #[test]
    fn extracts_text_from_generate_response() {
        let raw = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Check " }, { "text": "licences." }] } }]
        });
        let parsed: GenerateResponse = serde_json::from_value(raw).expect("response");
        assert_eq!(parsed.text().as_deref(), Some("Check licences."));

        let empty: GenerateResponse = serde_json::from_value(serde_json::json!({})).expect("response");
        assert!(empty.text().is_none());
    }
}
