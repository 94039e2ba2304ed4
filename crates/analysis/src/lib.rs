//! Gemini analysis client.
//!
//! Wraps the single outbound exchange with the Gemini `generateContent`
//! endpoint. The caller supplies the API key per request; nothing is stored.
//! A non-success HTTP status is deliberately returned as displayable text
//! embedding the raw error body, not as an error — the intake page shows it
//! where the analysis would have appeared.

use serde_json::json;
use thiserror::Error;

/// Generation temperature sent with every request.
const TEMPERATURE: f64 = 0.7;

/// Errors from the analysis client.
///
/// Note that a non-2xx response from the service is *not* represented here;
/// see [`GeminiClient::analyze`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("connection failed: {0}")]
    Connection(reqwest::Error),

    #[error("unexpected response shape: {0}")]
    ParseError(String),
}

/// Gemini endpoint configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL of the generative language API
    pub base_url: String,
    /// Model name interpolated into the request path
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-pro".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Connection` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AnalysisError::Connection)?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Sends one prompt and returns the generated text.
    ///
    /// The API key travels as a query parameter and the prompt as a single
    /// content part, with the temperature fixed at 0.7. On a successful
    /// response the first candidate's text is returned. On a non-success
    /// status the raw error body is returned *as the result string* — the
    /// caller renders it where the analysis would have appeared. No retry,
    /// no streaming.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` only for transport failures (`Connection`) or
    /// a success response whose body does not contain
    /// `candidates[0].content.parts[0].text` (`ParseError`).
    pub async fn analyze(&self, api_key: &str, prompt: &str) -> Result<String, AnalysisError> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": TEMPERATURE }
        });

        tracing::debug!(model = %self.config.model, "requesting Gemini analysis");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await
            .map_err(AnalysisError::Connection)?;

        let status = response.status();
        let body = response.text().await.map_err(AnalysisError::Connection)?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Gemini returned non-success status");
            return Ok(format!("Error: {}", body));
        }

        let parsed: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| AnalysisError::ParseError(e.to_string()))?;

        parsed
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| {
                AnalysisError::ParseError("missing candidates[0].content.parts[0].text".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            base_url: server.uri(),
            model: "gemini-pro".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn success_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] }
            }]
        })
    }

    #[tokio::test]
    async fn test_analyze_extracts_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-pro:generateContent"))
            .and(query_param("key", "clave-123"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": { "temperature": 0.7 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("X")))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .analyze("clave-123", "Analiza la denuncia")
            .await
            .unwrap();
        assert_eq!(result, "X");
    }

    #[tokio::test]
    async fn test_analyze_sends_prompt_as_content_part() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "Analiza la denuncia" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .analyze("clave-123", "Analiza la denuncia")
            .await
            .unwrap();
        assert_eq!(result, "ok");
    }

    #[tokio::test]
    async fn test_analyze_embeds_error_body_on_non_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string("API key not valid"),
            )
            .mount(&server)
            .await;

        let result = client_for(&server)
            .analyze("mala-clave", "Analiza la denuncia")
            .await
            .unwrap();
        assert!(result.contains("API key not valid"));
        assert!(result.starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_analyze_malformed_success_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .analyze("clave-123", "Analiza la denuncia")
            .await;
        assert!(matches!(result, Err(AnalysisError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_analyze_connection_failure() {
        let client = GeminiClient::new(GeminiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            model: "gemini-pro".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let result = client.analyze("clave-123", "Analiza la denuncia").await;
        assert!(matches!(result, Err(AnalysisError::Connection(_))));
    }
}
