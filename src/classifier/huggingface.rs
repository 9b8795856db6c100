//! HuggingFace Inference API emotion classifier.
//!
//! Posts the text to a hosted text-classification model and reads back every
//! label score. Default model: `j-hartmann/emotion-english-distilroberta-base`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classifier::{ClassifierOutcome, EmotionClassifier};
use crate::error::ClassifierError;

pub const DEFAULT_MODEL: &str = "j-hartmann/emotion-english-distilroberta-base";
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Configuration for [`HuggingFaceClassifier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    /// Model id appended to `base_url`.
    #[serde(default = "default_model")]
    pub model: String,
    /// Inference API base URL, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token.
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: f64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> f64 {
    10.0
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl HuggingFaceConfig {
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

/// One `{label, score}` item from the API.
#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Emotion classifier backed by the HuggingFace Inference API.
#[derive(Debug, Clone)]
pub struct HuggingFaceClassifier {
    config: HuggingFaceConfig,
    client: reqwest::Client,
}

impl HuggingFaceClassifier {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, ClassifierError> {
        let timeout = Duration::try_from_secs_f64(config.timeout_secs)
            .map_err(|_| ClassifierError::InvalidConfig(format!("timeout_secs = {}", config.timeout_secs)))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }

    async fn request_scores(&self, text: &str) -> Result<Vec<(String, f64)>, ClassifierError> {
        let endpoint = self.config.endpoint();
        let body = serde_json::json!({
            "inputs": text,
            "parameters": { "top_k": null },
        });

        let mut request = self.client.post(&endpoint).json(&body);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        log::debug!(
            "HuggingFace classify (model={}): {} chars",
            self.config.model,
            text.len()
        );

        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(500).collect(),
            });
        }

        let json: Value = serde_json::from_str(&response_text)
            .map_err(|e| ClassifierError::Decode(e.to_string()))?;
        parse_scores(json)
    }
}

/// Accept either `[[{label, score}, ...]]` or `[{label, score}, ...]`.
fn parse_scores(json: Value) -> Result<Vec<(String, f64)>, ClassifierError> {
    let items = match json {
        Value::Array(mut outer) if matches!(outer.first(), Some(Value::Array(_))) => {
            outer.swap_remove(0)
        }
        other @ Value::Array(_) => other,
        other => {
            return Err(ClassifierError::Decode(format!(
                "expected a list of label scores, got {}",
                other
            )))
        }
    };

    let scores: Vec<LabelScore> =
        serde_json::from_value(items).map_err(|e| ClassifierError::Decode(e.to_string()))?;
    Ok(scores.into_iter().map(|s| (s.label, s.score)).collect())
}

#[async_trait]
impl EmotionClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> ClassifierOutcome {
        match self.request_scores(text).await {
            Ok(scores) => ClassifierOutcome::from_scores(scores),
            Err(e) => {
                log::warn!("HuggingFace classifier unavailable ({}): {}", self.config.model, e);
                ClassifierOutcome::Unavailable
            }
        }
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};

    #[test]
    fn test_parse_nested_scores() {
        let json = serde_json::json!([[
            {"label": "joy", "score": 0.8},
            {"label": "sadness", "score": 0.05}
        ]]);
        let scores = parse_scores(json).unwrap();
        assert_eq!(scores, vec![("joy".to_string(), 0.8), ("sadness".to_string(), 0.05)]);
    }

    #[test]
    fn test_parse_flat_scores() {
        let json = serde_json::json!([{"label": "anger", "score": 0.3}]);
        assert_eq!(parse_scores(json).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_rejects_error_object() {
        let json = serde_json::json!({"error": "Model is currently loading"});
        assert!(matches!(parse_scores(json), Err(ClassifierError::Decode(_))));
    }

    #[test]
    fn test_endpoint_joins_model() {
        let config = HuggingFaceConfig {
            base_url: "http://localhost:9000/models/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint(),
            "http://localhost:9000/models/j-hartmann/emotion-english-distilroberta-base"
        );
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn classifier_for(base_url: String) -> HuggingFaceClassifier {
        HuggingFaceClassifier::new(HuggingFaceConfig {
            model: "test-model".into(),
            base_url,
            api_token: Some("hf_test".into()),
            timeout_secs: 5.0,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_classify_against_local_server() {
        let router = Router::new().route(
            "/test-model",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["inputs"], "what a day");
                Json(serde_json::json!([[
                    {"label": "Joy", "score": 0.75},
                    {"label": "Neutral", "score": 0.25}
                ]]))
            }),
        );
        let classifier = classifier_for(serve(router).await);

        let dist = classifier.classify("what a day").await.into_distribution();
        assert_eq!(dist.get("joy"), Some(&0.75));
        assert_eq!(dist.get("neutral"), Some(&0.25));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let router = Router::new().route(
            "/test-model",
            post(|| async {
                (
                    axum::http::StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({"error": "loading"})),
                )
            }),
        );
        let classifier = classifier_for(serve(router).await);
        assert_eq!(classifier.classify("hello").await, ClassifierOutcome::Unavailable);
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let config = HuggingFaceConfig {
            timeout_secs: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            HuggingFaceClassifier::new(config),
            Err(ClassifierError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let classifier = classifier_for("http://127.0.0.1:9".into());
        assert_eq!(classifier.classify("hello").await, ClassifierOutcome::Unavailable);
    }
}
