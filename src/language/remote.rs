use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analysis::thai::is_mostly_thai;
use crate::error::RemoteError;
use crate::language::{Difficulty, Language};

pub const DEFAULT_TIMEOUT_SECS: u64 = 75; // generation runs a model, so it is slow
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 10;

/// Client for the sentence generation service
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    model: Option<String>,
    timeout_secs: u64,
    health_timeout_secs: u64,
    client: Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    language: &'a str,
    difficulty: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    sentence: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// A validated sentence from the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSentence {
    pub text: String,
    /// Tier the service says it produced, when it reports a known one
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub model_loaded: Option<bool>,
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl RemoteClient {
    pub fn new(
        base_url: &str,
        model: Option<String>,
        timeout_secs: u64,
        health_timeout_secs: u64,
    ) -> Result<Self, RemoteError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(RemoteError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.to_string(),
            model: model.filter(|m| !m.trim().is_empty()),
            timeout_secs,
            health_timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Ask the service for a sentence. Any failure, including a response that
    /// cannot be used for `language`, comes back as a [`RemoteError`].
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub fn generate(
        &self,
        language: Language,
        difficulty: Difficulty,
    ) -> Result<RemoteSentence, RemoteError> {
        let body = GenerateRequest {
            language: language.code(),
            difficulty: difficulty.as_str(),
            model: self.model(),
        };

        let response = self
            .client
            .post(format!("{}/generate_sentence", self.base_url))
            .json(&body)
            .send()
            .map_err(|e| self.classify(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::HttpStatus(status.as_u16()));
        }

        let payload: GenerateResponse = response
            .json()
            .map_err(|e| self.classify(e, self.timeout_secs))?;

        if payload.success == Some(false) {
            let reason = payload
                .error
                .unwrap_or_else(|| "generation failed".to_string());
            return Err(RemoteError::Rejected(reason));
        }

        let text = payload
            .sentence
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RemoteError::Malformed("response has no sentence".to_string()))?;

        if language == Language::Thai && !is_mostly_thai(&text) {
            return Err(RemoteError::Malformed(
                "sentence is not Thai text".to_string(),
            ));
        }

        let reported = payload.difficulty.as_deref().and_then(Difficulty::parse);
        debug!(%text, ?reported, "remote sentence accepted");

        Ok(RemoteSentence {
            text,
            difficulty: reported,
        })
    }

    pub fn health(&self) -> Result<HealthReport, RemoteError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(self.health_timeout_secs))
            .send()
            .map_err(|e| self.classify(e, self.health_timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::HttpStatus(status.as_u16()));
        }

        response
            .json()
            .map_err(|e| self.classify(e, self.health_timeout_secs))
    }

    fn classify(&self, err: reqwest::Error, timeout_secs: u64) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout(timeout_secs)
        } else if err.is_connect() {
            RemoteError::Connect(self.base_url.clone())
        } else if err.is_decode() {
            RemoteError::Malformed(err.to_string())
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}
