//! Gemini REST client for text generation and embeddings.
//!
//! Minimal, non-streaming client around the Generative Language API.
//! Endpoints are derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/models/{model}:generateContent — single-turn generation
//! - POST {endpoint}/models/{model}:embedContent    — query embedding
//!
//! Upstream failures are logged here with status, body snippet and latency,
//! then returned as [`AiLlmError`]. Callers decide what the user sees.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error, info, instrument};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

const OP_GENERATE: &str = "generateContent";
const OP_EMBED: &str = "embedContent";

/// Thin client for one Gemini model.
///
/// Holds a preconfigured `reqwest::Client` (timeout, compression). Create one
/// per model profile and share it; the client pools connections internally.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embed: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::MissingApiKey`] if `cfg.api_key` is empty
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is not http(s)
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.api_key.trim().is_empty() {
            return Err(ProviderError::new("init", ProviderErrorKind::MissingApiKey).into());
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                "init",
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let model_path = cfg.model_path();
        let url_generate = format!("{base}/{model_path}:{OP_GENERATE}");
        let url_embed = format!("{base}/{model_path}:{OP_EMBED}");

        info!(
            model = %cfg.model,
            endpoint = %base,
            timeout_secs = timeout.as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embed,
        })
    }

    /// Model profile this client was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Sends `prompt` as a single-turn user message and returns the text of
    /// the first part of the first candidate.
    ///
    /// Returns `Ok(None)` when the response is well-formed but carries no
    /// usable text (no candidates, no parts, or an empty string).
    ///
    /// # Errors
    /// - [`AiLlmError::HttpTransport`] for network failures and timeouts
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`ProviderErrorKind::Decode`] if the body is not valid JSON
    #[instrument(skip_all, fields(model = %self.cfg.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>, AiLlmError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        let out: GenerateResponse = self.post_json(OP_GENERATE, &self.url_generate, &body).await?;
        let text = out.first_text();

        debug!(has_text = text.is_some(), "generation decoded");
        Ok(text)
    }

    /// Embeds `text` and returns `embedding.values`.
    ///
    /// # Errors
    /// - [`AiLlmError::HttpTransport`] for network failures and timeouts
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`ProviderErrorKind::Decode`] if the body is not valid JSON
    /// - [`ProviderErrorKind::MissingField`] if `embedding.values` is absent
    #[instrument(skip_all, fields(model = %self.cfg.model, input_len = text.len()))]
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, AiLlmError> {
        let body = EmbedRequest {
            content: Content {
                role: None,
                parts: vec![Part { text }],
            },
        };

        let out: EmbedResponse = self.post_json(OP_EMBED, &self.url_embed, &body).await?;

        match out.embedding.and_then(|e| e.values) {
            Some(values) => {
                debug!(dim = values.len(), "embedding decoded");
                Ok(values)
            }
            None => {
                error!(
                    model = %self.cfg.model,
                    url = %self.url_embed,
                    "embedding response has no `embedding.values`"
                );
                Err(ProviderError::new(
                    OP_EMBED,
                    ProviderErrorKind::MissingField("embedding.values"),
                )
                .into())
            }
        }
    }

    /// POSTs `body` to `url` and decodes a JSON response, logging every
    /// failure with the upstream detail.
    async fn post_json<B, R>(&self, op: &'static str, url: &str, body: &B) -> Result<R, AiLlmError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let started = Instant::now();
        debug!("POST {url}");

        let resp = match self
            .client
            .post(url)
            .query(&[("key", self.cfg.api_key.as_str())])
            .json(body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                // reqwest errors embed the URL; strip the query so the key stays out of logs.
                let e = e.without_url();
                error!(
                    error = %e,
                    %url,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "Gemini {op} transport failure"
                );
                return Err(e.into());
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis() as u64,
                "Gemini {op} returned non-success status"
            );

            return Err(ProviderError::new(
                op,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url: url.to_string(),
                    snippet,
                }),
            )
            .into());
        }

        let out = resp.json::<R>().await.map_err(|e| {
            error!(
                error = %e,
                %url,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis() as u64,
                "failed to decode Gemini {op} response"
            );
            ProviderError::new(op, ProviderErrorKind::Decode(e.without_url().to_string()))
        })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis() as u64,
            "Gemini {op} completed"
        );

        Ok(out)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `:generateContent`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

/// Request body for `:embedContent`.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    content: Content<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Minimal response for `:generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Minimal response for `:embedContent`.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Option<Vec<f32>>,
}
