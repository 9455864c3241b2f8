/// Configuration for a single hosted model profile.
///
/// One instance describes one model on the Gemini REST API (chat or
/// embedding). The API key is sent as the `key` query parameter and is never
/// part of the logged URL.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "gemini-1.5-flash".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
///     api_key: "AIza...".to_string(),
///     timeout_secs: Some(30),
/// };
/// assert_eq!(cfg.model_path(), "models/gemini-1.5-flash");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmModelConfig {
    /// Model identifier without the `models/` prefix (e.g. `"embedding-001"`).
    pub model: String,

    /// API base, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub endpoint: String,

    /// API key passed as the `key` query parameter.
    pub api_key: String,

    /// Per-request timeout in seconds. `None` falls back to 60 seconds.
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Resource path of the model relative to the API base.
    pub fn model_path(&self) -> String {
        let model = self.model.trim();
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }
}
