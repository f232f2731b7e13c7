use serde::Serialize;

/// What the target model platform can do, fixed once per session.
///
/// Image blocks are only ever sent when `supports_vision` is true; platforms
/// that declare `api_key_required` refuse client construction without a key.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformCapabilities {
    pub model: String,
    pub endpoint: String,
    pub api_key_required: bool,
    pub supports_vision: bool,
    pub image_detail: ImageDetail,
}

impl PlatformCapabilities {
    pub fn new(model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            endpoint: endpoint.into(),
            api_key_required: false,
            supports_vision: false,
            image_detail: ImageDetail::default(),
        }
    }

    /// Local Ollama daemon with its OpenAI-compatible endpoint.
    pub fn ollama() -> Self {
        Self {
            model: "qwen3-coder:480b-cloud".to_string(),
            endpoint: "http://localhost:11434/v1".to_string(),
            api_key_required: false,
            supports_vision: true,
            image_detail: ImageDetail::default(),
        }
    }

    /// Docker Model Runner serving a local vision model.
    pub fn docker_model() -> Self {
        Self {
            model: "ai/qwen3-vl:8B-Q8_K_XL".to_string(),
            endpoint: "http://localhost:12434/engines/v1".to_string(),
            api_key_required: false,
            supports_vision: true,
            image_detail: ImageDetail::default(),
        }
    }

    pub fn perplexity() -> Self {
        Self {
            model: "sonar-pro".to_string(),
            endpoint: "https://api.perplexity.ai".to_string(),
            api_key_required: true,
            supports_vision: true,
            image_detail: ImageDetail::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_vision(mut self, supports_vision: bool) -> Self {
        self.supports_vision = supports_vision;
        self
    }

    pub fn with_image_detail(mut self, image_detail: ImageDetail) -> Self {
        self.image_detail = image_detail;
        self
    }
}

/// Detail level requested for vision inputs, as understood by
/// OpenAI-compatible endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Low,
    High,
    Auto,
}

impl Default for ImageDetail {
    fn default() -> Self {
        ImageDetail::High
    }
}
