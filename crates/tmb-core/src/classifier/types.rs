/// The classifier backend used for moderation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Ollama,
    Replicate,
    ModerationApi,
}

/// Classifier capabilities for decode-path gating.
#[derive(Clone, Copy, Debug)]
pub struct ClassifierCapabilities {
    pub supports_structured_output: bool,
}

/// Requested response shape for one classification call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    Structured,
    PlainText,
}

/// A single classification exchange.
///
/// `prompt` is the fully rendered instruction text; `message_text` is the
/// raw message for providers that classify text directly instead of
/// following instructions.
#[derive(Clone, Debug)]
pub struct ClassifyRequest {
    pub prompt: String,
    pub message_text: String,
    pub output: OutputMode,
}

/// Raw classifier reply.
///
/// `structured` is set when the provider returned (or the adapter
/// synthesized) a JSON value; `text` is always present and is what the
/// plain-text decode path reads.
#[derive(Clone, Debug)]
pub struct ClassifierReply {
    pub text: String,
    pub structured: Option<serde_json::Value>,
}

/// Provider selection. A closed set: adding a provider means adding a
/// variant, not branching on strings at call sites.
#[derive(Clone, Debug)]
pub enum ClassifierConfig {
    Ollama(OllamaConfig),
    Replicate(ReplicateConfig),
    ModerationApi(ModerationApiConfig),
}

impl ClassifierConfig {
    pub fn provider(&self) -> ProviderKind {
        match self {
            ClassifierConfig::Ollama(_) => ProviderKind::Ollama,
            ClassifierConfig::Replicate(_) => ProviderKind::Replicate,
            ClassifierConfig::ModerationApi(_) => ProviderKind::ModerationApi,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OllamaConfig {
    pub host: String,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct ReplicateConfig {
    pub api_token: String,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct ModerationApiConfig {
    pub api_key: String,
    pub url: String,
}
