use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    classifier::types::{
        ClassifierConfig, ModerationApiConfig, OllamaConfig, ReplicateConfig,
    },
    errors::Error,
    moderation::types::FailurePolicy,
    Result,
};

/// Typed configuration for the bot.
///
/// Loaded once at startup and passed into constructors; nothing reads the
/// environment after this point.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    // Classifier backend
    pub classifier: ClassifierConfig,
    pub classify_timeout: Duration,
    pub failure_policy: FailurePolicy,

    // Audit
    pub audit_log_path: PathBuf,
    pub audit_log_json: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let provider = env_str("MODERATION_PROVIDER")
            .and_then(non_empty)
            .unwrap_or_else(|| "ollama".to_string());
        let classifier = classifier_config(&provider, &env_str)?;

        let classify_timeout =
            Duration::from_millis(env_u64("CLASSIFY_TIMEOUT_MS").unwrap_or(30_000));
        let failure_policy = if env_bool("MODERATION_FAIL_OPEN").unwrap_or(false) {
            FailurePolicy::Allow
        } else {
            FailurePolicy::Remove
        };

        let audit_log_path = PathBuf::from(
            env_str("AUDIT_LOG_PATH").unwrap_or("/tmp/tmb-audit.log".to_string()),
        );
        let audit_log_json = env_bool("AUDIT_LOG_JSON").unwrap_or(false);

        Ok(Self {
            telegram_bot_token,
            classifier,
            classify_timeout,
            failure_policy,
            audit_log_path,
            audit_log_json,
        })
    }
}

/// Build the classifier selection from a provider name and an env lookup.
///
/// Hosted providers require their credential; a missing one is a config
/// error at startup, not a per-message failure.
fn classifier_config(
    provider: &str,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<ClassifierConfig> {
    match provider.trim().to_lowercase().as_str() {
        "ollama" => Ok(ClassifierConfig::Ollama(OllamaConfig {
            host: env("OLLAMA_HOST")
                .and_then(non_empty)
                .unwrap_or_else(|| "http://localhost:11434".to_string()),
            model: env("OLLAMA_MODEL")
                .and_then(non_empty)
                .unwrap_or_else(|| "llama-guard3:1b".to_string()),
        })),
        "replicate" => {
            let api_token = env("REPLICATE_API_TOKEN").and_then(non_empty).ok_or_else(|| {
                Error::Config(
                    "REPLICATE_API_TOKEN environment variable is required for the replicate provider"
                        .to_string(),
                )
            })?;
            Ok(ClassifierConfig::Replicate(ReplicateConfig {
                api_token,
                model: env("REPLICATE_MODEL")
                    .and_then(non_empty)
                    .unwrap_or_else(|| "meta/llama-guard-3-8b".to_string()),
            }))
        }
        "moderation-api" | "moderation_api" => {
            let api_key = env("MODERATION_API_KEY").and_then(non_empty).ok_or_else(|| {
                Error::Config(
                    "MODERATION_API_KEY environment variable is required for the moderation-api provider"
                        .to_string(),
                )
            })?;
            Ok(ClassifierConfig::ModerationApi(ModerationApiConfig {
                api_key,
                url: env("MODERATION_API_URL")
                    .and_then(non_empty)
                    .unwrap_or_else(|| "https://api.openai.com/v1/moderations".to_string()),
            }))
        }
        other => Err(Error::Config(format!(
            "unsupported moderation provider: {other}"
        ))),
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
