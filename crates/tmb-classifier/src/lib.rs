//! Classifier backend adapters (Ollama, Replicate, moderation API).
//!
//! Each provider implements the `tmb-core` classifier port; the selection
//! is a closed enum, constructed here from configuration.

use std::sync::Arc;

use tmb_core::classifier::{client::ClassifierClient, types::ClassifierConfig};

mod moderation_api;
mod ollama;
mod replicate;

pub use moderation_api::ModerationApiClassifier;
pub use ollama::OllamaClassifier;
pub use replicate::ReplicateClassifier;

/// Build the classifier selected by configuration.
pub fn build_classifier(cfg: &ClassifierConfig) -> Arc<dyn ClassifierClient> {
    match cfg {
        ClassifierConfig::Ollama(c) => Arc::new(OllamaClassifier::new(c.clone())),
        ClassifierConfig::Replicate(c) => Arc::new(ReplicateClassifier::new(c.clone())),
        ClassifierConfig::ModerationApi(c) => Arc::new(ModerationApiClassifier::new(c.clone())),
    }
}
