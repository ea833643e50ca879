use async_trait::async_trait;

use crate::Result;

use super::types::{ClassifierCapabilities, ClassifierReply, ClassifyRequest, ProviderKind};

/// Classifier client interface used by the moderation pipeline.
///
/// One call per message; the pipeline owns the timeout and the decoding.
/// Adapters map provider quirks (HTTP payloads, output shapes) into
/// `ClassifierReply`.
#[async_trait]
pub trait ClassifierClient: Send + Sync {
    fn provider(&self) -> ProviderKind;
    fn capabilities(&self) -> ClassifierCapabilities;

    async fn classify(&self, req: &ClassifyRequest) -> Result<ClassifierReply>;
}
