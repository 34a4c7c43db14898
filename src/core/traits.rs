use async_trait::async_trait;

/// Anything that turns a prompt into displayable text.
///
/// Implementations never fail: every failure is folded into a fallback string.
#[async_trait]
pub trait TextCompleter: Send + Sync {
    async fn complete(&self, prompt: &str) -> String;
}
