use crate::domain::tts::AudioFormat;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TtsRepositoryError {
    /// Remote synthesis service unreachable or refused the request
    #[error("Speech service error: {0}")]
    Service(String),
    /// Local engine missing, failed, or produced nothing
    #[error("Speech engine error: {0}")]
    Engine(String),
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS backend (AWS Polly, OpenAI, espeak-ng).
///
/// Implementations render the whole text in a single call and return audio
/// encoded as [`TtsRepository::format`]. Any scratch resources they use must
/// be released before `synthesize` returns, on success and on error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Render `text` to an audio byte buffer
    ///
    /// # Errors
    /// `Service` for cloud backends, `Engine` for local ones
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsRepositoryError>;

    /// Encoding produced by `synthesize`
    fn format(&self) -> AudioFormat;

    /// Short backend name for logs and health checks
    fn name(&self) -> &'static str;

    /// Whether the backend can currently be used
    async fn is_available(&self) -> bool {
        true
    }
}
