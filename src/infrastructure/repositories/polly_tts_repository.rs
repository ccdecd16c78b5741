use super::tts_repository::{TtsRepository, TtsRepositoryError};
use crate::domain::tts::AudioFormat;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
    voice_id: VoiceId,
    engine: Engine,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>, voice_id: &str, engine: &str) -> Self {
        Self {
            polly_client,
            voice_id: VoiceId::from(voice_id),
            engine: Engine::from(engine),
        }
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsRepositoryError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice_id = ?self.voice_id,
            engine = ?self.engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(self.voice_id.clone())
            .output_format(OutputFormat::Mp3)
            .engine(self.engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice_id = ?self.voice_id,
                    engine = ?self.engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                TtsRepositoryError::Service(format!("AWS Polly error: {}", e))
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            TtsRepositoryError::Service(format!("Failed to read audio stream: {}", e))
        })?;

        let audio_data = audio_stream.into_bytes().to_vec();

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }

    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    fn name(&self) -> &'static str {
        "polly"
    }
}
