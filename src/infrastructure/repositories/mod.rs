pub mod espeak_tts_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod tts_repository;

pub use espeak_tts_repository::EspeakTtsRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use tts_repository::{TtsRepository, TtsRepositoryError};

#[cfg(test)]
pub use tts_repository::MockTtsRepository;
