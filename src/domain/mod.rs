pub mod input;
pub mod tts;
