pub mod health;
pub mod presenter;
pub mod table;
pub mod tts;
pub mod upload;
