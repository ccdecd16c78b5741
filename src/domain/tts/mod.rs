pub mod artifact;
pub mod error;
pub mod service;
pub mod session;

pub use artifact::{AudioArtifact, AudioFormat};
pub use error::ConversionError;
pub use service::{ConversionOutcome, ConversionRequest, ConversionService, ConversionServiceApi};
pub use session::{ConversionSession, ConversionState};

use serde::{Deserialize, Serialize};

/// Request for POST /api/tts/text
#[derive(Debug, Serialize, Deserialize)]
pub struct TextConversionRequest {
    pub text: String,
}
