use serde::{Deserialize, Serialize};

/// Encoding of synthesized audio. Fixed per backend: local engines render
/// WAV, cloud services return MP3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mp3",
        }
    }

    /// Name offered for download
    pub fn file_name(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "text_to_speech_output.wav",
            AudioFormat::Mp3 => "text_to_speech_output.mp3",
        }
    }

    /// Check the container signature of `bytes`
    pub fn matches(&self, bytes: &[u8]) -> bool {
        match self {
            AudioFormat::Wav => bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE",
            AudioFormat::Mp3 => {
                bytes.starts_with(b"ID3")
                    || (bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0)
            }
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why bytes could not become an artifact
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactError {
    #[error("synthesis produced no audio")]
    Empty,
    #[error("audio does not look like {0}")]
    FormatMismatch(AudioFormat),
}

/// Synthesized speech held in memory for a single response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    bytes: Vec<u8>,
    format: AudioFormat,
}

#[allow(clippy::len_without_is_empty)]
impl AudioArtifact {
    pub fn new(bytes: Vec<u8>, format: AudioFormat) -> Result<Self, ArtifactError> {
        if bytes.is_empty() {
            return Err(ArtifactError::Empty);
        }
        if !format.matches(&bytes) {
            return Err(ArtifactError::FormatMismatch(format));
        }
        Ok(Self { bytes, format })
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
