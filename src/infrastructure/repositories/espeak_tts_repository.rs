use super::tts_repository::{TtsRepository, TtsRepositoryError};
use crate::domain::tts::AudioFormat;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Local espeak-ng implementation of TTS repository.
///
/// The engine only writes WAV to a path, so every call renders into its own
/// temporary file. The file is owned by a [`TempPath`] and removed when it
/// goes out of scope, whichever way `synthesize` returns.
pub struct EspeakTtsRepository {
    binary: PathBuf,
    voice: Option<String>,
    rate: Option<u32>,
    temp_dir: Option<PathBuf>,
}

impl EspeakTtsRepository {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            voice: None,
            rate: None,
            temp_dir: None,
        }
    }

    pub fn with_voice(mut self, voice: Option<String>) -> Self {
        self.voice = voice;
        self
    }

    /// Speaking rate in words per minute
    pub fn with_rate(mut self, rate: Option<u32>) -> Self {
        self.rate = rate;
        self
    }

    /// Directory for the per-call WAV file; system temp dir when unset
    pub fn with_temp_dir(mut self, temp_dir: Option<PathBuf>) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    fn create_output_file(&self) -> Result<TempPath, TtsRepositoryError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("tts-").suffix(".wav");

        let file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| TtsRepositoryError::Engine(format!("Failed to create temp file: {}", e)))?;

        // Close our handle so the engine can write to the path
        Ok(file.into_temp_path())
    }

    async fn render(&self, text: &str, output_path: &TempPath) -> Result<Vec<u8>, TtsRepositoryError> {
        let mut cmd = Command::new(&self.binary);
        if let Some(voice) = &self.voice {
            cmd.arg("-v").arg(voice);
        }
        if let Some(rate) = self.rate {
            cmd.arg("-s").arg(rate.to_string());
        }
        cmd.arg("-w")
            .arg(output_path.as_os_str())
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            TtsRepositoryError::Engine(format!(
                "Failed to run {}: {}",
                self.binary.display(),
                e
            ))
        })?;

        // stdin and stderr must be serviced concurrently
        let stdin = child.stdin.take();
        let feed = async move {
            match stdin {
                // dropped at the end of the block, which closes the pipe
                Some(mut stdin) => stdin.write_all(text.as_bytes()).await,
                None => Ok(()),
            }
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());

        let output = output
            .map_err(|e| TtsRepositoryError::Engine(format!("Engine did not finish: {}", e)))?;

        match written {
            Ok(()) => {}
            // engine exited before reading everything; its status tells the rest
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
            Err(e) => {
                return Err(TtsRepositoryError::Engine(format!(
                    "Failed to send text to engine: {}",
                    e
                )))
            }
        }

        if !output.status.success() {
            return Err(TtsRepositoryError::Engine(format!(
                "{} failed ({}): {}",
                self.binary.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let audio_data = tokio::fs::read(output_path)
            .await
            .map_err(|e| TtsRepositoryError::Engine(format!("Failed to read audio file: {}", e)))?;

        if audio_data.is_empty() {
            return Err(TtsRepositoryError::Engine(
                "Engine produced no audio".to_string(),
            ));
        }

        Ok(audio_data)
    }
}

#[async_trait]
impl TtsRepository for EspeakTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsRepositoryError> {
        let start_time = std::time::Instant::now();
        let output_path = self.create_output_file()?;

        tracing::info!(
            binary = %self.binary.display(),
            voice = ?self.voice,
            rate = ?self.rate,
            text_length = text.len(),
            "Running local speech engine"
        );

        let result = self.render(text, &output_path).await;

        if let Err(e) = output_path.close() {
            tracing::warn!(error = %e, "Failed to remove temporary audio file");
        }

        let audio_data = result.map_err(|e| {
            tracing::error!(error = %e, "Local speech engine failed");
            e
        })?;

        tracing::info!(
            provider = "espeak",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }

    fn format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    fn name(&self) -> &'static str {
        "espeak"
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
