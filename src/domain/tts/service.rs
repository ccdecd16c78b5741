use super::artifact::{ArtifactError, AudioArtifact, AudioFormat};
use super::error::ConversionError;
use super::session::{ConversionSession, ConversionState};
use crate::domain::input::{self, EmptyInputWarning, InputSource, Preview, Table, TableOptions, TableSummary};
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// One conversion as submitted by the user
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub request_id: String,
    pub source: InputSource,
}

/// Result of a conversion that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Presented {
        artifact: AudioArtifact,
        char_count: usize,
    },
    /// Nothing to say; the synthesizer was not called
    Warning(EmptyInputWarning),
}

pub struct ConversionService {
    tts_repo: Arc<dyn TtsRepository>,
}

impl ConversionService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        Self { tts_repo }
    }
}

#[async_trait]
pub trait ConversionServiceApi: Send + Sync {
    /// Parse a tabular upload and list its columns
    fn inspect_table(&self, bytes: &[u8], options: TableOptions) -> Result<TableSummary, ConversionError>;

    /// First rows of one column, for display only
    fn preview_column(
        &self,
        bytes: &[u8],
        options: TableOptions,
        column: &str,
        rows: Option<usize>,
    ) -> Result<Preview, ConversionError>;

    /// Run acquire -> assemble -> synthesize for one request
    ///
    /// Blank text yields `ConversionOutcome::Warning` without calling the
    /// backend. Every other problem is a `ConversionError`.
    async fn convert(&self, request: ConversionRequest) -> Result<ConversionOutcome, ConversionError>;
}

#[async_trait]
impl ConversionServiceApi for ConversionService {
    fn inspect_table(&self, bytes: &[u8], options: TableOptions) -> Result<TableSummary, ConversionError> {
        let table = Table::parse(bytes, options)?;
        Ok(TableSummary::from(&table))
    }

    fn preview_column(
        &self,
        bytes: &[u8],
        options: TableOptions,
        column: &str,
        rows: Option<usize>,
    ) -> Result<Preview, ConversionError> {
        let table = Table::parse(bytes, options)?;
        Ok(table.preview(column, rows)?)
    }

    async fn convert(&self, request: ConversionRequest) -> Result<ConversionOutcome, ConversionError> {
        let mut session = ConversionSession::new(request.request_id);

        tracing::info!(
            request_id = %session.request_id(),
            source = request.source.kind(),
            backend = self.tts_repo.name(),
            "Conversion request"
        );

        match self.run(&mut session, request.source).await {
            Ok(outcome) => {
                session.reset();
                Ok(outcome)
            }
            Err(e) => {
                session.fail(&e);
                Err(e)
            }
        }
    }
}

impl ConversionService {
    async fn run(
        &self,
        session: &mut ConversionSession,
        source: InputSource,
    ) -> Result<ConversionOutcome, ConversionError> {
        let raw = input::acquire(source)?;
        self.advance(session, ConversionState::InputReceived)?;

        let text = match input::assemble(raw) {
            Ok(text) => text,
            Err(warning) => {
                self.advance(session, ConversionState::TextAssembled)?;
                tracing::info!(
                    request_id = %session.request_id(),
                    warning = %warning,
                    "Nothing to synthesize"
                );
                self.advance(session, ConversionState::Idle)?;
                return Ok(ConversionOutcome::Warning(warning));
            }
        };
        self.advance(session, ConversionState::TextAssembled)?;

        let char_count = text.char_count();
        tracing::info!(
            request_id = %session.request_id(),
            char_count = char_count,
            "Text assembled"
        );

        self.advance(session, ConversionState::Synthesizing)?;
        let audio_data = self.tts_repo.synthesize(text.as_str()).await?;
        let artifact = self.to_artifact(audio_data)?;
        self.advance(session, ConversionState::Presented)?;

        tracing::info!(
            request_id = %session.request_id(),
            format = %artifact.format(),
            audio_size = artifact.len(),
            "Conversion completed"
        );

        Ok(ConversionOutcome::Presented {
            artifact,
            char_count,
        })
    }

    fn advance(&self, session: &mut ConversionSession, next: ConversionState) -> Result<(), ConversionError> {
        session
            .advance(next)
            .map_err(|e| ConversionError::Other(anyhow::anyhow!(e)))
    }

    /// Blame the backend when its bytes do not match its declared format
    fn to_artifact(&self, audio_data: Vec<u8>) -> Result<AudioArtifact, ConversionError> {
        let format = self.tts_repo.format();
        AudioArtifact::new(audio_data, format).map_err(|e: ArtifactError| {
            let message = format!("{} backend: {}", self.tts_repo.name(), e);
            match format {
                AudioFormat::Wav => ConversionError::Engine(message),
                AudioFormat::Mp3 => ConversionError::Service(message),
            }
        })
    }
}
