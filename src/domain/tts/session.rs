use serde::Serialize;
use std::fmt;

/// Lifecycle of one conversion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionState {
    Idle,
    InputReceived,
    TextAssembled,
    Synthesizing,
    Presented,
    Failed,
}

impl ConversionState {
    fn can_move_to(self, next: ConversionState) -> bool {
        use ConversionState::*;
        matches!(
            (self, next),
            (Idle, InputReceived)
                | (InputReceived, TextAssembled)
                | (TextAssembled, Synthesizing)
                // nothing to synthesize
                | (TextAssembled, Idle)
                | (Synthesizing, Presented)
                | (Idle | InputReceived | Synthesizing, Failed)
                | (Presented | Failed, Idle)
        )
    }
}

impl fmt::Display for ConversionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversionState::Idle => "idle",
            ConversionState::InputReceived => "input_received",
            ConversionState::TextAssembled => "text_assembled",
            ConversionState::Synthesizing => "synthesizing",
            ConversionState::Presented => "presented",
            ConversionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid conversion transition {from} -> {to}")]
pub struct InvalidTransition {
    pub from: ConversionState,
    pub to: ConversionState,
}

/// Per-request state carried through the pipeline. Nothing here outlives
/// the request that created it.
#[derive(Debug)]
pub struct ConversionSession {
    request_id: String,
    state: ConversionState,
    history: Vec<ConversionState>,
}

impl ConversionSession {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            state: ConversionState::Idle,
            history: vec![ConversionState::Idle],
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn state(&self) -> ConversionState {
        self.state
    }

    pub fn history(&self) -> &[ConversionState] {
        &self.history
    }

    pub fn advance(&mut self, next: ConversionState) -> Result<(), InvalidTransition> {
        if !self.state.can_move_to(next) {
            return Err(InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::debug!(
            request_id = %self.request_id,
            from = %self.state,
            to = %next,
            "Conversion state changed"
        );
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Record a failure and return to idle so the user can retry
    pub fn fail(&mut self, reason: &dyn fmt::Display) {
        tracing::warn!(
            request_id = %self.request_id,
            state = %self.state,
            reason = %reason,
            "Conversion failed"
        );
        if self.state.can_move_to(ConversionState::Failed) {
            self.state = ConversionState::Failed;
            self.history.push(ConversionState::Failed);
        }
        self.reset();
    }

    /// Return to idle after a terminal state
    pub fn reset(&mut self) {
        if self.state.can_move_to(ConversionState::Idle) {
            self.state = ConversionState::Idle;
            self.history.push(ConversionState::Idle);
        }
    }
}
