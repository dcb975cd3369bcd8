use thiserror::Error;

/// All errors produced by verbalizer-core.
#[derive(Debug, Error)]
pub enum VerbalizerError {
    #[error("invalid transcription input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("PDF generation error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VerbalizerError>;
