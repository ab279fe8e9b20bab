use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Invalid file type ({0}). Please upload PDF, PNG, or JPG.")]
    InvalidFileType(String),

    #[error("File name cannot be empty.")]
    EmptyName,

    #[error("No file selected.")]
    NoSelection,

    #[error("AI service quota exceeded. Please wait a moment.")]
    RateLimited,

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Save failed: {0}")]
    CommitFailed(String),

    #[error("Server connection error: {0}")]
    Transport(String),

    /// 通信は完了したが非2xxが返った
    #[error("Backend returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] doc_intake_common::Error),
}

impl From<reqwest::Error> for IntakeError {
    fn from(e: reqwest::Error) -> Self {
        IntakeError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
