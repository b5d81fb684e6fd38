use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneSynError {
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Invalid Symbol: '{symbol}' at residue {position} has no codon")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Empty Sequence: cannot score a zero-length coding sequence")]
    EmptySequence,

    #[error("Model Unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Vocabulary Mismatch: expected {expected}, found {found}")]
    VocabularyMismatch { expected: String, found: String },

    #[error("Invalid Model Output: {0}")]
    InvalidModelOutput(f64),

    #[error("Deadline Exceeded after {completed} of {requested} candidates")]
    DeadlineExceeded { completed: usize, requested: usize },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GsResult<T> = Result<T, GeneSynError>;
