use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("The card \"{term}\" already exists.")]
    DuplicateTerm { term: String },

    #[error("The definition \"{definition}\" already exists.")]
    DuplicateDefinition { definition: String },

    #[error("Can't remove \"{term}\": there is no such card.")]
    CardNotFound { term: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed card file at line {line}: {reason}")]
    ParseError { line: u64, reason: String },

    #[error("Card \"{term}\" cannot be written to a card file: {reason}")]
    UnencodableCard { term: String, reason: String },

    #[error("Console input closed")]
    InputClosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Card file error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Deck,
    Storage,
    Console,
    Configuration,
}

impl FlashcardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateTerm { .. }
            | Self::DuplicateDefinition { .. }
            | Self::CardNotFound { .. } => ErrorCategory::Deck,
            Self::FileNotFound { .. }
            | Self::WriteFailure { .. }
            | Self::ParseError { .. }
            | Self::UnencodableCard { .. }
            | Self::IoError(_)
            | Self::CsvError(_) => ErrorCategory::Storage,
            Self::InputClosed => ErrorCategory::Console,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    /// The single line shown to the user when a command fails.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FileNotFound { .. } => "File not found.".to_string(),
            Self::ParseError { .. } | Self::CsvError(_) => "Couldn't import cards.".to_string(),
            Self::UnencodableCard { .. } => "Couldn't export cards.".to_string(),
            Self::WriteFailure { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlashcardError>;
