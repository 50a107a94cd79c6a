use thiserror::Error;

pub type Result<T> = std::result::Result<T, FragError>;

/// Which field a line was missing when extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PlayerName,
    Victim,
    Cause,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::PlayerName => "player name",
            Field::Victim => "victim",
            Field::Cause => "cause of death",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum FragError {
    #[error("could not extract {field} from '{line}'")]
    Extraction { field: Field, line: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FragError {
    pub fn extraction(field: Field, line: &str) -> Self {
        FragError::Extraction {
            field,
            line: line.to_string(),
        }
    }
}
