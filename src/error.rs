use std::path::PathBuf;

use thiserror::Error;

/// Stage of a problem-set import that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ImportStage {
    Scan,
    Remove,
    Create,
    Copy,
}

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("config file not found: {}", path.display())]
    ConfigMissing { path: PathBuf },

    #[error("config file {} is corrupt: {detail}", path.display())]
    ConfigCorrupt { path: PathBuf, detail: String },

    #[error("problem folder '{}' does not exist", path.display())]
    ProblemsMissing { path: PathBuf },

    #[error("import failed during {stage}: {source}")]
    ImportFailed {
        stage: ImportStage,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),
}

impl QuizError {
    pub fn import(stage: ImportStage, source: std::io::Error) -> Self {
        QuizError::ImportFailed { stage, source }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(error: std::io::Error) -> Self {
        QuizError::Io(Box::new(error))
    }
}

impl From<csv::Error> for QuizError {
    fn from(error: csv::Error) -> Self {
        QuizError::Csv(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
