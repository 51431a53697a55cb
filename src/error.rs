//! Error and warning types shared across the drill engine.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or writing the lexicon files.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corpus {}: {source}", path.display())]
    Corpus {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Non-fatal problems found while loading. Each one is logged once and
/// handed to the caller so it can be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    #[error("words file {} does not exist, starting with an empty word list", path.display())]
    MissingCorpus { path: PathBuf },

    #[error("only {found} words loaded, drilling needs at least {required}")]
    InsufficientCorpus { found: usize, required: usize },

    #[error("score file {} has a bad token {token:?}, ignoring the rest", path.display())]
    ScoreFileCorrupt { path: PathBuf, token: String },
}

/// Failures of a single drill operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    #[error("the word list is empty")]
    EmptyCorpus,

    #[error("at least one answer slot is required")]
    NoAnswerSlots,

    /// Not enough distinct words to fill every answer slot.
    #[error("not enough distinct words to generate {requested} answers (found {found})")]
    DistractorStarvation { requested: usize, found: usize },

    #[error("no question has been asked yet")]
    NoActiveQuestion,

    #[error("the current question was already answered")]
    AlreadyAnswered,

    #[error("answer slot {slot} is out of range, the question has {answers} answers")]
    InvalidSlot { slot: usize, answers: usize },
}

/// Failures of the dictionary import tool.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("dictionary file {} does not exist", .0.display())]
    MissingDictionary(PathBuf),

    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}

pub type DrillResult<T> = Result<T, DrillError>;
