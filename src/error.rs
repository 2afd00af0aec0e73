use thiserror::Error;

/// Every failure the quiz engine can report. None of them are fatal: the engine stays usable
/// after returning any of these.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum QuizError {
    #[error("could not read {source_name}: {reason}")]
    LoadFailed { source_name: String, reason: String },

    #[error("{0} contains no usable data")]
    EmptyDataset(String),

    #[error("no dataset is loaded")]
    NoDataset,

    #[error("no questions match the requested filter")]
    NoEligibleRows,

    #[error("there is no active question")]
    NoActiveQuestion,

    #[error("this question has already been resolved")]
    AlreadyResolved,

    #[error("choice {0} does not exist")]
    InvalidChoice(usize),

    #[error("the current question is still running")]
    QuestionInProgress,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
