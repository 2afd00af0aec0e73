use std::time::Duration;

use crate::dataset::DatasetSummary;
use crate::error::QuizError;
use crate::quiz::definition::{ChoiceMark, Question, Verdict};
use crate::quiz::phase::Summary;

#[cfg(test)]
pub mod mock;
pub mod terminal;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    AnswerReveal {
        marks: Vec<ChoiceMark>,
        verdict: Verdict,
        is_last: bool,
    },
    DatasetLoaded(DatasetSummary),
    Problem(QuizError),
    QuestionBegins(Question),
    QuizAbandoned,
    QuizResults(Summary),
    TimeRemaining {
        remaining: Duration,
        limit: Duration,
    },
}

/// Rendering side of the quiz. The engine never reads anything back from it.
pub trait QuizOutput {
    fn say(&self, message: &Message);
}
