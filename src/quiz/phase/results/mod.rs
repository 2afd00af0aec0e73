use std::time::Duration;

use crate::output::{Message, QuizOutput};
use crate::quiz::session::Session;
use crate::quiz::State;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Grade {
    Excellent,
    Good,
    NeedsReview,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub correct: usize,
    pub total_time: Duration,
}

impl Summary {
    /// Unanswered questions count as having used the whole time limit.
    pub fn new(session: &Session, time_limit: Duration) -> Self {
        Summary {
            total: session.len(),
            correct: session.correct_count(),
            total_time: session
                .answer_times()
                .iter()
                .map(|time| time.unwrap_or(time_limit))
                .sum(),
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    pub fn accuracy_percent(&self) -> u32 {
        (self.accuracy() * 100.0).round() as u32
    }

    pub fn grade(&self) -> Grade {
        let accuracy = self.accuracy();
        if accuracy >= 0.8 {
            Grade::Excellent
        } else if accuracy >= 0.5 {
            Grade::Good
        } else {
            Grade::NeedsReview
        }
    }
}

pub struct ResultsState<O> {
    summary: Summary,
    output: O,
}

impl<O> ResultsState<O> {
    pub fn new(summary: Summary, output: O) -> Self {
        ResultsState { summary, output }
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

impl<O: QuizOutput> State for ResultsState<O> {
    fn on_begin(&mut self) {
        self.output
            .say(&Message::QuizResults(self.summary.clone()));
    }

    fn on_tick(&mut self, _now: Duration) {}

    fn on_end(&mut self) {}

    fn is_over(&self) -> bool {
        true
    }
}
