use log::debug;
use std::time::Duration;

use crate::error::{QuizError, Result};
use crate::output::{Message, QuizOutput};
use crate::quiz::definition::{ChoiceMark, Question, Verdict};
use crate::quiz::State;
use crate::timer::{TimerHandle, TimerId};


/// How a question was resolved, and how long it took.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Outcome {
    pub verdict: Verdict,
    pub choice: Option<usize>,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Correct
    }
}

/// One displayed question with its countdown. The first of answer and timeout resolves it;
/// anything after that is rejected without touching the outcome.
pub struct QuestionState<O: QuizOutput> {
    question: Question,
    started_at: Duration,
    time_limit: Duration,
    timer: TimerHandle,
    outcome: Option<Outcome>,
    output: O,
}

impl<O: QuizOutput> QuestionState<O> {
    pub fn new(
        question: Question,
        started_at: Duration,
        time_limit: Duration,
        timer: TimerHandle,
        output: O,
    ) -> Self {
        QuestionState {
            question,
            started_at,
            time_limit,
            timer,
            outcome: None,
            output,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Whether ticks from `timer_id` should still be handled.
    pub fn owns_timer(&self, timer_id: TimerId) -> bool {
        self.timer.id() == timer_id && !self.timer.is_cancelled()
    }

    pub fn cancel_timer(&self) {
        self.timer.cancel();
    }

    /// Time since the question began, clamped to the time limit.
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.checked_sub(self.started_at)
            .unwrap_or_default()
            .min(self.time_limit)
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        self.time_limit - self.elapsed(now)
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        self.elapsed(now) >= self.time_limit
    }

    pub fn select(&mut self, choice: usize, now: Duration) -> Result<Outcome> {
        if self.outcome.is_some() {
            return Err(QuizError::AlreadyResolved);
        }
        let is_correct = self
            .question
            .choices
            .get(choice)
            .ok_or(QuizError::InvalidChoice(choice))?
            .is_correct;

        self.timer.cancel();
        let outcome = Outcome {
            verdict: if is_correct {
                Verdict::Correct
            } else {
                Verdict::Wrong
            },
            choice: Some(choice),
            elapsed: self.elapsed(now),
        };
        self.resolve(outcome);
        Ok(outcome)
    }

    /// Resolves the question as timed out. Returns `None` when it was already resolved.
    pub fn time_up(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            debug!("Ignoring timeout of a resolved question");
            return None;
        }
        self.timer.cancel();
        let outcome = Outcome {
            verdict: Verdict::TimeUp,
            choice: None,
            elapsed: self.time_limit,
        };
        self.resolve(outcome);
        Some(outcome)
    }

    fn resolve(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.output.say(&Message::AnswerReveal {
            marks: self.marks(),
            verdict: outcome.verdict,
            is_last: self.question.is_last(),
        });
    }

    /// Highlighting of every choice: the correct one always, the picked one when wrong.
    pub fn marks(&self) -> Vec<ChoiceMark> {
        let picked = self.outcome.and_then(|o| o.choice);
        self.question
            .choices
            .iter()
            .enumerate()
            .map(|(index, choice)| {
                if self.outcome.is_none() {
                    ChoiceMark::Neutral
                } else if choice.is_correct {
                    ChoiceMark::Correct
                } else if picked == Some(index) {
                    ChoiceMark::Wrong
                } else {
                    ChoiceMark::Neutral
                }
            })
            .collect()
    }

    fn print_time_remaining(&self, now: Duration) {
        self.output.say(&Message::TimeRemaining {
            remaining: self.remaining(now),
            limit: self.time_limit,
        });
    }
}

impl<O: QuizOutput> State for QuestionState<O> {
    fn on_begin(&mut self) {
        self.output
            .say(&Message::QuestionBegins(self.question.clone()));
        self.print_time_remaining(self.started_at);
    }

    fn on_tick(&mut self, now: Duration) {
        if self.outcome.is_none() {
            self.print_time_remaining(now);
        }
    }

    fn on_end(&mut self) {
        self.timer.cancel();
    }

    fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}
