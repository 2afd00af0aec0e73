use std::time::Duration;

use crate::dataset::RowId;
use crate::quiz::phase::Outcome;

/// Progress through one run of sampled questions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    questions: Vec<RowId>,
    current_index: usize,
    correct_count: usize,
    answer_times: Vec<Option<Duration>>,
}

impl Session {
    pub fn new(questions: Vec<RowId>) -> Self {
        let answer_times = vec![None; questions.len()];
        Session {
            questions,
            current_index: 0,
            correct_count: 0,
            answer_times,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_row(&self) -> Option<RowId> {
        self.questions.get(self.current_index).copied()
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn answer_times(&self) -> &[Option<Duration>] {
        &self.answer_times
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn record(&mut self, outcome: &Outcome) {
        if let Some(slot) = self.answer_times.get_mut(self.current_index) {
            *slot = Some(outcome.elapsed);
        }
        if outcome.is_correct() {
            self.correct_count += 1;
        }
    }

    /// Moves to the next question. Returns false on the last one.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            false
        } else {
            self.current_index += 1;
            true
        }
    }
}
