use crate::dataset::{ColumnRoles, Row, RowId};

const EMPTY_TERM_PLACEHOLDER: &str = "(この行の用語が空です)";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Choice {
    pub text: String,
    pub is_correct: bool,
}

/// How a choice is highlighted once its question is resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChoiceMark {
    Neutral,
    Correct,
    Wrong,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Correct,
    Wrong,
    TimeUp,
}

/// One question as shown to the player. Built from a row when the question begins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    pub row_id: RowId,
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub category: Option<String>,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn new(row: &Row, roles: &ColumnRoles, index: usize, total: usize, choices: Vec<Choice>) -> Self {
        let prompt = match row.get(roles.question()).trim() {
            "" => EMPTY_TERM_PLACEHOLDER.to_owned(),
            prompt => prompt.to_owned(),
        };
        Question {
            row_id: row.id(),
            number: index + 1,
            total,
            prompt,
            category: category_of(row, roles).map(str::to_owned),
            choices,
        }
    }

    pub fn correct_choice(&self) -> Option<usize> {
        self.choices.iter().position(|c| c.is_correct)
    }

    pub fn is_last(&self) -> bool {
        self.number == self.total
    }
}

/// The row's category value, if the dataset has a category column and the cell is set.
pub fn category_of<'a>(row: &'a Row, roles: &ColumnRoles) -> Option<&'a str> {
    roles
        .category()
        .map(|key| row.get(key))
        .filter(|value| !value.is_empty())
}
