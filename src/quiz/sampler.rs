use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use crate::dataset::{ColumnRoles, Dataset, Row, RowId};
use crate::error::{QuizError, Result};
use crate::quiz::settings::Settings;

#[cfg(test)]
mod tests;

lazy_static! {
    static ref LEADING_INTEGER_REGEX: Regex = Regex::new(r"^\s*([+-]?[0-9]+)").unwrap();
}

/// Reads the requested question count the way a lenient integer field would: leading
/// digits count, anything unreadable or zero means the default. The result is clamped to
/// `1..=max_question_count`.
pub fn parse_question_count(input: &str, settings: &Settings) -> usize {
    let max = settings.max_question_count;
    let digits = match LEADING_INTEGER_REGEX.captures(input) {
        Some(captures) => captures[1].to_owned(),
        None => return settings.default_question_count,
    };
    match digits.parse::<i64>() {
        Ok(0) => settings.default_question_count,
        Ok(count) if count < 1 => 1,
        Ok(count) => (count as u64).min(max as u64) as usize,
        Err(_) if digits.starts_with('-') => 1,
        Err(_) => max,
    }
}

/// A row can be asked when both its question and its answer are present.
pub fn is_eligible(row: &Row, roles: &ColumnRoles) -> bool {
    !row.get(roles.question()).trim().is_empty() && !row.get(roles.answer()).trim().is_empty()
}

/// Eligible rows, restricted to `category` when one is given and the dataset has a
/// category column.
pub fn eligible_rows<'a>(
    dataset: &'a Dataset,
    roles: &ColumnRoles,
    category: Option<&str>,
) -> Vec<&'a Row> {
    let category_filter = match (category, roles.category()) {
        (Some(value), Some(key)) if !value.is_empty() => Some((key, value)),
        _ => None,
    };
    dataset
        .rows()
        .iter()
        .filter(|row| is_eligible(row, roles))
        .filter(|row| match category_filter {
            Some((key, value)) => row.get(key) == value,
            None => true,
        })
        .collect()
}

/// Draws up to `count` distinct eligible rows in random order.
pub fn sample_questions<R: Rng + ?Sized>(
    dataset: &Dataset,
    roles: &ColumnRoles,
    category: Option<&str>,
    count: usize,
    settings: &Settings,
    rng: &mut R,
) -> Result<Vec<RowId>> {
    let mut candidates = eligible_rows(dataset, roles, category);
    if candidates.is_empty() {
        return Err(QuizError::NoEligibleRows);
    }
    candidates.shuffle(rng);
    let count = count.max(1).min(settings.max_question_count);
    Ok(candidates
        .into_iter()
        .take(count)
        .map(|row| row.id())
        .collect())
}
