use rand::seq::SliceRandom;
use rand::Rng;
use std::iter;

use crate::dataset::{ColumnRoles, Dataset, Row};
use crate::quiz::definition::Choice;
use crate::quiz::sampler::is_eligible;
use crate::quiz::sentence::leading_sentence;
use crate::quiz::settings::Settings;


/// Builds the shuffled choices for `row`: its own leading sentence plus up to
/// `max_distractors` distinct sentences taken from other eligible rows.
///
/// Distractors come from rows of the same `category` when there are at least
/// `min_same_category_pool` of them, from every other row otherwise.
pub fn build_choices<R: Rng + ?Sized>(
    dataset: &Dataset,
    roles: &ColumnRoles,
    row: &Row,
    category: Option<&str>,
    settings: &Settings,
    rng: &mut R,
) -> Vec<Choice> {
    let correct_text = leading_sentence(row.get(roles.answer()));

    let mut pool: Vec<&Row> = dataset
        .rows()
        .iter()
        .filter(|candidate| candidate.id() != row.id() && is_eligible(candidate, roles))
        .collect();

    if let (Some(value), Some(key)) = (category.filter(|c| !c.is_empty()), roles.category()) {
        let same_category: Vec<&Row> = pool
            .iter()
            .copied()
            .filter(|candidate| candidate.get(key) == value)
            .collect();
        if same_category.len() >= settings.min_same_category_pool {
            pool = same_category;
        }
    }

    pool.shuffle(rng);

    let mut distractors: Vec<&str> = Vec::with_capacity(settings.max_distractors);
    for candidate in pool {
        if distractors.len() >= settings.max_distractors {
            break;
        }
        let text = leading_sentence(candidate.get(roles.answer()));
        if text.is_empty() || text == correct_text || distractors.contains(&text) {
            continue;
        }
        distractors.push(text);
    }

    let correct = Choice {
        text: correct_text.to_owned(),
        is_correct: true,
    };
    let wrong = distractors.into_iter().map(|text| Choice {
        text: text.to_owned(),
        is_correct: false,
    });
    let mut choices: Vec<Choice> = iter::once(correct).chain(wrong).collect();
    choices.shuffle(rng);
    choices
}
