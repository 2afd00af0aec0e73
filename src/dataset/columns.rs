use std::collections::HashMap;


const QUESTION_HEADERS: &[&str] = &["term", "用語", "見出し", "title"];
const ANSWER_HEADERS: &[&str] = &["definition", "定義", "説明", "desc", "description"];
const CATEGORY_HEADERS: &[&str] = &["category", "カテゴリ", "主区分", "domain", "section"];

/// Which headers of a dataset hold the question, the answer and the category.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnRoles {
    question: String,
    answer: String,
    category: Option<String>,
}

impl ColumnRoles {
    /// Matches headers case-insensitively against the known aliases, in priority order.
    /// Question and answer fall back to the first and second columns; category has no
    /// fallback. Returns `None` when there are no headers at all.
    pub fn infer(headers: &[String]) -> Option<ColumnRoles> {
        let first = headers.first()?;

        let lowercase_headers: HashMap<String, &String> = headers
            .iter()
            .map(|header| (header.to_lowercase(), header))
            .collect();
        let pick = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|candidate| lowercase_headers.get(*candidate))
                .map(|header| (*header).clone())
        };

        let question = pick(QUESTION_HEADERS).unwrap_or_else(|| first.clone());
        let answer = pick(ANSWER_HEADERS)
            .or_else(|| headers.get(1).cloned())
            .unwrap_or_else(|| first.clone());
        let category = pick(CATEGORY_HEADERS);

        Some(ColumnRoles {
            question,
            answer,
            category,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}
