use itertools::Itertools;
use std::collections::HashMap;

pub mod columns;

pub use columns::ColumnRoles;


const BYTE_ORDER_MARK: char = '\u{feff}';

/// Stable identity of a row within its dataset. Two rows with identical cells are still
/// different rows.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RowId(pub usize);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    id: RowId,
    cells: HashMap<String, String>,
}

impl Row {
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns the trimmed cell under `header`, or an empty string for unknown headers.
    pub fn get(&self, header: &str) -> &str {
        self.cells.get(header).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Parses comma separated text. The first non-blank line holds the headers.
    ///
    /// Lines are split before quotes are interpreted, so a quoted field spanning several
    /// lines ends up as several records.
    pub fn parse(text: &str) -> Dataset {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut lines = normalized.split('\n').filter(|line| !line.trim().is_empty());

        let headers: Vec<String> = match lines.next() {
            Some(line) => parse_line(line)
                .iter()
                .map(|header| header.trim().to_owned())
                .collect(),
            None => return Dataset::default(),
        };

        let rows = lines
            .enumerate()
            .map(|(index, line)| {
                let fields = parse_line(line);
                let cells = headers
                    .iter()
                    .enumerate()
                    .map(|(column, header)| {
                        let value = fields.get(column).map(|f| f.trim()).unwrap_or("");
                        (header.clone(), value.to_owned())
                    })
                    .collect();
                Row {
                    id: RowId(index),
                    cells,
                }
            })
            .collect();

        Dataset { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.0).filter(|row| row.id == id)
    }

    /// A dataset without headers or without rows cannot produce a quiz.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }

    /// Distinct non-empty values of the category column, sorted.
    pub fn categories(&self, roles: &ColumnRoles) -> Vec<String> {
        let key = match roles.category() {
            Some(key) => key,
            None => return Vec::new(),
        };
        self.rows
            .iter()
            .map(|row| row.get(key).trim())
            .filter(|value| !value.is_empty())
            .unique()
            .sorted()
            .map(str::to_owned)
            .collect()
    }
}

/// Splits one line on commas. A quote anywhere in a field toggles quoting, and a doubled
/// quote inside quotes is a literal quote. Fields are not trimmed here.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// What the front-end shows after a dataset was loaded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatasetSummary {
    pub source_name: String,
    pub row_count: usize,
    pub headers: Vec<String>,
    pub question_key: String,
    pub answer_key: String,
    pub category_key: Option<String>,
}

impl DatasetSummary {
    pub fn new(source_name: &str, dataset: &Dataset, roles: &ColumnRoles) -> Self {
        DatasetSummary {
            source_name: source_name.to_owned(),
            row_count: dataset.rows().len(),
            headers: dataset.headers().to_vec(),
            question_key: roles.question().to_owned(),
            answer_key: roles.answer().to_owned(),
            category_key: roles.category().map(str::to_owned),
        }
    }
}
