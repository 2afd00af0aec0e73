use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn bacteria() -> (Dataset, ColumnRoles) {
    let dataset = Dataset::parse(
        "term,definition,category
E. coli,Gram-negative rod.,gram-negative
S. aureus,Gram-positive coccus.,gram-positive
P. aeruginosa,Gram-negative rod. Oxidase positive.,gram-negative
,Orphan definition.,gram-negative
B. subtilis,,gram-positive
K. pneumoniae,Encapsulated rod.,gram-negative",
    );
    let roles = ColumnRoles::infer(dataset.headers()).unwrap();
    (dataset, roles)
}

#[test]
fn parses_question_count() {
    let settings = Settings::default();
    assert_eq!(parse_question_count("10", &settings), 10);
    assert_eq!(parse_question_count("  7 questions", &settings), 7);
    assert_eq!(parse_question_count("+3", &settings), 3);
}

#[test]
fn invalid_question_count_uses_default() {
    let settings = Settings::default();
    assert_eq!(parse_question_count("", &settings), 5);
    assert_eq!(parse_question_count("ten", &settings), 5);
    assert_eq!(parse_question_count("0", &settings), 5);
}

#[test]
fn question_count_is_clamped() {
    let settings = Settings::default();
    assert_eq!(parse_question_count("-4", &settings), 1);
    assert_eq!(parse_question_count("250", &settings), 100);
    assert_eq!(parse_question_count("99999999999999999999999", &settings), 100);
    assert_eq!(parse_question_count("-99999999999999999999999", &settings), 1);
}

#[test]
fn skips_rows_missing_question_or_answer() {
    let (dataset, roles) = bacteria();
    let terms: Vec<&str> = eligible_rows(&dataset, &roles, None)
        .iter()
        .map(|r| r.get("term"))
        .collect();
    assert_eq!(terms, ["E. coli", "S. aureus", "P. aeruginosa", "K. pneumoniae"]);
}

#[test]
fn filters_by_exact_category() {
    let (dataset, roles) = bacteria();
    let rows = eligible_rows(&dataset, &roles, Some("gram-negative"));
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.get("category") == "gram-negative"));
    assert!(eligible_rows(&dataset, &roles, Some("gram")).is_empty());
}

#[test]
fn empty_category_disables_filter() {
    let (dataset, roles) = bacteria();
    assert_eq!(eligible_rows(&dataset, &roles, Some("")).len(), 4);
}

#[test]
fn category_ignored_without_category_column() {
    let dataset = Dataset::parse("term,definition\nA,a.\nB,b.");
    let roles = ColumnRoles::infer(dataset.headers()).unwrap();
    assert_eq!(eligible_rows(&dataset, &roles, Some("anything")).len(), 2);
}

#[test]
fn sample_is_bounded_by_eligible_rows() {
    let (dataset, roles) = bacteria();
    let mut rng = StdRng::seed_from_u64(1);
    let sample = sample_questions(
        &dataset,
        &roles,
        Some("gram-negative"),
        5,
        &Settings::default(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(sample.len(), 3);
    let distinct: HashSet<RowId> = sample.iter().cloned().collect();
    assert_eq!(distinct.len(), 3);
}

#[test]
fn sample_takes_requested_count() {
    let (dataset, roles) = bacteria();
    let mut rng = StdRng::seed_from_u64(2);
    let sample =
        sample_questions(&dataset, &roles, None, 2, &Settings::default(), &mut rng).unwrap();
    assert_eq!(sample.len(), 2);
    for id in sample {
        assert!(is_eligible(dataset.row(id).unwrap(), &roles));
    }
}

#[test]
fn no_eligible_rows_is_reported() {
    let (dataset, roles) = bacteria();
    let mut rng = StdRng::seed_from_u64(3);
    let result = sample_questions(
        &dataset,
        &roles,
        Some("archaea"),
        5,
        &Settings::default(),
        &mut rng,
    );
    assert_eq!(result, Err(QuizError::NoEligibleRows));
}

#[test]
fn every_row_can_come_first() {
    let (dataset, roles) = bacteria();
    let mut rng = StdRng::seed_from_u64(4);
    let mut first_rows = HashSet::new();
    for _ in 0..200 {
        let sample =
            sample_questions(&dataset, &roles, None, 1, &Settings::default(), &mut rng).unwrap();
        first_rows.insert(sample[0]);
    }
    assert_eq!(first_rows.len(), 4);
}
