use super::*;
use crate::dataset::RowId;
use crate::output::mock::MockQuizOutput;
use crate::quiz::definition::Verdict;
use crate::quiz::phase::Outcome;

fn outcome(verdict: Verdict, secs: u64) -> Outcome {
    Outcome {
        verdict,
        choice: None,
        elapsed: Duration::from_secs(secs),
    }
}

fn summary(total: usize, correct: usize) -> Summary {
    Summary {
        total,
        correct,
        total_time: Duration::default(),
    }
}

#[test]
fn sums_answer_times() {
    let mut session = Session::new(vec![RowId(0), RowId(1)]);
    session.record(&outcome(Verdict::Correct, 4));
    session.next();
    session.record(&outcome(Verdict::TimeUp, 20));

    let summary = Summary::new(&session, Duration::from_secs(20));
    assert_eq!(summary.total, 2);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.total_time, Duration::from_secs(24));
    assert_eq!(summary.accuracy_percent(), 50);
}

#[test]
fn unanswered_questions_count_full_limit() {
    let mut session = Session::new(vec![RowId(0), RowId(1), RowId(2)]);
    session.record(&outcome(Verdict::Wrong, 3));
    let summary = Summary::new(&session, Duration::from_secs(20));
    assert_eq!(summary.total_time, Duration::from_secs(43));
    assert_eq!(summary.correct, 0);
}

#[test]
fn empty_session_has_zero_accuracy() {
    let summary = Summary::new(&Session::new(vec![]), Duration::from_secs(20));
    assert_eq!(summary.accuracy(), 0.0);
    assert_eq!(summary.grade(), Grade::NeedsReview);
}

#[test]
fn grade_thresholds() {
    assert_eq!(summary(5, 5).grade(), Grade::Excellent);
    assert_eq!(summary(5, 4).grade(), Grade::Excellent);
    assert_eq!(summary(10, 7).grade(), Grade::Good);
    assert_eq!(summary(2, 1).grade(), Grade::Good);
    assert_eq!(summary(10, 4).grade(), Grade::NeedsReview);
}

#[test]
fn rounds_accuracy_percent() {
    assert_eq!(summary(3, 2).accuracy_percent(), 67);
    assert_eq!(summary(3, 1).accuracy_percent(), 33);
    assert_eq!(summary(8, 1).accuracy_percent(), 13);
}

#[test]
fn announces_results() {
    let output = MockQuizOutput::new();
    let mut state = ResultsState::new(summary(2, 1), output.clone());
    state.on_begin();
    assert_eq!(output.flush(), [Message::QuizResults(summary(2, 1))]);
    assert!(state.is_over());
}
