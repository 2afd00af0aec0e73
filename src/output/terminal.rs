use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::error::QuizError;
use crate::output::{Message, QuizOutput};
use crate::quiz::definition::{ChoiceMark, Question, Verdict};
use crate::quiz::phase::Grade;


const BAR_CELLS: usize = 20;
const TIME_REPORT_STEP_MS: u128 = 5_000;

#[derive(Debug, Default)]
struct Screen {
    question: Option<Question>,
    time_bucket: Option<u128>,
}

/// Prints quiz messages to stdout.
#[derive(Clone, Debug, Default)]
pub struct TerminalOutput {
    screen: Arc<Mutex<Screen>>,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining-time updates are only rendered when they cross a five second step, so
    /// that ticks do not flood the terminal.
    fn interpret_message(&self, message: &Message) -> Option<String> {
        use Message::*;
        let mut screen = self.screen.lock();
        match message {
            DatasetLoaded(summary) => {
                let mut text = format!(
                    "読み込み済み: {}（{} 件）",
                    summary.source_name, summary.row_count
                );
                text += &format!("\nヘッダ: {}", summary.headers.join(", "));
                text += &format!("\n問題列: {}", summary.question_key);
                text += &format!("\n説明列: {}", summary.answer_key);
                text += &format!(
                    "\nカテゴリ列: {}",
                    summary.category_key.as_deref().unwrap_or("（なし）")
                );
                Some(text)
            }
            Problem(error) => Some(describe_problem(error)),
            QuestionBegins(question) => {
                let mut text = format!("\nQ{} / {}", question.number, question.total);
                if let Some(category) = &question.category {
                    text += &format!("  [{}]", category);
                }
                text += &format!("\n{}", question.prompt);
                for (index, choice) in question.choices.iter().enumerate() {
                    text += &format!("\n  {}. {}", index + 1, choice.text);
                }
                screen.question = Some(question.clone());
                screen.time_bucket = None;
                Some(text)
            }
            TimeRemaining { remaining, limit } => {
                let bucket = (remaining.as_millis() + TIME_REPORT_STEP_MS - 1) / TIME_REPORT_STEP_MS;
                if screen.time_bucket == Some(bucket) {
                    return None;
                }
                screen.time_bucket = Some(bucket);
                Some(format!(
                    "残り {:.1} 秒 {}",
                    remaining.as_secs_f64(),
                    time_bar(*remaining, *limit)
                ))
            }
            AnswerReveal {
                marks,
                verdict,
                is_last,
            } => {
                let mut text = feedback(*verdict).to_owned();
                if let Some(question) = &screen.question {
                    for ((index, choice), mark) in
                        question.choices.iter().enumerate().zip(marks.iter())
                    {
                        text += &format!("\n  {} {}. {}", mark_symbol(*mark), index + 1, choice.text);
                    }
                }
                let label = if *is_last { "結果を見る" } else { "次の問題へ" };
                text += &format!("\n[Enter] {}", label);
                Some(text)
            }
            QuizAbandoned => {
                screen.question = None;
                Some("クイズを終了しました。".into())
            }
            QuizResults(summary) => {
                screen.question = None;
                let mut text = "\n結果".to_owned();
                text += &format!("\n問題数: {}", summary.total);
                text += &format!("\n正解数: {}", summary.correct);
                text += &format!("\n正解率: {}%", summary.accuracy_percent());
                text += &format!(
                    "\n合計回答時間: {:.1} 秒",
                    summary.total_time.as_secs_f64()
                );
                text += &format!("\n{}", grade_message(summary.grade()));
                Some(text)
            }
        }
    }
}

impl QuizOutput for TerminalOutput {
    fn say(&self, message: &Message) {
        if let Some(text) = self.interpret_message(message) {
            println!("{}", text);
        }
    }
}

fn describe_problem(error: &QuizError) -> String {
    match error {
        QuizError::LoadFailed { source_name, .. } => format!(
            "{} を読み込めませんでした。ファイル選択からCSVを読み込んでください。",
            source_name
        ),
        QuizError::EmptyDataset(source_name) => {
            format!("{} に有効なデータがありません。", source_name)
        }
        QuizError::NoDataset => "CSVが読み込まれていません。".into(),
        QuizError::NoEligibleRows => "この条件に合う問題がありません。".into(),
        e => e.to_string(),
    }
}

fn feedback(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "正解！よくできました。",
        Verdict::Wrong => "残念… 正しい説明をよく確認しておきましょう。",
        Verdict::TimeUp => "時間切れです。正しい説明を確認しておきましょう。",
    }
}

fn mark_symbol(mark: ChoiceMark) -> &'static str {
    match mark {
        ChoiceMark::Neutral => " ",
        ChoiceMark::Correct => "○",
        ChoiceMark::Wrong => "×",
    }
}

fn grade_message(grade: Grade) -> &'static str {
    match grade {
        Grade::Excellent => {
            "素晴らしい！かなり理解できています。この調子で別カテゴリも挑戦してみましょう。"
        }
        Grade::Good => "よくできています。間違えた用語を中心に、CSVの内容を見直してみましょう。",
        Grade::NeedsReview => "今回は少し難しかったかもしれません。用語ブラウザで意味を確認してから、もう一度チャレンジしてみましょう。",
    }
}

fn time_bar(remaining: Duration, limit: Duration) -> String {
    let ratio = if limit.as_millis() == 0 {
        0.0
    } else {
        (remaining.as_secs_f64() / limit.as_secs_f64()).min(1.0).max(0.0)
    };
    let filled = (ratio * BAR_CELLS as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}
