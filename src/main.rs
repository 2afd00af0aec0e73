use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use terms_quiz::error::QuizError;
use terms_quiz::output::terminal::TerminalOutput;
use terms_quiz::quiz::sampler::parse_question_count;
use terms_quiz::quiz::settings::Settings;
use terms_quiz::quiz::{QuizEngine, Status};
use terms_quiz::timer::{SystemClock, ThreadScheduler, TimerId};

enum Event {
    Input(String),
    Tick(TimerId),
    EndOfInput,
}

enum Mode {
    AwaitingPath,
    Menu,
    Category { count: usize },
    Quiz,
}

struct Frontend {
    engine: QuizEngine<TerminalOutput>,
    mode: Mode,
}

impl Frontend {
    fn new(engine: QuizEngine<TerminalOutput>) -> Self {
        Frontend {
            engine,
            mode: Mode::AwaitingPath,
        }
    }

    fn load_default_source(&mut self) -> Result<()> {
        let path = self.engine.settings().default_source.clone();
        self.mode = match self.engine.load_file(&path) {
            Ok(()) => Mode::Menu,
            Err(_) => Mode::AwaitingPath,
        };
        self.prompt()
    }

    fn prompt(&self) -> Result<()> {
        let mut stdout = io::stdout();
        match &self.mode {
            Mode::AwaitingPath => print!("\nCSVファイルのパス: "),
            Mode::Menu => print!(
                "\n出題数を入力してください（既定 {}、l: CSVを読み込む、q: 終了）: ",
                self.engine.settings().default_question_count
            ),
            Mode::Category { .. } => {
                println!("\nカテゴリ:");
                println!("  0. すべて");
                for (index, category) in self.engine.categories().iter().enumerate() {
                    println!("  {}. {}", index + 1, category);
                }
                print!("番号を入力してください: ");
            }
            Mode::Quiz => (),
        }
        stdout.flush().context("could not flush stdout")
    }

    /// Returns false once the user asked to quit.
    fn on_input(&mut self, line: &str) -> Result<bool> {
        let line = line.trim();
        match self.mode {
            Mode::AwaitingPath => {
                let has_dataset = self.engine.dataset_summary().is_some();
                if line.is_empty() || line == "q" {
                    if has_dataset {
                        self.mode = Mode::Menu;
                    }
                } else if self.engine.load_file(Path::new(line)).is_ok() {
                    self.mode = Mode::Menu;
                }
            }
            Mode::Menu => match line {
                "q" => return Ok(false),
                "l" => self.mode = Mode::AwaitingPath,
                _ => {
                    let count = parse_question_count(line, self.engine.settings());
                    if self.engine.categories().is_empty() {
                        self.start(count, None);
                    } else {
                        self.mode = Mode::Category { count };
                    }
                }
            },
            Mode::Category { count } => {
                let categories = self.engine.categories();
                let category = line
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|index| categories.get(index).cloned());
                self.start(count, category.as_deref());
            }
            Mode::Quiz => self.on_quiz_input(line),
        }
        self.prompt()?;
        Ok(true)
    }

    fn on_quiz_input(&mut self, line: &str) {
        if line == "q" {
            self.engine.close();
            self.mode = Mode::Menu;
            return;
        }
        if line.is_empty() {
            if self.engine.status() == Status::Resolved
                && self.engine.advance().is_ok()
                && self.engine.status() == Status::Finished
            {
                self.mode = Mode::Menu;
            }
            return;
        }
        let choice = match line.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(choice) => choice,
            None => {
                println!("選択肢の番号を入力してください。");
                return;
            }
        };
        match self.engine.select_choice(choice) {
            Err(QuizError::InvalidChoice(_)) => println!("その番号の選択肢はありません。"),
            Err(e) => debug!("Ignoring input {:?}: {}", line, e),
            Ok(_) => (),
        }
    }

    fn on_tick(&mut self, timer_id: TimerId) {
        self.engine.on_tick(timer_id);
    }

    fn start(&mut self, count: usize, category: Option<&str>) {
        self.mode = match self.engine.start(count, category) {
            Ok(()) => Mode::Quiz,
            Err(_) => Mode::Menu,
        };
    }
}

fn spawn_input_reader(sender: Sender<Event>) -> Result<()> {
    thread::Builder::new()
        .name("stdin".to_owned())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if sender.send(Event::Input(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        debug!("Stopped reading stdin: {}", e);
                        break;
                    }
                }
            }
            let _ = sender.send(Event::EndOfInput);
        })
        .context("could not spawn stdin reader")?;
    Ok(())
}

fn run(mut frontend: Frontend, events: Receiver<Event>) -> Result<()> {
    frontend.load_default_source()?;
    for event in events {
        match event {
            Event::Input(line) => {
                if !frontend.on_input(&line)? {
                    break;
                }
            }
            Event::Tick(timer_id) => frontend.on_tick(timer_id),
            Event::EndOfInput => break,
        }
    }
    frontend.engine.close();
    info!("Exiting");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let settings = Settings::load();

    let (sender, events) = mpsc::channel();
    let tick_sender = Mutex::new(sender.clone());
    let scheduler =
        ThreadScheduler::new(move |timer_id| tick_sender.lock().send(Event::Tick(timer_id)).is_ok());
    spawn_input_reader(sender)?;

    let engine = QuizEngine::new(
        settings,
        TerminalOutput::new(),
        Arc::new(SystemClock::new()),
        Box::new(scheduler),
    );
    run(Frontend::new(engine), events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontend() -> Frontend {
        let engine = QuizEngine::new(
            Settings::default(),
            TerminalOutput::new(),
            Arc::new(SystemClock::new()),
            Box::new(ThreadScheduler::new(|_| false)),
        );
        Frontend::new(engine)
    }

    #[test]
    fn path_prompt_needs_a_dataset_to_go_back() {
        let mut frontend = frontend();
        assert!(frontend.on_input("").unwrap());
        assert!(matches!(frontend.mode, Mode::AwaitingPath));
        assert!(frontend.on_input("q").unwrap());
        assert!(matches!(frontend.mode, Mode::AwaitingPath));
    }

    #[test]
    fn path_prompt_returns_to_menu_with_loaded_dataset() {
        let mut frontend = frontend();
        frontend
            .engine
            .load_text("terms.csv", "term,definition\nA,Alpha.")
            .unwrap();
        frontend.mode = Mode::Menu;

        frontend.on_input("l").unwrap();
        assert!(matches!(frontend.mode, Mode::AwaitingPath));
        frontend.on_input("").unwrap();
        assert!(matches!(frontend.mode, Mode::Menu));

        frontend.on_input("l").unwrap();
        frontend.on_input("q").unwrap();
        assert!(matches!(frontend.mode, Mode::Menu));
    }

    #[test]
    fn finishing_quiz_returns_to_menu() {
        let mut frontend = frontend();
        frontend
            .engine
            .load_text("terms.csv", "term,definition\nA,Alpha.")
            .unwrap();
        frontend.mode = Mode::Menu;

        frontend.on_input("1").unwrap();
        assert!(matches!(frontend.mode, Mode::Quiz));
        frontend.on_input("").unwrap();
        assert!(matches!(frontend.mode, Mode::Quiz));

        frontend.on_input("1").unwrap();
        assert_eq!(frontend.engine.status(), Status::Resolved);
        frontend.on_input("").unwrap();
        assert_eq!(frontend.engine.status(), Status::Finished);
        assert!(matches!(frontend.mode, Mode::Menu));
    }
}
