use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use self::choices::build_choices;
use self::definition::*;
use self::phase::*;
use self::sampler::sample_questions;
use self::session::Session;
use self::settings::Settings;
use crate::dataset::{ColumnRoles, Dataset, DatasetSummary};
use crate::error::{QuizError, Result};
use crate::output::{Message, QuizOutput};
use crate::timer::{Clock, Scheduler, TimerId};

pub mod choices;
pub mod definition;
pub mod phase;
pub mod sampler;
pub mod sentence;
pub mod session;
pub mod settings;


trait State {
    fn on_begin(&mut self);
    fn on_tick(&mut self, now: Duration);
    fn on_end(&mut self);
    fn is_over(&self) -> bool;
}

enum Phase<O: QuizOutput> {
    Idle,
    Question(QuestionState<O>),
    Results(ResultsState<O>),
}

impl<O: QuizOutput> Phase<O> {
    fn get_state(&mut self) -> Option<&mut dyn State> {
        match self {
            Phase::Idle => None,
            Phase::Question(s) => Some(s),
            Phase::Results(s) => Some(s),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Question(_) => "question",
            Phase::Results(_) => "results",
        }
    }
}

/// Where the engine stands, as far as the front-end is concerned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Idle,
    Displaying,
    Resolved,
    Finished,
}

struct LoadedDataset {
    source_name: String,
    dataset: Dataset,
    roles: ColumnRoles,
}

pub struct QuizEngine<O: QuizOutput + Clone> {
    settings: Settings,
    loaded: Option<LoadedDataset>,
    session: Option<Session>,
    current_phase: Phase<O>,
    next_timer_id: u64,
    rng: StdRng,
    clock: Arc<dyn Clock + Send + Sync>,
    scheduler: Box<dyn Scheduler + Send>,
    output: O,
}

impl<O: QuizOutput + Clone> QuizEngine<O> {
    pub fn new(
        settings: Settings,
        output: O,
        clock: Arc<dyn Clock + Send + Sync>,
        scheduler: Box<dyn Scheduler + Send>,
    ) -> Self {
        QuizEngine {
            settings,
            loaded: None,
            session: None,
            current_phase: Phase::Idle,
            next_timer_id: 0,
            rng: StdRng::from_entropy(),
            clock,
            scheduler,
            output,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the current dataset. A dataset without headers or rows is rejected and the
    /// previous one, if any, stays loaded.
    pub fn load_text(&mut self, source_name: &str, text: &str) -> Result<()> {
        let dataset = Dataset::parse(text);
        let roles = match ColumnRoles::infer(dataset.headers()) {
            Some(roles) if !dataset.is_empty() => roles,
            _ => return Err(self.report(QuizError::EmptyDataset(source_name.to_owned()))),
        };

        self.abandon_session();

        info!(
            "Loaded {} rows from {} (question: {}, answer: {}, category: {:?})",
            dataset.rows().len(),
            source_name,
            roles.question(),
            roles.answer(),
            roles.category()
        );
        let summary = DatasetSummary::new(source_name, &dataset, &roles);
        self.loaded = Some(LoadedDataset {
            source_name: source_name.to_owned(),
            dataset,
            roles,
        });
        self.output.say(&Message::DatasetLoaded(summary));
        Ok(())
    }

    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        match fs::read_to_string(path) {
            Ok(text) => self.load_text(&source_name, &text),
            Err(e) => Err(self.report(QuizError::LoadFailed {
                source_name,
                reason: e.to_string(),
            })),
        }
    }

    pub fn dataset_summary(&self) -> Option<DatasetSummary> {
        self.loaded
            .as_ref()
            .map(|l| DatasetSummary::new(&l.source_name, &l.dataset, &l.roles))
    }

    /// Category values the quiz can be restricted to. Empty when the dataset has no
    /// category column.
    pub fn categories(&self) -> Vec<String> {
        self.loaded
            .as_ref()
            .map(|l| l.dataset.categories(&l.roles))
            .unwrap_or_default()
    }

    /// Samples `count` questions and shows the first one. Any running session is dropped.
    pub fn start(&mut self, count: usize, category: Option<&str>) -> Result<()> {
        let questions = match &self.loaded {
            None => Err(QuizError::NoDataset),
            Some(l) => sample_questions(
                &l.dataset,
                &l.roles,
                category,
                count,
                &self.settings,
                &mut self.rng,
            ),
        };
        let questions = match questions {
            Ok(questions) => questions,
            Err(e) => return Err(self.report(e)),
        };

        self.abandon_session();
        info!(
            "Starting quiz with {} questions (requested {}, category {:?})",
            questions.len(),
            count,
            category
        );
        self.session = Some(Session::new(questions));
        self.begin_question()
    }

    pub fn status(&self) -> Status {
        match &self.current_phase {
            Phase::Idle => Status::Idle,
            Phase::Question(s) if s.is_over() => Status::Resolved,
            Phase::Question(_) => Status::Displaying,
            Phase::Results(_) => Status::Finished,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.current_phase {
            Phase::Question(s) => Some(s.question()),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match &self.current_phase {
            Phase::Results(s) => Some(s.summary()),
            _ => None,
        }
    }

    pub fn select_choice(&mut self, choice: usize) -> Result<Outcome> {
        let now = self.clock.now();
        let outcome = match &mut self.current_phase {
            Phase::Question(state) => state.select(choice, now),
            _ => Err(QuizError::NoActiveQuestion),
        };
        match outcome {
            Ok(outcome) => {
                self.record(&outcome);
                Ok(outcome)
            }
            Err(e) => {
                debug!("Choice {} was not accepted: {}", choice, e);
                Err(e)
            }
        }
    }

    /// Handles a tick from a scheduled timer. Ticks from cancelled or replaced timers are
    /// dropped.
    pub fn on_tick(&mut self, timer_id: TimerId) {
        let now = self.clock.now();
        let outcome = match &mut self.current_phase {
            Phase::Question(state) if state.owns_timer(timer_id) => {
                state.on_tick(now);
                if state.is_expired(now) {
                    state.time_up()
                } else {
                    None
                }
            }
            _ => {
                debug!("Dropping tick from stale timer {:?}", timer_id);
                None
            }
        };
        if let Some(outcome) = outcome {
            self.record(&outcome);
        }
    }

    /// Resolves the current question as timed out, unless it was already answered.
    pub fn time_up(&mut self) -> Result<Option<Outcome>> {
        let outcome = match &mut self.current_phase {
            Phase::Question(state) => state.time_up(),
            _ => return Err(QuizError::NoActiveQuestion),
        };
        if let Some(outcome) = &outcome {
            self.record(outcome);
        }
        Ok(outcome)
    }

    /// Moves past a resolved question, to the next one or to the results.
    pub fn advance(&mut self) -> Result<()> {
        match &self.current_phase {
            Phase::Question(state) if !state.is_over() => {
                return Err(QuizError::QuestionInProgress)
            }
            Phase::Question(_) => (),
            _ => return Err(QuizError::NoActiveQuestion),
        }
        let has_next = self.session.as_mut().map_or(false, |s| s.next());
        if has_next {
            self.begin_question()
        } else {
            self.finish();
            Ok(())
        }
    }

    /// Leaves the quiz without scoring it.
    pub fn close(&mut self) {
        let was_running = self.session.is_some();
        self.abandon_session();
        if was_running {
            self.output.say(&Message::QuizAbandoned);
        }
    }

    fn begin_question(&mut self) -> Result<()> {
        self.cancel_timer();

        let loaded = self.loaded.as_ref().ok_or(QuizError::NoDataset)?;
        let session = self.session.as_ref().ok_or(QuizError::NoActiveQuestion)?;
        let row = session
            .current_row()
            .and_then(|id| loaded.dataset.row(id))
            .ok_or(QuizError::NoActiveQuestion)?;

        let category = category_of(row, &loaded.roles);
        let choices = build_choices(
            &loaded.dataset,
            &loaded.roles,
            row,
            category,
            &self.settings,
            &mut self.rng,
        );
        let question = Question::new(
            row,
            &loaded.roles,
            session.current_index(),
            session.len(),
            choices,
        );

        self.next_timer_id += 1;
        let timer_id = TimerId(self.next_timer_id);
        let timer = self
            .scheduler
            .schedule_repeating(timer_id, self.settings.tick_period);
        debug!("Scheduled timer {:?} for question {}", timer_id, question.number);

        let state = QuestionState::new(
            question,
            self.clock.now(),
            self.settings.time_limit,
            timer,
            self.output.clone(),
        );
        self.set_current_phase(Phase::Question(state));
        Ok(())
    }

    fn finish(&mut self) {
        let summary = match &self.session {
            Some(session) => Summary::new(session, self.settings.time_limit),
            None => return,
        };
        info!(
            "Quiz finished: {}/{} correct in {:?}",
            summary.correct, summary.total, summary.total_time
        );
        self.session = None;
        self.set_current_phase(Phase::Results(ResultsState::new(
            summary,
            self.output.clone(),
        )));
    }

    fn abandon_session(&mut self) {
        self.session = None;
        if let Phase::Idle = self.current_phase {
            return;
        }
        self.set_current_phase(Phase::Idle);
    }

    fn cancel_timer(&mut self) {
        if let Phase::Question(state) = &self.current_phase {
            state.cancel_timer();
        }
    }

    fn record(&mut self, outcome: &Outcome) {
        if let Some(session) = &mut self.session {
            session.record(outcome);
        }
    }

    fn report(&self, error: QuizError) -> QuizError {
        info!("{}", error);
        self.output.say(&Message::Problem(error.clone()));
        error
    }

    fn set_current_phase(&mut self, phase: Phase<O>) {
        if let Some(state) = self.current_phase.get_state() {
            state.on_end();
        }

        debug!("Entering quiz phase: {}", phase.name());
        self.current_phase = phase;

        if let Some(state) = self.current_phase.get_state() {
            state.on_begin();
        }
    }
}
