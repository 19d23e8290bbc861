use std::collections::BTreeSet;

use log::warn;
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::data::{ScoreEntry, Storage};
use crate::grading::{grade_selection, grade_yes_no_multi, Verdict};
use crate::models::{AppState, Question, QuestionKind};

/// Session state for one run of the application.
///
/// Everything the quiz needs between key presses lives here explicitly (the
/// current index, the running correct count, the asked-question list), so the
/// grading engine itself stays pure and independently testable.
pub struct App {
    pub state: AppState,
    storage: Storage,
    bank: Vec<Question>,
    questions: Vec<Question>,
    shuffle: bool,
    limit: Option<usize>,
    current_index: usize,
    /// Grading path of the current question, resolved once when it is shown.
    kind: QuestionKind,
    /// Highlighted row: an option for standard questions, a statement for
    /// yes/no-multi.
    cursor: usize,
    /// Standard questions: which options are toggled on.
    toggled: Vec<bool>,
    /// Yes/no-multi questions: chosen option index per statement.
    choices: Vec<Option<usize>>,
    correct_count: usize,
    asked: Vec<Question>,
    last_verdict: Option<Verdict>,
    history: Vec<ScoreEntry>,
    reset_message: Option<String>,
}

impl App {
    pub fn new(questions: Vec<Question>, storage: Storage) -> Self {
        Self {
            state: AppState::Welcome,
            storage,
            bank: questions,
            questions: Vec::new(),
            shuffle: true,
            limit: None,
            current_index: 0,
            kind: QuestionKind::Standard,
            cursor: 0,
            toggled: Vec::new(),
            choices: Vec::new(),
            correct_count: 0,
            asked: Vec::new(),
            last_verdict: None,
            history: Vec::new(),
            reset_message: None,
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn current_question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn bank_size(&self) -> usize {
        self.bank.len()
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn toggled(&self) -> &[bool] {
        &self.toggled
    }

    pub fn choices(&self) -> &[Option<usize>] {
        &self.choices
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn last_verdict(&self) -> Option<&Verdict> {
        self.last_verdict.as_ref()
    }

    pub fn history(&self) -> &[ScoreEntry] {
        &self.history
    }

    pub fn reset_message(&self) -> Option<&str> {
        self.reset_message.as_deref()
    }

    /// Begin a fresh quiz run from the loaded bank.
    pub fn start_quiz(&mut self) {
        self.questions = self.bank.clone();
        if self.shuffle {
            self.questions.shuffle(&mut thread_rng());
        }
        if let Some(limit) = self.limit {
            self.questions.truncate(limit.max(1));
        }
        self.current_index = 0;
        self.correct_count = 0;
        self.asked.clear();
        self.last_verdict = None;
        self.enter_question();
        self.state = AppState::Quiz;
    }

    /// Reset per-question selection state for the question at current_index.
    fn enter_question(&mut self) {
        let question = &self.questions[self.current_index];
        self.kind = question.kind();
        self.cursor = 0;
        match self.kind {
            QuestionKind::Standard => {
                self.toggled = vec![false; question.options.len()];
                self.choices.clear();
            }
            QuestionKind::YesNoMulti => {
                self.toggled.clear();
                self.choices = vec![None; question.answer.items().len()];
            }
        }
    }

    fn row_count(&self) -> usize {
        match self.kind {
            QuestionKind::Standard => self.toggled.len(),
            QuestionKind::YesNoMulti => self.choices.len(),
        }
    }

    pub fn select_next_row(&mut self) {
        let rows = self.row_count();
        if rows > 0 {
            self.cursor = (self.cursor + 1) % rows;
        }
    }

    pub fn select_previous_row(&mut self) {
        let rows = self.row_count();
        if rows > 0 {
            self.cursor = (self.cursor + rows - 1) % rows;
        }
    }

    /// Toggle the highlighted option (standard questions only).
    pub fn toggle_current(&mut self) {
        if let Some(slot) = self.toggled.get_mut(self.cursor) {
            *slot = !*slot;
        }
    }

    /// Pick yes (option 0) or no (option 1) for the highlighted statement.
    pub fn choose(&mut self, option_index: usize) {
        let option_count = self.current_question().options.len();
        if option_index < option_count {
            if let Some(slot) = self.choices.get_mut(self.cursor) {
                *slot = Some(option_index);
            }
        }
    }

    /// Cycle the highlighted statement through unset -> yes -> no.
    pub fn cycle_choice(&mut self) {
        let option_count = self.current_question().options.len();
        if option_count == 0 {
            return;
        }
        if let Some(slot) = self.choices.get_mut(self.cursor) {
            *slot = match *slot {
                None => Some(0),
                Some(i) if i + 1 < option_count => Some(i + 1),
                Some(_) => None,
            };
        }
    }

    /// Letters for the currently toggled options.
    pub fn selected_letters(&self) -> BTreeSet<char> {
        self.toggled
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| (b'A' + i as u8) as char)
            .collect()
    }

    /// Chosen yes/no value per statement; unset statements grade as empty.
    pub fn selected_choices(&self) -> Vec<String> {
        let options = &self.current_question().options;
        self.choices
            .iter()
            .map(|choice| {
                choice
                    .and_then(|i| options.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Grade the current selection and move to the feedback screen.
    pub fn submit_answer(&mut self) {
        let question = self.current_question().clone();

        let verdict = match self.kind {
            QuestionKind::Standard => {
                grade_selection(&question.options, &question.answer, &self.selected_letters())
            }
            QuestionKind::YesNoMulti => {
                grade_yes_no_multi(question.answer.items(), &self.selected_choices())
            }
        };

        if verdict.is_correct {
            self.correct_count += 1;
        }
        self.last_verdict = Some(verdict);

        self.asked.push(question);
        if let Err(e) = self.storage.save_asked_questions(&self.asked) {
            warn!("could not save asked questions: {}", e);
        }

        self.state = AppState::Feedback;
    }

    /// Leave the feedback screen for the next question or the final results.
    pub fn next_question(&mut self) {
        self.current_index += 1;
        if self.current_index >= self.questions.len() {
            self.finish_quiz();
        } else {
            self.enter_question();
            self.state = AppState::Quiz;
        }
    }

    fn finish_quiz(&mut self) {
        let entry = ScoreEntry::now(self.correct_count, self.questions.len());
        if let Err(e) = self.storage.append_score(entry) {
            warn!("could not save score history: {}", e);
        }
        self.state = AppState::Result;
    }

    pub fn restart(&mut self) {
        self.start_quiz();
    }

    pub fn open_history(&mut self) {
        self.history = self.storage.recent_attempts();
        self.reset_message = None;
        self.state = AppState::History;
    }

    pub fn close_history(&mut self) {
        self.state = AppState::Result;
    }

    /// Delete learned-question files and record a confirmation message.
    pub fn reset_learned_questions(&mut self) {
        let removed = self.storage.reset_learned_questions();
        self.reset_message = Some(if removed.is_empty() {
            "No learned question files found.".to_string()
        } else {
            removed
                .iter()
                .map(|name| format!("Deleted {}", name))
                .collect::<Vec<_>>()
                .join("\n")
        });
    }
}
