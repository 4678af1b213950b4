#![allow(dead_code)]

use chrono::NaiveTime;
use flashcards::core::command::MENU_PROMPT;
use flashcards::core::{Clock, Console, Storage};
use flashcards::{CliConfig, FlashcardError, Result, SessionController, Transcript};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

pub struct ScriptedConsole {
    input: VecDeque<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|line| line.to_string()).collect(),
            output: Vec::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn print_line(&mut self, line: &str) -> Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    files: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn with_file(path: &str, content: &str) -> Self {
        let storage = Self::default();
        storage
            .files
            .borrow_mut()
            .insert(path.to_string(), content.to_string());
        storage
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl Storage for MemoryStorage {
    fn read_file(&self, path: &str) -> Result<String> {
        self.get(path).ok_or_else(|| FlashcardError::FileNotFound {
            path: path.to_string(),
        })
    }

    fn write_file(&self, path: &str, data: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_string(), data.to_string());
        Ok(())
    }
}

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(12, 30, 0).unwrap()
    }
}

pub type TestSession<S> = SessionController<ScriptedConsole, S, CliConfig>;

pub fn session_with<S: Storage>(lines: &[&str], storage: S, config: CliConfig) -> TestSession<S> {
    SessionController::new(
        ScriptedConsole::new(lines),
        storage,
        config,
        Transcript::new(FixedClock),
    )
}

pub fn session(lines: &[&str]) -> TestSession<MemoryStorage> {
    session_with(lines, MemoryStorage::default(), CliConfig::default())
}

/// Console output with the menu prompt filtered out.
pub fn replies<S: Storage>(session: &TestSession<S>) -> Vec<String> {
    session
        .console()
        .output
        .iter()
        .filter(|line| line.as_str() != MENU_PROMPT)
        .cloned()
        .collect()
}
