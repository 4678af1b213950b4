use crate::core::command::{Command, MENU_PROMPT};
use crate::core::grading::grade;
use crate::core::store::CardStore;
use crate::core::transcript::Transcript;
use crate::core::{ConfigProvider, Console, Storage};
use crate::domain::model::Verdict;
use crate::utils::error::{FlashcardError, Result};

/// Where an import or export gets its file name from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource<'a> {
    Fixed(&'a str),
    Prompt,
}

enum Flow {
    Continue,
    Exit,
}

/// Drives the interactive menu loop over a single card deck.
pub struct SessionController<C: Console, S: Storage, P: ConfigProvider> {
    console: C,
    storage: S,
    config: P,
    store: CardStore,
    transcript: Transcript,
}

impl<C: Console, S: Storage, P: ConfigProvider> SessionController<C, S, P> {
    pub fn new(console: C, storage: S, config: P, transcript: Transcript) -> Self {
        Self {
            console,
            storage,
            config,
            store: CardStore::new(),
            transcript,
        }
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CardStore {
        &mut self.store
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Runs until `exit` or end of input. Only console failures escape.
    pub fn run(&mut self) -> Result<()> {
        if let Some(path) = self.config.import_path().map(str::to_owned) {
            tracing::debug!("Importing startup deck from {}", path);
            self.import_cards(PathSource::Fixed(&path))?;
        }

        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(FlashcardError::InputClosed) => {
                    tracing::debug!("Console input closed, exiting");
                    self.exit()?;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    fn step(&mut self) -> Result<Flow> {
        self.say(MENU_PROMPT)?;
        let action = self.read_input()?;

        match Command::parse(&action) {
            Some(Command::Exit) => {
                self.exit()?;
                return Ok(Flow::Exit);
            }
            Some(Command::Add) => self.add_card()?,
            Some(Command::Remove) => self.remove_card()?,
            Some(Command::Import) => self.import_cards(PathSource::Prompt)?,
            Some(Command::Export) => self.export_cards(PathSource::Prompt)?,
            Some(Command::Ask) => self.ask_cards()?,
            Some(Command::Log) => self.save_log()?,
            Some(Command::HardestCard) => self.hardest_card()?,
            Some(Command::ResetStats) => self.reset_stats()?,
            None => self.say("Invalid action")?,
        }

        Ok(Flow::Continue)
    }

    fn exit(&mut self) -> Result<()> {
        self.say("Bye bye!")?;
        if let Some(path) = self.config.export_path().map(str::to_owned) {
            self.export_cards(PathSource::Fixed(&path))?;
        }
        Ok(())
    }

    pub fn add_card(&mut self) -> Result<()> {
        self.say("The card:")?;
        let term = self.read_input()?;
        if self.store.contains_term(&term) {
            return self.report(&FlashcardError::DuplicateTerm { term });
        }

        self.say("The definition of the card:")?;
        let definition = self.read_input()?;

        match self.store.add(&term, &definition) {
            Ok(()) => self.say(&format!(
                "The pair (\"{}\":\"{}\") has been added.",
                term, definition
            )),
            Err(e) => self.report(&e),
        }
    }

    pub fn remove_card(&mut self) -> Result<()> {
        self.say("Which card?")?;
        let term = self.read_input()?;

        match self.store.remove(&term) {
            Ok(_) => self.say("The card has been removed."),
            Err(e) => self.report(&e),
        }
    }

    pub fn ask_cards(&mut self) -> Result<()> {
        self.say("How many times to ask?")?;
        let raw = self.read_input()?;

        let requested = match raw.split_whitespace().next().map(str::parse::<i64>) {
            Some(Ok(n)) => usize::try_from(n).unwrap_or(0),
            _ => {
                tracing::warn!("Not a number of questions: {:?}", raw);
                return self.say("Invalid number.");
            }
        };

        let rounds = requested.min(self.store.len());
        let terms: Vec<String> = self.store.terms_in_order().into_iter().take(rounds).collect();

        for term in terms {
            self.say(&format!("Print the definition of \"{}\":", term))?;
            let answer = self.read_input()?;

            let (Some(verdict), Some(expected)) = (
                grade(&self.store, &term, &answer),
                self.store.lookup_definition(&term).map(str::to_owned),
            ) else {
                continue;
            };

            match verdict {
                Verdict::Correct => self.say("Correct!")?,
                Verdict::CorrectForOther(other) => {
                    self.record_mistake(&term);
                    self.say(&format!(
                        "Wrong. The right answer is \"{}\", \
                         but your definition is correct for \"{}\".",
                        expected, other
                    ))?;
                }
                Verdict::Wrong => {
                    self.record_mistake(&term);
                    self.say(&format!("Wrong. The right answer is \"{}\".", expected))?;
                }
            }
        }

        Ok(())
    }

    pub fn import_cards(&mut self, source: PathSource<'_>) -> Result<()> {
        let path = self.resolve_path(source)?;

        let loaded = match self.storage.read_file(&path) {
            Ok(content) => self.store.import_from(&content),
            Err(e) => Err(e),
        };

        match loaded {
            Ok(count) => {
                tracing::debug!("Loaded {} cards from {}", count, path);
                self.say(&format!("{} cards have been loaded.", count))
            }
            Err(e) => {
                tracing::warn!("Import from {} failed: {}", path, e);
                self.report(&e)
            }
        }
    }

    pub fn export_cards(&mut self, source: PathSource<'_>) -> Result<()> {
        let path = self.resolve_path(source)?;

        let saved = self
            .store
            .export_to()
            .and_then(|(text, count)| self.storage.write_file(&path, &text).map(|_| count));

        match saved {
            Ok(count) => {
                tracing::debug!("Saved {} cards to {}", count, path);
                self.say(&format!("{} cards have been saved.", count))
            }
            Err(e) => {
                tracing::warn!("Export to {} failed: {}", path, e);
                self.say("Couldn't export cards.")
            }
        }
    }

    pub fn hardest_card(&mut self) -> Result<()> {
        let hardest = self.store.hardest_terms();
        if !hardest.has_errors() {
            return self.say("There are no cards with errors.");
        }

        let names = hardest
            .terms
            .iter()
            .map(|term| format!("\"{}\"", term))
            .collect::<Vec<_>>()
            .join(", ");

        let message = if hardest.terms.len() == 1 {
            format!(
                "The hardest card is {}. You have {} errors answering it.",
                names, hardest.mistakes
            )
        } else {
            format!(
                "The hardest cards are {}. You have {} errors answering them.",
                names, hardest.mistakes
            )
        };
        self.say(&message)
    }

    pub fn reset_stats(&mut self) -> Result<()> {
        if !self.store.has_statistics() {
            return self.say("There are no cards with statistics.");
        }

        self.store.reset_stats();
        self.say("Card statistics have been reset.")
    }

    pub fn save_log(&mut self) -> Result<()> {
        self.say("File name:")?;
        let path = self.read_input()?;

        // The transcript is cleared either way, so neither line below is recorded.
        match self.transcript.flush_to(&self.storage, &path) {
            Ok(lines) => {
                tracing::debug!("Wrote {} transcript lines to {}", lines, path);
                self.console.print_line("The log has been saved.")
            }
            Err(e) => {
                tracing::warn!("Saving log to {} failed: {}", path, e);
                self.console.print_line(&e.user_friendly_message())
            }
        }
    }

    fn record_mistake(&mut self, term: &str) {
        if let Some(count) = self.store.record_mistake(term) {
            tracing::debug!("Card {:?} now has {} mistakes", term, count);
        }
    }

    fn resolve_path(&mut self, source: PathSource<'_>) -> Result<String> {
        match source {
            PathSource::Fixed(path) => Ok(path.to_string()),
            PathSource::Prompt => {
                self.say("File name:")?;
                self.read_input()
            }
        }
    }

    fn report(&mut self, err: &FlashcardError) -> Result<()> {
        tracing::debug!("Command failed ({:?}): {}", err.category(), err);
        self.say(&err.user_friendly_message())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.console.print_line(message)?;
        self.transcript.record(message);
        Ok(())
    }

    fn read_input(&mut self) -> Result<String> {
        let line = self.console.read_line()?.ok_or(FlashcardError::InputClosed)?;
        self.transcript.record_input(&line);
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    struct ScriptedConsole {
        input: VecDeque<String>,
        output: Vec<String>,
    }

    impl ScriptedConsole {
        fn new(lines: &[&str]) -> Self {
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
    struct MockStorage {
        files: RefCell<HashMap<String, String>>,
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| FlashcardError::FileNotFound {
                    path: path.to_string(),
                })
        }

        fn write_file(&self, path: &str, data: &str) -> Result<()> {
            self.files.borrow_mut().insert(path.to_string(), data.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct Paths {
        import: Option<String>,
        export: Option<String>,
    }

    impl ConfigProvider for Paths {
        fn import_path(&self) -> Option<&str> {
            self.import.as_deref()
        }

        fn export_path(&self) -> Option<&str> {
            self.export.as_deref()
        }
    }

    struct Midnight;

    impl crate::core::Clock for Midnight {
        fn now(&self) -> NaiveTime {
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        }
    }

    fn session(lines: &[&str]) -> SessionController<ScriptedConsole, MockStorage, Paths> {
        SessionController::new(
            ScriptedConsole::new(lines),
            MockStorage::default(),
            Paths::default(),
            Transcript::new(Midnight),
        )
    }

    fn outputs(session: &SessionController<ScriptedConsole, MockStorage, Paths>) -> Vec<&str> {
        session
            .console()
            .output
            .iter()
            .map(String::as_str)
            .filter(|line| *line != MENU_PROMPT)
            .collect()
    }

    #[test]
    fn test_add_duplicate_term_skips_definition_prompt() {
        let mut s = session(&["add", "cat", "meow", "add", "cat", "exit"]);
        s.run().unwrap();

        assert_eq!(
            outputs(&s),
            vec![
                "The card:",
                "The definition of the card:",
                "The pair (\"cat\":\"meow\") has been added.",
                "The card:",
                "The card \"cat\" already exists.",
                "Bye bye!",
            ]
        );
        assert_eq!(s.store().len(), 1);
    }

    #[test]
    fn test_add_duplicate_definition() {
        let mut s = session(&["add", "cat", "meow", "add", "kitten", "meow", "exit"]);
        s.run().unwrap();

        assert!(outputs(&s).contains(&"The definition \"meow\" already exists."));
        assert_eq!(s.store().terms_in_order(), vec!["cat"]);
    }

    #[test]
    fn test_ask_with_unparseable_count() {
        let mut s = session(&["ask", "lots", "exit"]);
        s.run().unwrap();
        assert_eq!(outputs(&s), vec!["How many times to ask?", "Invalid number.", "Bye bye!"]);
    }

    #[test]
    fn test_negative_count_asks_nothing() {
        let mut s = session(&["ask", "-2", "exit"]);
        s.store_mut().add("a", "1").unwrap();
        s.run().unwrap();
        assert_eq!(outputs(&s), vec!["How many times to ask?", "Bye bye!"]);
    }

    #[test]
    fn test_end_of_input_exits_and_exports() {
        let mut s = SessionController::new(
            ScriptedConsole::new(&["add", "a"]),
            MockStorage::default(),
            Paths {
                import: None,
                export: Some("out.txt".to_string()),
            },
            Transcript::new(Midnight),
        );
        s.run().unwrap();

        let out = outputs(&s);
        assert_eq!(out[out.len() - 2..], ["Bye bye!", "0 cards have been saved."]);
        assert_eq!(s.storage().read_file("out.txt").unwrap(), "");
    }

    #[test]
    fn test_transcript_records_prompts_and_inputs() {
        let mut s = session(&["remove", "x"]);
        s.run().unwrap();

        let entries = s.transcript().entries();
        assert_eq!(entries[0], format!("[00:00:00.000] {}", MENU_PROMPT));
        assert_eq!(entries[1], "[00:00:00.000] > remove");
        assert_eq!(entries[2], "[00:00:00.000] Which card?");
        assert_eq!(entries[3], "[00:00:00.000] > x");
        assert_eq!(
            entries[4],
            "[00:00:00.000] Can't remove \"x\": there is no such card."
        );
    }

    #[test]
    fn test_log_is_written_and_cleared() {
        let mut s = session(&["hardest card", "log", "log.txt", "exit"]);
        s.run().unwrap();

        let log = s.storage().read_file("log.txt").unwrap();
        assert!(log.contains("There are no cards with errors."));
        assert!(log.ends_with("> log.txt\n"));
        assert!(!log.contains("The log has been saved."));
        assert!(outputs(&s).contains(&"The log has been saved."));

        // only the final menu round and exit remain
        let remaining = s.transcript().entries();
        assert_eq!(remaining.len(), 3);
        assert!(remaining[2].ends_with("Bye bye!"));
    }
}
