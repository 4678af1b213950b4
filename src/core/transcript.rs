use crate::domain::ports::{Clock, Storage};
use crate::utils::error::Result;

const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Timestamped record of everything printed and read during a session.
pub struct Transcript {
    clock: Box<dyn Clock>,
    entries: Vec<String>,
}

impl Transcript {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, text: &str) {
        let stamp = self.clock.now().format(TIME_FORMAT);
        self.entries.push(format!("[{}] {}", stamp, text));
    }

    pub fn record_input(&mut self, text: &str) {
        self.record(&format!("> {}", text));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        self.entries.iter().map(|entry| format!("{}\n", entry)).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Writes the transcript to `path` and clears it, whether or not the write succeeded.
    pub fn flush_to<S: Storage>(&mut self, storage: &S, path: &str) -> Result<usize> {
        let count = self.entries.len();
        let written = storage.write_file(path, &self.render());
        self.clear();
        written.map(|_| count)
    }
}

impl std::fmt::Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
