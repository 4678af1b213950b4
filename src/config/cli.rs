use crate::core::{Clock, Console, Storage};
use crate::utils::error::{FlashcardError, Result};
use chrono::{Local, NaiveTime};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Files on local disk. Relative paths resolve against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path);
        match fs::read_to_string(&full_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(FlashcardError::ParseError {
                line: 0,
                reason: format!("{} is not valid UTF-8", full_path.display()),
            }),
            Err(e) => {
                tracing::debug!("Cannot open {}: {}", full_path.display(), e);
                Err(FlashcardError::FileNotFound {
                    path: path.to_string(),
                })
            }
        }
    }

    fn write_file(&self, path: &str, data: &str) -> Result<()> {
        fs::write(self.resolve(path), data).map_err(|source| FlashcardError::WriteFailure {
            path: path.to_string(),
            source,
        })
    }
}

/// Line-oriented console over any reader/writer pair.
pub struct StdConsole<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        // Undecodable bytes become U+FFFD instead of ending the session.
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }

    fn print_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("cards.txt", "a:1:0\n").unwrap();
        assert_eq!(storage.read_file("cards.txt").unwrap(), "a:1:0\n");
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.read_file("nope.txt").unwrap_err();
        assert!(matches!(err, FlashcardError::FileNotFound { ref path } if path == "nope.txt"));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.write_file("no/such/dir/cards.txt", "").unwrap_err();
        assert!(matches!(err, FlashcardError::WriteFailure { .. }));
    }

    #[test]
    fn test_console_strips_line_endings() {
        let input = "add\r\nhardest card\nlast";
        let mut console = StdConsole::new(input.as_bytes(), Vec::new());

        assert_eq!(console.read_line().unwrap().as_deref(), Some("add"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("hardest card"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(console.read_line().unwrap(), None);

        console.print_line("Bye bye!").unwrap();
        assert_eq!(console.into_writer(), b"Bye bye!\n");
    }

    #[test]
    fn test_console_tolerates_invalid_utf8() {
        let input: &[u8] = b"add\nca\xfft\r\nmeow\n";
        let mut console = StdConsole::new(input, Vec::new());

        assert_eq!(console.read_line().unwrap().as_deref(), Some("add"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("ca\u{FFFD}t"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("meow"));
        assert_eq!(console.read_line().unwrap(), None);
    }
}
