use crate::utils::error::Result;
use chrono::NaiveTime;

pub trait Console {
    /// Reads one line without its terminator. `None` once input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>>;
    fn print_line(&mut self, line: &str) -> Result<()>;
}

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<String>;
    fn write_file(&self, path: &str, data: &str) -> Result<()>;
}

pub trait Clock {
    fn now(&self) -> NaiveTime;
}

pub trait ConfigProvider {
    fn import_path(&self) -> Option<&str>;
    fn export_path(&self) -> Option<&str>;
}
