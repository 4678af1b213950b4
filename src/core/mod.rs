pub mod card_file;
pub mod command;
pub mod grading;
pub mod session;
pub mod store;
pub mod transcript;

pub use crate::domain::model::{Card, CardRecord, HardestCards, Verdict};
pub use crate::domain::ports::{Clock, ConfigProvider, Console, Storage};
pub use crate::utils::error::Result;
