pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::{LocalClock, LocalStorage, StdConsole};
pub use config::{toml_config::TomlConfig, CliConfig};

pub use core::{session::SessionController, store::CardStore, transcript::Transcript};
pub use utils::error::{FlashcardError, Result};
