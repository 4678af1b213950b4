pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

/// Flags that take a value and are accepted with one or two leading dashes.
const VALUE_FLAGS: [&str; 4] = ["import", "export", "config", "log-level"];
/// Flags that switch something on. They still occupy a whole pair.
const SWITCHES: [&str; 2] = ["-v", "--verbose"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "flashcards", args_override_self = true))]
#[cfg_attr(
    feature = "cli",
    command(about = "Interactive flashcard trainer with import/export and mistake statistics")
)]
pub struct CliConfig {
    /// Card file loaded before the first prompt
    #[cfg_attr(feature = "cli", arg(long = "import", value_name = "PATH"))]
    pub import_path: Option<String>,

    /// Card file written when the session exits
    #[cfg_attr(feature = "cli", arg(long = "export", value_name = "PATH"))]
    pub export_path: Option<String>,

    /// TOML settings file
    #[cfg_attr(feature = "cli", arg(long = "config", value_name = "PATH"))]
    pub config_file: Option<String>,

    /// Diagnostic level for stderr output (trace, debug, info, warn, error)
    #[cfg_attr(feature = "cli", arg(long = "log-level", value_name = "LEVEL"))]
    pub log_level: Option<String>,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Parses process arguments, accepting the single-dash `-import`/`-export` spelling.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        <Self as clap::Parser>::parse_from(normalize_args(args))
    }
}

impl CliConfig {
    /// Fills anything not given on the command line from the settings file.
    pub fn merge(mut self, settings: &TomlConfig) -> Self {
        if self.import_path.is_none() {
            self.import_path = settings.import_path().map(str::to_owned);
        }
        if self.export_path.is_none() {
            self.export_path = settings.export_path().map(str::to_owned);
        }
        if self.log_level.is_none() {
            self.log_level = settings.log_level().map(str::to_owned);
        }
        self
    }
}

/// Rewrites raw arguments into the `--flag value` form clap expects.
///
/// After the program name, tokens are read strictly two at a time as
/// `flag value`. Unknown pairs and a dangling last token are dropped. A
/// switch from [`SWITCHES`] at the start of a pair consumes the pair.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut normalized: Vec<String> = args.next().into_iter().collect();
    let rest: Vec<String> = args.collect();

    for pair in rest.chunks(2) {
        let flag = pair[0].as_str();
        if SWITCHES.contains(&flag) {
            normalized.push("--verbose".to_string());
            continue;
        }

        let name = flag.trim_start_matches('-');
        if let [_, value] = pair {
            if flag.starts_with('-') && VALUE_FLAGS.contains(&name) {
                normalized.push(format!("--{}", name));
                normalized.push(value.clone());
            }
        }
    }

    normalized
}

impl ConfigProvider for CliConfig {
    fn import_path(&self) -> Option<&str> {
        self.import_path.as_deref()
    }

    fn export_path(&self) -> Option<&str> {
        self.export_path.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_optional_path("import", self.import_path())?;
        validation::validate_optional_path("export", self.export_path())?;
        validation::validate_optional_path("config", self.config_file.as_deref())?;
        if let Some(level) = &self.log_level {
            validation::validate_log_level("log-level", level)?;
        }
        Ok(())
    }
}
