use anyhow::Context;
use flashcards::utils::{logger, validation::Validate};
use flashcards::{
    CliConfig, LocalClock, LocalStorage, SessionController, StdConsole, TomlConfig, Transcript,
};

fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::from_args(std::env::args());

    // 載入設定檔，命令列參數優先
    if let Some(path) = config.config_file.clone() {
        let settings = TomlConfig::from_file(&path)
            .with_context(|| format!("Failed to load config file '{}'", path))?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in '{}'", path))?;
        config = config.merge(&settings);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_level.as_deref());

    tracing::info!("Starting flashcards session");
    tracing::debug!("CLI config: {:?}", config);

    let mut session = SessionController::new(
        StdConsole::stdio(),
        LocalStorage::default(),
        config,
        Transcript::new(LocalClock),
    );

    session.run().context("Console I/O failed")?;

    tracing::info!("Session finished with {} cards", session.store().len());
    Ok(())
}
