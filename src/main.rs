use anyhow::Context;
use clap::Parser;
use course_registry::utils::{logger, validation::Validate};
use course_registry::{CliConfig, Session};
use std::io;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting course-registry");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    let ledger_config = match config.validate().and_then(|_| config.load_ledger_config()) {
        Ok(ledger_config) => ledger_config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if let Err(e) = ledger_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let mut session = Session::new(&ledger_config).context("failed to seed course catalog")?;
    if let Some(path) = &config.report {
        session = session.with_report(path);
    }

    let stdin = io::stdin();
    let written = session
        .run(stdin.lock(), io::stdout())
        .context("menu session failed")?;

    if let Some(path) = written {
        tracing::info!("📁 Report saved to: {}", path.display());
        println!("📁 Report saved to: {}", path.display());
    }

    Ok(())
}
