pub mod toml_config;

pub use toml_config::{CatalogEntry, LedgerConfig};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "course-registry")]
#[command(about = "Interactive course registration and tuition ledger")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with payment policy, display and seed catalog")]
    pub config: Option<String>,

    #[arg(long, help = "Write a JSON (or .csv roster) report here on exit")]
    pub report: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file when one was given, defaults otherwise.
    pub fn load_ledger_config(&self) -> crate::utils::error::Result<LedgerConfig> {
        match &self.config {
            Some(path) => LedgerConfig::from_file(path),
            None => Ok(LedgerConfig::default()),
        }
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        if let Some(path) = &self.config {
            crate::utils::validation::validate_not_empty("config", path)?;
        }
        if let Some(path) = &self.report {
            crate::utils::validation::validate_not_empty("report", path)?;
        }
        Ok(())
    }
}
