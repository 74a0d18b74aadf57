use crate::app::menu::Menu;
use crate::config::LedgerConfig;
use crate::core::registration::RegistrationSystem;
use crate::core::report::LedgerReport;
use crate::domain::ports::RegistrationService;
use crate::utils::error::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// One interactive run: builds the ledger from config, drives the menu, optionally writes a report.
pub struct Session {
    system: RegistrationSystem,
    currency: String,
    report_path: Option<PathBuf>,
}

impl Session {
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        let mut system = RegistrationSystem::with_policy(config.payment_policy());

        for entry in &config.catalog {
            system.add_course(&entry.id, &entry.name, entry.cost)?;
        }
        if !config.catalog.is_empty() {
            tracing::info!("📚 Seeded {} course(s) from config", config.catalog.len());
        }

        Ok(Self {
            system,
            currency: config.currency_symbol().to_string(),
            report_path: None,
        })
    }

    pub fn with_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    pub fn system(&self) -> &RegistrationSystem {
        &self.system
    }

    /// Returns the report path when one was written.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: W) -> Result<Option<PathBuf>> {
        Menu::new(&mut self.system, input, output)
            .with_currency(self.currency.clone())
            .run()?;

        match &self.report_path {
            Some(path) => {
                LedgerReport::from_system(&self.system).write_to(path)?;
                Ok(Some(path.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogEntry;
    use crate::utils::error::{LedgerError, RegistrationError};
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn entry(id: &str, name: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: name.to_string(),
            cost: dec!(100),
        }
    }

    #[test]
    fn test_catalog_is_seeded_in_order() {
        let mut config = LedgerConfig::default();
        config.catalog = vec![entry("C2", "History"), entry("C1", "Math")];

        let session = Session::new(&config).unwrap();
        let ids: Vec<&str> = session
            .system()
            .list_courses()
            .iter()
            .map(|c| c.id())
            .collect();
        assert_eq!(ids, vec!["C2", "C1"]);
    }

    #[test]
    fn test_duplicate_catalog_ids_fail_startup() {
        let mut config = LedgerConfig::default();
        config.catalog = vec![entry("C1", "Math"), entry("C1", "Math again")];

        let err = Session::new(&config).err().unwrap();
        assert!(matches!(
            err,
            LedgerError::Registration(RegistrationError::DuplicateCourseId { .. })
        ));
    }

    #[test]
    fn test_run_without_report_returns_none() {
        let mut session = Session::new(&LedgerConfig::default()).unwrap();
        let mut out = Vec::new();
        let written = session.run(Cursor::new("9\n"), &mut out).unwrap();
        assert!(written.is_none());
    }
}
