pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::{menu::Menu, session::Session};
pub use crate::config::LedgerConfig;
pub use crate::core::{
    policy::{OverpaymentPolicy, PaymentPolicy},
    registration::RegistrationSystem,
    report::LedgerReport,
    RegistrationService,
};
pub use crate::utils::error::{LedgerError, RegistrationError, Result};
