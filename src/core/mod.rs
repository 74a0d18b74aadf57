pub mod policy;
pub mod registration;
pub mod report;

pub use crate::domain::model::{Course, Enrollment, Payment, Student};
pub use crate::domain::ports::RegistrationService;
pub use crate::utils::error::{RegistrationError, Result};
