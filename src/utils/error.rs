use rust_decimal::Decimal;
use thiserror::Error;

/// Recoverable, user-facing failures raised by the registration core.
///
/// None of these are fatal: the caller reports the message and lets the user retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Course ID already exists: {course_id}")]
    DuplicateCourseId { course_id: String },

    #[error("Student ID is already registered: {student_id}")]
    DuplicateStudentId { student_id: String },

    #[error("{student_name} is already enrolled in {course_name}")]
    DuplicateEnrollment {
        student_name: String,
        course_name: String,
    },

    #[error("Student ID not found: {student_id}")]
    StudentNotFound { student_id: String },

    #[error("Course ID not found: {course_id}")]
    CourseNotFound { course_id: String },

    #[error("A minimum payment of {minimum:.2} is required (offered {offered:.2})")]
    InsufficientPayment { minimum: Decimal, offered: Decimal },

    #[error("Payment of {offered:.2} exceeds the outstanding balance of {balance:.2}")]
    Overpayment { balance: Decimal, offered: Decimal },

    #[error("{field} cannot be negative: {value}")]
    InvalidAmount { field: String, value: Decimal },

    #[error("{field} would exceed the largest supported amount")]
    AmountOutOfRange { field: String },
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl LedgerError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            LedgerError::Registration(e) => e.to_string(),
            LedgerError::IoError(e) => format!("File access failed: {}", e),
            LedgerError::CsvError(_) | LedgerError::SerializationError(_) => {
                format!("Could not write the report: {}", self)
            }
            LedgerError::ConfigValidationError { .. }
            | LedgerError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LedgerError::Registration(_) => "Check the entered IDs and amounts and try again",
            LedgerError::IoError(_) => "Check that the path exists and is writable",
            LedgerError::CsvError(_) | LedgerError::SerializationError(_) => {
                "Try a different report path or format"
            }
            LedgerError::ConfigValidationError { .. }
            | LedgerError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and restart"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
