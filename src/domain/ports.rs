use crate::domain::model::{Course, Enrollment, Student};
use crate::utils::error::RegistrationError;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Operations the menu front-end drives. `RegistrationSystem` is the in-process implementation.
pub trait RegistrationService {
    fn add_course(
        &mut self,
        course_id: &str,
        name: &str,
        cost: Decimal,
    ) -> Result<&Course, RegistrationError>;

    fn register_student(
        &mut self,
        student_id: &str,
        name: &str,
        email: &str,
    ) -> Result<&Student, RegistrationError>;

    fn enroll_in_course(
        &mut self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Enrollment, RegistrationError>;

    /// Applies a payment and returns the remaining balance.
    fn calculate_payment(
        &mut self,
        student_id: &str,
        amount: Decimal,
    ) -> Result<Decimal, RegistrationError>;

    fn check_balance(&self, student_id: &str) -> Result<Decimal, RegistrationError>;

    fn list_courses(&self) -> &[Arc<Course>];

    fn list_students(&self) -> &[Student];

    fn students_in_course(&self, course_id: &str) -> Result<Vec<String>, RegistrationError>;

    fn student(&self, student_id: &str) -> Option<&Student>;

    fn course(&self, course_id: &str) -> Option<&Course>;
}
