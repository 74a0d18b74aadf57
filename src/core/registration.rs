use crate::core::policy::{OverpaymentPolicy, PaymentPolicy};
use crate::domain::model::{Course, Enrollment, Student};
use crate::domain::ports::RegistrationService;
use crate::utils::error::RegistrationError;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Owns every course and student and enforces the cross-entity rules.
///
/// Both collections keep insertion order; the maps only index into them.
#[derive(Debug, Default)]
pub struct RegistrationSystem {
    courses: Vec<Arc<Course>>,
    course_index: HashMap<String, usize>,
    students: Vec<Student>,
    student_index: HashMap<String, usize>,
    policy: PaymentPolicy,
}

impl RegistrationSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PaymentPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &PaymentPolicy {
        &self.policy
    }

    fn student_mut(&mut self, student_id: &str) -> Result<&mut Student, RegistrationError> {
        match self.student_index.get(student_id) {
            Some(&idx) => Ok(&mut self.students[idx]),
            None => Err(RegistrationError::StudentNotFound {
                student_id: student_id.to_string(),
            }),
        }
    }

    fn find_student(&self, student_id: &str) -> Result<&Student, RegistrationError> {
        self.student(student_id)
            .ok_or_else(|| RegistrationError::StudentNotFound {
                student_id: student_id.to_string(),
            })
    }

    fn find_course(&self, course_id: &str) -> Result<&Arc<Course>, RegistrationError> {
        self.course_index
            .get(course_id)
            .map(|&idx| &self.courses[idx])
            .ok_or_else(|| RegistrationError::CourseNotFound {
                course_id: course_id.to_string(),
            })
    }
}

impl RegistrationService for RegistrationSystem {
    fn add_course(
        &mut self,
        course_id: &str,
        name: &str,
        cost: Decimal,
    ) -> Result<&Course, RegistrationError> {
        if cost.is_sign_negative() && !cost.is_zero() {
            tracing::warn!(course_id, %cost, "rejected course with negative cost");
            return Err(RegistrationError::InvalidAmount {
                field: "Course cost".to_string(),
                value: cost,
            });
        }
        if self.course_index.contains_key(course_id) {
            tracing::warn!(course_id, "duplicate course id");
            return Err(RegistrationError::DuplicateCourseId {
                course_id: course_id.to_string(),
            });
        }

        let idx = self.courses.len();
        self.courses.push(Arc::new(Course::new(course_id, name, cost)));
        self.course_index.insert(course_id.to_string(), idx);
        tracing::info!(course_id, course_name = name, %cost, "course added");
        Ok(self.courses[idx].as_ref())
    }

    fn register_student(
        &mut self,
        student_id: &str,
        name: &str,
        email: &str,
    ) -> Result<&Student, RegistrationError> {
        if self.student_index.contains_key(student_id) {
            tracing::warn!(student_id, "duplicate student id");
            return Err(RegistrationError::DuplicateStudentId {
                student_id: student_id.to_string(),
            });
        }

        let idx = self.students.len();
        self.students.push(Student::new(student_id, name, email.trim()));
        self.student_index.insert(student_id.to_string(), idx);
        tracing::info!(student_id, student_name = name, "student registered");
        Ok(&self.students[idx])
    }

    fn enroll_in_course(
        &mut self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Enrollment, RegistrationError> {
        // 先查學生再查課程，錯誤順序與選單提示一致
        self.find_student(student_id)?;
        let course = Arc::clone(self.find_course(course_id)?);

        let student = self.student_mut(student_id)?;
        if let Err(e) = student.enroll(Arc::clone(&course)) {
            tracing::warn!(student_id, course_id, error = %e, "enrollment rejected");
            return Err(e);
        }

        tracing::info!(student_id, course_id, balance = %student.balance(), "student enrolled");
        Ok(Enrollment {
            student_name: student.name().to_string(),
            course_name: course.name().to_string(),
            balance: student.balance(),
        })
    }

    fn calculate_payment(
        &mut self,
        student_id: &str,
        amount: Decimal,
    ) -> Result<Decimal, RegistrationError> {
        let policy = self.policy;
        let student = self.student_mut(student_id)?;
        let balance = student.balance();

        if amount.is_sign_negative() && !amount.is_zero() {
            tracing::warn!(student_id, %amount, "rejected negative payment");
            return Err(RegistrationError::InvalidAmount {
                field: "Payment amount".to_string(),
                value: amount,
            });
        }

        let minimum = policy.minimum_due(balance);
        if amount < minimum {
            tracing::warn!(student_id, %amount, %minimum, "payment below minimum");
            return Err(RegistrationError::InsufficientPayment {
                minimum,
                offered: amount,
            });
        }

        if policy.overpayment == OverpaymentPolicy::Reject && amount > balance {
            tracing::warn!(student_id, %amount, %balance, "overpayment rejected");
            return Err(RegistrationError::Overpayment {
                balance,
                offered: amount,
            });
        }

        let remaining = match student.record_payment(amount, Utc::now()) {
            Ok(remaining) => remaining,
            Err(e) => {
                tracing::warn!(student_id, %amount, "payment total out of range");
                return Err(e);
            }
        };
        tracing::info!(student_id, %amount, %remaining, "payment received");
        Ok(remaining)
    }

    fn check_balance(&self, student_id: &str) -> Result<Decimal, RegistrationError> {
        let balance = self.find_student(student_id)?.balance();
        tracing::debug!(student_id, %balance, "balance lookup");
        Ok(balance)
    }

    fn list_courses(&self) -> &[Arc<Course>] {
        &self.courses
    }

    fn list_students(&self) -> &[Student] {
        &self.students
    }

    fn students_in_course(&self, course_id: &str) -> Result<Vec<String>, RegistrationError> {
        let course = self.find_course(course_id)?;
        let names: Vec<String> = self
            .students
            .iter()
            .filter(|s| s.is_enrolled_in(course.id()))
            .map(|s| s.name().to_string())
            .collect();
        tracing::debug!(course_id, count = names.len(), "course roster lookup");
        Ok(names)
    }

    fn student(&self, student_id: &str) -> Option<&Student> {
        self.student_index
            .get(student_id)
            .map(|&idx| &self.students[idx])
    }

    fn course(&self, course_id: &str) -> Option<&Course> {
        self.find_course(course_id).ok().map(|c| c.as_ref())
    }
}
