use crate::utils::error::RegistrationError;
use crate::utils::money::saturating_total;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A course on offer. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: String,
    name: String,
    cost: Decimal,
}

impl Course {
    pub(crate) fn new(id: impl Into<String>, name: impl Into<String>, cost: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> Decimal {
        self.cost
    }
}

/// One accepted tuition payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Student {
    id: String,
    name: String,
    email: String,
    enrolled: Vec<Arc<Course>>,
    balance: Decimal,
    payments: Vec<Payment>,
}

impl Student {
    pub(crate) fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            enrolled: Vec::new(),
            balance: Decimal::ZERO,
            payments: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Amount currently owed.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn enrolled_courses(&self) -> &[Arc<Course>] {
        &self.enrolled
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn is_enrolled_in(&self, course_id: &str) -> bool {
        self.enrolled.iter().any(|c| c.id() == course_id)
    }

    /// Adds the course and bills its cost once. Nothing changes when the bill would overflow.
    pub fn enroll(&mut self, course: Arc<Course>) -> Result<(), RegistrationError> {
        if self.is_enrolled_in(course.id()) {
            return Err(RegistrationError::DuplicateEnrollment {
                student_name: self.name.clone(),
                course_name: course.name().to_string(),
            });
        }
        let out_of_range = || RegistrationError::AmountOutOfRange {
            field: "Tuition balance".to_string(),
        };
        let balance = self
            .balance
            .checked_add(course.cost())
            .ok_or_else(out_of_range)?;
        // 已計費總額也必須可表示，total_fee 才不會溢位
        self.total_fee()
            .checked_add(course.cost())
            .ok_or_else(out_of_range)?;

        self.balance = balance;
        self.enrolled.push(course);
        Ok(())
    }

    /// Sum of everything billed so far, independent of payments.
    pub fn total_fee(&self) -> Decimal {
        saturating_total(self.enrolled.iter().map(|c| c.cost()))
    }

    pub fn total_paid(&self) -> Decimal {
        saturating_total(self.payments.iter().map(|p| p.amount))
    }

    pub(crate) fn record_payment(
        &mut self,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Decimal, RegistrationError> {
        let out_of_range = || RegistrationError::AmountOutOfRange {
            field: "Payment total".to_string(),
        };
        let balance = self.balance.checked_sub(amount).ok_or_else(out_of_range)?;
        self.total_paid()
            .checked_add(amount)
            .ok_or_else(out_of_range)?;

        self.balance = balance;
        self.payments.push(Payment {
            amount,
            balance_after: balance,
            received_at: at,
        });
        Ok(balance)
    }
}

/// Receipt returned by a successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub student_name: String,
    pub course_name: String,
    pub balance: Decimal,
}
