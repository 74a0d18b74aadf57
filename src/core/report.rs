use crate::core::policy::OverpaymentPolicy;
use crate::core::registration::RegistrationSystem;
use crate::domain::model::Payment;
use crate::domain::ports::RegistrationService;
use crate::utils::error::Result;
use crate::utils::money::saturating_total;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSummary {
    pub id: String,
    pub name: String,
    pub cost: Decimal,
    pub enrolled_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub courses: Vec<String>,
    pub total_fee: Decimal,
    pub total_paid: Decimal,
    pub balance: Decimal,
    pub payments: Vec<Payment>,
}

/// Flat CSV row; `courses` is joined with `;`.
#[derive(Debug, Serialize)]
struct RosterRow<'a> {
    id: &'a str,
    name: &'a str,
    email: &'a str,
    courses: String,
    total_fee: Decimal,
    total_paid: Decimal,
    balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerReport {
    pub generated_at: DateTime<Utc>,
    pub minimum_payment_ratio: Decimal,
    pub overpayment: OverpaymentPolicy,
    pub courses: Vec<CourseSummary>,
    pub students: Vec<StudentSummary>,
    pub total_billed: Decimal,
    pub total_collected: Decimal,
    pub total_outstanding: Decimal,
}

impl LedgerReport {
    pub fn from_system(system: &RegistrationSystem) -> Self {
        let students: Vec<StudentSummary> = system
            .list_students()
            .iter()
            .map(|s| StudentSummary {
                id: s.id().to_string(),
                name: s.name().to_string(),
                email: s.email().to_string(),
                courses: s
                    .enrolled_courses()
                    .iter()
                    .map(|c| c.id().to_string())
                    .collect(),
                total_fee: s.total_fee(),
                total_paid: s.total_paid(),
                balance: s.balance(),
                payments: s.payments().to_vec(),
            })
            .collect();

        let courses = system
            .list_courses()
            .iter()
            .map(|c| CourseSummary {
                id: c.id().to_string(),
                name: c.name().to_string(),
                cost: c.cost(),
                enrolled_count: students
                    .iter()
                    .filter(|s| s.courses.iter().any(|id| id == c.id()))
                    .count(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            minimum_payment_ratio: system.policy().minimum_ratio,
            overpayment: system.policy().overpayment,
            courses,
            total_billed: saturating_total(students.iter().map(|s| s.total_fee)),
            total_collected: saturating_total(students.iter().map(|s| s.total_paid)),
            total_outstanding: saturating_total(students.iter().map(|s| s.balance)),
            students,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Student roster as CSV, one row per student.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for s in &self.students {
            writer.serialize(RosterRow {
                id: &s.id,
                name: &s.name,
                email: &s.email,
                courses: s.courses.join(";"),
                total_fee: s.total_fee,
                total_paid: s.total_paid,
                balance: s.balance,
            })?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Writes CSV for a `.csv` path, pretty JSON otherwise. Parent directories are created.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        let content = if is_csv { self.to_csv()? } else { self.to_json()? };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        tracing::info!("📁 Report written to {}", path.display());
        Ok(())
    }
}
