use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use staffhq_compensation::ResolvedComponent;
use staffhq_core::{DomainError, DomainResult, TenantId, UserId};

use crate::profile::SalaryProfile;

/// A payroll period: one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    pub year: i32,
    pub month: u32,
}

impl PayPeriod {
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(format!(
                "invalid month: {month}. Must be between 1 and 12"
            )));
        }
        Ok(Self { year, month })
    }
}

impl core::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One generated payslip: a frozen copy of the breakdown for one period.
///
/// Payslips are snapshots by design; later edits to the salary profile do not
/// rewrite already-issued slips (re-running the period does).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub employee_id: UserId,
    pub period: PayPeriod,
    pub components: Vec<ResolvedComponent>,
    pub basic_salary: f64,
    pub gross_salary: f64,
    pub pf_employee: f64,
    pub pf_employer: f64,
    pub professional_tax: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
    pub generated_at: DateTime<Utc>,
}

/// Resolve `profile` and freeze the result into a payslip for `period`.
pub fn generate_payslip(profile: &SalaryProfile, period: PayPeriod, now: DateTime<Utc>) -> Payslip {
    let breakdown = profile.breakdown();

    Payslip {
        id: Uuid::now_v7(),
        tenant_id: profile.tenant_id,
        employee_id: profile.employee_id,
        period,
        components: breakdown.components,
        basic_salary: breakdown.basic_salary,
        gross_salary: breakdown.gross_salary,
        pf_employee: breakdown.pf_employee,
        pf_employer: breakdown.pf_employer,
        professional_tax: breakdown.professional_tax,
        total_deductions: breakdown.total_deductions,
        net_salary: breakdown.net_salary,
        generated_at: now,
    }
}
