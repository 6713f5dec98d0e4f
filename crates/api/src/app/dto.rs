//! Request/response DTOs and JSON mapping helpers.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};

use staffhq_compensation::{Breakdown, SalaryComponent};
use staffhq_employees::{AttendanceDay, EmployeeProfile, LeaveKind, LeaveRequest};
use staffhq_payroll::Payslip;
use staffhq_tenancy::Company;

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterCompanyRequest {
    pub company_name: String,
    pub company_email: Option<String>,
    pub admin_first_name: String,
    pub admin_last_name: String,
    pub admin_email: String,
    /// Defaults to `basic`.
    pub subscription_plan: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Defaults to `employee`.
    pub role: Option<String>,
    pub designation: Option<String>,
    pub date_of_joining: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub designation: Option<String>,
    /// Carrying a role in an update puts the caller through `can_manage`.
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct SalaryUpdateRequest {
    /// The field present drives the wage sync: monthly wins when both appear
    /// (it is the canonical input).
    pub monthly_wage: Option<f64>,
    pub yearly_wage: Option<f64>,
    pub components: Option<Vec<SalaryComponent>>,
    pub pf_rate: Option<f64>,
    pub professional_tax: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitLeaveRequest {
    pub kind: LeaveKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveDecision {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize)]
pub struct DecideLeaveRequest {
    pub decision: LeaveDecision,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PayrollRunRequest {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub employee_id: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response mapping
// ─────────────────────────────────────────────────────────────────────────────

pub fn employee_to_json(e: &EmployeeProfile) -> Value {
    json!({
        "id": e.user_id.to_string(),
        "first_name": e.first_name,
        "last_name": e.last_name,
        "email": e.email,
        "role": e.role.as_str(),
        "designation": e.designation,
        "date_of_joining": e.date_of_joining,
        "is_active": e.is_active,
    })
}

pub fn company_to_json(c: &Company, employee_count: usize) -> Value {
    json!({
        "id": c.id.to_string(),
        "name": c.name,
        "email": c.email,
        "plan": c.plan.as_str(),
        "max_employees": c.max_employees(),
        "employee_count": employee_count,
        "employees_remaining": c.max_employees().saturating_sub(employee_count),
        "is_active": c.is_active,
    })
}

pub fn breakdown_to_json(b: &Breakdown) -> Value {
    json!({
        "components": b.components,
        "basic_salary": b.basic_salary,
        "gross_salary": b.gross_salary,
        "pf_employee": b.pf_employee,
        "pf_employer": b.pf_employer,
        "professional_tax": b.professional_tax,
        "total_deductions": b.total_deductions,
        "net_salary": b.net_salary,
        "exceeds_wage": b.exceeds_wage,
    })
}

pub fn attendance_to_json(d: &AttendanceDay) -> Value {
    json!({
        "employee_id": d.employee_id.to_string(),
        "date": d.date,
        "check_in": d.check_in,
        "check_out": d.check_out,
        "hours_worked": d.hours_worked,
    })
}

pub fn leave_to_json(r: &LeaveRequest) -> Value {
    json!({
        "id": r.id.to_string(),
        "employee_id": r.employee_id.to_string(),
        "kind": r.kind,
        "start_date": r.start_date,
        "end_date": r.end_date,
        "days_requested": r.days_requested,
        "reason": r.reason,
        "status": r.status,
        "decision_notes": r.decision_notes,
    })
}

pub fn payslip_to_json(s: &Payslip) -> Value {
    json!({
        "id": s.id.to_string(),
        "employee_id": s.employee_id.to_string(),
        "period": s.period.to_string(),
        "components": s.components,
        "basic_salary": s.basic_salary,
        "gross_salary": s.gross_salary,
        "pf_employee": s.pf_employee,
        "pf_employer": s.pf_employer,
        "professional_tax": s.professional_tax,
        "total_deductions": s.total_deductions,
        "net_salary": s.net_salary,
        "generated_at": s.generated_at,
    })
}
