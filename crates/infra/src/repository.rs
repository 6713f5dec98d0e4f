//! Persistence interfaces (repository pattern).
//!
//! Every read/write on tenant-scoped data takes the caller's `TenantId` and
//! filters by it inside the store; a record in another tenant is
//! indistinguishable from an absent one at this layer (`NotFound`). The gate
//! alone decides when knowing the owning tenant justifies a `Forbidden`.

use chrono::NaiveDate;

use staffhq_auth::Role;
use staffhq_core::{DomainResult, LeaveRequestId, TenantId, UserId};
use staffhq_employees::{AttendanceDay, EmployeeProfile, LeaveRequest};
use staffhq_payroll::{PayPeriod, Payslip, SalaryProfile};
use staffhq_tenancy::Company;

/// User/employee lookups and mutations.
///
/// `get_user` is deliberately unscoped: the authentication middleware uses it
/// to resolve a verified token's subject *before* any tenant is known.
pub trait UserDirectory: Send + Sync {
    fn get_user(&self, id: UserId) -> Option<EmployeeProfile>;
    fn find_by_email(&self, email: &str) -> Option<EmployeeProfile>;
    fn list(&self, tenant_id: TenantId) -> Vec<EmployeeProfile>;
    fn employee_count(&self, tenant_id: TenantId) -> usize;
    fn active_admin_count(&self, tenant_id: TenantId) -> usize;

    /// Insert a new employee; duplicate email is a conflict.
    fn insert(&self, profile: EmployeeProfile) -> DomainResult<()>;

    /// Replace an existing tenant-scoped record.
    fn update(&self, tenant_id: TenantId, profile: EmployeeProfile) -> DomainResult<EmployeeProfile>;

    /// Change `target`'s role, enforcing the last-admin invariant *atomically*:
    /// the active-admin count is read under the same lock that applies the
    /// write, so two concurrent demotions cannot both pass the check.
    fn change_role(
        &self,
        tenant_id: TenantId,
        target: UserId,
        new_role: Role,
    ) -> DomainResult<EmployeeProfile>;

    /// Activate or deactivate `target`, with the same atomic last-admin guard.
    fn set_active(
        &self,
        tenant_id: TenantId,
        target: UserId,
        is_active: bool,
    ) -> DomainResult<EmployeeProfile>;
}

/// Company (tenant) records.
pub trait CompanyRepository: Send + Sync {
    fn get(&self, id: TenantId) -> Option<Company>;
    /// Insert a new company; duplicate name is a conflict.
    fn insert(&self, company: Company) -> DomainResult<()>;
}

/// Attendance days, keyed by (employee, date) within a tenant.
pub trait AttendanceRepository: Send + Sync {
    fn get_day(&self, tenant_id: TenantId, employee_id: UserId, date: NaiveDate) -> Option<AttendanceDay>;
    fn upsert_day(&self, day: AttendanceDay);
    fn list_for(&self, tenant_id: TenantId, employee_id: UserId) -> Vec<AttendanceDay>;
}

/// Leave requests.
pub trait LeaveRepository: Send + Sync {
    fn get(&self, tenant_id: TenantId, id: LeaveRequestId) -> Option<LeaveRequest>;
    fn insert(&self, request: LeaveRequest);
    fn update(&self, request: LeaveRequest) -> DomainResult<()>;
    fn list_for(&self, tenant_id: TenantId, employee_id: UserId) -> Vec<LeaveRequest>;
    fn list_all(&self, tenant_id: TenantId) -> Vec<LeaveRequest>;
}

/// Stored salary configuration per employee.
pub trait SalaryProfileRepository: Send + Sync {
    fn get(&self, tenant_id: TenantId, employee_id: UserId) -> Option<SalaryProfile>;
    fn upsert(&self, profile: SalaryProfile);
    fn list(&self, tenant_id: TenantId) -> Vec<SalaryProfile>;
}

/// Generated payslips.
pub trait PayslipRepository: Send + Sync {
    /// Replace every slip for `period` in one call (re-running a payroll run
    /// regenerates the period rather than appending duplicates).
    fn replace_period(&self, tenant_id: TenantId, period: PayPeriod, slips: Vec<Payslip>);
    fn list_for(&self, tenant_id: TenantId, employee_id: UserId) -> Vec<Payslip>;
    fn list_period(&self, tenant_id: TenantId, period: PayPeriod) -> Vec<Payslip>;
}
