//! In-memory stores for tests and the default server wiring.
//!
//! Each store is a `RwLock`ed map; tenant filtering happens inside the lock.
//! Lock poisoning is recovered (`into_inner`) — these stores hold no
//! invariants that a panicked writer could leave half-applied that the domain
//! layer does not re-validate.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use staffhq_auth::{Role, guard_last_admin};
use staffhq_core::{DomainError, DomainResult, LeaveRequestId, TenantId, UserId};
use staffhq_employees::{AttendanceDay, EmployeeProfile, LeaveRequest};
use staffhq_payroll::{PayPeriod, Payslip, SalaryProfile};
use staffhq_tenancy::Company;

use crate::repository::{
    AttendanceRepository, CompanyRepository, LeaveRepository, PayslipRepository,
    SalaryProfileRepository, UserDirectory,
};

fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

// ─────────────────────────────────────────────────────────────────────────────
// User directory
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<HashMap<UserId, EmployeeProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn active_admins_locked(map: &HashMap<UserId, EmployeeProfile>, tenant_id: TenantId) -> usize {
        map.values()
            .filter(|p| p.tenant_id == tenant_id && p.role == Role::Admin && p.is_active)
            .count()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn get_user(&self, id: UserId) -> Option<EmployeeProfile> {
        read_lock(&self.inner).get(&id).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<EmployeeProfile> {
        read_lock(&self.inner)
            .values()
            .find(|p| p.email == email)
            .cloned()
    }

    fn list(&self, tenant_id: TenantId) -> Vec<EmployeeProfile> {
        let mut out: Vec<_> = read_lock(&self.inner)
            .values()
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        out
    }

    fn employee_count(&self, tenant_id: TenantId) -> usize {
        read_lock(&self.inner)
            .values()
            .filter(|p| p.tenant_id == tenant_id)
            .count()
    }

    fn active_admin_count(&self, tenant_id: TenantId) -> usize {
        Self::active_admins_locked(&read_lock(&self.inner), tenant_id)
    }

    fn insert(&self, profile: EmployeeProfile) -> DomainResult<()> {
        let mut map = write_lock(&self.inner);
        if map.values().any(|p| p.email == profile.email) {
            return Err(DomainError::conflict(format!(
                "email already registered: {}",
                profile.email
            )));
        }
        map.insert(profile.user_id, profile);
        Ok(())
    }

    fn update(&self, tenant_id: TenantId, profile: EmployeeProfile) -> DomainResult<EmployeeProfile> {
        let mut map = write_lock(&self.inner);
        let existing = map
            .get(&profile.user_id)
            .filter(|p| p.tenant_id == tenant_id)
            .ok_or(DomainError::NotFound)?;

        // The owning tenant is immutable.
        let mut updated = profile;
        updated.tenant_id = existing.tenant_id;
        map.insert(updated.user_id, updated.clone());
        Ok(updated)
    }

    fn change_role(
        &self,
        tenant_id: TenantId,
        target: UserId,
        new_role: Role,
    ) -> DomainResult<EmployeeProfile> {
        let mut map = write_lock(&self.inner);
        let current = map
            .get(&target)
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .ok_or(DomainError::NotFound)?;

        // Count and decide under the same write lock as the mutation.
        let active_admins = Self::active_admins_locked(&map, tenant_id);
        guard_last_admin(current.role, current.is_active, Some(new_role), None, active_admins)?;

        let mut updated = current;
        updated.role = new_role;
        map.insert(target, updated.clone());
        Ok(updated)
    }

    fn set_active(
        &self,
        tenant_id: TenantId,
        target: UserId,
        is_active: bool,
    ) -> DomainResult<EmployeeProfile> {
        let mut map = write_lock(&self.inner);
        let current = map
            .get(&target)
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .ok_or(DomainError::NotFound)?;

        let active_admins = Self::active_admins_locked(&map, tenant_id);
        guard_last_admin(current.role, current.is_active, None, Some(is_active), active_admins)?;

        let mut updated = current;
        updated.is_active = is_active;
        map.insert(target, updated.clone());
        Ok(updated)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Companies
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryCompanyRepository {
    inner: RwLock<HashMap<TenantId, Company>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompanyRepository for InMemoryCompanyRepository {
    fn get(&self, id: TenantId) -> Option<Company> {
        read_lock(&self.inner).get(&id).cloned()
    }

    fn insert(&self, company: Company) -> DomainResult<()> {
        let mut map = write_lock(&self.inner);
        if map.values().any(|c| c.name == company.name) {
            return Err(DomainError::conflict(format!(
                "company name already exists: {}",
                company.name
            )));
        }
        map.insert(company.id, company);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Attendance
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryAttendanceRepository {
    inner: RwLock<HashMap<(TenantId, UserId, NaiveDate), AttendanceDay>>,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttendanceRepository for InMemoryAttendanceRepository {
    fn get_day(&self, tenant_id: TenantId, employee_id: UserId, date: NaiveDate) -> Option<AttendanceDay> {
        read_lock(&self.inner)
            .get(&(tenant_id, employee_id, date))
            .cloned()
    }

    fn upsert_day(&self, day: AttendanceDay) {
        write_lock(&self.inner).insert((day.tenant_id, day.employee_id, day.date), day);
    }

    fn list_for(&self, tenant_id: TenantId, employee_id: UserId) -> Vec<AttendanceDay> {
        let mut out: Vec<_> = read_lock(&self.inner)
            .values()
            .filter(|d| d.tenant_id == tenant_id && d.employee_id == employee_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Leave
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryLeaveRepository {
    inner: RwLock<HashMap<LeaveRequestId, LeaveRequest>>,
}

impl InMemoryLeaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaveRepository for InMemoryLeaveRepository {
    fn get(&self, tenant_id: TenantId, id: LeaveRequestId) -> Option<LeaveRequest> {
        read_lock(&self.inner)
            .get(&id)
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
    }

    fn insert(&self, request: LeaveRequest) {
        write_lock(&self.inner).insert(request.id, request);
    }

    fn update(&self, request: LeaveRequest) -> DomainResult<()> {
        let mut map = write_lock(&self.inner);
        if !map
            .get(&request.id)
            .is_some_and(|r| r.tenant_id == request.tenant_id)
        {
            return Err(DomainError::NotFound);
        }
        map.insert(request.id, request);
        Ok(())
    }

    fn list_for(&self, tenant_id: TenantId, employee_id: UserId) -> Vec<LeaveRequest> {
        let mut out: Vec<_> = read_lock(&self.inner)
            .values()
            .filter(|r| r.tenant_id == tenant_id && r.employee_id == employee_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    fn list_all(&self, tenant_id: TenantId) -> Vec<LeaveRequest> {
        let mut out: Vec<_> = read_lock(&self.inner)
            .values()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Salary profiles
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemorySalaryProfileRepository {
    inner: RwLock<HashMap<(TenantId, UserId), SalaryProfile>>,
}

impl InMemorySalaryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SalaryProfileRepository for InMemorySalaryProfileRepository {
    fn get(&self, tenant_id: TenantId, employee_id: UserId) -> Option<SalaryProfile> {
        read_lock(&self.inner)
            .get(&(tenant_id, employee_id))
            .cloned()
    }

    fn upsert(&self, profile: SalaryProfile) {
        write_lock(&self.inner).insert((profile.tenant_id, profile.employee_id), profile);
    }

    fn list(&self, tenant_id: TenantId) -> Vec<SalaryProfile> {
        read_lock(&self.inner)
            .iter()
            .filter(|((t, _), _)| *t == tenant_id)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payslips
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryPayslipRepository {
    inner: RwLock<Vec<Payslip>>,
}

impl InMemoryPayslipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayslipRepository for InMemoryPayslipRepository {
    fn replace_period(&self, tenant_id: TenantId, period: PayPeriod, slips: Vec<Payslip>) {
        let mut all = write_lock(&self.inner);
        all.retain(|s| !(s.tenant_id == tenant_id && s.period == period));
        all.extend(slips);
    }

    fn list_for(&self, tenant_id: TenantId, employee_id: UserId) -> Vec<Payslip> {
        read_lock(&self.inner)
            .iter()
            .filter(|s| s.tenant_id == tenant_id && s.employee_id == employee_id)
            .cloned()
            .collect()
    }

    fn list_period(&self, tenant_id: TenantId, period: PayPeriod) -> Vec<Payslip> {
        read_lock(&self.inner)
            .iter()
            .filter(|s| s.tenant_id == tenant_id && s.period == period)
            .cloned()
            .collect()
    }
}
