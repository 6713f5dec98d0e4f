//! Static role-permission matrix.
//!
//! The matrix is application logic fixed at deploy time, not stored data.
//! It answers the broadest question only ("may this role act on this resource
//! kind at all"); per-record narrowing (own record, employee-role-only) is the
//! visibility layer in [`crate::gate`].

use serde::{Deserialize, Serialize};

use crate::Role;

/// CRUD action requested on a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// Kinds of tenant-scoped resources the gate arbitrates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Employee,
    Attendance,
    Leave,
    SalaryProfile,
    PayrollRun,
    Payslip,
    Company,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Employee => "employee",
            ResourceKind::Attendance => "attendance",
            ResourceKind::Leave => "leave",
            ResourceKind::SalaryProfile => "salary_profile",
            ResourceKind::PayrollRun => "payroll_run",
            ResourceKind::Payslip => "payslip",
            ResourceKind::Company => "company",
        }
    }
}

const ALL_ROLES: &[Role] = &Role::ALL;
const HR_OR_ADMIN: &[Role] = &[Role::HrOfficer, Role::Admin];
const PAYROLL_OR_ADMIN: &[Role] = &[Role::PayrollOfficer, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const NOBODY: &[Role] = &[];

/// Roles permitted to perform `action` on `resource`.
///
/// Exhaustive on both enums so a new action or resource kind cannot be shipped
/// without a policy decision.
pub fn permitted_roles(action: Action, resource: ResourceKind) -> &'static [Role] {
    match resource {
        ResourceKind::Employee => match action {
            // Creation/update is further narrowed by `can_manage` (assigned role).
            Action::Create | Action::Update | Action::Delete => HR_OR_ADMIN,
            // Everyone may read; visibility scoping narrows to own record.
            Action::Read => ALL_ROLES,
        },
        ResourceKind::Attendance => match action {
            // Check-in creates, check-out updates; both are self-service.
            Action::Create | Action::Read | Action::Update => ALL_ROLES,
            Action::Delete => ADMIN_ONLY,
        },
        ResourceKind::Leave => match action {
            Action::Create | Action::Read => ALL_ROLES,
            // Approval/rejection decisions.
            Action::Update => HR_OR_ADMIN,
            Action::Delete => ADMIN_ONLY,
        },
        ResourceKind::SalaryProfile => match action {
            Action::Create | Action::Read | Action::Update => PAYROLL_OR_ADMIN,
            Action::Delete => ADMIN_ONLY,
        },
        ResourceKind::PayrollRun => match action {
            Action::Create | Action::Read => PAYROLL_OR_ADMIN,
            Action::Update | Action::Delete => NOBODY,
        },
        ResourceKind::Payslip => match action {
            // Payslips are generated by payroll runs, read by their owners.
            Action::Create => PAYROLL_OR_ADMIN,
            Action::Read => ALL_ROLES,
            Action::Update | Action::Delete => NOBODY,
        },
        ResourceKind::Company => match action {
            // Company registration happens before authentication; inside the
            // gate only admins touch company records.
            Action::Create | Action::Read | Action::Update => ADMIN_ONLY,
            Action::Delete => NOBODY,
        },
    }
}

/// Whether `role` may perform `action` on `resource` at the matrix level.
pub fn allows(role: Role, action: Action, resource: ResourceKind) -> bool {
    permitted_roles(action, resource).contains(&role)
}

/// "admin", "hr_officer or admin", ... for deny messages.
pub fn permitted_roles_label(action: Action, resource: ResourceKind) -> String {
    let roles = permitted_roles(action, resource);
    if roles.is_empty() {
        return "none".to_string();
    }
    roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payroll_runs_are_payroll_or_admin_only() {
        assert!(allows(Role::PayrollOfficer, Action::Create, ResourceKind::PayrollRun));
        assert!(allows(Role::Admin, Action::Create, ResourceKind::PayrollRun));
        assert!(!allows(Role::HrOfficer, Action::Create, ResourceKind::PayrollRun));
        assert!(!allows(Role::Employee, Action::Create, ResourceKind::PayrollRun));
    }

    #[test]
    fn every_role_may_read_its_own_slice_of_employees() {
        for role in Role::ALL {
            assert!(allows(role, Action::Read, ResourceKind::Employee));
        }
    }

    #[test]
    fn leave_decisions_require_hr_or_admin() {
        assert!(allows(Role::HrOfficer, Action::Update, ResourceKind::Leave));
        assert!(allows(Role::Admin, Action::Update, ResourceKind::Leave));
        assert!(!allows(Role::Employee, Action::Update, ResourceKind::Leave));
        assert!(!allows(Role::PayrollOfficer, Action::Update, ResourceKind::Leave));
        assert_eq!(
            permitted_roles_label(Action::Update, ResourceKind::Leave),
            "hr_officer or admin"
        );
    }
}
