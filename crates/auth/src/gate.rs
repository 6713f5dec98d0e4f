//! Authorization decisions for tenant-scoped requests.
//!
//! Everything here is pure policy: no IO, no panics, no business logic. The
//! caller supplies whatever store-derived facts a decision needs (e.g. the
//! active admin count for the last-admin invariant).

use serde::Serialize;
use thiserror::Error;

use staffhq_core::{DomainError, TenantId, UserId};

use crate::matrix::{self, Action, ResourceKind};
use crate::roles::Role;

/// A fully resolved principal for authorization decisions.
///
/// Built by the transport layer from verified token claims plus a user
/// directory lookup; the `tenant_id` always comes from the directory, never
/// from the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    pub tenant_id: TenantId,
    pub is_active: bool,
}

/// Why a request was denied.
///
/// Each variant carries a stable, user-distinguishable message: clients react
/// differently to "log in again" vs "you lack the role" vs "wrong company".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("account is suspended")]
    Suspended,

    #[error("access denied: resource belongs to a different company")]
    CrossTenant,

    #[error("access denied. Required role: {required}, your role: {actual}")]
    WrongRole { required: String, actual: Role },

    #[error("access denied. Only HR Officers and Admins can manage employees")]
    NotAManager,

    #[error(
        "HR Officers can only create or update employees with role \"employee\". Cannot assign role: {attempted}"
    )]
    CannotAssignRole { attempted: Role },
}

impl From<AuthzError> for DomainError {
    fn from(err: AuthzError) -> Self {
        DomainError::forbidden(err.to_string())
    }
}

/// Authorize `principal` to perform `action` on `resource`.
///
/// When the caller already knows which tenant owns the target record it must
/// pass it as `resource_tenant`: a mismatch is always a denial, regardless of
/// role. This is the one place the gate answers `Forbidden` rather than
/// `NotFound` for foreign records, because here it holds proof of existence
/// in another tenant.
pub fn authorize(
    principal: &Principal,
    action: Action,
    resource: ResourceKind,
    resource_tenant: Option<TenantId>,
) -> Result<(), AuthzError> {
    if !principal.is_active {
        return Err(AuthzError::Suspended);
    }

    if let Some(owner) = resource_tenant {
        if owner != principal.tenant_id {
            return Err(AuthzError::CrossTenant);
        }
    }

    if matrix::allows(principal.role, action, resource) {
        Ok(())
    } else {
        Err(AuthzError::WrongRole {
            required: matrix::permitted_roles_label(action, resource),
            actual: principal.role,
        })
    }
}

/// May `principal` create/update an employee record carrying `target_role`?
///
/// Admins assign any role; HR officers only maintain plain employees; nobody
/// else manages employee records at all.
pub fn can_manage(principal: &Principal, target_role: Role) -> Result<(), AuthzError> {
    if !principal.is_active {
        return Err(AuthzError::Suspended);
    }

    match principal.role {
        Role::Admin => Ok(()),
        Role::HrOfficer => {
            if target_role == Role::Employee {
                Ok(())
            } else {
                Err(AuthzError::CannotAssignRole {
                    attempted: target_role,
                })
            }
        }
        Role::Employee | Role::PayrollOfficer => Err(AuthzError::NotAManager),
    }
}

/// How far a principal may see into the employee directory.
///
/// This is a data-filtering contract applied server-side before any employee
/// record leaves the boundary, not a UI concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeVisibility {
    /// Tenant-wide, no narrowing.
    All,
    /// Only records whose role is `employee` (HR must not see other HR,
    /// payroll, or admin accounts).
    EmployeesOnly,
    /// Only the caller's own record.
    SelfOnly(UserId),
}

impl EmployeeVisibility {
    /// Does this scope permit seeing the record identified by
    /// `(record_user, record_role)`?
    pub fn permits(&self, record_user: UserId, record_role: Role) -> bool {
        match self {
            EmployeeVisibility::All => true,
            EmployeeVisibility::EmployeesOnly => record_role == Role::Employee,
            EmployeeVisibility::SelfOnly(me) => *me == record_user,
        }
    }
}

/// Resolve the employee-directory visibility scope for `principal`.
pub fn scope_employee_visibility(principal: &Principal) -> EmployeeVisibility {
    match principal.role {
        Role::Admin => EmployeeVisibility::All,
        Role::HrOfficer => EmployeeVisibility::EmployeesOnly,
        Role::Employee | Role::PayrollOfficer => EmployeeVisibility::SelfOnly(principal.user_id),
    }
}

/// Enforce the last-admin invariant for a role change or deactivation.
///
/// `active_admins` is the count of active admins in the tenant *including*
/// the target, read under the same lock that applies the mutation — callers
/// must not read the count first and decide later.
pub fn guard_last_admin(
    target_role: Role,
    target_is_active: bool,
    new_role: Option<Role>,
    new_is_active: Option<bool>,
    active_admins: usize,
) -> Result<(), DomainError> {
    let is_active_admin = target_role == Role::Admin && target_is_active;
    if !is_active_admin {
        return Ok(());
    }

    let loses_admin = matches!(new_role, Some(r) if r != Role::Admin);
    let deactivated = matches!(new_is_active, Some(false));
    if (loses_admin || deactivated) && active_admins <= 1 {
        return Err(DomainError::invariant(
            "cannot remove the last admin. At least one active admin must remain in the company",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: UserId::new(),
            role,
            tenant_id: TenantId::new(),
            is_active: true,
        }
    }

    #[test]
    fn cross_tenant_access_is_denied_for_every_role() {
        let foreign = TenantId::new();
        for role in Role::ALL {
            let p = principal(role);
            for resource in [
                ResourceKind::Employee,
                ResourceKind::Leave,
                ResourceKind::Payslip,
            ] {
                let err = authorize(&p, Action::Read, resource, Some(foreign)).unwrap_err();
                assert_eq!(err, AuthzError::CrossTenant, "role {role} resource {resource:?}");
            }
        }
    }

    #[test]
    fn same_tenant_passes_the_isolation_check() {
        let p = principal(Role::Admin);
        assert!(authorize(&p, Action::Read, ResourceKind::Employee, Some(p.tenant_id)).is_ok());
    }

    #[test]
    fn suspended_principal_is_denied_outright() {
        let mut p = principal(Role::Admin);
        p.is_active = false;
        assert_eq!(
            authorize(&p, Action::Read, ResourceKind::Employee, None).unwrap_err(),
            AuthzError::Suspended
        );
        assert_eq!(can_manage(&p, Role::Employee).unwrap_err(), AuthzError::Suspended);
    }

    #[test]
    fn wrong_role_denial_names_the_required_roles() {
        let p = principal(Role::Employee);
        let err = authorize(&p, Action::Create, ResourceKind::PayrollRun, None).unwrap_err();
        match err {
            AuthzError::WrongRole { required, actual } => {
                assert_eq!(required, "payroll_officer or admin");
                assert_eq!(actual, Role::Employee);
            }
            other => panic!("expected WrongRole, got {other:?}"),
        }
    }

    #[test]
    fn hr_officer_may_only_assign_the_employee_role() {
        let hr = principal(Role::HrOfficer);
        assert!(can_manage(&hr, Role::Employee).is_ok());
        for attempted in [Role::HrOfficer, Role::PayrollOfficer, Role::Admin] {
            let err = can_manage(&hr, attempted).unwrap_err();
            assert_eq!(err, AuthzError::CannotAssignRole { attempted });
            assert!(err.to_string().contains(attempted.as_str()));
        }
    }

    #[test]
    fn admin_assigns_any_role_and_others_none() {
        let admin = principal(Role::Admin);
        for target in Role::ALL {
            assert!(can_manage(&admin, target).is_ok());
        }

        for caller in [Role::Employee, Role::PayrollOfficer] {
            let p = principal(caller);
            assert_eq!(can_manage(&p, Role::Employee).unwrap_err(), AuthzError::NotAManager);
        }
    }

    #[test]
    fn visibility_scopes_match_roles() {
        let admin = principal(Role::Admin);
        assert_eq!(scope_employee_visibility(&admin), EmployeeVisibility::All);

        let hr = principal(Role::HrOfficer);
        assert_eq!(
            scope_employee_visibility(&hr),
            EmployeeVisibility::EmployeesOnly
        );

        for role in [Role::Employee, Role::PayrollOfficer] {
            let p = principal(role);
            assert_eq!(
                scope_employee_visibility(&p),
                EmployeeVisibility::SelfOnly(p.user_id)
            );
        }
    }

    #[test]
    fn hr_visibility_filters_out_privileged_accounts() {
        let hr = principal(Role::HrOfficer);
        let scope = scope_employee_visibility(&hr);

        let records = [
            (UserId::new(), Role::Employee),
            (UserId::new(), Role::HrOfficer),
            (UserId::new(), Role::Admin),
            (UserId::new(), Role::Employee),
            (UserId::new(), Role::PayrollOfficer),
        ];

        let visible: Vec<_> = records
            .iter()
            .filter(|(u, r)| scope.permits(*u, *r))
            .collect();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|(_, r)| *r == Role::Employee));

        let admin_scope = scope_employee_visibility(&principal(Role::Admin));
        assert_eq!(
            records.iter().filter(|(u, r)| admin_scope.permits(*u, *r)).count(),
            records.len()
        );
    }

    #[test]
    fn sole_active_admin_cannot_be_demoted_or_deactivated() {
        let demote = guard_last_admin(Role::Admin, true, Some(Role::Employee), None, 1);
        assert!(matches!(demote, Err(DomainError::InvariantViolation(_))));

        let deactivate = guard_last_admin(Role::Admin, true, None, Some(false), 1);
        assert!(matches!(deactivate, Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn second_admin_makes_demotion_legal() {
        assert!(guard_last_admin(Role::Admin, true, Some(Role::Employee), None, 2).is_ok());
        assert!(guard_last_admin(Role::Admin, true, None, Some(false), 2).is_ok());
    }

    #[test]
    fn non_admin_targets_are_never_guarded() {
        assert!(guard_last_admin(Role::HrOfficer, true, Some(Role::Employee), None, 1).is_ok());
        assert!(guard_last_admin(Role::Employee, true, None, Some(false), 0).is_ok());
    }

    #[test]
    fn keeping_admin_role_or_staying_active_is_fine() {
        // Re-asserting the same role or re-activating is not a removal.
        assert!(guard_last_admin(Role::Admin, true, Some(Role::Admin), None, 1).is_ok());
        assert!(guard_last_admin(Role::Admin, true, None, Some(true), 1).is_ok());
    }
}
