use core::str::FromStr;

use serde::{Deserialize, Serialize};

use staffhq_core::DomainError;

/// Role of a principal within its company.
///
/// This is a closed set: authorization logic matches on it exhaustively, so
/// adding a role is a compile-time-checked change across the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    HrOfficer,
    PayrollOfficer,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Employee,
        Role::HrOfficer,
        Role::PayrollOfficer,
        Role::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::HrOfficer => "hr_officer",
            Role::PayrollOfficer => "payroll_officer",
            Role::Admin => "admin",
        }
    }

    /// Human-facing label for pickers and notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::HrOfficer => "HR Officer",
            Role::PayrollOfficer => "Payroll Officer",
            Role::Admin => "Admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Role::Employee),
            "hr_officer" => Ok(Role::HrOfficer),
            "payroll_officer" => Ok(Role::PayrollOfficer),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!(
                "invalid role '{other}'. Must be one of: employee, hr_officer, payroll_officer, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_role() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected_with_enumerated_values() {
        let err = "superuser".parse::<Role>().unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("superuser"));
                assert!(msg.contains("employee, hr_officer, payroll_officer, admin"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
