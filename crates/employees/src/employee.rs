use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use staffhq_auth::Role;
use staffhq_core::{DomainError, DomainResult, TenantId, UserId};

/// One employee record.
///
/// `tenant_id` is set at creation and never reassigned; every read/write
/// path filters by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub designation: String,
    pub date_of_joining: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl EmployeeProfile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        designation: impl Into<String>,
        date_of_joining: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let email = email.into();
        if !email.contains('@') {
            return Err(DomainError::validation(format!("invalid email address: {email}")));
        }
        let first_name = first_name.into();
        let last_name = last_name.into();
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(DomainError::validation("first and last name are required"));
        }

        Ok(Self {
            user_id: UserId::new(),
            tenant_id,
            first_name,
            last_name,
            email,
            role,
            designation: designation.into(),
            date_of_joining,
            is_active: true,
            created_at: now,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
