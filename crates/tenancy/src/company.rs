use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use staffhq_core::{DomainError, DomainResult, TenantId};

/// Subscription plan lifecycle: fixed enumeration, quota derived from plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Basic,
    Standard,
    Premium,
    Enterprise,
}

impl SubscriptionPlan {
    /// Maximum number of employee records the plan allows.
    pub fn max_employees(&self) -> usize {
        match self {
            SubscriptionPlan::Basic => 50,
            SubscriptionPlan::Standard => 200,
            SubscriptionPlan::Premium => 500,
            SubscriptionPlan::Enterprise => 10_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Basic => "basic",
            SubscriptionPlan::Standard => "standard",
            SubscriptionPlan::Premium => "premium",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }
}

impl Default for SubscriptionPlan {
    fn default() -> Self {
        SubscriptionPlan::Basic
    }
}

impl core::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(SubscriptionPlan::Basic),
            "standard" => Ok(SubscriptionPlan::Standard),
            "premium" => Ok(SubscriptionPlan::Premium),
            "enterprise" => Ok(SubscriptionPlan::Enterprise),
            other => Err(DomainError::validation(format!(
                "invalid subscription plan '{other}'. Must be one of: basic, standard, premium, enterprise"
            ))),
        }
    }
}

/// A tenant: one isolated customer company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: TenantId,
    /// Unique across the whole system.
    pub name: String,
    pub email: Option<String>,
    pub plan: SubscriptionPlan,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn register(name: impl Into<String>, plan: SubscriptionPlan, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("company name must not be empty"));
        }
        Ok(Self {
            id: TenantId::new(),
            name,
            email: None,
            plan,
            is_active: true,
            created_at: now,
        })
    }

    pub fn max_employees(&self) -> usize {
        self.plan.max_employees()
    }

    /// Advisory quota check at employee-creation time.
    ///
    /// Not transactional against concurrent inserts: two creations racing the
    /// last slot can both pass. The last-admin invariant is atomic; this one
    /// is deliberately not (it caps a subscription, not a safety property).
    pub fn check_capacity(&self, current_employee_count: usize) -> DomainResult<()> {
        let max = self.max_employees();
        if current_employee_count >= max {
            return Err(DomainError::invariant(format!(
                "employee limit reached. Your {} plan allows {} employees",
                self.plan, max
            )));
        }
        Ok(())
    }
}
