use serde::{Deserialize, Serialize};

use staffhq_compensation::{
    Breakdown, DeductionRates, SalaryComponent, WageInput, default_components, resolve,
};
use staffhq_core::{TenantId, UserId};

/// Per-employee salary configuration: the calculator's persisted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryProfile {
    pub tenant_id: TenantId,
    pub employee_id: UserId,
    pub wage: WageInput,
    pub components: Vec<SalaryComponent>,
    pub rates: DeductionRates,
}

impl SalaryProfile {
    /// A fresh profile with the stock component list and statutory defaults.
    pub fn new(tenant_id: TenantId, employee_id: UserId, monthly_wage: f64) -> Self {
        Self {
            tenant_id,
            employee_id,
            wage: WageInput::from_monthly(monthly_wage),
            components: default_components(),
            rates: DeductionRates::default(),
        }
    }

    /// Resolve the profile into a full breakdown.
    pub fn breakdown(&self) -> Breakdown {
        resolve(self.wage.monthly(), &self.components, &self.rates)
    }
}
