use serde::{Deserialize, Serialize};

use crate::component::{ComponentBase, ComputationKind, SalaryComponent};

/// Which wage field the user touched last. Only the *other* field is ever
/// derived within one update cycle, so the two writes cannot feed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastEdited {
    Month,
    Year,
}

/// Monthly/yearly wage pair kept bidirectionally in sync.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WageInput {
    monthly: f64,
    yearly: f64,
    last_edited: LastEdited,
}

impl WageInput {
    pub fn from_monthly(monthly: f64) -> Self {
        Self {
            monthly,
            yearly: monthly * 12.0,
            last_edited: LastEdited::Month,
        }
    }

    pub fn set_monthly(&mut self, monthly: f64) {
        self.monthly = monthly;
        self.yearly = monthly * 12.0;
        self.last_edited = LastEdited::Month;
    }

    pub fn set_yearly(&mut self, yearly: f64) {
        self.yearly = yearly;
        self.monthly = yearly / 12.0;
        self.last_edited = LastEdited::Year;
    }

    pub fn monthly(&self) -> f64 {
        self.monthly
    }

    pub fn yearly(&self) -> f64 {
        self.yearly
    }

    pub fn last_edited(&self) -> LastEdited {
        self.last_edited
    }
}

/// Deduction configuration: PF as a % of basic, professional tax flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductionRates {
    pub pf_rate: f64,
    pub professional_tax: f64,
}

impl Default for DeductionRates {
    fn default() -> Self {
        Self {
            pf_rate: 12.0,
            professional_tax: 200.0,
        }
    }
}

/// A component with its resolved amount.
///
/// `percentage` is the configured percentage for percentage-kind components,
/// or the effective amount/wage share for fixed-kind ones, so the UI shows a
/// uniform "% of wage" column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub percentage: f64,
}

/// The fully resolved pay breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub components: Vec<ResolvedComponent>,
    pub basic_salary: f64,
    pub gross_salary: f64,
    pub pf_employee: f64,
    pub pf_employer: f64,
    pub professional_tax: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
    /// Non-remainder components alone exceed the monthly wage. Surfaced, not
    /// clamped: generous components stay as configured, only the remainder
    /// bottoms out at zero.
    pub exceeds_wage: bool,
}

impl Breakdown {
    pub fn component(&self, id: &str) -> Option<&ResolvedComponent> {
        self.components.iter().find(|c| c.id == id)
    }
}

/// Resolve a wage and component list into a full pay breakdown.
///
/// Deterministic single pass with one ordering rule: the basic component
/// resolves first (percentage bases depend on it) and the remainder component
/// resolves last, absorbing `max(0, wage - everything else)`.
pub fn resolve(monthly_wage: f64, components: &[SalaryComponent], rates: &DeductionRates) -> Breakdown {
    let basic_salary = components
        .iter()
        .find(|c| c.is_basic())
        .map(|c| match c.kind {
            ComputationKind::Percentage => monthly_wage * c.value / 100.0,
            ComputationKind::Fixed => c.value,
        })
        .unwrap_or(0.0);

    let mut resolved: Vec<ResolvedComponent> = Vec::with_capacity(components.len());
    let mut allocated = 0.0;

    for component in components {
        if component.is_remainder() {
            continue;
        }

        let amount = if component.is_basic() {
            basic_salary
        } else {
            match component.kind {
                ComputationKind::Fixed => component.value,
                ComputationKind::Percentage => {
                    let base = match component.base {
                        ComponentBase::Basic => basic_salary,
                        ComponentBase::Wage => monthly_wage,
                    };
                    base * component.value / 100.0
                }
            }
        };

        allocated += amount;
        resolved.push(ResolvedComponent {
            id: component.id.clone(),
            name: component.name.clone(),
            amount,
            percentage: effective_percentage(component, amount, monthly_wage),
        });
    }

    let exceeds_wage = allocated > monthly_wage;

    let mut gross_salary = allocated;
    if let Some(remainder) = components.iter().find(|c| c.is_remainder()) {
        let amount = (monthly_wage - allocated).max(0.0);
        gross_salary += amount;
        resolved.push(ResolvedComponent {
            id: remainder.id.clone(),
            name: remainder.name.clone(),
            amount,
            percentage: effective_percentage(remainder, amount, monthly_wage),
        });
    }

    let pf_employee = basic_salary * rates.pf_rate / 100.0;
    let pf_employer = pf_employee;
    let total_deductions = pf_employee + rates.professional_tax;

    Breakdown {
        components: resolved,
        basic_salary,
        gross_salary,
        pf_employee,
        pf_employer,
        professional_tax: rates.professional_tax,
        total_deductions,
        net_salary: gross_salary - total_deductions,
        exceeds_wage,
    }
}

fn effective_percentage(component: &SalaryComponent, amount: f64, monthly_wage: f64) -> f64 {
    match component.kind {
        ComputationKind::Percentage => component.value,
        // A zero (or negative) wage has no meaningful share; report 0 rather
        // than letting the division produce NaN, which would serialize as
        // JSON null.
        ComputationKind::Fixed if monthly_wage <= 0.0 => 0.0,
        ComputationKind::Fixed => amount / monthly_wage * 100.0,
    }
}
