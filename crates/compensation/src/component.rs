use serde::{Deserialize, Serialize};

/// The id that marks the basic-salary anchor component.
pub const BASIC_COMPONENT_ID: &str = "basic";

/// The id that marks the remainder component (absorbs leftover wage).
pub const REMAINDER_COMPONENT_ID: &str = "fixed";

/// How a component's amount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputationKind {
    /// A flat currency amount.
    Fixed,
    /// A percentage of the chosen base.
    Percentage,
}

/// Which prior quantity a percentage applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentBase {
    /// The monthly wage.
    Wage,
    /// The resolved basic salary. Ordering rule: basic resolves before any
    /// component that uses it as a base.
    Basic,
}

/// One declarative salary component, as persisted/edited in the profile UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryComponent {
    pub id: String,
    pub name: String,
    pub kind: ComputationKind,
    /// Percentage for `Percentage` kind, currency amount for `Fixed`.
    pub value: f64,
    pub base: ComponentBase,
    pub description: String,
}

impl SalaryComponent {
    pub fn is_basic(&self) -> bool {
        self.id == BASIC_COMPONENT_ID
    }

    pub fn is_remainder(&self) -> bool {
        self.id == REMAINDER_COMPONENT_ID
    }
}

/// The stock component list new salary profiles start from.
pub fn default_components() -> Vec<SalaryComponent> {
    vec![
        SalaryComponent {
            id: BASIC_COMPONENT_ID.to_string(),
            name: "Basic Salary".to_string(),
            kind: ComputationKind::Percentage,
            value: 50.0,
            base: ComponentBase::Wage,
            description: "Basic salary computed from the monthly wage".to_string(),
        },
        SalaryComponent {
            id: "hra".to_string(),
            name: "House Rent Allowance (HRA)".to_string(),
            kind: ComputationKind::Percentage,
            value: 50.0,
            base: ComponentBase::Basic,
            description: "HRA provided to employees, 50% of the basic salary".to_string(),
        },
        SalaryComponent {
            id: "standard".to_string(),
            name: "Standard Allowance".to_string(),
            kind: ComputationKind::Fixed,
            value: 4167.0,
            base: ComponentBase::Wage,
            description: "Predetermined fixed amount paid as part of the salary".to_string(),
        },
        SalaryComponent {
            id: "performance".to_string(),
            name: "Performance Bonus".to_string(),
            kind: ComputationKind::Percentage,
            value: 8.33,
            base: ComponentBase::Basic,
            description: "Variable amount paid during payroll, a % of the basic salary".to_string(),
        },
        SalaryComponent {
            id: "lta".to_string(),
            name: "Leave Travel Allowance (LTA)".to_string(),
            kind: ComputationKind::Percentage,
            value: 8.33,
            base: ComponentBase::Basic,
            description: "Covers travel expenses, a % of the basic salary".to_string(),
        },
        SalaryComponent {
            id: REMAINDER_COMPONENT_ID.to_string(),
            name: "Fixed Allowance".to_string(),
            kind: ComputationKind::Fixed,
            value: 0.0,
            base: ComponentBase::Wage,
            description: "Whatever wage remains after all other components".to_string(),
        },
    ]
}
