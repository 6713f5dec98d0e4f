//! `staffhq-payroll` — stored salary configuration and payslip generation.

pub mod payslip;
pub mod profile;

pub use payslip::{PayPeriod, Payslip, generate_payslip};
pub use profile::SalaryProfile;
