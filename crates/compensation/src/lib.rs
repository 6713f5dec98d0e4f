//! `staffhq-compensation` — the pay-breakdown calculator.
//!
//! Pure and synchronous: no IO, no errors, no shared state. Invalid numeric
//! input is the caller's problem and propagates at face value; the only
//! out-of-band signal is the `exceeds_wage` flag.

pub mod calculator;
pub mod component;

pub use calculator::{Breakdown, DeductionRates, ResolvedComponent, WageInput, resolve};
pub use component::{ComponentBase, ComputationKind, SalaryComponent, default_components};
