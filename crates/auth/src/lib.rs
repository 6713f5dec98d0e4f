//! `staffhq-auth` — the access control gate (zero-trust boundary).
//!
//! This crate decides, for every authenticated request on tenant-scoped data:
//! who the caller is, which company they act within, whether their role
//! permits the requested action, and how far they may see into the employee
//! directory. It is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod gate;
pub mod matrix;
pub mod roles;
pub mod token;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use gate::{
    AuthzError, EmployeeVisibility, Principal, authorize, can_manage, guard_last_admin,
    scope_employee_visibility,
};
pub use matrix::{Action, ResourceKind};
pub use roles::Role;
pub use token::{Hs256TokenVerifier, TokenVerifier};
