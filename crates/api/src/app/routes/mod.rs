use axum::{Router, routing::get};

pub mod attendance;
pub mod companies;
pub mod employees;
pub mod leave;
pub mod payroll;
pub mod salary;
pub mod system;

/// Router for all authenticated (tenant-scoped) endpoints.
///
/// `/companies/register` is deliberately absent: sign-up happens before any
/// credential exists and is mounted on the public router.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/roles/available", get(system::available_roles))
        .route("/companies/me", get(companies::me))
        .nest("/employees", employees::router())
        .nest("/attendance", attendance::router())
        .nest("/leave", leave::router())
        .nest("/payroll", payroll::router())
}
