//! Company sign-up (public) and company profile (admin).

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::json;

use staffhq_auth::Role;
use staffhq_core::DomainError;
use staffhq_employees::EmployeeProfile;
use staffhq_tenancy::{Company, SubscriptionPlan};

use crate::app::dto::{self, RegisterCompanyRequest};
use crate::app::{AppServices, errors};
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

/// Public sign-up: creates the company and its first admin in one shot.
///
/// The admin account is the bootstrap principal; every later employee is
/// created through the authenticated surface.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<RegisterCompanyRequest>,
) -> axum::response::Response {
    let plan = match req.subscription_plan.as_deref() {
        None => SubscriptionPlan::default(),
        Some(raw) => match raw.parse::<SubscriptionPlan>() {
            Ok(plan) => plan,
            Err(e) => return errors::domain_error_to_response(e),
        },
    };

    // Reject a taken admin email before any record lands.
    if services.users.find_by_email(&req.admin_email).is_some() {
        return errors::domain_error_to_response(DomainError::conflict(format!(
            "email already registered: {}",
            req.admin_email
        )));
    }

    let now = Utc::now();
    let mut company = match Company::register(&req.company_name, plan, now) {
        Ok(company) => company,
        Err(e) => return errors::domain_error_to_response(e),
    };
    company.email = req.company_email;

    let admin = match EmployeeProfile::new(
        company.id,
        &req.admin_first_name,
        &req.admin_last_name,
        &req.admin_email,
        Role::Admin,
        "Administrator",
        now.date_naive(),
        now,
    ) {
        Ok(admin) => admin,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.companies.insert(company.clone()) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.users.insert(admin.clone()) {
        return errors::domain_error_to_response(e);
    }

    tracing::info!(company = %company.name, plan = %company.plan, "company registered");

    (
        StatusCode::CREATED,
        Json(json!({
            "company": dto::company_to_json(&company, 1),
            "admin": dto::employee_to_json(&admin),
        })),
    )
        .into_response()
}

/// The caller's own company, with plan usage. Admin only.
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    let Some(company) = services.companies.get(tenant.tenant_id()) else {
        return errors::domain_error_to_response(DomainError::NotFound);
    };

    let count = services.users.employee_count(tenant.tenant_id());
    (
        StatusCode::OK,
        Json(json!({ "company": dto::company_to_json(&company, count) })),
    )
        .into_response()
}
