//! Salary configuration and compensation preview.
//!
//! Routes are mounted under `/employees/:id` by the employees router; these
//! handlers own the salary-specific policy: payroll officers and admins
//! manage any profile in the tenant, and every employee may read their own.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

use staffhq_auth::{Action, ResourceKind};
use staffhq_core::{DomainError, UserId};
use staffhq_payroll::SalaryProfile;

use crate::app::dto::{self, SalaryUpdateRequest};
use crate::app::{AppServices, errors};
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

/// Resolve the target employee and check salary access for `action`.
///
/// Self-reads bypass the matrix: an employee always sees their own pay.
fn resolve_target(
    services: &AppServices,
    principal: &PrincipalContext,
    raw_id: &str,
    action: Action,
) -> Result<UserId, axum::response::Response> {
    let id = raw_id
        .parse::<UserId>()
        .map_err(errors::domain_error_to_response)?;

    let Some(target) = services.users.get_user(id) else {
        return Err(errors::domain_error_to_response(DomainError::NotFound));
    };

    let self_read = action == Action::Read && id == principal.user_id();
    if !self_read {
        authz::require(
            principal,
            action,
            ResourceKind::SalaryProfile,
            Some(target.tenant_id),
        )?;
    }

    Ok(id)
}

fn profile_response(status: StatusCode, profile: &SalaryProfile) -> axum::response::Response {
    let breakdown = profile.breakdown();
    (
        status,
        Json(json!({
            "employee_id": profile.employee_id.to_string(),
            "monthly_wage": profile.wage.monthly(),
            "yearly_wage": profile.wage.yearly(),
            "components": profile.components,
            "pf_rate": profile.rates.pf_rate,
            "professional_tax": profile.rates.professional_tax,
            "breakdown": dto::breakdown_to_json(&breakdown),
        })),
    )
        .into_response()
}

pub async fn update_salary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(req): Json<SalaryUpdateRequest>,
) -> axum::response::Response {
    let id = match resolve_target(&services, &principal, &id, Action::Update) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut profile = match services.salaries.get(tenant.tenant_id(), id) {
        Some(profile) => profile,
        None => {
            // First configuration needs a wage to anchor on.
            let monthly = match (req.monthly_wage, req.yearly_wage) {
                (Some(m), _) => m,
                (None, Some(y)) => y / 12.0,
                (None, None) => {
                    return errors::domain_error_to_response(DomainError::validation(
                        "monthly_wage or yearly_wage is required for an initial salary profile",
                    ));
                }
            };
            SalaryProfile::new(tenant.tenant_id(), id, monthly)
        }
    };

    // Wage sync mirrors the form behaviour: the edited field drives the other.
    if let Some(monthly) = req.monthly_wage {
        profile.wage.set_monthly(monthly);
    } else if let Some(yearly) = req.yearly_wage {
        profile.wage.set_yearly(yearly);
    }

    if let Some(components) = req.components {
        profile.components = components;
    }
    if let Some(pf_rate) = req.pf_rate {
        profile.rates.pf_rate = pf_rate;
    }
    if let Some(professional_tax) = req.professional_tax {
        profile.rates.professional_tax = professional_tax;
    }

    if profile.wage.monthly() < 0.0 {
        return errors::domain_error_to_response(DomainError::validation(
            "wage must not be negative",
        ));
    }

    services.salaries.upsert(profile.clone());
    tracing::info!(employee = %id, "salary profile updated");

    profile_response(StatusCode::OK, &profile)
}

pub async fn get_salary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match resolve_target(&services, &principal, &id, Action::Read) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.salaries.get(tenant.tenant_id(), id) {
        Some(profile) => profile_response(StatusCode::OK, &profile),
        None => errors::domain_error_to_response(DomainError::NotFound),
    }
}

/// Resolved breakdown only, for the salary form's live preview.
pub async fn preview(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match resolve_target(&services, &principal, &id, Action::Read) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.salaries.get(tenant.tenant_id(), id) {
        Some(profile) => (
            StatusCode::OK,
            Json(json!({ "breakdown": dto::breakdown_to_json(&profile.breakdown()) })),
        )
            .into_response(),
        None => errors::domain_error_to_response(DomainError::NotFound),
    }
}
