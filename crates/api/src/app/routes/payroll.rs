//! Payroll runs and payslip retrieval.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::json;

use staffhq_auth::{Action, ResourceKind, Role};
use staffhq_core::UserId;
use staffhq_payroll::{PayPeriod, generate_payslip};

use crate::app::dto::{self, PayrollRunRequest};
use crate::app::{AppServices, errors};
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/runs", post(run))
        .route("/payslips", get(own_payslips))
        .route("/payslips/:employee_id", get(employee_payslips))
}

/// Generate payslips for every active employee with a salary profile.
///
/// Re-running a period replaces that period's slips wholesale rather than
/// stacking duplicates.
pub async fn run(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(req): Json<PayrollRunRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&principal, Action::Create, ResourceKind::PayrollRun, None) {
        return resp;
    }

    let period = match PayPeriod::new(req.year, req.month) {
        Ok(period) => period,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let now = Utc::now();
    let slips: Vec<_> = services
        .salaries
        .list(tenant.tenant_id())
        .iter()
        .filter(|profile| {
            services
                .users
                .get_user(profile.employee_id)
                .is_some_and(|u| u.is_active)
        })
        .map(|profile| generate_payslip(profile, period, now))
        .collect();

    let count = slips.len();
    services
        .payslips
        .replace_period(tenant.tenant_id(), period, slips);

    tracing::info!(period = %period, payslips = count, "payroll run completed");

    (
        StatusCode::CREATED,
        Json(json!({ "period": period.to_string(), "payslips_generated": count })),
    )
        .into_response()
}

pub async fn own_payslips(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&principal, Action::Read, ResourceKind::Payslip, None) {
        return resp;
    }

    let items: Vec<_> = services
        .payslips
        .list_for(tenant.tenant_id(), principal.user_id())
        .iter()
        .map(dto::payslip_to_json)
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "count": items.len(), "items": items })),
    )
        .into_response()
}

/// Another employee's payslips; payroll officers and admins only, except for
/// a caller reading their own id.
pub async fn employee_payslips(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(employee_id): Path<String>,
) -> axum::response::Response {
    let employee_id = match employee_id.parse::<UserId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if employee_id != principal.user_id() {
        if let Err(resp) = authz::require_role(&principal, &[Role::PayrollOfficer, Role::Admin]) {
            return resp;
        }
    }

    let items: Vec<_> = services
        .payslips
        .list_for(tenant.tenant_id(), employee_id)
        .iter()
        .map(dto::payslip_to_json)
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "employee_id": employee_id.to_string(),
            "count": items.len(),
            "items": items,
        })),
    )
        .into_response()
}
