//! Daily attendance: self-service check-in/out plus HR/admin review.

use std::sync::Arc;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::json;

use staffhq_auth::{Action, ResourceKind, Role};
use staffhq_core::UserId;
use staffhq_employees::AttendanceDay;

use crate::app::dto::{self, AttendanceQuery};
use crate::app::{AppServices, errors};
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/check-in", post(check_in))
        .route("/check-out", post(check_out))
        .route("/", get(list))
}

pub async fn check_in(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&principal, Action::Create, ResourceKind::Attendance, None) {
        return resp;
    }

    let now = Utc::now();
    let today = now.date_naive();
    let mut day = services
        .attendance
        .get_day(tenant.tenant_id(), principal.user_id(), today)
        .unwrap_or_else(|| AttendanceDay::open(tenant.tenant_id(), principal.user_id(), today));

    if let Err(e) = day.check_in(now) {
        return errors::domain_error_to_response(e);
    }
    services.attendance.upsert_day(day.clone());

    (
        StatusCode::OK,
        Json(json!({ "attendance": dto::attendance_to_json(&day) })),
    )
        .into_response()
}

pub async fn check_out(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&principal, Action::Update, ResourceKind::Attendance, None) {
        return resp;
    }

    let now = Utc::now();
    let today = now.date_naive();
    let Some(mut day) = services
        .attendance
        .get_day(tenant.tenant_id(), principal.user_id(), today)
    else {
        return errors::json_error(
            StatusCode::CONFLICT,
            "conflict",
            "no open check-in for today",
        );
    };

    if let Err(e) = day.check_out(now) {
        return errors::domain_error_to_response(e);
    }
    services.attendance.upsert_day(day.clone());

    (
        StatusCode::OK,
        Json(json!({ "attendance": dto::attendance_to_json(&day) })),
    )
        .into_response()
}

/// Own history by default; HR and admins may pass `employee_id` to review
/// anyone in the tenant.
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Query(query): Query<AttendanceQuery>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&principal, Action::Read, ResourceKind::Attendance, None) {
        return resp;
    }

    let target = match query.employee_id.as_deref() {
        None => principal.user_id(),
        Some(raw) => match raw.parse::<UserId>() {
            Ok(id) => id,
            Err(e) => return errors::domain_error_to_response(e),
        },
    };

    if target != principal.user_id() {
        if let Err(resp) = authz::require_role(&principal, &[Role::HrOfficer, Role::Admin]) {
            return resp;
        }
    }

    let days: Vec<_> = services
        .attendance
        .list_for(tenant.tenant_id(), target)
        .iter()
        .map(dto::attendance_to_json)
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "employee_id": target.to_string(), "count": days.len(), "items": days })),
    )
        .into_response()
}
