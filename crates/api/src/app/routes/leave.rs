//! Leave requests: submission, listing, HR/admin decisions.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::json;

use staffhq_auth::{Action, ResourceKind, Role};
use staffhq_core::{DomainError, LeaveRequestId};
use staffhq_employees::{LeaveKind, LeaveRequest};
use staffhq_infra::{Notification, enqueue_best_effort};

use crate::app::dto::{self, DecideLeaveRequest, LeaveDecision, SubmitLeaveRequest};
use crate::app::{AppServices, errors};
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/", post(submit).get(list))
        .route("/:id/decision", post(decide))
}

pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(req): Json<SubmitLeaveRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&principal, Action::Create, ResourceKind::Leave, None) {
        return resp;
    }

    let request = match LeaveRequest::submit(
        tenant.tenant_id(),
        principal.user_id(),
        req.kind,
        req.start_date,
        req.end_date,
        req.reason.unwrap_or_default(),
        Utc::now(),
    ) {
        Ok(request) => request,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.leave.insert(request.clone());
    tracing::info!(leave = %request.id, days = request.days_requested, "leave requested");

    (
        StatusCode::CREATED,
        Json(json!({ "leave": dto::leave_to_json(&request) })),
    )
        .into_response()
}

/// Own requests for employees and payroll; the whole tenant for HR/admin.
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&principal, Action::Read, ResourceKind::Leave, None) {
        return resp;
    }

    let requests = match principal.role() {
        Role::HrOfficer | Role::Admin => services.leave.list_all(tenant.tenant_id()),
        Role::Employee | Role::PayrollOfficer => services
            .leave
            .list_for(tenant.tenant_id(), principal.user_id()),
    };

    let items: Vec<_> = requests.iter().map(dto::leave_to_json).collect();
    (
        StatusCode::OK,
        Json(json!({ "count": items.len(), "items": items })),
    )
        .into_response()
}

pub async fn decide(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(req): Json<DecideLeaveRequest>,
) -> axum::response::Response {
    let id = match id.parse::<LeaveRequestId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(resp) = authz::require(&principal, Action::Update, ResourceKind::Leave, None) {
        return resp;
    }

    // Tenant-scoped lookup: a foreign request is indistinguishable from an
    // absent one.
    let Some(mut request) = services.leave.get(tenant.tenant_id(), id) else {
        return errors::domain_error_to_response(DomainError::NotFound);
    };

    let outcome = match req.decision {
        LeaveDecision::Approve => request.approve(principal.user_id(), req.notes),
        LeaveDecision::Reject => request.reject(principal.user_id(), req.notes),
    };
    if let Err(e) = outcome {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.leave.update(request.clone()) {
        return errors::domain_error_to_response(e);
    }

    let verb = match req.decision {
        LeaveDecision::Approve => "approved",
        LeaveDecision::Reject => "rejected",
    };
    let kind = match request.kind {
        LeaveKind::Paid => "paid",
        LeaveKind::Sick => "sick",
        LeaveKind::Unpaid => "unpaid",
    };
    enqueue_best_effort(
        services.notifications.as_ref(),
        Notification::info(
            request.employee_id,
            format!(
                "Your {kind} leave request from {} to {} has been {verb}",
                request.start_date, request.end_date
            ),
            "leave_request",
        ),
    );

    tracing::info!(leave = %request.id, decision = verb, "leave decided");

    (
        StatusCode::OK,
        Json(json!({ "leave": dto::leave_to_json(&request) })),
    )
        .into_response()
}
