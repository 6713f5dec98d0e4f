//! Employee directory: listing, creation, updates, role and status changes.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::json;

use staffhq_auth::{Action, ResourceKind, Role, can_manage, scope_employee_visibility};
use staffhq_core::{DomainError, UserId};
use staffhq_employees::EmployeeProfile;

use crate::app::dto::{
    self, ChangeRoleRequest, ChangeStatusRequest, CreateEmployeeRequest, UpdateEmployeeRequest,
};
use crate::app::{AppServices, errors};
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update))
        .route("/:id/role", put(change_role))
        .route("/:id/status", put(change_status))
        .route(
            "/:id/salary",
            put(super::salary::update_salary).get(super::salary::get_salary),
        )
        .route("/:id/salary/preview", get(super::salary::preview))
}

fn parse_user_id(raw: &str) -> Result<UserId, axum::response::Response> {
    raw.parse::<UserId>().map_err(errors::domain_error_to_response)
}

/// Fetch a record the caller may act on, or explain why not.
///
/// Foreign-tenant records come back `cross_tenant` (the unscoped lookup is
/// proof the record exists elsewhere); records hidden by the caller's
/// visibility scope come back `not_found` so their existence leaks nothing.
fn fetch_visible(
    services: &AppServices,
    tenant: &TenantContext,
    principal: &PrincipalContext,
    id: UserId,
) -> Result<EmployeeProfile, axum::response::Response> {
    let Some(profile) = services.users.get_user(id) else {
        return Err(errors::domain_error_to_response(DomainError::NotFound));
    };

    authz::require(
        principal,
        Action::Read,
        ResourceKind::Employee,
        Some(profile.tenant_id),
    )?;
    debug_assert_eq!(profile.tenant_id, tenant.tenant_id());

    let scope = scope_employee_visibility(principal.principal());
    if !scope.permits(profile.user_id, profile.role) {
        return Err(errors::domain_error_to_response(DomainError::NotFound));
    }

    Ok(profile)
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&principal, Action::Read, ResourceKind::Employee, None) {
        return resp;
    }

    let scope = scope_employee_visibility(principal.principal());
    let items: Vec<_> = services
        .users
        .list(tenant.tenant_id())
        .iter()
        .filter(|e| scope.permits(e.user_id, e.role))
        .map(dto::employee_to_json)
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "count": items.len(), "items": items })),
    )
        .into_response()
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(req): Json<CreateEmployeeRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&principal, Action::Create, ResourceKind::Employee, None) {
        return resp;
    }

    let role = match req.role.as_deref() {
        None => Role::Employee,
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => role,
            Err(e) => return errors::domain_error_to_response(e),
        },
    };
    if let Err(e) = can_manage(principal.principal(), role) {
        return errors::authz_error_to_response(e);
    }

    // Plan quota, checked against the live headcount.
    let Some(company) = services.companies.get(tenant.tenant_id()) else {
        return errors::domain_error_to_response(DomainError::NotFound);
    };
    if let Err(e) = company.check_capacity(services.users.employee_count(tenant.tenant_id())) {
        return errors::domain_error_to_response(e);
    }

    let now = Utc::now();
    let profile = match EmployeeProfile::new(
        tenant.tenant_id(),
        &req.first_name,
        &req.last_name,
        &req.email,
        role,
        req.designation.as_deref().unwrap_or(""),
        req.date_of_joining.unwrap_or_else(|| now.date_naive()),
        now,
    ) {
        Ok(profile) => profile,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.users.insert(profile.clone()) {
        return errors::domain_error_to_response(e);
    }

    tracing::info!(employee = %profile.user_id, role = %profile.role, "employee created");

    (
        StatusCode::CREATED,
        Json(json!({ "employee": dto::employee_to_json(&profile) })),
    )
        .into_response()
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_user_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match fetch_visible(&services, &tenant, &principal, id) {
        Ok(profile) => (
            StatusCode::OK,
            Json(json!({ "employee": dto::employee_to_json(&profile) })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> axum::response::Response {
    let id = match parse_user_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = authz::require(&principal, Action::Update, ResourceKind::Employee, None) {
        return resp;
    }

    let mut profile = match fetch_visible(&services, &tenant, &principal, id) {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    // Managing this record means managing both its current and (if changed)
    // requested role.
    if let Err(e) = can_manage(principal.principal(), profile.role) {
        return errors::authz_error_to_response(e);
    }
    if let Some(raw) = req.role.as_deref() {
        let new_role = match raw.parse::<Role>() {
            Ok(role) => role,
            Err(e) => return errors::domain_error_to_response(e),
        };
        if let Err(e) = can_manage(principal.principal(), new_role) {
            return errors::authz_error_to_response(e);
        }
        // Role changes carrying the last-admin invariant go through the
        // dedicated endpoint; plain updates only touch same-role records.
        if new_role != profile.role {
            return errors::domain_error_to_response(DomainError::validation(
                "role changes must go through PUT /employees/{id}/role",
            ));
        }
    }

    if let Some(first_name) = req.first_name {
        profile.first_name = first_name;
    }
    if let Some(last_name) = req.last_name {
        profile.last_name = last_name;
    }
    if let Some(designation) = req.designation {
        profile.designation = designation;
    }

    match services.users.update(tenant.tenant_id(), profile) {
        Ok(updated) => (
            StatusCode::OK,
            Json(json!({ "employee": dto::employee_to_json(&updated) })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn change_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(req): Json<ChangeRoleRequest>,
) -> axum::response::Response {
    let id = match parse_user_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    let new_role = match req.role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.role_admin.change_role(tenant.tenant_id(), id, new_role) {
        Ok(updated) => {
            tracing::info!(employee = %id, role = %new_role, "role changed");
            (
                StatusCode::OK,
                Json(json!({ "employee": dto::employee_to_json(&updated) })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn change_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(req): Json<ChangeStatusRequest>,
) -> axum::response::Response {
    let id = match parse_user_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = authz::require_admin(&principal) {
        return resp;
    }

    match services.role_admin.set_active(tenant.tenant_id(), id, req.is_active) {
        Ok(updated) => {
            tracing::info!(employee = %id, is_active = req.is_active, "status changed");
            (
                StatusCode::OK,
                Json(json!({ "employee": dto::employee_to_json(&updated) })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
