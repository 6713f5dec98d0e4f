//! Health probe and principal introspection.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

use staffhq_auth::Role;

use crate::app::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

/// Who the gate thinks the caller is, after directory resolution.
pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let company = services.companies.get(tenant.tenant_id());

    (
        StatusCode::OK,
        Json(json!({
            "user_id": principal.user_id().to_string(),
            "role": principal.role().as_str(),
            "tenant_id": tenant.tenant_id().to_string(),
            "company": company.map(|c| c.name),
        })),
    )
        .into_response()
}

/// The closed role set, for client-side pickers.
pub async fn available_roles(
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let roles: Vec<_> = Role::ALL
        .iter()
        .map(|r| {
            json!({
                "role": r.as_str(),
                "label": r.label(),
                "assignable_by_caller": match principal.role() {
                    Role::Admin => true,
                    Role::HrOfficer => *r == Role::Employee,
                    _ => false,
                },
            })
        })
        .collect();

    (StatusCode::OK, Json(json!({ "roles": roles }))).into_response()
}
