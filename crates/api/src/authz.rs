//! Handler-side authorization guards.
//!
//! These enforce gate decisions at the route boundary, before any repository
//! work, and translate denials straight into HTTP responses.

use axum::response::Response;

use staffhq_auth::{Action, AuthzError, ResourceKind, Role, authorize};
use staffhq_core::TenantId;

use crate::app::errors;
use crate::context::PrincipalContext;

/// Check the permission matrix (and tenant isolation, when the owning tenant
/// of the target record is known).
pub fn require(
    principal: &PrincipalContext,
    action: Action,
    resource: ResourceKind,
    resource_tenant: Option<TenantId>,
) -> Result<(), Response> {
    authorize(principal.principal(), action, resource, resource_tenant)
        .map_err(errors::authz_error_to_response)
}

/// Require one of `allowed` roles, for the few endpoints whose narrowing is
/// not expressible as a matrix cell (e.g. viewing another employee's data).
pub fn require_role(principal: &PrincipalContext, allowed: &[Role]) -> Result<(), Response> {
    if allowed.contains(&principal.role()) {
        return Ok(());
    }
    Err(errors::authz_error_to_response(AuthzError::WrongRole {
        required: allowed
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(" or "),
        actual: principal.role(),
    }))
}

/// Role assignment and activation are admin-only.
pub fn require_admin(principal: &PrincipalContext) -> Result<(), Response> {
    require_role(principal, &[Role::Admin])
}
