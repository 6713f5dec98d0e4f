use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use staffhq_auth::AuthzError;
use staffhq_core::DomainError;

/// Map a domain error to its HTTP response.
///
/// Stable error codes: clients branch on them (redirect-to-login for 401,
/// permission toast for 403, form feedback for 400/422).
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Unauthenticated(msg) => json_error(StatusCode::UNAUTHORIZED, "unauthenticated", msg),
        DomainError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

/// Map a gate denial to its HTTP response.
///
/// Cross-tenant denials get their own code so clients (and audits) can tell
/// "wrong company" apart from "wrong role".
pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    let code = match err {
        AuthzError::CrossTenant => "cross_tenant",
        AuthzError::Suspended => "account_suspended",
        _ => "forbidden",
    };
    json_error(StatusCode::FORBIDDEN, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
