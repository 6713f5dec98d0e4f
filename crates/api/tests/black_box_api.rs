use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use staffhq_auth::{JwtClaims, Role};
use staffhq_core::UserId;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = staffhq_api::app::build_app(jwt_secret.to_string()).await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(jwt_secret: &str, user_id: &str, role: Role) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user_id.parse::<UserId>().expect("invalid user id"),
        role,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

/// Register a company and return (admin_id, admin_token).
async fn register_company(
    client: &reqwest::Client,
    base_url: &str,
    jwt_secret: &str,
    company_name: &str,
    admin_email: &str,
) -> (String, String) {
    let res = client
        .post(format!("{}/companies/register", base_url))
        .json(&json!({
            "company_name": company_name,
            "admin_first_name": "Root",
            "admin_last_name": "Admin",
            "admin_email": admin_email,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let admin_id = body["admin"]["id"].as_str().unwrap().to_string();
    let token = mint_jwt(jwt_secret, &admin_id, Role::Admin);
    (admin_id, token)
}

/// Create an employee as `token` and return (id, token-for-that-employee).
async fn create_employee(
    client: &reqwest::Client,
    base_url: &str,
    jwt_secret: &str,
    token: &str,
    email: &str,
    role: Role,
) -> (String, String) {
    let res = client
        .post(format!("{}/employees", base_url))
        .bearer_auth(token)
        .json(&json!({
            "first_name": "Test",
            "last_name": "Person",
            "email": email,
            "role": role.as_str(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let id = body["employee"]["id"].as_str().unwrap().to_string();
    let token = mint_jwt(jwt_secret, &id, role);
    (id, token)
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn token_for_unknown_user_is_rejected() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    // Validly signed token, but the subject was never registered.
    let token = mint_jwt(jwt_secret, &UserId::new().to_string(), Role::Admin);
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "principal_not_found");
}

#[tokio::test]
async fn company_registration_bootstraps_an_admin() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "admin");
    assert_eq!(body["company"], "Acme");

    // Duplicate admin email is a conflict.
    let res = client
        .post(format!("{}/companies/register", srv.base_url))
        .json(&json!({
            "company_name": "Other Co",
            "admin_first_name": "Root",
            "admin_last_name": "Admin",
            "admin_email": "root@acme.test",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // So is a duplicate company name.
    let res = client
        .post(format!("{}/companies/register", srv.base_url))
        .json(&json!({
            "company_name": "Acme",
            "admin_first_name": "Another",
            "admin_last_name": "Admin",
            "admin_email": "root@other.test",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn hr_cannot_assign_privileged_roles() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, admin_token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;
    let (_, hr_token) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "hr@acme.test", Role::HrOfficer,
    )
    .await;

    // HR may create plain employees.
    let res = client
        .post(format!("{}/employees", srv.base_url))
        .bearer_auth(&hr_token)
        .json(&json!({
            "first_name": "Eve",
            "last_name": "Employee",
            "email": "eve@acme.test",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // But not admins.
    let res = client
        .post(format!("{}/employees", srv.base_url))
        .bearer_auth(&hr_token)
        .json(&json!({
            "first_name": "Mal",
            "last_name": "Lory",
            "email": "mal@acme.test",
            "role": "admin",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Cannot assign role")
    );
}

#[tokio::test]
async fn employee_directory_visibility_is_scoped_by_role() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, admin_token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;
    let (_, hr_token) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "hr@acme.test", Role::HrOfficer,
    )
    .await;
    let (emp_id, emp_token) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "eve@acme.test", Role::Employee,
    )
    .await;
    create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "pay@acme.test", Role::PayrollOfficer,
    )
    .await;

    // Admin sees everyone.
    let res = client
        .get(format!("{}/employees", srv.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["count"], 4);

    // HR sees only employee-role records.
    let res = client
        .get(format!("{}/employees", srv.base_url))
        .bearer_auth(&hr_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["role"], "employee");

    // A plain employee sees only themselves.
    let res = client
        .get(format!("{}/employees", srv.base_url))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["id"], emp_id);

    // Their own record stays reachable by id.
    let res = client
        .get(format!("{}/employees/{}", srv.base_url, emp_id))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn cross_tenant_reads_are_forbidden_not_hidden() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, token_a) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;
    let (_, token_b) =
        register_company(&client, &srv.base_url, jwt_secret, "Globex", "root@globex.test").await;

    let (emp_a, _) = create_employee(
        &client, &srv.base_url, jwt_secret, &token_a, "eve@acme.test", Role::Employee,
    )
    .await;

    // The record exists in Acme, so Globex's admin gets an explicit
    // cross-tenant denial rather than a 404.
    let res = client
        .get(format!("{}/employees/{}", srv.base_url, emp_a))
        .bearer_auth(&token_b)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "cross_tenant");
}

#[tokio::test]
async fn the_last_admin_cannot_be_demoted_or_deactivated() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (admin_id, admin_token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;

    let res = client
        .put(format!("{}/employees/{}/role", srv.base_url, admin_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "role": "employee" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invariant_violation");

    let res = client
        .put(format!("{}/employees/{}/status", srv.base_url, admin_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "is_active": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // With a second admin in place, the demotion goes through.
    let (second_id, _) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "two@acme.test", Role::Admin,
    )
    .await;
    let res = client
        .put(format!("{}/employees/{}/role", srv.base_url, second_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "role": "hr_officer" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["employee"]["role"], "hr_officer");
}

#[tokio::test]
async fn suspended_accounts_are_locked_out() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, admin_token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;
    let (emp_id, emp_token) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "eve@acme.test", Role::Employee,
    )
    .await;

    let res = client
        .put(format!("{}/employees/{}/status", srv.base_url, emp_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "is_active": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The still-valid token no longer opens any door.
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "account_suspended");
}

#[tokio::test]
async fn salary_breakdown_matches_reference_figures() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, admin_token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;
    let (emp_id, emp_token) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "eve@acme.test", Role::Employee,
    )
    .await;

    let res = client
        .put(format!("{}/employees/{}/salary", srv.base_url, emp_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "monthly_wage": 50000.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["yearly_wage"], 600000.0);

    let b = &body["breakdown"];
    assert_eq!(b["basic_salary"], 25000.0);
    assert_eq!(b["gross_salary"], 50000.0);
    assert_eq!(b["pf_employee"], 3000.0);
    assert_eq!(b["pf_employer"], 3000.0);
    assert_eq!(b["professional_tax"], 200.0);
    assert_eq!(b["total_deductions"], 3200.0);
    assert_eq!(b["net_salary"], 46800.0);
    assert_eq!(b["exceeds_wage"], false);

    // An employee reads their own pay.
    let res = client
        .get(format!("{}/employees/{}/salary/preview", srv.base_url, emp_id))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["breakdown"]["net_salary"], 46800.0);

    // But not anyone else's.
    let (_, other_token) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "bob@acme.test", Role::Employee,
    )
    .await;
    let res = client
        .get(format!("{}/employees/{}/salary", srv.base_url, emp_id))
        .bearer_auth(&other_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn over_allocated_components_raise_the_exceeds_flag() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (admin_id, admin_token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;

    let res = client
        .put(format!("{}/employees/{}/salary", srv.base_url, admin_id))
        .bearer_auth(&admin_token)
        .json(&json!({
            "monthly_wage": 50000.0,
            "components": [
                {
                    "id": "basic",
                    "name": "Basic Salary",
                    "kind": "percentage",
                    "value": 120.0,
                    "base": "wage",
                    "description": ""
                },
                {
                    "id": "fixed",
                    "name": "Fixed Allowance",
                    "kind": "fixed",
                    "value": 0.0,
                    "base": "wage",
                    "description": ""
                }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["breakdown"]["exceeds_wage"], true);
    assert_eq!(body["breakdown"]["basic_salary"], 60000.0);
}

#[tokio::test]
async fn attendance_check_in_and_out_reject_double_actions() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, admin_token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;
    let (_, emp_token) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "eve@acme.test", Role::Employee,
    )
    .await;

    let res = client
        .post(format!("{}/attendance/check-in", srv.base_url))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/attendance/check-in", srv.base_url))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .post(format!("{}/attendance/check-out", srv.base_url))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["attendance"]["hours_worked"].as_f64().unwrap() >= 0.0);

    let res = client
        .post(format!("{}/attendance/check-out", srv.base_url))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn leave_lifecycle_submit_approve_freeze() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, admin_token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;
    let (_, emp_token) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "eve@acme.test", Role::Employee,
    )
    .await;

    let res = client
        .post(format!("{}/leave", srv.base_url))
        .bearer_auth(&emp_token)
        .json(&json!({
            "kind": "paid",
            "start_date": "2026-09-07",
            "end_date": "2026-09-11",
            "reason": "family trip"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let leave_id = body["leave"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["leave"]["days_requested"], 5);

    // Employees cannot decide.
    let res = client
        .post(format!("{}/leave/{}/decision", srv.base_url, leave_id))
        .bearer_auth(&emp_token)
        .json(&json!({ "decision": "approve" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(format!("{}/leave/{}/decision", srv.base_url, leave_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "decision": "approve", "notes": "enjoy" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["leave"]["status"], "approved");

    // Decisions are final.
    let res = client
        .post(format!("{}/leave/{}/decision", srv.base_url, leave_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "decision": "reject" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn payroll_run_freezes_payslips_per_period() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, admin_token) =
        register_company(&client, &srv.base_url, jwt_secret, "Acme", "root@acme.test").await;
    let (emp_id, emp_token) = create_employee(
        &client, &srv.base_url, jwt_secret, &admin_token, "eve@acme.test", Role::Employee,
    )
    .await;

    let res = client
        .put(format!("{}/employees/{}/salary", srv.base_url, emp_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "monthly_wage": 50000.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/payroll/runs", srv.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({ "year": 2026, "month": 8 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["payslips_generated"], 1);

    // Employees cannot run payroll.
    let res = client
        .post(format!("{}/payroll/runs", srv.base_url))
        .bearer_auth(&emp_token)
        .json(&json!({ "year": 2026, "month": 8 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The employee reads their own slip.
    let res = client
        .get(format!("{}/payroll/payslips", srv.base_url))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["period"], "2026-08");
    assert_eq!(body["items"][0]["net_salary"], 46800.0);

    // Re-running the period replaces rather than duplicates.
    let res = client
        .post(format!("{}/payroll/runs", srv.base_url))
        .bearer_auth(&admin_token)
        .json(&json!({ "year": 2026, "month": 8 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/payroll/payslips", srv.base_url))
        .bearer_auth(&emp_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["count"], 1);
}
