use chrono::Duration as ChronoDuration;
use reqwest::StatusCode;
use serde_json::json;

use climabill_auth::{Role, TokenService};
use climabill_core::TenantId;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Build the same router as prod, bound to an ephemeral port.
        let app = climabill_api::app::build_app(jwt_secret.to_string());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

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

async fn register(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    company: &str,
) -> (String, String) {
    let res = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "email": email,
            "password": "correct horse battery",
            "first_name": "Admin",
            "last_name": "User",
            "company": {
                "name": company,
                "industry": "saas",
                "employee_count": 42,
                "annual_revenue_usd": 10_000_000.0,
                "headquarters_location": "Berlin, DE",
                "compliance_standards": ["ghg_protocol"]
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let token = body["access_token"].as_str().unwrap().to_string();
    let company_id = body["tenant"]["id"].as_str().unwrap().to_string();
    (token, company_id)
}

async fn first_source_id(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    company_id: &str,
) -> String {
    let res = client
        .get(format!("{base_url}/companies/{company_id}/emissions/sources"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["items"][0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!(
            "{}/companies/{}/emissions",
            srv.base_url,
            TenantId::new()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (token, company_id) =
        register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;

    // The token authenticates and resolves the right tenant.
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant_id"].as_str().unwrap(), company_id);
    assert_eq!(body["role"], "admin");

    // Login with the correct password returns the same tenant.
    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({
            "email": "admin@alpha-tech.com",
            "password": "correct horse battery"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant"]["name"], "Alpha Tech");
    assert!(body["access_token"].as_str().is_some());

    // The company profile is reachable under its own id.
    let res = client
        .get(format!("{}/companies/{}", srv.base_url, company_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Alpha Tech");
    assert_eq!(body["domain"], "alpha-tech");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;

    let wrong_password = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": "admin@alpha-tech.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    let unknown_email = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": "nobody@nowhere.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical bodies: no account-enumeration oracle.
    let a = wrong_password.text().await.unwrap();
    let b = unknown_email.text().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn duplicate_email_conflicts_without_partial_tenant() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({
            "email": "admin@alpha-tech.com",
            "password": "another password",
            "first_name": "Other",
            "last_name": "Admin",
            "company": {
                "name": "Alpha Clone",
                "industry": "saas",
                "employee_count": 10,
                "annual_revenue_usd": 1.0,
                "headquarters_location": "Nowhere"
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");

    // The original account still authenticates with its own password; the
    // failed registration left nothing behind that the second password
    // could log into.
    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({
            "email": "admin@alpha-tech.com",
            "password": "another password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({
            "email": "admin@alpha-tech.com",
            "password": "correct horse battery"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn cross_tenant_path_access_is_forbidden() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (alpha_token, alpha_id) =
        register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;
    let (beta_token, _beta_id) = register(
        &client,
        &srv.base_url,
        "admin@beta-manufacturing.com",
        "Beta Manufacturing",
    )
    .await;

    // Beta reading Alpha's company: 403, before any handler runs.
    let res = client
        .get(format!("{}/companies/{}", srv.base_url, alpha_id))
        .bearer_auth(&beta_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");

    // Beta writing into Alpha's path: also 403, and nothing is created.
    let source_id = first_source_id(&client, &srv.base_url, &alpha_token, &alpha_id).await;
    let res = client
        .post(format!("{}/companies/{}/emissions", srv.base_url, alpha_id))
        .bearer_auth(&beta_token)
        .json(&json!({
            "source_id": source_id,
            "period_start": "2026-01-01T00:00:00Z",
            "period_end": "2026-01-31T00:00:00Z",
            "activity": { "kind": "electricity", "kwh": 1000.0 }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/companies/{}/emissions", srv.base_url, alpha_id))
        .bearer_auth(&alpha_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn emission_records_are_tenant_isolated() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (alpha_token, alpha_id) =
        register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;
    let (beta_token, beta_id) = register(
        &client,
        &srv.base_url,
        "admin@beta-manufacturing.com",
        "Beta Manufacturing",
    )
    .await;

    // Alpha records an emission; the figure is derived from the payload.
    let source_id = first_source_id(&client, &srv.base_url, &alpha_token, &alpha_id).await;
    let res = client
        .post(format!("{}/companies/{}/emissions", srv.base_url, alpha_id))
        .bearer_auth(&alpha_token)
        .json(&json!({
            "source_id": source_id,
            "period_start": "2026-01-01T00:00:00Z",
            "period_end": "2026-01-31T00:00:00Z",
            "activity": { "kind": "electricity", "kwh": 1000.0 }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let record: serde_json::Value = res.json().await.unwrap();
    assert!((record["co2e_kg"].as_f64().unwrap() - 385.0).abs() < 1e-9);
    assert_eq!(record["tenant_id"].as_str().unwrap(), alpha_id);

    // Alpha sees its record, scoped to its own tenant id.
    let res = client
        .get(format!("{}/companies/{}/emissions", srv.base_url, alpha_id))
        .bearer_auth(&alpha_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items.iter().all(|r| r["tenant_id"] == alpha_id.as_str()));

    // Beta's own listing does not contain it.
    let res = client
        .get(format!("{}/companies/{}/emissions", srv.base_url, beta_id))
        .bearer_auth(&beta_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn expired_token_is_unauthenticated() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_token, company_id) =
        register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;

    // Mint a token that expired two minutes ago, with the right secret.
    let expired = TokenService::new(jwt_secret.as_bytes())
        .with_ttl(ChronoDuration::seconds(-120))
        .issue(
            climabill_core::UserId::new(),
            company_id.parse().unwrap(),
            Role::Admin,
        )
        .unwrap();

    let res = client
        .get(format!("{}/companies/{}/emissions", srv.base_url, company_id))
        .bearer_auth(&expired)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn viewer_role_cannot_write() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (alpha_token, alpha_id) =
        register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;
    let source_id = first_source_id(&client, &srv.base_url, &alpha_token, &alpha_id).await;

    let viewer = TokenService::new(jwt_secret.as_bytes())
        .issue(
            climabill_core::UserId::new(),
            alpha_id.parse().unwrap(),
            Role::Viewer,
        )
        .unwrap();

    // Reads are allowed...
    let res = client
        .get(format!("{}/companies/{}/emissions", srv.base_url, alpha_id))
        .bearer_auth(&viewer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // ...writes are not.
    let res = client
        .post(format!("{}/companies/{}/emissions", srv.base_url, alpha_id))
        .bearer_auth(&viewer)
        .json(&json!({
            "source_id": source_id,
            "period_start": "2026-01-01T00:00:00Z",
            "period_end": "2026-01-31T00:00:00Z",
            "activity": { "kind": "electricity", "kwh": 10.0 }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_company_id_is_a_validation_error() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (token, _company_id) =
        register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;

    let res = client
        .get(format!("{}/companies/not-a-uuid/emissions", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn marketplace_purchase_retire_verify_lifecycle() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (alpha_token, alpha_id) =
        register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;
    let (beta_token, _beta_id) = register(
        &client,
        &srv.base_url,
        "admin@beta-manufacturing.com",
        "Beta Manufacturing",
    )
    .await;

    // Catalog is visible and filterable.
    let res = client
        .get(format!("{}/marketplace/projects?max_price=20.0", srv.base_url))
        .bearer_auth(&alpha_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["projects"].as_array().unwrap().len(), 1);

    // Alpha buys credits and receives a certificate.
    let res = client
        .post(format!("{}/marketplace/purchase", srv.base_url))
        .bearer_auth(&alpha_token)
        .json(&json!({ "listing_id": "LIST-001", "credits_amount": 100.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let code = body["certificate"]["certificate_code"]
        .as_str()
        .unwrap()
        .to_string();
    assert!((body["purchase"]["total_cost"].as_f64().unwrap() - 2550.0).abs() < 1e-9);

    // The certificate shows up under Alpha's company only.
    let res = client
        .get(format!("{}/companies/{}/certificates", srv.base_url, alpha_id))
        .bearer_auth(&alpha_token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    // Beta cannot retire Alpha's certificate: it does not exist for Beta.
    let res = client
        .post(format!("{}/marketplace/retire", srv.base_url))
        .bearer_auth(&beta_token)
        .json(&json!({ "certificate_code": code, "reason": "not mine" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Alpha retires it.
    let res = client
        .post(format!("{}/marketplace/retire", srv.base_url))
        .bearer_auth(&alpha_token)
        .json(&json!({ "certificate_code": code, "reason": "2026 offsetting" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Retiring twice conflicts.
    let res = client
        .post(format!("{}/marketplace/retire", srv.base_url))
        .bearer_auth(&alpha_token)
        .json(&json!({ "certificate_code": code, "reason": "again" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Verification answers validity + retirement, for any tenant.
    let res = client
        .get(format!("{}/marketplace/verify/{}", srv.base_url, code))
        .bearer_auth(&beta_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["retired"], true);
    assert!(body.get("tenant_id").is_none());
}

#[tokio::test]
async fn dashboard_and_calculators_respond() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (token, company_id) =
        register(&client, &srv.base_url, "admin@alpha-tech.com", "Alpha Tech").await;

    let res = client
        .post(format!("{}/calculate/electricity", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "kwh_consumed": 1000.0, "renewable_percentage": 0.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!((body["co2e_kg"].as_f64().unwrap() - 385.0).abs() < 1e-9);

    let res = client
        .get(format!("{}/companies/{}/dashboard", srv.base_url, company_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["company_id"].as_str().unwrap(), company_id);
    assert!(body["emissions_summary"].is_object());
    assert!(body["financial_impact"].is_object());

    let res = client
        .get(format!(
            "{}/benchmarks/saas?employee_count=42",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!((body["total_benchmark_tonnes"].as_f64().unwrap() - 176.4).abs() < 1e-6);
}
