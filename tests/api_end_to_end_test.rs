//! End-to-end tests for the REST API
//!
//! Each test binds its own server on an ephemeral port over the in-memory
//! store and talks to it with plain HTTP.

use reqwest::StatusCode;
use serde_json::{json, Value};
use shiftsync::adapters::memory::MemoryStore;
use shiftsync::api::{bind, serve, AppState};
use shiftsync::config::AuthConfig;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

struct TestServer {
    base_url: String,
    http: reqwest::Client,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<shiftsync::domain::Result<()>>,
}

impl TestServer {
    async fn start(require_auth: bool) -> Self {
        let auth = AuthConfig {
            require_auth,
            ..AuthConfig::default()
        };
        let state = AppState::new(Arc::new(MemoryStore::new()), &auth);
        let listener = bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(serve(listener, state, shutdown_rx));

        Self {
            base_url: format!("http://{address}"),
            http: reqwest::Client::new(),
            shutdown,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.unwrap();
        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(self.http.get(self.url(path)), token).await
    }

    async fn post(&self, path: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        self.send(self.http.post(self.url(path)).json(&body), token)
            .await
    }

    async fn put(&self, path: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        self.send(self.http.put(self.url(path)).json(&body), token)
            .await
    }

    /// Registers and logs in a nurse, returning the session token
    async fn sign_in(&self, email: &str) -> String {
        let (status, _) = self
            .post(
                "/api/auth/register",
                json!({
                    "name": "Jo Rivera",
                    "email": email,
                    "password": "night-shift",
                    "department": "ICU"
                }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .post(
                "/api/auth/login",
                json!({"email": email, "password": "night-shift"}),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    async fn stop(self) {
        self.shutdown.send(true).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

fn patient_body(mrn: &str, room: &str) -> Value {
    json!({
        "mrn": mrn,
        "firstName": "Maria",
        "lastName": "Lopez",
        "dateOfBirth": "1948-02-29",
        "roomNumber": room,
        "admittingDiagnosis": "CHF exacerbation",
        "codeStatus": "DNR",
        "allergies": "Sulfa, Iodine",
        "attendingPhysician": "Dr. Okafor"
    })
}

fn handoff_body(patient: &str, situation: &str) -> Value {
    json!({
        "patient": patient,
        "shift": "night",
        "situation": situation,
        "background": "Admitted with fluid overload",
        "assessment": "Lungs clearer, net negative 1.2L",
        "recommendation": "Daily weight, BMP in the morning",
        "vitals": {"heartRate": "88", "oxygenSaturation": 94},
        "medicationsDue": [
            {"medication": "Furosemide 40mg", "time": "06:00", "route": "IV"},
            {"medication": "", "time": "", "route": ""}
        ],
        "pendingTasks": [{"task": "Recheck potassium", "priority": "high"}],
        "urgentFlags": ["Fall risk"]
    })
}

#[tokio::test]
async fn test_banner_and_health() {
    let server = TestServer::start(true).await;

    let (status, body) = server.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ShiftSync API is running");

    let (status, body) = server.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "memory");

    server.stop().await;
}

#[tokio::test]
async fn test_register_login_and_me() {
    let server = TestServer::start(true).await;

    let (status, body) = server
        .post(
            "/api/auth/register",
            json!({
                "name": "Sam Lee",
                "email": "Sam.Lee@Hospital.org",
                "password": "pass1234",
                "role": "charge_nurse",
                "department": "Telemetry"
            }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully. Please log in.");
    assert_eq!(body["user"]["email"], "sam.lee@hospital.org");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = server
        .post(
            "/api/auth/login",
            json!({"email": "sam.lee@hospital.org", "password": "pass1234"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = server.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "charge_nurse");
    assert_eq!(body["user"]["department"], "Telemetry");

    server.stop().await;
}

#[tokio::test]
async fn test_auth_failures() {
    let server = TestServer::start(true).await;
    let token = server.sign_in("pat@ward.org").await;

    let (status, body) = server
        .post(
            "/api/auth/register",
            json!({"name": "Pat", "email": "PAT@ward.org", "password": "whatever", "department": "ER"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "email");

    let (status, wrong_password) = server
        .post(
            "/api/auth/login",
            json!({"email": "pat@ward.org", "password": "wrong-one"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, unknown_email) = server
        .post(
            "/api/auth/login",
            json!({"email": "ghost@ward.org", "password": "night-shift"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["message"], unknown_email["message"]);

    let (status, _) = server.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (payload, signature) = token.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{payload}.{flipped}{}", &signature[1..]);
    let (status, _) = server.get("/api/auth/me", Some(&tampered)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server.get("/api/patients", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    server.stop().await;
}

#[tokio::test]
async fn test_patient_to_handoff_flow() {
    let server = TestServer::start(true).await;
    let token = server.sign_in("charge@ward.org").await;
    let token = Some(token.as_str());

    let (status, body) = server
        .post("/api/patients", patient_body("MRN-9001", "12A"), token)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Patient created successfully");
    assert_eq!(body["patient"]["allergies"], json!(["Sulfa", "Iodine"]));
    assert_eq!(body["patient"]["isActive"], true);
    let patient_id = body["patient"]["id"].as_str().unwrap().to_string();

    let (status, body) = server
        .post("/api/patients", patient_body("MRN-9001", "14C"), token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "mrn");

    let (status, body) = server
        .post("/api/handoffs", handoff_body(&patient_id, "Diuresing well"), token)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Handoff created successfully");
    let handoff = &body["handoff"];
    assert_eq!(handoff["patient"]["mrn"], "MRN-9001");
    assert_eq!(handoff["vitals"]["heartRate"], 88.0);
    assert_eq!(handoff["medicationsDue"].as_array().unwrap().len(), 1);
    assert!(handoff["createdBy"].is_string());
    let handoff_id = handoff["id"].as_str().unwrap().to_string();

    server
        .post("/api/handoffs", handoff_body(&patient_id, "Second note"), token)
        .await;

    let (status, body) = server
        .get(&format!("/api/handoffs/patient/{patient_id}"), token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient handoffs retrieved successfully");
    assert_eq!(body["count"], 2);
    assert_eq!(body["handoffs"][0]["situation"], "Second note");

    let (status, body) = server.get(&format!("/api/handoffs/{handoff_id}"), token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handoff"]["patient"]["codeStatus"], "DNR");
    assert_eq!(body["handoff"]["patient"]["allergies"], json!(["Sulfa", "Iodine"]));

    let path = format!("/api/patients/{patient_id}");
    let (status, body) = server.put(&path, json!({"roomNumber": "3B"}), token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patient"]["roomNumber"], "3B");

    let (status, body) = server
        .send(
            server
                .http
                .delete(server.url(&format!("/api/patients/{patient_id}"))),
            token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patient"]["isActive"], false);

    let (_, body) = server.get("/api/patients", token).await;
    assert_eq!(body["count"], 0);
    let (status, _) = server.get(&format!("/api/handoffs/{handoff_id}"), token).await;
    assert_eq!(status, StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_ids_and_bad_bodies() {
    let server = TestServer::start(true).await;
    let token = server.sign_in("float@ward.org").await;
    let token = Some(token.as_str());
    let unknown = "5f0c4f0e-3a1b-4c55-9d4e-0d6b7c8e9f10";

    for path in [
        format!("/api/patients/{unknown}"),
        "/api/patients/not-a-uuid".to_string(),
        format!("/api/handoffs/{unknown}"),
    ] {
        let (status, _) = server.get(&path, token).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
    }

    let (status, body) = server.get("/api/handoffs/patient/not-a-uuid", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    let (status, _) = server
        .post("/api/handoffs", handoff_body(unknown, "Orphan"), token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server
        .send(
            server
                .http
                .post(server.url("/api/patients"))
                .header("content-type", "application/json")
                .body("{\"mrn\": "),
            token,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));

    let (status, body) = server
        .post(
            "/api/handoffs",
            json!({"shift": "evening", "situation": "x"}),
            token,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"shift"));
    assert!(fields.contains(&"background"));

    server.stop().await;
}

#[tokio::test]
async fn test_patient_update_checks_id_before_body() {
    let server = TestServer::start(true).await;
    let token = server.sign_in("nights@ward.org").await;
    let token = Some(token.as_str());

    let unknown = "/api/patients/5f0c4f0e-3a1b-4c55-9d4e-0d6b7c8e9f10";
    let (status, _) = server.put(unknown, json!({"bedSide": "left"}), token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = server
        .post("/api/patients", patient_body("MRN-7070", "2C"), token)
        .await;
    let path = format!("/api/patients/{}", body["patient"]["id"].as_str().unwrap());
    let (status, _) = server.put(&path, json!({"bedSide": "left"}), token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    server.stop().await;
}

#[tokio::test]
async fn test_unreadable_vitals_rejected() {
    let server = TestServer::start(true).await;
    let token = server.sign_in("triage@ward.org").await;
    let token = Some(token.as_str());

    let (_, body) = server
        .post("/api/patients", patient_body("MRN-8080", "5D"), token)
        .await;
    let patient_id = body["patient"]["id"].as_str().unwrap().to_string();

    let mut handoff = handoff_body(&patient_id, "Hypertensive overnight");
    handoff["vitals"] = json!({"bloodPressure": "120/80", "heartRate": "88"});
    let (status, body) = server.post("/api/handoffs", handoff, token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "vitals.bloodPressure");

    let path = format!("/api/handoffs/patient/{patient_id}");
    let (_, body) = server.get(&path, token).await;
    assert_eq!(body["count"], 0);

    server.stop().await;
}

#[tokio::test]
async fn test_open_routes_when_auth_not_required() {
    let server = TestServer::start(false).await;

    let (status, body) = server
        .post("/api/patients", patient_body("MRN-OPEN", "1A"), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let patient_id = body["patient"]["id"].as_str().unwrap().to_string();

    let (status, body) = server
        .post("/api/handoffs", handoff_body(&patient_id, "Unauthenticated"), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["handoff"].get("createdBy").is_none());

    let (status, _) = server.get("/api/patients", Some("garbage.token.value")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    server.stop().await;
}
