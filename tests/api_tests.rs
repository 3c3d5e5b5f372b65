//! Tests de integración de la API completa contra el store en memoria.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use drivenow_rentals::build_router;
use drivenow_rentals::config::EnvironmentConfig;
use drivenow_rentals::repositories::MemoryStore;
use drivenow_rentals::services::email_service::LogMailer;
use drivenow_rentals::services::file_service::DataUriStorage;
use drivenow_rentals::services::jwt_service::JwtService;
use drivenow_rentals::state::AppState;
use drivenow_rentals::utils::ids::IdGenerator;

fn test_app() -> Router {
    test_app_with_store(Arc::new(MemoryStore::new()))
}

fn test_app_with_store(store: Arc<MemoryStore>) -> Router {
    let config = EnvironmentConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None,
        jwt_secret: "test-secret".to_string(),
        jwt_expiration_hours: 24,
        upload_dir: "uploads".to_string(),
        frontend_url: "http://localhost:3000".to_string(),
        email_api_url: None,
        email_api_key: None,
        email_sender: None,
        admin_email: None,
        admin_password: None,
    };
    let state = AppState::new(
        store,
        Arc::new(IdGenerator::starting_at(1000)),
        JwtService::new("test-secret", 24),
        Arc::new(LogMailer::new("http://localhost:3000".to_string())),
        Arc::new(DataUriStorage::new()),
        config,
    );
    build_router(state)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

const BOUNDARY: &str = "test-boundary-7d93f1a";

fn multipart_body(text_fields: &[(&str, &str)], files: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in text_fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for (name, file_name, mime_type, bytes) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn send_multipart(
    app: &Router,
    method: &str,
    uri: &str,
    body: Vec<u8>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn sample_vehicle_body(plate: &str, vin: &str) -> Value {
    json!({
        "make": "Toyota",
        "model": "Corolla",
        "year": "2022",
        "licensePlate": plate,
        "vin": vin,
        "bondAmount": 500,
        "rentPerWeek": 300
    })
}

async fn create_vehicle(app: &Router, plate: &str, vin: &str) -> i64 {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/vehicles",
        Some(sample_vehicle_body(plate, vin)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["vehicle"]["id"].as_i64().unwrap()
}

fn rental_form(vehicle_id: i64) -> Vec<u8> {
    let vehicle_id = vehicle_id.to_string();
    multipart_body(
        &[
            ("vehicleId", vehicle_id.as_str()),
            ("firstName", "Joshua"),
            ("lastName", "Bayagalla"),
            ("email", "joshua@example.com"),
            ("phone", "0400000000"),
            ("licenseNumber", "LIC-9001"),
            ("licenseExpiry", "2027-06-30"),
            ("address", "1 Example St"),
            ("emergencyContact", "Jane Bayagalla"),
            ("emergencyPhone", "0400000001"),
            ("contractPeriod", "3 months"),
            ("contractSigned", "true"),
        ],
        &[
            ("licenseCard", "license.pdf", "application/pdf", b"%PDF-1.4"),
            ("carPhotos", "front.png", "image/png", &[1, 2, 3]),
            ("paymentReceipt", "receipt.png", "image/png", &[4, 5, 6]),
        ],
    )
}

#[tokio::test]
async fn health_check_responds_ok() {
    let app = test_app();
    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn duplicate_license_plate_or_vin_is_rejected() {
    let app = test_app();
    create_vehicle(&app, "ABC-123", "VIN0001").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/vehicles",
        Some(sample_vehicle_body("ABC-123", "VIN0002")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Vehicle with this license plate or VIN already exists"
    );

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/vehicles",
        Some(sample_vehicle_body("XYZ-999", "VIN0001")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_body_fields_are_rejected() {
    let app = test_app();
    let mut body = sample_vehicle_body("ABC-124", "VIN0003");
    body["surpriseField"] = json!("boom");
    let (status, _) = send_json(&app, "POST", "/api/vehicles", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn driver_creation_claims_the_selected_vehicle() {
    let app = test_app();
    let vehicle_id = create_vehicle(&app, "DRV-001", "VIN1001").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/drivers",
        Some(json!({
            "firstName": "Ana",
            "lastName": "Pérez",
            "email": "ana@example.com",
            "phone": "0411111111",
            "licenseNumber": "LIC-0001",
            "selectedVehicleId": vehicle_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let driver_id = body["driver"]["id"].as_i64().unwrap();
    assert_eq!(body["driver"]["vehicle"]["status"], "assigned");

    let (_, vehicle) = send_json(&app, "GET", &format!("/api/vehicles/{}", vehicle_id), None).await;
    assert_eq!(vehicle["status"], "assigned");
    assert_eq!(vehicle["assignedDriverId"], json!(driver_id));

    // Borrar el conductor libera el vehículo en el mismo commit
    let (status, _) =
        send_json(&app, "DELETE", &format!("/api/drivers/{}", driver_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, vehicle) = send_json(&app, "GET", &format!("/api/vehicles/{}", vehicle_id), None).await;
    assert_eq!(vehicle["status"], "available");
    assert_eq!(vehicle["assignedDriverId"], Value::Null);
}

#[tokio::test]
async fn claiming_an_unavailable_vehicle_fails() {
    let app = test_app();
    let vehicle_id = create_vehicle(&app, "DRV-002", "VIN1002").await;
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/vehicles/{}", vehicle_id),
        Some(json!({
            "make": "Toyota",
            "model": "Corolla",
            "year": "2022",
            "licensePlate": "DRV-002",
            "vin": "VIN1002",
            "status": "maintenance"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/drivers",
        Some(json!({
            "firstName": "Ana",
            "lastName": "Pérez",
            "email": "ana2@example.com",
            "phone": "0411111111",
            "licenseNumber": "LIC-0002",
            "selectedVehicleId": vehicle_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Selected vehicle is not available");
}

#[tokio::test]
async fn created_driver_defaults_to_pending_status() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/drivers",
        Some(json!({
            "firstName": "Ana",
            "lastName": "Pérez",
            "email": "pending@example.com",
            "phone": "0411111111",
            "licenseNumber": "LIC-PEND"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["driver"]["status"], "pending");

    // Con status explícito en el body, ese valor manda
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/drivers",
        Some(json!({
            "firstName": "Ana",
            "lastName": "Gómez",
            "email": "active@example.com",
            "phone": "0411111112",
            "licenseNumber": "LIC-ACT",
            "status": "active"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["driver"]["status"], "active");
}

#[tokio::test]
async fn duplicate_driver_email_or_license_is_rejected() {
    let app = test_app();
    let driver = json!({
        "firstName": "Ana",
        "lastName": "Pérez",
        "email": "dup@example.com",
        "phone": "0411111111",
        "licenseNumber": "LIC-DUP"
    });
    let (status, _) = send_json(&app, "POST", "/api/drivers", Some(driver.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(&app, "POST", "/api/drivers", Some(driver)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Driver with this email or license number already exists"
    );
}

#[tokio::test]
async fn rental_submission_requires_an_available_vehicle() {
    let app = test_app();
    let vehicle_id = create_vehicle(&app, "RNT-001", "VIN2001").await;
    send_json(
        &app,
        "PUT",
        &format!("/api/vehicles/{}", vehicle_id),
        Some(json!({
            "make": "Toyota",
            "model": "Corolla",
            "year": "2022",
            "licensePlate": "RNT-001",
            "vin": "VIN2001",
            "status": "maintenance"
        })),
    )
    .await;

    let (status, body) = send_multipart(&app, "POST", "/api/rentals", rental_form(vehicle_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Vehicle is not available for rent");

    // Nada quedó persistido
    let (_, applications) = send_json(&app, "GET", "/api/rental-applications", None).await;
    assert_eq!(applications.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn rental_submission_rejects_unsigned_contract() {
    let app = test_app();
    let vehicle_id = create_vehicle(&app, "RNT-002", "VIN2002").await;
    let vehicle_id_text = vehicle_id.to_string();
    let form = multipart_body(
        &[
            ("vehicleId", vehicle_id_text.as_str()),
            ("firstName", "Joshua"),
            ("lastName", "Bayagalla"),
            ("email", "joshua@example.com"),
            ("phone", "0400000000"),
            ("licenseNumber", "LIC-9002"),
            ("licenseExpiry", "2027-06-30"),
            ("address", "1 Example St"),
            ("emergencyContact", "Jane"),
            ("emergencyPhone", "0400000001"),
            ("contractPeriod", "3 months"),
            ("contractSigned", "false"),
        ],
        &[
            ("licenseCard", "license.pdf", "application/pdf", b"%PDF-1.4"),
            ("carPhotos", "front.png", "image/png", &[1, 2, 3]),
            ("paymentReceipt", "receipt.png", "image/png", &[4, 5, 6]),
        ],
    );
    let (status, _) = send_multipart(&app, "POST", "/api/rentals", form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn approval_rents_the_vehicle_and_is_idempotent() {
    let app = test_app();
    let vehicle_id = create_vehicle(&app, "RNT-003", "VIN2003").await;

    let (status, body) = send_multipart(&app, "POST", "/api/rentals", rental_form(vehicle_id)).await;
    assert_eq!(status, StatusCode::CREATED);
    let application = &body["application"];
    let application_id = application["id"].as_i64().unwrap();
    assert_eq!(application["status"], "pending_approval");
    // 3 meses desde hoy; el vehículo no cambia hasta la decisión
    assert_eq!(application["bondAmount"], 500);
    let (_, vehicle) = send_json(&app, "GET", &format!("/api/vehicles/{}", vehicle_id), None).await;
    assert_eq!(vehicle["status"], "available");

    let decide_uri = format!("/api/rental-applications/{}", application_id);
    let (status, body) = send_json(
        &app,
        "PUT",
        &decide_uri,
        Some(json!({ "status": "approved", "adminNotes": "ok" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application"]["status"], "approved");
    let driver_id = body["application"]["driverId"].as_i64().unwrap();
    assert_eq!(body["driver"]["status"], "active");
    assert_eq!(body["vehicle"]["status"], "rented");
    assert_eq!(body["vehicle"]["assignedDriverId"], json!(driver_id));

    // Reintentar la aprobación produce el mismo estado final
    let (status, body) = send_json(
        &app,
        "PUT",
        &decide_uri,
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application"]["driverId"], json!(driver_id));
    let (_, drivers) = send_json(&app, "GET", "/api/drivers", None).await;
    assert_eq!(drivers.as_array().unwrap().len(), 1);
    let (_, vehicle) = send_json(&app, "GET", &format!("/api/vehicles/{}", vehicle_id), None).await;
    assert_eq!(vehicle["status"], "rented");
}

#[tokio::test]
async fn rejection_releases_the_vehicle() {
    let app = test_app();
    let vehicle_id = create_vehicle(&app, "RNT-004", "VIN2004").await;
    let (_, body) = send_multipart(&app, "POST", "/api/rentals", rental_form(vehicle_id)).await;
    let application_id = body["application"]["id"].as_i64().unwrap();

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/rental-applications/{}", application_id),
        Some(json!({ "status": "rejected", "adminNotes": "incomplete docs" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application"]["status"], "rejected");
    assert_eq!(body["vehicle"]["status"], "available");

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/rental-applications/{}", application_id),
        Some(json!({ "status": "maybe" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vehicle_documents_feed_expiry_alerts() {
    let app = test_app();
    let vehicle_id = create_vehicle(&app, "DOC-001", "VIN3001").await;

    let expiry = (chrono::Utc::now().date_naive() + chrono::Duration::days(10)).to_string();
    let form = multipart_body(
        &[
            ("documentType", "car_insurance"),
            ("expiryDate", expiry.as_str()),
            ("uploadedBy", "admin"),
        ],
        &[("documentFile", "insurance.pdf", "application/pdf", b"%PDF-1.4")],
    );
    let (status, body) = send_multipart(
        &app,
        "POST",
        &format!("/api/vehicles/{}/documents", vehicle_id),
        form,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["document"]["status"], "active");

    let (status, alerts) = send_json(&app, "GET", "/api/document-expiry-alerts", None).await;
    assert_eq!(status, StatusCode::OK);
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["alertLevel"], "warning");
    assert_eq!(alerts[0]["documentType"], "car_insurance");
    assert_eq!(alerts[0]["ownerLabel"], "Toyota Corolla");
    assert_eq!(alerts[0]["daysUntilExpiry"], 10);

    let (_, stats) = send_json(&app, "GET", "/api/dashboard/document-stats", None).await;
    assert_eq!(stats["totalDocuments"], 1);
    assert_eq!(stats["expiringSoonDocuments"], 1);
}

#[tokio::test]
async fn vehicle_documents_use_the_fixed_catalog() {
    let app = test_app();
    let vehicle_id = create_vehicle(&app, "DOC-002", "VIN3002").await;

    let form = multipart_body(
        &[("documentType", "mystery_paper")],
        &[("documentFile", "doc.pdf", "application/pdf", b"%PDF-1.4")],
    );
    let (status, _) = send_multipart(
        &app,
        "POST",
        &format!("/api/vehicles/{}/documents", vehicle_id),
        form,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, types) = send_json(&app, "GET", "/api/document-types", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(types.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn driver_document_download_is_gated_on_payment() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/drivers",
        Some(json!({
            "firstName": "Ana",
            "lastName": "Pérez",
            "email": "gate@example.com",
            "phone": "0411111111",
            "licenseNumber": "LIC-GATE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let driver_id = body["driver"]["id"].as_i64().unwrap();

    let form = multipart_body(
        &[("documentType", "driver_license")],
        &[("documentFile", "license.pdf", "application/pdf", b"%PDF-1.4")],
    );
    let (status, body) = send_multipart(
        &app,
        "POST",
        &format!("/api/drivers/{}/documents", driver_id),
        form,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let doc_id = body["document"]["id"].as_i64().unwrap();

    // Sin pago: 403, exista o no el documento
    let download_uri = format!("/api/drivers/{}/documents/{}/download", driver_id, doc_id);
    let (status, body) = send_json(&app, "GET", &download_uri, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Payment required to access documents");
    let (status, _) = send_json(
        &app,
        "GET",
        &format!("/api/drivers/{}/documents/999/download", driver_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Con el comprobante de pago registrado, la descarga abre
    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/drivers/{}/payment", driver_id),
        Some(json!({ "paymentReceiptUploaded": true, "paymentAmount": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let request = Request::builder()
        .method("GET")
        .uri(&download_uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"%PDF-1.4");
}

#[tokio::test]
async fn reassigning_a_driver_swaps_both_vehicles() {
    let app = test_app();
    let first_vehicle = create_vehicle(&app, "SWP-001", "VIN4001").await;
    let second_vehicle = create_vehicle(&app, "SWP-002", "VIN4002").await;

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/drivers",
        Some(json!({
            "firstName": "Ana",
            "lastName": "Pérez",
            "email": "swap@example.com",
            "phone": "0411111111",
            "licenseNumber": "LIC-SWAP",
            "selectedVehicleId": first_vehicle
        })),
    )
    .await;
    let driver_id = body["driver"]["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/drivers/{}", driver_id),
        Some(json!({ "selectedVehicleId": second_vehicle })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, old_vehicle) =
        send_json(&app, "GET", &format!("/api/vehicles/{}", first_vehicle), None).await;
    assert_eq!(old_vehicle["status"], "available");
    assert_eq!(old_vehicle["assignedDriverId"], Value::Null);
    let (_, new_vehicle) =
        send_json(&app, "GET", &format!("/api/vehicles/{}", second_vehicle), None).await;
    assert_eq!(new_vehicle["status"], "assigned");
    assert_eq!(new_vehicle["assignedDriverId"], json!(driver_id));
}

#[tokio::test]
async fn signup_and_login_flow_enforces_verification() {
    let app = test_app();
    let credentials = json!({ "email": "user@example.com", "password": "secret123" });

    let (status, body) = send_json(&app, "POST", "/api/signup", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["verified"], false);
    assert!(body["user"]["passwordHash"].is_null());

    // Registro duplicado
    let (status, body) = send_json(&app, "POST", "/api/signup", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");

    // Login sin verificar
    let (status, body) = send_json(&app, "POST", "/api/login", Some(credentials)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["needsVerification"], true);

    // Credenciales inválidas
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/login",
        Some(json!({ "email": "user@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    // Token de verificación inválido
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/verify-email",
        Some(json!({ "token": "bogus", "email": "user@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn seeded_admin_account_can_log_in() {
    use drivenow_rentals::controllers::auth_controller::ensure_admin_user;

    let store = Arc::new(MemoryStore::new());
    ensure_admin_user(store.as_ref(), "Admin@Example.com", "admin-secret")
        .await
        .unwrap();
    // Sembrar de nuevo no pisa la cuenta existente
    ensure_admin_user(store.as_ref(), "admin@example.com", "other-password")
        .await
        .unwrap();

    let app = test_app_with_store(store);
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/login",
        Some(json!({ "email": "admin@example.com", "password": "admin-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["verified"], true);
}

#[tokio::test]
async fn unknown_resources_return_not_found() {
    let app = test_app();
    let (status, body) = send_json(&app, "GET", "/api/vehicles/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Vehicle not found");

    let (status, _) = send_json(&app, "GET", "/api/drivers/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/rental-applications/12345",
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
