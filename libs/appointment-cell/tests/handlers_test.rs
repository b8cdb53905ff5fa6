use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::router::appointment_routes;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

async fn create_test_app(mock_server: &MockServer) -> Router {
    appointment_routes(TestConfig::with_mock_server(&mock_server.uri()).to_arc())
}

async fn setup_doctor_mock(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/doctors/appointment/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::doctor_record_response()))
        .mount(mock_server)
        .await;
}

async fn post_booking(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: Value = serde_json::from_slice(&body).unwrap();

    (status, json_response)
}

fn booking_form(date: &str, time: &str) -> Value {
    json!({
        "name": "Ali Demir",
        "email": "ali@example.com",
        "date": date,
        "time": time
    })
}

#[tokio::test]
async fn test_book_appointment_success() {
    let mock_server = MockServer::start().await;
    setup_doctor_mock(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/appointments/book"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server).await;
    let (status, json_response) = post_booking(app, "/42/book", booking_form("2024-06-03", "09:00")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_response["success"], true);
    assert_eq!(json_response["message"], "Appointment booked successfully!");
    assert_eq!(json_response["redirect"], "/");
}

#[tokio::test]
async fn test_book_appointment_unavailable_day() {
    let mock_server = MockServer::start().await;
    setup_doctor_mock(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/appointments/book"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server).await;
    let (status, json_response) = post_booking(app, "/42/book", booking_form("2024-06-04", "10:00")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_response["error"], "The doctor is not available on Tue.");
}

#[tokio::test]
async fn test_book_appointment_outside_hours() {
    let mock_server = MockServer::start().await;
    setup_doctor_mock(&mock_server).await;

    let app = create_test_app(&mock_server).await;
    let (status, json_response) = post_booking(app, "/42/book", booking_form("2024-06-05", "08:59")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_response["error"], "The doctor is only available between 09:00 - 17:00.");
}

#[tokio::test]
async fn test_book_appointment_missing_field() {
    let mock_server = MockServer::start().await;
    setup_doctor_mock(&mock_server).await;

    let app = create_test_app(&mock_server).await;
    let (status, json_response) = post_booking(
        app,
        "/42/book",
        json!({ "email": "ali@example.com", "date": "2024-06-03", "time": "09:00" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_response["error"], "Your name is required");
}

#[tokio::test]
async fn test_book_appointment_doctor_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/doctors/appointment/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server).await;
    let (status, json_response) = post_booking(app, "/99/book", booking_form("2024-06-03", "09:00")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_response["error"], "Doctor not found");
}

#[tokio::test]
async fn test_book_appointment_backend_rejects() {
    let mock_server = MockServer::start().await;
    setup_doctor_mock(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/appointments/book"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server).await;
    let (status, json_response) = post_booking(app, "/42/book", booking_form("2024-06-03", "12:00")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json_response["error"], "Failed to book appointment. Please try again.");
}

#[tokio::test]
async fn test_book_appointment_skips_geocoding() {
    let mock_server = MockServer::start().await;
    setup_doctor_mock(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::geocode_ok_response(39.93, 32.85)))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/appointments/book"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server).await;
    let (status, _) = post_booking(app, "/42/book", booking_form("2024-06-03", "10:00")).await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_book_appointment_with_null_record_fields() {
    let mock_server = MockServer::start().await;

    let mut record = MockBackendResponses::doctor_record_response();
    record["address"] = Value::Null;
    record["available_days"] = Value::Null;

    Mock::given(method("GET"))
        .and(path("/api/doctors/appointment/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server).await;
    let (status, json_response) = post_booking(app, "/42/book", booking_form("2024-06-03", "10:00")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_response["error"], "The doctor is not available on Mon.");
}

#[tokio::test]
async fn test_book_appointment_forwards_trimmed_values() {
    let mock_server = MockServer::start().await;
    setup_doctor_mock(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/appointments/book"))
        .and(body_json(json!({
            "name": "Ali Demir",
            "email": "ali@example.com",
            "date": "2024-06-03",
            "time": "09:00",
            "doctorId": "42"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server).await;
    let (status, _) = post_booking(
        app,
        "/42/book",
        json!({
            "name": " Ali Demir ",
            "email": "  ali@example.com ",
            "date": " 2024-06-03 ",
            "time": "09:00"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
}
