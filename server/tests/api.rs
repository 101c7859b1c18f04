use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_db::DatabaseSettings;
use serde_json::{Value, json};
use server::{AppConfig, AppState, build_router};
use tower::ServiceExt;
use uuid::Uuid;

async fn app() -> Router {
    let settings = DatabaseSettings::default().with_max_connections(1);
    let pool = platform_db::connect_url("sqlite::memory:", &settings)
        .await
        .expect("sqlite connects");
    Migrator::up(&pool, None).await.expect("migrations apply");
    let config = AppConfig::with_origin("http://localhost:3000").unwrap();
    build_router(AppState::new(pool, config))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(app: &Router, path: &str, body: Value) -> Value {
    let response = send(app, "POST", path, Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

async fn seed_references(app: &Router) -> (String, String) {
    let department = create(
        app,
        "/api/v1/departments",
        json!({ "departmentCode": "PB00001", "departmentName": "Engineering" }),
    )
    .await;
    let position = create(
        app,
        "/api/v1/positions",
        json!({ "positionCode": "VT00001", "positionName": "Developer" }),
    )
    .await;
    (
        department["metadata"]["department"]["departmentId"]
            .as_str()
            .unwrap()
            .to_string(),
        position["metadata"]["position"]["positionId"]
            .as_str()
            .unwrap()
            .to_string(),
    )
}

fn employee(code: &str, name: &str, department_id: &str, position_id: &str) -> Value {
    json!({
        "employeeCode": code,
        "fullName": name,
        "email": format!("{}@example.com", code.to_lowercase()),
        "phoneNumber": "0900000000",
        "identityNumber": "012345678",
        "departmentId": department_id,
        "positionId": position_id,
        "dateOfBirth": "1990-01-01",
        "gender": 1
    })
}

#[tokio::test]
async fn department_lifecycle_end_to_end() {
    let app = app().await;
    let response = send(
        &app,
        "POST",
        "/api/v1/departments",
        Some(json!({ "departmentCode": "PB00001", "departmentName": "Engineering" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let created = json_body(response).await;
    assert_eq!(created["status"], "success");
    assert_eq!(created["code"], 201);
    let id = created["metadata"]["department"]["departmentId"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(location, format!("/api/v1/departments/{id}"));

    let response = send(&app, "GET", &location, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response).await;
    assert_eq!(fetched["metadata"]["department"]["departmentCode"], "PB00001");
    assert_eq!(fetched["metadata"]["department"]["departmentName"], "Engineering");

    let response = send(&app, "DELETE", &location, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = json_body(response).await;
    assert_eq!(deleted["status"], "success");
    assert!(deleted.get("metadata").is_none());

    let response = send(&app, "GET", &location, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let missing = json_body(response).await;
    assert_eq!(missing["status"], "error");
    assert_eq!(missing["code"], 404);
}

#[tokio::test]
async fn malformed_ids_are_rejected_before_storage() {
    let app = app().await;
    for (method, uri) in [
        ("GET", "/api/v1/departments/not-a-uuid"),
        ("DELETE", "/api/v1/positions/12345"),
        ("GET", "/api/v1/employees/xyz"),
    ] {
        let response = send(&app, method, uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
        let body = json_body(response).await;
        assert_eq!(body["message"], "Invalid identifier");
        assert_eq!(body["code"], 400);
    }
}

#[tokio::test]
async fn unknown_ids_answer_not_found() {
    let app = app().await;
    let uri = format!("/api/v1/positions/{}", Uuid::new_v4());
    let response = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "positionCode": "VT00001", "positionName": "Tester" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["message"], "Position not found");

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_codes_fail_validation() {
    let app = app().await;
    create(
        &app,
        "/api/v1/departments",
        json!({ "departmentCode": "PB00001", "departmentName": "Engineering" }),
    )
    .await;

    let response = send(
        &app,
        "POST",
        "/api/v1/departments",
        Some(json!({ "departmentCode": "PB00001", "departmentName": "Sales" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["errors"]["departmentCode"],
        json!(["Department code already exists"])
    );

    create(
        &app,
        "/api/v1/departments",
        json!({ "departmentCode": "PB00002", "departmentName": "Sales" }),
    )
    .await;
}

#[tokio::test]
async fn validation_errors_list_every_failing_field() {
    let app = app().await;
    let response = send(
        &app,
        "POST",
        "/api/v1/employees",
        Some(json!({ "employeeCode": "XX1", "email": "nope" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    let errors = body["errors"].as_object().unwrap();
    for field in [
        "employeeCode",
        "fullName",
        "email",
        "phoneNumber",
        "identityNumber",
        "departmentId",
        "positionId",
    ] {
        assert!(errors.contains_key(field), "missing {field} in {body}");
    }
    assert_eq!(body["errors"]["email"], json!(["Email is invalid"]));
}

#[tokio::test]
async fn employee_references_must_exist() {
    let app = app().await;
    let response = send(
        &app,
        "POST",
        "/api/v1/employees",
        Some(employee(
            "NV00001",
            "Nguyen Van An",
            &Uuid::new_v4().to_string(),
            &Uuid::new_v4().to_string(),
        )),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["errors"]["departmentId"], json!(["Department does not exist"]));
    assert_eq!(body["errors"]["positionId"], json!(["Position does not exist"]));
}

#[tokio::test]
async fn update_persists_under_the_path_id() {
    let app = app().await;
    let first = create(
        &app,
        "/api/v1/positions",
        json!({ "positionCode": "VT00001", "positionName": "Developer" }),
    )
    .await;
    let second = create(
        &app,
        "/api/v1/positions",
        json!({ "positionCode": "VT00002", "positionName": "Tester" }),
    )
    .await;
    let first_id = first["metadata"]["position"]["positionId"].as_str().unwrap();
    let second_id = second["metadata"]["position"]["positionId"].as_str().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/api/v1/positions/{first_id}"),
        Some(json!({
            "positionId": second_id,
            "positionCode": "VT00001",
            "positionName": "Senior Developer"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await.get("metadata").is_none());

    let first = json_body(send(&app, "GET", &format!("/api/v1/positions/{first_id}"), None).await).await;
    assert_eq!(first["metadata"]["position"]["positionName"], "Senior Developer");
    let second = json_body(send(&app, "GET", &format!("/api/v1/positions/{second_id}"), None).await).await;
    assert_eq!(second["metadata"]["position"]["positionName"], "Tester");
}

#[tokio::test]
async fn new_codes_follow_the_latest() {
    let app = app().await;
    let body = json_body(send(&app, "GET", "/api/v1/departments/newDepartmentCode", None).await).await;
    assert_eq!(body["metadata"]["departmentCode"], "PB00001");

    create(
        &app,
        "/api/v1/departments",
        json!({ "departmentCode": "PB00042", "departmentName": "Legal" }),
    )
    .await;
    let body = json_body(send(&app, "GET", "/api/v1/departments/newDepartmentCode", None).await).await;
    assert_eq!(body["metadata"]["departmentCode"], "PB00043");

    let body = json_body(send(&app, "GET", "/api/v1/positions/newPositionCode", None).await).await;
    assert_eq!(body["metadata"]["positionCode"], "VT00001");
    let body = json_body(send(&app, "GET", "/api/v1/employees/newEmployeeCode", None).await).await;
    assert_eq!(body["metadata"]["employeeCode"], "NV00001");
}

#[tokio::test]
async fn filtered_listing_pages_and_filters() {
    let app = app().await;
    let (department_id, position_id) = seed_references(&app).await;
    for (code, name) in [
        ("NV00001", "Nguyen Van An"),
        ("NV00002", "Tran Thi Binh"),
        ("NV00003", "Le Van Cuong"),
        ("NV00004", "Pham Van Dung"),
        ("NV00005", "Hoang Thi Em"),
    ] {
        create(&app, "/api/v1/employees", employee(code, name, &department_id, &position_id)).await;
    }

    let response = send(&app, "GET", "/api/v1/employees/filter?pageSize=2&pageNumber=2", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let meta = json_body(response).await["metadata"].clone();
    assert_eq!(meta["totalRecords"], 5);
    assert_eq!(meta["totalPages"], 3);
    assert_eq!(meta["currentPageNumber"], 2);
    assert_eq!(meta["currentPageRecords"], 2);
    assert_eq!(meta["employees"][0]["employeeCode"], "NV00003");

    let meta = json_body(
        send(&app, "GET", "/api/v1/employees/filter?pageSize=2&pageNumber=10", None).await,
    )
    .await["metadata"]
        .clone();
    assert_eq!(meta["totalRecords"], 5);
    assert_eq!(meta["currentPageRecords"], 0);
    assert_eq!(meta["employees"], json!([]));

    let uri = format!(
        "/api/v1/employees/filter?employeeFilter=van&departmentId={department_id}&positionId={position_id}"
    );
    let meta = json_body(send(&app, "GET", &uri, None).await).await["metadata"].clone();
    assert_eq!(meta["totalRecords"], 3);
    let names: Vec<_> = meta["employees"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["fullName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Nguyen Van An", "Le Van Cuong", "Pham Van Dung"]);

    let uri = format!("/api/v1/employees/filter?positionId={}", Uuid::new_v4());
    let meta = json_body(send(&app, "GET", &uri, None).await).await["metadata"].clone();
    assert_eq!(meta["totalRecords"], 0);
    assert_eq!(meta["totalPages"], 0);
}

#[tokio::test]
async fn filter_parameters_are_checked() {
    let app = app().await;
    let nil = Uuid::nil();
    for (query, message) in [
        (format!("departmentId={nil}"), "Please select a valid department"),
        (format!("positionId={nil}"), "Please select a valid position"),
        ("pageSize=0".to_string(), "Please select a valid page size"),
        ("pageNumber=-3".to_string(), "Please select a valid page number"),
    ] {
        let response = send(&app, "GET", &format!("/api/v1/employees/filter?{query}"), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(json_body(response).await["message"], message);
    }

    let response = send(&app, "GET", "/api/v1/employees/filter?pageSize=abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("Invalid query string"));
}

#[tokio::test]
async fn malformed_bodies_and_unknown_routes_use_the_envelope() {
    let app = app().await;
    let request = Request::post("/api/v1/departments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));

    let response = send(&app, "GET", "/api/v1/nowhere", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], 404);
}

#[tokio::test]
async fn health_reports_database_status() {
    let app = app().await;
    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["dbOk"], true);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn assigned_departments_and_positions_cannot_be_deleted() {
    let app = app().await;
    let (department_id, position_id) = seed_references(&app).await;
    let created = create(
        &app,
        "/api/v1/employees",
        employee("NV00001", "Nguyen Van An", &department_id, &position_id),
    )
    .await;
    let employee_id = created["metadata"]["employee"]["employeeId"]
        .as_str()
        .unwrap()
        .to_string();

    for (uri, message) in [
        (
            format!("/api/v1/departments/{department_id}"),
            "Department is still assigned to employees",
        ),
        (
            format!("/api/v1/positions/{position_id}"),
            "Position is still assigned to employees",
        ),
    ] {
        let response = send(&app, "DELETE", &uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = json_body(response).await;
        assert_eq!(body["message"], message);
        assert_eq!(body["status"], "error");
        assert_eq!(send(&app, "GET", &uri, None).await.status(), StatusCode::OK);
    }

    let response = send(&app, "DELETE", &format!("/api/v1/employees/{employee_id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, "DELETE", &format!("/api/v1/departments/{department_id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, "DELETE", &format!("/api/v1/positions/{position_id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn filter_needs_both_department_and_position_to_match() {
    let app = app().await;
    let (engineering, developer) = seed_references(&app).await;
    let sales = create(
        &app,
        "/api/v1/departments",
        json!({ "departmentCode": "PB00002", "departmentName": "Sales" }),
    )
    .await["metadata"]["department"]["departmentId"]
        .as_str()
        .unwrap()
        .to_string();
    let tester = create(
        &app,
        "/api/v1/positions",
        json!({ "positionCode": "VT00002", "positionName": "Tester" }),
    )
    .await["metadata"]["position"]["positionId"]
        .as_str()
        .unwrap()
        .to_string();
    for (code, department, position) in [
        ("NV00001", &engineering, &developer),
        ("NV00002", &engineering, &tester),
        ("NV00003", &sales, &developer),
    ] {
        create(&app, "/api/v1/employees", employee(code, code, department, position)).await;
    }

    let uri = format!("/api/v1/employees/filter?departmentId={engineering}&positionId={developer}");
    let meta = json_body(send(&app, "GET", &uri, None).await).await["metadata"].clone();
    assert_eq!(meta["totalRecords"], 1);
    assert_eq!(meta["employees"][0]["employeeCode"], "NV00001");

    let uri = format!("/api/v1/employees/filter?departmentId={sales}&positionId={tester}");
    let meta = json_body(send(&app, "GET", &uri, None).await).await["metadata"].clone();
    assert_eq!(meta["totalRecords"], 0);
}

#[tokio::test]
async fn largest_page_number_answers_an_empty_page() {
    let app = app().await;
    let (department_id, position_id) = seed_references(&app).await;
    create(
        &app,
        "/api/v1/employees",
        employee("NV00001", "Nguyen Van An", &department_id, &position_id),
    )
    .await;

    let uri = format!("/api/v1/employees/filter?pageSize=20&pageNumber={}", i64::MAX);
    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let meta = json_body(response).await["metadata"].clone();
    assert_eq!(meta["totalRecords"], 1);
    assert_eq!(meta["totalPages"], 1);
    assert_eq!(meta["currentPageRecords"], 0);
    assert_eq!(meta["currentPageNumber"], i64::MAX);
    assert_eq!(meta["employees"], json!([]));
}
