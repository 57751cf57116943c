mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;

use heartrisk_model::gateway::ModelGateway;
use heartrisk_server::app;
use heartrisk_server::state::AppState;

use common::{missing_gateway, stub_gateway, REFERENCE_FORM};

async fn send(gateway: ModelGateway, request: Request<Body>) -> Response {
    let state = AppState::new(gateway).unwrap();
    app(state).oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_model_state() {
    let response = send(missing_gateway(), get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model_loaded"], false);

    let json = body_json(send(stub_gateway(0.5), get("/health")).await).await;
    assert_eq!(json["model_loaded"], true);
}

#[tokio::test]
async fn index_renders_form_with_defaults() {
    let response = send(stub_gateway(0.5), get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Patient Vitals"));
    assert!(html.contains("Patient Data Summary"));
    assert!(html.contains("<td>58</td>"));
    assert!(!html.contains(r#"id="result""#));
}

#[tokio::test]
async fn index_reflects_query_state() {
    let html = body_text(send(stub_gateway(0.5), get("/?age=71&sex=female")).await).await;
    assert!(html.contains("<td>71</td>"));
}

#[tokio::test]
async fn assess_form_renders_high_risk() {
    let response = send(stub_gateway(0.45), post_form("/assess", REFERENCE_FORM)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("45.0%"));
    assert!(html.contains("HIGH RISK"));
    assert!(html.contains("Refer to Cardiology"));
}

#[tokio::test]
async fn assess_form_renders_low_risk() {
    let html = body_text(send(stub_gateway(0.1), post_form("/assess", REFERENCE_FORM)).await).await;
    assert!(html.contains("10.0%"));
    assert!(html.contains("LOW RISK"));
    assert!(html.contains("Standard Follow-up"));
}

#[tokio::test]
async fn assess_form_without_model_shows_message() {
    let response = send(missing_gateway(), post_form("/assess", REFERENCE_FORM)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Model file not found!"));
    assert!(!html.contains(r#"id="result""#));
}

#[tokio::test]
async fn api_schema_lists_all_features() {
    let json = body_json(send(missing_gateway(), get("/api/schema")).await).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 13);
    assert_eq!(names[0], "age");
    assert_eq!(names[12], "thal");
}

#[tokio::test]
async fn api_assess_returns_record_and_result() {
    let body = serde_json::json!({
        "age": 58, "sex": "male", "cp": "non_anginal_pain", "trestbps": 120, "chol": 210,
        "fbs": "no", "restecg": 1, "thalach": 130, "exang": "no", "oldpeak": 1.5,
        "slope": 1, "ca": 0, "thal": "fixed_defect"
    });
    let response = send(stub_gateway(0.1), post_json("/api/assess", body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["record"],
        serde_json::json!({
            "age": 58, "sex": 1, "cp": 2, "trestbps": 120, "chol": 210, "fbs": 0,
            "restecg": 1, "thalach": 130, "exang": 0, "oldpeak": 1.5, "slope": 1,
            "ca": 0, "thal": 2
        })
    );
    assert_eq!(json["result"]["risk_label"], "LOW");
    assert_eq!(json["result"]["recommendation"], "Standard Follow-up");
}

#[tokio::test]
async fn api_assess_without_model_is_unavailable() {
    let response = send(missing_gateway(), post_json("/api/assess", serde_json::json!({}))).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn api_assess_rejects_out_of_range_inputs() {
    let response = send(
        stub_gateway(0.5),
        post_json("/api/assess", serde_json::json!({ "age": 5 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"][0]["field"], "age");
}

#[tokio::test]
async fn api_assess_accepts_oldpeak_in_hundredths() {
    let response = send(
        stub_gateway(0.1),
        post_json("/api/assess", serde_json::json!({ "oldpeak": 1.55 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["record"]["oldpeak"], 1.55);
}
