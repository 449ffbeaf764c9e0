mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{created, spawn_backend, subnet_set, vpc_set, Canned, MockBackend};
use lbw::models::AppState;
use lbw::routes::build_router;

async fn app() -> (MockBackend, Router) {
    let (mock, ctx) = spawn_backend().await;
    (mock, build_router(AppState::new(ctx)))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, "POST", uri, Some(body)).await
}

#[tokio::test]
async fn test_regions_catalog() {
    let (_mock, app) = app().await;
    let (status, body) = call(&app, "GET", "/api/regions", None).await;

    assert_eq!(status, StatusCode::OK);
    let regions = body.as_array().unwrap();
    assert_eq!(regions.len(), 15);
    assert!(regions.iter().any(|r| r["code"] == "ap-beijing"));
}

#[tokio::test]
async fn test_initial_view() {
    let (_mock, app) = app().await;
    let (status, view) = call(&app, "GET", "/api/wizard", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["step"], "identity");
    assert_eq!(view["step_index"], 0);
    assert_eq!(view["step_count"], 4);
    assert_eq!(view["data"]["network_type"], "PUBLIC");
    assert_eq!(view["can_retreat"], false);
    assert!(view["submission"].is_null());
}

#[tokio::test]
async fn test_empty_identity_reports_every_field() {
    let (_mock, app) = app().await;
    post(&app, "/api/wizard/identity", json!({ "secretId": " ", "secretKey": "", "region": "" })).await;

    let (status, body) = post(&app, "/api/wizard/advance", json!({})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["field_errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["secret_id", "secret_key", "region"]);
    assert_eq!(body["view"]["step"], "identity");
}

#[tokio::test]
async fn test_secret_key_never_echoed() {
    let (_mock, app) = app().await;
    let (_, view) = post(
        &app,
        "/api/wizard/identity",
        json!({ "secretId": "AKIDtest", "secretKey": "s3cret", "region": "ap-beijing" }),
    )
    .await;

    assert_eq!(view["has_secret_key"], true);
    assert!(!view.to_string().contains("s3cret"));
}

#[tokio::test]
async fn test_full_private_flow() {
    let (mock, app) = app().await;
    mock.respond("vpcs", Canned::ok(vpc_set(&[("vpc-1", "main")])));
    mock.respond("subnets", Canned::ok(subnet_set(&[("sub-1", "vpc-1")])));
    mock.respond("create-load-balancer", Canned::ok(created(&["lb-7f3a"])));

    post(
        &app,
        "/api/wizard/identity",
        json!({ "secretId": "AKIDtest", "secretKey": "s3cret", "region": "ap-beijing" }),
    )
    .await;
    let (status, view) = post(&app, "/api/wizard/advance", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["step"], "basic_config");

    post(&app, "/api/wizard/basic-config", json!({ "instanceName": "edge-lb" })).await;
    let (status, view) = post(&app, "/api/wizard/advance", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["step"], "network");
    assert_eq!(view["networks"][0]["id"], "vpc-1");

    post(&app, "/api/wizard/network-type", json!({ "networkType": "PRIVATE" })).await;
    let (_, view) = post(&app, "/api/wizard/network", json!({ "networkId": "vpc-1" })).await;
    assert_eq!(view["subnets"][0]["id"], "sub-1");
    assert_eq!(view["selected_network_name"], "main");

    let (status, _) = post(&app, "/api/wizard/subnet", json!({ "subnetId": "sub-1" })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, view) = post(&app, "/api/wizard/advance", json!({})).await;
    assert_eq!(view["step"], "confirmation");
    assert_eq!(view["can_submit"], true);

    let (status, view) = post(&app, "/api/wizard/submit", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["submission"]["status"], "success");
    assert_eq!(view["submission"]["load_balancer_ids"][0], "lb-7f3a");
    assert_eq!(view["can_submit"], false);

    let (status, body) = post(&app, "/api/wizard/retreat", json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("reset"));

    let (status, view) = post(&app, "/api/wizard/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["step"], "identity");
    assert_eq!(view["data"]["secret_id"], "");
}

#[tokio::test]
async fn test_network_lookup_failure_is_bad_gateway() {
    let (mock, app) = app().await;
    mock.respond(
        "vpcs",
        Canned::ok(json!({ "Response": { "Error": { "Message": "region not supported" } } })),
    );

    post(
        &app,
        "/api/wizard/identity",
        json!({ "secretId": "AKIDtest", "secretKey": "s3cret", "region": "ap-beijing" }),
    )
    .await;
    post(&app, "/api/wizard/advance", json!({})).await;
    post(&app, "/api/wizard/basic-config", json!({ "instanceName": "edge-lb" })).await;

    let (status, body) = post(&app, "/api/wizard/advance", json!({})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "region not supported");
    assert_eq!(body["view"]["step"], "basic_config");
    assert_eq!(body["view"]["resolution_error"], "region not supported");
}

#[tokio::test]
async fn test_unknown_network_is_rejected() {
    let (mock, app) = app().await;
    mock.respond("vpcs", Canned::ok(vpc_set(&[("vpc-1", "main")])));

    post(
        &app,
        "/api/wizard/identity",
        json!({ "secretId": "AKIDtest", "secretKey": "s3cret", "region": "ap-beijing" }),
    )
    .await;
    post(&app, "/api/wizard/advance", json!({})).await;
    post(&app, "/api/wizard/basic-config", json!({ "instanceName": "edge-lb" })).await;
    post(&app, "/api/wizard/advance", json!({})).await;

    let (status, _) = post(&app, "/api/wizard/network", json!({ "networkId": "vpc-404" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(mock.requests_to("subnets").is_empty());
}

#[tokio::test]
async fn test_action_on_wrong_step_conflicts() {
    let (_mock, app) = app().await;
    let (status, body) = post(&app, "/api/wizard/basic-config", json!({ "instanceName": "edge-lb" })).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["view"]["data"]["instance_name"], "");
}
