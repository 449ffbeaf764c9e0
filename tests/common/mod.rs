#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use lbw::api::{set_silent, ApiContext};

/// Canned answer for one backend endpoint.
#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
}

impl Canned {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self { status, body: body.to_string() }
    }

    pub fn ok(body: Value) -> Self {
        Self::json(StatusCode::OK, body)
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self { status, body: body.to_string() }
    }
}

#[derive(Default)]
struct Inner {
    responses: HashMap<String, Canned>,
    requests: Vec<(String, Value)>,
}

/// In-process stand-in for the provisioning backend.
#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MockBackend {
    /// Set the answer for `name` (`vpcs`, `subnets` or `create-load-balancer`).
    pub fn respond(&self, name: &str, canned: Canned) {
        self.inner.lock().unwrap().responses.insert(name.to_string(), canned);
    }

    /// Requests received so far, as (endpoint name, JSON body).
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, name: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|(n, _)| n == name)
            .map(|(_, body)| body)
            .collect()
    }
}

async fn handle(State(mock): State<MockBackend>, Path(name): Path<String>, Json(body): Json<Value>) -> impl IntoResponse {
    let canned = {
        let mut inner = mock.inner.lock().unwrap();
        inner.requests.push((name.clone(), body));
        inner.responses.get(&name).cloned()
    };
    match canned {
        Some(c) => (c.status, [("content-type", "application/json")], c.body).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "no canned response" }))).into_response(),
    }
}

/// Start a mock backend on an ephemeral port and return it with a context pointing at it.
pub async fn spawn_backend() -> (MockBackend, ApiContext) {
    set_silent(true);
    let mock = MockBackend::default();
    let app = Router::new()
        .route("/api/:name", post(handle))
        .with_state(mock.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let ctx = ApiContext::new(&format!("http://{}/", addr), Duration::from_secs(5), 42).unwrap();
    (mock, ctx)
}

/// Context pointing at a port nothing listens on.
pub async fn unreachable_context() -> ApiContext {
    set_silent(true);
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ApiContext::new(&format!("http://{}", addr), Duration::from_secs(2), 0).unwrap()
}

pub fn vpc_set(ids: &[(&str, &str)]) -> Value {
    let set: Vec<Value> = ids
        .iter()
        .map(|(id, name)| json!({ "VpcId": id, "VpcName": name, "CidrBlock": "10.0.0.0/16" }))
        .collect();
    json!({ "Response": { "VpcSet": set, "RequestId": "req-vpcs" } })
}

pub fn subnet_set(entries: &[(&str, &str)]) -> Value {
    let set: Vec<Value> = entries
        .iter()
        .map(|(id, vpc)| {
            json!({
                "SubnetId": id,
                "SubnetName": format!("{}-name", id),
                "VpcId": vpc,
                "CidrBlock": "10.0.1.0/24",
                "Zone": "ap-beijing-1",
            })
        })
        .collect();
    json!({ "Response": { "SubnetSet": set, "RequestId": "req-subnets" } })
}

pub fn created(ids: &[&str]) -> Value {
    json!({ "Response": { "LoadBalancerIds": ids, "RequestId": "req-create" } })
}
