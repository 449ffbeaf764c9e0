use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{api_call, credential_fields, ApiContext};
use super::envelope::{response_body, str_field};
use super::error::ApiError;
use crate::models::Credentials;

/// Body of the `CreateLoadBalancer` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLoadBalancerPayload {
    /// `OPEN` or `INTERNAL`
    pub load_balancer_type: String,
    /// 1 selects the application (layer 7 capable) load balancer
    pub forward: i64,
    pub load_balancer_name: String,
    pub vpc_id: String,
    pub project_id: i64,
    #[serde(rename = "AddressIPVersion")]
    pub address_ip_version: String,
    pub number: i64,
    /// Only sent for internal load balancers; the key must not appear otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
}

/// What the provider returns for a successful creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedLoadBalancer {
    pub request_id: Option<String>,
    pub load_balancer_ids: Vec<String>,
}

/// Issue exactly one creation request. No retries.
pub async fn create_load_balancer(
    ctx: &ApiContext,
    credentials: &Credentials,
    payload: &CreateLoadBalancerPayload,
) -> Result<CreatedLoadBalancer, ApiError> {
    let mut body = credential_fields(credentials);
    let payload_value = serde_json::to_value(payload).map_err(|e| ApiError::Parse(e.to_string()))?;
    body.insert("payload".into(), payload_value);
    let resp = api_call(ctx, "/api/create-load-balancer", &Value::Object(body)).await?;
    parse_created(&resp)
}

pub fn parse_created(payload: &Value) -> Result<CreatedLoadBalancer, ApiError> {
    let body = response_body(payload);
    if !body.is_object() {
        return Err(ApiError::Parse("creation response is not an object".into()));
    }
    let load_balancer_ids = body
        .get("LoadBalancerIds")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();
    Ok(CreatedLoadBalancer {
        request_id: str_field(body, "RequestId"),
        load_balancer_ids,
    })
}
