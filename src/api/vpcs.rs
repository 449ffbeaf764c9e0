use serde_json::Value;

use super::client::{api_call, credential_fields, ApiContext};
use super::envelope::{response_body, str_field};
use super::error::{ApiError, RequestKind, ResolutionError};
use crate::models::{Credentials, Network};

/// Fetch the networks (VPCs) available to `credentials` in `credentials.region()`.
///
/// An empty list is a valid answer; only failed lookups return `Err`.
pub async fn resolve_networks(
    ctx: &ApiContext,
    credentials: &Credentials,
) -> Result<Vec<Network>, ResolutionError> {
    let body = Value::Object(credential_fields(credentials));
    let payload = api_call(ctx, "/api/vpcs", &body)
        .await
        .map_err(|e| ResolutionError::new(RequestKind::Networks, e))?;
    let networks = parse_vpc_set(&payload).map_err(|e| ResolutionError::new(RequestKind::Networks, e))?;
    tracing::debug!(region = %credentials.region(), count = networks.len(), "Resolved networks");
    Ok(networks)
}

/// Parse `Response.VpcSet` (or a bare array of VPC objects).
pub fn parse_vpc_set(payload: &Value) -> Result<Vec<Network>, ApiError> {
    let arr = match payload {
        Value::Array(arr) => arr,
        _ => response_body(payload)
            .get("VpcSet")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ApiError::Parse("response has no VpcSet".into()))?,
    };

    let mut out: Vec<Network> = Vec::with_capacity(arr.len());
    for item in arr {
        let Some(id) = str_field(item, "VpcId").filter(|s| !s.is_empty()) else {
            tracing::warn!(?item, "Skipping VPC entry without VpcId");
            continue;
        };
        if out.iter().any(|n| n.id == id) {
            continue;
        }
        let name = str_field(item, "VpcName")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| id.clone());
        out.push(Network {
            id,
            name,
            cidr_block: str_field(item, "CidrBlock"),
        });
    }
    Ok(out)
}
