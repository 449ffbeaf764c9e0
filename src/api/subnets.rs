use serde_json::Value;

use super::client::{api_call, credential_fields, ApiContext};
use super::envelope::{response_body, str_field};
use super::error::{ApiError, RequestKind, ResolutionError};
use crate::models::{Credentials, Subnet};

/// Fetch the subnets of `network_id` in the credentials' region.
///
/// The result is not filtered here; callers keep only entries whose
/// `network_id` matches the network they asked for.
pub async fn resolve_subnets(
    ctx: &ApiContext,
    credentials: &Credentials,
    network_id: &str,
) -> Result<Vec<Subnet>, ResolutionError> {
    let mut body = credential_fields(credentials);
    body.insert("vpcId".into(), Value::from(network_id));
    let payload = api_call(ctx, "/api/subnets", &Value::Object(body))
        .await
        .map_err(|e| ResolutionError::new(RequestKind::Subnets, e))?;
    let subnets = parse_subnet_set(&payload).map_err(|e| ResolutionError::new(RequestKind::Subnets, e))?;
    tracing::debug!(region = %credentials.region(), network_id, count = subnets.len(), "Resolved subnets");
    Ok(subnets)
}

/// Parse `Response.SubnetSet` (or a bare array of subnet objects).
pub fn parse_subnet_set(payload: &Value) -> Result<Vec<Subnet>, ApiError> {
    let arr = match payload {
        Value::Array(arr) => arr,
        _ => response_body(payload)
            .get("SubnetSet")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ApiError::Parse("response has no SubnetSet".into()))?,
    };

    let mut out: Vec<Subnet> = Vec::with_capacity(arr.len());
    for item in arr {
        let (Some(id), Some(network_id)) = (
            str_field(item, "SubnetId").filter(|s| !s.is_empty()),
            str_field(item, "VpcId").filter(|s| !s.is_empty()),
        ) else {
            tracing::warn!(?item, "Skipping subnet entry without SubnetId/VpcId");
            continue;
        };
        if out.iter().any(|s| s.id == id) {
            continue;
        }
        let name = str_field(item, "SubnetName")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| id.clone());
        out.push(Subnet {
            id,
            name,
            network_id,
            cidr_block: str_field(item, "CidrBlock").unwrap_or_default(),
            zone: str_field(item, "Zone"),
        });
    }
    Ok(out)
}
