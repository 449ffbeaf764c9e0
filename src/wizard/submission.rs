use thiserror::Error;

use super::form::{Field, FieldError, FormData};
use super::session::SubmitRequest;
use crate::api::{create_load_balancer, ApiContext, ApiError, CreateLoadBalancerPayload, CreatedLoadBalancer};
use crate::models::NetworkType;

/// Application-type load balancer (layer 4 and 7 listeners).
const FORWARD_APPLICATION: i64 = 1;
const ADDRESS_IP_VERSION: &str = "IPV4";
const INSTANCE_COUNT: i64 = 1;

/// The creation request failed, either on the wire or by remote rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.user_message())]
pub struct SubmissionError(#[source] pub ApiError);

/// Terminal outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success(CreatedLoadBalancer),
    Failure(SubmissionError),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success(_))
    }

    pub fn failure_message(&self) -> Option<String> {
        match self {
            SubmissionResult::Failure(err) => Some(err.0.user_message()),
            SubmissionResult::Success(_) => None,
        }
    }
}

impl From<Result<CreatedLoadBalancer, ApiError>> for SubmissionResult {
    fn from(result: Result<CreatedLoadBalancer, ApiError>) -> Self {
        match result {
            Ok(created) => SubmissionResult::Success(created),
            Err(err) => SubmissionResult::Failure(SubmissionError(err)),
        }
    }
}

/// Assemble the creation payload from the accumulated form data.
///
/// `SubnetId` is only set for private load balancers; for public ones the
/// field stays `None` and is left out of the serialized body entirely.
pub fn build_payload(data: &FormData, project_id: i64) -> Result<CreateLoadBalancerPayload, FieldError> {
    let network_type = data
        .network_type
        .ok_or_else(|| FieldError::new(Field::NetworkType, "Network type is required"))?;
    let vpc_id = data
        .network_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| FieldError::new(Field::Network, "A network is required"))?;
    let subnet_id = match network_type {
        NetworkType::Public => None,
        NetworkType::Private => Some(
            data.subnet_id
                .clone()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| FieldError::new(Field::Subnet, "A subnet is required for a private load balancer"))?,
        ),
    };
    Ok(CreateLoadBalancerPayload {
        load_balancer_type: network_type.wire_value().to_string(),
        forward: FORWARD_APPLICATION,
        load_balancer_name: data.instance_name.trim().to_string(),
        vpc_id,
        project_id,
        address_ip_version: ADDRESS_IP_VERSION.to_string(),
        number: INSTANCE_COUNT,
        subnet_id,
    })
}

/// Send the creation request. Never fails: every error is folded into
/// [`SubmissionResult::Failure`].
pub async fn submit(ctx: &ApiContext, request: &SubmitRequest) -> SubmissionResult {
    create_load_balancer(ctx, &request.credentials, &request.payload)
        .await
        .into()
}
