use axum::{
    extract::State,
    response::Response,
    Json,
};
use serde::Deserialize;

use crate::api::{resolve_networks, resolve_subnets};
use crate::models::{AppState, NetworkType};
use crate::wizard::{submission, Advance};

use super::helpers::{respond, view_response};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityForm {
    #[serde(default)]
    pub secret_id: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub region: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicConfigForm {
    #[serde(default)]
    pub instance_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTypeForm {
    pub network_type: NetworkType,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkForm {
    pub network_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetForm {
    pub subnet_id: String,
}

// The session lock is never held across an await: each remote call is
// issued, awaited unlocked, then applied under a fresh lock. Responses
// that lost the race are dropped by the session's sequence check.

pub async fn wizard_get(State(state): State<AppState>) -> Response {
    view_response(&state)
}

pub async fn enter_identity(State(state): State<AppState>, Json(form): Json<IdentityForm>) -> Response {
    let result = state
        .session()
        .enter_identity(&form.secret_id, &form.secret_key, &form.region);
    respond(&state, result)
}

pub async fn enter_basic_config(State(state): State<AppState>, Json(form): Json<BasicConfigForm>) -> Response {
    let result = state.session().enter_basic_config(&form.instance_name);
    respond(&state, result)
}

pub async fn select_network_type(State(state): State<AppState>, Json(form): Json<NetworkTypeForm>) -> Response {
    let result = state.session().select_network_type(form.network_type);
    respond(&state, result)
}

pub async fn select_network(State(state): State<AppState>, Json(form): Json<NetworkForm>) -> Response {
    let issued = state.session().select_network(&form.network_id);
    let request = match issued {
        Ok(request) => request,
        Err(err) => return respond::<()>(&state, Err(err)),
    };
    let result = resolve_subnets(&state.api, &request.credentials, &request.network_id).await;
    let applied = state.session().apply_subnets(request, result);
    tracing::debug!(?applied, network_id = %form.network_id, "Subnet lookup finished");
    view_response(&state)
}

pub async fn select_subnet(State(state): State<AppState>, Json(form): Json<SubnetForm>) -> Response {
    let result = state.session().select_subnet(&form.subnet_id);
    respond(&state, result)
}

pub async fn advance(State(state): State<AppState>) -> Response {
    let outcome = state.session().advance();
    match outcome {
        Ok(Advance::Moved(_)) => view_response(&state),
        Ok(Advance::NeedsNetworks(request)) => {
            let result = resolve_networks(&state.api, &request.credentials).await;
            let completed = state.session().complete_networks(request, result);
            respond(&state, completed)
        }
        Err(err) => respond::<()>(&state, Err(err)),
    }
}

pub async fn retreat(State(state): State<AppState>) -> Response {
    let result = state.session().retreat();
    respond(&state, result)
}

pub async fn submit(State(state): State<AppState>) -> Response {
    let issued = state.session().begin_submit(state.api.project_id);
    let request = match issued {
        Ok(request) => request,
        Err(err) => return respond::<()>(&state, Err(err)),
    };
    let result = submission::submit(&state.api, &request).await;
    state.session().finish_submit(request, result);
    view_response(&state)
}

pub async fn reset(State(state): State<AppState>) -> Response {
    state.session().reset();
    view_response(&state)
}
