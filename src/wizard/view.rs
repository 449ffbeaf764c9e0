use serde::Serialize;

use super::form::{FieldError, FormData};
use super::session::WizardSession;
use super::step::Step;
use super::submission::SubmissionResult;
use crate::api::{ApiError, RequestKind};
use crate::models::{Network, Subnet};

/// Snapshot of a session for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub step: Step,
    pub step_index: usize,
    pub step_count: usize,
    pub step_title: &'static str,
    pub data: FormData,
    pub has_secret_key: bool,
    pub region_label: Option<&'static str>,
    pub networks: Vec<Network>,
    pub subnets: Vec<Subnet>,
    /// Network the subnet list was resolved for.
    pub subnets_network: Option<String>,
    pub selected_network_name: Option<String>,
    pub selected_subnet_name: Option<String>,
    pub in_flight: InFlight,
    pub can_retreat: bool,
    pub can_advance: bool,
    pub can_submit: bool,
    pub resolution_error: Option<String>,
    pub field_errors: Vec<FieldError>,
    pub submission: Option<SubmissionView>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InFlight {
    pub networks: bool,
    pub subnets: bool,
    pub submission: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionView {
    Success {
        request_id: Option<String>,
        load_balancer_ids: Vec<String>,
        finished_at: String,
    },
    Failure {
        message: String,
        /// `transport`, `parse`, `http` or `application`
        cause: &'static str,
        finished_at: String,
    },
}

fn cause_of(err: &ApiError) -> &'static str {
    match err {
        ApiError::Transport(_) => "transport",
        ApiError::Parse(_) => "parse",
        ApiError::Http { .. } => "http",
        ApiError::Application { .. } => "application",
    }
}

impl WizardView {
    pub fn from_session(session: &WizardSession) -> Self {
        let data = session.data().clone();
        let step = session.step();
        let in_flight = InFlight {
            networks: session.in_flight(RequestKind::Networks),
            subnets: session.in_flight(RequestKind::Subnets),
            submission: session.in_flight(RequestKind::Submission),
        };
        let busy = in_flight.networks || in_flight.subnets || in_flight.submission;
        let live = !session.is_terminal();

        let selected_network_name = data.network_id.as_deref().and_then(|id| {
            session
                .networks()
                .iter()
                .find(|n| n.id == id)
                .map(|n| n.name.clone())
        });
        let selected_subnet_name = data.subnet_id.as_deref().and_then(|id| {
            session
                .subnets()
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.name.clone())
        });

        let submission = session.submission().map(|sub| match &sub.result {
            SubmissionResult::Success(created) => SubmissionView::Success {
                request_id: created.request_id.clone(),
                load_balancer_ids: created.load_balancer_ids.clone(),
                finished_at: sub.finished_at.clone(),
            },
            SubmissionResult::Failure(err) => SubmissionView::Failure {
                message: err.0.user_message(),
                cause: cause_of(&err.0),
                finished_at: sub.finished_at.clone(),
            },
        });

        WizardView {
            step,
            step_index: step.index(),
            step_count: Step::COUNT,
            step_title: step.title(),
            has_secret_key: !data.secret_key.is_empty(),
            region_label: data.parsed_region().map(|r| r.label()),
            networks: session.networks().to_vec(),
            subnets: session.subnets().to_vec(),
            subnets_network: session.subnets_network().map(|s| s.to_string()),
            selected_network_name,
            selected_subnet_name,
            in_flight,
            can_retreat: live && !busy && step.prev().is_some(),
            can_advance: live && !busy && !step.is_last(),
            can_submit: live && !busy && step.is_last(),
            resolution_error: session.resolution_error().map(|e| e.user_message()),
            field_errors: session.field_errors().to_vec(),
            submission,
            data,
        }
    }
}
