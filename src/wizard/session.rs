use thiserror::Error;

use super::form::{Field, FieldError, FormData};
use super::step::Step;
use super::submission::{build_payload, SubmissionResult};
use super::validation::{validate_step, Resolved};
use crate::api::{CreateLoadBalancerPayload, RequestKind, ResolutionError};
use crate::models::{Credentials, Network, NetworkType, Region, Subnet};

/// Why a wizard transition was refused. The session is unchanged in every case
/// except [`WizardError::Resolution`], where the failed list has been cleared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("{} field(s) need attention", .0.len())]
    Validation(Vec<FieldError>),

    #[error("A {0} request is still in progress")]
    Busy(RequestKind),

    #[error("This action is only available on the {expected:?} step (current: {actual:?})")]
    WrongStep { expected: Step, actual: Step },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Already at the last step")]
    AtLastStep,

    #[error("The wizard has finished; reset to start over")]
    Terminal,

    #[error("Network '{0}' is not in the current network list")]
    UnknownNetwork(String),

    #[error("Subnet '{0}' is not in the current subnet list")]
    UnknownSubnet(String),

    #[error("Public load balancers do not take a subnet")]
    SubnetNotApplicable,

    #[error("Credentials have not been captured yet")]
    MissingCredentials,

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("A newer {0} request replaced this one")]
    Superseded(RequestKind),
}

/// Result of handing a response back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// A newer request of the same kind was issued after this one; the response was dropped.
    Stale,
}

/// Outcome of [`WizardSession::advance`].
#[derive(Debug)]
pub enum Advance {
    Moved(Step),
    /// Leaving the basic-configuration step needs the network list first.
    /// Resolve it and pass the result to [`WizardSession::complete_networks`].
    NeedsNetworks(NetworkRequest),
}

#[derive(Debug, Clone)]
pub struct NetworkRequest {
    pub seq: u64,
    pub credentials: Credentials,
}

#[derive(Debug, Clone)]
pub struct SubnetRequest {
    pub seq: u64,
    pub credentials: Credentials,
    pub network_id: String,
}

#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub seq: u64,
    pub credentials: Credentials,
    pub payload: CreateLoadBalancerPayload,
}

/// Terminal submission outcome plus when it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub result: SubmissionResult,
    pub finished_at: String,
}

/// Per-kind request sequence numbers. Counters only ever grow, so a response
/// carrying an older number can always be recognised, even across a reset.
#[derive(Debug, Clone, Default)]
struct RequestTracker {
    last_issued: [u64; 3],
    outstanding: [Option<u64>; 3],
}

impl RequestTracker {
    fn slot(kind: RequestKind) -> usize {
        match kind {
            RequestKind::Networks => 0,
            RequestKind::Subnets => 1,
            RequestKind::Submission => 2,
        }
    }

    fn issue(&mut self, kind: RequestKind) -> u64 {
        let slot = Self::slot(kind);
        self.last_issued[slot] += 1;
        self.outstanding[slot] = Some(self.last_issued[slot]);
        self.last_issued[slot]
    }

    fn is_latest(&self, kind: RequestKind, seq: u64) -> bool {
        self.outstanding[Self::slot(kind)] == Some(seq)
    }

    fn finish(&mut self, kind: RequestKind) {
        self.outstanding[Self::slot(kind)] = None;
    }

    fn in_flight(&self, kind: RequestKind) -> bool {
        self.outstanding[Self::slot(kind)].is_some()
    }

    fn first_in_flight(&self) -> Option<RequestKind> {
        [RequestKind::Networks, RequestKind::Subnets, RequestKind::Submission]
            .into_iter()
            .find(|k| self.in_flight(*k))
    }

    fn invalidate_all(&mut self) {
        for slot in 0..3 {
            self.last_issued[slot] += 1;
            self.outstanding[slot] = None;
        }
    }
}

/// The complete in-memory state of one wizard run.
#[derive(Debug, Clone)]
pub struct WizardSession {
    step: Step,
    data: FormData,
    credentials: Option<Credentials>,
    networks: Vec<Network>,
    networks_region: Option<Region>,
    subnets: Vec<Subnet>,
    subnets_network: Option<String>,
    requests: RequestTracker,
    resolution_error: Option<ResolutionError>,
    field_errors: Vec<FieldError>,
    submission: Option<Submission>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            step: Step::Identity,
            data: FormData::default(),
            credentials: None,
            networks: Vec::new(),
            networks_region: None,
            subnets: Vec::new(),
            subnets_network: None,
            requests: RequestTracker::default(),
            resolution_error: None,
            field_errors: Vec::new(),
            submission: None,
        }
    }

    // ---------- Accessors ----------

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn step_index(&self) -> usize {
        self.step.index()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    /// Subnets of the selected network.
    pub fn subnets(&self) -> &[Subnet] {
        &self.subnets
    }

    pub fn subnets_network(&self) -> Option<&str> {
        self.subnets_network.as_deref()
    }

    pub fn in_flight(&self, kind: RequestKind) -> bool {
        self.requests.in_flight(kind)
    }

    pub fn resolution_error(&self) -> Option<&ResolutionError> {
        self.resolution_error.as_ref()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.submission.is_some()
    }

    fn resolved(&self) -> Resolved<'_> {
        Resolved {
            networks: &self.networks,
            subnets: &self.subnets,
        }
    }

    fn ensure_live(&self) -> Result<(), WizardError> {
        if self.is_terminal() {
            return Err(WizardError::Terminal);
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        match self.requests.first_in_flight() {
            Some(kind) => Err(WizardError::Busy(kind)),
            None => Ok(()),
        }
    }

    fn ensure_step(&self, expected: Step) -> Result<(), WizardError> {
        if self.step != expected {
            return Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }

    fn clear_network_selection(&mut self) {
        self.data.network_id = None;
        self.data.subnet_id = None;
        self.subnets.clear();
        self.subnets_network = None;
    }

    // ---------- Field entry ----------

    /// Record identity fields. Values are stored verbatim; they become the
    /// session credentials when the identity step is advanced past.
    pub fn enter_identity(&mut self, secret_id: &str, secret_key: &str, region: &str) -> Result<(), WizardError> {
        self.ensure_live()?;
        self.ensure_idle()?;
        self.ensure_step(Step::Identity)?;
        self.data.secret_id = secret_id.to_string();
        self.data.secret_key = secret_key.to_string();
        let region = region.trim();
        self.data.region = if region.is_empty() { None } else { Some(region.to_string()) };
        Ok(())
    }

    pub fn enter_basic_config(&mut self, instance_name: &str) -> Result<(), WizardError> {
        self.ensure_live()?;
        self.ensure_idle()?;
        self.ensure_step(Step::BasicConfig)?;
        self.data.instance_name = instance_name.to_string();
        Ok(())
    }

    /// Switch between public and private. Switching to public drops any
    /// selected subnet; switching back to private does not restore it.
    pub fn select_network_type(&mut self, network_type: NetworkType) -> Result<(), WizardError> {
        self.ensure_live()?;
        self.ensure_step(Step::Network)?;
        self.data.network_type = Some(network_type);
        if network_type == NetworkType::Public {
            self.data.subnet_id = None;
        }
        self.field_errors.retain(|e| e.field != Field::Subnet);
        tracing::debug!(%network_type, "Network type changed");
        Ok(())
    }

    /// Select a network and issue a subnet lookup for it.
    ///
    /// Any previously selected subnet and the old subnet list are dropped
    /// immediately. The returned request supersedes every earlier subnet
    /// request; feed its result to [`WizardSession::apply_subnets`].
    pub fn select_network(&mut self, network_id: &str) -> Result<SubnetRequest, WizardError> {
        self.ensure_live()?;
        self.ensure_step(Step::Network)?;
        if !self.networks.iter().any(|n| n.id == network_id) {
            return Err(WizardError::UnknownNetwork(network_id.to_string()));
        }
        let credentials = self.credentials.clone().ok_or(WizardError::MissingCredentials)?;

        self.data.network_id = Some(network_id.to_string());
        self.data.subnet_id = None;
        self.subnets.clear();
        self.subnets_network = None;
        self.resolution_error = None;

        let seq = self.requests.issue(RequestKind::Subnets);
        tracing::info!(network_id, seq, "Network selected; resolving subnets");
        Ok(SubnetRequest {
            seq,
            credentials,
            network_id: network_id.to_string(),
        })
    }

    /// Apply a subnet lookup result if `request` is still the latest one.
    /// Entries belonging to other networks are filtered out.
    pub fn apply_subnets(
        &mut self,
        request: SubnetRequest,
        result: Result<Vec<Subnet>, ResolutionError>,
    ) -> Applied {
        if !self.requests.is_latest(RequestKind::Subnets, request.seq) {
            tracing::debug!(seq = request.seq, network_id = %request.network_id, "Dropping stale subnet response");
            return Applied::Stale;
        }
        self.requests.finish(RequestKind::Subnets);
        match result {
            Ok(list) => {
                let mut subnets: Vec<Subnet> = list
                    .into_iter()
                    .filter(|s| s.network_id == request.network_id)
                    .collect();
                subnets.dedup_by(|a, b| a.id == b.id);
                tracing::info!(network_id = %request.network_id, count = subnets.len(), "Subnet list applied");
                self.subnets = subnets;
                self.subnets_network = Some(request.network_id);
                self.resolution_error = None;
            }
            Err(err) => {
                tracing::warn!(network_id = %request.network_id, error = %err, "Subnet lookup failed");
                self.subnets.clear();
                self.subnets_network = None;
                self.resolution_error = Some(err);
            }
        }
        Applied::Applied
    }

    pub fn select_subnet(&mut self, subnet_id: &str) -> Result<(), WizardError> {
        self.ensure_live()?;
        self.ensure_step(Step::Network)?;
        if !self.data.network_type.is_some_and(|t| t.requires_subnet()) {
            return Err(WizardError::SubnetNotApplicable);
        }
        if !self.subnets.iter().any(|s| s.id == subnet_id) {
            return Err(WizardError::UnknownSubnet(subnet_id.to_string()));
        }
        self.data.subnet_id = Some(subnet_id.to_string());
        self.field_errors.retain(|e| e.field != Field::Subnet);
        Ok(())
    }

    // ---------- Navigation ----------

    /// Validate the current step and move forward.
    ///
    /// Leaving the identity step captures the credentials. Leaving the
    /// basic-configuration step returns [`Advance::NeedsNetworks`]; the index
    /// only changes once [`WizardSession::complete_networks`] succeeds.
    pub fn advance(&mut self) -> Result<Advance, WizardError> {
        self.ensure_live()?;
        self.ensure_idle()?;
        if self.step.is_last() {
            return Err(WizardError::AtLastStep);
        }
        if let Err(errors) = validate_step(self.step, &self.data, self.resolved()) {
            tracing::debug!(step = ?self.step, ?errors, "Step validation failed");
            self.field_errors = errors.clone();
            return Err(WizardError::Validation(errors));
        }
        self.field_errors.clear();

        match self.step {
            Step::Identity => {
                let region = self.data.parsed_region().ok_or(WizardError::MissingCredentials)?;
                if self.networks_region.is_some() && self.networks_region != Some(region) {
                    // Network and subnet lists were fetched for another region.
                    tracing::info!(%region, "Region changed; discarding resolved networks");
                    self.networks.clear();
                    self.networks_region = None;
                    self.clear_network_selection();
                }
                self.credentials = Some(Credentials::new(
                    self.data.secret_id.clone(),
                    self.data.secret_key.clone(),
                    region,
                ));
                Ok(Advance::Moved(self.move_to(Step::BasicConfig)))
            }
            Step::BasicConfig => {
                let credentials = self.credentials.clone().ok_or(WizardError::MissingCredentials)?;
                let seq = self.requests.issue(RequestKind::Networks);
                tracing::info!(region = %credentials.region(), seq, "Resolving networks");
                Ok(Advance::NeedsNetworks(NetworkRequest { seq, credentials }))
            }
            Step::Network => Ok(Advance::Moved(self.move_to(Step::Confirmation))),
            Step::Confirmation => Err(WizardError::AtLastStep),
        }
    }

    /// Finish an advance from the basic-configuration step with the network
    /// lookup result. On failure the list is emptied and the index stays put.
    pub fn complete_networks(
        &mut self,
        request: NetworkRequest,
        result: Result<Vec<Network>, ResolutionError>,
    ) -> Result<Step, WizardError> {
        if !self.requests.is_latest(RequestKind::Networks, request.seq) {
            tracing::debug!(seq = request.seq, "Dropping stale network response");
            return Err(WizardError::Superseded(RequestKind::Networks));
        }
        self.requests.finish(RequestKind::Networks);
        match result {
            Ok(list) => {
                let mut networks = list;
                networks.dedup_by(|a, b| a.id == b.id);
                tracing::info!(region = %request.credentials.region(), count = networks.len(), "Network list applied");
                self.networks = networks;
                self.networks_region = Some(request.credentials.region());
                self.resolution_error = None;

                let still_listed = self
                    .data
                    .network_id
                    .as_deref()
                    .map(|id| self.networks.iter().any(|n| n.id == id))
                    .unwrap_or(false);
                if !still_listed {
                    self.clear_network_selection();
                }
                Ok(self.move_to(Step::Network))
            }
            Err(err) => {
                tracing::warn!(region = %request.credentials.region(), error = %err, "Network lookup failed");
                self.networks.clear();
                self.networks_region = None;
                self.clear_network_selection();
                self.resolution_error = Some(err.clone());
                Err(WizardError::Resolution(err))
            }
        }
    }

    /// Step back one step. Entered data is kept.
    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        self.ensure_live()?;
        self.ensure_idle()?;
        let prev = self.step.prev().ok_or(WizardError::AtFirstStep)?;
        self.field_errors.clear();
        Ok(self.move_to(prev))
    }

    fn move_to(&mut self, step: Step) -> Step {
        tracing::info!(from = ?self.step, to = ?step, "Wizard step changed");
        self.step = step;
        step
    }

    // ---------- Submission ----------

    /// Re-validate everything and issue the creation request.
    ///
    /// A second call while a submission is outstanding is refused with
    /// [`WizardError::Busy`], so at most one create call is in flight.
    pub fn begin_submit(&mut self, project_id: i64) -> Result<SubmitRequest, WizardError> {
        self.ensure_live()?;
        self.ensure_idle()?;
        self.ensure_step(Step::Confirmation)?;
        if let Err(errors) = validate_step(Step::Confirmation, &self.data, self.resolved()) {
            self.field_errors = errors.clone();
            return Err(WizardError::Validation(errors));
        }
        let credentials = self.credentials.clone().ok_or(WizardError::MissingCredentials)?;
        let payload = build_payload(&self.data, project_id).map_err(|e| WizardError::Validation(vec![e]))?;
        self.field_errors.clear();
        let seq = self.requests.issue(RequestKind::Submission);
        tracing::info!(seq, name = %payload.load_balancer_name, kind = %payload.load_balancer_type, "Submitting load balancer");
        Ok(SubmitRequest {
            seq,
            credentials,
            payload,
        })
    }

    /// Record the submission outcome. The session is terminal afterwards.
    pub fn finish_submit(&mut self, request: SubmitRequest, result: SubmissionResult) -> Applied {
        if !self.requests.is_latest(RequestKind::Submission, request.seq) {
            tracing::debug!(seq = request.seq, "Dropping stale submission response");
            return Applied::Stale;
        }
        self.requests.finish(RequestKind::Submission);
        match &result {
            SubmissionResult::Success(created) => {
                tracing::info!(ids = ?created.load_balancer_ids, request_id = ?created.request_id, "Load balancer created")
            }
            SubmissionResult::Failure(err) => tracing::warn!(error = %err, "Load balancer creation failed"),
        }
        self.submission = Some(Submission {
            result,
            finished_at: chrono::Utc::now().to_rfc3339(),
        });
        Applied::Applied
    }

    /// Start over. Responses to requests issued before the reset are ignored.
    pub fn reset(&mut self) {
        let mut requests = self.requests.clone();
        requests.invalidate_all();
        *self = Self::new();
        self.requests = requests;
        tracing::info!("Wizard reset");
    }
}
