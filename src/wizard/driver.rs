//! Async transitions for a session owned by a single caller.
//!
//! Each function issues the session command, awaits the remote call and
//! hands the result back. Callers that share a session behind a lock (the
//! HTTP shell) run the same three stages themselves so the lock is not held
//! across the await.

use super::session::{Advance, Applied, WizardError, WizardSession};
use super::step::Step;
use super::submission::{self, SubmissionResult};
use crate::api::{resolve_networks, resolve_subnets, ApiContext};

pub async fn advance(session: &mut WizardSession, ctx: &ApiContext) -> Result<Step, WizardError> {
    match session.advance()? {
        Advance::Moved(step) => Ok(step),
        Advance::NeedsNetworks(request) => {
            let result = resolve_networks(ctx, &request.credentials).await;
            session.complete_networks(request, result)
        }
    }
}

pub async fn select_network(
    session: &mut WizardSession,
    ctx: &ApiContext,
    network_id: &str,
) -> Result<Applied, WizardError> {
    let request = session.select_network(network_id)?;
    let result = resolve_subnets(ctx, &request.credentials, &request.network_id).await;
    Ok(session.apply_subnets(request, result))
}

pub async fn submit(session: &mut WizardSession, ctx: &ApiContext) -> Result<SubmissionResult, WizardError> {
    let request = session.begin_submit(ctx.project_id)?;
    let result = submission::submit(ctx, &request).await;
    session.finish_submit(request, result.clone());
    Ok(result)
}
