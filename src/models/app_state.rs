use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::ApiContext;
use crate::wizard::WizardSession;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiContext,
    /// The single wizard run served by this process.
    pub session: Arc<Mutex<WizardSession>>,
}

impl AppState {
    pub fn new(api: ApiContext) -> Self {
        Self {
            api,
            session: Arc::new(Mutex::new(WizardSession::new())),
        }
    }

    /// Lock the session. A poisoned lock still holds a consistent session
    /// because every transition validates before it mutates.
    pub fn session(&self) -> MutexGuard<'_, WizardSession> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
