use std::fmt;

use super::Region;

/// Caller-supplied API credentials plus the region they are scoped to.
///
/// Held in memory only and forwarded verbatim to the provisioning API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    secret_id: String,
    secret_key: String,
    region: Region,
}

impl Credentials {
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>, region: Region) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            region,
        }
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

// Keep the secret out of logs and panics.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"***")
            .field("region", &self.region)
            .finish()
    }
}
