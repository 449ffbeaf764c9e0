use serde::Serialize;
use std::fmt;

use crate::models::{NetworkType, Region};

/// Values accumulated across all steps. Navigating backwards never clears them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormData {
    pub secret_id: String,
    #[serde(skip_serializing)]
    pub secret_key: String,
    /// Region code as entered; checked against the catalogue on validation.
    pub region: Option<String>,
    pub instance_name: String,
    pub network_type: Option<NetworkType>,
    pub network_id: Option<String>,
    pub subnet_id: Option<String>,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            secret_id: String::new(),
            secret_key: String::new(),
            region: None,
            instance_name: String::new(),
            network_type: Some(NetworkType::Public),
            network_id: None,
            subnet_id: None,
        }
    }
}

impl FormData {
    pub fn parsed_region(&self) -> Option<Region> {
        self.region.as_deref().and_then(Region::from_code)
    }
}

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SecretId,
    SecretKey,
    Region,
    InstanceName,
    NetworkType,
    Network,
    Subnet,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::SecretId => "secret_id",
            Field::SecretKey => "secret_key",
            Field::Region => "region",
            Field::InstanceName => "instance_name",
            Field::NetworkType => "network_type",
            Field::Network => "network",
            Field::Subnet => "subnet",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
