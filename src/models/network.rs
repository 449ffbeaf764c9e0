use serde::{Deserialize, Serialize};
use std::fmt;

/// A virtual private network (VPC) returned by the provisioning API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
}

/// An address range inside a [`Network`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub id: String,
    pub name: String,
    pub network_id: String,
    pub cidr_block: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// Whether the load balancer is reachable from the internet or only inside its VPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NetworkType {
    #[default]
    Public,
    Private,
}

impl NetworkType {
    /// Value of `LoadBalancerType` on the wire.
    pub fn wire_value(&self) -> &'static str {
        match self {
            NetworkType::Public => "OPEN",
            NetworkType::Private => "INTERNAL",
        }
    }

    pub fn requires_subnet(&self) -> bool {
        matches!(self, NetworkType::Private)
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Public => f.write_str("PUBLIC"),
            NetworkType::Private => f.write_str("PRIVATE"),
        }
    }
}
