// Atomic API modules
pub mod client;
pub mod envelope;
pub mod error;
pub mod load_balancers;
pub mod subnets;
pub mod vpcs;

// Re-export commonly used functions
pub use client::{api_call, set_silent, ApiContext};
pub use error::{ApiError, RequestKind, ResolutionError};
pub use load_balancers::{create_load_balancer, CreateLoadBalancerPayload, CreatedLoadBalancer};
pub use subnets::resolve_subnets;
pub use vpcs::resolve_networks;
