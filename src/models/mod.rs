pub mod app_state;
pub mod credentials;
pub mod network;
pub mod region;

pub use app_state::AppState;
pub use credentials::Credentials;
pub use network::{Network, NetworkType, Subnet};
pub use region::{region_catalog, Region, RegionOption};
