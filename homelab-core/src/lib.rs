pub mod config;
pub mod edit;
pub mod error;
pub mod model;
pub mod topology;
pub mod urls;
pub mod validation;

pub use config::HomelabConfig;
pub use error::HomelabError;
pub use model::{Connection, GeographicLocation, Host, InfrastructureData, Service};
pub use topology::{EdgeStyle, TopologyView};
pub use validation::{ValidationIssue, validate};
