pub mod api;
pub mod client;
pub mod models;
pub mod workload;

pub use api::route::RouteDef;
pub use api::service::ServiceDef;
pub use api::target::TargetDef;
pub use api::upstream::UpstreamDef;
pub use client::Kongo;
pub use workload::{RegisteredWorkload, RegistrationError, WorkloadDef, WorkloadNames};
