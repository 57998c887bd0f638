use std::fmt;

use serde::Serialize;

use crate::api::route::RouteDef;
use crate::api::service::ServiceDef;
use crate::api::target::TargetDef;
use crate::api::upstream::UpstreamDef;
use crate::models::{Route, Service, Target, Upstream};
use crate::Kongo;

/// A logical workload: one backend pool plus the service and route that
/// expose it through the gateway.
pub struct WorkloadDef {
    pub name: String,
    pub addresses: Vec<String>,
    pub path: String,
    pub port: u16,
}

/// The fixed-suffix names a workload's entities share.
pub struct WorkloadNames {
    pub upstream: String,
    pub service: String,
    pub route: String,
}

impl WorkloadNames {
    pub fn new(base_name: &str) -> Self {
        WorkloadNames {
            upstream: format!("{base_name}-upstream"),
            service: format!("{base_name}-service"),
            route: format!("{base_name}-route"),
        }
    }
}

/// Everything registration managed to create. On failure this is what
/// was left behind in the gateway.
#[derive(Debug, Default, Serialize)]
pub struct RegisteredWorkload {
    pub upstream: Option<Upstream>,
    pub targets: Vec<Target>,
    pub service: Option<Service>,
    pub route: Option<Route>,
}

/// A registration failure, carrying the partial aggregate. No
/// compensating deletes happen; cleanup is the caller's problem.
#[derive(Debug)]
pub struct RegistrationError {
    pub partial: RegisteredWorkload,
    pub source: anyhow::Error,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.source)
    }
}

impl std::error::Error for RegistrationError {}

impl Kongo {
    /// Registers a workload: upstream, then one target per address, then
    /// the service (host = upstream name), then the route. Stops at the
    /// first failure and returns whatever was created up to that point.
    pub async fn register_workload(
        &self,
        workload: &WorkloadDef,
    ) -> Result<RegisteredWorkload, RegistrationError> {
        let names = WorkloadNames::new(&workload.name);
        let mut registered = RegisteredWorkload::default();

        // 1 - upstream
        let upstream_def = UpstreamDef {
            name: names.upstream.clone(),
        };

        match self.create_upstream(&upstream_def).await {
            Ok(upstream) => registered.upstream = Some(upstream),
            Err(error) => {
                return Err(RegistrationError {
                    partial: registered,
                    source: error.context("creating upstream"),
                })
            }
        }

        // 2 - one target per address
        for address in &workload.addresses {
            let target_def = TargetDef {
                target: address.clone(),
                weight: 1,
            };

            match self.create_target(&names.upstream, &target_def).await {
                Ok(target) => registered.targets.push(target),
                Err(error) => {
                    return Err(RegistrationError {
                        partial: registered,
                        source: error.context(format!("creating target ({address})")),
                    })
                }
            }
        }

        // 3 - service fronting the upstream
        let service_def = ServiceDef {
            name: names.service.clone(),
            host: names.upstream.clone(),
            path: workload.path.clone(),
            port: workload.port,
            protocol: "http".to_string(),
        };

        let service = match self.create_service(&service_def).await {
            Ok(service) => service,
            Err(error) => {
                return Err(RegistrationError {
                    partial: registered,
                    source: error.context("creating service"),
                })
            }
        };

        let service_id = service.id.clone();
        registered.service = Some(service);

        // 4 - route bound to the service
        let route_def = RouteDef {
            name: names.route.clone(),
            paths: vec![workload.path.clone()],
            service_id,
            strip_path: false,
        };

        match self.create_route(&route_def).await {
            Ok(route) => registered.route = Some(route),
            Err(error) => {
                return Err(RegistrationError {
                    partial: registered,
                    source: error.context("creating route"),
                })
            }
        }

        Ok(registered)
    }

    /// Removes a workload's entities by their derived names, in reverse
    /// dependency order. Route and service delete failures are logged
    /// and skipped; a target listing failure aborts.
    pub async fn deregister_workload(&self, base_name: &str) -> anyhow::Result<()> {
        let names = WorkloadNames::new(base_name);

        if let Err(error) = self.delete_route(&names.route).await {
            tracing::warn!("error deleting route '{}': {}", names.route, error);
        }

        if let Err(error) = self.delete_service(&names.service).await {
            tracing::warn!("error deleting service '{}': {}", names.service, error);
        }

        let targets = self.list_targets(&names.upstream).await?;

        for target in targets {
            let reference = match target.id.as_deref().or(target.target.as_deref()) {
                Some(reference) => reference,
                None => continue,
            };

            if let Err(error) = self.delete_target(&names.upstream, reference).await {
                tracing::warn!(
                    "error deleting target '{}' of upstream '{}': {}",
                    reference,
                    names.upstream,
                    error
                );
            }
        }

        if let Err(error) = self.delete_upstream(&names.upstream).await {
            tracing::warn!("error deleting upstream '{}': {}", names.upstream, error);
        }

        Ok(())
    }
}
