//! DeploymentRegistry - read view over configured environments
//!
//! Borrowed from a configuration snapshot for the duration of one invocation.
//! There are no mutation operations; editing configuration is the job of
//! whoever owns the file.

use std::collections::BTreeMap;

use crate::domain::entities::{DeploymentTarget, Environment, RESERVED_SERVER_KEY};
use crate::error::{SelfDeployError, SelfDeployResult};

/// Lookup of environments and their deployment targets
#[derive(Debug, Clone, Copy)]
pub struct DeploymentRegistry<'a> {
    environments: &'a BTreeMap<String, Environment>,
}

impl<'a> DeploymentRegistry<'a> {
    pub fn new(environments: &'a BTreeMap<String, Environment>) -> Self {
        Self { environments }
    }

    /// Configured environment names, sorted
    pub fn environments(&self) -> Vec<&'a str> {
        self.environments.keys().map(String::as_str).collect()
    }

    pub fn environment(&self, name: &str) -> SelfDeployResult<&'a Environment> {
        self.environments
            .get(name)
            .ok_or_else(|| SelfDeployError::EnvironmentNotFound {
                environment: name.to_string(),
            })
    }

    /// Deployment names in `environment`, sorted
    pub fn list_deployments(&self, environment: &str) -> SelfDeployResult<Vec<&'a str>> {
        let env = self.environment(environment)?;
        Ok(env.deployments.keys().map(String::as_str).collect())
    }

    /// Look up and validate one target.
    ///
    /// A malformed target, or one that declares the reserved server-key
    /// variable, is rejected here before anything is rendered for it.
    pub fn get_target(
        &self,
        environment: &str,
        name: &str,
    ) -> SelfDeployResult<&'a DeploymentTarget> {
        let env = self.environment(environment)?;
        let target =
            env.deployments
                .get(name)
                .ok_or_else(|| SelfDeployError::DeploymentNotFound {
                    environment: environment.to_string(),
                    deployment: name.to_string(),
                })?;

        if let Some(reason) = target.shape_error() {
            return Err(SelfDeployError::MalformedDeployment {
                deployment: name.to_string(),
                reason: reason.to_string(),
            });
        }

        if target.declares_reserved_name() {
            return Err(SelfDeployError::ReservedVariableName {
                deployment: name.to_string(),
                name: RESERVED_SERVER_KEY.to_string(),
            });
        }

        Ok(target)
    }

    pub fn is_multi_server(target: &DeploymentTarget) -> bool {
        target.is_multi_server()
    }

    /// Server slot keys (empty for single-server targets)
    pub fn resolve_servers(target: &DeploymentTarget) -> Vec<&str> {
        target.servers()
    }
}
