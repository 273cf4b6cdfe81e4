//! Publish Use Case
//!
//! Renders deployment targets into executable scripts:
//! 1. Validate the environment and selection (fails fast, nothing written)
//! 2. Plan one script per single-server target, one per server slot otherwise
//! 3. Render and write each planned script, collecting per-item results
//!
//! A failed item never stops the remaining ones.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::domain::entities::{DeploymentTarget, Variables};
use crate::domain::ports::FragmentRepository;
use crate::domain::services::DeploymentRegistry;
use crate::error::{SelfDeployError, SelfDeployResult};
use crate::infrastructure::fs::ScriptWriter;
use crate::infrastructure::template::{RenderContext, ScriptTemplateRenderer, TemplateRef};

/// Which deployments of an environment to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    One(String),
    All,
}

/// Input to [`ScriptPublisher::publish`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub environment: String,
    pub selection: Selection,
    /// Only publish this slot of multi-server targets
    pub server_filter: Option<String>,
    /// Value injected as `self_deploy_server_key`; each slot's own key when unset
    pub server_identity: Option<String>,
}

impl PublishRequest {
    pub fn new(environment: impl Into<String>, selection: Selection) -> Self {
        Self {
            environment: environment.into(),
            selection,
            server_filter: None,
            server_identity: None,
        }
    }

    pub fn with_server_filter(mut self, server: Option<String>) -> Self {
        self.server_filter = server;
        self
    }

    pub fn with_server_identity(mut self, identity: Option<String>) -> Self {
        self.server_identity = identity;
        self
    }
}

/// Outcome for one planned script
#[derive(Debug)]
pub struct PublishResult {
    /// Script name (`deployment` or `deployment-server`)
    pub script: String,
    pub deployment: String,
    pub server: Option<String>,
    /// Written path, or why this script was not written
    pub outcome: Result<PathBuf, SelfDeployError>,
}

impl PublishResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// All per-item results of one publish
#[derive(Debug)]
pub struct PublishReport {
    pub environment: String,
    pub output_dir: PathBuf,
    pub results: Vec<PublishResult>,
}

impl PublishReport {
    /// True iff every planned script was written
    pub fn is_success(&self) -> bool {
        self.results.iter().all(PublishResult::is_success)
    }

    pub fn written(&self) -> impl Iterator<Item = &PublishResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PublishResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

/// One script the publisher intends to write
#[derive(Debug)]
struct PlannedScript<'a> {
    deployment: &'a str,
    server: Option<&'a str>,
    target: Result<&'a DeploymentTarget, SelfDeployError>,
}

impl PlannedScript<'_> {
    fn script_name(&self) -> String {
        match self.server {
            Some(server) => format!("{}-{}", self.deployment, server),
            None => self.deployment.to_string(),
        }
    }
}

/// Renders deployment targets and writes them to the scripts directory
pub struct ScriptPublisher<'a, R> {
    registry: DeploymentRegistry<'a>,
    renderer: ScriptTemplateRenderer<R>,
    writer: ScriptWriter,
    log_dir: PathBuf,
}

impl<'a, R: FragmentRepository> ScriptPublisher<'a, R> {
    pub fn new(
        registry: DeploymentRegistry<'a>,
        renderer: ScriptTemplateRenderer<R>,
        writer: ScriptWriter,
        log_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            renderer,
            writer,
            log_dir: log_dir.into(),
        }
    }

    pub fn publish(&self, request: &PublishRequest) -> SelfDeployResult<PublishReport> {
        let plan = self.plan(request)?;
        info!(
            environment = %request.environment,
            scripts = plan.len(),
            output = %self.writer.dir().display(),
            "publishing deployment scripts"
        );

        let results = plan
            .into_iter()
            .map(|planned| self.publish_one(planned, request))
            .collect();

        Ok(PublishReport {
            environment: request.environment.clone(),
            output_dir: self.writer.dir().to_path_buf(),
            results,
        })
    }

    fn plan(&self, request: &PublishRequest) -> SelfDeployResult<Vec<PlannedScript<'a>>> {
        let env = request.environment.as_str();
        let deployments = self.registry.list_deployments(env)?;
        if deployments.is_empty() {
            return Err(SelfDeployError::NoDeployments {
                environment: env.to_string(),
            });
        }

        let selected: Vec<&'a str> = match &request.selection {
            Selection::All => deployments,
            Selection::One(name) => {
                let name = deployments
                    .into_iter()
                    .find(|d| d == name)
                    .ok_or_else(|| SelfDeployError::DeploymentNotFound {
                        environment: env.to_string(),
                        deployment: name.clone(),
                    })?;
                vec![name]
            }
        };

        let mut plan = Vec::new();
        for deployment in selected {
            let target = match self.registry.get_target(env, deployment) {
                Ok(target) => target,
                Err(e) => {
                    // Rejected targets are reported, siblings still publish.
                    plan.push(PlannedScript {
                        deployment,
                        server: None,
                        target: Err(e),
                    });
                    continue;
                }
            };

            let servers = DeploymentRegistry::resolve_servers(target);
            if !DeploymentRegistry::is_multi_server(target) {
                plan.push(PlannedScript {
                    deployment,
                    server: None,
                    target: Ok(target),
                });
                continue;
            }

            let servers: Vec<&'a str> = match request.server_filter.as_deref() {
                None => servers,
                Some(filter) => match servers.into_iter().find(|s| *s == filter) {
                    Some(server) => vec![server],
                    None if matches!(request.selection, Selection::One(_)) => {
                        return Err(SelfDeployError::ServerNotFound {
                            deployment: deployment.to_string(),
                            server: filter.to_string(),
                        });
                    }
                    None => {
                        debug!(deployment, server = filter, "no slot for this server, skipping");
                        Vec::new()
                    }
                },
            };

            plan.extend(servers.into_iter().map(|server| PlannedScript {
                deployment,
                server: Some(server),
                target: Ok(target),
            }));
        }

        Ok(plan)
    }

    fn publish_one(&self, planned: PlannedScript<'_>, request: &PublishRequest) -> PublishResult {
        let script = planned.script_name();
        let outcome = planned
            .target
            .and_then(|target| self.render_and_write(&script, planned.deployment, planned.server, target, request));

        match &outcome {
            Ok(path) => info!(script = %script, path = %path.display(), "deployment script written"),
            Err(e) => warn!(script = %script, error = %e, "deployment script not written"),
        }

        PublishResult {
            script,
            deployment: planned.deployment.to_string(),
            server: planned.server.map(str::to_string),
            outcome,
        }
    }

    fn render_and_write(
        &self,
        script: &str,
        deployment: &str,
        server: Option<&str>,
        target: &DeploymentTarget,
        request: &PublishRequest,
    ) -> SelfDeployResult<PathBuf> {
        let (variables, template, server_key): (&Variables, TemplateRef, Option<String>) =
            match (target, server) {
                (DeploymentTarget::Single(vars), _) => (vars, TemplateRef::new(deployment), None),
                (DeploymentTarget::Multi(servers), Some(server)) => {
                    let vars = servers.get(server).ok_or_else(|| SelfDeployError::ServerNotFound {
                        deployment: deployment.to_string(),
                        server: server.to_string(),
                    })?;
                    let identity = request
                        .server_identity
                        .clone()
                        .unwrap_or_else(|| server.to_string());
                    (
                        vars,
                        TemplateRef::new(script).with_fallback(deployment),
                        Some(identity),
                    )
                }
                (DeploymentTarget::Multi(_), None) => {
                    return Err(SelfDeployError::ServerNotFound {
                        deployment: deployment.to_string(),
                        server: String::new(),
                    })
                }
                (DeploymentTarget::Malformed(reason), _) => {
                    return Err(SelfDeployError::MalformedDeployment {
                        deployment: deployment.to_string(),
                        reason: reason.clone(),
                    })
                }
            };

        let ctx = RenderContext {
            log_dir: self.log_dir.clone(),
            script_label: script.to_string(),
            server_key,
        };

        let rendered = self.renderer.render(&template, variables, &ctx)?;
        self.writer.write(&rendered)
    }
}
