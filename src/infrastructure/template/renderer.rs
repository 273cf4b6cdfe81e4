//! ScriptTemplateRenderer - base template + fragment composition

use std::path::PathBuf;

use tracing::debug;

use super::base::BaseTemplate;
use super::substitute::substitute;
use super::{BASE_TEMPLATE, WORKING_PATH_VARIABLE};
use crate::domain::entities::{RenderedScript, Variables, RESERVED_SERVER_KEY};
use crate::domain::ports::FragmentRepository;
use crate::error::{SelfDeployError, SelfDeployResult};

/// Per-script inputs that are not deployment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Root of per-script log directories
    pub log_dir: PathBuf,
    /// Script name, used for the log subdirectory and the start banner
    pub script_label: String,
    /// Injected as `self_deploy_server_key` when rendering a multi-server slot
    pub server_key: Option<String>,
}

/// Fragment to render, with an optional shared fragment to fall back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    pub name: String,
    pub fallback: Option<String>,
}

impl TemplateRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

/// Renders deployment scripts from registered fragments.
///
/// Pure with respect to its inputs: the only I/O is reading fragments.
pub struct ScriptTemplateRenderer<R> {
    fragments: R,
}

impl<R: FragmentRepository> ScriptTemplateRenderer<R> {
    pub fn new(fragments: R) -> Self {
        Self { fragments }
    }

    pub fn render(
        &self,
        template: &TemplateRef,
        variables: &Variables,
        ctx: &RenderContext,
    ) -> SelfDeployResult<RenderedScript> {
        let (resolved, fragment) = self.resolve(template)?;

        let mut variables = variables.clone();
        if let Some(server_key) = &ctx.server_key {
            variables.insert(RESERVED_SERVER_KEY, server_key.as_str());
        }

        let app_dir = variables.get(WORKING_PATH_VARIABLE).ok_or_else(|| {
            SelfDeployError::MissingVariable {
                template: BASE_TEMPLATE.to_string(),
                variable: WORKING_PATH_VARIABLE.to_string(),
            }
        })?;

        let body = substitute(&resolved, &fragment, &variables)?;
        let base = BaseTemplate::assemble(&ctx.log_dir, &ctx.script_label, app_dir);

        debug!(
            script = %ctx.script_label,
            template = %resolved,
            "rendered script"
        );

        Ok(RenderedScript {
            name: ctx.script_label.clone(),
            template: resolved,
            content: base.compose(&body),
        })
    }

    fn resolve(&self, template: &TemplateRef) -> SelfDeployResult<(String, String)> {
        let candidates = std::iter::once(&template.name).chain(template.fallback.as_ref());
        for name in candidates {
            if let Some(source) = self.fragments.find(name)? {
                return Ok((name.clone(), source));
            }
        }

        Err(SelfDeployError::TemplateNotFound {
            template: template.name.clone(),
            directory: self.fragments.location(),
        })
    }
}
