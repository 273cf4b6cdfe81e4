//! Fragment scaffolding
//!
//! Writes a starter fragment for a configured deployment: one log line per
//! variable, so the first publish shows every value the script will see.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::entities::{DeploymentTarget, RESERVED_SERVER_KEY};
use crate::domain::services::DeploymentRegistry;
use crate::error::{SelfDeployError, SelfDeployResult};
use crate::infrastructure::template::FRAGMENT_EXTENSION;

/// Starter fragment text for `variables`
pub fn starter_fragment(deployment: &str, variables: &[&str]) -> String {
    let mut content = format!("# Deployment steps for {}\n", deployment);
    content.push_str("# Available helpers: log \"message\", run command args...\n\n");
    for name in variables {
        content.push_str(&format!("log \"{}: {{{{ {} }}}}\"\n", name, name));
    }
    content
}

/// Write starter fragments for a configured deployment.
///
/// Writes `{templates_dir}/{deployment}.sh.tmpl`, or with `per_server` one
/// `{deployment}-{server}.sh.tmpl` per slot of a multi-server target. Nothing
/// is written if any of them exists, unless `overwrite`.
pub fn scaffold_fragment(
    registry: &DeploymentRegistry<'_>,
    environment: &str,
    deployment: &str,
    templates_dir: &Path,
    per_server: bool,
    overwrite: bool,
) -> SelfDeployResult<Vec<PathBuf>> {
    let target = registry.get_target(environment, deployment)?;

    let templates: Vec<(String, Vec<&str>)> = match target {
        DeploymentTarget::Multi(servers) if per_server => servers
            .iter()
            .map(|(server, vars)| {
                let mut names: Vec<&str> = vars.names().collect();
                names.push(RESERVED_SERVER_KEY);
                (format!("{}-{}", deployment, server), names)
            })
            .collect(),
        _ => {
            let mut names = target.variable_names();
            if target.is_multi_server() {
                names.push(RESERVED_SERVER_KEY);
            }
            vec![(deployment.to_string(), names)]
        }
    };

    let files: Vec<(PathBuf, String)> = templates
        .iter()
        .map(|(template, names)| {
            (
                templates_dir.join(format!("{}.{}", template, FRAGMENT_EXTENSION)),
                starter_fragment(template, names),
            )
        })
        .collect();

    if !overwrite {
        if let Some((path, _)) = files.iter().find(|(path, _)| path.exists()) {
            return Err(SelfDeployError::FragmentExists { path: path.clone() });
        }
    }

    std::fs::create_dir_all(templates_dir)?;
    let mut written = Vec::with_capacity(files.len());
    for (path, content) in files {
        std::fs::write(&path, content)?;
        info!(deployment, path = %path.display(), "fragment scaffolded");
        written.push(path);
    }

    Ok(written)
}
