//! Deployment script templating
//!
//! Rendering is an explicit two-stage composition:
//!
//! 1. `base::assemble` builds the fixed script skeleton (strict shell mode,
//!    log directory and dual console/file output, `log`/`run` helpers,
//!    working-directory change) from the render context.
//! 2. `substitute` resolves `{{ name }}` placeholders in the deployment's
//!    fragment, which becomes the body of the skeleton.
//!
//! # Fragment syntax
//!
//! ```text
//! # deployments/app-production.sh.tmpl
//! run git -C "{{ deploy_path }}" pull origin {{ branch }}
//! run systemctl restart {{ $service }}
//! ```

pub mod base;
mod renderer;
mod substitute;

pub use base::BaseTemplate;
pub use renderer::{RenderContext, ScriptTemplateRenderer, TemplateRef};
pub use substitute::{placeholders, substitute};

/// File extension of fragment files in the lookup directory
pub const FRAGMENT_EXTENSION: &str = "sh.tmpl";

/// Template name used in errors raised by the base skeleton
pub const BASE_TEMPLATE: &str = "base";

/// Deployment variable the base skeleton changes into
pub const WORKING_PATH_VARIABLE: &str = "deploy_path";
