//! The fixed script skeleton every deployment body is placed into

use std::path::Path;

use crate::domain::value_objects::escape_double_quoted;

const PREAMBLE: &str = "#!/usr/bin/env bash\nset -euo pipefail\n\nexport PATH=\"/usr/local/bin:/usr/bin:/bin:/usr/sbin:/sbin\"\n";

const HELPERS: &str = r#"log() { echo "[$(date '+%F %T')] $*"; }
run() { log "RUN: $*"; "$@"; }
"#;

/// Base template sections, assembled from a render context.
///
/// Values are embedded inside double-quoted shell strings and escaped for
/// that context. Timestamps are computed by the script when it runs, never
/// at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTemplate {
    pub preamble: String,
    pub log_setup: String,
    pub helpers: String,
    pub start: String,
}

impl BaseTemplate {
    pub fn assemble(log_dir: &Path, label: &str, app_dir: &str) -> Self {
        let log_dir = escape_double_quoted(&log_dir.to_string_lossy());
        let label = escape_double_quoted(label);
        let app_dir = escape_double_quoted(app_dir);

        let log_setup = format!(
            concat!(
                "APP_DIR=\"{app_dir}\"\n",
                "LOG_DIR=\"{log_dir}/{label}\"\n",
                "LOG_FILE=\"${{LOG_DIR}}/deployment-$(date +%F_%H%M%S).log\"\n",
                "\n",
                "mkdir -p \"$LOG_DIR\"\n",
                "exec > >(tee -a \"$LOG_FILE\") 2>&1\n",
            ),
            app_dir = app_dir,
            log_dir = log_dir,
            label = label,
        );

        let start = format!(
            "log \"==== {label} deployment started ====\"\nlog \"Log file: $LOG_FILE\"\n\ncd \"$APP_DIR\"\n",
            label = label
        );

        Self {
            preamble: PREAMBLE.to_string(),
            log_setup,
            helpers: HELPERS.to_string(),
            start,
        }
    }

    /// Final script text with `body` appended after the working-directory change
    pub fn compose(&self, body: &str) -> String {
        let mut script = String::with_capacity(
            self.preamble.len() + self.log_setup.len() + self.helpers.len() + self.start.len() + body.len() + 4,
        );
        script.push_str(&self.preamble);
        script.push('\n');
        script.push_str(&self.log_setup);
        script.push('\n');
        script.push_str(&self.helpers);
        script.push('\n');
        script.push_str(&self.start);
        script.push('\n');
        script.push_str(body);
        if !body.ends_with('\n') {
            script.push('\n');
        }
        script
    }
}
