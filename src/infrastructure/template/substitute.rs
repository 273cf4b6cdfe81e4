//! Placeholder substitution for fragments

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::domain::entities::Variables;
use crate::error::{SelfDeployError, SelfDeployResult};

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // {{ name }} or {{ $name }}
        Regex::new(r"\{\{\s*\$?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
            .expect("placeholder pattern is a valid regex")
    })
}

/// Variable names referenced by `source`, in order of first appearance
pub fn placeholders(source: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for caps in placeholder_pattern().captures_iter(source) {
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Replace every placeholder in `source` with its value.
///
/// Single pass: substituted values are never scanned again. The first
/// placeholder without a value fails the whole fragment.
pub fn substitute(template: &str, source: &str, variables: &Variables) -> SelfDeployResult<String> {
    if let Some(missing) = placeholders(source)
        .into_iter()
        .find(|name| !variables.contains(name))
    {
        return Err(SelfDeployError::MissingVariable {
            template: template.to_string(),
            variable: missing.to_string(),
        });
    }

    let rendered = placeholder_pattern().replace_all(source, |caps: &Captures<'_>| {
        variables.get(&caps[1]).unwrap_or_default().to_string()
    });

    Ok(rendered.into_owned())
}
