//! Environment and DeploymentTarget entities
//!
//! A deployment target is either a flat variable map (single server) or a map
//! of server slots, each with its own variable map (multi-server, e.g.
//! blue/green). The shape is decided once, while the configuration is
//! deserialized, so consumers match on the variant instead of sniffing values.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Variable name injected with the server identity for multi-server targets.
///
/// Configuration must never declare it.
pub const RESERVED_SERVER_KEY: &str = "self_deploy_server_key";

/// Variable name → string value, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(BTreeMap<String, String>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A TOML scalar accepted as a variable default.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl<'de> Deserialize<'de> for Variables {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, ScalarValue>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|(k, v)| (k, v.to_string())).collect())
    }
}

/// Deployment configuration for one named target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentTarget {
    /// One script, one variable set
    Single(Variables),
    /// One script per server slot
    Multi(BTreeMap<String, Variables>),
    /// Table that is neither shape; kept so siblings still load
    Malformed(String),
}

impl DeploymentTarget {
    pub fn is_multi_server(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// Server slot keys, empty for single-server targets
    pub fn servers(&self) -> Vec<&str> {
        match self {
            Self::Multi(servers) => servers.keys().map(String::as_str).collect(),
            Self::Single(_) | Self::Malformed(_) => Vec::new(),
        }
    }

    /// Every variable name declared anywhere in the target
    pub fn variable_names(&self) -> Vec<&str> {
        match self {
            Self::Single(vars) => vars.names().collect(),
            Self::Multi(servers) => {
                let mut names: Vec<&str> = servers.values().flat_map(Variables::names).collect();
                names.sort_unstable();
                names.dedup();
                names
            }
            Self::Malformed(_) => Vec::new(),
        }
    }

    /// Whether the protected server-key variable is declared anywhere
    pub fn declares_reserved_name(&self) -> bool {
        match self {
            Self::Single(vars) => vars.contains(RESERVED_SERVER_KEY),
            Self::Multi(servers) => servers.values().any(|v| v.contains(RESERVED_SERVER_KEY)),
            Self::Malformed(_) => false,
        }
    }

    /// Why the target could not be read, if it could not
    pub fn shape_error(&self) -> Option<&str> {
        match self {
            Self::Malformed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Scalar(ScalarValue),
    Table(Variables),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTarget {
    Entries(BTreeMap<String, RawEntry>),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for DeploymentTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match RawTarget::deserialize(deserializer)? {
            RawTarget::Entries(raw) => raw,
            RawTarget::Other(_) => {
                return Ok(Self::Malformed(
                    "deployment values must be scalars or tables of scalars (one per server)"
                        .to_string(),
                ))
            }
        };

        // The first entry decides the shape; the rest must agree with it.
        let multi = matches!(raw.values().next(), Some(RawEntry::Table(_)));

        if multi {
            let mut servers = BTreeMap::new();
            for (server, entry) in raw {
                match entry {
                    RawEntry::Table(vars) => {
                        servers.insert(server, vars);
                    }
                    RawEntry::Scalar(_) => {
                        return Ok(Self::Malformed(format!(
                            "'{}' is a plain value but other entries are server tables",
                            server
                        )));
                    }
                }
            }
            Ok(Self::Multi(servers))
        } else {
            let mut vars = Variables::new();
            for (name, entry) in raw {
                match entry {
                    RawEntry::Scalar(value) => vars.insert(name, value.to_string()),
                    RawEntry::Table(_) => {
                        return Ok(Self::Malformed(format!(
                            "'{}' is a server table but other entries are plain variables",
                            name
                        )));
                    }
                }
            }
            Ok(Self::Single(vars))
        }
    }
}

/// A named group of deployment targets
///
/// `hosts`, `ssh_user` and `remote_path` are only read by the remote trigger;
/// every other key of the environment table is a deployment target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub hosts: Vec<String>,

    #[serde(default)]
    pub ssh_user: Option<String>,

    #[serde(default)]
    pub remote_path: Option<String>,

    #[serde(flatten)]
    pub deployments: BTreeMap<String, DeploymentTarget>,
}
