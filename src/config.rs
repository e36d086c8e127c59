//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/bookgraph/config.toml` (XDG) or platform config dir
//! 2. Project config: `bookgraph.toml` in the working directory
//! 3. `NEO4J_URI`, `NEO4J_USER`, `NEO4J_PASS`
//! 4. Environment variables: `BOOKGRAPH_*`, with `__` separating sections
//!    (e.g. `BOOKGRAPH_STORE__ID_STRATEGY=locked`)
//!
//! ```toml
//! [neo4j]
//! uri = "neo4j://localhost:7687"
//! user = "neo4j"
//! password = "secret"
//!
//! [server]
//! port = 8000
//!
//! [store]
//! retries = 1
//! id_strategy = "sequence"
//! ```
//!
//! Every field has a default, so an empty environment yields a usable config
//! pointing at a local Neo4j.

use std::ops::Deref;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::repositories::IdStrategy;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub neo4j: Neo4jConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Neo4j connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    /// Bolt URI, e.g. `neo4j://localhost:7687`.
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_user")]
    pub user: String,
    /// Omitted means an empty password.
    #[serde(default)]
    pub password: Option<String>,
    /// Target database; the server default when omitted.
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: None,
            database: None,
            max_connections: default_max_connections(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Repository behavior against the store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Retries after a transient store failure.
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// How server-assigned identifiers are allocated.
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            id_strategy: IdStrategy::default(),
        }
    }
}

fn default_uri() -> String {
    "neo4j://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> usize {
    16
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_retries() -> u32 {
    crate::graph::DEFAULT_RETRIES
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// The layered provider stack behind [`Config::load`].
    pub fn figment() -> Figment {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file("bookgraph.toml"))
            // Layer 3: Conventional Neo4j variables
            .merge(Env::raw().filter_map(|key| {
                if key == "NEO4J_URI" {
                    Some("neo4j.uri".into())
                } else if key == "NEO4J_USER" {
                    Some("neo4j.user".into())
                } else if key == "NEO4J_PASS" {
                    Some("neo4j.password".into())
                } else {
                    None
                }
            }))
            // Layer 4: Prefixed environment variables (highest priority)
            .merge(Env::prefixed("BOOKGRAPH_").split("__"))
    }

    /// User config path: ~/.config/bookgraph/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("bookgraph").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join("bookgraph").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_any_source() {
        Jail::expect_with(|jail| {
            let home = jail.directory().display().to_string();
            jail.set_env("HOME", home);
            let config: Config = Config::figment().extract()?;
            assert_eq!(config.neo4j.uri, "neo4j://localhost:7687");
            assert_eq!(config.neo4j.user, "neo4j");
            assert_eq!(config.server.port, 8000);
            assert_eq!(config.store.retries, 1);
            assert_eq!(config.store.id_strategy, IdStrategy::Sequence);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_then_env_override() {
        Jail::expect_with(|jail| {
            let home = jail.directory().display().to_string();
            jail.set_env("HOME", home);
            jail.create_file(
                "bookgraph.toml",
                r#"
                [neo4j]
                uri = "bolt://graph.internal:7687"
                password = "from-file"

                [store]
                id_strategy = "locked"
                "#,
            )?;
            jail.set_env("NEO4J_PASS", "from-env");
            jail.set_env("BOOKGRAPH_SERVER__PORT", "9100");

            let config: Config = Config::figment().extract()?;
            assert_eq!(config.neo4j.uri, "bolt://graph.internal:7687");
            assert_eq!(config.neo4j.password.as_deref(), Some("from-env"));
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.store.id_strategy, IdStrategy::Locked);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_beats_neo4j_variables() {
        Jail::expect_with(|jail| {
            let home = jail.directory().display().to_string();
            jail.set_env("HOME", home);
            jail.set_env("NEO4J_URI", "neo4j://legacy:7687");
            jail.set_env("BOOKGRAPH_NEO4J__URI", "neo4j://primary:7687");

            let config: Config = Config::figment().extract()?;
            assert_eq!(config.neo4j.uri, "neo4j://primary:7687");
            Ok(())
        });
    }
}
