//! Application configuration.
//!
//! Layered in order: built-in defaults, the YAML file given with `--config`,
//! environment variables prefixed `CORE_SEED__` (`__` separates nesting), then
//! command line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use core_seed::CoreSeedConfig;
use core_seed::config::StorageConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "CORE_SEED__";

const REDACTED: &str = "***";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub core_seed: CoreSeedConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `core_seed=debug`. `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    /// Load the layered configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a layer does not match
    /// the configuration schema.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)
            .extract()
            .context("failed to load configuration")
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Replace the relational DSN. Switches the storage backend to `SeaORM`.
    pub fn apply_dsn_override(&mut self, dsn: Option<&str>) {
        if let Some(dsn) = dsn {
            self.core_seed.storage = StorageConfig::SeaOrm {
                dsn: dsn.to_owned(),
            };
        }
    }

    /// Render as YAML with the administrator password masked.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        let mut redacted = self.clone();
        if !redacted.core_seed.admin.password.is_empty() {
            redacted.core_seed.admin.password = REDACTED.to_owned();
        }
        serde_yaml::to_string(&redacted).context("failed to render configuration")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use core_seed::config::TenantMode;

    use super::*;

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let config = AppConfig::load(None).unwrap();

        assert_eq!(config.logging, LoggingConfig::default());
        assert!(matches!(
            config.core_seed.storage,
            StorageConfig::SeaOrm { .. }
        ));
        assert_eq!(config.core_seed.site.site_name, "Sample Site");
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let file = yaml_file(
            r"
logging:
  level: debug
  format: json
core_seed:
  storage:
    kind: no_db
    root_dir: /var/lib/core-seed
  site:
    site_name: Acme
  tenant:
    mode: static
    tenant_id: 6f1c2d1e-8f0a-4c4b-9f6e-2b8c4a1d9e01
",
        );

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(matches!(
            config.core_seed.storage,
            StorageConfig::NoDb { ref root_dir } if root_dir == Path::new("/var/lib/core-seed")
        ));
        assert_eq!(config.core_seed.site.site_name, "Acme");
        assert_eq!(config.core_seed.site.alias_id, "s1");
        assert_eq!(config.core_seed.tenant.mode, TenantMode::Static);
        assert!(config.core_seed.tenant.tenant_id.is_some());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/core-seed.yaml"))).unwrap_err();
        assert!(err.to_string().contains("failed to load configuration"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml_file("core_seed:\n  admins: {}\n");
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn dsn_override_switches_backend() {
        let mut config = AppConfig::default();
        config.core_seed.storage = StorageConfig::NoDb {
            root_dir: "data".into(),
        };

        config.apply_dsn_override(None);
        assert!(matches!(config.core_seed.storage, StorageConfig::NoDb { .. }));

        config.apply_dsn_override(Some("sqlite::memory:"));
        assert_eq!(
            config.core_seed.storage,
            StorageConfig::SeaOrm {
                dsn: "sqlite::memory:".to_owned()
            }
        );
    }

    #[test]
    fn yaml_dump_masks_password_and_reloads() {
        let yaml = AppConfig::default().to_yaml().unwrap();
        assert!(!yaml.contains("password: admin"));
        assert!(yaml.contains("***"));

        let reparsed: AppConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(reparsed.core_seed.admin.password, "***");
        assert_eq!(reparsed.core_seed.admin.email, "admin@admin.com");
    }
}
