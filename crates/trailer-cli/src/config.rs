//! Migration configuration file.
//!
//! ```yaml
//! source:
//!   base_url: https://docker.testrail.com
//!   project_id: 3
//!   suite_id: 33
//! target:
//!   base_url: https://mirantis.testrail.com
//!   env_prefix: MIRANTIS_
//!   project_id: 1
//!   suite_id: 9
//! overrides:
//!   61947: 3170
//! attempts: 2
//! ```
//!
//! `statuses` and `columns` fall back to [`StatusTable::default`] and
//! [`ReportColumns::default`]. A `statuses` block replaces the whole table.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use trailer_client::{ClientError, Credentials, DEFAULT_BASE_URL, TestRailClient};
use trailer_ingest::ReportColumns;
use trailer_model::{CaseId, StatusTable, SuiteScope};

/// One TestRail account and the suite used in it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Prefix of the `TESTRAIL_USERNAME` / `TESTRAIL_TOKEN` variables.
    #[serde(default)]
    pub env_prefix: String,
    pub project_id: u64,
    pub suite_id: u64,
}

impl AccountConfig {
    pub fn scope(&self) -> SuiteScope {
        SuiteScope::new(self.project_id, self.suite_id)
    }

    /// Builds a client with credentials from the environment.
    pub fn connect(&self) -> std::result::Result<TestRailClient, ClientError> {
        let credentials = Credentials::from_env(&self.env_prefix)?;
        TestRailClient::new(&self.base_url, credentials)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationConfig {
    pub source: AccountConfig,
    pub target: AccountConfig,
    #[serde(default)]
    pub statuses: StatusTable,
    /// Source case id to target case id, applied after reconciliation.
    #[serde(default)]
    pub overrides: BTreeMap<CaseId, CaseId>,
    #[serde(default)]
    pub columns: ReportColumns,
    /// Total submissions allowed per run.
    #[serde(default = "default_attempts")]
    pub attempts: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_attempts() -> u32 {
    1
}

impl MigrationConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("parse migration config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (side, account) in [("source", &self.source), ("target", &self.target)] {
            if account.project_id == 0 || account.suite_id == 0 {
                bail!("{side} project_id and suite_id must be non-zero");
            }
        }
        if self.attempts == 0 {
            bail!("attempts must be at least 1");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<MigrationConfig> {
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    MigrationConfig::from_yaml(&yaml).with_context(|| format!("load config {}", path.display()))
}
