use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{LegacyWindowConfig, ProfileCollection};

pub const CURRENT_CONFIG_VERSION: u32 = 2;

fn default_config_version() -> u32 {
    1
}

/// Engine-owned slice of the host's config file: the profile map plus the
/// legacy absolute-position fields awaiting their post-migration scrub.
/// Profiles keep unknown fields verbatim, so newer schema versions survive a
/// round trip through an older build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(flatten)]
    pub legacy: LegacyWindowConfig,
    pub display_profiles: ProfileCollection,
}

impl Default for PersistedConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            legacy: LegacyWindowConfig::default(),
            display_profiles: BTreeMap::new(),
        }
    }
}

impl PersistedConfig {
    /// Scrub the legacy fields once migration has folded them into a
    /// profile, so they can never re-migrate with stale values.
    pub fn clear_legacy(&mut self) {
        debug!("clearing migrated legacy window fields");
        self.legacy.clear();
    }
}

/// Missing file is not an error; a malformed one is, so the host can decide
/// whether to start fresh or surface it.
pub fn load(path: &Path) -> Result<Option<PersistedConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes =
        fs::read(path).with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config: PersistedConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse config {}", path.display()))?;

    if config.version < CURRENT_CONFIG_VERSION {
        debug!(from = config.version, to = CURRENT_CONFIG_VERSION, "upgrading config version");
        config.version = CURRENT_CONFIG_VERSION;
    }
    debug!(profiles = config.display_profiles.len(), "config loaded");
    Ok(Some(config))
}

/// Atomic write: temp file in the same directory, fsync, then rename over
/// the old config.
pub fn save(path: &Path, config: &PersistedConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config dir {}", parent.display()))?;
    }

    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp)
        .with_context(|| format!("failed to create temp config {}", tmp.display()))?;
    serde_json::to_writer_pretty(&mut file, config).context("failed to serialize config")?;
    file.write_all(b"\n")?;
    file.sync_all()?;

    let _ = fs::remove_file(path);
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move config into place at {}", path.display()))?;
    Ok(())
}
