//! Configuration types and loading logic.
//!
//! Configuration is entirely optional: with no file at all, `zfs-snap` runs
//! the `zfs` found on `PATH` without privilege escalation, and `--prune`
//! requires an explicit `--keep`.
//!
//! # File format
//!
//! ```toml
//! [engine]
//! binary = "zfs"   # path or name of the zfs executable
//! sudo   = false   # prefix every command with doas
//!
//! [retention]      # default --keep per tag
//! hourly = 24
//! daily  = 7
//! ```
//!
//! Two files are layered (see [`PartialConfig::merge`]): the global
//! `<config dir>/zfs-snap/config.toml` and the optional `--config <PATH>`.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ─── Top-level ────────────────────────────────────────────────────────────────

/// Fully-resolved configuration.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// How to reach the snapshot engine.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Per-tag default keep counts, consulted when `--prune` has no `--keep`.
    #[serde(default)]
    pub retention: BTreeMap<String, u32>,
}

impl Config {
    /// Default keep count for `tag`, if one is configured.
    pub fn keep_for(&self, tag: &str) -> Option<u32> {
        self.retention.get(tag).copied()
    }
}

// ─── [engine] ─────────────────────────────────────────────────────────────────

/// Settings for invoking `zfs`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Executable name or path.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Prefix commands with `doas`.
    #[serde(default)]
    pub sudo: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            sudo: false,
        }
    }
}

// `#[serde(default = "…")]` needs a free function.
pub fn default_binary() -> String {
    "zfs".into()
}

// ─── Partial config (layering) ────────────────────────────────────────────────

/// One config file as written, with every field optional so that layers can
/// be merged field by field.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct PartialConfig {
    #[serde(default)]
    pub engine: PartialEngine,

    #[serde(default)]
    pub retention: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct PartialEngine {
    pub binary: Option<String>,
    pub sudo: Option<bool>,
}

impl PartialConfig {
    /// Overlay `local` on top of `self`; `local` wins wherever it sets a value.
    ///
    /// Retention tables are merged per tag.
    #[must_use]
    pub fn merge(mut self, local: Self) -> Self {
        self.engine.binary = local.engine.binary.or(self.engine.binary);
        self.engine.sudo = local.engine.sudo.or(self.engine.sudo);
        self.retention.extend(local.retention);
        self
    }

    /// Fill the gaps with defaults.
    pub fn resolve(self) -> Config {
        Config {
            engine: EngineConfig {
                binary: self.engine.binary.unwrap_or_else(default_binary),
                sudo: self.engine.sudo.unwrap_or(false),
            },
            retention: self.retention,
        }
    }
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Read and parse one config layer.
///
/// Returns `Ok(None)` when the file does not exist, and an error if it exists
/// but cannot be read or is not valid TOML.
pub fn parse_partial(path: &Path) -> Result<Option<PartialConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    toml::from_str(&text)
        .map(Some)
        .with_context(|| format!("parsing {}", path.display()))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
