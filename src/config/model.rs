// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::canonical::default_locales;
use crate::types::{Alignment, LayoutAlgorithm, MissingDependencyPolicy};

/// Default Taskcluster deployment queried for task groups.
pub const DEFAULT_ROOT_URL: &str = "https://firefox-ci-tc.services.mozilla.com/";

/// Default directory for output documents when `--output` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "./data/output";

/// Top-level configuration as read from a TOML file (unvalidated).
///
/// ```toml
/// [layout]
/// alignment = "horizontal"
/// scale = 1.0
/// center = [0.0, 0.0]
///
/// [canonicalize]
/// locales = ["de", "es-AR", "zh-TW"]
///
/// [build]
/// missing_dependencies = "skip"
///
/// [output]
/// directory = "./data/output"
/// include_data = true
///
/// [remote]
/// root_url = "https://firefox-ci-tc.services.mozilla.com/"
/// page_size = 1000
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub canonicalize: CanonicalizeSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub remote: RemoteSection,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (or `Default`), so every
/// `ConfigFile` in the program has passed validation.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub layout: LayoutSection,
    pub canonicalize: CanonicalizeSection,
    pub build: BuildSection,
    pub output: OutputSection,
    pub remote: RemoteSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            layout: raw.layout,
            canonicalize: raw.canonicalize,
            build: raw.build,
            output: raw.output,
            remote: raw.remote,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

/// `[layout]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSection {
    #[serde(default)]
    pub alignment: Alignment,

    #[serde(default)]
    pub algorithm: LayoutAlgorithm,

    /// Largest absolute coordinate after rescaling; must be > 0.
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// `[x, y]` offset applied to every node.
    #[serde(default)]
    pub center: [f64; 2],
}

fn default_scale() -> f64 {
    1.0
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            alignment: Alignment::default(),
            algorithm: LayoutAlgorithm::default(),
            scale: default_scale(),
            center: [0.0, 0.0],
        }
    }
}

/// `[canonicalize]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CanonicalizeSection {
    /// Locale codes rewritten to `l10n`. Order does not matter; they are
    /// applied most specific first.
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
}

impl Default for CanonicalizeSection {
    fn default() -> Self {
        Self {
            locales: default_locales(),
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BuildSection {
    /// `"reject"` (default) or `"skip"`.
    #[serde(default)]
    pub missing_dependencies: MissingDependencyPolicy,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Directory for generated file names when no explicit output path is
    /// given.
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// Attach raw task payloads as node `data`.
    #[serde(default = "default_include_data")]
    pub include_data: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_include_data() -> bool {
    true
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            include_data: default_include_data(),
        }
    }
}

/// `[remote]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSection {
    #[serde(default = "default_root_url")]
    pub root_url: String,

    /// `limit` sent with every listing request; server default if unset.
    #[serde(default)]
    pub page_size: Option<u32>,
}

fn default_root_url() -> String {
    DEFAULT_ROOT_URL.to_string()
}

impl Default for RemoteSection {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            page_size: None,
        }
    }
}
