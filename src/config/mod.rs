// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file through the filesystem abstraction (`loader.rs`).
//! - Validate values before they reach the pipeline (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default, parse_config};
pub use model::{
    BuildSection, CanonicalizeSection, ConfigFile, LayoutSection, OutputSection, RawConfigFile,
    RemoteSection, DEFAULT_OUTPUT_DIR, DEFAULT_ROOT_URL,
};
