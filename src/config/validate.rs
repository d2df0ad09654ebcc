// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TaskgraphError};
use crate::source::remote::parse_root_url;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TaskgraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_layout(cfg)?;
    validate_locales(cfg)?;
    validate_output(cfg)?;
    validate_remote(cfg)?;
    Ok(())
}

fn validate_layout(cfg: &RawConfigFile) -> Result<()> {
    let scale = cfg.layout.scale;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TaskgraphError::ConfigError(format!(
            "[layout].scale must be a finite number > 0 (got {scale})"
        )));
    }
    if cfg.layout.center.iter().any(|c| !c.is_finite()) {
        return Err(TaskgraphError::ConfigError(format!(
            "[layout].center must contain finite numbers (got {:?})",
            cfg.layout.center
        )));
    }
    Ok(())
}

fn validate_locales(cfg: &RawConfigFile) -> Result<()> {
    for locale in cfg.canonicalize.locales.iter() {
        if locale.trim().is_empty() {
            return Err(TaskgraphError::ConfigError(
                "[canonicalize].locales must not contain blank entries".to_string(),
            ));
        }
        if locale.chars().any(char::is_whitespace) {
            return Err(TaskgraphError::ConfigError(format!(
                "[canonicalize].locales entry '{locale}' contains whitespace"
            )));
        }
    }
    Ok(())
}

fn validate_output(cfg: &RawConfigFile) -> Result<()> {
    if cfg.output.directory.as_os_str().is_empty() {
        return Err(TaskgraphError::ConfigError(
            "[output].directory must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_remote(cfg: &RawConfigFile) -> Result<()> {
    if cfg.remote.page_size == Some(0) {
        return Err(TaskgraphError::ConfigError(
            "[remote].page_size must be >= 1 (got 0)".to_string(),
        ));
    }
    parse_root_url(&cfg.remote.root_url)?;
    Ok(())
}
