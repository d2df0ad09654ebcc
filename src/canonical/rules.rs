// src/canonical/rules.rs

use std::borrow::Cow;
use std::fmt;

use regex::Regex;

use crate::errors::{Result, TaskgraphError};

/// Placeholder every locale-specific label segment is rewritten to.
pub const L10N: &str = "l10n";

/// A single named `pattern -> replacement` rewrite.
///
/// `replacement` uses `regex` replacement syntax (`$1`, `${name}`).
#[derive(Clone)]
pub struct RewriteRule {
    name: String,
    pattern: Regex,
    replacement: String,
}

impl fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

impl RewriteRule {
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|e| {
            TaskgraphError::ConfigError(format!("invalid pattern for rule '{name}': {e}"))
        })?;
        Ok(Self {
            name,
            pattern,
            replacement: replacement.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the rule to every non-overlapping match in `label`.
    pub fn apply<'a>(&self, label: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(label, self.replacement.as_str())
    }
}

/// Rules that run before any locale rule, in this order.
pub fn chunk_rules() -> Result<Vec<RewriteRule>> {
    Ok(vec![
        // build-2/3 -> build
        RewriteRule::new("chunk-pair", r"-\d+/\d+", "")?,
        // test-linux-1/opt -> test-linux
        RewriteRule::new("chunk-opt", r"-\d+/opt", "")?,
        // build-1-2 -> build
        RewriteRule::new("numeric-suffix", r"(?:-\d+)+$", "")?,
    ])
}

/// The three rules for one locale: infix, `-l10n-l10n` collapse, suffix.
pub fn locale_rules(locale: &str) -> Result<Vec<RewriteRule>> {
    let escaped = regex::escape(locale);
    Ok(vec![
        RewriteRule::new(
            format!("locale-infix:{locale}"),
            &format!("-{escaped}-"),
            format!("-{L10N}-"),
        )?,
        RewriteRule::new(
            "l10n-collapse",
            &format!("-{L10N}-{L10N}(-|$)"),
            format!("-{L10N}$1"),
        )?,
        RewriteRule::new(
            format!("locale-suffix:{locale}"),
            &format!("-{escaped}$"),
            format!("-{L10N}"),
        )?,
    ])
}

/// Partner repack variants (`<prefix>-repack-<partner>/<sub>...` at the end
/// of a label) all collapse onto one representative label.
///
/// `release-partner-repack-acme/acme-1` and
/// `release-partner-repack-foo/bar` both become
/// `release-partner-repack-partners`.
pub fn partner_rules() -> Result<Vec<RewriteRule>> {
    Ok(vec![RewriteRule::new(
        "partner-repack",
        r"(partner|eme-free)-repack-[0-9A-Za-z_.]+(?:/[0-9A-Za-z_.-]+)+$",
        "${1}-repack-partners",
    )?])
}
