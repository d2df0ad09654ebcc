// src/canonical/mod.rs

//! Label canonicalization ("dechunkify").
//!
//! Task graphs contain many near-identical jobs that only differ by chunk
//! number, locale or partner. Canonicalization rewrites a raw label into a
//! representative one so these variants collapse into a single node:
//!
//! - [`rules`] holds the individual named rewrite rules.
//! - [`locales`] holds the default locale list and its most-specific-first
//!   ordering.

pub mod locales;
pub mod rules;

use tracing::{trace, warn};

use crate::errors::Result;
use crate::canonical::rules::RewriteRule;

pub use locales::{default_locales, most_specific_first, DEFAULT_LOCALES};

/// Anything that maps a raw label onto its node identity.
///
/// Implemented by [`LabelCanonicalizer`] and by plain closures, so callers
/// (and tests) can plug in their own rewriting.
pub trait Canonicalize {
    fn canonicalize(&self, label: &str) -> String;
}

impl<F> Canonicalize for F
where
    F: Fn(&str) -> String,
{
    fn canonicalize(&self, label: &str) -> String {
        self(label)
    }
}

/// Ordered, data-driven label rewriter.
///
/// Rule order:
/// 1. `chunk-pair` (`-<int>/<int>`)
/// 2. `chunk-opt` (`-<int>/opt`)
/// 3. `numeric-suffix` (trailing run of `-<int>`)
/// 4. per locale, most specific first: `locale-infix:<code>`,
///    `l10n-collapse`, `locale-suffix:<code>`
/// 5. `partner-repack`
///
/// The whole list is re-applied until the label stops changing, which makes
/// [`LabelCanonicalizer::canonicalize`] idempotent.
#[derive(Debug, Clone)]
pub struct LabelCanonicalizer {
    rules: Vec<RewriteRule>,
}

impl LabelCanonicalizer {
    /// Build the rule list for the given locale codes.
    ///
    /// The codes may come in any order; they are sorted most-specific first.
    pub fn new<S: AsRef<str>>(locales: &[S]) -> Result<Self> {
        let mut rules = rules::chunk_rules()?;
        for locale in most_specific_first(locales) {
            rules.extend(rules::locale_rules(&locale)?);
        }
        rules.extend(rules::partner_rules()?);
        Ok(Self { rules })
    }

    /// Canonicalizer using [`DEFAULT_LOCALES`].
    pub fn with_default_locales() -> Result<Self> {
        Self::new(DEFAULT_LOCALES)
    }

    /// Names of the rules in application order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// Rewrite `label` into its canonical form. Never fails; a label no rule
    /// matches is returned unchanged.
    pub fn canonicalize(&self, label: &str) -> String {
        let mut current = label.to_string();

        // Terminates: each rewrite removes a chunk suffix, a locale code or a
        // partner path, and no rule reintroduces one.
        loop {
            let next = self.apply_once(&current);
            if next == current {
                break;
            }
            current = next;
        }

        if current != label {
            trace!(raw = %label, canonical = %current, "label canonicalized");
        }
        current
    }

    fn apply_once(&self, label: &str) -> String {
        let mut out = label.to_string();
        for rule in &self.rules {
            out = rule.apply(&out).into_owned();
        }
        out
    }
}

impl Canonicalize for LabelCanonicalizer {
    fn canonicalize(&self, label: &str) -> String {
        LabelCanonicalizer::canonicalize(self, label)
    }
}

/// One-shot convenience: canonicalize `label` against `locales`.
///
/// Builds the rule list on every call; use [`LabelCanonicalizer`] directly
/// when rewriting many labels. If the rule list cannot be built the label is
/// returned unchanged.
pub fn canonicalize<S: AsRef<str>>(label: &str, locales: &[S]) -> String {
    match LabelCanonicalizer::new(locales) {
        Ok(canonicalizer) => canonicalizer.canonicalize(label),
        Err(e) => {
            warn!(error = %e, "could not build canonicalization rules; keeping label as-is");
            label.to_string()
        }
    }
}
