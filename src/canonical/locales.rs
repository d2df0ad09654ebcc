// src/canonical/locales.rs

//! Locale code lists used by the `-l10n` rewriting rules.

/// Locales shipped by Firefox release builds.
///
/// Used as `[canonicalize].locales` when the config file does not set it.
pub const DEFAULT_LOCALES: &[&str] = &[
    "ach", "af", "an", "ar", "ast", "az", "be", "bg", "bn", "br", "bs", "ca",
    "ca-valencia", "cak", "cs", "cy", "da", "de", "dsb", "el", "en-CA", "en-GB",
    "eo", "es-AR", "es-CL", "es-ES", "es-MX", "et", "eu", "fa", "ff", "fi", "fr",
    "fur", "fy-NL", "ga-IE", "gd", "gl", "gn", "gu-IN", "he", "hi-IN", "hr",
    "hsb", "hu", "hy-AM", "ia", "id", "is", "it", "ja", "ja-JP-mac", "ka",
    "kab", "kk", "km", "kn", "ko", "lij", "lt", "lv", "mk", "mr", "ms", "my",
    "nb-NO", "ne-NP", "nl", "nn-NO", "oc", "pa-IN", "pl", "pt-BR", "pt-PT", "rm",
    "ro", "ru", "sat", "sc", "sco", "si", "sk", "skr", "sl", "son", "sq", "sr",
    "sv-SE", "szl", "ta", "te", "tg", "th", "tl", "tr", "trs", "uk", "ur", "uz",
    "vi", "xh", "zh-CN", "zh-TW",
];

/// Owned copy of [`DEFAULT_LOCALES`].
pub fn default_locales() -> Vec<String> {
    DEFAULT_LOCALES.iter().map(|s| s.to_string()).collect()
}

/// Order locale codes most-specific first.
///
/// Codes are stably sorted by descending length, so a code that textually
/// contains another (`zh-TW` vs `zh`, `es-AR` vs `es`) always comes before
/// it. Duplicates and blank entries are dropped; relative order among codes
/// of equal length is preserved.
pub fn most_specific_first<S: AsRef<str>>(locales: &[S]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::with_capacity(locales.len());
    for locale in locales {
        let locale = locale.as_ref().trim();
        if locale.is_empty() || ordered.iter().any(|l| l == locale) {
            continue;
        }
        ordered.push(locale.to_string());
    }
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));
    ordered
}
