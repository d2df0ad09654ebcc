use taskgraph_viz::canonical::{
    canonicalize, most_specific_first, Canonicalize, LabelCanonicalizer,
};

fn default_canonicalizer() -> LabelCanonicalizer {
    LabelCanonicalizer::with_default_locales().expect("default rules compile")
}

#[test]
fn chunk_suffixes_are_stripped() {
    let c = default_canonicalizer();
    assert_eq!(c.canonicalize("build-1/3"), "build");
    assert_eq!(c.canonicalize("build-2/3"), "build");
    assert_eq!(c.canonicalize("test-linux64-2/opt"), "test-linux64");
    assert_eq!(c.canonicalize("source-test-python-7"), "source-test-python");
}

#[test]
fn exposed_numeric_suffixes_are_stripped_until_stable() {
    let c = default_canonicalizer();
    assert_eq!(c.canonicalize("build-1-2"), "build");
}

#[test]
fn long_numeric_runs_collapse_in_one_call() {
    let c = default_canonicalizer();
    let label = (0..40).fold("build".to_string(), |acc, i| format!("{acc}-{i}"));

    let once = c.canonicalize(&label);
    assert_eq!(once, "build");
    assert_eq!(c.canonicalize(&once), once);

    let chunked = format!("{label}/opt");
    assert_eq!(c.canonicalize(&chunked), "build");
}

#[test]
fn locale_infix_and_collapse() {
    let c = default_canonicalizer();
    assert_eq!(
        c.canonicalize("beetmover-repackage-l10n-zh-TW-win64-shippable/opt"),
        "beetmover-repackage-l10n-win64-shippable/opt"
    );
}

#[test]
fn locale_suffix() {
    let c = default_canonicalizer();
    assert_eq!(c.canonicalize("repackage-signing-de"), "repackage-signing-l10n");
}

#[test]
fn longer_locale_wins_over_its_prefix() {
    // Declared shortest first on purpose.
    let c = LabelCanonicalizer::new(&["es", "es-AR"]).unwrap();
    assert_eq!(c.canonicalize("repackage-es-AR-win64"), "repackage-l10n-win64");

    let c = LabelCanonicalizer::new(&["zh", "zh-TW"]).unwrap();
    assert_eq!(c.canonicalize("build-zh-TW-linux"), "build-l10n-linux");
    assert_eq!(c.canonicalize("build-zh-TW"), "build-l10n");
    assert_eq!(c.canonicalize("build-zh-linux"), "build-l10n-linux");
}

#[test]
fn partner_repacks_collapse_to_one_label() {
    let c = default_canonicalizer();
    assert_eq!(
        c.canonicalize("release-partner-repack-acme/acme-1"),
        "release-partner-repack-partners"
    );
    assert_eq!(
        c.canonicalize("release-partner-repack-foo/bar"),
        "release-partner-repack-partners"
    );
    assert_eq!(
        c.canonicalize("release-eme-free-repack-mozillaonline/win64"),
        "release-eme-free-repack-partners"
    );
}

#[test]
fn unmatched_labels_pass_through() {
    let c = default_canonicalizer();
    assert_eq!(
        c.canonicalize("docker-image-debian12-base"),
        "docker-image-debian12-base"
    );
    assert_eq!(c.canonicalize(""), "");
}

#[test]
fn canonicalize_is_idempotent_on_samples() {
    let c = default_canonicalizer();
    for label in [
        "build-2/3",
        "build-1-2",
        "beetmover-repackage-l10n-zh-TW-win64-shippable/opt",
        "repackage-signing-de",
        "release-partner-repack-acme/acme-1",
        "test-linux64-2/opt",
    ] {
        let once = c.canonicalize(label);
        assert_eq!(c.canonicalize(&once), once, "not stable for {label}");
    }
}

#[test]
fn rule_names_follow_application_order() {
    let c = LabelCanonicalizer::new(&["zh", "zh-TW"]).unwrap();
    let names: Vec<&str> = c.rule_names().collect();
    assert_eq!(
        names,
        vec![
            "chunk-pair",
            "chunk-opt",
            "numeric-suffix",
            "locale-infix:zh-TW",
            "l10n-collapse",
            "locale-suffix:zh-TW",
            "locale-infix:zh",
            "l10n-collapse",
            "locale-suffix:zh",
            "partner-repack",
        ]
    );
}

#[test]
fn most_specific_first_orders_by_length_and_drops_blanks() {
    let ordered = most_specific_first(&["zh", " ", "es-AR", "de", "zh-TW", "de"]);
    assert_eq!(ordered, vec!["es-AR", "zh-TW", "zh", "de"]);
}

#[test]
fn free_function_and_closures() {
    assert_eq!(canonicalize("shippable-signing-de", &["de"]), "shippable-signing-l10n");

    let upper = |label: &str| label.to_uppercase();
    assert_eq!(Canonicalize::canonicalize(&upper, "build"), "BUILD");
}
