//! Architecture contract tests.

mod support;

use support::architecture::{find_lines_containing, find_non_export_lines_in_mod_files, path_exists};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "axum::",
            "diesel::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = find_lines_containing("src/application", &["crate::adapter::", "diesel::", "axum::"]);
    assert!(
        hits.is_empty(),
        "application layer should not import adapters directly: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_lines_containing(
        "src/port",
        &["crate::adapter", "crate::application", "crate::infrastructure"],
    );
    assert!(hits.is_empty(), "ports should depend only on domain: {hits:#?}");
}

#[test]
fn http_adapter_does_not_touch_sqlite() {
    let hits = find_lines_containing("src/adapter/inbound/http", &["diesel::", "crate::adapter::outbound"]);
    assert!(hits.is_empty(), "file server should not reach the database: {hits:#?}");
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn binaries_live_under_src_bin() {
    assert!(path_exists("src/bin/cleanup_db.rs"));
    assert!(path_exists("src/bin/http_server.rs"));
    assert!(
        !path_exists("src/main.rs"),
        "binaries are declared explicitly; a default main.rs would add a third"
    );
}
