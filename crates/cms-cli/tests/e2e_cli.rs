//! E2E integration tests for the `cms` binary.
//!
//! The response is printed to stdout as JSON; logs go to stderr.

mod common;

use common::{cms_cmd, fixture, ADMIN, EDITOR};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

// ─── Reads ─────────────────────────────────────────────────────────

#[test]
fn list_shows_only_own_categories() {
    let (config, _guard) = fixture(EDITOR);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains(r#""kind": "ok""#))
        .stdout(contains(r#""slug": "mine""#))
        .stdout(contains(r#""slug": "news""#).not());
}

#[test]
fn foreign_category_is_not_authorized() {
    let (config, _guard) = fixture(EDITOR);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["category", "get", "news"])
        .assert()
        .code(2)
        .stdout(contains(r#""kind": "notAuthorized""#));
}

#[test]
fn public_lookup_ignores_grants() {
    let (config, _guard) = fixture(EDITOR);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["category", "get-by-slug", "news"])
        .assert()
        .success()
        .stdout(contains(r#""createdBy""#));
}

#[test]
fn missing_category_is_not_found() {
    let (config, _guard) = fixture(ADMIN);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["category", "get", "ghost"])
        .assert()
        .code(2)
        .stdout(contains(r#""kind": "notFound""#))
        .stdout(contains("ghost"));
}

// ─── Writes ────────────────────────────────────────────────────────

#[test]
fn create_duplicate_slug_fails() {
    let (config, _guard) = fixture(ADMIN);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["category", "create", "news", "--name", "Again"])
        .assert()
        .code(2)
        .stdout(contains("CATEGORY_EXISTS"));
}

#[test]
fn create_stamps_acting_identity() {
    let (config, _guard) = fixture(ADMIN);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["category", "create", "blog", "--name", "Blog", "--as", "u9"])
        .assert()
        .success()
        .stdout(contains(r#""slug": "blog""#))
        .stdout(contains(r#""id": "u9""#));
}

#[test]
fn delete_without_letter_is_not_authorized() {
    let (config, _guard) = fixture(EDITOR);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["category", "delete", "mine"])
        .assert()
        .code(2)
        .stdout(contains("notAuthorized"));
}

#[test]
fn invalid_layout_is_a_usage_error() {
    let (config, _guard) = fixture(ADMIN);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["category", "update", "news", "--layout", "{oops"])
        .assert()
        .code(1)
        .stderr(contains("--layout is not valid JSON"));
}

// ─── Locale ────────────────────────────────────────────────────────

#[test]
fn locale_flag_overrides_config() {
    let (config, _guard) = fixture(EDITOR);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--locale", "de-DE", "category", "list"])
        .assert()
        .code(2)
        .stdout(contains("notAuthorized"));
}

// ─── Settings ──────────────────────────────────────────────────────

#[test]
fn settings_install_and_query() {
    let (config, _guard) = fixture(ADMIN);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["settings", "install"])
        .assert()
        .success()
        .stdout(contains(r#""data": true"#));

    // Every invocation starts from the fixture again.
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["settings", "is-installed"])
        .assert()
        .success()
        .stdout(contains(r#""data": false"#));
}

#[test]
fn installed_fixture_rejects_second_install() {
    let (config, _guard) = fixture(ADMIN);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["settings", "install"])
        .env("CMS_INSTALLED", "true")
        .assert()
        .code(2)
        .stdout(contains("CMS_ALREADY_INSTALLED"));
}

#[test]
fn editor_cannot_manage_settings() {
    let (config, _guard) = fixture(EDITOR);
    cms_cmd()
        .arg("--config")
        .arg(&config)
        .args(["settings", "is-installed"])
        .assert()
        .code(2)
        .stdout(contains("notAuthorized"));
}

// ─── Configuration ─────────────────────────────────────────────────

#[test]
fn missing_config_file_fails() {
    cms_cmd()
        .args(["--config", "/nonexistent/cms.toml", "category", "list"])
        .assert()
        .code(1)
        .stderr(contains("CONFIG_MISSING_FILE"));
}

#[test]
fn debug_logs_go_to_stderr() {
    let (config, _guard) = fixture(ADMIN);
    cms_cmd()
        .arg("-d")
        .arg("--config")
        .arg(&config)
        .args(["category", "list"])
        .assert()
        .success()
        .stderr(contains("Request context"))
        .stdout(contains("Request context").not());
}

#[test]
fn unknown_subcommand_is_rejected() {
    cms_cmd().args(["pages", "list"]).assert().failure();
}
