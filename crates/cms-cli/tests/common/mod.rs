//! Shared E2E test helpers for `cms` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables that would leak the developer's setup into tests.
const CMS_ENV_VARS: &[&str] = &[
    "CMS_CONFIG",
    "CMS_LOCALE",
    "CMS_IDENTITY_ID",
    "CMS_IDENTITY_NAME",
    "CMS_INSTALLED",
    "RUST_LOG",
];

/// Build a Command for the `cms` binary that ignores the global config
/// and the caller's `CMS_*` environment.
pub fn cms_cmd() -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("cms");
    cmd.timeout(TIMEOUT_BASIC);
    for var in CMS_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--no-global");
    cmd
}

/// Writes `content` to a config file in a fresh temp directory.
///
/// Returns `(path, guard)`. The guard must outlive the test.
pub fn fixture(content: &str) -> (PathBuf, TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir for fixture");
    let path = tmp.path().join("cms.toml");
    std::fs::write(&path, content).expect("write fixture");
    (path, tmp)
}

/// Editor `u1`: read and write own categories in `en-US`; `news` belongs to `u2`.
pub const EDITOR: &str = r#"
locale = "en-US"

[identity]
id = "u1"
display_name = "Editor"

[[grants]]
name = "pb.category"
rwd = "rw"
own = true

[[grants]]
name = "content.i18n"
locales = ["en-US"]

[[categories]]
slug = "news"
name = "News"
created_by = "u2"

[[categories]]
slug = "mine"
name = "Mine"
"#;

/// Administrator holding every permission.
pub const ADMIN: &str = r#"
[identity]
id = "admin"
display_name = "Admin"

[[grants]]
name = "*"

[[categories]]
slug = "news"
name = "News"
"#;
