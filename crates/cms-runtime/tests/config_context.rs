//! Integration tests for config-driven contexts.
//!
//! Tests the complete flow: TOML file → ConfigLoader → RequestContext → resolvers

use cms_runtime::config::ConfigLoader;
use cms_runtime::headless_cms::SettingsResolvers;
use cms_runtime::page_builder::{CategoryInput, CategoryResolvers};
use cms_runtime::{RequestContext, Response};
use std::path::Path;
use tempfile::TempDir;

fn load(dir: &Path, content: &str) -> RequestContext {
    let path = dir.join("cms.toml");
    std::fs::write(&path, content).expect("write fixture");
    ConfigLoader::new()
        .skip_global_config()
        .skip_env_vars()
        .with_file(&path)
        .load()
        .expect("load fixture")
        .into_context()
}

#[tokio::test]
async fn editor_fixture_limits_to_own_categories() {
    let temp = TempDir::new().expect("temp dir");
    let ctx = load(
        temp.path(),
        r#"
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
"#,
    );
    let categories = CategoryResolvers::new();

    let listed = categories.list_categories(&ctx).await.into_data().expect("ok");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].slug, "mine");

    assert!(categories.get_category(&ctx, "news").await.is_not_authorized());
    assert!(categories.delete_category(&ctx, "mine").await.is_not_authorized());
    assert!(categories
        .update_category(&ctx, "mine", CategoryInput::default().name("Renamed"))
        .await
        .is_ok());

    let elsewhere = ctx.clone().with_locale("de-DE");
    assert!(categories.list_categories(&elsewhere).await.is_not_authorized());
}

#[tokio::test]
async fn admin_fixture_installs_once() {
    let temp = TempDir::new().expect("temp dir");
    let ctx = load(
        temp.path(),
        r#"
[identity]
id = "admin"

[[grants]]
name = "*"
"#,
    );
    let settings = SettingsResolvers::new();

    assert_eq!(settings.is_installed(&ctx).await, Response::ok(false));
    assert_eq!(settings.install(&ctx).await, Response::ok(true));

    let again = settings.install(&ctx).await;
    assert_eq!(again.error_code(), Some("CMS_ALREADY_INSTALLED"));
    assert_eq!(settings.is_installed(&ctx).await, Response::ok(true));
}

#[tokio::test]
async fn anonymous_fixture_is_denied_settings() {
    let temp = TempDir::new().expect("temp dir");
    let ctx = load(temp.path(), "[settings]\ninstalled = true\n");

    assert!(SettingsResolvers::new()
        .is_installed(&ctx)
        .await
        .is_not_authorized());
    assert_eq!(ctx.security.identity().id.as_str(), "anonymous");
}
