//! End-to-end configuration resolution against files on disk
//!
//! These tests run the full pipeline with TOML sources written into a
//! temporary source directory, the way an embedding build process would.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use site_config::{
    ControllerLoader, Error, NamespaceRegistry, Pipeline, TomlDefaults, TomlOverride,
    COMPILED_FILE_IGNORE_PATTERNS,
};
use site_namespace::Store;
use tempfile::TempDir;

const DEFAULT_SETTINGS: &str = r#"
[site]
title = "Untitled"
url = "http://www.example.com"
file_ignore_patterns = ["^_", "~$"]

[site.blog]
enabled = true
posts_per_page = 5
"#;

/// Write the built-in defaults and an optional user config into a source
/// directory, returning their paths.
fn source_dir(user_config: Option<&str>) -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let defaults_path = temp.path().join("default_config.toml");
    fs::write(&defaults_path, DEFAULT_SETTINGS).expect("Failed to write defaults");

    let user_path = temp.path().join("_config.toml");
    if let Some(content) = user_config {
        fs::write(&user_path, content).expect("Failed to write user config");
    }
    (temp, defaults_path, user_path)
}

#[test]
fn resolves_defaults_when_no_user_config_exists() {
    let (_temp, defaults_path, user_path) = source_dir(None);
    let mut registry = NamespaceRegistry::new();
    let mut pipeline = Pipeline::new(TomlDefaults::from_file(defaults_path))
        .with_override_source(TomlOverride::optional(user_path));

    let report = pipeline.run_clean(&mut registry).unwrap();

    assert!(!report.has_warnings());
    assert_eq!(
        registry.site().get("title").unwrap().as_str(),
        Some("Untitled")
    );
    assert_eq!(
        registry.site().get("blog.posts_per_page").unwrap().as_int(),
        Some(5)
    );
    // Finalize compiled the default ignore patterns
    let compiled = registry
        .site()
        .get(COMPILED_FILE_IGNORE_PATTERNS)
        .unwrap()
        .as_list()
        .unwrap()
        .to_vec();
    assert_eq!(compiled.len(), 2);
}

#[test]
fn user_config_overrides_leaves_and_extends_subtrees() {
    let (_temp, defaults_path, user_path) = source_dir(Some(
        r#"
[site]
title = "My Blog"
file_ignore_patterns = ["^_", "~$", "\\.draft$"]

[site.blog]
feed_limit = 20
"#,
    ));
    let mut registry = NamespaceRegistry::new();
    let mut pipeline = Pipeline::new(TomlDefaults::from_file(defaults_path))
        .with_override_source(TomlOverride::optional(user_path));

    pipeline.run_clean(&mut registry).unwrap();

    // User leaf replaced the default leaf
    assert_eq!(
        registry.site().get("title").unwrap().as_str(),
        Some("My Blog")
    );
    // Untouched default leaves survive
    assert_eq!(
        registry.site().get("url").unwrap().as_str(),
        Some("http://www.example.com")
    );
    // User subtree keys joined the default subtree instead of replacing it
    assert_eq!(
        registry.site().get("blog.posts_per_page").unwrap().as_int(),
        Some(5)
    );
    assert_eq!(
        registry.site().get("blog.feed_limit").unwrap().as_int(),
        Some(20)
    );

    // The user-appended pattern made it into the compiled list, in order
    let compiled = registry
        .site()
        .get(COMPILED_FILE_IGNORE_PATTERNS)
        .unwrap()
        .as_list()
        .unwrap()
        .to_vec();
    assert_eq!(compiled.len(), 3);
    let draft = compiled[2].as_pattern().unwrap();
    assert!(draft.is_match("about.DRAFT"));
}

#[test]
fn required_user_config_must_exist() {
    let (_temp, defaults_path, user_path) = source_dir(None);
    let mut registry = NamespaceRegistry::new();
    let mut pipeline = Pipeline::new(TomlDefaults::from_file(defaults_path))
        .with_override_source(TomlOverride::required(user_path.clone()));

    let err = pipeline.run_clean(&mut registry).unwrap_err();

    assert!(matches!(err, Error::ConfigNotFound { path } if path == user_path));
}

#[test]
fn unreadable_user_config_is_treated_as_absent() {
    let (_temp, defaults_path, user_path) = source_dir(None);
    // A directory at the config path exists but cannot be read as a file
    fs::create_dir(&user_path).unwrap();
    let mut registry = NamespaceRegistry::new();
    let mut pipeline = Pipeline::new(TomlDefaults::from_file(defaults_path))
        .with_override_source(TomlOverride::optional(user_path));

    pipeline.run_clean(&mut registry).unwrap();

    assert_eq!(
        registry.site().get("title").unwrap().as_str(),
        Some("Untitled")
    );
}

#[test]
fn malformed_user_config_is_fatal_and_retry_goes_through_reset() {
    let (temp, defaults_path, user_path) = source_dir(Some("title = \"My Blog\""));
    let mut registry = NamespaceRegistry::new();

    // Top-level bare keys name no namespace: present but malformed
    {
        let mut pipeline = Pipeline::new(TomlDefaults::from_file(defaults_path.clone()))
            .with_override_source(TomlOverride::optional(user_path.clone()));
        let err = pipeline.run_clean(&mut registry).unwrap_err();
        assert!(matches!(err, Error::UnknownNamespace { .. }));
        // The registry is left partially populated on a fatal error
        assert!(!registry.site().is_empty());
    }

    // The caller resets and retries with a fixed config
    fs::write(temp.path().join("_config.toml"), "[site]\ntitle = \"My Blog\"\n").unwrap();
    let mut pipeline = Pipeline::new(TomlDefaults::from_file(defaults_path))
        .with_override_source(TomlOverride::optional(user_path));
    pipeline.run_clean(&mut registry).unwrap();

    assert_eq!(
        registry.site().get("title").unwrap().as_str(),
        Some("My Blog")
    );
}

#[test]
fn broken_toml_in_user_config_reports_the_file() {
    let (_temp, defaults_path, user_path) = source_dir(Some("[site\ntitle ="));
    let mut registry = NamespaceRegistry::new();
    let mut pipeline = Pipeline::new(TomlDefaults::from_file(defaults_path))
        .with_override_source(TomlOverride::optional(user_path.clone()));

    let err = pipeline.run_clean(&mut registry).unwrap_err();

    match err {
        Error::OverrideLoad { path, .. } => {
            assert_eq!(path, user_path.display().to_string());
        }
        other => panic!("expected OverrideLoad, got: {other}"),
    }
}

#[test]
fn user_override_outranks_controller_registration() {
    // A controller loader that auto-registers whatever the defaults
    // declared under site.blog
    struct BlogControllers;

    impl ControllerLoader for BlogControllers {
        fn load_controllers(&mut self, controllers: &mut Store) -> site_config::Result<()> {
            controllers.set("blog.enabled", true)?;
            controllers.set("blog.priority", 50)?;
            Ok(())
        }
    }

    let (_temp, defaults_path, user_path) = source_dir(Some(
        "[controllers.blog]\npriority = 90\n",
    ));
    let mut registry = NamespaceRegistry::new();
    let mut pipeline = Pipeline::new(TomlDefaults::from_file(defaults_path))
        .with_controller_loader(BlogControllers)
        .with_override_source(TomlOverride::optional(user_path));

    pipeline.run_clean(&mut registry).unwrap();

    // The user override outranks the controller's own registration value
    assert_eq!(
        registry.controllers().get("blog.priority").unwrap().as_int(),
        Some(90)
    );
    assert_eq!(
        registry.controllers().get("blog.enabled").unwrap().as_bool(),
        Some(true)
    );
}

#[test]
fn snapshots_are_reproducible_across_runs() {
    let (_temp, defaults_path, user_path) = source_dir(Some("[site]\ntitle = \"My Blog\"\n"));
    let mut registry = NamespaceRegistry::new();
    let mut pipeline = Pipeline::new(TomlDefaults::from_file(defaults_path))
        .with_override_source(TomlOverride::optional(user_path));

    pipeline.run_clean(&mut registry).unwrap();
    let first: serde_json::Value = registry.to_json();

    pipeline.run_clean(&mut registry).unwrap();
    let second: serde_json::Value = registry.to_json();

    assert_eq!(first.to_string(), second.to_string());
}
