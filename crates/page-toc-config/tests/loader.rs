use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use page_toc_config::{
    ClassNames, ClassRole, Config, ConfigError, ConfigSourceKind, LoadOptions, Pattern,
};
use tempfile::TempDir;

fn write_file(path: impl AsRef<Path>, contents: &str) {
    let mut file = fs::File::create(path).expect("create config");
    file.write_all(contents.as_bytes()).expect("write config");
}

fn canonical(path: impl AsRef<Path>) -> PathBuf {
    fs::canonicalize(path).expect("canonicalize path")
}

fn pattern_strings<'a, I>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    patterns
        .into_iter()
        .map(|p| p.original().to_string())
        .collect()
}

fn selector_strings(config: &Config) -> Vec<String> {
    config
        .content
        .selectors
        .iter()
        .map(|selector| selector.as_str().to_string())
        .collect()
}

fn validation_messages(err: ConfigError) -> Vec<String> {
    match err {
        ConfigError::Validation(errors) => errors.iter().map(|e| e.to_string()).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn loads_defaults_when_no_files_present() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let config = Config::load(LoadOptions::default().with_working_dir(working_dir.clone()))
        .expect("load defaults");

    assert_eq!(config.project.root, working_dir);
    assert_eq!(
        config.project.root.as_os_str(),
        working_dir.as_os_str(),
        "root carries no trailing '.' segment"
    );
    assert_eq!(
        pattern_strings(config.project.include.iter()),
        vec!["**/*.html".to_string(), "**/*.htm".to_string()]
    );
    assert!(config.project.exclude.is_empty());
    assert_eq!(
        selector_strings(&config),
        vec![".page-content".to_string(), "main#content, main".to_string()]
    );
    assert_eq!(config.toc.title, "On this page");
    assert_eq!(config.toc.fallback_slug, "section");
    assert_eq!(config.classes, ClassNames::default());

    assert_eq!(config.sources.layers.len(), 1);
    assert_eq!(config.sources.layers[0].kind, ConfigSourceKind::Default);
}

#[test]
fn applies_precedence_and_merges_fields() {
    let temp = TempDir::new().expect("tempdir");
    let git_root = canonical(temp.path());
    fs::create_dir(git_root.join(".git")).expect("create .git");

    write_file(
        git_root.join(".page-toc.toml"),
        r#"
        [project]
        exclude = ["**/drafts/**"]

        [content]
        selectors = ["article"]

        [toc]
        title = "Contents"

        [classes]
        nav = "site-nav"
        link = "site-link"
        "#,
    );

    let workspace = git_root.join("site");
    fs::create_dir(&workspace).expect("create workspace");

    write_file(
        workspace.join(".page-toc.toml"),
        r#"
        [project]
        root = "public"

        [toc]
        fallback_slug = "part"

        [classes]
        link = "local-link"
        "#,
    );

    let override_path = workspace.join("override.toml");
    write_file(
        &override_path,
        r#"
        [toc]
        title = "Jump to"
        "#,
    );

    let config = Config::load(
        LoadOptions::default()
            .with_working_dir(&workspace)
            .with_override_path(&override_path),
    )
    .expect("load config with precedence");

    assert_eq!(
        config.project.root.as_os_str(),
        canonical(&workspace).join("public").as_os_str()
    );
    assert_eq!(
        pattern_strings(config.project.exclude.iter()),
        vec!["**/drafts/**".to_string()]
    );
    assert_eq!(selector_strings(&config), vec!["article".to_string()]);
    assert_eq!(config.toc.title, "Jump to");
    assert_eq!(config.toc.fallback_slug, "part");
    assert_eq!(config.classes.get(ClassRole::Nav), "site-nav");
    assert_eq!(config.classes.get(ClassRole::Link), "local-link");
    assert_eq!(config.classes.get(ClassRole::Layout), "toc-layout");

    let kinds: Vec<_> = config
        .sources
        .layers
        .iter()
        .map(|layer| layer.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ConfigSourceKind::Default,
            ConfigSourceKind::GitRoot,
            ConfigSourceKind::Local,
            ConfigSourceKind::Override
        ]
    );
}

#[test]
fn missing_override_is_reported() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let err = Config::load(
        LoadOptions::default()
            .with_working_dir(&working_dir)
            .with_override_path("missing.toml"),
    )
    .expect_err("override should be missing");

    match err {
        ConfigError::OverrideNotFound { path } => {
            assert_eq!(path, working_dir.join("missing.toml"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn invalid_selector_surfaces_validation_error() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());
    write_file(
        working_dir.join(".page-toc.toml"),
        r#"
        [content]
        selectors = ["main > article"]
        "#,
    );

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("selector should be rejected");
    let messages = validation_messages(err);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("content.selectors:"), "{}", messages[0]);
    assert!(messages[0].contains(".page-toc.toml"), "{}", messages[0]);
}

#[test]
fn validation_errors_are_aggregated() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());
    write_file(
        working_dir.join(".page-toc.toml"),
        r#"
        [project]
        include = ["[unclosed"]

        [content]
        selectors = []

        [toc]
        title = "   "
        fallback_slug = "--"

        [classes]
        sidebarz = "x"
        item = "two words"
        "#,
    );

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("config should be rejected");
    let messages = validation_messages(err);
    let contexts = [
        "project.include",
        "content.selectors",
        "toc.title",
        "toc.fallback_slug",
        "classes: unknown class role 'sidebarz'",
        "classes.item",
    ];
    for context in contexts {
        assert!(
            messages.iter().any(|message| message.starts_with(context)),
            "missing {context} in {messages:?}"
        );
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());
    write_file(working_dir.join(".page-toc.toml"), "[toc\ntitle = 1\n");

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
}
