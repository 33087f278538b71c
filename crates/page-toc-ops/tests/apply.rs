use std::fs;
use std::path::PathBuf;

use page_toc_config::{Config, LoadOptions};
use page_toc_ops::{ApplyMode, ApplyOptions, Operations, ScanOptions};
use page_toc_test_support::{page, write_file};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn site() -> TempDir {
    let temp = TempDir::new().expect("tempdir");
    write_file(
        temp.path(),
        "index.html",
        &page("<main><h2>Intro</h2><h3>Background</h3><h2>Setup</h2></main>"),
    );
    write_file(
        temp.path(),
        "guide/plain.html",
        &page("<main><p>Nothing to index</p></main>"),
    );
    write_file(
        temp.path(),
        "drafts/wip.html",
        &page("<main><h2>Draft</h2></main>"),
    );
    temp
}

fn ops_for(temp: &TempDir) -> Operations {
    let working_dir = fs::canonicalize(temp.path()).expect("canonicalize working dir");
    let config =
        Config::load(LoadOptions::default().with_working_dir(&working_dir)).expect("load config");
    Operations::new(config)
}

fn options(mode: ApplyMode) -> ApplyOptions {
    ApplyOptions {
        scan: ScanOptions::default(),
        mode,
        quiet: false,
    }
}

#[test]
fn check_reports_pages_needing_navigation() {
    let temp = site();
    let before = fs::read_to_string(temp.path().join("index.html")).unwrap();

    let outcome = ops_for(&temp)
        .apply(options(ApplyMode::Check))
        .expect("check run");

    assert_eq!(outcome.exit_code, 1);
    assert_eq!(outcome.pages_scanned, 3);
    let paths: Vec<_> = outcome.changes.iter().map(|c| c.path.clone()).collect();
    assert_eq!(
        paths,
        vec![PathBuf::from("drafts/wip.html"), PathBuf::from("index.html")]
    );
    assert_eq!(outcome.changes[1].entries, 3);
    assert_eq!(outcome.changes[1].assigned_ids, 3);
    assert!(outcome.rendered.contains("would enhance index.html"));

    let after = fs::read_to_string(temp.path().join("index.html")).unwrap();
    assert_eq!(before, after, "check mode must not write");
}

#[test]
fn update_rewrites_pages_and_is_idempotent() {
    let temp = site();
    let plain_before = fs::read_to_string(temp.path().join("guide/plain.html")).unwrap();
    let ops = ops_for(&temp);

    let outcome = ops.apply(options(ApplyMode::Update)).expect("update run");
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.changes.len(), 2);

    let index = fs::read_to_string(temp.path().join("index.html")).unwrap();
    assert!(index.contains(r#"<nav class="toc-nav">"#));
    assert!(index.contains(r#"<h3 id="background">Background</h3>"#));

    let plain_after = fs::read_to_string(temp.path().join("guide/plain.html")).unwrap();
    assert_eq!(plain_before, plain_after, "pages without headings stay byte-identical");

    let second = ops.apply(options(ApplyMode::Check)).expect("second check");
    assert_eq!(second.exit_code, 0);
    assert!(second.changes.is_empty());
    assert_eq!(second.rendered, "all 3 page(s) up to date\n");
}

#[test]
fn diff_prints_unified_diff_without_writing() {
    let temp = site();
    let outcome = ops_for(&temp)
        .apply(ApplyOptions {
            scan: ScanOptions {
                paths: vec![PathBuf::from("index.html")],
            },
            mode: ApplyMode::Diff,
            quiet: true,
        })
        .expect("diff run");

    assert_eq!(outcome.exit_code, 1);
    assert!(outcome.rendered.contains("--- a/index.html"));
    assert!(outcome.rendered.contains("+++ b/index.html"));
    assert!(outcome.rendered.contains("toc-sidebar"));
    assert!(!fs::read_to_string(temp.path().join("index.html"))
        .unwrap()
        .contains("toc-sidebar"));
}

#[test]
fn exclude_patterns_from_config_are_honoured() {
    let temp = site();
    write_file(
        temp.path(),
        ".page-toc.toml",
        r#"
        [project]
        exclude = ["drafts/**"]
        "#,
    );

    let outcome = ops_for(&temp)
        .apply(options(ApplyMode::Check))
        .expect("check run");
    assert_eq!(outcome.pages_scanned, 2);
    assert!(outcome
        .changes
        .iter()
        .all(|change| change.path != PathBuf::from("drafts/wip.html")));
}

#[test]
fn quiet_suppresses_up_to_date_summary() {
    let temp = TempDir::new().expect("tempdir");
    write_file(temp.path(), "empty.html", &page("<p>No container</p>"));

    let outcome = ops_for(&temp)
        .apply(ApplyOptions {
            quiet: true,
            ..options(ApplyMode::Check)
        })
        .expect("check run");
    assert_eq!(outcome.exit_code, 0);
    assert!(outcome.rendered.is_empty());
}

#[test]
fn outline_reads_without_mutation() {
    let temp = site();
    let ops = ops_for(&temp);
    let html = fs::read_to_string(temp.path().join("index.html")).unwrap();
    let tree = ops.outline(&html).expect("outline present");
    assert_eq!(tree.targets(), vec!["intro", "background", "setup"]);
    assert!(ops.outline(&page("<main></main>")).is_none());
}

#[test]
fn pages_that_are_not_utf8_are_skipped_without_aborting_the_run() {
    let temp = TempDir::new().expect("tempdir");
    write_file(temp.path(), "good.html", &page("<main><h2>Menu</h2></main>"));
    let latin1 = b"<main><h2>Caf\xe9</h2></main>".to_vec();
    fs::write(temp.path().join("legacy.html"), &latin1).expect("write legacy page");

    let outcome = ops_for(&temp)
        .apply(options(ApplyMode::Update))
        .expect("update run");

    assert_eq!(outcome.pages_scanned, 2);
    let paths: Vec<_> = outcome.changes.iter().map(|c| c.path.clone()).collect();
    assert_eq!(paths, vec![PathBuf::from("good.html")]);
    assert!(fs::read_to_string(temp.path().join("good.html"))
        .unwrap()
        .contains("toc-nav"));
    assert_eq!(fs::read(temp.path().join("legacy.html")).unwrap(), latin1);
}
