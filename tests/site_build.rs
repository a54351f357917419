//! End-to-end test: a content tree with every document shape and every
//! legacy path convention builds into a complete static site, and a live
//! session walks the same tree through the navigation state machine.

use groundschool::config::load_config;
use groundschool::generate;
use groundschool::nav::View;
use groundschool::node::NodeContext;
use groundschool::resolve::FsSource;
use groundschool::session::{Opened, Session};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A content tree spreading documents across the conventions the resolver
/// must fall back over:
/// - topic document under `modules/<m>/<slug>.json`
/// - lesson under `modules/<m>/<parent>/<id>.json`
/// - slide package as `modules/<m>/<parent>/<id>/manifest.json`
/// - lesson under the flat root `<m>/<parent>/<id>.json`
fn write_content_tree(root: &Path) {
    fs::write(
        root.join("config.toml"),
        r#"
site_title = "Flight Training"
cta_label = "Start"

[[trainings]]
id = "egitim1"
label = "Eğitim 1"
addressing = "indexed"
card_prefix = "e1"
topics = ["airplane-general"]

[shell]
cache_prefix = "cbt-cache"
precache = ["assets/learjet.png"]
"#,
    )
    .unwrap();

    let parent = root.join("modules/egitim1/airplane-general");
    fs::create_dir_all(parent.join("limits")).unwrap();
    fs::create_dir_all(root.join("egitim1/airplane-general")).unwrap();
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("assets/learjet.png"), b"png").unwrap();

    fs::write(
        root.join("modules/egitim1/airplane-general.json"),
        r#"{
  "title": "Airplane General",
  "summary": "Airframe and systems",
  "topics": [
    {"id": "general", "title": "General", "type": "ders"},
    {"id": "limits", "title": "Limits"},
    {"id": "performance", "title": "Performance"},
    {"id": "dimensions", "title": "Dimensions"}
  ]
}"#,
    )
    .unwrap();

    // Newest convention: file under the modules root.
    fs::write(
        parent.join("general.json"),
        r#"{"title": "General", "html": "<p>Airframe overview</p>"}"#,
    )
    .unwrap();

    // Folder-shaped slide package.
    fs::write(
        parent.join("limits/manifest.json"),
        r#"{"slides": [{"id": "s01"}, {"id": "s02"}, {"id": "s03"}]}"#,
    )
    .unwrap();

    // Legacy flat-root convention: only `<m>/<parent>/<id>.json` exists.
    fs::write(
        root.join("egitim1/airplane-general/performance.json"),
        r#"{"content": [{"type": "text", "text": "Takeoff distance varies with weight."}]}"#,
    )
    .unwrap();

    // "dimensions" exists nowhere: must produce a failure page.
}

#[test]
fn full_site_builds_across_all_conventions() {
    let content = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_content_tree(content.path());

    let report = generate::build(content.path(), out.path()).unwrap();

    for page in [
        "index.html",
        "egitim1/index.html",
        "egitim1/airplane-general/index.html",
        "egitim1/airplane-general/general/index.html",
        "egitim1/airplane-general/limits/index.html",
        "egitim1/airplane-general/performance/index.html",
        "egitim1/airplane-general/dimensions/index.html",
    ] {
        assert!(out.path().join(page).exists(), "missing {page}");
    }

    // The lesson that only existed under the flat legacy root made it in.
    let performance = fs::read_to_string(
        out.path()
            .join("egitim1/airplane-general/performance/index.html"),
    )
    .unwrap();
    assert!(performance.contains("Takeoff distance varies with weight."));

    // The slide package page hands off with its folder-derived package id.
    let limits = fs::read_to_string(
        out.path()
            .join("egitim1/airplane-general/limits/index.html"),
    )
    .unwrap();
    assert!(limits.contains("pkg=egitim1/airplane-general/limits"));

    // The unreachable node is reported and its page lists tried paths.
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].title, "Dimensions");
    let dimensions = fs::read_to_string(
        out.path()
            .join("egitim1/airplane-general/dimensions/index.html"),
    )
    .unwrap();
    assert!(dimensions.contains("modules/egitim1/airplane-general/dimensions.json"));
    assert!(dimensions.contains("modules/egitim1/airplane-general/dimensions/manifest.json"));
}

#[test]
fn shell_precaches_pages_and_configured_assets() {
    let content = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_content_tree(content.path());

    let report = generate::build(content.path(), out.path()).unwrap();

    let sw = fs::read_to_string(out.path().join("sw.js")).unwrap();
    assert!(sw.contains("cbt-cache-"));
    assert!(sw.contains("\"/index.html\""));
    assert!(sw.contains("\"/egitim1/airplane-general/general/index.html\""));
    assert!(sw.contains("\"/assets/learjet.png\""));
    assert!(report.precache.contains(&"/assets/learjet.png".to_string()));

    let manifest = fs::read_to_string(out.path().join("manifest.webmanifest")).unwrap();
    assert!(manifest.contains("\"name\": \"Flight Training\""));
}

#[test]
fn session_walks_the_same_tree_interactively() {
    let content = TempDir::new().unwrap();
    write_content_tree(content.path());

    let config = load_config(content.path()).unwrap();
    let mut session = Session::new(config, FsSource::new(content.path()));

    session.activate_cta().unwrap();
    session.select_training("egitim1").unwrap();
    assert_eq!(
        *session.current_view(),
        View::TopicList { training_id: "egitim1".into() }
    );

    let (ctx, nodes) = match session.open_topic_by_card("egitim1", "e1-1").unwrap() {
        Opened::Subtopics { list, ctx, .. } => {
            assert_eq!(list.title.as_deref(), Some("Airplane General"));
            (ctx, list.topics)
        }
        other => panic!("expected subtopics, got {other:?}"),
    };
    assert_eq!(ctx, NodeContext::new("egitim1", "airplane-general"));

    // Inline lesson.
    match session.open_subtopic(&ctx, &nodes[0]).unwrap() {
        Opened::InlineLesson { lesson, path } => {
            assert_eq!(lesson.html.as_deref(), Some("<p>Airframe overview</p>"));
            assert_eq!(path, "modules/egitim1/airplane-general/general.json");
        }
        other => panic!("expected inline lesson, got {other:?}"),
    }
    assert_eq!(*session.current_view(), View::Lesson { title: "General".into() });

    // Back to the list, then a slide package delegation.
    session.select_training("egitim1").unwrap();
    session.open_topic_by_card("egitim1", "e1-1").unwrap();
    match session.open_subtopic(&ctx, &nodes[1]).unwrap() {
        Opened::Delegated { package_id, .. } => {
            assert_eq!(package_id, "egitim1/airplane-general/limits");
        }
        other => panic!("expected delegation, got {other:?}"),
    }

    // Lesson found only under the flat legacy convention.
    match session.open_subtopic(&ctx, &nodes[2]).unwrap() {
        Opened::BlockLesson { lesson, path } => {
            assert_eq!(path, "egitim1/airplane-general/performance.json");
            assert_eq!(lesson.title.as_deref(), Some("Performance"));
        }
        other => panic!("expected block lesson, got {other:?}"),
    }

    // Going home resets everything.
    session.go_home();
    assert_eq!(*session.current_view(), View::Hero);
}
