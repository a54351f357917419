//! Static site generation.
//!
//! Walks a content tree the same way a viewer session would — training by
//! training, topic by topic, recursing into subtopic containers — and
//! pre-renders every reachable view as a static HTML page. The result is a
//! site that needs no client-side resolution at all, plus the offline shell
//! (`sw.js`, `manifest.webmanifest`) precaching every generated page.
//!
//! ## Output structure
//!
//! ```text
//! dist/
//! ├── index.html                       # Hero + training selector
//! ├── sw.js                            # Offline shell (versioned cache)
//! ├── manifest.webmanifest
//! ├── modules/…                        # Content tree, copied verbatim
//! ├── egitim1/
//! │   ├── index.html                   # Topic list
//! │   └── airplane-general/
//! │       ├── index.html               # Subtopic grid
//! │       ├── general/index.html       # Lesson page
//! │       └── limits/index.html        # Slide-player hand-off
//! └── egitim2/…
//! ```
//!
//! ## Failure pages
//!
//! A node whose resolution exhausts every candidate still gets a page: a
//! blocking notice listing each path tried. Content gaps are a publishing
//! reality and the build must ship around them, so failures are collected
//! into the report instead of aborting. `check` runs the identical walk
//! without writing anything.

use crate::candidates::candidate_paths;
use crate::config::{self, Addressing, ConfigError, SiteConfig, TrainingConfig};
use crate::document::{SubtopicList, TopicDocument, classify};
use crate::node::{ContentNode, NodeContext};
use crate::render::{self, Card};
use crate::resolve::{DocumentSource, FsSource, ResolveError, resolve};
use crate::session::package_id_from_path;
use crate::shell::{self, ShellError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Shell error: {0}")]
    Shell(#[from] ShellError),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One page the walk produced (or would produce, under `check`).
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    /// Display title of the view.
    pub title: String,
    /// Shape label from classification, for diagnostics.
    pub shape: &'static str,
    /// Site-root-relative output path, e.g. `egitim1/hydraulics/index.html`.
    pub path: String,
}

/// A node whose resolution exhausted every candidate.
#[derive(Debug, Clone)]
pub struct FailureRecord {
    pub title: String,
    pub tried: Vec<String>,
}

/// Result of a build or check walk.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<GeneratedPage>,
    pub failures: Vec<FailureRecord>,
    /// Precache list emitted into the shell (empty under `check`).
    pub precache: Vec<String>,
}

/// Build the static site from `source_root` into `output_dir`.
pub fn build(source_root: &Path, output_dir: &Path) -> Result<BuildReport, GenerateError> {
    Generator::new(source_root, Some(output_dir.to_path_buf()))?.run()
}

/// Validate the content tree: identical walk, no writes.
pub fn check(source_root: &Path) -> Result<BuildReport, GenerateError> {
    Generator::new(source_root, None)?.run()
}

struct Generator {
    config: SiteConfig,
    source: FsSource,
    source_root: PathBuf,
    output_dir: Option<PathBuf>,
    report: BuildReport,
    /// Resolved paths on the current recursion stack, to refuse content
    /// cycles (a subtopic resolving back to an ancestor document).
    stack: Vec<String>,
}

impl Generator {
    fn new(source_root: &Path, output_dir: Option<PathBuf>) -> Result<Self, GenerateError> {
        let config = config::load_config(source_root)?;
        Ok(Self {
            config,
            source: FsSource::new(source_root),
            source_root: source_root.to_path_buf(),
            output_dir,
            report: BuildReport::default(),
            stack: Vec::new(),
        })
    }

    fn run(mut self) -> Result<BuildReport, GenerateError> {
        if let Some(out) = &self.output_dir {
            fs::create_dir_all(out)?;
        }

        let training_cards: Vec<Card> = self
            .config
            .trainings
            .iter()
            .map(|t| Card {
                title: t.label.clone(),
                kind: None,
                description: None,
                href: format!("/{}/", t.id),
            })
            .collect();
        let index = render::hero_page(
            &self.config.site_title,
            &self.config.cta_label,
            &training_cards,
        );
        self.write_page("index.html", &self.config.site_title.clone(), "hero", index)?;

        for training in self.config.trainings.clone() {
            self.build_training(&training)?;
        }

        // Ship the content tree alongside the pages so lesson images and
        // slide packages resolve.
        if let Some(out) = self.output_dir.clone() {
            for dir in ["modules", "assets"] {
                let src = self.source_root.join(dir);
                if src.is_dir() {
                    copy_dir_recursive(&src, &out.join(dir))?;
                }
            }
            let page_paths: Vec<String> =
                self.report.pages.iter().map(|p| p.path.clone()).collect();
            self.report.precache = shell::emit(&self.config, &page_paths, &out)?;
        }

        Ok(self.report)
    }

    fn build_training(&mut self, training: &TrainingConfig) -> Result<(), GenerateError> {
        let topics = self.training_topics(training)?;

        let cards: Vec<Card> = topics
            .iter()
            .map(|(slug, title)| Card {
                title: title.clone(),
                kind: None,
                description: None,
                href: format!("{slug}/"),
            })
            .collect();
        let page = render::topic_list_page(&self.config.site_title, &training.label, &cards);
        self.write_page(
            &format!("{}/index.html", training.id),
            &training.label.clone(),
            "topic list",
            page,
        )?;

        for (slug, title) in topics {
            let ctx = NodeContext::new(&training.id, &slug);
            let path = format!("modules/{}/{slug}.json", training.id);
            let out_dir = format!("{}/{slug}", training.id);
            self.build_node_at(&ctx, &[path], &title, &out_dir)?;
        }
        Ok(())
    }

    /// Topic slugs and display titles for a training, by addressing scheme:
    /// the configured ordered list, or a scan of the training's module
    /// folder for titled trainings.
    fn training_topics(
        &self,
        training: &TrainingConfig,
    ) -> Result<Vec<(String, String)>, GenerateError> {
        match training.addressing {
            Addressing::Indexed => Ok(training
                .topics
                .iter()
                .map(|slug| (slug.clone(), slug.replace('-', " ")))
                .collect()),
            Addressing::Titled => {
                let dir = self.source_root.join("modules").join(&training.id);
                if !dir.is_dir() {
                    return Ok(Vec::new());
                }
                let mut topics = Vec::new();
                for entry in WalkDir::new(&dir).max_depth(1).sort_by_file_name() {
                    let entry = entry?;
                    let path = entry.path();
                    if !path.is_file()
                        || path.extension().map(|e| e != "json").unwrap_or(true)
                    {
                        continue;
                    }
                    let slug = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default();
                    let title = self
                        .source
                        .fetch(&format!("modules/{}/{slug}.json", training.id))
                        .ok()
                        .and_then(|doc| {
                            doc.get("title")
                                .and_then(|t| t.as_str())
                                .map(String::from)
                        })
                        .unwrap_or_else(|| slug.replace('-', " "));
                    topics.push((slug, title));
                }
                Ok(topics)
            }
        }
    }

    /// Resolve a node through its candidate list and render the matching
    /// page at `out_dir`, recursing into subtopic containers.
    fn build_node_at(
        &mut self,
        ctx: &NodeContext,
        candidates: &[String],
        title: &str,
        out_dir: &str,
    ) -> Result<(), GenerateError> {
        let page_path = format!("{out_dir}/index.html");

        let resolution = match resolve(&self.source, candidates) {
            Ok(r) => r,
            Err(err) => {
                let tried: Vec<String> = match &err {
                    ResolveError::Exhausted { tried } => {
                        tried.iter().map(|a| a.path.clone()).collect()
                    }
                    ResolveError::NoCandidates => Vec::new(),
                };
                self.report.failures.push(FailureRecord {
                    title: title.to_string(),
                    tried: tried.clone(),
                });
                let refs: Vec<&str> = tried.iter().map(String::as_str).collect();
                let page = render::failure_page(&self.config.site_title, title, &refs);
                self.write_page(&page_path, title, "unresolved", page)?;
                return Ok(());
            }
        };

        if self.stack.contains(&resolution.path) {
            // A subtopic resolved back to an ancestor document; rendering it
            // again would recurse forever.
            self.report.failures.push(FailureRecord {
                title: title.to_string(),
                tried: vec![format!("{} (content cycle)", resolution.path)],
            });
            let page = render::unavailable_page(&self.config.site_title, title);
            self.write_page(&page_path, title, "content cycle", page)?;
            return Ok(());
        }

        match classify(&resolution.document) {
            TopicDocument::Subtopics(list) => {
                let title = list.title.clone().unwrap_or_else(|| title.to_string());
                let page = render::subtopic_page(
                    &self.config.site_title,
                    &title,
                    list.summary.as_deref(),
                    &subtopic_cards(&list),
                );
                self.write_page(&page_path, &title, "subtopics", page)?;

                self.stack.push(resolution.path.clone());
                for (i, child) in list.topics.iter().enumerate() {
                    let child_dir = child_dir_name(child, i);
                    let child_candidates = candidate_paths(ctx, child);
                    self.build_node_at(
                        ctx,
                        &child_candidates,
                        &child_title(child, i),
                        &format!("{out_dir}/{child_dir}"),
                    )?;
                }
                self.stack.pop();
            }
            TopicDocument::Inline(lesson) => {
                let title = lesson.title.clone().unwrap_or_else(|| title.to_string());
                let page = render::lesson_page(
                    &self.config.site_title,
                    &title,
                    render::lesson_section(&lesson),
                );
                self.write_page(&page_path, &title, "lesson (inline)", page)?;
            }
            TopicDocument::Blocks(lesson) => {
                let page = render::lesson_page(
                    &self.config.site_title,
                    title,
                    render::lesson_blocks(&lesson),
                );
                self.write_page(&page_path, title, "lesson (blocks)", page)?;
            }
            TopicDocument::Slides(_) => {
                let package_id = package_id_from_path(&resolution.path);
                let sep = if self.config.slide_player_url.contains('?') {
                    '&'
                } else {
                    '?'
                };
                let url = format!("/{}{sep}pkg={package_id}", self.config.slide_player_url);
                let page = render::delegate_page(&self.config.site_title, title, &url);
                self.write_page(&page_path, title, "slide package", page)?;
            }
            TopicDocument::Unavailable => {
                let page = render::unavailable_page(&self.config.site_title, title);
                self.write_page(&page_path, title, "unavailable", page)?;
            }
        }
        Ok(())
    }

    fn write_page(
        &mut self,
        rel_path: &str,
        title: &str,
        shape: &'static str,
        markup: maud::Markup,
    ) -> Result<(), GenerateError> {
        if let Some(out) = &self.output_dir {
            let path = out.join(rel_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, markup.into_string())?;
        }
        self.report.pages.push(GeneratedPage {
            title: title.to_string(),
            shape,
            path: rel_path.to_string(),
        });
        Ok(())
    }
}

/// Directory name for a child node: its derived identity, or a positional
/// fallback for nodes with nothing to derive one from.
fn child_dir_name(node: &ContentNode, index: usize) -> String {
    node.identity().unwrap_or_else(|| format!("topic-{}", index + 1))
}

fn child_title(node: &ContentNode, index: usize) -> String {
    let title = node.display_title();
    if title.is_empty() {
        format!("Topic {}", index + 1)
    } else {
        title
    }
}

fn subtopic_cards(list: &SubtopicList) -> Vec<Card> {
    list.topics
        .iter()
        .enumerate()
        .map(|(i, node)| Card {
            title: child_title(node, i),
            kind: node.kind.clone(),
            description: node.description.clone(),
            href: format!("{}/", child_dir_name(node, i)),
        })
        .collect()
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Lay out a small content tree exercising every document shape.
    fn setup_content() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        fs::write(
            root.join("config.toml"),
            r#"
site_title = "Flight Training"

[[trainings]]
id = "egitim1"
label = "Eğitim 1"
addressing = "indexed"
card_prefix = "e1"
topics = ["airplane-general", "hydraulics"]

[[trainings]]
id = "egitim2"
label = "Eğitim 2"
addressing = "titled"
"#,
        )
        .unwrap();

        let e1 = root.join("modules/egitim1");
        fs::create_dir_all(e1.join("airplane-general/limits")).unwrap();
        fs::write(
            e1.join("airplane-general.json"),
            r#"{
  "title": "Airplane General",
  "summary": "Airframe and systems overview",
  "topics": [
    {"id": "general", "title": "General"},
    {"id": "limits", "title": "Limits"},
    {"id": "missing", "title": "Missing"}
  ]
}"#,
        )
        .unwrap();
        fs::write(
            e1.join("airplane-general/general.json"),
            r#"{"title": "General", "html": "<p>Overview</p>"}"#,
        )
        .unwrap();
        fs::write(
            e1.join("airplane-general/limits/manifest.json"),
            r#"{"slides": [{"id": "s01"}, {"id": "s02"}]}"#,
        )
        .unwrap();
        fs::write(
            e1.join("hydraulics.json"),
            r#"{"content": [{"type": "text", "text": "Pressure is supplied by two pumps."}]}"#,
        )
        .unwrap();

        let e2 = root.join("modules/egitim2");
        fs::create_dir_all(&e2).unwrap();
        fs::write(
            e2.join("ucus-emniyeti.json"),
            r#"{"title": "Uçuş Emniyeti", "html": "<p>Safety first</p>"}"#,
        )
        .unwrap();

        tmp
    }

    #[test]
    fn build_renders_every_reachable_view() {
        let content = setup_content();
        let out = TempDir::new().unwrap();

        let report = build(content.path(), out.path()).unwrap();

        for page in [
            "index.html",
            "egitim1/index.html",
            "egitim1/airplane-general/index.html",
            "egitim1/airplane-general/general/index.html",
            "egitim1/airplane-general/limits/index.html",
            "egitim1/hydraulics/index.html",
            "egitim2/index.html",
            "egitim2/ucus-emniyeti/index.html",
        ] {
            assert!(out.path().join(page).exists(), "missing {page}");
            assert!(report.pages.iter().any(|p| p.path == page), "unreported {page}");
        }
    }

    #[test]
    fn lesson_page_contains_heading_and_markup() {
        let content = setup_content();
        let out = TempDir::new().unwrap();
        build(content.path(), out.path()).unwrap();

        let html = fs::read_to_string(
            out.path().join("egitim1/airplane-general/general/index.html"),
        )
        .unwrap();
        assert!(html.contains("General"));
        assert!(html.contains("<p>Overview</p>"));
    }

    #[test]
    fn slide_package_page_delegates_with_package_id() {
        let content = setup_content();
        let out = TempDir::new().unwrap();
        build(content.path(), out.path()).unwrap();

        let html = fs::read_to_string(
            out.path().join("egitim1/airplane-general/limits/index.html"),
        )
        .unwrap();
        assert!(html.contains("pkg=egitim1/airplane-general/limits"));
    }

    #[test]
    fn unresolvable_node_gets_failure_page_and_record() {
        let content = setup_content();
        let out = TempDir::new().unwrap();
        let report = build(content.path(), out.path()).unwrap();

        assert_eq!(report.failures.len(), 1);
        let failure = &report.failures[0];
        assert_eq!(failure.title, "Missing");
        assert!(
            failure
                .tried
                .contains(&"modules/egitim1/airplane-general/missing.json".to_string())
        );
        assert!(
            failure
                .tried
                .contains(&"modules/egitim1/airplane-general/missing/manifest.json".to_string())
        );

        let html = fs::read_to_string(
            out.path().join("egitim1/airplane-general/missing/index.html"),
        )
        .unwrap();
        assert!(html.contains("modules/egitim1/airplane-general/missing.json"));
    }

    #[test]
    fn shell_emitted_with_pages_precached() {
        let content = setup_content();
        let out = TempDir::new().unwrap();
        let report = build(content.path(), out.path()).unwrap();

        assert!(out.path().join("sw.js").exists());
        assert!(out.path().join("manifest.webmanifest").exists());
        assert!(report.precache.contains(&"/index.html".to_string()));
        assert!(
            report
                .precache
                .contains(&"/egitim1/airplane-general/index.html".to_string())
        );
    }

    #[test]
    fn content_tree_copied_into_output() {
        let content = setup_content();
        let out = TempDir::new().unwrap();
        build(content.path(), out.path()).unwrap();

        assert!(
            out.path()
                .join("modules/egitim1/airplane-general/limits/manifest.json")
                .exists()
        );
    }

    #[test]
    fn check_walks_without_writing() {
        let content = setup_content();
        let report = check(content.path()).unwrap();

        assert!(report.pages.len() >= 8);
        assert_eq!(report.failures.len(), 1);
        assert!(report.precache.is_empty());
        // Nothing was written next to the content
        assert!(!content.path().join("index.html").exists());
    }

    #[test]
    fn titled_training_topics_discovered_from_folder() {
        let content = setup_content();
        let report = check(content.path()).unwrap();

        let topic_list = report
            .pages
            .iter()
            .find(|p| p.path == "egitim2/index.html")
            .unwrap();
        assert_eq!(topic_list.shape, "topic list");
        assert!(
            report
                .pages
                .iter()
                .any(|p| p.path == "egitim2/ucus-emniyeti/index.html"
                    && p.title == "Uçuş Emniyeti")
        );
    }

    #[test]
    fn content_cycle_is_refused_not_looped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(
            root.join("config.toml"),
            r#"
[[trainings]]
id = "m"
label = "M"
addressing = "indexed"
card_prefix = "m"
topics = ["loop"]
"#,
        )
        .unwrap();
        let m = root.join("modules/m");
        fs::create_dir_all(&m).unwrap();
        // The topic's only child has an explicit path back to the topic
        // document itself.
        fs::write(
            m.join("loop.json"),
            r#"{"title": "Loop", "topics": [{"title": "Again", "path": "modules/m/loop.json"}]}"#,
        )
        .unwrap();

        let report = check(root).unwrap();
        assert!(report.failures.iter().any(|f| f
            .tried
            .iter()
            .any(|t| t.contains("content cycle"))));
    }
}
