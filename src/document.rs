//! Topic document classification.
//!
//! A fetched document is exactly one of three shapes — a subtopic container,
//! a lesson (inline markup or sequential content blocks), or a slide-package
//! manifest — but the JSON itself carries no discriminant field. Shape is
//! decided by the presence of distinguishing fields, checked in a fixed
//! priority order, and the first match wins:
//!
//! 1. Non-empty `topics` array → [`TopicDocument::Subtopics`]
//! 2. Non-empty `html` or `title` string → [`TopicDocument::Inline`]
//! 3. Non-empty `content` array → [`TopicDocument::Blocks`]
//! 4. Any of `pages`, `slidesDir`, `slides` present → [`TopicDocument::Slides`]
//! 5. Otherwise → [`TopicDocument::Unavailable`]
//!
//! The order is a contract, not an implementation detail: a document carrying
//! both `topics` and `content` is a subtopic container, and one carrying both
//! `title` and `content` is an inline lesson whose blocks are not rendered.
//! Tests pin both cases.

use crate::node::ContentNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One block of sequential lesson content, tagged by its `type` field.
///
/// Unknown block types deserialize to [`ContentBlock::Unknown`] and are
/// skipped at render time rather than failing the whole lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Html {
        html: String,
    },
    Image {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// A subtopic container: a titled list of child node references.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtopicList {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub topics: Vec<ContentNode>,
}

/// A lesson expressed as a heading plus a raw markup block.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineLesson {
    pub title: Option<String>,
    pub html: Option<String>,
}

/// A lesson expressed as sequential content blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLesson {
    pub title: Option<String>,
    pub blocks: Vec<ContentBlock>,
}

/// A slide-package manifest. The manifest's own format belongs to the
/// external slide player; classification only needs to recognize it and
/// count slides for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideManifest {
    /// Which field triggered recognition: `pages`, `slidesDir`, or `slides`.
    pub marker: &'static str,
    pub slide_count: Option<usize>,
}

/// A classified topic document.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicDocument {
    Subtopics(SubtopicList),
    Inline(InlineLesson),
    Blocks(BlockLesson),
    Slides(SlideManifest),
    /// No shape matched. An expected terminal state ("content not yet
    /// available"), not an error.
    Unavailable,
}

impl TopicDocument {
    /// Title of the document, when its shape carries one.
    pub fn title(&self) -> Option<&str> {
        match self {
            TopicDocument::Subtopics(s) => s.title.as_deref(),
            TopicDocument::Inline(l) => l.title.as_deref(),
            TopicDocument::Blocks(l) => l.title.as_deref(),
            TopicDocument::Slides(_) | TopicDocument::Unavailable => None,
        }
    }

    /// Short shape label for diagnostics output.
    pub fn shape(&self) -> &'static str {
        match self {
            TopicDocument::Subtopics(_) => "subtopics",
            TopicDocument::Inline(_) => "lesson (inline)",
            TopicDocument::Blocks(_) => "lesson (blocks)",
            TopicDocument::Slides(_) => "slide package",
            TopicDocument::Unavailable => "unavailable",
        }
    }
}

/// Classify a fetched JSON document into its [`TopicDocument`] shape.
pub fn classify(doc: &Value) -> TopicDocument {
    if let Some(topics) = non_empty_array(doc, "topics") {
        let topics = topics
            .iter()
            .map(|v| serde_json::from_value(v.clone()).unwrap_or_default())
            .collect();
        return TopicDocument::Subtopics(SubtopicList {
            title: non_empty_string(doc, "title"),
            summary: non_empty_string(doc, "summary"),
            topics,
        });
    }

    let title = non_empty_string(doc, "title");
    let html = non_empty_string(doc, "html");
    if title.is_some() || html.is_some() {
        return TopicDocument::Inline(InlineLesson { title, html });
    }

    if let Some(content) = non_empty_array(doc, "content") {
        let blocks = content
            .iter()
            .map(|v| serde_json::from_value(v.clone()).unwrap_or(ContentBlock::Unknown))
            .collect();
        return TopicDocument::Blocks(BlockLesson { title: None, blocks });
    }

    for marker in ["pages", "slidesDir", "slides"] {
        if let Some(v) = doc.get(marker).filter(|v| !v.is_null()) {
            return TopicDocument::Slides(SlideManifest {
                marker,
                slide_count: v.as_array().map(Vec::len),
            });
        }
    }

    TopicDocument::Unavailable
}

fn non_empty_array<'a>(doc: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    doc.get(key).and_then(Value::as_array).filter(|a| !a.is_empty())
}

fn non_empty_string(doc: &Value, key: &str) -> Option<String> {
    doc.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
