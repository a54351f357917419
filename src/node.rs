//! Content node references and navigation context.
//!
//! A [`ContentNode`] is how one document refers to a unit of child content.
//! The fields accumulated organically as the content tree grew: early topics
//! carry only a `title`, later ones an explicit `id` or `slug`, and a few
//! point at their document directly via `path` or `file`. All fields are
//! optional; the resolver copes by generating candidate locations for
//! whatever is present (see [`crate::candidates`]).
//!
//! Identity is derived, not declared: `id` wins, then `slug`, then the
//! slugified `title`. It is only unique among siblings, never across the
//! whole tree.

use crate::slug::slugify;
use serde::{Deserialize, Serialize};

/// A reference to a unit of content, as found in a parent document's
/// `topics` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentNode {
    /// Stable identifier, preferred over all derived forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Pre-computed slug, used when `id` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Display title; also the identity source of last resort.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explicit document location, overriding all path conventions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Explicit filename under the parent's folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Free-form content kind marker shown on cards (e.g. "ders", "slide").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Short description shown on cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContentNode {
    /// Build a reference from a bare title, the most common legacy form.
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Derived identity: `id` → `slug` → slugified `title`.
    ///
    /// Returns `None` when the node carries none of the three (such nodes can
    /// still resolve through an explicit `path` or `file`).
    pub fn identity(&self) -> Option<String> {
        if let Some(id) = self.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return Some(id.to_string());
        }
        if let Some(slug) = self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return Some(slug.to_string());
        }
        self.title
            .as_deref()
            .map(slugify)
            .filter(|s| !s.is_empty())
    }

    /// Title for display, falling back through identity sources.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.id.clone())
            .or_else(|| self.slug.clone())
            .unwrap_or_default()
    }
}

/// Location context threaded through recursive subtopic resolution.
///
/// Child document paths are computed relative to the module and the topic
/// folder the recursion entered through, so a node reference alone is not
/// enough to locate a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeContext {
    /// Training module folder, e.g. `egitim1`.
    pub module_id: String,
    /// Slug of the topic folder the recursion entered through.
    pub parent_slug: String,
}

impl NodeContext {
    pub fn new(module_id: impl Into<String>, parent_slug: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            parent_slug: parent_slug.into(),
        }
    }
}
