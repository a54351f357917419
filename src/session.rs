//! Viewer session: the glue between navigation state, candidate generation,
//! resolution, and document classification.
//!
//! A [`Session`] owns a [`Navigator`], the read-only [`SiteConfig`] lookup
//! table, and a [`DocumentSource`]. Its operations mirror the interactions a
//! viewer exposes: pick a training, open a topic card, open a subtopic card,
//! go home. Each open issues a request token before its first fetch and
//! applies the outcome through the navigator, so an embedder driving opens
//! concurrently inherits the stale-outcome protection for free.
//!
//! Slide packages are not rendered here: classification resolving to a slide
//! manifest yields [`Opened::Delegated`] with the package id derived from
//! the resolved path, and the caller hands off to the external player.

use crate::candidates::{FOLDER_MANIFEST, MODULES_ROOT, candidate_paths};
use crate::config::{Addressing, SiteConfig};
use crate::document::{BlockLesson, InlineLesson, SubtopicList, TopicDocument, classify};
use crate::nav::{ApplyError, NavEvent, Navigator, View};
use crate::node::{ContentNode, NodeContext};
use crate::resolve::{DocumentSource, Resolution, ResolveError, resolve};
use crate::slug::slugify;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("unknown training: {0}")]
    UnknownTraining(String),
    #[error("topic card {card_id:?} is not active for training {training_id}")]
    InactiveCard { training_id: String, card_id: String },
    #[error("topic index {index} is out of range for training {training_id}")]
    IndexOutOfRange { training_id: String, index: usize },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("navigation rejected: {0:?}")]
    Navigation(ApplyError),
}

/// What opening a node led to.
#[derive(Debug)]
pub enum Opened {
    /// The document was a subtopic container; the session is now showing it.
    /// `ctx` is the context to thread into child opens.
    Subtopics {
        list: SubtopicList,
        ctx: NodeContext,
        path: String,
    },
    /// An inline lesson (title and/or raw markup).
    InlineLesson { lesson: InlineLesson, path: String },
    /// A block lesson; `lesson.title` carries the display fallback.
    BlockLesson { lesson: BlockLesson, path: String },
    /// A slide package: the viewer exits to the external player.
    Delegated {
        package_id: String,
        url: String,
        path: String,
    },
    /// No shape matched — "content not yet available". The current view is
    /// left unchanged.
    Unavailable { title: String, path: String },
}

/// Derive a slide-package identifier from the path its manifest resolved
/// from: the trailing manifest filename and a leading `modules/` prefix are
/// stripped.
pub fn package_id_from_path(path: &str) -> String {
    let stripped = path
        .strip_suffix(FOLDER_MANIFEST)
        .map(|s| s.trim_end_matches('/'))
        .unwrap_or(path);
    let stripped = stripped
        .strip_prefix(&format!("{MODULES_ROOT}/"))
        .unwrap_or(stripped);
    stripped.to_string()
}

pub struct Session<S: DocumentSource> {
    config: SiteConfig,
    source: S,
    navigator: Navigator,
}

impl<S: DocumentSource> Session<S> {
    pub fn new(config: SiteConfig, source: S) -> Self {
        Self {
            config,
            source,
            navigator: Navigator::new(),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn current_view(&self) -> &View {
        self.navigator.current()
    }

    /// Hero call-to-action: show the training selector.
    pub fn activate_cta(&mut self) -> Result<(), SessionError> {
        self.navigator
            .apply_now(&NavEvent::ActivateCta)
            .map_err(SessionError::Navigation)?;
        Ok(())
    }

    /// Select a training card (single-select; deactivates siblings).
    pub fn select_training(&mut self, training_id: &str) -> Result<(), SessionError> {
        if self.config.training(training_id).is_none() {
            return Err(SessionError::UnknownTraining(training_id.to_string()));
        }
        self.navigator
            .apply_now(&NavEvent::SelectTraining {
                training_id: training_id.to_string(),
            })
            .map_err(SessionError::Navigation)?;
        Ok(())
    }

    /// Open a topic via its fixed card id (`e1-<n>` scheme).
    pub fn open_topic_by_card(
        &mut self,
        training_id: &str,
        card_id: &str,
    ) -> Result<Opened, SessionError> {
        let training = self
            .config
            .training(training_id)
            .ok_or_else(|| SessionError::UnknownTraining(training_id.to_string()))?;
        if training.addressing != Addressing::Indexed {
            return Err(SessionError::InactiveCard {
                training_id: training_id.to_string(),
                card_id: card_id.to_string(),
            });
        }
        let index = training
            .card_index(card_id)
            .ok_or_else(|| SessionError::InactiveCard {
                training_id: training_id.to_string(),
                card_id: card_id.to_string(),
            })?;
        let slug = training
            .topic_at(index)
            .ok_or(SessionError::IndexOutOfRange {
                training_id: training_id.to_string(),
                index,
            })?
            .to_string();
        let fallback = slug.replace('-', " ");
        self.open_topic(training_id, &slug, &fallback)
    }

    /// Open a topic via its card's visible title text.
    pub fn open_topic_by_title(
        &mut self,
        training_id: &str,
        title: &str,
    ) -> Result<Opened, SessionError> {
        if self.config.training(training_id).is_none() {
            return Err(SessionError::UnknownTraining(training_id.to_string()));
        }
        let slug = slugify(title);
        self.open_topic(training_id, &slug, title)
    }

    /// Resolve and show a top-level topic document
    /// (`modules/<training>/<slug>.json`).
    fn open_topic(
        &mut self,
        training_id: &str,
        slug: &str,
        fallback_title: &str,
    ) -> Result<Opened, SessionError> {
        let token = self.navigator.begin_navigation();
        let path = format!("{MODULES_ROOT}/{training_id}/{slug}.json");
        let resolution = resolve(&self.source, &[path])?;
        let ctx = NodeContext::new(training_id, slug);
        let event_for_subtopics = NavEvent::OpenTopic {
            module_id: training_id.to_string(),
            parent_slug: slug.to_string(),
        };
        self.dispatch(resolution, ctx, fallback_title, token, event_for_subtopics)
    }

    /// Resolve and show a subtopic node from an already-open subtopic list.
    pub fn open_subtopic(
        &mut self,
        ctx: &NodeContext,
        node: &ContentNode,
    ) -> Result<Opened, SessionError> {
        let token = self.navigator.begin_navigation();
        let list = candidate_paths(ctx, node);
        let resolution = resolve(&self.source, &list)?;
        self.dispatch(
            resolution,
            ctx.clone(),
            &node.display_title(),
            token,
            NavEvent::OpenNestedSubtopics,
        )
    }

    /// Back home: clears every detail layer and invalidates in-flight opens.
    pub fn go_home(&mut self) {
        self.navigator.go_home();
    }

    fn dispatch(
        &mut self,
        resolution: Resolution,
        ctx: NodeContext,
        fallback_title: &str,
        token: crate::nav::RequestToken,
        event_for_subtopics: NavEvent,
    ) -> Result<Opened, SessionError> {
        let Resolution { document, path, .. } = resolution;
        match classify(&document) {
            TopicDocument::Subtopics(list) => {
                self.navigator
                    .apply(token, &event_for_subtopics)
                    .map_err(SessionError::Navigation)?;
                Ok(Opened::Subtopics { list, ctx, path })
            }
            TopicDocument::Inline(lesson) => {
                let title = lesson
                    .title
                    .clone()
                    .unwrap_or_else(|| fallback_title.to_string());
                self.navigator
                    .apply(token, &NavEvent::OpenLesson { title })
                    .map_err(SessionError::Navigation)?;
                Ok(Opened::InlineLesson { lesson, path })
            }
            TopicDocument::Blocks(mut lesson) => {
                let title = lesson
                    .title
                    .clone()
                    .unwrap_or_else(|| fallback_title.to_string());
                lesson.title = Some(title.clone());
                self.navigator
                    .apply(token, &NavEvent::OpenLesson { title })
                    .map_err(SessionError::Navigation)?;
                Ok(Opened::BlockLesson { lesson, path })
            }
            TopicDocument::Slides(_) => {
                let package_id = package_id_from_path(&path);
                let sep = if self.config.slide_player_url.contains('?') {
                    '&'
                } else {
                    '?'
                };
                let url = format!("{}{sep}pkg={package_id}", self.config.slide_player_url);
                Ok(Opened::Delegated { package_id, url, path })
            }
            TopicDocument::Unavailable => Ok(Opened::Unavailable {
                title: fallback_title.to_string(),
                path,
            }),
        }
    }
}
