//! Navigation state machine.
//!
//! Which part of the viewer is visible — hero, training selector, topic list,
//! subtopic list, lesson — is a single explicit state, changed only through
//! [`transition`]. That makes the "exactly one detail layer at a time"
//! invariant hold by construction: entering a new detail view *is* leaving
//! the previous one, there are no independent show/hide flags to drift out of
//! sync.
//!
//! ## Stale navigations
//!
//! Opening a node suspends at fetch boundaries, so a slow resolution can
//! finish after a faster, later one. The navigator issues monotonically
//! increasing [`RequestToken`]s; applying an outcome with a token older than
//! the last applied one is rejected and leaves state untouched. Going home
//! invalidates every outstanding token.

/// A visible viewer state. List states layer over the persistent
/// training/topic chrome; `Hero` is the initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Landing view with the primary call-to-action.
    Hero,
    /// Training cards, single-select.
    TrainingSelect,
    /// Topic cards for one selected training.
    TopicList { training_id: String },
    /// Subtopic grid for a topic (or a nested subtopic). `depth` starts at 1
    /// and grows with content nesting, which bounds it in practice.
    SubtopicList {
        module_id: String,
        parent_slug: String,
        depth: usize,
    },
    /// A rendered lesson.
    Lesson { title: String },
}

/// A user interaction or resolution outcome driving a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Primary call-to-action on the hero.
    ActivateCta,
    /// A training card was selected (deselecting its siblings).
    SelectTraining { training_id: String },
    /// A topic resolved to its first subtopic list.
    OpenTopic { module_id: String, parent_slug: String },
    /// A subtopic document itself contained a `topics` array.
    OpenNestedSubtopics,
    /// Document classification resolved to lesson content.
    OpenLesson { title: String },
    /// Explicit "back home".
    GoHome,
}

/// The legal transition table. Returns the next view, or `None` when the
/// event is not valid from the current state.
pub fn transition(current: &View, event: &NavEvent) -> Option<View> {
    match (current, event) {
        (View::Hero, NavEvent::ActivateCta) => Some(View::TrainingSelect),

        // Training chrome stays interactive from every non-hero state.
        (current, NavEvent::SelectTraining { training_id }) if *current != View::Hero => {
            Some(View::TopicList {
                training_id: training_id.clone(),
            })
        }

        (View::TopicList { .. }, NavEvent::OpenTopic { module_id, parent_slug }) => {
            Some(View::SubtopicList {
                module_id: module_id.clone(),
                parent_slug: parent_slug.clone(),
                depth: 1,
            })
        }

        (
            View::SubtopicList { module_id, parent_slug, depth },
            NavEvent::OpenNestedSubtopics,
        ) => Some(View::SubtopicList {
            module_id: module_id.clone(),
            parent_slug: parent_slug.clone(),
            depth: depth + 1,
        }),

        // Any list state can open a lesson.
        (View::TopicList { .. } | View::SubtopicList { .. }, NavEvent::OpenLesson { title }) => {
            Some(View::Lesson { title: title.clone() })
        }

        (_, NavEvent::GoHome) => Some(View::Hero),

        _ => None,
    }
}

/// Token identifying one in-flight navigation. Ordering is issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyError {
    /// A newer navigation already applied; the outcome must be discarded.
    Stale,
    /// The event is not legal from the current state.
    InvalidTransition,
}

/// Owns the current [`View`] and arbitrates concurrent navigations.
#[derive(Debug)]
pub struct Navigator {
    current: View,
    issued: u64,
    applied: u64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: View::Hero,
            issued: 0,
            applied: 0,
        }
    }

    pub fn current(&self) -> &View {
        &self.current
    }

    /// Issue a token for a navigation about to start. Call before the first
    /// fetch; pass the token to [`apply`](Self::apply) with the outcome.
    pub fn begin_navigation(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    /// Apply a navigation outcome. Rejected without touching state when the
    /// token is stale or the transition is illegal from the current view.
    pub fn apply(&mut self, token: RequestToken, event: &NavEvent) -> Result<&View, ApplyError> {
        if token.0 <= self.applied {
            return Err(ApplyError::Stale);
        }
        let next = transition(&self.current, event).ok_or(ApplyError::InvalidTransition)?;
        self.applied = token.0;
        self.current = next;
        Ok(&self.current)
    }

    /// Convenience for synchronous interactions with no fetch in between.
    pub fn apply_now(&mut self, event: &NavEvent) -> Result<&View, ApplyError> {
        let token = self.begin_navigation();
        self.apply(token, event)
    }

    /// Reset to [`View::Hero`], clearing all detail layers and invalidating
    /// every outstanding token.
    pub fn go_home(&mut self) {
        self.issued += 1;
        self.applied = self.issued;
        self.current = View::Hero;
    }
}
