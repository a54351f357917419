//! # groundschool
//!
//! Compiler and inspector for hierarchical CBT (computer-based training)
//! content trees. A content directory of JSON topic documents becomes a
//! static, offline-capable training site; the resolution and navigation core
//! is exposed as a library so embedders can drive a live viewer session over
//! the same rules the build uses.
//!
//! # Architecture: Resolve → Classify → Render
//!
//! Every operation, interactive or batch, is the same three steps:
//!
//! ```text
//! 1. Resolve   node reference → ordered candidate paths → first fetch success
//! 2. Classify  fetched JSON → subtopics | lesson | slide package (fixed order)
//! 3. Render    classified document → HTML view, or hand-off to slide player
//! ```
//!
//! The split exists for three reasons:
//!
//! - **Testability**: candidate generation and classification are pure
//!   functions; ordering contracts are pinned by unit tests without any I/O.
//! - **Source independence**: resolution runs identically over a content
//!   directory ([`resolve::FsSource`]) or a deployed tree over HTTP
//!   ([`resolve::HttpSource`]).
//! - **Honest diagnostics**: every attempt is recorded, so "could not load"
//!   always means "here is every location I tried".
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`slug`] | Title → stable identifier normalization (Turkish-aware) |
//! | [`node`] | Content node references, identity derivation, location context |
//! | [`candidates`] | Ordered candidate-path generation over the historical layout conventions |
//! | [`resolve`] | Sequential first-success resolution over an abstract document source |
//! | [`document`] | Fixed-priority classification into the three document shapes |
//! | [`nav`] | Explicit navigation state machine with stale-navigation protection |
//! | [`session`] | Viewer session wiring navigation, resolution, and classification |
//! | [`render`] | Maud templates for every view |
//! | [`generate`] | Static site build / content validation walk |
//! | [`shell`] | Offline shell emission: versioned service worker + web app manifest |
//! | [`captions`] | Deterministic cleanup for slide-caption manifests |
//! | [`config`] | `config.toml` loading, validation, trainings table |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Exhaustive Sequential Fallback
//!
//! The content tree grew organically and carries several naming and folder
//! conventions side by side. Rather than migrating content, resolution tries
//! every plausible location in a fixed priority order and the first success
//! wins — deterministic fallback is worth more than latency here, since each
//! miss is a cheap cache-backed probe. No temporal retry exists anywhere:
//! "retry" always means "next candidate", never "same candidate later".
//!
//! ## Explicit State Machine Over Scattered Show/Hide
//!
//! Which view is visible is one [`nav::View`] value changed only through an
//! explicit transition table, so exactly one detail layer exists at a time by
//! construction. Navigations that suspend on fetches carry request tokens;
//! an outcome arriving after a newer navigation has applied is rejected
//! instead of overwriting the newer view.
//!
//! ## Tagged Classification Over Duck Typing
//!
//! A topic document is exactly one of three shapes, decided by discriminant
//! checks in a fixed order ([`document::classify`]). The order is a
//! documented, tested contract — including its quirks, like a `title`
//! shadowing a sibling `content` array.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): compile-time
//! checked templates, type-safe interpolation, XSS-safe by default. Authored
//! lesson markup is the single deliberate `PreEscaped` exception.
//!
//! ## Offline Shell With Content-Versioned Caches
//!
//! Every build ships a service worker precaching all generated pages under a
//! cache name derived from the page set. Deploying a changed build changes
//! the name; the worker's activate step deletes every other cache.

pub mod candidates;
pub mod captions;
pub mod config;
pub mod document;
pub mod generate;
pub mod nav;
pub mod node;
pub mod output;
pub mod render;
pub mod resolve;
pub mod session;
pub mod shell;
pub mod slug;
