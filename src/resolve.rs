//! Sequential document resolution over an abstract source.
//!
//! The resolver takes the ordered candidate list from [`crate::candidates`]
//! and tries each location in turn, stopping at the first fetch-and-parse
//! success. Attempts are strictly sequential — never speculative or parallel
//! — because the ordering *is* the semantics: an earlier convention must win
//! over a later one even when the later one would answer faster. Failed
//! attempts are cheap (the shell serves most of them from cache) and every
//! attempt is recorded so exhaustion can report exactly what was tried.
//!
//! Fetching is abstracted behind [`DocumentSource`] so candidate generation
//! and resolution order stay unit-testable without network mocking:
//! [`FsSource`] reads a content tree on disk (build, check, tests) and
//! [`HttpSource`] issues blocking GETs with a cache-busting query parameter
//! (live inspection against a deployed tree).

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Failure to fetch or parse a single candidate document.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP {status} for {path}")]
    Status { status: u16, path: String },
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// One place documents can be fetched from, addressed by tree-relative path.
pub trait DocumentSource {
    fn fetch(&self, path: &str) -> Result<Value, FetchError>;
}

/// A single resolution attempt, in try order. The winning attempt (if any)
/// has `error: None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub path: String,
    pub error: Option<String>,
}

/// Successful resolution: the document, where it was found, and every path
/// tried along the way (the winner included, last).
#[derive(Debug)]
pub struct Resolution {
    pub document: Value,
    pub path: String,
    pub tried: Vec<Attempt>,
}

#[derive(Error, Debug)]
pub enum ResolveError {
    /// The node reference produced no candidate locations at all.
    #[error("no candidate paths for node")]
    NoCandidates,
    /// Every candidate failed; `tried` lists all of them, none omitted.
    #[error("resolution exhausted after {} candidates", tried.len())]
    Exhausted { tried: Vec<Attempt> },
}

impl ResolveError {
    /// Paths attempted, for diagnostics display.
    pub fn tried_paths(&self) -> Vec<&str> {
        match self {
            ResolveError::NoCandidates => Vec::new(),
            ResolveError::Exhausted { tried } => {
                tried.iter().map(|a| a.path.as_str()).collect()
            }
        }
    }
}

/// Try each candidate in order against `source`; first success wins.
pub fn resolve(
    source: &dyn DocumentSource,
    candidates: &[String],
) -> Result<Resolution, ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::NoCandidates);
    }

    let mut tried: Vec<Attempt> = Vec::with_capacity(candidates.len());
    for path in candidates {
        match source.fetch(path) {
            Ok(document) => {
                tried.push(Attempt { path: path.clone(), error: None });
                return Ok(Resolution {
                    document,
                    path: path.clone(),
                    tried,
                });
            }
            Err(err) => {
                tried.push(Attempt {
                    path: path.clone(),
                    error: Some(err.to_string()),
                });
            }
        }
    }

    Err(ResolveError::Exhausted { tried })
}

/// Filesystem-backed source rooted at a content directory.
///
/// Candidate paths are tree-relative and joined under the root verbatim; no
/// cache-busting applies here.
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for FsSource {
    fn fetch(&self, path: &str) -> Result<Value, FetchError> {
        let text = std::fs::read_to_string(self.root.join(path))?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// HTTP-backed source for inspecting a deployed content tree.
///
/// Every request carries a `v=` cache-busting query parameter so an
/// intermediary cache can't mask a freshly deployed document. The parameter
/// defaults to the process start time and can be pinned for reproducible
/// inspection runs.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
    cache_bust: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Self::with_cache_bust(base_url, millis.to_string())
    }

    pub fn with_cache_bust(base_url: impl Into<String>, tag: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::blocking::Client::new(),
            base_url,
            cache_bust: tag.into(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}/{}{}v={}", self.base_url, path, sep, self.cache_bust)
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self, path: &str) -> Result<Value, FetchError> {
        let response = self.client.get(self.url_for(path)).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response.json()?)
    }
}

/// In-memory source for tests and dry runs: a map of path → document.
#[derive(Debug, Default)]
pub struct MapSource {
    documents: BTreeMap<String, Value>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, document: Value) -> &mut Self {
        self.documents.insert(path.into(), document);
        self
    }
}

impl DocumentSource for MapSource {
    fn fetch(&self, path: &str) -> Result<Value, FetchError> {
        self.documents.get(path).cloned().ok_or_else(|| {
            FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no document at {path}"),
            ))
        })
    }
}
