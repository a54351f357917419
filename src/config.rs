//! Site configuration.
//!
//! Loading, validating, and defaulting `config.toml` from the content root.
//! The config is the read-only lookup table the viewer consults for its
//! chrome: which trainings exist, how their topic cards are addressed, and
//! what the offline shell should precache. It is loaded once at startup and
//! never mutated.
//!
//! ## Topic addressing
//!
//! Two addressing schemes coexist because two generations of content do:
//!
//! - `indexed` — topic cards carry ids matching `<prefix>-<n>` and `n` is a
//!   1-based index into the training's ordered `topics` slug list.
//! - `titled` — the card's visible title is slugified and used directly.
//!
//! ## Example
//!
//! ```toml
//! site_title = "Flight Training"
//! slide_player_url = "slideplayer/index.html"
//!
//! [[trainings]]
//! id = "egitim1"
//! label = "Eğitim 1"
//! addressing = "indexed"
//! card_prefix = "e1"
//! topics = ["airplane-general", "hydraulics", "electrical"]
//!
//! [[trainings]]
//! id = "egitim2"
//! label = "Eğitim 2"
//! addressing = "titled"
//!
//! [shell]
//! cache_prefix = "cbt-cache"
//! precache = ["assets/learjet.png"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Root configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title shown in the hero and page titles.
    pub site_title: String,
    /// Label on the hero's primary call-to-action.
    pub cta_label: String,
    /// URL of the external slide player; the package id is passed as its
    /// `pkg` query parameter.
    pub slide_player_url: String,
    /// Trainings shown on the selector, in display order.
    pub trainings: Vec<TrainingConfig>,
    /// Offline shell settings.
    pub shell: ShellConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Training".to_string(),
            cta_label: "Start Training".to_string(),
            slide_player_url: "slideplayer/index.html".to_string(),
            trainings: Vec::new(),
            shell: ShellConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate cross-field constraints the type system can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, training) in self.trainings.iter().enumerate() {
            if training.id.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "trainings[{i}].id must not be empty"
                )));
            }
            if self.trainings[..i].iter().any(|t| t.id == training.id) {
                return Err(ConfigError::Validation(format!(
                    "duplicate training id: {}",
                    training.id
                )));
            }
            if training.addressing == Addressing::Indexed {
                if training.topics.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "training {} uses indexed addressing but lists no topics",
                        training.id
                    )));
                }
                if training.card_prefix.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "training {} uses indexed addressing but has no card_prefix",
                        training.id
                    )));
                }
            }
        }
        if self.shell.cache_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "shell.cache_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn training(&self, id: &str) -> Option<&TrainingConfig> {
        self.trainings.iter().find(|t| t.id == id)
    }
}

/// How a training's topic cards map onto document locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Addressing {
    /// Card ids like `e1-3` index into the `topics` slug list.
    Indexed,
    /// The card's visible title is slugified.
    Titled,
}

/// One training entry in the selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Training id; doubles as the module folder name.
    pub id: String,
    /// Display label on the training card.
    pub label: String,
    pub addressing: Addressing,
    /// Card id prefix for indexed addressing (`e1` matches `e1-<n>`).
    pub card_prefix: String,
    /// Ordered topic slugs for indexed addressing.
    pub topics: Vec<String>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            addressing: Addressing::Titled,
            card_prefix: String::new(),
            topics: Vec::new(),
        }
    }
}

impl TrainingConfig {
    /// Parse a card id like `e1-3` into its 1-based index. Case-insensitive
    /// on the prefix, `None` for anything that doesn't match the pattern.
    pub fn card_index(&self, card_id: &str) -> Option<usize> {
        if self.card_prefix.is_empty() {
            return None;
        }
        let card = card_id.to_lowercase();
        let rest = card
            .strip_prefix(&self.card_prefix.to_lowercase())?
            .strip_prefix('-')?;
        let n: usize = rest.parse().ok()?;
        (n >= 1).then_some(n)
    }

    /// Topic slug for a 1-based card index.
    pub fn topic_at(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.topics.get(i))
            .map(String::as_str)
    }
}

/// Offline shell (service worker) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Cache name prefix; a content hash suffix is appended per build.
    pub cache_prefix: String,
    /// Extra assets to precache beyond the generated pages.
    pub precache: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            cache_prefix: "cbt-cache".to_string(),
            precache: Vec::new(),
        }
    }
}

/// Load `config.toml` from the content root, falling back to defaults when
/// the file doesn't exist. The result is validated either way.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A documented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# groundschool configuration
# Place this file at the root of your content directory.

# Site title shown in the hero and page titles.
site_title = "Training"

# Label on the hero's primary call-to-action.
cta_label = "Start Training"

# External slide player; slide packages are delegated to
# <slide_player_url>?pkg=<package-id>.
slide_player_url = "slideplayer/index.html"

# Trainings shown on the selector, in display order.
#
# addressing = "indexed": topic cards carry ids like "e1-3" where the number
# is a 1-based index into the ordered `topics` slug list.
#
# addressing = "titled": the card's visible title is slugified and looked up
# directly (modules/<id>/<slug>.json).

[[trainings]]
id = "egitim1"
label = "Eğitim 1"
addressing = "indexed"
card_prefix = "e1"
topics = [
  "airplane-general",
  "hydraulics",
  "electrical",
  "lighting",
  "avionics",
  "auto-flight-system",
  "radio-navigation",
  "flight-management",
]

[[trainings]]
id = "egitim2"
label = "Eğitim 2"
addressing = "titled"

[shell]
# Cache name prefix; a content-hash suffix is appended on every build so a
# redeploy invalidates stale caches.
cache_prefix = "cbt-cache"
# Extra assets to precache beyond the generated pages.
precache = []
"#
}
