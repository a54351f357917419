//! Offline cache shell emission.
//!
//! Every build ships a service worker and a web app manifest so the viewer
//! works as an installable, offline-capable app. The worker's strategy:
//!
//! - **Same-origin**: cache-first against a versioned cache. A request that
//!   misses because it carries a cache-busting query parameter is retried
//!   with the query stripped before hitting the network.
//! - **Cross-origin**: network-first, cache fallback.
//! - **Navigations**: network, falling back to the cached shell page.
//!
//! The cache name is `<prefix>-<hash>` where the hash covers the crate
//! version and the sorted precache list. Deploying a build with any changed
//! page set yields a new cache name, and the worker's activate step deletes
//! every cache but its own — stale shells can't survive a redeploy.

use crate::config::{ShellConfig, SiteConfig};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Service worker template embedded at compile time.
const SW_TEMPLATE: &str = include_str!("../static/sw.js");

/// The page navigations fall back to while offline.
const SHELL_PAGE: &str = "/index.html";

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compute the versioned cache name for a precache list.
///
/// Order-insensitive: the list is sorted before hashing so two builds that
/// generate the same pages in a different order share a cache.
pub fn cache_name(shell: &ShellConfig, precache: &[String]) -> String {
    let mut sorted: Vec<&str> = precache.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
    for asset in &sorted {
        hasher.update(asset.as_bytes());
        hasher.update([0u8]);
    }
    let digest = hasher.finalize();
    let short: String = digest.iter().take(4).map(|b| format!("{b:02x}")).collect();
    format!("{}-{}", shell.cache_prefix, short)
}

/// Render the service worker source for a precache list.
pub fn render_service_worker(shell: &ShellConfig, precache: &[String]) -> String {
    let assets_json = serde_json::to_string_pretty(precache)
        .unwrap_or_else(|_| "[]".to_string());
    SW_TEMPLATE
        .replace("__CACHE_NAME__", &cache_name(shell, precache))
        .replace("__SHELL_PAGE__", SHELL_PAGE)
        .replace("__PRECACHE_ASSETS__", &assets_json)
}

/// Render the web app manifest.
pub fn render_webmanifest(config: &SiteConfig) -> Result<String, ShellError> {
    let manifest = serde_json::json!({
        "name": config.site_title,
        "short_name": config.site_title,
        "start_url": "/index.html",
        "display": "standalone",
        "background_color": "#0b1d33",
        "theme_color": "#0b1d33",
    });
    Ok(serde_json::to_string_pretty(&manifest)?)
}

/// Write `sw.js` and `manifest.webmanifest` into the output directory.
///
/// `pages` are the generated page paths (site-root-relative, no leading
/// slash); the configured extra assets are appended after them.
pub fn emit(
    config: &SiteConfig,
    pages: &[String],
    output_dir: &Path,
) -> Result<Vec<String>, ShellError> {
    let mut precache: Vec<String> = pages.iter().map(|p| format!("/{p}")).collect();
    for asset in &config.shell.precache {
        let rooted = format!("/{}", asset.trim_start_matches('/'));
        if !precache.contains(&rooted) {
            precache.push(rooted);
        }
    }

    fs::write(
        output_dir.join("sw.js"),
        render_service_worker(&config.shell, &precache),
    )?;
    fs::write(
        output_dir.join("manifest.webmanifest"),
        render_webmanifest(config)?,
    )?;
    Ok(precache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn shell() -> ShellConfig {
        ShellConfig::default()
    }

    fn precache(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cache_name_is_stable_for_same_assets() {
        let a = cache_name(&shell(), &precache(&["/index.html", "/a/index.html"]));
        let b = cache_name(&shell(), &precache(&["/a/index.html", "/index.html"]));
        assert_eq!(a, b);
        assert!(a.starts_with("cbt-cache-"));
    }

    #[test]
    fn cache_name_changes_when_assets_change() {
        let a = cache_name(&shell(), &precache(&["/index.html"]));
        let b = cache_name(&shell(), &precache(&["/index.html", "/new/index.html"]));
        assert_ne!(a, b);
    }

    #[test]
    fn service_worker_has_no_placeholders_left() {
        let sw = render_service_worker(&shell(), &precache(&["/index.html"]));
        assert!(!sw.contains("__CACHE_NAME__"));
        assert!(!sw.contains("__PRECACHE_ASSETS__"));
        assert!(!sw.contains("__SHELL_PAGE__"));
        assert!(sw.contains("\"/index.html\""));
        assert!(sw.contains("caches.match"));
    }

    #[test]
    fn emit_writes_worker_and_manifest() {
        let tmp = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.shell.precache = vec!["assets/logo.png".into()];

        let pages = precache(&["index.html", "egitim1/index.html"]);
        let assets = emit(&config, &pages, tmp.path()).unwrap();

        assert!(tmp.path().join("sw.js").exists());
        assert!(tmp.path().join("manifest.webmanifest").exists());
        assert_eq!(
            assets,
            vec!["/index.html", "/egitim1/index.html", "/assets/logo.png"]
        );

        let manifest = std::fs::read_to_string(tmp.path().join("manifest.webmanifest")).unwrap();
        assert!(manifest.contains("\"display\": \"standalone\""));
    }
}
