//! Candidate document locations for a content node.
//!
//! The content tree accumulated several folder and naming conventions over
//! its life: documents nested under a `modules/` root, documents under a flat
//! module root, topics as single files, topics as folders holding a
//! `manifest.json`. Rather than migrating the content, resolution guesses
//! every plausible location in a fixed priority order and the first fetch
//! that succeeds wins.
//!
//! Generation is pure — no filesystem or network access — so the ordering
//! contract is unit-testable on its own. Exhaustiveness is deliberate: no
//! candidate is skipped for being unlikely.

use crate::node::{ContentNode, NodeContext};
use crate::slug::slugify;

/// Folder root the newer content lives under.
pub const MODULES_ROOT: &str = "modules";

/// Filename a folder-shaped topic keeps its document in.
pub const FOLDER_MANIFEST: &str = "manifest.json";

/// Produce the ordered list of candidate document paths for `node` within
/// `ctx`, earliest candidate first. Duplicates keep their earliest position.
///
/// Priority order:
/// 1. The node's explicit `path`, verbatim.
/// 2. The node's explicit `file` under `modules/<module>/<parent>/`.
/// 3. Identity as a filename under `modules/<module>/<parent>/`.
/// 4. Identity as a folder holding `manifest.json`, under the `modules/`
///    root and then the flat root.
/// 5. Identity as a filename under the flat root.
/// 6. Slugified-title variants of (3) and (5), only when distinct from the
///    identity-based ones.
/// 7. Identity as a filename directly under the module root.
pub fn candidate_paths(ctx: &NodeContext, node: &ContentNode) -> Vec<String> {
    let m = &ctx.module_id;
    let p = &ctx.parent_slug;
    let mut out: Vec<String> = Vec::new();

    if let Some(path) = node.path.as_deref().filter(|s| !s.is_empty()) {
        push_unique(&mut out, path.to_string());
    }
    if let Some(file) = node.file.as_deref().filter(|s| !s.is_empty()) {
        push_unique(&mut out, format!("{MODULES_ROOT}/{m}/{p}/{file}"));
    }

    let Some(ident) = node.identity() else {
        return out;
    };

    push_unique(&mut out, format!("{MODULES_ROOT}/{m}/{p}/{ident}.json"));
    push_unique(
        &mut out,
        format!("{MODULES_ROOT}/{m}/{p}/{ident}/{FOLDER_MANIFEST}"),
    );
    push_unique(&mut out, format!("{m}/{p}/{ident}/{FOLDER_MANIFEST}"));
    push_unique(&mut out, format!("{m}/{p}/{ident}.json"));

    let title_slug = node.title.as_deref().map(slugify).unwrap_or_default();
    if !title_slug.is_empty() && title_slug != ident {
        push_unique(&mut out, format!("{MODULES_ROOT}/{m}/{p}/{title_slug}.json"));
        push_unique(&mut out, format!("{m}/{p}/{title_slug}.json"));
    }

    // Last resort: directly under the module root, bypassing the parent.
    push_unique(&mut out, format!("{MODULES_ROOT}/{m}/{ident}.json"));

    out
}

fn push_unique(out: &mut Vec<String>, candidate: String) {
    if !out.iter().any(|c| *c == candidate) {
        out.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> NodeContext {
        NodeContext::new("egitim1", "airplane-general")
    }

    #[test]
    fn explicit_path_is_first_and_verbatim() {
        let node = ContentNode {
            id: Some("general".into()),
            path: Some("legacy/airplane/general.json".into()),
            ..ContentNode::default()
        };
        let paths = candidate_paths(&ctx(), &node);
        assert_eq!(paths[0], "legacy/airplane/general.json");
    }

    #[test]
    fn explicit_file_lands_under_parent_folder() {
        let node = ContentNode {
            file: Some("intro-v2.json".into()),
            title: Some("Intro".into()),
            ..ContentNode::default()
        };
        let paths = candidate_paths(&ctx(), &node);
        assert_eq!(paths[0], "modules/egitim1/airplane-general/intro-v2.json");
    }

    #[test]
    fn id_based_conventions_in_order() {
        let node = ContentNode {
            id: Some("general".into()),
            title: Some("General".into()),
            ..ContentNode::default()
        };
        let paths = candidate_paths(&ctx(), &node);
        assert_eq!(
            paths,
            vec![
                "modules/egitim1/airplane-general/general.json",
                "modules/egitim1/airplane-general/general/manifest.json",
                "egitim1/airplane-general/general/manifest.json",
                "egitim1/airplane-general/general.json",
                "modules/egitim1/general.json",
            ]
        );
    }

    #[test]
    fn title_slug_variants_added_when_distinct_from_id() {
        let node = ContentNode {
            id: Some("hyd01".into()),
            title: Some("Hydraulic System".into()),
            ..ContentNode::default()
        };
        let paths = candidate_paths(&ctx(), &node);
        let hyd = paths
            .iter()
            .position(|p| p == "modules/egitim1/airplane-general/hydraulic-system.json")
            .expect("title-slug variant present");
        let flat = paths
            .iter()
            .position(|p| p == "egitim1/airplane-general/hydraulic-system.json")
            .expect("flat title-slug variant present");
        assert!(hyd < flat);
        // Module-root fallback stays last
        assert_eq!(paths.last().map(String::as_str), Some("modules/egitim1/hyd01.json"));
    }

    #[test]
    fn title_slug_variants_skipped_when_equal_to_identity() {
        let node = ContentNode::from_title("General");
        let paths = candidate_paths(&ctx(), &node);
        let general_file_count = paths
            .iter()
            .filter(|p| p.ends_with("airplane-general/general.json"))
            .count();
        // Both roots appear exactly once — no duplicated slug variants
        assert_eq!(general_file_count, 2);
    }

    #[test]
    fn duplicate_file_and_id_candidate_collapses() {
        let node = ContentNode {
            id: Some("general".into()),
            file: Some("general.json".into()),
            ..ContentNode::default()
        };
        let paths = candidate_paths(&ctx(), &node);
        assert_eq!(paths[0], "modules/egitim1/airplane-general/general.json");
        assert_eq!(
            paths
                .iter()
                .filter(|p| *p == "modules/egitim1/airplane-general/general.json")
                .count(),
            1
        );
    }

    #[test]
    fn node_without_identity_only_gets_explicit_candidates() {
        let node = ContentNode {
            path: Some("misc/one-off.json".into()),
            ..ContentNode::default()
        };
        assert_eq!(candidate_paths(&ctx(), &node), vec!["misc/one-off.json"]);
    }

    #[test]
    fn node_with_nothing_yields_no_candidates() {
        assert!(candidate_paths(&ctx(), &ContentNode::default()).is_empty());
    }
}
