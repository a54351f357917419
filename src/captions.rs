//! Slide-caption manifest cleanup.
//!
//! Slide packages carry a caption manifest produced by an offline
//! text-recognition pass over the bottom band of each slide image. Raw
//! recognition output is noisy in predictable ways: menu labels and page
//! numbers bleed into the band, letters smear into runs, and decoration
//! scans as consonant salad. This module is the deterministic cleanup pass
//! applied before the manifest ships — recognition itself and translation
//! fill stay external.
//!
//! [`clean_caption`] applies, in order:
//!
//! 1. Whitespace normalization (CR/LF → space, runs collapsed).
//! 2. Character noise removal: runs of three-plus of the same uppercase
//!    letter vanish, dash runs collapse to one, characters outside the
//!    allowed set are dropped.
//! 3. Long all-caps tokens without a vowel are dropped.
//! 4. Trailing UI noise tokens (numbers, one/two-letter fragments, known
//!    menu words) are stripped from the end.
//! 5. A leading fringe before the first `Aa`-shaped word start is trimmed
//!    when what follows is long enough to be the actual caption.
//!
//! The pass is idempotent: cleaning already-clean text returns it unchanged.
//! Per-entry failures never abort a batch — a slide whose text can't be
//! salvaged just keeps an empty caption.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One entry of a slide-package caption manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideCaption {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "imgSrc", default)]
    pub img_src: String,
    #[serde(rename = "audioSrc", default)]
    pub audio_src: String,
    #[serde(default)]
    pub caption_en: String,
    #[serde(default)]
    pub caption_tr: String,
}

/// Menu words that bleed into the caption band, compared after stripping
/// non-word characters, case-insensitively.
const UI_NOISE_WORDS: &[&str] = &[
    "menu",
    "general",
    "information",
    "airplane",
    "airplanegeneral",
    "generalinformation",
];

/// Punctuation allowed to survive the character filter (besides word
/// characters and whitespace).
const ALLOWED_PUNCT: &[char] = &['.', ',', ';', ':', '(', ')', '\'', '"', '-'];

const TITLE_MAX_CHARS: usize = 60;

/// Slide id for a 1-based slide number: `s01`, `s09`, `s10`, `s150`.
pub fn slide_id(n: u32) -> String {
    format!("s{n:02}")
}

/// Parse a slide id back into its number (`s01` → 1). `None` for anything
/// not matching the `s<digits>` shape.
pub fn slide_number(id: &str) -> Option<u32> {
    let digits = id.strip_prefix('s').or_else(|| id.strip_prefix('S'))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Apply the full cleanup pass to raw recognition output.
pub fn clean_caption(raw: &str) -> String {
    let text = normalize_whitespace(raw);
    let text = drop_character_noise(&text);
    let text = drop_unvowelled_tokens(&text);
    let text = strip_trailing_ui(&text);
    trim_leading_fringe(&text)
}

/// Derive a display title from a cleaned caption, falling back to
/// `Slide <n>` when the caption is empty.
pub fn derive_title(caption: &str, slide_number: u32) -> String {
    if caption.is_empty() {
        return format!("Slide {slide_number}");
    }
    let mut chars = caption.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out
}

/// Remove uppercase smear runs, collapse dash runs, drop disallowed
/// characters, re-collapse whitespace.
fn drop_character_noise(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut kept = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let run_len = chars[i..].iter().take_while(|&&x| x == c).count();
        if c.is_ascii_uppercase() && run_len >= 3 {
            // EEE / RRRR smears: the whole run is noise
            i += run_len;
            continue;
        }
        if matches!(c, '-' | '\u{2013}' | '\u{2014}') {
            let dash_run = chars[i..]
                .iter()
                .take_while(|&&x| matches!(x, '-' | '\u{2013}' | '\u{2014}'))
                .count();
            if dash_run >= 3 {
                kept.push('-');
                i += dash_run;
                continue;
            }
        }
        kept.push(c);
        i += 1;
    }

    let filtered: String = kept
        .chars()
        .filter(|&c| {
            c.is_alphanumeric() || c == '_' || c.is_whitespace() || ALLOWED_PUNCT.contains(&c)
        })
        .collect();
    normalize_whitespace(&filtered)
}

/// Drop tokens of length ≥ 3 that are fully uppercase (no lowercase letters)
/// and contain no vowel.
fn drop_unvowelled_tokens(s: &str) -> String {
    let tokens: Vec<&str> = s
        .split_whitespace()
        .filter(|tok| {
            let all_upper = tok.chars().all(|c| !c.is_lowercase());
            let has_vowel = tok.chars().any(|c| "AEIOUaeiou".contains(c));
            !(tok.chars().count() >= 3 && all_upper && !has_vowel)
        })
        .collect();
    tokens.join(" ")
}

/// Strip trailing menu/number/fragment tokens, repeatedly from the end.
fn strip_trailing_ui(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    while let Some(last) = tokens.last() {
        let word_only: String = last
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        let lower = word_only.to_lowercase();

        let pure_number = !last.is_empty() && last.chars().all(|c| c.is_ascii_digit());
        let short_fragment = matches!(last.chars().count(), 1..=2)
            && last.chars().all(|c| c.is_ascii_alphabetic());
        let ui_word = UI_NOISE_WORDS.contains(&lower.as_str());

        if pure_number || short_fragment || ui_word {
            tokens.pop();
        } else {
            break;
        }
    }
    tokens.join(" ")
}

/// Keep only the suffix starting at the first `Aa`-shaped word start, when
/// that suffix starts past the beginning and is long enough to be the real
/// caption.
fn trim_leading_fringe(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    for i in 0..chars.len().saturating_sub(1) {
        if chars[i].is_ascii_uppercase() && chars[i + 1].is_ascii_lowercase() {
            let suffix: String = chars[i..].iter().collect();
            if i > 0 && suffix.chars().count() > 20 {
                return suffix.trim().to_string();
            }
            break;
        }
    }
    s.to_string()
}

/// Result of cleaning a whole manifest.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub entries: usize,
    pub captions_changed: usize,
    pub titles_filled: usize,
}

/// Clean every entry in place: captions get the full pass, placeholder or
/// missing titles are re-derived from the cleaned caption.
pub fn clean_manifest(entries: &mut [SlideCaption]) -> CleanReport {
    let mut report = CleanReport {
        entries: entries.len(),
        ..CleanReport::default()
    };
    for entry in entries.iter_mut() {
        let cleaned = clean_caption(&entry.caption_en);
        if cleaned != entry.caption_en {
            entry.caption_en = cleaned;
            report.captions_changed += 1;
        }
        if entry.title.is_empty() || entry.title.starts_with("Slide") {
            let n = slide_number(&entry.id).unwrap_or(0);
            let derived = derive_title(&entry.caption_en, n);
            if derived != entry.title {
                entry.title = derived;
                report.titles_filled += 1;
            }
        }
    }
    report
}

/// Load a caption manifest (a JSON array of entries).
pub fn load_manifest(path: &Path) -> Result<Vec<SlideCaption>, CaptionError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a caption manifest back, pretty-printed.
pub fn save_manifest(path: &Path, entries: &[SlideCaption]) -> Result<(), CaptionError> {
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, json)?;
    Ok(())
}
