//! Title-to-identifier normalization.
//!
//! Content nodes are addressed by slug wherever an explicit id is missing, so
//! every place that derives an identifier from display text must agree on the
//! rules. This module provides the single normalization function used by node
//! identity derivation, candidate path generation, and title-addressed topic
//! cards.
//!
//! The content corpus is bilingual (English/Turkish), so normalization folds
//! Turkish letters explicitly in addition to stripping combining marks from
//! decomposed input:
//! - `"Uçuş Yönetimi"` → `"ucus-yonetimi"`
//! - `"Airplane General"` → `"airplane-general"`
//! - `"  Hydraulics!  "` → `"hydraulics"`
//!
//! The function is total (empty input yields an empty string) and idempotent:
//! feeding a slug back in returns it unchanged.

/// Combining diacritical marks block, dropped after case folding so that
/// decomposed input (`e` + U+0301) normalizes the same as precomposed (`é`).
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Normalize a title into a lowercase, ASCII-only, hyphen-separated slug.
///
/// Rules, in order:
/// 1. Unicode-lowercase the input.
/// 2. Drop combining marks; fold accented Latin letters to their base letter
///    (covers the Turkish set ğ ü ş ı ö ç and the common Latin-1/Latin-A
///    accents).
/// 3. Collapse every run of remaining non-`[a-z0-9]` characters into a single
///    hyphen.
/// 4. Strip leading and trailing hyphens.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        for lc in c.to_lowercase() {
            if COMBINING_MARKS.contains(&lc) {
                continue;
            }
            match base_letter(lc) {
                Some(base) => {
                    if pending_hyphen && !out.is_empty() {
                        out.push('-');
                    }
                    pending_hyphen = false;
                    out.push(base);
                }
                None => pending_hyphen = true,
            }
        }
    }

    out
}

/// Map an already-lowercased character to its slug representation: ASCII
/// alphanumerics pass through, accented Latin letters fold to their base
/// letter, everything else is a separator.
fn base_letter(c: char) -> Option<char> {
    match c {
        'a'..='z' | '0'..='9' => Some(c),
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => Some('a'),
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => Some('c'),
        'ď' | 'đ' => Some('d'),
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => Some('e'),
        'ğ' | 'ĝ' | 'ġ' | 'ģ' => Some('g'),
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => Some('i'),
        'ĺ' | 'ļ' | 'ľ' | 'ł' => Some('l'),
        'ñ' | 'ń' | 'ņ' | 'ň' => Some('n'),
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ŏ' | 'ő' => Some('o'),
        'ŕ' | 'ř' => Some('r'),
        'ş' | 'ś' | 'ŝ' | 'š' => Some('s'),
        'ţ' | 'ť' => Some('t'),
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => Some('u'),
        'ý' | 'ÿ' => Some('y'),
        'ź' | 'ż' | 'ž' => Some('z'),
        _ => None,
    }
}
