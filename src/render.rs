//! HTML rendering for every viewer state.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! type-safe templates with automatic escaping. The one deliberate exception
//! is inline lesson markup and `html` content blocks, which are authored
//! content from the same tree and are inserted verbatim via `PreEscaped` —
//! exactly the trust boundary the viewer has always had.
//!
//! Renderers come in two layers:
//!
//! - **Fragments** (`lesson_section`, `subtopic_grid`, notices) render one
//!   view's body and are what the session-driven `resolve` command prints.
//! - **Pages** (`hero_page`, `topic_list_page`, ...) wrap a fragment in the
//!   full document shell for the static build: doctype, inline CSS, service
//!   worker registration.

use crate::document::{BlockLesson, ContentBlock, InlineLesson};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Base stylesheet embedded at compile time.
pub const CSS: &str = include_str!("../static/style.css");

/// Service worker registration snippet, included on every generated page.
const SW_REGISTER_JS: &str = "if ('serviceWorker' in navigator) { navigator.serviceWorker.register('/sw.js'); }";

/// A card on a topic or subtopic grid.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub href: String,
}

/// Renders the base HTML document structure shared by all pages.
pub fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="manifest" href="/manifest.webmanifest";
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
                script { (PreEscaped(SW_REGISTER_JS)) }
            }
        }
    }
}

/// Breadcrumb header: home link plus the current trail.
fn site_header(trail: Markup) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb {
                a href="/" { "Home" }
                (trail)
            }
        }
    }
}

// ============================================================================
// Fragments
// ============================================================================

/// A grid of training or topic cards.
pub fn card_grid(cards: &[Card]) -> Markup {
    html! {
        div.card-grid {
            @for card in cards {
                a.card href=(card.href) {
                    div.card-body {
                        h3 { (card.title) }
                        @if let Some(kind) = &card.kind {
                            p.kind { em { (kind) } }
                        }
                        @if let Some(desc) = &card.description {
                            p.desc { (desc) }
                        }
                    }
                }
            }
        }
    }
}

/// Subtopic view body: heading, optional summary, card grid.
pub fn subtopic_grid(title: &str, summary: Option<&str>, cards: &[Card]) -> Markup {
    html! {
        section.section-wrap {
            h2 { (title) }
            @if let Some(summary) = summary {
                p.topic-summary { (summary) }
            }
            (card_grid(cards))
        }
    }
}

/// Inline lesson body: optional heading plus trusted raw markup.
pub fn lesson_section(lesson: &InlineLesson) -> Markup {
    html! {
        div.lesson-section {
            @if let Some(title) = &lesson.title {
                h3 { (title) }
            }
            @if let Some(markup) = &lesson.html {
                div { (PreEscaped(markup.as_str())) }
            }
        }
    }
}

/// Block lesson body: sequential content blocks. Unknown block types are
/// skipped.
pub fn lesson_blocks(lesson: &BlockLesson) -> Markup {
    html! {
        div.lesson-section {
            @for block in &lesson.blocks {
                @match block {
                    ContentBlock::Text { text } => {
                        p { (text) }
                    }
                    ContentBlock::Html { html } => {
                        div { (PreEscaped(html.as_str())) }
                    }
                    ContentBlock::Image { src, alt } => {
                        img src=(src) alt=(alt.as_deref().unwrap_or("")) loading="lazy" decoding="async";
                    }
                    ContentBlock::Unknown => {}
                }
            }
        }
    }
}

/// Terminal notice for documents that matched no shape. Expected state, not
/// an error.
pub fn unavailable_notice(title: &str) -> Markup {
    html! {
        div.notice.notice-empty {
            h3 { (title) }
            p { "Content for this topic has not been added yet." }
        }
    }
}

/// Blocking notice for exhausted resolution, listing every path attempted.
pub fn resolution_failure_notice(title: &str, tried: &[&str]) -> Markup {
    html! {
        div.notice.notice-error {
            h3 { "Could not load " (title) }
            p { "Tried " (tried.len()) " locations:" }
            ul.tried-paths {
                @for path in tried {
                    li { code { (path) } }
                }
            }
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Landing page: hero with the call-to-action into the training selector.
pub fn hero_page(site_title: &str, cta_label: &str, trainings: &[Card]) -> Markup {
    let content = html! {
        section.hero id="hero" {
            h1 { (site_title) }
            a.cta href="#trainings" { (cta_label) }
        }
        section.section-wrap id="trainings" {
            h2 { "Trainings" }
            (card_grid(trainings))
        }
    };
    base_document(site_title, content)
}

/// Topic list page for one training.
pub fn topic_list_page(site_title: &str, training_label: &str, topics: &[Card]) -> Markup {
    let content = html! {
        (site_header(html! { " › " (training_label) }))
        main {
            section.section-wrap {
                h2 { (training_label) }
                (card_grid(topics))
            }
        }
    };
    base_document(&format!("{training_label} - {site_title}"), content)
}

/// Subtopic list page.
pub fn subtopic_page(
    site_title: &str,
    title: &str,
    summary: Option<&str>,
    cards: &[Card],
) -> Markup {
    let content = html! {
        (site_header(html! { " › " (title) }))
        main { (subtopic_grid(title, summary, cards)) }
    };
    base_document(&format!("{title} - {site_title}"), content)
}

/// Lesson page wrapping either lesson fragment.
pub fn lesson_page(site_title: &str, title: &str, body: Markup) -> Markup {
    let content = html! {
        (site_header(html! { " › " (title) }))
        main.lesson-player {
            h2.module-title { (title) }
            (body)
        }
    };
    base_document(&format!("{title} - {site_title}"), content)
}

/// Hand-off page for slide packages: immediate redirect to the external
/// player plus a fallback link.
pub fn delegate_page(site_title: &str, title: &str, player_url: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (player_url) };
                title { (title) " - " (site_title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                p.notice {
                    "Opening slide player… "
                    a href=(player_url) { "Continue" }
                }
            }
        }
    }
}

/// Page variant of the resolution-failure notice, for the static build.
pub fn failure_page(site_title: &str, title: &str, tried: &[&str]) -> Markup {
    let content = html! {
        (site_header(html! { " › " (title) }))
        main { (resolution_failure_notice(title, tried)) }
    };
    base_document(&format!("{title} - {site_title}"), content)
}

/// Page variant of the unavailable notice, for the static build.
pub fn unavailable_page(site_title: &str, title: &str) -> Markup {
    let content = html! {
        (site_header(html! { " › " (title) }))
        main { (unavailable_notice(title)) }
    };
    base_document(&format!("{title} - {site_title}"), content)
}
