//! HTML site generation.
//!
//! Stage 3 of the build. Takes the derived curriculum (lessons with level
//! identifiers attached) and writes the static pages.
//!
//! ## Generated Pages
//!
//! - **List pages** (`/<title>.html`): one per curriculum page, listing its
//!   sections and lessons with a link per level
//! - **App page** (`/App.html`): shell for the drill front-end, which reads
//!   the level identifier from `?uid=` and the site config from an inline
//!   JSON document
//! - **Index page** (`/index.html`): landing page with the optional Markdown
//!   intro and a card per curriculum page
//!
//! Pages are written in that order, so `index.html` and `App.html` win if a
//! curriculum page happens to share their name.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── App.html
//! ├── Sounds.html
//! ├── Verbs.html
//! └── curriculum.json      # only with output.curriculum_json = true
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated schema text is escaped.

use crate::derive::{DrillPage, DrillSite};
use crate::types::{NavItem, nav_items, page_filename};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub const APP_PAGE: &str = "App.html";
pub const INDEX_PAGE: &str = "index.html";
pub const CURRICULUM_JSON: &str = "curriculum.json";

/// Label of the app shell in titles and navigation state.
const APP_PAGE_TITLE: &str = "Drill";
const HOME_PAGE_TITLE: &str = "Home";

const CSS: &str = include_str!("../static/style.css");

/// A file written by [`generate`], for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub label: String,
    pub filename: String,
    /// 1-based position for curriculum pages, `None` for the fixed pages.
    pub position: Option<usize>,
}

/// Render every page of `site` into `output_dir`.
pub fn generate(
    site: &DrillSite,
    output_dir: &Path,
    write_curriculum: bool,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let nav = nav_items(&site.pages);
    let mut written = Vec::new();

    for (i, page) in site.pages.iter().enumerate() {
        let filename = page_filename(&page.title);
        let html = render_list_page(page, &nav);
        fs::write(output_dir.join(&filename), html.into_string())?;
        written.push(GeneratedFile {
            label: page.title.clone(),
            filename,
            position: Some(i + 1),
        });
    }

    let app_html = render_app_page(site, &nav)?;
    fs::write(output_dir.join(APP_PAGE), app_html.into_string())?;
    written.push(GeneratedFile {
        label: APP_PAGE_TITLE.to_string(),
        filename: APP_PAGE.to_string(),
        position: None,
    });

    let index_html = render_index(site, &nav);
    fs::write(output_dir.join(INDEX_PAGE), index_html.into_string())?;
    written.push(GeneratedFile {
        label: HOME_PAGE_TITLE.to_string(),
        filename: INDEX_PAGE.to_string(),
        position: None,
    });

    if write_curriculum {
        let json = serde_json::to_string_pretty(site)?;
        fs::write(output_dir.join(CURRICULUM_JSON), json)?;
        written.push(GeneratedFile {
            label: "Curriculum".to_string(),
            filename: CURRICULUM_JSON.to_string(),
            position: None,
        });
    }

    Ok(written)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the site header: home link plus page navigation
fn site_header(nav: Markup) -> Markup {
    html! {
        header.site-header {
            a.home-link href=(INDEX_PAGE) { (HOME_PAGE_TITLE) }
            nav.site-nav {
                (nav)
            }
        }
    }
}

/// Renders the navigation list, marking the item whose title is `current`.
pub fn render_nav(items: &[NavItem], current: &str) -> Markup {
    html! {
        ul.nav-list {
            @for item in items {
                @let is_current = item.title == current;
                li class=[is_current.then_some("current")] {
                    a href=(item.url) aria-current=[is_current.then_some("page")] {
                        (item.title)
                    }
                }
            }
        }
    }
}

fn level_href(uid: &uuid::Uuid) -> String {
    format!("{APP_PAGE}?uid={uid}")
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a curriculum page: sections, lessons and their level links
fn render_list_page(page: &DrillPage, nav: &[NavItem]) -> Markup {
    let content = html! {
        (site_header(render_nav(nav, &page.title)))
        main.list-page {
            h1 { (page.title) }
            @for section in &page.sections {
                section.lesson-section {
                    h2 { (section.heading) }
                    @if section.lessons.is_empty() {
                        p.empty { "No lessons yet." }
                    } @else {
                        ul.lesson-list {
                            @for lesson in &section.lessons {
                                li.lesson {
                                    span.lesson-name { (lesson.name) }
                                    ol.levels {
                                        @for level in &lesson.levels {
                                            li {
                                                a.level-link
                                                    href=(level_href(&level.uid))
                                                    data-uid=(level.uid.to_string())
                                                    data-level=(level.num) {
                                                    "Level " (level.num)
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(&page.title, None, content)
}

/// Renders the drill app shell
fn render_app_page(site: &DrillSite, nav: &[NavItem]) -> Result<Markup, GenerateError> {
    let config_json = script_safe_json(&serde_json::to_string(&site.config.extra)?);

    let content = html! {
        (site_header(render_nav(nav, APP_PAGE_TITLE)))
        main id="app" class="app-shell" {
            noscript { "The drill app needs JavaScript." }
        }
        script type="application/json" id="drill-config" { (PreEscaped(config_json)) }
    };

    Ok(base_document(APP_PAGE_TITLE, Some("app-view"), content))
}

/// Renders the landing page
fn render_index(site: &DrillSite, nav: &[NavItem]) -> Markup {
    let intro_html = site.config.intro.as_deref().map(markdown_to_html);

    let content = html! {
        (site_header(render_nav(nav, HOME_PAGE_TITLE)))
        main.index-page {
            h1 { (site.config.site_title()) }
            @if let Some(intro) = intro_html {
                div.intro { (PreEscaped(intro)) }
            }
            div.page-grid {
                @for (item, page) in nav.iter().zip(&site.pages) {
                    @let lessons: usize = page.sections.iter().map(|s| s.lessons.len()).sum();
                    a.page-card href=(item.url) {
                        span.page-title { (item.title) }
                        span.page-count { (lessons) " lessons" }
                    }
                }
            }
        }
    };

    base_document(site.config.site_title(), None, content)
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// JSON embedded in a `<script>` element must not be able to close it.
fn script_safe_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

// ============================================================================
// Tests
// ============================================================================
