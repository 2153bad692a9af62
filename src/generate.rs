//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the
//! final single-page site.
//!
//! ## Page Layout
//!
//! One `index.html` with, in order:
//!
//! - **Header**: `{name}` logo, desktop nav (`/`-separated) with the resume
//!   button, and a checkbox-driven mobile menu
//! - **Sections**: one block per manifest section, in CMS slice order
//! - **Project dialogs**: one `<dialog>` per project, opened from its card
//! - **Footer**
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── site-3f2a9c1e.css          # style.css + config-derived custom properties
//! ├── site-b71d04aa.js           # nav, word sphere and carousel runtime
//! ├── build.json                 # What was written, for inspection
//! ├── favicon.svg                # Everything under content/assets/, verbatim
//! └── avatar.png
//! ```
//!
//! CSS and JS are named by the first 8 hex digits of their SHA-256, so a
//! deploy never serves a stale stylesheet against fresh markup.
//!
//! ## Build-Time Layout
//!
//! Interactive pieces are rendered in their initial state so the page is
//! correct before any script runs:
//!
//! - Carousel card transforms come from [`Carousel::cards`]; the runtime
//!   reads the same tuning from `data-*` attributes on the carousel root.
//! - The word sphere's first projection comes from [`WordSphere::project`].
//! - Hero letters carry their intro-spiral start offsets as CSS custom
//!   properties.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. Rich text
//! from the CMS is markdown, rendered with pulldown-cmark.

use crate::anchors::{self, LinkTarget};
use crate::carousel::{Carousel, CarouselParams};
use crate::config::{self, SiteConfig};
use crate::sphere::WordSphere;
use crate::types::{Image, Manifest, NavEntry, ProjectItem, Section, TechStack};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const SITE_JS: &str = include_str!("../static/site.js");
const CAROUSEL_JS: &str = include_str!("../static/carousel.js");

/// Path of the page the generator renders; nav active state is computed
/// against it.
const HOME_PATH: &str = "/";

const ASSETS_DIR: &str = "assets";
const FAVICON_CANDIDATES: &[&str] = &["favicon.svg", "favicon.ico", "favicon.png"];

/// Hero intro spiral.
const SPIRAL_RADIUS: f64 = 1500.0;
const SPIRAL_START_DEG: f64 = -90.0;
const SPIRAL_STEP_DEG: f64 = 30.0;
const SPIRAL_ROTATION_DEG: f64 = 720.0;
const SPIRAL_STAGGER_S: f64 = 0.1;

const IMAGE_ALT_FALLBACK: &str = "Project Image";

/// What a generate run wrote, serialized to `build.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub version: String,
    pub page: String,
    pub stylesheet: String,
    pub script: String,
    /// Copied asset paths relative to the output root, sorted.
    pub assets: Vec<String>,
    pub sections: Vec<SectionReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Skills or projects, where the section has a list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
}

impl SectionReport {
    fn from_section(section: &Section) -> Self {
        let items = match section {
            Section::TechList { skills, .. } => Some(skills.len()),
            Section::Projects { items, .. } => Some(items.len()),
            _ => None,
        };
        Self {
            kind: section.kind().to_string(),
            id: section.id().map(str::to_string),
            items,
        }
    }
}

/// Fingerprinted asset references the page links to.
#[derive(Debug, Clone)]
pub struct PageAssets {
    pub stylesheet: String,
    pub script: String,
    pub favicon: Option<String>,
}

pub fn generate(
    manifest_path: &Path,
    output_dir: &Path,
    source_root: &Path,
) -> Result<BuildReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;

    let assets = copy_assets(&source_root.join(ASSETS_DIR), output_dir)?;

    let css = build_css(&manifest.config);
    let js = format!("{SITE_JS}\n{CAROUSEL_JS}");
    let stylesheet = fingerprint("site", "css", css.as_bytes());
    let script = fingerprint("site", "js", js.as_bytes());
    fs::write(output_dir.join(&stylesheet), &css)?;
    fs::write(output_dir.join(&script), &js)?;

    let favicon = FAVICON_CANDIDATES
        .iter()
        .find(|name| assets.iter().any(|a| a == *name))
        .map(|name| format!("/{name}"));

    let page_assets = PageAssets {
        stylesheet: stylesheet.clone(),
        script: script.clone(),
        favicon,
    };
    let page = render_page(&manifest, &page_assets);
    fs::write(output_dir.join("index.html"), page.into_string())?;
    tracing::info!("generated index.html");

    let report = BuildReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        page: "index.html".to_string(),
        stylesheet,
        script,
        assets,
        sections: manifest
            .sections
            .iter()
            .map(SectionReport::from_section)
            .collect(),
    };
    fs::write(
        output_dir.join("build.json"),
        serde_json::to_string_pretty(&report)?,
    )?;

    Ok(report)
}

/// Full stylesheet: config-derived custom properties, then the static rules.
pub fn build_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_motion_css(&config.carousel, &config.navigation),
        CSS_STATIC
    )
}

/// `{stem}-{hash8}.{ext}` where `hash8` is the SHA-256 prefix of `content`.
pub fn fingerprint(stem: &str, ext: &str, content: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(content));
    format!("{stem}-{}.{ext}", &digest[..8])
}

/// Copy `assets/` into the output root. Returns copied paths relative to the
/// output root, sorted. A missing assets directory copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<Vec<String>, GenerateError> {
    let mut copied = Vec::new();
    if !src.is_dir() {
        return Ok(copied);
    }

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        if rel
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        {
            continue;
        }
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }

    copied.sort();
    tracing::debug!(count = copied.len(), "copied assets");
    Ok(copied)
}

fn markdown(source: &str) -> Markup {
    let parser = Parser::new(source);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure with page metadata.
fn base_document(manifest: &Manifest, assets: &PageAssets, content: Markup) -> Markup {
    let meta = &manifest.config.site;
    let title = manifest.site.meta_title.as_deref().unwrap_or(&meta.title);
    let description = manifest
        .site
        .meta_description
        .as_deref()
        .unwrap_or(&meta.description);
    let nav = &manifest.config.navigation;

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                meta name="description" content=(description);
                @if !meta.keywords.is_empty() {
                    meta name="keywords" content=(meta.keywords.join(", "));
                }
                meta name="robots" content="index, follow";
                link rel="canonical" href=(meta.base_url);
                meta property="og:type" content="website";
                meta property="og:locale" content=(meta.locale);
                meta property="og:site_name" content=(meta.title);
                meta property="og:title" content=(title);
                meta property="og:description" content=(description);
                meta property="og:url" content=(meta.base_url);
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(title);
                meta name="twitter:description" content=(description);
                @if let Some(favicon) = &assets.favicon {
                    link rel="icon" href=(favicon);
                }
                link rel="stylesheet" href={ "/" (assets.stylesheet) };
                script src={ "/" (assets.script) } defer {}
            }
            body
                data-header-offset=(nav.header_offset)
                data-hash-scroll-delay=(nav.hash_scroll_delay_ms)
            {
                (content)
            }
        }
    }
}

/// Renders a link according to its [`LinkTarget`] classification.
///
/// In-page targets carry `data-section` (and `data-path` for page-section
/// links) so the runtime can scroll instead of navigating.
fn link(entry: &NavEntry, class: &str, current_path: &str, body: Markup) -> Markup {
    let target = anchors::classify(&entry.url);
    let external = target.is_external();
    let (section, path) = match &target {
        LinkTarget::Section(section) => (Some(section.as_str()), None),
        LinkTarget::PageSection { path, section } => (Some(section.as_str()), Some(path.as_str())),
        _ => (None, None),
    };
    let empty = matches!(target, LinkTarget::Empty);

    html! {
        a class=(class)
            href=(target.href())
            data-link=(target.kind())
            data-section=[section]
            data-path=[path]
            aria-current=[target.is_active(current_path).then_some("page")]
            aria-disabled=[empty.then_some("true")]
            target=[external.then_some("_blank")]
            rel=[external.then_some("noopener noreferrer")]
        {
            (body)
        }
    }
}

fn nav_link(entry: &NavEntry, current_path: &str) -> Markup {
    link(
        entry,
        "nav-link",
        current_path,
        html! {
            span.nav-link-fill {}
            span.nav-link-label { (entry.label) }
        },
    )
}

/// `{ label ↗ }` code-style button.
fn button_link(entry: &NavEntry, current_path: &str) -> Markup {
    link(
        entry,
        "button",
        current_path,
        html! {
            span.button-fill {}
            span.button-label.code-style {
                span.code-bracket { "{" }
                (entry.label) " ↗"
                span.code-bracket { "}" }
            }
        },
    )
}

/// Renders the site header with logo and navigation.
pub fn site_header(manifest: &Manifest, current_path: &str) -> Markup {
    let site = &manifest.site;
    let last = site.nav.len().saturating_sub(1);

    html! {
        header.site-header {
            nav.main-nav aria-label="Main navigation" {
                a.name-logo.code-style href="/" aria-label="Home page" {
                    span.code-bracket { "{" }
                    (site.name)
                    span.code-bracket { "}" }
                }
                input.nav-toggle type="checkbox" id="nav-toggle" aria-label="Toggle mobile menu";
                label.nav-hamburger for="nav-toggle" aria-hidden="true" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                ul.desktop-menu {
                    @for (i, item) in site.nav.iter().enumerate() {
                        li { (nav_link(item, current_path)) }
                        @if i < last {
                            li.nav-separator aria-hidden="true" { "/" }
                        }
                    }
                    @if let Some(resume) = &site.resume {
                        li.nav-resume { (button_link(resume, current_path)) }
                    }
                }
                ul.mobile-menu {
                    @for item in &site.nav {
                        li { (nav_link(item, current_path)) }
                    }
                    @if let Some(resume) = &site.resume {
                        li.nav-resume { (button_link(resume, current_path)) }
                    }
                }
            }
        }
    }
}

fn heading(text: &str) -> Markup {
    html! {
        @if !text.is_empty() {
            h2.heading {
                span.heading-prefix aria-hidden="true" { "// " }
                (text)
            }
        }
    }
}

fn prose(source: &str) -> Markup {
    html! {
        @if !source.trim().is_empty() {
            div.prose { (markdown(source)) }
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Where a hero letter starts its intro spiral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralStart {
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub delay_s: f64,
}

/// Start offset for the `index`th letter of the full name.
///
/// Letters begin on a 1500px circle, starting straight up and stepping 30°
/// per letter, and spiral into place.
pub fn spiral_start(index: usize) -> SpiralStart {
    let angle = (SPIRAL_START_DEG + SPIRAL_STEP_DEG * index as f64).to_radians();
    SpiralStart {
        x: SPIRAL_RADIUS * angle.cos(),
        y: SPIRAL_RADIUS * angle.sin(),
        rotation_deg: SPIRAL_ROTATION_DEG,
        delay_s: SPIRAL_STAGGER_S * index as f64,
    }
}

impl SpiralStart {
    fn style(&self) -> String {
        format!(
            "--spiral-x: {:.1}px; --spiral-y: {:.1}px; --spiral-rotate: {}deg; --spiral-delay: {:.1}s;",
            self.x, self.y, self.rotation_deg, self.delay_s
        )
    }
}

fn hero_letters(name: &str, first_index: usize, part: &str) -> Markup {
    html! {
        @for (i, letter) in name.chars().enumerate() {
            span class={ "name-letter name-letter-" (part) }
                style=(spiral_start(first_index + i).style())
            {
                (letter)
            }
        }
    }
}

fn render_hero(first_name: &str, last_name: &str, tag_line: &str) -> Markup {
    let full_name = format!("{first_name} {last_name}");
    let first_len = first_name.chars().count();

    html! {
        section.hero data-slice-type="hero" {
            div.hero-inner {
                h1.hero-name aria-label=(full_name.trim()) {
                    span.hero-first aria-hidden="true" { (hero_letters(first_name, 0, "first")) }
                    span.hero-last aria-hidden="true" { (hero_letters(last_name, first_len, "last")) }
                }
                @if !tag_line.is_empty() {
                    span.hero-tagline { (tag_line) }
                }
            }
        }
    }
}

fn render_biography(
    id: &str,
    heading_text: &str,
    description: &str,
    avatar: Option<&Image>,
    button: Option<&NavEntry>,
) -> Markup {
    html! {
        section.bounded.biography id=(id) data-slice-type="biography" {
            div.two-column {
                div.avatar-column {
                    @if let Some(avatar) = avatar {
                        div.avatar {
                            img src=(avatar.url) alt=(avatar.alt.as_deref().unwrap_or_default()) loading="lazy";
                        }
                    }
                }
                div.text-column {
                    (heading(heading_text))
                    (prose(description))
                    @if let Some(button) = button {
                        (button_link(button, HOME_PATH))
                    }
                }
            }
        }
    }
}

fn render_tech_list(
    id: &str,
    heading_text: &str,
    description: &str,
    skills: &[String],
    config: &SiteConfig,
) -> Markup {
    let sphere_config = &config.sphere;
    let size = sphere_config.default_size;
    let sphere = WordSphere::new(skills.to_vec(), size);

    html! {
        section.bounded.tech-list id=(id) data-slice-type="tech_list" {
            div.two-column {
                div.text-column {
                    (heading(heading_text))
                    (prose(description))
                }
                div.sphere-frame style=(format!("height: {}px;", size + 20.0)) {
                    @if !skills.is_empty() {
                        ul.word-sphere
                            aria-label="Skills"
                            style=(format!("width: {size}px; height: {size}px;"))
                            data-size=(size)
                            data-speed=(sphere_config.speed)
                            data-breakpoint=(sphere_config.breakpoint)
                            data-desktop-divisor=(sphere_config.desktop_divisor)
                            data-desktop-min=(sphere_config.desktop_min)
                            data-desktop-max=(sphere_config.desktop_max)
                            data-mobile-divisor=(sphere_config.mobile_divisor)
                            data-mobile-min=(sphere_config.mobile_min)
                            data-mobile-max=(sphere_config.mobile_max)
                        {
                            @for placement in sphere.project() {
                                li.sphere-word style=(placement.style()) { (placement.word) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn card_image(image: &Image, class: &str) -> Markup {
    html! {
        img class=(class)
            src=(image.url)
            alt=(image.alt.as_deref().unwrap_or(IMAGE_ALT_FALLBACK))
            loading="lazy";
    }
}

fn detail_id(index: usize) -> String {
    format!("project-detail-{index}")
}

/// Carousel with build-time card layout.
pub fn render_carousel(items: &[ProjectItem], params: CarouselParams, label: &str) -> Markup {
    let carousel = Carousel::new(items.to_vec(), params);
    let p = carousel.params();
    let empty = carousel.is_empty();

    html! {
        div.carousel
            tabindex="0"
            role="region"
            aria-roledescription="carousel"
            aria-label=(label)
            data-count=(carousel.len())
            data-current-index=(carousel.current_index())
            data-transition-ms=(p.transition)
            data-wheel-threshold=(p.wheel_threshold)
            data-wheel-debounce-ms=(p.wheel_debounce)
            data-swipe-threshold=(p.swipe_threshold)
            data-visible-range=(p.visible_range)
            data-interactive-range=(p.interactive_range)
            data-narrow-breakpoint=(p.narrow_breakpoint)
            data-angle-step=(p.wide.angle_step_deg)
            data-angle-step-narrow=(p.narrow.angle_step_deg)
            data-radius=(p.wide.radius)
            data-radius-narrow=(p.narrow.radius)
            data-depth-falloff=(p.wide.depth_falloff)
            data-opacity-step=(p.opacity_step)
            data-opacity-floor=(p.opacity_floor)
            data-scale-step=(p.scale_step)
            data-scale-floor=(p.scale_floor)
        {
            div.carousel-stage {
                @for (i, item) in carousel.items().iter().enumerate() {
                    @let layout = carousel.card(i);
                    @let style = layout.as_ref().map(|c| c.style()).unwrap_or_else(|| "opacity: 0; visibility: hidden; pointer-events: none;".to_string());
                    article.project-card
                        data-index=(i)
                        data-detail=(detail_id(i))
                        style=(style)
                        aria-hidden=[layout.is_none().then_some("true")]
                    {
                        @if let Some(image) = &item.image {
                            (card_image(image, "card-image"))
                        }
                        @if !item.name.is_empty() {
                            h3.card-title { (item.name) }
                        }
                        @if !item.short_description.trim().is_empty() {
                            div.card-description { (markdown(&item.short_description)) }
                        }
                        button.card-open type="button" aria-controls=(detail_id(i)) {
                            "Details"
                        }
                    }
                }
            }
            div.carousel-controls {
                button.carousel-prev type="button" aria-label="Previous project" disabled[empty] { "Prev" }
                button.carousel-next type="button" aria-label="Next project" disabled[empty] { "Next" }
            }
        }
    }
}

/// Detail overlay for one project.
pub fn render_project_dialog(index: usize, item: &ProjectItem) -> Markup {
    let id = detail_id(index);
    let title_id = format!("{id}-title");
    let description = if item.expanded_description.trim().is_empty() {
        &item.short_description
    } else {
        &item.expanded_description
    };

    html! {
        dialog.project-detail id=(id) aria-labelledby=(title_id) {
            div.detail-body {
                form method="dialog" {
                    button.detail-close type="submit" aria-label="Close" { "✕" }
                }
                @if let Some(image) = &item.image {
                    (card_image(image, "detail-image"))
                }
                @if !item.name.is_empty() {
                    h2.detail-title id=(title_id) { (item.name) }
                }
                (prose(description))
                @match &item.tech_stack {
                    Some(TechStack::Tags(tags)) => {
                        ul.tag-list aria-label="Tech stack" {
                            @for tag in tags {
                                li.tag { (tag) }
                            }
                        }
                    }
                    Some(TechStack::Text(text)) => {
                        div.tech-stack { (markdown(text)) }
                    }
                    None => {}
                }
                @if !item.links.is_empty() {
                    ul.detail-links {
                        @for entry in &item.links {
                            li { (button_link(entry, HOME_PATH)) }
                        }
                    }
                }
            }
        }
    }
}

fn render_projects(
    id: &str,
    heading_text: &str,
    description: &str,
    items: &[ProjectItem],
    config: &SiteConfig,
) -> Markup {
    let label = if heading_text.is_empty() {
        "Projects"
    } else {
        heading_text
    };

    html! {
        section.bounded.projects id=(id) data-slice-type="projects" {
            div.projects-intro {
                (heading(heading_text))
                (prose(description))
            }
            (render_carousel(items, CarouselParams::from_site_config(config), label))
            @for (i, item) in items.iter().enumerate() {
                (render_project_dialog(i, item))
            }
        }
    }
}

pub fn render_section(section: &Section, config: &SiteConfig) -> Markup {
    match section {
        Section::Hero {
            first_name,
            last_name,
            tag_line,
        } => render_hero(first_name, last_name, tag_line),
        Section::Biography {
            id,
            heading,
            description,
            avatar,
            button,
        } => render_biography(id, heading, description, avatar.as_ref(), button.as_ref()),
        Section::TechList {
            id,
            heading,
            description,
            skills,
        } => render_tech_list(id, heading, description, skills, config),
        Section::Projects {
            id,
            heading,
            description,
            items,
        } => render_projects(id, heading, description, items, config),
    }
}

fn site_footer(name: &str) -> Markup {
    html! {
        footer.site-footer {
            span.footer-name.code-style {
                span.code-bracket { "{" }
                (name)
                span.code-bracket { "}" }
            }
            a.footer-top href="#" data-link="top" { "Back to top" }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

pub fn render_page(manifest: &Manifest, assets: &PageAssets) -> Markup {
    let content = html! {
        (site_header(manifest, HOME_PATH))
        main {
            @for section in &manifest.sections {
                (render_section(section, &manifest.config))
            }
        }
        (site_footer(&manifest.site.name))
    };

    base_document(manifest, assets, content)
}

// ============================================================================
// Tests
// ============================================================================
