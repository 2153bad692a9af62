//! CMS export scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the headless-CMS export from the
//! content directory and normalizes it into a [`Manifest`] that the generate
//! stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── settings.json                # Settings singleton: name, nav, resume link
//! ├── home.json                    # Home document: ordered slices
//! └── assets/                      # Copied verbatim to the output root
//!     ├── favicon.svg
//!     └── avatar.png
//! ```
//!
//! ## Slices
//!
//! `home.json` holds `{"slices": [...]}`; each slice has a `slice_type`, an
//! optional `variation`, and a `primary` object whose shape depends on the
//! type. Supported types are `hero`, `biography`, `tech_list` and
//! `projects`. Anything else is skipped with a warning so a CMS schema change
//! never breaks the build.
//!
//! ## Link Fields
//!
//! CMS links arrive as `{link_type, url?, text?, target?}`. Web, document and
//! media links carry `url`; hash links entered as free text (`link_type:
//! "Any"`) carry it in `text`. See [`LinkField::resolve`].
//!
//! ## Validation
//!
//! - `settings.json` and `home.json` must exist and parse
//! - Section ids must be unique across the page
//! - A known slice type with a malformed `primary` is an error, not a skip

use crate::anchors::{self, normalize_section_id};
use crate::config::{self, ConfigError};
use crate::types::{Image, Manifest, NavEntry, ProjectItem, Section, SiteInfo, TechStack};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Missing CMS document: {0}")]
    MissingDocument(PathBuf),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid {slice_type} slice at position {index}: {source}")]
    InvalidSlice {
        index: usize,
        slice_type: String,
        source: serde_json::Error,
    },
    #[error("Duplicate section id '{0}'")]
    DuplicateSection(String),
}

pub const SETTINGS_FILE: &str = "settings.json";
pub const HOME_FILE: &str = "home.json";

// =============================================================================
// Raw CMS shapes
// =============================================================================

/// A CMS link field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkField {
    pub link_type: Option<String>,
    pub url: Option<String>,
    pub text: Option<String>,
    pub target: Option<String>,
}

impl LinkField {
    /// The link's URL string: `url` when set, else `text`, else empty.
    pub fn resolve(&self) -> String {
        [self.url.as_deref(), self.text.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLabelledLink {
    label: Option<String>,
    link: LinkField,
}

impl RawLabelledLink {
    fn into_entry(self) -> NavEntry {
        NavEntry {
            label: self.label.unwrap_or_default(),
            url: self.link.resolve(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawImage {
    url: Option<String>,
    alt: Option<String>,
}

impl RawImage {
    fn into_image(self) -> Option<Image> {
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        Some(Image {
            url,
            alt: self.alt.filter(|a| !a.trim().is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    name: String,
    #[serde(default)]
    nav_item: Vec<RawLabelledLink>,
    #[serde(default)]
    resume_text: Option<String>,
    #[serde(default)]
    resume_link: LinkField,
    #[serde(default)]
    meta_title: Option<String>,
    #[serde(default)]
    meta_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawHome {
    #[serde(default)]
    slices: Vec<RawSlice>,
}

#[derive(Debug, Deserialize)]
struct RawSlice {
    slice_type: String,
    #[serde(default)]
    variation: Option<String>,
    #[serde(default)]
    primary: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeroPrimary {
    first_name: Option<String>,
    last_name: Option<String>,
    tag_line: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BiographyPrimary {
    section_id: Option<String>,
    heading: Option<String>,
    description: Option<String>,
    avatar: Option<RawImage>,
    button_text: Option<String>,
    button_link: LinkField,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TechListPrimary {
    section_id: Option<String>,
    heading: Option<String>,
    #[serde(alias = "description")]
    tech_description: Option<String>,
    tech_skill: Vec<RawSkill>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSkill {
    skill: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectsPrimary {
    section_id: Option<String>,
    heading: Option<String>,
    // The CMS model shipped with this misspelling; accept both.
    #[serde(alias = "decsription")]
    description: Option<String>,
    projects: Vec<RawProject>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProject {
    project_name: Option<String>,
    project_image: Option<RawImage>,
    project_description: Option<String>,
    project_expanded_description: Option<String>,
    project_links: Vec<RawLabelledLink>,
    tech_stack: Option<TechStack>,
}

impl RawProject {
    fn into_item(self) -> ProjectItem {
        ProjectItem {
            name: self.project_name.unwrap_or_default(),
            image: self.project_image.and_then(RawImage::into_image),
            short_description: self.project_description.unwrap_or_default(),
            expanded_description: self.project_expanded_description.unwrap_or_default(),
            links: self
                .project_links
                .into_iter()
                .map(RawLabelledLink::into_entry)
                .filter(|l| !l.url.is_empty())
                .collect(),
            tech_stack: self.tech_stack.filter(|t| !t.is_empty()),
        }
    }
}

// =============================================================================
// Scan
// =============================================================================

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;

    let settings: RawSettings = read_document(&root.join(SETTINGS_FILE))?;
    let home: RawHome = read_document(&root.join(HOME_FILE))?;

    let site = build_site_info(settings);
    let sections = build_sections(home.slices)?;

    tracing::info!(
        sections = sections.len(),
        nav = site.nav.len(),
        "scanned {}",
        root.display()
    );

    Ok(Manifest {
        site,
        sections,
        config,
    })
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ScanError> {
    if !path.is_file() {
        return Err(ScanError::MissingDocument(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| ScanError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn build_site_info(settings: RawSettings) -> SiteInfo {
    let resume = {
        let url = settings.resume_link.resolve();
        let label = settings.resume_text.unwrap_or_default();
        (!url.is_empty() || !label.is_empty()).then_some(NavEntry { label, url })
    };

    SiteInfo {
        name: settings.name,
        nav: settings
            .nav_item
            .into_iter()
            .map(RawLabelledLink::into_entry)
            .collect(),
        resume,
        meta_title: settings.meta_title.filter(|s| !s.trim().is_empty()),
        meta_description: settings.meta_description.filter(|s| !s.trim().is_empty()),
    }
}

fn build_sections(slices: Vec<RawSlice>) -> Result<Vec<Section>, ScanError> {
    let mut sections = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, slice) in slices.into_iter().enumerate() {
        let Some(section) = build_section(index, slice)? else {
            continue;
        };
        if let Some(id) = section.id()
            && !seen_ids.insert(id.to_string())
        {
            return Err(ScanError::DuplicateSection(id.to_string()));
        }
        sections.push(section);
    }

    Ok(sections)
}

/// Normalize one slice. `Ok(None)` for slice types this site doesn't render.
fn build_section(index: usize, slice: RawSlice) -> Result<Option<Section>, ScanError> {
    let RawSlice {
        slice_type,
        variation,
        primary,
    } = slice;

    if let Some(variation) = variation.as_deref()
        && variation != "default"
    {
        tracing::debug!(slice_type = %slice_type, variation, "rendering variation as default");
    }

    let section = match slice_type.as_str() {
        "hero" => {
            let p: HeroPrimary = parse_primary(index, &slice_type, primary)?;
            Section::Hero {
                first_name: p.first_name.unwrap_or_default(),
                last_name: p.last_name.unwrap_or_default(),
                tag_line: p.tag_line.unwrap_or_default(),
            }
        }
        "biography" => {
            let p: BiographyPrimary = parse_primary(index, &slice_type, primary)?;
            let button_url = p.button_link.resolve();
            let button_label = p.button_text.unwrap_or_default();
            Section::Biography {
                id: normalize_section_id(p.section_id.as_deref(), "about_me"),
                heading: p.heading.unwrap_or_default(),
                description: p.description.unwrap_or_default(),
                avatar: p.avatar.and_then(RawImage::into_image),
                button: (!button_url.is_empty() || !button_label.is_empty()).then_some(NavEntry {
                    label: button_label,
                    url: button_url,
                }),
            }
        }
        "tech_list" => {
            let p: TechListPrimary = parse_primary(index, &slice_type, primary)?;
            Section::TechList {
                id: normalize_section_id(p.section_id.as_deref(), "skills"),
                heading: p.heading.unwrap_or_default(),
                description: p.tech_description.unwrap_or_default(),
                skills: p
                    .tech_skill
                    .into_iter()
                    .filter_map(|s| s.skill)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            }
        }
        "projects" => {
            let p: ProjectsPrimary = parse_primary(index, &slice_type, primary)?;
            Section::Projects {
                id: normalize_section_id(p.section_id.as_deref(), "projects"),
                heading: p.heading.unwrap_or_default(),
                description: p.description.unwrap_or_default(),
                items: p.projects.into_iter().map(RawProject::into_item).collect(),
            }
        }
        other => {
            tracing::warn!(slice_type = other, index, "skipping unsupported slice");
            return Ok(None);
        }
    };

    Ok(Some(section))
}

/// Links that would scroll to a section id the page does not have.
///
/// Covers nav items, the resume link, biography buttons and project links,
/// as followed from the home page.
pub fn dangling_section_links(manifest: &Manifest) -> Vec<&NavEntry> {
    let ids: HashSet<&str> = manifest.sections.iter().filter_map(Section::id).collect();

    let section_links = manifest.sections.iter().flat_map(|section| match section {
        Section::Biography { button, .. } => button.iter().collect::<Vec<_>>(),
        Section::Projects { items, .. } => items.iter().flat_map(|i| &i.links).collect(),
        _ => Vec::new(),
    });

    manifest
        .site
        .nav
        .iter()
        .chain(manifest.site.resume.iter())
        .chain(section_links)
        .filter(|entry| {
            anchors::classify(&entry.url)
                .scroll_section("/")
                .is_some_and(|id| !id.is_empty() && !ids.contains(id))
        })
        .collect()
}

fn parse_primary<T: DeserializeOwned + Default>(
    index: usize,
    slice_type: &str,
    primary: serde_json::Value,
) -> Result<T, ScanError> {
    if primary.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(primary).map_err(|source| ScanError::InvalidSlice {
        index,
        slice_type: slice_type.to_string(),
        source,
    })
}
