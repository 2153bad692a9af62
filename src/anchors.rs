//! Section anchors and navigation link parsing.
//!
//! Every link on the page (nav items, buttons, project links) goes through
//! [`classify`] so they all agree on what is an in-page jump and what leaves
//! the page.
//!
//! ## Section ids
//!
//! CMS editors tend to type section ids the way they appear in links
//! (`#about_me`). HTML ids must not carry the `#`, so leading `#` characters
//! are stripped; an empty id falls back to the section's default:
//!
//! - `"#about_me"` → `"about_me"`
//! - `"##skills"` → `"skills"`
//! - `""` → default
//!
//! ## Link targets
//!
//! | URL | Target |
//! |---|---|
//! | `#projects` | [`LinkTarget::Section`]: smooth scroll on this page |
//! | `/blog` | [`LinkTarget::Internal`]: ordinary navigation |
//! | `/#skills`, `/about#me` | [`LinkTarget::PageSection`]: scroll if same page, else navigate |
//! | `https://…` | [`LinkTarget::External`]: new tab |
//! | `""` | [`LinkTarget::Empty`]: inert |

/// Normalize a section id from the CMS.
pub fn normalize_section_id(raw: Option<&str>, default: &str) -> String {
    let id = raw.unwrap_or_default().trim().trim_start_matches('#').trim();
    if id.is_empty() {
        default.to_string()
    } else {
        id.to_string()
    }
}

/// Where a link goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A section on the current page.
    Section(String),
    /// A section on a page that may or may not be the current one.
    PageSection { path: String, section: String },
    /// Another page on this site.
    Internal(String),
    /// Anywhere else.
    External(String),
    /// No URL at all.
    Empty,
}

/// Classify a resolved link URL.
pub fn classify(url: &str) -> LinkTarget {
    let url = url.trim();
    if url.is_empty() {
        LinkTarget::Empty
    } else if let Some(section) = url.strip_prefix('#') {
        LinkTarget::Section(section.to_string())
    } else if let Some((path, section)) = url.split_once('#') {
        LinkTarget::PageSection {
            path: path.to_string(),
            section: section.to_string(),
        }
    } else if url.starts_with('/') {
        LinkTarget::Internal(url.to_string())
    } else {
        LinkTarget::External(url.to_string())
    }
}

impl LinkTarget {
    /// The `href` to render.
    pub fn href(&self) -> String {
        match self {
            LinkTarget::Section(section) => format!("#{section}"),
            LinkTarget::PageSection { path, section } => format!("{path}#{section}"),
            LinkTarget::Internal(url) | LinkTarget::External(url) => url.clone(),
            LinkTarget::Empty => "#".to_string(),
        }
    }

    /// Section to scroll to when the link is followed from `current_path`.
    ///
    /// `None` means the browser should navigate normally.
    pub fn scroll_section(&self, current_path: &str) -> Option<&str> {
        match self {
            LinkTarget::Section(section) => Some(section),
            LinkTarget::PageSection { path, section } if path.is_empty() || path == current_path => {
                Some(section)
            }
            _ => None,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, LinkTarget::External(_))
    }

    /// Whether a nav link should be marked as the current page.
    ///
    /// On the home page, in-page section links are never "current".
    pub fn is_active(&self, current_path: &str) -> bool {
        match self {
            LinkTarget::Empty => false,
            LinkTarget::Section(_) => false,
            LinkTarget::PageSection { .. } if current_path == "/" => false,
            target => current_path.contains(target.href().as_str()),
        }
    }

    /// Short label for CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            LinkTarget::Section(_) => "section",
            LinkTarget::PageSection { .. } => "page section",
            LinkTarget::Internal(_) => "internal",
            LinkTarget::External(_) => "external",
            LinkTarget::Empty => "empty",
        }
    }
}

/// Document scroll position that brings an element to just below the
/// sticky header.
///
/// `element_top` is the element's viewport-relative top, `page_offset` the
/// current vertical scroll. `scrollToSection` in `static/site.js` computes
/// the same value in the browser.
pub fn scroll_target(element_top: f64, page_offset: f64, header_offset: f64) -> f64 {
    element_top + page_offset - header_offset
}
