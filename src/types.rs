//! Shared types used across both pipeline stages.
//!
//! The scan stage serializes a [`Manifest`] to JSON and the generate stage
//! reads it back, so these types carry both serde derives and must stay
//! identical on each side.

use crate::config::SiteConfig;
use serde::{Deserialize, Serialize};

/// Normalized site content: everything the generate stage needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub site: SiteInfo,
    /// Page sections in CMS slice order.
    pub sections: Vec<Section>,
    pub config: SiteConfig,
}

/// Site-wide settings from the CMS settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Rendered as the `{name}` logo.
    pub name: String,
    pub nav: Vec<NavEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<NavEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

/// A labelled link with its URL already resolved from the CMS link field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub label: String,
    /// Empty when the CMS link was unset.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// One page section. Rich-text fields hold markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Hero {
        first_name: String,
        last_name: String,
        tag_line: String,
    },
    Biography {
        id: String,
        heading: String,
        description: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        avatar: Option<Image>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        button: Option<NavEntry>,
    },
    TechList {
        id: String,
        heading: String,
        description: String,
        skills: Vec<String>,
    },
    Projects {
        id: String,
        heading: String,
        description: String,
        items: Vec<ProjectItem>,
    },
}

impl Section {
    /// Anchor id, if the section has one. The hero is never a scroll target.
    pub fn id(&self) -> Option<&str> {
        match self {
            Section::Hero { .. } => None,
            Section::Biography { id, .. }
            | Section::TechList { id, .. }
            | Section::Projects { id, .. } => Some(id),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Section::Hero { .. } => "hero",
            Section::Biography { .. } => "biography",
            Section::TechList { .. } => "tech_list",
            Section::Projects { .. } => "projects",
        }
    }
}

/// One project in the carousel. Every field except `name` may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expanded_description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<NavEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<TechStack>,
}

/// A project's tech stack: free-form markdown or a list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TechStack {
    Tags(Vec<String>),
    Text(String),
}

impl TechStack {
    pub fn is_empty(&self) -> bool {
        match self {
            TechStack::Tags(tags) => tags.is_empty(),
            TechStack::Text(text) => text.trim().is_empty(),
        }
    }
}
