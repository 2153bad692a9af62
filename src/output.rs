//! CLI output formatting for both pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **content-centric, not file-centric**. Every entity (nav item,
//! section, project) leads with its positional index and what a visitor
//! sees, with where it points shown as secondary context. The scan output
//! reads as an inventory of the page; the generate output as a list of what
//! was written.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Navigation
//! 001 About → #about_me (section)
//! 002 GitHub → https://github.com/ada (external)
//!     Resume → /resume.pdf (internal)
//!
//! Sections
//! 001 Hero: Ada Lovelace
//! 002 Biography #about_me
//!     About me
//! 003 Tech list #skills (6 skills)
//!     Rust, TypeScript, PostgreSQL, ...
//! 004 Projects #projects (4 projects)
//!     001 Analytical Engine
//!     002 Note G
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!     001 hero
//!     002 biography → #about_me
//!     003 tech_list → #skills (6 items)
//! Stylesheet → site-3f2a9c1e.css
//! Script → site-b71d04aa.js
//!
//! Generated 1 page, 4 sections, 3 assets
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::anchors;
use crate::generate::BuildReport;
use crate::types::{Manifest, NavEntry, Section};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// One-line plain preview of markdown text.
fn preview(markdown: &str, max: usize) -> String {
    let plain = strip_html_tags(markdown)
        .replace(['*', '_', '`', '#'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    truncate(&plain, max)
}

/// `label → url (kind)`; empty URLs show as `(no link)`.
fn link_line(entry: &NavEntry) -> String {
    let target = anchors::classify(&entry.url);
    if entry.url.is_empty() {
        format!("{} \u{2192} (no link)", entry.label)
    } else {
        format!("{} \u{2192} {} ({})", entry.label, entry.url, target.kind())
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

fn section_header(position: usize, section: &Section) -> String {
    let index = format_index(position);
    match section {
        Section::Hero {
            first_name,
            last_name,
            ..
        } => format!(
            "{} Hero: {}",
            index,
            format!("{first_name} {last_name}").trim()
        ),
        Section::Biography { id, .. } => format!("{} Biography #{}", index, id),
        Section::TechList { id, skills, .. } => format!(
            "{} Tech list #{} ({})",
            index,
            id,
            plural(skills.len(), "skill", "skills")
        ),
        Section::Projects { id, items, .. } => format!(
            "{} Projects #{} ({})",
            index,
            id,
            plural(items.len(), "project", "projects")
        ),
    }
}

fn section_details(section: &Section) -> Vec<String> {
    let mut lines = Vec::new();
    match section {
        Section::Hero { tag_line, .. } => {
            if !tag_line.is_empty() {
                lines.push(tag_line.clone());
            }
        }
        Section::Biography {
            heading,
            description,
            button,
            ..
        } => {
            if !heading.is_empty() {
                lines.push(heading.clone());
            }
            let desc = preview(description, 60);
            if !desc.is_empty() {
                lines.push(desc);
            }
            if let Some(button) = button {
                lines.push(format!("Button: {}", link_line(button)));
            }
        }
        Section::TechList { skills, .. } => {
            if !skills.is_empty() {
                lines.push(truncate(&skills.join(", "), 60));
            }
        }
        Section::Projects { items, .. } => {
            for (i, item) in items.iter().enumerate() {
                let name = if item.name.is_empty() {
                    "(untitled)"
                } else {
                    &item.name
                };
                lines.push(format!("{} {}", format_index(i + 1), name));
                if let Some(image) = &item.image {
                    lines.push(format!("    Image: {}", image.url));
                }
                for entry in &item.links {
                    lines.push(format!("    {}", link_line(entry)));
                }
            }
        }
    }
    lines
}

/// Format scan stage output showing the normalized page content.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Navigation".to_string());
    for (i, entry) in manifest.site.nav.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), link_line(entry)));
    }
    if let Some(resume) = &manifest.site.resume {
        lines.push(format!("{}{}", indent(1), link_line(resume)));
    }

    lines.push(String::new());
    lines.push("Sections".to_string());
    for (i, section) in manifest.sections.iter().enumerate() {
        lines.push(section_header(i + 1, section));
        for detail in section_details(section) {
            lines.push(format!("{}{}", indent(1), detail));
        }
    }

    let dangling = crate::scan::dangling_section_links(manifest);
    if !dangling.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for entry in dangling {
            lines.push(format!(
                "{}{} links to a section that is not on the page",
                indent(1),
                link_line(entry)
            ));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if source_root.join("assets").is_dir() {
        lines.push(format!("{}assets/", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing what was written.
pub fn format_generate_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Home \u{2192} {}", report.page));
    for (i, section) in report.sections.iter().enumerate() {
        let mut line = format!("{}{} {}", indent(1), format_index(i + 1), section.kind);
        if let Some(id) = &section.id {
            line.push_str(&format!(" \u{2192} #{}", id));
        }
        if let Some(n) = section.items {
            line.push_str(&format!(" ({})", plural(n, "item", "items")));
        }
        lines.push(line);
    }

    lines.push(format!("Stylesheet \u{2192} {}", report.stylesheet));
    lines.push(format!("Script \u{2192} {}", report.script));

    if !report.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for asset in &report.assets {
            lines.push(format!("{}{}", indent(1), asset));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated 1 page, {}, {}",
        plural(report.sections.len(), "section", "sections"),
        plural(report.assets.len(), "asset", "assets")
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &BuildReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
