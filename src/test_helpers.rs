//! Shared test utilities for the simple-folio test suite.
//!
//! Provides fixture setup plus lookup helpers that work with the scan
//! manifest (`Manifest`, `Section`, `ProjectItem`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! assert_eq!(section_ids(&manifest), vec!["about_me", "skills", "projects"]);
//! let items = project_items(&manifest, "projects");
//! assert_eq!(items[0].name, "Analytical Engine");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Manifest, ProjectItem, Section};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups; panic with a clear message on miss
// =========================================================================

/// Find a section by anchor id. Panics if not found.
pub fn find_section<'a>(manifest: &'a Manifest, id: &str) -> &'a Section {
    manifest
        .sections
        .iter()
        .find(|s| s.id() == Some(id))
        .unwrap_or_else(|| panic!("section '{id}' not found. Available: {:?}", section_ids(manifest)))
}

/// Project items of the projects section with the given id. Panics if the
/// section is missing or is not a projects section.
pub fn project_items<'a>(manifest: &'a Manifest, id: &str) -> &'a [ProjectItem] {
    match find_section(manifest, id) {
        Section::Projects { items, .. } => items,
        other => panic!("section '{id}' is a {}, not projects", other.kind()),
    }
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All section kinds in page order.
pub fn section_kinds(manifest: &Manifest) -> Vec<&'static str> {
    manifest.sections.iter().map(Section::kind).collect()
}

/// All section anchor ids in page order (the hero has none).
pub fn section_ids(manifest: &Manifest) -> Vec<&str> {
    manifest.sections.iter().filter_map(Section::id).collect()
}
