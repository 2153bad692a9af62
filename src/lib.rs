//! # Simple Folio
//!
//! A static site generator for single-page developer portfolios. Content is
//! exported from a headless CMS as two JSON documents (site settings and the
//! home page's slices) and rendered into one HTML page with a 3D project
//! carousel, a rotating word sphere of skills, and in-page section
//! navigation.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (CMS documents → normalized sections)
//! 2. Generate  manifest  →  dist/            (final HTML page + assets)
//! ```
//!
//! The manifest is human-readable JSON, so a broken page can be traced back
//! to either a content problem (inspect the manifest) or a rendering problem
//! (rerun `generate` alone).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: reads `settings.json` and `home.json`, normalizes slices into sections |
//! | [`generate`] | Stage 2: renders `index.html` with Maud and writes fingerprinted CSS/JS |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS custom properties |
//! | [`types`] | Manifest types shared by both stages (`Section`, `ProjectItem`, `NavEntry`) |
//! | [`anchors`] | Section id normalization and link classification for in-page navigation |
//! | [`carousel`] | Carousel state machine: gestures, index cycling, transition lock, card layout |
//! | [`sphere`] | Word sphere sizing, golden-spiral placement, and rotation |
//! | [`output`] | CLI output formatting for both stages |
//!
//! # Design Decisions
//!
//! ## One Behavior, Two Runtimes
//!
//! The carousel and the word sphere run in the visitor's browser, but their
//! rules live in Rust: [`carousel::Carousel`] and [`sphere::WordSphere`] are
//! deterministic state machines driven by explicit timestamps. The generator
//! uses them to render the initial card layout and sphere sizing into the
//! HTML, and the shipped JavaScript follows the same rules for everything
//! after page load. Tests exercise the Rust side under a mock clock.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), so malformed
//! markup is a build error and every interpolated CMS string is escaped.
//! Rich-text fields are markdown rendered through `pulldown-cmark`.
//!
//! ## Inert Links Instead of Errors
//!
//! CMS link fields are frequently left blank while content is being written.
//! Blank links render as inert `#` anchors and links to sections that are not
//! on the page produce a warning, never a failed build.

pub mod anchors;
pub mod carousel;
pub mod config;
pub mod generate;
pub mod output;
pub mod scan;
pub mod sphere;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
