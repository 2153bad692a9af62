//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root next to the CMS export and is entirely optional: stock
//! defaults reproduce the stock portfolio look and carousel feel.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Portfolio"
//! description = "Professional portfolio showcasing projects and skills"
//! keywords = ["portfolio", "developer", "web development", "projects"]
//! base_url = "http://localhost:3000"
//! locale = "en_US"
//!
//! [colors]
//! background = "#0f172a"
//! text = "#f1f5f9"
//! text_muted = "#64748b"    # Last name, secondary copy
//! accent = "#fde047"        # Highlights, button hover fill
//! surface = "#334155"       # Project cards, detail dialog
//! nav_background = "#f8fafc"
//! border = "#e2e8f0"
//!
//! [carousel]
//! transition_ms = 700       # Must match the card transition in CSS
//! wheel_threshold = 60.0
//! wheel_debounce_ms = 150
//! swipe_threshold = 50.0
//! # ... geometry, see `simple-folio gen-config`
//!
//! [sphere]
//! breakpoint = 768.0
//! default_size = 300.0
//!
//! [navigation]
//! header_offset = 100.0     # Sticky header height compensated when scrolling
//! hash_scroll_delay_ms = 100
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [carousel]
//! transition_ms = 500
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page metadata: title, description, Open Graph fields.
    pub site: SiteMeta,
    /// Color palette for the generated page.
    pub colors: ColorScheme,
    /// Project carousel gesture and geometry tuning.
    pub carousel: CarouselConfig,
    /// Tech-skill word sphere sizing and motion.
    pub sphere: SphereConfig,
    /// In-page hash navigation behaviour.
    pub navigation: NavigationConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.carousel.validate()?;
        self.sphere.validate()?;
        if self.navigation.header_offset.is_nan() || self.navigation.header_offset < 0.0 {
            return Err(ConfigError::Validation(
                "navigation.header_offset must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Page metadata rendered into `<head>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Default document title.
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Canonical base URL of the deployed site.
    pub base_url: String,
    /// Open Graph locale.
    pub locale: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: "Professional portfolio showcasing projects and skills".to_string(),
            keywords: vec![
                "portfolio".to_string(),
                "developer".to_string(),
                "web development".to_string(),
                "projects".to_string(),
            ],
            base_url: "http://localhost:3000".to_string(),
            locale: "en_US".to_string(),
        }
    }
}

/// Color palette. The generated page is dark-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (last name, footer, separators).
    pub text_muted: String,
    /// Accent used for highlights and button hover fills.
    pub accent: String,
    /// Card and dialog surface.
    pub surface: String,
    /// Navigation bar background.
    pub nav_background: String,
    /// Border color.
    pub border: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "#0f172a".to_string(),
            text: "#f1f5f9".to_string(),
            text_muted: "#64748b".to_string(),
            accent: "#fde047".to_string(),
            surface: "#334155".to_string(),
            nav_background: "#f8fafc".to_string(),
            border: "#e2e8f0".to_string(),
        }
    }
}

/// Project carousel tuning.
///
/// Timing values are milliseconds, distances are CSS pixels, angles degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Navigation lock duration. Must equal the CSS card transition.
    pub transition_ms: u64,
    /// Accumulated horizontal wheel delta that triggers one step.
    pub wheel_threshold: f64,
    /// Idle time after which a partial wheel gesture is discarded.
    pub wheel_debounce_ms: u64,
    /// Minimum horizontal touch displacement for a swipe.
    pub swipe_threshold: f64,
    /// Cards with `|offset|` up to this value are rendered.
    pub visible_range: u32,
    /// Cards with `|offset|` up to this value accept clicks.
    pub interactive_range: u32,
    /// Viewport width below which the narrow geometry applies.
    pub narrow_breakpoint: f64,
    pub angle_step_deg: f64,
    pub angle_step_narrow_deg: f64,
    pub radius: f64,
    pub radius_narrow: f64,
    /// Extra depth pushed back per step of offset.
    pub depth_falloff: f64,
    pub opacity_step: f64,
    pub opacity_floor: f64,
    pub scale_step: f64,
    pub scale_floor: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition_ms: 700,
            wheel_threshold: 60.0,
            wheel_debounce_ms: 150,
            swipe_threshold: 50.0,
            visible_range: 2,
            interactive_range: 1,
            narrow_breakpoint: 768.0,
            angle_step_deg: 35.0,
            angle_step_narrow_deg: 25.0,
            radius: 420.0,
            radius_narrow: 260.0,
            depth_falloff: 120.0,
            opacity_step: 0.3,
            opacity_floor: 0.3,
            scale_step: 0.15,
            scale_floor: 0.7,
        }
    }
}

impl CarouselConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.transition_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.transition_ms must be non-zero".into(),
            ));
        }
        for (name, value) in [
            ("wheel_threshold", self.wheel_threshold),
            ("swipe_threshold", self.swipe_threshold),
            ("narrow_breakpoint", self.narrow_breakpoint),
            ("radius", self.radius),
            ("radius_narrow", self.radius_narrow),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "carousel.{name} must be positive"
                )));
            }
        }
        for (name, value) in [
            ("depth_falloff", self.depth_falloff),
            ("opacity_step", self.opacity_step),
            ("scale_step", self.scale_step),
            ("angle_step_deg", self.angle_step_deg),
            ("angle_step_narrow_deg", self.angle_step_narrow_deg),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "carousel.{name} must not be negative"
                )));
            }
        }
        if self.interactive_range > self.visible_range {
            return Err(ConfigError::Validation(
                "carousel.interactive_range must not exceed carousel.visible_range".into(),
            ));
        }
        for (name, value) in [
            ("opacity_floor", self.opacity_floor),
            ("scale_floor", self.scale_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "carousel.{name} must be within 0-1"
                )));
            }
        }
        Ok(())
    }
}

/// Word sphere sizing: `clamp(width / divisor, min, max)` on each side of
/// the breakpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SphereConfig {
    pub breakpoint: f64,
    pub desktop_divisor: f64,
    pub desktop_min: f64,
    pub desktop_max: f64,
    pub mobile_divisor: f64,
    pub mobile_min: f64,
    pub mobile_max: f64,
    /// Size used before the viewport is measured.
    pub default_size: f64,
    /// Rotation per animation frame, in radians.
    pub speed: f64,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            desktop_divisor: 4.0,
            desktop_min: 300.0,
            desktop_max: 500.0,
            mobile_divisor: 2.3,
            mobile_min: 200.0,
            mobile_max: 350.0,
            default_size: 300.0,
            speed: 0.004,
        }
    }
}

impl SphereConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if [self.desktop_divisor, self.mobile_divisor]
            .iter()
            .any(|d| d.is_nan() || *d <= 0.0)
        {
            return Err(ConfigError::Validation(
                "sphere divisors must be positive".into(),
            ));
        }
        if self.desktop_min > self.desktop_max || self.mobile_min > self.mobile_max {
            return Err(ConfigError::Validation(
                "sphere min sizes must not exceed max sizes".into(),
            ));
        }
        Ok(())
    }
}

/// Hash-link scrolling behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Height of the sticky header subtracted from scroll targets.
    pub header_offset: f64,
    /// Delay before honoring the URL hash on load / `hashchange`.
    pub hash_scroll_delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            header_offset: 100.0,
            hash_scroll_delay_ms: 100,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the content root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Page metadata
# ---------------------------------------------------------------------------
[site]
title = "Portfolio"
description = "Professional portfolio showcasing projects and skills"
keywords = ["portfolio", "developer", "web development", "projects"]
# Canonical URL of the deployed site (used for Open Graph).
base_url = "http://localhost:3000"
locale = "en_US"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#0f172a"
text = "#f1f5f9"
text_muted = "#64748b"    # Last name, separators, footer
accent = "#fde047"        # Highlights and button hover fills
surface = "#334155"       # Project cards and detail dialog
nav_background = "#f8fafc"
border = "#e2e8f0"

# ---------------------------------------------------------------------------
# Project carousel
# ---------------------------------------------------------------------------
[carousel]
# Navigation is locked for this long after each step. Keep it equal to the
# card transition duration or navigation will stutter / overlap.
transition_ms = 700

# Horizontal wheel delta (trackpad) accumulated before one step fires.
wheel_threshold = 60.0
# A partial wheel gesture is discarded after this much inactivity.
wheel_debounce_ms = 150
# Minimum horizontal swipe distance on touch screens.
swipe_threshold = 50.0

# Cards up to this many steps from the center are drawn...
visible_range = 2
# ...and cards up to this many steps accept clicks.
interactive_range = 1

# Geometry. The narrow values apply below narrow_breakpoint (px).
narrow_breakpoint = 768.0
angle_step_deg = 35.0
angle_step_narrow_deg = 25.0
radius = 420.0
radius_narrow = 260.0
depth_falloff = 120.0

# Opacity and scale shrink by *_step per step of offset, never below *_floor.
opacity_step = 0.3
opacity_floor = 0.3
scale_step = 0.15
scale_floor = 0.7

# ---------------------------------------------------------------------------
# Tech-skill word sphere
# ---------------------------------------------------------------------------
[sphere]
# Size = clamp(viewport_width / divisor, min, max), desktop at or above the
# breakpoint, mobile below it.
breakpoint = 768.0
desktop_divisor = 4.0
desktop_min = 300.0
desktop_max = 500.0
mobile_divisor = 2.3
mobile_min = 200.0
mobile_max = 350.0
# Size rendered before the viewport is measured.
default_size = 300.0
# Rotation per animation frame, in radians.
speed = 0.004

# ---------------------------------------------------------------------------
# In-page navigation
# ---------------------------------------------------------------------------
[navigation]
# Sticky header height subtracted when scrolling to a #section.
header_offset = 100.0
# Delay before honoring the URL hash on load and on hashchange.
hash_scroll_delay_ms = 100
"##
}

/// Generate CSS custom properties from the color palette.
pub fn generate_color_css(colors: &ColorScheme) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-surface: {surface};
    --color-nav-bg: {nav_background};
    --color-border: {border};
}}"#,
        background = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        accent = colors.accent,
        surface = colors.surface,
        nav_background = colors.nav_background,
        border = colors.border,
    )
}

/// Generate CSS custom properties that must agree with runtime constants.
///
/// The card transition duration is emitted from the same value the
/// navigation lock uses, so the two cannot drift apart.
pub fn generate_motion_css(carousel: &CarouselConfig, navigation: &NavigationConfig) -> String {
    format!(
        r#":root {{
    --carousel-transition: {transition}ms;
    --header-offset: {offset}px;
}}"#,
        transition = carousel.transition_ms,
        offset = navigation.header_offset,
    )
}
