//! Resolved carousel tuning.
//!
//! [`CarouselParams`] is built from the `[carousel]` config section and is
//! the only input the state machine and layout math read. Keeping it separate
//! from the serde config type lets tests construct parameters directly.

use super::Millis;
use crate::config::{CarouselConfig, SiteConfig};

/// Placement geometry for one viewport class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Rotation per step of offset, in degrees.
    pub angle_step_deg: f64,
    /// Radius of the circle cards are placed on.
    pub radius: f64,
    /// Extra depth pushed back per step of offset.
    pub depth_falloff: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselParams {
    pub transition: Millis,
    pub wheel_threshold: f64,
    pub wheel_debounce: Millis,
    pub swipe_threshold: f64,
    pub visible_range: u32,
    pub interactive_range: u32,
    pub narrow_breakpoint: f64,
    pub wide: Geometry,
    pub narrow: Geometry,
    pub opacity_step: f64,
    pub opacity_floor: f64,
    pub scale_step: f64,
    pub scale_floor: f64,
}

impl CarouselParams {
    pub fn from_config(config: &CarouselConfig) -> Self {
        Self {
            transition: config.transition_ms,
            wheel_threshold: config.wheel_threshold,
            wheel_debounce: config.wheel_debounce_ms,
            swipe_threshold: config.swipe_threshold,
            visible_range: config.visible_range,
            interactive_range: config.interactive_range,
            narrow_breakpoint: config.narrow_breakpoint,
            wide: Geometry {
                angle_step_deg: config.angle_step_deg,
                radius: config.radius,
                depth_falloff: config.depth_falloff,
            },
            narrow: Geometry {
                angle_step_deg: config.angle_step_narrow_deg,
                radius: config.radius_narrow,
                depth_falloff: config.depth_falloff,
            },
            opacity_step: config.opacity_step,
            opacity_floor: config.opacity_floor,
            scale_step: config.scale_step,
            scale_floor: config.scale_floor,
        }
    }

    pub fn from_site_config(config: &SiteConfig) -> Self {
        Self::from_config(&config.carousel)
    }

    /// Geometry for a viewport of the given width.
    pub fn geometry_for(&self, viewport_width: f64) -> Geometry {
        if viewport_width < self.narrow_breakpoint {
            self.narrow
        } else {
            self.wide
        }
    }

    /// Opacity for a card `distance` steps from the center.
    pub fn opacity_at(&self, distance: u32) -> f64 {
        (1.0 - distance as f64 * self.opacity_step).max(self.opacity_floor)
    }

    /// Scale for a card `distance` steps from the center.
    pub fn scale_at(&self, distance: u32) -> f64 {
        (1.0 - distance as f64 * self.scale_step).max(self.scale_floor)
    }
}

impl Default for CarouselParams {
    fn default() -> Self {
        Self::from_config(&CarouselConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_config() {
        let p = CarouselParams::default();
        assert_eq!(p.transition, 700);
        assert_eq!(p.wheel_threshold, 60.0);
        assert_eq!(p.wheel_debounce, 150);
        assert_eq!(p.swipe_threshold, 50.0);
        assert_eq!(p.visible_range, 2);
        assert_eq!(p.interactive_range, 1);
    }

    #[test]
    fn narrow_viewport_uses_smaller_step() {
        let p = CarouselParams::default();
        assert!(p.geometry_for(375.0).angle_step_deg < p.geometry_for(1280.0).angle_step_deg);
        assert_eq!(p.geometry_for(768.0), p.wide);
        assert_eq!(p.geometry_for(767.9), p.narrow);
    }

    #[test]
    fn opacity_and_scale_are_floored() {
        let p = CarouselParams::default();
        assert_eq!(p.opacity_at(0), 1.0);
        assert_eq!(p.scale_at(0), 1.0);
        assert_eq!(p.opacity_at(10), 0.3);
        assert_eq!(p.scale_at(10), 0.7);
    }

    #[test]
    fn opacity_and_scale_decay_monotonically() {
        let p = CarouselParams::default();
        for d in 0..6 {
            assert!(p.opacity_at(d + 1) <= p.opacity_at(d));
            assert!(p.scale_at(d + 1) <= p.scale_at(d));
        }
    }
}
