//! Tech-skill word sphere.
//!
//! Skills are spread evenly over a sphere and slowly rotated; each word's
//! depth sets its projected scale and opacity so the sphere reads as 3D
//! without any scene graph. The build renders the initial projection and the
//! page runtime keeps rotating with the same math.
//!
//! ## Sizing
//!
//! The sphere diameter follows the viewport width:
//!
//! ```text
//! width >= breakpoint  →  clamp(width / desktop_divisor, desktop_min, desktop_max)
//! width <  breakpoint  →  clamp(width / mobile_divisor,  mobile_min,  mobile_max)
//! ```
//!
//! ## Placement
//!
//! Points follow a golden spiral, which keeps neighbouring words roughly
//! equidistant for any count:
//!
//! ```text
//! φ_k = acos(−1 + (2k + 1) / n)
//! θ_k = √(n·π) · φ_k
//! ```

use crate::config::SphereConfig;
use std::f64::consts::PI;

/// Sphere diameter for a viewport `width`.
///
/// The build renders at `default_size`; `sphereSize` in `static/site.js`
/// applies this same formula once the viewport is measured.
pub fn sphere_size(width: f64, config: &SphereConfig) -> f64 {
    if width >= config.breakpoint {
        (width / config.desktop_divisor).clamp(config.desktop_min, config.desktop_max)
    } else {
        (width / config.mobile_divisor).clamp(config.mobile_min, config.mobile_max)
    }
}

/// A point on the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One word's projected position, relative to the sphere center.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub word: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
    /// Stacking order; nearer words are drawn on top.
    pub z_index: i32,
}

impl Placement {
    pub fn style(&self) -> String {
        format!(
            "transform: translate(-50%, -50%) translate({x:.1}px, {y:.1}px) scale({scale:.3}); \
             opacity: {opacity:.3}; z-index: {z};",
            x = self.x,
            y = self.y,
            scale = self.scale,
            opacity = self.opacity,
            z = self.z_index,
        )
    }
}

#[derive(Debug, Clone)]
pub struct WordSphere {
    words: Vec<String>,
    points: Vec<Vec3>,
    radius: f64,
}

impl WordSphere {
    pub fn new(words: Vec<String>, size: f64) -> Self {
        let points = golden_spiral(words.len());
        Self {
            words,
            points,
            radius: size / 2.0,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Re-lay out for a new diameter, keeping the current orientation.
    /// Mirrored by the runtime's resize handler.
    pub fn resize(&mut self, size: f64) {
        self.radius = size / 2.0;
    }

    /// Rotate every point by `ax` radians about the x axis, then `ay` about y.
    /// The runtime applies the same step on every animation frame.
    pub fn rotate(&mut self, ax: f64, ay: f64) {
        let (sin_x, cos_x) = ax.sin_cos();
        let (sin_y, cos_y) = ay.sin_cos();
        for p in &mut self.points {
            let y = p.y * cos_x - p.z * sin_x;
            let z = p.y * sin_x + p.z * cos_x;
            let x = p.x * cos_y + z * sin_y;
            let z = -p.x * sin_y + z * cos_y;
            *p = Vec3 { x, y, z };
        }
    }

    /// Project every word onto the screen plane.
    ///
    /// Depth runs from `-1` (nearest) to `1` (farthest); perspective is
    /// `2 / (2 + z)`, so the nearest word is drawn at twice the size of one
    /// on the equator.
    pub fn project(&self) -> Vec<Placement> {
        self.words
            .iter()
            .zip(&self.points)
            .map(|(word, p)| {
                let per = 2.0 / (2.0 + p.z);
                Placement {
                    word: word.clone(),
                    x: p.x * self.radius * per,
                    y: p.y * self.radius * per,
                    scale: per,
                    opacity: (per * per - 0.25).clamp(0.1, 1.0),
                    z_index: ((1.0 - p.z) * 50.0).round() as i32,
                }
            })
            .collect()
    }
}

/// `n` points evenly spread over the unit sphere.
pub fn golden_spiral(n: usize) -> Vec<Vec3> {
    let count = n as f64;
    (0..n)
        .map(|k| {
            let phi = (-1.0 + (2.0 * k as f64 + 1.0) / count).acos();
            let theta = (count * PI).sqrt() * phi;
            Vec3 {
                x: theta.cos() * phi.sin(),
                y: theta.sin() * phi.sin(),
                z: phi.cos(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("skill-{i}")).collect()
    }

    #[test]
    fn desktop_size_is_quarter_width_clamped() {
        let config = SphereConfig::default();
        assert_eq!(sphere_size(1600.0, &config), 400.0);
        assert_eq!(sphere_size(800.0, &config), 300.0);
        assert_eq!(sphere_size(4000.0, &config), 500.0);
    }

    #[test]
    fn mobile_size_uses_mobile_bounds() {
        let config = SphereConfig::default();
        assert_eq!(sphere_size(360.0, &config), 200.0);
        let mid = sphere_size(600.0, &config);
        assert!((mid - 600.0 / 2.3).abs() < 1e-9);
    }

    #[test]
    fn breakpoint_width_counts_as_desktop() {
        let config = SphereConfig::default();
        assert_eq!(sphere_size(768.0, &config), 300.0);
    }

    #[test]
    fn spiral_points_lie_on_unit_sphere() {
        for p in golden_spiral(25) {
            let len = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
            assert!((len - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn spiral_spans_both_poles() {
        let points = golden_spiral(10);
        assert!(points.first().unwrap().z < -0.8);
        assert!(points.last().unwrap().z > 0.8);
    }

    #[test]
    fn empty_word_list_projects_nothing() {
        let sphere = WordSphere::new(vec![], 300.0);
        assert!(sphere.project().is_empty());
    }

    #[test]
    fn single_word_sits_on_equator() {
        let sphere = WordSphere::new(words(1), 300.0);
        assert!(sphere.points()[0].z.abs() < 1e-9);
        assert_eq!(sphere.project().len(), 1);
    }

    #[test]
    fn rotation_preserves_length() {
        let mut sphere = WordSphere::new(words(12), 300.0);
        sphere.rotate(0.3, -0.7);
        for p in sphere.points() {
            let len = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
            assert!((len - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn nearer_words_are_larger_and_on_top() {
        let sphere = WordSphere::new(words(20), 300.0);
        let placements = sphere.project();
        let nearest = sphere
            .points()
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.z.total_cmp(&b.1.z))
            .map(|(i, _)| i)
            .unwrap();
        let farthest = sphere
            .points()
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.z.total_cmp(&b.1.z))
            .map(|(i, _)| i)
            .unwrap();
        assert!(placements[nearest].scale > placements[farthest].scale);
        assert!(placements[nearest].opacity >= placements[farthest].opacity);
        assert!(placements[nearest].z_index > placements[farthest].z_index);
    }

    #[test]
    fn resize_scales_projection() {
        let mut sphere = WordSphere::new(words(6), 200.0);
        let before = sphere.project();
        sphere.resize(400.0);
        let after = sphere.project();
        for (a, b) in before.iter().zip(&after) {
            assert!((b.x - 2.0 * a.x).abs() < 1e-9);
            assert_eq!(a.scale, b.scale);
        }
    }

    #[test]
    fn resize_keeps_rotated_orientation() {
        let mut sphere = WordSphere::new(words(6), 300.0);
        sphere.rotate(0.4, 0.7);
        let rotated = sphere.points().to_vec();
        sphere.resize(500.0);
        assert_eq!(sphere.points(), rotated.as_slice());
        assert_eq!(sphere.radius(), 250.0);
    }
}
