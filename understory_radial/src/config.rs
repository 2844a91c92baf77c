// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout configuration and the level-distance function.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Tunables for a radial layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadialConfig {
    /// Radial spacing between consecutive depth levels.
    ///
    /// Expected to be positive. Zero or negative values are not rejected; they
    /// produce degenerate radii.
    pub level_distance: f64,
    /// Exponent applied to the linear ring radius.
    ///
    /// `1.0` spaces rings evenly, larger values push outer rings apart, smaller
    /// values pull them together.
    pub radial_exponent: f64,
    /// Angular footprint used for nodes whose own footprint is smaller or missing.
    pub min_angular_width: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            level_distance: 100.0,
            radial_exponent: 1.0,
            min_angular_width: 5.0,
        }
    }
}

impl RadialConfig {
    /// Set [`RadialConfig::level_distance`].
    #[must_use]
    pub fn with_level_distance(mut self, level_distance: f64) -> Self {
        self.level_distance = level_distance;
        self
    }

    /// Set [`RadialConfig::radial_exponent`].
    #[must_use]
    pub fn with_radial_exponent(mut self, radial_exponent: f64) -> Self {
        self.radial_exponent = radial_exponent;
        self
    }

    /// Set [`RadialConfig::min_angular_width`].
    #[must_use]
    pub fn with_min_angular_width(mut self, min_angular_width: f64) -> Self {
        self.min_angular_width = min_angular_width;
        self
    }

    /// The level-distance function for this configuration.
    pub fn level_distance_fn(&self) -> LevelDistance {
        LevelDistance::new(self.level_distance, self.radial_exponent)
    }
}

/// Maps a node depth to a radius.
///
/// The value depends on depth alone, so every node of a level lands on the
/// same circle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LevelDistance {
    level_distance: f64,
    radial_exponent: f64,
}

impl LevelDistance {
    /// Create a level-distance function.
    pub const fn new(level_distance: f64, radial_exponent: f64) -> Self {
        Self {
            level_distance,
            radial_exponent,
        }
    }

    /// `((depth + 1) * level_distance) ^ radial_exponent`.
    ///
    /// Position assignment evaluates this on a parent, which makes it the radius
    /// of the ring holding that parent's children. A node at depth `d > 0` thus
    /// sits at `(d * level_distance) ^ radial_exponent`.
    pub fn radius(&self, depth: usize) -> f64 {
        ((depth + 1) as f64 * self.level_distance).powf(self.radial_exponent)
    }

    /// Radius of the ring a node at `depth` is placed on; the root sits at the origin.
    pub fn ring(&self, depth: usize) -> f64 {
        match depth {
            0 => 0.0,
            d => self.radius(d - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_exponent_spaces_rings_evenly() {
        let f = RadialConfig::default().level_distance_fn();
        assert_eq!(f.radius(0), 100.0);
        assert_eq!(f.radius(1), 200.0);
        assert_eq!(f.radius(4), 500.0);
        assert_eq!(f.ring(0), 0.0);
        assert_eq!(f.ring(1), 100.0);
    }

    #[test]
    fn exponent_expands_outer_levels() {
        let f = RadialConfig::default()
            .with_level_distance(10.0)
            .with_radial_exponent(2.0)
            .level_distance_fn();
        assert_eq!(f.radius(0), 100.0);
        assert_eq!(f.radius(1), 400.0);
        assert!(f.radius(2) - f.radius(1) > f.radius(1) - f.radius(0));
    }

    #[test]
    fn builder_setters_apply() {
        let cfg = RadialConfig::default()
            .with_level_distance(42.0)
            .with_radial_exponent(0.5)
            .with_min_angular_width(1.0);
        assert_eq!(cfg.level_distance, 42.0);
        assert_eq!(cfg.radial_exponent, 0.5);
        assert_eq!(cfg.min_angular_width, 1.0);
    }
}
