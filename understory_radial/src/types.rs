// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: epochs, polar positions, angular sectors, and node flags.

use core::f64::consts::TAU;

use kurbo::{Point, Vec2};

/// Handle for one tracked position state of a node.
///
/// A layout pass writes positions into every epoch it is asked to compute. Hosts
/// typically keep three: [`Epoch::CURRENT`] for what is on screen, and
/// [`Epoch::START`]/[`Epoch::END`] as the endpoints of an animated transition.
/// Any other value is a caller-defined epoch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epoch(pub u16);

impl Epoch {
    /// The position currently displayed.
    pub const CURRENT: Self = Self(0);
    /// Start of an animated transition.
    pub const START: Self = Self(1);
    /// End of an animated transition.
    pub const END: Self = Self(2);
    /// Epochs computed when a caller does not name any.
    pub const DEFAULT_SET: [Self; 3] = [Self::CURRENT, Self::START, Self::END];
}

/// A position in polar coordinates around the layout origin.
///
/// `theta` is in radians and is not normalized into any fixed range.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Polar {
    /// Angle in radians.
    pub theta: f64,
    /// Distance from the origin.
    pub rho: f64,
}

impl Polar {
    /// The layout origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a polar position.
    #[inline]
    pub const fn new(theta: f64, rho: f64) -> Self {
        Self { theta, rho }
    }

    /// Convert to a cartesian point.
    #[inline]
    pub fn to_point(self) -> Point {
        (Vec2::from_angle(self.theta) * self.rho).to_point()
    }

    /// Convert a cartesian point, normalizing `theta` into `[0, 2π)`.
    pub fn from_point(point: Point) -> Self {
        let v = point.to_vec2();
        Self::new(normalize_angle(v.atan2()), v.hypot())
    }

    /// Return this position rotated by `delta` radians around the origin.
    #[inline]
    #[must_use]
    pub fn rotated(self, delta: f64) -> Self {
        Self::new(self.theta + delta, self.rho)
    }
}

/// Map an angle returned by `atan2` (in `(-π, π]`) into `[0, 2π)`.
pub(crate) fn normalize_angle(theta: f64) -> f64 {
    if theta < 0.0 { theta + TAU } else { theta }
}

/// A contiguous angular sector `[begin, end]`, in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AngleSpan {
    /// Start angle.
    pub begin: f64,
    /// End angle; `begin <= end`.
    pub end: f64,
}

impl AngleSpan {
    /// The full circle `[0, 2π]`, allocated to the root.
    pub const FULL: Self = Self::new(0.0, TAU);

    /// Create a sector.
    #[inline]
    pub const fn new(begin: f64, end: f64) -> Self {
        Self { begin, end }
    }

    /// Angular extent of the sector.
    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.begin
    }

    /// Bisecting angle of the sector.
    #[inline]
    pub fn mid(&self) -> f64 {
        self.begin + self.width() / 2.0
    }

    /// Whether `theta` lies inside the sector, edges included.
    #[inline]
    pub fn contains(&self, theta: f64) -> bool {
        self.begin <= theta && theta <= self.end
    }
}

bitflags::bitflags! {
    /// Per-node flags kept in the layout side table.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Position assignment leaves this node where it is.
        ///
        /// A frozen node still counts toward its parent's partition, but it is
        /// neither moved nor given a new sector, so the angle it would have taken
        /// stays unused.
        const FROZEN = 0b0000_0001;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn polar_round_trips_through_points() {
        let p = Polar::new(3.0 * FRAC_PI_2, 50.0);
        let pt = p.to_point();
        assert!(approx(pt.x, 0.0), "x was {}", pt.x);
        assert!(approx(pt.y, -50.0), "y was {}", pt.y);

        let back = Polar::from_point(pt);
        assert!(approx(back.theta, 3.0 * FRAC_PI_2), "theta was {}", back.theta);
        assert!(approx(back.rho, 50.0), "rho was {}", back.rho);
    }

    #[test]
    fn from_point_normalizes_negative_angles() {
        let p = Polar::from_point(Point::new(0.0, -1.0));
        assert!(p.theta >= 0.0 && p.theta < TAU, "theta {} out of range", p.theta);
        assert!(approx(p.theta, 3.0 * FRAC_PI_2), "theta was {}", p.theta);
    }

    #[test]
    fn span_width_mid_contains() {
        let s = AngleSpan::new(PI, TAU);
        assert_eq!(s.width(), PI);
        assert_eq!(s.mid(), 3.0 * FRAC_PI_2);
        assert!(s.contains(PI));
        assert!(s.contains(TAU));
        assert!(!s.contains(0.0));
        assert_eq!(AngleSpan::FULL.width(), TAU);
    }

    #[test]
    fn default_flags_are_empty() {
        assert!(!NodeFlags::default().contains(NodeFlags::FROZEN));
    }
}
