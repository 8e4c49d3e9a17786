//! Ten digits evenly spaced on a circle.
//!
//! Coordinates are in screen space: the y-axis grows downward. Digit 0 sits
//! at 12 o'clock and digits increase clockwise, 36° apart.

use log::debug;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::{digit::Digit, distance::Distance, math::deg::Deg, r2::R2};

/// Angle (degrees, math orientation) of digit 0.
pub const START_DEG: f64 = 90.;
/// Angular spacing between consecutive digits, in degrees.
pub const STEP_DEG: f64 = 360. / Digit::COUNT as f64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    center: R2<f64>,
    radius: f64,
    points: [R2<f64>; Digit::COUNT],
}

impl Layout {
    pub fn new(center: R2<f64>, radius: f64) -> Self {
        let points = Digit::ALL.map(|d| Self::place(center, radius, d));
        debug!("layout: center {}, radius {}", center, radius);
        Layout { center, radius, points }
    }

    fn place(center: R2<f64>, radius: f64, digit: Digit) -> R2<f64> {
        center + R2::polar(Self::angle_of(digit)).flip_y() * radius
    }

    /// Math-orientation angle of `digit`, in radians.
    pub fn angle_of(digit: Digit) -> f64 {
        (START_DEG - digit.idx() as f64 * STEP_DEG).rad()
    }

    pub fn angle(&self, digit: Digit) -> f64 {
        Self::angle_of(digit)
    }

    pub fn center(&self) -> R2<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn point(&self, digit: Digit) -> R2<f64> {
        self.points[digit.idx()]
    }

    /// All ten points, indexed by digit.
    pub fn points(&self) -> &[R2<f64>; Digit::COUNT] {
        &self.points
    }

    /// Digit whose point is closest to `p`; ties go to the lower digit.
    pub fn nearest(&self, p: R2<f64>) -> Digit {
        Digit::ALL
            .into_iter()
            .min_by_key(|d| OrderedFloat(self.point(*d).distance(&p)))
            .unwrap_or(Digit::ZERO)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new(R2::new(250., 250.), 200.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u8) -> Digit {
        Digit::try_from(v).unwrap()
    }

    #[test]
    fn on_circle() {
        let layout = Layout::new(R2::new(10., -3.), 7.5);
        for p in layout.points() {
            assert_relative_eq!(p.distance(&layout.center()), 7.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn spacing() {
        let layout = Layout::default();
        for i in 0..9u8 {
            let delta = layout.angle(d(i)) - layout.angle(d(i + 1));
            assert_relative_eq!(delta.deg(), 36., epsilon = 1e-9);

            // Same spacing measured from the points themselves (chord length)
            let chord = layout.point(d(i)).distance(&layout.point(d(i + 1)));
            assert_relative_eq!(chord, 2. * 200. * 18f64.rad().sin(), epsilon = 1e-9);
        }
    }

    #[test]
    fn screen_orientation() {
        let layout = Layout::default();
        assert_abs_diff_eq!(layout.point(d(0)), R2::new(250., 50.), epsilon = 1e-9);
        assert_abs_diff_eq!(layout.point(d(5)), R2::new(250., 450.), epsilon = 1e-9);
        // Clockwise on screen: 1 is upper-right, 3 lower-right, 8 upper-left
        let p1 = layout.point(d(1));
        assert!(p1.x > 250. && p1.y < 250.);
        let p3 = layout.point(d(3));
        assert!(p3.x > 250. && p3.y > 250.);
        let p8 = layout.point(d(8));
        assert!(p8.x < 250. && p8.y < 250.);
    }

    #[test]
    fn nearest() {
        let layout = Layout::default();
        for digit in Digit::ALL {
            assert_eq!(layout.nearest(layout.point(digit)), digit);
            let nudged = layout.point(digit) + R2::new(12., -9.);
            assert_eq!(layout.nearest(nudged), digit);
        }
        // Far outside, up and to the left: 9 (126°) beats 8 (162°)
        assert_eq!(layout.nearest(R2::new(-1000., -800.)), d(9));
    }
}
