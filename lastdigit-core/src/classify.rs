//! Map user drawings onto digit-pair segments.
//!
//! Vector strokes use their endpoints: each end snaps to the nearest digit.
//! Rasters only tell us which digits were *touched*; touched digits are
//! sorted by value and joined pairwise. That loses drawing order and can
//! report connections the user never drew (e.g. two separate strokes 1–5
//! and 3–7 read as 1–3, 3–5, 5–7); vector input should be preferred
//! whenever the widget provides it.

use std::collections::BTreeSet;

use itertools::Itertools;
use log::debug;

use crate::{
    canvas::{CanvasInput, Raster, Stroke},
    digit::Digit,
    distance::Distance,
    layout::Layout,
    r2::R2,
    segment::Segment,
};

/// Default touch radius (canvas units) for raster input.
pub const DEFAULT_PROXIMITY: f64 = 15.;

/// Observed segments for either input shape.
pub fn classify(input: &CanvasInput, layout: &Layout, proximity: f64) -> BTreeSet<Segment> {
    match input {
        CanvasInput::Paths(data) => endpoints(&data.strokes(), layout),
        CanvasInput::Raster(raster) => touches(raster, layout, proximity),
    }
}

/// Segment joining the digits nearest a stroke's first and last points.
///
/// `None` for strokes with fewer than two points, or whose ends snap to the
/// same digit.
pub fn stroke_segment(stroke: &[R2<f64>], layout: &Layout) -> Option<Segment> {
    let (first, last) = match stroke {
        [first, .., last] => (*first, *last),
        _ => {
            debug!("skipping stroke with {} point(s)", stroke.len());
            return None;
        }
    };
    let a = layout.nearest(first);
    let b = layout.nearest(last);
    let segment = Segment::new(a, b);
    if segment.is_none() {
        debug!("skipping stroke from {} to {}: both ends near {}", first, last, a);
    }
    segment
}

/// Endpoint strategy over an ordered list of strokes.
pub fn endpoints(strokes: &[Stroke], layout: &Layout) -> BTreeSet<Segment> {
    strokes
        .iter()
        .filter_map(|stroke| stroke_segment(stroke, layout))
        .collect()
}

/// Digits with a drawn pixel within `proximity` of their point, ascending.
pub fn touched_digits(raster: &Raster, layout: &Layout, proximity: f64) -> Vec<Digit> {
    let touched: Vec<Digit> = Digit::ALL
        .into_iter()
        .filter(|d| touches_point(raster, layout.point(*d), proximity))
        .collect();
    debug!("touched digits: {:?}", touched.iter().map(|d| **d).collect::<Vec<_>>());
    touched
}

/// Touch-clustering strategy: consecutive pairs of the sorted touched digits.
pub fn touches(raster: &Raster, layout: &Layout, proximity: f64) -> BTreeSet<Segment> {
    touched_digits(raster, layout, proximity)
        .into_iter()
        .tuple_windows()
        .filter_map(|(a, b)| Segment::new(a, b))
        .collect()
}

/// Scan only the bounding box of the disc around `center`.
fn touches_point(raster: &Raster, center: R2<f64>, proximity: f64) -> bool {
    if raster.width() == 0 || raster.height() == 0 || proximity.is_nan() || proximity < 0. {
        return false;
    }
    let clamp = |v: f64, max: usize| v.max(0.).min((max - 1) as f64) as usize;
    let x0 = clamp((center.x - proximity).floor(), raster.width());
    let x1 = clamp((center.x + proximity).ceil(), raster.width());
    let y0 = clamp((center.y - proximity).floor(), raster.height());
    let y1 = clamp((center.y + proximity).ceil(), raster.height());
    (y0..=y1).any(|y| {
        (x0..=x1).any(|x| {
            raster.is_drawn(x, y) && R2::new(x as f64, y as f64).distance(&center) <= proximity
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasData, CanvasObject, PathCommand};
    use test_log::test;

    const INK: [u8; 4] = [0, 0, 255, 255];

    fn d(v: u8) -> Digit {
        Digit::try_from(v).unwrap()
    }

    fn segs(pairs: &[(u8, u8)]) -> BTreeSet<Segment> {
        pairs.iter().map(|p| Segment::try_from(*p).unwrap()).collect()
    }

    /// A wobbly stroke between two digits, as a drawable canvas would emit it.
    fn path_between(layout: &Layout, a: u8, b: u8) -> CanvasObject {
        let from = layout.point(d(a)) + R2::new(6., -4.);
        let to = layout.point(d(b)) + R2::new(-5., 7.);
        let mid = (from + to) / 2. + R2::new(10., 10.);
        CanvasObject::path(vec![
            PathCommand::MoveTo(from),
            PathCommand::QuadTo { ctrl: from, to: mid },
            PathCommand::LineTo(to),
        ])
    }

    #[test]
    fn endpoint_strategy() {
        let layout = Layout::default();
        let data = CanvasData {
            objects: vec![
                path_between(&layout, 0, 6),
                path_between(&layout, 2, 6),
                path_between(&layout, 6, 2), // duplicate, reversed
                path_between(&layout, 3, 7),
            ],
        };
        let observed = classify(&data.into(), &layout, DEFAULT_PROXIMITY);
        assert_eq!(observed, segs(&[(0, 6), (2, 6), (3, 7)]));
    }

    #[test]
    fn skips_bad_strokes() {
        let layout = Layout::default();
        let strokes = vec![
            vec![],
            vec![layout.point(d(4))],
            // Both ends near 4
            vec![layout.point(d(4)), layout.center(), layout.point(d(4)) + R2::new(3., 3.)],
            vec![layout.point(d(8)), layout.point(d(4))],
        ];
        assert_eq!(endpoints(&strokes, &layout), segs(&[(4, 8)]));
        assert_eq!(stroke_segment(&strokes[1], &layout), None);
    }

    #[test]
    fn touch_strategy() {
        let layout = Layout::default();
        let mut raster = Raster::blank(500, 500).unwrap();
        raster.draw_line(layout.point(d(6)), layout.point(d(2)), 2., INK);
        assert_eq!(touched_digits(&raster, &layout, DEFAULT_PROXIMITY), vec![d(2), d(6)]);
        assert_eq!(touches(&raster, &layout, DEFAULT_PROXIMITY), segs(&[(2, 6)]));
    }

    #[test]
    fn touch_strategy_is_order_blind() {
        // Two separate strokes, 1–5 and 3–7, read as a chain over sorted digits
        let layout = Layout::default();
        let mut raster = Raster::blank(500, 500).unwrap();
        raster.draw_line(layout.point(d(1)), layout.point(d(5)), 1., INK);
        raster.draw_line(layout.point(d(3)), layout.point(d(7)), 1., INK);
        let input = CanvasInput::Raster(raster);
        assert_eq!(
            classify(&input, &layout, DEFAULT_PROXIMITY),
            segs(&[(1, 3), (3, 5), (5, 7)]),
        );
    }

    #[test]
    fn touch_requires_proximity() {
        let layout = Layout::default();
        let mut raster = Raster::blank(500, 500).unwrap();
        // 20px left of digit 0
        let p = layout.point(d(0)) + R2::new(-20., 0.);
        raster.set(p.x as usize, p.y as usize, INK);
        assert!(touched_digits(&raster, &layout, 15.).is_empty());
        assert_eq!(touched_digits(&raster, &layout, 25.), vec![d(0)]);
        // A single touched digit yields no segment
        assert!(touches(&raster, &layout, 25.).is_empty());
    }

    #[test]
    fn touch_edges() {
        let layout = Layout::new(R2::new(0., 0.), 10.);
        let mut raster = Raster::blank(3, 3).unwrap();
        raster.set(0, 0, INK);
        // Digits lie partly off-canvas; no panics, nothing out of reach
        assert!(touched_digits(&raster, &layout, 1.).is_empty());
        assert!(touched_digits(&Raster::blank(0, 0).unwrap(), &layout, 100.).is_empty());
        assert!(touched_digits(&raster, &layout, f64::NAN).is_empty());
    }
}
