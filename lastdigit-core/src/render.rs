//! SVG rendering of the digit board and graded drawings.
//!
//! Every render builds a fresh document from the layout and the grade; no
//! previously rendered output is reused.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use crate::{config::BoardConfig, digit::Digit, grade::Grade, layout::Layout, segment::Segment};

/// Colours for the three kinds of overlay segment.
#[derive(Debug, Clone)]
pub struct Palette {
    pub expected: &'static str,
    pub correct: &'static str,
    pub incorrect: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            expected: "#4daf4a",  // green
            correct: "#377eb8",   // blue
            incorrect: "#e41a1c", // red
        }
    }
}

const OUTLINE_WIDTH: f64 = 3.;
const EXPECTED_WIDTH: f64 = 4.;
const OBSERVED_WIDTH: f64 = 6.;
const EXPECTED_OPACITY: f64 = 0.5;
const FONT_SIZE: f64 = 18.;

/// The bare board: circle outline plus the ten digit labels.
pub struct BoardSvg<'a> {
    pub config: &'a BoardConfig,
    pub layout: &'a Layout,
    /// Reference overlay drawn under the labels
    pub expected: Option<&'a BTreeSet<Segment>>,
    pub palette: Palette,
}

impl<'a> BoardSvg<'a> {
    pub fn new(config: &'a BoardConfig, layout: &'a Layout) -> Self {
        BoardSvg { config, layout, expected: None, palette: Palette::default() }
    }

    pub fn with_expected(self, expected: &'a BTreeSet<Segment>) -> Self {
        BoardSvg { expected: Some(expected), ..self }
    }
}

/// Board, expected overlay, and the observed segments coloured by outcome.
pub struct GradeSvg<'a> {
    pub config: &'a BoardConfig,
    pub layout: &'a Layout,
    pub expected: &'a BTreeSet<Segment>,
    pub grade: &'a Grade,
    pub palette: Palette,
}

impl<'a> GradeSvg<'a> {
    pub fn new(config: &'a BoardConfig, layout: &'a Layout, expected: &'a BTreeSet<Segment>, grade: &'a Grade) -> Self {
        GradeSvg { config, layout, expected, grade, palette: Palette::default() }
    }
}

fn header(f: &mut Formatter<'_>, size: f64) -> fmt::Result {
    writeln!(
        f,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
    )?;
    writeln!(f, r#"  <rect x="0" y="0" width="{size}" height="{size}" fill="white"/>"#)
}

fn outline(f: &mut Formatter<'_>, layout: &Layout) -> fmt::Result {
    let c = layout.center();
    writeln!(
        f,
        r#"  <circle cx="{}" cy="{}" r="{}" fill="none" stroke="black" stroke-width="{}"/>"#,
        c.x, c.y, layout.radius(), OUTLINE_WIDTH,
    )
}

fn labels(f: &mut Formatter<'_>, layout: &Layout) -> fmt::Result {
    for digit in Digit::ALL {
        let p = layout.point(digit);
        writeln!(
            f,
            r#"  <text x="{:.2}" y="{:.2}" font-size="{}" text-anchor="middle" dominant-baseline="central" fill="black">{}</text>"#,
            p.x, p.y, FONT_SIZE, digit,
        )?;
    }
    Ok(())
}

fn segments<'s>(
    f: &mut Formatter<'_>,
    layout: &Layout,
    segments: impl IntoIterator<Item = &'s Segment>,
    color: &str,
    width: f64,
    opacity: f64,
) -> fmt::Result {
    for s in segments {
        let a = layout.point(s.lo());
        let b = layout.point(s.hi());
        writeln!(
            f,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-opacity="{}" stroke-linecap="round" data-segment="{}-{}"/>"#,
            a.x, a.y, b.x, b.y, color, width, opacity, s.lo(), s.hi(),
        )?;
    }
    Ok(())
}

fn footer(f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "</svg>")
}

impl Display for BoardSvg<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        header(f, self.config.size)?;
        outline(f, self.layout)?;
        if let Some(expected) = self.expected {
            segments(f, self.layout, expected, self.palette.expected, EXPECTED_WIDTH, EXPECTED_OPACITY)?;
        }
        labels(f, self.layout)?;
        footer(f)
    }
}

impl Display for GradeSvg<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        header(f, self.config.size)?;
        outline(f, self.layout)?;
        segments(f, self.layout, self.expected, self.palette.expected, EXPECTED_WIDTH, EXPECTED_OPACITY)?;
        segments(f, self.layout, &self.grade.correct, self.palette.correct, OBSERVED_WIDTH, 1.)?;
        segments(f, self.layout, &self.grade.incorrect, self.palette.incorrect, OBSERVED_WIDTH, 1.)?;
        labels(f, self.layout)?;
        writeln!(
            f,
            r#"  <text x="{}" y="{}" font-size="{}" text-anchor="end" fill="black">{}</text>"#,
            self.config.size - 10.,
            self.config.size - 10.,
            FONT_SIZE,
            self.grade.summary(),
        )?;
        footer(f)
    }
}
