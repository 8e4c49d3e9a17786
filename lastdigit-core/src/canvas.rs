//! Drawing data as delivered by a canvas widget.
//!
//! Two shapes are accepted:
//! - vector paths (`{"objects": [{"type": "path", "path": [["M", x, y], …]}]}`)
//! - an RGBA raster of the drawing layer

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{error::RasterError, r2::R2};

/// One continuous user-drawn line.
pub type Stroke = Vec<R2<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CanvasInput {
    Paths(CanvasData),
    Raster(Raster),
}

impl CanvasInput {
    /// Whether the user drew anything at all.
    pub fn is_empty(&self) -> bool {
        match self {
            CanvasInput::Paths(data) => data.objects.is_empty(),
            CanvasInput::Raster(raster) => !raster.any_drawn(),
        }
    }
}

impl From<CanvasData> for CanvasInput {
    fn from(data: CanvasData) -> Self {
        CanvasInput::Paths(data)
    }
}

impl From<Raster> for CanvasInput {
    fn from(raster: Raster) -> Self {
        CanvasInput::Raster(raster)
    }
}

/// Vector drawing data; unknown top-level fields (`version`, …) are ignored.
///
/// Entries of `objects` that aren't JSON objects are dropped, and a
/// missing or malformed `path` reads as empty, so one bad object never
/// rejects the rest of the drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasData {
    #[serde(default, deserialize_with = "lenient_objects")]
    pub objects: Vec<CanvasObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_path")]
    pub path: Vec<PathCommand>,
}

fn lenient_objects<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<CanvasObject>, D::Error> {
    let items = match Value::deserialize(d)? {
        Value::Array(items) => items,
        other => {
            debug!("ignoring non-array canvas objects: {}", other);
            return Ok(vec![]);
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<CanvasObject>(item) {
            Ok(object) => Some(object),
            Err(e) => {
                debug!("skipping malformed canvas object: {}", e);
                None
            }
        })
        .collect())
}

fn lenient_kind<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(kind) => kind,
        _ => String::new(),
    })
}

fn lenient_path<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<PathCommand>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(commands) => commands
            .into_iter()
            .map(|cmd| match cmd {
                Value::Array(raw) => PathCommand::from(raw),
                other => PathCommand::Other(vec![other]),
            })
            .collect(),
        other => {
            debug!("treating path {} as empty", other);
            vec![]
        }
    })
}

impl CanvasObject {
    pub fn path(commands: Vec<PathCommand>) -> Self {
        CanvasObject { kind: "path".to_string(), path: commands }
    }

    pub fn is_path(&self) -> bool {
        self.kind == "path"
    }

    /// Points visited by this object's path commands, in drawing order.
    pub fn stroke(&self) -> Stroke {
        self.path.iter().filter_map(PathCommand::end_point).collect()
    }
}

impl CanvasData {
    /// Strokes of every `path` object; other object kinds are skipped.
    pub fn strokes(&self) -> Vec<Stroke> {
        self.objects
            .iter()
            .filter(|o| {
                if !o.is_path() {
                    debug!("skipping canvas object of type {:?}", o.kind);
                }
                o.is_path()
            })
            .map(CanvasObject::stroke)
            .collect()
    }
}

/// A single SVG-style path command, e.g. `["M", 10, 20]`.
///
/// Parsing is lenient: anything that isn't a well-formed `M`, `L` or `Q`
/// command becomes [`PathCommand::Other`] and contributes no point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Value>", into = "Vec<Value>")]
pub enum PathCommand {
    MoveTo(R2<f64>),
    LineTo(R2<f64>),
    QuadTo { ctrl: R2<f64>, to: R2<f64> },
    Other(Vec<Value>),
}

impl PathCommand {
    pub fn end_point(&self) -> Option<R2<f64>> {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::QuadTo { to, .. } => Some(*to),
            PathCommand::Other(_) => None,
        }
    }
}

fn finite_point(x: &Value, y: &Value) -> Option<R2<f64>> {
    let p = R2::new(x.as_f64()?, y.as_f64()?);
    p.is_finite().then_some(p)
}

impl From<Vec<Value>> for PathCommand {
    fn from(raw: Vec<Value>) -> Self {
        let parsed = match raw.as_slice() {
            [Value::String(op), x, y] if op == "M" => finite_point(x, y).map(PathCommand::MoveTo),
            [Value::String(op), x, y] if op == "L" => finite_point(x, y).map(PathCommand::LineTo),
            [Value::String(op), cx, cy, x, y] if op == "Q" => finite_point(cx, cy)
                .zip(finite_point(x, y))
                .map(|(ctrl, to)| PathCommand::QuadTo { ctrl, to }),
            _ => None,
        };
        parsed.unwrap_or(PathCommand::Other(raw))
    }
}

impl From<PathCommand> for Vec<Value> {
    fn from(cmd: PathCommand) -> Self {
        match cmd {
            PathCommand::MoveTo(p) => vec!["M".into(), p.x.into(), p.y.into()],
            PathCommand::LineTo(p) => vec!["L".into(), p.x.into(), p.y.into()],
            PathCommand::QuadTo { ctrl, to } => vec!["Q".into(), ctrl.x.into(), ctrl.y.into(), to.x.into(), to.y.into()],
            PathCommand::Other(raw) => raw,
        }
    }
}

/// RGBA8 pixel buffer of the drawing layer, row-major.
///
/// A pixel counts as drawn when its alpha channel is non-zero. The buffer
/// always holds exactly `width × height` pixels; construction and
/// deserialization reject anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRaster")]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

#[derive(Deserialize)]
struct RawRaster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl TryFrom<RawRaster> for Raster {
    type Error = RasterError;

    fn try_from(raw: RawRaster) -> Result<Self, Self::Error> {
        Raster::new(raw.width, raw.height, raw.data)
    }
}

impl Raster {
    pub const CHANNELS: usize = 4;

    fn byte_len(width: usize, height: usize) -> Result<usize, RasterError> {
        width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(Self::CHANNELS))
            .ok_or(RasterError::TooLarge { width, height })
    }

    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = Self::byte_len(width, height)?;
        if data.len() != expected {
            return Err(RasterError::SizeMismatch { width, height, expected, len: data.len() });
        }
        Ok(Raster { width, height, data })
    }

    /// Fully transparent raster.
    pub fn blank(width: usize, height: usize) -> Result<Self, RasterError> {
        let len = Self::byte_len(width, height)?;
        Ok(Raster { width, height, data: vec![0; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Byte offset of pixel (`x`, `y`), or `None` when out of bounds.
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        y.checked_mul(self.width)?.checked_add(x)?.checked_mul(Self::CHANNELS)
    }

    /// Whether the pixel at column `x`, row `y` is drawn. Out-of-bounds
    /// coordinates are not.
    pub fn is_drawn(&self, x: usize, y: usize) -> bool {
        self.offset(x, y)
            .and_then(|start| self.data.get(start + 3))
            .is_some_and(|a| *a > 0)
    }

    pub fn any_drawn(&self) -> bool {
        self.data
            .chunks_exact(Self::CHANNELS)
            .take(self.width.saturating_mul(self.height))
            .any(|px| px[3] > 0)
    }

    /// Paint an opaque pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let Some(start) = self.offset(x, y) else { return };
        if let Some(px) = self.data.get_mut(start..start + Self::CHANNELS) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Rasterize a straight line of the given half-width, sampling every
    /// half pixel along it.
    pub fn draw_line(&mut self, from: R2<f64>, to: R2<f64>, half_width: f64, rgba: [u8; 4]) {
        let len = (to - from).norm();
        let steps = (len * 2.).ceil().max(1.) as usize;
        let hw = half_width.max(0.).ceil() as i64;
        for i in 0..=steps {
            let p = from + (to - from) * (i as f64 / steps as f64);
            for dy in -hw..=hw {
                for dx in -hw..=hw {
                    let x = p.x.round() as i64 + dx;
                    let y = p.y.round() as i64 + dy;
                    if x >= 0 && y >= 0 {
                        self.set(x as usize, y as usize, rgba);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS_JSON: &str = r#"{
        "version": "4.4.0",
        "objects": [
            {"type": "path", "stroke": "blue", "path": [["M", 250, 50], ["Q", 260, 60, 270, 80], ["L", 367.5, 88.2]]},
            {"type": "rect", "left": 10, "top": 10},
            {"type": "path", "path": [["M", 1, 2]]},
            {"type": "path", "path": [["C", 1, 2, 3, 4, 5, 6], ["M", "x", 2], ["L", 5, 6], ["L", 7, 8]]}
        ]
    }"#;

    #[test]
    fn parse_canvas_json() {
        let data: CanvasData = serde_json::from_str(CANVAS_JSON).unwrap();
        assert_eq!(data.objects.len(), 4);
        let strokes = data.strokes();
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[0], vec![R2::new(250., 50.), R2::new(270., 80.), R2::new(367.5, 88.2)]);
        assert_eq!(strokes[1], vec![R2::new(1., 2.)]);
        // Malformed commands contribute no point
        assert_eq!(strokes[2], vec![R2::new(5., 6.), R2::new(7., 8.)]);
    }

    #[test]
    fn other_commands_survive_serialization() {
        let raw = r#"[["C",1,2,3,4,5,6],["M",1.5,2.5]]"#;
        let cmds: Vec<PathCommand> = serde_json::from_str(raw).unwrap();
        assert!(matches!(cmds[0], PathCommand::Other(_)));
        assert_eq!(cmds[1], PathCommand::MoveTo(R2::new(1.5, 2.5)));
        assert_eq!(serde_json::to_string(&cmds).unwrap(), raw);
    }

    #[test]
    fn tagged_input() {
        let input: CanvasInput = serde_json::from_str(r#"{"kind": "paths", "objects": []}"#).unwrap();
        assert!(input.is_empty());
        let input: CanvasInput = serde_json::from_str(r#"{"kind": "raster", "width": 1, "height": 1, "data": [0, 0, 255, 255]}"#).unwrap();
        assert!(!input.is_empty());
    }

    #[test]
    fn malformed_objects_are_skipped() {
        let json = r#"{"objects": [
            {"type": "path", "path": null},
            {"type": "path", "path": ["M", 1, 2]},
            {"path": [["M", 3, 4]]},
            {"type": 7, "path": [["M", 3, 4]]},
            "not an object",
            {"type": "path", "path": [["M", 250, 50], "L", ["L", 250, 450]]}
        ]}"#;
        let data: CanvasData = serde_json::from_str(json).unwrap();
        assert_eq!(data.objects.len(), 5);
        assert!(data.objects[0].path.is_empty());
        assert!(data.objects[1].path.iter().all(|c| matches!(c, PathCommand::Other(_))));
        assert_eq!(data.objects[2].kind, "");
        assert_eq!(data.objects[3].kind, "");
        assert_eq!(
            data.strokes(),
            vec![vec![], vec![], vec![R2::new(250., 50.), R2::new(250., 450.)]],
        );

        let data: CanvasData = serde_json::from_str(r#"{"objects": {"type": "path"}}"#).unwrap();
        assert!(data.objects.is_empty());
    }

    #[test]
    fn raster_pixels() {
        let mut raster = Raster::blank(4, 3).unwrap();
        assert!(!raster.any_drawn());
        raster.set(3, 2, [0, 0, 255, 255]);
        raster.set(9, 9, [0, 0, 255, 255]);
        raster.set(usize::MAX, usize::MAX, [0, 0, 255, 255]);
        assert!(raster.is_drawn(3, 2));
        assert!(!raster.is_drawn(2, 3));
        assert!(!raster.is_drawn(4, 0));
        assert!(!raster.is_drawn(usize::MAX, 0));
        assert!(raster.any_drawn());
        assert_eq!(raster.data().len(), 4 * 3 * Raster::CHANNELS);
    }

    #[test]
    fn raster_size_is_validated() {
        assert_eq!(
            Raster::new(2, 2, vec![0, 0, 0, 255]),
            Err(RasterError::SizeMismatch { width: 2, height: 2, expected: 16, len: 4 }),
        );
        assert_eq!(
            Raster::new(1 << 62, 500, vec![0, 0, 0, 255]),
            Err(RasterError::TooLarge { width: 1 << 62, height: 500 }),
        );
        assert_eq!(Raster::blank(usize::MAX, 2), Err(RasterError::TooLarge { width: usize::MAX, height: 2 }));
        assert!(Raster::new(0, 0, vec![]).unwrap().data().is_empty());

        let huge = format!(r#"{{"kind": "raster", "width": {}, "height": 500, "data": [0, 0, 0, 255]}}"#, 1usize << 62);
        let err = serde_json::from_str::<CanvasInput>(&huge).unwrap_err();
        assert!(err.to_string().contains("too large"), "{}", err);
        let short = r#"{"width": 2, "height": 2, "data": [0, 0, 0, 255]}"#;
        assert!(serde_json::from_str::<Raster>(short).is_err());
    }

    #[test]
    fn raster_line() {
        let mut raster = Raster::blank(20, 20).unwrap();
        raster.draw_line(R2::new(2., 2.), R2::new(17., 17.), 1., [0, 0, 255, 255]);
        for i in 2..=17 {
            assert!(raster.is_drawn(i, i), "pixel {}", i);
        }
        assert!(!raster.is_drawn(17, 2));
    }
}
