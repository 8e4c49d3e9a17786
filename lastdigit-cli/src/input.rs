//! Reading config and canvas files (plain JSON, or gzipped when the name
//! ends in `.gz`).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;

use lastdigit_core::{BoardConfig, CanvasData, CanvasInput, Raster};

fn open(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = open(path)?;
    serde_json::from_reader(reader).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_config(path: Option<&Path>) -> Result<BoardConfig> {
    match path {
        Some(path) => read_json(path),
        None => Ok(BoardConfig::default()),
    }
}

/// Vector canvas JSON by default; `raster` selects `{width, height, data}`.
pub fn load_canvas(path: &Path, raster: bool) -> Result<CanvasInput> {
    if raster {
        let raster: Raster = read_json(path)?;
        Ok(raster.into())
    } else {
        let data: CanvasData = read_json(path)?;
        Ok(data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lastdigit-{}-{}", std::process::id(), name))
    }

    #[test]
    fn plain_and_gzipped() {
        let json = r#"{"objects": [{"type": "path", "path": [["M", 250, 50], ["L", 250, 450]]}]}"#;

        let plain = temp_path("canvas.json");
        std::fs::write(&plain, json).unwrap();
        let input = load_canvas(&plain, false).unwrap();
        assert!(!input.is_empty());

        let gz = temp_path("canvas.json.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(json.as_bytes()).unwrap();
        encoder.finish().unwrap();
        assert_eq!(load_canvas(&gz, false).unwrap(), input);

        std::fs::remove_file(plain).unwrap();
        std::fs::remove_file(gz).unwrap();
    }

    #[test]
    fn raster_file() {
        let path = temp_path("raster.json");
        std::fs::write(&path, r#"{"width": 1, "height": 1, "data": [0, 0, 0, 255]}"#).unwrap();
        let input = load_canvas(&path, true).unwrap();
        assert!(matches!(input, CanvasInput::Raster(_)));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn raster_size_mismatch_is_an_error() {
        let path = temp_path("short-raster.json");
        std::fs::write(&path, r#"{"width": 4611686018427387904, "height": 500, "data": [0, 0, 0, 255]}"#).unwrap();
        let err = load_canvas(&path, true).unwrap_err();
        assert!(err.to_string().contains("short-raster.json"));
        assert!(format!("{:#}", err).contains("too large"), "{:#}", err);

        std::fs::write(&path, r#"{"width": 2, "height": 1, "data": [0, 0, 0, 255]}"#).unwrap();
        let err = load_canvas(&path, true).unwrap_err();
        assert!(format!("{:#}", err).contains("needs 8 bytes, got 4"), "{:#}", err);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn errors_name_the_file() {
        let missing = temp_path("missing.json");
        let err = load_canvas(&missing, false).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
        assert_eq!(load_config(None).unwrap(), BoardConfig::default());
    }
}
