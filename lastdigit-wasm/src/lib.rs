//! WASM bindings for the last-digit multiplication circle.
//!
//! A browser front-end owns the drawing canvas; these bindings supply the
//! board geometry, the expected path, and grading of exported drawings.

use lastdigit_core::{
    path, sequence, BoardConfig, BoardSvg, CanvasInput, Factor, GradeSvg, Session,
};
use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "off", "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: Option<String>) -> Result<(), JsError> {
    let level = lastdigit_core::parse_log_level(level.as_deref())?;
    log::set_max_level(level);
    Ok(())
}

fn factor(value: u8) -> Result<Factor, JsError> {
    Ok(Factor::try_from(value)?)
}

fn config(value: JsValue) -> Result<BoardConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        Ok(BoardConfig::default())
    } else {
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}

fn session(factor_value: u8, config_value: JsValue) -> Result<Session, JsError> {
    Ok(Session::new(config(config_value)?).with_factor(factor(factor_value)?))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

/// Last digits of `factor·1 … factor·9`.
///
/// # Errors
/// If `factor` is outside 1–9.
#[wasm_bindgen]
pub fn sequence(factor_value: u8) -> Result<Vec<u8>, JsError> {
    let f = factor(factor_value)?;
    Ok(sequence::generate(f).into_iter().map(u8::from).collect())
}

/// The closed walk from 0 back to 0, as digits, starting at 0.
#[wasm_bindgen]
pub fn cycle(factor_value: u8) -> Result<Vec<u8>, JsError> {
    let f = factor(factor_value)?;
    Ok(sequence::cycle(f).into_iter().map(u8::from).collect())
}

/// Heading text, e.g. `0 → 6 → 2 → 8 → 4 → 0`.
#[wasm_bindgen]
pub fn describe_cycle(factor_value: u8) -> Result<String, JsError> {
    Ok(sequence::describe_cycle(factor(factor_value)?))
}

/// Digit positions `{center, radius, points}` for a [`BoardConfig`]
/// (`undefined` for defaults).
#[wasm_bindgen]
pub fn layout(config_value: JsValue) -> Result<JsValue, JsError> {
    to_js(&config(config_value)?.layout())
}

/// Expected segments as `[lo, hi]` pairs, honouring the config's loop policy.
#[wasm_bindgen]
pub fn expected_segments(factor_value: u8, config_value: JsValue) -> Result<JsValue, JsError> {
    let config = config(config_value)?;
    let seq = sequence::generate(factor(factor_value)?);
    to_js(&path::expected_segments(&seq, config.policy))
}

/// Grades a drawing.
///
/// # Arguments
/// * `canvas` - `{kind: "paths", objects}` as exported by the canvas widget,
///   or `{kind: "raster", width, height, data}` for its RGBA image data.
///
/// # Returns
/// A `Report`, or throws "draw something first" when the canvas is empty.
#[wasm_bindgen]
pub fn grade(factor_value: u8, config_value: JsValue, canvas: JsValue) -> Result<JsValue, JsError> {
    let session = session(factor_value, config_value)?;
    let canvas: CanvasInput = serde_wasm_bindgen::from_value(canvas)?;
    let grade = session.grade(&canvas)?;
    to_js(&grade.report())
}

/// SVG of the bare board, optionally with the expected path overlaid.
#[wasm_bindgen]
pub fn render_board(factor_value: u8, config_value: JsValue, show_path: bool) -> Result<String, JsError> {
    let session = session(factor_value, config_value)?;
    let layout = session.layout();
    let expected = session.expected();
    let board = BoardSvg::new(session.config(), &layout);
    let board = if show_path { board.with_expected(&expected) } else { board };
    Ok(board.to_string())
}

/// SVG of a graded drawing: expected path, correct and incorrect segments.
#[wasm_bindgen]
pub fn render_grade(factor_value: u8, config_value: JsValue, canvas: JsValue) -> Result<String, JsError> {
    let session = session(factor_value, config_value)?;
    let canvas: CanvasInput = serde_wasm_bindgen::from_value(canvas)?;
    let grade = session.grade(&canvas)?;
    let layout = session.layout();
    let expected = session.expected();
    Ok(GradeSvg::new(session.config(), &layout, &expected, &grade).to_string())
}
