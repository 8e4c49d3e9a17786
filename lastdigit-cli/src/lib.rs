//! CLI and server for the last-digit multiplication circle.
//!
//! Provides:
//! - Sequence and expected-path listings from the command line
//! - SVG rendering of the board and of graded drawings
//! - WebSocket server for browser front-ends

pub mod input;
pub mod server;
