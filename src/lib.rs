//! Pane Diff library
//!
//! Two editable text panels that toggle into a side-by-side or inline diff view.
//! The binary in `main.rs` wires these modules into an eframe window.

pub mod app;
pub mod config;
pub mod constant;
pub mod diff;
pub mod highlight;
pub mod language;
pub mod loader;
pub mod seed;
pub mod stringify;
pub mod style;
pub mod ui;
pub mod workspace;
