//! symbol-layout: pin layout engine for rectangular schematic symbols
//!
//! This library turns a package descriptor (pins grouped by electrical
//! function, plus ungrouped pins) into schematic symbols: every pin assigned
//! to one side of a rectangle, with spacing, separators and text fields.
//!
//! # Architecture
//!
//! ```text
//! package JSON → Package → LayoutStrategy → Holder (+ Outline)
//!              → SymbolGenerator → SymbolDrawing → SymbolSet → JSON
//! ```
//!
//! # Modules
//!
//! - [`package`]: Package descriptor model and loading
//! - [`layout`]: Rails, holders and the layout strategies
//! - [`render`]: Geometric symbol drawings and symbol sets
//! - [`output`]: Batch processing of package sources
//! - [`config`]: Configuration loading and validation
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod layout;
pub mod output;
pub mod package;
pub mod render;
