//! Geometric rendering of laid out symbols.
//!
//! Turns holders produced by [`crate::layout`] into [`SymbolDrawing`]s: body
//! rectangles, positioned and directed pins, separator contours and text
//! fields, all in integer mils with the y axis pointing up.
//!
//! The drawing is format agnostic. Writing it in the syntax of a given CAD
//! tool is left to the consumer of the serialised drawing.
//!
//! # Generators
//!
//! - [`functional::FunctionalGenerator`]: whole package, single unit, by function
//! - [`functional::PhysicalGenerator`]: whole package, single unit, by pin position
//! - [`multi_unit::MultiUnitGenerator`]: one unit per group

pub mod functional;
pub mod multi_unit;
pub mod stack;
pub mod symbol_set;

pub use symbol_set::{SymbolSet, Variant, VariantFailure};

use serde::{Deserialize, Serialize};

use crate::layout::{LayoutResult, Side};
use crate::package::{Package, PinType};

/// Grid and pin dimensions, in mils.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metrics {
    /// Distance between two consecutive pins.
    #[serde(default = "default_spacing")]
    pub spacing: i32,

    /// Length of a pin.
    #[serde(default = "default_pin_length")]
    pub pin_length: i32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            pin_length: default_pin_length(),
        }
    }
}

const fn default_spacing() -> i32 {
    100
}

const fn default_pin_length() -> i32 {
    300
}

impl Metrics {
    /// Converts a number of grid units to mils.
    #[must_use]
    pub fn grid(&self, units: usize) -> i32 {
        i32::try_from(units).map_or(i32::MAX, |u| u.saturating_mul(self.spacing))
    }
}

/// An axis-aligned rectangle given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// First corner X.
    pub x1: i32,
    /// First corner Y.
    pub y1: i32,
    /// Opposite corner X.
    pub x2: i32,
    /// Opposite corner Y.
    pub y2: i32,
}

impl Rect {
    /// Creates a rectangle from two corners.
    #[must_use]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Graphical decoration of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinShape {
    /// Plain line.
    #[default]
    Line,
    /// Clock wedge.
    Clock,
}

/// A pin attached to a symbol body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPin {
    /// Pin name.
    pub name: String,
    /// Pin number (designator full name).
    pub number: String,
    /// Side of the body the pin leaves from.
    pub side: Side,
    /// X of the point where the pin touches the body.
    pub x: i32,
    /// Y of the point where the pin touches the body.
    pub y: i32,
    /// Pin length, outwards from the body.
    pub length: i32,
    /// Electrical type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_type: Option<PinType>,
    /// Decoration.
    #[serde(default)]
    pub shape: PinShape,
    /// Unit the pin belongs to; 0 means every unit.
    pub unit: u32,
}

impl PlacedPin {
    /// X and Y of the free end of the pin.
    #[must_use]
    pub const fn end(&self) -> (i32, i32) {
        match self.side {
            Side::North => (self.x, self.y + self.length),
            Side::East => (self.x + self.length, self.y),
            Side::South => (self.x, self.y - self.length),
            Side::West => (self.x - self.length, self.y),
        }
    }
}

/// Text style of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStyle {
    /// Regular.
    #[default]
    Normal,
    /// Bold.
    Bold,
}

/// A numbered text field of the symbol (reference, value, footprint, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field number: 0 reference, 1 value, 2 footprint, 3 datasheet.
    pub index: u8,
    /// Field content.
    pub text: String,
    /// Anchor X.
    pub x: i32,
    /// Anchor Y.
    pub y: i32,
    /// Whether the field is shown.
    pub visible: bool,
    /// Text style.
    pub style: FieldStyle,
}

/// A free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    /// Content.
    pub text: String,
    /// Anchor X.
    pub x: i32,
    /// Anchor Y.
    pub y: i32,
}

/// One drawable unit of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit number; 0 for single unit symbols.
    pub index: u32,
    /// Short description of the unit.
    pub title: String,
    /// Filled body rectangle.
    pub body: Rect,
    /// Separator contours between blocks of pins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contours: Vec<Rect>,
    /// Pins.
    pub pins: Vec<PlacedPin>,
    /// Free texts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<Text>,
}

/// A complete symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDrawing {
    /// Symbol name.
    pub name: String,
    /// Human readable title.
    pub title: String,
    /// Alternative names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Text fields.
    pub fields: Vec<Field>,
    /// Units, in order.
    pub units: Vec<Unit>,
    /// Pins or groups dropped while laying out.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SymbolDrawing {
    /// Number of units, at least one.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len().max(1)
    }

    /// Iterates over the pins of every unit.
    pub fn pins(&self) -> impl Iterator<Item = &PlacedPin> {
        self.units.iter().flat_map(|u| u.pins.iter())
    }
}

/// Generates one symbol variant from a package.
pub trait SymbolGenerator {
    /// Suffix appended to the package name.
    fn suffix(&self) -> &'static str;

    /// Human readable title.
    fn title(&self, package: &Package) -> String;

    /// Lays out and renders the symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the package cannot be laid out for this variant.
    fn generate(&self, package: &Package) -> LayoutResult<SymbolDrawing>;

    /// Symbol name: package name and suffix, upper case.
    fn symbol_name(&self, package: &Package) -> String {
        format!("{}{}", package.name, self.suffix()).to_uppercase()
    }

    /// Aliases with the suffix, upper case.
    fn aliases(&self, package: &Package) -> Vec<String> {
        package
            .aliases
            .iter()
            .map(|a| format!("{a}{}", self.suffix()).to_uppercase())
            .collect()
    }
}

/// Reference, value, footprint and datasheet fields stacked above `(x, y)`.
///
/// Only the reference and the value are visible.
#[must_use]
pub fn package_fields(package: &Package, x: i32, y: i32) -> Vec<Field> {
    let field = |index: u8, text: &str, dy: i32, visible: bool, style: FieldStyle| Field {
        index,
        text: text.to_string(),
        x,
        y: y + dy,
        visible,
        style,
    };

    let mut fields = vec![
        field(0, &package.prefix, 200, true, FieldStyle::Normal),
        field(1, &package.name, 100, true, FieldStyle::Bold),
    ];
    if let Some(footprint) = &package.footprint_designator {
        fields.push(field(2, footprint, 300, false, FieldStyle::Normal));
    }
    if let Some(datasheet) = &package.datasheet {
        fields.push(field(3, datasheet, 400, false, FieldStyle::Normal));
    }
    fields
}
