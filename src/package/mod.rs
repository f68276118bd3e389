//! Package descriptor model.
//!
//! A package describes one electronic component: its identity (name, prefix,
//! aliases, footprint, datasheet) and its pins, either ungrouped or organised
//! into ranked groups sharing an electrical pattern.
//!
//! # File Format
//!
//! Descriptors are JSON documents with snake_case keys:
//!
//! ```json
//! {
//!   "name": "lf347",
//!   "physical_layout": "DIP",
//!   "ungrouped_pins": [
//!     { "name": "VCC", "designator": { "rank": 4, "fullname": "4" }, "type": "PWR", "direction": "IN" }
//!   ],
//!   "grouped_pins": [
//!     { "designator": "A", "rank": 1, "pattern": "AMPOP_IO", "direction": "BI",
//!       "slots": { "in": [], "out": [] } }
//!   ]
//! }
//! ```
//!
//! The layout engine treats every value of this module as read-only.

mod pin;

pub use pin::{Designator, Direction, Pin, PinType};

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PackageError;

/// The electrical shape of a group of pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pattern {
    /// Address or data bus.
    Bus,
    /// Operational amplifier inputs and output.
    AmpopIo,
    /// Operational amplifier reference voltages.
    AmpopVref,
    /// Power supply block.
    Power,
    /// Anything else.
    #[default]
    Generic,
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "BUS"),
            Self::AmpopIo => write!(f, "AMPOP_IO"),
            Self::AmpopVref => write!(f, "AMPOP_VREF"),
            Self::Power => write!(f, "POWER"),
            Self::Generic => write!(f, "GENERIC"),
        }
    }
}

/// Pins of a group, pre-sorted into buckets by the descriptor.
///
/// A bucket that is `Some` is present even when it holds no pin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slots {
    /// Input pins.
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<Pin>>,

    /// Output pins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<Vec<Pin>>,

    /// Bidirectional pins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bi: Option<Vec<Pin>>,

    /// Bus lines, in bus order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus: Option<Vec<Pin>>,

    /// Pins the descriptor could not bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others: Option<Vec<Pin>>,
}

impl Slots {
    /// Returns the input bucket, or an empty slice when absent.
    #[must_use]
    pub fn input(&self) -> &[Pin] {
        self.input.as_deref().unwrap_or_default()
    }

    /// Returns the output bucket, or an empty slice when absent.
    #[must_use]
    pub fn out(&self) -> &[Pin] {
        self.out.as_deref().unwrap_or_default()
    }

    /// Returns the bidirectional bucket, or an empty slice when absent.
    #[must_use]
    pub fn bi(&self) -> &[Pin] {
        self.bi.as_deref().unwrap_or_default()
    }

    /// Returns the bus bucket, or an empty slice when absent.
    #[must_use]
    pub fn bus(&self) -> &[Pin] {
        self.bus.as_deref().unwrap_or_default()
    }

    /// Returns the others bucket, or an empty slice when absent.
    #[must_use]
    pub fn others(&self) -> &[Pin] {
        self.others.as_deref().unwrap_or_default()
    }

    /// Iterates over every pin of every bucket, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        [&self.input, &self.out, &self.bi, &self.bus, &self.others]
            .into_iter()
            .flatten()
            .flatten()
    }

    /// Total number of pins across all buckets.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.iter().count()
    }
}

/// A named, ranked collection of pins sharing one electrical pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    /// Group designator (e.g. "A", "ADDR").
    pub designator: String,

    /// Placement rank, lowest first.
    pub rank: u32,

    /// Human readable description.
    #[serde(default)]
    pub comment: String,

    /// Electrical pattern.
    #[serde(default)]
    pub pattern: Pattern,

    /// Overall directionality of the group.
    #[serde(default)]
    pub direction: Direction,

    /// Bucketed pins.
    #[serde(default)]
    pub slots: Slots,
}

impl Group {
    /// Creates an empty generic group.
    #[must_use]
    pub fn new(designator: impl Into<String>, rank: u32, comment: impl Into<String>) -> Self {
        Self {
            designator: designator.into(),
            rank,
            comment: comment.into(),
            pattern: Pattern::Generic,
            direction: Direction::None,
            slots: Slots::default(),
        }
    }

    /// Sets the pattern.
    #[must_use]
    pub const fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Sets the directionality.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Replaces the slots.
    #[must_use]
    pub fn with_slots(mut self, slots: Slots) -> Self {
        self.slots = slots;
        self
    }

    /// Total number of pins in the group.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.slots.pin_count()
    }
}

/// Package-level physical layout code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhysicalLayoutCode {
    /// Board edge connector.
    Brd,
    /// Dual in-line memory module (interleaved rows).
    Dim,
    /// Dual in-line package.
    Dip,
    /// Leaded chip carrier, pin 1 in the middle of a side.
    Lcc,
    /// Quad flat package, pin 1 in a corner.
    Qfp,
    /// Single in-line memory module.
    Sim,
    /// Single in-line package.
    Sip,
    /// Ball grid array.
    Bga,
    /// Pin grid array.
    Pga,
}

impl fmt::Display for PhysicalLayoutCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Brd => "BRD",
            Self::Dim => "DIM",
            Self::Dip => "DIP",
            Self::Lcc => "LCC",
            Self::Qfp => "QFP",
            Self::Sim => "SIM",
            Self::Sip => "SIP",
            Self::Bga => "BGA",
            Self::Pga => "PGA",
        };
        f.write_str(code)
    }
}

/// Description of an electronic component package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Package {
    /// Part name (e.g. "LF347").
    pub name: String,

    /// Reference prefix (e.g. "U").
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Alternative part names sharing the symbol.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Footprint reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footprint_designator: Option<String>,

    /// Datasheet URL or reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasheet: Option<String>,

    /// Physical layout of the package pins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_layout: Option<PhysicalLayoutCode>,

    /// Pins outside of any group.
    #[serde(default)]
    pub ungrouped_pins: Vec<Pin>,

    /// Groups of pins.
    #[serde(default)]
    pub grouped_pins: Vec<Group>,
}

fn default_prefix() -> String {
    "U".to_string()
}

impl Package {
    /// Creates a package with no pins.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: default_prefix(),
            aliases: Vec::new(),
            footprint_designator: None,
            datasheet: None,
            physical_layout: None,
            ungrouped_pins: Vec::new(),
            grouped_pins: Vec::new(),
        }
    }

    /// Parses a package descriptor from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or does not match the model.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Groups sorted by ascending rank; equal ranks keep descriptor order.
    #[must_use]
    pub fn groups_by_rank(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.grouped_pins.iter().collect();
        groups.sort_by_key(|g| g.rank);
        groups
    }

    /// Iterates over every pin of the package, ungrouped first.
    pub fn all_pins(&self) -> impl Iterator<Item = &Pin> {
        self.ungrouped_pins
            .iter()
            .chain(self.grouped_pins.iter().flat_map(|g| g.slots.iter()))
    }
}

/// Loads a package descriptor from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_package(path: &Path) -> Result<Package, PackageError> {
    let contents = std::fs::read_to_string(path).map_err(|e| PackageError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let package = Package::from_json_str(&contents).map_err(|e| PackageError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(
        path = %path.display(),
        package = %package.name,
        ungrouped = package.ungrouped_pins.len(),
        groups = package.grouped_pins.len(),
        "Loaded package"
    );

    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(name: &str, rank: u32) -> Pin {
        Pin::new(name, rank, Some(PinType::Input), Direction::In)
    }

    #[test]
    fn parse_minimal_package() {
        let package = Package::from_json_str(r#"{ "name": "NE555" }"#).unwrap();
        assert_eq!(package.name, "NE555");
        assert_eq!(package.prefix, "U");
        assert!(package.ungrouped_pins.is_empty());
        assert!(package.physical_layout.is_none());
    }

    #[test]
    fn parse_group_slots() {
        let json = r#"{
            "name": "LF347",
            "physical_layout": "DIP",
            "grouped_pins": [{
                "designator": "A",
                "rank": 1,
                "comment": "Amplifier A",
                "pattern": "AMPOP_IO",
                "direction": "BI",
                "slots": {
                    "in": [
                        { "name": "IN+", "designator": { "rank": 3, "fullname": "3" }, "type": "I", "direction": "IN" },
                        { "name": "IN-", "designator": { "rank": 2, "fullname": "2" }, "type": "I", "direction": "IN" }
                    ],
                    "out": [
                        { "name": "OUT", "designator": { "rank": 1, "fullname": "1" }, "type": "O", "direction": "OUT" }
                    ]
                }
            }]
        }"#;

        let package = Package::from_json_str(json).unwrap();
        assert_eq!(package.physical_layout, Some(PhysicalLayoutCode::Dip));
        let group = &package.grouped_pins[0];
        assert_eq!(group.pattern, Pattern::AmpopIo);
        assert_eq!(group.direction, Direction::Bi);
        assert_eq!(group.slots.input().len(), 2);
        assert_eq!(group.slots.out()[0].name, "OUT");
        assert!(group.slots.bi.is_none());
        assert_eq!(group.pin_count(), 3);
    }

    #[test]
    fn reject_unknown_slot() {
        let json = r#"{
            "name": "X",
            "grouped_pins": [{ "designator": "A", "rank": 1, "slots": { "inout": [] } }]
        }"#;
        assert!(Package::from_json_str(json).is_err());
    }

    #[test]
    fn present_but_empty_bucket_is_some() {
        let slots: Slots = serde_json::from_str(r#"{ "others": [] }"#).unwrap();
        assert!(slots.others.is_some());
        assert!(slots.others().is_empty());
    }

    #[test]
    fn groups_sorted_by_rank_are_stable() {
        let mut package = Package::new("X");
        package.grouped_pins = vec![
            Group::new("C", 3, ""),
            Group::new("A", 1, ""),
            Group::new("B1", 2, ""),
            Group::new("B2", 2, ""),
        ];
        let order: Vec<&str> = package
            .groups_by_rank()
            .iter()
            .map(|g| g.designator.as_str())
            .collect();
        assert_eq!(order, ["A", "B1", "B2", "C"]);
    }

    #[test]
    fn all_pins_visits_ungrouped_then_groups() {
        let mut package = Package::new("X");
        package.ungrouped_pins.push(pin("U1", 1));
        package.grouped_pins.push(Group::new("G", 1, "").with_slots(Slots {
            input: Some(vec![pin("G1", 2)]),
            bus: Some(vec![pin("G2", 3)]),
            ..Slots::default()
        }));
        let names: Vec<&str> = package.all_pins().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["U1", "G1", "G2"]);
    }

    #[test]
    fn layout_code_display_matches_serde() {
        let json = serde_json::to_string(&PhysicalLayoutCode::Lcc).unwrap();
        assert_eq!(json, "\"LCC\"");
        assert_eq!(PhysicalLayoutCode::Lcc.to_string(), "LCC");
    }
}
