//! Pin descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Character marking an inverted (active-low) segment of a pin name.
pub const INVERSION_MARKER: char = '~';

/// Identity of a pin within its package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Designator {
    /// Position rank of the pin on the physical package.
    pub rank: u32,

    /// Full pin number as printed in the datasheet (e.g. "1", "A12").
    pub fullname: String,
}

impl Designator {
    /// Creates a designator whose full name is the rank itself.
    #[must_use]
    pub fn from_rank(rank: u32) -> Self {
        Self {
            rank,
            fullname: rank.to_string(),
        }
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fullname)
    }
}

/// Electrical type of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinType {
    /// Power input.
    #[serde(rename = "PWR")]
    Power,
    /// Ground.
    #[serde(rename = "GND")]
    Ground,
    /// Must be left unconnected.
    #[serde(rename = "DNC")]
    DoNotConnect,
    /// Input.
    #[serde(rename = "I")]
    Input,
    /// Clock input.
    #[serde(rename = "ICLK")]
    InputClock,
    /// Output.
    #[serde(rename = "O")]
    Output,
    /// Clock output.
    #[serde(rename = "OCLK")]
    OutputClock,
    /// Tri-state output.
    #[serde(rename = "O3")]
    OutputTriState,
    /// Open collector output.
    #[serde(rename = "OCOL")]
    OutputOpenCollector,
    /// Open emitter output.
    #[serde(rename = "OEMT")]
    OutputOpenEmitter,
    /// Passive terminal.
    #[serde(rename = "OPSV")]
    OutputPassive,
    /// Power output.
    #[serde(rename = "OPWR")]
    OutputPower,
    /// Tri-state bidirectional.
    #[serde(rename = "B3")]
    BidirectionalTriState,
    /// Bidirectional.
    #[serde(rename = "B")]
    Bidirectional,
}

impl PinType {
    /// Returns the descriptor code of this type.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Power => "PWR",
            Self::Ground => "GND",
            Self::DoNotConnect => "DNC",
            Self::Input => "I",
            Self::InputClock => "ICLK",
            Self::Output => "O",
            Self::OutputClock => "OCLK",
            Self::OutputTriState => "O3",
            Self::OutputOpenCollector => "OCOL",
            Self::OutputOpenEmitter => "OEMT",
            Self::OutputPassive => "OPSV",
            Self::OutputPower => "OPWR",
            Self::BidirectionalTriState => "B3",
            Self::Bidirectional => "B",
        }
    }

    /// Whether the pin distributes power (supply, power output or ground).
    #[must_use]
    pub const fn is_power_distribution(&self) -> bool {
        matches!(self, Self::Power | Self::OutputPower | Self::Ground)
    }

    /// Whether the pin carries a clock.
    #[must_use]
    pub const fn is_clock(&self) -> bool {
        matches!(self, Self::InputClock | Self::OutputClock)
    }
}

impl fmt::Display for PinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Signal direction of a pin or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Into the component.
    In,
    /// Out of the component.
    Out,
    /// Both ways.
    Bi,
    /// No meaningful direction.
    #[default]
    None,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "IN"),
            Self::Out => write!(f, "OUT"),
            Self::Bi => write!(f, "BI"),
            Self::None => write!(f, "NONE"),
        }
    }
}

/// An atomic terminal of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pin {
    /// Pin name; segments between `~` markers are inverted.
    pub name: String,

    /// Pin identity.
    pub designator: Designator,

    /// Electrical type, if known.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub pin_type: Option<PinType>,

    /// Signal direction.
    #[serde(default)]
    pub direction: Direction,
}

impl Pin {
    /// Creates a pin whose designator full name is its rank.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        rank: u32,
        pin_type: Option<PinType>,
        direction: Direction,
    ) -> Self {
        Self {
            name: name.into(),
            designator: Designator::from_rank(rank),
            pin_type,
            direction,
        }
    }

    /// Replaces the designator.
    #[must_use]
    pub fn with_designator(mut self, designator: Designator) -> Self {
        self.designator = designator;
        self
    }

    /// Number of characters rendered for the name, inversion markers excluded.
    #[must_use]
    pub fn visible_name_len(&self) -> usize {
        self.name.chars().filter(|c| *c != INVERSION_MARKER).count()
    }

    /// Whether the electrical type is the given one.
    #[must_use]
    pub fn is(&self, pin_type: PinType) -> bool {
        self.pin_type == Some(pin_type)
    }
}
