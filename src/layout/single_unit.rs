//! Layout of a whole package as one functional symbol.
//!
//! # Placement Order
//!
//! 1. Ungrouped pins: supply inputs, inputs and supply outputs on north;
//!    grounds, do-not-connect, bidirectional and outputs on south. The shorter
//!    of the two rails is then centred against the longer one.
//! 2. Bidirectional groups (other than buses), spanning west and east. Only
//!    AMPOP_IO and POWER keep their own rule; every other pattern is balanced.
//! 3. Input groups on west.
//! 4. Output groups on east.
//! 5. Bidirectional buses, largest first, each on the shorter of west/east.
//!
//! Each block of groups is preceded by a gap and closed by an outline
//! checkpoint so that the renderer can draw separators between blocks.

use tracing::{debug, warn};

use super::single_group::{place_ampop_io, place_balanced, place_power};
use super::{Holder, LayoutError, LayoutResult, LayoutStrategy, Outline, Rail};
use crate::package::{Direction, Group, Package, Pattern, Pin, PinType};

/// Placement bucket of an ungrouped pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinClass {
    PowerIn,
    Input,
    PowerOut,
    Ground,
    DoNotConnect,
    Bidirectional,
    Output,
}

impl PinClass {
    /// Classifies by electrical type first, then by direction.
    const fn of(pin: &Pin) -> Option<Self> {
        match (pin.pin_type, pin.direction) {
            (Some(PinType::Power), _) => Some(Self::PowerIn),
            (Some(PinType::OutputPower), _) => Some(Self::PowerOut),
            (Some(PinType::Ground), _) => Some(Self::Ground),
            (Some(PinType::DoNotConnect), _) => Some(Self::DoNotConnect),
            (_, Direction::In) => Some(Self::Input),
            (_, Direction::Bi) => Some(Self::Bidirectional),
            (_, Direction::Out) => Some(Self::Output),
            (_, Direction::None) => None,
        }
    }
}

/// Groups partitioned by placement block, each in rank order.
#[derive(Debug, Default)]
struct GroupBlocks<'a> {
    bidirectional_bus: Vec<&'a Group>,
    bidirectional: Vec<&'a Group>,
    input: Vec<&'a Group>,
    output: Vec<&'a Group>,
}

/// Lays out a whole package in a single unit.
#[derive(Debug, Clone)]
pub struct SingleUnitLayout<'a> {
    package: &'a Package,
    outline: Outline,
    diagnostics: Vec<LayoutError>,
}

impl<'a> SingleUnitLayout<'a> {
    /// Creates the strategy for a package.
    #[must_use]
    pub const fn new(package: &'a Package) -> Self {
        Self {
            package,
            outline: Outline {
                through: Vec::new(),
                west: Vec::new(),
                east: Vec::new(),
            },
            diagnostics: Vec::new(),
        }
    }

    /// Separator checkpoints recorded by the last [`apply`](LayoutStrategy::apply).
    #[must_use]
    pub const fn outline(&self) -> &Outline {
        &self.outline
    }

    fn reject(&mut self, error: LayoutError) {
        warn!(package = %self.package.name, error = %error, "Dropping from layout");
        self.diagnostics.push(error);
    }

    fn place_ungrouped(&mut self, holder: &mut Holder<'a>) {
        let package = self.package;
        let mut north: [Vec<&'a Pin>; 3] = Default::default();
        let mut south: [Vec<&'a Pin>; 4] = Default::default();

        for pin in &package.ungrouped_pins {
            match PinClass::of(pin) {
                Some(PinClass::PowerIn) => north[0].push(pin),
                Some(PinClass::Input) => north[1].push(pin),
                Some(PinClass::PowerOut) => north[2].push(pin),
                Some(PinClass::Ground) => south[0].push(pin),
                Some(PinClass::DoNotConnect) => south[1].push(pin),
                Some(PinClass::Bidirectional) => south[2].push(pin),
                Some(PinClass::Output) => south[3].push(pin),
                None => self.reject(LayoutError::unsupported_pin(pin)),
            }
        }

        for block in north {
            holder.north.push(block.into_iter().map(Some), true);
        }
        for block in south {
            holder.south.push(block.into_iter().map(Some), true);
        }

        let length = holder.north.len().max(holder.south.len());
        holder.north.fill_to_length_centered(length);
        holder.south.fill_to_length_centered(length);
    }

    fn partition_groups(&mut self) -> GroupBlocks<'a> {
        let package = self.package;
        let mut blocks = GroupBlocks::default();
        for group in package.groups_by_rank() {
            match (group.direction, group.pattern) {
                (Direction::Bi, Pattern::Bus) => blocks.bidirectional_bus.push(group),
                (Direction::Bi, _) => blocks.bidirectional.push(group),
                (Direction::In, _) => blocks.input.push(group),
                (Direction::Out, _) => blocks.output.push(group),
                (Direction::None, _) => self.reject(LayoutError::unsupported_group(group)),
            }
        }
        blocks
    }

    fn place_bidirectional(&mut self, holder: &mut Holder<'a>, groups: &[&'a Group]) {
        self.outline.through.push(holder.west.len());
        for &group in groups {
            holder.west.push_gap();
            holder.east.push_gap();
            match group.pattern {
                Pattern::AmpopIo => place_ampop_io(holder, group),
                Pattern::Power => place_power(holder, &group.slots),
                // reference pins stay off north/south, which hold ungrouped pins
                Pattern::AmpopVref | Pattern::Bus | Pattern::Generic => {
                    place_balanced(holder, &group.slots);
                }
            }
            self.outline.through.push(holder.west.len());
        }
    }

    fn place_inputs(&mut self, holder: &mut Holder<'a>, groups: &[&'a Group]) {
        self.outline.west.push(holder.west.len());
        for &group in groups {
            holder.west.push_gap();
            push_one_sided(&mut holder.west, group, group.slots.input.as_deref());
            self.outline.west.push(holder.west.len());
        }
    }

    fn place_outputs(&mut self, holder: &mut Holder<'a>, groups: &[&'a Group]) {
        self.outline.east.push(holder.east.len());
        for &group in groups {
            holder.east.push_gap();
            push_one_sided(&mut holder.east, group, group.slots.out.as_deref());
            self.outline.east.push(holder.east.len());
        }
    }

    fn place_buses(&mut self, holder: &mut Holder<'a>, mut buses: Vec<&'a Group>) {
        // stable: equal sizes keep rank order
        buses.sort_by(|a, b| b.pin_count().cmp(&a.pin_count()));
        for group in buses {
            let (rail, outline) = if holder.west.len() <= holder.east.len() {
                (&mut holder.west, &mut self.outline.west)
            } else {
                (&mut holder.east, &mut self.outline.east)
            };
            rail.push_gap();
            rail.push_pins(group.slots.bus(), false);
            outline.push(rail.len());
        }
    }
}

/// Pushes a one-sided group: the bus of a bus group, otherwise the main
/// bucket followed by `others`.
fn push_one_sided<'a>(rail: &mut Rail<'a>, group: &'a Group, main: Option<&'a [Pin]>) {
    if group.pattern == Pattern::Bus {
        rail.push_pins(group.slots.bus(), false);
        return;
    }
    rail.push_pins(main.unwrap_or_default(), false);
    if main.is_some() && group.slots.others.is_some() {
        rail.push_gap();
    }
    rail.push_pins(group.slots.others(), false);
}

impl<'a> LayoutStrategy<'a> for SingleUnitLayout<'a> {
    fn apply(&mut self) -> LayoutResult<Holder<'a>> {
        self.outline = Outline::default();
        self.diagnostics.clear();

        let mut holder = Holder::new();
        self.place_ungrouped(&mut holder);

        let blocks = self.partition_groups();
        self.place_bidirectional(&mut holder, &blocks.bidirectional);
        self.place_inputs(&mut holder, &blocks.input);
        self.place_outputs(&mut holder, &blocks.output);
        self.place_buses(&mut holder, blocks.bidirectional_bus);

        holder.west.push_gap();
        holder.east.push_gap();

        debug!(
            package = %self.package.name,
            width = holder.width(),
            height = holder.height(),
            pins = holder.pin_count(),
            dropped = self.diagnostics.len(),
            "Laid out single unit"
        );

        Ok(holder)
    }

    fn diagnostics(&self) -> &[LayoutError] {
        &self.diagnostics
    }
}
