//! Layout of one group of pins as an independent symbol unit.
//!
//! Pattern rules:
//!
//! | Pattern | West | East | North | South |
//! |---------|------|------|-------|-------|
//! | BUS (IN) | bus | | | |
//! | BUS (other) | | bus | | |
//! | AMPOP_IO | in0, gap, in1 | gap, out…, gap | | |
//! | AMPOP_VREF | | | in0 | in1 |
//! | POWER | in | | | out |
//! | GENERIC | in, others | out, bi | | |
//!
//! Generic groups are balanced: the shorter side gets filler gaps so that both
//! sides reach the same length. Pins of an `others` bucket are then routed by
//! electrical type, whatever the pattern.

use std::iter;

use tracing::{debug, warn};

use super::{Holder, LayoutResult, LayoutStrategy};
use crate::package::{Direction, Group, Pattern, Pin, PinType, Slots};

/// Lays out a single group.
#[derive(Debug, Clone, Copy)]
pub struct SingleGroupLayout<'a> {
    group: &'a Group,
}

impl<'a> SingleGroupLayout<'a> {
    /// Creates the strategy for a group.
    #[must_use]
    pub const fn new(group: &'a Group) -> Self {
        Self { group }
    }
}

impl<'a> LayoutStrategy<'a> for SingleGroupLayout<'a> {
    fn apply(&mut self) -> LayoutResult<Holder<'a>> {
        let group = self.group;
        let slots = &group.slots;
        let mut holder = Holder::new();

        match group.pattern {
            Pattern::Bus => place_bus(&mut holder, group),
            Pattern::AmpopIo => place_ampop_io(&mut holder, group),
            Pattern::AmpopVref => place_ampop_vref(&mut holder, group),
            Pattern::Power => place_power(&mut holder, slots),
            Pattern::Generic => place_balanced(&mut holder, slots),
        }

        if let Some(others) = slots.others.as_deref() {
            route_others(&mut holder, others);
        }

        debug!(
            group = %group.designator,
            pattern = %group.pattern,
            width = holder.width(),
            height = holder.height(),
            "Laid out group"
        );

        Ok(holder)
    }
}

/// Bus lines on one side: west for input buses, east otherwise.
pub(super) fn place_bus<'a>(holder: &mut Holder<'a>, group: &'a Group) {
    let bus = group.slots.bus();
    if group.direction == Direction::In {
        holder.west.push_pins(bus, false);
    } else {
        holder.east.push_pins(bus, false);
    }
}

/// Two inputs around a gap on west, outputs framed by gaps on east.
pub(super) fn place_ampop_io<'a>(holder: &mut Holder<'a>, group: &'a Group) {
    match group.slots.input() {
        [first, second, rest @ ..] => {
            holder.west.push([Some(first), None, Some(second)], false);
            if !rest.is_empty() {
                warn!(
                    group = %group.designator,
                    extra = rest.len(),
                    "AMPOP_IO group has more than two inputs, extra inputs placed below"
                );
                holder.west.push_pins(rest, true);
            }
        }
        inputs => {
            warn!(
                group = %group.designator,
                count = inputs.len(),
                "AMPOP_IO group needs two inputs"
            );
            holder.west.push_pins(inputs, false);
        }
    }

    let out = group.slots.out().iter().map(Some);
    holder
        .east
        .push(iter::once(None).chain(out).chain(iter::once(None)), false);
}

/// First reference input on north, second on south.
fn place_ampop_vref<'a>(holder: &mut Holder<'a>, group: &'a Group) {
    let inputs = group.slots.input();
    if inputs.len() != 2 {
        warn!(
            group = %group.designator,
            count = inputs.len(),
            "AMPOP_VREF group needs exactly two inputs"
        );
    }
    if let Some(pin) = inputs.first() {
        holder.north.push_single_pin(pin);
    }
    if let Some(pin) = inputs.get(1) {
        holder.south.push_single_pin(pin);
    }
}

/// Supply inputs on west, supply outputs on south.
pub(super) fn place_power<'a>(holder: &mut Holder<'a>, slots: &'a Slots) {
    holder.west.push_pins(slots.input(), false);
    holder.south.push_pins(slots.out(), false);
}

/// West gets `in` then `others`, east gets `out` then `bi`; the side expected
/// to be shorter is padded before its second block.
pub(super) fn place_balanced<'a>(holder: &mut Holder<'a>, slots: &'a Slots) {
    let west_separator = slots.input.is_some() && slots.others.is_some();
    let east_separator = slots.out.is_some() && slots.bi.is_some();
    let expected_west = slots.input().len() + slots.others().len() + usize::from(west_separator);
    let expected_east = slots.out().len() + slots.bi().len() + usize::from(east_separator);

    holder.west.push_pins(slots.input(), false);
    if west_separator {
        holder.west.push_gap();
    }
    holder
        .west
        .push_gaps(expected_east.saturating_sub(expected_west));
    holder.west.push_pins(slots.others(), false);

    holder.east.push_pins(slots.out(), false);
    if east_separator {
        holder.east.push_gap();
    }
    holder
        .east
        .push_gaps(expected_west.saturating_sub(expected_east));
    holder.east.push_pins(slots.bi(), false);
}

/// Routes unbucketed pins by electrical type.
///
/// Pass one sends everything but power and ground to east; pass two sends
/// power to west and ground to south. West and east get a single leading gap
/// when they already held pins before routing started.
fn route_others<'a>(holder: &mut Holder<'a>, others: &'a [Pin]) {
    let mut spacer_west = !holder.west.is_empty();
    let mut spacer_east = !holder.east.is_empty();

    for pin in others
        .iter()
        .filter(|p| !p.is(PinType::Power) && !p.is(PinType::Ground))
    {
        holder.east.push(iter::once(Some(pin)), spacer_east);
        spacer_east = false;
    }

    for pin in others {
        match pin.pin_type {
            Some(PinType::Power) => {
                holder.west.push(iter::once(Some(pin)), spacer_west);
                spacer_west = false;
            }
            Some(PinType::Ground) => holder.south.push_single_pin(pin),
            _ => {}
        }
    }
}
