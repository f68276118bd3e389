//! Conversion of a rail into positioned pins.

use super::{Metrics, PinShape, PlacedPin};
use crate::layout::{Rail, Side};
use crate::package::{Pin, PinType};

/// Per-stack pin attributes that do not come from the pin itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackStyle {
    /// Unit the pins belong to.
    pub unit: u32,
    /// Replace every electrical type with passive.
    pub force_passive: bool,
}

/// Places the pins of `rail` along `side`, starting one step after `(x, y)`.
///
/// North and south stacks grow towards +x, east and west stacks towards -y.
/// Gaps take a step but emit nothing.
#[must_use]
pub fn stack_of_pins(
    rail: &Rail<'_>,
    side: Side,
    x: i32,
    y: i32,
    metrics: &Metrics,
    style: StackStyle,
) -> Vec<PlacedPin> {
    let (dx, dy) = match side {
        Side::North | Side::South => (metrics.spacing, 0),
        Side::East | Side::West => (0, -metrics.spacing),
    };

    let mut pins = Vec::with_capacity(rail.len());
    let (mut px, mut py) = (x, y);
    for slot in rail.items() {
        px += dx;
        py += dy;
        if let Some(pin) = slot {
            pins.push(place(pin, side, px, py, metrics, style));
        }
    }
    pins
}

fn place(pin: &Pin, side: Side, x: i32, y: i32, metrics: &Metrics, style: StackStyle) -> PlacedPin {
    let pin_type = if style.force_passive {
        Some(PinType::OutputPassive)
    } else {
        pin.pin_type
    };
    let shape = if pin_type.is_some_and(|t| t.is_clock()) {
        PinShape::Clock
    } else {
        PinShape::Line
    };

    PlacedPin {
        name: pin.name.clone(),
        number: pin.designator.fullname.clone(),
        side,
        x,
        y,
        length: metrics.pin_length,
        pin_type,
        shape,
        unit: style.unit,
    }
}
