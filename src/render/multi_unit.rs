//! Multi unit symbols: one unit per group.
//!
//! Ungrouped pins are collected into two extra units, ranked after every
//! real group: other signals first, then power distribution.

use tracing::debug;

use super::stack::{stack_of_pins, StackStyle};
use super::{package_fields, Metrics, Rect, SymbolDrawing, SymbolGenerator, Text, Unit};
use crate::layout::{LayoutResult, LayoutStrategy, Side, SingleGroupLayout};
use crate::package::{Direction, Group, Package, Pattern, Pin, PinType, Slots};

/// Designator of the unit holding ungrouped signal pins.
pub const OTHERS_DESIGNATOR: &str = "OTHERS";

/// Designator of the unit holding ungrouped power distribution pins.
pub const POWER_DESIGNATOR: &str = "POWER";

fn bucket(pins: Vec<Pin>) -> Option<Vec<Pin>> {
    (!pins.is_empty()).then_some(pins)
}

fn collect<F>(package: &Package, keep: F) -> Vec<Pin>
where
    F: Fn(&Pin) -> bool,
{
    package
        .ungrouped_pins
        .iter()
        .filter(|p| keep(*p))
        .cloned()
        .collect()
}

/// Ungrouped signal pins, bucketed by direction.
fn others_group(package: &Package) -> Option<Group> {
    let signal = |p: &Pin| !p.pin_type.is_some_and(|t| t.is_power_distribution());
    let slots = Slots {
        input: bucket(collect(package, |p| signal(p) && p.direction == Direction::In)),
        out: bucket(collect(package, |p| signal(p) && p.direction == Direction::Out)),
        bi: bucket(collect(package, |p| {
            signal(p) && matches!(p.direction, Direction::Bi | Direction::None)
        })),
        ..Slots::default()
    };

    (slots.pin_count() > 0).then(|| {
        Group::new(OTHERS_DESIGNATOR, 9998, "Other pins")
            .with_direction(Direction::Bi)
            .with_slots(slots)
    })
}

/// Ungrouped supply pins on the west side, ground pins on the south side.
fn power_group(package: &Package) -> Option<Group> {
    let slots = Slots {
        input: bucket(collect(package, |p| {
            matches!(p.pin_type, Some(PinType::Power | PinType::OutputPower))
        })),
        out: bucket(collect(package, |p| p.pin_type == Some(PinType::Ground))),
        ..Slots::default()
    };

    (slots.pin_count() > 0).then(|| {
        Group::new(POWER_DESIGNATOR, 9999, "Power distribution")
            .with_pattern(Pattern::Power)
            .with_direction(Direction::In)
            .with_slots(slots)
    })
}

/// Every group of the package, one unit each.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiUnitGenerator {
    metrics: Metrics,
}

impl MultiUnitGenerator {
    /// Creates the generator.
    #[must_use]
    pub const fn new(metrics: Metrics) -> Self {
        Self { metrics }
    }

    fn render_unit(&self, group: &Group, index: u32) -> LayoutResult<Unit> {
        let holder = SingleGroupLayout::new(group).apply()?;
        let metrics = &self.metrics;
        let style = StackStyle {
            unit: index,
            force_passive: false,
        };

        let width = metrics.grid(holder.width());
        let height = metrics.grid(holder.height());
        let pad_north = metrics.grid(holder.padding_north());
        let pad_west = metrics.grid(holder.padding_west());

        let origins = [
            (Side::West, 0, -pad_north),
            (Side::North, pad_west, 0),
            (Side::East, width, -pad_north),
            (Side::South, pad_west, -height),
        ];
        let pins = origins
            .into_iter()
            .flat_map(|(side, x, y)| stack_of_pins(holder.rail(side), side, x, y, metrics, style))
            .collect();

        Ok(Unit {
            index,
            title: format!("{} -- {}", group.designator, group.comment),
            body: Rect::new(0, 0, width, -height),
            contours: Vec::new(),
            pins,
            texts: vec![Text {
                text: group.comment.clone(),
                x: 0,
                y: 100,
            }],
        })
    }
}

impl SymbolGenerator for MultiUnitGenerator {
    fn suffix(&self) -> &'static str {
        "_mu"
    }

    fn title(&self, package: &Package) -> String {
        format!("{} -- Multiple units symbol", package.name)
    }

    fn generate(&self, package: &Package) -> LayoutResult<SymbolDrawing> {
        let synthetic: Vec<Group> = [others_group(package), power_group(package)]
            .into_iter()
            .flatten()
            .collect();

        let mut units = Vec::new();
        for (group, index) in package.grouped_pins.iter().chain(&synthetic).zip(1..) {
            units.push(self.render_unit(group, index)?);
        }

        debug!(
            package = %package.name,
            units = units.len(),
            "Rendered multi unit symbol"
        );

        Ok(SymbolDrawing {
            name: self.symbol_name(package),
            title: self.title(package),
            aliases: self.aliases(package),
            fields: package_fields(package, 0, 100),
            units,
            warnings: Vec::new(),
        })
    }
}
