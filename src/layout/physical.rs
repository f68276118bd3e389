//! Layout of a whole package by physical pin position.
//!
//! Pins are sorted by designator, then dealt to the sides following the way
//! the package is numbered when seen from above:
//!
//! | Code | Rule |
//! |------|------|
//! | BRD | first half west, second half east |
//! | DIM | even positions west, odd positions east |
//! | DIP | first half west, second half east, bottom to top |
//! | QFP | quarters west, south, east, north; counter-clockwise from a corner |
//! | LCC | as QFP, but pin 1 sits in the middle of the north side |
//! | SIM | everything west |

use tracing::debug;

use super::{Holder, LayoutError, LayoutResult, LayoutStrategy, Rail};
use crate::package::{Package, PhysicalLayoutCode, Pin};

/// Sort key of the pins before they are dealt to the sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinOrder {
    /// Designator rank.
    #[default]
    Rank,
    /// Designator full name, compared as text.
    FullName,
}

/// Lays out a package following its physical layout code.
#[derive(Debug, Clone, Copy)]
pub struct PhysicalLayout<'a> {
    package: &'a Package,
    order: PinOrder,
}

impl<'a> PhysicalLayout<'a> {
    /// Creates the strategy for a package.
    #[must_use]
    pub const fn new(package: &'a Package, order: PinOrder) -> Self {
        Self { package, order }
    }

    /// Every pin of the package, sorted.
    fn sorted_pins(&self) -> Vec<&'a Pin> {
        let package = self.package;
        let mut pins: Vec<&'a Pin> = package.all_pins().collect();
        match self.order {
            PinOrder::Rank => pins.sort_by_key(|p| p.designator.rank),
            PinOrder::FullName => {
                pins.sort_by(|a, b| a.designator.fullname.cmp(&b.designator.fullname));
            }
        }
        pins
    }
}

fn push_forward<'a>(rail: &mut Rail<'a>, pins: &[&'a Pin]) {
    rail.push(pins.iter().copied().map(Some), false);
}

fn push_reversed<'a>(rail: &mut Rail<'a>, pins: &[&'a Pin]) {
    rail.push(pins.iter().rev().copied().map(Some), false);
}

/// Deals quarters counter-clockwise, starting `offset` pins into the list.
///
/// The pins skipped by the offset close the north side after the last
/// quarter.
fn place_quad<'a>(holder: &mut Holder<'a>, pins: &[&'a Pin], offset: usize) {
    let quarter = pins.len() / 4;
    let (head, rotated) = pins.split_at(offset.min(pins.len()));
    let side = |index: usize| {
        let start = (index * quarter).min(rotated.len());
        let end = ((index + 1) * quarter).min(rotated.len());
        &rotated[start..end]
    };

    push_forward(&mut holder.west, side(0));
    push_forward(&mut holder.south, side(1));
    push_reversed(&mut holder.east, side(2));

    let tail = &rotated[(3 * quarter).min(rotated.len())..];
    holder.north.push(
        tail.iter().chain(head.iter()).rev().copied().map(Some),
        false,
    );
}

impl<'a> LayoutStrategy<'a> for PhysicalLayout<'a> {
    fn apply(&mut self) -> LayoutResult<Holder<'a>> {
        let code = match self.package.physical_layout {
            Some(
                code @ (PhysicalLayoutCode::Brd
                | PhysicalLayoutCode::Dim
                | PhysicalLayoutCode::Dip
                | PhysicalLayoutCode::Lcc
                | PhysicalLayoutCode::Qfp
                | PhysicalLayoutCode::Sim),
            ) => code,
            other => return Err(LayoutError::unsupported_layout(other)),
        };

        let pins = self.sorted_pins();
        let (first_half, second_half) = pins.split_at(pins.len() / 2);
        let mut holder = Holder::new();

        match code {
            PhysicalLayoutCode::Brd => {
                push_forward(&mut holder.west, first_half);
                push_forward(&mut holder.east, second_half);
            }
            PhysicalLayoutCode::Dim => {
                holder.west.push(pins.iter().step_by(2).copied().map(Some), false);
                holder
                    .east
                    .push(pins.iter().skip(1).step_by(2).copied().map(Some), false);
            }
            PhysicalLayoutCode::Dip => {
                push_forward(&mut holder.west, first_half);
                push_reversed(&mut holder.east, second_half);
            }
            PhysicalLayoutCode::Qfp => place_quad(&mut holder, &pins, 0),
            PhysicalLayoutCode::Lcc => place_quad(&mut holder, &pins, pins.len() / 4 / 2 + 1),
            // SIM, the only code left
            _ => push_forward(&mut holder.west, &pins),
        }

        debug!(
            package = %self.package.name,
            code = %code,
            pins = pins.len(),
            width = holder.width(),
            height = holder.height(),
            "Laid out physical unit"
        );

        Ok(holder)
    }
}
