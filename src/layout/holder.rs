//! Rectangular symbol body holding one rail per side.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rail::Rail;

/// A side of the symbol body, named like on a map seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Top.
    North,
    /// Right.
    East,
    /// Bottom.
    South,
    /// Left.
    West,
}

impl Side {
    /// All sides, clockwise from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::North => write!(f, "north"),
            Self::East => write!(f, "east"),
            Self::South => write!(f, "south"),
            Self::West => write!(f, "west"),
        }
    }
}

/// Model of a symbol made of a rectangle with pins on each side.
///
/// Width and height are in grid units and always derived from the current
/// content of the rails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Holder<'a> {
    /// Pins on top, left to right.
    pub north: Rail<'a>,
    /// Pins on the right, top to bottom.
    pub east: Rail<'a>,
    /// Pins at the bottom, left to right.
    pub south: Rail<'a>,
    /// Pins on the left, top to bottom.
    pub west: Rail<'a>,
}

/// Room taken by pin names inside the body, measured from one side.
const fn padding_of(rail: &Rail<'_>) -> usize {
    let width = rail.width();
    if width == 0 {
        0
    } else {
        width.div_ceil(2) + 1
    }
}

impl<'a> Holder<'a> {
    /// Creates a holder with four empty rails.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            north: Rail::new(),
            east: Rail::new(),
            south: Rail::new(),
            west: Rail::new(),
        }
    }

    /// Returns the rail of a side.
    #[must_use]
    pub const fn rail(&self, side: Side) -> &Rail<'a> {
        match side {
            Side::North => &self.north,
            Side::East => &self.east,
            Side::South => &self.south,
            Side::West => &self.west,
        }
    }

    /// Returns the rail of a side, mutably.
    pub fn rail_mut(&mut self, side: Side) -> &mut Rail<'a> {
        match side {
            Side::North => &mut self.north,
            Side::East => &mut self.east,
            Side::South => &mut self.south,
            Side::West => &mut self.west,
        }
    }

    /// Padding from the north side.
    #[must_use]
    pub const fn padding_north(&self) -> usize {
        padding_of(&self.north)
    }

    /// Padding from the east side.
    #[must_use]
    pub const fn padding_east(&self) -> usize {
        padding_of(&self.east)
    }

    /// Padding from the south side.
    #[must_use]
    pub const fn padding_south(&self) -> usize {
        padding_of(&self.south)
    }

    /// Padding from the west side.
    #[must_use]
    pub const fn padding_west(&self) -> usize {
        padding_of(&self.west)
    }

    /// Body width in grid units.
    #[must_use]
    pub fn width(&self) -> usize {
        // one extra unit leaves room before the first pin
        self.north.len().max(self.south.len()) + self.padding_west() + self.padding_east() + 1
    }

    /// Body height in grid units.
    #[must_use]
    pub fn height(&self) -> usize {
        self.west.len().max(self.east.len()) + self.padding_north() + self.padding_south() + 1
    }

    /// Number of pins on all sides.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        Side::ALL
            .iter()
            .map(|side| self.rail(*side).pins().count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{Direction, Pin, PinType};

    fn pin(name: &str) -> Pin {
        Pin::new(name, 1, Some(PinType::Input), Direction::In)
    }

    #[test]
    fn empty_holder_is_one_by_one() {
        let holder = Holder::new();
        assert_eq!(holder.width(), 1);
        assert_eq!(holder.height(), 1);
        assert_eq!(holder.padding_west(), 0);
        assert_eq!(holder.pin_count(), 0);
    }

    #[test]
    fn padding_rounds_half_width_up() {
        let four = pin("ABC");
        let five = pin("ABCD");
        let mut holder = Holder::new();

        holder.west.push_single_pin(&four);
        assert_eq!(holder.west.width(), 4);
        assert_eq!(holder.padding_west(), 3);

        holder.east.push_single_pin(&five);
        assert_eq!(holder.east.width(), 5);
        assert_eq!(holder.padding_east(), 4);
    }

    #[test]
    fn width_and_height_derive_from_rails() {
        let a = pin("A");
        let b = pin("BB");
        let mut holder = Holder::new();

        holder.west.push([Some(&a), None, Some(&a)], false);
        holder.east.push_single_pin(&b);
        holder.north.push([Some(&a), Some(&a)], false);
        holder.south.push_gaps(4);

        // west width 2 -> padding 2, east width 3 -> padding 3
        assert_eq!(holder.width(), 4 + 2 + 3 + 1);
        // north width 2 -> padding 2, south only gaps -> padding 0
        assert_eq!(holder.height(), 3 + 2 + 1);

        holder.south.push_single_pin(&b);
        assert_eq!(holder.height(), 3 + 2 + 3 + 1);
        assert_eq!(holder.width(), 5 + 2 + 3 + 1);
    }

    #[test]
    fn rail_by_side() {
        let a = pin("A");
        let mut holder = Holder::new();
        holder.rail_mut(Side::South).push_single_pin(&a);
        assert_eq!(holder.south.len(), 1);
        assert_eq!(holder.rail(Side::South).len(), 1);
        assert!(holder.rail(Side::North).is_empty());
        assert_eq!(holder.pin_count(), 1);
    }
}
