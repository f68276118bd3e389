//! Rails: ordered pin slots along one side of a symbol body.

use std::iter;

use crate::package::Pin;

/// One position on a rail: a pin, or a gap (`None`) used for spacing.
pub type Slot<'a> = Option<&'a Pin>;

/// Ordered collection of pin slots for one side of a rectangular symbol.
///
/// The length counts every slot, gaps included. The width is the largest
/// rendered pin name seen so far plus a one unit margin; it only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rail<'a> {
    items: Vec<Slot<'a>>,
    width: usize,
}

impl<'a> Rail<'a> {
    /// Creates an empty rail.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            width: 0,
        }
    }

    /// The slots, first to last.
    #[must_use]
    pub fn items(&self) -> &[Slot<'a>] {
        &self.items
    }

    /// Number of slots, gaps included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the rail holds no slot at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Width reserved for pin names.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Iterates over the pins, skipping gaps.
    pub fn pins(&self) -> impl Iterator<Item = &'a Pin> + '_ {
        self.items.iter().filter_map(|slot| *slot)
    }

    /// Appends slots.
    ///
    /// Does nothing when `slots` is empty. Otherwise, when `with_separator`
    /// is set and the rail already holds something, a single gap goes first.
    pub fn push<I>(&mut self, slots: I, with_separator: bool)
    where
        I: IntoIterator<Item = Slot<'a>>,
    {
        let mut slots = slots.into_iter().peekable();
        if slots.peek().is_none() {
            return;
        }
        if with_separator && !self.items.is_empty() {
            self.items.push(None);
        }
        for slot in slots {
            if let Some(pin) = slot {
                self.width = self.width.max(pin.visible_name_len() + 1);
            }
            self.items.push(slot);
        }
    }

    /// Appends every pin of a slice.
    pub fn push_pins(&mut self, pins: &'a [Pin], with_separator: bool) {
        self.push(pins.iter().map(Some), with_separator);
    }

    /// Appends one pin.
    pub fn push_single_pin(&mut self, pin: &'a Pin) {
        self.push(iter::once(Some(pin)), false);
    }

    /// Appends one gap.
    pub fn push_gap(&mut self) {
        self.items.push(None);
    }

    /// Appends `count` gaps.
    pub fn push_gaps(&mut self, count: usize) {
        self.items.extend(iter::repeat(None).take(count));
    }

    /// Appends trailing gaps until the rail is `length` slots long.
    pub fn fill_to_length(&mut self, length: usize) {
        self.push_gaps(length.saturating_sub(self.len()));
    }

    /// Prepends gaps until the rail is `length` slots long.
    pub fn fill_to_length_before(&mut self, length: usize) {
        let delta = length.saturating_sub(self.len());
        if delta > 0 {
            self.items.splice(0..0, iter::repeat(None).take(delta));
        }
    }

    /// Spreads gaps on both ends until the rail is `length` slots long.
    ///
    /// An odd extra gap goes to the end; a single gap is never put first.
    pub fn fill_to_length_centered(&mut self, length: usize) {
        let delta = length.saturating_sub(self.len());
        if delta == 0 {
            return;
        }
        let before = if delta < 2 { 0 } else { delta / 2 };
        self.items.splice(0..0, iter::repeat(None).take(before));
        self.push_gaps(delta - before);
    }

    /// Removes gaps before the first pin and after the last pin.
    pub fn trim(&mut self) {
        let Some(first) = self.items.iter().position(Option::is_some) else {
            self.items.clear();
            return;
        };
        // a pin exists, so rposition finds one too
        let last = self.items.iter().rposition(Option::is_some).unwrap_or(first);
        self.items.truncate(last + 1);
        self.items.drain(..first);
    }

    /// Pads the shorter of `self` and `other` with trailing gaps so both end
    /// up with the same length.
    pub fn equalize(&mut self, other: &mut Self) {
        match self.len().cmp(&other.len()) {
            std::cmp::Ordering::Less => self.fill_to_length(other.len()),
            std::cmp::Ordering::Greater => other.fill_to_length(self.len()),
            std::cmp::Ordering::Equal => {}
        }
    }
}
