//! Pin layout engine.
//!
//! Decides, deterministically, on which side of a rectangular symbol body each
//! pin of a package goes, in which order, and where spacing gaps sit.
//!
//! # Building Blocks
//!
//! - [`Rail`]: ordered pin slots along one side, gaps included
//! - [`Holder`]: the four rails of one symbol body, with derived dimensions
//! - [`Outline`]: rail-length checkpoints between blocks of pins
//!
//! # Strategies
//!
//! Every symbol variant picks one [`LayoutStrategy`]:
//!
//! - [`SingleGroupLayout`]: one group per symbol unit (multi-unit symbols)
//! - [`SingleUnitLayout`]: the whole package in one body, by function
//! - [`PhysicalLayout`]: the whole package in one body, by pin position
//!
//! Strategies never share state; each call to [`LayoutStrategy::apply`] builds
//! a new holder from the package.

pub mod error;
pub mod holder;
pub mod physical;
pub mod rail;
pub mod single_group;
pub mod single_unit;

pub use error::{LayoutError, LayoutResult};
pub use holder::{Holder, Side};
pub use physical::{PhysicalLayout, PinOrder};
pub use rail::{Rail, Slot};
pub use single_group::SingleGroupLayout;
pub use single_unit::SingleUnitLayout;

/// Rail-length checkpoints marking separators between blocks of pins.
///
/// Each sequence starts with the rail length before its first block and gets
/// one more entry after every block, so consecutive entries bound a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    /// Blocks spanning the whole body (bidirectional groups), on west lengths.
    pub through: Vec<usize>,
    /// Blocks on the west side (input groups).
    pub west: Vec<usize>,
    /// Blocks on the east side (output groups).
    pub east: Vec<usize>,
}

impl Outline {
    /// Whether no block was recorded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.through.len() < 2 && self.west.len() < 2 && self.east.len() < 2
    }
}

/// A pin placement algorithm.
pub trait LayoutStrategy<'a> {
    /// Builds a new holder with the pins placed.
    ///
    /// # Errors
    ///
    /// Returns an error when the package cannot be laid out at all with this
    /// strategy. Recoverable problems are logged and dropped instead.
    fn apply(&mut self) -> LayoutResult<Holder<'a>>;

    /// Recoverable problems met during the last [`apply`](Self::apply).
    fn diagnostics(&self) -> &[LayoutError] {
        &[]
    }
}
