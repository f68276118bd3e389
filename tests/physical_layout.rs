//! Physical layout codes, one case per code and pin count.

use rstest::rstest;

use symbol_layout::layout::{Holder, LayoutError, LayoutStrategy, PhysicalLayout, PinOrder, Rail};
use symbol_layout::package::{Direction, Package, PhysicalLayoutCode, Pin, PinType};

fn package(code: PhysicalLayoutCode, count: u32) -> Package {
    let mut package = Package::new("X");
    package.physical_layout = Some(code);
    package.ungrouped_pins = (1..=count)
        .map(|i| Pin::new(format!("P{i}"), i, Some(PinType::OutputPassive), Direction::None))
        .collect();
    package
}

fn ranks(rail: &Rail<'_>) -> Vec<u32> {
    rail.pins().map(|p| p.designator.rank).collect()
}

fn lengths(holder: &Holder<'_>) -> [usize; 4] {
    [
        holder.west.len(),
        holder.south.len(),
        holder.east.len(),
        holder.north.len(),
    ]
}

// =============================================================================
// Side lengths
// =============================================================================

#[rstest]
#[case::brd_even(PhysicalLayoutCode::Brd, 10, [5, 0, 5, 0])]
#[case::brd_odd(PhysicalLayoutCode::Brd, 5, [2, 0, 3, 0])]
#[case::dim(PhysicalLayoutCode::Dim, 7, [4, 0, 3, 0])]
#[case::dip(PhysicalLayoutCode::Dip, 14, [7, 0, 7, 0])]
#[case::qfp(PhysicalLayoutCode::Qfp, 44, [11, 11, 11, 11])]
#[case::qfp_uneven(PhysicalLayoutCode::Qfp, 10, [2, 2, 2, 4])]
#[case::lcc(PhysicalLayoutCode::Lcc, 20, [5, 5, 5, 5])]
#[case::sim(PhysicalLayoutCode::Sim, 9, [9, 0, 0, 0])]
fn side_lengths(#[case] code: PhysicalLayoutCode, #[case] count: u32, #[case] expected: [usize; 4]) {
    let package = package(code, count);
    let holder = PhysicalLayout::new(&package, PinOrder::Rank).apply().unwrap();

    assert_eq!(lengths(&holder), expected);
    assert_eq!(holder.pin_count(), usize::try_from(count).unwrap());
}

// =============================================================================
// Pin order
// =============================================================================

#[rstest]
#[case::dim(PhysicalLayoutCode::Dim, vec![1, 3, 5], vec![2, 4, 6])]
#[case::dip(PhysicalLayoutCode::Dip, vec![1, 2, 3], vec![6, 5, 4])]
#[case::brd(PhysicalLayoutCode::Brd, vec![1, 2, 3], vec![4, 5, 6])]
fn two_sided_order(#[case] code: PhysicalLayoutCode, #[case] west: Vec<u32>, #[case] east: Vec<u32>) {
    let package = package(code, 6);
    let holder = PhysicalLayout::new(&package, PinOrder::Rank).apply().unwrap();

    assert_eq!(ranks(&holder.west), west);
    assert_eq!(ranks(&holder.east), east);
    assert!(holder.north.is_empty() && holder.south.is_empty());
}

#[test]
fn lcc_20_wraps_the_north_side() {
    let package = package(PhysicalLayoutCode::Lcc, 20);
    let holder = PhysicalLayout::new(&package, PinOrder::Rank).apply().unwrap();

    // q = 5, offset = 5 / 2 + 1 = 3
    assert_eq!(ranks(&holder.west), [4, 5, 6, 7, 8]);
    assert_eq!(ranks(&holder.south), [9, 10, 11, 12, 13]);
    assert_eq!(ranks(&holder.east), [18, 17, 16, 15, 14]);
    assert_eq!(ranks(&holder.north), [3, 2, 1, 20, 19]);
}

#[test]
fn grouped_pins_take_part() {
    let mut package = package(PhysicalLayoutCode::Sim, 2);
    package.grouped_pins.push(
        symbol_layout::package::Group::new("A", 1, "").with_slots(symbol_layout::package::Slots {
            out: Some(vec![Pin::new("Q", 3, Some(PinType::Output), Direction::Out)]),
            ..Default::default()
        }),
    );

    let holder = PhysicalLayout::new(&package, PinOrder::Rank).apply().unwrap();
    assert_eq!(ranks(&holder.west), [1, 2, 3]);
}

// =============================================================================
// Errors
// =============================================================================

#[rstest]
#[case::bga(Some(PhysicalLayoutCode::Bga), "BGA")]
#[case::pga(Some(PhysicalLayoutCode::Pga), "PGA")]
#[case::missing(None, "none")]
fn unsupported_codes(#[case] code: Option<PhysicalLayoutCode>, #[case] name: &str) {
    let mut package = package(PhysicalLayoutCode::Sim, 4);
    package.physical_layout = code;

    let err = PhysicalLayout::new(&package, PinOrder::Rank).apply().unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(
        err,
        LayoutError::UnsupportedPhysicalLayout {
            code: name.to_string()
        }
    );
}
