//! Address space unit tests.
//!
//! Verifies window registration, the disjointness invariant (including
//! order-independence via property tests), out-of-range rejection, and
//! cacheability classification.

use proptest::prelude::*;
use socforge_core::addrspace::{AddressSpace, AddressWindow};
use socforge_core::common::addr::{AddrRange, PhysAddr};
use socforge_core::common::error::AddressError;
use socforge_core::topology::component::ComponentId;

fn space_1tib() -> AddressSpace {
    AddressSpace::new(AddrRange::new(0, 1 << 40).unwrap())
}

fn window(base: u64, size: u64, cacheable: bool, owner: usize) -> AddressWindow {
    AddressWindow {
        range: AddrRange::new(base, size).unwrap(),
        cacheable,
        owner: ComponentId(owner),
    }
}

// ══════════════════════════════════════════════════════════
// 1. Registration and disjointness
// ══════════════════════════════════════════════════════════

#[test]
fn register_disjoint_windows_succeeds() {
    let mut space = space_1tib();
    space.register_window(window(0x4000_0000, 0x1000, false, 0)).unwrap();
    space.register_window(window(0, 0x4000_0000, true, 1)).unwrap();
    space.register_window(window(0x4000_1000, 0x1000, false, 0)).unwrap();
    assert_eq!(space.windows().len(), 3);
}

#[test]
fn windows_kept_sorted_by_base() {
    let mut space = space_1tib();
    space.register_window(window(0x3000, 0x1000, false, 0)).unwrap();
    space.register_window(window(0x1000, 0x1000, false, 1)).unwrap();
    space.register_window(window(0x2000, 0x1000, false, 2)).unwrap();
    let bases: Vec<u64> = space.windows().iter().map(|w| w.range.base.val()).collect();
    assert_eq!(bases, vec![0x1000, 0x2000, 0x3000]);
}

#[test]
fn overlapping_window_rejected_with_owner() {
    let mut space = space_1tib();
    space.register_window(window(0x4000_0000, 0x2000, false, 7)).unwrap();
    let err = space
        .register_window(window(0x4000_1000, 0x2000, false, 8))
        .unwrap_err();
    assert_eq!(
        err,
        AddressError::Overlap {
            new: AddrRange::new(0x4000_1000, 0x2000).unwrap(),
            existing: AddrRange::new(0x4000_0000, 0x2000).unwrap(),
            owner: ComponentId(7),
        }
    );
}

#[test]
fn overlap_detected_against_earlier_base_too() {
    // The new window starts below an existing one and reaches into it.
    let mut space = space_1tib();
    space.register_window(window(0x2000, 0x1000, false, 0)).unwrap();
    let err = space.register_window(window(0x1000, 0x1001, false, 1)).unwrap_err();
    assert!(matches!(err, AddressError::Overlap { .. }));
}

#[test]
fn covering_window_rejected() {
    // A window that swallows an existing one whole is still an overlap.
    let mut space = space_1tib();
    space.register_window(window(0x4000_0000, 0x1000, false, 0)).unwrap();
    let err = space.register_window(window(0, 0x8000_0000, true, 1)).unwrap_err();
    assert!(matches!(err, AddressError::Overlap { .. }));
}

#[test]
fn adjacent_windows_accepted() {
    let mut space = space_1tib();
    space.register_window(window(0x1000, 0x1000, false, 0)).unwrap();
    space.register_window(window(0x2000, 0x1000, false, 1)).unwrap();
    space.register_window(window(0, 0x1000, false, 2)).unwrap();
    assert_eq!(space.windows().len(), 3);
}

#[test]
fn failed_registration_leaves_set_unchanged() {
    let mut space = space_1tib();
    space.register_window(window(0x1000, 0x1000, false, 0)).unwrap();
    let _ = space.register_window(window(0x1800, 0x1000, false, 1)).unwrap_err();
    assert_eq!(space.windows().len(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Global range
// ══════════════════════════════════════════════════════════

#[test]
fn window_outside_global_range_rejected() {
    let mut space = AddressSpace::new(AddrRange::new(0, 0x1_0000_0000).unwrap());
    let err = space
        .register_window(window(0x1_0000_0000, 0x1000, true, 0))
        .unwrap_err();
    assert!(matches!(err, AddressError::OutOfRange { .. }));
}

#[test]
fn window_straddling_global_end_rejected() {
    let mut space = AddressSpace::new(AddrRange::new(0, 0x1_0000_0000).unwrap());
    let err = space
        .register_window(window(0xFFFF_F000, 0x2000, true, 0))
        .unwrap_err();
    assert!(matches!(err, AddressError::OutOfRange { .. }));
}

// ══════════════════════════════════════════════════════════
// 3. Classification
// ══════════════════════════════════════════════════════════

#[test]
fn cacheable_at_reflects_window_attribute() {
    let mut space = space_1tib();
    space.register_window(window(0, 0x4000_0000, true, 0)).unwrap();
    space.register_window(window(0x4000_0000, 0x1000, false, 1)).unwrap();

    assert_eq!(space.cacheable_at(PhysAddr::new(0)).unwrap(), true);
    assert_eq!(space.cacheable_at(PhysAddr::new(0x3FFF_FFFF)).unwrap(), true);
    assert_eq!(space.cacheable_at(PhysAddr::new(0x4000_0000)).unwrap(), false);
    assert_eq!(space.cacheable_at(PhysAddr::new(0x4000_0FFF)).unwrap(), false);
}

#[test]
fn cacheable_at_unmapped_address_fails() {
    let mut space = space_1tib();
    space.register_window(window(0x1000, 0x1000, true, 0)).unwrap();

    let err = space.cacheable_at(PhysAddr::new(0x3000)).unwrap_err();
    assert_eq!(err, AddressError::Unmapped { addr: 0x3000 });
    assert!(space.cacheable_at(PhysAddr::new(0xFFF)).is_err());
    assert!(space.cacheable_at(PhysAddr::new(0x2000)).is_err());
}

#[test]
fn window_at_resolves_owner() {
    let mut space = space_1tib();
    space.register_window(window(0x1000, 0x1000, false, 3)).unwrap();
    let w = space.window_at(PhysAddr::new(0x1800)).unwrap();
    assert_eq!(w.owner, ComponentId(3));
    assert!(space.window_at(PhysAddr::new(0x2000)).is_none());
}

#[test]
fn is_mapped_matches_window_at() {
    let mut space = space_1tib();
    space.register_window(window(0x1000, 0x1000, false, 0)).unwrap();
    assert!(space.is_mapped(PhysAddr::new(0x1000)));
    assert!(!space.is_mapped(PhysAddr::new(0)));
}

// ══════════════════════════════════════════════════════════
// 4. Property tests: order-independent disjointness
// ══════════════════════════════════════════════════════════

/// Strategy: a set of pairwise-disjoint windows built from positive gaps,
/// then shuffled so registration order is arbitrary.
fn disjoint_windows() -> impl Strategy<Value = Vec<(u64, u64)>> {
    proptest::collection::vec((1u64..0x10000, 1u64..0x10000), 1..16)
        .prop_map(|gaps| {
            let mut base = 0u64;
            let mut out = Vec::with_capacity(gaps.len());
            for (gap, size) in gaps {
                base += gap;
                out.push((base, size));
                base += size;
            }
            out
        })
        .prop_shuffle()
}

proptest! {
    /// Disjoint window sets always register fully, in any order.
    #[test]
    fn disjoint_sets_always_register(windows in disjoint_windows()) {
        let mut space = space_1tib();
        for (i, (base, size)) in windows.iter().enumerate() {
            prop_assert!(space.register_window(window(*base, *size, i % 2 == 0, i)).is_ok());
        }
        prop_assert_eq!(space.windows().len(), windows.len());
    }

    /// An overlapping pair is rejected regardless of registration order.
    #[test]
    fn overlapping_pair_rejected_either_order(
        base in 0u64..0x1000_0000,
        size in 1u64..0x10000,
        offset in 0u64..0xFFFF,
    ) {
        let offset = offset % size; // second window starts inside the first
        for flip in [false, true] {
            let first = (base, size);
            let second = (base + offset, size);
            let (a, b) = if flip { (second, first) } else { (first, second) };

            let mut space = space_1tib();
            space.register_window(window(a.0, a.1, true, 0)).unwrap();
            let res = space.register_window(window(b.0, b.1, true, 1));
            let overlapped = matches!(res, Err(AddressError::Overlap { .. }));
            prop_assert!(overlapped, "expected overlap rejection, got {:?}", res);
        }
    }

    /// Whatever registration accepted, the resulting set is pairwise disjoint.
    #[test]
    fn accepted_windows_always_disjoint(
        candidates in proptest::collection::vec((0u64..0x100_0000, 1u64..0x10000), 0..24)
    ) {
        let mut space = space_1tib();
        for (i, (base, size)) in candidates.iter().enumerate() {
            let _ = space.register_window(window(*base, *size, false, i));
        }
        let windows = space.windows();
        for (i, a) in windows.iter().enumerate() {
            for b in &windows[i + 1..] {
                prop_assert!(!a.range.overlaps(&b.range));
            }
        }
    }
}
