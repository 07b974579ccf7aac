//! Physical address and address range types.
//!
//! This module defines strong types for the physical address space to prevent
//! accidental mixing of addresses and plain integers. It provides:
//! 1. **Type Safety:** `PhysAddr` distinguishes physical addresses at compile time.
//! 2. **Ranges:** `AddrRange` models half-open `[base, base + size)` intervals
//!    with overflow-checked construction.
//! 3. **Interval Logic:** Containment and overlap tests used by the address map.

use std::fmt;

use super::error::AddressError;

/// A physical address in the simulated system's address space.
///
/// Physical addresses identify locations in the global memory map: DRAM,
/// memory-mapped device control registers, or device data apertures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A half-open physical address range `[base, base + size)`.
///
/// Ranges are the unit of address-map bookkeeping: every window a component
/// claims is one `AddrRange`. Construction checks that `base + size` does not
/// overflow, so `end()` is always well defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddrRange {
    /// First address in the range.
    pub base: PhysAddr,
    /// Size of the range in bytes. May be zero; an empty range contains nothing.
    pub size: u64,
}

impl AddrRange {
    /// Creates a new range, rejecting ranges whose end would overflow a `u64`.
    ///
    /// # Arguments
    ///
    /// * `base` - First address in the range.
    /// * `size` - Size of the range in bytes.
    ///
    /// # Returns
    ///
    /// The range, or [`AddressError::Overflow`] if `base + size` wraps.
    pub fn new(base: u64, size: u64) -> Result<Self, AddressError> {
        match base.checked_add(size) {
            Some(_) => Ok(Self {
                base: PhysAddr::new(base),
                size,
            }),
            None => Err(AddressError::Overflow { base, size }),
        }
    }

    /// Returns the exclusive end address of the range.
    #[inline(always)]
    pub fn end(&self) -> u64 {
        self.base.val() + self.size
    }

    /// Returns whether the range contains the given address.
    #[inline]
    pub fn contains(&self, addr: PhysAddr) -> bool {
        addr.val() >= self.base.val() && addr.val() < self.end()
    }

    /// Returns whether this range intersects another (half-open interval test).
    ///
    /// Empty ranges never overlap anything.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.base.val() < other.end() && other.base.val() < self.end()
    }

    /// Returns whether `other` lies entirely within this range.
    #[inline]
    pub fn covers(&self, other: &Self) -> bool {
        other.base.val() >= self.base.val() && other.end() <= self.end()
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}, {:#x})", self.base.val(), self.end())
    }
}
