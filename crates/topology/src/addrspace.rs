//! Global physical address space and registered windows.
//!
//! This module owns the system's physical address map. It provides:
//! 1. **Registration:** Components claim non-overlapping windows, each tagged
//!    cacheable or not and bound to its owning component.
//! 2. **Ordering:** Windows are kept sorted by base address, so registration
//!    and lookup are a binary search plus a neighbor check.
//! 3. **Classification:** `cacheable_at` answers the cacheability attribute
//!    of any mapped address and refuses to classify unmapped ones.

use tracing::debug;

use crate::common::addr::{AddrRange, PhysAddr};
use crate::common::error::AddressError;
use crate::topology::component::ComponentId;

/// A contiguous physical range claimed by one component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressWindow {
    /// The claimed range.
    pub range: AddrRange,
    /// Whether loads and stores to this range may be cached.
    pub cacheable: bool,
    /// The component that owns the claim.
    pub owner: ComponentId,
}

/// The global physical address range plus the set of registered windows.
///
/// Windows are strictly disjoint: a device's control and data windows are
/// distinct claims that must not intersect each other, DRAM, or anything
/// else. Callers that want a device aperture carved out of DRAM must size the
/// DRAM claim around it.
#[derive(Debug)]
pub struct AddressSpace {
    space: AddrRange,
    /// Registered windows, sorted by base address.
    windows: Vec<AddressWindow>,
}

impl AddressSpace {
    /// Creates an empty address space covering the given global range.
    pub fn new(space: AddrRange) -> Self {
        Self {
            space,
            windows: Vec::new(),
        }
    }

    /// Returns the global physical range.
    pub fn range(&self) -> AddrRange {
        self.space
    }

    /// Returns the registered windows, ordered by base address.
    pub fn windows(&self) -> &[AddressWindow] {
        &self.windows
    }

    /// Registers a window, keeping the set sorted and disjoint.
    ///
    /// # Arguments
    ///
    /// * `window` - The claim to register.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success. Fails with [`AddressError::OutOfRange`] if the
    /// window does not fit inside the global range, or
    /// [`AddressError::Overlap`] if its half-open range intersects any
    /// registered window — regardless of registration order.
    pub fn register_window(&mut self, window: AddressWindow) -> Result<(), AddressError> {
        if !self.space.covers(&window.range) {
            return Err(AddressError::OutOfRange {
                window: window.range,
                space: self.space,
            });
        }

        // Sorted disjoint invariant: only the two neighbors of the insertion
        // point can possibly intersect the new window.
        let at = self
            .windows
            .partition_point(|w| w.range.base <= window.range.base);
        for neighbor in self.windows[..at]
            .last()
            .into_iter()
            .chain(self.windows.get(at))
        {
            if neighbor.range.overlaps(&window.range) {
                return Err(AddressError::Overlap {
                    new: window.range,
                    existing: neighbor.range,
                    owner: neighbor.owner,
                });
            }
        }

        debug!(
            range = %window.range,
            cacheable = window.cacheable,
            owner = %window.owner,
            "registered address window"
        );
        self.windows.insert(at, window);
        Ok(())
    }

    /// Returns the window containing the given address, if any.
    pub fn window_at(&self, addr: PhysAddr) -> Option<&AddressWindow> {
        let at = self.windows.partition_point(|w| w.range.base <= addr);
        self.windows[..at].last().filter(|w| w.range.contains(addr))
    }

    /// Returns whether any registered window contains the address.
    pub fn is_mapped(&self, addr: PhysAddr) -> bool {
        self.window_at(addr).is_some()
    }

    /// Classifies an address by the window it falls in.
    ///
    /// # Returns
    ///
    /// The window's cacheability attribute, or [`AddressError::Unmapped`] if
    /// no window contains the address. Callers must treat the error as "this
    /// address must not be routed": every address a cacheable load/store path
    /// touches has to be classified.
    pub fn cacheable_at(&self, addr: PhysAddr) -> Result<bool, AddressError> {
        self.window_at(addr)
            .map(|w| w.cacheable)
            .ok_or(AddressError::Unmapped { addr: addr.val() })
    }
}
