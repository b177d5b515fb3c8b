use arrayvec::ArrayVec;
use config::{OFFSET_WIDTH, PAGE_SIZE, TABLES_DEPTH, VIRTUAL_MEMORY_SIZE};

use crate::Page;

/// A virtual address. The address is partitioned, most significant bits
/// first, into one table-index field per level followed by the in-page
/// offset, each `OFFSET_WIDTH` bits wide.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Virtual(pub(crate) usize);

impl Virtual {
    /// Creates a new `Virtual` address.
    ///
    /// # Panics
    /// Panics if the given address does not fit in the virtual address
    /// space, i.e. if it is greater than or equal to `VIRTUAL_MEMORY_SIZE`.
    #[must_use]
    pub const fn new(addr: usize) -> Self {
        match Self::try_new(addr) {
            None => panic!("Virtual address is outside of the address space"),
            Some(addr) => addr,
        }
    }

    /// Creates a new `Virtual` address if the given address fits in the
    /// virtual address space. Returns `None` otherwise.
    #[must_use]
    pub const fn try_new(addr: usize) -> Option<Self> {
        if addr < VIRTUAL_MEMORY_SIZE {
            Some(Self(addr))
        } else {
            None
        }
    }

    /// Returns the offset of the addressed word inside its page.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.0 & (PAGE_SIZE - 1)
    }

    /// Returns the page containing the address.
    #[must_use]
    pub const fn page(self) -> Page {
        Page(self.0 >> OFFSET_WIDTH)
    }

    /// Decomposes the address into its per-level table indices, from the
    /// index into the root table down to the index into the leaf table.
    #[must_use]
    pub fn indices(self) -> ArrayVec<usize, TABLES_DEPTH> {
        (1..=TABLES_DEPTH)
            .rev()
            .map(|level| (self.0 >> (OFFSET_WIDTH * level)) & (PAGE_SIZE - 1))
            .collect()
    }
}

impl From<Virtual> for usize {
    fn from(addr: Virtual) -> usize {
        addr.0
    }
}

impl core::fmt::Debug for Virtual {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Virtual({:#x})", self.0)
    }
}

impl core::fmt::Display for Virtual {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl core::fmt::LowerHex for Virtual {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_follow_the_address_space() {
        assert!(Virtual::try_new(0).is_some());
        assert!(Virtual::try_new(VIRTUAL_MEMORY_SIZE - 1).is_some());
        assert!(Virtual::try_new(VIRTUAL_MEMORY_SIZE).is_none());
    }

    #[test]
    fn decomposes_into_indices_and_offset() {
        let addr = Virtual::new(0xCAFE);
        assert_eq!(addr.offset(), 0xE);
        assert_eq!(addr.page().number(), 0xCAF);
        assert_eq!(addr.indices().as_slice(), &[0x0, 0xC, 0xA, 0xF]);
    }

    #[test]
    fn low_addresses_live_in_page_zero() {
        let addr = Virtual::new(13);
        assert_eq!(addr.offset(), 13);
        assert_eq!(addr.page().number(), 0);
        assert_eq!(addr.indices().as_slice(), &[0, 0, 0, 0]);
    }
}
