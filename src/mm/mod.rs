//! The translation layer: a page-table tree of fixed depth rooted at frame
//! 0, walked and extended on demand for every access.

use addr::{Frame, Virtual};
use config::Word;

use crate::phys::{PhysicalMemory, Ram};

mod allocator;
mod eviction;
mod table;

/// Error returned when accessing the virtual memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessError {
    /// The virtual address lies outside of the virtual address space.
    OutOfBounds,
}

/// A demand-paged virtual address space on top of a physical memory.
///
/// Virtual addresses resolve through a tree of page tables rooted at frame
/// 0. Tables and data pages are materialized on first touch; when no frame
/// is free, a resident page is evicted to the backing store and restored
/// transparently on its next access.
pub struct VirtualMemory<M = Ram> {
    memory: M,
}

impl<M: PhysicalMemory> VirtualMemory<M> {
    /// Creates a new address space on top of the given physical memory. The
    /// root table is cleared, so any tree the memory previously contained
    /// is discarded.
    #[must_use]
    pub fn new(memory: M) -> Self {
        let mut vm = Self { memory };
        vm.initialize();
        vm
    }

    /// Clears the root table, discarding every mapping. Other frames keep
    /// their stale contents until the allocator hands them out again; new
    /// tables are cleared and restored pages fully overwritten at that
    /// point.
    pub fn initialize(&mut self) {
        table::clear(&mut self.memory, Frame::ROOT);
    }

    /// Reads the word at the given virtual address.
    ///
    /// # Errors
    /// Returns [`AccessError::OutOfBounds`] if the address is greater than
    /// or equal to `VIRTUAL_MEMORY_SIZE`; neither the RAM nor the backing
    /// store is touched in that case.
    pub fn read(&mut self, address: usize) -> Result<Word, AccessError> {
        let address = Virtual::try_new(address).ok_or(AccessError::OutOfBounds)?;
        let frame = self.locate(address);
        Ok(self.memory.read(frame.base() + address.offset()))
    }

    /// Writes a word to the given virtual address.
    ///
    /// # Errors
    /// Returns [`AccessError::OutOfBounds`] if the address is greater than
    /// or equal to `VIRTUAL_MEMORY_SIZE`; neither the RAM nor the backing
    /// store is touched in that case.
    pub fn write(&mut self, address: usize, value: Word) -> Result<(), AccessError> {
        let address = Virtual::try_new(address).ok_or(AccessError::OutOfBounds)?;
        let frame = self.locate(address);
        self.memory.write(frame.base() + address.offset(), value);
        Ok(())
    }

    /// Returns a reference to the underlying physical memory.
    #[must_use]
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Consumes the address space and returns the underlying physical
    /// memory.
    #[must_use]
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Walks the table tree for the given address and returns the frame
    /// holding its data page, materializing missing tables along the way
    /// and restoring the page itself if its link was missing.
    ///
    /// `pinned` tracks the frame traversed or installed at the previous
    /// level: the allocator must not reclaim it even though a freshly
    /// installed table is still all zero.
    fn locate(&mut self, address: Virtual) -> Frame {
        let indices = address.indices();
        let mut current = Frame::ROOT;
        let mut pinned = Frame::ROOT;
        let mut faulted = false;

        for (level, &index) in indices.iter().enumerate() {
            let slot = current.base() + index;
            let entry = self.memory.read(slot);

            if entry == 0 {
                let frame = allocator::find_frame(&mut self.memory, pinned);
                self.memory.write(slot, frame.word());
                if level + 1 < indices.len() {
                    table::clear(&mut self.memory, frame);
                } else {
                    faulted = true;
                }
                current = frame;
            } else {
                current = Frame::new(entry as usize);
                faulted = false;
            }
            pinned = current;
        }

        if faulted {
            log::trace!(
                "page fault: restoring page {} into frame {}",
                address.page(),
                current
            );
            self.memory.restore(current, address.page());
        }
        current
    }
}

impl Default for VirtualMemory<Ram> {
    fn default() -> Self {
        Self::new(Ram::new())
    }
}
