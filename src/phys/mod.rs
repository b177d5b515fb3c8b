//! The physical memory the translation layer runs against: word-addressable
//! RAM with page-granularity swapping to an infinite backing store.

use addr::{Frame, Page};
use config::Word;

pub mod ram;

pub use ram::Ram;

/// Word-addressable physical memory with page-granularity swapping.
///
/// The translation layer owns its physical memory exclusively and issues
/// one operation at a time. Data pages move to the backing store through
/// [`PhysicalMemory::evict`] and come back through
/// [`PhysicalMemory::restore`]; a page that was never evicted restores as
/// all zeros.
pub trait PhysicalMemory {
    /// Reads the word at the given physical word index.
    ///
    /// # Panics
    /// May panic if the index is outside of the RAM.
    fn read(&self, address: usize) -> Word;

    /// Writes a word at the given physical word index.
    ///
    /// # Panics
    /// May panic if the index is outside of the RAM.
    fn write(&mut self, address: usize, value: Word);

    /// Moves the data page held by `frame` out to the backing store, where
    /// it is persisted under its page number.
    fn evict(&mut self, frame: Frame, page: Page);

    /// Fills `frame` with the stored contents of `page`, or with zeros if
    /// the page was never evicted.
    fn restore(&mut self, frame: Frame, page: Page);
}
