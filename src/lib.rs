//! A demand-paged virtual memory simulator.
//!
//! Virtual addresses are resolved through a hierarchical page-table tree of
//! fixed depth stored inside a small simulated RAM. The tree is built
//! lazily: the translation walk materializes missing tables and data pages
//! as it descends, and when every frame is occupied a weighted traversal of
//! the tree picks a resident page to swap out to the backing store. Evicted
//! pages are restored transparently on their next access.
//!
//! The address-space geometry (offset width, table depth, frame count) and
//! the eviction weights are fixed at build time by the `germanium-config`
//! crate.

pub mod mm;
pub mod phys;

pub use addr::{Frame, Page, Virtual};
pub use config::Word;
pub use mm::{AccessError, VirtualMemory};
pub use phys::{PhysicalMemory, Ram};
