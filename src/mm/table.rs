use addr::Frame;
use config::{PAGE_SIZE, TABLES_DEPTH};

use crate::phys::PhysicalMemory;

/// Fills the given frame with zeros, turning it into an empty table.
pub(super) fn clear<M: PhysicalMemory>(memory: &mut M, frame: Frame) {
    for word in 0..PAGE_SIZE {
        memory.write(frame.base() + word, 0);
    }
}

/// Returns `true` if every word of the given frame reads as zero.
///
/// An empty frame is not necessarily free: a data page whose words are all
/// zero is empty, yet its frame is still referenced from a leaf-table slot.
/// Pair this with [`holds_page`] before treating a frame as reusable.
pub(super) fn is_empty<M: PhysicalMemory>(memory: &M, frame: Frame) -> bool {
    (0..PAGE_SIZE).all(|word| memory.read(frame.base() + word) == 0)
}

/// Returns `true` if the given frame currently holds a data page, i.e. if
/// some leaf-table slot of the tree rooted at frame 0 references it.
pub(super) fn holds_page<M: PhysicalMemory>(memory: &M, frame: Frame) -> bool {
    search_pages(memory, Frame::ROOT, frame, 0)
}

fn search_pages<M: PhysicalMemory>(memory: &M, node: Frame, target: Frame, depth: usize) -> bool {
    if depth == TABLES_DEPTH {
        return node == target;
    }

    (0..PAGE_SIZE).any(|slot| {
        let entry = memory.read(node.base() + slot);
        entry != 0 && search_pages(memory, Frame::new(entry as usize), target, depth + 1)
    })
}

/// Returns the highest frame index referenced from any table slot, or 0 if
/// the root table has no children.
pub(super) fn highest_linked<M: PhysicalMemory>(memory: &M) -> usize {
    let mut highest = 0;
    scan_links(memory, Frame::ROOT, 0, &mut highest);
    highest
}

fn scan_links<M: PhysicalMemory>(memory: &M, node: Frame, depth: usize, highest: &mut usize) {
    if depth == TABLES_DEPTH {
        return;
    }

    for slot in 0..PAGE_SIZE {
        let entry = memory.read(node.base() + slot);
        if entry != 0 {
            let child = Frame::new(entry as usize);
            *highest = (*highest).max(child.index());
            scan_links(memory, child, depth + 1, highest);
        }
    }
}

/// Unlinks every table that has become empty from its parent slot, freeing
/// its frame for reuse. Children are processed before their parent, so a
/// chain of tables emptied from below is unlinked in a single pass.
///
/// The `keep` frame stays linked even when empty: a table just materialized
/// for the translation in progress is legitimately all zero.
pub(super) fn unlink_empty<M: PhysicalMemory>(memory: &mut M, keep: Frame) {
    unlink_below(memory, Frame::ROOT, 0, keep);
}

fn unlink_below<M: PhysicalMemory>(memory: &mut M, node: Frame, depth: usize, keep: Frame) {
    // Leaf-table slots reference data pages, and an all-zero data page is
    // still live. Stop above them.
    if depth == TABLES_DEPTH - 1 {
        return;
    }

    for slot in 0..PAGE_SIZE {
        let address = node.base() + slot;
        let entry = memory.read(address);
        if entry != 0 {
            let child = Frame::new(entry as usize);
            unlink_below(memory, child, depth + 1, keep);

            if child != keep && is_empty(memory, child) {
                memory.write(address, 0);
            }
        }
    }
}
