use addr::Frame;
use config::{NUM_FRAMES, RAM_SIZE};

use crate::mm::{eviction, table};
use crate::phys::PhysicalMemory;

/// Produces a frame the caller may link into the table tree, trying three
/// strategies in order:
///
/// 1. unlink tables that have become empty, so their frames count as free;
/// 2. reuse an unreferenced frame below the allocation high-water mark, or
///    take the next never-touched frame above it;
/// 3. evict the data page picked by [`eviction::select`] and hand over its
///    frame.
///
/// The `keep` frame is never returned, unlinked, or reclaimed: it is the
/// frame the current translation walk just traversed or installed, and its
/// emptiness does not mean it is free.
///
/// The returned frame is still linked to nothing. The caller writes it into
/// the parent slot and either clears it (future table) or restores a page
/// into it (future data page).
///
/// # Panics
/// Panics if no strategy produces a frame, which the address-space geometry
/// precludes: the RAM holds at least one more frame than a full
/// root-to-page path needs, so when the reuse scan comes up empty at least
/// one data page is resident.
pub(super) fn find_frame<M: PhysicalMemory>(memory: &mut M, keep: Frame) -> Frame {
    table::unlink_empty(memory, keep);

    let highest = table::highest_linked(memory);
    for index in (1..=highest).rev() {
        let frame = Frame::new(index);
        if frame != keep && table::is_empty(memory, frame) && !table::holds_page(memory, frame) {
            return frame;
        }
    }
    if highest + 1 < NUM_FRAMES {
        return Frame::new(highest + 1);
    }

    let victim = eviction::select(memory).expect("RAM is full but holds no data page");
    debug_assert!(!victim.frame.is_root(), "eviction selected the root table");

    log::debug!("evicting page {} to free frame {}", victim.page, victim.frame);
    memory.evict(victim.frame, victim.page);
    unlink_everywhere(memory, victim.frame);
    victim.frame
}

/// Zeros every RAM word holding the given frame index, detaching the frame
/// from its parent slot.
fn unlink_everywhere<M: PhysicalMemory>(memory: &mut M, frame: Frame) {
    let needle = frame.word();
    for address in 0..RAM_SIZE {
        if memory.read(address) == needle {
            memory.write(address, 0);
        }
    }
}
