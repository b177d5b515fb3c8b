use addr::{Frame, Page};
use config::{OFFSET_WIDTH, PAGE_SIZE, TABLES_DEPTH, WEIGHT_EVEN, WEIGHT_ODD};

use crate::phys::PhysicalMemory;

/// A resident data page selected for eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Victim {
    pub page: Page,
    pub frame: Frame,
}

/// Selects the data page to evict.
///
/// Every resident page is scored by the sum of the even/odd weights of the
/// frames on its root-to-page path (the root and the page frame included)
/// plus the even/odd weight of its page number. The page with the highest
/// score wins; equal scores resolve to the smaller page number.
///
/// Returns `None` when no data page is resident.
pub(super) fn select<M: PhysicalMemory>(memory: &M) -> Option<Victim> {
    let mut best = None;
    descend(memory, Frame::ROOT, 0, 0, 0, &mut best);
    best.map(|scored: Scored| Victim {
        page: Page::new(scored.page),
        frame: scored.frame,
    })
}

#[derive(Clone, Copy)]
struct Scored {
    weight: u64,
    page: usize,
    frame: Frame,
}

/// Depth-first walk of the table tree. The page number is rebuilt on the
/// way down by appending the slot index at every level; the running weight
/// and depth travel as arguments, so backtracking needs no undo step.
fn descend<M: PhysicalMemory>(
    memory: &M,
    frame: Frame,
    depth: usize,
    page: usize,
    weight: u64,
    best: &mut Option<Scored>,
) {
    let weight = weight + parity_weight(frame.index());

    if depth == TABLES_DEPTH {
        let weight = weight + parity_weight(page);
        let better = match best {
            None => true,
            Some(scored) => {
                weight > scored.weight || (weight == scored.weight && page < scored.page)
            }
        };
        if better {
            *best = Some(Scored {
                weight,
                page,
                frame,
            });
        }
        return;
    }

    for slot in 0..PAGE_SIZE {
        let entry = memory.read(frame.base() + slot);
        if entry != 0 {
            descend(
                memory,
                Frame::new(entry as usize),
                depth + 1,
                (page << OFFSET_WIDTH) | slot,
                weight,
                best,
            );
        }
    }
}

const fn parity_weight(number: usize) -> u64 {
    if number % 2 == 0 {
        WEIGHT_EVEN
    } else {
        WEIGHT_ODD
    }
}
