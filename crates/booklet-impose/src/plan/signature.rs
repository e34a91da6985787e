//! Sheet-slot calculation within a signature
//!
//! A signature is one nested fold unit. For a padded run of `n` entries,
//! sheet `i` (counted from the outermost sheet) peels the current range
//! from both ends:
//!
//! ```text
//! front: [n-1-2i, 2i]      (left, right)
//! back:  [2i+1, n-2-2i]    (left, right)
//! ```
//!
//! Printing the stack, folding once and nesting yields ascending logical
//! order when the booklet is opened page by page.

use super::SheetSidePlan;
use crate::constants::PAGES_PER_SHEET;
use crate::types::{ReadingOrder, SheetSide, SlotContent};

/// Compute the (front, back) side pairs for one signature.
///
/// `entries` must already be padded to a multiple of four. Sheet numbers
/// continue from `first_sheet_number` so they ascend across signatures.
pub(crate) fn signature_sheets(
    entries: &[SlotContent],
    signature: usize,
    first_sheet_number: usize,
    reading_order: ReadingOrder,
) -> Vec<(SheetSidePlan, SheetSidePlan)> {
    debug_assert_eq!(entries.len() % PAGES_PER_SHEET, 0);

    let n = entries.len();
    let sheets = n / PAGES_PER_SHEET;
    let mut out = Vec::with_capacity(sheets);

    for i in 0..sheets {
        let mut front_left = entries[n - 1 - 2 * i];
        let mut front_right = entries[2 * i];
        let mut back_left = entries[2 * i + 1];
        let mut back_right = entries[n - 2 - 2 * i];

        // Manga mirrors every slot pair; logical numbering is unchanged.
        if reading_order == ReadingOrder::Manga {
            std::mem::swap(&mut front_left, &mut front_right);
            std::mem::swap(&mut back_left, &mut back_right);
        }

        let sheet_number = first_sheet_number + i;
        out.push((
            SheetSidePlan {
                signature,
                sheet_number,
                side: SheetSide::Front,
                left: front_left,
                right: front_right,
            },
            SheetSidePlan {
                signature,
                sheet_number,
                side: SheetSide::Back,
                left: back_left,
                right: back_right,
            },
        ));
    }

    out
}

/// Distribute `total` entries across signatures.
///
/// The first `total % num_signatures` signatures take one extra entry,
/// then every size is rounded up to a multiple of four.
pub(crate) fn signature_sizes(total: usize, num_signatures: usize) -> Vec<usize> {
    let base = total / num_signatures;
    let remainder = total % num_signatures;

    (0..num_signatures)
        .map(|i| {
            let size = base + usize::from(i < remainder);
            ((size + PAGES_PER_SHEET - 1) / PAGES_PER_SHEET) * PAGES_PER_SHEET
        })
        .collect()
}
