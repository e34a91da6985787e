//! Booklet imposition planning
//!
//! This module maps a resolved page run onto physical sheet sides in
//! saddle-stitch fold order:
//! 1. Distribute entries across signatures and pad each to a multiple of 4
//! 2. Peel each signature's range from both ends into sheet fronts/backs
//! 3. Emit the sides in the order the configured duplex mode expects

mod signature;

pub(crate) use signature::signature_sizes;

use crate::options::BookletOptions;
use crate::types::{DuplexMode, ImposeError, ReadingOrder, Result, SheetSide, SlotContent};
use signature::signature_sheets;

/// One side of one physical sheet: two slots, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSidePlan {
    /// Which signature this sheet belongs to
    pub signature: usize,
    /// Physical sheet number, ascending across the whole plan
    pub sheet_number: usize,
    pub side: SheetSide,
    pub left: SlotContent,
    pub right: SlotContent,
}

impl SheetSidePlan {
    /// Slots in physical left-to-right order.
    pub fn slots(&self) -> [SlotContent; 2] {
        [self.left, self.right]
    }
}

/// A physical print plan, immutable once produced
///
/// `entries` is the exact sequence a printer consumes: alternating
/// front/back per sheet under [`DuplexMode::Auto`], or all fronts followed
/// by all backs in reverse sheet order under [`DuplexMode::Manual`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpositionPlan {
    entries: Vec<SheetSidePlan>,
    sheet_count: usize,
    signature_count: usize,
    blanks_added: usize,
    duplex_mode: DuplexMode,
    reading_order: ReadingOrder,
}

impl ImpositionPlan {
    pub fn entries(&self) -> &[SheetSidePlan] {
        &self.entries
    }

    pub fn sheet_count(&self) -> usize {
        self.sheet_count
    }

    pub fn signature_count(&self) -> usize {
        self.signature_count
    }

    /// Blank pages added to pad the signatures, not counting explicit
    /// blanks in the input.
    pub fn blanks_added(&self) -> usize {
        self.blanks_added
    }

    pub fn duplex_mode(&self) -> DuplexMode {
        self.duplex_mode
    }

    pub fn reading_order(&self) -> ReadingOrder {
        self.reading_order
    }
}

/// Plan a booklet for the given resolved entries.
///
/// `entries` is a snapshot of the book's resolved selection; explicit
/// blanks keep their positions and count toward signature sizes.
pub fn plan_booklet(entries: &[SlotContent], options: &BookletOptions) -> Result<ImpositionPlan> {
    options.validate()?;

    if entries.is_empty() {
        return Err(ImposeError::InvalidPageCount);
    }

    let sizes = signature_sizes(entries.len(), options.num_signatures);
    let total_needed: usize = sizes.iter().sum();

    let mut padded = entries.to_vec();
    padded.resize(total_needed, SlotContent::Blank);

    // Collect (front, back) per sheet, sheet numbers ascending globally.
    let mut sheets = Vec::with_capacity(total_needed / 4);
    let mut offset = 0;
    for (sig_index, &size) in sizes.iter().enumerate() {
        let run = &padded[offset..offset + size];
        offset += size;
        sheets.extend(signature_sheets(
            run,
            sig_index,
            sheets.len(),
            options.reading_order,
        ));
    }

    let plan_entries = match options.duplex_mode {
        DuplexMode::Auto => sheets
            .iter()
            .flat_map(|&(front, back)| [front, back])
            .collect(),
        DuplexMode::Manual => {
            // Fronts in sheet order, then backs in reverse sheet order: the
            // physical re-insertion order for a one-sided-fed stack.
            let mut sequence: Vec<SheetSidePlan> =
                sheets.iter().map(|&(front, _)| front).collect();
            sequence.extend(sheets.iter().rev().map(|&(_, back)| back));
            sequence
        }
    };

    log::debug!(
        "planned {} sheet(s) across {} signature(s), {} blank(s) added",
        sheets.len(),
        sizes.iter().filter(|&&s| s > 0).count(),
        total_needed - entries.len()
    );

    Ok(ImpositionPlan {
        sheet_count: sheets.len(),
        signature_count: sizes.iter().filter(|&&s| s > 0).count(),
        blanks_added: total_needed - entries.len(),
        duplex_mode: options.duplex_mode,
        reading_order: options.reading_order,
        entries: plan_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(n: usize, options: &BookletOptions) -> ImpositionPlan {
        plan_booklet(&SlotContent::run(n), options).unwrap()
    }

    fn side(plan: &ImpositionPlan, sheet: usize, side: SheetSide) -> SheetSidePlan {
        *plan
            .entries()
            .iter()
            .find(|e| e.sheet_number == sheet && e.side == side)
            .unwrap()
    }

    /// Un-impose: the logical sequence seen when physically turning pages
    /// of the folded, nested booklet. Single-signature, Western order.
    fn reading_sequence(plan: &ImpositionPlan) -> Vec<SlotContent> {
        let sheets = plan.sheet_count();
        let mut sequence = Vec::with_capacity(sheets * 4);
        for i in 0..sheets {
            sequence.push(side(plan, i, SheetSide::Front).right);
            sequence.push(side(plan, i, SheetSide::Back).left);
        }
        for i in (0..sheets).rev() {
            sequence.push(side(plan, i, SheetSide::Back).right);
            sequence.push(side(plan, i, SheetSide::Front).left);
        }
        sequence
    }

    #[test]
    fn test_sheet_and_blank_counts_for_all_small_n() {
        let options = BookletOptions::default();
        for n in 1..=32 {
            let plan = plan(n, &options);
            let expected_sheets = n.div_ceil(4);

            assert_eq!(plan.sheet_count(), expected_sheets, "n={n}");
            assert_eq!(plan.entries().len(), expected_sheets * 2, "n={n}");

            let slot_count: usize = plan.entries().iter().map(|e| e.slots().len()).sum();
            assert_eq!(slot_count, expected_sheets * 4, "n={n}");

            let blanks = plan
                .entries()
                .iter()
                .flat_map(|e| e.slots())
                .filter(|s| s.is_blank())
                .count();
            assert_eq!(blanks, expected_sheets * 4 - n, "n={n}");
            assert_eq!(plan.blanks_added(), expected_sheets * 4 - n, "n={n}");
        }
    }

    #[test]
    fn test_opening_order_is_ascending() {
        let options = BookletOptions::default();
        for n in [4, 8, 12, 5, 6, 7] {
            let sequence = reading_sequence(&plan(n, &options));

            let pages: Vec<usize> = sequence.iter().filter_map(|s| s.page_index()).collect();
            assert_eq!(pages, (0..n).collect::<Vec<_>>(), "n={n}");

            // Blanks only at the end of the turn order.
            let first_blank = sequence
                .iter()
                .position(|s| s.is_blank())
                .unwrap_or(sequence.len());
            assert!(
                sequence[first_blank..].iter().all(|s| s.is_blank()),
                "n={n}"
            );
        }
    }

    #[test]
    fn test_known_layout_for_eight_pages() {
        let plan = plan(8, &BookletOptions::default());
        let entries = plan.entries();

        // Auto duplex: front then back per sheet, ascending sheets.
        assert_eq!(entries[0].slots(), [SlotContent::Page(7), SlotContent::Page(0)]);
        assert_eq!(entries[1].slots(), [SlotContent::Page(1), SlotContent::Page(6)]);
        assert_eq!(entries[2].slots(), [SlotContent::Page(5), SlotContent::Page(2)]);
        assert_eq!(entries[3].slots(), [SlotContent::Page(3), SlotContent::Page(4)]);
    }

    #[test]
    fn test_manual_duplex_reverses_backs() {
        let options = BookletOptions {
            duplex_mode: DuplexMode::Manual,
            ..BookletOptions::default()
        };

        for (n, sheets) in [(8, 2), (16, 4)] {
            let plan = plan(n, &options);
            let numbers: Vec<(SheetSide, usize)> = plan
                .entries()
                .iter()
                .map(|e| (e.side, e.sheet_number))
                .collect();

            let mut expected: Vec<(SheetSide, usize)> =
                (0..sheets).map(|i| (SheetSide::Front, i)).collect();
            expected.extend((0..sheets).rev().map(|i| (SheetSide::Back, i)));
            assert_eq!(numbers, expected, "n={n}");
        }
    }

    #[test]
    fn test_manga_is_the_mirror_of_western() {
        for duplex_mode in [DuplexMode::Auto, DuplexMode::Manual] {
            for n in [4, 6, 8, 13] {
                let western = plan(
                    n,
                    &BookletOptions {
                        duplex_mode,
                        ..BookletOptions::default()
                    },
                );
                let manga = plan(
                    n,
                    &BookletOptions {
                        duplex_mode,
                        reading_order: ReadingOrder::Manga,
                        ..BookletOptions::default()
                    },
                );

                for (w, m) in western.entries().iter().zip(manga.entries()) {
                    assert_eq!(m.left, w.right, "n={n}");
                    assert_eq!(m.right, w.left, "n={n}");
                    assert_eq!(m.sheet_number, w.sheet_number, "n={n}");
                }
            }
        }
    }

    #[test]
    fn test_explicit_blanks_keep_their_positions() {
        // blank, pages 0-1, blank: the leading blank takes the cover slot.
        let entries = [
            SlotContent::Blank,
            SlotContent::Page(0),
            SlotContent::Page(1),
            SlotContent::Blank,
        ];
        let plan = plan_booklet(&entries, &BookletOptions::default()).unwrap();

        let front = plan.entries()[0];
        assert_eq!(front.slots(), [SlotContent::Blank, SlotContent::Blank]);
        let back = plan.entries()[1];
        assert_eq!(back.slots(), [SlotContent::Page(0), SlotContent::Page(1)]);
        assert_eq!(plan.blanks_added(), 0);
    }

    #[test]
    fn test_two_signatures_split_the_run() {
        let options = BookletOptions::default().with_signatures(2).unwrap();
        let plan = plan(8, &options);

        assert_eq!(plan.signature_count(), 2);
        assert_eq!(plan.sheet_count(), 2);

        // Each signature folds independently over its own 4-page run.
        let first_front = side(&plan, 0, SheetSide::Front);
        assert_eq!(first_front.signature, 0);
        assert_eq!(
            first_front.slots(),
            [SlotContent::Page(3), SlotContent::Page(0)]
        );

        let second_front = side(&plan, 1, SheetSide::Front);
        assert_eq!(second_front.signature, 1);
        assert_eq!(
            second_front.slots(),
            [SlotContent::Page(7), SlotContent::Page(4)]
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = plan_booklet(&[], &BookletOptions::default());
        assert!(matches!(result, Err(ImposeError::InvalidPageCount)));
    }

    #[test]
    fn test_invalid_options_are_rejected_before_planning() {
        let options = BookletOptions {
            split_width_multiplier: 0.5,
            ..BookletOptions::default()
        };
        let result = plan_booklet(&SlotContent::run(4), &options);
        assert!(matches!(result, Err(ImposeError::InvalidOptions(_))));
    }
}
