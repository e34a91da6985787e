//! Double-page spread detection and splitting
//!
//! Detection is width-ratio based only: a page wide enough relative to the
//! document's standard page width is treated as a spread. No content
//! analysis is attempted. Splitting is an exact vertical midline cut with
//! no overlap or gutter correction.

use std::collections::BTreeMap;

use crate::model::{Page, PageModel, SourceRef, SpreadPair};
use crate::options::BookletOptions;
use crate::types::{ReadingOrder, Rect, Result, SpreadSide};

/// One half of a split spread: a clip region against the original source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadHalf {
    pub source: SourceRef,
    /// Region of the source page this half shows
    pub clip: Rect,
    pub side: SpreadSide,
}

/// Both halves of a split spread, in physical left/right position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitHalves {
    pub left: SpreadHalf,
    pub right: SpreadHalf,
}

/// Report for a whole-model splitting pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub original_pages: usize,
    pub output_pages: usize,
    pub splits_made: usize,
    /// The adjacent pairs recorded for each split, in document order
    pub split_pairs: Vec<SpreadPair>,
}

/// True when a page is wide enough to be treated as a double-page spread.
///
/// The test is the sole detection heuristic; page height is not consulted.
pub fn is_spread_candidate(
    page_width: f32,
    _page_height: f32,
    single_page_width_estimate: f32,
    multiplier: f32,
) -> bool {
    page_width >= single_page_width_estimate * multiplier
}

/// Cut a spread down the vertical midline into exact halves.
pub fn split(page_width: f32, page_height: f32, source: SourceRef) -> SplitHalves {
    let half_width = page_width / 2.0;
    SplitHalves {
        left: SpreadHalf {
            source,
            clip: Rect::new(0.0, 0.0, half_width, page_height),
            side: SpreadSide::Left,
        },
        right: SpreadHalf {
            source,
            clip: Rect::new(half_width, 0.0, half_width, page_height),
            side: SpreadSide::Right,
        },
    }
}

/// Order two halves by reading direction.
///
/// The first half of the returned pair takes the lower logical index on
/// insertion. Halves are identified by their side tag, so applying Manga
/// ordering and then Western ordering restores the original assignment.
pub fn order_for_reading_direction(
    a: SpreadHalf,
    b: SpreadHalf,
    order: ReadingOrder,
) -> (SpreadHalf, SpreadHalf) {
    let (left, right) = match a.side {
        SpreadSide::Right => (b, a),
        _ => (a, b),
    };
    match order {
        ReadingOrder::Western => (left, right),
        ReadingOrder::Manga => (right, left),
    }
}

/// Most common page width across a document, used as the single-page
/// width estimate for spread detection.
///
/// Widths are rounded to whole points before counting; ties break toward
/// the smaller width. Returns `None` for an empty document.
pub fn standard_page_width(widths: &[f32]) -> Option<f32> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for width in widths {
        *counts.entry(width.round() as i64).or_insert(0) += 1;
    }

    let mut best: Option<(i64, usize)> = None;
    for (width, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((width, count)),
        }
    }
    best.map(|(width, _)| width as f32)
}

/// Split every spread candidate in the model, in place.
///
/// `dimensions` supplies (width, height) in points per page, index-aligned
/// with the model; pages without a dimension entry are never split. Each
/// split replaces one page with its two halves, ordered for the configured
/// reading direction, and records the resulting pair.
pub fn split_all_spreads(
    model: &mut PageModel,
    dimensions: &[(f32, f32)],
    options: &BookletOptions,
) -> Result<SplitReport> {
    options.validate()?;

    let original_pages = model.len();
    let widths: Vec<f32> = dimensions.iter().map(|d| d.0).collect();

    let mut report = SplitReport {
        original_pages,
        output_pages: original_pages,
        splits_made: 0,
        split_pairs: Vec::new(),
    };

    let Some(standard_width) = standard_page_width(&widths) else {
        return Ok(report);
    };

    // Walk the original indices front to back; `offset` tracks how far
    // earlier splits have shifted the model.
    let mut offset = 0;
    for index in 0..original_pages {
        let Some(&(width, height)) = dimensions.get(index) else {
            continue;
        };
        if !is_spread_candidate(width, height, standard_width, options.split_width_multiplier) {
            continue;
        }

        let at = index + offset;
        let Some(source) = model.page(at).map(|p| p.source) else {
            continue;
        };

        let halves = split(width, height, source);
        let pair = model.insert_spread_halves(
            at,
            Page::spread_half(halves.left.source, halves.left.side),
            Page::spread_half(halves.right.source, halves.right.side),
            options.reading_order,
        )?;

        offset += 1;
        report.splits_made += 1;
        report.split_pairs.push(pair);
    }

    report.output_pages = model.len();
    log::debug!(
        "split {} spread(s): {} -> {} pages",
        report.splits_made,
        report.original_pages,
        report.output_pages
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpreadSide;

    #[test]
    fn test_candidate_threshold_is_inclusive() {
        assert!(is_spread_candidate(900.0, 1200.0, 600.0, 1.5));
        assert!(is_spread_candidate(1200.0, 1200.0, 600.0, 1.5));
        assert!(!is_spread_candidate(899.9, 1200.0, 600.0, 1.5));
    }

    #[test]
    fn test_split_is_exact_midline() {
        let halves = split(1200.0, 900.0, SourceRef(3));

        assert_eq!(halves.left.clip, Rect::new(0.0, 0.0, 600.0, 900.0));
        assert_eq!(halves.right.clip, Rect::new(600.0, 0.0, 600.0, 900.0));
        assert_eq!(halves.left.side, SpreadSide::Left);
        assert_eq!(halves.right.side, SpreadSide::Right);
        assert_eq!(halves.left.source, halves.right.source);
    }

    #[test]
    fn test_reading_direction_ordering() {
        let halves = split(1200.0, 900.0, SourceRef(0));

        let (first, second) =
            order_for_reading_direction(halves.left, halves.right, ReadingOrder::Western);
        assert_eq!(first.side, SpreadSide::Left);
        assert_eq!(second.side, SpreadSide::Right);

        let (first, second) =
            order_for_reading_direction(halves.left, halves.right, ReadingOrder::Manga);
        assert_eq!(first.side, SpreadSide::Right);
        assert_eq!(second.side, SpreadSide::Left);
    }

    #[test]
    fn test_order_round_trips_under_inversion() {
        let halves = split(1200.0, 900.0, SourceRef(0));

        let (a, b) = order_for_reading_direction(halves.left, halves.right, ReadingOrder::Manga);
        let (left, right) = order_for_reading_direction(a, b, ReadingOrder::Western);

        assert_eq!(left, halves.left);
        assert_eq!(right, halves.right);
    }

    #[test]
    fn test_standard_width_is_the_mode() {
        let widths = [612.0, 612.2, 611.8, 1224.0, 612.0];
        assert_eq!(standard_page_width(&widths), Some(612.0));
    }

    #[test]
    fn test_standard_width_tie_breaks_smaller() {
        let widths = [600.0, 600.0, 800.0, 800.0];
        assert_eq!(standard_page_width(&widths), Some(600.0));
    }

    #[test]
    fn test_standard_width_empty() {
        assert_eq!(standard_page_width(&[]), None);
    }

    fn model_with(count: usize) -> PageModel {
        PageModel::from_pages((0..count).map(|i| Page::new(SourceRef(i as u64))).collect())
    }

    #[test]
    fn test_split_all_spreads_single_candidate() {
        let mut model = model_with(3);
        let dims = [(612.0, 792.0), (1224.0, 792.0), (612.0, 792.0)];

        let report =
            split_all_spreads(&mut model, &dims, &BookletOptions::default()).unwrap();

        assert_eq!(report.original_pages, 3);
        assert_eq!(report.output_pages, 4);
        assert_eq!(report.splits_made, 1);
        assert_eq!(report.split_pairs, vec![SpreadPair::new(1, 2)]);

        assert_eq!(model.len(), 4);
        assert_eq!(model.page(1).unwrap().spread_side, SpreadSide::Left);
        assert_eq!(model.page(2).unwrap().spread_side, SpreadSide::Right);
        assert_eq!(model.page(3).unwrap().source, SourceRef(2));
        assert_eq!(model.spread_pairs(), report.split_pairs.as_slice());
    }

    #[test]
    fn test_split_all_spreads_multiple_candidates_keep_pairs_stable() {
        let mut model = model_with(4);
        let dims = [
            (1224.0, 792.0),
            (612.0, 792.0),
            (1224.0, 792.0),
            (612.0, 792.0),
        ];

        let report =
            split_all_spreads(&mut model, &dims, &BookletOptions::default()).unwrap();

        assert_eq!(report.splits_made, 2);
        assert_eq!(model.len(), 6);
        // First split lands at (0, 1); the second original candidate sat at
        // index 2 and shifted to 3.
        assert_eq!(
            report.split_pairs,
            vec![SpreadPair::new(0, 1), SpreadPair::new(3, 4)]
        );
    }

    #[test]
    fn test_split_all_spreads_manga_order() {
        let mut model = model_with(2);
        let dims = [(1224.0, 792.0), (612.0, 792.0)];
        let options = BookletOptions {
            reading_order: ReadingOrder::Manga,
            ..BookletOptions::default()
        };

        split_all_spreads(&mut model, &dims, &options).unwrap();

        assert_eq!(model.page(0).unwrap().spread_side, SpreadSide::Right);
        assert_eq!(model.page(1).unwrap().spread_side, SpreadSide::Left);
    }

    #[test]
    fn test_split_all_spreads_nothing_to_do() {
        let mut model = model_with(2);
        let dims = [(612.0, 792.0), (612.0, 792.0)];

        let report =
            split_all_spreads(&mut model, &dims, &BookletOptions::default()).unwrap();

        assert_eq!(report.splits_made, 0);
        assert_eq!(model.len(), 2);
    }
}
