//! Booklet validators
//!
//! Pure queries over page sequences, spread pairs, and options. Problems
//! are collected into [`ValidationResult`] lists instead of failing fast,
//! so a user sees everything in one pass; how and when to surface them is
//! the caller's decision.

use crate::constants::{
    LARGE_SELECTION_WARNING, MAX_COMFORTABLE_SIGNATURES, MIN_PAGES_PER_SIGNATURE,
};
use crate::model::SpreadPair;
use crate::options::BookletOptions;
use crate::selection::parse_selection;
use crate::types::{ReadingOrder, SlotContent, SpreadSide, ValidationResult};

/// Alignment report for one declared spread pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadAlignment {
    pub pair: SpreadPair,
    /// Position of the pair's lower page in the sequence, when present
    pub position_of_first: Option<usize>,
    /// Position of the pair's higher page in the sequence, when present
    pub position_of_second: Option<usize>,
    /// Whether the halves will print side by side in reading order
    pub is_aligned: bool,
    /// Set when either page of the pair is missing from the sequence;
    /// expected transiently after edits, never an error
    pub orphaned: bool,
}

/// Outcome of resolving a selection expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub validation: ValidationResult,
    /// Resolved entries in selection order, explicit blanks included
    pub entries: Vec<SlotContent>,
    /// 0-based page indices, deduplicated, first occurrence winning
    pub indices: Vec<usize>,
}

/// Check whether each declared spread pair still prints correctly aligned.
///
/// `pages` is the book-order sequence of page indices and `tags` the
/// matching spread-side tag per position (see [`PageModel::tags_for`]).
/// A pair is aligned when its second page directly follows its first and
/// the tags match the reading order; a pair with a missing page is
/// reported orphaned without disturbing the remaining pairs. Never
/// mutates its inputs.
///
/// [`PageModel::tags_for`]: crate::model::PageModel::tags_for
pub fn check_spread_alignment(
    pages: &[usize],
    tags: &[SpreadSide],
    pairs: &[SpreadPair],
    reading_order: ReadingOrder,
) -> Vec<SpreadAlignment> {
    pairs
        .iter()
        .map(|&pair| {
            let position_of_first = pages.iter().position(|&p| p == pair.first());
            let position_of_second = pages.iter().position(|&p| p == pair.second());

            let (Some(first), Some(second)) = (position_of_first, position_of_second) else {
                return SpreadAlignment {
                    pair,
                    position_of_first,
                    position_of_second,
                    is_aligned: false,
                    orphaned: true,
                };
            };

            let adjacent = second > first && second - first == 1;
            let is_aligned = adjacent
                && tag_order_matches(tag_at(tags, first), tag_at(tags, second), reading_order);

            SpreadAlignment {
                pair,
                position_of_first: Some(first),
                position_of_second: Some(second),
                is_aligned,
                orphaned: false,
            }
        })
        .collect()
}

fn tag_at(tags: &[SpreadSide], position: usize) -> SpreadSide {
    tags.get(position).copied().unwrap_or_default()
}

fn tag_order_matches(first: SpreadSide, second: SpreadSide, order: ReadingOrder) -> bool {
    // Untagged pairs (user-declared over ordinary pages) have no tag order
    // to violate.
    if first == SpreadSide::None && second == SpreadSide::None {
        return true;
    }

    let expected = match order {
        ReadingOrder::Western => (SpreadSide::Left, SpreadSide::Right),
        ReadingOrder::Manga => (SpreadSide::Right, SpreadSide::Left),
    };
    (first, second) == expected
}

/// Parse and validate a selection expression against the page count.
///
/// Errors are collected per token and valid tokens still resolve, so a
/// partially broken expression reports every problem and the pages it
/// could mean.
pub fn validate_selection(expression: &str, total_pages: usize) -> SelectionOutcome {
    let mut validation = ValidationResult::valid();

    if expression.trim().is_empty() {
        validation.add_error("page selection cannot be empty");
        return SelectionOutcome {
            validation,
            entries: Vec::new(),
            indices: Vec::new(),
        };
    }

    let parsed = parse_selection(expression, total_pages);
    for error in parsed.errors {
        validation.add_error(error);
    }

    // Deduplicate pages, first occurrence wins; blanks are never deduped.
    let mut seen = vec![false; total_pages];
    let mut entries = Vec::with_capacity(parsed.entries.len());
    let mut indices = Vec::new();
    for entry in parsed.entries {
        match entry {
            SlotContent::Page(index) => {
                if !seen[index] {
                    seen[index] = true;
                    entries.push(entry);
                    indices.push(index);
                }
            }
            SlotContent::Blank => entries.push(entry),
        }
    }

    if entries.is_empty() && validation.is_valid {
        validation.add_error("no pages selected");
    }

    if indices.len() > LARGE_SELECTION_WARNING {
        validation.add_warning(format!(
            "large selection ({} pages) may result in a booklet that is difficult to bind",
            indices.len()
        ));
    }

    SelectionOutcome {
        validation,
        entries,
        indices,
    }
}

/// Validate booklet options, collecting problems instead of failing fast.
///
/// `page_count` enables the signature-distribution warnings; pass `None`
/// when no selection is resolved yet.
pub fn validate_booklet_options(
    options: &BookletOptions,
    page_count: Option<usize>,
) -> ValidationResult {
    let mut result = ValidationResult::valid();

    let (width, height) = options.paper_size.dimensions_pt();
    if !(width > 0.0 && height > 0.0) {
        result.add_error(format!(
            "paper size must be strictly positive, got {width}x{height} pt"
        ));
    }

    if !(options.split_width_multiplier > 1.0) {
        result.add_error(format!(
            "split width multiplier must be greater than 1.0, got {}",
            options.split_width_multiplier
        ));
    }

    if options.num_signatures < 1 {
        result.add_error("number of signatures must be at least 1");
    } else if options.num_signatures > MAX_COMFORTABLE_SIGNATURES {
        result.add_warning(format!(
            "{} signatures may result in thin, fragile booklets",
            options.num_signatures
        ));
    }

    if let Some(pages) = page_count {
        if pages > 0 && options.num_signatures > 1 {
            let per_signature = pages as f32 / options.num_signatures as f32;
            if per_signature < MIN_PAGES_PER_SIGNATURE {
                result.add_warning(format!(
                    "each signature will have only ~{per_signature:.1} pages; consider reducing the signature count"
                ));
            }
        }
    }

    result
}
