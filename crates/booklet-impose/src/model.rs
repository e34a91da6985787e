//! Page and spread data model
//!
//! The model owns page order and declared spread pairs, never pixel data:
//! every page holds an opaque handle into the external page source.

use crate::types::*;
use crate::validate::{SelectionOutcome, validate_selection};

/// Opaque handle to a page owned by the external page source.
///
/// The engine never dereferences it; dropping a page simply drops the
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRef(pub u64);

/// A single logical page in a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub source: SourceRef,
    pub spread_side: SpreadSide,
}

impl Page {
    pub fn new(source: SourceRef) -> Self {
        Self {
            source,
            spread_side: SpreadSide::None,
        }
    }

    pub fn spread_half(source: SourceRef, side: SpreadSide) -> Self {
        Self {
            source,
            spread_side: side,
        }
    }

    pub fn is_spread_half(&self) -> bool {
        self.spread_side != SpreadSide::None
    }
}

/// A declared double-page spread: two page indices in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadPair {
    first: usize,
    second: usize,
}

impl SpreadPair {
    /// Build a pair; argument order does not matter.
    pub fn new(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b, "a spread pair needs two distinct pages");
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn second(&self) -> usize {
        self.second
    }

    pub fn contains(&self, index: usize) -> bool {
        index == self.first || index == self.second
    }
}

/// Canonical ordered page list for a book, plus its declared spread pairs
///
/// Every structural mutation shifts subsequent indices and invalidates any
/// previously computed pairs or plans that hold the old indices; callers
/// re-validate and re-plan after editing. Mutations are all-or-nothing.
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    pages: Vec<Page>,
    spread_pairs: Vec<SpreadPair>,
}

impl PageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            pages,
            spread_pairs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn spread_pairs(&self) -> &[SpreadPair] {
        &self.spread_pairs
    }

    /// Spread tags for a book-order index sequence, for alignment checks.
    /// Indices outside the model report [`SpreadSide::None`].
    pub fn tags_for(&self, sequence: &[usize]) -> Vec<SpreadSide> {
        sequence
            .iter()
            .map(|&index| {
                self.pages
                    .get(index)
                    .map(|p| p.spread_side)
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Replace the page at `at` with the two halves of a split spread.
    ///
    /// Under Western reading order the left half takes the lower index,
    /// under Manga the right half does. The resulting adjacent pair is
    /// recorded and returned. Subsequent indices shift up by one; pairs
    /// declared earlier keep their now-stale indices for the caller to
    /// re-validate.
    pub fn insert_spread_halves(
        &mut self,
        at: usize,
        left: Page,
        right: Page,
        order: ReadingOrder,
    ) -> Result<SpreadPair> {
        if at >= self.pages.len() {
            return Err(ImposeError::IndexOutOfRange {
                index: at,
                count: self.pages.len(),
            });
        }

        let left = Page {
            spread_side: SpreadSide::Left,
            ..left
        };
        let right = Page {
            spread_side: SpreadSide::Right,
            ..right
        };
        let (first, second) = match order {
            ReadingOrder::Western => (left, right),
            ReadingOrder::Manga => (right, left),
        };

        self.pages.splice(at..=at, [first, second]);

        let pair = SpreadPair::new(at, at + 1);
        self.spread_pairs.push(pair);
        Ok(pair)
    }

    /// Remove one page, shifting subsequent indices down by one.
    ///
    /// Pairs that referenced the removed page are dissolved; the rest keep
    /// their now-stale indices for the caller to re-validate.
    pub fn remove_page(&mut self, index: usize) -> Result<Page> {
        if index >= self.pages.len() {
            return Err(ImposeError::IndexOutOfRange {
                index,
                count: self.pages.len(),
            });
        }

        let removed = self.pages.remove(index);
        self.spread_pairs.retain(|pair| !pair.contains(index));
        Ok(removed)
    }

    /// Declare a user-marked spread pair over two existing pages.
    pub fn declare_spread(&mut self, a: usize, b: usize) -> Result<SpreadPair> {
        for index in [a, b] {
            if index >= self.pages.len() {
                return Err(ImposeError::IndexOutOfRange {
                    index,
                    count: self.pages.len(),
                });
            }
        }

        let pair = SpreadPair::new(a, b);
        if !self.spread_pairs.contains(&pair) {
            self.spread_pairs.push(pair);
        }
        Ok(pair)
    }

    /// Dissolve a declared pair. Returns whether it existed.
    pub fn dissolve_spread(&mut self, pair: SpreadPair) -> bool {
        let before = self.spread_pairs.len();
        self.spread_pairs.retain(|p| *p != pair);
        self.spread_pairs.len() < before
    }
}

/// A single output book: a display name plus a page-selection expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDefinition {
    pub name: String,
    pub selection: String,
}

impl BookDefinition {
    pub fn new(name: impl Into<String>, selection: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selection: selection.into(),
        }
    }

    /// Resolve the selection against a page count. The planner receives
    /// the resolved snapshot, never the live model.
    pub fn resolve(&self, total_pages: usize) -> SelectionOutcome {
        validate_selection(&self.selection, total_pages)
    }
}
