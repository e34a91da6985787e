use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    #[error("Page index {index} out of range ({count} pages)")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("No pages to plan")]
    InvalidPageCount,
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Physical page-turn convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ReadingOrder {
    /// Left-to-right page turns (Western comics)
    #[default]
    Western,
    /// Right-to-left page turns (Manga)
    Manga,
}

/// Printing duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DuplexMode {
    /// Single alternating front/back sequence for duplex-capable printers
    #[default]
    Auto,
    /// Fronts and backs as separate runs for manual re-feeding
    Manual,
}

/// Which physical side of a printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

/// Which half of a split spread a page came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpreadSide {
    Left,
    Right,
    /// Not a spread half
    #[default]
    None,
}

/// Content of a single imposition slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotContent {
    /// A logical page index from the resolved selection
    Page(usize),
    /// Blank filler; a renderer emits an empty area
    Blank,
}

impl SlotContent {
    pub fn page_index(self) -> Option<usize> {
        match self {
            SlotContent::Page(index) => Some(index),
            SlotContent::Blank => None,
        }
    }

    pub fn is_blank(self) -> bool {
        matches!(self, SlotContent::Blank)
    }

    /// The identity run `0..count`, the planner input for a whole book.
    pub fn run(count: usize) -> Vec<SlotContent> {
        (0..count).map(SlotContent::Page).collect()
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    /// 11x17" landscape, the classic comic booklet sheet
    Tabloid,
    A3,
    Letter,
    A4,
    Legal,
    Custom { width_pt: f32, height_pt: f32 },
}

impl Default for PaperSize {
    fn default() -> Self {
        PaperSize::Tabloid
    }
}

impl PaperSize {
    /// Landscape dimensions in points (width, height).
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::Tabloid => (1224.0, 792.0),
            PaperSize::A3 => (1190.0, 842.0),
            PaperSize::Letter => (792.0, 612.0),
            PaperSize::A4 => (842.0, 595.0),
            PaperSize::Legal => (1008.0, 612.0),
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
        }
    }

    /// Width of one booklet page: half the sheet.
    pub fn half_width_pt(self) -> f32 {
        self.dimensions_pt().0 / 2.0
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Result of validation checks
///
/// Purely advisory: errors mark the result invalid, warnings do not.
/// The caller decides how to surface either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error message and mark the result invalid.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_valid && self.warnings.is_empty() {
            return "validation passed with no issues".to_string();
        }

        let mut parts = Vec::new();
        if !self.errors.is_empty() {
            parts.push(format!("{} error(s)", self.errors.len()));
        }
        if !self.warnings.is_empty() {
            parts.push(format!("{} warning(s)", self.warnings.len()));
        }
        parts.join(", ")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Statistics about a planned imposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpositionStatistics {
    /// Number of source entries (pages plus explicit blanks)
    pub source_pages: usize,
    /// Total number of physical sheets
    pub output_sheets: usize,
    /// Number of non-empty signatures
    pub signatures: usize,
    /// Padded page count per signature
    pub pages_per_signature: Vec<usize>,
    /// Printed sides (front and back of each sheet)
    pub output_sides: usize,
    /// Blank pages added for padding
    pub blank_pages_added: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_error_marks_invalid() {
        let mut result = ValidationResult::valid();
        result.add_error("boom");

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["boom".to_string()]);
    }

    #[test]
    fn test_add_warning_preserves_validity() {
        let mut result = ValidationResult::valid();
        result.add_warning("careful");

        assert!(result.is_valid);
        assert!(result.has_issues());
    }

    #[test]
    fn test_summary_counts() {
        let mut result = ValidationResult::valid();
        result.add_error("e");
        result.add_warning("w");

        let summary = result.summary();
        assert!(summary.contains("1 error(s)"));
        assert!(summary.contains("1 warning(s)"));
    }

    #[test]
    fn test_paper_sizes_are_landscape() {
        for size in [
            PaperSize::Tabloid,
            PaperSize::A3,
            PaperSize::Letter,
            PaperSize::A4,
            PaperSize::Legal,
        ] {
            let (w, h) = size.dimensions_pt();
            assert!(w > h, "{size:?} should be landscape");
        }
    }

    #[test]
    fn test_half_width() {
        assert_eq!(PaperSize::Tabloid.half_width_pt(), 612.0);
    }

    #[test]
    fn test_slot_content_run() {
        let run = SlotContent::run(3);
        assert_eq!(
            run,
            vec![
                SlotContent::Page(0),
                SlotContent::Page(1),
                SlotContent::Page(2)
            ]
        );
        assert!(!run[0].is_blank());
        assert_eq!(run[2].page_index(), Some(2));
        assert_eq!(SlotContent::Blank.page_index(), None);
    }
}
