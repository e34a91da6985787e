//! Shared constants for booklet imposition
//!
//! This module centralizes magic numbers and thresholds used throughout
//! the planning and validation process.

// =============================================================================
// Sheet Geometry
// =============================================================================

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Logical pages carried by one folded sheet (two per side).
pub const PAGES_PER_SHEET: usize = 4;

// =============================================================================
// Spread Detection
// =============================================================================

/// Pages wider than `standard_width * multiplier` are treated as
/// double-page spread candidates.
pub const DEFAULT_SPLIT_WIDTH_MULTIPLIER: f32 = 1.5;

// =============================================================================
// Validation Thresholds
// =============================================================================

/// Selections above this page count get a thick-booklet warning.
pub const LARGE_SELECTION_WARNING: usize = 200;

/// More signatures than this get a fragile-booklet warning.
pub const MAX_COMFORTABLE_SIGNATURES: usize = 10;

/// Signatures averaging fewer pages than this get a warning.
pub const MIN_PAGES_PER_SIGNATURE: f32 = 4.0;
