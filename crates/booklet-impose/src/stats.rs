use crate::constants::PAGES_PER_SHEET;
use crate::options::BookletOptions;
use crate::plan::signature_sizes;
use crate::types::*;

/// Calculate statistics for an imposition without planning it.
///
/// `entry_count` is the resolved selection length, explicit blanks
/// included.
pub fn calculate_statistics(
    entry_count: usize,
    options: &BookletOptions,
) -> Result<ImpositionStatistics> {
    options.validate()?;

    if entry_count == 0 {
        return Err(ImposeError::InvalidPageCount);
    }

    let sizes: Vec<usize> = signature_sizes(entry_count, options.num_signatures)
        .into_iter()
        .filter(|&size| size > 0)
        .collect();

    let padded_count: usize = sizes.iter().sum();
    let total_sheets = padded_count / PAGES_PER_SHEET;

    Ok(ImpositionStatistics {
        source_pages: entry_count,
        output_sheets: total_sheets,
        signatures: sizes.len(),
        pages_per_signature: sizes,
        output_sides: total_sheets * 2,
        blank_pages_added: padded_count - entry_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_signature_stats() {
        let stats = calculate_statistics(10, &BookletOptions::default()).unwrap();

        assert_eq!(stats.source_pages, 10);
        assert_eq!(stats.output_sheets, 3);
        assert_eq!(stats.signatures, 1);
        assert_eq!(stats.pages_per_signature, vec![12]);
        assert_eq!(stats.output_sides, 6);
        assert_eq!(stats.blank_pages_added, 2);
    }

    #[test]
    fn test_multi_signature_stats() {
        let options = BookletOptions::default().with_signatures(2).unwrap();
        let stats = calculate_statistics(10, &options).unwrap();

        assert_eq!(stats.pages_per_signature, vec![8, 8]);
        assert_eq!(stats.output_sheets, 4);
        assert_eq!(stats.blank_pages_added, 6);
    }

    #[test]
    fn test_zero_pages_is_rejected() {
        let result = calculate_statistics(0, &BookletOptions::default());
        assert!(matches!(result, Err(ImposeError::InvalidPageCount)));
    }
}
