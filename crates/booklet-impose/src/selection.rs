//! Page-selection expression parsing
//!
//! Grammar: comma-separated tokens, each a 1-based page number, an
//! inclusive `start-end` range, or a `b`/`blank` marker. Whitespace around
//! tokens is ignored. Problems are collected per token so the user sees
//! every issue in one pass; valid tokens still resolve.

use crate::types::SlotContent;

pub(crate) struct ParsedSelection {
    pub entries: Vec<SlotContent>,
    pub errors: Vec<String>,
}

pub(crate) fn parse_selection(expression: &str, total_pages: usize) -> ParsedSelection {
    let mut entries = Vec::new();
    let mut errors = Vec::new();

    for raw in expression.split(',') {
        let token = raw.trim();

        if token.is_empty() {
            errors.push("empty token in selection".to_string());
            continue;
        }

        if token.eq_ignore_ascii_case("b") || token.eq_ignore_ascii_case("blank") {
            entries.push(SlotContent::Blank);
            continue;
        }

        if let Some((start_str, end_str)) = token.split_once('-') {
            parse_range(token, start_str, end_str, total_pages, &mut entries, &mut errors);
        } else {
            match parse_page_number(token, total_pages) {
                Ok(page) => entries.push(SlotContent::Page(page - 1)),
                Err(message) => errors.push(message),
            }
        }
    }

    ParsedSelection { entries, errors }
}

fn parse_range(
    token: &str,
    start_str: &str,
    end_str: &str,
    total_pages: usize,
    entries: &mut Vec<SlotContent>,
    errors: &mut Vec<String>,
) {
    let start = start_str.trim().parse::<usize>();
    let end = end_str.trim().parse::<usize>();

    let (start, end) = match (start, end) {
        (Ok(start), Ok(end)) => (start, end),
        _ => {
            errors.push(format!("invalid page range '{token}'"));
            return;
        }
    };

    if start == 0 || end == 0 {
        errors.push(format!("page numbers are 1-based, got range '{token}'"));
        return;
    }
    if start > end {
        errors.push(format!("reversed page range '{token}'"));
        return;
    }
    if end > total_pages {
        errors.push(format!(
            "page range {start}-{end} out of range (document has {total_pages} pages)"
        ));
        return;
    }

    entries.extend((start..=end).map(|page| SlotContent::Page(page - 1)));
}

fn parse_page_number(token: &str, total_pages: usize) -> Result<usize, String> {
    let page = token
        .parse::<usize>()
        .map_err(|_| format!("invalid page number '{token}'"))?;

    if page == 0 {
        return Err(format!("page numbers are 1-based, got '{token}'"));
    }
    if page > total_pages {
        return Err(format!(
            "page {page} out of range (document has {total_pages} pages)"
        ));
    }
    Ok(page)
}
