//! Page-list parsing for the page-selection capabilities.
//!
//! The wire syntax is the familiar `1,3,5-7` form: comma-separated single
//! pages or inclusive ranges, all 1-based.

/// Expand a page list like `1,3,5-7` against a document of `npages` pages.
///
/// Pages are returned in written order, duplicates preserved. Every page must
/// fall within 1..=npages and ranges must not be reversed.
pub fn parse_page_list(spec: &str, npages: u32) -> Result<Vec<u32>, String> {
    let mut pages = Vec::new();

    for piece in spec.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            return Err(format!("empty entry in page list '{}'", spec));
        }

        let (lo, hi) = match piece.split_once('-') {
            Some((a, b)) => (parse_page(a)?, parse_page(b)?),
            None => {
                let page = parse_page(piece)?;
                (page, page)
            }
        };

        if lo > hi {
            return Err(format!("reversed range '{}'", piece));
        }
        if hi > npages {
            return Err(format!(
                "page {} is out of range (document has {} pages)",
                hi, npages
            ));
        }

        pages.extend(lo..=hi);
    }

    if pages.is_empty() {
        return Err("page list is empty".to_string());
    }
    Ok(pages)
}

/// Pages of a document NOT named in `pages`, ascending.
pub fn complement(pages: &[u32], npages: u32) -> Vec<u32> {
    let named: std::collections::HashSet<u32> = pages.iter().copied().collect();
    (1..=npages).filter(|p| !named.contains(p)).collect()
}

/// Render a page sequence in qpdf's range syntax, compressing consecutive
/// runs (`[1,2,3,5]` becomes `1-3,5`).
pub fn to_range_syntax(pages: &[u32]) -> String {
    let mut out = String::new();
    let mut i = 0;

    while i < pages.len() {
        let start = pages[i];
        let mut end = start;
        while i + 1 < pages.len() && pages[i + 1] == end + 1 {
            end = pages[i + 1];
            i += 1;
        }
        if !out.is_empty() {
            out.push(',');
        }
        if start == end {
            out.push_str(&start.to_string());
        } else {
            out.push_str(&format!("{}-{}", start, end));
        }
        i += 1;
    }

    out
}

fn parse_page(text: &str) -> Result<u32, String> {
    let page: u32 = text
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a page number", text.trim()))?;
    if page == 0 {
        return Err("page numbers start at 1".to_string());
    }
    Ok(page)
}
