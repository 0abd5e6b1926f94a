//! # Display Indexes
//!
//! Document ids are opaque and long, so the client shows 1-based positions
//! instead. Positions follow index (insertion) order after reconciliation, so
//! `2` means "the second document `list` would show without filters".
//!
//! A selector is either such a position, a range of positions (`2-4`), or a
//! raw id. Anything that does not parse as a position is taken as an id.

use crate::model::Document;

/// A document paired with its 1-based display position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDocument {
    pub index: usize,
    pub document: Document,
}

/// A user input that picks a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocSelector {
    Index(usize),
    /// Inclusive range of positions. Kept unexpanded until resolved against
    /// an actual list, so its size is bounded by the number of documents.
    Range(usize, usize),
    Id(String),
}

impl std::fmt::Display for DocSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocSelector::Index(i) => write!(f, "{}", i),
            DocSelector::Range(start, end) => write!(f, "{}-{}", start, end),
            DocSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Assigns display positions in the given order.
pub fn index_documents(documents: Vec<Document>) -> Vec<DisplayDocument> {
    documents
        .into_iter()
        .enumerate()
        .map(|(i, document)| DisplayDocument {
            index: i + 1,
            document,
        })
        .collect()
}

fn parse_position(s: &str) -> Option<usize> {
    s.parse::<usize>().ok().filter(|n| *n > 0)
}

/// Parses one input. `start-end` becomes a single [`DocSelector::Range`].
pub fn parse_selector(input: &str) -> Result<Vec<DocSelector>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty selector".to_string());
    }
    if let Some(n) = parse_position(input) {
        return Ok(vec![DocSelector::Index(n)]);
    }
    if let Some((start, end)) = input.split_once('-') {
        if let (Some(start), Some(end)) = (parse_position(start), parse_position(end)) {
            if start > end {
                return Err(format!("Invalid range {}: start is after end", input));
            }
            if start == end {
                return Ok(vec![DocSelector::Index(start)]);
            }
            return Ok(vec![DocSelector::Range(start, end)]);
        }
    }
    if input.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid index: {}", input));
    }
    Ok(vec![DocSelector::Id(input.to_string())])
}

/// Parses many inputs, dropping repeated selectors while keeping first-seen
/// order. Overlaps between different selectors are settled at resolution.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DocSelector>, String> {
    let mut selectors = Vec::new();
    for input in inputs {
        for selector in parse_selector(input.as_ref())? {
            if !selectors.contains(&selector) {
                selectors.push(selector);
            }
        }
    }
    Ok(selectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentType;

    #[test]
    fn positions_are_one_based() {
        let docs = vec![
            Document::new("A", DocumentType::Pdf, "Personal", "/a"),
            Document::new("B", DocumentType::Image, "Salud", "/b"),
        ];
        let indexed = index_documents(docs);
        assert_eq!(indexed[0].index, 1);
        assert_eq!(indexed[1].index, 2);
        assert_eq!(indexed[1].document.name, "B");
    }

    #[test]
    fn parses_single_index() {
        assert_eq!(parse_selector("3").unwrap(), vec![DocSelector::Index(3)]);
    }

    #[test]
    fn parses_range() {
        assert_eq!(
            parse_selector("2-4").unwrap(),
            vec![DocSelector::Range(2, 4)]
        );
        assert_eq!(parse_selector("3-3").unwrap(), vec![DocSelector::Index(3)]);
    }

    #[test]
    fn huge_ranges_stay_unexpanded() {
        let input = format!("1-{}", usize::MAX / 4);
        assert_eq!(
            parse_selectors(&[input]).unwrap(),
            vec![DocSelector::Range(1, usize::MAX / 4)]
        );
    }

    #[test]
    fn rejects_backwards_range_and_zero() {
        assert!(parse_selector("4-2").is_err());
        assert!(parse_selector("0").is_err());
        assert!(parse_selector("").is_err());
    }

    #[test]
    fn uuids_are_ids() {
        let id = "0b5f6f4e-4a4f-4c1e-9a51-1f2d3c4b5a69";
        assert_eq!(
            parse_selector(id).unwrap(),
            vec![DocSelector::Id(id.to_string())]
        );
    }

    #[test]
    fn dedupes_preserving_order() {
        let selectors = parse_selectors(&["2", "1-3", "2", "1-3"]).unwrap();
        assert_eq!(
            selectors,
            vec![DocSelector::Index(2), DocSelector::Range(1, 3)]
        );
    }
}
