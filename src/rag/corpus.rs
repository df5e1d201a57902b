//! Corpus - the ordered, read-only page store
//!
//! Position `i` holds the page whose embedding has index handle `i`.

use crate::extract::PageRecord;
use crate::index::IndexHandle;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pages: Vec<PageRecord>,
}

impl Corpus {
    pub fn new(pages: Vec<PageRecord>) -> Self {
        Self { pages }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page for an index handle
    pub fn get(&self, handle: IndexHandle) -> Option<&PageRecord> {
        self.pages.get(handle as usize)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageRecord> {
        self.pages.iter()
    }

    /// Page texts in corpus order (embedding input)
    pub fn contents(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.content.clone()).collect()
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_lookup() {
        let corpus = Corpus::new(vec![PageRecord::new(1, "a"), PageRecord::new(2, "b")]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(1).map(|p| p.content.as_str()), Some("b"));
        assert!(corpus.get(2).is_none());
    }

    #[test]
    fn test_contents_in_order() {
        let corpus = Corpus::new(vec![PageRecord::new(1, "x"), PageRecord::new(2, "y")]);
        assert_eq!(corpus.contents(), vec!["x".to_string(), "y".to_string()]);
    }
}
