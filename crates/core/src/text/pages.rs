//! Grouping of sentences into fixed-size pages.

use std::fmt;
use std::num::NonZeroUsize;

use thiserror::Error;

use crate::text::sentences::sentences;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PageError {
    #[error("sentences per page must be > 0")]
    ZeroPageSize,

    #[error("page index {index} is out of range for {len} pages")]
    IndexOutOfRange { index: usize, len: usize },
}

const DEFAULT_SENTENCES_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of sentences shown per page. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Sizes offered by the page size picker.
    pub const OPTIONS: [usize; 6] = [1, 3, 5, 10, 15, 20];

    pub const DEFAULT: PageSize = PageSize(DEFAULT_SENTENCES_PER_PAGE);

    /// # Errors
    ///
    /// Returns `PageError::ZeroPageSize` for 0.
    pub fn new(sentences: usize) -> Result<Self, PageError> {
        NonZeroUsize::new(sentences)
            .map(Self)
            .ok_or(PageError::ZeroPageSize)
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// True when the size is one of [`PageSize::OPTIONS`].
    #[must_use]
    pub fn is_option(self) -> bool {
        Self::OPTIONS.contains(&self.get())
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of sentences; never empty when produced by [`build_pages`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    sentences: Vec<String>,
}

impl Page {
    #[must_use]
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Ordered pages covering every sentence of a text exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page without clamping.
    ///
    /// # Errors
    ///
    /// Returns `PageError::IndexOutOfRange` when `index >= len()`; callers are
    /// expected to [`clamp_index`](Self::clamp_index) first.
    pub fn page(&self, index: usize) -> Result<&Page, PageError> {
        self.pages.get(index).ok_or(PageError::IndexOutOfRange {
            index,
            len: self.pages.len(),
        })
    }

    /// Clamp `index` into `[0, len - 1]`, or 0 for an empty set.
    #[must_use]
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.pages.len().saturating_sub(1))
    }

    /// All sentences in page order.
    pub fn sentences(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.sentences.iter().map(String::as_str))
    }
}

/// Partition `sentences` into consecutive pages of at most `size` sentences.
#[must_use]
pub fn build_pages<I, S>(sentences: I, size: PageSize) -> PageSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut pages = Vec::new();
    let mut current = Vec::with_capacity(size.get());

    for sentence in sentences {
        current.push(sentence.into());
        if current.len() == size.get() {
            pages.push(Page {
                sentences: std::mem::replace(&mut current, Vec::with_capacity(size.get())),
            });
        }
    }
    if !current.is_empty() {
        pages.push(Page { sentences: current });
    }

    PageSet { pages }
}

/// Split `text` into sentences and paginate them.
#[must_use]
pub fn paginate(text: &str, size: PageSize) -> PageSet {
    build_pages(sentences(text), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap()
    }

    fn page_texts(set: &PageSet) -> Vec<Vec<&str>> {
        set.pages()
            .iter()
            .map(|page| page.sentences().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(PageSize::new(0), Err(PageError::ZeroPageSize));
        assert_eq!(PageSize::default().get(), 5);
        assert!(PageSize::default().is_option());
        assert!(!size(7).is_option());
    }

    #[test]
    fn one_sentence_per_page() {
        let set = paginate("Hello world. How are you? Fine!", size(1));
        assert_eq!(
            page_texts(&set),
            vec![vec!["Hello world."], vec!["How are you?"], vec!["Fine!"]]
        );
    }

    #[test]
    fn last_page_may_be_short() {
        let set = paginate("A. B. C. D. E.", size(2));
        assert_eq!(
            page_texts(&set),
            vec![vec!["A.", "B."], vec!["C.", "D."], vec!["E."]]
        );
    }

    #[test]
    fn empty_sentences_build_no_pages() {
        let set = build_pages(Vec::<String>::new(), size(3));
        assert!(set.is_empty());
        assert_eq!(set.clamp_index(4), 0);
        assert_eq!(
            set.page(0),
            Err(PageError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn out_of_range_lookup_is_an_error() {
        let set = paginate("A. B. C.", size(2));
        assert!(set.page(1).is_ok());
        assert_eq!(
            set.page(2),
            Err(PageError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(set.clamp_index(9), 1);
    }

    #[test]
    fn sentences_flatten_in_order() {
        let set = paginate("A. B. C.", size(2));
        assert_eq!(set.sentences().collect::<Vec<_>>(), vec!["A.", "B.", "C."]);
    }
}
