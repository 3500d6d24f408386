#![forbid(unsafe_code)]

//! Sectioned collections: optional header, items, optional footer.

/// One section of a list or grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    pub header: Option<T>,
    pub items: Vec<T>,
    pub footer: Option<T>,
}

impl<T> Section<T> {
    /// A section with items only.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            header: None,
            items: items.into_iter().collect(),
            footer: None,
        }
    }

    #[must_use]
    pub fn header(mut self, header: T) -> Self {
        self.header = Some(header);
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: T) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Transform header, items and footer, keeping the structure.
    ///
    /// Header is visited first, then items in order, then footer.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Section<U> {
        let header = self.header.map(&mut f);
        let items = self.items.into_iter().map(&mut f).collect();
        let footer = self.footer.map(&mut f);
        Section {
            header,
            items,
            footer,
        }
    }

    /// Number of items, excluding header and footer.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            header: None,
            items: Vec::new(),
            footer: None,
        }
    }
}

/// Position of an item within sectioned data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}
