use config::NUM_PAGES;

/// The number of a virtual page: a virtual address with its in-page offset
/// stripped. Page numbers identify pages in the backing store.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Page(pub(crate) usize);

impl Page {
    /// Creates a new `Page` from the given page number.
    ///
    /// # Panics
    /// Panics if the given number is not a valid page number, i.e. if it is
    /// greater than or equal to `NUM_PAGES`.
    #[must_use]
    pub const fn new(number: usize) -> Self {
        match Self::try_new(number) {
            None => panic!("Page number is outside of the virtual address space"),
            Some(page) => page,
        }
    }

    /// Creates a new `Page` if the given number is a valid page number.
    /// Returns `None` otherwise.
    #[must_use]
    pub const fn try_new(number: usize) -> Option<Self> {
        if number < NUM_PAGES {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Returns the page number.
    #[must_use]
    pub const fn number(self) -> usize {
        self.0
    }
}

impl From<Page> for usize {
    fn from(page: Page) -> usize {
        page.0
    }
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Page({})", self.0)
    }
}

impl core::fmt::Display for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
