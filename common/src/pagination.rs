//! Abstractions for page-based pagination.

/// A single page of `I`tems.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// [`Number`] of this [`Page`].
    pub number: Number,

    /// Indicator whether more [`Page`]s follow this one.
    pub has_more: bool,
}

impl<I> Page<I> {
    /// Returns the [`Number`] of the [`Page`] following this one, if any.
    #[must_use]
    pub fn next(&self) -> Option<Number> {
        self.has_more.then(|| self.number.next())
    }
}

/// 1-based number of a [`Page`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Number(usize);

impl Number {
    /// [`Number`] of the first [`Page`].
    pub const FIRST: Self = Self(1);

    /// Returns the [`Number`] following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns this [`Number`] as a [`usize`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::FIRST
    }
}

/// [`Page`] selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<F> {
    /// [`Number`] of the [`Page`] to select.
    pub number: Number,

    /// Additional filter being applied to the result.
    pub filter: F,
}

impl<F> Selector<F> {
    /// Creates a new [`Selector`] of the first [`Page`] matching the provided
    /// `filter`.
    #[must_use]
    pub fn first(filter: F) -> Self {
        Self {
            number: Number::FIRST,
            filter,
        }
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}
