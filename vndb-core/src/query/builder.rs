use std::iter;

use super::filter::{Condition, Filter, Reduction, Reductor};

/// Persistent builder for filter trees.
///
/// Every combinator returns a new builder and leaves the receiver untouched,
/// so a partially built filter can be branched freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBuilder {
    value: Filter,
}

impl FilterBuilder {
    /// Create a builder seeded with `seed` (use `Filter::empty()` for none)
    pub fn new(seed: Filter) -> Self {
        Self { value: seed }
    }

    /// Reduce the current value together with `operands` using `reductor`.
    ///
    /// Empty operands are dropped first. Nothing left yields the empty
    /// filter, a single survivor is returned as is, and two or more become
    /// one reduction node in `[current, ...operands]` order.
    pub fn reduce<I>(&self, reductor: Reductor, operands: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        let mut remaining: Vec<Condition> = iter::once(self.value.clone())
            .chain(operands)
            .filter_map(Filter::into_condition)
            .collect();

        let value = match remaining.len() {
            0 => Filter::empty(),
            1 => remaining.pop().map(Filter::from).unwrap_or_default(),
            _ => Filter::from(Condition::Reduction(Reduction::new(
                reductor, remaining,
            ))),
        };

        Self { value }
    }

    /// Conjoin with `operands`
    pub fn and<I>(&self, operands: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        self.reduce(Reductor::And, operands)
    }

    /// Disjoin with `operands`
    pub fn or<I>(&self, operands: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        self.reduce(Reductor::Or, operands)
    }

    pub fn get(&self) -> &Filter {
        &self.value
    }

    pub fn build(self) -> Filter {
        self.value
    }
}

impl From<Filter> for FilterBuilder {
    fn from(seed: Filter) -> Self {
        Self::new(seed)
    }
}
