//! Card ordering engine
//!
//! The engine is a pure function from records to a permutation. Anything that
//! displays post cards plugs in through [`CardContainer`], which only has to
//! enumerate its cards and accept a new order.

use tracing::debug;

use super::{KeyStrategy, OrderingStrategy, PostRecord, SortKey};

/// Display-side collection of post cards
pub trait CardContainer {
    /// Ordering inputs for each card, in current display order
    fn records(&self) -> Vec<PostRecord>;

    /// Rearrange cards so that new position `i` holds the card previously at
    /// `order[i]`. `order` is always a permutation of `0..records().len()`.
    fn reorder(&mut self, order: &[usize]);
}

impl CardContainer for Vec<PostRecord> {
    fn records(&self) -> Vec<PostRecord> {
        self.clone()
    }

    fn reorder(&mut self, order: &[usize]) {
        let current = std::mem::take(self);
        *self = permute(current, order);
    }
}

/// What [`OrderingEngine::apply`] did to a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Fewer than two cards; nothing to order
    TooFew,
    /// Cards were already newest first
    AlreadyOrdered,
    /// Cards were rearranged; `moved` counts cards whose position changed
    Reordered { moved: usize },
}

/// Orders post records newest first using a prioritized key strategy chain
pub struct OrderingEngine {
    strategies: Vec<Box<dyn KeyStrategy>>,
}

impl Default for OrderingEngine {
    fn default() -> Self {
        Self::new(OrderingStrategy::default())
    }
}

impl std::fmt::Debug for OrderingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("OrderingEngine")
            .field("strategies", &names)
            .finish()
    }
}

impl OrderingEngine {
    /// Engine using one of the named strategy chains
    pub fn new(strategy: OrderingStrategy) -> Self {
        Self::with_strategies(strategy.chain())
    }

    /// Engine using a custom chain, highest priority first
    pub fn with_strategies(strategies: Vec<Box<dyn KeyStrategy>>) -> Self {
        Self { strategies }
    }

    /// First key any strategy yields, or [`SortKey::Missing`]
    pub fn sort_key(&self, record: &PostRecord) -> SortKey {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.derive(record))
            .unwrap_or(SortKey::Missing)
    }

    /// Permutation listing record indices from newest to oldest
    ///
    /// The sort is stable, so records with equal keys keep their input order
    /// and running the engine on its own output changes nothing.
    pub fn recency_order(&self, records: &[PostRecord]) -> Vec<usize> {
        let keys: Vec<SortKey> = records.iter().map(|r| self.sort_key(r)).collect();
        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by(|&a, &b| keys[b].cmp(&keys[a]));
        order
    }

    /// Sort arbitrary items newest first, reading each item's record via `record_of`
    pub fn sort_by_recency<T, F>(&self, items: Vec<T>, record_of: F) -> Vec<T>
    where
        F: Fn(&T) -> PostRecord,
    {
        if items.len() < 2 {
            return items;
        }
        let records: Vec<PostRecord> = items.iter().map(record_of).collect();
        let order = self.recency_order(&records);
        permute(items, &order)
    }

    /// Reorder a display container in place
    ///
    /// Never fails; a container with fewer than two cards is left untouched,
    /// and `reorder` is not called when the cards are already in order.
    pub fn apply<C>(&self, container: &mut C) -> ReorderOutcome
    where
        C: CardContainer + ?Sized,
    {
        let records = container.records();
        if records.len() < 2 {
            return ReorderOutcome::TooFew;
        }

        let order = self.recency_order(&records);
        let moved = order
            .iter()
            .enumerate()
            .filter(|(position, from)| position != *from)
            .count();

        if moved == 0 {
            debug!(cards = records.len(), "Post cards already in recency order");
            return ReorderOutcome::AlreadyOrdered;
        }

        container.reorder(&order);
        debug!(cards = records.len(), moved, "Reordered post cards by recency");
        ReorderOutcome::Reordered { moved }
    }
}

/// Move `items[order[i]]` to position `i`
fn permute<T>(items: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&from| slots.get_mut(from).and_then(Option::take))
        .collect()
}
