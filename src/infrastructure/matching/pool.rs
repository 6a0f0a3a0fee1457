//! Waiting pool - ordered queue of users not committed to a forming team

use std::collections::BTreeSet;

use crate::domain::user::UserId;

/// Ordered collection of waiting user ids.
///
/// Enqueue is idempotent; extraction respects pool order and skips excluded
/// ids. The pool stores ids only - user records live in the engine's
/// canonical store.
#[derive(Debug, Default)]
pub struct WaitingPool {
    order: Vec<UserId>,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an id unless it is already waiting. Returns true when added.
    pub fn enqueue(&mut self, id: UserId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.order.push(id);
        true
    }

    /// Remove an id from the pool. Returns true when it was present.
    pub fn remove(&mut self, id: &UserId) -> bool {
        let before = self.order.len();
        self.order.retain(|u| u != id);
        self.order.len() < before
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.order.iter().any(|u| u == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Waiting ids in pool order
    pub fn ids(&self) -> &[UserId] {
        &self.order
    }

    /// Remove and return up to `n` ids in pool order, skipping any id in
    /// `exclude`. Returns fewer than `n` when the pool is exhausted.
    pub fn dequeue_eligible(&mut self, exclude: &BTreeSet<UserId>, n: usize) -> Vec<UserId> {
        let mut taken = Vec::with_capacity(n);
        let mut remaining = Vec::with_capacity(self.order.len());

        for id in self.order.drain(..) {
            if taken.len() < n && !exclude.contains(&id) {
                taken.push(id);
            } else {
                remaining.push(id);
            }
        }

        self.order = remaining;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn pool(names: &[&str]) -> WaitingPool {
        let mut pool = WaitingPool::new();
        for name in names {
            pool.enqueue(uid(name));
        }
        pool
    }

    #[test]
    fn test_enqueue_idempotent() {
        let mut pool = WaitingPool::new();
        assert!(pool.enqueue(uid("a")));
        assert!(!pool.enqueue(uid("a")));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_dequeue_respects_order() {
        let mut pool = pool(&["a", "b", "c", "d"]);
        let taken = pool.dequeue_eligible(&BTreeSet::new(), 2);

        assert_eq!(taken, vec![uid("a"), uid("b")]);
        assert_eq!(pool.ids(), &[uid("c"), uid("d")]);
    }

    #[test]
    fn test_dequeue_skips_excluded() {
        let mut pool = pool(&["a", "b", "c", "d"]);
        let exclude: BTreeSet<_> = [uid("a"), uid("c")].into();

        let taken = pool.dequeue_eligible(&exclude, 2);
        assert_eq!(taken, vec![uid("b"), uid("d")]);
        // excluded ids keep their place in the pool
        assert_eq!(pool.ids(), &[uid("a"), uid("c")]);
    }

    #[test]
    fn test_dequeue_exhausted_returns_fewer() {
        let mut pool = pool(&["a", "b"]);
        let taken = pool.dequeue_eligible(&BTreeSet::new(), 5);

        assert_eq!(taken.len(), 2);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_dequeue_all_excluded_returns_empty() {
        let mut pool = pool(&["a", "b"]);
        let exclude: BTreeSet<_> = [uid("a"), uid("b")].into();

        assert!(pool.dequeue_eligible(&exclude, 2).is_empty());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut pool = pool(&["a", "b", "c"]);
        assert!(pool.remove(&uid("b")));
        assert!(!pool.remove(&uid("b")));
        assert_eq!(pool.ids(), &[uid("a"), uid("c")]);
    }
}
