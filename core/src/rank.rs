//! Relevance weights for homograph ordering in search results.

use crate::record::Cell;

/// Default boost; keeps these dictionaries ahead in mixed search results.
pub const DEFAULT_POPULARITY_BOOST: i64 = 100;

/// Linear inversion of an explicit ordering field: order 1 ranks highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularityRanker {
    boost: i64,
}

impl PopularityRanker {
    pub fn new(boost: i64) -> Self {
        Self { boost }
    }

    pub fn boost(&self) -> i64 {
        self.boost
    }

    /// `boost - order` for an integer order, 0 when absent or malformed.
    pub fn rank(&self, order: Option<&Cell>) -> i64 {
        match order.and_then(Cell::as_integer) {
            Some(value) => self.boost.saturating_sub(value),
            None => 0,
        }
    }
}

impl Default for PopularityRanker {
    fn default() -> Self {
        Self::new(DEFAULT_POPULARITY_BOOST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_inverts_order() {
        let r = PopularityRanker::new(100);
        assert_eq!(r.rank(Some(&Cell::Number(1.0))), 99);
        assert_eq!(r.rank(Some(&Cell::Number(100.0))), 0);
        assert_eq!(r.rank(Some(&Cell::from("2"))), 98);
    }

    #[test]
    fn test_missing_or_malformed_order_is_zero() {
        let r = PopularityRanker::default();
        assert_eq!(r.rank(None), 0);
        assert_eq!(r.rank(Some(&Cell::from(""))), 0);
        assert_eq!(r.rank(Some(&Cell::from("一"))), 0);
        assert_eq!(r.rank(Some(&Cell::Number(1.5))), 0);
    }
}
