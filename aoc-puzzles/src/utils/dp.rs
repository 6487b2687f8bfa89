//! Memoized evaluation of values that depend on other values.
//!
//! A [`DpProblem`] states, for each index, which other indices it needs and
//! how to combine their values. [`DpCache`] resolves those dependencies on
//! demand and computes every index at most once.
//!
//! ```
//! use aoc_puzzles::utils::dp::{DpCache, DpProblem};
//!
//! struct Fibonacci;
//!
//! impl DpProblem<u64, u64> for Fibonacci {
//!     fn deps(&self, n: &u64) -> Vec<u64> {
//!         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
//!     }
//!
//!     fn compute(&self, n: &u64, deps: Vec<u64>) -> u64 {
//!         if *n <= 1 { *n } else { deps[0] + deps[1] }
//!     }
//! }
//!
//! let cache = DpCache::new(Fibonacci);
//! assert_eq!(cache.get(&90).unwrap(), 2880067194370816120);
//! ```
//!
//! An index that ends up depending on itself is reported as a
//! [`SolveError`] instead of being evaluated.

use aoc_core::SolveError;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

pub trait DpProblem<I, K> {
    /// Indices `index` depends on; empty for base cases
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value of `index` given the values of `deps(index)`, in the same order
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// Single-threaded memo table over a [`DpProblem`]
pub struct DpCache<I, K, P> {
    values: RefCell<HashMap<I, K>>,
    /// Indices whose dependencies are being resolved
    pending: RefCell<HashSet<I>>,
    problem: P,
}

impl<I, K, P> DpCache<I, K, P>
where
    I: Clone + Eq + Hash + Debug,
    K: Clone,
    P: DpProblem<I, K>,
{
    pub fn new(problem: P) -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
            pending: RefCell::new(HashSet::new()),
            problem,
        }
    }

    /// Value for `index`, computing it and its dependencies if needed.
    /// Fails if `index` is reached again while its dependencies resolve.
    pub fn get(&self, index: &I) -> Result<K, SolveError> {
        if let Some(value) = self.values.borrow().get(index) {
            return Ok(value.clone());
        }
        if !self.pending.borrow_mut().insert(index.clone()) {
            return Err(SolveError::failed(format!("{index:?} depends on itself")));
        }

        // no borrow is held while recursing
        let deps = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect::<Result<Vec<K>, _>>();
        self.pending.borrow_mut().remove(index);

        let value = self.problem.compute(index, deps?);
        self.values.borrow_mut().insert(index.clone(), value.clone());
        Ok(value)
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }
}
