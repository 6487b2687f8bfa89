//! Puts results from parallel workers back into (year, day, part) order.
//!
//! Two min-heaps: the keys still expected, and the results that arrived
//! before their turn.

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Sort key; field order gives (year, day, part) ordering
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Wrapper for min-heap ordering of SolverResult
struct OrderedResult(SolverResult);

impl Ord for OrderedResult {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // reversed: BinaryHeap is a max-heap
        ResultKey::from(&other.0).cmp(&ResultKey::from(&self.0))
    }
}

impl PartialOrd for OrderedResult {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for OrderedResult {}

impl PartialEq for OrderedResult {
    fn eq(&self, other: &Self) -> bool {
        ResultKey::from(&self.0) == ResultKey::from(&other.0)
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Min-heap of expected keys (next to output is at top)
    expected: BinaryHeap<Reverse<ResultKey>>,
    /// Min-heap of received results waiting to be output
    pending: BinaryHeap<OrderedResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(OrderedResult(result));

        let mut ready = Vec::new();
        while let (Some(Reverse(next_expected)), Some(top_pending)) =
            (self.expected.peek(), self.pending.peek())
        {
            if ResultKey::from(&top_pending.0) != *next_expected {
                break;
            }
            self.expected.pop();
            if let Some(OrderedResult(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Whatever is still buffered, in order. Only non-empty when some
    /// expected result never arrived.
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut results: Vec<_> = self.pending.drain().map(|o| o.0).collect();
        results.sort_by_key(|r| ResultKey::from(r));
        results
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn make_result(k: ResultKey) -> SolverResult {
        SolverResult {
            year: k.year,
            day: k.day,
            part: k.part,
            answer: Ok(format!("{}_{}_{}", k.year, k.day, k.part)),
            parse_duration: None,
            solve_duration: TimeDelta::milliseconds(10),
        }
    }

    #[test]
    fn in_order_results_pass_straight_through() {
        let mut agg = ResultAggregator::new(vec![key(2020, 1, 1), key(2020, 1, 2)]);

        let ready = agg.add(make_result(key(2020, 1, 1)));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 1);

        let ready = agg.add(make_result(key(2020, 1, 2)));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 2);

        assert!(agg.is_complete());
    }

    #[test]
    fn early_results_wait_for_their_turn() {
        let mut agg = ResultAggregator::new(vec![
            key(2020, 25, 1),
            key(2023, 1, 1),
            key(2023, 1, 2),
        ]);

        assert!(agg.add(make_result(key(2023, 1, 2))).is_empty());
        assert!(agg.add(make_result(key(2023, 1, 1))).is_empty());

        let ready = agg.add(make_result(key(2020, 25, 1)));
        let keys: Vec<_> = ready.iter().map(ResultKey::from).collect();
        assert_eq!(keys, vec![key(2020, 25, 1), key(2023, 1, 1), key(2023, 1, 2)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn drain_returns_stragglers_sorted() {
        let mut agg = ResultAggregator::new(vec![key(2020, 1, 1), key(2020, 1, 2), key(2020, 2, 1)]);

        agg.add(make_result(key(2020, 2, 1)));
        agg.add(make_result(key(2020, 1, 2)));

        let remaining = agg.drain();
        let keys: Vec<_> = remaining.iter().map(ResultKey::from).collect();
        assert_eq!(keys, vec![key(2020, 1, 2), key(2020, 2, 1)]);
        assert!(!agg.is_complete());
    }

    proptest! {
        #[test]
        fn any_arrival_order_is_emitted_sorted(
            order in Just((1u8..=25).flat_map(|d| [key(2020, d, 1), key(2023, d, 2)]).collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let mut expected = order.clone();
            expected.sort();

            let mut agg = ResultAggregator::new(order.clone());
            let mut emitted = Vec::new();
            for k in order {
                emitted.extend(agg.add(make_result(k)).iter().map(ResultKey::from));
            }

            prop_assert!(agg.is_complete());
            prop_assert_eq!(emitted, expected);
        }
    }
}
