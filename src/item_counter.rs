// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use fnv::FnvHashMap;
use std::hash::Hash;

/// Minimum support threshold for mining, either as a fraction of the number
/// of transactions or as an absolute transaction count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MinSupport {
    Fraction(f64),
    Count(u32),
}

impl MinSupport {
    /// Converts the threshold into an absolute count. Fractions are
    /// truncated; negative and NaN fractions resolve to 0, which lets every
    /// item through.
    pub fn resolve(&self, num_transactions: usize) -> u32 {
        match *self {
            MinSupport::Fraction(fraction) => (fraction * num_transactions as f64) as u32,
            MinSupport::Count(count) => count,
        }
    }
}

impl From<f64> for MinSupport {
    // Values up to 1 are fractions, anything larger is a count.
    fn from(value: f64) -> MinSupport {
        if value <= 1.0 || value.is_nan() {
            MinSupport::Fraction(value)
        } else {
            MinSupport::Count(value.ceil() as u32)
        }
    }
}

impl From<u32> for MinSupport {
    // 0 and 1 follow the same fraction rule as floats.
    fn from(value: u32) -> MinSupport {
        if value <= 1 {
            MinSupport::Fraction(value as f64)
        } else {
            MinSupport::Count(value)
        }
    }
}

/// Global occurrence counts of items across a set of transactions.
pub struct ItemCounter<T> {
    counter: FnvHashMap<T, u32>,
}

impl<T> ItemCounter<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> ItemCounter<T> {
        ItemCounter {
            counter: FnvHashMap::default(),
        }
    }

    pub fn from_transactions<Tx>(transactions: &[Tx]) -> ItemCounter<T>
    where
        Tx: AsRef<[T]>,
    {
        let mut counter = ItemCounter::new();
        for transaction in transactions {
            for item in transaction.as_ref() {
                counter.add(item, 1);
            }
        }
        counter
    }

    pub fn add(&mut self, item: &T, count: u32) {
        match self.counter.get_mut(item) {
            Some(total) => *total += count,
            None => {
                self.counter.insert(item.clone(), count);
            }
        }
    }

    pub fn get(&self, item: &T) -> u32 {
        match self.counter.get(item) {
            Some(count) => *count,
            None => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.counter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counter.is_empty()
    }

    /// Drops every item whose count is below `min_count`.
    pub fn retain_at_least(&mut self, min_count: u32) {
        self.counter.retain(|_, count| *count >= min_count);
    }

    pub fn contains(&self, item: &T) -> bool {
        self.counter.contains_key(item)
    }

    /// Removes items that aren't counted, and orders the rest by decreasing
    /// count. Items with equal counts keep their relative order.
    pub fn normalize(&self, transaction: &[T]) -> Vec<T> {
        let mut kept: Vec<T> = transaction
            .iter()
            .filter(|item| self.contains(item))
            .cloned()
            .collect();
        // sort_by is stable.
        kept.sort_by(|a, b| self.get(b).cmp(&self.get(a)));
        kept
    }
}

impl<T> Default for ItemCounter<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        ItemCounter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemCounter, MinSupport};

    #[test]
    fn test_resolve_min_support() {
        let cases: Vec<(MinSupport, usize, u32)> = vec![
            (MinSupport::from(0.5), 4, 2),
            (MinSupport::from(2.0), 4, 2),
            (MinSupport::from(0.3), 10, 3),
            (MinSupport::from(0.35), 10, 3),
            (MinSupport::from(1.0), 7, 7),
            (MinSupport::from(2.5), 10, 3),
            (MinSupport::from(0.0), 10, 0),
            (MinSupport::from(-0.5), 10, 0),
            (MinSupport::from(5u32), 3, 5),
            (MinSupport::from(1u32), 100, 100),
            (MinSupport::from(0u32), 100, 0),
            (MinSupport::Count(1), 100, 1),
        ];
        for (min_support, num_transactions, expected) in cases {
            assert_eq!(min_support.resolve(num_transactions), expected);
        }
    }

    #[test]
    fn test_integer_one_is_a_fraction() {
        assert_eq!(MinSupport::from(1u32), MinSupport::from(1.0));
        assert_eq!(MinSupport::from(0u32), MinSupport::from(0.0));
        assert_eq!(MinSupport::from(2u32), MinSupport::from(2.0));
    }

    #[test]
    fn test_counts_and_filter() {
        let transactions = vec![vec!["a", "b"], vec!["b", "c"], vec!["a", "b", "c"], vec!["a"]];
        let mut counter = ItemCounter::from_transactions(&transactions);
        assert_eq!(counter.len(), 3);
        assert_eq!(counter.get(&"a"), 3);
        assert_eq!(counter.get(&"b"), 3);
        assert_eq!(counter.get(&"c"), 2);
        assert_eq!(counter.get(&"z"), 0);

        counter.retain_at_least(3);
        assert!(counter.contains(&"a"));
        assert!(!counter.contains(&"c"));
        assert_eq!(counter.len(), 2);
    }

    #[test]
    fn test_normalize() {
        let transactions = vec![
            vec!["x", "a", "b"],
            vec!["b", "c"],
            vec!["c", "b", "d"],
            vec!["a", "b", "c"],
        ];
        let mut counter = ItemCounter::from_transactions(&transactions);
        counter.retain_at_least(2);

        // b=4, c=3, a=2; x and d are dropped.
        let cases: Vec<(Vec<&str>, Vec<&str>)> = vec![
            (vec!["x", "a", "b"], vec!["b", "a"]),
            (vec!["c", "b", "d"], vec!["b", "c"]),
            (vec!["a", "c", "b"], vec!["b", "c", "a"]),
            (vec!["x", "d"], vec![]),
            (vec![], vec![]),
        ];
        for (transaction, expected) in cases {
            assert_eq!(counter.normalize(&transaction), expected);
        }
    }

    #[test]
    fn test_normalize_keeps_input_order_on_ties() {
        let mut counter: ItemCounter<u32> = ItemCounter::new();
        counter.add(&1, 2);
        counter.add(&2, 2);
        counter.add(&3, 5);
        assert_eq!(counter.normalize(&[2, 1, 3]), vec![3, 2, 1]);
        assert_eq!(counter.normalize(&[1, 2, 3]), vec![3, 1, 2]);
    }
}
