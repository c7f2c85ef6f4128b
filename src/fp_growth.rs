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

use crate::fptree::FPTree;
use crate::item_counter::{ItemCounter, MinSupport};
use std::hash::Hash;
use tracing::debug;

/// A frequent itemset produced by the miner. Items are ordered most
/// recently added first. `support` is only present when the miner was
/// asked to include it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequentItemset<T> {
    pub items: Vec<T>,
    pub support: Option<u32>,
}

// One level of the conditional tree recursion.
struct Frame<T> {
    tree: FPTree<T>,
    suffix: Vec<T>,
    // Index of the next item of `tree` to consider.
    cursor: usize,
}

/// Lazily enumerates every frequent itemset of an FPTree, depth first.
///
/// Instead of recursing, pending conditional trees are kept on an explicit
/// stack. The conditional tree of an emitted itemset is only built when the
/// next itemset is requested.
pub struct FrequentItemsets<T> {
    stack: Vec<Frame<T>>,
    min_count: u32,
    include_support: bool,
    // Item of the top frame whose conditional tree is still to be built,
    // and the suffix that tree extends.
    expand: Option<(T, Vec<T>)>,
}

impl<T> FrequentItemsets<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new(tree: FPTree<T>, min_count: u32, include_support: bool) -> FrequentItemsets<T> {
        FrequentItemsets {
            stack: vec![Frame {
                tree,
                suffix: vec![],
                cursor: 0,
            }],
            min_count,
            include_support,
            expand: None,
        }
    }

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    fn expand_pending(&mut self) {
        let (item, suffix) = match self.expand.take() {
            Some(pending) => pending,
            None => return,
        };
        let conditional_tree = match self.stack.last() {
            Some(frame) => frame.tree.conditional_tree(&item),
            None => return,
        };
        self.stack.push(Frame {
            tree: conditional_tree,
            suffix,
            cursor: 0,
        });
    }
}

impl<T> Iterator for FrequentItemsets<T>
where
    T: Eq + Hash + Clone,
{
    type Item = FrequentItemset<T>;

    fn next(&mut self) -> Option<FrequentItemset<T>> {
        self.expand_pending();
        loop {
            let frame = self.stack.last_mut()?;
            let item = match frame.tree.item_at(frame.cursor) {
                Some(item) => item.clone(),
                None => {
                    // Every item at this level is done.
                    self.stack.pop();
                    continue;
                }
            };
            frame.cursor += 1;

            // The conditioning item stays in its conditional tree, so skip
            // items already in the suffix.
            let support = frame.tree.support(&item);
            if support < self.min_count || frame.suffix.contains(&item) {
                continue;
            }

            let mut itemset = Vec::with_capacity(frame.suffix.len() + 1);
            itemset.push(item.clone());
            itemset.extend(frame.suffix.iter().cloned());
            self.expand = Some((item, itemset.clone()));

            return Some(FrequentItemset {
                items: itemset,
                support: if self.include_support {
                    Some(support)
                } else {
                    None
                },
            });
        }
    }
}

/// Mines every frequent itemset of `transactions`.
///
/// `min_support` values up to 1 are a fraction of the number of
/// transactions, larger values an absolute count. The result is a lazy
/// iterator; each element carries its support when `include_support` is
/// set.
pub fn mine_frequent_itemsets<T, Tx, S>(
    transactions: &[Tx],
    min_support: S,
    include_support: bool,
) -> FrequentItemsets<T>
where
    T: Eq + Hash + Clone,
    Tx: AsRef<[T]>,
    S: Into<MinSupport>,
{
    let min_count = min_support.into().resolve(transactions.len());

    // Make one pass of the dataset to calculate the item frequencies
    // for the initial tree.
    let mut item_count = ItemCounter::from_transactions(transactions);
    let distinct_items = item_count.len();
    item_count.retain_at_least(min_count);
    debug!(
        transactions = transactions.len(),
        min_count,
        distinct_items,
        frequent_items = item_count.len(),
        "counted item frequencies"
    );

    // Load the initial tree, inserting each transaction sorted by item
    // frequency.
    let mut fptree = FPTree::new();
    for transaction in transactions {
        fptree.add(&item_count.normalize(transaction.as_ref()));
    }
    debug!(nodes = fptree.len(), "built initial FPTree");

    FrequentItemsets::new(fptree, min_count, include_support)
}

#[cfg(test)]
mod tests {
    use super::{mine_frequent_itemsets, FrequentItemset};
    use crate::fptree::FPTree;
    use crate::item_counter::MinSupport;
    use fnv::FnvHashMap;
    use itertools::Itertools;

    fn scenario() -> Vec<Vec<&'static str>> {
        vec![vec!["a", "b"], vec!["b", "c"], vec!["a", "b", "c"], vec!["a"]]
    }

    fn supports(
        itemsets: Vec<FrequentItemset<&'static str>>,
    ) -> FnvHashMap<Vec<&'static str>, u32> {
        itemsets
            .into_iter()
            .map(|itemset| {
                let items = itemset.items.into_iter().sorted().collect();
                (items, itemset.support.unwrap())
            })
            .collect()
    }

    #[test]
    fn test_scenario() {
        let mined = supports(mine_frequent_itemsets(&scenario(), 0.5, true).collect());
        let expected: FnvHashMap<Vec<&str>, u32> = [
            (vec!["a"], 3),
            (vec!["b"], 3),
            (vec!["c"], 2),
            (vec!["a", "b"], 2),
            (vec!["b", "c"], 2),
        ]
        .iter()
        .cloned()
        .collect();
        assert_eq!(mined, expected);
    }

    #[test]
    fn test_fraction_matches_count() {
        let by_fraction = supports(mine_frequent_itemsets(&scenario(), 0.5, true).collect());
        let by_count = supports(mine_frequent_itemsets(&scenario(), 2.0, true).collect());
        let by_u32 = supports(mine_frequent_itemsets(&scenario(), 2u32, true).collect());
        assert_eq!(by_fraction, by_count);
        assert_eq!(by_fraction, by_u32);
    }

    #[test]
    fn test_integer_one_means_every_transaction() {
        let transactions = vec![vec!["a", "b"], vec!["a"], vec!["c"]];
        let by_float = supports(mine_frequent_itemsets(&transactions, 1.0, true).collect());
        let by_u32 = supports(mine_frequent_itemsets(&transactions, 1u32, true).collect());
        assert!(by_float.is_empty());
        assert_eq!(by_u32, by_float);

        let by_count = mine_frequent_itemsets(&transactions, MinSupport::Count(1), true);
        assert_eq!(by_count.count(), 4);
    }

    #[test]
    fn test_without_support() {
        let mined: Vec<FrequentItemset<&str>> =
            mine_frequent_itemsets(&scenario(), 0.5, false).collect();
        assert_eq!(mined.len(), 5);
        assert!(mined.iter().all(|itemset| itemset.support.is_none()));
    }

    #[test]
    fn test_itemsets_are_most_recent_first() {
        // Items are tried in order a, b, c. "a" extends the suffix [b], "b"
        // extends the suffix [c].
        let mined: Vec<Vec<&str>> = mine_frequent_itemsets(&scenario(), 2u32, false)
            .map(|itemset| itemset.items)
            .collect();
        assert_eq!(
            mined,
            vec![vec!["a"], vec!["b"], vec!["a", "b"], vec!["c"], vec!["b", "c"]]
        );
    }

    #[test]
    fn test_depth_first_order() {
        let transactions = vec![vec![1, 2, 3]; 3];
        let mined: Vec<Vec<u32>> = mine_frequent_itemsets(&transactions, 3u32, false)
            .map(|itemset| itemset.items)
            .collect();
        // Every itemset that extends another is emitted after it.
        for (index, itemset) in mined.iter().enumerate() {
            if itemset.len() > 1 {
                let parent = &itemset[1..];
                let parent_index = mined.iter().position(|other| other.as_slice() == parent);
                assert!(parent_index.unwrap() < index);
            }
        }
        assert_eq!(mined.len(), 7);
    }

    #[test]
    fn test_early_stop() {
        let transactions = vec![vec![1, 2, 3, 4, 5, 6]; 2];
        let mut mined = mine_frequent_itemsets(&transactions, 2u32, true);
        let first = mined.next().unwrap();
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.support, Some(2));
        drop(mined);
        assert_eq!(mine_frequent_itemsets(&transactions, 2u32, true).count(), 63);
    }

    #[test]
    fn test_non_positive_threshold_keeps_every_item() {
        let transactions = vec![vec!["a"], vec!["b"], vec!["c"]];
        let mined = supports(mine_frequent_itemsets(&transactions, 0.0, true).collect());
        assert_eq!(mined.len(), 3);
        let mined = supports(mine_frequent_itemsets(&transactions, -1.0, true).collect());
        assert_eq!(mined.len(), 3);
    }

    #[test]
    fn test_nothing_frequent() {
        let transactions = vec![vec!["a"], vec!["b"]];
        assert_eq!(mine_frequent_itemsets(&transactions, 2u32, true).count(), 0);
        let empty: Vec<Vec<&str>> = vec![];
        assert_eq!(mine_frequent_itemsets(&empty, 0.5, true).count(), 0);
    }

    #[test]
    fn test_mine_prebuilt_tree() {
        let mut tree: FPTree<&str> = FPTree::new();
        tree.add(&["x", "y"]);
        tree.add(&["x"]);
        let mined = supports(super::FrequentItemsets::new(tree, 1, true).collect());
        assert_eq!(mined[&vec!["x"]], 2);
        assert_eq!(mined[&vec!["y"]], 1);
        assert_eq!(mined[&vec!["x", "y"]], 1);
        assert_eq!(mined.len(), 3);
    }
}
