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

use crate::error::{Error, Result};
use crate::fp_growth::FrequentItemset;
use fnv::FnvHashMap;
use itertools::Itertools;
use std::cmp;
use std::hash::Hash;

/// An unordered set of items. Items are kept sorted and deduplicated so
/// that any ordering of the same items compares and hashes equal.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Itemset<T> {
    items: Vec<T>,
}

// Smaller itemsets first, then lexicographically.
impl<T: Ord> Ord for Itemset<T> {
    fn cmp(&self, other: &Itemset<T>) -> cmp::Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.items.cmp(&other.items))
    }
}

impl<T: Ord> PartialOrd for Itemset<T> {
    fn partial_cmp(&self, other: &Itemset<T>) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Itemset<T> {
    pub fn new(items: Vec<T>) -> Itemset<T> {
        let mut items: Vec<T> = items.into_iter().sorted().collect();
        items.dedup();
        Itemset { items }
    }

    // Assumes `items` is already sorted and deduplicated.
    pub(crate) fn from_sorted(items: Vec<T>) -> Itemset<T> {
        Itemset { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Ord> From<Vec<T>> for Itemset<T> {
    fn from(items: Vec<T>) -> Itemset<T> {
        Itemset::new(items)
    }
}

/// Support counts of itemsets, keyed by the unordered itemset.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemsetSupport<T: Eq + Hash> {
    supports: FnvHashMap<Itemset<T>, u32>,
}

impl<T> ItemsetSupport<T>
where
    T: Ord + Hash + Clone,
{
    pub fn new() -> ItemsetSupport<T> {
        ItemsetSupport {
            supports: FnvHashMap::default(),
        }
    }

    /// Collects the output of the miner. Fails if the miner was run without
    /// including supports.
    pub fn from_mined<I>(mined: I) -> Result<ItemsetSupport<T>>
    where
        I: IntoIterator<Item = FrequentItemset<T>>,
    {
        let mut supports = ItemsetSupport::new();
        for itemset in mined {
            let support = itemset
                .support
                .ok_or(Error::SupportNotIncluded(itemset.items.len()))?;
            supports.insert(Itemset::new(itemset.items), support);
        }
        Ok(supports)
    }

    pub fn insert(&mut self, itemset: Itemset<T>, support: u32) -> Option<u32> {
        self.supports.insert(itemset, support)
    }

    pub fn get(&self, itemset: &Itemset<T>) -> Option<u32> {
        self.supports.get(itemset).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset<T>, u32)> + '_ {
        self.supports.iter().map(|(itemset, &support)| (itemset, support))
    }

    pub fn len(&self) -> usize {
        self.supports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supports.is_empty()
    }
}

impl<T> Default for ItemsetSupport<T>
where
    T: Ord + Hash + Clone,
{
    fn default() -> Self {
        ItemsetSupport::new()
    }
}

impl<T> FromIterator<(Itemset<T>, u32)> for ItemsetSupport<T>
where
    T: Ord + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (Itemset<T>, u32)>>(iter: I) -> Self {
        ItemsetSupport {
            supports: iter.into_iter().collect(),
        }
    }
}
