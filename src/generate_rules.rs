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
use crate::itemset::ItemsetSupport;
use crate::rule::Rule;
use itertools::Itertools;
use std::hash::Hash;
use tracing::debug;

pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.6;

/// Generates every rule `A -> B` with confidence of at least
/// `min_confidence`, where `A ∪ B` is an itemset in `itemset_support`.
///
/// Every non-empty proper subset of each itemset is tried as an antecedent,
/// so `itemset_support` must hold the support of every such subset. A
/// missing subset fails with `Error::MissingAntecedent`.
pub fn generate_rules<T>(
    itemset_support: &ItemsetSupport<T>,
    min_confidence: f64,
) -> Result<Vec<Rule<T>>>
where
    T: Ord + Hash + Clone,
{
    if !(0.0..=1.0).contains(&min_confidence) {
        return Err(Error::InvalidConfidence(min_confidence));
    }

    let mut rules: Vec<Rule<T>> = vec![];
    for (itemset, support) in itemset_support.iter().filter(|(i, _)| i.len() > 1) {
        // Subsets keep the itemset's sorted order.
        for antecedent in itemset.items().iter().cloned().powerset() {
            if antecedent.is_empty() || antecedent.len() == itemset.len() {
                continue;
            }
            if let Some(rule) = Rule::make(
                itemset,
                support,
                antecedent,
                itemset_support,
                min_confidence,
            )? {
                rules.push(rule);
            }
        }
    }

    debug!(
        itemsets = itemset_support.len(),
        rules = rules.len(),
        min_confidence,
        "generated rules"
    );
    Ok(rules)
}
