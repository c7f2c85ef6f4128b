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
use crate::itemset::{Itemset, ItemsetSupport};
use crate::vec_sets::{difference, union};
use std::hash::Hash;

/// An association rule `antecedent -> consequent`. Both sides are sorted,
/// non-empty, and together make up the itemset the rule was derived from.
#[derive(Clone, Debug)]
pub struct Rule<T> {
    pub antecedent: Vec<T>,
    pub consequent: Vec<T>,
    pub support: u32,
    pub confidence: f64,
}

impl<T: PartialEq> PartialEq for Rule<T> {
    fn eq(&self, other: &Rule<T>) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

// Can't derive Eq as f64 doesn't satisfy Eq.
impl<T: Eq> Eq for Rule<T> {}

impl<T> Rule<T>
where
    T: Ord + Hash + Clone,
{
    // Creates a new Rule splitting `itemset` at `antecedent`, if the rule
    // would be above the min_confidence threshold. `antecedent` must be
    // sorted.
    pub(crate) fn make(
        itemset: &Itemset<T>,
        support: u32,
        antecedent: Vec<T>,
        itemset_support: &ItemsetSupport<T>,
        min_confidence: f64,
    ) -> Result<Option<Rule<T>>> {
        let consequent = difference(itemset.items(), &antecedent);
        if antecedent.is_empty() || consequent.is_empty() {
            return Ok(None);
        }

        let antecedent = Itemset::from_sorted(antecedent);
        let a_sup = itemset_support
            .get(&antecedent)
            .ok_or(Error::MissingAntecedent {
                itemset_len: itemset.len(),
                antecedent_len: antecedent.len(),
            })?;
        if a_sup == 0 {
            return Ok(None);
        }

        let confidence = support as f64 / a_sup as f64;
        if confidence < min_confidence {
            return Ok(None);
        }

        Ok(Some(Rule {
            antecedent: antecedent.into_items(),
            consequent,
            support,
            confidence,
        }))
    }

    /// The itemset the rule was derived from.
    pub fn itemset(&self) -> Itemset<T> {
        Itemset::from_sorted(union(&self.antecedent, &self.consequent))
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn support(&self) -> u32 {
        self.support
    }
}
