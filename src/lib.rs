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

//! Frequent itemset mining with FP-growth, and association rules derived
//! from the mined itemsets.
//!
//! ```
//! use fpgrowth::{generate_rules, mine_frequent_itemsets, ItemsetSupport};
//!
//! let transactions = vec![
//!     vec!["a", "b"],
//!     vec!["b", "c"],
//!     vec!["a", "b", "c"],
//!     vec!["a"],
//! ];
//! let mined = mine_frequent_itemsets(&transactions, 0.5, true);
//! let supports = ItemsetSupport::from_mined(mined).unwrap();
//! assert_eq!(supports.len(), 5);
//!
//! let rules = generate_rules(&supports, 0.6).unwrap();
//! assert_eq!(rules.len(), 4);
//! ```

pub mod error;
pub mod fp_growth;
pub mod fptree;
pub mod generate_rules;
pub mod item_counter;
pub mod itemset;
pub mod rule;
mod vec_sets;

pub use error::{Error, Result};
pub use fp_growth::{mine_frequent_itemsets, FrequentItemset, FrequentItemsets};
pub use fptree::{FPNode, FPTree, NodeKind, Nodes};
pub use generate_rules::{generate_rules, DEFAULT_MIN_CONFIDENCE};
pub use item_counter::{ItemCounter, MinSupport};
pub use itemset::{Itemset, ItemsetSupport};
pub use rule::Rule;
