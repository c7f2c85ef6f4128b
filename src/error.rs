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

use thiserror::Error;

/// Errors raised while assembling itemset supports or generating rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A subset of a frequent itemset has no recorded support. The itemset
    /// support mapping must contain every frequent subset of its keys.
    #[error(
        "no support recorded for a {antecedent_len}-item antecedent of a {itemset_len}-item itemset"
    )]
    MissingAntecedent {
        itemset_len: usize,
        antecedent_len: usize,
    },

    #[error("minimum confidence must be in range [0,1], got {0}")]
    InvalidConfidence(f64),

    /// The miner was run without `include_support`, so its output cannot
    /// be turned into an itemset support mapping.
    #[error("mined itemset of {0} items carries no support count")]
    SupportNotIncluded(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
