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

use crate::item::Item;
use crate::itemizer::Itemizer;
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Reads one transaction per line of comma separated items.
pub struct TransactionReader<'a, R> {
    reader: R,
    itemizer: &'a mut Itemizer,
}

impl<'a> TransactionReader<'a, BufReader<File>> {
    pub fn open(path: &str, itemizer: &'a mut Itemizer) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(TransactionReader::new(BufReader::new(file), itemizer))
    }
}

impl<'a, R: BufRead> TransactionReader<'a, R> {
    pub fn new(reader: R, itemizer: &'a mut Itemizer) -> TransactionReader<'a, R> {
        TransactionReader { reader, itemizer }
    }
}

impl<'a, R: BufRead> Iterator for TransactionReader<'a, R> {
    type Item = io::Result<Vec<Item>>;

    fn next(&mut self) -> Option<io::Result<Vec<Item>>> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err)),
            }

            // Some input files have transactions with duplicate items.
            // Keep only the first occurrence of each.
            let itemizer = &mut *self.itemizer;
            let items: Vec<Item> = line
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unique()
                .map(|s| itemizer.id_of(s))
                .collect();

            if !items.is_empty() {
                return Some(Ok(items));
            }
        }
    }
}
