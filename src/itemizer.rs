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
use fnv::FnvHashMap;

/// Maps item strings to compact `Item` ids and back.
pub struct Itemizer {
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn new() -> Itemizer {
        Itemizer {
            item_str_to_id: FnvHashMap::default(),
            item_id_to_str: vec![],
        }
    }

    pub fn id_of(&mut self, item: &str) -> Item {
        if let Some(id) = self.item_str_to_id.get(item) {
            return *id;
        }
        let id = Item::with_id(self.item_id_to_str.len() as u32);
        self.item_str_to_id.insert(String::from(item), id);
        self.item_id_to_str.push(String::from(item));
        id
    }

    pub fn str_of(&self, id: Item) -> &str {
        &self.item_id_to_str[id.as_index()]
    }

    pub fn len(&self) -> usize {
        self.item_id_to_str.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Itemizer;

    #[test]
    fn test_itemizer() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.id_of("a");
        let b = itemizer.id_of("b");
        assert_ne!(a, b);
        assert_eq!(itemizer.id_of("a"), a);
        assert_eq!(itemizer.str_of(a), "a");
        assert_eq!(itemizer.str_of(b), "b");
        assert_eq!(itemizer.len(), 2);
    }
}
