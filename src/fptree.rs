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
use tracing::trace;

const ROOT: usize = 0;

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind<T> {
    Root,
    Item { item: T, count: u32 },
}

/// A node in an FPTree. Nodes are owned by the tree's arena and refer to
/// each other by index.
#[derive(Debug)]
pub struct FPNode<T> {
    id: usize,
    kind: NodeKind<T>,
    children: FnvHashMap<T, usize>,
    parent: Option<usize>,
    // Next node with the same item, in creation order.
    neighbor: Option<usize>,
}

impl<T> FPNode<T> {
    fn new(id: usize, kind: NodeKind<T>, parent: Option<usize>) -> FPNode<T> {
        FPNode {
            id,
            kind,
            children: FnvHashMap::default(),
            parent,
            neighbor: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn kind(&self) -> &NodeKind<T> {
        &self.kind
    }

    pub fn item(&self) -> Option<&T> {
        match self.kind {
            NodeKind::Root => None,
            NodeKind::Item { ref item, .. } => Some(item),
        }
    }

    pub fn count(&self) -> Option<u32> {
        match self.kind {
            NodeKind::Root => None,
            NodeKind::Item { count, .. } => Some(count),
        }
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root)
    }

    fn add_count(&mut self, delta: u32) {
        if let NodeKind::Item { ref mut count, .. } = self.kind {
            *count += delta;
        }
    }
}

// First and last node of an item's chain.
#[derive(Copy, Clone, Debug)]
struct Route {
    head: usize,
    tail: usize,
}

pub struct FPTree<T> {
    nodes: Vec<FPNode<T>>,
    routes: FnvHashMap<T, Route>,
    // Items in order of their first node's creation.
    route_order: Vec<T>,
}

impl<T> FPTree<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> FPTree<T> {
        FPTree {
            nodes: vec![FPNode::new(ROOT, NodeKind::Root, None)],
            routes: FnvHashMap::default(),
            route_order: vec![],
        }
    }

    pub fn root(&self) -> &FPNode<T> {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: usize) -> &FPNode<T> {
        &self.nodes[id]
    }

    /// Number of item nodes, i.e. all nodes except the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn child_of(&self, id: usize, item: &T) -> Option<usize> {
        self.nodes[id].children.get(item).cloned()
    }

    fn add_node(&mut self, parent: usize, item: T, count: u32) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FPNode::new(
            id,
            NodeKind::Item {
                item: item.clone(),
                count,
            },
            Some(parent),
        ));
        self.nodes[parent].children.insert(item.clone(), id);
        self.make_new_route(item, id);
        id
    }

    // Appends the node to the end of its item's chain.
    fn make_new_route(&mut self, item: T, id: usize) {
        if let Some(route) = self.routes.get_mut(&item) {
            self.nodes[route.tail].neighbor = Some(id);
            route.tail = id;
            return;
        }
        self.route_order.push(item.clone());
        self.routes.insert(item, Route { head: id, tail: id });
    }

    /// Adds a normalized transaction to the tree.
    pub fn add(&mut self, transaction: &[T]) {
        // Start iterating at the root node.
        let mut id = ROOT;
        for item in transaction {
            id = match self.child_of(id, item) {
                Some(child_id) => {
                    self.nodes[child_id].add_count(1);
                    child_id
                }
                None => self.add_node(id, item.clone(), 1),
            };
        }
    }

    /// Every item in the tree with its nodes, in order of first appearance.
    pub fn items(&self) -> impl Iterator<Item = (&T, Nodes<'_, T>)> + '_ {
        self.route_order
            .iter()
            .map(move |item| (item, self.nodes(item)))
    }

    pub(crate) fn item_at(&self, index: usize) -> Option<&T> {
        self.route_order.get(index)
    }

    /// The nodes for `item` in creation order. Each call walks the chain
    /// afresh from its head.
    pub fn nodes(&self, item: &T) -> Nodes<'_, T> {
        Nodes {
            tree: self,
            next: self.routes.get(item).map(|route| route.head),
        }
    }

    /// Sum of the counts of every node for `item`.
    pub fn support(&self, item: &T) -> u32 {
        self.nodes(item).filter_map(|node| node.count()).sum()
    }

    // Node ids from just below the root down to `id`.
    fn path_from_root_to(&self, id: usize) -> Vec<usize> {
        let mut path = vec![];
        let mut next = Some(id);
        while let Some(id) = next {
            let node = &self.nodes[id];
            if node.is_root() {
                break;
            }
            path.push(id);
            next = node.parent;
        }
        path.reverse();
        path
    }

    /// The conditional pattern base of `item`: for each of its nodes, the
    /// path of nodes from just below the root down to that node.
    pub fn prefix_paths<'a>(
        &'a self,
        item: &T,
    ) -> impl Iterator<Item = Vec<&'a FPNode<T>>> + 'a {
        self.nodes(item).map(move |node| {
            self.path_from_root_to(node.id)
                .into_iter()
                .map(|id| &self.nodes[id])
                .collect()
        })
    }

    /// Builds the conditional tree for the item at the end of the given
    /// prefix paths. Nodes for the condition item keep their original
    /// counts; each ancestor's count becomes the sum of the condition item
    /// counts beneath it.
    pub fn conditional_from_paths<'a, P>(paths: P) -> FPTree<T>
    where
        T: 'a,
        P: IntoIterator<Item = Vec<&'a FPNode<T>>>,
    {
        let mut tree = FPTree::new();
        let mut condition_item: Option<T> = None;
        for path in paths {
            let last = match path.last().and_then(|node| node.item()) {
                Some(item) => item,
                None => continue,
            };
            if condition_item.is_none() {
                condition_item = Some(last.clone());
            }
            let mut id = ROOT;
            for node in &path {
                let (item, count) = match node.kind {
                    NodeKind::Item { ref item, count } => (item, count),
                    NodeKind::Root => continue,
                };
                id = match tree.child_of(id, item) {
                    Some(child_id) => child_id,
                    None => {
                        let seed = if condition_item.as_ref() == Some(item) {
                            count
                        } else {
                            0
                        };
                        tree.add_node(id, item.clone(), seed)
                    }
                };
            }
        }

        let condition_item = match condition_item {
            Some(item) => item,
            None => return tree,
        };

        // Push the condition item's counts up into its ancestors.
        let leaves: Vec<usize> = tree.nodes(&condition_item).map(|node| node.id).collect();
        for leaf in leaves {
            let path = tree.path_from_root_to(leaf);
            let count = tree.nodes[leaf].count().unwrap_or(0);
            for &ancestor in path.iter().rev().skip(1) {
                tree.nodes[ancestor].add_count(count);
            }
        }

        trace!(nodes = tree.len(), items = tree.route_order.len(), "built conditional tree");
        tree
    }

    /// The conditional tree of `item` within this tree.
    pub fn conditional_tree(&self, item: &T) -> FPTree<T> {
        FPTree::conditional_from_paths(self.prefix_paths(item))
    }
}

impl<T> Default for FPTree<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        FPTree::new()
    }
}

/// Iterator following an item's route through the tree.
pub struct Nodes<'a, T> {
    tree: &'a FPTree<T>,
    next: Option<usize>,
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = &'a FPNode<T>;

    fn next(&mut self) -> Option<&'a FPNode<T>> {
        let tree = self.tree;
        let node = &tree.nodes[self.next?];
        self.next = node.neighbor;
        Some(node)
    }
}
