//! Suffix trie over folded keywords
//!
//! Every suffix of every key is inserted, so walking the trie with a query and
//! collecting the subtree yields every key that contains the query anywhere,
//! not just as a prefix. Nodes live in one arena; children are kept sorted by
//! char for binary search.

use crate::catalog::EmojiId;
use std::collections::BTreeSet;

type NodeId = u32;

const ROOT: NodeId = 0;

#[derive(Debug, Default, Clone)]
struct Node {
    children: Vec<(char, NodeId)>,
    /// Ids whose key has a suffix ending exactly here
    values: Vec<EmojiId>,
}

#[derive(Debug, Clone)]
pub(crate) struct SuffixTrie {
    nodes: Vec<Node>,
}

impl SuffixTrie {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Insert every suffix of `key` pointing at `id`.
    pub(crate) fn insert(&mut self, key: &str, id: EmojiId) {
        let chars: Vec<char> = key.chars().collect();
        for start in 0..chars.len() {
            self.insert_path(&chars[start..], id);
        }
    }

    fn insert_path(&mut self, path: &[char], id: EmojiId) {
        let mut node = ROOT;
        for &c in path {
            node = self.child_or_insert(node, c);
        }
        let values = &mut self.nodes[node as usize].values;
        if !values.contains(&id) {
            values.push(id);
        }
    }

    fn child_or_insert(&mut self, node: NodeId, c: char) -> NodeId {
        let children = &self.nodes[node as usize].children;
        match children.binary_search_by_key(&c, |(k, _)| *k) {
            Ok(i) => children[i].1,
            Err(i) => {
                let next = self.nodes.len() as NodeId;
                self.nodes.push(Node::default());
                self.nodes[node as usize].children.insert(i, (c, next));
                next
            }
        }
    }

    fn child(&self, node: NodeId, c: char) -> Option<NodeId> {
        let children = &self.nodes[node as usize].children;
        children
            .binary_search_by_key(&c, |(k, _)| *k)
            .ok()
            .map(|i| children[i].1)
    }

    /// Add every id whose key contains `query` to `out`. An empty query adds nothing.
    pub(crate) fn collect(&self, query: &str, out: &mut BTreeSet<EmojiId>) {
        if query.is_empty() {
            return;
        }
        let mut node = ROOT;
        for c in query.chars() {
            match self.child(node, c) {
                Some(next) => node = next,
                None => return,
            }
        }

        let mut stack = vec![node];
        while let Some(node) = stack.pop() {
            let node = &self.nodes[node as usize];
            out.extend(node.values.iter().copied());
            stack.extend(node.children.iter().map(|(_, child)| *child));
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(trie: &SuffixTrie, query: &str) -> Vec<EmojiId> {
        let mut out = BTreeSet::new();
        trie.collect(query, &mut out);
        out.into_iter().collect()
    }

    #[test]
    fn test_matches_anywhere_in_key() {
        let mut trie = SuffixTrie::new();
        trie.insert("thumbs up", 0);
        trie.insert("cupcake", 1);

        assert_eq!(find(&trie, "thumbs"), vec![0]);
        assert_eq!(find(&trie, "umbs"), vec![0]);
        assert_eq!(find(&trie, "up"), vec![0, 1]);
        assert_eq!(find(&trie, "cake"), vec![1]);
        assert!(find(&trie, "cakes").is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let mut trie = SuffixTrie::new();
        trie.insert("dog", 0);
        assert!(find(&trie, "").is_empty());
    }

    #[test]
    fn test_duplicate_inserts_collapse() {
        let mut trie = SuffixTrie::new();
        trie.insert("dog", 3);
        let nodes = trie.node_count();
        trie.insert("dog", 3);
        assert_eq!(trie.node_count(), nodes);
        assert_eq!(find(&trie, "o"), vec![3]);
    }

    #[test]
    fn test_shared_key_maps_to_many_ids() {
        let mut trie = SuffixTrie::new();
        trie.insert("heart", 7);
        trie.insert("heart", 2);
        trie.insert("hearts", 5);
        assert_eq!(find(&trie, "heart"), vec![2, 5, 7]);
    }
}
