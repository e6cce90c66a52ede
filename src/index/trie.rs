//! Prefix tree over slash-delimited location segments.
//!
//! # Responsibilities
//! - Normalize raw paths (trim + lower-case)
//! - Store platform names at the node where a location ends
//! - Collect the union of names along an ancestor chain
//!
//! # Design Decisions
//! - `str::to_lowercase` uses the Unicode default case mapping, so the
//!   result never depends on the host locale
//! - Empty segments are dropped: `/ru/`, `/ru` and `//ru` are one path

use std::collections::{BTreeSet, HashMap, HashSet};

/// Trim surrounding whitespace and lower-case.
pub fn normalize(path: &str) -> String {
    path.trim().to_lowercase()
}

/// Non-empty segments of an already normalized path.
pub fn segments(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split('/').filter(|segment| !segment.is_empty())
}

/// Canonical spelling of a path: normalized, then re-joined as `/a/b`.
/// The root is `/`.
pub fn canonical(path: &str) -> String {
    let normalized = normalize(path);
    let mut key = String::with_capacity(normalized.len() + 1);
    for segment in segments(&normalized) {
        key.push('/');
        key.push_str(segment);
    }
    if key.is_empty() {
        key.push('/');
    }
    key
}

/// One node per distinct segment reachable from the root.
#[derive(Debug, Default)]
pub struct TrieNode {
    children: HashMap<String, TrieNode>,
    platforms_here: HashSet<String>,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk (creating as needed) the chain for `segments` and register
    /// `platform` at its last node.
    pub fn insert<'a, I>(&mut self, segments: I, platform: &str)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for segment in segments {
            node = node.children.entry(segment.to_owned()).or_default();
        }
        node.platforms_here.insert(platform.to_owned());
    }

    pub fn child(&self, segment: &str) -> Option<&TrieNode> {
        self.children.get(segment)
    }

    /// Names registered exactly at this node.
    pub fn platforms_here(&self) -> &HashSet<String> {
        &self.platforms_here
    }

    /// Union `platforms_here` of this node and of every node reached by
    /// following `segments`. Stops at the first segment without a child;
    /// whatever the visited ancestors contributed is kept.
    pub fn collect_along<'a, I>(&self, segments: I, out: &mut BTreeSet<String>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        out.extend(node.platforms_here.iter().cloned());
        for segment in segments {
            match node.child(segment) {
                Some(child) => {
                    node = child;
                    out.extend(node.platforms_here.iter().cloned());
                }
                None => break,
            }
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(TrieNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn union(root: &TrieNode, path: &str) -> BTreeSet<String> {
        let normalized = normalize(path);
        let mut out = BTreeSet::new();
        root.collect_along(segments(&normalized), &mut out);
        out
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  /RU/Msk \t"), "/ru/msk");
        assert_eq!(normalize("/Ревда"), "/ревда");
        // Dotted capital I maps the same way everywhere.
        assert_eq!(normalize("/İ"), "/i\u{307}");
    }

    #[test]
    fn test_segments_drop_empty() {
        let collected: Vec<_> = segments("//ru///svrd/").collect();
        assert_eq!(collected, vec!["ru", "svrd"]);
        assert_eq!(segments("/").count(), 0);
    }

    #[test]
    fn test_canonical() {
        assert_eq!(canonical(" /RU/Msk/ "), "/ru/msk");
        assert_eq!(canonical("//ru"), "/ru");
        assert_eq!(canonical("/"), "/");
        assert_eq!(canonical("   "), "/");
    }

    #[test]
    fn test_insert_and_collect() {
        let mut root = TrieNode::new();
        root.insert(segments("/ru"), "a");
        root.insert(segments("/ru/svrd/revda"), "b");

        assert_eq!(union(&root, "/ru/svrd/revda").len(), 2);
        assert_eq!(union(&root, "/ru/svrd"), BTreeSet::from(["a".to_string()]));
        assert!(union(&root, "/kz").is_empty());
        assert!(root.platforms_here().is_empty());
    }

    #[test]
    fn test_collect_keeps_ancestors_on_missing_branch() {
        let mut root = TrieNode::new();
        root.insert(segments("/ru"), "a");

        let found = union(&root, "/ru/unknown/deeper");
        assert_eq!(found, BTreeSet::from(["a".to_string()]));
    }

    #[test]
    fn test_root_registration() {
        let mut root = TrieNode::new();
        root.insert(segments("/"), "everywhere");
        root.insert(segments("/ru"), "a");

        assert_eq!(union(&root, "/"), BTreeSet::from(["everywhere".to_string()]));
        assert_eq!(union(&root, "/kz").len(), 1);
        assert_eq!(union(&root, "/ru").len(), 2);
    }

    #[test]
    fn test_node_count() {
        let mut root = TrieNode::new();
        assert_eq!(root.node_count(), 1);
        root.insert(segments("/ru/svrd/revda"), "a");
        root.insert(segments("/ru/svrd/pervik"), "a");
        assert_eq!(root.node_count(), 5);
        assert!(root.child("ru").and_then(|n| n.child("svrd")).is_some());
    }
}
