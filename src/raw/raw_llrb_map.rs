use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::mem;

use super::node::{Color, Node, is_red, subtree_size};
use crate::Error;

/// The recursive left-leaning red-black tree backing `LlrbMap`.
///
/// Every mutation descends from the root, rebuilds the touched path by
/// reassigning child links to the values returned from the recursive calls,
/// and rebalances each node on the unwind. The root's incoming link is
/// normalized to black after every mutation.
#[derive(Clone)]
pub(crate) struct RawLlrbMap<K, V> {
    root: Option<Box<Node<K, V>>>,
}

impl<K, V> RawLlrbMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None }
    }

    /// Returns the number of entries, from the root's cached subtree size.
    pub(crate) fn len(&self) -> usize {
        subtree_size(self.root.as_deref())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Node teardown recurses to tree height at most.
    pub(crate) fn clear(&mut self) {
        self.root = None;
    }

    /// Binary search for `key`; read-only, no rebalancing.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get_node(key).map(|n| &n.value)
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get_node(key).map(|n| (&n.key, &n.value))
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get_node(key).is_some()
    }

    fn get_node<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            node = match key.cmp(n.key.borrow()) {
                Ordering::Less => n.left.as_deref(),
                Ordering::Greater => n.right.as_deref(),
                Ordering::Equal => return Some(n),
            };
        }
        None
    }

    /// Looks up `key` and returns its value mutably. Values can change
    /// freely; keys cannot, so only the value side is exposed.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut node = self.root.as_deref_mut();
        while let Some(n) = node {
            node = match key.cmp(n.key.borrow()) {
                Ordering::Less => n.left.as_deref_mut(),
                Ordering::Greater => n.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut n.value),
            };
        }
        None
    }

    /// Inserts or replaces; returns the previous value if the key was
    /// already present.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let (mut root, previous) = Self::put_node(self.root.take(), key, value);
        root.color = Color::Black;
        self.root = Some(root);
        previous
    }

    // Descends to the key's position, creating a red size-1 node at a nil
    // slot, and rebalances every node on the unwind. The displaced value,
    // if any, rides up through the return tuple.
    fn put_node(node: Option<Box<Node<K, V>>>, key: K, value: V) -> (Box<Node<K, V>>, Option<V>)
    where
        K: Ord,
    {
        let Some(mut node) = node else {
            return (Node::new(key, value), None);
        };
        let previous = match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, previous) = Self::put_node(node.left.take(), key, value);
                node.left = Some(left);
                previous
            }
            Ordering::Greater => {
                let (right, previous) = Self::put_node(node.right.take(), key, value);
                node.right = Some(right);
                previous
            }
            Ordering::Equal => Some(mem::replace(&mut node.value, value)),
        };
        (node.rebalance(), previous)
    }

    /// Removes `key` and returns its value; an absent key is a no-op that
    /// leaves the tree untouched in shape, colors, and sizes.
    pub(crate) fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // The removal pass below assumes the key is present in every
        // subtree it enters, so absence is settled up front.
        if !self.contains_key(key) {
            return None;
        }
        let mut root = self.root.take().expect("delete: lookup succeeded on an empty tree");
        if !root.left_is_red() && !root.right_is_red() {
            root.color = Color::Red;
        }
        let (root, (_, value)) = Self::delete_node(root, key);
        self.root = Self::blacken(root);
        Some(value)
    }

    // Removal descends comparing against the current node's key: rotations
    // rewrite the node mid-step, so the relation must be re-tested after
    // each transform. Every branch keeps a red link within reach before
    // descending (move_red_left / move_red_right) and rebalances on unwind.
    fn delete_node<Q>(mut node: Box<Node<K, V>>, key: &Q) -> (Option<Box<Node<K, V>>>, (K, V))
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if key.cmp(node.key.borrow()) == Ordering::Less {
            if !node.left_is_red() && !node.left_left_is_red() {
                node = node.move_red_left();
            }
            let left = node.left.take().expect("delete: key is in the left subtree");
            let (left, entry) = Self::delete_node(left, key);
            node.left = left;
            (Some(node.rebalance()), entry)
        } else {
            if node.left_is_red() {
                node = node.rotate_right();
            }
            if key.cmp(node.key.borrow()) == Ordering::Equal && node.right.is_none() {
                // Black balance rules out a lone left child here.
                debug_assert!(node.left.is_none());
                let Node { key, value, .. } = *node;
                return (None, (key, value));
            }
            if !node.right_is_red() && !node.right_left_is_red() {
                node = node.move_red_right();
            }
            if key.cmp(node.key.borrow()) == Ordering::Equal {
                // Interior match: swap in the successor entry pulled out of
                // the right subtree; the successor's old node is the one
                // physically removed.
                let right = node.right.take().expect("delete: interior match has a right subtree");
                let (right, successor) = Self::remove_min_node(right);
                node.right = right;
                let (successor_key, successor_value) = successor;
                let removed_key = mem::replace(&mut node.key, successor_key);
                let removed_value = mem::replace(&mut node.value, successor_value);
                (Some(node.rebalance()), (removed_key, removed_value))
            } else {
                let right = node.right.take().expect("delete: key is in the right subtree");
                let (right, entry) = Self::delete_node(right, key);
                node.right = right;
                (Some(node.rebalance()), entry)
            }
        }
    }

    /// Removes and returns the smallest entry.
    pub(crate) fn remove_min(&mut self) -> Result<(K, V), Error> {
        let mut root = self.root.take().ok_or(Error::EmptyTree)?;
        if !root.left_is_red() && !root.right_is_red() {
            root.color = Color::Red;
        }
        let (root, entry) = Self::remove_min_node(root);
        self.root = Self::blacken(root);
        Ok(entry)
    }

    fn remove_min_node(mut node: Box<Node<K, V>>) -> (Option<Box<Node<K, V>>>, (K, V)) {
        if node.left.is_none() {
            // Black balance rules out a lone right child.
            debug_assert!(node.right.is_none());
            let Node { key, value, .. } = *node;
            return (None, (key, value));
        }
        if !node.left_is_red() && !node.left_left_is_red() {
            node = node.move_red_left();
        }
        let left = node.left.take().expect("remove_min: non-minimum node keeps a left child");
        let (left, entry) = Self::remove_min_node(left);
        node.left = left;
        (Some(node.rebalance()), entry)
    }

    /// Removes and returns the largest entry.
    pub(crate) fn remove_max(&mut self) -> Result<(K, V), Error> {
        let mut root = self.root.take().ok_or(Error::EmptyTree)?;
        if !root.left_is_red() && !root.right_is_red() {
            root.color = Color::Red;
        }
        let (root, entry) = Self::remove_max_node(root);
        self.root = Self::blacken(root);
        Ok(entry)
    }

    fn remove_max_node(mut node: Box<Node<K, V>>) -> (Option<Box<Node<K, V>>>, (K, V)) {
        // Red links lean left at rest, so reaching rightward first converts
        // the lean.
        if node.left_is_red() {
            node = node.rotate_right();
        }
        if node.right.is_none() {
            debug_assert!(node.left.is_none());
            let Node { key, value, .. } = *node;
            return (None, (key, value));
        }
        if !node.right_is_red() && !node.right_left_is_red() {
            node = node.move_red_right();
        }
        let right = node.right.take().expect("remove_max: non-maximum node keeps a right child");
        let (right, entry) = Self::remove_max_node(right);
        node.right = right;
        (Some(node.rebalance()), entry)
    }

    /// Returns the smallest key.
    pub(crate) fn min(&self) -> Result<&K, Error> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyTree)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.key)
    }

    /// Returns the largest key.
    pub(crate) fn max(&self) -> Result<&K, Error> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyTree)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.key)
    }

    /// Returns the largest key `<= key`, `Ok(None)` if every key is larger.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.root.is_none() {
            return Err(Error::EmptyTree);
        }
        Ok(Self::floor_node(self.root.as_deref(), key).map(|n| &n.key))
    }

    fn floor_node<'a, Q>(node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = node?;
        match key.cmp(node.key.borrow()) {
            Ordering::Equal => Some(node),
            Ordering::Less => Self::floor_node(node.left.as_deref(), key),
            // The right subtree may hold a closer bound; this node is the
            // fallback when it does not.
            Ordering::Greater => Self::floor_node(node.right.as_deref(), key).or(Some(node)),
        }
    }

    /// Returns the smallest key `>= key`, `Ok(None)` if every key is smaller.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.root.is_none() {
            return Err(Error::EmptyTree);
        }
        Ok(Self::ceiling_node(self.root.as_deref(), key).map(|n| &n.key))
    }

    fn ceiling_node<'a, Q>(node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = node?;
        match key.cmp(node.key.borrow()) {
            Ordering::Equal => Some(node),
            Ordering::Greater => Self::ceiling_node(node.right.as_deref(), key),
            Ordering::Less => Self::ceiling_node(node.left.as_deref(), key).or(Some(node)),
        }
    }

    /// Returns the entry at zero-based `rank` in sorted order.
    pub(crate) fn select(&self, rank: usize) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref();
        let mut remaining = rank;
        while let Some(n) = node {
            let left_size = subtree_size(n.left.as_deref());
            match remaining.cmp(&left_size) {
                Ordering::Less => node = n.left.as_deref(),
                Ordering::Equal => return Some((&n.key, &n.value)),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    node = n.right.as_deref();
                }
            }
        }
        None
    }

    pub(crate) fn select_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let mut node = self.root.as_deref_mut();
        let mut remaining = rank;
        while let Some(n) = node {
            let left_size = subtree_size(n.left.as_deref());
            match remaining.cmp(&left_size) {
                Ordering::Less => node = n.left.as_deref_mut(),
                Ordering::Equal => return Some((&n.key, &mut n.value)),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    node = n.right.as_deref_mut();
                }
            }
        }
        None
    }

    /// Returns the number of keys strictly less than `key`; total, so an
    /// absent key yields its insertion position.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut node = self.root.as_deref();
        let mut rank = 0;
        while let Some(n) = node {
            match key.cmp(n.key.borrow()) {
                Ordering::Less => node = n.left.as_deref(),
                Ordering::Equal => return rank + subtree_size(n.left.as_deref()),
                Ordering::Greater => {
                    rank += subtree_size(n.left.as_deref()) + 1;
                    node = n.right.as_deref();
                }
            }
        }
        rank
    }

    /// Returns the node count of the longest root-to-nil path; 0 when empty.
    pub(crate) fn height(&self) -> usize {
        Self::height_node(self.root.as_deref())
    }

    fn height_node(node: Option<&Node<K, V>>) -> usize {
        node.map_or(0, |n| {
            1 + Self::height_node(n.left.as_deref()).max(Self::height_node(n.right.as_deref()))
        })
    }

    fn blacken(mut node: Option<Box<Node<K, V>>>) -> Option<Box<Node<K, V>>> {
        if let Some(n) = node.as_mut() {
            n.color = Color::Black;
        }
        node
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RawLlrbMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn entries<K: fmt::Debug, V: fmt::Debug>(
            node: Option<&Node<K, V>>,
            map: &mut fmt::DebugMap<'_, '_>,
        ) {
            if let Some(n) = node {
                entries(n.left.as_deref(), map);
                map.entry(&n.key, &n.value);
                entries(n.right.as_deref(), map);
            }
        }
        let mut map = f.debug_map();
        entries(self.root.as_deref(), &mut map);
        map.finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    impl<K: Ord + fmt::Debug, V> RawLlrbMap<K, V> {
        /// Walks the whole tree and panics with a description of every
        /// violated invariant: BST order, link colors, black balance, and
        /// size caches.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();
            if is_red(self.root.as_deref()) {
                errors.push("root has a red incoming link".into());
            }
            let mut nil_black_links: Option<usize> = None;
            Self::validate_node(self.root.as_deref(), None, None, 0, &mut nil_black_links, &mut errors);
            assert!(errors.is_empty(), "tree invariant violations:\n{}", errors.join("\n"));
        }

        // Returns the actual cardinality of the subtree. Black-link counts
        // are compared at the nil leaves, where every path ends.
        fn validate_node(
            node: Option<&Node<K, V>>,
            lower: Option<&K>,
            upper: Option<&K>,
            black_links: usize,
            nil_black_links: &mut Option<usize>,
            errors: &mut Vec<String>,
        ) -> usize {
            let Some(n) = node else {
                match *nil_black_links {
                    None => *nil_black_links = Some(black_links),
                    Some(expected) => {
                        if black_links != expected {
                            errors.push(format!(
                                "black imbalance: a root-to-nil path has {black_links} black links, expected {expected}"
                            ));
                        }
                    }
                }
                return 0;
            };

            if let Some(lower) = lower
                && n.key <= *lower
            {
                errors.push(format!("BST order violated: {:?} is not above {:?}", n.key, lower));
            }
            if let Some(upper) = upper
                && n.key >= *upper
            {
                errors.push(format!("BST order violated: {:?} is not below {:?}", n.key, upper));
            }

            if n.right_is_red() {
                errors.push(format!("right-leaning red link below {:?}", n.key));
            }
            if n.color == Color::Red && n.left_is_red() {
                errors.push(format!("consecutive red links at {:?}", n.key));
            }

            let left_blacks = black_links + usize::from(!n.left_is_red());
            let right_blacks = black_links + usize::from(!n.right_is_red());
            let left_size =
                Self::validate_node(n.left.as_deref(), lower, Some(&n.key), left_blacks, nil_black_links, errors);
            let right_size =
                Self::validate_node(n.right.as_deref(), Some(&n.key), upper, right_blacks, nil_black_links, errors);

            let actual = 1 + left_size + right_size;
            if n.size != actual {
                errors.push(format!("size cache mismatch at {:?}: cached {}, actual {}", n.key, n.size, actual));
            }
            actual
        }
    }

    // Structural equality down to colors and size caches, for no-op checks.
    fn same_structure<K: PartialEq, V: PartialEq>(
        a: Option<&Node<K, V>>,
        b: Option<&Node<K, V>>,
    ) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.key == b.key
                    && a.value == b.value
                    && a.color == b.color
                    && a.size == b.size
                    && same_structure(a.left.as_deref(), b.left.as_deref())
                    && same_structure(a.right.as_deref(), b.right.as_deref())
            }
            _ => false,
        }
    }

    #[test]
    fn empty_tree_rejects_extreme_queries() {
        let mut tree: RawLlrbMap<i32, i32> = RawLlrbMap::new();
        assert_eq!(tree.min(), Err(Error::EmptyTree));
        assert_eq!(tree.max(), Err(Error::EmptyTree));
        assert_eq!(tree.floor(&0), Err(Error::EmptyTree));
        assert_eq!(tree.ceiling(&0), Err(Error::EmptyTree));
        assert_eq!(tree.remove_min(), Err(Error::EmptyTree));
        assert_eq!(tree.remove_max(), Err(Error::EmptyTree));
        tree.validate_invariants();
    }

    #[test]
    fn single_entry_lifecycle() {
        let mut tree = RawLlrbMap::new();
        assert_eq!(tree.put(7, "seven"), None);
        tree.validate_invariants();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.min(), Ok(&7));
        assert_eq!(tree.max(), Ok(&7));

        assert_eq!(tree.remove_min(), Ok((7, "seven")));
        tree.validate_invariants();
        assert!(tree.is_empty());
        assert_eq!(tree.remove_max(), Err(Error::EmptyTree));
    }

    #[test]
    fn put_returns_displaced_value() {
        let mut tree = RawLlrbMap::new();
        assert_eq!(tree.put(1, 10), None);
        assert_eq!(tree.put(1, 11), Some(10));
        assert_eq!(tree.get(&1), Some(&11));
        assert_eq!(tree.len(), 1);
        tree.validate_invariants();
    }

    #[test]
    fn deleting_an_absent_key_leaves_the_tree_identical() {
        let mut tree = RawLlrbMap::new();
        for key in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
            tree.put(key, key);
        }
        let before = tree.clone();

        assert_eq!(tree.delete(&42), None);
        assert!(same_structure(tree.root.as_deref(), before.root.as_deref()));
        assert_eq!(tree.delete(&0), None);
        assert!(same_structure(tree.root.as_deref(), before.root.as_deref()));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Put(i32),
        Delete(i32),
        RemoveMin,
        RemoveMax,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0i32..400).prop_map(Op::Put),
            2 => (0i32..400).prop_map(Op::Delete),
            1 => Just(Op::RemoveMin),
            1 => Just(Op::RemoveMax),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree: RawLlrbMap<i32, i32> = RawLlrbMap::new();

            for op in ops {
                match op {
                    Op::Put(key) => {
                        tree.put(key, key * 2);
                    }
                    Op::Delete(key) => {
                        tree.delete(&key);
                    }
                    Op::RemoveMin => {
                        let _ = tree.remove_min();
                    }
                    Op::RemoveMax => {
                        let _ = tree.remove_max();
                    }
                }
                tree.validate_invariants();
            }
        }

        #[test]
        fn height_stays_within_the_red_black_bound(keys in prop::collection::vec(0i64..100_000, 1..600)) {
            let mut tree: RawLlrbMap<i64, ()> = RawLlrbMap::new();
            for key in keys {
                tree.put(key, ());
            }
            tree.validate_invariants();

            // Worst case for a red-black tree: 2 * lg(n + 1), node count.
            let n = tree.len() as f64;
            let bound = 2.0 * (n + 1.0).log2();
            prop_assert!(
                (tree.height() as f64) <= bound,
                "height {} exceeds bound {} for {} entries",
                tree.height(),
                bound,
                tree.len()
            );
        }

        #[test]
        fn select_and_rank_agree_with_sorted_order(keys in prop::collection::vec(0i32..500, 1..200)) {
            let mut tree: RawLlrbMap<i32, i32> = RawLlrbMap::new();
            let mut expected: Vec<i32> = Vec::new();

            for key in keys {
                if tree.put(key, key * 2).is_none() {
                    expected.push(key);
                }
            }
            expected.sort_unstable();

            for (rank, &key) in expected.iter().enumerate() {
                let (selected, value) = tree.select(rank).expect("rank within bounds");
                prop_assert_eq!(*selected, key);
                prop_assert_eq!(*value, key * 2);
                prop_assert_eq!(tree.rank(&key), rank);
            }
            prop_assert!(tree.select(expected.len()).is_none());
        }

        #[test]
        fn draining_by_remove_min_yields_increasing_keys(keys in prop::collection::vec(0i32..1000, 1..200)) {
            let mut tree: RawLlrbMap<i32, i32> = RawLlrbMap::new();
            for key in &keys {
                tree.put(*key, 0);
            }

            let mut previous: Option<i32> = None;
            while let Ok((key, _)) = tree.remove_min() {
                tree.validate_invariants();
                if let Some(previous) = previous {
                    prop_assert!(previous < key);
                }
                previous = Some(key);
            }
            prop_assert!(tree.is_empty());
        }
    }
}
