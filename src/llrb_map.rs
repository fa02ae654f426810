use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::Error;
use crate::raw::RawLlrbMap;

mod order_statistic;

pub use crate::Rank;

/// An ordered map based on a [left-leaning red-black tree].
///
/// Given a key type with a [total order], an ordered map stores its entries
/// in key order. That means that keys must be of a type that implements the
/// [`Ord`] trait, such that two keys can always be compared to determine
/// their ordering. Examples of keys with a total order are strings with
/// lexicographical order, and numbers with their natural order.
///
/// Beyond lookup, insertion, and removal, the ordering supports nearest-key
/// queries ([`floor`](LlrbMap::floor), [`ceiling`](LlrbMap::ceiling)),
/// extreme-key queries ([`min`](LlrbMap::min), [`max`](LlrbMap::max)) and
/// their removing counterparts, and O(log n) positional queries
/// ([`select`](LlrbMap::select), [`rank`](LlrbMap::rank)) backed by a
/// subtree-size augmentation maintained on every rebalancing step.
///
/// It is a logic error for a key to be modified in such a way that the key's
/// ordering relative to any other key, as determined by the [`Ord`] trait,
/// changes while it is in the map. This is normally only possible through
/// [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The behavior
/// resulting from such a logic error is not specified, but will be
/// encapsulated to the `LlrbMap` that observed the logic error and not
/// result in undefined behavior. This could include panics, incorrect
/// results, aborts, memory leaks, and non-termination.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbMap;
///
/// let mut checkouts = LlrbMap::new();
///
/// // Track how often each title was checked out.
/// checkouts.put("Dune", 12);
/// checkouts.put("Emma", 5);
/// checkouts.put("Hamlet", 7);
///
/// // Lookups accept any borrowed form of the key.
/// assert_eq!(checkouts.get("Emma"), Some(&5));
///
/// // `put` on a present key replaces the value and returns the old one.
/// assert_eq!(checkouts.put("Emma", 6), Some(5));
///
/// // Ordered queries come from the tree structure itself.
/// assert_eq!(checkouts.min(), Ok(&"Dune"));
/// assert_eq!(checkouts.ceiling("F"), Ok(Some(&"Hamlet")));
///
/// // Removal returns the evicted value.
/// assert_eq!(checkouts.delete("Dune"), Some(12));
/// assert_eq!(checkouts.len(), 2);
/// ```
///
/// # Background
///
/// A [left-leaning red-black tree] is a binary search tree encoding of a
/// [2-3 tree]: a red link binds two binary nodes into one logical 3-node,
/// and the encoding restricts red links to left children. Three local
/// repairs (rotate left, rotate right, color flip), applied bottom-up after
/// every structural edit, keep all root-to-leaf paths at the same black-link
/// count, which bounds the height of a tree of n entries by 2 log2(n + 1).
/// Every operation is a single root-to-leaf pass, so lookup, insertion,
/// removal, and the positional queries all run in worst-case O(log n).
///
/// [left-leaning red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
/// [2-3 tree]: https://en.wikipedia.org/wiki/2%E2%80%933_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
#[derive(Clone)]
pub struct LlrbMap<K, V> {
    raw: RawLlrbMap<K, V>,
}

impl<K, V> LlrbMap<K, V> {
    /// Makes a new, empty `LlrbMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.put(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawLlrbMap::new() }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.put(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) - reads the root's cached subtree size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// assert!(a.is_empty());
    /// a.put(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// a.put(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key. The
    /// returned key is the one stored in the map, which matters for key
    /// types whose equality admits observably different representatives.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Replacing a value this way never changes the shape of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Inserts a key-value pair into the map, returning the previous value
    /// if the key was already present.
    ///
    /// The key is not updated when it was already present; this matters for
    /// key types whose equality admits observably different representatives.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.put(37, "a"), None);
    /// assert!(!map.is_empty());
    ///
    /// map.put(37, "b");
    /// assert_eq!(map.put(37, "c"), Some("b"));
    /// assert_eq!(map.get(&37), Some(&"c"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn put(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        self.raw.put(key, value)
    }

    /// Removes a key from the map, returning its value if the key was
    /// present.
    ///
    /// Removing an absent key is a no-op: the tree is left exactly as it
    /// was, down to link colors.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.delete(&1), Some("a"));
    /// assert_eq!(map.delete(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.delete(key)
    }

    /// Removes and returns the entry with the smallest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the map is empty.
    ///
    /// # Examples
    ///
    /// Draining a map in ascending key order:
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(2, "b");
    /// map.put(1, "a");
    ///
    /// assert_eq!(map.remove_min(), Ok((1, "a")));
    /// assert_eq!(map.remove_min(), Ok((2, "b")));
    /// assert!(map.remove_min().is_err());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_min(&mut self) -> Result<(K, V), Error> {
        self.raw.remove_min()
    }

    /// Removes and returns the entry with the largest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(2, "b");
    /// map.put(1, "a");
    ///
    /// assert_eq!(map.remove_max(), Ok((2, "b")));
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_max(&mut self) -> Result<(K, V), Error> {
        self.raw.remove_max()
    }

    /// Returns the smallest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LlrbMap};
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyTree));
    /// map.put(2, "b");
    /// map.put(1, "a");
    /// assert_eq!(map.min(), Ok(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn min(&self) -> Result<&K, Error> {
        self.raw.min()
    }

    /// Returns the largest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(2, "b");
    /// map.put(1, "a");
    /// assert_eq!(map.max(), Ok(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn max(&self) -> Result<&K, Error> {
        self.raw.max()
    }

    /// Returns the largest key less than or equal to the given key, or
    /// `Ok(None)` if every key in the map is larger.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the map is empty; an empty map cannot
    /// distinguish "no bound" from "no data".
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LlrbMap};
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.floor(&4), Err(Error::EmptyTree));
    ///
    /// map.put(2, "b");
    /// map.put(5, "e");
    /// assert_eq!(map.floor(&4), Ok(Some(&2)));
    /// assert_eq!(map.floor(&5), Ok(Some(&5)));
    /// assert_eq!(map.floor(&1), Ok(None));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn floor<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.floor(key)
    }

    /// Returns the smallest key greater than or equal to the given key, or
    /// `Ok(None)` if every key in the map is smaller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(2, "b");
    /// map.put(5, "e");
    /// assert_eq!(map.ceiling(&3), Ok(Some(&5)));
    /// assert_eq!(map.ceiling(&2), Ok(Some(&2)));
    /// assert_eq!(map.ceiling(&6), Ok(None));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn ceiling<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.ceiling(key)
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf, which the balancing invariants keep at or below
    /// 2 log2(n + 1). An empty map has height 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.height(), 0);
    /// map.put(1, "a");
    /// map.put(2, "b");
    /// map.put(3, "c");
    /// assert_eq!(map.height(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) - walks the whole tree; intended for diagnostics.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }
}

impl<K, V> Default for LlrbMap<K, V> {
    /// Creates an empty `LlrbMap`.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LlrbMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

/// Returns a reference to the value corresponding to the supplied key.
///
/// # Panics
///
/// Panics if the key is not present in the `LlrbMap`.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbMap;
///
/// let mut map = LlrbMap::new();
/// map.put("a", 1);
///
/// assert_eq!(map[&"a"], 1);
/// ```
impl<K, Q, V> Index<&Q> for LlrbMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}
