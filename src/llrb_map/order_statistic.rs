use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::LlrbMap;
use crate::Rank;

impl<K, V> LlrbMap<K, V> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// ordered-map API.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put("a", 10);
    /// map.put("c", 30);
    /// map.put("b", 20);
    ///
    /// let (key, value) = map.select(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.select(3).is_none());
    /// ```
    #[must_use]
    pub fn select(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.select(rank)
    }

    /// Returns the key and a mutable reference to the value at position
    /// `rank` in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// ordered-map API.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(10, "a");
    /// map.put(5, "b");
    ///
    /// if let Some((key, value)) = map.select_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn select_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        self.raw.select_mut(rank)
    }

    /// Returns the number of keys strictly less than `key`.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// ordered-map API.
    ///
    /// The result is defined for absent keys too, where it is the position
    /// at which the key would be inserted; for present keys it is the key's
    /// zero-based rank, so `select(rank(&k))` returns `k` whenever `k` is in
    /// the map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.put(10, "a");
    /// map.put(20, "b");
    ///
    /// assert_eq!(map.rank(&10), 0);
    /// assert_eq!(map.rank(&15), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbMap, Rank};
///
/// let mut map = LlrbMap::new();
/// map.put("a", 1);
/// map.put("b", 2);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V> Index<Rank> for LlrbMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbMap, Rank};
///
/// let mut map = LlrbMap::new();
/// map.put("a", 1);
/// map.put("b", 2);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V> IndexMut<Rank> for LlrbMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.select_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
