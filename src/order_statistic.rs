/// A zero-based rank into the sorted order of a map.
///
/// This is an order-statistic extension enabled by the subtree-size
/// augmentation; it is not part of the standard ordered-map API.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbMap, Rank};
///
/// let mut map = LlrbMap::new();
/// map.put("a", 10);
/// map.put("b", 20);
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
