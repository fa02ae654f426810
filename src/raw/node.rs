/// Color of the link from a node's parent to the node itself.
///
/// A red link binds two nodes into one logical 2-3 tree node; a black link
/// is a real tree edge. Nil children are black by convention, which
/// [`is_red`] encodes by being total over `Option`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    pub(super) fn flip(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

// One key/value pair plus the subtree rooted at it. `size` counts the nodes
// of that subtree, itself included, and must always equal
// 1 + size(left) + size(right).
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) color: Color,
    pub(super) size: usize,
    pub(super) left: Option<Box<Node<K, V>>>,
    pub(super) right: Option<Box<Node<K, V>>>,
}

/// Returns true if the link into `node` is red; nil links are black.
pub(super) fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.is_some_and(|n| n.color == Color::Red)
}

/// Returns the cached size of a possibly-nil subtree.
pub(super) fn subtree_size<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |n| n.size)
}

impl<K, V> Node<K, V> {
    /// Creates a leaf-to-be: new nodes always enter the tree red, size 1.
    pub(super) fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            color: Color::Red,
            size: 1,
            left: None,
            right: None,
        })
    }

    /// Recomputes the cached size from the children's caches.
    pub(super) fn update_size(&mut self) {
        self.size = 1 + subtree_size(self.left.as_deref()) + subtree_size(self.right.as_deref());
    }

    pub(super) fn left_is_red(&self) -> bool {
        is_red(self.left.as_deref())
    }

    pub(super) fn right_is_red(&self) -> bool {
        is_red(self.right.as_deref())
    }

    pub(super) fn left_left_is_red(&self) -> bool {
        is_red(self.left.as_deref().and_then(|n| n.left.as_deref()))
    }

    pub(super) fn right_left_is_red(&self) -> bool {
        is_red(self.right.as_deref().and_then(|n| n.left.as_deref()))
    }

    /// Left rotation: lifts the right child above `self`.
    ///
    /// The promoted child takes over `self`'s link color and subtree total;
    /// `self`'s new incoming link is red. Order and black height are
    /// preserved.
    #[must_use]
    pub(super) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut pivot = self.right.take().expect("rotate_left: right child must exist");
        self.right = pivot.left.take();
        pivot.color = self.color;
        self.color = Color::Red;
        pivot.size = self.size;
        self.update_size();
        pivot.left = Some(self);
        pivot
    }

    /// Right rotation: mirror of [`Node::rotate_left`].
    #[must_use]
    pub(super) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut pivot = self.left.take().expect("rotate_right: left child must exist");
        self.left = pivot.right.take();
        pivot.color = self.color;
        self.color = Color::Red;
        pivot.size = self.size;
        self.update_size();
        pivot.right = Some(self);
        pivot
    }

    /// Toggles the incoming-link color of `self` and of both children.
    ///
    /// One direction merges `self` with its children into a temporary
    /// 4-node; the other splits a 4-node, passing a red link upward. Both
    /// children must be present.
    pub(super) fn flip_colors(&mut self) {
        self.color = self.color.flip();
        let left = self.left.as_mut().expect("flip_colors: left child must exist");
        left.color = left.color.flip();
        let right = self.right.as_mut().expect("flip_colors: right child must exist");
        right.color = right.color.flip();
    }

    /// Restores the left-leaning invariants at `self` after one of its
    /// children changed, then refreshes the cached size.
    ///
    /// Applied bottom-up on the unwind of every mutating recursion. The
    /// three guards are exhaustive given that the invariants held one level
    /// below: rotate a lone red right child left, rotate a red-red left
    /// spine right, split a node with two red children.
    #[must_use]
    pub(super) fn rebalance(mut self: Box<Self>) -> Box<Self> {
        if self.right_is_red() && !self.left_is_red() {
            self = self.rotate_left();
        }
        if self.left_is_red() && self.left_left_is_red() {
            self = self.rotate_right();
        }
        if self.left_is_red() && self.right_is_red() {
            self.flip_colors();
        }
        self.update_size();
        self
    }

    /// Ensures the left child or its left child is red before a leftward
    /// descent removes through it.
    ///
    /// Precondition: `self` is red, both children black. The color flip
    /// borrows from the 2-3 parent; if the right child's left grandchild is
    /// red the borrow overshot into a right-leaning state, corrected by the
    /// double rotation and a second flip.
    #[must_use]
    pub(super) fn move_red_left(mut self: Box<Self>) -> Box<Self> {
        self.flip_colors();
        if self.right_left_is_red() {
            let right = self.right.take().expect("move_red_left: right child must exist");
            self.right = Some(right.rotate_right());
            self = self.rotate_left();
            self.flip_colors();
        }
        self
    }

    /// Mirror of [`Node::move_red_left`] for rightward descents.
    #[must_use]
    pub(super) fn move_red_right(mut self: Box<Self>) -> Box<Self> {
        self.flip_colors();
        if self.left_left_is_red() {
            self = self.rotate_right();
            self.flip_colors();
        }
        self
    }
}
