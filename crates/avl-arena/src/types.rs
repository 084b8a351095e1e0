//! Node trait definitions.
//!
//! All tree "pointers" are `Option<u32>` indices into a caller-owned
//! `Vec`-backed arena. Tree-manipulation functions take the arena as a slice
//! and work with indices; the parent link is a structural back-reference used
//! only to walk upward, never to extend a lifetime.

/// Parent/left/right links of a binary tree node.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Comparator used by ordered tree structures.
///
/// Returns a negative number, zero, or a positive number when the first
/// argument is smaller, equal, or greater. Must be a consistent total order;
/// the tree does not detect violations.
pub type Comparator<T> = dyn Fn(&T, &T) -> i32;

/// Height-balanced node behavior.
///
/// `height` is the cached subtree height: leaves are 1, an absent child
/// counts as 0.
pub trait HeightNode: Node {
    fn height(&self) -> i32;
    fn set_height(&mut self, height: i32);
}
