use crate::types::{HeightNode, Node};

/// One stored element of an [`AvlTreeSet`](crate::set::AvlTreeSet).
///
/// Holds the value, the cached subtree height and the three arena links.
/// A freshly created node is a detached leaf: height 1, no links.
#[derive(Clone, Debug)]
pub struct AvlNode<V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub v: V,
    /// Cached subtree height, `1 + max(height(l), height(r))`.
    pub height: i32,
}

impl<V> AvlNode<V> {
    pub fn new(v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            v,
            height: 1,
        }
    }
}

impl<V> Node for AvlNode<V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<V> HeightNode for AvlNode<V> {
    fn height(&self) -> i32 {
        self.height
    }

    fn set_height(&mut self, height: i32) {
        self.height = height;
    }
}
