//! Height-balanced tree utility functions.
//!
//! Everything here is generic over [`HeightNode`] and operates on arena
//! indices. Rotations rewrite links in place and return the new subtree top;
//! the caller promotes the top to tree root when its parent is absent.

use crate::types::{HeightNode, Node};

#[inline]
fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}
#[inline]
fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}
#[inline]
fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}
#[inline]
fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}
#[inline]
fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}
#[inline]
fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Cached height of a possibly absent node. Absent children count as 0.
#[inline]
pub fn height<N: HeightNode>(arena: &[N], node: Option<u32>) -> i32 {
    match node {
        Some(i) => arena[i as usize].height(),
        None => 0,
    }
}

/// Balance factor from cached heights: `height(right) - height(left)`.
///
/// An absent node has balance factor 0.
#[inline]
pub fn balance_factor<N: HeightNode>(arena: &[N], node: Option<u32>) -> i32 {
    match node {
        Some(i) => {
            height(arena, get_r(arena, i)) - height(arena, get_l(arena, i))
        }
        None => 0,
    }
}

#[inline]
fn recalc_height<N: HeightNode>(arena: &mut [N], idx: u32) {
    let h = 1 + height(arena, get_l(arena, idx)).max(height(arena, get_r(arena, idx)));
    arena[idx as usize].set_height(h);
}

/// Leftmost node of the subtree rooted at `root`.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor of `node`.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        let mut curr = r;
        while let Some(l) = get_l(arena, curr) {
            curr = l;
        }
        return Some(curr);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Single rotation: promotes `child` into `node`'s position, demoting `node`
/// to a child of `child`.
///
/// `child` must be a child of `node` and lean toward the same side as the
/// imbalance. The inner grandchild moves over to `node`, all parent links are
/// rewritten, and heights are recomputed bottom-up (`node`, then `child`).
///
/// Returns the new subtree top (`child`).
pub fn single_rotate<N: HeightNode>(arena: &mut [N], node: u32, child: u32) -> u32 {
    let parent = get_p(arena, node);
    let is_right_rotate = get_l(arena, node) == Some(child);
    let moving = if is_right_rotate {
        get_r(arena, child)
    } else {
        get_l(arena, child)
    };

    // The inner grandchild switches sides onto `node`.
    if let Some(m) = moving {
        set_p(arena, m, Some(node));
    }
    if is_right_rotate {
        set_l(arena, node, moving);
    } else {
        set_r(arena, node, moving);
    }

    // `node` becomes the opposite-side child of `child`.
    set_p(arena, node, Some(child));
    if is_right_rotate {
        set_r(arena, child, Some(node));
    } else {
        set_l(arena, child, Some(node));
    }

    // `child` takes `node`'s slot under the old parent.
    set_p(arena, child, parent);
    if let Some(p) = parent {
        if get_l(arena, p) == Some(node) {
            set_l(arena, p, Some(child));
        } else {
            set_r(arena, p, Some(child));
        }
    }

    recalc_height(arena, node);
    recalc_height(arena, child);
    child
}

/// Double rotation for the left-right / right-left cases: promotes the inner
/// grandchild to the subtree top with `node` and `child` as its children.
///
/// Equivalent to a single rotation at `child` followed by one at `node`, but
/// performed as one direct restructuring so heights are recomputed once.
///
/// Returns the new subtree top (the grandchild).
pub fn double_rotate<N: HeightNode>(arena: &mut [N], node: u32, child: u32) -> u32 {
    let is_left_right = get_l(arena, node) == Some(child);
    let grand = if is_left_right {
        get_r(arena, child)
    } else {
        get_l(arena, child)
    }
    .expect("inner grandchild exists");
    let left_great = get_l(arena, grand);
    let right_great = get_r(arena, grand);
    let parent = get_p(arena, node);

    // The grandchild takes `node`'s slot under the old parent.
    if let Some(p) = parent {
        if get_l(arena, p) == Some(node) {
            set_l(arena, p, Some(grand));
        } else {
            set_r(arena, p, Some(grand));
        }
    }
    set_p(arena, grand, parent);

    // `node` and `child` become the grandchild's children, sides matching the
    // original left-right / right-left configuration.
    if is_left_right {
        set_l(arena, grand, Some(child));
        set_r(arena, grand, Some(node));
    } else {
        set_l(arena, grand, Some(node));
        set_r(arena, grand, Some(child));
    }
    set_p(arena, node, Some(grand));
    set_p(arena, child, Some(grand));

    // The grandchild's former subtrees are reattached to `child` and `node`.
    if is_left_right {
        set_r(arena, child, left_great);
        set_l(arena, node, right_great);
        if let Some(g) = left_great {
            set_p(arena, g, Some(child));
        }
        if let Some(g) = right_great {
            set_p(arena, g, Some(node));
        }
    } else {
        set_l(arena, child, right_great);
        set_r(arena, node, left_great);
        if let Some(g) = right_great {
            set_p(arena, g, Some(child));
        }
        if let Some(g) = left_great {
            set_p(arena, g, Some(node));
        }
    }

    recalc_height(arena, child);
    recalc_height(arena, node);
    recalc_height(arena, grand);
    grand
}

/// Walks from `parent` to the tree root, recomputing cached heights and
/// performing at most one rotation per level.
///
/// `child` is the subtree of `parent` that just changed (`None` when a leaf
/// or whole subtree was removed). The next level's parent is captured before
/// rotating, since a rotation rewrites the current node's parent link.
///
/// Returns the new root index.
pub fn balance_up<N: HeightNode>(
    arena: &mut [N],
    mut root: u32,
    mut parent: Option<u32>,
    mut child: Option<u32>,
) -> u32 {
    while let Some(p) = parent {
        recalc_height(arena, p);
        let next_parent = get_p(arena, p);
        let pbf = balance_factor(arena, Some(p));
        let cbf = balance_factor(arena, child);
        let top = if get_l(arena, p) == child {
            if pbf > 1 {
                // Right-heavy while the change came from the left (deletion):
                // rotate around the other child, by its own lean.
                let other = get_r(arena, p).expect("right subtree exists");
                if balance_factor(arena, Some(other)) < 0 {
                    double_rotate(arena, p, other)
                } else {
                    single_rotate(arena, p, other)
                }
            } else if pbf < -1 {
                let c = child.expect("left subtree exists");
                if cbf > 0 {
                    double_rotate(arena, p, c)
                } else {
                    single_rotate(arena, p, c)
                }
            } else {
                p
            }
        } else if pbf > 1 {
            let c = child.expect("right subtree exists");
            if cbf < 0 {
                double_rotate(arena, p, c)
            } else {
                single_rotate(arena, p, c)
            }
        } else if pbf < -1 {
            let other = get_l(arena, p).expect("left subtree exists");
            if balance_factor(arena, Some(other)) > 0 {
                double_rotate(arena, p, other)
            } else {
                single_rotate(arena, p, other)
            }
        } else {
            p
        };
        if get_p(arena, top).is_none() {
            root = top;
        }
        child = Some(top);
        parent = next_parent;
    }
    root
}
