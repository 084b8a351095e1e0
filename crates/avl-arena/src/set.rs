use std::collections::VecDeque;

use crate::node::AvlNode;
use crate::util::{balance_factor, balance_up, first, height, next};

fn default_comparator<V: PartialOrd>(a: &V, b: &V) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// AVL tree set over arena-indexed, parent-linked nodes.
///
/// Child links are owning, the parent link is a structural back-reference
/// used only to ascend during rebalancing. One distinguished "null" element
/// may be stored out of band, since an absent value cannot be ordered against
/// real values; it is tracked as a flag next to the tree and counted in
/// [`size`](Self::size).
///
/// Every mutating operation locates its target with a single comparison
/// walk, applies the link change at that point, then repairs the AVL
/// invariant iteratively from the mutation site toward the root. All
/// operations are O(height) = O(log n).
///
/// The comparator must be a consistent total order; the tree silently
/// violates its ordering invariant otherwise.
pub struct AvlTreeSet<V, C = fn(&V, &V) -> i32>
where
    C: Fn(&V, &V) -> i32,
{
    pub root: Option<u32>,
    pub comparator: C,
    arena: Vec<AvlNode<V>>,
    free: Vec<u32>,
    has_null: bool,
    size: usize,
}

impl<V> AvlTreeSet<V, fn(&V, &V) -> i32>
where
    V: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<V>)
    }
}

impl<V> Default for AvlTreeSet<V, fn(&V, &V) -> i32>
where
    V: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> AvlTreeSet<V, C>
where
    C: Fn(&V, &V) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
            arena: Vec::new(),
            free: Vec::new(),
            has_null: false,
            size: 0,
        }
    }

    #[inline]
    fn compare(&self, a: &V, b: &V) -> i32 {
        (self.comparator)(a, b)
    }

    fn alloc(&mut self, value: V) -> u32 {
        match self.free.pop() {
            Some(i) => {
                // Reuse drops the stale value left in the slot.
                self.arena[i as usize] = AvlNode::new(value);
                i
            }
            None => {
                self.arena.push(AvlNode::new(value));
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Would-be parent of `value`: the last non-matching node on the walk
    /// from the root.
    ///
    /// Returns `None` when the tree is empty or the root itself matches; the
    /// walk stops on the first equal value, so a returned node either has the
    /// matching node in the slot `value` compares into, or has that slot
    /// empty. Callers re-derive the slot with one more comparison.
    fn find_parent(&self, value: &V) -> Option<u32> {
        let mut curr = self.root;
        let mut parent = None;
        while let Some(i) = curr {
            let cmp = self.compare(&self.arena[i as usize].v, value);
            if cmp == 0 {
                break;
            }
            parent = Some(i);
            curr = if cmp > 0 {
                self.arena[i as usize].l
            } else {
                self.arena[i as usize].r
            };
        }
        parent
    }

    /// Inserts `value`, returning whether the set changed.
    ///
    /// `None` stores the out-of-band null element. Duplicates are rejected
    /// with `false` and no state change.
    pub fn add(&mut self, value: Option<V>) -> bool {
        let Some(value) = value else {
            if self.has_null {
                return false;
            }
            self.has_null = true;
            self.size += 1;
            return true;
        };

        match self.find_parent(&value) {
            None => {
                if self.root.is_some() {
                    // The root already holds this value.
                    return false;
                }
                let n = self.alloc(value);
                self.root = Some(n);
                self.size += 1;
                true
            }
            Some(p) => {
                let cmp = self.compare(&self.arena[p as usize].v, &value);
                let slot = if cmp > 0 {
                    self.arena[p as usize].l
                } else {
                    self.arena[p as usize].r
                };
                if slot.is_some() {
                    // The walk stopped on an equal child.
                    return false;
                }
                let n = self.alloc(value);
                if cmp > 0 {
                    self.arena[p as usize].l = Some(n);
                } else {
                    self.arena[p as usize].r = Some(n);
                }
                self.arena[n as usize].p = Some(p);
                let root = self.root.expect("tree is non-empty");
                self.root = Some(balance_up(&mut self.arena, root, Some(p), Some(n)));
                self.size += 1;
                true
            }
        }
    }

    /// Inserts every element of `values` in iteration order.
    ///
    /// Returns true iff at least one insertion succeeded; duplicates do not
    /// abort the batch.
    pub fn add_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = Option<V>>,
    {
        let mut changed = false;
        for value in values {
            changed |= self.add(value);
        }
        changed
    }

    pub fn contains(&self, value: Option<&V>) -> bool {
        let Some(value) = value else {
            return self.has_null;
        };
        match self.find_parent(value) {
            None => self.root.is_some(),
            Some(p) => {
                if self.compare(&self.arena[p as usize].v, value) > 0 {
                    self.arena[p as usize].l.is_some()
                } else {
                    self.arena[p as usize].r.is_some()
                }
            }
        }
    }

    /// Removes `value`, returning whether the set changed.
    pub fn remove(&mut self, value: Option<&V>) -> bool {
        let Some(value) = value else {
            if !self.has_null {
                return false;
            }
            self.has_null = false;
            self.size -= 1;
            return true;
        };

        let node = match self.find_parent(value) {
            None => self.root,
            Some(p) => {
                if self.compare(&self.arena[p as usize].v, value) > 0 {
                    self.arena[p as usize].l
                } else {
                    self.arena[p as usize].r
                }
            }
        };
        let Some(node) = node else {
            return false;
        };

        self.delete_internal(node);
        self.free.push(node);
        self.size -= 1;
        true
    }

    /// Unlinks `node` from the tree and rebalances.
    ///
    /// With two children the in-order successor is spliced into `node`'s
    /// position. The structural disturbance is at the successor's original
    /// parent, not the splice point, so rebalancing starts there — except
    /// when the successor is the immediate right child, in which case it
    /// keeps its own right subtree and the disturbance is the successor
    /// itself.
    fn delete_internal(&mut self, node: u32) {
        let parent = self.arena[node as usize].p;
        let left = self.arena[node as usize].l;
        let right = self.arena[node as usize].r;

        let (new_child, bu_parent, bu_child) = match (left, right) {
            (None, _) => (right, parent, right),
            (_, None) => (left, parent, left),
            (Some(l), Some(r)) => {
                let mut succ = r;
                while let Some(sl) = self.arena[succ as usize].l {
                    succ = sl;
                }
                let (bu_parent, bu_child);
                if succ == r {
                    bu_parent = Some(succ);
                    bu_child = self.arena[succ as usize].r;
                } else {
                    // Detach the successor, promoting its right child into
                    // its former slot, then let it adopt node's right child.
                    let sp = self.arena[succ as usize].p.expect("successor has a parent");
                    let sr = self.arena[succ as usize].r;
                    self.arena[sp as usize].l = sr;
                    if let Some(sr) = sr {
                        self.arena[sr as usize].p = Some(sp);
                    }
                    self.arena[succ as usize].r = Some(r);
                    self.arena[r as usize].p = Some(succ);
                    bu_parent = Some(sp);
                    bu_child = sr;
                }
                self.arena[succ as usize].l = Some(l);
                self.arena[l as usize].p = Some(succ);
                (Some(succ), bu_parent, bu_child)
            }
        };

        if let Some(c) = new_child {
            self.arena[c as usize].p = parent;
        }
        match parent {
            None => self.root = new_child,
            Some(p) => {
                if self.arena[p as usize].l == Some(node) {
                    self.arena[p as usize].l = new_child;
                } else {
                    self.arena[p as usize].r = new_child;
                }
            }
        }

        if let Some(root) = self.root {
            self.root = Some(balance_up(&mut self.arena, root, bu_parent, bu_child));
        }
    }

    /// Count of logically distinct stored elements, including the null
    /// element if present.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
        self.free.clear();
        self.has_null = false;
        self.size = 0;
    }

    /// Read access to a node by arena index, for structural inspection.
    pub fn node(&self, idx: u32) -> &AvlNode<V> {
        &self.arena[idx as usize]
    }

    /// Diagnostic check that every reachable node satisfies the AVL
    /// invariant, from cached heights only.
    ///
    /// Breadth-first; returns false on the first violation. Never consulted
    /// by the mutating operations.
    pub fn is_balanced(&self) -> bool {
        let mut queue = VecDeque::new();
        if let Some(root) = self.root {
            queue.push_back(root);
        }
        while let Some(i) = queue.pop_front() {
            let bal = balance_factor(&self.arena, Some(i));
            if !(-1..=1).contains(&bal) {
                return false;
            }
            if let Some(l) = self.arena[i as usize].l {
                queue.push_back(l);
            }
            if let Some(r) = self.arena[i as usize].r {
                queue.push_back(r);
            }
        }
        true
    }

    /// Full structural validation: parent links, cached heights, balance
    /// factors, and strict in-order ordering.
    pub fn assert_valid(&self) -> Result<(), String> {
        let Some(root) = self.root else {
            if self.size != usize::from(self.has_null) {
                return Err("Empty tree with non-zero size".to_string());
            }
            return Ok(());
        };

        if self.arena[root as usize].p.is_some() {
            return Err("Root has parent".to_string());
        }

        let mut reachable = 0usize;
        self.validate_node(root, &mut reachable)?;
        if reachable + usize::from(self.has_null) != self.size {
            return Err(format!(
                "Size mismatch: {} reachable, size {}",
                reachable, self.size
            ));
        }

        let mut curr = first(&self.arena, Some(root));
        let mut prev: Option<u32> = None;
        while let Some(i) = curr {
            if let Some(prev) = prev {
                let cmp = self.compare(&self.arena[prev as usize].v, &self.arena[i as usize].v);
                if cmp >= 0 {
                    return Err("Node order violated".to_string());
                }
            }
            prev = Some(i);
            curr = next(&self.arena, i);
        }

        Ok(())
    }

    fn validate_node(&self, node: u32, reachable: &mut usize) -> Result<(), String> {
        *reachable += 1;
        let l = self.arena[node as usize].l;
        let r = self.arena[node as usize].r;

        if let Some(l) = l {
            if self.arena[l as usize].p != Some(node) {
                return Err("Broken parent link on left child".to_string());
            }
            self.validate_node(l, reachable)?;
        }
        if let Some(r) = r {
            if self.arena[r as usize].p != Some(node) {
                return Err("Broken parent link on right child".to_string());
            }
            self.validate_node(r, reachable)?;
        }

        let expected = 1 + height(&self.arena, l).max(height(&self.arena, r));
        let actual = self.arena[node as usize].height;
        if actual != expected {
            return Err(format!(
                "Height mismatch: expected {expected}, got {actual}"
            ));
        }
        let bf = height(&self.arena, r) - height(&self.arena, l);
        if !(-1..=1).contains(&bf) {
            return Err("AVL balance violated".to_string());
        }

        Ok(())
    }
}
