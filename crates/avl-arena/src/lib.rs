//! Arena-based AVL tree set.
//!
//! A self-balancing binary search tree maintaining the AVL invariant
//! (per-node balance factor in `[-1, 1]`) over explicitly parent-linked
//! nodes. Instead of raw pointers, all links are `Option<u32>` indices into
//! a `Vec`-backed arena, which keeps the parent back-reference a plain
//! structural index rather than an owning cycle.
//!
//! Mutations locate their target with one comparison walk, rewrite links at
//! that point, then repair the invariant iteratively from the mutation site
//! up toward the root — no recursion, at most one rotation per ascended
//! level. A single distinguished "null" element is stored out of band as a
//! flag, since an absent value cannot participate in comparisons.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`HeightNode`] link traits, [`Comparator`] |
//! [`node`] | [`AvlNode`] concrete arena node |
//! [`util`] | rotations, iterative `balance_up`, in-order helpers |
//! [`set`] | [`AvlTreeSet`] public API |
//!
//! Single-threaded by design; wrap in an external exclusion mechanism for
//! concurrent use.

pub mod node;
pub mod set;
pub mod types;
pub mod util;

pub use node::AvlNode;
pub use set::AvlTreeSet;
pub use types::{Comparator, HeightNode, Node};
pub use util::{balance_factor, balance_up, double_rotate, first, height, next, single_rotate};
