// Heap intrinsic operations implemented externally.
//
// A heap is a tree-like structure where every subtree's root has a better score
// than all the other nodes in the subtree.
//
// This is often implemented with an array that's traversed in a non-linear way.
// These are the indices we assign to each node of a binary heap,
//
// ```text
//                           0
//              1                         2
//       3            4            5             6
//   7      8      9     10    11     12     13     14
// 15 16  17 18  19 20  21 22 23 24  25
// ```
//
// The last level will often be incomplete. Wider heaps follow the same layout
// with `A` children per node.

/// The parent node
///
/// ```
/// use maze::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(3), 1);
/// assert_eq!(index_parent::<2>(25), 12);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / A
}

/// The first (left-most) children
///
/// ```
/// use maze::heap_primitives::index_first_children;
/// assert_eq!(index_first_children::<2>(0), 1);
/// assert_eq!(index_first_children::<2>(3), 7);
/// assert_eq!(index_first_children::<4>(0), 1);
/// assert_eq!(index_first_children::<4>(1), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_children<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The last (right-most) children
///
/// ```
/// use maze::heap_primitives::index_last_children;
/// assert_eq!(index_last_children::<2>(0), 2);
/// assert_eq!(index_last_children::<2>(6), 14);
/// assert_eq!(index_last_children::<4>(0), 4);
/// assert_eq!(index_last_children::<4>(1), 8);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_children<const A: usize>(i: usize) -> usize {
    A * (i + 1)
}
