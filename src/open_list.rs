//! A min-heap for the frontier of best-first searches.

use std::cmp::min;

const HEAP_ARITY: usize = 4usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    crate::heap_primitives::index_first_children::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    crate::heap_primitives::index_last_children::<HEAP_ARITY>(i)
}

/// A `HEAP_ARITY`-ary heap popping the smallest element first.
///
/// Elements are meant to be small `(rank, key)` pairs, with the actual search
/// nodes living elsewhere.
#[derive(Debug, Clone)]
pub struct OpenList<T: Ord> {
    heap: Vec<T>,
}

impl<T: Ord> OpenList<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    #[inline(always)]
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn push(&mut self, e: T) {
        self.heap.push(e);
        self.sift_up(self.heap.len() - 1);
        self.verify_heap();
    }

    #[must_use]
    pub fn pop(&mut self) -> Option<T> {
        match self.heap.len() {
            0 | 1 => self.heap.pop(),
            _ => {
                let top = self.heap.swap_remove(0);
                self.sift_down(0);
                self.verify_heap();
                Some(top)
            }
        }
    }

    /// Raises a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, mut pos: usize) -> usize {
        debug_assert!(pos < self.heap.len(), "Index out of bounds...");

        while pos != 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();
        debug_assert!(index < len, "Index out of bounds...");

        loop {
            // Find the best child
            let first = down_left(index);
            if first >= len {
                break;
            }
            debug_assert_eq!(first + HEAP_ARITY, down_right(index) + 1);
            let last = min(first + HEAP_ARITY, len);
            let mut child = first;
            for i in first + 1..last {
                if self.heap[i] < self.heap[child] {
                    child = i;
                }
            }

            if self.heap[index] <= self.heap[child] {
                break;
            }

            self.heap.swap(index, child);
            index = child;
        }
        index
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify_heap(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}] !<= child [{i}]. Out of heap of len={}",
                self.heap.len(),
            );
        }
    }
}

impl<T: Ord> Default for OpenList<T> {
    fn default() -> Self {
        Self::new()
    }
}
