// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad tree over extent-bearing items with point-location queries.
//!
//! Items are stored at the shallowest node whose extent fully contains them: an item is pushed
//! into a child quadrant only when that quadrant contains its whole extent, otherwise it stays
//! at the current level. Quadrants are disjoint (up to shared borders), so insertion descends
//! into at most one child per level.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt::Debug;

use crate::types::Range2d;

/// An item that can be stored in a [`QuadTree`].
pub trait QuadItem {
    /// Conservative planar extent of the item.
    fn extent(&self) -> Range2d;

    /// Exact point-in-item test. Only called for points inside [`QuadItem::extent`].
    fn is_point_in(&self, x: f64, y: f64) -> bool;
}

impl QuadItem for Range2d {
    fn extent(&self) -> Range2d {
        *self
    }

    fn is_point_in(&self, x: f64, y: f64) -> bool {
        self.contains_xy(x, y)
    }
}

/// Tuning for [`QuadTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadTreeOptions {
    /// Maximum subdivision depth. The root is at depth 0.
    pub max_depth: usize,
}

impl Default for QuadTreeOptions {
    fn default() -> Self {
        Self { max_depth: 16 }
    }
}

#[derive(Clone, Debug)]
struct QuadNode {
    extent: Range2d,
    children: Option<Box<[QuadNode; 4]>>,
    items: Vec<usize>,
}

impl QuadNode {
    fn new(extent: Range2d) -> Self {
        Self {
            extent,
            children: None,
            items: Vec::new(),
        }
    }

    fn insert(&mut self, slot: usize, extent: &Range2d, depth: usize, max_depth: usize) {
        if depth < max_depth
            && let Some(q) = (0..4).find(|&q| extent.is_contained_in(&self.extent.quadrant(q)))
        {
            let parent = self.extent;
            let children = self.children.get_or_insert_with(|| {
                Box::new([
                    Self::new(parent.quadrant(0)),
                    Self::new(parent.quadrant(1)),
                    Self::new(parent.quadrant(2)),
                    Self::new(parent.quadrant(3)),
                ])
            });
            children[q].insert(slot, extent, depth + 1, max_depth);
            return;
        }
        self.items.push(slot);
    }

    fn collect<'a, I: QuadItem>(&self, x: f64, y: f64, items: &'a [I], out: &mut Vec<&'a I>) {
        if let Some(children) = &self.children {
            for child in children.iter() {
                if child.extent.contains_xy(x, y) {
                    child.collect(x, y, items, out);
                }
            }
        }
        for &slot in &self.items {
            let item = &items[slot];
            if hits(item, x, y) {
                out.push(item);
            }
        }
    }

    fn find_first<I: QuadItem>(&self, x: f64, y: f64, items: &[I]) -> Option<usize> {
        if let Some(children) = &self.children {
            for child in children.iter() {
                if child.extent.contains_xy(x, y)
                    && let Some(slot) = child.find_first(x, y, items)
                {
                    return Some(slot);
                }
            }
        }
        self.items
            .iter()
            .copied()
            .find(|&slot| hits(&items[slot], x, y))
    }

    fn depth(&self) -> usize {
        self.children
            .as_ref()
            .map(|c| 1 + c.iter().map(Self::depth).max().unwrap_or(0))
            .unwrap_or(0)
    }

    fn node_count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map(|c| c.iter().map(Self::node_count).sum())
            .unwrap_or(0)
    }
}

fn hits<I: QuadItem>(item: &I, x: f64, y: f64) -> bool {
    item.extent().contains_xy(x, y) && item.is_point_in(x, y)
}

/// A quad tree with a fixed root extent.
///
/// Cloning performs a deep copy of the node hierarchy and the items.
///
/// # Example
///
/// ```
/// use strata_index::{QuadTree, Range2d};
///
/// let mut tree = QuadTree::new(Range2d::new(0.0, 0.0, 100.0, 100.0));
/// assert!(tree.add_item(Range2d::new(10.0, 10.0, 20.0, 20.0)));
/// assert!(tree.add_item(Range2d::new(40.0, 40.0, 60.0, 60.0)));
/// assert!(!tree.add_item(Range2d::new(200.0, 200.0, 210.0, 210.0)));
///
/// assert_eq!(tree.query(15.0, 15.0).len(), 1);
/// assert!(tree.query_single(50.0, 50.0).is_some());
/// ```
#[derive(Clone)]
pub struct QuadTree<I> {
    root: QuadNode,
    items: Vec<I>,
    options: QuadTreeOptions,
    last_found: Cell<Option<usize>>,
}

impl<I> Debug for QuadTree<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("extent", &self.root.extent)
            .field("items", &self.items.len())
            .field("nodes", &self.root.node_count())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<I: QuadItem> QuadTree<I> {
    /// Create an empty tree covering `extent`.
    pub fn new(extent: Range2d) -> Self {
        Self::with_options(extent, QuadTreeOptions::default())
    }

    /// Create an empty tree covering `extent` with explicit options.
    pub fn with_options(extent: Range2d, options: QuadTreeOptions) -> Self {
        Self {
            root: QuadNode::new(extent),
            items: Vec::new(),
            options,
            last_found: Cell::new(None),
        }
    }

    /// Add an item.
    ///
    /// Returns `false` (and drops the item) if its extent does not intersect the root extent.
    /// Items that overlap the root extent without fitting inside it are kept at the root.
    pub fn add_item(&mut self, item: I) -> bool {
        let extent = item.extent();
        if extent.intersect(&self.root.extent).is_none() {
            return false;
        }
        let slot = self.items.len();
        self.items.push(item);
        if extent.is_contained_in(&self.root.extent) {
            self.root.insert(slot, &extent, 0, self.options.max_depth);
        } else {
            self.root.items.push(slot);
        }
        true
    }

    /// All items whose extent contains `(x, y)` and whose [`QuadItem::is_point_in`] holds.
    ///
    /// Items of deeper nodes come first. No other ordering is guaranteed.
    pub fn query(&self, x: f64, y: f64) -> Vec<&I> {
        let mut out = Vec::new();
        self.root.collect(x, y, &self.items, &mut out);
        out
    }

    /// The first item found for `(x, y)` by the same traversal as [`QuadTree::query`].
    ///
    /// The most recent result is cached and returned again while it still contains the query
    /// point. When several items match, which one is returned is unspecified.
    pub fn query_single(&self, x: f64, y: f64) -> Option<&I> {
        if let Some(slot) = self.last_found.get()
            && hits(&self.items[slot], x, y)
        {
            return Some(&self.items[slot]);
        }
        let found = self.root.find_first(x, y, &self.items);
        self.last_found.set(found);
        found.map(|slot| &self.items[slot])
    }
}

impl<I> QuadTree<I> {
    /// Root extent.
    pub fn extent(&self) -> Range2d {
        self.root.extent
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no item has been stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stored items in insertion order.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Depth of the deepest node (0 for a tree that never subdivided).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
