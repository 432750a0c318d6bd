// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identifiers and mask bits.

/// Identifier for a node (a half-edge leaving a vertex) in a planar graph.
///
/// Node ids are dense indices `0..node_count`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(u32);

impl NodeId {
    /// The id of the node stored at `index`.
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "node index overflows u32");
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId holds 32-bit indices; checked above in debug builds."
        )]
        Self(index as u32)
    }

    /// Index of this node.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-node mask bits.
    ///
    /// The low bits carry classification; the `SCRATCH*` bits are a pool handed out by
    /// [`FloodGraph::grab_mask`](crate::FloodGraph::grab_mask) for temporary marks such as the
    /// visit state of a flood search.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeMask: u16 {
        /// The node's face is outside the classified region.
        const EXTERIOR        = 0b0000_0000_0000_0001;
        /// The node's edge is part of an input boundary.
        const BOUNDARY        = 0b0000_0000_0000_0010;
        /// The node's face is outside the single input region that contributed the edge.
        const SINGLE_EXTERIOR = 0b0000_0000_0000_0100;
        /// Scratch bit 0.
        const SCRATCH0        = 0b0000_0001_0000_0000;
        /// Scratch bit 1.
        const SCRATCH1        = 0b0000_0010_0000_0000;
        /// Scratch bit 2.
        const SCRATCH2        = 0b0000_0100_0000_0000;
        /// Scratch bit 3.
        const SCRATCH3        = 0b0000_1000_0000_0000;
    }
}

impl NodeMask {
    /// Every scratch bit.
    pub const SCRATCH: Self = Self::SCRATCH0
        .union(Self::SCRATCH1)
        .union(Self::SCRATCH2)
        .union(Self::SCRATCH3);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_round_trips_index() {
        assert_eq!(NodeId::from_index(17).index(), 17);
        assert!(NodeId::from_index(2) < NodeId::from_index(3));
    }

    #[test]
    fn scratch_pool_is_disjoint_from_classification_bits() {
        let classification = NodeMask::EXTERIOR | NodeMask::BOUNDARY | NodeMask::SINGLE_EXTERIOR;
        assert!(!NodeMask::SCRATCH.intersects(classification));
        assert_eq!(NodeMask::SCRATCH.iter().count(), 4);
    }
}
