//! Which part of the graph a layer is aligned against.
use poa_graph::{AlignmentEngine, NodeId};

/// Target of one layer alignment. `range` holds the begin and end anchors
/// (exclusive) when the layer only covers part of the backbone; `sink` is
/// the node the inserted path must run into, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentRegion {
    pub range: Option<(NodeId, NodeId)>,
    pub sink: Option<NodeId>,
}

impl AlignmentRegion {
    /// Region for a layer spanning `[begin, end)` of a backbone of length
    /// `backbone_len`. Layers reaching within 1% of both backbone ends are
    /// aligned against the whole graph.
    pub fn select<E: AlignmentEngine>(begin: u32, end: u32, backbone_len: u32) -> Self {
        let offset = backbone_len / 100;
        if begin < offset && end > backbone_len - offset {
            return Self {
                range: None,
                sink: Some(E::SINK_ID),
            };
        }
        let from = E::FIRST_BACKBONE_ID + begin as usize;
        let next = end as usize + 1;
        if next >= backbone_len as usize {
            Self {
                range: Some((from, E::SINK_ID)),
                sink: Some(E::SINK_ID),
            }
        } else {
            Self {
                range: Some((from, E::FIRST_BACKBONE_ID + next)),
                sink: None,
            }
        }
    }
    pub fn is_whole_graph(&self) -> bool {
        self.range.is_none()
    }
    /// Half-open range of the layer's bases to align. A restricted region
    /// drops the first base, which the begin anchor stands for, and the last
    /// base unless the path runs into the sink.
    pub fn query_bounds(&self, len: usize) -> (usize, usize) {
        if self.is_whole_graph() {
            return (0, len);
        }
        let start = 1.min(len);
        let stop = if self.sink.is_some() {
            len
        } else {
            len.saturating_sub(1)
        };
        (start, stop.max(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poa_graph::{PartialOrderGraph, FIRST_BACKBONE_ID, SINK_ID};
    type R = AlignmentRegion;
    #[test]
    fn whole_graph_near_both_ends() {
        let region = R::select::<PartialOrderGraph>(0, 1000, 1000);
        assert!(region.is_whole_graph());
        assert_eq!(region.sink, Some(SINK_ID));
        assert_eq!(region.query_bounds(1000), (0, 1000));
        let region = R::select::<PartialOrderGraph>(9, 991, 1000);
        assert!(region.is_whole_graph());
        // 10 is not below the 1% offset.
        let region = R::select::<PartialOrderGraph>(10, 1000, 1000);
        assert!(!region.is_whole_graph());
    }
    #[test]
    fn short_backbone_never_uses_whole_graph() {
        // Offset is zero below 100 bases.
        let region = R::select::<PartialOrderGraph>(0, 10, 10);
        assert_eq!(region.range, Some((FIRST_BACKBONE_ID, SINK_ID)));
        assert_eq!(region.sink, Some(SINK_ID));
        assert_eq!(region.query_bounds(10), (1, 10));
    }
    #[test]
    fn interior_layer() {
        let region = R::select::<PartialOrderGraph>(10, 20, 30);
        assert_eq!(
            region.range,
            Some((FIRST_BACKBONE_ID + 10, FIRST_BACKBONE_ID + 21))
        );
        assert_eq!(region.sink, None);
        assert_eq!(region.query_bounds(10), (1, 9));
        // The end anchor falls on the sink once end + 1 reaches the length.
        let region = R::select::<PartialOrderGraph>(10, 29, 30);
        assert_eq!(region.range, Some((FIRST_BACKBONE_ID + 10, SINK_ID)));
    }
    #[test]
    fn tiny_layers() {
        let region = R::select::<PartialOrderGraph>(3, 5, 30);
        assert_eq!(region.query_bounds(2), (1, 1));
        assert_eq!(region.query_bounds(1), (1, 1));
        let region = R::select::<PartialOrderGraph>(28, 30, 30);
        assert_eq!(region.query_bounds(1), (1, 1));
    }
}
