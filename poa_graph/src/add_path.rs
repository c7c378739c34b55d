use crate::node::{Node, SENTINEL};
use crate::{Alignment, EditOp, GraphError, NodeId, PartialOrderGraph, Result, SOURCE_ID};
impl PartialOrderGraph {
    /// Thread `seq` through the graph along `alignment`.
    ///
    /// The path hangs from the alignment's anchor (or the source) and, when
    /// `sink` is given, is joined to it after the last base. `weights[i]` is
    /// added to the node and the incoming edge of the i-th base. The graph is
    /// left unchanged on error.
    pub fn add_path(
        &mut self,
        seq: &[u8],
        weights: &[f64],
        layer: usize,
        alignment: &Alignment,
        sink: Option<NodeId>,
    ) -> Result<()> {
        if seq.len() != weights.len() {
            return Err(GraphError::LengthMismatch {
                sequence: seq.len(),
                weights: weights.len(),
            });
        }
        if let Some(anchor) = alignment.anchor() {
            self.check_node(anchor)?;
        }
        if let Some(sink) = sink {
            self.check_node(sink)?;
        }
        for (position, op) in alignment.ops().iter().enumerate() {
            let (node, query_pos) = match *op {
                EditOp::Match(node, q) => (Some(node), Some(q)),
                EditOp::Deletion(node) => (Some(node), None),
                EditOp::Insertion(q) => (None, Some(q)),
            };
            if let Some(id) = node {
                self.check_node(id)?;
                if self.nodes[id].base() == SENTINEL {
                    return Err(GraphError::SentinelInPath { position, id });
                }
            }
            match query_pos {
                Some(q) if q >= seq.len() => {
                    return Err(GraphError::QueryOutOfRange {
                        position,
                        query_pos: q,
                        query_len: seq.len(),
                    })
                }
                _ => {}
            }
        }
        let mut previous = alignment.anchor().unwrap_or(SOURCE_ID);
        let mut last_weight = None;
        for op in alignment.ops() {
            let (q, position) = match *op {
                EditOp::Match(to, q) => (q, self.matching_node(to, seq[q])),
                EditOp::Insertion(q) => (q, self.push_node(seq[q])),
                EditOp::Deletion(_) => continue,
            };
            let w = weights[q];
            self.nodes[position].add_weight(w);
            self.nodes[position].add_layer(layer);
            self.link(previous, position, w);
            previous = position;
            last_weight = Some(w);
        }
        if let (Some(sink), Some(w)) = (sink, last_weight) {
            self.link(previous, sink, w);
        }
        self.num_paths += 1;
        self.sorted = false;
        Ok(())
    }
    fn push_node(&mut self, base: u8) -> NodeId {
        self.nodes.push(Node::new(base));
        self.nodes.len() - 1
    }
    // The node of `to`'s column carrying `base`, created if the column lacks it.
    fn matching_node(&mut self, to: NodeId, base: u8) -> NodeId {
        if self.nodes[to].base().eq_ignore_ascii_case(&base) {
            return to;
        }
        let tied = self.nodes[to]
            .aligned()
            .iter()
            .copied()
            .find(|&a| self.nodes[a].base().eq_ignore_ascii_case(&base));
        if let Some(tied) = tied {
            return tied;
        }
        let position = self.push_node(base);
        let column: Vec<_> = std::iter::once(to)
            .chain(self.nodes[to].aligned().iter().copied())
            .collect();
        for &member in column.iter() {
            self.nodes[member].aligned.push(position);
        }
        self.nodes[position].aligned = column;
        position
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    #[test]
    fn seed_path() {
        let mut graph = POG::default();
        graph.add_default(b"ACGT", 0).unwrap();
        assert_eq!(graph.num_nodes(), 6);
        // source -> A -> C -> G -> T -> sink
        assert_eq!(graph.num_edges(), 5);
        assert_eq!(graph.nodes()[SOURCE_ID].edges(), &[FIRST_BACKBONE_ID]);
        assert_eq!(graph.nodes()[FIRST_BACKBONE_ID + 3].edges(), &[SINK_ID]);
        let bases: Vec<_> = (0..4)
            .map(|i| graph.nodes()[POG::backbone_node(i)].base())
            .collect();
        assert_eq!(bases, b"ACGT");
        assert_eq!(graph.num_paths(), 1);
    }
    #[test]
    fn mismatch_reuses_column() {
        let seed = b"ACGTAGCTGATCGTAC";
        let seq2 = b"ACGTAGCTGATCGGAC";
        let mut graph = POG::default();
        graph.add_default(seed, 0).unwrap();
        graph.add_default(seq2, 1).unwrap();
        assert_eq!(graph.num_nodes(), seed.len() + 3);
        let new_node = seed.len() + 2;
        let column = POG::backbone_node(13);
        assert_eq!(graph.nodes()[new_node].base(), b'G');
        assert_eq!(graph.nodes()[new_node].aligned(), &[column]);
        assert_eq!(graph.nodes()[column].aligned(), &[new_node]);
        graph.add_default(seq2, 2).unwrap();
        assert_eq!(graph.num_nodes(), seed.len() + 3);
        assert_eq!(graph.nodes()[new_node].coverage(), 2);
    }
    #[test]
    fn rejects_bad_input() {
        let mut graph = POG::default();
        graph.add_default(b"ACGT", 0).unwrap();
        let mut buffers = AlignmentBuffers::new();
        let aln = graph.align_full(b"ACGT", &mut buffers).unwrap();
        let (nodes, edges) = (graph.num_nodes(), graph.num_edges());
        assert!(matches!(
            graph.add_path(b"ACGT", &[1.; 3], 1, &aln, Some(SINK_ID)),
            Err(GraphError::LengthMismatch { .. })
        ));
        assert!(matches!(
            graph.add_path(b"ACGT", &[1.; 4], 1, &aln, Some(100)),
            Err(GraphError::UnknownNode { id: 100, .. })
        ));
        assert!(matches!(
            graph.add_path(b"ACG", &[1.; 3], 1, &aln, Some(SINK_ID)),
            Err(GraphError::QueryOutOfRange { .. })
        ));
        assert_eq!(graph.num_nodes(), nodes);
        assert_eq!(graph.num_edges(), edges);
        assert_eq!(graph.num_paths(), 1);
    }
}
