use crate::{GraphError, NodeId, PartialOrderGraph, Result, SINK_ID, SOURCE_ID};
use std::cmp::Ordering;

/// The heaviest path through the graph together with, for each of its
/// bases, the number of layers passing through that node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consensus {
    pub sequence: Vec<u8>,
    pub coverages: Vec<u32>,
}

impl Consensus {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl PartialOrderGraph {
    /// Heaviest bundle from the source to the sink. Each node keeps the
    /// predecessor with the heaviest incoming edge, ties going to the
    /// predecessor with the larger accumulated score.
    pub fn build_consensus(&self) -> Result<Consensus> {
        if !self.is_sorted() {
            return Err(GraphError::Unsorted);
        }
        let len = self.nodes.len();
        let mut scores = vec![std::f64::NEG_INFINITY; len];
        let mut predecessor: Vec<Option<NodeId>> = vec![None; len];
        scores[SOURCE_ID] = 0.;
        for &node in self.order.iter().filter(|&&n| n != SOURCE_ID) {
            let best = self.nodes[node]
                .in_edges()
                .iter()
                .filter(|&&p| scores[p].is_finite())
                .map(|&p| (p, self.nodes[p].to(node).unwrap_or(0.)))
                .max_by(|a, b| match (a.1).partial_cmp(&b.1) {
                    Some(Ordering::Equal) | None => scores[a.0]
                        .partial_cmp(&scores[b.0])
                        .unwrap_or(Ordering::Equal),
                    Some(x) => x,
                });
            if let Some((p, w)) = best {
                scores[node] = scores[p] + w;
                predecessor[node] = Some(p);
            }
        }
        let mut path = vec![];
        let mut node = predecessor[SINK_ID].ok_or(GraphError::EmptyGraph)?;
        while node != SOURCE_ID {
            path.push(node);
            node = predecessor[node].ok_or(GraphError::EmptyGraph)?;
        }
        path.reverse();
        trace!("Consensus score:{:.2}", scores[SINK_ID]);
        Ok(Consensus {
            sequence: path.iter().map(|&n| self.nodes[n].base()).collect(),
            coverages: path
                .iter()
                .map(|&n| self.nodes[n].coverage() as u32)
                .collect(),
        })
    }
}
