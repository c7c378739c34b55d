//! Graph-to-sequence alignment.
//!
//! The query must be consumed completely while the alignment may enter and
//! leave the graph anywhere inside the aligned region. Row 0 of the score
//! table is a virtual start preceding every region node.
use crate::{Alignment, EditOp, GraphError, NodeId, PartialOrderGraph, Result};
use crate::{SINK_ID, SOURCE_ID};

const NEG: i32 = std::i32::MIN / 2;
const OUTSIDE: usize = std::usize::MAX;

/// Scratch space of the aligner. Reuse one instance across many alignments
/// to avoid reallocating the score table.
#[derive(Debug, Clone, Default)]
pub struct AlignmentBuffers {
    dp: Vec<i32>,
    row_start: Vec<usize>,
    band: Vec<(usize, usize)>,
    region: Vec<NodeId>,
    local: Vec<usize>,
    preds: Vec<Vec<usize>>,
    dists: Vec<(usize, usize)>,
}

impl AlignmentBuffers {
    pub fn new() -> Self {
        Self::default()
    }
    /// Number of score cells currently allocated.
    pub fn capacity(&self) -> usize {
        self.dp.capacity()
    }
    pub fn clear(&mut self) {
        self.dp.clear();
        self.row_start.clear();
        self.band.clear();
        self.region.clear();
        self.local.clear();
        self.preds.iter_mut().for_each(Vec::clear);
        self.dists.clear();
    }
    fn set_region(&mut self, graph: &PartialOrderGraph, range: Option<(NodeId, NodeId)>) {
        let order = graph.order();
        let (start, end) = match range {
            Some((from, to)) => {
                let start = graph.rank[from] + 1;
                (start, graph.rank[to].max(start))
            }
            None => (0, order.len()),
        };
        self.region.clear();
        self.region.extend(
            order[start..end]
                .iter()
                .copied()
                .filter(|&n| n != SOURCE_ID && n != SINK_ID),
        );
        self.local.clear();
        self.local.resize(graph.num_nodes(), OUTSIDE);
        for (row, &node) in self.region.iter().enumerate() {
            self.local[node] = row + 1;
        }
        let rows = self.region.len() + 1;
        self.preds.iter_mut().for_each(Vec::clear);
        if self.preds.len() < rows {
            self.preds.resize_with(rows, Vec::new);
        }
        self.dists.clear();
        self.dists.push((0, 0));
        for row in 1..rows {
            let node = &graph.nodes()[self.region[row - 1]];
            let local = &self.local;
            let dists = &self.dists;
            let preds = &mut self.preds[row];
            preds.extend(
                node.in_edges()
                    .iter()
                    .map(|&p| local[p])
                    .filter(|&p| p != OUTSIDE),
            );
            let dist = preds
                .iter()
                .map(|&p| dists[p])
                .fold(None, |acc: Option<(usize, usize)>, (min, max)| match acc {
                    Some((a, b)) => Some((a.min(min), b.max(max))),
                    None => Some((min, max)),
                })
                .map(|(min, max)| (min + 1, max + 1))
                .unwrap_or((1, 1));
            self.dists.push(dist);
        }
    }
    fn set_band(&mut self, qlen: usize, band_width: Option<usize>) {
        self.band.clear();
        self.row_start.clear();
        self.band.push((0, qlen));
        self.row_start.push(0);
        let mut total = qlen + 1;
        for row in 1..=self.region.len() {
            let (lo, hi) = match band_width {
                Some(w) => {
                    let (min, max) = self.dists[row];
                    (min.saturating_sub(w).min(qlen), (max + w).min(qlen))
                }
                None => (0, qlen),
            };
            self.band.push((lo, hi));
            self.row_start.push(total);
            total += hi - lo + 1;
        }
        self.dp.clear();
        self.dp.resize(total, NEG);
    }
    #[inline]
    fn get(&self, row: usize, column: usize) -> i32 {
        let (lo, hi) = self.band[row];
        if column < lo || hi < column {
            NEG
        } else {
            self.dp[self.row_start[row] + column - lo]
        }
    }
    #[inline]
    fn set(&mut self, row: usize, column: usize, score: i32) {
        let (lo, _) = self.band[row];
        self.dp[self.row_start[row] + column - lo] = score;
    }
    // The best row ending at the last column, if any region node reaches it.
    fn best_end(&self, qlen: usize) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for row in 1..=self.region.len() {
            let score = self.get(row, qlen);
            if score > NEG / 2 && best.map(|(_, s)| s < score).unwrap_or(true) {
                best = Some((row, score));
            }
        }
        best.map(|(row, _)| row)
    }
}

impl PartialOrderGraph {
    /// Unbanded alignment against the whole graph.
    pub fn align_full(&self, seq: &[u8], buffers: &mut AlignmentBuffers) -> Result<Alignment> {
        self.align_region(seq, None, None, buffers)
    }
    /// Banded alignment against the nodes strictly between the two anchors
    /// of `range`, or against the whole graph.
    pub fn align_banded(
        &self,
        seq: &[u8],
        band_width: usize,
        range: Option<(NodeId, NodeId)>,
        buffers: &mut AlignmentBuffers,
    ) -> Result<Alignment> {
        self.align_region(seq, Some(band_width), range, buffers)
    }
    fn align_region(
        &self,
        seq: &[u8],
        band_width: Option<usize>,
        range: Option<(NodeId, NodeId)>,
        buffers: &mut AlignmentBuffers,
    ) -> Result<Alignment> {
        if !self.is_sorted() {
            return Err(GraphError::Unsorted);
        }
        if let Some((from, to)) = range {
            self.check_node(from)?;
            self.check_node(to)?;
        }
        buffers.set_region(self, range);
        let mut end_row = None;
        if band_width.is_some() {
            buffers.set_band(seq.len(), band_width);
            self.fill(seq, buffers);
            end_row = buffers.best_end(seq.len());
            if end_row.is_none() && !buffers.region.is_empty() {
                debug!(
                    "Band {:?} missed the end of {} nodes. Retry without band.",
                    band_width,
                    buffers.region.len()
                );
            }
        }
        let end_row = match end_row {
            Some(row) => row,
            None => {
                buffers.set_band(seq.len(), None);
                self.fill(seq, buffers);
                buffers.best_end(seq.len()).unwrap_or(0)
            }
        };
        let (score, ops) = self.traceback(seq, buffers, end_row)?;
        Ok(Alignment {
            ops,
            score,
            anchor: range.map(|(from, _)| from),
        })
    }
    fn fill(&self, seq: &[u8], buffers: &mut AlignmentBuffers) {
        let gap = self.config.gap;
        for j in 0..=seq.len() {
            buffers.set(0, j, gap * j as i32);
        }
        for row in 1..=buffers.region.len() {
            let base = self.nodes[buffers.region[row - 1]].base();
            let (lo, hi) = buffers.band[row];
            for j in lo..=hi {
                let score = {
                    let preds = &buffers.preds[row];
                    let mut best = NEG;
                    if j > 0 {
                        let s = self.config.score(base, seq[j - 1]);
                        best = best.max(buffers.get(0, j - 1) + s);
                        for &p in preds {
                            best = best.max(buffers.get(p, j - 1) + s);
                        }
                        best = best.max(buffers.get(row, j - 1) + gap);
                    }
                    for &p in preds {
                        best = best.max(buffers.get(p, j) + gap);
                    }
                    best.max(NEG)
                };
                buffers.set(row, j, score);
            }
        }
    }
    fn traceback(
        &self,
        seq: &[u8],
        buffers: &AlignmentBuffers,
        end_row: usize,
    ) -> Result<(i32, Vec<EditOp>)> {
        let gap = self.config.gap;
        let (mut row, mut j) = (end_row, seq.len());
        let score = buffers.get(row, j);
        let mut ops = Vec::with_capacity(seq.len() + seq.len() / 4);
        'outer: while row > 0 {
            let node = buffers.region[row - 1];
            let current = buffers.get(row, j);
            let preds = &buffers.preds[row];
            if j > 0 {
                let s = self.config.score(self.nodes[node].base(), seq[j - 1]);
                for &p in preds.iter().chain(std::iter::once(&0)) {
                    if buffers.get(p, j - 1) + s == current {
                        ops.push(EditOp::Match(node, j - 1));
                        row = p;
                        j -= 1;
                        continue 'outer;
                    }
                }
            }
            for &p in preds {
                if buffers.get(p, j) + gap == current {
                    ops.push(EditOp::Deletion(node));
                    row = p;
                    continue 'outer;
                }
            }
            if j > 0 && buffers.get(row, j - 1) + gap == current {
                ops.push(EditOp::Insertion(j - 1));
                j -= 1;
                continue 'outer;
            }
            return Err(GraphError::Traceback { row, column: j });
        }
        while j > 0 {
            ops.push(EditOp::Insertion(j - 1));
            j -= 1;
        }
        ops.reverse();
        Ok((score, ops))
    }
}
