//! A partial order alignment graph, built one read at a time.
//!
//! Nodes live in an arena and are addressed by stable ids. Two sentinel nodes
//! are allocated up front: [SOURCE_ID] precedes every path and [SINK_ID]
//! follows every path that runs to the end. The first sequence added to an
//! empty graph (the backbone) occupies ids starting at [FIRST_BACKBONE_ID], so
//! backbone position `p` is node `FIRST_BACKBONE_ID + p`.
//!
//! Every [add_path](PartialOrderGraph::add_path) must be followed by a
//! [topological_sort](PartialOrderGraph::topological_sort) before the next
//! alignment. The order is kept as a permutation of node ids; nodes never move.
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;
mod config;
pub use config::*;
mod error;
pub use error::*;
pub mod node;
use node::Node;
mod add_path;
mod align;
pub use align::AlignmentBuffers;
mod consensus;
pub use consensus::Consensus;
mod formatters;
pub mod gen_sample;
mod topological_sort;

pub type NodeId = usize;
pub const SOURCE_ID: NodeId = 0;
pub const SINK_ID: NodeId = 1;
pub const FIRST_BACKBONE_ID: NodeId = 2;

// Edit operation. Positions refer to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Match(NodeId, usize),
    Deletion(NodeId),
    Insertion(usize),
}

/// Result of aligning one sequence against the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    ops: Vec<EditOp>,
    score: i32,
    anchor: Option<NodeId>,
}

impl Alignment {
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }
    pub fn score(&self) -> i32 {
        self.score
    }
    /// The node the path should hang from, if the alignment was restricted
    /// to a sub-range of the graph.
    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }
}

/// The protocol a window drives its graph through.
pub trait AlignmentEngine: Sized {
    const SOURCE_ID: NodeId;
    const SINK_ID: NodeId;
    const FIRST_BACKBONE_ID: NodeId;
    fn init(config: &AlignmentConfig) -> Self;
    fn align_full(&self, seq: &[u8], buffers: &mut AlignmentBuffers) -> Result<Alignment>;
    fn align_banded(
        &self,
        seq: &[u8],
        band_width: usize,
        range: Option<(NodeId, NodeId)>,
        buffers: &mut AlignmentBuffers,
    ) -> Result<Alignment>;
    fn add_path(
        &mut self,
        seq: &[u8],
        weights: &[f64],
        layer: usize,
        alignment: &Alignment,
        sink: Option<NodeId>,
    ) -> Result<()>;
    fn topological_sort(&mut self);
    fn build_consensus(&self) -> Result<Consensus>;
}

pub type POG = PartialOrderGraph;
#[derive(Clone)]
pub struct PartialOrderGraph {
    nodes: Vec<Node>,
    config: AlignmentConfig,
    num_paths: usize,
    sorted: bool,
    order: Vec<NodeId>,
    rank: Vec<usize>,
    dfs_flag: Vec<u8>,
    dfs_stack: Vec<NodeId>,
}

impl Default for PartialOrderGraph {
    fn default() -> Self {
        Self::new(&AlignmentConfig::default())
    }
}

impl PartialOrderGraph {
    pub fn new(config: &AlignmentConfig) -> Self {
        Self {
            nodes: vec![Node::sentinel(), Node::sentinel()],
            config: *config,
            num_paths: 0,
            sorted: true,
            order: vec![SOURCE_ID, SINK_ID],
            rank: vec![0, 1],
            dfs_flag: vec![],
            dfs_stack: vec![],
        }
    }
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
    pub fn num_edges(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>()
    }
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }
    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }
    /// Node ids in topological order, as of the last sort.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }
    pub fn rank(&self, node: NodeId) -> Option<usize> {
        self.rank.get(node).copied()
    }
    pub fn backbone_node(position: usize) -> NodeId {
        FIRST_BACKBONE_ID + position
    }
    fn is_sorted(&self) -> bool {
        self.sorted && self.rank.len() == self.nodes.len()
    }
    fn check_node(&self, id: NodeId) -> Result<()> {
        if id < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode {
                id,
                num_nodes: self.nodes.len(),
            })
        }
    }
    fn link(&mut self, from: NodeId, to: NodeId, w: f64) {
        if self.nodes[from].add(w, to) {
            self.nodes[to].in_edges.push(from);
        }
    }
    /// Align `seq` against the whole graph and add it as a path running to
    /// the sink, with unit weights.
    pub fn add_default(&mut self, seq: &[u8], layer: usize) -> Result<()> {
        let mut buffers = AlignmentBuffers::default();
        let alignment = self.align_full(seq, &mut buffers)?;
        let weights = vec![1.; seq.len()];
        self.add_path(seq, &weights, layer, &alignment, Some(SINK_ID))?;
        self.topological_sort();
        Ok(())
    }
    pub fn view(&self, seq: &[u8], alignment: &Alignment) -> (String, String) {
        let (mut q, mut g) = (String::new(), String::new());
        for &op in alignment.ops() {
            match op {
                EditOp::Deletion(g_pos) => {
                    q.push('-');
                    g.push(self.nodes[g_pos].base() as char);
                }
                EditOp::Insertion(q_pos) => {
                    g.push('-');
                    q.push(seq[q_pos] as char);
                }
                EditOp::Match(g_pos, q_pos) => {
                    g.push(self.nodes[g_pos].base() as char);
                    q.push(seq[q_pos] as char);
                }
            }
        }
        (q, g)
    }
}

impl AlignmentEngine for PartialOrderGraph {
    const SOURCE_ID: NodeId = SOURCE_ID;
    const SINK_ID: NodeId = SINK_ID;
    const FIRST_BACKBONE_ID: NodeId = FIRST_BACKBONE_ID;
    fn init(config: &AlignmentConfig) -> Self {
        Self::new(config)
    }
    fn align_full(&self, seq: &[u8], buffers: &mut AlignmentBuffers) -> Result<Alignment> {
        PartialOrderGraph::align_full(self, seq, buffers)
    }
    fn align_banded(
        &self,
        seq: &[u8],
        band_width: usize,
        range: Option<(NodeId, NodeId)>,
        buffers: &mut AlignmentBuffers,
    ) -> Result<Alignment> {
        PartialOrderGraph::align_banded(self, seq, band_width, range, buffers)
    }
    fn add_path(
        &mut self,
        seq: &[u8],
        weights: &[f64],
        layer: usize,
        alignment: &Alignment,
        sink: Option<NodeId>,
    ) -> Result<()> {
        PartialOrderGraph::add_path(self, seq, weights, layer, alignment, sink)
    }
    fn topological_sort(&mut self) {
        PartialOrderGraph::topological_sort(self)
    }
    fn build_consensus(&self) -> Result<Consensus> {
        PartialOrderGraph::build_consensus(self)
    }
}
