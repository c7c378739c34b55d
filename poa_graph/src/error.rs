use crate::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{weights} weights given for a sequence of length {sequence}")]
    LengthMismatch { sequence: usize, weights: usize },
    #[error("node {id} does not exist (graph has {num_nodes} nodes)")]
    UnknownNode { id: NodeId, num_nodes: usize },
    #[error("operation {position} refers to query position {query_pos}, query has length {query_len}")]
    QueryOutOfRange {
        position: usize,
        query_pos: usize,
        query_len: usize,
    },
    #[error("operation {position} places a query base on sentinel node {id}")]
    SentinelInPath { position: usize, id: NodeId },
    #[error("topological order is stale, sort the graph after adding a path")]
    Unsorted,
    #[error("the graph has no path from the source to the sink")]
    EmptyGraph,
    #[error("traceback stuck at row {row}, column {column}")]
    Traceback { row: usize, column: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("match score must be positive, got {0}")]
    MatchScore(i32),
    #[error("mismatch score must be negative, got {0}")]
    Mismatch(i32),
    #[error("gap score must be negative, got {0}")]
    Gap(i32),
    #[error("band width must be nonzero")]
    BandWidth,
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
